//! Error hierarchy for the bot and its webhook server.
//!
//! Each concern owns an enum (`AuthError`, `WebhookError`, `ConfigError`, `InternalError`);
//! `AppError` aggregates them together with the client library errors. Axum handlers return
//! `AppError` directly, so every variant has an HTTP mapping: domain errors pick their own
//! status, anything else becomes a logged 500 with a generic body.

pub mod auth;
pub mod config;
pub mod internal;
pub mod webhook;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::{
    model::api::ErrorDto,
    server::error::{
        auth::AuthError, config::ConfigError, internal::InternalError, webhook::WebhookError,
    },
};

#[derive(Error, Debug)]
pub enum AppError {
    /// Missing or malformed environment variable. Only raised during startup.
    #[error(transparent)]
    ConfigErr(#[from] ConfigError),

    /// Token lifecycle or authorization flow failure; maps its own status.
    #[error(transparent)]
    AuthErr(#[from] AuthError),

    /// Rejected inbound notification (400 / 401).
    #[error(transparent)]
    WebhookErr(#[from] WebhookError),

    #[error(transparent)]
    InternalErr(#[from] InternalError),

    /// Transport failure talking to the marketplace.
    #[error(transparent)]
    ReqwestErr(#[from] reqwest::Error),

    /// Discord REST or gateway failure. Boxed to keep `AppError` small.
    #[error(transparent)]
    DiscordErr(#[from] Box<serenity::Error>),

    #[error(transparent)]
    SchedulerErr(#[from] tokio_cron_scheduler::JobSchedulerError),

    #[error(transparent)]
    IoErr(#[from] std::io::Error),

    /// The marketplace answered with a non-success status.
    ///
    /// `body` is kept verbatim so slash command replies can show the marketplace's own
    /// error description.
    #[error("Marketplace API returned {status}: {body}")]
    Upstream { status: u16, body: String },

    /// Caller supplied input the bot refuses to act on.
    #[error("{0}")]
    BadRequest(String),
}

impl From<serenity::Error> for AppError {
    fn from(err: serenity::Error) -> Self {
        AppError::DiscordErr(Box::new(err))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            Self::AuthErr(err) => err.into_response(),
            Self::WebhookErr(err) => err.into_response(),
            Self::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, Json(ErrorDto { error: msg })).into_response()
            }
            Self::Upstream { status, body } => {
                tracing::warn!("Marketplace API returned {}: {}", status, body);
                (
                    StatusCode::BAD_GATEWAY,
                    Json(ErrorDto {
                        error: format!("Marketplace API returned {}", status),
                    }),
                )
                    .into_response()
            }
            err => InternalServerError(err).into_response(),
        }
    }
}

/// Logs the wrapped error and answers 500 with a body that reveals nothing about it.
pub struct InternalServerError<E>(pub E);

impl<E: std::fmt::Display> IntoResponse for InternalServerError<E> {
    fn into_response(self) -> Response {
        tracing::error!("{}", self.0);

        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorDto {
                error: "Internal server error".to_string(),
            }),
        )
            .into_response()
    }
}
