//! Marketplace relay backend.
//!
//! Everything the bot does lives here: the marketplace OAuth token lifecycle, the webhook
//! endpoints the marketplace calls, the Discord bot, and the background jobs that keep the
//! token fresh.
//!
//! # Architecture
//!
//! - **Controller Layer** (`controller/`) - HTTP handlers for the webhook and OAuth callback routes
//! - **Service Layer** (`service/`) - Token manager, authorization flow, webhook verification,
//!   notification dispatch and the destination API client
//! - **Data Layer** (`data/`) - Durable token store backed by the env file
//! - **Model Layer** (`model/`) - Tokens, notifications, outcomes and destination records
//! - **Error Layer** (`error/`) - Application error types and HTTP response mapping
//!
//! # Infrastructure
//!
//! - **Configuration** (`config`) - Environment-based application configuration
//! - **State** (`state`) - Shared services handed to the HTTP handlers
//! - **Startup** (`startup`) - Tracing, HTTP and OAuth client setup, shutdown signal
//! - **Router** (`router`) - Axum route configuration
//! - **Scheduler** (`scheduler/`) - Periodic token refresh and pending authorization sweep
//! - **Bot** (`bot/`) - Slash commands and the Discord implementations of the service seams
//!
//! # Notification Flow
//!
//! 1. **Router** receives the marketplace's POST
//! 2. **Controller** checks the signature and parses the body
//! 3. **Dispatcher** is handed the notification on a spawned task and the request returns 200
//! 4. **Sink** posts the rendered embed to the configured Discord channel

pub mod bot;
pub mod config;
pub mod controller;
pub mod data;
pub mod error;
pub mod model;
pub mod router;
pub mod scheduler;
pub mod service;
pub mod startup;
pub mod state;
pub mod util;
