//! Service layer for business logic and orchestration.
//!
//! This module contains the service layer of the application, which sits between the
//! controller (HTTP) and bot layers and the marketplace, token store and Discord. Services are
//! responsible for:
//!
//! - **Token lifecycle**: Exchanging, refreshing and persisting the marketplace token
//! - **Authorization**: Correlating consent callbacks with the operator who started them
//! - **Webhooks**: Verifying inbound notifications and presenting them for delivery
//! - **Subscriptions**: Managing notification destinations on the marketplace

pub mod authorization;
pub mod notification;
pub mod oauth;
pub mod subscription;
pub mod token;
pub mod webhook;

#[cfg(test)]
pub(crate) mod test;
