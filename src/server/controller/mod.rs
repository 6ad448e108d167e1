//! HTTP handlers for the marketplace-facing endpoints.
//!
//! Handlers only translate between HTTP and the services in `AppState`; notification delivery
//! and code exchange run on spawned tasks so responses never wait on Discord or the token
//! endpoint.

pub mod oauth;
pub mod webhook;

#[cfg(test)]
mod test;
