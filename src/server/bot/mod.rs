//! Discord side of the bot.
//!
//! The bot registers the slash commands operators use to authorize the marketplace account and
//! manage notification destinations, and provides the Discord implementations of the
//! `AuthorizationAwaiter` and `NotificationSink` seams. Its HTTP client is shared with the
//! notification sink so webhook deliveries do not need their own Discord connection.
//!
//! The bot runs in a separate tokio task so it never blocks the HTTP server.

pub mod awaiter;
pub mod command;
pub mod handler;
pub mod sink;
pub mod start;
