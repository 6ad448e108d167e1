//! Persistence layer.
//!
//! The bot keeps no database; the only durable state is the marketplace token, stored in the
//! same env-style file the configuration is read from.

pub mod token_store;

#[cfg(test)]
mod test;
