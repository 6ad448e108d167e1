use thiserror::Error;

/// Conditions that only occur through a bug or a bad constant, never through user input.
#[derive(Error, Debug)]
pub enum InternalError {
    /// A notification timestamp fell outside the range Discord embeds accept.
    #[error("Timestamp {timestamp} cannot be used in a Discord embed: {reason}")]
    InvalidDiscordTimestamp { timestamp: i64, reason: String },

    /// A hard-coded marketplace endpoint failed to parse as a URL.
    #[error("Invalid marketplace endpoint URL '{url}': {reason}")]
    InvalidEndpointUrl {
        /// The URL that failed to parse
        url: String,
        /// The reason for the parse failure
        reason: String,
    },
}
