use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize)]
pub struct ErrorDto {
    pub error: String,
}

/// Body returned to the marketplace's endpoint ownership challenge.
#[derive(Serialize, Deserialize)]
pub struct ChallengeResponseDto {
    #[serde(rename = "challengeResponse")]
    pub challenge_response: String,
}
