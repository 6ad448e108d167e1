use super::*;
use crate::server::{error::auth::AuthError, service::authorization::PENDING_TTL};
use test_utils::{
    builder::{GrantType, TestBuilder, TOKEN_PATH},
    error::TestError,
    factory,
};
use wiremock::{
    matchers::{body_string_contains, method, path},
    Mock, ResponseTemplate,
};

mod complete_with_code;
mod complete_with_error;
mod exchange_manual_code;
mod sweep_expired;
