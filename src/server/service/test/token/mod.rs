use super::*;
use crate::server::{data::token_store::TokenStore, error::auth::AuthError};
use std::time::Duration as StdDuration;
use test_utils::{
    builder::{GrantType, TestBuilder},
    error::TestError,
    factory,
};

mod get_valid_token;
mod install;
mod refresh;
