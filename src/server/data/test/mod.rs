use crate::server::{
    data::token_store::{rewrite_env, EnvFileTokenStore, TokenStore},
    model::token::Token,
};
use chrono::{Duration, Utc};
use std::collections::BTreeSet;
use test_utils::{builder::TestBuilder, error::TestError};
