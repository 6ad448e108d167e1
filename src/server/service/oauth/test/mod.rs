use crate::server::{
    error::auth::AuthError,
    service::{
        oauth::SCOPES,
        test::{oauth, TEST_AUTH_URL, TEST_RUNAME},
    },
};
use test_utils::{
    builder::{GrantType, TestBuilder},
    error::TestError,
    factory,
};
