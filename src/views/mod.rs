//! Terminal presentation layer
//!
//! One module per page of the original app. Views render stores and
//! workflow results; the only logic they own is selection, filtering
//! and pagination.

pub mod auth;
pub mod dashboard;
pub mod favorites;
pub mod history;
pub mod profile;

use crate::api::ApiError;
use crate::stores::TokenStore;

/// Guard for protected commands, the CLI analog of the route
/// middleware: no token means no request is ever issued.
pub(crate) fn require_login(tokens: &TokenStore) -> Result<(), ApiError> {
    if tokens.is_authenticated() {
        Ok(())
    } else {
        Err(ApiError::Auth(
            "You are not logged in. Run `moodify login` first.".to_string(),
        ))
    }
}
