//! Auth endpoints: signup, verify, login, logout
//!
//! Signup, verify and login are public calls; a 401 from them means bad
//! credentials, never an expired session. Login stores the returned
//! bearer token; the refresh token arrives as a cookie and stays in the
//! jar.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{ApiClient, ApiError};

#[derive(Debug, Serialize)]
struct SignupRequest<'a> {
    username: &'a str,
    email: &'a str,
    password: &'a str,
}

#[derive(Debug, Serialize)]
struct VerifyRequest<'a> {
    username: &'a str,
    code: u32,
}

#[derive(Debug, Serialize)]
struct LoginRequest<'a> {
    email: &'a str,
    password: &'a str,
}

/// Generic `{message}` acknowledgment body
#[derive(Debug, Deserialize)]
pub struct MessageResponse {
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub access_token: Option<String>,
}

/// Create a new account. The caller validates the form first.
pub async fn signup(
    client: &ApiClient,
    username: &str,
    email: &str,
    password: &str,
) -> Result<MessageResponse, ApiError> {
    client
        .post_json_public(
            "/api/users/signup",
            &SignupRequest {
                username,
                email,
                password,
            },
        )
        .await
}

/// Confirm the account with the emailed OTP
pub async fn verify(
    client: &ApiClient,
    username: &str,
    code: u32,
) -> Result<MessageResponse, ApiError> {
    client
        .post_json_public("/api/users/verify", &VerifyRequest { username, code })
        .await
}

/// Exchange credentials for a bearer token; stores it on success
pub async fn login(
    client: &ApiClient,
    email: &str,
    password: &str,
) -> Result<LoginResponse, ApiError> {
    let response: LoginResponse = client
        .post_json_public("/api/users/login", &LoginRequest { email, password })
        .await?;

    if let Some(token) = &response.access_token {
        debug!("login succeeded, storing access token");
        client.tokens().set(Some(token.clone()));
    }

    Ok(response)
}

/// End the session server-side, then drop the local token
pub async fn logout(client: &ApiClient) -> Result<(), ApiError> {
    client
        .post_unit("/api/users/logout", &serde_json::json!({}))
        .await?;
    client.tokens().set(None);
    Ok(())
}
