//! Auth pages: signup, verify, login, logout

use crate::api::{self, ApiClient, ApiError};
use crate::stores::SessionStore;
use crate::utils::validate;

/// Create an account. Field validation runs first; an invalid form
/// issues no request.
pub async fn signup(
    client: &ApiClient,
    username: &str,
    email: &str,
    password: &str,
) -> Result<(), ApiError> {
    note_existing_session(client);
    validate::validate_signup(username, email, password)?;

    let response = api::auth::signup(client, username, email, password).await?;
    if !response.message.is_empty() {
        println!("{}", response.message);
    }
    println!("Signed up successfully!");
    println!(
        "Check your email for the verification code, then run: moodify verify --username {} --code <code>",
        username
    );
    Ok(())
}

/// Confirm the account with the emailed OTP
pub async fn verify(client: &ApiClient, username: &str, code: u32) -> Result<(), ApiError> {
    let response = api::auth::verify(client, username, code).await?;
    if !response.message.is_empty() {
        println!("{}", response.message);
    }
    println!("Account verified! You can now log in with: moodify login");
    Ok(())
}

/// Log in and store the session token
pub async fn login(
    client: &ApiClient,
    session: &SessionStore,
    email: &str,
    password: &str,
) -> Result<(), ApiError> {
    note_existing_session(client);
    validate::validate_login(email, password)?;

    let response = api::auth::login(client, email, password).await?;
    if response.access_token.is_none() {
        let message = if response.message.is_empty() {
            "Login failed".to_string()
        } else {
            response.message
        };
        return Err(ApiError::Auth(message));
    }

    println!("Logged in successfully!");

    // populate the session context for this token lifecycle; a failure
    // here should not undo the login
    let _ = session.sync(client).await;

    if let Ok(user) = api::users::me(client).await {
        println!("Welcome back, {}!", user.username);
        println!("Avatar: {}", user.avatar());
    }
    Ok(())
}

/// End the session and drop the stored token
pub async fn logout(client: &ApiClient) -> Result<(), ApiError> {
    super::require_login(client.tokens())?;
    api::auth::logout(client).await?;
    println!("Logged out.");
    Ok(())
}

fn note_existing_session(client: &ApiClient) {
    if client.tokens().is_authenticated() {
        println!("Note: you are already logged in; the existing session will be replaced.");
    }
}
