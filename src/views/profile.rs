//! Profile page: show and update the signed-in user's details

use std::path::Path;

use bytes::Bytes;

use crate::api::{self, ApiClient, ApiError};
use crate::stores::SessionStore;
use crate::utils::validate;

/// Show the current profile
pub async fn show(client: &ApiClient, session: &SessionStore) -> Result<(), ApiError> {
    super::require_login(client.tokens())?;
    session.sync(client).await?;

    let Some(user) = session.user() else {
        println!("Profile unavailable.");
        return Ok(());
    };

    println!("Profile");
    println!("  Username: {}", user.username);
    println!("  Email: {}", user.email);
    println!("  Avatar: {}", user.avatar());
    println!("  Mobile: {}", user.mobile_no);
    println!("  Location: {}", user.location);
    Ok(())
}

/// Update mobile number, location and optionally the avatar photo.
/// Validation failures issue no request.
pub async fn update(
    client: &ApiClient,
    mobile_no: &str,
    location: &str,
    photo: Option<&Path>,
) -> Result<(), ApiError> {
    super::require_login(client.tokens())?;
    validate::validate_profile(mobile_no, location)?;

    let photo = match photo {
        Some(path) => Some(read_photo(path)?),
        None => None,
    };

    api::users::update_profile(client, mobile_no, location, photo).await?;
    println!("Profile updated successfully!");
    Ok(())
}

fn read_photo(path: &Path) -> Result<(String, String, Bytes), ApiError> {
    let mime = mime_guess::from_path(path).first_or_octet_stream();
    if mime.type_().as_str() != "image" {
        return Err(ApiError::invalid(
            "profilePhoto",
            "Please choose an image file",
        ));
    }

    let data = std::fs::read(path).map_err(|e| {
        ApiError::invalid("profilePhoto", format!("Could not read photo: {}", e))
    })?;
    let filename = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "photo".to_string());

    Ok((filename, mime.to_string(), Bytes::from(data)))
}
