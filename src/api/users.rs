//! User profile endpoints

use bytes::Bytes;
use serde::Deserialize;

use super::{ApiClient, ApiError, FormPayload};
use crate::models::UserProfile;

#[derive(Debug, Deserialize)]
struct UserEnvelope {
    user: UserProfile,
}

/// Fetch the signed-in user's profile
pub async fn me(client: &ApiClient) -> Result<UserProfile, ApiError> {
    let envelope: UserEnvelope = client.get_json("/api/users/me").await?;
    Ok(envelope.user)
}

/// Update mobile number, location and optionally the profile photo
pub async fn update_profile(
    client: &ApiClient,
    mobile_no: &str,
    location: &str,
    photo: Option<(String, String, Bytes)>,
) -> Result<(), ApiError> {
    let mut form = FormPayload::new()
        .text("mobileNo", mobile_no)
        .text("location", location);

    if let Some((filename, mime, data)) = photo {
        form = form.file("profilePhoto", filename, mime, data);
    }

    client.put_multipart_unit("/api/users/user-profile", &form).await
}
