//! User profile model

use serde::{Deserialize, Serialize};

/// Placeholder shown when the profile has no photo
pub const DEFAULT_AVATAR: &str = "https://github.com/shadcn.png";

/// The authenticated user's profile
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub email: String,
    /// Avatar URL (nullable server-side)
    #[serde(default)]
    pub profile_photo: Option<String>,
    #[serde(default)]
    pub mobile_no: String,
    #[serde(default)]
    pub location: String,
}

impl UserProfile {
    /// Avatar URL, falling back to the placeholder
    pub fn avatar(&self) -> &str {
        self.profile_photo
            .as_deref()
            .filter(|p| !p.is_empty())
            .unwrap_or(DEFAULT_AVATAR)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_avatar_fallback() {
        let mut user = UserProfile::default();
        assert_eq!(user.avatar(), DEFAULT_AVATAR);

        user.profile_photo = Some(String::new());
        assert_eq!(user.avatar(), DEFAULT_AVATAR);

        user.profile_photo = Some("https://cdn/me.png".to_string());
        assert_eq!(user.avatar(), "https://cdn/me.png");
    }

    #[test]
    fn test_parse_me_payload() {
        let user: UserProfile = serde_json::from_str(
            r#"{
                "username": "asha",
                "email": "asha@example.com",
                "profilePhoto": null,
                "mobileNo": "9876543210",
                "location": "Pune"
            }"#,
        )
        .unwrap();
        assert_eq!(user.username, "asha");
        assert_eq!(user.avatar(), DEFAULT_AVATAR);
    }
}
