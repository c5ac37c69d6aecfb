//! Aggregate dashboard endpoint
//!
//! One call returning profile + favorites + history. The double nesting
//! (`user.user`, `moodHistory.moodHistory`) is the backend's contract,
//! kept verbatim.

use serde::Deserialize;

use super::{ApiClient, ApiError};
use crate::models::{Favorite, HistoryEntry, UserProfile};

#[derive(Debug, Default, Deserialize)]
struct UserEnvelope {
    #[serde(default)]
    user: Option<UserProfile>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MoodHistoryEnvelope {
    #[serde(default)]
    mood_history: Vec<HistoryEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardResponse {
    #[serde(default)]
    user: UserEnvelope,
    #[serde(default)]
    favorite_playlists: Vec<Favorite>,
    #[serde(default)]
    mood_history: MoodHistoryEnvelope,
}

impl DashboardResponse {
    /// Unwrap into (profile, favorites, history)
    pub fn into_parts(self) -> (Option<UserProfile>, Vec<Favorite>, Vec<HistoryEntry>) {
        (
            self.user.user,
            self.favorite_playlists,
            self.mood_history.mood_history,
        )
    }
}

/// Fetch the aggregate session payload
pub async fn fetch(client: &ApiClient) -> Result<DashboardResponse, ApiError> {
    client.get_json("/api/dashboard").await
}
