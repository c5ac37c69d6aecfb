//! Mood history endpoints

use serde::Deserialize;

use super::{ApiClient, ApiError};
use crate::models::{HistoryEntry, PlaylistInfo};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct HistoryResponse {
    #[serde(default)]
    mood_history: Vec<HistoryEntry>,
}

#[derive(Debug, Deserialize)]
struct PlaylistEnvelope {
    playlist: PlaylistInfo,
}

/// Fetch all past analyses
pub async fn list(client: &ApiClient) -> Result<Vec<HistoryEntry>, ApiError> {
    let response: HistoryResponse = client.get_json("/api/history").await?;
    Ok(response.mood_history)
}

/// Fetch one recommended playlist from history by id
pub async fn detail(client: &ApiClient, id: &str) -> Result<PlaylistInfo, ApiError> {
    let envelope: PlaylistEnvelope = client.get_json(&format!("/api/history/{}", id)).await?;
    Ok(envelope.playlist)
}
