//! Playlist models
//!
//! The backend uses two playlist shapes: the full shape returned by
//! emotion analysis and the history detail endpoint, and a slim card
//! shape embedded in favorites and history listings.

use serde::{Deserialize, Serialize};

/// Full playlist as returned by analysis and `/api/history/:id`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaylistInfo {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image_url: String,
    /// Link to the playlist on the streaming service
    #[serde(default)]
    pub external_url: String,
    /// Track count
    #[serde(default)]
    pub tracks: i64,
    /// Embeddable player URL
    #[serde(default)]
    pub embed_url: String,
}

impl PartialEq for PlaylistInfo {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for PlaylistInfo {}

/// Slim playlist card embedded in favorites and history listings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaylistCard {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub image_url: String,
}

/// A favorited playlist with the mood it was saved under
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Favorite {
    #[serde(default)]
    pub mood_tag: String,
    pub playlist: PlaylistCard,
}

/// One analysis recorded in mood history
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    #[serde(default)]
    pub dominant: String,
    #[serde(default)]
    pub recommended_playlists: Vec<PlaylistCard>,
}

/// A history entry flattened to one row per playlist
#[derive(Debug, Clone)]
pub struct HistoryItem {
    pub dominant: String,
    pub playlist: PlaylistCard,
}

impl HistoryEntry {
    /// Fan the entry out to (dominant, playlist) rows for display
    pub fn flatten(&self) -> impl Iterator<Item = HistoryItem> + '_ {
        self.recommended_playlists.iter().map(|p| HistoryItem {
            dominant: self.dominant.clone(),
            playlist: p.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_card_uses_underscore_id() {
        let card: PlaylistCard = serde_json::from_str(
            r#"{"_id": "abc", "name": "Rainy Day", "imageUrl": "https://img"}"#,
        )
        .unwrap();
        assert_eq!(card.id, "abc");
        assert_eq!(card.image_url, "https://img");
    }

    #[test]
    fn test_history_flatten() {
        let entry: HistoryEntry = serde_json::from_str(
            r#"{
                "dominant": "sorrow",
                "recommendedPlaylists": [
                    {"_id": "a", "name": "One"},
                    {"_id": "b", "name": "Two"}
                ]
            }"#,
        )
        .unwrap();

        let items: Vec<_> = entry.flatten().collect();
        assert_eq!(items.len(), 2);
        assert!(items.iter().all(|i| i.dominant == "sorrow"));
        assert_eq!(items[1].playlist.id, "b");
    }

    #[test]
    fn test_playlist_equality_by_id() {
        let a: PlaylistInfo =
            serde_json::from_str(r#"{"id": "x", "name": "A"}"#).unwrap();
        let b: PlaylistInfo =
            serde_json::from_str(r#"{"id": "x", "name": "B"}"#).unwrap();
        assert_eq!(a, b);
    }
}
