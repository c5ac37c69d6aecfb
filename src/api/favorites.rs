//! Favorites endpoints

use serde::{Deserialize, Serialize};

use super::{ApiClient, ApiError};
use crate::models::Favorite;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct AddFavoriteRequest<'a> {
    playlist_id: &'a str,
    mood_tag: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct RemoveFavoriteRequest<'a> {
    playlist_id: &'a str,
}

/// The list arrives either bare or wrapped in `{favorites}`
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum FavoritesPayload {
    Wrapped { favorites: Vec<Favorite> },
    Bare(Vec<Favorite>),
}

/// Fetch all favorites
pub async fn list(client: &ApiClient) -> Result<Vec<Favorite>, ApiError> {
    let payload: FavoritesPayload = client.get_json("/api/favorites").await?;
    Ok(match payload {
        FavoritesPayload::Wrapped { favorites } => favorites,
        FavoritesPayload::Bare(favorites) => favorites,
    })
}

/// Favorite a playlist under a mood tag
pub async fn add(client: &ApiClient, playlist_id: &str, mood_tag: &str) -> Result<(), ApiError> {
    client
        .post_unit(
            "/api/favorites",
            &AddFavoriteRequest {
                playlist_id,
                mood_tag,
            },
        )
        .await
}

/// Remove a playlist from favorites
pub async fn remove(client: &ApiClient, playlist_id: &str) -> Result<(), ApiError> {
    client
        .delete_unit("/api/favorites", &RemoveFavoriteRequest { playlist_id })
        .await
}
