//! Favorites page: mood-filtered listing and favorite toggling

use crate::api::{ApiClient, ApiError};
use crate::models::{Favorite, MoodTag, PlaylistCard};
use crate::stores::SessionStore;

/// List favorites, filtered client-side by mood category. `remote`
/// queries the favorites endpoint directly instead of the session
/// aggregate.
pub async fn list(
    client: &ApiClient,
    session: &SessionStore,
    mood: MoodTag,
    remote: bool,
) -> Result<(), ApiError> {
    super::require_login(client.tokens())?;

    let favorites = if remote {
        crate::api::favorites::list(client).await?
    } else {
        session.sync(client).await?;
        session.favorites()
    };
    let filtered = filter_by_mood(&favorites, mood);

    println!("🎵 Favorite Playlists ({} {})", mood.emoji(), mood.label());
    if filtered.is_empty() {
        println!("No favorite playlists found.");
        return Ok(());
    }

    for favorite in filtered {
        let emoji = MoodTag::from_str(&favorite.mood_tag)
            .map(|t| t.emoji())
            .unwrap_or("🎵");
        println!(
            "  {} {} [{}]",
            emoji, favorite.playlist.name, favorite.playlist.id
        );
    }
    Ok(())
}

/// Flip a playlist's favorite status. Adding needs a concrete mood tag;
/// the playlist name is taken from session data when not supplied.
pub async fn toggle(
    client: &ApiClient,
    session: &SessionStore,
    playlist_id: &str,
    mood: MoodTag,
    name: Option<String>,
) -> Result<(), ApiError> {
    super::require_login(client.tokens())?;
    session.sync(client).await?;

    if !session.is_favorite(playlist_id) && mood == MoodTag::All {
        return Err(ApiError::invalid(
            "mood",
            "Pick a mood tag to save under: joy, sorrow, angry, surprise or chill",
        ));
    }

    let playlist = find_card(session, playlist_id).unwrap_or(PlaylistCard {
        id: playlist_id.to_string(),
        name: name.unwrap_or_default(),
        image_url: String::new(),
    });

    let added = session
        .toggle_favorite(client, &playlist, mood.as_str())
        .await?;

    if added {
        println!("Added to favorites");
    } else {
        println!("Removed from favorites");
    }
    Ok(())
}

/// Look the playlist up in session data so the favorite keeps its name
fn find_card(session: &SessionStore, playlist_id: &str) -> Option<PlaylistCard> {
    session
        .favorites()
        .iter()
        .find(|f| f.playlist.id == playlist_id)
        .map(|f| f.playlist.clone())
        .or_else(|| {
            session
                .history()
                .iter()
                .flat_map(|e| e.recommended_playlists.iter())
                .find(|p| p.id == playlist_id)
                .cloned()
        })
}

fn filter_by_mood(favorites: &[Favorite], mood: MoodTag) -> Vec<&Favorite> {
    favorites
        .iter()
        .filter(|f| mood.matches(&f.mood_tag))
        .collect()
}
