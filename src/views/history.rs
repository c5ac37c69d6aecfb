//! History pages: paginated listing and playlist detail

use crate::api::{self, ApiClient, ApiError};
use crate::models::{HistoryItem, MoodTag};

/// List past analyses, one row per recommended playlist, filtered by
/// dominant mood and paginated client-side
pub async fn list(
    client: &ApiClient,
    mood: MoodTag,
    page: usize,
    per_page: usize,
) -> Result<(), ApiError> {
    super::require_login(client.tokens())?;

    let entries = api::history::list(client).await?;
    let items: Vec<HistoryItem> = entries.iter().flat_map(|e| e.flatten()).collect();
    let filtered: Vec<&HistoryItem> = items
        .iter()
        .filter(|item| mood.matches(&item.dominant))
        .collect();

    println!("🎵 History ({} {})", mood.emoji(), mood.label());
    if filtered.is_empty() {
        println!("No history yet.");
        return Ok(());
    }

    let (rows, page, pages) = paginate(&filtered, page, per_page);
    for item in rows {
        let emoji = MoodTag::from_str(&item.dominant)
            .map(|t| t.emoji())
            .unwrap_or("🎵");
        println!(
            "  {} {} {} [{}]",
            emoji, item.dominant, item.playlist.name, item.playlist.id
        );
    }

    println!();
    println!("Page {} of {} ({} total)", page, pages, filtered.len());
    if page < pages {
        println!("Next: moodify history --page {}", page + 1);
    }
    Ok(())
}

/// Show one recommended playlist from history
pub async fn show(client: &ApiClient, id: &str) -> Result<(), ApiError> {
    super::require_login(client.tokens())?;

    let playlist = api::history::detail(client, id).await?;

    println!("Playlist");
    println!("  {}", playlist.name);
    if !playlist.description.is_empty() {
        println!("  {}", playlist.description);
    }
    println!("  {} tracks", playlist.tracks);
    if !playlist.external_url.is_empty() {
        println!("  Open on Spotify: {}", playlist.external_url);
    }
    if !playlist.embed_url.is_empty() {
        println!("  Player: {}", playlist.embed_url);
    }
    Ok(())
}

/// Clamp `page` (1-based) into range and slice one page of rows
fn paginate<'a, T>(items: &'a [T], page: usize, per_page: usize) -> (&'a [T], usize, usize) {
    let per_page = per_page.max(1);
    let pages = items.len().div_ceil(per_page).max(1);
    let page = page.clamp(1, pages);
    let start = (page - 1) * per_page;
    let end = (start + per_page).min(items.len());
    (&items[start..end], page, pages)
}
