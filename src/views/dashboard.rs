//! Dashboard pages: the analyze flow and the signed-in overview

use std::path::PathBuf;

use crate::api::{ApiClient, ApiError};
use crate::core::analysis::{AnalysisState, AnalysisView, AnalysisWorkflow};
use crate::core::capture::ImageCapture;
use crate::models::AnalysisResponse;
use crate::stores::SessionStore;

/// Where the photo comes from
pub enum ImageSource {
    File(PathBuf),
    Camera { device: u32 },
}

/// Acquire an image, submit it for analysis and render the result.
/// `pick` moves the selection to the Nth recommendation (1-based)
/// instead of the default first one.
pub async fn analyze(
    client: &ApiClient,
    captures_dir: PathBuf,
    source: ImageSource,
    pick: Option<usize>,
) -> Result<(), ApiError> {
    super::require_login(client.tokens())?;

    let mut capture = ImageCapture::new(captures_dir);
    match source {
        ImageSource::File(path) => capture.set_from_file(&path)?,
        ImageSource::Camera { device } => {
            println!("Opening camera {}...", device);
            let camera = capture.begin_capture(device)?;
            println!("Taking photo...");
            capture.complete_capture(camera)?;
        }
    }

    if let Some(image) = capture.image() {
        println!(
            "Using {} ({} bytes), preview at {}",
            image.filename,
            image.data.len(),
            image.preview_path().display()
        );
    }

    println!("Analyzing mood...");
    let workflow = AnalysisWorkflow::new();
    let result = workflow.analyze(client, capture.image()).await?;

    if let Some(n) = pick {
        match result.recommended_playlists.get(n.saturating_sub(1)) {
            Some(playlist) => {
                workflow.select_playlist(&playlist.id);
            }
            None => println!("There is no recommendation #{}", n),
        }
    }

    if let AnalysisState::Ready(view) = workflow.state() {
        render_analysis(&view);
    }
    Ok(())
}

/// Render emotion levels, dominant mood and recommendations
fn render_analysis(view: &AnalysisView) {
    let result = &view.result;

    println!();
    println!("Emotion Analysis");
    println!("  Dominant emotion: {}", result.dominant);
    println!("  Recommended mood: {}", result.recommended_music_mood);
    println!("  Confidence: {:.0}%", result.confidence_score * 100.0);
    println!();

    for (name, level) in result.emotions.entries() {
        println!("  {:<9} {} {}", name, bar(level.percent()), level.label());
    }
    println!();

    render_recommendations(result, view.selected.as_deref());
}

fn render_recommendations(result: &AnalysisResponse, selected: Option<&str>) {
    println!("Your Music Recommendations");

    if result.recommended_playlists.is_empty() {
        println!("  No music recommendations yet");
        println!("  Upload or capture a photo to get personalized playlists based on your mood");
        return;
    }

    for playlist in &result.recommended_playlists {
        let marker = if selected == Some(playlist.id.as_str()) {
            "*"
        } else {
            " "
        };
        println!(
            " {} {} ({} tracks) [{}]",
            marker, playlist.name, playlist.tracks, playlist.id
        );
    }

    if let Some(playlist) = result
        .recommended_playlists
        .iter()
        .find(|p| selected == Some(p.id.as_str()))
    {
        println!();
        println!("Selected: {}", playlist.name);
        if !playlist.description.is_empty() {
            println!("  {}", playlist.description);
        }
        if !playlist.external_url.is_empty() {
            println!("  Open in Spotify: {}", playlist.external_url);
        }
        if !playlist.embed_url.is_empty() {
            println!("  Player: {}", playlist.embed_url);
        }
        println!();
        println!(
            "Save it with: moodify favorites toggle {} --mood <tag>",
            playlist.id
        );
    }
}

/// Signed-in overview: profile line plus favorites and history counts
pub async fn overview(client: &ApiClient, session: &SessionStore) -> Result<(), ApiError> {
    super::require_login(client.tokens())?;
    session.sync(client).await?;

    match session.user() {
        Some(user) => {
            println!("Signed in as {} <{}>", user.username, user.email);
            println!("  Avatar: {}", user.avatar());
            if !user.location.is_empty() {
                println!("  Location: {}", user.location);
            }
        }
        None => println!("Signed in (profile unavailable)"),
    }

    let favorites = session.favorites();
    let history = session.history();
    println!("  Favorites: {}", favorites.len());
    println!("  Past analyses: {}", history.len());

    if let Some(entry) = history.first() {
        println!("  Last dominant mood: {}", entry.dominant);
    }

    println!();
    println!("Analyze a photo with: moodify analyze --image <path>");
    Ok(())
}

/// Fixed-width level bar, full at 100%
pub(crate) fn bar(percent: u8) -> String {
    let filled = (percent as usize * 20) / 100;
    format!("[{}{}]", "#".repeat(filled), "-".repeat(20 - filled))
}
