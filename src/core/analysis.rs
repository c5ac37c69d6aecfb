//! Analysis workflow
//!
//! Submits the captured image for emotion analysis and tracks the
//! outcome for display. Submissions are sequence-tagged: a completion
//! that is no longer the latest submission is discarded instead of
//! clobbering newer state (last-submission-wins).

use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::RwLock;
use tracing::debug;

use crate::api::{self, ApiClient, ApiError};
use crate::core::capture::CapturedImage;
use crate::models::AnalysisResponse;

/// Displayable state of the workflow
#[derive(Debug, Clone)]
pub enum AnalysisState {
    Idle,
    Loading,
    Ready(AnalysisView),
    Failed(String),
}

/// A completed analysis plus the current playlist selection
#[derive(Debug, Clone)]
pub struct AnalysisView {
    pub result: AnalysisResponse,
    pub selected: Option<String>,
}

impl Default for AnalysisState {
    fn default() -> Self {
        AnalysisState::Idle
    }
}

#[derive(Default)]
pub struct AnalysisWorkflow {
    seq: AtomicU64,
    state: RwLock<AnalysisState>,
}

impl AnalysisWorkflow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> AnalysisState {
        self.state.read().clone()
    }

    /// Submit the captured image. Fails fast with a validation error,
    /// and without any network call, when no image has been acquired.
    pub async fn analyze(
        &self,
        client: &ApiClient,
        image: Option<&CapturedImage>,
    ) -> Result<AnalysisResponse, ApiError> {
        let image = image
            .ok_or_else(|| ApiError::invalid("image", "Please upload or capture the image"))?;

        let ticket = self.begin();
        let outcome =
            api::emotion::analyze(client, &image.filename, &image.mime, image.data.clone()).await;
        self.complete(ticket, &outcome);
        outcome
    }

    /// Change which recommended playlist is selected. Returns false
    /// when there is no result or the id is not among the
    /// recommendations.
    pub fn select_playlist(&self, id: &str) -> bool {
        let mut state = self.state.write();
        if let AnalysisState::Ready(view) = &mut *state {
            if view.result.recommended_playlists.iter().any(|p| p.id == id) {
                view.selected = Some(id.to_string());
                return true;
            }
        }
        false
    }

    /// Start a submission: newer tickets supersede older ones
    fn begin(&self) -> u64 {
        let ticket = self.seq.fetch_add(1, Ordering::SeqCst) + 1;
        *self.state.write() = AnalysisState::Loading;
        ticket
    }

    /// Apply a submission's outcome unless it has been superseded
    fn complete(&self, ticket: u64, outcome: &Result<AnalysisResponse, ApiError>) {
        if self.seq.load(Ordering::SeqCst) != ticket {
            debug!("discarding stale analysis response (ticket {})", ticket);
            return;
        }

        *self.state.write() = match outcome {
            Ok(result) => AnalysisState::Ready(AnalysisView {
                selected: result.first_playlist_id(),
                result: result.clone(),
            }),
            Err(err) => AnalysisState::Failed(err.to_string()),
        };
    }
}
