//! Emotion analysis models

use serde::{Deserialize, Serialize};

use super::PlaylistInfo;

/// Qualitative likelihood assigned to each emotion by the analysis service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EmotionLevel {
    VeryUnlikely,
    Unlikely,
    Possible,
    Likely,
    VeryLikely,
    /// Vocabulary additions the client does not know yet render as zero
    #[serde(other)]
    Unknown,
}

// `#[serde(other)]` requires `Unknown` to be the last variant, which is
// the opposite of the rank order. Order explicitly by `percent()` so the
// ordering is unaffected by variant declaration order.
impl Ord for EmotionLevel {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.percent().cmp(&other.percent())
    }
}

impl PartialOrd for EmotionLevel {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl EmotionLevel {
    /// Bar fill percentage used when rendering a level
    pub fn percent(&self) -> u8 {
        match self {
            EmotionLevel::VeryLikely => 100,
            EmotionLevel::Likely => 75,
            EmotionLevel::Possible => 50,
            EmotionLevel::Unlikely => 25,
            EmotionLevel::VeryUnlikely => 10,
            EmotionLevel::Unknown => 0,
        }
    }

    /// Human-readable label ("VERY_LIKELY" renders as "very likely")
    pub fn label(&self) -> &'static str {
        match self {
            EmotionLevel::VeryLikely => "very likely",
            EmotionLevel::Likely => "likely",
            EmotionLevel::Possible => "possible",
            EmotionLevel::Unlikely => "unlikely",
            EmotionLevel::VeryUnlikely => "very unlikely",
            EmotionLevel::Unknown => "unknown",
        }
    }
}

impl Default for EmotionLevel {
    fn default() -> Self {
        EmotionLevel::Unknown
    }
}

/// Per-emotion levels as returned by the analysis endpoint
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct EmotionScores {
    #[serde(default)]
    pub joy: EmotionLevel,
    #[serde(default)]
    pub sorrow: EmotionLevel,
    #[serde(default)]
    pub angry: EmotionLevel,
    #[serde(default)]
    pub surprise: EmotionLevel,
}

impl EmotionScores {
    /// Iterate emotions in display order
    pub fn entries(&self) -> [(&'static str, EmotionLevel); 4] {
        [
            ("joy", self.joy),
            ("sorrow", self.sorrow),
            ("angry", self.angry),
            ("surprise", self.surprise),
        ]
    }
}

/// Result of one emotion analysis call
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResponse {
    pub emotions: EmotionScores,
    /// Highest-confidence emotion category
    pub dominant: String,
    /// Confidence in [0, 1]
    #[serde(default)]
    pub confidence_score: f64,
    #[serde(default)]
    pub recommended_music_mood: String,
    #[serde(default)]
    pub recommended_playlists: Vec<PlaylistInfo>,
}

impl AnalysisResponse {
    /// Id of the first recommended playlist, if any
    pub fn first_playlist_id(&self) -> Option<String> {
        self.recommended_playlists.first().map(|p| p.id.clone())
    }
}
