//! Enums for the Moodify client

use serde::{Deserialize, Serialize};

/// Mood categories used to filter favorites and history client-side
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MoodTag {
    All,
    Joy,
    Sorrow,
    Angry,
    Surprise,
    Chill,
}

impl MoodTag {
    /// Every category in display order
    pub const ALL: [MoodTag; 6] = [
        MoodTag::All,
        MoodTag::Joy,
        MoodTag::Sorrow,
        MoodTag::Angry,
        MoodTag::Surprise,
        MoodTag::Chill,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MoodTag::All => "all",
            MoodTag::Joy => "joy",
            MoodTag::Sorrow => "sorrow",
            MoodTag::Angry => "angry",
            MoodTag::Surprise => "surprise",
            MoodTag::Chill => "chill",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            MoodTag::All => "All",
            MoodTag::Joy => "Joy",
            MoodTag::Sorrow => "Sorrow",
            MoodTag::Angry => "Angry",
            MoodTag::Surprise => "Surprise",
            MoodTag::Chill => "Chill",
        }
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            MoodTag::All => "🌈",
            MoodTag::Joy => "😊",
            MoodTag::Sorrow => "😢",
            MoodTag::Angry => "😡",
            MoodTag::Surprise => "😲",
            MoodTag::Chill => "😌",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "all" => Some(MoodTag::All),
            "joy" => Some(MoodTag::Joy),
            "sorrow" => Some(MoodTag::Sorrow),
            "angry" => Some(MoodTag::Angry),
            "surprise" => Some(MoodTag::Surprise),
            "chill" => Some(MoodTag::Chill),
            _ => None,
        }
    }

    /// Filter predicate: All matches every tag, others match exactly
    pub fn matches(&self, tag: &str) -> bool {
        match self {
            MoodTag::All => true,
            other => other.as_str() == tag,
        }
    }
}

impl Default for MoodTag {
    fn default() -> Self {
        MoodTag::All
    }
}
