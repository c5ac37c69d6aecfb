//! Data models for the Moodify client
//!
//! Value objects mirroring the backend payload shapes. Fields are named
//! exactly as the wire carries them; nothing here is mutated client-side
//! except the derived favorited flag on playlists.

mod emotion;
mod enums;
mod playlist;
mod user;

pub use emotion::{AnalysisResponse, EmotionLevel, EmotionScores};
pub use enums::MoodTag;
pub use playlist::{Favorite, HistoryEntry, HistoryItem, PlaylistCard, PlaylistInfo};
pub use user::{UserProfile, DEFAULT_AVATAR};
