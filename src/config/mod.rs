//! Configuration module for the Moodify client
//!
//! Path management and user-configurable settings.

mod client_config;
mod paths;

pub use client_config::ClientConfig;
pub use paths::Paths;

/// Default backend base URL
pub const DEFAULT_SERVER_URL: &str = "http://localhost:8080";

/// Default number of history rows per page
pub const DEFAULT_HISTORY_PAGE_SIZE: usize = 9;
