//! Utility modules for the Moodify client

pub mod validate;
