//! Backend API client for the Moodify client
//!
//! One module per backend resource, all funneled through [`ApiClient`],
//! which owns bearer-token attachment and the single refresh retry.

pub mod auth;
pub mod client;
pub mod dashboard;
pub mod emotion;
pub mod error;
pub mod favorites;
pub mod history;
pub mod users;

pub use client::{load_cookie_store, save_cookie_store, ApiClient, FormPayload};
pub use error::ApiError;
