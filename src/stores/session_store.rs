//! Session context store
//!
//! Process-wide cache of the signed-in user's profile, favorites and
//! mood history, populated by one aggregate dashboard fetch per token
//! lifecycle. Not a cache with eviction: it is refetched wholesale on
//! every token transition and only mutated locally by explicit favorite
//! toggles.

use std::sync::Arc;

use parking_lot::RwLock;
use tracing::debug;

use crate::api::{self, ApiClient, ApiError};
use crate::models::{Favorite, HistoryEntry, PlaylistCard, UserProfile};
use crate::stores::TokenStore;

/// Single source of truth for the view layer
#[derive(Default)]
pub struct SessionStore {
    user: RwLock<Option<UserProfile>>,
    favorites: RwLock<Vec<Favorite>>,
    history: RwLock<Vec<HistoryEntry>>,
}

impl SessionStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Wire the store to token transitions: a cleared token empties the
    /// session immediately, without a network call.
    pub fn attach(self: &Arc<Self>, tokens: &TokenStore) {
        let store = Arc::clone(self);
        tokens.subscribe(move |token| {
            if token.is_none() {
                debug!("token cleared, resetting session state");
                store.clear();
            }
        });
    }

    /// Populate from the aggregate dashboard call. Any failure resets
    /// the store to the empty, unauthenticated state.
    pub async fn sync(&self, client: &ApiClient) -> Result<(), ApiError> {
        match api::dashboard::fetch(client).await {
            Ok(response) => {
                let (user, favorites, history) = response.into_parts();
                *self.user.write() = user;
                *self.favorites.write() = favorites;
                *self.history.write() = history;
                Ok(())
            }
            Err(err) => {
                self.clear();
                Err(err)
            }
        }
    }

    pub fn clear(&self) {
        *self.user.write() = None;
        self.favorites.write().clear();
        self.history.write().clear();
    }

    // ========== Accessors ==========

    pub fn user(&self) -> Option<UserProfile> {
        self.user.read().clone()
    }

    pub fn favorites(&self) -> Vec<Favorite> {
        self.favorites.read().clone()
    }

    pub fn history(&self) -> Vec<HistoryEntry> {
        self.history.read().clone()
    }

    pub fn is_favorite(&self, playlist_id: &str) -> bool {
        self.favorites
            .read()
            .iter()
            .any(|f| f.playlist.id == playlist_id)
    }

    // ========== Mutations ==========

    /// Flip a playlist's favorite status: one backend call either way,
    /// with the in-memory list updated optimistically and rolled back
    /// when the call fails. Returns true when the playlist was added.
    pub async fn toggle_favorite(
        &self,
        client: &ApiClient,
        playlist: &PlaylistCard,
        mood_tag: &str,
    ) -> Result<bool, ApiError> {
        if self.is_favorite(&playlist.id) {
            let removed: Vec<Favorite> = {
                let mut favorites = self.favorites.write();
                let (gone, keep): (Vec<Favorite>, Vec<Favorite>) = favorites
                    .drain(..)
                    .partition(|f| f.playlist.id == playlist.id);
                *favorites = keep;
                gone
            };

            if let Err(err) = api::favorites::remove(client, &playlist.id).await {
                self.favorites.write().extend(removed);
                return Err(err);
            }
            Ok(false)
        } else {
            self.favorites.write().push(Favorite {
                mood_tag: mood_tag.to_string(),
                playlist: playlist.clone(),
            });

            if let Err(err) = api::favorites::add(client, &playlist.id, mood_tag).await {
                self.favorites
                    .write()
                    .retain(|f| f.playlist.id != playlist.id);
                return Err(err);
            }
            Ok(true)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::{json, TestServer};
    use cookie_store::CookieStore;
    use reqwest_cookie_store::CookieStoreMutex;

    const DASHBOARD_BODY: &str = r#"{
        "user": {"user": {"username": "asha", "email": "a@b.com"}},
        "favoritePlaylists": [
            {"moodTag": "chill", "playlist": {"_id": "p1", "name": "Lo-fi"}}
        ],
        "moodHistory": {"moodHistory": []}
    }"#;

    fn client_with(base_url: &str, tokens: Arc<TokenStore>) -> ApiClient {
        let cookies = Arc::new(CookieStoreMutex::new(CookieStore::default()));
        ApiClient::new(base_url, tokens, cookies).unwrap()
    }

    #[tokio::test]
    async fn test_sync_populates_from_dashboard() {
        let server = TestServer::spawn(|_req, _nth| json(200, DASHBOARD_BODY)).await;
        let tokens = Arc::new(TokenStore::in_memory());
        tokens.set(Some("abc123".to_string()));
        let client = client_with(&server.base_url, tokens);

        let session = SessionStore::new();
        session.sync(&client).await.unwrap();

        assert_eq!(session.user().unwrap().username, "asha");
        assert!(session.is_favorite("p1"));
        assert!(!session.is_favorite("p2"));
    }

    #[tokio::test]
    async fn test_sync_failure_resets_to_empty() {
        let server = TestServer::spawn(|_req, nth| {
            if nth == 0 {
                json(200, DASHBOARD_BODY)
            } else {
                json(500, r#"{"message": "boom"}"#)
            }
        })
        .await;
        let tokens = Arc::new(TokenStore::in_memory());
        tokens.set(Some("abc123".to_string()));
        let client = client_with(&server.base_url, tokens);

        let session = SessionStore::new();
        session.sync(&client).await.unwrap();
        assert!(session.user().is_some());

        session.sync(&client).await.unwrap_err();
        assert!(session.user().is_none());
        assert!(session.favorites().is_empty());
    }

    #[tokio::test]
    async fn test_token_clear_empties_session_without_network() {
        let server = TestServer::spawn(|_req, _nth| json(200, DASHBOARD_BODY)).await;
        let tokens = Arc::new(TokenStore::in_memory());
        tokens.set(Some("abc123".to_string()));
        let client = client_with(&server.base_url, Arc::clone(&tokens));

        let session = SessionStore::new();
        session.attach(&tokens);
        session.sync(&client).await.unwrap();
        let requests_before = server.requests().len();

        tokens.set(None);
        assert!(session.user().is_none());
        assert!(session.favorites().is_empty());
        assert_eq!(server.requests().len(), requests_before);
    }

    #[tokio::test]
    async fn test_toggle_twice_restores_state_with_two_calls() {
        let server = TestServer::spawn(|req, _nth| match req.path.as_str() {
            "/api/favorites" => json(200, r#"{"message": "ok"}"#),
            _ => json(200, r#"{}"#),
        })
        .await;
        let tokens = Arc::new(TokenStore::in_memory());
        tokens.set(Some("abc123".to_string()));
        let client = client_with(&server.base_url, tokens);

        let session = SessionStore::new();
        let playlist = PlaylistCard {
            id: "p9".to_string(),
            name: "Storms".to_string(),
            image_url: String::new(),
        };

        let added = session
            .toggle_favorite(&client, &playlist, "sorrow")
            .await
            .unwrap();
        assert!(added);
        assert!(session.is_favorite("p9"));

        let added = session
            .toggle_favorite(&client, &playlist, "sorrow")
            .await
            .unwrap();
        assert!(!added);
        assert!(!session.is_favorite("p9"));

        let methods: Vec<String> = server
            .requests()
            .iter()
            .filter(|r| r.path == "/api/favorites")
            .map(|r| r.method.clone())
            .collect();
        assert_eq!(methods, vec!["POST", "DELETE"]);
    }

    #[tokio::test]
    async fn test_toggle_rolls_back_on_failure() {
        let server = TestServer::spawn(|_req, _nth| json(500, r#"{"message": "boom"}"#)).await;
        let tokens = Arc::new(TokenStore::in_memory());
        tokens.set(Some("abc123".to_string()));
        let client = client_with(&server.base_url, tokens);

        let session = SessionStore::new();
        let playlist = PlaylistCard {
            id: "p9".to_string(),
            name: "Storms".to_string(),
            image_url: String::new(),
        };

        session
            .toggle_favorite(&client, &playlist, "sorrow")
            .await
            .unwrap_err();
        assert!(!session.is_favorite("p9"));
    }
}
