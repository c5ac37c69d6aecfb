//! Authenticated HTTP client
//!
//! All backend traffic flows through [`ApiClient`]. Outbound requests
//! gain an `Authorization: Bearer` header when a token is held; a 401
//! on a not-yet-retried request triggers exactly one refresh exchange
//! before the original request is re-issued once. A request that 401s
//! again after being reissued is never retried a second time.
//!
//! Requests are described as builder closures so the retry can
//! reconstruct bodies that cannot be cloned (multipart forms).

use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use bytes::Bytes;
use reqwest::{multipart, Client, RequestBuilder, Response, StatusCode};
use cookie_store::CookieStore;
use reqwest_cookie_store::CookieStoreMutex;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::ApiError;
use crate::stores::TokenStore;

/// Refresh exchange endpoint; credentials ride the cookie jar
const REFRESH_PATH: &str = "/api/users/newaccesstoken";

const SESSION_EXPIRED: &str = "Session expired. Please log in again.";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RefreshResponse {
    access_token: String,
}

/// HTTP client carrying the bearer token and refresh protocol
pub struct ApiClient {
    http: Client,
    base_url: String,
    tokens: Arc<TokenStore>,
}

impl ApiClient {
    pub fn new(
        base_url: impl Into<String>,
        tokens: Arc<TokenStore>,
        cookies: Arc<CookieStoreMutex>,
    ) -> anyhow::Result<Self> {
        let http = Client::builder()
            .user_agent(concat!("moodify/", env!("CARGO_PKG_VERSION")))
            .cookie_provider(cookies)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            http,
            base_url: base_url.into(),
            tokens,
        })
    }

    /// The token store backing this client
    pub fn tokens(&self) -> &TokenStore {
        &self.tokens
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    // ========== Typed request helpers ==========

    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let url = self.url(path);
        let resp = self.execute(|http| Ok(http.get(&url))).await?;
        json_body(resp).await
    }

    /// POST where only the status matters; the response body is ignored
    pub async fn post_unit<B: Serialize>(&self, path: &str, body: &B) -> Result<(), ApiError> {
        let url = self.url(path);
        self.execute(|http| Ok(http.post(&url).json(body))).await?;
        Ok(())
    }

    /// DELETE with a JSON body, ignoring the response body
    pub async fn delete_unit<B: Serialize>(&self, path: &str, body: &B) -> Result<(), ApiError> {
        let url = self.url(path);
        self.execute(|http| Ok(http.delete(&url).json(body)))
            .await?;
        Ok(())
    }

    pub async fn post_multipart<T: DeserializeOwned>(
        &self,
        path: &str,
        form: &FormPayload,
    ) -> Result<T, ApiError> {
        let url = self.url(path);
        let resp = self
            .execute(|http| Ok(http.post(&url).multipart(form.build()?)))
            .await?;
        json_body(resp).await
    }

    /// PUT a multipart form, ignoring the response body
    pub async fn put_multipart_unit(&self, path: &str, form: &FormPayload) -> Result<(), ApiError> {
        let url = self.url(path);
        self.execute(|http| Ok(http.put(&url).multipart(form.build()?)))
            .await?;
        Ok(())
    }

    /// POST without bearer or refresh handling. Auth endpoints (signup,
    /// verify, login) go here: a 401 from them is a credential failure,
    /// not an expired session.
    pub async fn post_json_public<T, B>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize,
    {
        let resp = self
            .http
            .post(self.url(path))
            .json(body)
            .send()
            .await
            .map_err(ApiError::transport)?;
        let resp = check_status(resp).await?;
        json_body(resp).await
    }

    // ========== Core pipeline ==========

    /// Issue a request with bearer attachment and the single refresh
    /// retry. Per request: `Issued -> Done | (401 & !retried ->
    /// Refreshing -> Reissued -> Done | LoggedOut+Failed) | Failed`.
    async fn execute<F>(&self, build: F) -> Result<Response, ApiError>
    where
        F: Fn(&Client) -> Result<RequestBuilder, ApiError>,
    {
        let resp = self.send_authed(build(&self.http)?).await?;
        if resp.status() != StatusCode::UNAUTHORIZED {
            return check_status(resp).await;
        }

        debug!("got 401, attempting token refresh");
        let token = match self.refresh_access_token().await {
            Ok(token) => token,
            Err(err) => {
                warn!("token refresh failed: {}", err);
                self.tokens.set(None);
                return Err(ApiError::Auth(SESSION_EXPIRED.to_string()));
            }
        };
        self.tokens.set(Some(token));

        let resp = self.send_authed(build(&self.http)?).await?;
        if resp.status() == StatusCode::UNAUTHORIZED {
            // already reissued once; a second 401 ends the session
            self.tokens.set(None);
            return Err(ApiError::Auth(SESSION_EXPIRED.to_string()));
        }
        check_status(resp).await
    }

    async fn send_authed(&self, builder: RequestBuilder) -> Result<Response, ApiError> {
        let builder = match self.tokens.get() {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        };
        builder.send().await.map_err(ApiError::transport)
    }

    /// One refresh exchange; the refresh token rides the cookie jar and
    /// is never visible here
    async fn refresh_access_token(&self) -> Result<String, ApiError> {
        let resp = self
            .http
            .post(self.url(REFRESH_PATH))
            .send()
            .await
            .map_err(ApiError::transport)?;
        let resp = check_status(resp).await?;
        let body: RefreshResponse = json_body(resp).await?;
        Ok(body.access_token)
    }
}

async fn check_status(resp: Response) -> Result<Response, ApiError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let body = resp.text().await.unwrap_or_default();
    Err(ApiError::from_status(status, &body))
}

async fn json_body<T: DeserializeOwned>(resp: Response) -> Result<T, ApiError> {
    let status = resp.status();
    let bytes = resp.bytes().await.map_err(ApiError::transport)?;
    serde_json::from_slice(&bytes).map_err(|_| ApiError::Server {
        status: status.as_u16(),
        message: format!("Error: {} - unexpected response body", status.as_u16()),
    })
}

/// Multipart body description, rebuildable for the refresh retry
#[derive(Debug, Clone, Default)]
pub struct FormPayload {
    fields: Vec<(String, String)>,
    file: Option<FilePart>,
}

#[derive(Debug, Clone)]
struct FilePart {
    field: String,
    filename: String,
    mime: String,
    data: Bytes,
}

impl FormPayload {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.push((name.into(), value.into()));
        self
    }

    pub fn file(
        mut self,
        field: impl Into<String>,
        filename: impl Into<String>,
        mime: impl Into<String>,
        data: Bytes,
    ) -> Self {
        self.file = Some(FilePart {
            field: field.into(),
            filename: filename.into(),
            mime: mime.into(),
            data,
        });
        self
    }

    fn build(&self) -> Result<multipart::Form, ApiError> {
        let mut form = multipart::Form::new();
        for (name, value) in &self.fields {
            form = form.text(name.clone(), value.clone());
        }
        if let Some(file) = &self.file {
            let part = multipart::Part::bytes(file.data.to_vec())
                .file_name(file.filename.clone())
                .mime_str(&file.mime)
                .map_err(|_| ApiError::invalid("image", "Unsupported image type"))?;
            form = form.part(file.field.clone(), part);
        }
        Ok(form)
    }
}

// ========== Cookie jar persistence ==========

/// Load the persisted cookie jar (refresh token lives here, opaque to
/// the rest of the client)
pub fn load_cookie_store(path: &Path) -> Arc<CookieStoreMutex> {
    let store = std::fs::File::open(path)
        .ok()
        .map(std::io::BufReader::new)
        .and_then(|reader| CookieStore::load_json(reader).ok())
        .unwrap_or_default();
    Arc::new(CookieStoreMutex::new(store))
}

/// Persist the cookie jar back to disk
pub fn save_cookie_store(store: &CookieStoreMutex, path: &Path) -> anyhow::Result<()> {
    let mut file = std::fs::File::create(path).context("Failed to write cookie jar")?;
    let store = store
        .lock()
        .map_err(|_| anyhow::anyhow!("cookie store lock poisoned"))?;
    store
        .save_json(&mut file)
        .map_err(|e| anyhow::anyhow!("Failed to save cookie jar: {}", e))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::{json, TestServer};

    fn test_client(base_url: &str, token: Option<&str>) -> ApiClient {
        let tokens = Arc::new(TokenStore::in_memory());
        tokens.set(token.map(String::from));
        let cookies = Arc::new(CookieStoreMutex::new(CookieStore::default()));
        ApiClient::new(base_url, tokens, cookies).unwrap()
    }

    #[derive(Debug, Deserialize)]
    struct OkBody {
        ok: bool,
    }

    #[tokio::test]
    async fn test_bearer_header_attached() {
        let server = TestServer::spawn(|_req, _nth| json(200, r#"{"ok": true}"#)).await;
        let client = test_client(&server.base_url, Some("abc123"));

        let body: OkBody = client.get_json("/api/data").await.unwrap();
        assert!(body.ok);

        let seen = server.requests();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].header("authorization"), Some("Bearer abc123"));
    }

    #[tokio::test]
    async fn test_refresh_then_reissue_succeeds() {
        let server = TestServer::spawn(|req, _nth| match req.path.as_str() {
            "/api/users/newaccesstoken" => json(200, r#"{"accessToken": "fresh"}"#),
            "/api/data" => {
                if req.header("authorization") == Some("Bearer fresh") {
                    json(200, r#"{"ok": true}"#)
                } else {
                    json(401, r#"{"message": "jwt expired"}"#)
                }
            }
            _ => json(404, "{}"),
        })
        .await;
        let client = test_client(&server.base_url, Some("stale"));

        let body: OkBody = client.get_json("/api/data").await.unwrap();
        assert!(body.ok);

        // exactly one refresh, original reissued once
        assert_eq!(server.hits("/api/users/newaccesstoken"), 1);
        assert_eq!(server.hits("/api/data"), 2);
        // the new token is stored for subsequent requests
        assert_eq!(client.tokens().get().as_deref(), Some("fresh"));
    }

    #[tokio::test]
    async fn test_second_401_never_refreshes_again() {
        let server = TestServer::spawn(|req, _nth| match req.path.as_str() {
            "/api/users/newaccesstoken" => json(200, r#"{"accessToken": "fresh"}"#),
            // protected endpoint rejects every token
            "/api/data" => json(401, "{}"),
            _ => json(404, "{}"),
        })
        .await;
        let client = test_client(&server.base_url, Some("stale"));

        let err = client.get_json::<OkBody>("/api/data").await.unwrap_err();
        assert!(err.is_auth());

        assert_eq!(server.hits("/api/users/newaccesstoken"), 1);
        assert_eq!(server.hits("/api/data"), 2);
        // terminal failure clears the session
        assert_eq!(client.tokens().get(), None);
    }

    #[tokio::test]
    async fn test_refresh_failure_logs_out_without_reissue() {
        let server = TestServer::spawn(|req, _nth| match req.path.as_str() {
            "/api/users/newaccesstoken" => json(401, r#"{"message": "no refresh token"}"#),
            "/api/data" => json(401, "{}"),
            _ => json(404, "{}"),
        })
        .await;
        let client = test_client(&server.base_url, Some("stale"));

        let err = client.get_json::<OkBody>("/api/data").await.unwrap_err();
        assert!(err.is_auth());

        // the original request was not reissued after the failed refresh
        assert_eq!(server.hits("/api/data"), 1);
        assert_eq!(client.tokens().get(), None);
    }

    #[tokio::test]
    async fn test_non_401_errors_pass_through() {
        let server =
            TestServer::spawn(|_req, _nth| json(500, r#"{"message": "boom"}"#)).await;
        let client = test_client(&server.base_url, Some("abc123"));

        let err = client.get_json::<OkBody>("/api/data").await.unwrap_err();
        match err {
            ApiError::Server { status, message } => {
                assert_eq!(status, 500);
                assert_eq!(message, "boom");
            }
            other => panic!("unexpected: {other:?}"),
        }

        // no refresh attempted, token untouched
        assert_eq!(server.hits("/api/users/newaccesstoken"), 0);
        assert_eq!(client.tokens().get().as_deref(), Some("abc123"));
    }

    #[tokio::test]
    async fn test_public_post_skips_refresh_on_401() {
        let server = TestServer::spawn(|req, _nth| match req.path.as_str() {
            "/api/users/login" => json(401, r#"{"message": "Invalid credentials"}"#),
            _ => json(404, "{}"),
        })
        .await;
        let client = test_client(&server.base_url, None);

        let err = client
            .post_json_public::<OkBody, _>(
                "/api/users/login",
                &serde_json::json!({"email": "a@b.com", "password": "secret1"}),
            )
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "Invalid credentials");
        assert_eq!(server.hits("/api/users/newaccesstoken"), 0);
    }

    #[tokio::test]
    async fn test_connection_refused_is_network_error() {
        // bind then drop to get a port nothing listens on
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = test_client(&format!("http://{}", addr), Some("abc123"));
        let err = client.get_json::<OkBody>("/api/data").await.unwrap_err();
        assert!(matches!(err, ApiError::Network(_)));
        assert_eq!(
            err.to_string(),
            "No response received from server. Please check your connection."
        );
    }
}
