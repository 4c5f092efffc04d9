//! REST client with bearer authentication and transparent token refresh.
//!
//! # Token refresh
//!
//! Requests marked [`Auth::Bearer`] carry the session's access token. When
//! such a request comes back `401 Unauthorized`:
//!
//! 1. The client refreshes the token once (`POST /api/auth/refresh`).
//! 2. The original request is retried once with the new token.
//! 3. If the refresh fails, or the retry is still `401`, the session is
//!    cleared and the call fails with [`ApiError::SessionExpired`].
//!
//! Refreshes are single-flight: requests that hit `401` while another
//! refresh is running wait for it and reuse its token. Tokens whose JWT
//! `exp` is about to pass are refreshed before the request is sent; that
//! counts as the request's one refresh.

use std::borrow::Cow;
use std::sync::Arc;

use reqwest::{Method, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use serde::{Serialize, de::DeserializeOwned};
use tokio::sync::{Mutex, RwLock, watch};
use tracing::instrument;
use url::Url;

use crate::auth::{RefreshRequest, Session, SessionStatus, SessionStore, TokenResponse};
use crate::cache::CatalogCache;
use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::models::User;
use crate::storage::KeyValueStore;

/// Whether a request needs the session's bearer token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Auth {
    /// Public endpoint.
    None,
    /// Requires a signed-in user; refreshed transparently on 401.
    Bearer,
}

/// Storefront REST API client.
///
/// Cheap to clone; clones share the session, refresh lock and catalog cache.
#[derive(Clone)]
pub struct ApiClient {
    inner: Arc<ApiClientInner>,
}

struct ApiClientInner {
    http: reqwest::Client,
    base_url: Url,
    /// In-memory session, mirrored to `sessions`
    session: RwLock<Option<Session>>,
    /// Held for the duration of a token refresh
    refresh_lock: Mutex<()>,
    sessions: SessionStore,
    status: watch::Sender<SessionStatus>,
    cache: CatalogCache,
}

/// A request that can be sent more than once.
#[derive(Debug, Clone)]
pub(crate) struct ApiRequest {
    method: Method,
    path: String,
    query: Option<serde_json::Value>,
    body: Option<serde_json::Value>,
    auth: Auth,
}

impl ApiRequest {
    pub(crate) fn new(method: Method, path: impl Into<String>, auth: Auth) -> Self {
        Self {
            method,
            path: path.into(),
            query: None,
            body: None,
            auth,
        }
    }

    pub(crate) fn query<Q: Serialize + ?Sized>(mut self, query: &Q) -> Result<Self, ApiError> {
        self.query = Some(serde_json::to_value(query)?);
        Ok(self)
    }

    pub(crate) fn json<B: Serialize + ?Sized>(mut self, body: &B) -> Result<Self, ApiError> {
        self.body = Some(serde_json::to_value(body)?);
        Ok(self)
    }
}

impl ApiClient {
    /// Create a client for the configured backend.
    ///
    /// No session is loaded; call [`ApiClient::restore_session`] to pick up
    /// a persisted one.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Http` if the HTTP client cannot be built.
    pub fn new(config: &ClientConfig, store: Arc<dyn KeyValueStore>) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(concat!("shopfront/", env!("CARGO_PKG_VERSION")))
            .build()?;

        let (status, _) = watch::channel(SessionStatus::Anonymous);

        Ok(Self {
            inner: Arc::new(ApiClientInner {
                http,
                base_url: config.api_url.clone(),
                session: RwLock::new(None),
                refresh_lock: Mutex::new(()),
                sessions: SessionStore::new(store),
                status,
                cache: CatalogCache::new(config.cache_ttl),
            }),
        })
    }

    pub(crate) fn cache(&self) -> &CatalogCache {
        &self.inner.cache
    }

    // =========================================================================
    // Session
    // =========================================================================

    /// Load the persisted session, if any, and make it current.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Storage` if the store cannot be read.
    #[instrument(skip(self))]
    pub async fn restore_session(&self) -> Result<Option<User>, ApiError> {
        let Some(session) = self.inner.sessions.load().await? else {
            return Ok(None);
        };
        let user = session.user.clone();
        tracing::debug!(user_id = %user.id, "Restored session");
        *self.inner.session.write().await = Some(session);
        self.inner.status.send_replace(SessionStatus::Authenticated { user: user.clone() });
        Ok(Some(user))
    }

    /// Make `session` current and persist it.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Storage` if the session cannot be persisted; the
    /// in-memory session is set regardless.
    pub async fn set_session(&self, session: Session) -> Result<(), ApiError> {
        let user = session.user.clone();
        *self.inner.session.write().await = Some(session.clone());
        self.inner.status.send_replace(SessionStatus::Authenticated { user });
        self.inner.sessions.save(&session).await?;
        Ok(())
    }

    /// Drop the session from memory and storage.
    pub(crate) async fn clear_session(&self, status: SessionStatus) {
        *self.inner.session.write().await = None;
        if let Err(e) = self.inner.sessions.clear().await {
            tracing::warn!(error = %e, "Failed to remove persisted session");
        }
        self.inner.status.send_replace(status);
    }

    async fn expire_session(&self) {
        self.clear_session(SessionStatus::Expired).await;
    }

    /// Current session, if signed in.
    pub async fn session(&self) -> Option<Session> {
        self.inner.session.read().await.clone()
    }

    /// Signed-in user, if any.
    pub async fn current_user(&self) -> Option<User> {
        self.inner
            .session
            .read()
            .await
            .as_ref()
            .map(|s| s.user.clone())
    }

    /// Whether a user is signed in.
    pub async fn is_authenticated(&self) -> bool {
        self.inner.session.read().await.is_some()
    }

    /// Subscribe to session changes. Front ends redirect to their login
    /// screen on [`SessionStatus::Expired`].
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<SessionStatus> {
        self.inner.status.subscribe()
    }

    // =========================================================================
    // Typed Helpers
    // =========================================================================

    /// `GET` a JSON resource.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` on transport, HTTP status, auth or decode failure.
    pub async fn get<T: DeserializeOwned>(&self, path: &str, auth: Auth) -> Result<T, ApiError> {
        self.request(&ApiRequest::new(Method::GET, path, auth))
            .await
    }

    /// `GET` a JSON resource with query parameters.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` on transport, HTTP status, auth or decode failure.
    pub async fn get_with_query<T, Q>(&self, path: &str, query: &Q, auth: Auth) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        self.request(&ApiRequest::new(Method::GET, path, auth).query(query)?)
            .await
    }

    /// `POST` a JSON body and decode the JSON response.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` on transport, HTTP status, auth or decode failure.
    pub async fn post<T, B>(&self, path: &str, body: &B, auth: Auth) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.request(&ApiRequest::new(Method::POST, path, auth).json(body)?)
            .await
    }

    /// `POST` a JSON body, ignoring the response body.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` on transport, HTTP status or auth failure.
    pub async fn post_no_content<B>(&self, path: &str, body: &B, auth: Auth) -> Result<(), ApiError>
    where
        B: Serialize + ?Sized,
    {
        self.send(&ApiRequest::new(Method::POST, path, auth).json(body)?)
            .await?;
        Ok(())
    }

    /// `PUT` a JSON body and decode the JSON response.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` on transport, HTTP status, auth or decode failure.
    pub async fn put<T, B>(&self, path: &str, body: &B, auth: Auth) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.request(&ApiRequest::new(Method::PUT, path, auth).json(body)?)
            .await
    }

    /// `PATCH` a JSON body and decode the JSON response.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` on transport, HTTP status, auth or decode failure.
    pub async fn patch<T, B>(&self, path: &str, body: &B, auth: Auth) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.request(&ApiRequest::new(Method::PATCH, path, auth).json(body)?)
            .await
    }

    /// `DELETE` a resource.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` on transport, HTTP status or auth failure.
    pub async fn delete(&self, path: &str, auth: Auth) -> Result<(), ApiError> {
        self.send(&ApiRequest::new(Method::DELETE, path, auth))
            .await?;
        Ok(())
    }

    // =========================================================================
    // Execution
    // =========================================================================

    async fn request<T: DeserializeOwned>(&self, req: &ApiRequest) -> Result<T, ApiError> {
        let response = self.send(req).await?;
        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    /// Send a request, applying auth and refresh, and turn error statuses
    /// into `ApiError`.
    #[instrument(skip(self, req), fields(method = %req.method, path = %req.path))]
    pub(crate) async fn send(&self, req: &ApiRequest) -> Result<reqwest::Response, ApiError> {
        let response = match req.auth {
            Auth::None => self.dispatch(req, None).await?,
            Auth::Bearer => self.send_authenticated(req).await?,
        };

        let status = response.status();
        if status.is_success() {
            Ok(response)
        } else {
            tracing::debug!(status = status.as_u16(), "Request failed");
            Err(ApiError::from_response(response).await)
        }
    }

    async fn send_authenticated(&self, req: &ApiRequest) -> Result<reqwest::Response, ApiError> {
        let (token, refreshed) = self.bearer_token().await?;
        let response = self.dispatch(req, Some(&token)).await?;
        if response.status() != StatusCode::UNAUTHORIZED {
            return Ok(response);
        }

        if refreshed {
            tracing::warn!("Unauthorized with a freshly refreshed token, ending session");
            self.expire_session().await;
            return Err(ApiError::SessionExpired);
        }

        tracing::debug!("Access token rejected, refreshing");
        let token = self.refresh_single_flight(&token).await?;

        let retry = self.dispatch(req, Some(&token)).await?;
        if retry.status() == StatusCode::UNAUTHORIZED {
            tracing::warn!("Still unauthorized after refresh, ending session");
            self.expire_session().await;
            return Err(ApiError::SessionExpired);
        }
        Ok(retry)
    }

    /// Access token for the next request, refreshing it first if it is about
    /// to expire. The flag reports whether a refresh happened.
    async fn bearer_token(&self) -> Result<(SecretString, bool), ApiError> {
        let session = self
            .inner
            .session
            .read()
            .await
            .clone()
            .ok_or(ApiError::NotAuthenticated)?;

        if session.needs_refresh() && session.can_refresh() {
            tracing::debug!("Access token close to expiry, refreshing early");
            let token = self.refresh_single_flight(&session.access_token).await?;
            return Ok((token, true));
        }
        Ok((session.access_token, false))
    }

    /// Replace `stale` with a fresh access token.
    ///
    /// Only one refresh runs at a time. A caller that waited for the lock and
    /// finds the token already replaced reuses the new one.
    async fn refresh_single_flight(&self, stale: &SecretString) -> Result<SecretString, ApiError> {
        let _guard = self.inner.refresh_lock.lock().await;

        let Some(mut session) = self.inner.session.read().await.clone() else {
            return Err(ApiError::SessionExpired);
        };

        if session.access_token.expose_secret() != stale.expose_secret() {
            tracing::debug!("Token already refreshed by a concurrent request");
            return Ok(session.access_token);
        }

        let Some(refresh_token) = session.refresh_token.clone() else {
            tracing::info!("No refresh token available, ending session");
            self.expire_session().await;
            return Err(ApiError::SessionExpired);
        };

        match self.call_refresh(&refresh_token).await {
            Ok(tokens) => {
                session.apply_refresh(tokens);
                let token = session.access_token.clone();
                if let Err(e) = self.set_session(session).await {
                    tracing::warn!(error = %e, "Failed to persist refreshed session");
                }
                tracing::debug!("Access token refreshed");
                Ok(token)
            }
            Err(e) => {
                tracing::warn!(error = %e, "Token refresh failed, ending session");
                self.expire_session().await;
                Err(ApiError::SessionExpired)
            }
        }
    }

    async fn call_refresh(&self, refresh_token: &SecretString) -> Result<TokenResponse, ApiError> {
        let req = ApiRequest::new(Method::POST, "api/auth/refresh", Auth::None).json(
            &RefreshRequest {
                refresh_token: refresh_token.expose_secret(),
            },
        )?;

        let response = self.dispatch(&req, None).await?;
        if !response.status().is_success() {
            return Err(ApiError::from_response(response).await);
        }
        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    /// Send one HTTP request without any auth handling.
    async fn dispatch(
        &self,
        req: &ApiRequest,
        token: Option<&SecretString>,
    ) -> Result<reqwest::Response, ApiError> {
        let url = self.url(&req.path)?;
        let mut builder = self.inner.http.request(req.method.clone(), url);
        if let Some(query) = &req.query {
            builder = builder.query(query);
        }
        if let Some(body) = &req.body {
            builder = builder.json(body);
        }
        if let Some(token) = token {
            builder = builder.bearer_auth(token.expose_secret());
        }
        Ok(builder.send().await?)
    }

    fn url(&self, path: &str) -> Result<Url, ApiError> {
        Ok(self.inner.base_url.join(path.trim_start_matches('/'))?)
    }
}

/// Percent-encode `value` as one path segment, so an ID containing `/`, `?`
/// or `#` cannot address a different endpoint.
///
/// # Errors
///
/// Returns `ApiError::InvalidPathSegment` for an empty value, `.` or `..`,
/// which URL resolution would collapse.
pub(crate) fn segment(value: &str) -> Result<Cow<'_, str>, ApiError> {
    if matches!(value, "" | "." | "..") {
        return Err(ApiError::InvalidPathSegment(value.to_string()));
    }
    Ok(urlencoding::encode(value))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use shopfront_core::{UserId, UserRole};
    use wiremock::matchers::{body_json, header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::storage::InMemoryStore;

    fn user() -> User {
        User {
            id: UserId::new("u1"),
            name: "Ann".to_string(),
            email: "ann@example.com".to_string(),
            role: UserRole::Customer,
            created_at: None,
        }
    }

    fn session(access: &str, refresh: Option<&str>) -> Session {
        Session {
            user: user(),
            access_token: SecretString::from(access.to_string()),
            refresh_token: refresh.map(|r| SecretString::from(r.to_string())),
        }
    }

    async fn test_setup() -> (ApiClient, MockServer, Arc<InMemoryStore>) {
        let server = MockServer::start().await;
        let store = Arc::new(InMemoryStore::new());
        let config = ClientConfig::new(Url::parse(&format!("{}/", server.uri())).unwrap());
        let client = ApiClient::new(&config, store.clone()).unwrap();
        (client, server, store)
    }

    #[tokio::test]
    async fn test_public_request_has_no_auth_header() {
        let (client, server, _) = test_setup().await;
        client.set_session(session("tok", None)).await.unwrap();

        Mock::given(method("GET"))
            .and(path("/api/ping"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"ok": true})))
            .mount(&server)
            .await;

        let body: serde_json::Value = client.get("/api/ping", Auth::None).await.unwrap();
        assert_eq!(body["ok"], true);

        let requests = server.received_requests().await.unwrap();
        assert_eq!(requests.len(), 1);
        assert!(requests[0].headers.get("Authorization").is_none());
    }

    #[tokio::test]
    async fn test_bearer_request_attaches_token() {
        let (client, server, _) = test_setup().await;
        client.set_session(session("tok", None)).await.unwrap();

        Mock::given(method("GET"))
            .and(path("/api/orders"))
            .and(header("Authorization", "Bearer tok"))
            .and(query_param("page", "2"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
            .expect(1)
            .mount(&server)
            .await;

        let body: Vec<serde_json::Value> = client
            .get_with_query("api/orders", &serde_json::json!({"page": 2}), Auth::Bearer)
            .await
            .unwrap();
        assert!(body.is_empty());
    }

    #[tokio::test]
    async fn test_bearer_without_session() {
        let (client, _server, _) = test_setup().await;
        let result: Result<serde_json::Value, _> = client.get("api/orders", Auth::Bearer).await;
        assert!(matches!(result, Err(ApiError::NotAuthenticated)));
    }

    #[tokio::test]
    async fn test_401_refreshes_once_and_retries() {
        let (client, server, store) = test_setup().await;
        client.set_session(session("old", Some("r1"))).await.unwrap();

        Mock::given(method("GET"))
            .and(path("/api/orders"))
            .and(header("Authorization", "Bearer old"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/orders"))
            .and(header("Authorization", "Bearer new"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"n": 1})))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/api/auth/refresh"))
            .and(body_json(serde_json::json!({"refreshToken": "r1"})))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({"accessToken": "new", "refreshToken": "r2"})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let body: serde_json::Value = client.get("api/orders", Auth::Bearer).await.unwrap();
        assert_eq!(body["n"], 1);

        let current = client.session().await.unwrap();
        assert_eq!(current.access_token.expose_secret(), "new");
        let persisted = store.get(crate::auth::SESSION_KEY).await.unwrap().unwrap();
        assert!(persisted.contains("\"new\""));
        assert!(persisted.contains("\"r2\""));
    }

    #[tokio::test]
    async fn test_second_401_clears_session() {
        let (client, server, store) = test_setup().await;
        client.set_session(session("old", Some("r1"))).await.unwrap();
        let mut status = client.subscribe();

        Mock::given(method("GET"))
            .and(path("/api/orders"))
            .respond_with(ResponseTemplate::new(401))
            .expect(2)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/api/auth/refresh"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"accessToken": "new"})))
            .expect(1)
            .mount(&server)
            .await;

        let result: Result<serde_json::Value, _> = client.get("api/orders", Auth::Bearer).await;
        assert!(matches!(result, Err(ApiError::SessionExpired)));
        assert!(result.unwrap_err().requires_login());

        assert!(client.session().await.is_none());
        assert_eq!(store.get(crate::auth::SESSION_KEY).await.unwrap(), None);
        assert_eq!(*status.borrow_and_update(), SessionStatus::Expired);
    }

    fn jwt_expiring_in(seconds: i64) -> String {
        use base64::Engine;
        use base64::engine::general_purpose::URL_SAFE_NO_PAD;

        let exp = chrono::Utc::now().timestamp() + seconds;
        let header = URL_SAFE_NO_PAD.encode(r#"{"alg":"HS256","typ":"JWT"}"#);
        let payload = URL_SAFE_NO_PAD.encode(serde_json::json!({"exp": exp}).to_string());
        format!("{header}.{payload}.sig")
    }

    #[tokio::test]
    async fn test_401_after_early_refresh_does_not_refresh_again() {
        let (client, server, store) = test_setup().await;
        let expiring = jwt_expiring_in(10);
        client.set_session(session(&expiring, Some("r1"))).await.unwrap();
        let mut status = client.subscribe();

        Mock::given(method("POST"))
            .and(path("/api/auth/refresh"))
            .and(body_json(serde_json::json!({"refreshToken": "r1"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"accessToken": "fresh"})))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/orders"))
            .and(header("Authorization", "Bearer fresh"))
            .respond_with(ResponseTemplate::new(401))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/orders"))
            .and(header("Authorization", format!("Bearer {expiring}").as_str()))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
            .expect(0)
            .mount(&server)
            .await;

        let result: Result<serde_json::Value, _> = client.get("api/orders", Auth::Bearer).await;
        assert!(matches!(result, Err(ApiError::SessionExpired)));

        assert!(client.session().await.is_none());
        assert_eq!(store.get(crate::auth::SESSION_KEY).await.unwrap(), None);
        assert_eq!(*status.borrow_and_update(), SessionStatus::Expired);
    }

    #[test]
    fn test_segment_encoding() {
        assert_eq!(segment("p1").unwrap(), "p1");
        assert_eq!(segment("../admin").unwrap(), "..%2Fadmin");
        assert_eq!(segment("a?b#c d").unwrap(), "a%3Fb%23c%20d");
        assert!(matches!(segment(".."), Err(ApiError::InvalidPathSegment(_))));
    }

    #[tokio::test]
    async fn test_failed_refresh_clears_session() {
        let (client, server, _) = test_setup().await;
        client.set_session(session("old", Some("r1"))).await.unwrap();

        Mock::given(method("GET"))
            .and(path("/api/orders"))
            .respond_with(ResponseTemplate::new(401))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/api/auth/refresh"))
            .respond_with(ResponseTemplate::new(401).set_body_json(serde_json::json!({"error": "Invalid refresh token"})))
            .expect(1)
            .mount(&server)
            .await;

        let result: Result<serde_json::Value, _> = client.get("api/orders", Auth::Bearer).await;
        assert!(matches!(result, Err(ApiError::SessionExpired)));
        assert!(!client.is_authenticated().await);
    }

    #[tokio::test]
    async fn test_401_without_refresh_token_clears_session() {
        let (client, server, _) = test_setup().await;
        client.set_session(session("old", None)).await.unwrap();

        Mock::given(method("GET"))
            .and(path("/api/orders"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/api/auth/refresh"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let result: Result<serde_json::Value, _> = client.get("api/orders", Auth::Bearer).await;
        assert!(matches!(result, Err(ApiError::SessionExpired)));
    }

    #[tokio::test]
    async fn test_concurrent_401s_share_one_refresh() {
        let (client, server, _) = test_setup().await;
        client.set_session(session("old", Some("r1"))).await.unwrap();

        Mock::given(method("GET"))
            .and(header("Authorization", "Bearer old"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(header("Authorization", "Bearer new"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/api/auth/refresh"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({"accessToken": "new"}))
                    .set_delay(std::time::Duration::from_millis(50)),
            )
            .expect(1)
            .mount(&server)
            .await;

        let (a, b, c) = tokio::join!(
            client.get::<serde_json::Value>("api/orders", Auth::Bearer),
            client.get::<serde_json::Value>("api/auth/me", Auth::Bearer),
            client.get::<serde_json::Value>("api/blog", Auth::Bearer),
        );
        assert!(a.is_ok());
        assert!(b.is_ok());
        assert!(c.is_ok());
    }

    #[tokio::test]
    async fn test_error_body_is_surfaced() {
        let (client, server, _) = test_setup().await;

        Mock::given(method("POST"))
            .and(path("/api/contact"))
            .respond_with(
                ResponseTemplate::new(400).set_body_json(serde_json::json!({"error": "Message too short"})),
            )
            .mount(&server)
            .await;

        let err = client
            .post_no_content("api/contact", &serde_json::json!({}), Auth::None)
            .await
            .unwrap_err();
        assert_eq!(err.user_message(), "Message too short");
        assert_eq!(err.status(), Some(400));
    }

    #[tokio::test]
    async fn test_restore_session_publishes_status() {
        let (client, _server, store) = test_setup().await;
        SessionStore::new(store.clone())
            .save(&session("tok", Some("r")))
            .await
            .unwrap();

        let restored = client.restore_session().await.unwrap();
        assert_eq!(restored, Some(user()));
        assert!(client.subscribe().borrow().is_authenticated());
    }
}
