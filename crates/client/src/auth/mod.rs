//! Session state and its persistence.
//!
//! A [`Session`] is the signed-in user plus an access/refresh token pair. It
//! lives in memory inside [`crate::ApiClient`] and is mirrored to the
//! key-value store under [`SESSION_KEY`] so it survives restarts. The
//! interceptor that refreshes tokens is in [`crate::http`]; this module only
//! holds the data and the storage round trip.

pub mod token;

use std::fmt;
use std::sync::Arc;

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::models::User;
use crate::storage::{KeyValueStore, StorageError, load_json, save_json};

/// Storage key holding the persisted session.
pub const SESSION_KEY: &str = "session";

/// Refresh this many seconds before the access token's `exp`.
pub const REFRESH_LEEWAY_SECS: i64 = 60;

/// An authenticated identity.
#[derive(Clone)]
pub struct Session {
    pub user: User,
    pub access_token: SecretString,
    pub refresh_token: Option<SecretString>,
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("user", &self.user)
            .field("access_token", &"[REDACTED]")
            .field(
                "refresh_token",
                &self.refresh_token.as_ref().map(|_| "[REDACTED]"),
            )
            .finish()
    }
}

impl Session {
    /// Unix timestamp when the access token expires, if known.
    #[must_use]
    pub fn access_expires_at(&self) -> Option<i64> {
        token::expires_at(self.access_token.expose_secret())
    }

    /// Whether the access token is known to expire within the refresh leeway.
    #[must_use]
    pub fn needs_refresh(&self) -> bool {
        let now = chrono::Utc::now().timestamp();
        token::expires_within(self.access_token.expose_secret(), REFRESH_LEEWAY_SECS, now)
    }

    /// Whether a refresh token is available.
    #[must_use]
    pub const fn can_refresh(&self) -> bool {
        self.refresh_token.is_some()
    }

    /// Replace the tokens after a refresh. A response without a new refresh
    /// token keeps the old one.
    pub(crate) fn apply_refresh(&mut self, refreshed: TokenResponse) {
        self.access_token = SecretString::from(refreshed.access_token);
        if let Some(refresh_token) = refreshed.refresh_token {
            self.refresh_token = Some(SecretString::from(refresh_token));
        }
    }
}

/// Authentication state published to front ends.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionStatus {
    /// No one is signed in.
    Anonymous,
    /// Signed in.
    Authenticated {
        /// The signed-in user.
        user: User,
    },
    /// The session was lost to an unrecoverable auth failure; show the login
    /// screen.
    Expired,
}

impl SessionStatus {
    /// Whether a user is signed in.
    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        matches!(self, Self::Authenticated { .. })
    }
}

// =============================================================================
// Wire Types
// =============================================================================

/// Response from login and registration.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct AuthResponse {
    pub user: User,
    #[serde(alias = "token")]
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
}

impl From<AuthResponse> for Session {
    fn from(response: AuthResponse) -> Self {
        Self {
            user: response.user,
            access_token: SecretString::from(response.access_token),
            refresh_token: response.refresh_token.map(SecretString::from),
        }
    }
}

/// Response from `POST /api/auth/refresh`.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct TokenResponse {
    #[serde(alias = "token")]
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
}

/// Body for `POST /api/auth/refresh`.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RefreshRequest<'a> {
    pub refresh_token: &'a str,
}

// =============================================================================
// Persistence
// =============================================================================

/// Persisted form of a session.
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredSession {
    user: User,
    access_token: String,
    #[serde(default)]
    refresh_token: Option<String>,
}

/// Reads and writes the session in a [`KeyValueStore`].
#[derive(Clone)]
pub struct SessionStore {
    store: Arc<dyn KeyValueStore>,
}

impl SessionStore {
    /// Wrap a key-value store.
    #[must_use]
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Load the persisted session.
    ///
    /// A corrupt entry is discarded and treated as signed out.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend itself fails.
    #[instrument(skip(self))]
    pub async fn load(&self) -> Result<Option<Session>, StorageError> {
        match load_json::<StoredSession>(self.store.as_ref(), SESSION_KEY).await {
            Ok(stored) => Ok(stored.map(|s| Session {
                user: s.user,
                access_token: SecretString::from(s.access_token),
                refresh_token: s.refresh_token.map(SecretString::from),
            })),
            Err(StorageError::Serialization(e)) => {
                tracing::warn!(error = %e, "Discarding unreadable stored session");
                self.clear().await?;
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    /// Persist a session, replacing any previous one.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the write fails.
    pub async fn save(&self, session: &Session) -> Result<(), StorageError> {
        let stored = StoredSession {
            user: session.user.clone(),
            access_token: session.access_token.expose_secret().to_string(),
            refresh_token: session
                .refresh_token
                .as_ref()
                .map(|t| t.expose_secret().to_string()),
        };
        save_json(self.store.as_ref(), SESSION_KEY, &stored).await
    }

    /// Remove the persisted session.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the removal fails.
    pub async fn clear(&self) -> Result<(), StorageError> {
        self.store.remove(SESSION_KEY).await
    }
}
