//! Sign-in, registration and the current user.

use secrecy::ExposeSecret;
use serde::Serialize;
use tracing::instrument;

use crate::auth::{AuthResponse, Session, SessionStatus};
use crate::error::ApiError;
use crate::http::{ApiClient, Auth};
use crate::models::{LoginRequest, RegisterRequest, User};
use crate::validation::Validate;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct LogoutRequest<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    refresh_token: Option<&'a str>,
}

impl ApiClient {
    /// Sign in and make the returned session current.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Validation` for a malformed form, or the backend's
    /// error (usually a 401 with "Invalid credentials").
    #[instrument(skip(self, request), fields(email = %request.email))]
    pub async fn login(&self, request: &LoginRequest) -> Result<User, ApiError> {
        request.validate()?;
        let response: AuthResponse = self.post("api/auth/login", request, Auth::None).await?;
        self.start_session(response).await
    }

    /// Create an account and sign in as it.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Validation` for a malformed form, or the backend's
    /// error (for example an email already in use).
    #[instrument(skip(self, request), fields(email = %request.email))]
    pub async fn register(&self, request: &RegisterRequest) -> Result<User, ApiError> {
        request.validate()?;
        let response: AuthResponse = self
            .post("api/auth/register", request, Auth::None)
            .await?;
        self.start_session(response).await
    }

    async fn start_session(&self, response: AuthResponse) -> Result<User, ApiError> {
        let session = Session::from(response);
        let user = session.user.clone();
        self.set_session(session).await?;
        tracing::info!(user_id = %user.id, "Signed in");
        Ok(user)
    }

    /// Sign out.
    ///
    /// The backend is told on a best-effort basis; the local session is
    /// cleared whatever it answers.
    #[instrument(skip(self))]
    pub async fn logout(&self) {
        if let Some(session) = self.session().await {
            let body = LogoutRequest {
                refresh_token: session.refresh_token.as_ref().map(|t| t.expose_secret()),
            };
            if let Err(e) = self
                .post_no_content("api/auth/logout", &body, Auth::Bearer)
                .await
            {
                tracing::debug!(error = %e, "Logout request failed; clearing locally");
            }
        }
        self.clear_session(SessionStatus::Anonymous).await;
    }

    /// Fetch the signed-in user from the backend and refresh the cached copy.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::NotAuthenticated` without a session, or
    /// `ApiError::SessionExpired` if it can no longer be refreshed.
    #[instrument(skip(self))]
    pub async fn me(&self) -> Result<User, ApiError> {
        let user: User = self.get("api/auth/me", Auth::Bearer).await?;
        if let Some(mut session) = self.session().await {
            if session.user.id == user.id && session.user != user {
                session.user = user.clone();
                self.set_session(session).await?;
            }
        }
        Ok(user)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use secrecy::SecretString;
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, ResponseTemplate};

    use super::*;
    use crate::KeyValueStore;
    use crate::api::test_support::{admin, setup, signed_in};
    use crate::auth::SESSION_KEY;

    fn user_json() -> serde_json::Value {
        json!({"_id": "u1", "name": "Ann", "email": "ann@example.com", "role": "customer"})
    }

    #[tokio::test]
    async fn test_login_persists_session() {
        let (client, server, store) = setup().await;

        Mock::given(method("POST"))
            .and(path("/api/auth/login"))
            .and(body_json(json!({"email": "ann@example.com", "password": "hunter22"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "user": user_json(),
                "accessToken": "a1",
                "refreshToken": "r1"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let user = client
            .login(&LoginRequest {
                email: "ann@example.com".to_string(),
                password: SecretString::from("hunter22"),
            })
            .await
            .unwrap();

        assert_eq!(user.name, "Ann");
        assert!(client.subscribe().borrow().is_authenticated());
        let session = client.session().await.unwrap();
        assert_eq!(session.access_token.expose_secret(), "a1");
        assert!(store.get(SESSION_KEY).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_login_invalid_credentials() {
        let (client, server, _) = setup().await;

        Mock::given(method("POST"))
            .and(path("/api/auth/login"))
            .respond_with(
                ResponseTemplate::new(401).set_body_json(json!({"error": "Invalid credentials"})),
            )
            .mount(&server)
            .await;

        let err = client
            .login(&LoginRequest {
                email: "ann@example.com".to_string(),
                password: SecretString::from("wrong"),
            })
            .await
            .unwrap_err();

        assert_eq!(err.user_message(), "Invalid credentials");
        assert!(!client.is_authenticated().await);
    }

    #[tokio::test]
    async fn test_register_validates_before_sending() {
        let (client, server, _) = setup().await;

        let err = client
            .register(&RegisterRequest {
                name: "Ann".to_string(),
                email: "ann@example.com".to_string(),
                password: SecretString::from("short"),
                confirm_password: SecretString::from("short"),
            })
            .await
            .unwrap_err();

        assert!(matches!(err, ApiError::Validation(_)));
        assert!(server.received_requests().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_logout_clears_even_when_backend_fails() {
        let (client, server, store) = signed_in(admin()).await;

        Mock::given(method("POST"))
            .and(path("/api/auth/logout"))
            .and(header("authorization", "Bearer access"))
            .respond_with(ResponseTemplate::new(500))
            .expect(1)
            .mount(&server)
            .await;

        client.logout().await;

        assert!(!client.is_authenticated().await);
        assert_eq!(*client.subscribe().borrow(), SessionStatus::Anonymous);
        assert_eq!(store.get(SESSION_KEY).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_me_updates_cached_user() {
        let (client, server, _) = signed_in(admin()).await;

        Mock::given(method("GET"))
            .and(path("/api/auth/me"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "_id": "admin-1", "name": "Renamed", "email": "admin@example.com", "role": "admin"
            })))
            .mount(&server)
            .await;

        let user = client.me().await.unwrap();
        assert_eq!(user.name, "Renamed");
        assert_eq!(client.current_user().await.unwrap().name, "Renamed");
    }
}
