//! User and authentication request types.

use std::fmt;

use chrono::{DateTime, Utc};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize, Serializer};
use shopfront_core::{UserId, UserRole};

/// An authenticated user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(alias = "_id")]
    pub id: UserId,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub role: UserRole,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl User {
    /// Whether the user may use the back-office.
    #[must_use]
    pub const fn is_admin(&self) -> bool {
        self.role.is_admin()
    }
}

fn expose<S: Serializer>(secret: &SecretString, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(secret.expose_secret())
}

/// Body for `POST /api/auth/login`.
#[derive(Serialize)]
pub struct LoginRequest {
    pub email: String,
    #[serde(serialize_with = "expose")]
    pub password: SecretString,
}

impl fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginRequest")
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// Body for `POST /api/auth/register`.
///
/// `confirm_password` is checked client-side and never sent.
#[derive(Serialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    #[serde(serialize_with = "expose")]
    pub password: SecretString,
    #[serde(skip)]
    pub confirm_password: SecretString,
}

impl fmt::Debug for RegisterRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegisterRequest")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .field("confirm_password", &"[REDACTED]")
            .finish()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_login_request_serializes_password() {
        let request = LoginRequest {
            email: "ann@example.com".to_string(),
            password: SecretString::from("hunter22"),
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["password"], "hunter22");
    }

    #[test]
    fn test_debug_redacts_passwords() {
        let request = RegisterRequest {
            name: "Ann".to_string(),
            email: "ann@example.com".to_string(),
            password: SecretString::from("super_secret_pw"),
            confirm_password: SecretString::from("super_secret_pw"),
        };
        let debug_output = format!("{request:?}");
        assert!(debug_output.contains("[REDACTED]"));
        assert!(!debug_output.contains("super_secret_pw"));

        let json = serde_json::to_value(&request).unwrap();
        assert!(json.get("confirm_password").is_none());
        assert!(json.get("confirmPassword").is_none());
    }

    #[test]
    fn test_user_role_defaults_to_customer() {
        let user: User =
            serde_json::from_str(r#"{"_id":"u1","name":"Ann","email":"ann@example.com"}"#)
                .unwrap();
        assert!(!user.is_admin());
    }
}
