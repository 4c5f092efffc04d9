//! Access-token inspection.
//!
//! Access tokens are JWTs. The client never verifies them; it only reads the
//! `exp` claim to refresh shortly before expiry instead of waiting for a 401.
//! Tokens that are not JWTs simply have no known expiry.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use serde::Deserialize;

#[derive(Deserialize)]
struct Claims {
    #[serde(default)]
    exp: Option<i64>,
}

/// Unix timestamp at which the token expires, if it carries one.
#[must_use]
pub fn expires_at(token: &str) -> Option<i64> {
    let payload = token.split('.').nth(1)?;
    let bytes = URL_SAFE_NO_PAD
        .decode(payload.trim_end_matches('='))
        .ok()?;
    let claims: Claims = serde_json::from_slice(&bytes).ok()?;
    claims.exp
}

/// Whether the token expires within `seconds` of `now`.
///
/// Tokens without a readable `exp` claim never report as expiring.
#[must_use]
pub fn expires_within(token: &str, seconds: i64, now: i64) -> bool {
    expires_at(token).is_some_and(|exp| now >= exp.saturating_sub(seconds))
}
