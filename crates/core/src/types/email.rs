//! Email addresses as accepted by the sign-up, sign-in and contact forms.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Why a string was rejected as an [`Email`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum EmailError {
    #[error("email cannot be empty")]
    Empty,
    #[error("email must be at most {max} characters")]
    TooLong { max: usize },
    #[error("email cannot contain spaces")]
    ContainsWhitespace,
    #[error("email must look like name@domain.tld")]
    Malformed,
}

/// A normalized email address: trimmed, lowercased, `local@domain.tld`.
///
/// The check is the shape test a sign-up form does, not RFC 5322; the
/// backend remains the authority.
///
/// ```
/// use shopfront_core::Email;
///
/// let email = Email::parse(" Ann@Example.com ").unwrap();
/// assert_eq!(email.as_str(), "ann@example.com");
/// assert_eq!(email.domain(), "example.com");
///
/// assert!(Email::parse("ann@localhost").is_err());
/// assert!(Email::parse("ann lee@example.com").is_err());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(try_from = "String", into = "String")]
pub struct Email(String);

impl Email {
    /// Longest address a mail server has to accept.
    pub const MAX_LENGTH: usize = 254;

    /// Validate and normalize `input`.
    ///
    /// # Errors
    ///
    /// Returns `EmailError` when the trimmed input is empty, too long,
    /// contains whitespace, or is not `local@domain.tld` with exactly one `@`.
    pub fn parse(input: &str) -> Result<Self, EmailError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(EmailError::Empty);
        }
        if trimmed.chars().count() > Self::MAX_LENGTH {
            return Err(EmailError::TooLong {
                max: Self::MAX_LENGTH,
            });
        }
        if trimmed.chars().any(char::is_whitespace) {
            return Err(EmailError::ContainsWhitespace);
        }

        let (local, domain) = trimmed.split_once('@').ok_or(EmailError::Malformed)?;
        let domain_ok = domain
            .split_once('.')
            .is_some_and(|(host, _)| !host.is_empty())
            && !domain.ends_with('.');
        if local.is_empty() || domain.contains('@') || !domain_ok {
            return Err(EmailError::Malformed);
        }

        Ok(Self(trimmed.to_lowercase()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Part after the `@`.
    #[must_use]
    pub fn domain(&self) -> &str {
        self.0.split_once('@').map_or("", |(_, domain)| domain)
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for Email {
    type Err = EmailError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Email {
    type Error = EmailError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Email> for String {
    fn from(email: Email) -> Self {
        email.0
    }
}

impl AsRef<str> for Email {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
