//! Client-side form validation.
//!
//! Forms are checked before they are sent so obvious mistakes never reach the
//! backend. Each failing field gets one message; fields are reported in the
//! order the form lists them.

use std::fmt;

use rust_decimal::Decimal;
use secrecy::ExposeSecret;
use shopfront_core::Email;

use crate::models::{
    BlogPostInput, ContactForm, LoginRequest, ProductInput, ProjectInput, RegisterRequest,
    ServiceInput, ShippingAddress,
};

/// Minimum password length for new accounts.
pub const MIN_PASSWORD_LEN: usize = 8;

/// Minimum contact message length.
pub const MIN_MESSAGE_LEN: usize = 10;

/// Field → message pairs, in form order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    errors: Vec<(&'static str, String)>,
}

impl ValidationErrors {
    #[must_use]
    pub const fn new() -> Self {
        Self { errors: Vec::new() }
    }

    /// Record a failure for `field`. Only the first message per field is kept.
    pub fn add(&mut self, field: &'static str, message: impl Into<String>) {
        if self.get(field).is_none() {
            self.errors.push((field, message.into()));
        }
    }

    /// Message recorded for `field`.
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&str> {
        self.errors
            .iter()
            .find(|(name, _)| *name == field)
            .map(|(_, message)| message.as_str())
    }

    /// First failure, for single-line display.
    #[must_use]
    pub fn first(&self) -> Option<(&str, &str)> {
        self.errors
            .first()
            .map(|(field, message)| (*field, message.as_str()))
    }

    /// All failures in form order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.errors
            .iter()
            .map(|(field, message)| (*field, message.as_str()))
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// `Ok(())` when nothing failed.
    ///
    /// # Errors
    ///
    /// Returns `self` if any field failed.
    pub fn into_result(self) -> Result<(), Self> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }

    fn required(&mut self, field: &'static str, label: &str, value: &str) -> bool {
        if value.trim().is_empty() {
            self.add(field, format!("{label} is required"));
            false
        } else {
            true
        }
    }

    fn email(&mut self, field: &'static str, value: &str) {
        if self.required(field, "Email", value) && Email::parse(value).is_err() {
            self.add(field, "Please enter a valid email address");
        }
    }

    fn phone(&mut self, field: &'static str, value: &str) {
        if !is_phone(value) {
            self.add(field, "Please enter a valid phone number");
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, message) in self.iter() {
            if !first {
                f.write_str("; ")?;
            }
            write!(f, "{field}: {message}")?;
            first = false;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

/// A form that can be checked before submission.
pub trait Validate {
    /// # Errors
    ///
    /// Returns every failing field.
    fn validate(&self) -> Result<(), ValidationErrors>;
}

/// Digits with optional `+`, spaces, dashes, dots and parentheses; 7 to 15
/// digits in total.
fn is_phone(value: &str) -> bool {
    let value = value.trim();
    let allowed = value
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '+' | ' ' | '-' | '.' | '(' | ')'));
    let digits = value.chars().filter(char::is_ascii_digit).count();
    allowed && (7..=15).contains(&digits)
}

/// Whether `slug` matches `[a-z0-9-]+`.
#[must_use]
pub fn is_slug(slug: &str) -> bool {
    !slug.is_empty()
        && slug
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
}

/// Turn a title into a URL slug: lowercase ASCII alphanumerics separated by
/// single dashes.
#[must_use]
pub fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    let mut pending_dash = false;
    for c in title.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(c.to_ascii_lowercase());
        } else {
            pending_dash = true;
        }
    }
    slug
}

impl Validate for LoginRequest {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.email("email", &self.email);
        if self.password.expose_secret().is_empty() {
            errors.add("password", "Password is required");
        }
        errors.into_result()
    }
}

impl Validate for RegisterRequest {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.required("name", "Name", &self.name);
        errors.email("email", &self.email);

        let password = self.password.expose_secret();
        if password.chars().count() < MIN_PASSWORD_LEN {
            errors.add(
                "password",
                format!("Password must be at least {MIN_PASSWORD_LEN} characters"),
            );
        }
        if password != self.confirm_password.expose_secret() {
            errors.add("confirmPassword", "Passwords do not match");
        }
        errors.into_result()
    }
}

impl Validate for ContactForm {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.required("name", "Name", &self.name);
        errors.email("email", &self.email);
        if let Some(phone) = self.phone.as_deref().filter(|p| !p.trim().is_empty()) {
            errors.phone("phone", phone);
        }
        if errors.required("message", "Message", &self.message)
            && self.message.trim().chars().count() < MIN_MESSAGE_LEN
        {
            errors.add(
                "message",
                format!("Message must be at least {MIN_MESSAGE_LEN} characters"),
            );
        }
        errors.into_result()
    }
}

impl Validate for ShippingAddress {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.required("fullName", "Full name", &self.full_name);
        errors.required("addressLine1", "Address", &self.address_line1);
        errors.required("city", "City", &self.city);
        errors.required("postalCode", "Postal code", &self.postal_code);
        errors.required("country", "Country", &self.country);
        if errors.required("phone", "Phone", &self.phone) {
            errors.phone("phone", &self.phone);
        }
        errors.into_result()
    }
}

impl Validate for ProductInput {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.required("name", "Name", &self.name);
        if self.price <= Decimal::ZERO {
            errors.add("price", "Price must be greater than 0");
        }
        if self
            .discount
            .is_some_and(|d| !(Decimal::ZERO..=Decimal::ONE_HUNDRED).contains(&d))
        {
            errors.add("discount", "Discount must be between 0 and 100");
        }
        errors.into_result()
    }
}

impl Validate for BlogPostInput {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.required("title", "Title", &self.title);
        if errors.required("slug", "Slug", &self.slug) && !is_slug(&self.slug) {
            errors.add(
                "slug",
                "Slug may only contain lowercase letters, numbers and dashes",
            );
        }
        errors.required("content", "Content", &self.content);
        errors.into_result()
    }
}

impl Validate for ProjectInput {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.required("title", "Title", &self.title);
        errors.required("description", "Description", &self.description);
        errors.into_result()
    }
}

impl Validate for ServiceInput {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.required("title", "Title", &self.title);
        errors.required("description", "Description", &self.description);
        if self.price.is_some_and(|price| price < Decimal::ZERO) {
            errors.add("price", "Price cannot be negative");
        }
        errors.into_result()
    }
}
