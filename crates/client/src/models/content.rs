//! Blog, portfolio, services and contact types.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use shopfront_core::{BlogPostId, ContactMessageId, ProjectId, ServiceId};

// =============================================================================
// Blog
// =============================================================================

/// A blog post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogPost {
    #[serde(alias = "_id")]
    pub id: BlogPostId,
    pub title: String,
    pub slug: String,
    #[serde(default)]
    pub excerpt: Option<String>,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub published: bool,
    #[serde(default)]
    pub published_at: Option<DateTime<Utc>>,
}

/// Average reading speed used for the "N min read" label.
const WORDS_PER_MINUTE: usize = 200;

impl BlogPost {
    /// Estimated reading time in minutes, at least 1.
    #[must_use]
    pub fn reading_time_minutes(&self) -> usize {
        let words = self.content.split_whitespace().count();
        words.div_ceil(WORDS_PER_MINUTE).max(1)
    }

    /// The excerpt, or the first `max_chars` characters of the content.
    #[must_use]
    pub fn summary(&self, max_chars: usize) -> String {
        if let Some(excerpt) = self.excerpt.as_deref().filter(|e| !e.trim().is_empty()) {
            return excerpt.to_string();
        }
        let content = self.content.trim();
        if content.chars().count() <= max_chars {
            return content.to_string();
        }
        let truncated: String = content.chars().take(max_chars).collect();
        format!("{}…", truncated.trim_end())
    }
}

/// Body for creating or updating a blog post.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogPostInput {
    pub title: String,
    pub slug: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub excerpt: Option<String>,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    pub tags: Vec<String>,
    pub published: bool,
}

// =============================================================================
// Projects
// =============================================================================

/// A portfolio project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    #[serde(alias = "_id")]
    pub id: ProjectId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub client: Option<String>,
    #[serde(default)]
    pub link: Option<String>,
    #[serde(default)]
    pub featured: bool,
}

/// Body for creating or updating a project.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectInput {
    pub title: String,
    pub description: String,
    pub images: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    pub featured: bool,
}

// =============================================================================
// Services
// =============================================================================

/// A service offered by the business.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Service {
    #[serde(alias = "_id")]
    pub id: ServiceId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// Starting price, when the service has one.
    #[serde(default)]
    pub price: Option<Decimal>,
    #[serde(default)]
    pub features: Vec<String>,
    #[serde(default)]
    pub image: Option<String>,
}

/// Body for creating or updating a service.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceInput {
    pub title: String,
    pub description: String,
    #[serde(
        with = "rust_decimal::serde::float_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub price: Option<Decimal>,
    pub features: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

// =============================================================================
// Contact
// =============================================================================

/// Body for `POST /api/contact`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    pub message: String,
}

/// A contact message as seen in the back-office inbox.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactMessage {
    #[serde(alias = "_id")]
    pub id: ContactMessageId,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub subject: Option<String>,
    pub message: String,
    #[serde(default)]
    pub read: bool,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn post(content: &str, excerpt: Option<&str>) -> BlogPost {
        BlogPost {
            id: BlogPostId::new("b1"),
            title: "Hello".to_string(),
            slug: "hello".to_string(),
            excerpt: excerpt.map(str::to_string),
            content: content.to_string(),
            author: None,
            image: None,
            tags: vec![],
            published: true,
            published_at: None,
        }
    }

    #[test]
    fn test_reading_time() {
        assert_eq!(post("", None).reading_time_minutes(), 1);
        assert_eq!(post(&"word ".repeat(450), None).reading_time_minutes(), 3);
    }

    #[test]
    fn test_summary_prefers_excerpt() {
        assert_eq!(post("long body", Some("Short")).summary(3), "Short");
        assert_eq!(post("abcdef", None).summary(3), "abc…");
        assert_eq!(post("abc", None).summary(3), "abc");
    }

    #[test]
    fn test_contact_message_deserialize() {
        let json = r#"{"_id":"m1","name":"Ann","email":"ann@example.com","message":"Hi there","read":false}"#;
        let message: ContactMessage = serde_json::from_str(json).unwrap();
        assert_eq!(message.id.as_str(), "m1");
        assert!(!message.read);
    }
}
