//! Contact form submission.

use tracing::instrument;

use crate::error::ApiError;
use crate::http::{ApiClient, Auth};
use crate::models::ContactForm;
use crate::validation::Validate;

impl ApiClient {
    /// Send a contact message. The form is validated first.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Validation` for an invalid form, or the backend's
    /// error.
    #[instrument(skip(self, form), fields(email = %form.email))]
    pub async fn submit_contact(&self, form: &ContactForm) -> Result<(), ApiError> {
        form.validate()?;
        self.post_no_content("api/contact", form, Auth::None).await?;
        tracing::info!("Contact message sent");
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, ResponseTemplate};

    use super::*;
    use crate::api::test_support::setup;

    fn form(message: &str) -> ContactForm {
        ContactForm {
            name: "Ann".to_string(),
            email: "ann@example.com".to_string(),
            phone: None,
            subject: Some("Quote".to_string()),
            message: message.to_string(),
        }
    }

    #[tokio::test]
    async fn test_submit_contact() {
        let (client, server, _) = setup().await;

        Mock::given(method("POST"))
            .and(path("/api/contact"))
            .and(body_json(json!({
                "name": "Ann",
                "email": "ann@example.com",
                "subject": "Quote",
                "message": "I would like a quote"
            })))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({"success": true})))
            .expect(1)
            .mount(&server)
            .await;

        client.submit_contact(&form("I would like a quote")).await.unwrap();
    }

    #[tokio::test]
    async fn test_short_message_is_not_sent() {
        let (client, server, _) = setup().await;

        let err = client.submit_contact(&form("Hi")).await.unwrap_err();
        assert!(matches!(err, ApiError::Validation(_)));
        assert!(server.received_requests().await.unwrap().is_empty());
    }
}
