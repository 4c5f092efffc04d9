//! Offered services.

use shopfront_core::ServiceId;
use tracing::instrument;

use super::ListEnvelope;
use crate::error::ApiError;
use crate::http::{ApiClient, Auth, segment};
use crate::models::Service;

impl ApiClient {
    /// All offered services.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the request fails.
    #[instrument(skip(self))]
    pub async fn list_services(&self) -> Result<Vec<Service>, ApiError> {
        let services: ListEnvelope<Service> = self.get("api/services", Auth::None).await?;
        Ok(services.data)
    }

    /// One service.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::NotFound` for an unknown ID.
    #[instrument(skip(self), fields(service_id = %id))]
    pub async fn get_service(&self, id: &ServiceId) -> Result<Service, ApiError> {
        self.get(&format!("api/services/{}", segment(id.as_str())?), Auth::None).await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rust_decimal::Decimal;
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, ResponseTemplate};

    use super::*;
    use crate::api::test_support::setup;

    #[tokio::test]
    async fn test_get_service() {
        let (client, server, _) = setup().await;

        Mock::given(method("GET"))
            .and(path("/api/services/s1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "_id": "s1", "title": "Web design", "description": "Sites", "price": 499.5,
                "features": ["Responsive", "SEO"]
            })))
            .mount(&server)
            .await;

        let service = client.get_service(&ServiceId::new("s1")).await.unwrap();
        assert_eq!(service.price, Some(Decimal::new(4995, 1)));
        assert_eq!(service.features.len(), 2);
    }
}
