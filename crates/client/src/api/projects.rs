//! Portfolio projects.

use shopfront_core::ProjectId;
use tracing::instrument;

use super::ListEnvelope;
use crate::error::ApiError;
use crate::http::{ApiClient, Auth, segment};
use crate::models::Project;

impl ApiClient {
    /// All portfolio projects.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the request fails.
    #[instrument(skip(self))]
    pub async fn list_projects(&self) -> Result<Vec<Project>, ApiError> {
        let projects: ListEnvelope<Project> = self.get("api/projects", Auth::None).await?;
        Ok(projects.data)
    }

    /// One project.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::NotFound` for an unknown ID.
    #[instrument(skip(self), fields(project_id = %id))]
    pub async fn get_project(&self, id: &ProjectId) -> Result<Project, ApiError> {
        self.get(&format!("api/projects/{}", segment(id.as_str())?), Auth::None).await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, ResponseTemplate};

    use super::*;
    use crate::api::test_support::setup;

    #[tokio::test]
    async fn test_list_projects() {
        let (client, server, _) = setup().await;

        Mock::given(method("GET"))
            .and(path("/api/projects"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": [
                    {"_id": "pr1", "title": "Rebrand", "description": "Logo and site"},
                    {"_id": "pr2", "title": "Shop", "description": "Online store", "featured": true}
                ]
            })))
            .mount(&server)
            .await;

        let projects = client.list_projects().await.unwrap();
        assert_eq!(projects.len(), 2);
        assert!(projects.iter().any(|p| p.featured));
    }
}
