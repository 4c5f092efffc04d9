//! Published blog posts.

use shopfront_core::{Page, PageQuery};
use tracing::instrument;

use super::Paged;
use crate::error::ApiError;
use crate::http::{ApiClient, Auth, segment};
use crate::models::BlogPost;

impl ApiClient {
    /// Published posts, newest first.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the request fails.
    #[instrument(skip(self))]
    pub async fn list_blog_posts(&self, page: PageQuery) -> Result<Page<BlogPost>, ApiError> {
        self.get_with_query("api/blog", &Paged::page(page), Auth::None)
            .await
    }

    /// A published post by its slug.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::NotFound` for an unknown slug.
    #[instrument(skip(self))]
    pub async fn get_blog_post(&self, slug: &str) -> Result<BlogPost, ApiError> {
        self.get(&format!("api/blog/{}", segment(slug)?), Auth::None).await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, ResponseTemplate};

    use super::*;
    use crate::api::test_support::setup;

    #[tokio::test]
    async fn test_list_and_get_by_slug() {
        let (client, server, _) = setup().await;
        let post = json!({
            "_id": "b1", "title": "Hello", "slug": "hello", "content": "Body text", "published": true
        });

        Mock::given(method("GET"))
            .and(path("/api/blog"))
            .and(query_param("page", "2"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": [post.clone()], "page": 2, "limit": 12, "total": 13, "totalPages": 2
            })))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/blog/hello"))
            .respond_with(ResponseTemplate::new(200).set_body_json(post))
            .mount(&server)
            .await;

        let page = client.list_blog_posts(PageQuery::new(2, 12)).await.unwrap();
        assert!(!page.has_next());
        assert_eq!(page.total, 13);

        let post = client.get_blog_post("hello").await.unwrap();
        assert_eq!(post.title, "Hello");
    }
}
