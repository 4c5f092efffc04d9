//! Back-office operations under `/api/admin`.
//!
//! Every call needs an admin session; a customer session gets
//! `ApiError::Forbidden`. Product writes clear the catalog cache so the
//! storefront sees the change on its next read.

use serde::Serialize;
use shopfront_core::{
    BlogPostId, ContactMessageId, OrderId, OrderStatus, Page, PageQuery, ProductId, ProjectId,
    ServiceId,
};
use tracing::instrument;

use super::Paged;
use crate::error::ApiError;
use crate::http::{ApiClient, Auth, segment};
use crate::models::{
    BlogPost, BlogPostInput, ContactMessage, DashboardStats, Order, Product, ProductInput,
    Project, ProjectInput, Service, ServiceInput,
};
use crate::validation::Validate;

#[derive(Debug, Serialize)]
struct OrderFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    status: Option<OrderStatus>,
}

#[derive(Serialize)]
struct StatusUpdate {
    status: OrderStatus,
}

#[derive(Serialize)]
struct ReadUpdate {
    read: bool,
}

impl ApiClient {
    // =========================================================================
    // Dashboard
    // =========================================================================

    /// Headline numbers for the dashboard.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the request fails.
    #[instrument(skip(self))]
    pub async fn admin_stats(&self) -> Result<DashboardStats, ApiError> {
        self.get("api/admin/stats", Auth::Bearer).await
    }

    // =========================================================================
    // Products
    // =========================================================================

    /// Create a product.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Validation` for an invalid form, or the backend's
    /// error.
    #[instrument(skip(self, input), fields(name = %input.name))]
    pub async fn create_product(&self, input: &ProductInput) -> Result<Product, ApiError> {
        input.validate()?;
        let product: Product = self
            .post("api/admin/products", input, Auth::Bearer)
            .await?;
        self.cache().invalidate_all();
        tracing::info!(product_id = %product.id, "Product created");
        Ok(product)
    }

    /// Replace a product's editable fields.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Validation` for an invalid form,
    /// `ApiError::NotFound` for an unknown ID, or the backend's error.
    #[instrument(skip(self, input), fields(product_id = %id))]
    pub async fn update_product(
        &self,
        id: &ProductId,
        input: &ProductInput,
    ) -> Result<Product, ApiError> {
        input.validate()?;
        let product: Product = self
            .put(&format!("api/admin/products/{}", segment(id.as_str())?), input, Auth::Bearer)
            .await?;
        self.cache().invalidate_all();
        Ok(product)
    }

    /// Delete a product.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::NotFound` for an unknown ID.
    #[instrument(skip(self), fields(product_id = %id))]
    pub async fn delete_product(&self, id: &ProductId) -> Result<(), ApiError> {
        self.delete(&format!("api/admin/products/{}", segment(id.as_str())?), Auth::Bearer)
            .await?;
        self.cache().invalidate_all();
        tracing::info!("Product deleted");
        Ok(())
    }

    // =========================================================================
    // Orders
    // =========================================================================

    /// All orders, optionally restricted to one status.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the request fails.
    #[instrument(skip(self))]
    pub async fn admin_list_orders(
        &self,
        status: Option<OrderStatus>,
        page: PageQuery,
    ) -> Result<Page<Order>, ApiError> {
        let filter = OrderFilter { status };
        self.get_with_query("api/admin/orders", &Paged::new(&filter, page), Auth::Bearer)
            .await
    }

    /// Full order detail including its sub-orders.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::NotFound` for an unknown ID.
    #[instrument(skip(self), fields(order_id = %id))]
    pub async fn admin_get_order(&self, id: &OrderId) -> Result<Order, ApiError> {
        self.get(&format!("api/admin/orders/{}", segment(id.as_str())?), Auth::Bearer)
            .await
    }

    /// Move an order to a new status.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the backend rejects the transition.
    #[instrument(skip(self), fields(order_id = %id, status = %status))]
    pub async fn update_order_status(
        &self,
        id: &OrderId,
        status: OrderStatus,
    ) -> Result<Order, ApiError> {
        let order: Order = self
            .patch(
                &format!("api/admin/orders/{}/status", segment(id.as_str())?),
                &StatusUpdate { status },
                Auth::Bearer,
            )
            .await?;
        tracing::info!("Order status updated");
        Ok(order)
    }

    // =========================================================================
    // Content
    // =========================================================================

    /// Create a blog post.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Validation` for an invalid form, or the backend's
    /// error (for example a duplicate slug).
    #[instrument(skip(self, input), fields(slug = %input.slug))]
    pub async fn create_blog_post(&self, input: &BlogPostInput) -> Result<BlogPost, ApiError> {
        input.validate()?;
        self.post("api/admin/blog", input, Auth::Bearer).await
    }

    /// Replace a blog post.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Validation` for an invalid form, or the backend's
    /// error.
    #[instrument(skip(self, input), fields(post_id = %id))]
    pub async fn update_blog_post(
        &self,
        id: &BlogPostId,
        input: &BlogPostInput,
    ) -> Result<BlogPost, ApiError> {
        input.validate()?;
        self.put(&format!("api/admin/blog/{}", segment(id.as_str())?), input, Auth::Bearer)
            .await
    }

    /// Delete a blog post.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::NotFound` for an unknown ID.
    #[instrument(skip(self), fields(post_id = %id))]
    pub async fn delete_blog_post(&self, id: &BlogPostId) -> Result<(), ApiError> {
        self.delete(&format!("api/admin/blog/{}", segment(id.as_str())?), Auth::Bearer)
            .await
    }

    /// Create a portfolio project.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Validation` for an invalid form, or the backend's
    /// error.
    #[instrument(skip(self, input), fields(title = %input.title))]
    pub async fn create_project(&self, input: &ProjectInput) -> Result<Project, ApiError> {
        input.validate()?;
        self.post("api/admin/projects", input, Auth::Bearer).await
    }

    /// Replace a portfolio project.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Validation` for an invalid form, or the backend's
    /// error.
    #[instrument(skip(self, input), fields(project_id = %id))]
    pub async fn update_project(
        &self,
        id: &ProjectId,
        input: &ProjectInput,
    ) -> Result<Project, ApiError> {
        input.validate()?;
        self.put(&format!("api/admin/projects/{}", segment(id.as_str())?), input, Auth::Bearer)
            .await
    }

    /// Delete a portfolio project.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::NotFound` for an unknown ID.
    #[instrument(skip(self), fields(project_id = %id))]
    pub async fn delete_project(&self, id: &ProjectId) -> Result<(), ApiError> {
        self.delete(&format!("api/admin/projects/{}", segment(id.as_str())?), Auth::Bearer)
            .await
    }

    /// Create a service.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Validation` for an invalid form, or the backend's
    /// error.
    #[instrument(skip(self, input), fields(title = %input.title))]
    pub async fn create_service(&self, input: &ServiceInput) -> Result<Service, ApiError> {
        input.validate()?;
        self.post("api/admin/services", input, Auth::Bearer).await
    }

    /// Replace a service.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Validation` for an invalid form, or the backend's
    /// error.
    #[instrument(skip(self, input), fields(service_id = %id))]
    pub async fn update_service(
        &self,
        id: &ServiceId,
        input: &ServiceInput,
    ) -> Result<Service, ApiError> {
        input.validate()?;
        self.put(&format!("api/admin/services/{}", segment(id.as_str())?), input, Auth::Bearer)
            .await
    }

    /// Delete a service.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::NotFound` for an unknown ID.
    #[instrument(skip(self), fields(service_id = %id))]
    pub async fn delete_service(&self, id: &ServiceId) -> Result<(), ApiError> {
        self.delete(&format!("api/admin/services/{}", segment(id.as_str())?), Auth::Bearer)
            .await
    }

    // =========================================================================
    // Contact Messages
    // =========================================================================

    /// Contact inbox, newest first.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the request fails.
    #[instrument(skip(self))]
    pub async fn list_messages(&self, page: PageQuery) -> Result<Page<ContactMessage>, ApiError> {
        self.get_with_query("api/admin/messages", &Paged::page(page), Auth::Bearer)
            .await
    }

    /// Mark a message as read.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::NotFound` for an unknown ID.
    #[instrument(skip(self), fields(message_id = %id))]
    pub async fn mark_message_read(
        &self,
        id: &ContactMessageId,
    ) -> Result<ContactMessage, ApiError> {
        self.patch(
            &format!("api/admin/messages/{}", segment(id.as_str())?),
            &ReadUpdate { read: true },
            Auth::Bearer,
        )
        .await
    }

    /// Delete a message.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::NotFound` for an unknown ID.
    #[instrument(skip(self), fields(message_id = %id))]
    pub async fn delete_message(&self, id: &ContactMessageId) -> Result<(), ApiError> {
        self.delete(&format!("api/admin/messages/{}", segment(id.as_str())?), Auth::Bearer)
            .await
    }
}
