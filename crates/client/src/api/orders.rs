//! Checkout and the customer's order history.

use shopfront_core::{OrderId, Page, PageQuery};
use tracing::instrument;

use super::Paged;
use crate::cart::CartStore;
use crate::error::ApiError;
use crate::http::{ApiClient, Auth, segment};
use crate::models::{CheckoutRequest, Order, ShippingAddress};
use crate::validation::Validate;

impl ApiClient {
    /// Place an order for the cart's contents.
    ///
    /// The cart is emptied once the backend accepts the order. Prices are
    /// worked out by the backend; only product IDs and quantities are sent.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Validation` for an incomplete address,
    /// `ApiError::EmptyCart` if there is nothing to order, or the backend's
    /// error (for example insufficient stock).
    #[instrument(skip(self, cart, shipping_address, payment_method))]
    pub async fn checkout(
        &self,
        cart: &CartStore,
        shipping_address: ShippingAddress,
        payment_method: impl Into<String>,
    ) -> Result<Order, ApiError> {
        shipping_address.validate()?;

        let snapshot = cart.snapshot().await;
        if snapshot.is_empty() {
            return Err(ApiError::EmptyCart);
        }

        let request = CheckoutRequest::from_cart(&snapshot, shipping_address, payment_method);
        let order: Order = self.post("api/orders", &request, Auth::Bearer).await?;
        tracing::info!(order_id = %order.id, total = %order.total, "Order placed");

        if let Err(e) = cart.clear().await {
            tracing::warn!(error = %e, "Order placed but cart could not be cleared");
        }
        Ok(order)
    }

    /// The signed-in customer's orders, newest first.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the request fails.
    #[instrument(skip(self))]
    pub async fn list_my_orders(&self, page: PageQuery) -> Result<Page<Order>, ApiError> {
        self.get_with_query("api/orders", &Paged::page(page), Auth::Bearer)
            .await
    }

    /// One of the signed-in customer's orders.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::NotFound` for an unknown ID.
    #[instrument(skip(self), fields(order_id = %id))]
    pub async fn get_order(&self, id: &OrderId) -> Result<Order, ApiError> {
        self.get(&format!("api/orders/{}", segment(id.as_str())?), Auth::Bearer).await
    }
}
