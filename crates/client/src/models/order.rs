//! Order and checkout types.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use shopfront_core::{OrderId, OrderStatus, PaymentStatus, ProductId, SubOrderId, UserId};

use crate::cart::Cart;

/// Shipping destination captured at checkout.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShippingAddress {
    pub full_name: String,
    pub address_line1: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address_line2: Option<String>,
    pub city: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    pub postal_code: String,
    pub country: String,
    pub phone: String,
}

/// A line of a placed order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    #[serde(alias = "product")]
    pub product_id: ProductId,
    pub name: String,
    pub price: Decimal,
    pub quantity: u32,
    #[serde(default)]
    pub image: Option<String>,
}

impl OrderItem {
    /// `price × quantity`.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.price * Decimal::from(self.quantity)
    }
}

/// Backend-side grouping of an order's lines (e.g., per fulfilment source).
///
/// Read-only on the client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubOrder {
    #[serde(alias = "_id")]
    pub id: SubOrderId,
    #[serde(default)]
    pub items: Vec<OrderItem>,
    #[serde(default)]
    pub status: OrderStatus,
    #[serde(default)]
    pub subtotal: Option<Decimal>,
}

/// A placed order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    #[serde(alias = "_id")]
    pub id: OrderId,
    #[serde(default)]
    pub order_number: Option<String>,
    #[serde(default)]
    pub user: Option<UserId>,
    #[serde(default)]
    pub items: Vec<OrderItem>,
    #[serde(default)]
    pub sub_orders: Vec<SubOrder>,
    #[serde(default)]
    pub shipping_address: Option<ShippingAddress>,
    #[serde(default)]
    pub shipping_cost: Decimal,
    pub total: Decimal,
    #[serde(default)]
    pub status: OrderStatus,
    #[serde(default)]
    pub payment_status: PaymentStatus,
    #[serde(default)]
    pub payment_method: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Order {
    /// Label for lists: the order number when present, otherwise the ID.
    #[must_use]
    pub fn display_number(&self) -> &str {
        self.order_number.as_deref().unwrap_or_else(|| self.id.as_str())
    }

    /// Sum of the line totals, excluding shipping.
    #[must_use]
    pub fn subtotal(&self) -> Decimal {
        self.items.iter().map(OrderItem::line_total).sum()
    }

    /// Number of units across all lines.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.items.iter().map(|item| item.quantity).sum()
    }
}

/// A cart line as sent to checkout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutItem {
    pub product_id: ProductId,
    pub quantity: u32,
}

/// Body for `POST /api/orders`.
///
/// Only product IDs and quantities are sent; the backend prices the order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutRequest {
    pub items: Vec<CheckoutItem>,
    pub shipping_address: ShippingAddress,
    pub payment_method: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl CheckoutRequest {
    /// Build a checkout request from the cart's current lines.
    #[must_use]
    pub fn from_cart(
        cart: &Cart,
        shipping_address: ShippingAddress,
        payment_method: impl Into<String>,
    ) -> Self {
        Self {
            items: cart
                .items()
                .iter()
                .map(|item| CheckoutItem {
                    product_id: item.product_id.clone(),
                    quantity: item.quantity,
                })
                .collect(),
            shipping_address,
            payment_method: payment_method.into(),
            notes: None,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_order_with_sub_orders() {
        let json = r#"{
            "_id": "o1",
            "orderNumber": "SF-1001",
            "items": [
                {"product": "p1", "name": "Shirt", "price": 40, "quantity": 2},
                {"productId": "p2", "name": "Mug", "price": 12.5, "quantity": 1}
            ],
            "subOrders": [
                {"_id": "s1", "items": [{"productId": "p1", "name": "Shirt", "price": 40, "quantity": 2}], "status": "shipped"}
            ],
            "shippingCost": 5,
            "total": 97.5,
            "status": "processing",
            "paymentStatus": "paid"
        }"#;

        let order: Order = serde_json::from_str(json).unwrap();
        assert_eq!(order.display_number(), "SF-1001");
        assert_eq!(order.item_count(), 3);
        assert_eq!(order.subtotal(), Decimal::new(925, 1));
        assert_eq!(order.sub_orders.len(), 1);
        assert_eq!(order.sub_orders[0].status, OrderStatus::Shipped);
        assert_eq!(order.payment_status, PaymentStatus::Paid);
    }

    #[test]
    fn test_display_number_falls_back_to_id() {
        let order: Order = serde_json::from_str(r#"{"id":"o2","total":0}"#).unwrap();
        assert_eq!(order.display_number(), "o2");
        assert_eq!(order.status, OrderStatus::Pending);
    }

    #[test]
    fn test_shipping_address_skips_empty_optionals() {
        let address = ShippingAddress {
            full_name: "Ada Lovelace".to_string(),
            city: "London".to_string(),
            ..ShippingAddress::default()
        };
        let json = serde_json::to_value(&address).unwrap();
        assert_eq!(json["fullName"], "Ada Lovelace");
        assert!(json.get("addressLine2").is_none());
    }
}
