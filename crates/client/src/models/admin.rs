//! Back-office dashboard types.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::order::Order;

/// Summary figures for the admin dashboard (`GET /api/admin/stats`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    #[serde(default)]
    pub total_products: u64,
    #[serde(default)]
    pub total_orders: u64,
    #[serde(default)]
    pub total_users: u64,
    #[serde(default)]
    pub total_revenue: Decimal,
    #[serde(default)]
    pub pending_orders: u64,
    #[serde(default)]
    pub unread_messages: u64,
    #[serde(default)]
    pub recent_orders: Vec<Order>,
}
