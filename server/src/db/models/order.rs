//! Order and order item models

use serde::{Deserialize, Serialize};
use shared::{AppError, ErrorCode};
use std::fmt;
use std::str::FromStr;

/// Order lifecycle status
///
/// Transitions are free-form except for the cancellation guard: Shipped and
/// Delivered orders cannot be cancelled, and a Cancelled order cannot be
/// cancelled again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
pub enum OrderStatus {
    Pending,
    Processing,
    Shipped,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Processing => "Processing",
            Self::Shipped => "Shipped",
            Self::Delivered => "Delivered",
            Self::Cancelled => "Cancelled",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Pending" => Ok(Self::Pending),
            "Processing" => Ok(Self::Processing),
            "Shipped" => Ok(Self::Shipped),
            "Delivered" => Ok(Self::Delivered),
            "Cancelled" => Ok(Self::Cancelled),
            other => Err(AppError::with_message(
                ErrorCode::InvalidOrderStatus,
                format!("Unrecognized order status: {other}"),
            )),
        }
    }
}

/// Order row. `total_amount` is derived at placement time and immutable.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: i64,
    pub order_number: String,
    pub user_id: i64,
    pub total_amount: f64,
    pub status: OrderStatus,
    pub shipping_address: String,
    pub billing_address: String,
    pub is_active: bool,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Order item row with unit price and discount snapshotted at order time,
/// so later product price changes never alter historical orders.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    pub id: i64,
    pub order_id: i64,
    pub product_id: i64,
    pub quantity: i64,
    pub unit_price: f64,
    pub discount: i64,
    pub is_active: bool,
    pub created_at: i64,
    pub updated_at: i64,
}

/// One requested line in an order placement
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderLine {
    pub product_id: i64,
    pub quantity: i64,
}

/// Place order payload
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderCreate {
    pub shipping_address: String,
    /// Defaults to the shipping address when absent
    pub billing_address: Option<String>,
    pub order_items: Vec<OrderLine>,
}

/// Update order status payload
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderStatusUpdate {
    pub status: String,
}

/// Order item detail for API responses (product name joined in, line total
/// recomputed from the snapshots)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItemDetail {
    pub id: i64,
    pub product_id: i64,
    pub product_name: String,
    pub product_image_url: Option<String>,
    pub quantity: i64,
    pub unit_price: f64,
    pub discount: i64,
    pub total_price: f64,
}

/// Full order detail for API responses
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderDetail {
    pub id: i64,
    pub order_number: String,
    pub user_id: i64,
    pub user_name: String,
    pub total_amount: f64,
    pub status: OrderStatus,
    pub shipping_address: String,
    pub billing_address: String,
    pub created_at: i64,
    pub updated_at: i64,
    pub order_items: Vec<OrderItemDetail>,
}
