use std::fmt;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use uuid::Uuid;

use crate::error::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Pending,
    Shipped,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Shipped => "shipped",
            OrderStatus::Delivered => "delivered",
            OrderStatus::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for OrderStatus {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(OrderStatus::Pending),
            "shipped" => Ok(OrderStatus::Shipped),
            "delivered" => Ok(OrderStatus::Delivered),
            "cancelled" => Ok(OrderStatus::Cancelled),
            other => Err(AppError::Validation(format!(
                "Invalid order status: {}",
                other
            ))),
        }
    }
}

impl TryFrom<String> for OrderStatus {
    type Error = AppError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Product data frozen at purchase time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    pub product: Uuid,
    pub name: String,
    pub price: Decimal,
    pub quantity: i32,
    pub image: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShippingAddress {
    pub full_name: String,
    pub street_address: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub country: String,
    pub phone_number: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentResult {
    pub id: String,
    pub status: String,
}

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: Uuid,
    /// `None` once the customer account has been deleted.
    pub user_id: Option<Uuid>,
    pub clerk_id: String,
    pub order_items: Json<Vec<OrderItem>>,
    pub shipping_address: Json<ShippingAddress>,
    pub payment_result: Option<Json<PaymentResult>>,
    pub total_price: Decimal,
    #[sqlx(try_from = "String")]
    pub order_status: OrderStatus,
    pub shipped_at: Option<DateTime<Utc>>,
    pub delivered_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Order {
    /// Moves the order to `status`. Timestamps are only stamped on the first
    /// entry into shipped/delivered. Any transition is accepted.
    pub fn apply_status(&mut self, status: OrderStatus, now: DateTime<Utc>) {
        self.order_status = status;

        match status {
            OrderStatus::Shipped if self.shipped_at.is_none() => self.shipped_at = Some(now),
            OrderStatus::Delivered if self.delivered_at.is_none() => {
                self.delivered_at = Some(now)
            }
            _ => {}
        }

        self.updated_at = now;
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateOrderStatusRequest {
    pub status: Option<String>,
}

impl UpdateOrderStatusRequest {
    pub fn validate(&self) -> Result<OrderStatus, AppError> {
        self.status
            .as_deref()
            .ok_or_else(|| AppError::Validation("status is required".to_string()))?
            .parse()
    }
}

#[derive(Debug, Serialize)]
pub struct OrderResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub order: Order,
}

#[derive(Debug, Serialize)]
pub struct OrderListResponse {
    pub orders: Vec<Order>,
}
