use chrono::{DateTime, Utc};
use crypto_core::Country;
use serde::{Deserialize, Serialize};
use sqlx::{types::Json, FromRow};
use std::fmt;
use uuid::Uuid;

/// Order status state machine.
///
/// `Pending` and `Confirmed` are live states; `Cancelled` and `Completed`
/// are terminal. Checkout moves a live order to `Completed`; cancel moves
/// any non-`Completed` order to `Cancelled`, treating a repeat cancel as an
/// idempotent success.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "order_status")]
pub enum OrderStatus {
    Pending,
    Confirmed,
    Cancelled,
    Completed,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "Pending",
            OrderStatus::Confirmed => "Confirmed",
            OrderStatus::Cancelled => "Cancelled",
            OrderStatus::Completed => "Completed",
        }
    }

    /// No transition leaves these states.
    pub fn is_terminal(&self) -> bool {
        matches!(self, OrderStatus::Cancelled | OrderStatus::Completed)
    }

    /// Checkout is legal exactly from the live states.
    pub fn can_checkout(&self) -> bool {
        matches!(self, OrderStatus::Pending | OrderStatus::Confirmed)
    }

    /// Cancel is legal from everything except `Completed`; re-cancelling an
    /// already cancelled order is a no-op success.
    pub fn can_cancel(&self) -> bool {
        !matches!(self, OrderStatus::Completed)
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A line item snapshot inside an order. Prices are frozen at creation;
/// later menu changes never touch existing orders.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderItem {
    pub name: String,
    pub price: f64,
    pub quantity: i32,
}

/// Order record
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: Uuid,
    pub user_id: Uuid,
    pub items: Json<Vec<OrderItem>>,
    pub total_amount: f64,
    pub status: OrderStatus,
    pub country: Country,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Unvalidated order item as submitted by the client. Numbers arrive as
/// loose JSON values and are checked field by field so the first bad field
/// produces a specific message.
#[derive(Debug, Clone, Deserialize)]
pub struct OrderItemInput {
    pub name: Option<String>,
    pub price: Option<f64>,
    pub quantity: Option<f64>,
}

/// Order creation request. The total is never accepted from the caller.
#[derive(Debug, Deserialize)]
pub struct CreateOrderRequest {
    pub items: Option<Vec<OrderItemInput>>,
}

/// Total for an order: Σ(price × quantity) over its items.
pub fn order_total(items: &[OrderItem]) -> f64 {
    items
        .iter()
        .map(|item| item.price * f64::from(item.quantity))
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_checkout_legal_exactly_from_live_states() {
        assert!(OrderStatus::Pending.can_checkout());
        assert!(OrderStatus::Confirmed.can_checkout());
        assert!(!OrderStatus::Cancelled.can_checkout());
        assert!(!OrderStatus::Completed.can_checkout());
    }

    #[test]
    fn test_cancel_legal_from_everything_but_completed() {
        assert!(OrderStatus::Pending.can_cancel());
        assert!(OrderStatus::Confirmed.can_cancel());
        assert!(OrderStatus::Cancelled.can_cancel());
        assert!(!OrderStatus::Completed.can_cancel());
    }

    #[test]
    fn test_terminal_states() {
        assert!(!OrderStatus::Pending.is_terminal());
        assert!(!OrderStatus::Confirmed.is_terminal());
        assert!(OrderStatus::Cancelled.is_terminal());
        assert!(OrderStatus::Completed.is_terminal());
    }

    #[test]
    fn test_order_total_sums_price_times_quantity() {
        let items = vec![
            OrderItem {
                name: "Masala Dosa".into(),
                price: 120.0,
                quantity: 2,
            },
            OrderItem {
                name: "Filter Coffee".into(),
                price: 40.5,
                quantity: 3,
            },
        ];

        assert_eq!(order_total(&items), 120.0 * 2.0 + 40.5 * 3.0);
    }

    #[test]
    fn test_order_total_of_empty_items_is_zero() {
        assert_eq!(order_total(&[]), 0.0);
    }
}
