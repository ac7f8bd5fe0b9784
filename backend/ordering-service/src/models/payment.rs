use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Kind of stored payment method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "payment_method_type")]
pub enum PaymentMethodType {
    #[serde(rename = "Credit Card")]
    #[sqlx(rename = "Credit Card")]
    CreditCard,
    #[serde(rename = "Debit Card")]
    #[sqlx(rename = "Debit Card")]
    DebitCard,
    #[serde(rename = "Digital Wallet")]
    #[sqlx(rename = "Digital Wallet")]
    DigitalWallet,
}

impl Default for PaymentMethodType {
    fn default() -> Self {
        PaymentMethodType::CreditCard
    }
}

/// Stored payment method. The token is an opaque reference to the upstream
/// processor; raw card data never enters this system.
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct PaymentMethod {
    pub id: Uuid,
    pub label: String,
    #[serde(rename = "type")]
    pub method_type: PaymentMethodType,
    pub token: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Payment method creation request
#[derive(Debug, Deserialize)]
pub struct CreatePaymentMethodRequest {
    pub label: Option<String>,
    #[serde(rename = "type")]
    pub method_type: Option<PaymentMethodType>,
    pub token: Option<String>,
}
