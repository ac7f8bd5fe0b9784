use chrono::{DateTime, Utc};
use crypto_core::Country;
use serde::{Deserialize, Serialize};
use sqlx::{types::Json, FromRow};
use uuid::Uuid;

/// A single dish on a restaurant's menu, embedded in the restaurant row as
/// JSONB.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuItem {
    pub id: Uuid,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub price: f64,
}

/// Restaurant record. The country is set at creation and has no update path.
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Restaurant {
    pub id: Uuid,
    pub name: String,
    pub country: Country,
    pub menu_items: Json<Vec<MenuItem>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Unvalidated menu item as submitted by the client.
#[derive(Debug, Clone, Deserialize)]
pub struct MenuItemInput {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
}

/// Restaurant creation request
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateRestaurantRequest {
    pub name: Option<String>,
    pub country: Option<Country>,
    pub menu_items: Option<Vec<MenuItemInput>>,
}
