use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

pub use crypto_core::{Country, Role};

/// User record - core identity entity. Never serialized to clients directly;
/// responses go through [`UserResponse`] so the hash cannot leak.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub role: Role,
    pub country: Country,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Public projection of a user for auth responses.
#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub name: String,
    pub email: String,
    pub role: Role,
    pub country: Country,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            name: user.name.clone(),
            email: user.email.clone(),
            role: user.role,
            country: user.country,
        }
    }
}

/// Registration request. Missing string fields deserialize to empty and are
/// caught by validation, so the response carries a field message instead of a
/// deserializer error.
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[serde(default)]
    #[validate(length(min = 1, message = "Please provide name, email, and password."))]
    pub name: String,
    #[serde(default)]
    #[validate(custom(function = "crate::validators::validate_email_shape"))]
    pub email: String,
    #[serde(default)]
    #[validate(length(min = 6, message = "Password must be at least 6 characters."))]
    pub password: String,
    pub role: Option<Role>,
    pub country: Option<Country>,
}

/// Login request
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}
