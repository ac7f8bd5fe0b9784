/// Ordering Service Library
///
/// Multi-tenant food-ordering API: users scoped to a country register and
/// log in, browse restaurants, place orders, and admins manage stored
/// payment methods.
///
/// # Modules
///
/// - `handlers`: HTTP request handlers
/// - `models`: Data structures for users, restaurants, orders, payments
/// - `services`: Business logic layer (order lifecycle)
/// - `db`: Database access layer and repositories
/// - `security`: Password hashing
/// - `validators`: Input validation helpers
/// - `config`: Configuration management
pub mod config;
pub mod db;
pub mod handlers;
pub mod models;
pub mod security;
pub mod services;
pub mod validators;

pub use config::Config;
pub use error_types::{Result, ServiceError};
