/// HTTP handlers for the ordering API
///
/// - `auth`: registration and login (public)
/// - `restaurants`: browse and create restaurants
/// - `orders`: create, list, and transition orders
/// - `payments`: admin-only stored payment methods
pub mod auth;
pub mod orders;
pub mod payments;
pub mod restaurants;

pub use auth::{login, register};
pub use orders::{cancel_order, checkout_order, create_order, list_orders};
pub use payments::{create_payment_method, list_payment_methods};
pub use restaurants::{create_restaurant, list_restaurants};
