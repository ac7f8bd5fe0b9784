/// Data models for the ordering service
///
/// - `user`: identity records and the auth request/response DTOs
/// - `restaurant`: restaurants and their embedded menus
/// - `order`: orders, order items, and the status state machine
/// - `payment`: stored payment methods (admin-only surface)
pub mod order;
pub mod payment;
pub mod restaurant;
pub mod user;

pub use order::{CreateOrderRequest, Order, OrderItem, OrderItemInput, OrderStatus};
pub use payment::{CreatePaymentMethodRequest, PaymentMethod, PaymentMethodType};
pub use restaurant::{CreateRestaurantRequest, MenuItem, MenuItemInput, Restaurant};
pub use user::{Country, LoginRequest, RegisterRequest, Role, User, UserResponse};
