//! HTTP middleware for Forkline services.
//!
//! The request pipeline is an explicit chain composed per route in the
//! service's route table:
//!
//! 1. [`JwtAuthMiddleware`] validates the bearer token and stores a
//!    [`Principal`] in request extensions.
//! 2. [`RoleGuard`] rejects principals whose role is outside a route's
//!    allowed set.
//! 3. [`country_scope`] derives row-level country restrictions from the
//!    principal; handlers apply them explicitly.
//!
//! Handlers receive the authenticated identity by extracting [`Principal`]
//! as a function argument.

pub mod country_scope;
pub mod jwt_auth;
pub mod role_guard;

pub use country_scope::{enforce_write_country, read_filter};
pub use jwt_auth::{JwtAuthMiddleware, Principal};
pub use role_guard::{require_role, RoleGuard};
