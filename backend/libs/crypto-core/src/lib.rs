//! Shared token primitives for Forkline services.
//!
//! Everything a service needs to mint and check session tokens lives here:
//! the closed [`Role`] and [`Country`] enumerations carried in token claims,
//! and the [`TokenService`] that signs and verifies them.

pub mod jwt;

pub use jwt::{Claims, Country, Role, TokenService};
