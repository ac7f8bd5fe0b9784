/// Order service - creation, listing, and lifecycle transitions
///
/// Transitions are a single compare-and-swap against the order row. A CAS
/// miss is disambiguated by a follow-up read: the order is either gone (404)
/// or sitting in a status that does not admit the transition (400, message
/// naming the current status).
use actix_middleware::{country_scope, Principal};
use crypto_core::Role;
use error_types::{Result, ServiceError};
use sqlx::PgPool;
use uuid::Uuid;

use crate::db;
use crate::models::order::order_total;
use crate::models::{Order, OrderItem};

pub struct OrderService {
    pool: PgPool,
}

impl OrderService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create an order owned by the principal.
    ///
    /// Country and owner are forced from the token claims; the caller cannot
    /// supply either, so the country scoping policy never runs on this path.
    /// The total is a snapshot computed here and never recomputed.
    pub async fn create(&self, principal: &Principal, items: Vec<OrderItem>) -> Result<Order> {
        let total_amount = order_total(&items);

        db::orders::create_order(
            &self.pool,
            principal.user_id,
            principal.country,
            &items,
            total_amount,
        )
        .await
    }

    /// List orders visible to the principal.
    ///
    /// Members see their own orders inside their country; Admin and Manager
    /// see everything everywhere.
    pub async fn list_for(&self, principal: &Principal) -> Result<Vec<Order>> {
        let (owner, country) = list_filters(principal);
        db::orders::list_orders(&self.pool, owner, country).await
    }

    /// Checkout: `Pending`/`Confirmed` → `Completed`.
    pub async fn checkout(&self, order_id: Uuid) -> Result<Order> {
        if let Some(order) = db::orders::complete_order(&self.pool, order_id).await? {
            return Ok(order);
        }

        match db::orders::find_by_id(&self.pool, order_id).await? {
            None => Err(ServiceError::NotFound("Order not found.".to_string())),
            Some(order) => Err(ServiceError::InvalidTransition(format!(
                "Order cannot be checked out in status: {}",
                order.status
            ))),
        }
    }

    /// Cancel: any non-`Completed` status → `Cancelled`; repeat cancels
    /// succeed.
    pub async fn cancel(&self, order_id: Uuid) -> Result<Order> {
        if let Some(order) = db::orders::cancel_order(&self.pool, order_id).await? {
            return Ok(order);
        }

        match db::orders::find_by_id(&self.pool, order_id).await? {
            None => Err(ServiceError::NotFound("Order not found.".to_string())),
            Some(_) => Err(ServiceError::InvalidTransition(
                "Cannot cancel an order that has already been completed.".to_string(),
            )),
        }
    }
}

/// Owner and country restrictions applied to an order listing.
fn list_filters(principal: &Principal) -> (Option<Uuid>, Option<crypto_core::Country>) {
    match principal.role {
        Role::Member => (
            Some(principal.user_id),
            country_scope::read_filter(principal),
        ),
        Role::Admin | Role::Manager => (None, None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crypto_core::Country;

    fn principal(role: Role, country: Country) -> Principal {
        Principal {
            user_id: Uuid::new_v4(),
            role,
            country,
        }
    }

    #[test]
    fn test_member_listing_is_scoped_to_owner_and_country() {
        let p = principal(Role::Member, Country::India);
        let (owner, country) = list_filters(&p);
        assert_eq!(owner, Some(p.user_id));
        assert_eq!(country, Some(Country::India));
    }

    #[test]
    fn test_privileged_listing_is_unrestricted() {
        for role in [Role::Admin, Role::Manager] {
            let (owner, country) = list_filters(&principal(role, Country::America));
            assert_eq!(owner, None);
            assert_eq!(country, None);
        }
    }
}
