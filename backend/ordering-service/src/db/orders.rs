/// Order database operations
///
/// Status transitions are compare-and-swap updates gated on the legal source
/// states, so two racing transitions cannot both commit from the same state.
use crate::models::{Order, OrderItem};
use crypto_core::Country;
use error_types::Result;
use sqlx::{types::Json, PgPool};
use uuid::Uuid;

const ORDER_COLUMNS: &str = "id, user_id, items, total_amount, status, country, created_at, updated_at";

/// Insert a new order in `Pending` status with a server-computed total.
pub async fn create_order(
    pool: &PgPool,
    user_id: Uuid,
    country: Country,
    items: &[OrderItem],
    total_amount: f64,
) -> Result<Order> {
    let order = sqlx::query_as::<_, Order>(&format!(
        r#"
        INSERT INTO orders (user_id, items, total_amount, status, country)
        VALUES ($1, $2, $3, 'Pending', $4)
        RETURNING {ORDER_COLUMNS}
        "#
    ))
    .bind(user_id)
    .bind(Json(items))
    .bind(total_amount)
    .bind(country)
    .fetch_one(pool)
    .await?;

    Ok(order)
}

/// Find an order by ID
pub async fn find_by_id(pool: &PgPool, order_id: Uuid) -> Result<Option<Order>> {
    let order = sqlx::query_as::<_, Order>(&format!(
        "SELECT {ORDER_COLUMNS} FROM orders WHERE id = $1"
    ))
    .bind(order_id)
    .fetch_optional(pool)
    .await?;

    Ok(order)
}

/// List orders, optionally restricted to an owner and/or a country.
pub async fn list_orders(
    pool: &PgPool,
    owner: Option<Uuid>,
    country: Option<Country>,
) -> Result<Vec<Order>> {
    let orders = sqlx::query_as::<_, Order>(&format!(
        r#"
        SELECT {ORDER_COLUMNS}
        FROM orders
        WHERE ($1::uuid IS NULL OR user_id = $1)
          AND ($2::country IS NULL OR country = $2)
        ORDER BY created_at DESC
        "#
    ))
    .bind(owner)
    .bind(country)
    .fetch_all(pool)
    .await?;

    Ok(orders)
}

/// Move an order to `Completed` iff it is currently live.
///
/// Returns `None` when the order does not exist or its current status does
/// not admit checkout; the caller re-reads to tell those cases apart.
pub async fn complete_order(pool: &PgPool, order_id: Uuid) -> Result<Option<Order>> {
    let order = sqlx::query_as::<_, Order>(&format!(
        r#"
        UPDATE orders
        SET status = 'Completed', updated_at = NOW()
        WHERE id = $1 AND status IN ('Pending', 'Confirmed')
        RETURNING {ORDER_COLUMNS}
        "#
    ))
    .bind(order_id)
    .fetch_optional(pool)
    .await?;

    Ok(order)
}

/// Move an order to `Cancelled` iff it is not already completed.
///
/// Cancelling an already-cancelled order matches the predicate and rewrites
/// the same status, which is the intended idempotent success.
pub async fn cancel_order(pool: &PgPool, order_id: Uuid) -> Result<Option<Order>> {
    let order = sqlx::query_as::<_, Order>(&format!(
        r#"
        UPDATE orders
        SET status = 'Cancelled', updated_at = NOW()
        WHERE id = $1 AND status <> 'Completed'
        RETURNING {ORDER_COLUMNS}
        "#
    ))
    .bind(order_id)
    .fetch_optional(pool)
    .await?;

    Ok(order)
}
