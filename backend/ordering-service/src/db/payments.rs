/// Payment method database operations
use crate::models::{PaymentMethod, PaymentMethodType};
use error_types::Result;
use sqlx::PgPool;

/// Insert a new stored payment method.
pub async fn create_payment_method(
    pool: &PgPool,
    label: &str,
    method_type: PaymentMethodType,
    token: &str,
) -> Result<PaymentMethod> {
    let method = sqlx::query_as::<_, PaymentMethod>(
        r#"
        INSERT INTO payment_methods (label, method_type, token)
        VALUES ($1, $2, $3)
        RETURNING id, label, method_type, token, created_at, updated_at
        "#,
    )
    .bind(label)
    .bind(method_type)
    .bind(token)
    .fetch_one(pool)
    .await?;

    Ok(method)
}

/// List every stored payment method. Callers gate access; this query does
/// not.
pub async fn list_payment_methods(pool: &PgPool) -> Result<Vec<PaymentMethod>> {
    let methods = sqlx::query_as::<_, PaymentMethod>(
        r#"
        SELECT id, label, method_type, token, created_at, updated_at
        FROM payment_methods
        ORDER BY created_at DESC
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(methods)
}
