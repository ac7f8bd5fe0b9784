/// Payment method handlers - Admin only
///
/// The whole `/api/payments` scope is wrapped with the Admin role guard in
/// the route table, so these handlers only run for Admin principals.
use actix_web::{web, HttpResponse};
use error_types::{Result, ServiceError};
use sqlx::PgPool;

use crate::db;
use crate::models::CreatePaymentMethodRequest;

/// List every stored payment method.
pub async fn list_payment_methods(pool: web::Data<PgPool>) -> Result<HttpResponse> {
    let methods = db::payments::list_payment_methods(&pool).await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "count": methods.len(),
        "data": methods,
    })))
}

/// Store a new payment method. Type defaults to Credit Card when omitted.
pub async fn create_payment_method(
    pool: web::Data<PgPool>,
    req: web::Json<CreatePaymentMethodRequest>,
) -> Result<HttpResponse> {
    let req = req.into_inner();

    let (label, token) = match (
        req.label.as_deref().map(str::trim).filter(|l| !l.is_empty()),
        req.token.as_deref().map(str::trim).filter(|t| !t.is_empty()),
    ) {
        (Some(label), Some(token)) => (label.to_string(), token.to_string()),
        _ => {
            return Err(ServiceError::InvalidInput(
                "Please provide a label and a dummy token for the payment method.".to_string(),
            ))
        }
    };

    let method_type = req.method_type.unwrap_or_default();

    let method = db::payments::create_payment_method(&pool, &label, method_type, &token).await?;

    Ok(HttpResponse::Created().json(serde_json::json!({
        "message": "Payment method added successfully.",
        "data": method,
    })))
}
