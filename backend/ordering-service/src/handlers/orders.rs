/// Order handlers - creation, listing, and lifecycle transitions
use actix_middleware::Principal;
use actix_web::{web, HttpResponse};
use error_types::{Result, ServiceError};
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::CreateOrderRequest;
use crate::services::OrderService;
use crate::validators;

/// Create an order for the authenticated user. Owner and country come from
/// the token, the total from the validated items; neither is accepted from
/// the request body.
pub async fn create_order(
    pool: web::Data<PgPool>,
    principal: Principal,
    req: web::Json<CreateOrderRequest>,
) -> Result<HttpResponse> {
    let items = req.into_inner().items.unwrap_or_default();

    if items.is_empty() {
        return Err(ServiceError::InvalidInput(
            "Order must contain at least one item.".to_string(),
        ));
    }

    let items = validators::validate_order_items(&items)?;

    let service = OrderService::new((**pool).clone());
    let order = service.create(&principal, items).await?;

    tracing::info!(order_id = %order.id, user_id = %principal.user_id, "order created");

    Ok(HttpResponse::Created().json(serde_json::json!({
        "message": "Order created successfully.",
        "data": order,
    })))
}

/// List orders visible to the principal.
pub async fn list_orders(pool: web::Data<PgPool>, principal: Principal) -> Result<HttpResponse> {
    let service = OrderService::new((**pool).clone());
    let orders = service.list_for(&principal).await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "count": orders.len(),
        "data": orders,
    })))
}

/// Checkout an order (Admin/Manager only, guarded in the route table).
pub async fn checkout_order(
    pool: web::Data<PgPool>,
    order_id: web::Path<Uuid>,
) -> Result<HttpResponse> {
    let service = OrderService::new((**pool).clone());
    let order = service.checkout(*order_id).await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "message": "Payment Successful. Order status updated to Completed.",
        "data": order,
    })))
}

/// Cancel an order (Admin/Manager only, guarded in the route table).
pub async fn cancel_order(
    pool: web::Data<PgPool>,
    order_id: web::Path<Uuid>,
) -> Result<HttpResponse> {
    let service = OrderService::new((**pool).clone());
    let order = service.cancel(*order_id).await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "message": "Order successfully cancelled.",
        "data": order,
    })))
}
