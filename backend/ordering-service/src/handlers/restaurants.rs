/// Restaurant handlers - browsing and creation
use actix_middleware::{country_scope, require_role, Principal};
use actix_web::{web, HttpResponse};
use crypto_core::Role;
use error_types::{Result, ServiceError};
use sqlx::PgPool;

use crate::db;
use crate::models::CreateRestaurantRequest;
use crate::validators;

/// List restaurants visible to the principal. Members only see their own
/// country; Admin and Manager see all of them.
pub async fn list_restaurants(pool: web::Data<PgPool>, principal: Principal) -> Result<HttpResponse> {
    let filter = country_scope::read_filter(&principal);
    let restaurants = db::restaurants::list_restaurants(&pool, filter).await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "count": restaurants.len(),
        "data": restaurants,
    })))
}

/// Create a restaurant.
///
/// Requires Admin or Manager; the country check is enforced again on top of
/// the role gate even though a privileged principal always passes it.
pub async fn create_restaurant(
    pool: web::Data<PgPool>,
    principal: Principal,
    req: web::Json<CreateRestaurantRequest>,
) -> Result<HttpResponse> {
    require_role(&principal, &[Role::Admin, Role::Manager])?;

    let req = req.into_inner();

    let name = req
        .name
        .as_deref()
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .map(str::to_string);

    let (name, country) = match (name, req.country) {
        (Some(name), Some(country)) => (name, country),
        _ => {
            return Err(ServiceError::InvalidInput(
                "Restaurant name and country are required.".to_string(),
            ))
        }
    };

    country_scope::enforce_write_country(&principal, country)?;

    let menu_items = validators::validate_menu_items(&req.menu_items.unwrap_or_default())?;

    let restaurant = db::restaurants::create_restaurant(&pool, &name, country, &menu_items).await?;

    tracing::info!(restaurant_id = %restaurant.id, %country, "restaurant created");

    Ok(HttpResponse::Created().json(serde_json::json!({
        "message": "Restaurant created successfully.",
        "data": restaurant,
    })))
}
