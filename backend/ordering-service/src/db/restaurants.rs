/// Restaurant database operations
use crate::models::{MenuItem, Restaurant};
use crypto_core::Country;
use error_types::Result;
use sqlx::{types::Json, PgPool};

/// Insert a new restaurant with its validated menu.
pub async fn create_restaurant(
    pool: &PgPool,
    name: &str,
    country: Country,
    menu_items: &[MenuItem],
) -> Result<Restaurant> {
    let restaurant = sqlx::query_as::<_, Restaurant>(
        r#"
        INSERT INTO restaurants (name, country, menu_items)
        VALUES ($1, $2, $3)
        RETURNING id, name, country, menu_items, created_at, updated_at
        "#,
    )
    .bind(name)
    .bind(country)
    .bind(Json(menu_items))
    .fetch_one(pool)
    .await?;

    Ok(restaurant)
}

/// List restaurants, optionally restricted to one country.
pub async fn list_restaurants(pool: &PgPool, country: Option<Country>) -> Result<Vec<Restaurant>> {
    let restaurants = sqlx::query_as::<_, Restaurant>(
        r#"
        SELECT id, name, country, menu_items, created_at, updated_at
        FROM restaurants
        WHERE ($1::country IS NULL OR country = $1)
        ORDER BY created_at DESC
        "#,
    )
    .bind(country)
    .fetch_all(pool)
    .await?;

    Ok(restaurants)
}
