/// Authentication handlers - registration and login
use actix_web::{web, HttpResponse};
use crypto_core::TokenService;
use error_types::{Result, ServiceError};
use sqlx::PgPool;
use validator::Validate;

use crate::db;
use crate::models::{Country, LoginRequest, RegisterRequest, Role, UserResponse};
use crate::security;
use crate::validators;

/// Register a new user and hand back a session token.
///
/// Role defaults to Member and country to India when omitted.
pub async fn register(
    pool: web::Data<PgPool>,
    tokens: web::Data<TokenService>,
    req: web::Json<RegisterRequest>,
) -> Result<HttpResponse> {
    let req = req.into_inner();

    req.validate().map_err(|e| {
        ServiceError::InvalidInput(validators::first_validation_message(
            &e,
            &["name", "email", "password"],
        ))
    })?;

    if db::users::find_by_email(&pool, &req.email).await?.is_some() {
        return Err(ServiceError::InvalidInput(
            "User already exists with this email.".to_string(),
        ));
    }

    let password_hash = security::hash_password(&req.password)?;
    let role = req.role.unwrap_or(Role::Member);
    let country = req.country.unwrap_or(Country::India);

    let user =
        db::users::create_user(&pool, &req.name, &req.email, &password_hash, role, country).await?;

    let token = tokens.issue(user.id, user.role, user.country)?;

    tracing::info!(user_id = %user.id, %role, %country, "user registered");

    Ok(HttpResponse::Created().json(serde_json::json!({
        "user": UserResponse::from(&user),
        "token": token,
    })))
}

/// Log an existing user in.
///
/// Unknown email and wrong password produce the same response so the
/// endpoint cannot be used to probe which emails exist.
pub async fn login(
    pool: web::Data<PgPool>,
    tokens: web::Data<TokenService>,
    req: web::Json<LoginRequest>,
) -> Result<HttpResponse> {
    let req = req.into_inner();

    if req.email.is_empty() || req.password.is_empty() {
        return Err(ServiceError::InvalidInput(
            "Please provide email and password.".to_string(),
        ));
    }

    let user = db::users::find_by_email(&pool, &req.email)
        .await?
        .ok_or(ServiceError::InvalidCredentials)?;

    if !security::verify_password(&req.password, &user.password_hash)? {
        return Err(ServiceError::InvalidCredentials);
    }

    let token = tokens.issue(user.id, user.role, user.country)?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "user": UserResponse::from(&user),
        "token": token,
    })))
}
