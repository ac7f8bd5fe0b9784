use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpResponse, HttpServer};
use actix_middleware::{JwtAuthMiddleware, RoleGuard};
use crypto_core::TokenService;
use db_pool::{create_pool, DbConfig};
use ordering_service::{handlers, Config};
use sqlx::PgPool;
use std::io;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

async fn index() -> HttpResponse {
    HttpResponse::Ok().body("Food Ordering API is running...")
}

async fn health(pool: web::Data<PgPool>) -> HttpResponse {
    match sqlx::query("SELECT 1").fetch_one(pool.get_ref()).await {
        Ok(_) => HttpResponse::Ok().json(serde_json::json!({
            "status": "ok",
            "service": "ordering-service",
            "version": env!("CARGO_PKG_VERSION"),
        })),
        Err(e) => HttpResponse::ServiceUnavailable().json(serde_json::json!({
            "status": "unhealthy",
            "error": format!("PostgreSQL connection failed: {}", e),
            "service": "ordering-service",
        })),
    }
}

#[actix_web::main]
async fn main() -> io::Result<()> {
    if cfg!(debug_assertions) {
        dotenvy::dotenv().ok();
    }

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,actix_web=debug,sqlx=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = match Config::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            tracing::error!("Configuration loading failed: {}", e);
            eprintln!("ERROR: Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    tracing::info!("Starting ordering-service v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!("Environment: {}", config.app.env);

    // Initialize database connection pool
    let mut db_cfg = DbConfig::from_env("ordering-service").unwrap_or_default();
    if db_cfg.database_url.is_empty() {
        db_cfg.database_url = config.database.url.clone();
    }
    if db_cfg.max_connections < config.database.max_connections {
        db_cfg.max_connections = config.database.max_connections;
    }

    db_cfg.log_config();
    let db_pool = match create_pool(db_cfg).await {
        Ok(pool) => pool,
        Err(e) => {
            tracing::error!("Database pool creation failed: {}", e);
            eprintln!("ERROR: Failed to create database pool: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = sqlx::migrate!("./migrations").run(&db_pool).await {
        tracing::error!("Database migration failed: {}", e);
        return Err(io::Error::new(
            io::ErrorKind::Other,
            format!("migration failed: {e}"),
        ));
    }

    tracing::info!("Connected to database, migrations applied");

    // Token service carries the signing secret as explicit state shared with
    // the auth middleware and the auth handlers.
    let tokens = TokenService::from_secret(&config.jwt.secret, config.jwt.lifetime_secs);

    let bind_address = format!("{}:{}", config.app.host, config.app.port);
    tracing::info!("Starting HTTP server at {}", bind_address);

    HttpServer::new(move || {
        // Build CORS configuration
        let mut cors = Cors::default();
        for origin in config.cors.allowed_origins.split(',') {
            let origin = origin.trim();
            if origin == "*" {
                cors = cors.allow_any_origin();
            } else {
                cors = cors.allowed_origin(origin);
            }
        }
        cors = cors.allow_any_method().allow_any_header().max_age(3600);

        App::new()
            .app_data(web::Data::new(db_pool.clone()))
            .app_data(web::Data::new(tokens.clone()))
            .wrap(cors)
            .wrap(Logger::default())
            .wrap(tracing_actix_web::TracingLogger::default())
            .route("/", web::get().to(index))
            .route("/api/health", web::get().to(health))
            .service(
                web::scope("/api/auth")
                    .route("/register", web::post().to(handlers::register))
                    .route("/login", web::post().to(handlers::login)),
            )
            .service(
                web::scope("/api/restaurants")
                    .wrap(JwtAuthMiddleware::new(tokens.clone()))
                    .service(
                        web::resource("")
                            .route(web::get().to(handlers::list_restaurants))
                            .route(web::post().to(handlers::create_restaurant)),
                    ),
            )
            .service(
                web::scope("/api/orders")
                    .wrap(JwtAuthMiddleware::new(tokens.clone()))
                    .service(
                        web::resource("")
                            .route(web::get().to(handlers::list_orders))
                            .route(web::post().to(handlers::create_order)),
                    )
                    .service(
                        web::resource("/{order_id}/checkout")
                            .wrap(RoleGuard::admin_or_manager())
                            .route(web::post().to(handlers::checkout_order)),
                    )
                    .service(
                        web::resource("/{order_id}/cancel")
                            .wrap(RoleGuard::admin_or_manager())
                            .route(web::post().to(handlers::cancel_order)),
                    ),
            )
            .service(
                web::scope("/api/payments")
                    .wrap(RoleGuard::admin_only())
                    .wrap(JwtAuthMiddleware::new(tokens.clone()))
                    .service(
                        web::resource("")
                            .route(web::get().to(handlers::list_payment_methods))
                            .route(web::post().to(handlers::create_payment_method)),
                    ),
            )
    })
    .bind(&bind_address)?
    .run()
    .await
}
