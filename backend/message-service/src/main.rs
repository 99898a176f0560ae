use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpResponse, HttpServer};
use message_service::handlers;
use message_service::services::{MessageService, SentimentClassifier};
use sqlx::SqlitePool;
use std::io;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

struct HealthState {
    db_pool: SqlitePool,
}

impl HealthState {
    async fn check_database(&self) -> Result<(), sqlx::Error> {
        sqlx::query("SELECT 1")
            .fetch_one(&self.db_pool)
            .await
            .map(|_| ())
    }
}

async fn health_summary(state: web::Data<HealthState>) -> HttpResponse {
    match state.check_database().await {
        Ok(_) => HttpResponse::Ok().json(serde_json::json!({
            "status": "ok",
            "service": "message-service",
            "version": env!("CARGO_PKG_VERSION")
        })),
        Err(e) => HttpResponse::ServiceUnavailable().json(serde_json::json!({
            "status": "unhealthy",
            "error": format!("database connection failed: {}", e),
            "service": "message-service"
        })),
    }
}

async fn liveness_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({"alive": true}))
}

#[actix_web::main]
async fn main() -> io::Result<()> {
    // Support container healthchecks via CLI subcommand: `healthcheck`
    {
        let mut args = std::env::args();
        let _bin = args.next();
        if let Some(cmd) = args.next() {
            if cmd == "healthcheck" {
                let port = std::env::var("MESSAGE_SERVICE_PORT")
                    .unwrap_or_else(|_| "8080".to_string());
                let url = format!("http://127.0.0.1:{}/api/v1/health", port);
                match reqwest::Client::new().get(&url).send().await {
                    Ok(resp) if resp.status().is_success() => return Ok(()),
                    Ok(resp) => {
                        eprintln!("healthcheck HTTP status: {}", resp.status());
                        return Err(io::Error::other("healthcheck failed"));
                    }
                    Err(e) => {
                        eprintln!("healthcheck HTTP error: {}", e);
                        return Err(io::Error::other("healthcheck error"));
                    }
                }
            }
        }
    }

    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,actix_web=debug,sqlx=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = match message_service::Config::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            tracing::error!("Configuration loading failed: {:#}", e);
            eprintln!("ERROR: Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    tracing::info!("Starting message-service v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!("Environment: {}", config.app.env);
    match &config.sentiment.endpoint_url {
        Some(url) => tracing::info!(endpoint = %url, "sentiment classifier in remote mode"),
        None => tracing::info!("sentiment classifier in fallback-only mode (AI_URL not set)"),
    }

    // Initialize database connection pool and apply migrations
    let db_pool = match message_service::db::create_pool(&config.database).await {
        Ok(pool) => pool,
        Err(e) => {
            tracing::error!("Database pool creation failed: {:#}", e);
            eprintln!("ERROR: Failed to create database pool: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = message_service::db::run_migrations(&db_pool).await {
        tracing::error!("Migration failed: {:#}", e);
        return Err(io::Error::other(format!("migration failed: {e}")));
    }

    tracing::info!("Connected to database, schema up to date");

    let classifier = Arc::new(SentimentClassifier::new(config.sentiment.clone()));
    let message_service = Arc::new(MessageService::new(db_pool.clone(), classifier));

    let service_data = web::Data::new(message_service);
    let health_state = web::Data::new(HealthState {
        db_pool: db_pool.clone(),
    });

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

        let openapi_doc = message_service::openapi::ApiDoc::openapi();

        App::new()
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}")
                    .url("/api/v1/openapi.json", openapi_doc.clone()),
            )
            .app_data(service_data.clone())
            .app_data(health_state.clone())
            .wrap(cors)
            .wrap(Logger::default())
            .wrap(tracing_actix_web::TracingLogger::default())
            .route(
                "/metrics",
                web::get().to(message_service::metrics::serve_metrics),
            )
            // Health check endpoints
            .route("/api/v1/health", web::get().to(health_summary))
            .route("/api/v1/health/live", web::get().to(liveness_check))
            .service(
                web::scope("/api/v1").service(
                    web::resource("/messages")
                        .route(web::post().to(handlers::create_message))
                        .route(web::get().to(handlers::list_messages)),
                ),
            )
    })
    .bind(&bind_address)?
    .run()
    .await?;

    tracing::info!("Message-service shutting down");
    Ok(())
}
