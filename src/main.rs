#[macro_use]
extern crate log;
extern crate pretty_env_logger;

use actix_web::middleware::Logger;
use actix_web::{App, HttpServer};
use dotenvy::dotenv;
use tableside::api;
use tableside::auth::password::hash_password;
use tableside::auth::{AuthLayer, SessionConfig};
use tableside::config::{AppConfig, PricingConfig};
use tableside::db::{self, seed};
use tableside::AppState;
use utoipa::OpenApi;
use utoipa_actix_web::AppExt;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = dotenv() {
        eprintln!("Failed to load .env file: {}", e);
    }

    // Setup logging
    if std::env::var("RUST_LOG").is_err() {
        std::env::set_var("RUST_LOG", "info");
    }
    pretty_env_logger::init();

    let app_cfg = AppConfig::from_env();
    let session_cfg = SessionConfig::from_env();
    let pricing = PricingConfig::from_env();

    // Database Connection
    info!("Initializing database connection pool...");
    let pool = db::establish_connection_pool(&app_cfg.database_url)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e.to_string()))?;
    db::run_db_migrations(pool.clone())
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e.to_string()))?;

    match hash_password(&app_cfg.admin_password) {
        Ok(hash) => {
            if let Err(e) = seed::ensure_admin(&pool, &app_cfg.admin_email, &hash) {
                error!("Failed to seed admin account: {}", e);
            }
        }
        Err(e) => error!("Failed to hash admin password: {}", e),
    }
    if let Err(e) = seed::seed_sample_foods(&pool) {
        error!("Failed to seed sample foods: {}", e);
    }

    let state = AppState::new(pool, session_cfg, pricing);

    info!("Starting server at http://{}:{}", app_cfg.host, app_cfg.port);

    HttpServer::new(move || {
        let state = state.clone();
        App::new()
            .into_utoipa_app()
            .openapi(api::ApiDoc::openapi())
            .configure(|cfg| api::configure(cfg, &state))
            .openapi_service(api::openapi_resource)
            .into_app()
            .app_data(api::json_config())
            .wrap(AuthLayer::new(state.session.clone(), state.user_ops.clone()))
            .wrap(Logger::default())
    })
    .bind((app_cfg.host.as_str(), app_cfg.port))?
    .run()
    .await
}
