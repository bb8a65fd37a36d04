use std::sync::Arc;

use actix_web::{web, App, HttpServer};
use yahtzee_backend::config::db::db_url;
use yahtzee_backend::config::server::ServerConfig;
use yahtzee_backend::infra::db::connect_db;
use yahtzee_backend::routes;
use yahtzee_backend::services::{
    DbStatisticsSink, GameEngine, LogStatisticsSink, SessionFactory, StatisticsSink,
};
use yahtzee_backend::{AppState, SecurityConfig, StructuredLogger};

mod telemetry;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    telemetry::init_tracing();

    // Environment variables must be set by the runtime environment
    // (docker-compose env_file, or `set -a; . ./.env; set +a` locally).
    let config = match ServerConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ {}", e.detail());
            std::process::exit(1);
        }
    };

    let statistics: Arc<dyn StatisticsSink> = match db_url() {
        Ok(Some(url)) => match connect_db(&url).await {
            Ok(db) => {
                println!("✅ Database connected");
                Arc::new(DbStatisticsSink::new(db))
            }
            Err(e) => {
                eprintln!("❌ Failed to connect to database: {e}");
                std::process::exit(1);
            }
        },
        Ok(None) => {
            tracing::warn!("no database configured; game statistics will only be logged");
            Arc::new(LogStatisticsSink)
        }
        Err(e) => {
            eprintln!("❌ {}", e.detail());
            std::process::exit(1);
        }
    };

    let factory = match config.dice_seed {
        Some(seed) => SessionFactory::seeded(seed),
        None => SessionFactory::new(),
    };
    let engine = Arc::new(GameEngine::new(factory, statistics));
    let data = web::Data::new(AppState::new(
        engine,
        SecurityConfig::new(config.jwt_secret.as_bytes()),
    ));

    println!(
        "🚀 Starting Yahtzee Backend on http://{}:{}",
        config.host, config.port
    );

    HttpServer::new(move || {
        App::new()
            .wrap(StructuredLogger)
            .app_data(data.clone())
            .configure(routes::configure)
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}
