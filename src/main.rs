use std::sync::Arc;

use atende_api::{app, config::AppConfig, database, AppState};

#[tokio::main]
async fn main() {
    // Load .env if present so cargo run picks up ATENDE_DATABASE_PATH,
    // ATENDE_JWT_SECRET, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt::init();

    let config = AppConfig::from_env();
    tracing::info!("Starting Atende API in {:?} mode", config.environment);

    let pool = database::connect(&config.database)
        .await
        .unwrap_or_else(|e| panic!("failed to open database {}: {}", config.database.path, e));

    database::init_schema(&pool)
        .await
        .expect("failed to initialize database schema");

    let bind_addr = format!("0.0.0.0:{}", config.server.port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .unwrap_or_else(|e| panic!("failed to bind {}: {}", bind_addr, e));

    tracing::info!("Atende API listening on http://{}", bind_addr);

    let state = AppState {
        pool,
        config: Arc::new(config),
    };

    axum::serve(listener, app(state)).await.expect("server");
}
