use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use sqlx::SqlitePool;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

pub mod auth;
pub mod config;
pub mod database;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod services;

/// Shared application state: the connection pool plus the configuration it
/// was built from, passed explicitly instead of living in module statics.
#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
    pub config: Arc<config::AppConfig>,
}

pub fn app(state: AppState) -> Router {
    Router::new()
        // Public
        .route("/", get(handlers::root))
        .route("/health", get(handlers::health))
        // Public auth routes
        .merge(auth_routes())
        // Protected API (bearer token required)
        .merge(cliente_routes(state.clone()))
        // Global middleware
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn auth_routes() -> Router<AppState> {
    use handlers::auth;

    Router::new()
        .route("/auth/cadastro", post(auth::cadastro))
        .route("/auth/login", post(auth::login))
        .route("/auth/recuperar-senha", post(auth::recuperar_senha))
}

fn cliente_routes(state: AppState) -> Router<AppState> {
    use handlers::{atendimentos, clientes};

    Router::new()
        .route("/clientes/", get(clientes::listar).post(clientes::cadastrar))
        .route(
            "/clientes/aniversariantes-proximos-30-dias/",
            get(clientes::aniversariantes),
        )
        .route("/clientes/:cliente_id/", get(clientes::buscar))
        // "atendimentos" and "sessoes" are two route namespaces over the same
        // table; both map onto the same handlers
        .route(
            "/clientes/:cliente_id/atendimentos/",
            get(atendimentos::listar).post(atendimentos::criar),
        )
        .route(
            "/clientes/:cliente_id/sessoes/",
            get(atendimentos::listar).post(atendimentos::criar),
        )
        .route_layer(axum::middleware::from_fn_with_state(
            state,
            middleware::auth::jwt_auth_middleware,
        ))
}
