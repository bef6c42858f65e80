use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json};
use serde_json::{json, Value};

use crate::AppState;

pub mod atendimentos;
pub mod auth;
pub mod clientes;

pub async fn root() -> Json<Value> {
    let version = env!("CARGO_PKG_VERSION");

    Json(json!({
        "name": "Atende API",
        "version": version,
        "description": "Gestão de clientes e atendimentos com autenticação",
        "endpoints": {
            "auth": "/auth/cadastro, /auth/login, /auth/recuperar-senha (public)",
            "clientes": "/clientes/ (protected)",
            "aniversariantes": "/clientes/aniversariantes-proximos-30-dias/ (protected)",
            "atendimentos": "/clientes/:id/atendimentos/, /clientes/:id/sessoes/ (protected)"
        }
    }))
}

pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let now = chrono::Utc::now();

    match sqlx::query("SELECT 1").execute(&state.pool).await {
        Ok(_) => (
            StatusCode::OK,
            Json(json!({
                "status": "ok",
                "timestamp": now,
                "database": "ok"
            })),
        ),
        Err(e) => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({
                "status": "degraded",
                "timestamp": now,
                "database_error": e.to_string()
            })),
        ),
    }
}
