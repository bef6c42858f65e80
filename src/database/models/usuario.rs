use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Credential columns loaded for login and password recovery.
#[derive(Debug, Clone, FromRow)]
pub struct UsuarioAuthRow {
    pub id: i64,
    pub username: String,
    pub nome: String,
    pub senha_hash: String,
    pub resposta_seguranca_hash: String,
}

/// User summary returned alongside issued tokens.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UsuarioResponse {
    pub id: i64,
    pub username: String,
    pub nome: String,
    pub data_criacao: DateTime<Utc>,
}
