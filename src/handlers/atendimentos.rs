//! Service records for a client. Served under both the `atendimentos` and
//! `sessoes` route namespaces; append-only.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::{Extension, Json};
use chrono::{NaiveDate, Utc};
use serde::Deserialize;
use sqlx::SqlitePool;

use crate::database::models::atendimento::{AtendimentoRow, AtendimentoResponse};
use crate::error::ApiError;
use crate::middleware::auth::AuthUser;
use crate::AppState;

const CONTEUDO_MIN: usize = 5;
const CONTEUDO_MAX: usize = 5000;
const DURACAO_MIN: i64 = 15;
const DURACAO_MAX: i64 = 480;

#[derive(Debug, Deserialize)]
pub struct AtendimentoPayload {
    pub data_atendimento: NaiveDate,
    pub conteudo: String,
    pub duracao_minutos: i64,
}

impl AtendimentoPayload {
    fn validate(&self) -> Result<(), ApiError> {
        let len = self.conteudo.chars().count();
        if len < CONTEUDO_MIN || len > CONTEUDO_MAX {
            return Err(ApiError::bad_request(
                "O conteúdo deve ter entre 5 e 5000 caracteres.",
            ));
        }
        if self.duracao_minutos < DURACAO_MIN || self.duracao_minutos > DURACAO_MAX {
            return Err(ApiError::bad_request(
                "A duração deve estar entre 15 e 480 minutos.",
            ));
        }
        Ok(())
    }
}

/// Cross-user access is rejected here before any read or write touches the
/// atendimentos table.
async fn ensure_cliente_do_usuario(
    pool: &SqlitePool,
    cliente_id: i64,
    usuario_id: i64,
) -> Result<(), ApiError> {
    let existing: Option<i64> =
        sqlx::query_scalar("SELECT id FROM clientes WHERE id = ? AND usuario_id = ?")
            .bind(cliente_id)
            .bind(usuario_id)
            .fetch_optional(pool)
            .await?;

    match existing {
        Some(_) => Ok(()),
        None => Err(ApiError::not_found("Cliente não encontrado")),
    }
}

/// GET /clientes/:cliente_id/atendimentos/ (and the sessoes alias)
pub async fn listar(
    State(state): State<AppState>,
    Extension(usuario): Extension<AuthUser>,
    Path(cliente_id): Path<i64>,
) -> Result<Json<Vec<AtendimentoResponse>>, ApiError> {
    ensure_cliente_do_usuario(&state.pool, cliente_id, usuario.usuario_id).await?;

    let rows: Vec<AtendimentoRow> = sqlx::query_as(
        "SELECT * FROM atendimentos WHERE cliente_id = ? AND usuario_id = ?
         ORDER BY data_atendimento DESC",
    )
    .bind(cliente_id)
    .bind(usuario.usuario_id)
    .fetch_all(&state.pool)
    .await?;

    Ok(Json(
        rows.into_iter().map(AtendimentoResponse::from).collect(),
    ))
}

/// POST /clientes/:cliente_id/atendimentos/ (and the sessoes alias)
pub async fn criar(
    State(state): State<AppState>,
    Extension(usuario): Extension<AuthUser>,
    Path(cliente_id): Path<i64>,
    Json(payload): Json<AtendimentoPayload>,
) -> Result<(StatusCode, Json<AtendimentoResponse>), ApiError> {
    payload.validate()?;
    ensure_cliente_do_usuario(&state.pool, cliente_id, usuario.usuario_id).await?;

    let agora = Utc::now();
    let result = sqlx::query(
        "INSERT INTO atendimentos
         (usuario_id, cliente_id, data_atendimento, conteudo, duracao_minutos, data_registro)
         VALUES (?, ?, ?, ?, ?, ?)",
    )
    .bind(usuario.usuario_id)
    .bind(cliente_id)
    .bind(payload.data_atendimento)
    .bind(&payload.conteudo)
    .bind(payload.duracao_minutos)
    .bind(agora)
    .execute(&state.pool)
    .await?;

    let novo_id = result.last_insert_rowid();
    tracing::info!(
        "atendimento {} criado para cliente {} de usuario {}",
        novo_id,
        cliente_id,
        usuario.usuario_id
    );

    Ok((
        StatusCode::CREATED,
        Json(AtendimentoResponse {
            id: novo_id,
            cliente_id,
            data_atendimento: payload.data_atendimento,
            conteudo: payload.conteudo,
            duracao_minutos: payload.duracao_minutos,
            data_registro: agora,
        }),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload(conteudo: &str, duracao: i64) -> AtendimentoPayload {
        AtendimentoPayload {
            data_atendimento: NaiveDate::from_ymd_opt(2026, 8, 27).unwrap(),
            conteudo: conteudo.to_string(),
            duracao_minutos: duracao,
        }
    }

    #[test]
    fn conteudo_length_bounds() {
        assert!(payload("abcd", 60).validate().is_err());
        assert!(payload("abcde", 60).validate().is_ok());
        assert!(payload(&"a".repeat(5000), 60).validate().is_ok());
        assert!(payload(&"a".repeat(5001), 60).validate().is_err());
    }

    #[test]
    fn duracao_bounds() {
        assert!(payload("sessão inicial", 14).validate().is_err());
        assert!(payload("sessão inicial", 15).validate().is_ok());
        assert!(payload("sessão inicial", 480).validate().is_ok());
        assert!(payload("sessão inicial", 481).validate().is_err());
    }

    #[test]
    fn conteudo_counts_chars_not_bytes() {
        // 5 multibyte chars must pass the minimum
        assert!(payload("ããããã", 60).validate().is_ok());
    }
}
