//! Client CRUD, year-scoped code assignment, and the birthday listing.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::{Extension, Json};
use chrono::{Datelike, NaiveDate, Utc};
use serde::Deserialize;

use crate::database::models::cliente::{ClienteRow, ClienteResponse};
use crate::error::ApiError;
use crate::middleware::auth::AuthUser;
use crate::services::{birthdays, client_code};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct ClientePayload {
    pub nome_completo: String,
    pub email: Option<String>,
    pub telefone: String,
    pub data_nascimento: NaiveDate,
    pub endereco: Option<String>,
}

impl ClientePayload {
    fn validate(&self, hoje: NaiveDate) -> Result<(), ApiError> {
        if self.nome_completo.trim().is_empty() {
            return Err(ApiError::bad_request("Nome completo é obrigatório."));
        }
        if self.data_nascimento > hoje {
            return Err(ApiError::bad_request(
                "A data de nascimento não pode ser no futuro.",
            ));
        }
        Ok(())
    }
}

/// GET /clientes/
pub async fn listar(
    State(state): State<AppState>,
    Extension(usuario): Extension<AuthUser>,
) -> Result<Json<Vec<ClienteResponse>>, ApiError> {
    let rows: Vec<ClienteRow> = sqlx::query_as(
        "SELECT * FROM clientes WHERE usuario_id = ? AND status = 'ativo' ORDER BY nome_completo",
    )
    .bind(usuario.usuario_id)
    .fetch_all(&state.pool)
    .await?;

    Ok(Json(rows.into_iter().map(ClienteResponse::from).collect()))
}

/// GET /clientes/aniversariantes-proximos-30-dias/
pub async fn aniversariantes(
    State(state): State<AppState>,
    Extension(usuario): Extension<AuthUser>,
) -> Result<Json<Vec<ClienteResponse>>, ApiError> {
    let hoje = Utc::now().date_naive();

    let rows: Vec<ClienteRow> = sqlx::query_as(
        "SELECT * FROM clientes
         WHERE usuario_id = ? AND status = 'ativo'
         ORDER BY strftime('%m-%d', data_nascimento)",
    )
    .bind(usuario.usuario_id)
    .fetch_all(&state.pool)
    .await?;

    let mut lista = Vec::new();
    for row in rows {
        match birthdays::next_birthday(row.data_nascimento, hoje) {
            Some(proximo)
                if birthdays::in_upcoming_window(proximo, hoje, birthdays::UPCOMING_WINDOW_DAYS) =>
            {
                lista.push(ClienteResponse::from(row));
            }
            Some(_) => {}
            None => {
                tracing::warn!(
                    "cliente {}: data de nascimento {} sem projeção neste ano, ignorado",
                    row.id,
                    row.data_nascimento
                );
            }
        }
    }

    Ok(Json(lista))
}

/// POST /clientes/
pub async fn cadastrar(
    State(state): State<AppState>,
    Extension(usuario): Extension<AuthUser>,
    Json(payload): Json<ClientePayload>,
) -> Result<(StatusCode, Json<ClienteResponse>), ApiError> {
    let hoje = Utc::now().date_naive();
    payload.validate(hoje)?;

    // Count-then-insert runs inside one transaction so two concurrent creates
    // for the same user cannot mint the same code
    let mut tx = state.pool.begin().await?;

    let ano = hoje.year();
    let total: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM clientes WHERE usuario_id = ? AND codigo_cliente LIKE ?",
    )
    .bind(usuario.usuario_id)
    .bind(client_code::year_prefix_pattern(ano))
    .fetch_one(&mut *tx)
    .await?;
    let codigo = client_code::next_client_code(ano, total);

    let agora = Utc::now();
    let result = sqlx::query(
        "INSERT INTO clientes
         (usuario_id, codigo_cliente, nome_completo, email, telefone, data_nascimento, endereco, data_registro)
         VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(usuario.usuario_id)
    .bind(&codigo)
    .bind(&payload.nome_completo)
    .bind(&payload.email)
    .bind(&payload.telefone)
    .bind(payload.data_nascimento)
    .bind(&payload.endereco)
    .bind(agora)
    .execute(&mut *tx)
    .await
    .map_err(|e| {
        let email_em_uso = e
            .as_database_error()
            .is_some_and(|db| db.message().contains("email"));
        if email_em_uso {
            ApiError::bad_request(format!(
                "Email '{}' já cadastrado",
                payload.email.as_deref().unwrap_or_default()
            ))
        } else {
            ApiError::from(e)
        }
    })?;

    tx.commit().await?;

    let novo_id = result.last_insert_rowid();
    tracing::info!(
        "cliente {} ({}) criado para usuario {}",
        novo_id,
        codigo,
        usuario.usuario_id
    );

    Ok((
        StatusCode::CREATED,
        Json(ClienteResponse {
            id: novo_id,
            codigo_cliente: codigo,
            nome_completo: payload.nome_completo,
            email: payload.email,
            telefone: payload.telefone,
            data_nascimento: payload.data_nascimento,
            endereco: payload.endereco,
            status: "ativo".to_string(),
        }),
    ))
}

/// GET /clientes/:cliente_id/
pub async fn buscar(
    State(state): State<AppState>,
    Extension(usuario): Extension<AuthUser>,
    Path(cliente_id): Path<i64>,
) -> Result<Json<ClienteResponse>, ApiError> {
    let row: ClienteRow = sqlx::query_as("SELECT * FROM clientes WHERE id = ? AND usuario_id = ?")
        .bind(cliente_id)
        .bind(usuario.usuario_id)
        .fetch_optional(&state.pool)
        .await?
        .ok_or_else(|| ApiError::not_found("Cliente não encontrado"))?;

    Ok(Json(ClienteResponse::from(row)))
}
