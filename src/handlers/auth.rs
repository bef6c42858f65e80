//! Registration, login, and security-question password recovery.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::auth::{self, password, Claims};
use crate::database::models::usuario::{UsuarioAuthRow, UsuarioResponse};
use crate::error::ApiError;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct UsuarioCadastro {
    pub username: String,
    pub nome: String,
    pub senha: String,
    pub pergunta_seguranca: String,
    pub resposta_seguranca: String,
}

#[derive(Debug, Deserialize)]
pub struct UsuarioLogin {
    pub username: String,
    pub senha: String,
}

#[derive(Debug, Deserialize)]
pub struct RecuperacaoSenha {
    pub username: String,
    pub resposta_seguranca: String,
    pub nova_senha: String,
}

#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
    pub usuario: UsuarioResponse,
}

/// Normalize and validate a username: lowercase, alphanumerics plus `_`/`-`.
fn validate_username(username: &str) -> Result<String, ApiError> {
    let username = username.trim().to_lowercase();
    if username.is_empty() {
        return Err(ApiError::bad_request("Username não pode ser vazio."));
    }
    if !username
        .chars()
        .all(|c| c.is_alphanumeric() || c == '_' || c == '-')
    {
        return Err(ApiError::bad_request(
            "Username pode conter apenas letras, números, _ e -",
        ));
    }
    Ok(username)
}

fn validate_senha(senha: &str) -> Result<(), ApiError> {
    if senha.len() < 6 {
        return Err(ApiError::bad_request(
            "A senha deve ter pelo menos 6 caracteres.",
        ));
    }
    Ok(())
}

fn issue_token(
    state: &AppState,
    usuario_id: i64,
    username: String,
    nome: String,
    data_criacao: chrono::DateTime<Utc>,
) -> Result<TokenResponse, ApiError> {
    let claims = Claims::new(
        usuario_id,
        username.clone(),
        state.config.security.jwt_expiry_minutes,
    );
    let token = auth::generate_jwt(&claims, &state.config.security.jwt_secret)?;

    Ok(TokenResponse {
        access_token: token,
        token_type: "bearer".to_string(),
        usuario: UsuarioResponse {
            id: usuario_id,
            username,
            nome,
            data_criacao,
        },
    })
}

/// POST /auth/cadastro
pub async fn cadastro(
    State(state): State<AppState>,
    Json(payload): Json<UsuarioCadastro>,
) -> Result<(StatusCode, Json<TokenResponse>), ApiError> {
    let username = validate_username(&payload.username)?;
    validate_senha(&payload.senha)?;

    let existing: Option<i64> = sqlx::query_scalar("SELECT id FROM usuarios WHERE username = ?")
        .bind(&username)
        .fetch_optional(&state.pool)
        .await?;
    if existing.is_some() {
        return Err(ApiError::bad_request("Username já cadastrado."));
    }

    let cost = state.config.security.bcrypt_cost;
    let senha_hash = password::hash_password(&payload.senha, cost)?;
    let resposta_hash = password::hash_password(
        &password::normalize_security_answer(&payload.resposta_seguranca),
        cost,
    )?;

    let agora = Utc::now();
    let result = sqlx::query(
        "INSERT INTO usuarios (username, nome, senha_hash, pergunta_seguranca, resposta_seguranca_hash, data_criacao)
         VALUES (?, ?, ?, ?, ?, ?)",
    )
    .bind(&username)
    .bind(&payload.nome)
    .bind(&senha_hash)
    .bind(&payload.pergunta_seguranca)
    .bind(&resposta_hash)
    .bind(agora)
    .execute(&state.pool)
    .await?;
    let usuario_id = result.last_insert_rowid();

    tracing::info!("registered usuario {} ({})", usuario_id, username);

    let response = issue_token(&state, usuario_id, username, payload.nome, agora)?;
    Ok((StatusCode::CREATED, Json(response)))
}

/// POST /auth/login
///
/// Unknown username and wrong password return the same message, so a caller
/// cannot enumerate accounts.
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<UsuarioLogin>,
) -> Result<Json<TokenResponse>, ApiError> {
    const CREDENCIAIS_INVALIDAS: &str = "Username ou senha incorretos";

    let username = payload.username.trim().to_lowercase();
    let usuario: UsuarioAuthRow = sqlx::query_as(
        "SELECT id, username, nome, senha_hash, resposta_seguranca_hash
         FROM usuarios WHERE username = ?",
    )
    .bind(&username)
    .fetch_optional(&state.pool)
    .await?
    .ok_or_else(|| ApiError::unauthorized(CREDENCIAIS_INVALIDAS))?;

    if !password::verify_password(&payload.senha, &usuario.senha_hash)? {
        return Err(ApiError::unauthorized(CREDENCIAIS_INVALIDAS));
    }

    let response = issue_token(&state, usuario.id, usuario.username, usuario.nome, Utc::now())?;
    Ok(Json(response))
}

/// POST /auth/recuperar-senha
pub async fn recuperar_senha(
    State(state): State<AppState>,
    Json(payload): Json<RecuperacaoSenha>,
) -> Result<Json<serde_json::Value>, ApiError> {
    validate_senha(&payload.nova_senha)?;

    let username = payload.username.trim().to_lowercase();
    let usuario: UsuarioAuthRow = sqlx::query_as(
        "SELECT id, username, nome, senha_hash, resposta_seguranca_hash
         FROM usuarios WHERE username = ?",
    )
    .bind(&username)
    .fetch_optional(&state.pool)
    .await?
    .ok_or_else(|| ApiError::not_found("Usuário não encontrado"))?;

    let resposta = password::normalize_security_answer(&payload.resposta_seguranca);
    if !password::verify_password(&resposta, &usuario.resposta_seguranca_hash)? {
        return Err(ApiError::unauthorized("Resposta de segurança incorreta"));
    }

    let nova_senha_hash = password::hash_password(&payload.nova_senha, state.config.security.bcrypt_cost)?;
    sqlx::query("UPDATE usuarios SET senha_hash = ? WHERE id = ?")
        .bind(&nova_senha_hash)
        .bind(usuario.id)
        .execute(&state.pool)
        .await?;

    tracing::info!("password reset for usuario {}", usuario.id);

    Ok(Json(serde_json::json!({
        "detail": "Senha atualizada com sucesso."
    })))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn username_is_case_normalized() {
        assert_eq!(validate_username("Maria_Silva").unwrap(), "maria_silva");
    }

    #[test]
    fn username_allows_underscore_and_hyphen() {
        assert!(validate_username("joao-p_2").is_ok());
    }

    #[test]
    fn username_rejects_other_punctuation() {
        assert!(validate_username("joao@psi").is_err());
        assert!(validate_username("a b").is_err());
        assert!(validate_username("").is_err());
    }

    #[test]
    fn senha_requires_six_chars() {
        assert!(validate_senha("12345").is_err());
        assert!(validate_senha("123456").is_ok());
    }
}
