use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod password;

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub usuario_id: i64,
    pub username: String,
    pub exp: i64,
    pub iat: i64,
}

impl Claims {
    pub fn new(usuario_id: i64, username: String, expiry_minutes: i64) -> Self {
        let now = Utc::now();
        let exp = (now + Duration::minutes(expiry_minutes)).timestamp();

        Self {
            usuario_id,
            username,
            exp,
            iat: now.timestamp(),
        }
    }
}

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Token não fornecido.")]
    MissingToken,

    #[error("Token expirado.")]
    TokenExpired,

    #[error("Token inválido.")]
    TokenInvalid,

    #[error("JWT generation error: {0}")]
    TokenGeneration(String),
}

pub fn generate_jwt(claims: &Claims, secret: &str) -> Result<String, AuthError> {
    if secret.is_empty() {
        return Err(AuthError::TokenGeneration("empty JWT secret".to_string()));
    }

    let encoding_key = EncodingKey::from_secret(secret.as_bytes());
    let header = Header::default();

    encode(&header, claims, &encoding_key).map_err(|e| AuthError::TokenGeneration(e.to_string()))
}

/// Validate signature and expiry, distinguishing an expired token from a
/// malformed or tampered one.
pub fn verify_jwt(token: &str, secret: &str) -> Result<Claims, AuthError> {
    let decoding_key = DecodingKey::from_secret(secret.as_bytes());
    let validation = Validation::default();

    match decode::<Claims>(token, &decoding_key, &validation) {
        Ok(data) => Ok(data.claims),
        Err(e) => match e.kind() {
            jsonwebtoken::errors::ErrorKind::ExpiredSignature => Err(AuthError::TokenExpired),
            _ => Err(AuthError::TokenInvalid),
        },
    }
}
