use axum::{
    extract::{Request, State},
    http::HeaderMap,
    middleware::Next,
    response::Response,
};

use crate::auth::{self, AuthError, Claims};
use crate::error::ApiError;
use crate::AppState;

/// Authenticated user context extracted from the bearer token
#[derive(Clone, Debug)]
pub struct AuthUser {
    pub usuario_id: i64,
    pub username: String,
}

impl From<Claims> for AuthUser {
    fn from(claims: Claims) -> Self {
        Self {
            usuario_id: claims.usuario_id,
            username: claims.username,
        }
    }
}

/// JWT authentication middleware that validates tokens and injects the user
/// context into the request extensions.
pub async fn jwt_auth_middleware(
    State(state): State<AppState>,
    headers: HeaderMap,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = extract_bearer_token(&headers)?;
    let claims = auth::verify_jwt(&token, &state.config.security.jwt_secret)?;

    request.extensions_mut().insert(AuthUser::from(claims));

    Ok(next.run(request).await)
}

/// Extract the token from an `Authorization: Bearer <token>` header
fn extract_bearer_token(headers: &HeaderMap) -> Result<String, AuthError> {
    let auth_header = headers
        .get("authorization")
        .ok_or(AuthError::MissingToken)?;

    let auth_str = auth_header.to_str().map_err(|_| AuthError::MissingToken)?;

    match auth_str.strip_prefix("Bearer ") {
        Some(token) if !token.trim().is_empty() => Ok(token.to_string()),
        _ => Err(AuthError::MissingToken),
    }
}
