use axum::{
    extract::{Request, State},
    http::{header::AUTHORIZATION, HeaderMap},
    middleware::Next,
    response::Response,
};
use serde::Serialize;

use crate::app::AppState;
use crate::auth::{validate_jwt, AuthError};
use crate::database::UserRepository;
use crate::error::ApiError;
use super::context::RequestContext;

/// The logged-in user behind a request
#[derive(Clone, Debug, Serialize)]
pub struct AuthUser {
    pub id: i64,
    pub username: String,
}

/// Attaches the logged-in user to any request that carries a usable bearer
/// token. Requests without one, or with a stale or invalid one, continue
/// anonymously; rejecting them is the login gate's job.
pub async fn load_logged_in_user(
    State(state): State<AppState>,
    ctx: RequestContext,
    headers: HeaderMap,
    mut request: Request,
    next: Next,
) -> Response {
    if headers.contains_key(AUTHORIZATION) {
        match resolve_user(&state, &ctx, &headers).await {
            Ok(user) => {
                request.extensions_mut().insert(user);
            }
            Err(e) => tracing::debug!("Continuing anonymously: {}", e),
        }
    }

    next.run(request).await
}

/// Login gate: rejects the request with 401 unless it carries a valid bearer
/// token for a user that still exists, then exposes that user to the handler.
pub async fn login_required(
    State(state): State<AppState>,
    ctx: RequestContext,
    headers: HeaderMap,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    // Already resolved by load_logged_in_user
    if ctx.user.is_none() {
        let user = resolve_user(&state, &ctx, &headers).await?;
        request.extensions_mut().insert(user);
    }

    Ok(next.run(request).await)
}

/// Bearer token -> claims -> user row that still exists.
async fn resolve_user(
    state: &AppState,
    ctx: &RequestContext,
    headers: &HeaderMap,
) -> Result<AuthUser, ApiError> {
    let token = extract_jwt_from_headers(headers)?;
    let claims = validate_jwt(&token, &state.config.security.secret_key)?;

    // The guard on the connection must be gone before the handler acquires it
    let user = {
        let mut conn = ctx.db.acquire().await?;
        UserRepository::new(&mut conn).find(claims.user_id).await?
    };

    let user = user.ok_or_else(|| {
        tracing::warn!("Rejected token for missing user {} ({})", claims.username, claims.user_id);
        AuthError::UnknownUser
    })?;

    Ok(AuthUser {
        id: user.id,
        username: user.username,
    })
}

fn extract_jwt_from_headers(headers: &HeaderMap) -> Result<String, AuthError> {
    let auth_header = headers
        .get(AUTHORIZATION)
        .ok_or(AuthError::MissingToken)?;

    let auth_str = auth_header.to_str().map_err(|_| AuthError::MalformedHeader)?;

    match auth_str.strip_prefix("Bearer ") {
        Some(token) if !token.trim().is_empty() => Ok(token.trim().to_string()),
        Some(_) => Err(AuthError::MissingToken),
        None => Err(AuthError::MalformedHeader),
    }
}
