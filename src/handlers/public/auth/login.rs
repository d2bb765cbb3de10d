// handlers/public/auth/login.rs - GET/POST /auth/login handlers

use axum::{
    extract::State,
    response::{IntoResponse, Response},
};
use serde_json::json;

use crate::app::AppState;
use crate::auth::{generate_jwt, verify_password_blocking, Claims};
use crate::database::UserRepository;
use crate::error::ApiError;
use crate::middleware::{ApiResponse, Page, RequestContext, ValidForm};
use super::CredentialsForm;

pub const LOGIN_TEMPLATE: &str = "auth/login.html";

/// GET /auth/login
pub async fn login_form() -> Page {
    Page::render(LOGIN_TEMPLATE, json!({}))
}

/**
 * POST /auth/login - Check credentials and issue a session token
 *
 * Expected Output (Success):
 * ```json
 * {
 *   "success": true,
 *   "data": {
 *     "token": "eyJhbGciOiJIUzI1NiI...",
 *     "user": { "id": 1, "username": "test" },
 *     "expires_in": 604800
 *   }
 * }
 * ```
 *
 * Unknown users and wrong passwords re-render the login form with a flash.
 */
pub async fn login_submit(
    State(state): State<AppState>,
    ctx: RequestContext,
    ValidForm(form): ValidForm<CredentialsForm>,
) -> Result<Response, ApiError> {
    let user = {
        let mut conn = ctx.db.acquire().await?;
        UserRepository::new(&mut conn)
            .find_by_username(&form.username)
            .await?
    };

    let Some(user) = user else {
        return Ok(refuse("Incorrect username."));
    };
    if !verify_password_blocking(user.password.clone(), form.password).await {
        return Ok(refuse("Incorrect password."));
    }

    let hours = state.config.security.session_hours;
    let claims = Claims::new(user.id, user.username.clone(), hours);
    let token = generate_jwt(&claims, &state.config.security.secret_key)?;

    tracing::info!("User {} logged in", user.username);
    Ok(ApiResponse::success(json!({
        "token": token,
        "user": { "id": user.id, "username": user.username },
        "expires_in": hours.saturating_mul(3600),
    }))
    .into_response())
}

fn refuse(message: &str) -> Response {
    Page::render(LOGIN_TEMPLATE, json!({}))
        .with_flash(message)
        .into_response()
}
