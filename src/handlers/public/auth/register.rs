// handlers/public/auth/register.rs - GET/POST /auth/register handlers

use axum::extract::State;
use serde_json::json;

use crate::app::AppState;
use crate::auth::hash_password_blocking;
use crate::database::UserRepository;
use crate::error::ApiError;
use crate::middleware::{Page, RequestContext, ValidForm};
use super::CredentialsForm;

pub const REGISTER_TEMPLATE: &str = "auth/register.html";

/// GET /auth/register
pub async fn register_form() -> Page {
    Page::render(REGISTER_TEMPLATE, json!({}))
}

/// POST /auth/register - Create the account and send the user to log in.
/// Duplicate usernames re-render the form.
pub async fn register_submit(
    State(state): State<AppState>,
    ctx: RequestContext,
    ValidForm(form): ValidForm<CredentialsForm>,
) -> Result<Page, ApiError> {
    if let Err(message) = form.validate() {
        return Ok(Page::render(REGISTER_TEMPLATE, json!({})).with_flash(message));
    }

    let password =
        hash_password_blocking(form.password.clone(), state.config.security.password_cost).await?;

    let mut conn = ctx.db.acquire().await?;
    match UserRepository::new(&mut conn)
        .insert(&form.username, &password)
        .await
    {
        Ok(user_id) => {
            tracing::info!("Registered user {} ({})", form.username, user_id);
            Ok(Page::redirect("/auth/login"))
        }
        Err(e) if e.is_unique_violation() => Ok(Page::render(REGISTER_TEMPLATE, json!({}))
            .with_flash(format!("User {} is already registered.", form.username))),
        Err(e) => Err(e.into()),
    }
}
