// handlers/protected/blog/create.rs - GET/POST /create handlers

use serde_json::json;

use crate::database::PostRepository;
use crate::error::ApiError;
use crate::middleware::{Page, RequestContext, ValidForm};
use crate::services::PostForm;

pub const CREATE_TEMPLATE: &str = "blog/create.html";

/// GET /create - Empty post form
pub async fn create_form() -> Page {
    Page::render(CREATE_TEMPLATE, json!({}))
}

/// POST /create - Save a new post authored by the current user, or
/// re-render the form with the reason it was refused.
pub async fn create_submit(
    ctx: RequestContext,
    ValidForm(form): ValidForm<PostForm>,
) -> Result<Page, ApiError> {
    let user = ctx.current_user()?;

    if let Err(message) = form.validate() {
        return Ok(Page::render(
            CREATE_TEMPLATE,
            json!({ "form": { "title": form.title, "body": form.body } }),
        )
        .with_flash(message));
    }

    let mut conn = ctx.db.acquire().await?;
    let post_id = PostRepository::new(&mut conn)
        .insert(&form.title, &form.body, user.id)
        .await?;

    tracing::info!("User {} created post {}", user.id, post_id);
    Ok(Page::redirect("/"))
}
