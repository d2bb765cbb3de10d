// handlers/protected/blog/update.rs - GET/POST /:post_id/update handlers
//
// Both run behind require_post_owner, so the post in the extension exists
// and belongs to the current user.

use axum::Extension;
use serde_json::json;

use crate::database::PostRepository;
use crate::error::ApiError;
use crate::middleware::{OwnedPost, Page, RequestContext, ValidForm};
use crate::services::PostForm;

pub const UPDATE_TEMPLATE: &str = "blog/update.html";

/// GET /:post_id/update - Form pre-filled with the stored post
pub async fn update_form(Extension(OwnedPost(post)): Extension<OwnedPost>) -> Page {
    Page::render(UPDATE_TEMPLATE, json!({ "post": post }))
}

/// POST /:post_id/update
pub async fn update_submit(
    ctx: RequestContext,
    Extension(OwnedPost(post)): Extension<OwnedPost>,
    ValidForm(form): ValidForm<PostForm>,
) -> Result<Page, ApiError> {
    if let Err(message) = form.validate() {
        return Ok(Page::render(UPDATE_TEMPLATE, json!({ "post": post })).with_flash(message));
    }

    let mut conn = ctx.db.acquire().await?;
    PostRepository::new(&mut conn)
        .update(post.id, &form.title, &form.body)
        .await?;

    tracing::info!("Post {} updated by author {}", post.id, post.author_id);
    Ok(Page::redirect("/"))
}
