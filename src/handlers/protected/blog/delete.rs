// handlers/protected/blog/delete.rs - POST /:post_id/delete handler

use axum::Extension;

use crate::database::PostRepository;
use crate::error::ApiError;
use crate::middleware::{OwnedPost, Page, RequestContext};

/// POST /:post_id/delete - Physically remove the post; no confirmation step
pub async fn delete(
    ctx: RequestContext,
    Extension(OwnedPost(post)): Extension<OwnedPost>,
) -> Result<Page, ApiError> {
    let mut conn = ctx.db.acquire().await?;
    PostRepository::new(&mut conn).delete(post.id).await?;

    tracing::info!("Post {} deleted by author {}", post.id, post.author_id);
    Ok(Page::redirect("/"))
}
