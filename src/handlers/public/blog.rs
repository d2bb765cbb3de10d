// handlers/public/blog.rs - GET / handler

use serde_json::json;

use crate::database::PostRepository;
use crate::error::ApiError;
use crate::middleware::{Page, RequestContext};

pub const INDEX_TEMPLATE: &str = "blog/index.html";

/// GET / - All posts, newest first
pub async fn index(ctx: RequestContext) -> Result<Page, ApiError> {
    let posts = {
        let mut conn = ctx.db.acquire().await?;
        PostRepository::new(&mut conn).list().await?
    };

    Ok(Page::render(
        INDEX_TEMPLATE,
        json!({ "posts": posts, "user": ctx.user }),
    ))
}
