use axum::{
    extract::{Path, Request},
    middleware::Next,
    response::Response,
};

use crate::database::Post;
use crate::error::ApiError;
use crate::services::post_service::get_post_for_action;
use super::context::RequestContext;

/// Post that passed the ownership guard for the current request.
#[derive(Clone, Debug)]
pub struct OwnedPost(pub Post);

/// Ownership gate for `/:post_id/*` routes. Must sit inside the login gate.
///
/// Ids that are not integers are treated like ids with no row.
pub async fn require_post_owner(
    ctx: RequestContext,
    Path(post_id): Path<String>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let post_id: i64 = post_id
        .parse()
        .map_err(|_| ApiError::not_found(format!("Post id {} doesn't exist.", post_id)))?;

    let post = get_post_for_action(&ctx, post_id, true).await?;
    request.extensions_mut().insert(OwnedPost(post));

    Ok(next.run(request).await)
}
