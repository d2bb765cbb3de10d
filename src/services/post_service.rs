use serde::Deserialize;

use crate::database::{Post, PostRepository};
use crate::error::ApiError;
use crate::middleware::RequestContext;

/// Submitted create/update form. Absent fields arrive as empty strings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PostForm {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub body: String,
}

impl PostForm {
    /// The message to show the user, if the form cannot be saved.
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.title.is_empty() {
            return Err("Title is required.");
        }
        Ok(())
    }
}

/// Fetch a post (with its author's username) for an action on it.
///
/// Fails with not-found when no row has `post_id`, and with forbidden when
/// `check_author` is set and the current user did not write the post.
pub async fn get_post_for_action(
    ctx: &RequestContext,
    post_id: i64,
    check_author: bool,
) -> Result<Post, ApiError> {
    let post = {
        let mut conn = ctx.db.acquire().await?;
        PostRepository::new(&mut conn).find_404(post_id).await?
    };

    if check_author {
        let user = ctx.current_user()?;
        if !post.is_authored_by(user.id) {
            tracing::warn!(
                "User {} ({}) may not act on post {} by {}",
                user.username,
                user.id,
                post.id,
                post.author_id
            );
            return Err(ApiError::forbidden("You are not the author of this post"));
        }
    }

    Ok(post)
}
