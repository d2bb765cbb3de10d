use axum::{async_trait, extract::FromRequestParts, http::request::Parts};

use crate::database::DbSession;
use crate::error::ApiError;
use super::auth::AuthUser;

/// Everything a handler may know about the request it is serving: the
/// request's database session and, behind the login gate, the acting user.
#[derive(Clone, Debug)]
pub struct RequestContext {
    pub db: DbSession,
    pub user: Option<AuthUser>,
}

impl RequestContext {
    #[cfg(test)]
    pub(crate) fn new(db: DbSession, user: Option<AuthUser>) -> Self {
        Self { db, user }
    }

    pub fn current_user(&self) -> Result<&AuthUser, ApiError> {
        self.user
            .as_ref()
            .ok_or_else(|| ApiError::unauthorized("Authentication required"))
    }
}

#[async_trait]
impl<S: Send + Sync> FromRequestParts<S> for RequestContext {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let db = parts.extensions.get::<DbSession>().cloned().ok_or_else(|| {
            tracing::error!("Request reached a handler without a database session");
            ApiError::internal_server_error("Database session unavailable")
        })?;
        let user = parts.extensions.get::<AuthUser>().cloned();

        Ok(Self { db, user })
    }
}
