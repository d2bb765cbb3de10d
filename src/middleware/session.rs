use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use crate::app::AppState;

/// Gives every request its own lazily opened database session and closes it
/// once the response has been produced, whatever the outcome.
pub async fn db_session_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let session = state.db.session();
    request.extensions_mut().insert(session.clone());

    let response = next.run(request).await;

    if session.release().await {
        tracing::debug!(status = %response.status(), "Closed request database session");
    }
    response
}
