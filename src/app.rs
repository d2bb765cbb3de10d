use std::sync::Arc;

use axum::{
    middleware::{from_fn, from_fn_with_state},
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::config::AppConfig;
use crate::database::DatabaseManager;
use crate::handlers::{protected, public};
use crate::middleware::{
    db_session_middleware, load_logged_in_user, login_required, require_post_owner,
};

/// Shared, read-only application state
#[derive(Clone, Debug)]
pub struct AppState {
    pub db: DatabaseManager,
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        Self {
            db: DatabaseManager::new(&config.database),
            config: Arc::new(config),
        }
    }
}

/// Full routing table. Layers run outermost first: request session, then
/// optional user loading, then the login gate and post ownership on the
/// routes that need them.
pub fn app(state: AppState) -> Router {
    let enable_cors = state.config.server.enable_cors;

    let router = with_request_session(routes(state.clone()), state)
        .layer(TraceLayer::new_for_http());

    if enable_cors {
        router.layer(CorsLayer::permissive())
    } else {
        router
    }
}

fn routes(state: AppState) -> Router {
    Router::new()
        .merge(public_routes())
        .merge(auth_routes())
        .merge(blog_routes(state.clone()))
        .layer(from_fn_with_state(state.clone(), load_logged_in_user))
        .with_state(state)
}

fn with_request_session(router: Router, state: AppState) -> Router {
    router.layer(from_fn_with_state(state, db_session_middleware))
}

fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(public::index))
        .route("/health", get(public::health))
}

fn auth_routes() -> Router<AppState> {
    use public::auth;

    Router::new()
        .route(
            "/auth/register",
            get(auth::register_form).post(auth::register_submit),
        )
        .route("/auth/login", get(auth::login_form).post(auth::login_submit))
}

fn blog_routes(state: AppState) -> Router<AppState> {
    use protected::blog;

    let owned = Router::new()
        .route(
            "/:post_id/update",
            get(blog::update_form).post(blog::update_submit),
        )
        .route("/:post_id/delete", post(blog::delete))
        .route_layer(from_fn(require_post_owner));

    Router::new()
        .route("/create", get(blog::create_form).post(blog::create_submit))
        .merge(owned)
        .route_layer(from_fn_with_state(state, login_required))
}

/// Serve until the listener fails or the process is stopped.
pub async fn serve(listener: tokio::net::TcpListener, state: AppState) -> std::io::Result<()> {
    axum::serve(listener, app(state)).await
}
