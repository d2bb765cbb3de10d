pub mod auth;
pub mod context;
pub mod form;
pub mod ownership;
pub mod response;
pub mod session;

pub use auth::{load_logged_in_user, login_required, AuthUser};
pub use context::RequestContext;
pub use form::ValidForm;
pub use ownership::{require_post_owner, OwnedPost};
pub use response::{ApiResponse, Page};
pub use session::db_session_middleware;
