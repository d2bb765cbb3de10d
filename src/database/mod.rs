pub mod manager;
pub mod models;
pub mod repository;
pub mod session;

pub use manager::{DatabaseError, DatabaseManager};
pub use models::{Post, User};
pub use repository::{PostRepository, UserRepository};
pub use session::DbSession;
