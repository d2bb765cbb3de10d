// handlers/public/mod.rs - Public handlers (no login required)
//
// Route Prefix: none (/, /health, /auth/*)
// Middleware: request database session only

pub mod auth;
pub mod blog;
pub mod health;

pub use blog::index;
pub use health::health;
