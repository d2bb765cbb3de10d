// handlers/protected/mod.rs - Handlers behind the login gate
//
// Middleware: request database session → login_required
//             (→ require_post_owner for /:post_id/* routes)

pub mod blog;
