// handlers/mod.rs - Two-tier handler layout
//
// Public (no login) → Protected (login gate, plus ownership gate for
// routes addressing a single post)
pub mod public;
pub mod protected;
