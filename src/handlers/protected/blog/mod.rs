pub mod create;
pub mod delete;
pub mod update;

pub use create::{create_form, create_submit};
pub use delete::delete;
pub use update::{update_form, update_submit};
