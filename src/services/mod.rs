pub mod post_service;

pub use post_service::{get_post_for_action, PostForm};
