// handlers/public/auth/mod.rs - Account registration and token acquisition
//
// Supplies the "logged-in user" the blog's login gate consumes.

pub mod login;
pub mod register;

use serde::Deserialize;

pub use login::{login_form, login_submit};
pub use register::{register_form, register_submit};

/// Username/password form shared by register and login
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CredentialsForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

impl CredentialsForm {
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.username.is_empty() {
            return Err("Username is required.");
        }
        if self.password.is_empty() {
            return Err("Password is required.");
        }
        Ok(())
    }
}
