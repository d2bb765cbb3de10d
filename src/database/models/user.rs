use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: i64,
    pub username: String,
    /// Salted digest, never serialized back to clients
    #[serde(skip_serializing)]
    pub password: String,
}
