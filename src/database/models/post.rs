use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A blog entry joined with its author's username.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Post {
    pub id: i64,
    pub title: String,
    pub body: String,
    pub created: NaiveDateTime,
    pub author_id: i64,
    pub username: String,
}

impl Post {
    pub fn is_authored_by(&self, user_id: i64) -> bool {
        self.author_id == user_id
    }
}
