use sqlx::sqlite::SqliteConnection;
use sqlx::Connection;

use crate::database::manager::DatabaseError;
use crate::database::models::{Post, User};

const SELECT_POST: &str = concat!(
    "SELECT p.id, title, body, created, author_id, username",
    " FROM post p JOIN user u ON p.author_id = u.id",
    " WHERE p.id = ?"
);

// p.id breaks ties between posts created within the same millisecond
const LIST_POSTS: &str = concat!(
    "SELECT p.id, title, body, created, author_id, username",
    " FROM post p JOIN user u ON p.author_id = u.id",
    " ORDER BY created DESC, p.id DESC"
);

const INSERT_POST: &str = "INSERT INTO post (title, body, author_id) VALUES (?, ?, ?)";
const UPDATE_POST: &str = "UPDATE post SET title = ?, body = ? WHERE id = ?";
const DELETE_POST: &str = "DELETE FROM post WHERE id = ?";

const SELECT_USER_BY_ID: &str = "SELECT id, username, password FROM user WHERE id = ?";
const SELECT_USER_BY_NAME: &str = "SELECT id, username, password FROM user WHERE username = ?";
const INSERT_USER: &str = "INSERT INTO user (username, password) VALUES (?, ?)";

impl DatabaseError {
    pub fn is_unique_violation(&self) -> bool {
        match self {
            DatabaseError::Sqlx(e) => e
                .as_database_error()
                .map_or(false, |db| db.is_unique_violation()),
            _ => false,
        }
    }
}

/// Statements over the `post` table. Writes run in their own transaction
/// and are committed before returning.
pub struct PostRepository<'c> {
    conn: &'c mut SqliteConnection,
}

impl<'c> PostRepository<'c> {
    pub fn new(conn: &'c mut SqliteConnection) -> Self {
        Self { conn }
    }

    /// All posts, newest first.
    pub async fn list(&mut self) -> Result<Vec<Post>, DatabaseError> {
        let posts = sqlx::query_as::<_, Post>(LIST_POSTS)
            .fetch_all(&mut *self.conn)
            .await?;
        Ok(posts)
    }

    pub async fn find(&mut self, id: i64) -> Result<Option<Post>, DatabaseError> {
        let post = sqlx::query_as::<_, Post>(SELECT_POST)
            .bind(id)
            .fetch_optional(&mut *self.conn)
            .await?;
        Ok(post)
    }

    pub async fn find_404(&mut self, id: i64) -> Result<Post, DatabaseError> {
        self.find(id)
            .await?
            .ok_or_else(|| DatabaseError::NotFound(format!("Post id {} doesn't exist.", id)))
    }

    /// Returns the id assigned by storage.
    pub async fn insert(&mut self, title: &str, body: &str, author_id: i64) -> Result<i64, DatabaseError> {
        let mut tx = self.conn.begin().await?;
        let result = sqlx::query(INSERT_POST)
            .bind(title)
            .bind(body)
            .bind(author_id)
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;
        Ok(result.last_insert_rowid())
    }

    /// Returns the number of rows changed.
    pub async fn update(&mut self, id: i64, title: &str, body: &str) -> Result<u64, DatabaseError> {
        let mut tx = self.conn.begin().await?;
        let result = sqlx::query(UPDATE_POST)
            .bind(title)
            .bind(body)
            .bind(id)
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;
        Ok(result.rows_affected())
    }

    pub async fn delete(&mut self, id: i64) -> Result<u64, DatabaseError> {
        let mut tx = self.conn.begin().await?;
        let result = sqlx::query(DELETE_POST)
            .bind(id)
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;
        Ok(result.rows_affected())
    }
}

/// Lookups and registration over the `user` table.
pub struct UserRepository<'c> {
    conn: &'c mut SqliteConnection,
}

impl<'c> UserRepository<'c> {
    pub fn new(conn: &'c mut SqliteConnection) -> Self {
        Self { conn }
    }

    pub async fn find(&mut self, id: i64) -> Result<Option<User>, DatabaseError> {
        let user = sqlx::query_as::<_, User>(SELECT_USER_BY_ID)
            .bind(id)
            .fetch_optional(&mut *self.conn)
            .await?;
        Ok(user)
    }

    pub async fn find_by_username(&mut self, username: &str) -> Result<Option<User>, DatabaseError> {
        let user = sqlx::query_as::<_, User>(SELECT_USER_BY_NAME)
            .bind(username)
            .fetch_optional(&mut *self.conn)
            .await?;
        Ok(user)
    }

    /// `password` must already be hashed.
    pub async fn insert(&mut self, username: &str, password: &str) -> Result<i64, DatabaseError> {
        let mut tx = self.conn.begin().await?;
        let result = sqlx::query(INSERT_USER)
            .bind(username)
            .bind(password)
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;
        Ok(result.last_insert_rowid())
    }
}
