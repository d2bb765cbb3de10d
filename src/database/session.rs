use sqlx::sqlite::SqliteConnection;
use sqlx::Connection;
use std::sync::Arc;
use tokio::sync::{MappedMutexGuard, Mutex, MutexGuard};
use tracing::{debug, warn};

use super::manager::{DatabaseError, DatabaseManager};

enum Slot {
    Idle,
    Open(SqliteConnection),
    Released,
}

/// One database connection bound to one request.
///
/// The connection is opened on the first [`acquire`](DbSession::acquire) and
/// closed by [`release`](DbSession::release). Clones share the same slot, so
/// the middleware that releases and the handlers that query see one
/// connection. Once released the session cannot be reopened.
#[derive(Clone)]
pub struct DbSession {
    manager: DatabaseManager,
    slot: Arc<Mutex<Slot>>,
}

impl DbSession {
    pub(crate) fn new(manager: DatabaseManager) -> Self {
        Self {
            manager,
            slot: Arc::new(Mutex::new(Slot::Idle)),
        }
    }

    /// Get the connection for this request, opening it if needed.
    pub async fn acquire(&self) -> Result<MappedMutexGuard<'_, SqliteConnection>, DatabaseError> {
        let mut slot = self.slot.lock().await;
        if matches!(*slot, Slot::Idle) {
            *slot = Slot::Open(self.manager.connect().await?);
        }

        MutexGuard::try_map(slot, |slot| match slot {
            Slot::Open(conn) => Some(conn),
            _ => None,
        })
        .map_err(|_| DatabaseError::SessionReleased)
    }

    /// Round-trip a trivial statement over this request's connection.
    pub async fn ping(&self) -> Result<(), DatabaseError> {
        let mut conn = self.acquire().await?;
        sqlx::query("SELECT 1").execute(&mut *conn).await?;
        Ok(())
    }

    #[cfg(test)]
    pub(crate) async fn is_open(&self) -> bool {
        matches!(*self.slot.lock().await, Slot::Open(_))
    }

    /// Close the connection if one was opened. Returns whether a connection
    /// was closed by this call; every later call returns false.
    pub async fn release(&self) -> bool {
        let previous = std::mem::replace(&mut *self.slot.lock().await, Slot::Released);
        match previous {
            Slot::Open(conn) => {
                if let Err(e) = conn.close().await {
                    warn!("Error closing database connection: {}", e);
                }
                debug!("Released database connection");
                true
            }
            Slot::Idle | Slot::Released => false,
        }
    }
}

impl std::fmt::Debug for DbSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DbSession")
            .field("path", &self.manager.path())
            .finish_non_exhaustive()
    }
}
