//! Pooled `DuckDB` connections for the watchlist database.

use std::ops::{Deref, DerefMut};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use ::duckdb::Connection;

/// How a checked-out connection may touch the database.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessMode {
    /// Read-only access.
    ReadOnly,
    /// Read-write access.
    ReadWrite,
}

struct IdleConnections {
    read_only: Vec<Connection>,
    read_write: Vec<Connection>,
}

impl IdleConnections {
    fn empty() -> Self {
        Self {
            read_only: Vec::new(),
            read_write: Vec::new(),
        }
    }

    fn take(&mut self, mode: AccessMode) -> Option<Connection> {
        match mode {
            AccessMode::ReadOnly => self.read_only.pop(),
            AccessMode::ReadWrite => self.read_write.pop(),
        }
    }

    fn stash(&mut self, mode: AccessMode, connection: Connection, cap: usize) {
        let slot = match mode {
            AccessMode::ReadOnly => &mut self.read_only,
            AccessMode::ReadWrite => &mut self.read_write,
        };
        if slot.len() < cap {
            slot.push(connection);
        }
    }
}

struct PoolShared {
    db_path: PathBuf,
    max_idle: usize,
    idle: Mutex<IdleConnections>,
}

/// A small connection pool over a single `DuckDB` file.
///
/// Connections are checked out per operation and returned on drop; the pool
/// never holds more than `max_idle` idle connections per access mode.
#[derive(Clone)]
pub struct ConnectionPool {
    shared: Arc<PoolShared>,
}

impl ConnectionPool {
    /// Create a pool over the database file at `path`.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>, max_idle: usize) -> Self {
        Self {
            shared: Arc::new(PoolShared {
                db_path: path.into(),
                max_idle: max_idle.max(1),
                idle: Mutex::new(IdleConnections::empty()),
            }),
        }
    }

    /// Check out a connection for the given access mode, opening a fresh one
    /// when no idle connection is available.
    ///
    /// # Errors
    /// Fails when `DuckDB` cannot open or configure the database file.
    ///
    /// # Panics
    /// Panics if the pool mutex is poisoned (a previous panic while holding
    /// the lock).
    pub fn checkout(&self, mode: AccessMode) -> Result<PoolGuard, ::duckdb::Error> {
        let reused = self
            .shared
            .idle
            .lock()
            .expect("duckdb connection pool mutex poisoned")
            .take(mode);

        let connection = match reused {
            Some(connection) => connection,
            None => open_connection(self.shared.db_path.as_path(), mode)?,
        };

        Ok(PoolGuard {
            mode,
            pool: Arc::clone(&self.shared),
            connection: Some(connection),
        })
    }

    /// Path of the underlying database file.
    #[must_use]
    pub fn db_path(&self) -> &Path {
        self.shared.db_path.as_path()
    }
}

/// A checked-out connection that returns to the pool when dropped.
pub struct PoolGuard {
    mode: AccessMode,
    pool: Arc<PoolShared>,
    connection: Option<Connection>,
}

impl Deref for PoolGuard {
    type Target = Connection;

    fn deref(&self) -> &Self::Target {
        self.connection
            .as_ref()
            .expect("guard holds its connection until dropped")
    }
}

impl DerefMut for PoolGuard {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.connection
            .as_mut()
            .expect("guard holds its connection until dropped")
    }
}

impl Drop for PoolGuard {
    fn drop(&mut self) {
        let Some(connection) = self.connection.take() else {
            return;
        };

        self.pool
            .idle
            .lock()
            .expect("duckdb connection pool mutex poisoned")
            .stash(self.mode, connection, self.pool.max_idle);
    }
}

fn open_connection(path: &Path, mode: AccessMode) -> Result<Connection, ::duckdb::Error> {
    let connection = Connection::open(path)?;
    connection.execute_batch("PRAGMA disable_progress_bar;")?;
    if mode == AccessMode::ReadOnly {
        // Older embedded builds reject this SET; the store never issues write
        // statements through read-only checkouts either way.
        let _ = connection.execute_batch("SET access_mode = 'READ_ONLY';");
    }
    Ok(connection)
}
