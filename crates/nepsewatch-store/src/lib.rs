//! # nepsewatch Store
//!
//! DuckDB-based persistence for the nepsewatch watchlist.
//!
//! ## Overview
//!
//! The store owns the durable state of the pipeline: which symbols the user
//! tracks, the last quote fetched for each, and an append-only audit log of
//! fetch attempts. Every mutating call commits before it returns, so a
//! process restart reproduces the exact view that was last written.
//!
//! All values arriving from callers are bound as query parameters, never
//! interpolated into SQL.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use nepsewatch_store::{StoreConfig, WatchlistStore};
//!
//! fn main() -> Result<(), nepsewatch_store::StoreError> {
//!     let store = WatchlistStore::open_default()?;
//!     for entry in store.list_entries()? {
//!         println!("{} -> {:?}", entry.symbol, entry.last_price);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Tables
//!
//! | Table | Description |
//! |-------|-------------|
//! | `watchlist` | One row per tracked symbol with its last-known quote |
//! | `refresh_log` | Append-only audit of fetch attempts |
//! | `schema_migrations` | Applied migration versions |

pub mod duckdb;
pub mod migrations;

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use ::duckdb::Connection;
use ::duckdb::ToSql;
use serde::Serialize;
use thiserror::Error;

pub use duckdb::{AccessMode, ConnectionPool, PoolGuard};

/// Status a new entry carries before any fetch has been attempted.
pub const STATUS_NEVER_FETCHED: &str = "never-fetched";

/// Status recorded by a successful fetch.
pub const STATUS_OK: &str = "ok";

/// Failure statuses accepted by [`WatchlistStore::record_fetch_result`].
pub const FAILURE_STATUSES: [&str; 4] = ["not-found", "timeout", "parse-error", "network-error"];

/// Errors that can occur during store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// `DuckDB` database error.
    #[error(transparent)]
    DuckDb(#[from] ::duckdb::Error),

    /// I/O error (file system operations).
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// The targeted entry does not exist (e.g. removed concurrently).
    #[error("unknown symbol '{0}'")]
    UnknownSymbol(String),

    /// A fetch status outside the persisted vocabulary was supplied.
    #[error("unsupported fetch status '{0}'")]
    UnsupportedStatus(String),
}

/// Configuration for the watchlist database.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Root directory for nepsewatch data.
    pub home: PathBuf,
    /// Path to the `DuckDB` database file.
    pub db_path: PathBuf,
    /// Maximum number of idle connections kept per access mode.
    pub max_pool_size: usize,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self::under(resolve_nepsewatch_home())
    }
}

impl StoreConfig {
    /// Configuration rooted at an explicit data directory.
    #[must_use]
    pub fn under(home: impl Into<PathBuf>) -> Self {
        let home = home.into();
        let db_path = home.join("watchlist.duckdb");
        Self {
            home,
            db_path,
            max_pool_size: 2,
        }
    }
}

/// One persisted watchlist row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EntryRecord {
    /// Normalized ticker symbol (the row key).
    pub symbol: String,
    /// Insertion timestamp, RFC 3339.
    pub added_at: String,
    /// Last successfully fetched price.
    pub last_price: Option<f64>,
    /// Last successfully fetched absolute change.
    pub last_change: Option<f64>,
    /// Last successfully fetched percentage change.
    pub last_percent_change: Option<f64>,
    /// Timestamp of the last successful fetch, RFC 3339.
    pub last_fetched_at: Option<String>,
    /// Outcome of the most recent fetch attempt.
    pub last_status: String,
}

/// Result of an upsert: the row plus whether this call created it.
#[derive(Debug, Clone)]
pub struct UpsertOutcome {
    pub entry: EntryRecord,
    pub created: bool,
}

/// A fetch outcome to be reconciled into an entry.
///
/// Success replaces the quote fields and the status together; failure
/// replaces only the status, leaving prior quote fields intact.
#[derive(Debug, Clone)]
pub enum FetchResultRecord {
    Success {
        price: f64,
        change: f64,
        percent_change: f64,
        fetched_at: String,
    },
    Failure {
        status: String,
    },
}

/// One audit row from the refresh log.
#[derive(Debug, Clone, Serialize)]
pub struct RefreshLogRecord {
    /// Identifier grouping the rows of one refresh invocation.
    pub batch_id: String,
    pub symbol: String,
    pub status: String,
    pub price: Option<f64>,
    pub recorded_at: String,
}

/// Durable storage for watchlist entries and their fetch history.
#[derive(Clone)]
pub struct WatchlistStore {
    config: StoreConfig,
    pool: ConnectionPool,
}

impl WatchlistStore {
    /// Open a store with default configuration.
    ///
    /// # Errors
    /// Returns an error if the data directory cannot be created or the
    /// schema cannot be applied.
    pub fn open_default() -> Result<Self, StoreError> {
        Self::open(StoreConfig::default())
    }

    /// Open a store with the specified configuration.
    ///
    /// # Errors
    /// Returns an error if the data directory cannot be created or the
    /// schema cannot be applied.
    pub fn open(config: StoreConfig) -> Result<Self, StoreError> {
        if let Some(parent) = config.db_path.parent() {
            fs::create_dir_all(parent)?;
        }

        let pool = ConnectionPool::new(config.db_path.clone(), config.max_pool_size);
        let store = Self { config, pool };
        store.initialize()?;
        Ok(store)
    }

    /// Apply pending schema migrations.
    pub fn initialize(&self) -> Result<(), StoreError> {
        let connection = self.pool.checkout(AccessMode::ReadWrite)?;
        migrations::apply_migrations(&connection)?;
        Ok(())
    }

    /// Path of the database file.
    #[must_use]
    pub fn db_path(&self) -> &Path {
        self.pool.db_path()
    }

    /// Root data directory this store was opened under.
    #[must_use]
    pub fn home(&self) -> &Path {
        self.config.home.as_path()
    }

    /// All entries in insertion order.
    pub fn list_entries(&self) -> Result<Vec<EntryRecord>, StoreError> {
        let connection = self.pool.checkout(AccessMode::ReadOnly)?;
        let mut statement = connection.prepare(
            "SELECT symbol, added_at, last_price, last_change, last_percent_change, \
             last_fetched_at, last_status FROM watchlist ORDER BY position",
        )?;
        let mut rows = statement.query([] as [&dyn ToSql; 0])?;

        let mut entries = Vec::new();
        while let Some(row) = rows.next()? {
            entries.push(read_entry_row(row)?);
        }
        Ok(entries)
    }

    /// Look up a single entry by its normalized symbol.
    pub fn get_entry(&self, symbol: &str) -> Result<Option<EntryRecord>, StoreError> {
        let connection = self.pool.checkout(AccessMode::ReadOnly)?;
        fetch_entry(&connection, symbol)
    }

    /// Create an entry if absent; return the existing row otherwise.
    ///
    /// The symbol is expected to be normalized already; the store treats it
    /// as an opaque key and binds it as a parameter.
    pub fn upsert_entry(&self, symbol: &str, added_at: &str) -> Result<UpsertOutcome, StoreError> {
        let connection = self.pool.checkout(AccessMode::ReadWrite)?;
        connection.execute_batch("BEGIN TRANSACTION")?;
        let result = (|| -> Result<UpsertOutcome, StoreError> {
            let params: [&dyn ToSql; 2] = [&symbol, &added_at];
            let inserted = connection.execute(
                "INSERT OR IGNORE INTO watchlist (symbol, added_at) VALUES (?, ?)",
                params.as_slice(),
            )?;

            let entry = fetch_entry(&connection, symbol)?
                .ok_or_else(|| StoreError::UnknownSymbol(symbol.to_owned()))?;
            Ok(UpsertOutcome {
                entry,
                created: inserted > 0,
            })
        })();

        finalize_transaction(&connection, result)
    }

    /// Delete an entry. Returns true when a row was actually removed.
    pub fn remove_entry(&self, symbol: &str) -> Result<bool, StoreError> {
        let connection = self.pool.checkout(AccessMode::ReadWrite)?;
        let params: [&dyn ToSql; 1] = [&symbol];
        let removed = connection.execute(
            "DELETE FROM watchlist WHERE symbol = ?",
            params.as_slice(),
        )?;
        Ok(removed > 0)
    }

    /// Reconcile one fetch outcome into the entry and append an audit row.
    ///
    /// Success updates price, change, percent change, fetched-at, and status
    /// in one statement; failure touches only the status so previously
    /// fetched values stay visible. Fails with [`StoreError::UnknownSymbol`]
    /// when the entry vanished between snapshot and write-back.
    pub fn record_fetch_result(
        &self,
        batch_id: &str,
        symbol: &str,
        result: &FetchResultRecord,
    ) -> Result<EntryRecord, StoreError> {
        if let FetchResultRecord::Failure { status } = result {
            if !FAILURE_STATUSES.contains(&status.as_str()) {
                return Err(StoreError::UnsupportedStatus(status.clone()));
            }
        }

        let connection = self.pool.checkout(AccessMode::ReadWrite)?;
        connection.execute_batch("BEGIN TRANSACTION")?;
        let outcome = (|| -> Result<EntryRecord, StoreError> {
            let (updated, status, price) = match result {
                FetchResultRecord::Success {
                    price,
                    change,
                    percent_change,
                    fetched_at,
                } => {
                    let params: [&dyn ToSql; 5] =
                        [price, change, percent_change, fetched_at, &symbol];
                    let updated = connection.execute(
                        "UPDATE watchlist SET last_price = ?, last_change = ?, \
                         last_percent_change = ?, last_fetched_at = ?, last_status = 'ok' \
                         WHERE symbol = ?",
                        params.as_slice(),
                    )?;
                    (updated, STATUS_OK, Some(*price))
                }
                FetchResultRecord::Failure { status } => {
                    let params: [&dyn ToSql; 2] = [status, &symbol];
                    let updated = connection.execute(
                        "UPDATE watchlist SET last_status = ? WHERE symbol = ?",
                        params.as_slice(),
                    )?;
                    (updated, status.as_str(), None)
                }
            };

            if updated == 0 {
                return Err(StoreError::UnknownSymbol(symbol.to_owned()));
            }

            let params: [&dyn ToSql; 4] = [&batch_id, &symbol, &status, &price];
            connection.execute(
                "INSERT INTO refresh_log (batch_id, symbol, status, price, recorded_at) \
                 VALUES (?, ?, ?, ?, CURRENT_TIMESTAMP)",
                params.as_slice(),
            )?;

            fetch_entry(&connection, symbol)?
                .ok_or_else(|| StoreError::UnknownSymbol(symbol.to_owned()))
        })();

        finalize_transaction(&connection, outcome)
    }

    /// Remove every entry. The refresh log is retained.
    pub fn clear(&self) -> Result<usize, StoreError> {
        let connection = self.pool.checkout(AccessMode::ReadWrite)?;
        let removed = connection.execute("DELETE FROM watchlist", [] as [&dyn ToSql; 0])?;
        Ok(removed)
    }

    /// Most recent audit rows, newest first.
    pub fn recent_log(&self, limit: usize) -> Result<Vec<RefreshLogRecord>, StoreError> {
        let capped = i64::try_from(limit.max(1)).unwrap_or(i64::MAX);
        let connection = self.pool.checkout(AccessMode::ReadOnly)?;
        let mut statement = connection.prepare(
            "SELECT batch_id, symbol, status, price, CAST(recorded_at AS VARCHAR) \
             FROM refresh_log ORDER BY recorded_at DESC LIMIT ?",
        )?;
        let params: [&dyn ToSql; 1] = [&capped];
        let mut rows = statement.query(params.as_slice())?;

        let mut records = Vec::new();
        while let Some(row) = rows.next()? {
            records.push(RefreshLogRecord {
                batch_id: row.get(0)?,
                symbol: row.get(1)?,
                status: row.get(2)?,
                price: row.get(3)?,
                recorded_at: row.get(4)?,
            });
        }
        Ok(records)
    }
}

/// Finalize a transaction, committing on success or rolling back on failure.
fn finalize_transaction<T>(
    connection: &Connection,
    result: Result<T, StoreError>,
) -> Result<T, StoreError> {
    match result {
        Ok(value) => {
            connection.execute_batch("COMMIT")?;
            Ok(value)
        }
        Err(error) => {
            let _ = connection.execute_batch("ROLLBACK");
            Err(error)
        }
    }
}

fn fetch_entry(connection: &Connection, symbol: &str) -> Result<Option<EntryRecord>, StoreError> {
    let params: [&dyn ToSql; 1] = [&symbol];
    let result = connection.query_row(
        "SELECT symbol, added_at, last_price, last_change, last_percent_change, \
         last_fetched_at, last_status FROM watchlist WHERE symbol = ?",
        params.as_slice(),
        |row| read_entry_row(row),
    );

    match result {
        Ok(entry) => Ok(Some(entry)),
        Err(::duckdb::Error::QueryReturnedNoRows) => Ok(None),
        Err(error) => Err(error.into()),
    }
}

fn read_entry_row(row: &::duckdb::Row<'_>) -> Result<EntryRecord, ::duckdb::Error> {
    Ok(EntryRecord {
        symbol: row.get(0)?,
        added_at: row.get(1)?,
        last_price: row.get(2)?,
        last_change: row.get(3)?,
        last_percent_change: row.get(4)?,
        last_fetched_at: row.get(5)?,
        last_status: row.get(6)?,
    })
}

/// Resolve the nepsewatch home directory from environment or default.
fn resolve_nepsewatch_home() -> PathBuf {
    if let Some(path) = env::var_os("NEPSEWATCH_HOME") {
        let path = PathBuf::from(path);
        if !path.as_os_str().is_empty() {
            return path;
        }
    }

    if let Some(home) = env::var_os("HOME") {
        return PathBuf::from(home).join(".nepsewatch");
    }

    PathBuf::from(".nepsewatch")
}
