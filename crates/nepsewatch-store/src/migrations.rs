//! Versioned schema migrations for the watchlist database.

use ::duckdb::{Connection, ToSql};

struct Migration {
    version: &'static str,
    sql: &'static str,
}

const MIGRATIONS: &[Migration] = &[
    Migration {
        version: "0001_watchlist",
        sql: r#"
CREATE SEQUENCE IF NOT EXISTS watchlist_position_seq;

CREATE TABLE IF NOT EXISTS watchlist (
    symbol TEXT PRIMARY KEY,
    position BIGINT NOT NULL DEFAULT nextval('watchlist_position_seq'),
    added_at TEXT NOT NULL,
    last_price DOUBLE,
    last_change DOUBLE,
    last_percent_change DOUBLE,
    last_fetched_at TEXT,
    last_status TEXT NOT NULL DEFAULT 'never-fetched'
);
"#,
    },
    Migration {
        version: "0002_refresh_log",
        sql: r#"
CREATE TABLE IF NOT EXISTS refresh_log (
    batch_id TEXT NOT NULL,
    symbol TEXT NOT NULL,
    status TEXT NOT NULL,
    price DOUBLE,
    recorded_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
);

CREATE INDEX IF NOT EXISTS idx_refresh_log_symbol_ts ON refresh_log(symbol, recorded_at);
"#,
    },
];

/// Apply every migration that has not been recorded yet.
///
/// Versions already listed in `schema_migrations` are skipped, so reopening
/// an existing database is a no-op.
pub fn apply_migrations(connection: &Connection) -> Result<(), ::duckdb::Error> {
    connection.execute_batch(
        "CREATE TABLE IF NOT EXISTS schema_migrations (\
         version TEXT PRIMARY KEY, \
         applied_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP)",
    )?;

    for migration in MIGRATIONS {
        let params: [&dyn ToSql; 1] = [&migration.version];
        let applied: i64 = connection.query_row(
            "SELECT COUNT(*) FROM schema_migrations WHERE version = ?",
            params.as_slice(),
            |row| row.get(0),
        )?;
        if applied > 0 {
            continue;
        }

        connection.execute_batch(migration.sql)?;
        connection.execute(
            "INSERT INTO schema_migrations (version) VALUES (?)",
            params.as_slice(),
        )?;
    }

    Ok(())
}
