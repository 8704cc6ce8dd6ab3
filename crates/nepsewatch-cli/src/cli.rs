//! CLI argument definitions for Nepsewatch.
//!
//! This module contains the command-line interface structure using Clap.
//! The CLI exposes exactly the watchlist manager surface: membership,
//! refresh, the offline view, and the refresh audit log.
//!
//! # Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `add` | Add symbols to the watchlist |
//! | `remove` | Remove symbols from the watchlist |
//! | `list` | Show the watchlist (offline, never opens a browser) |
//! | `refresh` | Fetch current prices for named symbols or the whole list |
//! | `clear` | Remove every entry |
//! | `log` | Show recent refresh audit rows |
//!
//! # Global Options
//!
//! | Option | Default | Description |
//! |--------|---------|-------------|
//! | `--format` | `table` | Output format (table, json) |
//! | `--pretty` | `false` | Pretty-print JSON output |
//! | `--data-dir` | `$NEPSEWATCH_HOME` | Data directory override |
//! | `--webdriver-url` | `$NEPSEWATCH_WEBDRIVER_URL` | WebDriver endpoint override |
//!
//! # Examples
//!
//! ```bash
//! # Track a stock
//! nepsewatch add NABIL
//!
//! # Fetch current prices for the whole watchlist
//! nepsewatch refresh
//!
//! # Check the list without any browser running
//! nepsewatch list
//!
//! # Machine-readable output
//! nepsewatch list --format json --pretty
//! ```

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

/// 📈 Nepsewatch - NEPSE stock watchlist CLI
///
/// Track Nepal Stock Exchange symbols in a local watchlist, scrape current
/// prices from merolagani.com through a headless browser, and keep every
/// quote on disk in DuckDB.
#[derive(Debug, Parser)]
#[command(
    name = "nepsewatch",
    author,
    version,
    about = "NEPSE stock watchlist with headless-browser price refresh",
    long_about = "Nepsewatch keeps a local watchlist of NEPSE symbols and refreshes their \
prices by scraping merolagani.com. Features include:\n\
\n\
  • Durable watchlist in a single DuckDB file\n\
  • Headless-browser scraping of JavaScript-rendered pages (WebDriver)\n\
  • Stale prices stay visible when a refresh fails\n\
  • Per-symbol failure reporting; one bad symbol never aborts a batch\n\
  • Refresh audit log with batch ids\n\
\n\
A refresh needs a WebDriver server (e.g. geckodriver) reachable at \
--webdriver-url. Reads ('list', 'log') never open a browser.\n\
\n\
Use 'nepsewatch <command> --help' for command-specific help."
)]
pub struct Cli {
    /// Output format for results.
    ///
    /// - table: aligned columns for terminal display (default)
    /// - json: single JSON object
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,

    /// Pretty-print JSON output with indentation.
    #[arg(long, global = true, default_value_t = false)]
    pub pretty: bool,

    /// Data directory holding the watchlist database.
    ///
    /// Defaults to $NEPSEWATCH_HOME, then ~/.nepsewatch.
    #[arg(long, global = true, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    /// WebDriver endpoint used for refreshes.
    ///
    /// Defaults to $NEPSEWATCH_WEBDRIVER_URL, then http://localhost:4444.
    #[arg(long, global = true, value_name = "URL")]
    pub webdriver_url: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Aligned columns for terminal display.
    Table,
    /// Single JSON object output.
    Json,
}

/// Available CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// 📌 Add one or more symbols to the watchlist.
    ///
    /// Symbols are normalized (trimmed, uppercased) before storage; adding
    /// a symbol that is already tracked changes nothing.
    ///
    /// # Examples
    ///
    ///   nepsewatch add NABIL
    ///   nepsewatch add nabil ngpl hrl
    Add(AddArgs),

    /// 🗑️ Remove one or more symbols from the watchlist.
    ///
    /// Removing a symbol that is not tracked reports it and moves on.
    ///
    /// # Examples
    ///
    ///   nepsewatch remove NABIL
    Remove(RemoveArgs),

    /// 📋 Show the watchlist with last-known prices.
    ///
    /// Reads only the local database; works with no WebDriver running.
    /// Rows whose last refresh failed keep their stale price and show the
    /// failure kind; rows never refreshed show 'never'.
    List,

    /// 🔄 Fetch current prices for named symbols, or the whole watchlist.
    ///
    /// A whole-list refresh shares one browser session across all symbols
    /// and reports one outcome per symbol; individual failures never abort
    /// the batch. Exits with code 5 when any symbol failed.
    ///
    /// # Examples
    ///
    ///   nepsewatch refresh
    ///   nepsewatch refresh NABIL NGPL
    Refresh(RefreshArgs),

    /// 🧹 Remove every entry from the watchlist.
    ///
    /// Refuses to run without --yes. The refresh audit log is retained.
    Clear(ClearArgs),

    /// 🧾 Show recent refresh audit rows, newest first.
    Log(LogArgs),
}

/// Arguments for the `add` command.
#[derive(Debug, Args)]
pub struct AddArgs {
    /// One or more NEPSE symbols (e.g., NABIL, NGPL).
    #[arg(required = true, num_args = 1..)]
    pub symbols: Vec<String>,
}

/// Arguments for the `remove` command.
#[derive(Debug, Args)]
pub struct RemoveArgs {
    /// One or more symbols to stop tracking.
    #[arg(required = true, num_args = 1..)]
    pub symbols: Vec<String>,
}

/// Arguments for the `refresh` command.
#[derive(Debug, Args)]
pub struct RefreshArgs {
    /// Symbols to refresh. With none given, refreshes the whole watchlist.
    #[arg(num_args = 0..)]
    pub symbols: Vec<String>,
}

/// Arguments for the `clear` command.
#[derive(Debug, Args)]
pub struct ClearArgs {
    /// Confirm removal of every entry.
    #[arg(long, default_value_t = false)]
    pub yes: bool,
}

/// Arguments for the `log` command.
#[derive(Debug, Args)]
pub struct LogArgs {
    /// Maximum number of audit rows to show.
    #[arg(long, default_value_t = 20)]
    pub limit: usize,
}
