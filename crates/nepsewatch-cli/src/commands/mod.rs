mod add;
mod clear;
mod list;
mod log;
mod refresh;
mod remove;

use std::process::ExitCode;

use serde::Serialize;

use nepsewatch_core::{
    AddOutcome, MerolaganiSource, RefreshDisposition, RefreshLogRecord, RefreshOutcome,
    ScrapeConfig, StoreConfig, Watchlist, WatchlistEntry, WatchlistStore,
};

use crate::cli::{Cli, Command};
use crate::error::CliError;

/// What a command produced, ready for rendering.
#[derive(Debug, Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum CommandReport {
    Added {
        outcomes: Vec<AddOutcome>,
    },
    Removed {
        outcomes: Vec<RemovalRow>,
    },
    View {
        entries: Vec<WatchlistEntry>,
    },
    Refreshed {
        /// Audit-log batch id of a whole-list refresh. Named-symbol
        /// refreshes log each symbol under its own id.
        #[serde(skip_serializing_if = "Option::is_none")]
        batch_id: Option<String>,
        outcomes: Vec<RefreshOutcome>,
    },
    Cleared {
        removed: usize,
    },
    Log {
        rows: Vec<RefreshLogRecord>,
    },
}

/// One removal result row.
#[derive(Debug, Serialize)]
pub struct RemovalRow {
    pub symbol: String,
    pub removed: bool,
}

impl CommandReport {
    /// Exit code once the report is rendered. A refresh that recorded
    /// failed symbols signals through the exit code as well as the rows.
    pub fn exit_code(&self) -> ExitCode {
        match self {
            Self::Refreshed { outcomes, .. }
                if outcomes
                    .iter()
                    .any(|outcome| outcome.disposition == RefreshDisposition::Failed) =>
            {
                ExitCode::from(5)
            }
            _ => ExitCode::SUCCESS,
        }
    }
}

pub async fn run(cli: &Cli) -> Result<CommandReport, CliError> {
    let watchlist = open_watchlist(cli)?;

    match &cli.command {
        Command::Add(args) => add::run(&watchlist, args),
        Command::Remove(args) => remove::run(&watchlist, args),
        Command::List => list::run(&watchlist),
        Command::Refresh(args) => refresh::run(&watchlist, args).await,
        Command::Clear(args) => clear::run(&watchlist, args),
        Command::Log(args) => log::run(&watchlist, args),
    }
}

/// Builds the manager. Constructing the scraper opens nothing; browser
/// sessions exist only while a refresh runs, so read commands stay offline.
fn open_watchlist(cli: &Cli) -> Result<Watchlist<MerolaganiSource>, CliError> {
    let store_config = match &cli.data_dir {
        Some(dir) => StoreConfig::under(dir),
        None => StoreConfig::default(),
    };
    let store = WatchlistStore::open(store_config)?;

    let mut scrape_config = ScrapeConfig::default();
    if let Some(url) = &cli.webdriver_url {
        scrape_config = scrape_config.with_webdriver_url(url);
    }

    Ok(Watchlist::new(store, MerolaganiSource::new(scrape_config)))
}
