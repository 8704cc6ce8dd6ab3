//! # Nepsewatch Core
//!
//! Core domain types, the scraper, and the watchlist manager for the
//! Nepsewatch stock-watchlist toolkit.
//!
//! ## Overview
//!
//! This crate provides the foundational components for Nepsewatch:
//!
//! - **Canonical domain models** for symbols, quotes, and watchlist entries
//! - **Quote source trait** with a typed per-symbol failure taxonomy
//! - **Headless-browser scraper** for merolagani.com pages rendered by
//!   client-side script
//! - **Watchlist manager** that keeps stale quotes visible when refreshes
//!   fail and never lets one bad symbol abort a batch
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`config`] | Scraper settings (WebDriver endpoint, timeouts, pacing) |
//! | [`domain`] | Domain models (Symbol, Quote, WatchlistEntry) |
//! | [`error`] | Core error types |
//! | [`pacing`] | Rate limiting between page navigations |
//! | [`scrape`] | merolagani.com scraping over WebDriver |
//! | [`source`] | Quote source trait and fetch errors |
//! | [`watchlist`] | Watchlist manager |
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use nepsewatch_core::{MerolaganiSource, ScrapeConfig, Watchlist, WatchlistStore};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let store = WatchlistStore::open_default()?;
//!     let source = MerolaganiSource::new(ScrapeConfig::default());
//!     let watchlist = Watchlist::new(store, source);
//!
//!     watchlist.add_symbol("nabil")?;
//!     let report = watchlist.refresh_all().await?;
//!
//!     for entry in watchlist.current_view()? {
//!         println!("{}: {:?} ({})", entry.symbol, entry.last_price, entry.last_status);
//!     }
//!     println!("updated {} of {}", report.updated_count(), report.outcomes.len());
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────┐
//! │  CLI / Caller   │
//! └────────┬────────┘
//!          │
//!          ▼
//! ┌─────────────────┐     ┌──────────────────┐
//! │ Watchlist       │────▶│ WatchlistStore   │
//! │ (Manager)       │     │ (DuckDB)         │
//! └────────┬────────┘     └──────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐     ┌──────────────────┐
//! │ QuoteSource     │────▶│ ScrapeSession    │
//! │ (Merolagani)    │     │ (WebDriver)      │
//! └─────────────────┘     └──────────────────┘
//! ```
//!
//! ## Error Handling
//!
//! A fetch either yields a complete quote or a typed [`FetchError`]; the
//! manager reconciles both into the store without ever discarding an
//! entry's last good quote:
//!
//! ```rust
//! use nepsewatch_core::FetchError;
//!
//! fn handle_error(error: FetchError) {
//!     match error {
//!         FetchError::NotFound { .. } => {
//!             // The symbol does not exist on the site
//!         }
//!         FetchError::Timeout { .. } => {
//!             // Page never rendered; worth trying again later
//!         }
//!         FetchError::ParseError { .. } | FetchError::NetworkError { .. } => {
//!             // Site layout changed or the connection dropped
//!         }
//!     }
//! }
//! ```

pub mod config;
pub mod domain;
pub mod error;
pub mod pacing;
pub mod scrape;
pub mod source;
pub mod watchlist;

// Re-export commonly used types at crate root for convenience

// Scraper configuration
pub use config::{ScrapeConfig, DEFAULT_WEBDRIVER_URL};

// Domain models
pub use domain::{FetchStatus, Quote, Symbol, UtcDateTime, WatchlistEntry, MAX_SYMBOL_LEN};

// Error types
pub use error::{ValidationError, WatchlistError};

// Pacing
pub use pacing::NavigationPacer;

// Scraper
pub use scrape::{MerolaganiSource, ScrapeSession};

// Quote source trait and types
pub use source::{FetchError, FetchOutcome, QuoteSource};

// Watchlist manager
pub use watchlist::{AddOutcome, RefreshDisposition, RefreshOutcome, RefreshReport, Watchlist};

// Store (re-exported from nepsewatch-store)
pub use nepsewatch_store::{
    EntryRecord, FetchResultRecord, RefreshLogRecord, StoreConfig, StoreError, UpsertOutcome,
    WatchlistStore,
};
