//! # Domain Models
//!
//! Canonical domain types for Nepsewatch watchlist data.
//!
//! ## Overview
//!
//! Every type here validates on construction, so anything holding a
//! [`Symbol`], [`Quote`], or [`UtcDateTime`] can rely on the value being
//! well-formed. All of them serialize to JSON for shell output.
//!
//! ## Models
//!
//! | Type | Description |
//! |------|-------------|
//! | [`Symbol`] | Normalized NEPSE ticker, the watchlist key |
//! | [`Quote`] | Scraped price with absolute and percent change |
//! | [`WatchlistEntry`] | One watchlist row with its last known quote |
//! | [`FetchStatus`] | Outcome of the most recent fetch attempt |
//! | [`UtcDateTime`] | RFC3339 instant pinned to UTC |
//!
//! ## Validation
//!
//! ```rust,ignore
//! use nepsewatch_core::{Quote, UtcDateTime, ValidationError};
//!
//! let ts = UtcDateTime::parse("2026-01-01T00:00:00Z")?;
//!
//! // Valid quote
//! let quote = Quote::new(1200.0, 15.5, 1.31, ts)?;
//!
//! // Negative price - returns ValidationError
//! let invalid = Quote::new(-1.0, 15.5, 1.31, ts);
//! assert!(matches!(invalid, Err(ValidationError::NegativeValue { .. })));
//! ```

mod entry;
mod quote;
mod symbol;
mod timestamp;

pub use entry::{FetchStatus, WatchlistEntry};
pub use quote::Quote;
pub use symbol::{Symbol, MAX_SYMBOL_LEN};
pub use timestamp::UtcDateTime;
