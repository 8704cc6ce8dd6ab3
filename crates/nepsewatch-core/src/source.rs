//! Quote source trait and fetch error types.
//!
//! This module defines the adapter contract (`QuoteSource`) that scrapers
//! must follow, along with the typed error a single fetch can fail with.
//!
//! # Errors
//!
//! | Variant | Meaning |
//! |---------|---------|
//! | [`FetchError::NotFound`] | The site rendered but knows no such symbol |
//! | [`FetchError::Timeout`] | The page did not render within the deadline |
//! | [`FetchError::ParseError`] | The page rendered but its text was unreadable |
//! | [`FetchError::NetworkError`] | The site or the WebDriver was unreachable |
//!
//! A fetch attempt either fully succeeds with a [`Quote`] or fails with one
//! of these. Sources never retry internally; retry policy belongs to the
//! caller, who sees every failure as it happened.

use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

use thiserror::Error;

use crate::{FetchStatus, Quote, Symbol};

/// Why a single fetch attempt failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// The site answered but has no company page for the symbol.
    #[error("no company page for symbol '{symbol}'")]
    NotFound { symbol: String },

    /// The page did not render its price within the deadline.
    #[error("page did not render within {waited_ms} ms: {detail}")]
    Timeout { waited_ms: u64, detail: String },

    /// The page rendered but its content could not be read as a quote.
    #[error("could not read quote from page: {detail}")]
    ParseError { detail: String },

    /// The site or the WebDriver endpoint was unreachable.
    #[error("network failure: {detail}")]
    NetworkError { detail: String },
}

impl FetchError {
    pub fn not_found(symbol: impl Into<String>) -> Self {
        Self::NotFound {
            symbol: symbol.into(),
        }
    }

    pub fn timeout(waited: Duration, detail: impl Into<String>) -> Self {
        Self::Timeout {
            waited_ms: waited.as_millis() as u64,
            detail: detail.into(),
        }
    }

    pub fn parse(detail: impl Into<String>) -> Self {
        Self::ParseError {
            detail: detail.into(),
        }
    }

    pub fn network(detail: impl Into<String>) -> Self {
        Self::NetworkError {
            detail: detail.into(),
        }
    }

    /// Stable machine-readable error code.
    pub const fn code(&self) -> &'static str {
        match self {
            Self::NotFound { .. } => "fetch.not_found",
            Self::Timeout { .. } => "fetch.timeout",
            Self::ParseError { .. } => "fetch.parse_error",
            Self::NetworkError { .. } => "fetch.network_error",
        }
    }

    /// The entry status this failure persists as.
    pub const fn status(&self) -> FetchStatus {
        match self {
            Self::NotFound { .. } => FetchStatus::NotFound,
            Self::Timeout { .. } => FetchStatus::Timeout,
            Self::ParseError { .. } => FetchStatus::ParseError,
            Self::NetworkError { .. } => FetchStatus::NetworkError,
        }
    }
}

/// Per-symbol result of a batch fetch.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchOutcome {
    pub symbol: Symbol,
    pub result: Result<Quote, FetchError>,
}

/// Scraper adapter contract.
///
/// Implementations fetch quotes for one symbol at a time or for a whole
/// batch. The trait uses boxed futures so it stays object-safe and free of
/// extra proc-macro dependencies.
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync` as they may be shared across tasks.
pub trait QuoteSource: Send + Sync {
    /// Human-readable source name used in reports.
    fn name(&self) -> &str;

    /// Fetches the current quote for one symbol.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError`] describing exactly how the attempt failed.
    /// A fetch either yields a complete [`Quote`] or fails; there are no
    /// partial results and no internal retries.
    fn fetch_quote<'a>(
        &'a self,
        symbol: &'a Symbol,
    ) -> Pin<Box<dyn Future<Output = Result<Quote, FetchError>> + Send + 'a>>;

    /// Fetches quotes for a batch of symbols, one outcome per symbol.
    ///
    /// The default implementation fetches sequentially via
    /// [`fetch_quote`](QuoteSource::fetch_quote). Implementations that can
    /// reuse a session across the batch should override this.
    fn fetch_batch<'a>(
        &'a self,
        symbols: &'a [Symbol],
    ) -> Pin<Box<dyn Future<Output = Vec<FetchOutcome>> + Send + 'a>> {
        Box::pin(async move {
            let mut outcomes = Vec::with_capacity(symbols.len());
            for symbol in symbols {
                let result = self.fetch_quote(symbol).await;
                outcomes.push(FetchOutcome {
                    symbol: symbol.clone(),
                    result,
                });
            }
            outcomes
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_codes_are_stable() {
        assert_eq!(FetchError::not_found("NABIL").code(), "fetch.not_found");
        assert_eq!(
            FetchError::timeout(Duration::from_secs(10), "price element").code(),
            "fetch.timeout"
        );
        assert_eq!(FetchError::parse("bad number").code(), "fetch.parse_error");
        assert_eq!(
            FetchError::network("connection refused").code(),
            "fetch.network_error"
        );
    }

    #[test]
    fn every_failure_maps_to_a_failure_status() {
        let errors = [
            FetchError::not_found("NABIL"),
            FetchError::timeout(Duration::from_secs(10), "price element"),
            FetchError::parse("bad number"),
            FetchError::network("connection refused"),
        ];
        for error in errors {
            assert!(error.status().is_failure());
        }
    }

    #[test]
    fn timeout_records_the_wait_in_millis() {
        let error = FetchError::timeout(Duration::from_millis(10_000), "price element");
        assert!(matches!(error, FetchError::Timeout { waited_ms, .. } if waited_ms == 10_000));
    }
}
