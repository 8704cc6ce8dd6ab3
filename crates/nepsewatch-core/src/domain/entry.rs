use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use nepsewatch_store::EntryRecord;

use crate::{Symbol, UtcDateTime, ValidationError};

/// Outcome of the most recent fetch attempt for an entry.
///
/// `NeverFetched` is the state a fresh entry starts in and is never written
/// by a refresh, so a row that has never been fetched stays distinguishable
/// from one whose last refresh failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FetchStatus {
    NeverFetched,
    Ok,
    NotFound,
    Timeout,
    ParseError,
    NetworkError,
}

impl FetchStatus {
    /// Canonical persisted form of the status.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NeverFetched => "never-fetched",
            Self::Ok => "ok",
            Self::NotFound => "not-found",
            Self::Timeout => "timeout",
            Self::ParseError => "parse-error",
            Self::NetworkError => "network-error",
        }
    }

    /// Parse a persisted status string.
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        match input {
            "never-fetched" => Ok(Self::NeverFetched),
            "ok" => Ok(Self::Ok),
            "not-found" => Ok(Self::NotFound),
            "timeout" => Ok(Self::Timeout),
            "parse-error" => Ok(Self::ParseError),
            "network-error" => Ok(Self::NetworkError),
            other => Err(ValidationError::UnknownFetchStatus {
                value: other.to_owned(),
            }),
        }
    }

    /// True for every status a failed fetch can leave behind.
    pub const fn is_failure(self) -> bool {
        matches!(
            self,
            Self::NotFound | Self::Timeout | Self::ParseError | Self::NetworkError
        )
    }
}

impl Display for FetchStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One watchlist row in domain form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WatchlistEntry {
    pub symbol: Symbol,
    pub added_at: UtcDateTime,
    pub last_price: Option<f64>,
    pub last_change: Option<f64>,
    pub last_percent_change: Option<f64>,
    pub last_fetched_at: Option<UtcDateTime>,
    pub last_status: FetchStatus,
}

impl WatchlistEntry {
    /// Rehydrate a stored row, re-validating every field on the way in.
    pub fn from_record(record: &EntryRecord) -> Result<Self, ValidationError> {
        Ok(Self {
            symbol: Symbol::parse(&record.symbol)?,
            added_at: UtcDateTime::parse(&record.added_at)?,
            last_price: record.last_price,
            last_change: record.last_change,
            last_percent_change: record.last_percent_change,
            last_fetched_at: record
                .last_fetched_at
                .as_deref()
                .map(UtcDateTime::parse)
                .transpose()?,
            last_status: FetchStatus::parse(&record.last_status)?,
        })
    }

    /// True when the entry still shows a price from an earlier success while
    /// its latest fetch failed.
    pub fn is_stale(&self) -> bool {
        self.last_status.is_failure() && self.last_price.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(symbol: &str, status: &str) -> EntryRecord {
        EntryRecord {
            symbol: symbol.to_string(),
            added_at: "2026-02-20T10:00:00Z".to_string(),
            last_price: None,
            last_change: None,
            last_percent_change: None,
            last_fetched_at: None,
            last_status: status.to_string(),
        }
    }

    #[test]
    fn status_strings_round_trip() {
        for status in [
            FetchStatus::NeverFetched,
            FetchStatus::Ok,
            FetchStatus::NotFound,
            FetchStatus::Timeout,
            FetchStatus::ParseError,
            FetchStatus::NetworkError,
        ] {
            assert_eq!(FetchStatus::parse(status.as_str()).expect("parse"), status);
        }
    }

    #[test]
    fn rehydrates_a_fresh_row() {
        let entry = WatchlistEntry::from_record(&record("NABIL", "never-fetched")).expect("entry");
        assert_eq!(entry.symbol.as_str(), "NABIL");
        assert_eq!(entry.last_status, FetchStatus::NeverFetched);
        assert!(!entry.is_stale());
    }

    #[test]
    fn rejects_rows_with_unknown_status() {
        let err = WatchlistEntry::from_record(&record("NABIL", "mystery")).expect_err("must fail");
        assert!(matches!(err, ValidationError::UnknownFetchStatus { .. }));
    }

    #[test]
    fn stale_means_failed_status_over_a_prior_price() {
        let mut row = record("NABIL", "timeout");
        row.last_price = Some(1200.0);
        let entry = WatchlistEntry::from_record(&row).expect("entry");
        assert!(entry.is_stale());
    }
}
