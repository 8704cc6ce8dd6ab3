use thiserror::Error;

use nepsewatch_store::StoreError;

/// Validation and contract errors exposed by `nepsewatch-core`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("symbol is empty after trimming")]
    EmptySymbol,
    #[error("symbol is {len} characters long, the limit is {max}")]
    SymbolTooLong { len: usize, max: usize },
    #[error("symbol must begin with a letter, got '{ch}'")]
    SymbolInvalidStart { ch: char },
    #[error("character '{ch}' at position {index} is not allowed in a symbol")]
    SymbolInvalidChar { ch: char, index: usize },

    #[error("timestamp '{value}' is not an RFC3339 UTC instant")]
    TimestampNotUtc { value: String },

    #[error("unknown fetch status '{value}'")]
    UnknownFetchStatus { value: String },

    #[error("{field} must be a finite number")]
    NonFiniteValue { field: &'static str },
    #[error("{field} cannot be negative")]
    NegativeValue { field: &'static str },
}

/// Top-level error type for watchlist operations.
#[derive(Debug, Error)]
pub enum WatchlistError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Store(#[from] StoreError),

    /// The symbol is not (or no longer) a member of the watchlist.
    #[error("symbol '{0}' is not on the watchlist")]
    UnknownSymbol(String),

    /// A persisted row no longer passes domain validation.
    #[error("stored entry for '{symbol}' is corrupt: {source}")]
    CorruptEntry {
        symbol: String,
        source: ValidationError,
    },
}

impl WatchlistError {
    /// Stable machine-readable code for shell rendering.
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "watchlist.validation",
            Self::Store(_) => "watchlist.store",
            Self::UnknownSymbol(_) => "watchlist.unknown_symbol",
            Self::CorruptEntry { .. } => "watchlist.corrupt_entry",
        }
    }
}
