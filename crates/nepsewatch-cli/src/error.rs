use thiserror::Error;

use nepsewatch_core::{StoreError, ValidationError, WatchlistError};

/// CLI-level error categories mapped to exit codes.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("{0}")]
    Usage(String),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("symbol '{0}' is not on the watchlist")]
    UnknownSymbol(String),

    #[error(transparent)]
    Watchlist(WatchlistError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl CliError {
    /// Stable exit code per failure class. Fetch failures never surface
    /// here; a refresh that recorded failed symbols exits 5 through its
    /// report instead.
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::Usage(_) => 2,
            Self::Validation(_) => 3,
            Self::UnknownSymbol(_) => 4,
            Self::Watchlist(_) | Self::Store(_) => 6,
            Self::Serialization(_) | Self::Io(_) => 7,
        }
    }
}

impl From<WatchlistError> for CliError {
    fn from(error: WatchlistError) -> Self {
        match error {
            WatchlistError::Validation(validation) => Self::Validation(validation),
            WatchlistError::UnknownSymbol(symbol) => Self::UnknownSymbol(symbol),
            other => Self::Watchlist(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_codes_are_stable_per_failure_class() {
        let validation = nepsewatch_core::Symbol::parse("").expect_err("must fail");

        assert_eq!(CliError::Usage(String::from("bad flags")).exit_code(), 2);
        assert_eq!(CliError::from(WatchlistError::from(validation)).exit_code(), 3);
        assert_eq!(
            CliError::from(WatchlistError::UnknownSymbol(String::from("GHOST"))).exit_code(),
            4
        );
        assert_eq!(
            CliError::Store(StoreError::UnknownSymbol(String::from("GHOST"))).exit_code(),
            6
        );
    }

    #[test]
    fn unknown_symbol_unwraps_out_of_the_watchlist_error() {
        let error = CliError::from(WatchlistError::UnknownSymbol(String::from("GHOST")));
        assert!(matches!(error, CliError::UnknownSymbol(symbol) if symbol == "GHOST"));
    }
}
