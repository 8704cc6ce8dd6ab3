//! Watchlist manager tying the store and the scraper together.
//!
//! The manager owns the rules the store and the scraper individually do not:
//! symbols are normalized before they touch storage, a failed fetch flips an
//! entry's status without discarding its last good quote, and a whole-list
//! refresh works off a snapshot taken once at call start.

use serde::Serialize;
use uuid::Uuid;

use nepsewatch_store::{
    EntryRecord, FetchResultRecord, RefreshLogRecord, StoreError, WatchlistStore,
};

use crate::source::{FetchError, FetchOutcome, QuoteSource};
use crate::{FetchStatus, Quote, Symbol, UtcDateTime, WatchlistEntry, WatchlistError};

/// Result of adding a symbol.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AddOutcome {
    pub entry: WatchlistEntry,
    /// False when the symbol was already on the list.
    pub created: bool,
}

/// How one symbol came out of a refresh.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum RefreshDisposition {
    /// Fetch succeeded; the entry carries the fresh quote.
    Updated,
    /// Fetch failed; the entry keeps its prior values under the new status.
    Failed,
    /// The entry was removed while the batch was running.
    RemovedMidRefresh,
}

/// Per-symbol outcome of a refresh.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RefreshOutcome {
    pub symbol: String,
    pub disposition: RefreshDisposition,
    /// Status the fetch attempt produced, even when the entry is gone.
    pub status: FetchStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entry: Option<WatchlistEntry>,
}

/// Everything one refresh invocation did.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RefreshReport {
    /// Identifier the refresh log rows of this invocation share.
    pub batch_id: String,
    pub outcomes: Vec<RefreshOutcome>,
}

impl RefreshReport {
    pub fn updated_count(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|outcome| outcome.disposition == RefreshDisposition::Updated)
            .count()
    }

    pub fn failed_count(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|outcome| outcome.disposition == RefreshDisposition::Failed)
            .count()
    }
}

/// Watchlist manager: membership, refresh, and the current view.
pub struct Watchlist<S: QuoteSource> {
    store: WatchlistStore,
    source: S,
}

impl<S: QuoteSource> Watchlist<S> {
    pub fn new(store: WatchlistStore, source: S) -> Self {
        Self { store, source }
    }

    pub fn store(&self) -> &WatchlistStore {
        &self.store
    }

    pub fn source_name(&self) -> &str {
        self.source.name()
    }

    /// Adds a symbol, normalizing it first. Adding a symbol that is already
    /// on the list changes nothing and reports `created: false`.
    pub fn add_symbol(&self, raw: &str) -> Result<AddOutcome, WatchlistError> {
        let symbol = Symbol::parse(raw)?;
        let added_at = UtcDateTime::now().format_rfc3339();
        let outcome = self.store.upsert_entry(symbol.as_str(), &added_at)?;
        Ok(AddOutcome {
            entry: entry_from_record(&outcome.entry)?,
            created: outcome.created,
        })
    }

    /// Removes a symbol. Returns false when it was not on the list.
    pub fn remove_symbol(&self, raw: &str) -> Result<bool, WatchlistError> {
        let symbol = Symbol::parse(raw)?;
        Ok(self.store.remove_entry(symbol.as_str())?)
    }

    /// Refreshes a single member through its own browser session.
    ///
    /// On success the entry carries the fresh quote; on fetch failure the
    /// entry keeps its last-known values under the failure status. A refresh
    /// never deletes an entry and never discards previously good data.
    ///
    /// # Errors
    ///
    /// [`WatchlistError::UnknownSymbol`] when the symbol is not a member.
    pub async fn refresh_one(&self, raw: &str) -> Result<RefreshOutcome, WatchlistError> {
        let symbol = Symbol::parse(raw)?;
        if self.store.get_entry(symbol.as_str())?.is_none() {
            return Err(WatchlistError::UnknownSymbol(symbol.as_str().to_owned()));
        }

        let batch_id = new_batch_id();
        let result = self.source.fetch_quote(&symbol).await;
        match self.reconcile(&batch_id, &symbol, result) {
            Err(WatchlistError::Store(StoreError::UnknownSymbol(symbol))) => {
                Err(WatchlistError::UnknownSymbol(symbol))
            }
            other => other,
        }
    }

    /// Refreshes every member over one shared browser session.
    ///
    /// The member list is snapshotted once at call start; symbols added or
    /// removed while the batch runs are not retroactively included or
    /// excluded. Individual fetch failures never abort the batch.
    pub async fn refresh_all(&self) -> Result<RefreshReport, WatchlistError> {
        let batch_id = new_batch_id();
        let symbols = self
            .current_view()?
            .into_iter()
            .map(|entry| entry.symbol)
            .collect::<Vec<_>>();
        if symbols.is_empty() {
            return Ok(RefreshReport {
                batch_id,
                outcomes: Vec::new(),
            });
        }

        let fetched = self.source.fetch_batch(&symbols).await;
        let mut outcomes = Vec::with_capacity(fetched.len());
        for FetchOutcome { symbol, result } in fetched {
            outcomes.push(self.reconcile_batch_member(&batch_id, &symbol, result)?);
        }
        Ok(RefreshReport { batch_id, outcomes })
    }

    /// Current entries in insertion order. Never touches the scraper, so
    /// the view works with no WebDriver running.
    pub fn current_view(&self) -> Result<Vec<WatchlistEntry>, WatchlistError> {
        self.store
            .list_entries()?
            .iter()
            .map(entry_from_record)
            .collect()
    }

    /// Removes every entry, returning how many were removed. The refresh
    /// log is retained.
    pub fn clear(&self) -> Result<usize, WatchlistError> {
        Ok(self.store.clear()?)
    }

    /// Most recent refresh-log rows, newest first.
    pub fn recent_log(&self, limit: usize) -> Result<Vec<RefreshLogRecord>, WatchlistError> {
        Ok(self.store.recent_log(limit)?)
    }

    fn reconcile(
        &self,
        batch_id: &str,
        symbol: &Symbol,
        result: Result<Quote, FetchError>,
    ) -> Result<RefreshOutcome, WatchlistError> {
        match result {
            Ok(quote) => {
                let record = FetchResultRecord::Success {
                    price: quote.price,
                    change: quote.change,
                    percent_change: quote.percent_change,
                    fetched_at: quote.fetched_at.format_rfc3339(),
                };
                let entry = self
                    .store
                    .record_fetch_result(batch_id, symbol.as_str(), &record)?;
                Ok(RefreshOutcome {
                    symbol: symbol.as_str().to_owned(),
                    disposition: RefreshDisposition::Updated,
                    status: FetchStatus::Ok,
                    error: None,
                    entry: Some(entry_from_record(&entry)?),
                })
            }
            Err(error) => {
                let status = error.status();
                let record = FetchResultRecord::Failure {
                    status: status.as_str().to_owned(),
                };
                let entry = self
                    .store
                    .record_fetch_result(batch_id, symbol.as_str(), &record)?;
                Ok(RefreshOutcome {
                    symbol: symbol.as_str().to_owned(),
                    disposition: RefreshDisposition::Failed,
                    status,
                    error: Some(error.to_string()),
                    entry: Some(entry_from_record(&entry)?),
                })
            }
        }
    }

    /// Like [`reconcile`](Self::reconcile), except a member that vanished
    /// mid-batch becomes a distinct outcome instead of an error.
    fn reconcile_batch_member(
        &self,
        batch_id: &str,
        symbol: &Symbol,
        result: Result<Quote, FetchError>,
    ) -> Result<RefreshOutcome, WatchlistError> {
        let status = match &result {
            Ok(_) => FetchStatus::Ok,
            Err(error) => error.status(),
        };
        match self.reconcile(batch_id, symbol, result) {
            Err(WatchlistError::Store(StoreError::UnknownSymbol(_))) => Ok(RefreshOutcome {
                symbol: symbol.as_str().to_owned(),
                disposition: RefreshDisposition::RemovedMidRefresh,
                status,
                error: None,
                entry: None,
            }),
            other => other,
        }
    }
}

fn entry_from_record(record: &EntryRecord) -> Result<WatchlistEntry, WatchlistError> {
    WatchlistEntry::from_record(record).map_err(|source| WatchlistError::CorruptEntry {
        symbol: record.symbol.clone(),
        source,
    })
}

fn new_batch_id() -> String {
    Uuid::new_v4().to_string()
}
