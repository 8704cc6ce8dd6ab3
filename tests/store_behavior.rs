//! Behavior-driven tests for watchlist persistence
//!
//! These tests verify WHAT survives a process restart: the view a reopened
//! store serves must be indistinguishable from the one the last process saw,
//! down to the timestamp strings.

use nepsewatch_core::FetchResultRecord;
use nepsewatch_tests::open_store;
use tempfile::tempdir;

// =============================================================================
// Persistence: Restart Fidelity
// =============================================================================

#[test]
fn a_reopened_store_reproduces_the_exact_view() {
    // Given: a store holding a fetched entry, a failed entry, and a new one
    let temp = tempdir().expect("tempdir");
    let before = {
        let store = open_store(&temp);
        store
            .upsert_entry("NABIL", "2026-02-20T09:00:00Z")
            .expect("add NABIL");
        store
            .upsert_entry("NGPL", "2026-02-20T09:00:01Z")
            .expect("add NGPL");
        store
            .upsert_entry("HRL", "2026-02-20T09:00:02Z")
            .expect("add HRL");
        store
            .record_fetch_result(
                "batch-1",
                "NABIL",
                &FetchResultRecord::Success {
                    price: 1200.0,
                    change: 15.5,
                    percent_change: 1.31,
                    fetched_at: "2026-02-20T10:00:05Z".to_string(),
                },
            )
            .expect("record success");
        store
            .record_fetch_result(
                "batch-1",
                "NGPL",
                &FetchResultRecord::Failure {
                    status: "timeout".to_string(),
                },
            )
            .expect("record failure");
        store.list_entries().expect("view before restart")
    };

    // When: the store is dropped and reopened on the same file
    let store = open_store(&temp);
    let after = store.list_entries().expect("view after restart");

    // Then: every field reads back identically, timestamps included
    assert_eq!(before, after);
    assert_eq!(
        after[0].last_fetched_at.as_deref(),
        Some("2026-02-20T10:00:05Z")
    );
    assert_eq!(after[1].last_status, "timeout");
    assert_eq!(after[2].last_status, "never-fetched");
}

#[test]
fn insertion_order_survives_churn_and_restart() {
    // Given: three entries where the middle one was removed and re-added
    let temp = tempdir().expect("tempdir");
    {
        let store = open_store(&temp);
        for symbol in ["NGPL", "RADHI", "HRL"] {
            store
                .upsert_entry(symbol, "2026-02-20T09:00:00Z")
                .expect("add");
        }
        store.remove_entry("RADHI").expect("remove");
        store
            .upsert_entry("RADHI", "2026-02-20T11:00:00Z")
            .expect("re-add");
    }

    // When: the store is reopened
    let store = open_store(&temp);
    let symbols: Vec<String> = store
        .list_entries()
        .expect("view")
        .into_iter()
        .map(|entry| entry.symbol)
        .collect();

    // Then: re-adding placed RADHI last, and the restart kept it there
    assert_eq!(symbols, ["NGPL", "HRL", "RADHI"]);
}

#[test]
fn a_stale_quote_stays_visible_across_restarts() {
    // Given: a successful fetch followed by a failed one
    let temp = tempdir().expect("tempdir");
    {
        let store = open_store(&temp);
        store
            .upsert_entry("NABIL", "2026-02-20T09:00:00Z")
            .expect("add");
        store
            .record_fetch_result(
                "batch-1",
                "NABIL",
                &FetchResultRecord::Success {
                    price: 1200.0,
                    change: 15.5,
                    percent_change: 1.31,
                    fetched_at: "2026-02-20T10:00:05Z".to_string(),
                },
            )
            .expect("record success");
        store
            .record_fetch_result(
                "batch-2",
                "NABIL",
                &FetchResultRecord::Failure {
                    status: "network-error".to_string(),
                },
            )
            .expect("record failure");
    }

    // When: the store is reopened
    let store = open_store(&temp);
    let entry = store
        .get_entry("NABIL")
        .expect("lookup")
        .expect("NABIL present");

    // Then: the last good quote is still there under the failure status
    assert_eq!(entry.last_price, Some(1200.0));
    assert_eq!(entry.last_change, Some(15.5));
    assert_eq!(
        entry.last_fetched_at.as_deref(),
        Some("2026-02-20T10:00:05Z")
    );
    assert_eq!(entry.last_status, "network-error");
}

// =============================================================================
// Persistence: Clear and the Audit Trail
// =============================================================================

#[test]
fn the_audit_log_outlives_clear_and_restart() {
    // Given: a recorded refresh, then the whole list cleared
    let temp = tempdir().expect("tempdir");
    {
        let store = open_store(&temp);
        store
            .upsert_entry("NABIL", "2026-02-20T09:00:00Z")
            .expect("add");
        store
            .record_fetch_result(
                "batch-1",
                "NABIL",
                &FetchResultRecord::Failure {
                    status: "timeout".to_string(),
                },
            )
            .expect("record");
        assert_eq!(store.clear().expect("clear"), 1);
    }

    // When: the store is reopened
    let store = open_store(&temp);

    // Then: the entries are gone but the audit rows are not
    assert!(store.list_entries().expect("view").is_empty());
    let log = store.recent_log(10).expect("log");
    assert_eq!(log.len(), 1);
    assert_eq!(log[0].symbol, "NABIL");
    assert_eq!(log[0].status, "timeout");
    assert_eq!(log[0].batch_id, "batch-1");
}

#[test]
fn re_adding_after_clear_starts_from_scratch() {
    // Given: a symbol with fetch history that was cleared away
    let temp = tempdir().expect("tempdir");
    let store = open_store(&temp);
    store
        .upsert_entry("NABIL", "2026-02-20T09:00:00Z")
        .expect("add");
    store
        .record_fetch_result(
            "batch-1",
            "NABIL",
            &FetchResultRecord::Success {
                price: 1200.0,
                change: 15.5,
                percent_change: 1.31,
                fetched_at: "2026-02-20T10:00:05Z".to_string(),
            },
        )
        .expect("record");
    store.clear().expect("clear");

    // When: the same symbol is added again
    let outcome = store
        .upsert_entry("NABIL", "2026-02-21T09:00:00Z")
        .expect("re-add");

    // Then: the row is brand new, with no trace of the old quote
    assert!(outcome.created);
    assert_eq!(outcome.entry.added_at, "2026-02-21T09:00:00Z");
    assert_eq!(outcome.entry.last_price, None);
    assert_eq!(outcome.entry.last_fetched_at, None);
    assert_eq!(outcome.entry.last_status, "never-fetched");
}
