//! Rendering of command reports as tables or JSON.
//!
//! Table mode is for terminals: one aligned row per entry, stale prices
//! kept visible next to their failure status, `never` for entries that
//! have not been fetched yet. JSON mode serializes the report as-is.

use nepsewatch_core::{RefreshDisposition, RefreshOutcome, WatchlistEntry};

use crate::cli::OutputFormat;
use crate::commands::CommandReport;
use crate::error::CliError;

pub fn render(report: &CommandReport, format: OutputFormat, pretty: bool) -> Result<(), CliError> {
    match format {
        OutputFormat::Json => {
            let payload = if pretty {
                serde_json::to_string_pretty(report)?
            } else {
                serde_json::to_string(report)?
            };
            println!("{payload}");
        }
        OutputFormat::Table => render_table(report),
    }

    Ok(())
}

fn render_table(report: &CommandReport) {
    match report {
        CommandReport::Added { outcomes } => {
            for outcome in outcomes {
                let verdict = if outcome.created {
                    "added"
                } else {
                    "already on watchlist"
                };
                println!("{:<12} {verdict}", outcome.entry.symbol);
            }
        }
        CommandReport::Removed { outcomes } => {
            for row in outcomes {
                let verdict = if row.removed {
                    "removed"
                } else {
                    "not on watchlist"
                };
                println!("{:<12} {verdict}", row.symbol);
            }
        }
        CommandReport::View { entries } => render_entries(entries),
        CommandReport::Refreshed { batch_id, outcomes } => {
            render_refresh(batch_id.as_deref(), outcomes);
        }
        CommandReport::Cleared { removed } => {
            let noun = if *removed == 1 { "entry" } else { "entries" };
            println!("removed {removed} {noun}");
        }
        CommandReport::Log { rows } => {
            if rows.is_empty() {
                println!("no refreshes recorded");
                return;
            }
            println!(
                "{:<20} {:<12} {:<14} {:>10}  {}",
                "RECORDED AT", "SYMBOL", "STATUS", "PRICE", "BATCH"
            );
            for row in rows {
                println!(
                    "{:<20} {:<12} {:<14} {:>10}  {}",
                    row.recorded_at,
                    row.symbol,
                    row.status,
                    money(row.price),
                    row.batch_id
                );
            }
        }
    }
}

fn render_entries(entries: &[WatchlistEntry]) {
    if entries.is_empty() {
        println!("watchlist is empty");
        return;
    }

    println!(
        "{:<12} {:>10} {:>10} {:>9}  {:<20} {}",
        "SYMBOL", "PRICE", "CHANGE", "%CHANGE", "LAST FETCHED", "STATUS"
    );
    for entry in entries {
        println!(
            "{:<12} {:>10} {:>10} {:>9}  {:<20} {}",
            entry.symbol,
            money(entry.last_price),
            signed(entry.last_change),
            percent(entry.last_percent_change),
            fetched_at(entry),
            entry.last_status
        );
    }
}

fn render_refresh(batch_id: Option<&str>, outcomes: &[RefreshOutcome]) {
    if outcomes.is_empty() {
        println!("nothing to refresh");
        return;
    }

    if let Some(batch_id) = batch_id {
        println!("batch: {batch_id}");
    }
    println!(
        "{:<12} {:<14} {:>10}  {}",
        "SYMBOL", "STATUS", "PRICE", "NOTE"
    );
    for outcome in outcomes {
        let price = outcome.entry.as_ref().and_then(|entry| entry.last_price);
        let note = match outcome.disposition {
            RefreshDisposition::RemovedMidRefresh => "removed mid-refresh",
            _ => outcome.error.as_deref().unwrap_or(""),
        };
        println!(
            "{:<12} {:<14} {:>10}  {note}",
            outcome.symbol,
            outcome.status.as_str(),
            money(price)
        );
    }

    let updated = outcomes
        .iter()
        .filter(|outcome| outcome.disposition == RefreshDisposition::Updated)
        .count();
    let failed = outcomes
        .iter()
        .filter(|outcome| outcome.disposition == RefreshDisposition::Failed)
        .count();
    println!("{updated} updated, {failed} failed, {} total", outcomes.len());
}

fn money(value: Option<f64>) -> String {
    value.map_or_else(|| String::from("-"), |value| format!("{value:.2}"))
}

fn signed(value: Option<f64>) -> String {
    value.map_or_else(|| String::from("-"), |value| format!("{value:+.2}"))
}

fn percent(value: Option<f64>) -> String {
    value.map_or_else(|| String::from("-"), |value| format!("{value:+.2}%"))
}

fn fetched_at(entry: &WatchlistEntry) -> String {
    entry
        .last_fetched_at
        .as_ref()
        .map_or_else(|| String::from("never"), |ts| ts.format_rfc3339())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cell_formatting_handles_absent_values() {
        assert_eq!(money(None), "-");
        assert_eq!(money(Some(1200.0)), "1200.00");
        assert_eq!(signed(Some(15.5)), "+15.50");
        assert_eq!(signed(Some(-6.1)), "-6.10");
        assert_eq!(percent(Some(1.31)), "+1.31%");
    }
}
