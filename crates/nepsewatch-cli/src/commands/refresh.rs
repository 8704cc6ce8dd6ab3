use nepsewatch_core::{MerolaganiSource, Watchlist};

use crate::cli::RefreshArgs;
use crate::error::CliError;

use super::CommandReport;

pub async fn run(
    watchlist: &Watchlist<MerolaganiSource>,
    args: &RefreshArgs,
) -> Result<CommandReport, CliError> {
    if args.symbols.is_empty() {
        let report = watchlist.refresh_all().await?;
        return Ok(CommandReport::Refreshed {
            batch_id: Some(report.batch_id),
            outcomes: report.outcomes,
        });
    }

    let mut outcomes = Vec::with_capacity(args.symbols.len());
    for raw in &args.symbols {
        outcomes.push(watchlist.refresh_one(raw).await?);
    }
    Ok(CommandReport::Refreshed {
        batch_id: None,
        outcomes,
    })
}
