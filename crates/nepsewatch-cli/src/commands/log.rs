use nepsewatch_core::{MerolaganiSource, Watchlist};

use crate::cli::LogArgs;
use crate::error::CliError;

use super::CommandReport;

pub fn run(
    watchlist: &Watchlist<MerolaganiSource>,
    args: &LogArgs,
) -> Result<CommandReport, CliError> {
    let rows = watchlist.recent_log(args.limit)?;
    Ok(CommandReport::Log { rows })
}
