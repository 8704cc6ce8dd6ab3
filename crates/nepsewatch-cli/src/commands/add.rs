use nepsewatch_core::{MerolaganiSource, Watchlist};

use crate::cli::AddArgs;
use crate::error::CliError;

use super::CommandReport;

pub fn run(
    watchlist: &Watchlist<MerolaganiSource>,
    args: &AddArgs,
) -> Result<CommandReport, CliError> {
    let outcomes = args
        .symbols
        .iter()
        .map(|raw| watchlist.add_symbol(raw))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(CommandReport::Added { outcomes })
}
