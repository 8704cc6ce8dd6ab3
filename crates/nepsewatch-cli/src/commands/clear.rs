use nepsewatch_core::{MerolaganiSource, Watchlist};

use crate::cli::ClearArgs;
use crate::error::CliError;

use super::CommandReport;

pub fn run(
    watchlist: &Watchlist<MerolaganiSource>,
    args: &ClearArgs,
) -> Result<CommandReport, CliError> {
    if !args.yes {
        return Err(CliError::Usage(String::from(
            "clear removes every entry; pass --yes to confirm",
        )));
    }

    let removed = watchlist.clear()?;
    Ok(CommandReport::Cleared { removed })
}
