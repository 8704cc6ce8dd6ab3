use nepsewatch_core::{MerolaganiSource, Watchlist};

use crate::error::CliError;

use super::CommandReport;

pub fn run(watchlist: &Watchlist<MerolaganiSource>) -> Result<CommandReport, CliError> {
    let entries = watchlist.current_view()?;
    Ok(CommandReport::View { entries })
}
