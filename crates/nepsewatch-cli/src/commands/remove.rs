use nepsewatch_core::{MerolaganiSource, Symbol, Watchlist};

use crate::cli::RemoveArgs;
use crate::error::CliError;

use super::{CommandReport, RemovalRow};

pub fn run(
    watchlist: &Watchlist<MerolaganiSource>,
    args: &RemoveArgs,
) -> Result<CommandReport, CliError> {
    let mut outcomes = Vec::with_capacity(args.symbols.len());
    for raw in &args.symbols {
        let symbol = Symbol::parse(raw)?;
        let removed = watchlist.remove_symbol(symbol.as_str())?;
        outcomes.push(RemovalRow {
            symbol: symbol.as_str().to_owned(),
            removed,
        });
    }

    Ok(CommandReport::Removed { outcomes })
}
