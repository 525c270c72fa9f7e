//! Stats command printing the translation progress of each catalog.

use crate::commands::TargetArgs;
use crate::core::CliError;
use crate::utils::{read_catalog, resolve_catalogs, ui};
use clap::Parser;
use lingo_ts::Statistics;

/// Arguments for the stats command.
#[derive(Debug, Parser)]
pub struct StatsArgs {
    #[command(flatten)]
    pub target: TargetArgs,
}

/// Run the stats command.
pub fn run_stats(args: StatsArgs) -> Result<(), CliError> {
    let targets = resolve_catalogs(&args.target)?;

    ui::print_stats_header();
    if targets.is_empty() {
        ui::print_no_catalogs_found();
        return Ok(());
    }

    for target in &targets {
        let loaded = read_catalog(target)?;
        ui::print_stats(&target.label, &Statistics::of(&loaded.document.catalog));
    }

    Ok(())
}
