use clap::{Parser, Subcommand};
use lingo_ts_cli::commands::{
    CheckArgs, FormatArgs, LookupArgs, StatsArgs, SyncArgs, run_check, run_format, run_lookup,
    run_stats, run_sync,
};
use lingo_ts_cli::utils::ui;
use miette::Result as MietteResult;

#[derive(Parser)]
#[command(name = "lingo-ts")]
#[command(about = "Tooling for Qt Linguist .ts translation catalogs")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Deterministic output for end-to-end tests.
    #[arg(long, global = true, hide = true)]
    e2e: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Audit catalogs for placeholder, plural and duplicate problems
    Check(CheckArgs),

    /// Show translation progress per catalog
    Stats(StatsArgs),

    /// Rewrite catalogs in the canonical lupdate layout
    Fmt(FormatArgs),

    /// Merge the template catalog into the locale catalogs
    Sync(SyncArgs),

    /// Translate one message the way the application would
    Lookup(LookupArgs),
}

fn main() -> MietteResult<()> {
    let cli = Cli::parse();

    ui::set_e2e_mode(cli.e2e);
    let fancy = !cli.e2e;
    miette::set_hook(Box::new(move |_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(fancy)
                .unicode(fancy)
                .context_lines(2)
                .tab_width(4)
                .color(fancy)
                .build(),
        )
    }))
    .ok();

    ui::init_logging();

    let result = match cli.command {
        Commands::Check(args) => run_check(args),
        Commands::Stats(args) => run_stats(args),
        Commands::Fmt(args) => run_format(args),
        Commands::Sync(args) => run_sync(args),
        Commands::Lookup(args) => run_lookup(args),
    };

    result.map_err(miette::Report::new)
}
