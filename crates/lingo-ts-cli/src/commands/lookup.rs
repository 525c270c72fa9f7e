//! Lookup command resolving one message against the project's catalogs.

use crate::commands::ProjectArgs;
use crate::core::{CliError, InvalidLanguageError};
use crate::utils::{load_config, ui};
use clap::Parser;
use lingo_ts_manager::{DirectoryLocalizer, LoadOptions, LocalizationError, Localizer as _, Query};

/// Arguments for the lookup command.
#[derive(Debug, Parser)]
pub struct LookupArgs {
    #[command(flatten)]
    pub project: ProjectArgs,

    /// Language to translate into.
    #[arg(short = 'l', long = "locale")]
    pub locale: String,

    /// Context (usually the class name) of the message.
    #[arg(short, long)]
    pub context: String,

    /// The source text, exactly as written in the code.
    pub source: String,

    /// Disambiguation comment of the message.
    #[arg(short, long)]
    pub disambiguation: Option<String>,

    /// Count selecting the plural form and replacing %n.
    #[arg(short = 'n', long, allow_negative_numbers = true)]
    pub count: Option<i64>,

    /// Values for %1, %2, ... in order.
    #[arg(short, long = "arg")]
    pub args: Vec<String>,

    /// Ignore translations still marked unfinished.
    #[arg(long)]
    pub finished_only: bool,
}

/// Run the lookup command.
pub fn run_lookup(args: LookupArgs) -> Result<(), CliError> {
    let root = args.project.root();
    let config = load_config(&root)?;

    let language = lingo_ts::parse_language(&args.locale).map_err(|_| InvalidLanguageError {
        identifier: args.locale.clone(),
    })?;

    let localizer = DirectoryLocalizer::new(
        config.catalogs_dir_from_base(&root),
        config.prefix.clone(),
        LoadOptions {
            include_unfinished: !args.finished_only,
        },
    );
    match localizer.select_language(&language) {
        Ok(()) => {},
        Err(LocalizationError::LanguageNotSupported(language)) => {
            tracing::warn!("No catalog for '{}'", language);
        },
        Err(e) => return Err(e.into()),
    }

    let values: Vec<&str> = args.args.iter().map(String::as_str).collect();
    let mut query = Query::new(&args.context, &args.source).args(&values);
    if let Some(disambiguation) = &args.disambiguation {
        query = query.disambiguation(disambiguation);
    }
    if let Some(count) = args.count {
        query = query.count(count);
    }

    let text = localizer.translate(&query).unwrap_or_else(|| {
        ui::print_untranslated(&args.context, &args.source);
        query.format_source()
    });
    println!("{}", text);

    Ok(())
}
