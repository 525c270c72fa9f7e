use clap::Args;
use std::path::PathBuf;

#[derive(Debug, Clone, Args)]
pub struct ProjectArgs {
    /// Path to the project root holding lingo.toml (defaults to current directory).
    #[arg(short, long)]
    pub path: Option<PathBuf>,
}

impl ProjectArgs {
    pub fn root(&self) -> PathBuf {
        self.path.clone().unwrap_or_else(|| PathBuf::from("."))
    }
}

/// Which catalogs a command works on.
///
/// Used by check, stats and fmt.
#[derive(Debug, Clone, Args)]
pub struct TargetArgs {
    #[command(flatten)]
    pub project: ProjectArgs,

    /// Catalog files to process instead of the project's catalogs.
    #[arg(conflicts_with_all = ["path", "locales"])]
    pub files: Vec<PathBuf>,

    /// Only process these locales. Can be specified multiple times.
    #[arg(short = 'l', long = "locale")]
    pub locales: Vec<String>,
}

/// Common arguments for commands that rewrite locale catalogs.
#[derive(Debug, Clone, Args)]
pub struct LocaleProcessingArgs {
    /// Process all locales.
    #[arg(long, conflicts_with = "locales")]
    pub all: bool,

    /// Dry run - show what would change without making changes.
    #[arg(long)]
    pub dry_run: bool,
}
