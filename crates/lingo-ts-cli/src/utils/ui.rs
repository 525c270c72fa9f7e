// CLI output formatting with consistent styling using indicatif and colored.
// Textual output goes through println!/eprintln!, tracing only carries library logs.

use colored::Colorize as _;
use indicatif::{ProgressBar, ProgressStyle};
use lingo_ts::Statistics;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tracing_subscriber::EnvFilter;

const PD_TICK: Duration = Duration::from_millis(100);

/// Environment variable holding the log filter, e.g. `LINGO_TS_LOG=lingo_ts=debug`.
pub const LOG_ENV: &str = "LINGO_TS_LOG";

static E2E_MODE: AtomicBool = AtomicBool::new(false);

/// Enable E2E mode for deterministic output (no colors, hidden progress bars).
pub fn set_e2e_mode(enabled: bool) {
    E2E_MODE.store(enabled, Ordering::SeqCst);
    if enabled {
        colored::control::set_override(false);
    }
}

pub fn is_e2e() -> bool {
    E2E_MODE.load(Ordering::SeqCst)
}

/// Sends library logs to stderr, filtered by [`LOG_ENV`].
pub fn init_logging() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .with_ansi(!is_e2e())
        .try_init()
        .ok();
}

pub fn create_progress_bar(len: u64, msg: &str) -> ProgressBar {
    if is_e2e() {
        return ProgressBar::hidden();
    }
    let pb = ProgressBar::new(len);
    if let Ok(style) =
        ProgressStyle::default_bar().template("{spinner:.green} {msg} [{bar:40.cyan/blue}] {pos}/{len}")
    {
        pb.set_style(style.progress_chars("#>-"));
    }
    pb.set_message(msg.to_string());
    pb.enable_steady_tick(PD_TICK);
    pb
}

pub fn print_no_catalogs_found() {
    eprintln!("{}", "No catalogs found.".red());
}

pub fn print_check_header() {
    println!("{}", "Qt Linguist Catalog Checker".dimmed());
}

pub fn print_checked(label: &str, errors: usize, warnings: usize) {
    let summary = format!("{} error(s), {} warning(s)", errors, warnings);
    let summary = if errors > 0 {
        summary.red()
    } else if warnings > 0 {
        summary.yellow()
    } else {
        summary.green()
    };
    println!("{} {}: {}", "Checked".dimmed(), label.cyan(), summary);
}

pub fn print_check_success() {
    println!("{}", "No issues found!".green());
}

pub fn print_check_warnings_only(warnings: usize) {
    println!(
        "{} {} warning(s), no errors",
        "Passed with".yellow(),
        warnings
    );
}

/// Renders a diagnostic to stderr through the installed miette hook.
pub fn print_report(report: miette::Report) {
    eprintln!("{:?}", report);
}

pub fn print_stats_header() {
    println!("{}", "Qt Linguist Catalog Statistics".dimmed());
}

pub fn print_stats(label: &str, stats: &Statistics) {
    let completion = format!("{:.1}%", stats.completion());
    let completion = if stats.unfinished == 0 {
        completion.green()
    } else {
        completion.yellow()
    };
    println!(
        "{} {} {}/{} finished, {} unfinished, {} obsolete, {} context(s)",
        label.cyan(),
        completion,
        stats.finished,
        stats.live(),
        stats.unfinished,
        stats.obsolete,
        stats.contexts
    );
}

pub fn print_format_header() {
    println!("{}", "Qt Linguist Catalog Formatter".dimmed());
}

pub fn print_would_format(path: &Path) {
    println!("{} {}", "Would format:".yellow(), path.display());
}

pub fn print_formatted(path: &Path) {
    println!("{} {}", "Formatted:".green(), path.display());
}

pub fn print_format_dry_run_summary(count: usize) {
    println!(
        "{} {} file(s) would be formatted",
        "Dry run:".yellow(),
        count
    );
}

pub fn print_format_summary(formatted: usize, unchanged: usize) {
    println!(
        "{} {} formatted, {} unchanged",
        "Done:".green(),
        formatted,
        unchanged
    );
}

pub fn print_sync_header() {
    println!("{}", "Qt Linguist Catalog Sync".dimmed());
}

pub fn print_would_sync(label: &str, added: usize, vanished: usize, revived: usize) {
    println!(
        "{} {} ({} added, {} vanished, {} revived)",
        "Would update".yellow(),
        label.cyan(),
        added,
        vanished,
        revived
    );
}

pub fn print_synced(label: &str, added: usize, vanished: usize, revived: usize) {
    println!(
        "{} {} ({} added, {} vanished, {} revived)",
        "Updated".green(),
        label.cyan(),
        added,
        vanished,
        revived
    );
}

pub fn print_creating(label: &str, path: &Path) {
    println!(
        "{} {} at {}",
        "Creating catalog for".green(),
        label.cyan(),
        path.display()
    );
}

pub fn print_synced_key(marker: &str, key: &str) {
    println!("  {} {}", marker.dimmed(), key);
}

pub fn print_all_in_sync() {
    println!("{}", "All catalogs are in sync!".green());
}

pub fn print_sync_dry_run_summary(messages: usize, catalogs: usize) {
    println!(
        "{} {} message(s) across {} catalog(s)",
        "Would sync".yellow(),
        messages,
        catalogs
    );
}

pub fn print_sync_summary(messages: usize, catalogs: usize) {
    println!(
        "{} {} message(s) synced to {} catalog(s)",
        "Done:".green(),
        messages,
        catalogs
    );
}

pub fn print_no_locales_specified() {
    println!(
        "{}",
        "No locales specified. Use --locale <LOCALE> or --all".yellow()
    );
}

pub fn print_untranslated(context: &str, source: &str) {
    eprintln!(
        "{} {} / {:?}, showing the source text",
        "No translation for".yellow(),
        context.white().bold(),
        source
    );
}

pub fn print_diff(old: &str, new: &str) {
    use similar::{ChangeTag, TextDiff};

    let diff = TextDiff::from_lines(old, new);

    for (idx, group) in diff.grouped_ops(3).iter().enumerate() {
        if idx > 0 {
            println!("{}", "  ...".dimmed());
        }
        for op in group {
            for change in diff.iter_changes(op) {
                let sign = match change.tag() {
                    ChangeTag::Delete => "-",
                    ChangeTag::Insert => "+",
                    ChangeTag::Equal => " ",
                };
                let line = format!("{} {}", sign, change);
                match change.tag() {
                    ChangeTag::Delete => print!("{}", line.red()),
                    ChangeTag::Insert => print!("{}", line.green()),
                    ChangeTag::Equal => print!("{}", line.dimmed()),
                }
            }
        }
    }
}
