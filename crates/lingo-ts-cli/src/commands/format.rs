//! Format command for rewriting catalogs in the canonical lupdate layout.
//!
//! Formatting is a parse followed by a write, so a formatted file differs
//! from the input only in layout and escaping.

use crate::commands::TargetArgs;
use crate::core::{CliError, FormatError, FormatReport, line_col_from_offset};
use crate::utils::{resolve_catalogs, ui};
use clap::Parser;
use std::path::{Path, PathBuf};

/// Arguments for the format command.
#[derive(Debug, Parser)]
pub struct FormatArgs {
    #[command(flatten)]
    pub target: TargetArgs,

    /// Dry run - show what would be formatted without making changes.
    #[arg(long)]
    pub dry_run: bool,
}

/// Result of formatting a single file.
#[derive(Debug)]
pub struct FormatResult {
    /// Path to the file.
    pub path: PathBuf,
    /// Whether the file was changed.
    pub changed: bool,
    /// Error if formatting failed.
    pub error: Option<String>,
}

impl FormatResult {
    fn failed(path: &Path, error: String) -> Self {
        Self {
            path: path.to_path_buf(),
            changed: false,
            error: Some(error),
        }
    }
}

/// Run the format command.
pub fn run_format(args: FormatArgs) -> Result<(), CliError> {
    let targets = resolve_catalogs(&args.target)?;

    ui::print_format_header();
    if targets.is_empty() {
        ui::print_no_catalogs_found();
        return Ok(());
    }

    let mut total_formatted = 0;
    let mut total_unchanged = 0;
    let mut errors: Vec<FormatError> = Vec::new();

    for target in &targets {
        let result = format_catalog_file(&target.path, args.dry_run);

        if let Some(error) = result.error {
            errors.push(FormatError {
                path: result.path,
                help: error,
            });
        } else if result.changed {
            total_formatted += 1;
            if args.dry_run {
                ui::print_would_format(&result.path);
            } else {
                ui::print_formatted(&result.path);
            }
        } else {
            total_unchanged += 1;
        }
    }

    if errors.is_empty() {
        if args.dry_run && total_formatted > 0 {
            ui::print_format_dry_run_summary(total_formatted);
        } else {
            ui::print_format_summary(total_formatted, total_unchanged);
        }
        Ok(())
    } else {
        Err(CliError::Format(FormatReport {
            formatted_count: total_formatted,
            error_count: errors.len(),
            errors,
        }))
    }
}

/// Formats a single catalog, printing the diff instead of writing when
/// `check_only` is set.
fn format_catalog_file(path: &Path, check_only: bool) -> FormatResult {
    let content = match fs_err::read_to_string(path) {
        Ok(c) => c,
        Err(e) => return FormatResult::failed(path, format!("Failed to read file: {}", e)),
    };

    let catalog = match lingo_ts::parse_str(&content) {
        Ok(catalog) => catalog,
        Err(e) => {
            let help = match e.position() {
                Some(offset) => {
                    let (line, col) = line_col_from_offset(&content, offset);
                    format!("{}:{}:{}: {}", path.display(), line, col, e)
                },
                None => e.to_string(),
            };
            return FormatResult::failed(path, help);
        },
    };

    let formatted = lingo_ts::write_catalog(&catalog);
    let changed = formatted != content;

    if changed {
        if check_only {
            ui::print_diff(&content, &formatted);
        } else if let Err(e) = fs_err::write(path, &formatted) {
            return FormatResult::failed(path, format!("Failed to write file: {}", e));
        }
    }

    FormatResult {
        path: path.to_path_buf(),
        changed,
        error: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_fs::TempDir;
    use assert_fs::prelude::*;

    const COMPACT: &str = r#"<TS version="2.1" language="sk"><context><name>Page</name><message><source>Back</source><translation>Späť</translation></message></context></TS>"#;

    #[test]
    fn formats_compact_catalog_once() {
        let temp = TempDir::new().unwrap();
        let file = temp.child("app_sk.ts");
        file.write_str(COMPACT).unwrap();

        let first = format_catalog_file(file.path(), false);
        assert!(first.changed);
        assert!(first.error.is_none());

        let second = format_catalog_file(file.path(), false);
        assert!(!second.changed);

        let catalog = lingo_ts::parse_file(file.path()).unwrap();
        assert_eq!(catalog, lingo_ts::parse_str(COMPACT).unwrap());
    }

    #[test]
    fn keeps_length_variants_of_plural_forms() {
        let temp = TempDir::new().unwrap();
        let file = temp.child("app_de.ts");
        file.write_str(r#"<TS version="2.1" language="de"><context><name>Page</name><message numerus="yes"><source>%n file(s)</source><translation><numerusform variants="yes"><lengthvariant>%n Datei (lang)</lengthvariant><lengthvariant>%n D.</lengthvariant></numerusform><numerusform>%n Dateien</numerusform></translation></message></context></TS>"#)
            .unwrap();

        let result = format_catalog_file(file.path(), false);
        assert!(result.changed);
        file.assert(predicates::str::contains("<lengthvariant>%n D.</lengthvariant>"));
    }

    #[test]
    fn dry_run_leaves_file_alone() {
        let temp = TempDir::new().unwrap();
        let file = temp.child("app_sk.ts");
        file.write_str(COMPACT).unwrap();

        let result = format_catalog_file(file.path(), true);
        assert!(result.changed);
        file.assert(COMPACT);
    }

    #[test]
    fn broken_catalog_reports_line_and_column() {
        let temp = TempDir::new().unwrap();
        let file = temp.child("app_sk.ts");
        file.write_str("<TS language=\"sk\">\n<context><name>Page</name>\n<oops/></context></TS>")
            .unwrap();

        let result = format_catalog_file(file.path(), false);
        let error = result.error.unwrap();
        assert!(error.contains(":3:"), "{}", error);
    }
}
