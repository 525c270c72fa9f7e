//! Sync command for merging the template catalog into the locale catalogs.
//!
//! This is what `lupdate` does to existing `.ts` files: new source strings
//! are added as unfinished, strings gone from the sources are marked
//! vanished, and everything else keeps its translation.

use crate::commands::{LocaleProcessingArgs, ProjectArgs};
use crate::core::{CatalogTarget, CliError, InvalidLanguageError, MissingTemplateError, describe_key};
use crate::utils::{load_config, read_catalog, ui};
use anyhow::Context as _;
use clap::Parser;
use lingo_ts::{Catalog, MergeOptions, MergeOutcome, merge};
use lingo_ts_toml::{CONFIG_FILE, LingoConfig};
use std::path::Path;

/// Arguments for the sync command.
#[derive(Debug, Parser)]
pub struct SyncArgs {
    #[command(flatten)]
    pub project: ProjectArgs,

    /// Locales to sync. A locale without a catalog gets a new one.
    #[arg(short = 'l', long = "locale")]
    pub locales: Vec<String>,

    #[command(flatten)]
    pub processing: LocaleProcessingArgs,

    /// Remove messages that left the template instead of marking them vanished.
    #[arg(long)]
    pub drop_vanished: bool,
}

/// A catalog to bring up to date, which may not exist yet.
#[derive(Debug)]
struct SyncTarget {
    target: CatalogTarget,
    exists: bool,
}

/// Run the sync command.
pub fn run_sync(args: SyncArgs) -> Result<(), CliError> {
    let root = args.project.root();
    let config = load_config(&root)?;

    ui::print_sync_header();

    if args.locales.is_empty() && !args.processing.all {
        ui::print_no_locales_specified();
        return Ok(());
    }

    let template_path = config
        .template_path(&root)
        .map_err(|_| MissingTemplateError {
            config_path: root.join(CONFIG_FILE),
        })?;
    let template = read_catalog(&CatalogTarget::from_path(template_path))?
        .document
        .catalog;

    let targets = sync_targets(&config, &root, &args.locales)?;
    let options = MergeOptions {
        drop_vanished: args.drop_vanished,
    };

    let mut total_messages = 0;
    let mut touched_catalogs = 0;

    for SyncTarget { target, exists } in &targets {
        let current = if *exists {
            read_catalog(target)?.document.catalog
        } else {
            let mut catalog = Catalog::new(target.label.clone());
            catalog.source_language = template
                .source_language
                .clone()
                .or_else(|| Some(config.source_language.clone()));
            catalog
        };

        let outcome = merge(&template, &current, &options);
        if *exists && outcome.catalog == current {
            continue;
        }

        touched_catalogs += 1;
        total_messages += outcome.added.len();

        if !*exists {
            ui::print_creating(&target.label, &target.path);
        }
        if args.processing.dry_run {
            print_outcome(&target.label, &outcome, ui::print_would_sync);
        } else {
            lingo_ts::write_file(&target.path, &outcome.catalog)
                .with_context(|| format!("Failed to write {}", target.path.display()))?;
            print_outcome(&target.label, &outcome, ui::print_synced);
        }
    }

    if touched_catalogs == 0 {
        ui::print_all_in_sync();
    } else if args.processing.dry_run {
        ui::print_sync_dry_run_summary(total_messages, touched_catalogs);
    } else {
        ui::print_sync_summary(total_messages, touched_catalogs);
    }

    Ok(())
}

fn print_outcome(label: &str, outcome: &MergeOutcome, header: fn(&str, usize, usize, usize)) {
    header(
        label,
        outcome.added.len(),
        outcome.vanished.len(),
        outcome.revived.len(),
    );
    for key in &outcome.added {
        ui::print_synced_key("+", &describe_key(key));
    }
    for key in &outcome.revived {
        ui::print_synced_key("~", &describe_key(key));
    }
    for key in &outcome.vanished {
        ui::print_synced_key("-", &describe_key(key));
    }
}

/// Catalogs for the requested locales, or every catalog when none are named.
fn sync_targets(
    config: &LingoConfig,
    root: &Path,
    locales: &[String],
) -> Result<Vec<SyncTarget>, CliError> {
    let available = config
        .available_languages(root)
        .map_err(CliError::Config)?;

    let source_language = config.source_language_identifier().ok();

    if locales.is_empty() {
        return Ok(available
            .into_iter()
            .filter(|catalog| {
                let is_source = source_language.as_ref() == Some(&catalog.language);
                if is_source {
                    tracing::debug!("Skipping '{}': it is the source language", catalog.name);
                }
                !is_source
            })
            .map(|catalog| SyncTarget {
                target: CatalogTarget {
                    label: catalog.name,
                    path: catalog.path,
                },
                exists: true,
            })
            .collect());
    }

    let mut targets: Vec<SyncTarget> = Vec::new();
    for locale in locales {
        let language = lingo_ts::parse_language(locale).map_err(|_| InvalidLanguageError {
            identifier: locale.clone(),
        })?;
        if source_language.as_ref() == Some(&language) {
            tracing::warn!("Skipping '{}': it is the source language", locale);
            continue;
        }

        let target = match available.iter().find(|catalog| catalog.language == language) {
            Some(catalog) => SyncTarget {
                target: CatalogTarget {
                    label: catalog.name.clone(),
                    path: catalog.path.clone(),
                },
                exists: true,
            },
            None => {
                let name = locale.replace('-', "_");
                SyncTarget {
                    target: CatalogTarget {
                        path: config.catalog_path(root, &name),
                        label: name,
                    },
                    exists: false,
                }
            },
        };

        if !targets.iter().any(|t| t.target == target.target) {
            targets.push(target);
        }
    }
    Ok(targets)
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_fs::TempDir;
    use assert_fs::prelude::*;

    fn project() -> (TempDir, LingoConfig) {
        let temp = TempDir::new().unwrap();
        temp.child("lang/app_sk.ts")
            .write_str(r#"<TS version="2.1" language="sk"></TS>"#)
            .unwrap();
        let config = LingoConfig {
            catalogs_dir: "lang".into(),
            prefix: "app".to_string(),
            source_language: "en".to_string(),
            template: Some("lang/app_en.ts".into()),
            languages: None,
        };
        (temp, config)
    }

    #[test]
    fn new_locales_get_a_qt_file_name() {
        let (temp, config) = project();
        let targets = sync_targets(&config, temp.path(), &["sk".into(), "pt-BR".into()]).unwrap();

        assert_eq!(targets.len(), 2);
        assert!(targets[0].exists);
        assert!(!targets[1].exists);
        assert_eq!(targets[1].target.label, "pt_BR");
        assert!(targets[1].target.path.ends_with("lang/app_pt_BR.ts"));
    }

    #[test]
    fn source_language_is_never_a_target() {
        let (temp, config) = project();
        let targets = sync_targets(&config, temp.path(), &["en".into()]).unwrap();
        assert!(targets.is_empty());
    }

    #[test]
    fn source_catalog_is_skipped_when_syncing_everything() {
        let (temp, config) = project();
        temp.child("lang/app_en.ts")
            .write_str(r#"<TS version="2.1" language="en"></TS>"#)
            .unwrap();
        let config = LingoConfig {
            template: Some("tpl/app.ts".into()),
            ..config
        };

        let targets = sync_targets(&config, temp.path(), &[]).unwrap();
        let labels: Vec<_> = targets.iter().map(|t| t.target.label.as_str()).collect();
        assert_eq!(labels, vec!["sk"]);
    }
}
