use crate::commands::TargetArgs;
use crate::core::{
    CatalogParseError, CatalogTarget, CliError, ConfigNotFoundError, ConfigParseError,
    InvalidLanguageError, LoadedCatalog, LocaleNotFoundError, span_from_range,
};
use lingo_ts_toml::{CONFIG_FILE, LingoConfig, LingoConfigError};
use miette::{NamedSource, SourceSpan};
use std::path::Path;

/// Reads `lingo.toml` from a project root, turning failures into diagnostics.
pub fn load_config(root: &Path) -> Result<LingoConfig, CliError> {
    let path = root.join(CONFIG_FILE);
    match LingoConfig::read_from_path(&path) {
        Ok(config) => Ok(config),
        Err(LingoConfigError::NotFound { path }) => Err(ConfigNotFoundError {
            expected_path: path,
        }
        .into()),
        Err(LingoConfigError::ParseError(e)) => {
            let content = fs_err::read_to_string(&path)?;
            Err(ConfigParseError {
                src: NamedSource::new(path.display().to_string(), content),
                span: e.span().map(|range| span_from_range(&range)),
                help: e.message().to_string(),
            }
            .into())
        },
        Err(LingoConfigError::InvalidLanguageIdentifier { name, .. }) => {
            Err(InvalidLanguageError { identifier: name }.into())
        },
        Err(e) => Err(CliError::Config(e)),
    }
}

/// The catalogs a command should work on.
///
/// Explicit files win. Otherwise the project's catalogs are listed from
/// `lingo.toml`, narrowed to the requested locales.
pub fn resolve_catalogs(args: &TargetArgs) -> Result<Vec<CatalogTarget>, CliError> {
    if !args.files.is_empty() {
        return Ok(args
            .files
            .iter()
            .cloned()
            .map(CatalogTarget::from_path)
            .collect());
    }

    let root = args.project.root();
    let config = load_config(&root)?;
    let catalogs = config.available_languages(&root).map_err(|e| match e {
        LingoConfigError::InvalidLanguageIdentifier { name, .. } => {
            CliError::from(InvalidLanguageError { identifier: name })
        },
        e => CliError::Config(e),
    })?;
    tracing::debug!(
        "Found {} catalog(s) in '{}'",
        catalogs.len(),
        config.catalogs_dir_from_base(&root).display()
    );

    if args.locales.is_empty() {
        return Ok(catalogs
            .into_iter()
            .map(|catalog| CatalogTarget {
                label: catalog.name,
                path: catalog.path,
            })
            .collect());
    }

    let mut targets = Vec::new();
    for locale in &args.locales {
        let language = lingo_ts::parse_language(locale).map_err(|_| InvalidLanguageError {
            identifier: locale.clone(),
        })?;
        let Some(catalog) = catalogs.iter().find(|catalog| catalog.language == language) else {
            return Err(LocaleNotFoundError {
                locale: locale.clone(),
                available: available_names(&catalogs),
            }
            .into());
        };
        let target = CatalogTarget {
            label: catalog.name.clone(),
            path: catalog.path.clone(),
        };
        if !targets.contains(&target) {
            targets.push(target);
        }
    }
    Ok(targets)
}

fn available_names(catalogs: &[lingo_ts_toml::CatalogFile]) -> String {
    if catalogs.is_empty() {
        "none".to_string()
    } else {
        catalogs
            .iter()
            .map(|catalog| catalog.name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Reads and parses a catalog, keeping the text for diagnostics.
pub fn read_catalog(target: &CatalogTarget) -> Result<LoadedCatalog, CliError> {
    let text = fs_err::read_to_string(&target.path)?;
    match lingo_ts::parse_document(&text) {
        Ok(document) => Ok(LoadedCatalog {
            target: target.clone(),
            text,
            document,
        }),
        Err(e) => Err(CatalogParseError {
            path: target.path.clone(),
            span: e.position().map(|offset| SourceSpan::new(offset.into(), 0)),
            help: e.to_string(),
            src: NamedSource::new(target.path.display().to_string(), text),
        }
        .into()),
    }
}
