//! CLI error types using miette for Rust-style diagnostics.
//!
//! Catalog findings carry the file content so the report can point at the
//! offending `<message>` in the XML.

// Fields in these structs are read by miette's Diagnostic derive macro
#![allow(unused)]

use lingo_ts_toml::LingoConfigError;
use miette::{Diagnostic, NamedSource, SourceSpan};
use std::ops::Range;
use std::path::PathBuf;
use thiserror::Error;

/// Error when the lingo.toml configuration file is not found.
#[derive(Debug, Diagnostic, Error)]
#[error("lingo.toml configuration file not found")]
#[diagnostic(
    code(lingo_ts::config::not_found),
    help(
        "Create a lingo.toml file in your project root with the following content:\n\n  \
          catalogs_dir = \"lang\"\n  \
          prefix = \"app\"\n\n\
         or pass the .ts files to check directly"
    )
)]
pub struct ConfigNotFoundError {
    /// The path where the config was expected.
    pub expected_path: PathBuf,
}

/// Error when parsing the lingo.toml configuration file.
#[derive(Debug, Diagnostic, Error)]
#[error("failed to parse lingo.toml configuration")]
#[diagnostic(code(lingo_ts::config::parse_error))]
pub struct ConfigParseError {
    /// The source content of the config file.
    #[source_code]
    pub src: NamedSource<String>,

    /// The span where the error occurred.
    #[label("error occurred here")]
    pub span: Option<SourceSpan>,

    /// The underlying parse error message.
    #[help]
    pub help: String,
}

/// Error when a language identifier is invalid.
#[derive(Debug, Diagnostic, Error)]
#[error("invalid language identifier: {identifier}")]
#[diagnostic(
    code(lingo_ts::config::invalid_language),
    help("Use a Qt or BCP 47 language name (e.g., 'sk', 'pt_BR', 'sr@latin', 'zh-Hans')")
)]
pub struct InvalidLanguageError {
    /// The invalid language identifier.
    pub identifier: String,
}

/// Error when a specified locale has no catalog.
#[derive(Debug, Diagnostic, Error)]
#[error("locale '{locale}' not found")]
#[diagnostic(
    code(lingo_ts::config::locale_not_found),
    help("Available locales: {available}")
)]
pub struct LocaleNotFoundError {
    /// The locale that was specified but not found.
    pub locale: String,
    /// Comma-separated list of available locales.
    pub available: String,
}

/// Error when a catalog is not well-formed.
#[derive(Debug, Diagnostic, Error)]
#[error("failed to parse catalog {path}")]
#[diagnostic(code(lingo_ts::catalog::parse_error))]
pub struct CatalogParseError {
    pub path: PathBuf,

    #[source_code]
    pub src: NamedSource<String>,

    #[label("error occurred here")]
    pub span: Option<SourceSpan>,

    #[help]
    pub help: String,
}

/// A translation whose `%n` arguments do not match the source.
#[derive(Debug, Diagnostic, Error)]
#[error("{message}")]
#[diagnostic(code(lingo_ts::check::placeholder), severity(Error))]
pub struct PlaceholderError {
    #[source_code]
    pub src: NamedSource<String>,

    #[label("in this translation")]
    pub span: Option<SourceSpan>,

    pub message: String,

    #[help]
    pub help: String,
}

/// A plural message whose forms do not fit the catalog language.
#[derive(Debug, Diagnostic, Error)]
#[error("{message}")]
#[diagnostic(code(lingo_ts::check::numerus), severity(Error))]
pub struct NumerusError {
    #[source_code]
    pub src: NamedSource<String>,

    #[label("these forms")]
    pub span: Option<SourceSpan>,

    pub message: String,

    #[help]
    pub help: String,
}

/// A message key or id defined twice.
#[derive(Debug, Diagnostic, Error)]
#[error("{message}")]
#[diagnostic(code(lingo_ts::check::duplicate), severity(Error))]
pub struct DuplicateError {
    #[source_code]
    pub src: NamedSource<String>,

    #[label("defined again here")]
    pub span: Option<SourceSpan>,

    #[label("first defined here")]
    pub first: Option<SourceSpan>,

    pub message: String,
}

/// An unfinished translation when those are denied.
#[derive(Debug, Diagnostic, Error)]
#[error("unfinished translation of {key}")]
#[diagnostic(code(lingo_ts::check::unfinished), severity(Error))]
pub struct UnfinishedError {
    #[source_code]
    pub src: NamedSource<String>,

    #[label("marked type=\"unfinished\"")]
    pub span: Option<SourceSpan>,

    pub key: String,
}

/// An unfinished translation.
#[derive(Debug, Diagnostic, Error)]
#[error("unfinished translation of {key}")]
#[diagnostic(code(lingo_ts::check::unfinished), severity(Warning))]
pub struct UnfinishedWarning {
    #[source_code]
    pub src: NamedSource<String>,

    #[label("marked type=\"unfinished\"")]
    pub span: Option<SourceSpan>,

    pub key: String,
}

/// A translation that is suspicious but still usable.
#[derive(Debug, Diagnostic, Error)]
#[error("{message}")]
#[diagnostic(code(lingo_ts::check::content), severity(Warning))]
pub struct ContentWarning {
    #[source_code]
    pub src: NamedSource<String>,

    #[label("here")]
    pub span: Option<SourceSpan>,

    pub message: String,

    #[help]
    pub help: Option<String>,
}

/// The catalog language could not be resolved, so plural checks were skipped.
#[derive(Debug, Diagnostic, Error)]
#[error("catalog {path} has no usable language ({value})")]
#[diagnostic(
    code(lingo_ts::check::language),
    severity(Warning),
    help("Set the language attribute of <TS>, e.g. language=\"sk\"")
)]
pub struct UnknownLanguageWarning {
    pub path: PathBuf,
    pub value: String,
}

/// Aggregated validation report containing multiple issues.
#[derive(Debug, Diagnostic, Error)]
#[error("validation found {error_count} error(s) and {warning_count} warning(s)")]
#[diagnostic(code(lingo_ts::check::report))]
pub struct ValidationReport {
    /// Number of errors found.
    pub error_count: usize,

    /// Number of warnings found.
    pub warning_count: usize,

    #[related]
    pub issues: Vec<ValidationIssue>,
}

/// A validation issue (either error or warning).
#[derive(Debug, Diagnostic, Error)]
pub enum ValidationIssue {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Placeholder(#[from] PlaceholderError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Numerus(#[from] NumerusError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Duplicate(#[from] DuplicateError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Unfinished(#[from] UnfinishedError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    UnfinishedWarning(#[from] UnfinishedWarning),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Content(#[from] ContentWarning),

    #[error(transparent)]
    #[diagnostic(transparent)]
    UnknownLanguage(#[from] UnknownLanguageWarning),
}

impl ValidationIssue {
    pub fn is_error(&self) -> bool {
        matches!(
            self,
            ValidationIssue::Placeholder(_)
                | ValidationIssue::Numerus(_)
                | ValidationIssue::Duplicate(_)
                | ValidationIssue::Unfinished(_)
        )
    }
}

/// Error when formatting fails for a catalog.
#[derive(Debug, Diagnostic, Error)]
#[error("failed to format {path}")]
#[diagnostic(code(lingo_ts::format::failed))]
pub struct FormatError {
    /// The path to the file.
    pub path: PathBuf,

    /// The underlying error.
    #[help]
    pub help: String,
}

/// Report for format command results.
#[derive(Debug, Diagnostic, Error)]
#[error("formatted {formatted_count} file(s), {error_count} error(s)")]
#[diagnostic(code(lingo_ts::format::report))]
pub struct FormatReport {
    /// Number of files formatted.
    pub formatted_count: usize,

    /// Number of errors.
    pub error_count: usize,

    #[related]
    pub errors: Vec<FormatError>,
}

/// Error when `sync` runs without a template catalog.
#[derive(Debug, Diagnostic, Error)]
#[error("no template catalog configured")]
#[diagnostic(
    code(lingo_ts::sync::no_template),
    help("Point `template` in lingo.toml at the catalog lupdate extracts, e.g. template = \"lang/app_en.ts\"")
)]
pub struct MissingTemplateError {
    pub config_path: PathBuf,
}

#[derive(Debug, Diagnostic, Error)]
pub enum CliError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    ConfigNotFound(#[from] ConfigNotFoundError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    ConfigParse(#[from] ConfigParseError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    InvalidLanguage(#[from] InvalidLanguageError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    LocaleNotFound(#[from] LocaleNotFoundError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    CatalogParse(#[from] CatalogParseError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    MissingTemplate(#[from] MissingTemplateError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Validation(#[from] ValidationReport),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Format(#[from] FormatReport),

    #[error("{0}")]
    #[diagnostic(code(lingo_ts::config))]
    Config(LingoConfigError),

    #[error("{0}")]
    #[diagnostic(code(lingo_ts::lookup))]
    Localization(#[from] lingo_ts_manager::LocalizationError),

    #[error("IO error: {0}")]
    #[diagnostic(code(lingo_ts::io))]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    #[diagnostic(code(lingo_ts::other))]
    Other(String),
}

impl From<anyhow::Error> for CliError {
    fn from(err: anyhow::Error) -> Self {
        CliError::Other(err.to_string())
    }
}

/// A byte range of the parsed text as a miette span.
pub fn span_from_range(range: &Range<usize>) -> SourceSpan {
    SourceSpan::new(range.start.into(), range.end.saturating_sub(range.start))
}

/// Calculate line and column from byte offset in source text.
pub fn line_col_from_offset(source: &str, offset: usize) -> (usize, usize) {
    let mut current_offset = 0;
    for (i, line) in source.lines().enumerate() {
        let line_len = line.len() + 1;
        if current_offset + line_len > offset {
            let col = offset - current_offset + 1;
            return (i + 1, col);
        }
        current_offset += line_len;
    }
    (source.lines().count().max(1), 1)
}
