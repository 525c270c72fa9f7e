#![doc = include_str!("../README.md")]

mod error;
pub mod language;
pub mod merge;
pub mod model;
pub mod parse;
pub mod placeholder;
pub mod plural;
pub mod stats;
pub mod validate;
pub mod write;

pub use error::Error;
pub use language::parse_language;
pub use merge::{MergeOptions, MergeOutcome, merge};
pub use model::{
    Catalog, Context, LineRef, Location, Message, MessageKey, Translation, TranslationStatus,
    TranslationText, TranslationUnit,
};
pub use parse::{Document, SourceMap, parse_document, parse_file, parse_str};
pub use plural::PluralRule;
pub use stats::Statistics;
pub use validate::{Issue, IssueKind, Severity, ValidateOptions, validate};
pub use write::{write_catalog, write_file};
