use lingo_ts::{Document, MessageKey};
use std::path::PathBuf;

/// A catalog file a command works on.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CatalogTarget {
    /// The language from the file name, or the path when files are given
    /// on the command line.
    pub label: String,
    /// The path to the `.ts` file.
    pub path: PathBuf,
}

impl CatalogTarget {
    pub fn from_path(path: PathBuf) -> Self {
        Self {
            label: path.display().to_string(),
            path,
        }
    }
}

/// A parsed catalog together with the text it was read from.
#[derive(Debug)]
pub struct LoadedCatalog {
    pub target: CatalogTarget,
    /// The raw file content, kept for diagnostics.
    pub text: String,
    pub document: Document,
}

/// A message key the way reports show it: `Context: "source" (disambiguation)`.
pub fn describe_key(key: &MessageKey) -> String {
    match &key.comment {
        Some(comment) => format!("{}: {:?} ({})", key.context, key.source, comment),
        None => format!("{}: {:?}", key.context, key.source),
    }
}
