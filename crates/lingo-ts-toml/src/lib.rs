#![doc = include_str!("../README.md")]

use serde::{Deserialize, Serialize};
use std::path::{Component, Path, PathBuf};
use thiserror::Error;
use unic_langid::LanguageIdentifier;

/// Name of the project file.
pub const CONFIG_FILE: &str = "lingo.toml";

#[derive(Debug, Error)]
pub enum LingoConfigError {
    /// Configuration file not found.
    #[error("{} not found at '{}'", CONFIG_FILE, path.display())]
    NotFound { path: PathBuf },
    /// Failed to read the configuration file or the catalogs directory.
    #[error("Failed to read configuration: {0}")]
    ReadError(#[from] std::io::Error),
    /// Failed to parse the configuration file.
    #[error("Failed to parse configuration file: {0}")]
    ParseError(#[from] toml::de::Error),
    /// A language in the configuration or a catalog file name is not valid.
    #[error("Invalid language identifier '{name}'")]
    InvalidLanguageIdentifier {
        name: String,
        #[source]
        source: lingo_ts::Error,
    },
    /// `sync` needs a template but none is configured.
    #[error("no template catalog configured in {}", CONFIG_FILE)]
    MissingTemplate,
}

/// The configuration of a project's catalogs.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct LingoConfig {
    /// Directory holding the `.ts` files, relative to the project root.
    pub catalogs_dir: PathBuf,
    /// File name prefix: catalogs are named `{prefix}_{language}.ts`.
    pub prefix: String,
    /// Language the source strings are written in.
    #[serde(default = "default_source_language")]
    pub source_language: String,
    /// Catalog extracted from the sources, relative to the project root.
    #[serde(default)]
    pub template: Option<PathBuf>,
    /// Restricts the languages the tools work on.
    ///
    /// ```toml
    /// languages = ["sk", "pt_BR"]
    /// ```
    #[serde(default)]
    pub languages: Option<Vec<String>>,
}

fn default_source_language() -> String {
    "en".to_string()
}

/// A catalog file found in the catalogs directory.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CatalogFile {
    pub language: LanguageIdentifier,
    /// The language as spelled in the file name.
    pub name: String,
    pub path: PathBuf,
}

impl LingoConfig {
    /// Reads the configuration from a path.
    pub fn read_from_path<P: AsRef<Path>>(path: P) -> Result<Self, LingoConfigError> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(LingoConfigError::NotFound {
                path: path.to_path_buf(),
            });
        }

        let content = fs_err::read_to_string(path)?;
        let config: LingoConfig = toml::from_str(&content)?;

        Ok(config)
    }

    /// Reads `lingo.toml` from a project root.
    pub fn from_dir(project_dir: &Path) -> Result<Self, LingoConfigError> {
        Self::read_from_path(project_dir.join(CONFIG_FILE))
    }

    /// The catalogs directory resolved against a project root.
    pub fn catalogs_dir_from_base(&self, base_dir: &Path) -> PathBuf {
        base_dir.join(&self.catalogs_dir)
    }

    /// File name of the catalog for a language spelled the Qt way.
    pub fn catalog_file_name(&self, language: &str) -> String {
        format!("{}_{}.ts", self.prefix, language)
    }

    pub fn catalog_path(&self, base_dir: &Path, language: &str) -> PathBuf {
        self.catalogs_dir_from_base(base_dir)
            .join(self.catalog_file_name(language))
    }

    /// The template catalog resolved against a project root.
    pub fn template_path(&self, base_dir: &Path) -> Result<PathBuf, LingoConfigError> {
        self.template
            .as_ref()
            .map(|template| base_dir.join(template))
            .ok_or(LingoConfigError::MissingTemplate)
    }

    pub fn source_language_identifier(&self) -> Result<LanguageIdentifier, LingoConfigError> {
        parse_name(&self.source_language)
    }

    /// Identifiers of the configured language whitelist, if any.
    pub fn language_filter(&self) -> Result<Option<Vec<LanguageIdentifier>>, LingoConfigError> {
        self.languages
            .as_ref()
            .map(|names| names.iter().map(|name| parse_name(name)).collect())
            .transpose()
    }

    /// Catalog files in the catalogs directory, sorted by language.
    ///
    /// The template and files outside the language whitelist are skipped.
    pub fn available_languages(
        &self,
        base_dir: &Path,
    ) -> Result<Vec<CatalogFile>, LingoConfigError> {
        let catalogs_dir = self.catalogs_dir_from_base(base_dir);
        let template = self
            .template
            .as_ref()
            .map(|template| normalize(&base_dir.join(template)));
        let filter = self.language_filter()?;
        let file_prefix = format!("{}_", self.prefix);

        let mut catalogs = Vec::new();
        for entry in fs_err::read_dir(&catalogs_dir)? {
            let entry = entry?;
            if !entry.file_type()?.is_file() {
                continue;
            }
            let path = entry.path();
            if template.as_ref() == Some(&normalize(&path)) {
                continue;
            }

            let file_name = entry.file_name();
            let Some(name) = file_name
                .to_str()
                .and_then(|name| name.strip_prefix(&file_prefix))
                .and_then(|name| name.strip_suffix(".ts"))
            else {
                tracing::debug!("Skipping '{}'", path.display());
                continue;
            };

            let language = parse_name(name)?;
            if let Some(filter) = &filter
                && !filter.contains(&language)
            {
                continue;
            }

            catalogs.push(CatalogFile {
                language,
                name: name.to_string(),
                path,
            });
        }

        catalogs.sort_by_key(|catalog| catalog.language.to_string());
        Ok(catalogs)
    }
}

/// Drops `.` and folds `..` into its parent without touching the disk.
fn normalize(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {},
            Component::ParentDir
                if matches!(normalized.components().next_back(), Some(Component::Normal(_))) =>
            {
                normalized.pop();
            },
            other => normalized.push(other),
        }
    }
    normalized
}

fn parse_name(name: &str) -> Result<LanguageIdentifier, LingoConfigError> {
    lingo_ts::parse_language(name).map_err(|source| LingoConfigError::InvalidLanguageIdentifier {
        name: name.to_string(),
        source,
    })
}
