use crate::fallback::resolve_fallback_language;
use crate::localization::{ActiveTranslator, LocalizationError, Localizer, catalog_language};
use crate::translator::{LoadOptions, Query, Translator};
use std::path::{Path, PathBuf};
use unic_langid::LanguageIdentifier;

/// Serves `{prefix}_{language}.ts` catalogs from a directory on disk.
///
/// The directory is scanned on every language change, so catalogs added or
/// updated while running are picked up by the next selection.
#[derive(Debug)]
pub struct DirectoryLocalizer {
    dir: PathBuf,
    prefix: String,
    options: LoadOptions,
    active: ActiveTranslator,
}

impl DirectoryLocalizer {
    pub fn new(dir: impl Into<PathBuf>, prefix: impl Into<String>, options: LoadOptions) -> Self {
        Self {
            dir: dir.into(),
            prefix: prefix.into(),
            options,
            active: ActiveTranslator::default(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Catalog files in the directory, sorted by language.
    pub fn discover_languages(&self) -> Result<Vec<(LanguageIdentifier, PathBuf)>, LocalizationError> {
        let mut languages = Vec::new();
        for entry in fs_err::read_dir(&self.dir)? {
            let entry = entry?;
            let file_name = entry.file_name();
            if let Some(language) = file_name
                .to_str()
                .and_then(|name| catalog_language(name, &self.prefix))
            {
                languages.push((language, entry.path()));
            }
        }

        languages.sort_by_key(|(language, _)| language.to_string());
        Ok(languages)
    }
}

impl Localizer for DirectoryLocalizer {
    fn select_language(&self, lang: &LanguageIdentifier) -> Result<(), LocalizationError> {
        if self.active.is_selected(lang) {
            return Ok(());
        }

        let discovered = self.discover_languages()?;
        let available: Vec<_> = discovered.iter().map(|(language, _)| language.clone()).collect();
        let Some((resolved, path)) = resolve_fallback_language(lang, &available)
            .and_then(|resolved| discovered.into_iter().find(|(language, _)| *language == resolved))
        else {
            return Err(LocalizationError::LanguageNotSupported(lang.clone()));
        };

        let catalog = lingo_ts::parse_file(&path).map_err(|source| LocalizationError::Catalog {
            name: path.display().to_string(),
            source,
        })?;
        let translator = Translator::new(&catalog, resolved, self.options)?;
        tracing::debug!("Serving '{}' from '{}'", lang, path.display());
        self.active.replace(lang, translator);
        Ok(())
    }

    fn translate(&self, query: &Query<'_>) -> Option<String> {
        self.active.translate(query)
    }

    fn translate_id(&self, id: &str, count: Option<i64>, args: &[&str]) -> Option<String> {
        self.active.translate_id(id, count, args)
    }
}
