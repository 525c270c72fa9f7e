use crate::translator::{Query, Translator};
use parking_lot::RwLock;
use std::sync::Arc;
use thiserror::Error;
use unic_langid::LanguageIdentifier;

#[derive(Debug, Error)]
pub enum LocalizationError {
    #[error("Language '{0}' is not supported by this module")]
    LanguageNotSupported(LanguageIdentifier),
    #[error("Catalog '{name}' is not valid UTF-8")]
    InvalidUtf8 { name: String },
    #[error("Failed to load catalog '{name}': {source}")]
    Catalog {
        name: String,
        #[source]
        source: lingo_ts::Error,
    },
    #[error(transparent)]
    Lingo(#[from] lingo_ts::Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub trait Localizer: Send + Sync {
    fn select_language(&self, lang: &LanguageIdentifier) -> Result<(), LocalizationError>;
    fn translate(&self, query: &Query<'_>) -> Option<String>;
    fn translate_id(&self, id: &str, count: Option<i64>, args: &[&str]) -> Option<String>;
}

/// A source of catalogs that registers itself with `inventory::submit!`.
pub trait CatalogModule: Send + Sync {
    fn name(&self) -> &'static str;
    fn create_localizer(&self) -> Box<dyn Localizer>;
}

inventory::collect!(&'static dyn CatalogModule);

/// The translator a localizer currently serves from.
#[derive(Debug, Default)]
pub(crate) struct ActiveTranslator {
    current: RwLock<Option<(LanguageIdentifier, Arc<Translator>)>>,
}

impl ActiveTranslator {
    pub(crate) fn is_selected(&self, lang: &LanguageIdentifier) -> bool {
        self.current
            .read()
            .as_ref()
            .is_some_and(|(selected, _)| selected == lang)
    }

    pub(crate) fn replace(&self, lang: &LanguageIdentifier, translator: Translator) {
        *self.current.write() = Some((lang.clone(), Arc::new(translator)));
    }

    fn translator(&self) -> Option<Arc<Translator>> {
        self.current
            .read()
            .as_ref()
            .map(|(_, translator)| Arc::clone(translator))
    }

    pub(crate) fn translate(&self, query: &Query<'_>) -> Option<String> {
        self.translator()?.translate(query)
    }

    pub(crate) fn translate_id(&self, id: &str, count: Option<i64>, args: &[&str]) -> Option<String> {
        self.translator()?.translate_id(id, count, args)
    }
}

/// Language of a `{prefix}_{language}.ts` file name.
pub fn catalog_language(file_name: &str, prefix: &str) -> Option<LanguageIdentifier> {
    let name = file_name
        .strip_prefix(prefix)?
        .strip_prefix('_')?
        .strip_suffix(".ts")?;
    lingo_ts::parse_language(name).ok()
}

/// Asks its localizers in order. Clones share the localizers, and with them
/// the selected language.
#[derive(Clone, Default)]
pub struct CatalogManager {
    localizers: Vec<Arc<dyn Localizer>>,
}

impl CatalogManager {
    pub fn new_with_discovered_modules() -> Self {
        let mut manager = Self::default();
        for module in inventory::iter::<&'static dyn CatalogModule>() {
            tracing::info!("Discovered and loading catalog module: {}", module.name());
            manager.localizers.push(Arc::from(module.create_localizer()));
        }
        manager
    }

    pub fn with_localizer(mut self, localizer: Box<dyn Localizer>) -> Self {
        self.localizers.push(Arc::from(localizer));
        self
    }

    /// Selects a language in every localizer. Returns how many accepted it.
    pub fn select_language(&mut self, lang: &LanguageIdentifier) -> usize {
        let mut accepted = 0;
        for localizer in &self.localizers {
            match localizer.select_language(lang) {
                Ok(()) => accepted += 1,
                Err(e) => tracing::warn!("Module failed to set language '{}': {}", lang, e),
            }
        }
        accepted
    }

    /// The first translation any localizer has for the query.
    pub fn translate(&self, query: &Query<'_>) -> Option<String> {
        self.localizers
            .iter()
            .find_map(|localizer| localizer.translate(query))
    }

    pub fn translate_id(&self, id: &str, count: Option<i64>, args: &[&str]) -> Option<String> {
        self.localizers
            .iter()
            .find_map(|localizer| localizer.translate_id(id, count, args))
    }

    /// Like [`translate`](Self::translate), falling back to the source text
    /// the way Qt's `tr()` does.
    pub fn tr(&self, query: &Query<'_>) -> String {
        self.translate(query).unwrap_or_else(|| {
            tracing::debug!("No translation for {} / {:?}", query.context, query.source);
            query.format_source()
        })
    }
}
