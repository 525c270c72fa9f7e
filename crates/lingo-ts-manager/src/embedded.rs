//! Catalogs compiled into the binary with `rust-embed`.

use crate::fallback::resolve_fallback_language;
use crate::localization::{
    ActiveTranslator, CatalogModule, LocalizationError, Localizer, catalog_language,
};
use crate::translator::{LoadOptions, Query, Translator};
use rust_embed::RustEmbed;
use unic_langid::LanguageIdentifier;

#[derive(Debug)]
pub struct EmbeddedModuleData {
    /// The name of the module.
    pub name: &'static str,
    /// Catalog files are named `{prefix}_{language}.ts`.
    pub prefix: &'static str,
    pub options: LoadOptions,
}

/// Serves catalogs from a `RustEmbed` folder.
#[derive(Debug)]
pub struct EmbeddedLocalizer<T: RustEmbed + Send + Sync + 'static> {
    data: &'static EmbeddedModuleData,
    active: ActiveTranslator,
    _phantom: std::marker::PhantomData<T>,
}

impl<T: RustEmbed + Send + Sync + 'static> EmbeddedLocalizer<T> {
    pub fn new(data: &'static EmbeddedModuleData) -> Self {
        Self {
            data,
            active: ActiveTranslator::default(),
            _phantom: std::marker::PhantomData,
        }
    }

    /// Languages with an embedded catalog, with the file that holds each.
    pub fn discover_languages(prefix: &str) -> Vec<(LanguageIdentifier, String)> {
        let mut languages: Vec<_> = T::iter()
            .filter_map(|path| {
                let file_name = path.rsplit('/').next().unwrap_or(&path);
                let language = catalog_language(file_name, prefix)?;
                Some((language, path.into_owned()))
            })
            .collect();

        languages.sort_by_key(|(language, _)| language.to_string());
        languages
    }

    fn load(&self, lang: &LanguageIdentifier, path: &str) -> Result<Translator, LocalizationError> {
        let file = T::get(path).ok_or_else(|| LocalizationError::LanguageNotSupported(lang.clone()))?;
        let text = std::str::from_utf8(&file.data).map_err(|_| LocalizationError::InvalidUtf8 {
            name: path.to_string(),
        })?;
        let catalog = lingo_ts::parse_str(text).map_err(|source| LocalizationError::Catalog {
            name: path.to_string(),
            source,
        })?;
        Translator::new(&catalog, lang.clone(), self.data.options)
    }
}

impl<T: RustEmbed + Send + Sync + 'static> Localizer for EmbeddedLocalizer<T> {
    fn select_language(&self, lang: &LanguageIdentifier) -> Result<(), LocalizationError> {
        if self.active.is_selected(lang) {
            return Ok(());
        }

        let discovered = Self::discover_languages(self.data.prefix);
        let available: Vec<_> = discovered.iter().map(|(language, _)| language.clone()).collect();
        let resolved = resolve_fallback_language(lang, &available)
            .ok_or_else(|| LocalizationError::LanguageNotSupported(lang.clone()))?;
        let Some((_, path)) = discovered.iter().find(|(language, _)| *language == resolved) else {
            return Err(LocalizationError::LanguageNotSupported(lang.clone()));
        };

        tracing::debug!(
            "Module '{}' serves '{}' from '{}'",
            self.data.name,
            lang,
            path
        );
        let translator = self.load(&resolved, path)?;
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

/// Registers embedded catalogs with the [`CatalogManager`](crate::CatalogManager):
///
/// ```ignore
/// #[derive(rust_embed::RustEmbed)]
/// #[folder = "lang/"]
/// struct Catalogs;
///
/// static DATA: EmbeddedModuleData = EmbeddedModuleData {
///     name: "installer",
///     prefix: "installer",
///     options: LoadOptions { include_unfinished: true },
/// };
///
/// inventory::submit! {
///     &EmbeddedCatalogModule::<Catalogs>::new(&DATA) as &dyn CatalogModule
/// }
/// ```
pub struct EmbeddedCatalogModule<T: RustEmbed + Send + Sync + 'static> {
    data: &'static EmbeddedModuleData,
    _phantom: std::marker::PhantomData<T>,
}

impl<T: RustEmbed + Send + Sync + 'static> EmbeddedCatalogModule<T> {
    pub const fn new(data: &'static EmbeddedModuleData) -> Self {
        Self {
            data,
            _phantom: std::marker::PhantomData,
        }
    }
}

impl<T: RustEmbed + Send + Sync + 'static> CatalogModule for EmbeddedCatalogModule<T> {
    fn name(&self) -> &'static str {
        self.data.name
    }

    fn create_localizer(&self) -> Box<dyn Localizer> {
        Box::new(EmbeddedLocalizer::<T>::new(self.data))
    }
}
