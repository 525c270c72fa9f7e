//! Key-based lookup over one parsed catalog.

use crate::localization::LocalizationError;
use lingo_ts::placeholder::substitute;
use lingo_ts::{Catalog, Message, MessageKey, PluralRule, TranslationStatus};
use rustc_hash::FxHashMap;
use unic_langid::LanguageIdentifier;

#[derive(Clone, Copy, Debug)]
pub struct LoadOptions {
    /// Serve translations still marked unfinished, as `lrelease` does by
    /// default.
    pub include_unfinished: bool,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            include_unfinished: true,
        }
    }
}

/// What to translate: the message key plus the values to substitute.
#[derive(Clone, Copy, Debug, Default)]
pub struct Query<'a> {
    pub context: &'a str,
    pub source: &'a str,
    pub disambiguation: Option<&'a str>,
    /// Selects the plural form and replaces `%n`.
    pub count: Option<i64>,
    /// Replace `%1`, `%2`, ...
    pub args: &'a [&'a str],
}

impl<'a> Query<'a> {
    pub fn new(context: &'a str, source: &'a str) -> Self {
        Self {
            context,
            source,
            ..Self::default()
        }
    }

    pub fn disambiguation(mut self, disambiguation: &'a str) -> Self {
        self.disambiguation = Some(disambiguation);
        self
    }

    pub fn count(mut self, count: i64) -> Self {
        self.count = Some(count);
        self
    }

    pub fn args(mut self, args: &'a [&'a str]) -> Self {
        self.args = args;
        self
    }

    /// The source text with arguments substituted, shown when no
    /// translation exists.
    pub fn format_source(&self) -> String {
        substitute(self.source, self.args, self.count)
    }
}

/// Forms of one servable message.
#[derive(Clone, Debug)]
struct Entry {
    numerus: bool,
    forms: Vec<String>,
}

/// An immutable lookup table built from a catalog.
#[derive(Debug)]
pub struct Translator {
    language: LanguageIdentifier,
    plural: PluralRule,
    messages: FxHashMap<MessageKey, Entry>,
    ids: FxHashMap<String, Entry>,
}

impl Translator {
    pub fn new(
        catalog: &Catalog,
        language: LanguageIdentifier,
        options: LoadOptions,
    ) -> Result<Self, LocalizationError> {
        let plural = PluralRule::for_language(&language)?;
        let mut messages = FxHashMap::default();
        let mut ids = FxHashMap::default();
        let mut skipped = 0usize;

        for unit in catalog.units() {
            let Some(entry) = servable(unit.message, options) else {
                skipped += 1;
                continue;
            };
            if let Some(id) = unit.message.id.as_ref().filter(|id| !id.is_empty()) {
                ids.entry(id.clone()).or_insert_with(|| entry.clone());
            }
            messages.entry(unit.key()).or_insert(entry);
        }

        tracing::debug!(
            "Loaded {} message(s) for '{}', skipped {}",
            messages.len(),
            language,
            skipped
        );

        Ok(Self {
            language,
            plural,
            messages,
            ids,
        })
    }

    /// Builds a translator for the language the catalog declares.
    pub fn from_catalog(catalog: &Catalog, options: LoadOptions) -> Result<Self, LocalizationError> {
        let language = catalog.language_identifier()?;
        Self::new(catalog, language, options)
    }

    pub fn language(&self) -> &LanguageIdentifier {
        &self.language
    }

    /// Number of messages that can be served.
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Looks up a message and formats it.
    ///
    /// A disambiguated lookup that misses is retried without the
    /// disambiguation.
    pub fn translate(&self, query: &Query<'_>) -> Option<String> {
        let mut key = MessageKey {
            context: query.context.to_string(),
            source: query.source.to_string(),
            comment: query.disambiguation.filter(|d| !d.is_empty()).map(str::to_string),
        };

        let entry = match self.messages.get(&key) {
            Some(entry) => entry,
            None if key.comment.is_some() => {
                key.comment = None;
                self.messages.get(&key)?
            },
            None => return None,
        };

        self.format(entry, query.count, query.args)
    }

    /// Looks up a message by its `id` attribute.
    pub fn translate_id(&self, id: &str, count: Option<i64>, args: &[&str]) -> Option<String> {
        self.format(self.ids.get(id)?, count, args)
    }

    fn format(&self, entry: &Entry, count: Option<i64>, args: &[&str]) -> Option<String> {
        let index = match (entry.numerus, count) {
            (true, Some(n)) => self
                .plural
                .form_index(n.unsigned_abs())
                .min(entry.forms.len().saturating_sub(1)),
            _ => 0,
        };
        let form = entry.forms.get(index).filter(|form| !form.is_empty())?;
        Some(substitute(form, args, count))
    }
}

fn servable(message: &Message, options: LoadOptions) -> Option<Entry> {
    match message.translation.status {
        TranslationStatus::Finished => {},
        TranslationStatus::Unfinished if options.include_unfinished => {},
        _ => return None,
    }
    if message.translation.is_empty() {
        return None;
    }

    // The longest length variant is what a display with room shows.
    let forms = message
        .translation
        .forms()
        .into_iter()
        .map(str::to_string)
        .collect();

    Some(Entry {
        numerus: message.numerus,
        forms,
    })
}
