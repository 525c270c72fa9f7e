//! In-memory representation of a Qt Linguist `.ts` catalog.
//!
//! The types mirror the XML closely so that a parsed catalog can be written
//! back without losing anything a translator or lupdate put there.

use crate::language::parse_language;
use crate::Error;
use unic_langid::LanguageIdentifier;

/// A whole `.ts` document.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Catalog {
    /// The `version` attribute of `<TS>` (lupdate writes `2.1`).
    pub version: Option<String>,
    /// The target language as spelled in the file (`sk`, `pt_BR`, `sr@latin`).
    pub language: Option<String>,
    /// The `sourcelanguage` attribute.
    pub source_language: Option<String>,
    /// Catalog names listed under `<dependencies>`.
    pub dependencies: Vec<String>,
    /// Contexts in document order.
    pub contexts: Vec<Context>,
}

/// A named group of messages, usually one UI class.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Context {
    pub name: String,
    pub comment: Option<String>,
    pub messages: Vec<Message>,
}

/// One `<message>` element.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Message {
    /// The `id` attribute, used by id-based (`qtTrId`) catalogs.
    pub id: Option<String>,
    /// Whether the message was marked `numerus="yes"`.
    pub numerus: bool,
    pub locations: Vec<Location>,
    pub source: String,
    pub old_source: Option<String>,
    /// Disambiguation comment. Part of the lookup key.
    pub comment: Option<String>,
    pub old_comment: Option<String>,
    /// Guidance for translators extracted from the source code.
    pub extra_comment: Option<String>,
    pub translator_comment: Option<String>,
    pub translation: Translation,
    /// `<extra-*>` elements as `(suffix, value)` pairs in document order.
    pub extras: Vec<(String, String)>,
}

/// A source reference written by lupdate.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Location {
    pub filename: Option<String>,
    pub line: Option<LineRef>,
}

/// Line part of a [`Location`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LineRef {
    Absolute(u32),
    /// Offset from the previous location (`+3`, `-2`).
    Relative(i32),
}

impl LineRef {
    pub fn parse(value: &str) -> Option<Self> {
        if value.starts_with('+') || value.starts_with('-') {
            value.parse().ok().map(LineRef::Relative)
        } else {
            value.parse().ok().map(LineRef::Absolute)
        }
    }
}

impl std::fmt::Display for LineRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LineRef::Absolute(line) => write!(f, "{line}"),
            LineRef::Relative(offset) => write!(f, "{offset:+}"),
        }
    }
}

/// The `<translation>` element of a message.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Translation {
    pub status: TranslationStatus,
    pub text: TranslationText,
}

impl Default for Translation {
    fn default() -> Self {
        Self {
            status: TranslationStatus::Unfinished,
            text: TranslationText::Single(String::new()),
        }
    }
}

impl Translation {
    /// The text shown for each form: the longest length variant where a
    /// form has several. Non-plural translations yield one item.
    pub fn forms(&self) -> Vec<&str> {
        self.form_variants()
            .into_iter()
            .map(|variants| variants.first().map_or("", String::as_str))
            .collect()
    }

    /// Every string of every form, grouped by form.
    pub fn form_variants(&self) -> Vec<&[String]> {
        match &self.text {
            TranslationText::Single(text) => vec![std::slice::from_ref(text)],
            TranslationText::LengthVariants(variants) => vec![variants.as_slice()],
            TranslationText::Plural(forms) => forms.iter().map(std::slice::from_ref).collect(),
            TranslationText::PluralVariants(forms) => forms.iter().map(Vec::as_slice).collect(),
        }
    }

    /// Number of `<numerusform>` children, `None` for non-plural text.
    pub fn plural_form_count(&self) -> Option<usize> {
        match &self.text {
            TranslationText::Plural(forms) => Some(forms.len()),
            TranslationText::PluralVariants(forms) => Some(forms.len()),
            _ => None,
        }
    }

    /// True when no form carries any text.
    pub fn is_empty(&self) -> bool {
        self.form_variants()
            .iter()
            .flat_map(|variants| variants.iter())
            .all(|text| text.is_empty())
    }
}

/// Translated text, plain or split into variants.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TranslationText {
    Single(String),
    /// `<lengthvariant>` children, longest first.
    LengthVariants(Vec<String>),
    /// `<numerusform>` children, one per plural category of the language.
    Plural(Vec<String>),
    /// Plural forms where at least one form has several `<lengthvariant>`s.
    /// A form with a single text holds one item.
    PluralVariants(Vec<Vec<String>>),
}

/// The `type` attribute of `<translation>`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum TranslationStatus {
    #[default]
    Finished,
    Unfinished,
    Vanished,
    Obsolete,
}

impl TranslationStatus {
    pub fn from_attribute(value: &str) -> Option<Self> {
        match value {
            "unfinished" => Some(Self::Unfinished),
            "vanished" => Some(Self::Vanished),
            "obsolete" => Some(Self::Obsolete),
            _ => None,
        }
    }

    /// The attribute value, `None` for finished translations.
    pub fn as_attribute(self) -> Option<&'static str> {
        match self {
            Self::Finished => None,
            Self::Unfinished => Some("unfinished"),
            Self::Vanished => Some("vanished"),
            Self::Obsolete => Some("obsolete"),
        }
    }

    /// Vanished and obsolete entries are kept for translators but never served.
    pub fn is_live(self) -> bool {
        matches!(self, Self::Finished | Self::Unfinished)
    }
}

/// Lookup key of a message: context, source and disambiguation.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MessageKey {
    pub context: String,
    pub source: String,
    pub comment: Option<String>,
}

impl MessageKey {
    pub fn new(context: &str, message: &Message) -> Self {
        Self {
            context: context.to_string(),
            source: message.source.clone(),
            comment: message.comment.clone().filter(|c| !c.is_empty()),
        }
    }
}

impl std::fmt::Display for MessageKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.comment {
            Some(comment) => write!(f, "{} / {:?} ({})", self.context, self.source, comment),
            None => write!(f, "{} / {:?}", self.context, self.source),
        }
    }
}

/// A message together with the name of its context.
#[derive(Clone, Copy, Debug)]
pub struct TranslationUnit<'a> {
    pub context: &'a str,
    pub message: &'a Message,
}

impl TranslationUnit<'_> {
    pub fn key(&self) -> MessageKey {
        MessageKey::new(self.context, self.message)
    }
}

impl Catalog {
    /// Creates an empty catalog for a language, with lupdate's format version.
    pub fn new(language: impl Into<String>) -> Self {
        Self {
            version: Some("2.1".to_string()),
            language: Some(language.into()),
            ..Self::default()
        }
    }

    /// All messages in document order, flattened with their context name.
    pub fn units(&self) -> impl Iterator<Item = TranslationUnit<'_>> {
        self.contexts.iter().flat_map(|context| {
            context.messages.iter().map(move |message| TranslationUnit {
                context: &context.name,
                message,
            })
        })
    }

    pub fn message_count(&self) -> usize {
        self.contexts.iter().map(|c| c.messages.len()).sum()
    }

    pub fn context(&self, name: &str) -> Option<&Context> {
        self.contexts.iter().find(|c| c.name == name)
    }

    /// Returns the context with this name, appending an empty one if needed.
    pub fn context_mut_or_insert(&mut self, name: &str) -> &mut Context {
        let index = match self.contexts.iter().position(|c| c.name == name) {
            Some(index) => index,
            None => {
                self.contexts.push(Context {
                    name: name.to_string(),
                    ..Context::default()
                });
                self.contexts.len() - 1
            },
        };
        &mut self.contexts[index]
    }

    /// Finds a message by its key. An empty disambiguation matches none.
    pub fn find(&self, context: &str, source: &str, comment: Option<&str>) -> Option<&Message> {
        let comment = comment.filter(|c| !c.is_empty());
        self.context(context)?.messages.iter().find(|m| {
            m.source == source && m.comment.as_deref().filter(|c| !c.is_empty()) == comment
        })
    }

    /// The `language` attribute parsed as a language identifier.
    pub fn language_identifier(&self) -> Result<LanguageIdentifier, Error> {
        let language = self.language.as_deref().ok_or(Error::MissingLanguage)?;
        parse_language(language)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message(source: &str, comment: Option<&str>) -> Message {
        Message {
            source: source.to_string(),
            comment: comment.map(str::to_string),
            ..Message::default()
        }
    }

    #[test]
    fn line_ref_parses_relative_and_absolute() {
        assert_eq!(LineRef::parse("71"), Some(LineRef::Absolute(71)));
        assert_eq!(LineRef::parse("+3"), Some(LineRef::Relative(3)));
        assert_eq!(LineRef::parse("-2"), Some(LineRef::Relative(-2)));
        assert_eq!(LineRef::parse("abc"), None);
        assert_eq!(LineRef::Relative(3).to_string(), "+3");
        assert_eq!(LineRef::Relative(-2).to_string(), "-2");
    }

    #[test]
    fn find_respects_disambiguation() {
        let mut catalog = Catalog::new("sk");
        let context = catalog.context_mut_or_insert("Page");
        context.messages.push(message("Open", None));
        context.messages.push(message("Open", Some("verb")));

        assert!(catalog.find("Page", "Open", None).unwrap().comment.is_none());
        assert_eq!(
            catalog.find("Page", "Open", Some("verb")).unwrap().comment.as_deref(),
            Some("verb")
        );
        assert!(catalog.find("Page", "Open", Some("noun")).is_none());
        assert!(catalog.find("Other", "Open", None).is_none());
    }

    #[test]
    fn units_flatten_contexts_in_order() {
        let mut catalog = Catalog::new("sk");
        catalog.context_mut_or_insert("A").messages.push(message("one", None));
        catalog.context_mut_or_insert("B").messages.push(message("two", None));
        catalog.context_mut_or_insert("A").messages.push(message("three", None));

        let units: Vec<_> = catalog
            .units()
            .map(|u| (u.context, u.message.source.as_str()))
            .collect();
        assert_eq!(units, vec![("A", "one"), ("A", "three"), ("B", "two")]);
        assert_eq!(catalog.message_count(), 3);
    }

    #[test]
    fn empty_translation_detection() {
        let translation = Translation {
            status: TranslationStatus::Finished,
            text: TranslationText::Plural(vec![String::new(), String::new()]),
        };
        assert!(translation.is_empty());
        assert!(Translation::default().is_empty());
        assert!(!TranslationStatus::Vanished.is_live());
    }

    #[test]
    fn plural_length_variants_show_the_longest() {
        let translation = Translation {
            status: TranslationStatus::Finished,
            text: TranslationText::PluralVariants(vec![
                vec!["%n Datei (lang)".to_string(), "%n D.".to_string()],
                vec!["%n Dateien".to_string()],
            ]),
        };
        assert_eq!(translation.forms(), ["%n Datei (lang)", "%n Dateien"]);
        assert_eq!(translation.form_variants()[0].len(), 2);
        assert_eq!(translation.plural_form_count(), Some(2));
        assert!(!translation.is_empty());
    }
}
