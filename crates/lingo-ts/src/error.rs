use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// The XML itself is broken.
    #[error("malformed XML at byte {position}: {source}")]
    Xml {
        position: usize,
        #[source]
        source: quick_xml::Error,
    },
    /// An attribute could not be read or decoded.
    #[error("malformed attribute at byte {position}: {message}")]
    Attribute { position: usize, message: String },
    /// The root element is not `<TS>`.
    #[error("not a Qt Linguist catalog: root element is <{found}>")]
    NotATsDocument { found: String },
    /// An element appeared where the format does not allow it.
    #[error("unexpected <{element}> inside <{parent}> at byte {position}")]
    UnexpectedElement {
        element: String,
        parent: String,
        position: usize,
    },
    /// A required child element is absent.
    #[error("<{parent}> at byte {position} has no <{element}>")]
    MissingElement {
        element: &'static str,
        parent: &'static str,
        position: usize,
    },
    /// An attribute value outside the allowed set.
    #[error("invalid value {value:?} for attribute '{attribute}' at byte {position}")]
    InvalidAttribute {
        attribute: &'static str,
        value: String,
        position: usize,
    },
    /// The document ended inside an element.
    #[error("unexpected end of document inside <{element}>")]
    UnexpectedEof { element: String },
    /// The catalog has no `language` attribute.
    #[error("catalog does not declare a language")]
    MissingLanguage,
    /// The language attribute is not a usable identifier.
    #[error("invalid language identifier '{value}'")]
    InvalidLanguage {
        value: String,
        #[source]
        source: unic_langid::LanguageIdentifierError,
    },
    /// No CLDR plural data could be loaded for a language.
    #[error("no plural rules for language '{language}': {message}")]
    PluralRules { language: String, message: String },
    /// Reading or writing a catalog file failed. The message names the path.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Byte offset in the source document, when the error has one.
    pub fn position(&self) -> Option<usize> {
        match self {
            Error::Xml { position, .. }
            | Error::Attribute { position, .. }
            | Error::UnexpectedElement { position, .. }
            | Error::MissingElement { position, .. }
            | Error::InvalidAttribute { position, .. } => Some(*position),
            _ => None,
        }
    }
}
