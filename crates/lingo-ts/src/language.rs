//! Qt language spellings.
//!
//! Catalogs name their language the way Qt does (`pt_BR`, `sr@latin`,
//! `ca@valencia`). Everything else in the workspace works with BCP 47
//! identifiers.

use crate::Error;
use unic_langid::LanguageIdentifier;

/// Parses a `language` attribute or file-name suffix into an identifier.
///
/// `_` separators become `-`, `@latin`/`@cyrillic` become a script subtag and
/// any other `@modifier` becomes a variant.
pub fn parse_language(value: &str) -> Result<LanguageIdentifier, Error> {
    let (base, modifier) = match value.split_once('@') {
        Some((base, modifier)) => (base, Some(modifier)),
        None => (value, None),
    };

    let mut tag = base.trim().replace('_', "-");
    match modifier {
        Some("latin") => tag = insert_script(&tag, "Latn"),
        Some("cyrillic") => tag = insert_script(&tag, "Cyrl"),
        Some(variant) if !variant.is_empty() => {
            tag.push('-');
            tag.push_str(variant);
        },
        _ => {},
    }

    tag.parse::<LanguageIdentifier>()
        .map_err(|source| Error::InvalidLanguage {
            value: value.to_string(),
            source,
        })
}

/// Puts a script subtag right after the language subtag.
fn insert_script(tag: &str, script: &str) -> String {
    match tag.split_once('-') {
        Some((language, rest)) => format!("{language}-{script}-{rest}"),
        None => format!("{tag}-{script}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("sk", "sk")]
    #[case("pt_BR", "pt-BR")]
    #[case("zh_TW", "zh-TW")]
    #[case("sr@latin", "sr-Latn")]
    #[case("ca@valencia", "ca-valencia")]
    #[case("en-US", "en-US")]
    fn parses_qt_spellings(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(parse_language(input).unwrap().to_string(), expected);
    }

    #[test]
    fn rejects_garbage() {
        assert!(matches!(
            parse_language("not a language"),
            Err(Error::InvalidLanguage { .. })
        ));
    }
}
