//! `QString::arg`-style placeholders.
//!
//! Numbered arguments are `%1` to `%99`, optionally localized as `%L1`.
//! Plural messages use `%n` (or `%Ln`) for the count.

use regex::Regex;
use std::collections::BTreeSet;
use std::sync::LazyLock;

static PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"%(L?)([0-9]{1,2}|n)").expect("valid placeholder regex"));

/// A percent sign followed by blanks and a digit, e.g. `% 1` left by
/// machine translation.
static MALFORMED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"%[ \t\u{a0}]+[0-9]{1,2}").expect("valid malformed regex"));

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Placeholder {
    Numbered { index: u8, localized: bool },
    Count { localized: bool },
}

/// All placeholders of `text` in order of appearance.
pub fn placeholders(text: &str) -> Vec<Placeholder> {
    PLACEHOLDER
        .captures_iter(text)
        .filter_map(|caps| {
            let localized = !caps[1].is_empty();
            match &caps[2] {
                "n" => Some(Placeholder::Count { localized }),
                digits => digits
                    .parse::<u8>()
                    .ok()
                    .filter(|index| *index > 0)
                    .map(|index| Placeholder::Numbered { index, localized }),
            }
        })
        .collect()
}

/// The distinct argument numbers referenced by `text`. `%1` and `%L1` count
/// as the same argument.
pub fn numbered(text: &str) -> BTreeSet<u8> {
    placeholders(text)
        .into_iter()
        .filter_map(|p| match p {
            Placeholder::Numbered { index, .. } => Some(index),
            Placeholder::Count { .. } => None,
        })
        .collect()
}

pub fn has_count(text: &str) -> bool {
    placeholders(text)
        .iter()
        .any(|p| matches!(p, Placeholder::Count { .. }))
}

/// Tokens that look like a broken numbered placeholder.
pub fn malformed(text: &str) -> Vec<String> {
    MALFORMED
        .find_iter(text)
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Replaces `%k` with `args[k - 1]` and `%n` with `count`.
///
/// Placeholders without a matching argument stay in the output untouched.
pub fn substitute(text: &str, args: &[&str], count: Option<i64>) -> String {
    PLACEHOLDER
        .replace_all(text, |caps: &regex::Captures<'_>| {
            let whole = caps[0].to_string();
            match &caps[2] {
                "n" => count.map(|n| n.to_string()).unwrap_or(whole),
                digits => digits
                    .parse::<usize>()
                    .ok()
                    .filter(|index| *index > 0)
                    .and_then(|index| args.get(index - 1))
                    .map(|arg| arg.to_string())
                    .unwrap_or(whole),
            }
        })
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_numbered_and_count() {
        let found = placeholders("%1 - %L2 (%n) %10");
        assert_eq!(
            found,
            vec![
                Placeholder::Numbered {
                    index: 1,
                    localized: false
                },
                Placeholder::Numbered {
                    index: 2,
                    localized: true
                },
                Placeholder::Count { localized: false },
                Placeholder::Numbered {
                    index: 10,
                    localized: false
                },
            ]
        );
    }

    #[test]
    fn numbered_ignores_order_and_repeats() {
        let source = numbered("Install %1 on %2, then %1");
        let translation = numbered("Na %2 nainštalovať %1");
        assert_eq!(source, translation);
        assert_eq!(source.into_iter().collect::<Vec<_>>(), vec![1, 2]);
    }

    #[test]
    fn percent_zero_and_plain_percent_are_not_placeholders() {
        assert!(numbered("100% done, %0").is_empty());
    }

    #[test]
    fn detects_spaced_placeholder() {
        assert_eq!(
            malformed("Heslo obsahuje menej ako% 1 znakov"),
            vec!["% 1".to_string()]
        );
        assert!(malformed("50 % of %1").is_empty());
    }

    #[test]
    fn substitutes_reordered_arguments() {
        assert_eq!(
            substitute("%2 na %1", &["sda", "GRUB"], None),
            "GRUB na sda"
        );
        assert_eq!(substitute("%1 and %3", &["a"], None), "a and %3");
        assert_eq!(substitute("(%n sekúnd)", &[], Some(5)), "(5 sekúnd)");
        assert_eq!(substitute("%n left", &[], None), "%n left");
    }
}
