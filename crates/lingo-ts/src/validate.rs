//! Catalog audit: placeholder parity, plural form counts, duplicate keys and
//! completeness.

use crate::model::{Catalog, Message, MessageKey, TranslationStatus};
use crate::placeholder;
use crate::plural::PluralRule;
use rustc_hash::FxHashMap;
use std::collections::BTreeSet;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    Error,
    Warning,
}

/// Which message an issue belongs to, as indices into the catalog.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MessageRef {
    pub context: usize,
    pub message: usize,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum IssueKind {
    /// A translation form references a different set of `%k` arguments.
    PlaceholderMismatch {
        form: usize,
        missing: BTreeSet<u8>,
        unexpected: BTreeSet<u8>,
    },
    /// Something like `% 1` that was meant to be a placeholder.
    MalformedPlaceholder { form: usize, token: String },
    /// A plural message has the wrong number of forms for the language.
    NumerusFormCount { expected: usize, found: usize },
    /// A `numerus="yes"` message translated without plural forms.
    NumerusTranslationNotPlural,
    /// A plural form never shows the count.
    MissingCountPlaceholder { form: usize },
    /// The same key was already defined by an earlier message.
    DuplicateMessage { first: MessageRef },
    DuplicateId { id: String, first: MessageRef },
    Unfinished,
    /// Marked finished but has no text.
    EmptyTranslation,
    /// The catalog language cannot be resolved, plural checks were skipped.
    UnknownLanguage { value: Option<String> },
}

impl IssueKind {
    /// A short, stable code for reports.
    pub fn code(&self) -> &'static str {
        match self {
            IssueKind::PlaceholderMismatch { .. } => "placeholder_mismatch",
            IssueKind::MalformedPlaceholder { .. } => "malformed_placeholder",
            IssueKind::NumerusFormCount { .. } => "numerus_form_count",
            IssueKind::NumerusTranslationNotPlural => "numerus_not_plural",
            IssueKind::MissingCountPlaceholder { .. } => "missing_count_placeholder",
            IssueKind::DuplicateMessage { .. } => "duplicate_message",
            IssueKind::DuplicateId { .. } => "duplicate_id",
            IssueKind::Unfinished => "unfinished",
            IssueKind::EmptyTranslation => "empty_translation",
            IssueKind::UnknownLanguage { .. } => "unknown_language",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Issue {
    pub severity: Severity,
    pub kind: IssueKind,
    /// `None` for catalog-wide issues.
    pub location: Option<MessageRef>,
    pub key: Option<MessageKey>,
}

impl Issue {
    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct ValidateOptions {
    /// Report unfinished translations as errors instead of warnings.
    pub deny_unfinished: bool,
    /// Also audit vanished and obsolete messages.
    pub include_obsolete: bool,
}

/// Audits a catalog and returns the issues in document order.
pub fn validate(catalog: &Catalog, options: &ValidateOptions) -> Vec<Issue> {
    let mut issues = Vec::new();

    let rule = match catalog.language_identifier() {
        Ok(language) => match PluralRule::for_language(&language) {
            Ok(rule) => Some(rule),
            Err(e) => {
                tracing::warn!("{}", e);
                None
            },
        },
        Err(_) => None,
    };
    if rule.is_none() {
        issues.push(Issue {
            severity: Severity::Warning,
            kind: IssueKind::UnknownLanguage {
                value: catalog.language.clone(),
            },
            location: None,
            key: None,
        });
    }

    let mut seen_keys: FxHashMap<MessageKey, MessageRef> = FxHashMap::default();
    let mut seen_ids: FxHashMap<&str, MessageRef> = FxHashMap::default();

    for (context_index, context) in catalog.contexts.iter().enumerate() {
        for (message_index, message) in context.messages.iter().enumerate() {
            let location = MessageRef {
                context: context_index,
                message: message_index,
            };
            let key = MessageKey::new(&context.name, message);
            let live = message.translation.status.is_live();

            let mut push = |severity, kind| {
                issues.push(Issue {
                    severity,
                    kind,
                    location: Some(location),
                    key: Some(key.clone()),
                });
            };

            if live {
                match seen_keys.get(&key) {
                    Some(first) => push(
                        Severity::Error,
                        IssueKind::DuplicateMessage { first: *first },
                    ),
                    None => {
                        seen_keys.insert(key.clone(), location);
                    },
                }

                if let Some(id) = message.id.as_deref().filter(|id| !id.is_empty()) {
                    match seen_ids.get(id) {
                        Some(first) => push(
                            Severity::Error,
                            IssueKind::DuplicateId {
                                id: id.to_string(),
                                first: *first,
                            },
                        ),
                        None => {
                            seen_ids.insert(id, location);
                        },
                    }
                }
            }

            if !live && !options.include_obsolete {
                continue;
            }

            let status = message.translation.status;
            let empty = message.translation.is_empty();

            if status == TranslationStatus::Unfinished {
                let severity = if options.deny_unfinished {
                    Severity::Error
                } else {
                    Severity::Warning
                };
                push(severity, IssueKind::Unfinished);
            } else if status == TranslationStatus::Finished && empty {
                push(Severity::Warning, IssueKind::EmptyTranslation);
            }

            if empty {
                continue;
            }

            for (severity, kind) in check_message(message, rule.as_ref()) {
                push(severity, kind);
            }
        }
    }

    issues
}

/// Content checks for one message with a non-empty translation.
fn check_message(message: &Message, rule: Option<&PluralRule>) -> Vec<(Severity, IssueKind)> {
    let mut found = Vec::new();
    let expected = placeholder::numbered(&message.source);
    let source_malformed: BTreeSet<String> =
        placeholder::malformed(&message.source).into_iter().collect();

    let variants = message.translation.form_variants();
    let texts = variants
        .iter()
        .enumerate()
        .flat_map(|(form, texts)| texts.iter().map(move |text| (form, text)));
    for (form, text) in texts {
        // Forms a translator left empty fall back to the source at runtime.
        if text.is_empty() {
            continue;
        }

        let actual = placeholder::numbered(text);
        if actual != expected {
            found.push((
                Severity::Error,
                IssueKind::PlaceholderMismatch {
                    form,
                    missing: expected.difference(&actual).copied().collect(),
                    unexpected: actual.difference(&expected).copied().collect(),
                },
            ));
        }

        for token in placeholder::malformed(text) {
            if !source_malformed.contains(&token) {
                found.push((
                    Severity::Error,
                    IssueKind::MalformedPlaceholder { form, token },
                ));
            }
        }
    }

    if message.numerus {
        match message.translation.plural_form_count() {
            Some(count) => {
                if let Some(rule) = rule
                    && count != rule.form_count()
                {
                    found.push((
                        Severity::Error,
                        IssueKind::NumerusFormCount {
                            expected: rule.form_count(),
                            found: count,
                        },
                    ));
                }

                if placeholder::has_count(&message.source) {
                    for (form, text) in message.translation.forms().into_iter().enumerate() {
                        if !text.is_empty() && !placeholder::has_count(text) {
                            found.push((
                                Severity::Warning,
                                IssueKind::MissingCountPlaceholder { form },
                            ));
                        }
                    }
                }
            },
            None => found.push((Severity::Error, IssueKind::NumerusTranslationNotPlural)),
        }
    }

    found
}
