//! Brings a translated catalog in line with a freshly extracted template, the
//! way `lupdate` updates existing `.ts` files.

use crate::model::{Catalog, Context, Message, MessageKey, Translation, TranslationStatus, TranslationText};
use rustc_hash::FxHashMap;

#[derive(Clone, Copy, Debug, Default)]
pub struct MergeOptions {
    /// Remove messages that are no longer in the template instead of
    /// marking them vanished.
    pub drop_vanished: bool,
}

#[derive(Clone, Debug)]
pub struct MergeOutcome {
    pub catalog: Catalog,
    /// Template messages that were missing from the target.
    pub added: Vec<MessageKey>,
    /// Target messages that are no longer in the template.
    pub vanished: Vec<MessageKey>,
    /// Vanished or obsolete messages that the template uses again.
    pub revived: Vec<MessageKey>,
}

impl MergeOutcome {
    pub fn is_unchanged(&self) -> bool {
        self.added.is_empty() && self.vanished.is_empty() && self.revived.is_empty()
    }
}

/// Merges `template` into `target`.
///
/// The result keeps the target's header and translations and follows the
/// template's context and message order. Source references, extracted
/// comments and ids come from the template.
pub fn merge(template: &Catalog, target: &Catalog, options: &MergeOptions) -> MergeOutcome {
    let mut existing: FxHashMap<MessageKey, (usize, usize)> = FxHashMap::default();
    for (c, context) in target.contexts.iter().enumerate() {
        for (m, message) in context.messages.iter().enumerate() {
            existing
                .entry(MessageKey::new(&context.name, message))
                .or_insert((c, m));
        }
    }
    let mut used: Vec<Vec<bool>> = target
        .contexts
        .iter()
        .map(|context| vec![false; context.messages.len()])
        .collect();

    let mut outcome = MergeOutcome {
        catalog: Catalog {
            version: target.version.clone().or_else(|| template.version.clone()),
            language: target.language.clone(),
            source_language: target
                .source_language
                .clone()
                .or_else(|| template.source_language.clone()),
            dependencies: target.dependencies.clone(),
            contexts: Vec::with_capacity(template.contexts.len()),
        },
        added: Vec::new(),
        vanished: Vec::new(),
        revived: Vec::new(),
    };

    for template_context in &template.contexts {
        let target_context = target.context(&template_context.name);
        let mut context = Context {
            name: template_context.name.clone(),
            comment: template_context
                .comment
                .clone()
                .or_else(|| target_context.and_then(|c| c.comment.clone())),
            messages: Vec::with_capacity(template_context.messages.len()),
        };

        for template_message in &template_context.messages {
            let key = MessageKey::new(&context.name, template_message);
            let found = existing
                .get(&key)
                .copied()
                .filter(|(c, m)| !used[*c][*m]);

            let message = match found {
                Some((c, m)) => {
                    used[c][m] = true;
                    let mut message = target.contexts[c].messages[m].clone();
                    if !message.translation.status.is_live() {
                        message.translation.status = TranslationStatus::Unfinished;
                        outcome.revived.push(key);
                    }
                    refresh_from_template(&mut message, template_message);
                    message
                },
                None => {
                    outcome.added.push(key);
                    untranslated(template_message)
                },
            };
            context.messages.push(message);
        }

        if let Some(c) = target
            .contexts
            .iter()
            .position(|c| c.name == template_context.name)
        {
            retire_unused(&target.contexts[c], &used[c], &mut context, &mut outcome, options);
        }

        outcome.catalog.contexts.push(context);
    }

    for (c, target_context) in target.contexts.iter().enumerate() {
        if template.context(&target_context.name).is_some() {
            continue;
        }
        let mut context = Context {
            name: target_context.name.clone(),
            comment: target_context.comment.clone(),
            messages: Vec::new(),
        };
        retire_unused(target_context, &used[c], &mut context, &mut outcome, options);
        if !context.messages.is_empty() {
            outcome.catalog.contexts.push(context);
        }
    }

    tracing::debug!(
        "Merged template into {}: {} added, {} vanished, {} revived",
        target.language.as_deref().unwrap_or("catalog"),
        outcome.added.len(),
        outcome.vanished.len(),
        outcome.revived.len()
    );

    outcome
}

fn refresh_from_template(message: &mut Message, template: &Message) {
    message.locations = template.locations.clone();
    message.extra_comment = template.extra_comment.clone();
    message.id = template.id.clone();
    message.numerus = template.numerus;
}

fn untranslated(template: &Message) -> Message {
    let text = if template.numerus {
        TranslationText::Plural(Vec::new())
    } else {
        TranslationText::Single(String::new())
    };
    Message {
        translation: Translation {
            status: TranslationStatus::Unfinished,
            text,
        },
        translator_comment: None,
        ..template.clone()
    }
}

/// Appends the target messages of one context that the template no longer
/// has.
fn retire_unused(
    target_context: &Context,
    used: &[bool],
    context: &mut Context,
    outcome: &mut MergeOutcome,
    options: &MergeOptions,
) {
    for (message, _) in target_context
        .messages
        .iter()
        .zip(used)
        .filter(|(_, used)| !**used)
    {
        let was_live = message.translation.status.is_live();
        if was_live {
            outcome
                .vanished
                .push(MessageKey::new(&target_context.name, message));
        }
        if options.drop_vanished {
            continue;
        }
        let mut message = message.clone();
        if was_live {
            message.translation.status = TranslationStatus::Vanished;
        }
        context.messages.push(message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message(source: &str, status: TranslationStatus, text: &str) -> Message {
        Message {
            source: source.to_string(),
            translation: Translation {
                status,
                text: TranslationText::Single(text.to_string()),
            },
            ..Message::default()
        }
    }

    fn template(context: &str, sources: &[&str]) -> Catalog {
        let mut catalog = Catalog::new("en");
        let context = catalog.context_mut_or_insert(context);
        for source in sources {
            context
                .messages
                .push(message(source, TranslationStatus::Unfinished, ""));
        }
        catalog
    }

    fn sources(catalog: &Catalog) -> Vec<(&str, &str, TranslationStatus)> {
        catalog
            .units()
            .map(|u| {
                (
                    u.context,
                    u.message.source.as_str(),
                    u.message.translation.status,
                )
            })
            .collect()
    }

    #[test]
    fn keeps_translations_and_adds_missing_messages() {
        let template = template("Page", &["Next", "Back", "Cancel"]);
        let mut target = Catalog::new("sk");
        target.context_mut_or_insert("Page").messages = vec![
            message("Back", TranslationStatus::Finished, "Späť"),
            message("Next", TranslationStatus::Finished, "Ďalej"),
        ];

        let outcome = merge(&template, &target, &MergeOptions::default());

        assert_eq!(outcome.catalog.language.as_deref(), Some("sk"));
        assert_eq!(
            sources(&outcome.catalog),
            vec![
                ("Page", "Next", TranslationStatus::Finished),
                ("Page", "Back", TranslationStatus::Finished),
                ("Page", "Cancel", TranslationStatus::Unfinished),
            ]
        );
        assert_eq!(outcome.added.len(), 1);
        assert_eq!(outcome.added[0].source, "Cancel");
        assert!(outcome.vanished.is_empty());
        let back = outcome.catalog.find("Page", "Back", None).unwrap();
        assert_eq!(back.translation.forms(), ["Späť"]);
    }

    #[test]
    fn marks_removed_messages_vanished_at_the_end() {
        let template = template("Page", &["Next"]);
        let mut target = Catalog::new("sk");
        target.context_mut_or_insert("Page").messages = vec![
            message("Quit", TranslationStatus::Finished, "Koniec"),
            message("Next", TranslationStatus::Finished, "Ďalej"),
        ];
        target.context_mut_or_insert("Gone").messages =
            vec![message("Old", TranslationStatus::Unfinished, "")];

        let outcome = merge(&template, &target, &MergeOptions::default());
        assert_eq!(
            sources(&outcome.catalog),
            vec![
                ("Page", "Next", TranslationStatus::Finished),
                ("Page", "Quit", TranslationStatus::Vanished),
                ("Gone", "Old", TranslationStatus::Vanished),
            ]
        );
        assert_eq!(outcome.vanished.len(), 2);

        let dropped = merge(
            &template,
            &target,
            &MergeOptions {
                drop_vanished: true,
            },
        );
        assert_eq!(dropped.catalog.contexts.len(), 1);
        assert_eq!(dropped.catalog.message_count(), 1);
        assert_eq!(dropped.vanished.len(), 2);
    }

    #[test]
    fn revives_vanished_messages() {
        let template = template("Page", &["Next"]);
        let mut target = Catalog::new("sk");
        target.context_mut_or_insert("Page").messages =
            vec![message("Next", TranslationStatus::Vanished, "Ďalej")];

        let outcome = merge(&template, &target, &MergeOptions::default());
        let next = outcome.catalog.find("Page", "Next", None).unwrap();
        assert_eq!(next.translation.status, TranslationStatus::Unfinished);
        assert_eq!(next.translation.forms(), ["Ďalej"]);
        assert_eq!(outcome.revived.len(), 1);
        assert!(outcome.added.is_empty());
    }

    #[test]
    fn already_vanished_messages_are_not_reported_again() {
        let template = template("Page", &["Next"]);
        let mut target = Catalog::new("sk");
        target.context_mut_or_insert("Page").messages = vec![
            message("Next", TranslationStatus::Finished, "Ďalej"),
            message("Quit", TranslationStatus::Vanished, "Koniec"),
        ];

        let outcome = merge(&template, &target, &MergeOptions::default());
        assert!(outcome.is_unchanged());
        assert_eq!(outcome.catalog, target);
    }

    #[test]
    fn takes_locations_and_extracomments_from_template() {
        let mut template = template("Page", &["Next"]);
        let next = &mut template.contexts[0].messages[0];
        next.extra_comment = Some("button".to_string());
        next.locations = vec![crate::model::Location {
            filename: Some("page.cpp".to_string()),
            line: Some(crate::model::LineRef::Absolute(4)),
        }];
        let mut target = Catalog::new("sk");
        target.context_mut_or_insert("Page").messages =
            vec![message("Next", TranslationStatus::Finished, "Ďalej")];

        let outcome = merge(&template, &target, &MergeOptions::default());
        let merged = &outcome.catalog.contexts[0].messages[0];
        assert_eq!(merged.extra_comment.as_deref(), Some("button"));
        assert_eq!(merged.locations.len(), 1);
        assert_eq!(merged.translation.status, TranslationStatus::Finished);
    }
}
