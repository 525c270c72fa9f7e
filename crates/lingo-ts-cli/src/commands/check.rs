//! Check command for auditing catalogs.
//!
//! Every issue `lingo_ts::validate` finds becomes a miette diagnostic that
//! points at the offending `<message>` or `<translation>` in the file.
//! Warnings are printed, errors fail the command.

use crate::commands::TargetArgs;
use crate::core::{
    CliError, ContentWarning, DuplicateError, LoadedCatalog, NumerusError, PlaceholderError,
    UnfinishedError, UnfinishedWarning, UnknownLanguageWarning, ValidationIssue, ValidationReport,
    describe_key, span_from_range,
};
use crate::utils::{read_catalog, resolve_catalogs, ui};
use clap::Parser;
use lingo_ts::validate::MessageRef;
use lingo_ts::{Issue, IssueKind, ValidateOptions, validate};
use miette::{NamedSource, SourceSpan};
use std::collections::BTreeSet;

/// Arguments for the check command.
#[derive(Debug, Parser)]
pub struct CheckArgs {
    #[command(flatten)]
    pub target: TargetArgs,

    /// Treat unfinished translations as errors.
    #[arg(long)]
    pub deny_unfinished: bool,

    /// Also check vanished and obsolete messages.
    #[arg(long)]
    pub include_obsolete: bool,
}

/// Run the check command.
pub fn run_check(args: CheckArgs) -> Result<(), CliError> {
    let targets = resolve_catalogs(&args.target)?;

    ui::print_check_header();
    if targets.is_empty() {
        ui::print_no_catalogs_found();
        return Ok(());
    }

    let options = ValidateOptions {
        deny_unfinished: args.deny_unfinished,
        include_obsolete: args.include_obsolete,
    };

    let mut all_issues: Vec<ValidationIssue> = Vec::new();
    let pb = ui::create_progress_bar(targets.len() as u64, "Checking catalogs...");

    for target in &targets {
        pb.set_message(format!("Checking {}", target.label));
        let loaded = read_catalog(target)?;
        let issues = validate(&loaded.document.catalog, &options);

        let errors = issues.iter().filter(|issue| issue.is_error()).count();
        pb.suspend(|| ui::print_checked(&target.label, errors, issues.len() - errors));

        all_issues.extend(issues.iter().map(|issue| diagnose(&loaded, issue)));
        pb.inc(1);
    }

    pb.finish_and_clear();

    let error_count = all_issues.iter().filter(|issue| issue.is_error()).count();
    let warning_count = all_issues.len() - error_count;
    let report = ValidationReport {
        error_count,
        warning_count,
        issues: all_issues,
    };

    if error_count > 0 {
        return Err(CliError::Validation(report));
    }

    if warning_count > 0 {
        ui::print_report(miette::Report::new(report));
        ui::print_check_warnings_only(warning_count);
    } else {
        ui::print_check_success();
    }
    Ok(())
}

/// Turns one validation finding into a diagnostic over the catalog text.
fn diagnose(loaded: &LoadedCatalog, issue: &Issue) -> ValidationIssue {
    let src = || {
        NamedSource::new(
            loaded.target.path.display().to_string(),
            loaded.text.clone(),
        )
    };
    let message_span = |location: MessageRef| -> Option<SourceSpan> {
        loaded
            .document
            .source_map
            .get(location.context, location.message)
            .map(|span| span_from_range(&span.message))
    };

    let whole = issue.location.and_then(message_span);
    let translation = issue
        .location
        .and_then(|location| {
            loaded
                .document
                .source_map
                .get(location.context, location.message)
        })
        .and_then(|span| span.translation.as_ref())
        .map(span_from_range)
        .or(whole);
    let numerus = issue
        .location
        .and_then(|location| {
            loaded
                .document
                .catalog
                .contexts
                .get(location.context)?
                .messages
                .get(location.message)
        })
        .is_some_and(|message| message.numerus);
    let key = issue.key.as_ref().map(describe_key).unwrap_or_default();

    match &issue.kind {
        IssueKind::PlaceholderMismatch {
            form,
            missing,
            unexpected,
        } => PlaceholderError {
            src: src(),
            span: translation,
            message: format!("placeholders of {} differ from the source", key),
            help: mismatch_help(&form_label(numerus, *form), missing, unexpected),
        }
        .into(),
        IssueKind::MalformedPlaceholder { form, token } => PlaceholderError {
            src: src(),
            span: translation,
            message: format!("malformed placeholder '{}' in {}", token, key),
            help: format!(
                "{} contains '{}', Qt only substitutes '{}'",
                form_label(numerus, *form),
                token,
                token.chars().filter(|c| !c.is_whitespace()).collect::<String>()
            ),
        }
        .into(),
        IssueKind::NumerusFormCount { expected, found } => NumerusError {
            src: src(),
            span: translation,
            message: format!(
                "{} has {} plural form(s), the language needs {}",
                key, found, expected
            ),
            help: format!(
                "Write one <numerusform> per plural category of {}",
                loaded
                    .document
                    .catalog
                    .language
                    .as_deref()
                    .unwrap_or("the catalog language")
            ),
        }
        .into(),
        IssueKind::NumerusTranslationNotPlural => NumerusError {
            src: src(),
            span: translation,
            message: format!("{} is numerus=\"yes\" but has no plural forms", key),
            help: "Wrap each plural form in <numerusform>".to_string(),
        }
        .into(),
        IssueKind::MissingCountPlaceholder { form } => ContentWarning {
            src: src(),
            span: translation,
            message: format!("{} of {} never shows %n", form_label(true, *form), key),
            help: Some(
                "Leave this as is only if the form is used for a single fixed count".to_string(),
            ),
        }
        .into(),
        IssueKind::DuplicateMessage { first } => DuplicateError {
            src: src(),
            span: whole,
            first: message_span(*first),
            message: format!("{} is defined more than once", key),
        }
        .into(),
        IssueKind::DuplicateId { id, first } => DuplicateError {
            src: src(),
            span: whole,
            first: message_span(*first),
            message: format!("id '{}' is used by more than one message", id),
        }
        .into(),
        IssueKind::Unfinished if issue.is_error() => UnfinishedError {
            src: src(),
            span: translation,
            key,
        }
        .into(),
        IssueKind::Unfinished => UnfinishedWarning {
            src: src(),
            span: translation,
            key,
        }
        .into(),
        IssueKind::EmptyTranslation => ContentWarning {
            src: src(),
            span: translation,
            message: format!("{} is marked finished but has no translation", key),
            help: Some("Translate the message or mark it type=\"unfinished\"".to_string()),
        }
        .into(),
        IssueKind::UnknownLanguage { value } => UnknownLanguageWarning {
            path: loaded.target.path.clone(),
            value: value.clone().unwrap_or_else(|| "none declared".to_string()),
        }
        .into(),
    }
}

fn form_label(numerus: bool, form: usize) -> String {
    if numerus {
        format!("plural form {}", form + 1)
    } else {
        "the translation".to_string()
    }
}

fn mismatch_help(form: &str, missing: &BTreeSet<u8>, unexpected: &BTreeSet<u8>) -> String {
    let list = |set: &BTreeSet<u8>| {
        set.iter()
            .map(|n| format!("%{}", n))
            .collect::<Vec<_>>()
            .join(", ")
    };

    let mut parts = Vec::new();
    if !missing.is_empty() {
        parts.push(format!("{} lacks {}", form, list(missing)));
    }
    if !unexpected.is_empty() {
        parts.push(format!("{} uses {} which the source does not", form, list(unexpected)));
    }
    parts.join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::CatalogTarget;
    use std::path::PathBuf;

    fn load(text: &str) -> LoadedCatalog {
        LoadedCatalog {
            target: CatalogTarget::from_path(PathBuf::from("app_sk.ts")),
            text: text.to_string(),
            document: lingo_ts::parse_document(text).unwrap(),
        }
    }

    fn diagnose_all(text: &str, options: &ValidateOptions) -> Vec<ValidationIssue> {
        let loaded = load(text);
        validate(&loaded.document.catalog, options)
            .iter()
            .map(|issue| diagnose(&loaded, issue))
            .collect()
    }

    #[test]
    fn placeholder_error_points_at_translation() {
        let text = r#"<TS version="2.1" language="sk"><context><name>Page</name><message><source>%1 of %2</source><translation>%1 z %3</translation></message></context></TS>"#;
        let issues = diagnose_all(text, &ValidateOptions::default());
        assert_eq!(issues.len(), 1);

        let ValidationIssue::Placeholder(error) = &issues[0] else {
            panic!("unexpected issue: {:?}", issues[0]);
        };
        let span = error.span.unwrap();
        assert_eq!(
            &text[span.offset()..span.offset() + span.len()],
            "<translation>%1 z %3</translation>"
        );
        assert_eq!(
            error.help,
            "the translation lacks %2; the translation uses %3 which the source does not"
        );
    }

    #[test]
    fn duplicate_points_at_both_messages() {
        let text = r#"<TS version="2.1" language="sk"><context><name>Page</name><message><source>Back</source><translation>Späť</translation></message><message><source>Back</source><translation>Naspäť</translation></message></context></TS>"#;
        let issues = diagnose_all(text, &ValidateOptions::default());
        assert_eq!(issues.len(), 1);

        let ValidationIssue::Duplicate(error) = &issues[0] else {
            panic!("unexpected issue: {:?}", issues[0]);
        };
        let first = error.first.unwrap();
        let again = error.span.unwrap();
        assert!(first.offset() < again.offset());
        assert!(text[again.offset()..].starts_with("<message>"));
    }

    #[test]
    fn unfinished_severity_follows_options() {
        let text = r#"<TS version="2.1" language="sk"><context><name>Page</name><message><source>Back</source><translation type="unfinished"></translation></message></context></TS>"#;

        let lenient = diagnose_all(text, &ValidateOptions::default());
        assert!(matches!(lenient[..], [ValidationIssue::UnfinishedWarning(_)]));

        let strict = diagnose_all(
            text,
            &ValidateOptions {
                deny_unfinished: true,
                ..ValidateOptions::default()
            },
        );
        assert!(matches!(strict[..], [ValidationIssue::Unfinished(_)]));
        assert!(strict[0].is_error());
    }

    #[test]
    fn plural_forms_are_named_by_position() {
        let text = r#"<TS version="2.1" language="sk"><context><name>Page</name><message numerus="yes"><source>%n file(s)</source><translation><numerusform>%n súbor</numerusform><numerusform>%n súbory</numerusform></translation></message></context></TS>"#;
        let issues = diagnose_all(text, &ValidateOptions::default());
        assert!(matches!(issues[..], [ValidationIssue::Numerus(_)]));
        assert!(issues[0].to_string().contains("the language needs 4"));
    }

    #[test]
    fn malformed_placeholder_suggests_the_fix() {
        let text = r#"<TS version="2.1" language="sk"><context><name>Page</name><message><source>less than %1 digits</source><translation>menej ako% 1 číslic</translation></message></context></TS>"#;
        let issues = diagnose_all(text, &ValidateOptions::default());
        assert_eq!(issues.len(), 2);
        let ValidationIssue::Placeholder(error) = &issues[1] else {
            panic!("unexpected issue: {:?}", issues[1]);
        };
        assert!(error.help.ends_with("Qt only substitutes '%1'"), "{}", error.help);
    }
}
