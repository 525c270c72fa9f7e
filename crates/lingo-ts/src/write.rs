//! Serializes catalogs in the layout lupdate produces.

use crate::Error;
use crate::model::{Catalog, Context, Message, TranslationText};
use quick_xml::escape::escape;
use std::fmt::Write as _;
use std::path::Path;

const INDENT: &str = "    ";

/// Renders a catalog as a `.ts` document.
pub fn write_catalog(catalog: &Catalog) -> String {
    let mut out = String::new();
    out.push_str("<?xml version=\"1.0\" encoding=\"utf-8\"?>\n");
    out.push_str("<!DOCTYPE TS>\n");

    out.push_str("<TS");
    if let Some(version) = &catalog.version {
        push_attribute(&mut out, "version", version);
    }
    if let Some(language) = &catalog.language {
        push_attribute(&mut out, "language", language);
    }
    if let Some(source_language) = &catalog.source_language {
        push_attribute(&mut out, "sourcelanguage", source_language);
    }
    out.push_str(">\n");

    if !catalog.dependencies.is_empty() {
        out.push_str("<dependencies>\n");
        for dependency in &catalog.dependencies {
            out.push_str("<dependency");
            push_attribute(&mut out, "catalog", dependency);
            out.push_str("/>\n");
        }
        out.push_str("</dependencies>\n");
    }

    for context in &catalog.contexts {
        write_context(&mut out, context);
    }

    out.push_str("</TS>\n");
    out
}

/// Writes a catalog to disk.
pub fn write_file(path: impl AsRef<Path>, catalog: &Catalog) -> Result<(), Error> {
    fs_err::write(path.as_ref(), write_catalog(catalog))?;
    Ok(())
}

fn write_context(out: &mut String, context: &Context) {
    out.push_str("<context>\n");
    push_element(out, 1, "name", &context.name);
    if let Some(comment) = &context.comment {
        push_element(out, 1, "comment", comment);
    }
    for message in &context.messages {
        write_message(out, message);
    }
    out.push_str("</context>\n");
}

fn write_message(out: &mut String, message: &Message) {
    out.push_str(INDENT);
    out.push_str("<message");
    if let Some(id) = &message.id {
        push_attribute(out, "id", id);
    }
    if message.numerus {
        push_attribute(out, "numerus", "yes");
    }
    out.push_str(">\n");

    for location in &message.locations {
        push_indent(out, 2);
        out.push_str("<location");
        if let Some(filename) = &location.filename {
            push_attribute(out, "filename", filename);
        }
        if let Some(line) = &location.line {
            push_attribute(out, "line", &line.to_string());
        }
        out.push_str("/>\n");
    }

    push_element(out, 2, "source", &message.source);
    let optional = [
        ("oldsource", &message.old_source),
        ("comment", &message.comment),
        ("oldcomment", &message.old_comment),
        ("extracomment", &message.extra_comment),
        ("translatorcomment", &message.translator_comment),
    ];
    for (name, value) in optional {
        if let Some(value) = value {
            push_element(out, 2, name, value);
        }
    }

    write_translation(out, message);

    for (key, value) in &message.extras {
        push_element(out, 2, &format!("extra-{key}"), value);
    }

    out.push_str(INDENT);
    out.push_str("</message>\n");
}

fn write_translation(out: &mut String, message: &Message) {
    let translation = &message.translation;
    push_indent(out, 2);
    out.push_str("<translation");
    if let Some(status) = translation.status.as_attribute() {
        push_attribute(out, "type", status);
    }

    match &translation.text {
        TranslationText::Single(text) => {
            out.push('>');
            push_text(out, text);
        },
        TranslationText::LengthVariants(variants) => {
            push_attribute(out, "variants", "yes");
            out.push_str(">\n");
            for variant in variants {
                push_element(out, 3, "lengthvariant", variant);
            }
            push_indent(out, 2);
        },
        TranslationText::Plural(forms) if forms.is_empty() => out.push('>'),
        TranslationText::Plural(forms) => {
            out.push_str(">\n");
            for form in forms {
                push_element(out, 3, "numerusform", form);
            }
            push_indent(out, 2);
        },
        TranslationText::PluralVariants(forms) => {
            out.push_str(">\n");
            for variants in forms {
                match variants.as_slice() {
                    [form] => push_element(out, 3, "numerusform", form),
                    _ => {
                        push_indent(out, 3);
                        out.push_str("<numerusform variants=\"yes\">\n");
                        for variant in variants {
                            push_element(out, 4, "lengthvariant", variant);
                        }
                        push_indent(out, 3);
                        out.push_str("</numerusform>\n");
                    },
                }
            }
            push_indent(out, 2);
        },
    }
    out.push_str("</translation>\n");
}

fn push_indent(out: &mut String, level: usize) {
    for _ in 0..level {
        out.push_str(INDENT);
    }
}

fn push_element(out: &mut String, level: usize, name: &str, text: &str) {
    push_indent(out, level);
    let _ = write!(out, "<{name}>");
    push_text(out, text);
    let _ = writeln!(out, "</{name}>");
}

fn push_attribute(out: &mut String, name: &str, value: &str) {
    let _ = write!(out, " {name}=\"{}\"", escape(value));
}

/// Escapes markup characters; control characters that XML 1.0 cannot carry
/// become `<byte>` elements.
fn push_text(out: &mut String, text: &str) {
    let mut plain_start = 0;
    for (index, c) in text.char_indices() {
        if is_unrepresentable(c) {
            out.push_str(&escape(&text[plain_start..index]));
            let _ = write!(out, "<byte value=\"x{:x}\"/>", c as u32);
            plain_start = index + c.len_utf8();
        }
    }
    out.push_str(&escape(&text[plain_start..]));
}

fn is_unrepresentable(c: char) -> bool {
    (c < '\u{20}' && !matches!(c, '\t' | '\n' | '\r')) || c == '\u{7f}'
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Location, LineRef, Translation, TranslationStatus};

    #[test]
    fn escapes_markup_quotes_and_control_characters() {
        let mut out = String::new();
        push_text(&mut out, "<b>\"it's\" & more\u{1b}!");
        assert_eq!(
            out,
            "&lt;b&gt;&quot;it&apos;s&quot; &amp; more<byte value=\"x1b\"/>!"
        );
    }

    #[test]
    fn writes_message_children_in_lupdate_order() {
        let mut catalog = Catalog::new("sk");
        catalog.context_mut_or_insert("Page").messages.push(Message {
            locations: vec![Location {
                filename: Some("page.cpp".to_string()),
                line: Some(LineRef::Absolute(12)),
            }],
            source: "Open".to_string(),
            comment: Some("verb".to_string()),
            extra_comment: Some("toolbar".to_string()),
            translation: Translation {
                status: TranslationStatus::Unfinished,
                text: TranslationText::Single(String::new()),
            },
            ..Message::default()
        });

        let written = write_catalog(&catalog);
        let source = written.find("<source>").unwrap();
        let comment = written.find("<comment>").unwrap();
        let extra = written.find("<extracomment>").unwrap();
        let translation = written.find("<translation").unwrap();
        assert!(source < comment && comment < extra && extra < translation);
        assert!(written.contains("        <translation type=\"unfinished\"></translation>\n"));
    }
}
