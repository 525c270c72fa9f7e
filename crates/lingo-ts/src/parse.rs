//! Streaming reader for `.ts` documents built on `quick-xml` events.

use crate::Error;
use crate::model::{
    Catalog, Context, LineRef, Location, Message, Translation, TranslationStatus, TranslationText,
};
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};
use std::ops::Range;
use std::path::Path;

/// Byte ranges of one message in the parsed text.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MessageSpan {
    /// From `<message` to the end of `</message>`.
    pub message: Range<usize>,
    pub source: Option<Range<usize>>,
    pub translation: Option<Range<usize>>,
}

/// Where each message of a catalog sits in its file, indexed like
/// `catalog.contexts[c].messages[m]`.
#[derive(Clone, Debug, Default)]
pub struct SourceMap {
    contexts: Vec<Vec<MessageSpan>>,
}

impl SourceMap {
    pub fn get(&self, context: usize, message: usize) -> Option<&MessageSpan> {
        self.contexts.get(context)?.get(message)
    }
}

/// A parsed catalog together with its source positions.
#[derive(Clone, Debug)]
pub struct Document {
    pub catalog: Catalog,
    pub source_map: SourceMap,
}

/// Parses a catalog from text.
pub fn parse_str(text: &str) -> Result<Catalog, Error> {
    parse_document(text).map(|document| document.catalog)
}

/// Reads and parses a catalog file.
pub fn parse_file(path: impl AsRef<Path>) -> Result<Catalog, Error> {
    let text = fs_err::read_to_string(path.as_ref())?;
    parse_str(&text)
}

/// Parses a catalog and records the byte range of every message.
pub fn parse_document(text: &str) -> Result<Document, Error> {
    let mut parser = Parser::new(text);

    loop {
        let (position, event) = parser.next_event()?;
        match event {
            Event::Start(start) if start.name().as_ref() == b"TS" => {
                let mut catalog = Catalog::default();
                parser.read_ts_attributes(&start, position, &mut catalog)?;
                parser.read_ts(&mut catalog)?;
                tracing::debug!(
                    "Parsed catalog '{}' with {} context(s)",
                    catalog.language.as_deref().unwrap_or("?"),
                    catalog.contexts.len()
                );
                return Ok(Document {
                    catalog,
                    source_map: parser.source_map,
                });
            },
            Event::Empty(start) if start.name().as_ref() == b"TS" => {
                let mut catalog = Catalog::default();
                parser.read_ts_attributes(&start, position, &mut catalog)?;
                return Ok(Document {
                    catalog,
                    source_map: parser.source_map,
                });
            },
            Event::Start(start) | Event::Empty(start) => {
                return Err(Error::NotATsDocument {
                    found: element_name(&start),
                });
            },
            Event::Eof => {
                return Err(Error::NotATsDocument {
                    found: "nothing".to_string(),
                });
            },
            _ => {},
        }
    }
}

fn element_name(start: &BytesStart<'_>) -> String {
    String::from_utf8_lossy(start.name().as_ref()).into_owned()
}

struct Parser<'a> {
    text: &'a str,
    reader: Reader<&'a [u8]>,
    source_map: SourceMap,
}

/// Raw pieces collected inside `<translation>`.
#[derive(Default)]
struct TranslationParts {
    text: String,
    forms: Vec<Vec<String>>,
    variants: Vec<String>,
}

impl<'a> Parser<'a> {
    fn new(text: &'a str) -> Self {
        let mut reader = Reader::from_str(text);
        reader.config_mut().trim_text(false);
        Self {
            text,
            reader,
            source_map: SourceMap::default(),
        }
    }

    /// Reads the next event with the byte offset of the `<` that starts it.
    fn next_event(&mut self) -> Result<(usize, Event<'a>), Error> {
        let before = self.reader.buffer_position() as usize;
        let event = self.reader.read_event().map_err(|source| Error::Xml {
            position: self.reader.error_position() as usize,
            source,
        })?;
        let position = match &event {
            Event::Start(_) | Event::Empty(_) | Event::End(_) => self.tag_start(before),
            _ => before,
        };
        Ok((position, event))
    }

    /// quick-xml may already have consumed the `<` of a tag that follows
    /// text, so look back for it.
    fn tag_start(&self, position: usize) -> usize {
        let end = (position + 1).min(self.text.len());
        self.text.as_bytes()[..end]
            .iter()
            .rposition(|byte| *byte == b'<')
            .unwrap_or(position)
    }

    fn position(&self) -> usize {
        self.reader.buffer_position() as usize
    }

    fn attributes(
        &self,
        start: &BytesStart<'a>,
        position: usize,
    ) -> Result<Vec<(String, String)>, Error> {
        start
            .attributes()
            .map(|attribute| {
                let attribute = attribute.map_err(|e| Error::Attribute {
                    position,
                    message: e.to_string(),
                })?;
                let key = String::from_utf8_lossy(attribute.key.as_ref()).into_owned();
                let value = attribute
                    .unescape_value()
                    .map_err(|e| Error::Attribute {
                        position,
                        message: e.to_string(),
                    })?
                    .into_owned();
                Ok((key, value))
            })
            .collect()
    }

    fn read_ts_attributes(
        &self,
        start: &BytesStart<'a>,
        position: usize,
        catalog: &mut Catalog,
    ) -> Result<(), Error> {
        for (key, value) in self.attributes(start, position)? {
            match key.as_str() {
                "version" => catalog.version = Some(value),
                "language" => catalog.language = Some(value),
                "sourcelanguage" => catalog.source_language = Some(value),
                _ => tracing::debug!("Ignoring <TS> attribute '{}'", key),
            }
        }
        Ok(())
    }

    fn read_ts(&mut self, catalog: &mut Catalog) -> Result<(), Error> {
        loop {
            let (position, event) = self.next_event()?;
            match event {
                Event::Start(start) => match start.name().as_ref() {
                    b"context" => {
                        let context = self.read_context(position, catalog.contexts.len())?;
                        catalog.contexts.push(context);
                    },
                    b"dependencies" => catalog.dependencies = self.read_dependencies()?,
                    _ => return Err(unexpected(&start, "TS", position)),
                },
                Event::Empty(start) => match start.name().as_ref() {
                    b"dependencies" => {},
                    _ => return Err(unexpected(&start, "TS", position)),
                },
                Event::End(_) => return Ok(()),
                Event::Eof => return Err(eof("TS")),
                _ => {},
            }
        }
    }

    fn read_dependencies(&mut self) -> Result<Vec<String>, Error> {
        let mut dependencies = Vec::new();
        loop {
            let (position, event) = self.next_event()?;
            match event {
                Event::Empty(start) if start.name().as_ref() == b"dependency" => {
                    dependencies.push(self.dependency_catalog(&start, position)?);
                },
                Event::Start(start) if start.name().as_ref() == b"dependency" => {
                    dependencies.push(self.dependency_catalog(&start, position)?);
                    self.read_text(b"dependency")?;
                },
                Event::Start(start) | Event::Empty(start) => {
                    return Err(unexpected(&start, "dependencies", position));
                },
                Event::End(_) => return Ok(dependencies),
                Event::Eof => return Err(eof("dependencies")),
                _ => {},
            }
        }
    }

    fn dependency_catalog(&self, start: &BytesStart<'a>, position: usize) -> Result<String, Error> {
        Ok(self
            .attributes(start, position)?
            .into_iter()
            .find(|(key, _)| key == "catalog")
            .map(|(_, value)| value)
            .unwrap_or_default())
    }

    fn read_context(&mut self, start_position: usize, index: usize) -> Result<Context, Error> {
        let mut name = None;
        let mut comment = None;
        let mut messages = Vec::new();
        self.source_map.contexts.push(Vec::new());

        loop {
            let (position, event) = self.next_event()?;
            match event {
                Event::Start(start) => match start.name().as_ref() {
                    b"name" => name = Some(self.read_text(b"name")?),
                    b"comment" => comment = Some(self.read_text(b"comment")?),
                    b"message" => {
                        let (message, span) = self.read_message(&start, position, false)?;
                        messages.push(message);
                        self.source_map.contexts[index].push(span);
                    },
                    _ => return Err(unexpected(&start, "context", position)),
                },
                Event::Empty(start) => match start.name().as_ref() {
                    b"name" => name = Some(String::new()),
                    b"comment" => comment = Some(String::new()),
                    b"message" => {
                        let (message, span) = self.read_message(&start, position, true)?;
                        messages.push(message);
                        self.source_map.contexts[index].push(span);
                    },
                    _ => return Err(unexpected(&start, "context", position)),
                },
                Event::End(_) => break,
                Event::Eof => return Err(eof("context")),
                _ => {},
            }
        }

        let name = name.ok_or(Error::MissingElement {
            element: "name",
            parent: "context",
            position: start_position,
        })?;

        Ok(Context {
            name,
            comment,
            messages,
        })
    }

    fn read_message(
        &mut self,
        start: &BytesStart<'a>,
        start_position: usize,
        empty: bool,
    ) -> Result<(Message, MessageSpan), Error> {
        let mut message = Message::default();
        let mut span = MessageSpan::default();
        let mut source = None;
        let mut translation = None;

        for (key, value) in self.attributes(start, start_position)? {
            match key.as_str() {
                "id" => message.id = Some(value),
                "numerus" => message.numerus = value == "yes",
                _ => tracing::debug!("Ignoring <message> attribute '{}'", key),
            }
        }

        if !empty {
            loop {
                let (position, event) = self.next_event()?;
                match event {
                    Event::Empty(child) => match child.name().as_ref() {
                        b"location" => {
                            let location = self.read_location(&child, position)?;
                            message.locations.push(location);
                        },
                        b"source" => {
                            source = Some(String::new());
                            span.source = Some(position..self.position());
                        },
                        b"translation" => {
                            let parts = TranslationParts::default();
                            let status = self.translation_status(&child, position)?;
                            translation = Some(build_translation(status, parts, message.numerus));
                            span.translation = Some(position..self.position());
                        },
                        name if name.starts_with(b"extra-") => {
                            message.extras.push((extra_key(&child), String::new()));
                        },
                        _ => self.empty_optional_text(&child, position, &mut message)?,
                    },
                    Event::Start(child) => match child.name().as_ref() {
                        b"location" => {
                            let location = self.read_location(&child, position)?;
                            message.locations.push(location);
                            self.read_text(b"location")?;
                        },
                        b"source" => {
                            source = Some(self.read_text(b"source")?);
                            span.source = Some(position..self.position());
                        },
                        b"oldsource" => message.old_source = Some(self.read_text(b"oldsource")?),
                        b"comment" => message.comment = Some(self.read_text(b"comment")?),
                        b"oldcomment" => {
                            message.old_comment = Some(self.read_text(b"oldcomment")?);
                        },
                        b"extracomment" => {
                            message.extra_comment = Some(self.read_text(b"extracomment")?);
                        },
                        b"translatorcomment" => {
                            message.translator_comment =
                                Some(self.read_text(b"translatorcomment")?);
                        },
                        b"translation" => {
                            let status = self.translation_status(&child, position)?;
                            let parts = self.read_translation()?;
                            translation = Some(build_translation(status, parts, message.numerus));
                            span.translation = Some(position..self.position());
                        },
                        name if name.starts_with(b"extra-") => {
                            let key = extra_key(&child);
                            let end = child.name().as_ref().to_vec();
                            let value = self.read_text(&end)?;
                            message.extras.push((key, value));
                        },
                        _ => return Err(unexpected(&child, "message", position)),
                    },
                    Event::End(_) => break,
                    Event::Eof => return Err(eof("message")),
                    _ => {},
                }
            }
        }

        message.source = source.ok_or(Error::MissingElement {
            element: "source",
            parent: "message",
            position: start_position,
        })?;
        message.translation = translation.unwrap_or_default();
        span.message = start_position..self.position();

        Ok((message, span))
    }

    /// Handles `<comment/>` and friends written as empty elements.
    fn empty_optional_text(
        &self,
        child: &BytesStart<'a>,
        position: usize,
        message: &mut Message,
    ) -> Result<(), Error> {
        let slot = match child.name().as_ref() {
            b"oldsource" => &mut message.old_source,
            b"comment" => &mut message.comment,
            b"oldcomment" => &mut message.old_comment,
            b"extracomment" => &mut message.extra_comment,
            b"translatorcomment" => &mut message.translator_comment,
            _ => return Err(unexpected(child, "message", position)),
        };
        *slot = Some(String::new());
        Ok(())
    }

    fn read_location(&self, start: &BytesStart<'a>, position: usize) -> Result<Location, Error> {
        let mut location = Location::default();
        for (key, value) in self.attributes(start, position)? {
            match key.as_str() {
                "filename" => location.filename = Some(value),
                "line" => {
                    location.line =
                        Some(LineRef::parse(&value).ok_or(Error::InvalidAttribute {
                            attribute: "line",
                            value,
                            position,
                        })?);
                },
                _ => {},
            }
        }
        Ok(location)
    }

    fn translation_status(
        &self,
        start: &BytesStart<'a>,
        position: usize,
    ) -> Result<TranslationStatus, Error> {
        let mut status = TranslationStatus::Finished;
        for (key, value) in self.attributes(start, position)? {
            if key == "type" {
                status = TranslationStatus::from_attribute(&value).ok_or(
                    Error::InvalidAttribute {
                        attribute: "type",
                        value,
                        position,
                    },
                )?;
            }
        }
        Ok(status)
    }

    fn read_translation(&mut self) -> Result<TranslationParts, Error> {
        let mut parts = TranslationParts::default();
        loop {
            let (position, event) = self.next_event()?;
            match event {
                Event::Text(text) => parts.text.push_str(&self.unescape(&text)?),
                Event::CData(data) => parts.text.push_str(&String::from_utf8_lossy(&data)),
                Event::Start(child) => match child.name().as_ref() {
                    b"numerusform" => parts.forms.push(self.read_numerusform()?),
                    b"lengthvariant" => parts.variants.push(self.read_text(b"lengthvariant")?),
                    _ => return Err(unexpected(&child, "translation", position)),
                },
                Event::Empty(child) => match child.name().as_ref() {
                    b"numerusform" => parts.forms.push(vec![String::new()]),
                    b"lengthvariant" => parts.variants.push(String::new()),
                    b"byte" => parts.text.push(self.read_byte(&child, position)?),
                    _ => return Err(unexpected(&child, "translation", position)),
                },
                Event::End(_) => return Ok(parts),
                Event::Eof => return Err(eof("translation")),
                _ => {},
            }
        }
    }

    /// A plural form: its length variants, or its text as the only item.
    fn read_numerusform(&mut self) -> Result<Vec<String>, Error> {
        let mut text = String::new();
        let mut variants: Vec<String> = Vec::new();
        loop {
            let (position, event) = self.next_event()?;
            match event {
                Event::Text(raw) => text.push_str(&self.unescape(&raw)?),
                Event::CData(data) => text.push_str(&String::from_utf8_lossy(&data)),
                Event::Start(child) if child.name().as_ref() == b"lengthvariant" => {
                    variants.push(self.read_text(b"lengthvariant")?);
                },
                Event::Empty(child) if child.name().as_ref() == b"byte" => {
                    text.push(self.read_byte(&child, position)?);
                },
                Event::Start(child) | Event::Empty(child) => {
                    return Err(unexpected(&child, "numerusform", position));
                },
                Event::End(_) => break,
                Event::Eof => return Err(eof("numerusform")),
                _ => {},
            }
        }

        if variants.is_empty() {
            variants.push(text);
        }
        Ok(variants)
    }

    /// Collects the character data of an element up to its end tag.
    fn read_text(&mut self, element: &[u8]) -> Result<String, Error> {
        let mut text = String::new();
        loop {
            let (position, event) = self.next_event()?;
            match event {
                Event::Text(raw) => text.push_str(&self.unescape(&raw)?),
                Event::CData(data) => text.push_str(&String::from_utf8_lossy(&data)),
                Event::Empty(child) if child.name().as_ref() == b"byte" => {
                    text.push(self.read_byte(&child, position)?);
                },
                Event::Start(child) | Event::Empty(child) => {
                    return Err(unexpected(
                        &child,
                        &String::from_utf8_lossy(element),
                        position,
                    ));
                },
                Event::End(end) if end.name().as_ref() == element => return Ok(text),
                Event::End(_) => {},
                Event::Eof => return Err(eof(&String::from_utf8_lossy(element))),
                _ => {},
            }
        }
    }

    fn unescape(&self, text: &quick_xml::events::BytesText<'_>) -> Result<String, Error> {
        text.unescape()
            .map(|cow| cow.into_owned())
            .map_err(|source| Error::Xml {
                position: self.position(),
                source,
            })
    }

    /// Decodes `<byte value="x1b"/>` (hex with `x` prefix, else decimal).
    fn read_byte(&self, start: &BytesStart<'a>, position: usize) -> Result<char, Error> {
        let value = self
            .attributes(start, position)?
            .into_iter()
            .find(|(key, _)| key == "value")
            .map(|(_, value)| value)
            .unwrap_or_default();

        let code = match value.strip_prefix('x').or_else(|| value.strip_prefix('X')) {
            Some(hex) => u32::from_str_radix(hex, 16).ok(),
            None => value.parse::<u32>().ok(),
        };

        code.and_then(char::from_u32)
            .ok_or(Error::InvalidAttribute {
                attribute: "value",
                value,
                position,
            })
    }
}

fn build_translation(
    status: TranslationStatus,
    parts: TranslationParts,
    numerus: bool,
) -> Translation {
    let text = if parts.forms.iter().any(|variants| variants.len() > 1) {
        TranslationText::PluralVariants(parts.forms)
    } else if !parts.forms.is_empty() {
        TranslationText::Plural(parts.forms.into_iter().flatten().collect())
    } else if !parts.variants.is_empty() {
        TranslationText::LengthVariants(parts.variants)
    } else if numerus && parts.text.trim().is_empty() {
        TranslationText::Plural(Vec::new())
    } else {
        TranslationText::Single(parts.text)
    };
    Translation { status, text }
}

fn extra_key(start: &BytesStart<'_>) -> String {
    element_name(start)
        .strip_prefix("extra-")
        .unwrap_or_default()
        .to_string()
}

fn unexpected(start: &BytesStart<'_>, parent: &str, position: usize) -> Error {
    Error::UnexpectedElement {
        element: element_name(start),
        parent: parent.to_string(),
        position,
    }
}

fn eof(element: &str) -> Error {
    Error::UnexpectedEof {
        element: element.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"<?xml version="1.0" ?><!DOCTYPE TS><TS language="sk" version="2.1">
<context>
    <name>BootLoaderModel</name>
    <message>
        <location filename="../src/BootLoaderModel.cpp" line="70"/>
        <source>Master Boot Record of %1</source>
        <translation>Hlavný zavádzací záznam (MBR) zariadenia %1</translation>
    </message>
    <message>
        <location filename="../src/BootLoaderModel.cpp" line="+3"/>
        <source>&lt;strong&gt;%1&lt;/strong&gt; &amp; more</source>
        <comment>menu</comment>
        <extracomment>device[name]</extracomment>
        <translation type="unfinished"/>
    </message>
</context>
<context>
    <name>Calamares::RequirementsChecker</name>
    <message numerus="yes">
        <source>Waiting for %n module(s).</source>
        <translation><numerusform>Čaká sa na %n modul.</numerusform><numerusform>Čaká sa na %n moduly.</numerusform></translation>
    </message>
</context>
</TS>
"#;

    #[test]
    fn parses_contexts_and_messages() {
        let catalog = parse_str(SAMPLE).unwrap();
        assert_eq!(catalog.language.as_deref(), Some("sk"));
        assert_eq!(catalog.version.as_deref(), Some("2.1"));
        assert_eq!(catalog.contexts.len(), 2);

        let first = &catalog.contexts[0].messages[0];
        assert_eq!(first.source, "Master Boot Record of %1");
        assert_eq!(first.translation.status, TranslationStatus::Finished);
        assert_eq!(
            first.translation.text,
            TranslationText::Single("Hlavný zavádzací záznam (MBR) zariadenia %1".to_string())
        );
        assert_eq!(
            first.locations,
            vec![Location {
                filename: Some("../src/BootLoaderModel.cpp".to_string()),
                line: Some(LineRef::Absolute(70)),
            }]
        );
    }

    #[test]
    fn unescapes_markup_and_reads_comments() {
        let catalog = parse_str(SAMPLE).unwrap();
        let second = &catalog.contexts[0].messages[1];
        assert_eq!(second.source, "<strong>%1</strong> & more");
        assert_eq!(second.comment.as_deref(), Some("menu"));
        assert_eq!(second.extra_comment.as_deref(), Some("device[name]"));
        assert_eq!(second.translation.status, TranslationStatus::Unfinished);
        assert!(second.translation.is_empty());
        assert_eq!(second.locations[0].line, Some(LineRef::Relative(3)));
    }

    #[test]
    fn reads_numerus_forms() {
        let catalog = parse_str(SAMPLE).unwrap();
        let message = &catalog.contexts[1].messages[0];
        assert!(message.numerus);
        assert_eq!(
            message.translation.text,
            TranslationText::Plural(vec![
                "Čaká sa na %n modul.".to_string(),
                "Čaká sa na %n moduly.".to_string(),
            ])
        );
    }

    #[test]
    fn empty_numerus_translation_has_no_forms() {
        let catalog = parse_str(
            r#"<TS language="de"><context><name>C</name><message numerus="yes"><source>%n file(s)</source><translation type="unfinished">
        </translation></message></context></TS>"#,
        )
        .unwrap();
        assert_eq!(
            catalog.contexts[0].messages[0].translation.text,
            TranslationText::Plural(Vec::new())
        );
    }

    #[test]
    fn source_map_points_at_message_elements() {
        let document = parse_document(SAMPLE).unwrap();
        let span = document.source_map.get(0, 1).unwrap();
        let text = &SAMPLE[span.message.clone()];
        assert!(text.starts_with("<message>"), "{text}");
        assert!(text.ends_with("</message>"), "{text}");

        let translation = &SAMPLE[span.translation.clone().unwrap()];
        assert_eq!(translation, r#"<translation type="unfinished"/>"#);
    }

    #[test]
    fn decodes_byte_elements_and_length_variants() {
        let catalog = parse_str(
            r#"<TS language="de"><context><name>C</name><message><source>a<byte value="x9"/>b<byte value="27"/></source><translation variants="yes"><lengthvariant>Lang</lengthvariant><lengthvariant>L</lengthvariant></translation></message></context></TS>"#,
        )
        .unwrap();
        let message = &catalog.contexts[0].messages[0];
        assert_eq!(message.source, "a\tb\u{1b}");
        assert_eq!(
            message.translation.text,
            TranslationText::LengthVariants(vec!["Lang".to_string(), "L".to_string()])
        );
    }

    #[test]
    fn keeps_length_variants_of_plural_forms() {
        let catalog = parse_str(
            r#"<TS language="de"><context><name>C</name><message numerus="yes"><source>%n file(s)</source><translation><numerusform variants="yes"><lengthvariant>%n Datei (lang)</lengthvariant><lengthvariant>%n D.</lengthvariant></numerusform><numerusform>%n Dateien</numerusform></translation></message></context></TS>"#,
        )
        .unwrap();
        assert_eq!(
            catalog.contexts[0].messages[0].translation.text,
            TranslationText::PluralVariants(vec![
                vec!["%n Datei (lang)".to_string(), "%n D.".to_string()],
                vec!["%n Dateien".to_string()],
            ])
        );

        let written = crate::write_catalog(&catalog);
        assert!(written.contains("<lengthvariant>%n D.</lengthvariant>"), "{written}");
        assert_eq!(parse_str(&written).unwrap(), catalog);
    }

    #[test]
    fn keeps_extra_elements_and_dependencies() {
        let catalog = parse_str(
            r#"<TS version="2.1" language="de" sourcelanguage="en"><dependencies><dependency catalog="qtbase_de"/></dependencies><context><name>C</name><message id="app.ok"><source>OK</source><translation>OK</translation><extra-po-flags>c-format</extra-po-flags></message></context></TS>"#,
        )
        .unwrap();
        assert_eq!(catalog.dependencies, vec!["qtbase_de".to_string()]);
        assert_eq!(catalog.source_language.as_deref(), Some("en"));
        let message = &catalog.contexts[0].messages[0];
        assert_eq!(message.id.as_deref(), Some("app.ok"));
        assert_eq!(
            message.extras,
            vec![("po-flags".to_string(), "c-format".to_string())]
        );
    }

    #[test]
    fn rejects_other_documents() {
        assert!(matches!(
            parse_str("<html><body/></html>"),
            Err(Error::NotATsDocument { found }) if found == "html"
        ));
        assert!(matches!(
            parse_str(""),
            Err(Error::NotATsDocument { .. })
        ));
    }

    #[test]
    fn reports_missing_source_and_bad_status() {
        assert!(matches!(
            parse_str("<TS><context><name>C</name><message><translation/></message></context></TS>"),
            Err(Error::MissingElement {
                element: "source",
                ..
            })
        ));
        assert!(matches!(
            parse_str(
                r#"<TS><context><name>C</name><message><source>a</source><translation type="done">b</translation></message></context></TS>"#
            ),
            Err(Error::InvalidAttribute {
                attribute: "type",
                ..
            })
        ));
    }

    #[test]
    fn reports_truncated_documents() {
        let result = parse_str("<TS><context><name>C</name>");
        assert!(result.is_err());
    }
}
