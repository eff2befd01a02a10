//! Catalog Writer
//!
//! Serializes a `Catalog` back to markup, the exact inverse of the reader:
//! same attribute order, same child order, four-space indentation. Escaping
//! is symmetric with the tokenizer's entity decoding.

use super::ast::{Catalog, Context, Message, Translation};
use super::reader::{
    COMMENT_TAG, CONTEXT_TAG, EXTRA_COMMENT_TAG, FILENAME_ATTR, ID_ATTR, LANGUAGE_ATTR,
    LINE_ATTR, LOCATION_TAG, MESSAGE_TAG, NAME_TAG, NUMERUS_ATTR, NUMERUS_FORM_TAG, SOURCE_TAG,
    SOURCE_LANGUAGE_ATTR, TRANSLATION_TAG, TRANSLATOR_COMMENT_TAG, TS_TAG, TYPE_ATTR,
    VERSION_ATTR,
};
use super::xml_helper as xml;

const INDENT: usize = 4;

/// Serialize a catalog to markup text.
pub fn serialize(catalog: &Catalog) -> String {
    let mut ts = xml::Tag::new(TS_TAG);
    if let Some(version) = &catalog.version {
        ts = ts.attr(VERSION_ATTR, version);
    }
    if let Some(source_language) = &catalog.source_language {
        ts = ts.attr(SOURCE_LANGUAGE_ATTR, source_language);
    }
    if let Some(language) = &catalog.language {
        ts = ts.attr(LANGUAGE_ATTR, language);
    }

    for context in &catalog.contexts {
        ts.push(xml::CR::new(INDENT));
        ts.push(context_tag(context, INDENT));
    }
    if !catalog.contexts.is_empty() {
        ts.push(xml::CR::new(0));
    }

    let nodes: Vec<Box<dyn xml::Node>> = vec![
        Box::new(xml::Declaration::new(&[("version", "1.0"), ("encoding", "utf-8")])),
        Box::new(xml::CR::new(0)),
        Box::new(xml::Doctype::new(TS_TAG)),
        Box::new(xml::CR::new(0)),
        Box::new(ts),
    ];

    let mut output = xml::serialize(&nodes);
    output.push('\n');
    output
}

fn context_tag(context: &Context, indent: usize) -> xml::Tag {
    let inner = indent + INDENT;
    let mut tag = xml::Tag::new(CONTEXT_TAG);

    tag.push(xml::CR::new(inner));
    tag.push(xml::Tag::new(NAME_TAG).child(xml::Text::new(&context.name)));

    for message in &context.messages {
        tag.push(xml::CR::new(inner));
        tag.push(message_tag(message, inner));
    }

    tag.push(xml::CR::new(indent));
    tag
}

fn message_tag(message: &Message, indent: usize) -> xml::Tag {
    let inner = indent + INDENT;
    let mut tag = xml::Tag::new(MESSAGE_TAG);
    if let Some(id) = &message.id {
        tag = tag.attr(ID_ATTR, id);
    }
    if message.is_plural() {
        tag = tag.attr(NUMERUS_ATTR, "yes");
    }

    for location in &message.locations {
        let mut location_tag = xml::Tag::new(LOCATION_TAG);
        if let Some(filename) = &location.filename {
            location_tag = location_tag.attr(FILENAME_ATTR, filename);
        }
        if let Some(line) = location.line {
            location_tag = location_tag.attr(LINE_ATTR, &line.to_string());
        }
        tag.push(xml::CR::new(inner));
        tag.push(location_tag);
    }

    tag.push(xml::CR::new(inner));
    tag.push(xml::Tag::new(SOURCE_TAG).child(xml::Text::new(&message.source)));

    if let Some(comment) = &message.comment {
        tag.push(xml::CR::new(inner));
        tag.push(xml::Tag::new(COMMENT_TAG).child(xml::Text::new(comment)));
    }
    if let Some(extracomment) = &message.extracomment {
        tag.push(xml::CR::new(inner));
        tag.push(xml::Tag::new(EXTRA_COMMENT_TAG).child(xml::Text::new(extracomment)));
    }
    if let Some(translatorcomment) = &message.translatorcomment {
        tag.push(xml::CR::new(inner));
        tag.push(xml::Tag::new(TRANSLATOR_COMMENT_TAG).child(xml::Text::new(translatorcomment)));
    }

    tag.push(xml::CR::new(inner));
    tag.push(translation_tag(message, inner));

    tag.push(xml::CR::new(indent));
    tag
}

fn translation_tag(message: &Message, indent: usize) -> xml::Tag {
    let mut tag = xml::Tag::new(TRANSLATION_TAG);
    if let Some(value) = message.status.type_attr() {
        tag = tag.attr(TYPE_ATTR, value);
    }

    match &message.translation {
        Translation::Single(text) => {
            // An empty text child still forces `<translation></translation>`.
            tag.push(xml::Text::new(text));
        }
        Translation::Plural(forms) => {
            if forms.is_empty() {
                tag.push(xml::Text::new(""));
            } else {
                for form in forms {
                    tag.push(xml::CR::new(indent + INDENT));
                    tag.push(xml::Tag::new(NUMERUS_FORM_TAG).child(xml::Text::new(form)));
                }
                tag.push(xml::CR::new(indent));
            }
        }
    }

    tag
}
