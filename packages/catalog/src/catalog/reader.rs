//! Catalog Reader
//!
//! Converts parsed markup into a `Catalog`. The first Error-level markup
//! problem aborts the document; recoverable content issues are collected as
//! `StructuralWarning`s and processing continues.

use super::ast::{
    Catalog, Context, Location, Message, MessageStatus, StructuralWarning, Translation,
};
use crate::ml_parser::ast as xml;
use crate::ml_parser::XmlParser;
use crate::parse_util::{ParseError, ParseErrorLevel, ParseLocation, ParseSourceFile, ParseSourceSpan};

pub(crate) const TS_TAG: &str = "TS";
pub(crate) const CONTEXT_TAG: &str = "context";
pub(crate) const NAME_TAG: &str = "name";
pub(crate) const MESSAGE_TAG: &str = "message";
pub(crate) const LOCATION_TAG: &str = "location";
pub(crate) const SOURCE_TAG: &str = "source";
pub(crate) const COMMENT_TAG: &str = "comment";
pub(crate) const EXTRA_COMMENT_TAG: &str = "extracomment";
pub(crate) const TRANSLATOR_COMMENT_TAG: &str = "translatorcomment";
pub(crate) const TRANSLATION_TAG: &str = "translation";
pub(crate) const NUMERUS_FORM_TAG: &str = "numerusform";

pub(crate) const VERSION_ATTR: &str = "version";
pub(crate) const SOURCE_LANGUAGE_ATTR: &str = "sourcelanguage";
pub(crate) const LANGUAGE_ATTR: &str = "language";
pub(crate) const NUMERUS_ATTR: &str = "numerus";
pub(crate) const TYPE_ATTR: &str = "type";
pub(crate) const ID_ATTR: &str = "id";
pub(crate) const FILENAME_ATTR: &str = "filename";
pub(crate) const LINE_ATTR: &str = "line";

/// Parse result: the catalog plus recoverable content issues.
#[derive(Debug, Clone)]
pub struct ParseOutcome {
    pub catalog: Catalog,
    pub warnings: Vec<StructuralWarning>,
}

/// Parse catalog markup. Markup-level problems (tokenizer or tree) abort the
/// document and the first one is returned; content-level problems are
/// collected in the outcome.
pub fn parse(source: &str, url: &str) -> Result<ParseOutcome, ParseError> {
    let tree = XmlParser::new().parse(source, url);
    if let Some(error) = tree
        .errors
        .into_iter()
        .find(|error| error.level == ParseErrorLevel::Error)
    {
        return Err(error);
    }

    let root = tree.root_nodes.iter().find_map(|node| match node {
        xml::Node::Element(element) => Some(element),
        _ => None,
    });

    let root = match root {
        Some(element) if element.name == TS_TAG => element,
        Some(element) => {
            return Err(ParseError::new(
                element.source_span.clone(),
                format!("Expected root element \"{}\", found \"{}\"", TS_TAG, element.name),
            ));
        }
        None => return Err(document_error(source, url, "Missing root element")),
    };

    let mut reader = Reader {
        warnings: Vec::new(),
    };
    let catalog = reader.read_catalog(root);

    Ok(ParseOutcome {
        catalog,
        warnings: reader.warnings,
    })
}

fn document_error(source: &str, url: &str, msg: &str) -> ParseError {
    let file = ParseSourceFile::new(source.to_string(), url.to_string());
    let start = ParseLocation::new(file, 0, 0, 0);
    ParseError::new(ParseSourceSpan::new(start.clone(), start), msg.to_string())
}

struct Reader {
    warnings: Vec<StructuralWarning>,
}

impl Reader {
    fn read_catalog(&mut self, root: &xml::Element) -> Catalog {
        let mut catalog = Catalog {
            version: root.attr(VERSION_ATTR).map(str::to_string),
            source_language: root.attr(SOURCE_LANGUAGE_ATTR).map(str::to_string),
            language: root.attr(LANGUAGE_ATTR).map(str::to_string),
            contexts: Vec::new(),
        };

        for child in root.child_elements() {
            if child.name == CONTEXT_TAG {
                catalog.contexts.push(self.read_context(child));
            } else {
                self.unexpected_element(child);
            }
        }

        catalog
    }

    fn read_context(&mut self, element: &xml::Element) -> Context {
        let mut context = Context::default();

        for child in element.child_elements() {
            match child.name.as_str() {
                NAME_TAG => context.name = child.text_content(),
                MESSAGE_TAG => {
                    if let Some(message) = self.read_message(&context.name, child) {
                        context.messages.push(message);
                    }
                }
                _ => self.unexpected_element(child),
            }
        }

        context
    }

    fn read_message(&mut self, context_name: &str, element: &xml::Element) -> Option<Message> {
        let is_plural = element.attr(NUMERUS_ATTR) == Some("yes");

        let mut message = Message::new(String::new());
        message.id = element.attr(ID_ATTR).map(str::to_string);
        if is_plural {
            message.translation = Translation::Plural(Default::default());
        }

        let mut saw_source = false;
        let mut saw_translation = false;

        for child in element.child_elements() {
            match child.name.as_str() {
                LOCATION_TAG => message.locations.push(Location {
                    filename: child.attr(FILENAME_ATTR).map(str::to_string),
                    line: child.attr(LINE_ATTR).and_then(|line| line.parse().ok()),
                }),
                SOURCE_TAG => {
                    message.source = child.text_content();
                    saw_source = true;
                }
                COMMENT_TAG => message.comment = Some(child.text_content()),
                EXTRA_COMMENT_TAG => message.extracomment = Some(child.text_content()),
                TRANSLATOR_COMMENT_TAG => message.translatorcomment = Some(child.text_content()),
                TRANSLATION_TAG => {
                    saw_translation = true;
                    self.read_translation(context_name, &mut message, is_plural, child);
                }
                _ => self.unexpected_element(child),
            }
        }

        if !saw_source {
            self.warnings.push(StructuralWarning::MissingSource {
                context: context_name.to_string(),
                line: element.source_span.start.line,
                col: element.source_span.start.col,
            });
            return None;
        }

        // A message with no translation block cannot be finished.
        if !saw_translation {
            message.status = MessageStatus::Unfinished;
        }

        if is_plural {
            if let Translation::Plural(forms) = &message.translation {
                if forms.is_empty() {
                    message.incomplete = true;
                    if !message.status.is_retired() {
                        message.status = MessageStatus::Unfinished;
                    }
                    self.warnings.push(StructuralWarning::EmptyPluralTranslation {
                        context: context_name.to_string(),
                        source: message.source.clone(),
                    });
                }
            }
        }

        Some(message)
    }

    fn read_translation(
        &mut self,
        context_name: &str,
        message: &mut Message,
        is_plural: bool,
        element: &xml::Element,
    ) {
        if let Some(value) = element.attr(TYPE_ATTR) {
            match MessageStatus::from_type_attr(value) {
                Some(status) => message.status = status,
                None => self.warnings.push(StructuralWarning::UnknownTranslationType {
                    context: context_name.to_string(),
                    source: message.source.clone(),
                    value: value.to_string(),
                }),
            }
        }

        if is_plural {
            let mut forms = Vec::new();
            for child in element.child_elements() {
                if child.name == NUMERUS_FORM_TAG {
                    forms.push(child.text_content());
                } else {
                    self.unexpected_element(child);
                }
            }
            message.translation = Translation::plural(forms);
        } else {
            for child in element.child_elements() {
                self.unexpected_element(child);
            }
            message.translation = Translation::single(element.text_content());
        }
    }

    fn unexpected_element(&mut self, element: &xml::Element) {
        self.warnings.push(StructuralWarning::UnexpectedElement {
            element: element.name.clone(),
            line: element.source_span.start.line,
            col: element.source_span.start.col,
        });
    }
}
