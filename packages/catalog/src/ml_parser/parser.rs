//! Markup Parser
//!
//! Folds the token stream into an element tree. Tree-level problems
//! (mismatched or dangling tags) are collected alongside the tokenizer's
//! errors in the result; the caller decides whether any of them is fatal.

use super::ast::*;
use super::lexer::tokenize;
use super::tokens::*;
use crate::parse_util::{ParseError, ParseSourceSpan};

/// Parse tree result
#[derive(Debug, Clone)]
pub struct ParseTreeResult {
    pub root_nodes: Vec<Node>,
    pub errors: Vec<ParseError>,
}

/// Markup parser over the closed XML subset used by catalog documents.
pub struct XmlParser;

impl XmlParser {
    pub fn new() -> Self {
        XmlParser
    }

    pub fn parse(&self, source: &str, url: &str) -> ParseTreeResult {
        let tokenize_result = tokenize(source, url);
        let builder = TreeBuilder::new(tokenize_result.tokens);

        let mut all_errors = tokenize_result.errors;
        all_errors.extend(builder.errors);

        ParseTreeResult {
            root_nodes: builder.root_nodes,
            errors: all_errors,
        }
    }
}

impl Default for XmlParser {
    fn default() -> Self {
        Self::new()
    }
}

/// Internal tree builder
struct TreeBuilder {
    tokens: Vec<Token>,
    index: usize,
    element_stack: Vec<Element>,
    root_nodes: Vec<Node>,
    errors: Vec<ParseError>,
}

impl TreeBuilder {
    fn new(tokens: Vec<Token>) -> Self {
        let mut builder = TreeBuilder {
            tokens,
            index: 0,
            element_stack: Vec::new(),
            root_nodes: Vec::new(),
            errors: Vec::new(),
        };
        builder.build();
        builder
    }

    fn advance(&mut self) -> Token {
        let token = self.tokens[self.index].clone();
        if self.index < self.tokens.len() - 1 {
            self.index += 1;
        }
        token
    }

    fn peek_type(&self) -> TokenType {
        self.tokens[self.index].token_type()
    }

    fn build(&mut self) {
        loop {
            match self.advance() {
                Token::TagOpenStart(token) => self.consume_element_start(token),
                Token::TagClose(token) => self.consume_element_end(token),
                Token::Text(token) => {
                    self.append_node(Node::Text(Text {
                        value: token.value,
                        source_span: token.source_span,
                    }));
                }
                Token::Comment(token) => {
                    self.append_node(Node::Comment(Comment {
                        value: token.value,
                        source_span: token.source_span,
                    }));
                }
                // The prolog carries no structure the catalog layer needs;
                // the writer regenerates it.
                Token::DocType(_) | Token::Declaration(_) => {}
                Token::Eof(token) => {
                    self.consume_eof(token);
                    return;
                }
                // Attribute tokens are consumed by consume_element_start;
                // reaching one here means the tokenizer already errored.
                _ => {}
            }
        }
    }

    fn consume_element_start(&mut self, token: TagOpenStartToken) {
        let mut element = Element {
            name: token.name,
            attrs: Vec::new(),
            children: Vec::new(),
            source_span: token.source_span,
        };

        loop {
            match self.peek_type() {
                TokenType::AttrName => {
                    let name_token = match self.advance() {
                        Token::AttrName(t) => t,
                        _ => unreachable!(),
                    };
                    let (value, value_span) = if self.peek_type() == TokenType::AttrValue {
                        match self.advance() {
                            Token::AttrValue(t) => (t.value, t.source_span),
                            _ => unreachable!(),
                        }
                    } else {
                        (String::new(), name_token.source_span.clone())
                    };
                    element.attrs.push(Attribute {
                        name: name_token.name,
                        value,
                        source_span: value_span,
                    });
                }
                TokenType::TagOpenEnd => {
                    self.advance();
                    self.element_stack.push(element);
                    return;
                }
                TokenType::TagOpenEndVoid => {
                    self.advance();
                    self.append_node(Node::Element(element));
                    return;
                }
                _ => {
                    // Tag was never closed; the tokenizer has recorded the
                    // error. Keep what was collected.
                    self.element_stack.push(element);
                    return;
                }
            }
        }
    }

    fn consume_element_end(&mut self, token: TagCloseToken) {
        match self.element_stack.pop() {
            Some(mut element) if element.name == token.name => {
                element.source_span =
                    ParseSourceSpan::new(element.source_span.start, token.source_span.end);
                self.append_node(Node::Element(element));
            }
            Some(element) => {
                self.errors.push(ParseError::new(
                    token.source_span,
                    format!(
                        "Unexpected closing tag \"{}\", expected \"</{}>\"",
                        token.name, element.name
                    ),
                ));
                // Close the open element anyway so the walk can continue.
                self.append_node(Node::Element(element));
            }
            None => {
                self.errors.push(ParseError::new(
                    token.source_span,
                    format!("Unexpected closing tag \"{}\"", token.name),
                ));
            }
        }
    }

    fn consume_eof(&mut self, token: EndOfFileToken) {
        while let Some(element) = self.element_stack.pop() {
            self.errors.push(ParseError::new(
                token.source_span.clone(),
                format!("Unexpected end of input, \"{}\" is not closed", element.name),
            ));
            self.append_node(Node::Element(element));
        }
    }

    fn append_node(&mut self, node: Node) {
        match self.element_stack.last_mut() {
            Some(parent) => parent.children.push(node),
            None => self.root_nodes.push(node),
        }
    }
}
