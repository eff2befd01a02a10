//! Markup Lexer
//!
//! Converts catalog markup into spanned tokens. The tokenizer never aborts:
//! every problem is recorded as a positioned `ParseError` and scanning
//! continues, so callers decide how fatal a malformed document is.

use super::tokens::*;
use crate::chars;
use crate::parse_util::{ParseError, ParseLocation, ParseSourceFile, ParseSourceSpan};

/// Tokenization result
#[derive(Debug, Clone)]
pub struct TokenizeResult {
    pub tokens: Vec<Token>,
    pub errors: Vec<ParseError>,
}

/// Main tokenization function
pub fn tokenize(source: &str, url: &str) -> TokenizeResult {
    let file = ParseSourceFile::new(source.to_string(), url.to_string());
    let mut tokenizer = Tokenizer::new(file);
    tokenizer.tokenize();

    TokenizeResult {
        tokens: tokenizer.tokens,
        errors: tokenizer.errors,
    }
}

#[derive(Debug, Clone)]
struct CursorState {
    peek: char,
    offset: usize,
    line: usize,
    column: usize,
}

struct Tokenizer {
    file: ParseSourceFile,
    state: CursorState,
    tokens: Vec<Token>,
    errors: Vec<ParseError>,
}

impl Tokenizer {
    fn new(file: ParseSourceFile) -> Self {
        let mut tokenizer = Tokenizer {
            file,
            state: CursorState {
                peek: chars::EOF,
                offset: 0,
                line: 0,
                column: 0,
            },
            tokens: Vec::new(),
            errors: Vec::new(),
        };
        tokenizer.update_peek();
        tokenizer
    }

    fn update_peek(&mut self) {
        self.state.peek = self.file.content[self.state.offset..]
            .chars()
            .next()
            .unwrap_or(chars::EOF);
    }

    fn peek(&self) -> char {
        self.state.peek
    }

    fn advance(&mut self) {
        if self.state.offset >= self.file.content.len() {
            return;
        }
        self.state.offset += self.state.peek.len_utf8();
        if self.state.peek == chars::NEWLINE {
            self.state.line += 1;
            self.state.column = 0;
        } else {
            self.state.column += 1;
        }
        self.update_peek();
    }

    fn location(&self) -> ParseLocation {
        ParseLocation::new(
            self.file.clone(),
            self.state.offset,
            self.state.line,
            self.state.column,
        )
    }

    fn span_from(&self, start: &ParseLocation) -> ParseSourceSpan {
        ParseSourceSpan::new(start.clone(), self.location())
    }

    fn record_error(&mut self, span: ParseSourceSpan, msg: String) {
        self.errors.push(ParseError::new(span, msg));
    }

    fn tokenize(&mut self) {
        while self.peek() != chars::EOF {
            if self.peek() == chars::LT {
                self.consume_markup();
            } else {
                self.consume_text();
            }
        }
        let start = self.location();
        let span = self.span_from(&start);
        self.tokens.push(Token::Eof(EndOfFileToken { source_span: span }));
    }

    fn consume_markup(&mut self) {
        let start = self.location();
        self.advance(); // '<'

        match self.peek() {
            chars::BANG => {
                self.advance();
                if self.attempt_str("--") {
                    self.consume_comment(start);
                } else {
                    self.consume_doctype(start);
                }
            }
            chars::QUESTION => {
                self.advance();
                self.consume_declaration(start);
            }
            chars::SLASH => {
                self.advance();
                self.consume_tag_close(start);
            }
            ch if chars::is_name_start(ch) => {
                self.consume_tag_open(start);
            }
            _ => {
                let span = self.span_from(&start);
                self.record_error(
                    span,
                    format!("Unexpected character \"{}\" after \"<\"", self.peek()),
                );
                // Recover by treating the bracket as literal text.
                self.tokens.push(Token::Text(TextToken {
                    value: "<".to_string(),
                    source_span: self.span_from(&start),
                }));
            }
        }
    }

    /// Try to consume the given ASCII string; the cursor only moves on a
    /// full match.
    fn attempt_str(&mut self, expected: &str) -> bool {
        if self.file.content[self.state.offset..].starts_with(expected) {
            for _ in 0..expected.chars().count() {
                self.advance();
            }
            true
        } else {
            false
        }
    }

    fn consume_name(&mut self) -> Option<String> {
        if !chars::is_name_start(self.peek()) {
            return None;
        }
        let mut name = String::new();
        while chars::is_name_char(self.peek()) {
            name.push(self.peek());
            self.advance();
        }
        Some(name)
    }

    fn skip_whitespace(&mut self) {
        while chars::is_whitespace(self.peek()) {
            self.advance();
        }
    }

    fn consume_comment(&mut self, start: ParseLocation) {
        let mut value = String::new();
        loop {
            if self.peek() == chars::EOF {
                let span = self.span_from(&start);
                self.record_error(span, "Unterminated comment".to_string());
                break;
            }
            if self.attempt_str("-->") {
                break;
            }
            value.push(self.peek());
            self.advance();
        }
        self.tokens.push(Token::Comment(CommentToken {
            value,
            source_span: self.span_from(&start),
        }));
    }

    fn consume_doctype(&mut self, start: ParseLocation) {
        let mut content = String::new();
        while self.peek() != chars::GT {
            if self.peek() == chars::EOF {
                let span = self.span_from(&start);
                self.record_error(span, "Unterminated document type declaration".to_string());
                break;
            }
            content.push(self.peek());
            self.advance();
        }
        self.advance(); // '>'
        self.tokens.push(Token::DocType(DocTypeToken {
            content: content.trim().to_string(),
            source_span: self.span_from(&start),
        }));
    }

    fn consume_declaration(&mut self, start: ParseLocation) {
        let mut content = String::new();
        loop {
            if self.peek() == chars::EOF {
                let span = self.span_from(&start);
                self.record_error(span, "Unterminated processing instruction".to_string());
                break;
            }
            if self.attempt_str("?>") {
                break;
            }
            content.push(self.peek());
            self.advance();
        }
        self.tokens.push(Token::Declaration(DeclarationToken {
            content: content.trim().to_string(),
            source_span: self.span_from(&start),
        }));
    }

    fn consume_tag_close(&mut self, start: ParseLocation) {
        let name = match self.consume_name() {
            Some(name) => name,
            None => {
                let span = self.span_from(&start);
                self.record_error(span, "Missing closing tag name".to_string());
                String::new()
            }
        };
        self.skip_whitespace();
        if self.peek() == chars::GT {
            self.advance();
        } else {
            let span = self.span_from(&start);
            self.record_error(span, format!("Unterminated closing tag \"{}\"", name));
        }
        self.tokens.push(Token::TagClose(TagCloseToken {
            name,
            source_span: self.span_from(&start),
        }));
    }

    fn consume_tag_open(&mut self, start: ParseLocation) {
        // consume_markup only dispatches here on a name-start character.
        let name = self.consume_name().unwrap_or_default();
        self.tokens.push(Token::TagOpenStart(TagOpenStartToken {
            name: name.clone(),
            source_span: self.span_from(&start),
        }));
        self.consume_attributes(&name);
    }

    fn consume_attributes(&mut self, tag_name: &str) {
        loop {
            self.skip_whitespace();
            let start = self.location();
            match self.peek() {
                chars::GT => {
                    self.advance();
                    self.tokens.push(Token::TagOpenEnd(TagOpenEndToken {
                        source_span: self.span_from(&start),
                    }));
                    return;
                }
                chars::SLASH => {
                    self.advance();
                    if self.peek() == chars::GT {
                        self.advance();
                        self.tokens.push(Token::TagOpenEndVoid(TagOpenEndVoidToken {
                            source_span: self.span_from(&start),
                        }));
                    } else {
                        let span = self.span_from(&start);
                        self.record_error(
                            span,
                            format!("Expected \">\" after \"/\" in tag \"{}\"", tag_name),
                        );
                    }
                    return;
                }
                chars::EOF => {
                    let span = self.span_from(&start);
                    self.record_error(
                        span,
                        format!("Unexpected end of input in opening tag \"{}\"", tag_name),
                    );
                    return;
                }
                ch if chars::is_name_start(ch) => {
                    self.consume_attribute(tag_name);
                }
                ch => {
                    let span = self.span_from(&start);
                    self.record_error(
                        span,
                        format!("Unexpected character \"{}\" in tag \"{}\"", ch, tag_name),
                    );
                    self.advance();
                }
            }
        }
    }

    fn consume_attribute(&mut self, tag_name: &str) {
        let start = self.location();
        let name = self.consume_name().unwrap_or_default();
        self.tokens.push(Token::AttrName(AttrNameToken {
            name: name.clone(),
            source_span: self.span_from(&start),
        }));

        self.skip_whitespace();
        if self.peek() != chars::EQ {
            let span = self.span_from(&start);
            self.record_error(
                span,
                format!("Missing value for attribute \"{}\" in tag \"{}\"", name, tag_name),
            );
            return;
        }
        self.advance(); // '='
        self.skip_whitespace();

        let quote = self.peek();
        if quote != chars::DQ && quote != chars::SQ {
            let span = self.span_from(&start);
            self.record_error(
                span,
                format!("Attribute \"{}\" value must be quoted", name),
            );
            return;
        }
        self.advance(); // opening quote

        let value_start = self.location();
        let mut value = String::new();
        loop {
            match self.peek() {
                ch if ch == quote => {
                    self.advance();
                    break;
                }
                chars::EOF | chars::LT => {
                    let span = self.span_from(&value_start);
                    self.record_error(
                        span,
                        format!("Unterminated value for attribute \"{}\"", name),
                    );
                    break;
                }
                chars::AMPERSAND => {
                    self.consume_entity(&mut value);
                }
                ch => {
                    value.push(ch);
                    self.advance();
                }
            }
        }
        self.tokens.push(Token::AttrValue(AttrValueToken {
            value,
            source_span: self.span_from(&value_start),
        }));
    }

    fn consume_text(&mut self) {
        let start = self.location();
        let mut value = String::new();
        while self.peek() != chars::LT && self.peek() != chars::EOF {
            if self.peek() == chars::AMPERSAND {
                self.consume_entity(&mut value);
            } else {
                value.push(self.peek());
                self.advance();
            }
        }
        self.tokens.push(Token::Text(TextToken {
            value,
            source_span: self.span_from(&start),
        }));
    }

    /// Decode a character reference, appending the result to `out`. On a
    /// malformed reference the raw input is kept and an error recorded.
    fn consume_entity(&mut self, out: &mut String) {
        let start = self.location();
        self.advance(); // '&'

        if self.peek() == chars::HASH {
            self.advance();
            let hex = self.peek() == chars::x || self.peek() == chars::X;
            if hex {
                self.advance();
            }
            let mut digits = String::new();
            while (hex && chars::is_ascii_hex_digit(self.peek()))
                || (!hex && chars::is_digit(self.peek()))
            {
                digits.push(self.peek());
                self.advance();
            }
            if self.peek() != chars::SEMICOLON || digits.is_empty() {
                let span = self.span_from(&start);
                out.push_str(&span.to_string());
                self.record_error(span, "Malformed character reference".to_string());
                return;
            }
            self.advance(); // ';'
            let radix = if hex { 16 } else { 10 };
            match u32::from_str_radix(&digits, radix).ok().and_then(char::from_u32) {
                Some(decoded) => out.push(decoded),
                None => {
                    let span = self.span_from(&start);
                    out.push_str(&span.to_string());
                    self.record_error(
                        span,
                        format!("Invalid character reference \"&#{}{};\"", if hex { "x" } else { "" }, digits),
                    );
                }
            }
            return;
        }

        let mut name = String::new();
        while chars::is_ascii_letter(self.peek()) && name.len() < 8 {
            name.push(self.peek());
            self.advance();
        }
        if self.peek() != chars::SEMICOLON {
            let span = self.span_from(&start);
            out.push_str(&span.to_string());
            self.record_error(span, "Unterminated entity reference".to_string());
            return;
        }
        self.advance(); // ';'

        match name.as_str() {
            "amp" => out.push('&'),
            "lt" => out.push('<'),
            "gt" => out.push('>'),
            "quot" => out.push('"'),
            "apos" => out.push('\''),
            _ => {
                let span = self.span_from(&start);
                out.push_str(&span.to_string());
                self.record_error(span, format!("Unknown entity \"&{};\"", name));
            }
        }
    }
}
