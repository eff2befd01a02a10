//! Parse Utilities
//!
//! Source positions and position-carrying parse errors shared by the
//! tokenizer, the tree parser, and the catalog reader.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ParseSourceFile {
    pub content: String,
    pub url: String,
}

impl ParseSourceFile {
    pub fn new(content: String, url: String) -> Self {
        ParseSourceFile { content, url }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ParseLocation {
    pub file: ParseSourceFile,
    pub offset: usize,
    pub line: usize,
    pub col: usize,
}

impl ParseLocation {
    pub fn new(file: ParseSourceFile, offset: usize, line: usize, col: usize) -> Self {
        ParseLocation { file, offset, line, col }
    }

    pub fn to_string(&self) -> String {
        format!("{}@{}:{}", self.file.url, self.line, self.col)
    }

    /// Return the source around the location,
    /// up to `max_chars` or `max_lines` on each side of it.
    pub fn get_context(&self, max_chars: usize, max_lines: usize) -> Option<(String, String)> {
        let content = &self.file.content;
        if content.is_empty() {
            return None;
        }

        let anchor = self.offset.min(content.len());

        let mut start_offset = anchor;
        let mut ctx_chars = 0;
        let mut ctx_lines = 0;
        for (idx, ch) in content[..anchor].char_indices().rev() {
            if ctx_chars >= max_chars {
                break;
            }
            if ch == '\n' {
                ctx_lines += 1;
                if ctx_lines >= max_lines {
                    break;
                }
            }
            start_offset = idx;
            ctx_chars += 1;
        }

        let mut end_offset = anchor;
        ctx_chars = 0;
        ctx_lines = 0;
        for (idx, ch) in content[anchor..].char_indices() {
            if ctx_chars >= max_chars {
                break;
            }
            if ch == '\n' {
                ctx_lines += 1;
                if ctx_lines >= max_lines {
                    break;
                }
            }
            end_offset = anchor + idx + ch.len_utf8();
            ctx_chars += 1;
        }

        Some((
            content[start_offset..anchor].to_string(),
            content[anchor..end_offset].to_string(),
        ))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParseSourceSpan {
    pub start: ParseLocation,
    pub end: ParseLocation,
    pub details: Option<String>,
}

impl ParseSourceSpan {
    pub fn new(start: ParseLocation, end: ParseLocation) -> Self {
        ParseSourceSpan { start, end, details: None }
    }

    pub fn to_string(&self) -> String {
        self.start.file.content[self.start.offset..self.end.offset].to_string()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParseErrorLevel {
    Warning,
    Error,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParseError {
    pub span: ParseSourceSpan,
    pub msg: String,
    pub level: ParseErrorLevel,
}

impl ParseError {
    pub fn new(span: ParseSourceSpan, msg: String) -> Self {
        ParseError {
            span,
            msg,
            level: ParseErrorLevel::Error,
        }
    }

    pub fn line(&self) -> usize {
        self.span.start.line
    }

    pub fn col(&self) -> usize {
        self.span.start.col
    }

    pub fn contextual_message(&self) -> String {
        if let Some((before, after)) = self.span.start.get_context(100, 2) {
            let level_str = match self.level {
                ParseErrorLevel::Warning => "WARNING",
                ParseErrorLevel::Error => "ERROR",
            };
            format!("{} (\"{}[{} ->]{}\")", self.msg, before, level_str, after)
        } else {
            self.msg.clone()
        }
    }
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}: {}",
            self.contextual_message(),
            self.span.start.to_string()
        )
    }
}

impl std::error::Error for ParseError {}
