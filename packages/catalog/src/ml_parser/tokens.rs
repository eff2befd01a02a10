//! Markup Tokens
//!
//! Spanned token set produced by the tokenizer. The format is a closed XML
//! subset, so the token inventory is small: tags, attributes, text (with
//! entities already decoded), comments, and the document prolog.

use crate::parse_util::ParseSourceSpan;

/// Token types for markup parsing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenType {
    TagOpenStart,
    TagOpenEnd,
    TagOpenEndVoid,
    TagClose,
    Text,
    Comment,
    AttrName,
    AttrValue,
    DocType,
    Declaration,
    Eof,
}

/// All token variants
#[derive(Debug, Clone)]
pub enum Token {
    TagOpenStart(TagOpenStartToken),
    TagOpenEnd(TagOpenEndToken),
    TagOpenEndVoid(TagOpenEndVoidToken),
    TagClose(TagCloseToken),
    Text(TextToken),
    Comment(CommentToken),
    AttrName(AttrNameToken),
    AttrValue(AttrValueToken),
    DocType(DocTypeToken),
    Declaration(DeclarationToken),
    Eof(EndOfFileToken),
}

#[derive(Debug, Clone)]
pub struct TagOpenStartToken {
    pub name: String,
    pub source_span: ParseSourceSpan,
}

#[derive(Debug, Clone)]
pub struct TagOpenEndToken {
    pub source_span: ParseSourceSpan,
}

#[derive(Debug, Clone)]
pub struct TagOpenEndVoidToken {
    pub source_span: ParseSourceSpan,
}

#[derive(Debug, Clone)]
pub struct TagCloseToken {
    pub name: String,
    pub source_span: ParseSourceSpan,
}

/// Text with all character references already decoded
#[derive(Debug, Clone)]
pub struct TextToken {
    pub value: String,
    pub source_span: ParseSourceSpan,
}

#[derive(Debug, Clone)]
pub struct CommentToken {
    pub value: String,
    pub source_span: ParseSourceSpan,
}

#[derive(Debug, Clone)]
pub struct AttrNameToken {
    pub name: String,
    pub source_span: ParseSourceSpan,
}

/// Attribute value with character references already decoded
#[derive(Debug, Clone)]
pub struct AttrValueToken {
    pub value: String,
    pub source_span: ParseSourceSpan,
}

#[derive(Debug, Clone)]
pub struct DocTypeToken {
    pub content: String,
    pub source_span: ParseSourceSpan,
}

#[derive(Debug, Clone)]
pub struct DeclarationToken {
    pub content: String,
    pub source_span: ParseSourceSpan,
}

#[derive(Debug, Clone)]
pub struct EndOfFileToken {
    pub source_span: ParseSourceSpan,
}

impl Token {
    pub fn token_type(&self) -> TokenType {
        match self {
            Token::TagOpenStart(_) => TokenType::TagOpenStart,
            Token::TagOpenEnd(_) => TokenType::TagOpenEnd,
            Token::TagOpenEndVoid(_) => TokenType::TagOpenEndVoid,
            Token::TagClose(_) => TokenType::TagClose,
            Token::Text(_) => TokenType::Text,
            Token::Comment(_) => TokenType::Comment,
            Token::AttrName(_) => TokenType::AttrName,
            Token::AttrValue(_) => TokenType::AttrValue,
            Token::DocType(_) => TokenType::DocType,
            Token::Declaration(_) => TokenType::Declaration,
            Token::Eof(_) => TokenType::Eof,
        }
    }

    pub fn source_span(&self) -> &ParseSourceSpan {
        match self {
            Token::TagOpenStart(t) => &t.source_span,
            Token::TagOpenEnd(t) => &t.source_span,
            Token::TagOpenEndVoid(t) => &t.source_span,
            Token::TagClose(t) => &t.source_span,
            Token::Text(t) => &t.source_span,
            Token::Comment(t) => &t.source_span,
            Token::AttrName(t) => &t.source_span,
            Token::AttrValue(t) => &t.source_span,
            Token::DocType(t) => &t.source_span,
            Token::Declaration(t) => &t.source_span,
            Token::Eof(t) => &t.source_span,
        }
    }
}
