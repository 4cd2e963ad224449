//! Token types for the markup lexer

use indexmap::IndexMap;

use crate::error::Position;

/// Raw attributes exactly as they appeared in an open tag
pub type TokenAttributes = IndexMap<String, String>;

/// Markup token types
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Text,
    OpenTag,
    CloseTag,
    SelfCloseTag,
    Comment,
    ProcessingInstruction,
    Doctype,
    CData,
    /// Lexical failure; the literal carries the message
    Error,
    Eof,
}

impl TokenKind {
    /// Get token name for error messages
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::OpenTag => "open tag",
            Self::CloseTag => "close tag",
            Self::SelfCloseTag => "self-closing tag",
            Self::Comment => "comment",
            Self::ProcessingInstruction => "processing instruction",
            Self::Doctype => "doctype",
            Self::CData => "cdata",
            Self::Error => "error",
            Self::Eof => "EOF",
        }
    }
}

/// Token with source location
///
/// For tag tokens `literal` is the tag name, for error tokens the message,
/// and for everything else the captured text.
#[derive(Clone, Debug, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub literal: String,
    pub attributes: Option<TokenAttributes>,
    pub position: Position,
}

impl Token {
    pub fn new(kind: TokenKind, literal: impl Into<String>, position: Position) -> Self {
        Self {
            kind,
            literal: literal.into(),
            attributes: None,
            position,
        }
    }

    pub fn tag(
        kind: TokenKind,
        name: String,
        attributes: TokenAttributes,
        position: Position,
    ) -> Self {
        Self {
            kind,
            literal: name,
            attributes: Some(attributes),
            position,
        }
    }

    pub fn error(message: impl Into<String>, position: Position) -> Self {
        Self::new(TokenKind::Error, message, position)
    }

    pub fn eof(position: Position) -> Self {
        Self::new(TokenKind::Eof, String::new(), position)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_kind_name() {
        assert_eq!(TokenKind::OpenTag.name(), "open tag");
        assert_eq!(TokenKind::Eof.name(), "EOF");
    }

    #[test]
    fn test_token_creation() {
        let token = Token::error("boom", Position::new(1, 3, 2));
        assert_eq!(token.kind, TokenKind::Error);
        assert_eq!(token.literal, "boom");
        assert!(token.attributes.is_none());
    }
}
