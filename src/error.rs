//! Error types for tagtree
//!
//! Lexical and structural failures surface as [`ParseError`], rendering
//! validation failures as [`ValidationError`], and everything the renderer can
//! return is wrapped in [`RenderError`].

use std::fmt;
use thiserror::Error;

/// Position in source text
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Position {
    /// Line number (1-based)
    pub line: usize,
    /// Column number in characters (1-based)
    pub column: usize,
    /// Byte offset from the start of the input (0-based)
    pub offset: usize,
}

impl Position {
    pub const fn new(line: usize, column: usize, offset: usize) -> Self {
        Self {
            line,
            column,
            offset,
        }
    }

    /// Position of the first byte of an input
    pub const fn start() -> Self {
        Self::new(1, 1, 0)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Error kind for detailed categorization
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// The lexer produced an error token (bad name, unterminated quote, ...)
    Lexical,
    /// A close tag did not match the element it should close
    MismatchedTag { expected: String, found: String },
    /// A token appeared where the grammar does not allow it
    UnexpectedToken,
    /// Input ended inside an open element
    UnexpectedEof,
    /// The attribute processor rejected an attribute
    Attribute,
    MaxDepthExceeded { max: usize },
    MaxSizeExceeded { max: usize },
}

impl fmt::Display for ParseErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Lexical => write!(f, "lexical error"),
            Self::MismatchedTag { expected, found } => {
                write!(f, "mismatched tags: expected </{expected}>, found </{found}>")
            }
            Self::UnexpectedToken => write!(f, "unexpected token"),
            Self::UnexpectedEof => write!(f, "unexpected end of input"),
            Self::Attribute => write!(f, "invalid attribute"),
            Self::MaxDepthExceeded { max } => write!(f, "max nesting depth exceeded: {max}"),
            Self::MaxSizeExceeded { max } => write!(f, "max input size exceeded: {max}"),
        }
    }
}

/// Error produced on the first unrecoverable parse failure
#[derive(Error, Clone, Debug, PartialEq, Eq)]
#[error("parse error at {position}: {message}")]
pub struct ParseError {
    kind: ParseErrorKind,
    position: Position,
    message: String,
}

impl ParseError {
    pub fn new(kind: ParseErrorKind, position: Position) -> Self {
        let message = kind.to_string();
        Self {
            kind,
            position,
            message,
        }
    }

    pub fn with_message(kind: ParseErrorKind, position: Position, message: impl Into<String>) -> Self {
        Self {
            kind,
            position,
            message: message.into(),
        }
    }

    pub fn kind(&self) -> &ParseErrorKind {
        &self.kind
    }

    pub const fn position(&self) -> Position {
        self.position
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Kind of node a validation error was raised on
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NodeKind {
    Document,
    Element,
    Text,
    Comment,
    ProcessingInstruction,
    Doctype,
    CData,
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Document => "document",
            Self::Element => "element",
            Self::Text => "text",
            Self::Comment => "comment",
            Self::ProcessingInstruction => "processing instruction",
            Self::Doctype => "doctype",
            Self::CData => "cdata",
        };
        f.write_str(name)
    }
}

/// First violation found by the pre-render validation pass
#[derive(Error, Clone, Debug, PartialEq, Eq)]
#[error("validation error in {node_kind} at {position}: {message}")]
pub struct ValidationError {
    pub message: String,
    pub position: Position,
    pub node_kind: NodeKind,
}

impl ValidationError {
    pub fn new(message: impl Into<String>, position: Position, node_kind: NodeKind) -> Self {
        Self {
            message: message.into(),
            position,
            node_kind,
        }
    }
}

/// Errors returned by the renderer
#[derive(Error, Debug)]
pub enum RenderError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("write failed: {0}")]
    Io(#[from] std::io::Error),
}

/// Rejected protocol registration
#[derive(Error, Clone, Debug, PartialEq, Eq)]
pub enum ProtocolError {
    #[error("protocol {name:?} has an empty open sequence")]
    EmptyOpenSequence { name: String },
    #[error("protocol {name:?} has an empty close sequence")]
    EmptyCloseSequence { name: String },
    #[error("protocol {name:?} cannot produce {kind} tokens")]
    UnsupportedTokenKind { name: String, kind: &'static str },
    #[error("open sequence {open:?} is already registered by protocol {existing:?}")]
    DuplicateOpenSequence { open: String, existing: String },
}

/// Failure reported by an attribute processor
#[derive(Error, Clone, Debug, PartialEq, Eq)]
#[error("attribute {key:?}: {message}")]
pub struct AttributeError {
    pub key: String,
    pub message: String,
}

impl AttributeError {
    pub fn new(key: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            message: message.into(),
        }
    }
}

/// Result type alias for parsing
pub type Result<T> = std::result::Result<T, ParseError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_display() {
        let pos = Position::new(10, 5, 42);
        assert_eq!(pos.to_string(), "10:5");
    }

    #[test]
    fn test_error_default_message() {
        let err = ParseError::new(ParseErrorKind::UnexpectedEof, Position::start());
        assert_eq!(err.kind(), &ParseErrorKind::UnexpectedEof);
        assert_eq!(err.message(), "unexpected end of input");
    }

    #[test]
    fn test_error_display() {
        let err = ParseError::new(
            ParseErrorKind::MismatchedTag {
                expected: "b".to_string(),
                found: "a".to_string(),
            },
            Position::new(2, 7, 12),
        );
        let display = err.to_string();
        assert!(display.contains("parse error at 2:7"));
        assert!(display.contains("mismatched tags"));
    }

    #[test]
    fn test_validation_error_display() {
        let err = ValidationError::new("invalid tag name", Position::start(), NodeKind::Element);
        assert_eq!(
            err.to_string(),
            "validation error in element at 1:1: invalid tag name"
        );
    }
}
