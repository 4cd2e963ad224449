//! Bracket conventions recognised by the lexer
//!
//! A [`ProtocolTable`] always starts with the two built-ins, `standard-tag`
//! (`<` ... `>`) and `comment` (`<!--` ... `-->`). Further conventions such as
//! processing instructions, DOCTYPE or CDATA are registered on top of them.

use tracing::trace;

use crate::error::ProtocolError;
use crate::lexer::TokenKind;

/// Name of the built-in tag protocol
pub const STANDARD_TAG: &str = "standard-tag";
/// Name of the built-in comment protocol
pub const COMMENT: &str = "comment";

/// One bracket convention
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Protocol {
    pub name: String,
    pub open: String,
    pub close: String,
    pub self_close_marker: Option<String>,
    pub token_kind: TokenKind,
}

impl Protocol {
    pub fn new(
        name: impl Into<String>,
        open: impl Into<String>,
        close: impl Into<String>,
        token_kind: TokenKind,
    ) -> Self {
        Self {
            name: name.into(),
            open: open.into(),
            close: close.into(),
            self_close_marker: None,
            token_kind,
        }
    }

    pub fn with_self_close_marker(mut self, marker: impl Into<String>) -> Self {
        self.self_close_marker = Some(marker.into());
        self
    }

    fn standard_tag() -> Self {
        Self::new(STANDARD_TAG, "<", ">", TokenKind::OpenTag).with_self_close_marker("/")
    }

    fn comment() -> Self {
        Self::new(COMMENT, "<!--", "-->", TokenKind::Comment)
    }
}

/// Ordered set of protocols with longest-match lookup
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProtocolTable {
    protocols: Vec<Protocol>,
    max_open_len: usize,
}

impl Default for ProtocolTable {
    fn default() -> Self {
        let protocols = vec![Protocol::standard_tag(), Protocol::comment()];
        let max_open_len = protocols.iter().map(|p| p.open.len()).max().unwrap_or(0);
        Self {
            protocols,
            max_open_len,
        }
    }
}

impl ProtocolTable {
    /// Table holding only the built-in protocols
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a protocol after the existing ones
    ///
    /// Only comment-like and declaration-like token kinds can be registered;
    /// tag tokenization belongs to the built-in `standard-tag` protocol.
    pub fn register(&mut self, protocol: Protocol) -> Result<(), ProtocolError> {
        if protocol.open.is_empty() {
            return Err(ProtocolError::EmptyOpenSequence {
                name: protocol.name,
            });
        }
        if protocol.close.is_empty() {
            return Err(ProtocolError::EmptyCloseSequence {
                name: protocol.name,
            });
        }
        if !matches!(
            protocol.token_kind,
            TokenKind::Comment
                | TokenKind::ProcessingInstruction
                | TokenKind::Doctype
                | TokenKind::CData
        ) {
            return Err(ProtocolError::UnsupportedTokenKind {
                name: protocol.name,
                kind: protocol.token_kind.name(),
            });
        }
        if let Some(existing) = self.protocols.iter().find(|p| p.open == protocol.open) {
            return Err(ProtocolError::DuplicateOpenSequence {
                open: protocol.open,
                existing: existing.name.clone(),
            });
        }

        trace!(name = %protocol.name, open = %protocol.open, "registered protocol");
        self.max_open_len = self.max_open_len.max(protocol.open.len());
        self.protocols.push(protocol);
        Ok(())
    }

    /// Find the protocol whose open sequence is the longest exact match at `pos`
    ///
    /// Candidate lengths run from the longest registered open sequence down to
    /// one byte; lengths that would overrun the input are skipped. Among equal
    /// lengths the earliest registration wins.
    pub fn match_at(&self, input: &str, pos: usize) -> Option<&Protocol> {
        let bytes = input.as_bytes();
        for len in (1..=self.max_open_len).rev() {
            let Some(candidate) = bytes.get(pos..pos.saturating_add(len)) else {
                continue;
            };
            if let Some(protocol) = self
                .protocols
                .iter()
                .find(|p| p.open.len() == len && p.open.as_bytes() == candidate)
            {
                return Some(protocol);
            }
        }
        None
    }

    /// Whether `c` is the first character of any open sequence
    pub fn is_start_char(&self, c: char) -> bool {
        self.protocols.iter().any(|p| p.open.starts_with(c))
    }

    /// Strip the open and close sequences of the protocol that produced `literal`
    ///
    /// An unterminated capture keeps everything after the open sequence.
    pub fn strip_delimiters<'s>(&self, literal: &'s str) -> &'s str {
        let Some(protocol) = self.match_at(literal, 0) else {
            return literal;
        };
        let inner = literal.strip_prefix(protocol.open.as_str()).unwrap_or(literal);
        inner.strip_suffix(protocol.close.as_str()).unwrap_or(inner)
    }

    pub fn get(&self, name: &str) -> Option<&Protocol> {
        self.protocols.iter().find(|p| p.name == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Protocol> {
        self.protocols.iter()
    }

    pub fn len(&self) -> usize {
        self.protocols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.protocols.is_empty()
    }
}
