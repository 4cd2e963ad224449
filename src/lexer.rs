//! Lexical analyzer for tag-bracketed markup
//!
//! The lexer walks the input one character at a time and asks the
//! [`ProtocolTable`](crate::protocol::ProtocolTable) whether a bracket
//! convention starts at the cursor. Whitespace between tokens is never
//! emitted. Lexical failures do not abort scanning; they come back as
//! [`TokenKind::Error`] tokens and the parser decides what to do with them.

pub mod cursor;
pub mod token;

pub use cursor::Cursor;
pub use token::{Token, TokenAttributes, TokenKind};

use tracing::trace;

use crate::common::escape::decode_entities;
use crate::error::Position;
use crate::parser::config::ParserConfig;
use crate::protocol::Protocol;

/// Markup lexer
#[derive(Debug)]
pub struct Lexer<'a> {
    cursor: Cursor<'a>,
    config: &'a ParserConfig,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str, config: &'a ParserConfig) -> Self {
        Self {
            cursor: Cursor::new(input),
            config,
        }
    }

    /// Produces the next token from the input
    pub fn next_token(&mut self) -> Token {
        self.cursor.skip_whitespace();
        let start = self.cursor.position();
        if self.cursor.is_eof() {
            return Token::eof(start);
        }

        let config = self.config;
        let token = match config
            .protocols()
            .match_at(self.cursor.input(), self.cursor.pos())
        {
            Some(protocol) => match protocol.token_kind {
                TokenKind::OpenTag => self.read_tag(protocol, start),
                TokenKind::Comment => self.read_comment(protocol, start),
                _ => self.read_protocol(protocol, start),
            },
            None => self.read_text(start),
        };

        trace!(kind = token.kind.name(), literal = %token.literal, at = %token.position, "token");
        token
    }

    fn read_tag(&mut self, protocol: &Protocol, start: Position) -> Token {
        self.cursor.eat(&protocol.open);
        let is_close = protocol
            .self_close_marker
            .as_deref()
            .is_some_and(|marker| self.cursor.eat(marker));

        let name = self.read_name();
        if name.is_empty() {
            return Token::error("invalid tag name", self.cursor.position());
        }

        if is_close {
            self.cursor.skip_whitespace();
            if !self.cursor.eat(&protocol.close) {
                return Token::error(
                    format!("expected '{}' to end close tag", protocol.close),
                    self.cursor.position(),
                );
            }
            return Token::new(TokenKind::CloseTag, name, start);
        }

        let mut attributes = TokenAttributes::new();
        loop {
            self.cursor.skip_whitespace();
            if self.cursor.is_eof() {
                return Token::error(
                    format!("expected '{}' to end tag <{name}>", protocol.close),
                    self.cursor.position(),
                );
            }
            if self.cursor.eat(&protocol.close) {
                return Token::tag(TokenKind::OpenTag, name, attributes, start);
            }
            if let Some(marker) = protocol.self_close_marker.as_deref() {
                if self.cursor.eat(marker) {
                    return self.finish_self_close(protocol, name, attributes, start);
                }
            }

            let attr_position = self.cursor.position();
            let attr_name = self.read_name();
            if attr_name.is_empty() {
                return Token::error(
                    format!("invalid attribute name in tag <{name}>"),
                    attr_position,
                );
            }

            self.cursor.skip_whitespace();
            let value = if self.cursor.consume('=') {
                self.cursor.skip_whitespace();
                match self.read_attribute_value(protocol) {
                    Ok(value) => value,
                    Err(token) => return token,
                }
            } else {
                String::new()
            };

            if attributes.contains_key(&attr_name) {
                return Token::error(format!("duplicate attribute {attr_name:?}"), attr_position);
            }
            attributes.insert(attr_name, value);
        }
    }

    fn finish_self_close(
        &mut self,
        protocol: &Protocol,
        name: String,
        attributes: TokenAttributes,
        start: Position,
    ) -> Token {
        if !self.config.allow_self_close_tags {
            return Token::error("self-closing tags not allowed", self.cursor.position());
        }
        self.cursor.skip_whitespace();
        if !self.cursor.eat(&protocol.close) {
            return Token::error(
                format!("expected '{}' after self-close marker", protocol.close),
                self.cursor.position(),
            );
        }
        Token::tag(TokenKind::SelfCloseTag, name, attributes, start)
    }

    fn read_name(&mut self) -> String {
        let start = self.cursor.pos();
        if self.cursor.current().is_some_and(is_name_start) {
            self.cursor.advance();
            while self.cursor.current().is_some_and(is_name_char) {
                self.cursor.advance();
            }
        }
        self.cursor.slice_from(start).to_string()
    }

    fn read_attribute_value(&mut self, protocol: &Protocol) -> Result<String, Token> {
        let value = match self.cursor.current() {
            Some(quote @ ('"' | '\'')) => {
                let open_position = self.cursor.position();
                self.cursor.advance();
                let mut value = String::new();
                loop {
                    match self.cursor.current() {
                        None => {
                            return Err(Token::error(
                                "unterminated attribute value",
                                open_position,
                            ))
                        }
                        Some(c) if c == quote => {
                            self.cursor.advance();
                            break;
                        }
                        Some('\\') => {
                            self.cursor.advance();
                            match self.cursor.current() {
                                Some(escaped) => {
                                    value.push(escaped);
                                    self.cursor.advance();
                                }
                                None => {
                                    return Err(Token::error(
                                        "unterminated attribute value",
                                        open_position,
                                    ))
                                }
                            }
                        }
                        Some(c) => {
                            value.push(c);
                            self.cursor.advance();
                        }
                    }
                }
                value
            }
            _ => {
                let start = self.cursor.pos();
                while let Some(c) = self.cursor.current() {
                    let ends_tag = self.cursor.starts_with(&protocol.close)
                        || protocol
                            .self_close_marker
                            .as_deref()
                            .is_some_and(|marker| self.cursor.starts_with(marker));
                    if c.is_whitespace() || ends_tag {
                        break;
                    }
                    self.cursor.advance();
                }
                self.cursor.slice_from(start).to_string()
            }
        };

        if self.config.decode_entities {
            Ok(decode_entities(&value).into_owned())
        } else {
            Ok(value)
        }
    }

    fn read_comment(&mut self, protocol: &Protocol, start: Position) -> Token {
        self.cursor.eat(&protocol.open);
        let content_start = self.cursor.pos();
        let content = loop {
            if self.cursor.is_eof() {
                break self.cursor.slice_from(content_start);
            }
            if self.cursor.starts_with(&protocol.close) {
                let content = self.cursor.slice_from(content_start);
                self.cursor.eat(&protocol.close);
                break content;
            }
            self.cursor.advance();
        };
        Token::new(TokenKind::Comment, content.trim(), start)
    }

    /// Verbatim capture from the open sequence through the close sequence,
    /// or to the end of input when the close sequence never appears
    fn read_protocol(&mut self, protocol: &Protocol, start: Position) -> Token {
        let capture_start = self.cursor.pos();
        self.cursor.eat(&protocol.open);
        while !self.cursor.is_eof() && !self.cursor.eat(&protocol.close) {
            self.cursor.advance();
        }
        Token::new(
            protocol.token_kind,
            self.cursor.slice_from(capture_start),
            start,
        )
    }

    fn read_text(&mut self, start: Position) -> Token {
        let protocols = self.config.protocols();
        let text_start = self.cursor.pos();
        while let Some(c) = self.cursor.current() {
            if protocols.is_start_char(c)
                && protocols
                    .match_at(self.cursor.input(), self.cursor.pos())
                    .is_some()
            {
                break;
            }
            self.cursor.advance();
        }

        let mut text = self.cursor.slice_from(text_start);
        if self.config.trim_whitespace {
            text = text.trim();
        }
        let text = if self.config.decode_entities {
            decode_entities(text)
        } else {
            text.into()
        };
        Token::new(TokenKind::Text, text, start)
    }
}

fn is_name_start(c: char) -> bool {
    c.is_alphabetic() || matches!(c, '_' | '-' | ':')
}

fn is_name_char(c: char) -> bool {
    c.is_alphanumeric() || matches!(c, '_' | '-' | ':')
}
