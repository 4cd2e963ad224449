//! Recursive descent parser for tag-bracketed markup
//!
//! The parser keeps two tokens of lookahead and builds a [`Document`] from
//! the lexer's token stream. It stops at the first failure: there is no
//! error recovery and no partial tree.

pub mod config;

pub use config::{
    AttributeProcessor, BooleanAttributes, ParserConfig, ParsingContext, RawAttributes,
    DEFAULT_MAX_DEPTH, DEFAULT_MAX_INPUT_SIZE,
};

use std::mem;

use tracing::trace;

use crate::ast::{Attributes, CData, Comment, Doctype, Document, Element, Node, ProcessingInstruction, Text};
use crate::error::{ParseError, ParseErrorKind, Position, Result};
use crate::lexer::{Lexer, Token, TokenKind};

/// Parser for markup documents
#[derive(Debug)]
pub struct Parser<'a> {
    lexer: Lexer<'a>,
    config: &'a ParserConfig,
    context: ParsingContext,
    /// Token being processed
    current: Token,
    /// Token after `current`
    peek: Token,
}

impl<'a> Parser<'a> {
    /// Creates a parser over `input`, rejecting inputs above the size limit
    pub fn new(input: &'a str, config: &'a ParserConfig) -> Result<Self> {
        config.validate_input_size(input.len())?;
        let mut lexer = Lexer::new(input, config);
        let current = lexer.next_token();
        let peek = lexer.next_token();
        Ok(Self {
            lexer,
            config,
            context: ParsingContext::new(),
            current,
            peek,
        })
    }

    fn advance(&mut self) {
        let next = self.lexer.next_token();
        self.current = mem::replace(&mut self.peek, next);
    }

    /// Parses a complete document
    pub fn parse(&mut self) -> Result<Document> {
        let mut document = Document::new(Vec::new());
        while let Some(node) = self.parse_node()? {
            document.children.push(node);
        }
        Ok(document)
    }

    /// Parses the node at the current token; `None` at end of input
    fn parse_node(&mut self) -> Result<Option<Node>> {
        self.skip_comments();

        let position = self.current.position;
        let node = match self.current.kind {
            TokenKind::Eof => return Ok(None),
            TokenKind::OpenTag => return self.parse_element().map(|e| Some(Node::Element(e))),
            TokenKind::SelfCloseTag => {
                let mut element = self.open_element()?;
                element.self_close = true;
                Node::Element(element)
            }
            TokenKind::Text => Node::Text(Text {
                content: self.take_literal(),
                position,
            }),
            TokenKind::Comment => Node::Comment(Comment {
                content: self.take_literal(),
                position,
            }),
            TokenKind::ProcessingInstruction => Node::ProcessingInstruction(ProcessingInstruction {
                content: self.declaration_content(),
                position,
            }),
            TokenKind::Doctype => Node::Doctype(Doctype {
                content: self.declaration_content(),
                position,
            }),
            TokenKind::CData => Node::CData(CData {
                content: self.declaration_content(),
                position,
            }),
            TokenKind::Error => {
                return Err(ParseError::with_message(
                    ParseErrorKind::Lexical,
                    position,
                    self.take_literal(),
                ))
            }
            TokenKind::CloseTag => {
                return Err(ParseError::with_message(
                    ParseErrorKind::UnexpectedToken,
                    position,
                    format!("unexpected token: close tag </{}>", self.current.literal),
                ))
            }
        };

        self.advance();
        Ok(Some(node))
    }

    fn parse_element(&mut self) -> Result<Element> {
        let mut element = self.open_element()?;
        self.advance();

        if self.config.is_void_element(&element.name) {
            element.self_close = true;
            return Ok(element);
        }

        self.context.enter_nested(self.config, element.position)?;
        trace!(name = %element.name, depth = self.context.depth(), "entered element");
        loop {
            self.skip_comments();
            match self.current.kind {
                TokenKind::CloseTag => {
                    if !self.config.names_match(&element.name, &self.current.literal) {
                        return Err(ParseError::new(
                            ParseErrorKind::MismatchedTag {
                                expected: element.name,
                                found: mem::take(&mut self.current.literal),
                            },
                            self.current.position,
                        ));
                    }
                    self.advance();
                    break;
                }
                TokenKind::Eof => {
                    return Err(ParseError::with_message(
                        ParseErrorKind::UnexpectedEof,
                        self.current.position,
                        format!("unexpected end of input: missing </{}>", element.name),
                    ));
                }
                _ => {
                    if let Some(child) = self.parse_node()? {
                        element.children.push(child);
                    }
                }
            }
        }
        self.context.exit_nested();

        Ok(element)
    }

    /// Build an element from the current open or self-close tag token,
    /// running every attribute through the configured processor
    fn open_element(&mut self) -> Result<Element> {
        let position = self.current.position;
        let name = self.take_literal();
        let raw = self.current.attributes.take().unwrap_or_default();

        let processor = self.config.attribute_processor();
        let mut attributes = Attributes::with_capacity(raw.len());
        for (key, value) in raw {
            let (key, value) = processor
                .process_attribute(&key, &value)
                .map_err(|e| attribute_error(position, &e))?;
            attributes.insert(key, value);
        }

        Ok(Element {
            name,
            attributes,
            children: Vec::new(),
            self_close: false,
            position,
        })
    }

    /// Step over comment tokens when the config drops them
    fn skip_comments(&mut self) {
        while self.current.kind == TokenKind::Comment && self.config.skip_comments {
            self.advance();
        }
    }

    fn take_literal(&mut self) -> String {
        mem::take(&mut self.current.literal)
    }

    fn declaration_content(&self) -> String {
        self.config
            .protocols()
            .strip_delimiters(&self.current.literal)
            .to_string()
    }
}

fn attribute_error(position: Position, err: &crate::error::AttributeError) -> ParseError {
    ParseError::with_message(ParseErrorKind::Attribute, position, err.to_string())
}
