//! tagtree: a configurable parser and renderer for tag-bracketed markup
//!
//! This crate provides functionality to:
//! - Tokenize markup driven by a table of bracket protocols
//! - Parse tokens into a document tree with source positions
//! - Walk the tree with a visitor
//! - Render the tree back into markup, optionally validating it first
//!
//! # Examples
//! ```
//! use tagtree::{parse, render, Result};
//!
//! fn example() -> Result<()> {
//!     let document = parse("<root>Hello</root>")?;
//!     let rendered = render(&document).expect("rendering into memory");
//!     assert_eq!(rendered, "<root>\n  Hello\n</root>\n");
//!     Ok(())
//! }
//! # example().unwrap();
//! ```
#![forbid(unsafe_code)]

use std::io::Write;

use tracing::{debug, instrument};

pub mod ast;
pub mod common;
pub mod error;
pub mod lexer;
pub mod parser;
pub mod protocol;
pub mod renderer;
pub mod visitor;

// Re-exports
pub use ast::{
    AttributeValue, Attributes, CData, Comment, Doctype, Document, Element, Node, ProcessingInstruction, Text,
};
pub use common::node_compare::{documents_equal, nodes_equal};
pub use error::{
    AttributeError, NodeKind, ParseError, ParseErrorKind, Position, ProtocolError, RenderError, Result,
    ValidationError,
};
pub use lexer::{Lexer, Token, TokenKind};
pub use parser::{AttributeProcessor, BooleanAttributes, Parser, ParserConfig, RawAttributes};
pub use protocol::{Protocol, ProtocolTable};
pub use renderer::{AttributeOrder, EmptyElementStyle, RenderOptions, Renderer, ValidationOptions};
pub use visitor::{walk, walk_document, walk_element, Visitor};

/// Parse `input` with the default configuration
pub fn parse(input: &str) -> Result<Document> {
    parse_with_config(input, &ParserConfig::default())
}

#[instrument(skip_all, fields(len = input.len()))]
pub fn parse_with_config(input: &str, config: &ParserConfig) -> Result<Document> {
    debug!("Starting to parse document");

    let result = Parser::new(input, config).and_then(|mut parser| parser.parse());
    match &result {
        Ok(document) => debug!(nodes = document.children.len(), "Parsing completed"),
        Err(e) => debug!(%e, "Parsing failed"),
    }
    result
}

/// Render `document` with the default options
pub fn render(document: &Document) -> std::result::Result<String, RenderError> {
    render_with_options(document, &RenderOptions::default())
}

#[instrument(skip_all, fields(nodes = document.children.len()))]
pub fn render_with_options(document: &Document, options: &RenderOptions) -> std::result::Result<String, RenderError> {
    let output = Renderer::new(options).render(document)?;
    debug!(len = output.len(), "Rendering completed");
    Ok(output)
}

/// Render with `config` supplying void elements and boolean attributes
///
/// [`EmptyElementStyle::VoidAware`] and bare boolean attributes depend on
/// the config; without one every self-closing element counts as non-void.
#[instrument(skip_all, fields(nodes = document.children.len()))]
pub fn render_with_config(
    document: &Document,
    options: &RenderOptions,
    config: &ParserConfig,
) -> std::result::Result<String, RenderError> {
    let output = Renderer::new(options).with_config(config).render(document)?;
    debug!(len = output.len(), "Rendering completed");
    Ok(output)
}

/// Stream `document` into `writer`; writer errors are returned unchanged
pub fn render_to_writer<W>(
    document: &Document,
    options: &RenderOptions,
    writer: &mut W,
) -> std::result::Result<(), RenderError>
where
    W: Write + ?Sized,
{
    Renderer::new(options).render_to_writer(document, writer)
}

pub fn render_element(element: &Element, options: &RenderOptions) -> std::result::Result<String, RenderError> {
    Renderer::new(options).render_element(element)
}

pub fn render_element_to_writer<W>(
    element: &Element,
    options: &RenderOptions,
    writer: &mut W,
) -> std::result::Result<(), RenderError>
where
    W: Write + ?Sized,
{
    Renderer::new(options).render_element_to_writer(element, writer)
}

/// Validate names (and optionally text encoding) before rendering
///
/// Nothing is rendered when validation fails.
#[instrument(skip_all)]
pub fn render_with_validation(
    document: &Document,
    options: &ValidationOptions,
) -> std::result::Result<String, RenderError> {
    if let Err(e) = renderer::validate(document, options) {
        debug!(%e, "Validation failed");
        return Err(e.into());
    }
    render_with_options(document, &options.render)
}
