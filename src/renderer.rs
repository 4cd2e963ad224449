//! Serializes a document tree back into markup
//!
//! Rendering writes straight into any [`std::io::Write`] sink node by node,
//! so large trees never need an intermediate string. The string-returning
//! entry points render into an in-memory buffer.

pub mod options;
pub mod validate;

pub use options::{AttributeOrder, EmptyElementStyle, RenderOptions, ValidationOptions};
pub use validate::{is_valid_name, validate, Validator};

use std::borrow::Cow;
use std::io::{self, Write};

use crate::ast::{AttributeValue, Document, Element, Node};
use crate::common::escape::{escape_attribute, escape_text};
use crate::error::RenderError;
use crate::parser::config::ParserConfig;

/// Markup renderer
#[derive(Debug, Clone, Copy)]
pub struct Renderer<'a> {
    options: &'a RenderOptions,
    /// Source of void-element and boolean-attribute lookups
    config: Option<&'a ParserConfig>,
}

impl<'a> Renderer<'a> {
    pub const fn new(options: &'a RenderOptions) -> Self {
        Self {
            options,
            config: None,
        }
    }

    /// Use `config` for void-element and boolean-attribute decisions
    pub const fn with_config(mut self, config: &'a ParserConfig) -> Self {
        self.config = Some(config);
        self
    }

    pub fn render(&self, document: &Document) -> Result<String, RenderError> {
        let mut buffer = Vec::new();
        self.render_to_writer(document, &mut buffer)?;
        Ok(into_string(buffer))
    }

    pub fn render_to_writer<W>(&self, document: &Document, writer: &mut W) -> Result<(), RenderError>
    where
        W: Write + ?Sized,
    {
        self.write_children(&document.children, 0, writer)?;
        writer.flush()?;
        Ok(())
    }

    pub fn render_element(&self, element: &Element) -> Result<String, RenderError> {
        let mut buffer = Vec::new();
        self.render_element_to_writer(element, &mut buffer)?;
        Ok(into_string(buffer))
    }

    pub fn render_element_to_writer<W>(&self, element: &Element, writer: &mut W) -> Result<(), RenderError>
    where
        W: Write + ?Sized,
    {
        self.write_element(element, 0, writer)?;
        writer.flush()?;
        Ok(())
    }

    fn write_children<W>(&self, children: &[Node], depth: usize, w: &mut W) -> io::Result<()>
    where
        W: Write + ?Sized,
    {
        for child in children {
            self.write_node(child, depth, w)?;
        }
        Ok(())
    }

    fn write_node<W>(&self, node: &Node, depth: usize, w: &mut W) -> io::Result<()>
    where
        W: Write + ?Sized,
    {
        match node {
            Node::Document(document) => self.write_children(&document.children, depth, w),
            Node::Element(element) => self.write_element(element, depth, w),
            Node::Text(text) => {
                let content = self.prepare_text(&text.content);
                if content.is_empty() {
                    return Ok(());
                }
                self.write_text_block(&content, depth, w)
            }
            Node::Comment(comment) => {
                self.write_line(depth, w, format_args!("<!-- {} -->", comment.content))
            }
            Node::ProcessingInstruction(instruction) => {
                if !self.options.include_declarations {
                    return Ok(());
                }
                self.write_line(depth, w, format_args!("<?{}?>", instruction.content))
            }
            Node::Doctype(doctype) => {
                if !self.options.include_declarations {
                    return Ok(());
                }
                match doctype.content.trim() {
                    "" => self.write_line(depth, w, format_args!("<!DOCTYPE>")),
                    content => self.write_line(depth, w, format_args!("<!DOCTYPE {content}>")),
                }
            }
            Node::CData(cdata) => {
                self.write_line(depth, w, format_args!("<![CDATA[{}]]>", cdata.content))
            }
        }
    }

    fn write_element<W>(&self, element: &Element, depth: usize, w: &mut W) -> io::Result<()>
    where
        W: Write + ?Sized,
    {
        self.write_indent(depth, w)?;
        write!(w, "<{}", element.name)?;
        self.write_attributes(element, w)?;

        if element.self_close {
            match self.options.empty_element_style {
                EmptyElementStyle::SelfClosing => w.write_all(b" />")?,
                EmptyElementStyle::VoidAware if self.is_void_element(&element.name) => {
                    w.write_all(b">")?;
                }
                EmptyElementStyle::Paired | EmptyElementStyle::VoidAware => {
                    write!(w, "></{}>", element.name)?;
                }
            }
            return self.write_newline(w);
        }

        w.write_all(b">")?;
        match element.children.as_slice() {
            [] => {}
            [Node::Text(text)] => {
                let content = self.prepare_text(&text.content);
                if self.options.compact {
                    w.write_all(content.as_bytes())?;
                } else if !content.is_empty() {
                    self.write_newline(w)?;
                    self.write_text_block(&content, depth + 1, w)?;
                    self.write_indent(depth, w)?;
                }
            }
            children => {
                self.write_newline(w)?;
                self.write_children(children, depth + 1, w)?;
                self.write_indent(depth, w)?;
            }
        }
        write!(w, "</{}>", element.name)?;
        self.write_newline(w)
    }

    fn write_attributes<W>(&self, element: &Element, w: &mut W) -> io::Result<()>
    where
        W: Write + ?Sized,
    {
        let mut entries: Vec<(&String, &AttributeValue)> = element.attributes.iter().collect();
        if self.options.attribute_order == AttributeOrder::Sorted {
            entries.sort_by_key(|(key, _)| *key);
        }

        for (key, value) in entries {
            match value {
                AttributeValue::Bool(false) => {}
                AttributeValue::Bool(true) => write!(w, " {key}")?,
                AttributeValue::Text(text) if text.is_empty() || self.is_boolean_attribute(key) => {
                    write!(w, " {key}")?;
                }
                AttributeValue::Text(text) => {
                    let text = if self.options.escape_attributes {
                        escape_attribute(text)
                    } else {
                        Cow::Borrowed(text.as_str())
                    };
                    write!(w, " {key}=\"{text}\"")?;
                }
            }
        }
        Ok(())
    }

    /// Text on its own line at `depth`; multi-line text keeps its line
    /// breaks and only non-blank lines are indented
    fn write_text_block<W>(&self, text: &str, depth: usize, w: &mut W) -> io::Result<()>
    where
        W: Write + ?Sized,
    {
        if self.options.compact {
            return w.write_all(text.as_bytes());
        }
        for (i, line) in text.split('\n').enumerate() {
            if i > 0 {
                w.write_all(b"\n")?;
            }
            if !line.trim().is_empty() {
                self.write_indent(depth, w)?;
                w.write_all(line.as_bytes())?;
            }
        }
        self.write_newline(w)
    }

    fn write_line<W>(&self, depth: usize, w: &mut W, content: std::fmt::Arguments<'_>) -> io::Result<()>
    where
        W: Write + ?Sized,
    {
        self.write_indent(depth, w)?;
        w.write_fmt(content)?;
        self.write_newline(w)
    }

    fn write_indent<W>(&self, depth: usize, w: &mut W) -> io::Result<()>
    where
        W: Write + ?Sized,
    {
        if self.options.compact {
            return Ok(());
        }
        for _ in 0..depth {
            w.write_all(self.options.indent.as_bytes())?;
        }
        Ok(())
    }

    fn write_newline<W>(&self, w: &mut W) -> io::Result<()>
    where
        W: Write + ?Sized,
    {
        if self.options.compact {
            Ok(())
        } else {
            w.write_all(b"\n")
        }
    }

    fn prepare_text<'t>(&self, content: &'t str) -> Cow<'t, str> {
        let content = if self.options.preserve_whitespace {
            content
        } else {
            content.trim()
        };
        if self.options.escape_text {
            escape_text(content)
        } else {
            Cow::Borrowed(content)
        }
    }

    fn is_void_element(&self, name: &str) -> bool {
        self.config.is_some_and(|config| config.is_void_element(name))
    }

    fn is_boolean_attribute(&self, key: &str) -> bool {
        self.config
            .is_some_and(|config| config.attribute_processor().is_boolean_attribute(key))
    }
}

fn into_string(buffer: Vec<u8>) -> String {
    String::from_utf8(buffer).unwrap_or_else(|e| String::from_utf8_lossy(e.as_bytes()).into_owned())
}
