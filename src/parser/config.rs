use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use crate::ast::AttributeValue;
use crate::error::{AttributeError, ParseError, ParseErrorKind, Position, ProtocolError, Result};
use crate::protocol::{Protocol, ProtocolTable};

/// Maximum element nesting depth (256); recursion depth of the parser
/// and renderer follows markup nesting
pub const DEFAULT_MAX_DEPTH: usize = 256;
/// Maximum input size (10MB); the whole input is held in memory
pub const DEFAULT_MAX_INPUT_SIZE: usize = 10 * 1024 * 1024;

/// Strategy applied to every raw attribute when an element is built
pub trait AttributeProcessor: fmt::Debug + Send + Sync {
    /// Turn a raw `key`/`value` pair into the pair stored on the element
    fn process_attribute(
        &self,
        key: &str,
        value: &str,
    ) -> std::result::Result<(String, AttributeValue), AttributeError>;

    /// Whether `key` names an attribute whose presence alone is its value
    fn is_boolean_attribute(&self, key: &str) -> bool;
}

/// Keeps attributes exactly as written
#[derive(Clone, Copy, Debug, Default)]
pub struct RawAttributes;

impl AttributeProcessor for RawAttributes {
    fn process_attribute(
        &self,
        key: &str,
        value: &str,
    ) -> std::result::Result<(String, AttributeValue), AttributeError> {
        Ok((key.to_string(), AttributeValue::Text(value.to_string())))
    }

    fn is_boolean_attribute(&self, _key: &str) -> bool {
        false
    }
}

/// Treats valueless attributes, and any listed names, as `true`
#[derive(Clone, Debug, Default)]
pub struct BooleanAttributes {
    names: HashSet<String>,
}

impl BooleanAttributes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            names: names.into_iter().map(Into::into).collect(),
        }
    }
}

impl AttributeProcessor for BooleanAttributes {
    fn process_attribute(
        &self,
        key: &str,
        value: &str,
    ) -> std::result::Result<(String, AttributeValue), AttributeError> {
        let value = if value.is_empty() || self.is_boolean_attribute(key) {
            AttributeValue::Bool(true)
        } else {
            AttributeValue::Text(value.to_string())
        };
        Ok((key.to_string(), value))
    }

    fn is_boolean_attribute(&self, key: &str) -> bool {
        self.names.contains(key)
    }
}

/// Configuration shared read-only by the lexer, parser and renderer
#[derive(Debug, Clone)]
pub struct ParserConfig {
    /// Compare tag names exactly; otherwise ASCII case-insensitively
    pub case_sensitive: bool,
    /// Trim leading and trailing whitespace from text tokens
    pub trim_whitespace: bool,
    /// Accept `<tag/>`; otherwise it is a lexical error
    pub allow_self_close_tags: bool,
    /// Drop comments instead of adding them to the tree
    pub skip_comments: bool,
    /// Decode character references in text and attribute values
    pub decode_entities: bool,
    /// Maximum element nesting depth
    pub max_depth: usize,
    /// Maximum input size in bytes
    pub max_input_size: usize,
    /// Tags that never have children or a close tag
    pub void_elements: HashSet<String>,
    pub attribute_processor: Arc<dyn AttributeProcessor>,
    /// Bracket conventions consulted by the lexer
    pub protocols: ProtocolTable,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            case_sensitive: true,
            trim_whitespace: true,
            allow_self_close_tags: true,
            skip_comments: false,
            decode_entities: true,
            max_depth: DEFAULT_MAX_DEPTH,
            max_input_size: DEFAULT_MAX_INPUT_SIZE,
            void_elements: HashSet::new(),
            attribute_processor: Arc::new(RawAttributes),
            protocols: ProtocolTable::default(),
        }
    }
}

impl fmt::Display for ParserConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ParserConfig {{ case_sensitive: {}, trim_whitespace: {}, allow_self_close_tags: {}, skip_comments: {}, void_elements: {}, protocols: {} }}",
            self.case_sensitive,
            self.trim_whitespace,
            self.allow_self_close_tags,
            self.skip_comments,
            self.void_elements.len(),
            self.protocols.len()
        )
    }
}

impl ParserConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the set of void elements
    pub fn with_void_elements<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.void_elements = names.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_attribute_processor(mut self, processor: impl AttributeProcessor + 'static) -> Self {
        self.attribute_processor = Arc::new(processor);
        self
    }

    /// Register a protocol and return the updated config
    pub fn with_protocol(mut self, protocol: Protocol) -> std::result::Result<Self, ProtocolError> {
        self.register_protocol(protocol)?;
        Ok(self)
    }

    pub fn register_protocol(&mut self, protocol: Protocol) -> std::result::Result<(), ProtocolError> {
        self.protocols.register(protocol)
    }

    pub fn protocols(&self) -> &ProtocolTable {
        &self.protocols
    }

    pub fn attribute_processor(&self) -> &dyn AttributeProcessor {
        self.attribute_processor.as_ref()
    }

    pub fn is_void_element(&self, name: &str) -> bool {
        if self.case_sensitive {
            self.void_elements.contains(name)
        } else {
            self.void_elements
                .iter()
                .any(|void| void.eq_ignore_ascii_case(name))
        }
    }

    /// Compare two tag names under the configured case sensitivity
    pub fn names_match(&self, left: &str, right: &str) -> bool {
        if self.case_sensitive {
            left == right
        } else {
            left.eq_ignore_ascii_case(right)
        }
    }

    pub fn validate_input_size(&self, size: usize) -> Result<()> {
        if size > self.max_input_size {
            return Err(ParseError::with_message(
                ParseErrorKind::MaxSizeExceeded {
                    max: self.max_input_size,
                },
                Position::start(),
                format!(
                    "input size ({size} bytes) exceeds maximum allowed ({})",
                    self.max_input_size
                ),
            ));
        }
        Ok(())
    }
}

/// Tracks element nesting depth during parsing
#[derive(Debug, Default)]
pub struct ParsingContext {
    current_depth: usize,
}

impl ParsingContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn enter_nested(&mut self, config: &ParserConfig, position: Position) -> Result<()> {
        self.current_depth += 1;
        if self.current_depth > config.max_depth {
            return Err(ParseError::new(
                ParseErrorKind::MaxDepthExceeded {
                    max: config.max_depth,
                },
                position,
            ));
        }
        Ok(())
    }

    pub fn exit_nested(&mut self) {
        self.current_depth = self.current_depth.saturating_sub(1);
    }

    pub const fn depth(&self) -> usize {
        self.current_depth
    }
}
