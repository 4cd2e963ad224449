//! Document tree produced by the parser

use std::fmt;

use indexmap::IndexMap;

use crate::error::{NodeKind, Position};

/// Processed attributes of an element, keyed by name
pub type Attributes = IndexMap<String, AttributeValue>;

/// Attribute value after the attribute processor has run
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AttributeValue {
    Text(String),
    Bool(bool),
}

impl AttributeValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            Self::Bool(_) => None,
        }
    }

    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            Self::Text(_) => None,
        }
    }
}

impl From<&str> for AttributeValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for AttributeValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<bool> for AttributeValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl fmt::Display for AttributeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(s) => f.write_str(s),
            Self::Bool(b) => write!(f, "{b}"),
        }
    }
}

/// Root of a parsed document
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Document {
    pub children: Vec<Node>,
    pub position: Position,
}

impl Document {
    pub fn new(children: Vec<Node>) -> Self {
        Self {
            children,
            position: Position::start(),
        }
    }
}

/// Tag with attributes and children
#[derive(Clone, Debug, PartialEq)]
pub struct Element {
    pub name: String,
    pub attributes: Attributes,
    pub children: Vec<Node>,
    /// Written as `<name/>` or configured as a void element
    pub self_close: bool,
    pub position: Position,
}

impl Element {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: Attributes::new(),
            children: Vec::new(),
            self_close: false,
            position: Position::default(),
        }
    }

    pub fn self_closing(name: impl Into<String>) -> Self {
        Self {
            self_close: true,
            ..Self::new(name)
        }
    }

    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<AttributeValue>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    pub fn with_child(mut self, child: impl Into<Node>) -> Self {
        self.children.push(child.into());
        self
    }

    pub fn attribute(&self, key: &str) -> Option<&AttributeValue> {
        self.attributes.get(key)
    }

    /// Iterate over child elements, skipping text and other leaves
    pub fn child_elements(&self) -> impl Iterator<Item = &Self> {
        self.children.iter().filter_map(Node::as_element)
    }
}

/// Character data between tags
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Text {
    pub content: String,
    pub position: Position,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Comment {
    pub content: String,
    pub position: Position,
}

/// Content between `<?` and `?>`, e.g. `xml version="1.0"`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProcessingInstruction {
    pub content: String,
    pub position: Position,
}

impl ProcessingInstruction {
    /// First word of the instruction
    pub fn target(&self) -> &str {
        self.content.split_whitespace().next().unwrap_or_default()
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Doctype {
    pub content: String,
    pub position: Position,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CData {
    pub content: String,
    pub position: Position,
}

macro_rules! leaf_constructors {
    ($($ty:ident),*) => {
        $(
            impl $ty {
                pub fn new(content: impl Into<String>) -> Self {
                    Self {
                        content: content.into(),
                        position: Position::default(),
                    }
                }
            }

            impl From<$ty> for Node {
                fn from(value: $ty) -> Self {
                    Self::$ty(value)
                }
            }
        )*
    };
}

leaf_constructors!(Text, Comment, ProcessingInstruction, Doctype, CData);

/// Any node of the tree
#[derive(Clone, Debug, PartialEq)]
pub enum Node {
    Document(Document),
    Element(Element),
    Text(Text),
    Comment(Comment),
    ProcessingInstruction(ProcessingInstruction),
    Doctype(Doctype),
    CData(CData),
}

impl Node {
    pub const fn kind(&self) -> NodeKind {
        match self {
            Self::Document(_) => NodeKind::Document,
            Self::Element(_) => NodeKind::Element,
            Self::Text(_) => NodeKind::Text,
            Self::Comment(_) => NodeKind::Comment,
            Self::ProcessingInstruction(_) => NodeKind::ProcessingInstruction,
            Self::Doctype(_) => NodeKind::Doctype,
            Self::CData(_) => NodeKind::CData,
        }
    }

    pub const fn position(&self) -> Position {
        match self {
            Self::Document(n) => n.position,
            Self::Element(n) => n.position,
            Self::Text(n) => n.position,
            Self::Comment(n) => n.position,
            Self::ProcessingInstruction(n) => n.position,
            Self::Doctype(n) => n.position,
            Self::CData(n) => n.position,
        }
    }

    /// Children of container nodes; leaves have none
    pub fn children(&self) -> &[Self] {
        match self {
            Self::Document(n) => &n.children,
            Self::Element(n) => &n.children,
            _ => &[],
        }
    }

    pub const fn as_element(&self) -> Option<&Element> {
        match self {
            Self::Element(e) => Some(e),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(t) => Some(&t.content),
            _ => None,
        }
    }
}

impl From<Document> for Node {
    fn from(value: Document) -> Self {
        Self::Document(value)
    }
}

impl From<Element> for Node {
    fn from(value: Element) -> Self {
        Self::Element(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_element_builder() {
        let element = Element::new("input")
            .with_attribute("type", "checkbox")
            .with_attribute("checked", true)
            .with_child(Text::new("label"));
        assert_eq!(element.attribute("type"), Some(&AttributeValue::from("checkbox")));
        assert_eq!(element.attribute("checked").and_then(AttributeValue::as_bool), Some(true));
        assert_eq!(element.children.len(), 1);
        assert!(!element.self_close);
    }

    #[test]
    fn test_node_accessors() {
        let node = Node::from(Element::new("a").with_child(Text::new("x")));
        assert_eq!(node.kind(), NodeKind::Element);
        assert_eq!(node.children().len(), 1);
        assert_eq!(node.children()[0].as_text(), Some("x"));
        assert!(Node::from(Comment::new("c")).children().is_empty());
    }

    #[test]
    fn test_pi_target() {
        let pi = ProcessingInstruction::new("xml version=\"1.0\"");
        assert_eq!(pi.target(), "xml");
        assert_eq!(ProcessingInstruction::new("").target(), "");
    }

    #[test]
    fn test_attribute_order_irrelevant_for_equality() {
        let a = Element::new("a").with_attribute("x", "1").with_attribute("y", "2");
        let b = Element::new("a").with_attribute("y", "2").with_attribute("x", "1");
        assert_eq!(a, b);
    }
}
