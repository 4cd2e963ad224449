/// How attributes are ordered in an open tag
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AttributeOrder {
    /// Order in which the attributes were parsed or inserted
    #[default]
    Insertion,
    /// Sorted by attribute name
    Sorted,
}

/// How a self-closing element is written
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum EmptyElementStyle {
    /// `<tag />`
    #[default]
    SelfClosing,
    /// `<tag></tag>`
    Paired,
    /// `<tag>` for configured void elements, `<tag></tag>` otherwise
    VoidAware,
}

/// Configuration options for rendering
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// String repeated once per nesting level
    pub indent: String,
    /// Escape `& < > " '` in text content
    pub escape_text: bool,
    /// Escape attribute values
    pub escape_attributes: bool,
    /// Write text content untrimmed
    pub preserve_whitespace: bool,
    /// Write everything on one line without indentation
    pub compact: bool,
    pub attribute_order: AttributeOrder,
    pub empty_element_style: EmptyElementStyle,
    /// Write processing instructions and doctypes
    pub include_declarations: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            indent: "  ".to_string(),
            escape_text: true,
            escape_attributes: true,
            preserve_whitespace: false,
            compact: false,
            attribute_order: AttributeOrder::Insertion,
            empty_element_style: EmptyElementStyle::SelfClosing,
            include_declarations: true,
        }
    }
}

impl RenderOptions {
    pub fn compact() -> Self {
        Self {
            compact: true,
            ..Self::default()
        }
    }
}

/// Options for the validation pass run before rendering
#[derive(Debug, Clone, Default)]
pub struct ValidationOptions {
    /// Also reject text holding replacement or control characters
    pub validate_text_encoding: bool,
    /// Options used once validation passes
    pub render: RenderOptions,
}
