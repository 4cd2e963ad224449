//! Validation pass run before rendering

use crate::ast::{Document, Element, Text};
use crate::error::{NodeKind, ValidationError};
use crate::renderer::options::ValidationOptions;
use crate::visitor::{walk_document, Visitor};

/// Checks names against `[A-Za-z_][A-Za-z0-9_.-]*` and, when requested,
/// text content encoding
#[derive(Debug)]
pub struct Validator<'a> {
    options: &'a ValidationOptions,
}

impl<'a> Validator<'a> {
    pub const fn new(options: &'a ValidationOptions) -> Self {
        Self { options }
    }
}

impl Visitor for Validator<'_> {
    type Error = ValidationError;

    fn visit_element(&mut self, element: &Element) -> Result<(), ValidationError> {
        if !is_valid_name(&element.name) {
            return Err(ValidationError::new(
                format!("invalid tag name {:?}", element.name),
                element.position,
                NodeKind::Element,
            ));
        }
        if let Some(key) = element.attributes.keys().find(|key| !is_valid_name(key)) {
            return Err(ValidationError::new(
                format!("invalid attribute name {key:?} on <{}>", element.name),
                element.position,
                NodeKind::Element,
            ));
        }
        Ok(())
    }

    fn visit_text(&mut self, text: &Text) -> Result<(), ValidationError> {
        if !self.options.validate_text_encoding {
            return Ok(());
        }
        match text.content.chars().find(|&c| !is_encodable_char(c)) {
            Some(c) => Err(ValidationError::new(
                format!("text contains invalid character U+{:04X}", u32::from(c)),
                text.position,
                NodeKind::Text,
            )),
            None => Ok(()),
        }
    }
}

/// Run the validation pass over a whole document
pub fn validate(document: &Document, options: &ValidationOptions) -> Result<(), ValidationError> {
    walk_document(document, &mut Validator::new(options))
}

/// Whether `name` matches `[A-Za-z_][A-Za-z0-9_.-]*`
pub fn is_valid_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-'))
}

/// Strings are UTF-8 by construction, so text is checked for what lossy
/// decoding leaves behind: U+FFFD and control characters other than
/// tab, line feed and carriage return
fn is_encodable_char(c: char) -> bool {
    c != char::REPLACEMENT_CHARACTER && (!c.is_control() || matches!(c, '\t' | '\n' | '\r'))
}
