//! Depth-first traversal over the document tree
//!
//! [`walk`] calls the matching `visit_*` method for a node and then, for
//! documents and elements only, walks the children in order. The first
//! error returned by a visitor stops the traversal.

use crate::ast::{CData, Comment, Doctype, Document, Element, Node, ProcessingInstruction, Text};

/// Callbacks invoked by [`walk`]; every method defaults to doing nothing
pub trait Visitor {
    type Error;

    fn visit_document(&mut self, _document: &Document) -> Result<(), Self::Error> {
        Ok(())
    }

    fn visit_element(&mut self, _element: &Element) -> Result<(), Self::Error> {
        Ok(())
    }

    fn visit_text(&mut self, _text: &Text) -> Result<(), Self::Error> {
        Ok(())
    }

    fn visit_comment(&mut self, _comment: &Comment) -> Result<(), Self::Error> {
        Ok(())
    }

    fn visit_processing_instruction(
        &mut self,
        _instruction: &ProcessingInstruction,
    ) -> Result<(), Self::Error> {
        Ok(())
    }

    fn visit_doctype(&mut self, _doctype: &Doctype) -> Result<(), Self::Error> {
        Ok(())
    }

    fn visit_cdata(&mut self, _cdata: &CData) -> Result<(), Self::Error> {
        Ok(())
    }
}

/// Pre-order walk starting at `node`
pub fn walk<V>(node: &Node, visitor: &mut V) -> Result<(), V::Error>
where
    V: Visitor + ?Sized,
{
    match node {
        Node::Document(document) => walk_document(document, visitor),
        Node::Element(element) => walk_element(element, visitor),
        Node::Text(text) => visitor.visit_text(text),
        Node::Comment(comment) => visitor.visit_comment(comment),
        Node::ProcessingInstruction(instruction) => visitor.visit_processing_instruction(instruction),
        Node::Doctype(doctype) => visitor.visit_doctype(doctype),
        Node::CData(cdata) => visitor.visit_cdata(cdata),
    }
}

pub fn walk_document<V>(document: &Document, visitor: &mut V) -> Result<(), V::Error>
where
    V: Visitor + ?Sized,
{
    visitor.visit_document(document)?;
    walk_children(&document.children, visitor)
}

pub fn walk_element<V>(element: &Element, visitor: &mut V) -> Result<(), V::Error>
where
    V: Visitor + ?Sized,
{
    visitor.visit_element(element)?;
    walk_children(&element.children, visitor)
}

fn walk_children<V>(children: &[Node], visitor: &mut V) -> Result<(), V::Error>
where
    V: Visitor + ?Sized,
{
    for child in children {
        walk(child, visitor)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recorder {
        events: Vec<String>,
        stop_at: Option<&'static str>,
    }

    impl Visitor for Recorder {
        type Error = String;

        fn visit_document(&mut self, _document: &Document) -> Result<(), String> {
            self.events.push("document".to_string());
            Ok(())
        }

        fn visit_element(&mut self, element: &Element) -> Result<(), String> {
            self.events.push(format!("element:{}", element.name));
            if self.stop_at == Some(element.name.as_str()) {
                return Err(format!("stopped at {}", element.name));
            }
            Ok(())
        }

        fn visit_text(&mut self, text: &Text) -> Result<(), String> {
            self.events.push(format!("text:{}", text.content));
            Ok(())
        }

        fn visit_comment(&mut self, comment: &Comment) -> Result<(), String> {
            self.events.push(format!("comment:{}", comment.content));
            Ok(())
        }
    }

    fn sample() -> Node {
        Node::Document(Document::new(vec![
            Element::new("a")
                .with_child(Element::new("b").with_child(Text::new("x")))
                .with_child(Comment::new("c"))
                .into(),
            Element::new("d").into(),
        ]))
    }

    #[test]
    fn test_preorder() {
        let mut recorder = Recorder::default();
        walk(&sample(), &mut recorder).unwrap();
        assert_eq!(
            recorder.events,
            vec!["document", "element:a", "element:b", "text:x", "comment:c", "element:d"]
        );
    }

    #[test]
    fn test_error_aborts_walk() {
        let mut recorder = Recorder {
            stop_at: Some("b"),
            ..Recorder::default()
        };
        let err = walk(&sample(), &mut recorder).unwrap_err();
        assert_eq!(err, "stopped at b");
        assert_eq!(recorder.events, vec!["document", "element:a", "element:b"]);
    }

    #[test]
    fn test_default_methods_visit_nothing() {
        struct Silent;
        impl Visitor for Silent {
            type Error = ();
        }
        assert!(walk(&sample(), &mut Silent).is_ok());
    }
}
