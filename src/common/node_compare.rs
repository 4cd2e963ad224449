use crate::ast::{Document, Element, Node};

/// Structural equality of two nodes, ignoring source positions
///
/// Attribute maps compare without regard to insertion order.
pub fn nodes_equal(left: &Node, right: &Node) -> bool {
    match (left, right) {
        (Node::Document(l), Node::Document(r)) => documents_equal(l, r),
        (Node::Element(l), Node::Element(r)) => elements_equal(l, r),
        (Node::Text(l), Node::Text(r)) => l.content == r.content,
        (Node::Comment(l), Node::Comment(r)) => l.content == r.content,
        (Node::ProcessingInstruction(l), Node::ProcessingInstruction(r)) => l.content == r.content,
        (Node::Doctype(l), Node::Doctype(r)) => l.content == r.content,
        (Node::CData(l), Node::CData(r)) => l.content == r.content,
        _ => false,
    }
}

pub fn documents_equal(left: &Document, right: &Document) -> bool {
    children_equal(&left.children, &right.children)
}

pub fn elements_equal(left: &Element, right: &Element) -> bool {
    left.name == right.name
        && left.self_close == right.self_close
        && left.attributes == right.attributes
        && children_equal(&left.children, &right.children)
}

fn children_equal(left: &[Node], right: &[Node]) -> bool {
    left.len() == right.len()
        && left
            .iter()
            .zip(right.iter())
            .all(|(l, r)| nodes_equal(l, r))
}
