#![allow(clippy::panic_in_result_fn)]
#![allow(clippy::panic)]
#![allow(clippy::unwrap_used)]
#![allow(clippy::indexing_slicing)]

use tagtree::{
    parse, parse_with_config, AttributeValue, BooleanAttributes, Document, Element, Node, ParseErrorKind,
    ParserConfig, Protocol, Result, Text, TokenKind,
};

fn only_element(doc: &Document) -> &Element {
    assert_eq!(doc.children.len(), 1, "expected a single root node: {doc:?}");
    doc.children[0].as_element().unwrap()
}

#[test]
fn test_nested_elements() -> Result<()> {
    let doc = parse("<root><child>text</child></root>")?;
    let expected = Document::new(vec![Element::new("root")
        .with_child(Element::new("child").with_child(Text::new("text")))
        .into()]);
    assert!(tagtree::documents_equal(&doc, &expected));
    Ok(())
}

#[test]
fn test_comment_document() -> Result<()> {
    let doc = parse("<!-- c -->")?;
    match doc.children.as_slice() {
        [Node::Comment(comment)] => assert_eq!(comment.content, "c"),
        other => panic!("expected one comment, got {other:?}"),
    }
    Ok(())
}

#[test]
fn test_comment_wins_over_tag() -> Result<()> {
    let doc = parse("<!-- x --><a></a>")?;
    assert!(matches!(doc.children[0], Node::Comment(_)));
    assert!(matches!(doc.children[1], Node::Element(_)));
    Ok(())
}

#[test]
fn test_comment_with_lone_dashes() -> Result<()> {
    let doc = parse("<!-- a - b -- c -->")?;
    match &doc.children[0] {
        Node::Comment(comment) => assert_eq!(comment.content, "a - b -- c"),
        other => panic!("expected comment, got {other:?}"),
    }
    Ok(())
}

#[test]
fn test_unterminated_comment_runs_to_eof() -> Result<()> {
    let doc = parse("<a></a><!-- never closed")?;
    match &doc.children[1] {
        Node::Comment(comment) => assert_eq!(comment.content, "never closed"),
        other => panic!("expected comment, got {other:?}"),
    }
    Ok(())
}

#[test]
fn test_skipped_comments_before_close_tag() -> Result<()> {
    let config = ParserConfig {
        skip_comments: true,
        ..ParserConfig::default()
    };

    let doc = parse_with_config("<p><!-- c --></p>", &config)?;
    assert!(only_element(&doc).children.is_empty());

    let doc = parse_with_config("<p>x<!-- c --></p>", &config)?;
    let p = only_element(&doc);
    assert_eq!(p.children.len(), 1);
    assert_eq!(p.children[0].as_text(), Some("x"));

    let doc = parse_with_config("<a><!-- 1 --><b><!-- 2 --></b><!-- 3 --><!-- 4 --></a><!-- 5 -->", &config)?;
    let a = only_element(&doc);
    assert_eq!(a.children.len(), 1);
    assert!(a.children[0].children().is_empty());
    Ok(())
}

#[test]
fn test_self_close_policy() -> Result<()> {
    let doc = parse(r#"<img src="a.jpg" />"#)?;
    let img = only_element(&doc);
    assert!(img.self_close);
    assert_eq!(img.attribute("src"), Some(&AttributeValue::from("a.jpg")));

    let strict = ParserConfig {
        allow_self_close_tags: false,
        ..ParserConfig::default()
    };
    let err = parse_with_config(r#"<img src="a.jpg" />"#, &strict).unwrap_err();
    assert_eq!(err.kind(), &ParseErrorKind::Lexical);
    assert!(err.message().contains("self-closing"));
    Ok(())
}

#[test]
fn test_void_idempotence() -> Result<()> {
    let config = ParserConfig::default().with_void_elements(["img", "br"]);
    for input in ["<img>", "<img/>", "<img />", r#"<img src="x">"#] {
        let doc = parse_with_config(input, &config)?;
        let img = only_element(&doc);
        assert!(img.self_close, "{input}");
        assert!(img.children.is_empty(), "{input}");
    }
    Ok(())
}

#[test]
fn test_mismatched_tags_reported() {
    let err = parse("<a><b></a></b>").unwrap_err();
    assert!(matches!(
        err.kind(),
        ParseErrorKind::MismatchedTag { expected, found } if expected == "b" && found == "a"
    ));
    assert!(err.to_string().contains("mismatched tags"));
}

#[test]
fn test_attribute_fidelity() -> Result<()> {
    let config = ParserConfig::default().with_void_elements(["input"]);
    let doc = parse_with_config(r#"<input type="checkbox" checked>"#, &config)?;
    let input = only_element(&doc);
    assert_eq!(input.attribute("type"), Some(&AttributeValue::from("checkbox")));
    assert_eq!(input.attribute("checked"), Some(&AttributeValue::from("")));

    let config = config.with_attribute_processor(BooleanAttributes::new());
    let doc = parse_with_config(r#"<input type="checkbox" checked>"#, &config)?;
    let input = only_element(&doc);
    assert_eq!(input.attribute("type"), Some(&AttributeValue::from("checkbox")));
    assert_eq!(input.attribute("checked"), Some(&AttributeValue::Bool(true)));
    Ok(())
}

#[test]
fn test_attribute_order_preserved() -> Result<()> {
    let doc = parse(r#"<a z="1" b='2' m=3></a>"#)?;
    let keys: Vec<&str> = only_element(&doc).attributes.keys().map(String::as_str).collect();
    assert_eq!(keys, vec!["z", "b", "m"]);
    Ok(())
}

#[test]
fn test_escaped_quotes_in_attribute() -> Result<()> {
    let doc = parse(r#"<a title="say \"hi\"" path='c:\\tmp'></a>"#)?;
    let a = only_element(&doc);
    assert_eq!(a.attribute("title"), Some(&AttributeValue::from(r#"say "hi""#)));
    assert_eq!(a.attribute("path"), Some(&AttributeValue::from(r"c:\tmp")));
    Ok(())
}

#[test]
fn test_entities_decoded() -> Result<()> {
    let doc = parse(r#"<p title="a &amp; b">1 &lt; 2 &#65;&#x42; &bogus;</p>"#)?;
    let p = only_element(&doc);
    assert_eq!(p.attribute("title"), Some(&AttributeValue::from("a & b")));
    assert_eq!(p.children[0].as_text(), Some("1 < 2 AB &bogus;"));

    let raw = ParserConfig {
        decode_entities: false,
        ..ParserConfig::default()
    };
    let doc = parse_with_config("<p>1 &lt; 2</p>", &raw)?;
    assert_eq!(only_element(&doc).children[0].as_text(), Some("1 &lt; 2"));
    Ok(())
}

#[test]
fn test_whitespace_trimming() -> Result<()> {
    let doc = parse("<p>  padded  </p>")?;
    assert_eq!(only_element(&doc).children[0].as_text(), Some("padded"));

    let config = ParserConfig {
        trim_whitespace: false,
        ..ParserConfig::default()
    };
    let doc = parse_with_config("<p>  padded  </p>", &config)?;
    assert_eq!(only_element(&doc).children[0].as_text(), Some("padded  "));
    Ok(())
}

#[test]
fn test_positions_tracked() -> Result<()> {
    let doc = parse("<a>\n  <b>x</b>\n</a>")?;
    let a = only_element(&doc);
    assert_eq!((a.position.line, a.position.column), (1, 1));
    let b = a.child_elements().next().unwrap();
    assert_eq!((b.position.line, b.position.column, b.position.offset), (2, 3, 6));
    Ok(())
}

#[test]
fn test_error_position_in_message() {
    let err = parse("<a>\n<b>\n</c>").unwrap_err();
    assert_eq!(err.position().line, 3);
    assert!(err.to_string().starts_with("parse error at 3:1"));
}

#[test]
fn test_unexpected_eof() {
    let err = parse("<a><b>text</b>").unwrap_err();
    assert_eq!(err.kind(), &ParseErrorKind::UnexpectedEof);
}

#[test]
fn test_unterminated_tag() {
    let err = parse(r#"<a href="x""#).unwrap_err();
    assert_eq!(err.kind(), &ParseErrorKind::Lexical);
}

#[test]
fn test_custom_protocols() -> Result<()> {
    let config = ParserConfig::default()
        .with_protocol(Protocol::new("pi", "<?", "?>", TokenKind::ProcessingInstruction))
        .unwrap()
        .with_protocol(Protocol::new("doctype", "<!DOCTYPE", ">", TokenKind::Doctype))
        .unwrap()
        .with_protocol(Protocol::new("cdata", "<![CDATA[", "]]>", TokenKind::CData))
        .unwrap();
    let input = r#"<?xml version="1.0"?><!DOCTYPE note><note><![CDATA[a < b & c]]></note>"#;
    let doc = parse_with_config(input, &config)?;
    assert_eq!(doc.children.len(), 3);
    match &doc.children[0] {
        Node::ProcessingInstruction(pi) => assert_eq!(pi.target(), "xml"),
        other => panic!("expected processing instruction, got {other:?}"),
    }
    let note = doc.children[2].as_element().unwrap();
    match &note.children[0] {
        Node::CData(cdata) => assert_eq!(cdata.content, "a < b & c"),
        other => panic!("expected cdata, got {other:?}"),
    }
    Ok(())
}

#[test]
fn test_unterminated_protocol_runs_to_eof() -> Result<()> {
    let config = ParserConfig::default()
        .with_protocol(Protocol::new("cdata", "<![CDATA[", "]]>", TokenKind::CData))
        .unwrap();
    let doc = parse_with_config("<![CDATA[open ended", &config)?;
    match &doc.children[0] {
        Node::CData(cdata) => assert_eq!(cdata.content, "open ended"),
        other => panic!("expected cdata, got {other:?}"),
    }
    Ok(())
}

#[test]
fn test_invalid_protocols_rejected() {
    let mut config = ParserConfig::default();
    assert!(config
        .register_protocol(Protocol::new("empty", "", ">", TokenKind::Doctype))
        .is_err());
    assert!(config
        .register_protocol(Protocol::new("tag", "{", "}", TokenKind::OpenTag))
        .is_err());
    assert!(config
        .register_protocol(Protocol::new("dup", "<!--", "-->", TokenKind::Comment))
        .is_err());
}
