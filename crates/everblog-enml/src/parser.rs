//! ENML parser built on `quick-xml`.
//!
//! Produces a [`Document`] that still contains comments, CDATA sections and
//! processing instructions; stripping them is the transformer's job.

use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;

use crate::entities::{decode_reference, expand_named_entities, unescape_attr};
use crate::error::MarkupError;
use crate::tree::{Document, Element, Node};

/// Parse a note body into a document tree.
///
/// The XML declaration and DOCTYPE are accepted and discarded, as are
/// comments and processing instructions that appear outside the root element.
///
/// # Errors
///
/// Returns an error if the markup is not a well-formed, single-rooted XML
/// document.
pub fn parse(markup: &str) -> Result<Document, MarkupError> {
    let markup = expand_named_entities(markup);
    let mut reader = Reader::from_str(&markup);
    reader.config_mut().trim_text(false);

    let mut open: Vec<Element> = Vec::new();
    let mut root: Option<Element> = None;

    loop {
        match reader.read_event()? {
            Event::Start(e) => {
                if open.is_empty() && root.is_some() {
                    return Err(MarkupError::structure("multiple root elements"));
                }
                open.push(decode_element(&reader, &e)?);
            }
            Event::Empty(e) => {
                let element = decode_element(&reader, &e)?;
                close(&mut open, &mut root, element)?;
            }
            Event::End(_) => {
                // The reader has already matched the end name against the start.
                let element = open
                    .pop()
                    .ok_or_else(|| MarkupError::structure("unexpected end tag"))?;
                close(&mut open, &mut root, element)?;
            }
            Event::Text(e) => {
                let text = reader.decoder().decode(&e)?;
                push_text(&mut open, &text)?;
            }
            Event::GeneralRef(e) => {
                let name = reader.decoder().decode(&e)?;
                push_text(&mut open, &decode_reference(&name)?)?;
            }
            Event::CData(e) => {
                let data = String::from_utf8_lossy(&e).into_owned();
                push_other(&mut open, Node::CData(data));
            }
            Event::Comment(e) => {
                let comment = reader.decoder().decode(&e)?.into_owned();
                push_other(&mut open, Node::Comment(comment));
            }
            Event::PI(e) => {
                let instruction = String::from_utf8_lossy(&e).into_owned();
                push_other(&mut open, Node::ProcessingInstruction(instruction));
            }
            Event::Decl(_) | Event::DocType(_) => {}
            Event::Eof => break,
        }
    }

    if let Some(unclosed) = open.last() {
        return Err(MarkupError::structure(format!(
            "unclosed element <{}> at end of document",
            unclosed.tag
        )));
    }

    root.map(|root| Document { root })
        .ok_or_else(|| MarkupError::structure("document has no root element"))
}

/// Attach a finished element to its parent, or make it the root.
fn close(
    open: &mut [Element],
    root: &mut Option<Element>,
    element: Element,
) -> Result<(), MarkupError> {
    if let Some(parent) = open.last_mut() {
        parent.children.push(Node::Element(element));
        return Ok(());
    }
    if root.is_some() {
        return Err(MarkupError::structure("multiple root elements"));
    }
    *root = Some(element);
    Ok(())
}

/// Append character data, merging with a preceding text node.
///
/// Text and entity references arrive as separate events; merging keeps one
/// text node per run of character data.
fn push_text(open: &mut [Element], text: &str) -> Result<(), MarkupError> {
    let Some(parent) = open.last_mut() else {
        if text.trim().is_empty() {
            return Ok(());
        }
        return Err(MarkupError::structure("text outside of the root element"));
    };
    if let Some(Node::Text(last)) = parent.children.last_mut() {
        last.push_str(text);
    } else if !text.is_empty() {
        parent.children.push(Node::Text(text.to_owned()));
    }
    Ok(())
}

/// Append a non-renderable node. Outside the root these are dropped.
fn push_other(open: &mut [Element], node: Node) {
    if let Some(parent) = open.last_mut() {
        parent.children.push(node);
    }
}

fn decode_element(reader: &Reader<&[u8]>, e: &BytesStart) -> Result<Element, MarkupError> {
    let tag = reader.decoder().decode(e.name().as_ref())?.into_owned();
    let mut element = Element::new(tag);

    for attr in e.attributes() {
        let attr = attr?;
        let key = reader.decoder().decode(attr.key.as_ref())?.into_owned();
        let raw = reader.decoder().decode(&attr.value)?;
        let value = unescape_attr(&raw)?;
        element.attrs.push((key, value));
    }

    Ok(element)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_note() {
        let doc = parse("<en-note><p>Hello</p></en-note>").unwrap();

        assert_eq!(doc.root.tag, "en-note");
        assert_eq!(
            doc.root.children,
            vec![Node::Element(Element::new("p").with_text("Hello"))]
        );
    }

    #[test]
    fn test_parse_with_prolog() {
        let markup = r#"<?xml version="1.0" encoding="UTF-8"?>
<!DOCTYPE en-note SYSTEM "http://xml.evernote.com/pub/enml2.dtd">
<en-note>Hi</en-note>"#;
        let doc = parse(markup).unwrap();

        assert_eq!(doc.root.tag, "en-note");
        assert_eq!(doc.root.text_content(), "Hi");
    }

    #[test]
    fn test_parse_attributes_in_order() {
        let doc = parse(r#"<en-note><en-media type="image/png" hash="abc" height="10"/></en-note>"#)
            .unwrap();
        let media = doc.root.child_elements().next().unwrap();

        assert_eq!(media.tag, "en-media");
        let names: Vec<&str> = media.attrs.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(names, ["type", "hash", "height"]);
    }

    #[test]
    fn test_parse_entities_merge_into_one_text_node() {
        let doc = parse("<en-note>a &amp; b&nbsp;&#169;</en-note>").unwrap();

        assert_eq!(doc.root.children, vec![Node::text("a & b\u{a0}\u{a9}")]);
    }

    #[test]
    fn test_parse_escaped_attribute() {
        let doc = parse(r#"<en-note><a href="x?a=1&amp;b=2">l</a></en-note>"#).unwrap();
        let link = doc.root.child_elements().next().unwrap();

        assert_eq!(link.attr("href"), Some("x?a=1&b=2"));
    }

    #[test]
    fn test_parse_keeps_comments_cdata_and_pis() {
        let doc = parse("<en-note><!-- c --><![CDATA[raw]]><?php echo 1; ?>t</en-note>").unwrap();

        assert_eq!(doc.root.children.len(), 4);
        assert!(matches!(doc.root.children[0], Node::Comment(_)));
        assert_eq!(doc.root.children[1], Node::CData("raw".to_owned()));
        assert!(matches!(doc.root.children[2], Node::ProcessingInstruction(_)));
        assert_eq!(doc.root.children[3], Node::text("t"));
    }

    #[test]
    fn test_parse_mismatched_end_tag_fails() {
        assert!(parse("<en-note><b></i></en-note>").is_err());
    }

    #[test]
    fn test_parse_unclosed_element_fails() {
        let err = parse("<en-note><p>open").unwrap_err();
        assert!(err.to_string().contains("unclosed") || matches!(err, MarkupError::Xml(_)));
    }

    #[test]
    fn test_parse_empty_input_fails() {
        let err = parse("   ").unwrap_err();
        assert!(matches!(err, MarkupError::Structure(_)));
    }

    #[test]
    fn test_parse_multiple_roots_fails() {
        let err = parse("<en-note/><en-note/>").unwrap_err();
        assert!(err.to_string().contains("multiple root"));
    }

    #[test]
    fn test_parse_text_outside_root_fails() {
        let err = parse("<en-note/>trailing").unwrap_err();
        assert!(err.to_string().contains("outside"));
    }

    #[test]
    fn test_parse_undefined_entity_fails() {
        let err = parse("<en-note>&bogus;</en-note>").unwrap_err();
        assert!(matches!(err, MarkupError::Reference(_)));
        assert!(err.to_string().contains("&bogus;"));
    }

    #[test]
    fn test_parse_illegal_character_reference_fails() {
        assert!(matches!(
            parse("<en-note>&#0;</en-note>"),
            Err(MarkupError::Reference(_))
        ));
    }

    #[test]
    fn test_parse_bare_ampersand_in_attribute_fails() {
        let err = parse(r#"<en-note><a href="x?a=1&b=2">l</a></en-note>"#).unwrap_err();
        assert!(matches!(err, MarkupError::Reference(_)));
    }

    #[test]
    fn test_parse_undefined_entity_in_attribute_fails() {
        assert!(matches!(
            parse(r#"<en-note><a title="&bogus; &amp; x">l</a></en-note>"#),
            Err(MarkupError::Reference(_))
        ));
    }

    #[test]
    fn test_parse_xhtml_entities_from_every_set() {
        let doc = parse("<en-note>&aring;ngstr&ouml;m &alpha;&hearts; &lsaquo;</en-note>").unwrap();
        assert_eq!(
            doc.root.children,
            vec![Node::text("\u{e5}ngstr\u{f6}m \u{3b1}\u{2665} \u{2039}")]
        );
    }

    #[test]
    fn test_parse_duplicate_attribute_fails() {
        assert!(parse(r#"<en-note a="1" a="2"/>"#).is_err());
    }
}
