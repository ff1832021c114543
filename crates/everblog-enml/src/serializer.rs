//! HTML serializer for converted documents.

use std::fmt::Write;

use crate::tree::{Element, Node};

/// Elements that never have content or an end tag in HTML.
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source",
    "track", "wbr",
];

/// Named references a browser decodes inside an attribute even without the
/// trailing `;`, unless followed by `=` or an alphanumeric.
const LEGACY_REFERENCES: &[&str] = &[
    "AElig", "AMP", "Aacute", "Acirc", "Agrave", "Aring", "Atilde", "Auml", "COPY", "Ccedil", "ETH",
    "Eacute", "Ecirc", "Egrave", "Euml", "GT", "Iacute", "Icirc", "Igrave", "Iuml", "LT", "Ntilde",
    "Oacute", "Ocirc", "Ograve", "Oslash", "Otilde", "Ouml", "QUOT", "REG", "THORN", "Uacute",
    "Ucirc", "Ugrave", "Uuml", "Yacute", "aacute", "acirc", "acute", "aelig", "agrave", "amp",
    "aring", "atilde", "auml", "brvbar", "ccedil", "cedil", "cent", "copy", "curren", "deg",
    "divide", "eacute", "ecirc", "egrave", "eth", "euml", "frac12", "frac14", "frac34", "gt",
    "iacute", "icirc", "iexcl", "igrave", "iquest", "iuml", "laquo", "lt", "macr", "micro",
    "middot", "nbsp", "not", "ntilde", "oacute", "ocirc", "ograve", "ordf", "ordm", "oslash",
    "otilde", "ouml", "para", "plusmn", "pound", "quot", "raquo", "reg", "sect", "shy", "sup1",
    "sup2", "sup3", "szlig", "thorn", "times", "uacute", "ucirc", "ugrave", "uml", "uuml", "yacute",
    "yen", "yuml",
];

/// Serialize an element and its subtree as HTML.
///
/// Only elements and text are written; any other node kind is skipped.
#[must_use]
pub fn to_html(root: &Element) -> String {
    let mut out = String::with_capacity(4096);
    write_element(root, &mut out);
    out
}

fn is_void(tag: &str) -> bool {
    VOID_ELEMENTS.contains(&tag)
}

fn write_element(element: &Element, out: &mut String) {
    out.push('<');
    out.push_str(&element.tag);
    for (name, value) in &element.attrs {
        let _ = write!(out, r#" {name}="{}""#, escape_attr(value));
    }
    out.push('>');

    if is_void(&element.tag) {
        return;
    }

    for child in &element.children {
        match child {
            Node::Element(inner) => write_element(inner, out),
            Node::Text(text) => escape_text_into(text, out),
            Node::Comment(_) | Node::CData(_) | Node::ProcessingInstruction(_) => {}
        }
    }

    let _ = write!(out, "</{}>", element.tag);
}

fn escape_text_into(text: &str, out: &mut String) {
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(ch),
        }
    }
}

/// Escape an attribute value.
///
/// `&` is escaped only where a browser would read it as the start of a
/// character reference, so URLs like `?a=1&width=800` stay readable.
fn escape_attr(value: &str) -> String {
    let mut result = String::with_capacity(value.len());
    for (index, ch) in value.char_indices() {
        match ch {
            '&' if starts_reference(&value[index + 1..]) => result.push_str("&amp;"),
            '"' => result.push_str("&quot;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            _ => result.push(ch),
        }
    }
    result
}

/// Whether the text following an `&` forms `#...`, `name;` or a legacy
/// reference such as `&lt` that a browser would decode.
fn starts_reference(rest: &str) -> bool {
    if rest.starts_with('#') {
        return true;
    }
    let name_len = rest
        .bytes()
        .take_while(u8::is_ascii_alphanumeric)
        .count();
    if name_len > 0 && rest.as_bytes().get(name_len) == Some(&b';') {
        return true;
    }
    LEGACY_REFERENCES.iter().any(|name| {
        rest.strip_prefix(name).is_some_and(|after| {
            !after.starts_with(|c: char| c == '=' || c.is_ascii_alphanumeric())
        })
    })
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_serialize_nested() {
        let root = Element::new("div").with_children(vec![
            Element::new("p")
                .with_children(vec![Element::new("b").with_text("Bold").into()])
                .with_text(" text")
                .into(),
        ]);
        assert_eq!(to_html(&root), "<div><p><b>Bold</b> text</p></div>");
    }

    #[test]
    fn test_void_elements_have_no_end_tag() {
        let root = Element::new("div").with_children(vec![
            Element::new("input").with_attr("type", "checkbox").into(),
            Element::new("br").into(),
            Node::text("after"),
        ]);
        assert_eq!(
            to_html(&root),
            r#"<div><input type="checkbox"><br>after</div>"#
        );
    }

    #[test]
    fn test_empty_non_void_element_is_closed() {
        let root = Element::new("div").with_children(vec![Element::new("span").into()]);
        assert_eq!(to_html(&root), "<div><span></span></div>");
    }

    #[test]
    fn test_escape_text() {
        let root = Element::new("p").with_text("a < b & c > d");
        assert_eq!(to_html(&root), "<p>a &lt; b &amp; c &gt; d</p>");
    }

    #[test]
    fn test_query_string_ampersand_kept() {
        let img = Element::new("img").with_attr("src", "x.png?resizeSmall=1&width=800");
        assert_eq!(to_html(&img), r#"<img src="x.png?resizeSmall=1&width=800">"#);
    }

    #[test]
    fn test_reference_like_ampersand_escaped() {
        let a = Element::new("a")
            .with_attr("title", r#"&copy; "x" &#1;"#)
            .with_text("t");
        assert_eq!(
            to_html(&a),
            r#"<a title="&amp;copy; &quot;x&quot; &amp;#1;">t</a>"#
        );
    }

    #[test]
    fn test_legacy_reference_without_semicolon_escaped() {
        let a = Element::new("a").with_attr("href", "?q=&lt&x=1&copy").with_text("t");
        assert_eq!(to_html(&a), r#"<a href="?q=&amp;lt&x=1&amp;copy">t</a>"#);
    }

    #[test]
    fn test_legacy_name_before_equals_or_alphanumeric_kept() {
        let a = Element::new("a").with_attr("href", "?a=1&copy=2&notit=3").with_text("t");
        assert_eq!(to_html(&a), r#"<a href="?a=1&copy=2&notit=3">t</a>"#);
    }

    #[test]
    fn test_non_renderable_nodes_skipped() {
        let root = Element::new("div").with_children(vec![
            Node::Comment("c".to_owned()),
            Node::text("kept"),
            Node::CData("d".to_owned()),
        ]);
        assert_eq!(to_html(&root), "<div>kept</div>");
    }
}
