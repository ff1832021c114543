//! Document tree for parsed note bodies.
//!
//! Unlike an ElementTree-style model, text is stored as explicit [`Node::Text`]
//! siblings so that rewriting an element never has to move "tail" text around.

/// A node in a parsed document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// Element with tag, attributes and children.
    Element(Element),
    /// Character data (entities already decoded).
    Text(String),
    /// `<!-- ... -->`
    Comment(String),
    /// `<![CDATA[ ... ]]>`
    CData(String),
    /// `<?target data?>`
    ProcessingInstruction(String),
}

impl Node {
    /// Create a text node.
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(text.into())
    }

    /// Whether the node is an element or text, the only kinds kept in output.
    #[must_use]
    pub fn is_renderable(&self) -> bool {
        matches!(self, Self::Element(_) | Self::Text(_))
    }

    /// Borrow the node as an element.
    #[must_use]
    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Self::Element(element) => Some(element),
            _ => None,
        }
    }
}

impl From<Element> for Node {
    fn from(element: Element) -> Self {
        Self::Element(element)
    }
}

/// Element node.
///
/// Attributes keep document order. Setting an attribute that already exists
/// replaces its value in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Element {
    /// Tag name, including any namespace prefix as written.
    pub tag: String,
    /// Ordered attributes.
    pub attrs: Vec<(String, String)>,
    /// Child nodes in document order.
    pub children: Vec<Node>,
}

impl Element {
    /// Create an element with the given tag.
    #[must_use]
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            ..Default::default()
        }
    }

    /// Set an attribute.
    #[must_use]
    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_attr(name, value);
        self
    }

    /// Set children.
    #[must_use]
    pub fn with_children(mut self, children: Vec<Node>) -> Self {
        self.children = children;
        self
    }

    /// Append a text child.
    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.children.push(Node::Text(text.into()));
        self
    }

    /// Get an attribute value.
    #[must_use]
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Set an attribute, keeping its position if it already exists.
    pub fn set_attr(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        if let Some(slot) = self.attrs.iter_mut().find(|(key, _)| *key == name) {
            slot.1 = value;
        } else {
            self.attrs.push((name, value));
        }
    }

    /// Remove an attribute, returning its value if it was present.
    pub fn remove_attr(&mut self, name: &str) -> Option<String> {
        let index = self.attrs.iter().position(|(key, _)| key == name)?;
        Some(self.attrs.remove(index).1)
    }

    /// Child elements, skipping text and other nodes.
    pub fn child_elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(Node::as_element)
    }

    /// Concatenated text of all descendant text nodes.
    #[must_use]
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        collect_text(self, &mut out);
        out
    }
}

fn collect_text(element: &Element, out: &mut String) {
    for child in &element.children {
        match child {
            Node::Text(text) => out.push_str(text),
            Node::Element(inner) => collect_text(inner, out),
            Node::Comment(_) | Node::CData(_) | Node::ProcessingInstruction(_) => {}
        }
    }
}

/// Parsed document with a single root element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    /// Root element.
    pub root: Element,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_attr_keeps_position() {
        let mut element = Element::new("en-media")
            .with_attr("width", "10")
            .with_attr("hash", "abc");
        element.set_attr("width", "800");

        assert_eq!(
            element.attrs,
            vec![
                ("width".to_owned(), "800".to_owned()),
                ("hash".to_owned(), "abc".to_owned()),
            ]
        );
    }

    #[test]
    fn test_remove_attr() {
        let mut element = Element::new("img").with_attr("height", "20");
        assert_eq!(element.remove_attr("height"), Some("20".to_owned()));
        assert_eq!(element.remove_attr("height"), None);
        assert!(element.attrs.is_empty());
    }

    #[test]
    fn test_text_content_skips_comments() {
        let element = Element::new("p").with_children(vec![
            Node::text("a"),
            Node::Comment("ignored".to_owned()),
            Element::new("b").with_text("b").into(),
            Node::text("c"),
        ]);
        assert_eq!(element.text_content(), "abc");
    }

    #[test]
    fn test_is_renderable() {
        assert!(Node::text("x").is_renderable());
        assert!(Node::from(Element::new("p")).is_renderable());
        assert!(!Node::Comment(String::new()).is_renderable());
        assert!(!Node::CData(String::new()).is_renderable());
        assert!(!Node::ProcessingInstruction(String::new()).is_renderable());
    }
}
