//! ENML to HTML conversion.
//!
//! Each element is consumed and rebuilt: the tag rewrite produces a new
//! element, then its children are filtered and converted recursively. Nothing
//! is removed from a list while it is being iterated.

use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};

use crate::error::EnmlError;
use crate::options::{MissingResourcePolicy, RenderOptions};
use crate::parser::parse;
use crate::resource::{Resource, ResourceTable};
use crate::serializer;
use crate::tree::{Document, Element, Node};

/// Characters escaped in a resource filename used as a URL path segment.
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// Class of the element rendered in place of an unresolved `en-media`.
pub const MISSING_RESOURCE_CLASS: &str = "missing-resource";

/// Converts note bodies that share one resource set and shard.
///
/// The resource table is built once in [`NoteRenderer::new`] and only read
/// afterwards, so a renderer can convert any number of bodies.
#[derive(Debug)]
pub struct NoteRenderer<'a> {
    resources: ResourceTable<'a>,
    shard_id: &'a str,
}

impl<'a> NoteRenderer<'a> {
    /// Create a renderer for a note's resources, served from `shard_id`.
    #[must_use]
    pub fn new(resources: &'a [Resource], shard_id: &'a str) -> Self {
        Self {
            resources: ResourceTable::new(resources),
            shard_id,
        }
    }

    /// Convert ENML markup to HTML with default options and the given image width.
    ///
    /// # Errors
    ///
    /// Returns [`EnmlError::MalformedMarkup`] if the markup cannot be parsed and
    /// [`EnmlError::ResourceNotFound`] if an `en-media` hash is unknown.
    pub fn to_html(&self, markup: &str, image_width: u32) -> Result<String, EnmlError> {
        self.render(markup, &RenderOptions::default().with_image_width(image_width))
    }

    /// Convert ENML markup to HTML.
    ///
    /// # Errors
    ///
    /// Returns [`EnmlError::MalformedMarkup`] if the markup cannot be parsed.
    /// Returns [`EnmlError::ResourceNotFound`] if an `en-media` hash is unknown
    /// and `options.missing_resource` is [`MissingResourcePolicy::Abort`].
    pub fn render(&self, markup: &str, options: &RenderOptions) -> Result<String, EnmlError> {
        let document = parse(markup)?;
        let root = self.convert(document, options)?;
        let html = serializer::to_html(&root);
        tracing::debug!(
            resources = self.resources.len(),
            input_len = markup.len(),
            output_len = html.len(),
            "Converted note"
        );
        Ok(html)
    }

    /// Convert a parsed document, returning the new root element.
    ///
    /// # Errors
    ///
    /// Returns [`EnmlError::ResourceNotFound`] under the abort policy.
    pub fn convert(
        &self,
        document: Document,
        options: &RenderOptions,
    ) -> Result<Element, EnmlError> {
        self.convert_element(document.root, options)
    }

    fn convert_element(
        &self,
        element: Element,
        options: &RenderOptions,
    ) -> Result<Element, EnmlError> {
        let mut element = self.rewrite(element, options)?;
        let children = std::mem::take(&mut element.children);
        element.children = self.convert_children(children, options)?;
        Ok(element)
    }

    fn convert_children(
        &self,
        children: Vec<Node>,
        options: &RenderOptions,
    ) -> Result<Vec<Node>, EnmlError> {
        let mut kept = Vec::with_capacity(children.len());
        for child in children.into_iter().filter(Node::is_renderable) {
            match child {
                Node::Element(element) if element.tag == "en-crypt" => {
                    tracing::debug!("Dropped en-crypt element");
                }
                Node::Element(element) => {
                    kept.push(Node::Element(self.convert_element(element, options)?));
                }
                other => kept.push(other),
            }
        }
        Ok(kept)
    }

    /// Map one ENML element to its HTML counterpart, children untouched.
    fn rewrite(
        &self,
        mut element: Element,
        options: &RenderOptions,
    ) -> Result<Element, EnmlError> {
        if element.tag == "en-media" {
            return self.rewrite_media(element, options);
        }
        if element.tag == "en-note" {
            element.tag.clone_from(&options.container_tag);
        } else if element.tag == "en-todo" {
            rewrite_todo(&mut element);
        }
        Ok(element)
    }

    fn rewrite_media(
        &self,
        mut element: Element,
        options: &RenderOptions,
    ) -> Result<Element, EnmlError> {
        let hash = element.remove_attr("hash").unwrap_or_default();
        let Some(resource) = self.resources.get(&hash) else {
            return match options.missing_resource {
                MissingResourcePolicy::Abort => Err(EnmlError::ResourceNotFound { hash }),
                MissingResourcePolicy::Placeholder => {
                    tracing::warn!(hash = %hash, "Resource not found, rendering placeholder");
                    Ok(Element::new("span")
                        .with_attr("class", MISSING_RESOURCE_CLASS)
                        .with_attr("data-hash", hash))
                }
            };
        };

        element.remove_attr("type");
        let url = self.resource_url(&options.resource_host, resource);

        if resource.is_image() {
            element.tag = "img".to_owned();
            element.set_attr(
                "src",
                format!("{url}?resizeSmall=1&width={}", options.image_width),
            );
            element.set_attr("width", options.image_width.to_string());
            element.remove_attr("height");
        } else {
            element.tag = "a".to_owned();
            element.set_attr("href", url);
            element.children.push(Node::text(&resource.file_name));
        }

        tracing::debug!(hash = %hash, tag = %element.tag, "Resolved en-media");
        Ok(element)
    }

    fn resource_url(&self, host: &str, resource: &Resource) -> String {
        format!(
            "https://{host}/shard/{}/res/{}/{}",
            self.shard_id,
            resource.guid,
            utf8_percent_encode(&resource.file_name, PATH_SEGMENT)
        )
    }
}

/// `en-todo` becomes a checkbox. Only `checked="true"` survives, since any
/// `checked` attribute marks an HTML checkbox as ticked.
fn rewrite_todo(element: &mut Element) {
    element.tag = "input".to_owned();
    let checked = element.remove_attr("checked");
    element.set_attr("type", "checkbox");
    if checked.is_some_and(|value| value.eq_ignore_ascii_case("true")) {
        element.set_attr("checked", "checked");
    }
}

/// Convert ENML markup to HTML with default options.
///
/// Shorthand for [`NoteRenderer::new`] followed by [`NoteRenderer::to_html`].
///
/// # Errors
///
/// See [`NoteRenderer::to_html`].
pub fn transform(
    markup: &str,
    resources: &[Resource],
    shard_id: &str,
    image_width: u32,
) -> Result<String, EnmlError> {
    NoteRenderer::new(resources, shard_id).to_html(markup, image_width)
}
