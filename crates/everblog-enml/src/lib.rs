//! ENML to HTML conversion for Everblog.
//!
//! Evernote stores note bodies in ENML, an XML dialect with a handful of
//! extension elements. This crate turns an ENML body into HTML that can be
//! embedded in a page:
//!
//! - `en-note` becomes the container element (`div` by default)
//! - `en-todo` becomes `<input type="checkbox">`
//! - `en-media` becomes `<img>` for images and `<a>` for other attachments,
//!   with URLs pointing at the resource on its shard
//! - `en-crypt` is removed together with its content
//! - comments, CDATA sections and processing instructions are removed
//!
//! # Example
//!
//! ```
//! use everblog_enml::{Resource, transform};
//!
//! let markup = r#"<en-note><en-todo/>buy milk<en-media hash="abc123"/></en-note>"#;
//! let resources = [Resource::new("g1", "image/png", "cat.png", "abc123")];
//!
//! let html = transform(markup, &resources, "s1", 800).unwrap();
//! assert_eq!(
//!     html,
//!     r#"<div><input type="checkbox">buy milk<img src="https://www.evernote.com/shard/s1/res/g1/cat.png?resizeSmall=1&width=800" width="800"></div>"#
//! );
//! ```
//!
//! # Missing resources
//!
//! By default an `en-media` element whose hash has no matching resource fails
//! the whole conversion with [`EnmlError::ResourceNotFound`]. Pass
//! [`MissingResourcePolicy::Placeholder`] in [`RenderOptions`] to render an
//! empty placeholder instead.

mod entities;
mod error;
mod options;
mod parser;
mod resource;
mod serializer;
mod transform;
mod tree;

pub use error::{EnmlError, MarkupError};
pub use options::{
    DEFAULT_CONTAINER_TAG, DEFAULT_IMAGE_WIDTH, DEFAULT_RESOURCE_HOST, MissingResourcePolicy,
    RenderOptions,
};
pub use parser::parse;
pub use resource::Resource;
pub use serializer::to_html;
pub use transform::{MISSING_RESOURCE_CLASS, NoteRenderer, transform};
pub use tree::{Document, Element, Node};
