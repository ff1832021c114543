//! Rendering options.

/// Default width, in pixels, requested for inline images.
pub const DEFAULT_IMAGE_WIDTH: u32 = 800;

/// Default tag that replaces `en-note`.
pub const DEFAULT_CONTAINER_TAG: &str = "div";

/// Default host serving note resources.
pub const DEFAULT_RESOURCE_HOST: &str = "www.evernote.com";

/// What to do with an `en-media` element whose hash matches no resource.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum MissingResourcePolicy {
    /// Fail the whole conversion with `ResourceNotFound`.
    #[default]
    Abort,
    /// Render an empty `<span class="missing-resource">` and keep going.
    Placeholder,
}

/// Options controlling ENML to HTML conversion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    /// Tag that replaces the `en-note` root.
    pub container_tag: String,
    /// Host used in generated resource URLs.
    pub resource_host: String,
    /// Display width for inline images.
    pub image_width: u32,
    /// Behavior for unresolved `en-media` references.
    pub missing_resource: MissingResourcePolicy,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            container_tag: DEFAULT_CONTAINER_TAG.to_owned(),
            resource_host: DEFAULT_RESOURCE_HOST.to_owned(),
            image_width: DEFAULT_IMAGE_WIDTH,
            missing_resource: MissingResourcePolicy::default(),
        }
    }
}

impl RenderOptions {
    /// Set the image width.
    #[must_use]
    pub fn with_image_width(mut self, image_width: u32) -> Self {
        self.image_width = image_width;
        self
    }

    /// Set the missing resource policy.
    #[must_use]
    pub fn with_missing_resource(mut self, policy: MissingResourcePolicy) -> Self {
        self.missing_resource = policy;
        self
    }
}
