//! Note attachments and their hash lookup table.

use std::collections::HashMap;

use md5::{Digest, Md5};

/// A note attachment, addressed by the hex-encoded hash of its body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resource {
    /// Upstream GUID, used in the resource URL.
    pub guid: String,
    /// MIME type (e.g. `image/png`).
    pub mime: String,
    /// Original filename, used in the URL and as link text.
    pub file_name: String,
    /// Lowercase hex MD5 of the resource body.
    pub body_hash: String,
}

impl Resource {
    /// Create a resource with an already hex-encoded body hash.
    #[must_use]
    pub fn new(
        guid: impl Into<String>,
        mime: impl Into<String>,
        file_name: impl Into<String>,
        body_hash: impl Into<String>,
    ) -> Self {
        Self {
            guid: guid.into(),
            mime: mime.into(),
            file_name: file_name.into(),
            body_hash: body_hash.into(),
        }
    }

    /// Create a resource from the raw digest bytes reported upstream.
    #[must_use]
    pub fn from_hash_bytes(
        guid: impl Into<String>,
        mime: impl Into<String>,
        file_name: impl Into<String>,
        digest: &[u8],
    ) -> Self {
        Self::new(guid, mime, file_name, hex::encode(digest))
    }

    /// Create a resource from its body, hashing it the way ENML does (MD5).
    #[must_use]
    pub fn from_body(
        guid: impl Into<String>,
        mime: impl Into<String>,
        file_name: impl Into<String>,
        body: &[u8],
    ) -> Self {
        Self::from_hash_bytes(guid, mime, file_name, &Md5::digest(body)[..])
    }

    /// Whether the resource should be rendered inline as an image.
    #[must_use]
    pub fn is_image(&self) -> bool {
        self.mime.starts_with("image/")
    }
}

/// Hash to resource mapping, built once per conversion and never mutated.
///
/// When two resources share a hash, the later one wins.
#[derive(Debug)]
pub(crate) struct ResourceTable<'a> {
    by_hash: HashMap<&'a str, &'a Resource>,
}

impl<'a> ResourceTable<'a> {
    pub(crate) fn new(resources: &'a [Resource]) -> Self {
        let by_hash = resources
            .iter()
            .map(|resource| (resource.body_hash.as_str(), resource))
            .collect();
        Self { by_hash }
    }

    pub(crate) fn get(&self, hash: &str) -> Option<&'a Resource> {
        self.by_hash.get(hash).copied()
    }

    pub(crate) fn len(&self) -> usize {
        self.by_hash.len()
    }
}
