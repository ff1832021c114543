//! Resource manifest loading.
//!
//! A manifest is a JSON array describing a note's attachments:
//!
//! ```json
//! [
//!   {"guid": "g1", "mime": "image/png", "file_name": "cat.png", "body_hash": "abc123"},
//!   {"guid": "g2", "mime": "application/pdf", "file_name": "doc.pdf", "path": "doc.pdf"}
//! ]
//! ```
//!
//! Entries without `body_hash` are hashed from the file at `path`, resolved
//! relative to the manifest.

use std::path::{Path, PathBuf};

use everblog_enml::Resource;
use serde::Deserialize;

use crate::error::CliError;

#[derive(Debug, Deserialize)]
struct ManifestEntry {
    guid: String,
    mime: String,
    file_name: String,
    #[serde(default)]
    body_hash: Option<String>,
    #[serde(default)]
    path: Option<PathBuf>,
}

/// Load resources from a manifest file.
pub(crate) fn load_manifest(path: &Path) -> Result<Vec<Resource>, CliError> {
    let content = std::fs::read_to_string(path)?;
    let entries: Vec<ManifestEntry> = serde_json::from_str(&content)?;
    let base_dir = path.parent().unwrap_or(Path::new("."));

    let resources = entries
        .into_iter()
        .map(|entry| entry.into_resource(base_dir))
        .collect::<Result<Vec<_>, _>>()?;

    tracing::info!(
        manifest = %path.display(),
        count = resources.len(),
        "Loaded resource manifest"
    );
    Ok(resources)
}

impl ManifestEntry {
    fn into_resource(self, base_dir: &Path) -> Result<Resource, CliError> {
        if let Some(hash) = self.body_hash {
            return Ok(Resource::new(
                self.guid,
                self.mime,
                self.file_name,
                hash.to_ascii_lowercase(),
            ));
        }

        let Some(body_path) = self.path else {
            return Err(CliError::Manifest(format!(
                "resource {} needs either body_hash or path",
                self.guid
            )));
        };
        let body = std::fs::read(base_dir.join(&body_path))?;
        tracing::debug!(guid = %self.guid, path = %body_path.display(), "Hashed resource body");
        Ok(Resource::from_body(self.guid, self.mime, self.file_name, &body))
    }
}
