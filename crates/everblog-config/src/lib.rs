//! Configuration management for Everblog.
//!
//! Parses `everblog.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ## Environment Variable Expansion
//!
//! String configuration values support environment variable expansion:
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default
//!
//! Expanded fields:
//! - `render.container_tag`
//! - `render.resource_host`

mod expand;

use std::path::{Path, PathBuf};

use everblog_enml::{
    DEFAULT_CONTAINER_TAG, DEFAULT_IMAGE_WIDTH, DEFAULT_RESOURCE_HOST, MissingResourcePolicy,
    RenderOptions,
};
use serde::Deserialize;

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "everblog.toml";

/// Largest accepted `render.image_width`.
const MAX_IMAGE_WIDTH: u32 = 4096;

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override image width.
    pub image_width: Option<u32>,
    /// Override missing resource policy.
    pub missing_resource: Option<MissingResourcePolicy>,
    /// Override resource host.
    pub resource_host: Option<String>,
}

/// Application configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Note rendering configuration.
    pub render: RenderConfig,

    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

/// Note rendering configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Display width for inline images.
    pub image_width: u32,
    /// Tag replacing the `en-note` root.
    pub container_tag: String,
    /// Host serving note resources (no scheme).
    pub resource_host: String,
    /// Behavior for `en-media` elements with no matching resource.
    pub missing_resource: MissingResourcePolicy,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            image_width: DEFAULT_IMAGE_WIDTH,
            container_tag: DEFAULT_CONTAINER_TAG.to_owned(),
            resource_host: DEFAULT_RESOURCE_HOST.to_owned(),
            missing_resource: MissingResourcePolicy::Abort,
        }
    }
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`render.resource_host`").
        field: String,
        /// Error message (e.g., "${`EVERNOTE_HOST`} not set").
        message: String,
    },
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `everblog.toml` in current directory and parents,
    /// falling back to defaults when none is found.
    ///
    /// CLI settings are applied after loading, allowing CLI arguments to take
    /// precedence over config file values.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, parsing fails,
    /// or the resulting configuration is invalid.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
            config.validate()?;
        }

        Ok(config)
    }

    /// Options for the ENML transformer.
    #[must_use]
    pub fn render_options(&self) -> RenderOptions {
        RenderOptions {
            container_tag: self.render.container_tag.clone(),
            resource_host: self.render.resource_host.clone(),
            image_width: self.render.image_width,
            missing_resource: self.render.missing_resource,
        }
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(image_width) = settings.image_width {
            self.render.image_width = image_width;
        }
        if let Some(policy) = settings.missing_resource {
            self.render.missing_resource = policy;
        }
        if let Some(host) = &settings.resource_host {
            self.render.resource_host.clone_from(host);
        }
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        config.expand_env_vars()?;
        config.config_path = Some(path.to_path_buf());
        config.validate()?;

        tracing::debug!(path = %path.display(), "Loaded configuration");
        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let render = &self.render;

        if render.image_width == 0 {
            return Err(ConfigError::Validation(
                "render.image_width must be greater than 0".to_owned(),
            ));
        }
        if render.image_width > MAX_IMAGE_WIDTH {
            return Err(ConfigError::Validation(format!(
                "render.image_width cannot exceed {MAX_IMAGE_WIDTH}"
            )));
        }

        require_non_empty(&render.container_tag, "render.container_tag")?;
        if !render.container_tag.bytes().all(|b| b.is_ascii_alphanumeric()) {
            return Err(ConfigError::Validation(
                "render.container_tag must be an ASCII alphanumeric tag name".to_owned(),
            ));
        }

        require_non_empty(&render.resource_host, "render.resource_host")?;
        if render.resource_host.contains("://") || render.resource_host.contains('/') {
            return Err(ConfigError::Validation(
                "render.resource_host must be a bare host name without scheme or path"
                    .to_owned(),
            ));
        }

        Ok(())
    }

    /// Expand environment variable references in configuration strings.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        self.render.container_tag =
            expand::expand_env(&self.render.container_tag, "render.container_tag")?;
        self.render.resource_host =
            expand::expand_env(&self.render.resource_host, "render.resource_host")?;
        Ok(())
    }
}
