//! `everblog render` command implementation.

use std::io::Write;
use std::path::PathBuf;

use clap::Args;
use everblog_config::{CliSettings, Config};
use everblog_enml::{MissingResourcePolicy, NoteRenderer, Resource};

use crate::error::CliError;
use crate::manifest::load_manifest;
use crate::output::Output;

/// Arguments for the render command.
#[derive(Args)]
pub(crate) struct RenderArgs {
    /// Path to the ENML note body.
    note: PathBuf,

    /// Shard identifier used in resource URLs.
    #[arg(short, long)]
    shard: String,

    /// JSON manifest describing the note's resources.
    #[arg(short, long)]
    resources: Option<PathBuf>,

    /// Display width for inline images (overrides config).
    #[arg(short, long)]
    width: Option<u32>,

    /// Render unresolved media as placeholders instead of failing.
    #[arg(long)]
    placeholder_missing: bool,

    /// Resource host (overrides config).
    #[arg(long)]
    host: Option<String>,

    /// Write HTML to this file instead of stdout.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Path to configuration file (default: auto-discover everblog.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Only print warnings and errors.
    #[arg(short, long, conflicts_with = "verbose")]
    pub(crate) quiet: bool,

    /// Enable verbose output (info level logging).
    #[arg(short, long)]
    pub(crate) verbose: bool,
}

impl RenderArgs {
    /// Execute the render command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration, input files or conversion fail.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new(self.quiet);

        let cli_settings = CliSettings {
            image_width: self.width,
            missing_resource: self
                .placeholder_missing
                .then_some(MissingResourcePolicy::Placeholder),
            resource_host: self.host.clone(),
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;
        let options = config.render_options();

        if options.missing_resource == MissingResourcePolicy::Placeholder {
            output.warning("unresolved media will render as placeholders");
        }

        let markup = std::fs::read_to_string(&self.note)?;
        let resources: Vec<Resource> = match &self.resources {
            Some(path) => load_manifest(path)?,
            None => Vec::new(),
        };

        let html = NoteRenderer::new(&resources, &self.shard).render(&markup, &options)?;

        match &self.output {
            Some(path) => {
                std::fs::write(path, &html)?;
                output.status(
                    "Rendered",
                    &format!("{} -> {}", self.note.display(), path.display()),
                );
            }
            None => {
                let mut stdout = std::io::stdout().lock();
                stdout.write_all(html.as_bytes())?;
                stdout.write_all(b"\n")?;
                output.status("Rendered", &self.note.display().to_string());
            }
        }

        Ok(())
    }
}
