//! Application configuration.
//!
//! [`AppConfig`] is loaded once at startup and passed down by value.  The
//! CLI layer owns config; the core crate never sees it.
//!
//! # Resolution order (highest priority first)
//!
//! 1. CLI flags (handled at the call-site, not here)
//! 2. Environment variables, `ENROL__SECTION__KEY`
//! 3. Config file (`--config`, else the platform config dir)
//! 4. Built-in defaults (always present)

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, bail};
use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use tracing::debug;

const ENV_PREFIX: &str = "ENROL";
const ENV_SEPARATOR: &str = "__";

/// Application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Registration form behaviour.
    pub form: FormConfig,
    /// Live-reload listener settings.
    pub live_reload: LiveReloadConfig,
    /// Output settings.
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormConfig {
    /// Milliseconds the success banner stays up.
    pub banner_hide_ms: u64,
    /// Choices offered by the interactive gender prompt.
    pub gender_options: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LiveReloadConfig {
    /// Page served by the dev server.
    pub url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub no_color: bool,
    pub format: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            form: FormConfig {
                banner_hide_ms: 5_000,
                gender_options: vec!["Male".into(), "Female".into(), "Other".into()],
            },
            live_reload: LiveReloadConfig {
                url: "http://127.0.0.1:5500/index.html".into(),
            },
            output: OutputConfig {
                no_color: false,
                format: "auto".into(),
            },
        }
    }
}

impl AppConfig {
    /// Load configuration over the built-in defaults.
    ///
    /// An explicit `config_file` must exist; the default location is
    /// optional.
    pub fn load(config_file: Option<&PathBuf>) -> anyhow::Result<Self> {
        match config_file {
            Some(path) => Self::load_from(path, true),
            None => Self::load_from(&Self::config_path(), false),
        }
    }

    fn load_from(path: &Path, required: bool) -> anyhow::Result<Self> {
        debug!(path = %path.display(), required, "loading configuration");

        let defaults = Config::try_from(&Self::default())
            .context("Failed to seed configuration defaults")?;

        let env = Environment::with_prefix(ENV_PREFIX)
            .prefix_separator(ENV_SEPARATOR)
            .separator(ENV_SEPARATOR)
            .try_parsing(true)
            .list_separator(",")
            .with_list_parse_key("form.gender_options");

        let config: Self = Config::builder()
            .add_source(defaults)
            .add_source(File::from(path).format(FileFormat::Toml).required(required))
            .add_source(env)
            .build()
            .with_context(|| format!("Failed to read configuration from {}", path.display()))?
            .try_deserialize()
            .context("Configuration has invalid values")?;

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> anyhow::Result<()> {
        if self.form.gender_options.is_empty() {
            bail!("form.gender_options must list at least one option");
        }
        if self.live_reload.url.trim().is_empty() {
            bail!("live_reload.url must not be empty");
        }
        Ok(())
    }

    /// How long the success banner stays visible.
    pub fn banner_hide_after(&self) -> Duration {
        Duration::from_millis(self.form.banner_hide_ms)
    }

    /// Path to the default configuration file.
    ///
    /// Uses `directories::ProjectDirs` for cross-platform correctness,
    /// falling back to `.enrol.toml` in the current directory.
    pub fn config_path() -> PathBuf {
        directories::ProjectDirs::from("com", "enrol", "enrol")
            .map(|d| d.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from(".enrol.toml"))
    }
}
