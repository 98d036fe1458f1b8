//! Build configuration management.
//!
//! Every setting has a default, so a missing `vitae.toml` is not an error
//! unless the file was asked for explicitly.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};

/// Configuration file looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "vitae.toml";

/// Prefix for environment overrides, e.g. `VITAE__OUTPUT__PATH`.
pub const ENV_PREFIX: &str = "VITAE";

/// Main configuration structure for vitae.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Input locations.
    pub content: ContentConfig,

    /// Output location.
    pub output: OutputConfig,
}

/// Input locations. Relative entries are resolved against `root`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContentConfig {
    /// Base content directory.
    pub root: PathBuf,

    /// Directory of project markdown files.
    pub projects: PathBuf,

    /// Directory of experience markdown files.
    pub experiences: PathBuf,

    /// Bio markdown file.
    pub bio: PathBuf,

    /// Skills JSON file.
    pub skills: PathBuf,
}

/// Output configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Where the site snapshot is written.
    pub path: PathBuf,
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("content"),
            projects: PathBuf::from("projects"),
            experiences: PathBuf::from("experiences"),
            bio: PathBuf::from("bio.md"),
            skills: PathBuf::from("skills.json"),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("data/site-data.json"),
        }
    }
}

impl ContentConfig {
    /// Directory holding project files.
    pub fn projects_dir(&self) -> PathBuf {
        self.root.join(&self.projects)
    }

    /// Directory holding experience files.
    pub fn experiences_dir(&self) -> PathBuf {
        self.root.join(&self.experiences)
    }

    /// Path of the bio file.
    pub fn bio_file(&self) -> PathBuf {
        self.root.join(&self.bio)
    }

    /// Path of the skills file.
    pub fn skills_file(&self) -> PathBuf {
        self.root.join(&self.skills)
    }
}

impl Config {
    /// Resolve the configuration for a run.
    ///
    /// An explicit path must exist. Without one, [`DEFAULT_CONFIG_FILE`] is
    /// used when present and the built-in defaults otherwise. Environment
    /// overrides apply in every case.
    pub fn resolve(explicit: Option<&Path>) -> Result<Self> {
        match explicit {
            Some(path) => Self::load_with_env(path),
            None => {
                let default_path = Path::new(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    Self::load_with_env(default_path)
                } else {
                    tracing::debug!("no configuration file, using defaults");
                    Self::from_env()
                }
            }
        }
    }

    /// Load configuration from a TOML file layered with environment overrides.
    pub fn load_with_env(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(CoreError::config(format!(
                "Configuration file not found: {}",
                path.display()
            )));
        }

        let settings = config::Config::builder()
            .add_source(config::File::from(path).format(config::FileFormat::Toml))
            .add_source(config::Environment::with_prefix(ENV_PREFIX).separator("__"))
            .build()
            .map_err(|e| {
                CoreError::config_with_source(
                    format!("Failed to parse config file: {}", path.display()),
                    e,
                )
            })?;

        let config: Config = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Built-in defaults layered with environment overrides.
    pub fn from_env() -> Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::Environment::with_prefix(ENV_PREFIX).separator("__"))
            .build()?;

        let config: Config = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration.
    fn validate(&self) -> Result<()> {
        let paths = [
            ("content.projects", &self.content.projects),
            ("content.experiences", &self.content.experiences),
            ("content.bio", &self.content.bio),
            ("content.skills", &self.content.skills),
            ("output.path", &self.output.path),
        ];

        for (name, path) in paths {
            if path.as_os_str().is_empty() {
                return Err(CoreError::config(format!("{name} cannot be empty")));
            }
        }

        if self.output.path.extension().is_none_or(|ext| ext != "json") {
            tracing::warn!(path = %self.output.path.display(), "output.path does not end in .json");
        }

        Ok(())
    }
}
