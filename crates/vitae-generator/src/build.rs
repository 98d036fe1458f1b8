//! Build orchestration.
//!
//! Loads every section, assembles the snapshot and writes it out.

use std::{
    fs,
    io::Write,
    path::{Path, PathBuf},
    time::Instant,
};

use chrono::{DateTime, Utc};
use tempfile::NamedTempFile;
use thiserror::Error;
use tracing::{debug, info};
use vitae_core::Config;

use crate::{
    collector::{CollectorError, ContentCollector, MissingSource},
    skills::{SkillsError, load_skills},
    snapshot::SiteSnapshot,
};

/// Build errors.
#[derive(Debug, Error)]
pub enum BuildError {
    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Collector error.
    #[error("collector error: {0}")]
    Collector(#[from] CollectorError),

    /// Skills error.
    #[error("skills error: {0}")]
    Skills(#[from] SkillsError),

    /// Serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Output file could not be moved into place.
    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Result type for build operations.
pub type Result<T> = std::result::Result<T, BuildError>;

/// Build statistics.
#[derive(Debug, Clone, Default)]
pub struct BuildStats {
    /// Number of projects written.
    pub projects: usize,

    /// Number of experiences written.
    pub experiences: usize,

    /// Number of entries in the skills list.
    pub skills: usize,

    /// Sources that fell back to defaults.
    pub missing: Vec<MissingSource>,

    /// Build duration in milliseconds.
    pub duration_ms: u64,
}

/// A snapshot together with the sources that were missing.
#[derive(Debug, Clone)]
pub struct Assembly {
    /// The assembled snapshot.
    pub snapshot: SiteSnapshot,

    /// Sources that fell back to defaults.
    pub missing: Vec<MissingSource>,
}

impl Assembly {
    /// Counts for reporting. Duration is left at zero.
    pub fn stats(&self) -> BuildStats {
        BuildStats {
            projects: self.snapshot.projects.len(),
            experiences: self.snapshot.experiences.len(),
            skills: self.snapshot.skills.count(),
            missing: self.missing.clone(),
            duration_ms: 0,
        }
    }
}

/// Site data builder that orchestrates the build process.
#[derive(Debug)]
pub struct Builder {
    config: Config,
    build_date: Option<DateTime<Utc>>,
}

impl Builder {
    /// Create a new builder.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self {
            config,
            build_date: None,
        }
    }

    /// Pin the build timestamp instead of using the current time.
    #[must_use]
    pub fn with_build_date(mut self, date: DateTime<Utc>) -> Self {
        self.build_date = Some(date);
        self
    }

    /// Path the snapshot is written to.
    pub fn output_path(&self) -> &Path {
        &self.config.output.path
    }

    /// Load every section and assemble the snapshot without writing it.
    pub fn assemble(&self) -> Result<Assembly> {
        let content = ContentCollector::new(self.config.content.clone()).collect()?;
        let skills = load_skills(&self.config.content.skills_file())?;

        let mut missing = content.missing;
        missing.extend(skills.missing);

        let snapshot = SiteSnapshot {
            projects: content.projects,
            experiences: content.experiences,
            bio: content.bio,
            skills: skills.value,
            build_date: self.build_date.unwrap_or_else(Utc::now),
        };

        Ok(Assembly { snapshot, missing })
    }

    /// Execute the full build process.
    pub fn build(&self) -> Result<BuildStats> {
        let start = Instant::now();

        info!(
            content = %self.config.content.root.display(),
            output = %self.output_path().display(),
            "starting build"
        );

        let assembly = self.assemble()?;
        let json = assembly.snapshot.to_json()?;
        write_atomic(self.output_path(), &json)?;

        let mut stats = assembly.stats();
        stats.duration_ms = start.elapsed().as_millis() as u64;

        info!(
            projects = stats.projects,
            experiences = stats.experiences,
            skills = stats.skills,
            missing = stats.missing.len(),
            duration_ms = stats.duration_ms,
            "build complete"
        );

        Ok(stats)
    }
}

/// Replace `path` with `contents` in one rename.
///
/// The data goes to a temporary file next to the target first, so a failure
/// leaves any previous output untouched.
fn write_atomic(path: &Path, contents: &str) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir)?;

    let mut file = NamedTempFile::new_in(dir)?;
    file.write_all(contents.as_bytes())?;
    file.as_file().sync_all()?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        file.as_file()
            .set_permissions(fs::Permissions::from_mode(0o644))?;
    }

    file.persist(path).map_err(|e| BuildError::Write {
        path: path.to_path_buf(),
        source: e.error,
    })?;

    debug!(path = %path.display(), bytes = contents.len(), "wrote snapshot");
    Ok(())
}
