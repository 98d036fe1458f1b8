//! Skills document loading.

use std::{
    fs,
    path::{Path, PathBuf},
};

use serde::Serialize;
use serde_json::{Value, json};
use thiserror::Error;
use tracing::info;

use crate::collector::{Loaded, Section};

/// Skills loading errors.
#[derive(Debug, Error)]
pub enum SkillsError {
    /// Skills file could not be read.
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Skills file is not valid JSON.
    #[error("invalid JSON in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Skills file parsed but has no top-level `skills` array.
    #[error("{path} has no top-level \"skills\" list")]
    MissingList { path: PathBuf },
}

/// Result type for skills operations.
pub type Result<T> = std::result::Result<T, SkillsError>;

/// The skills JSON document, kept as written.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Skills(Value);

impl Default for Skills {
    fn default() -> Self {
        Self(json!({ "skills": [] }))
    }
}

impl Skills {
    /// Wrap a parsed document, checking it carries a `skills` array.
    pub fn from_value(value: Value) -> Option<Self> {
        value.get("skills")?.as_array()?;
        Some(Self(value))
    }

    /// Number of entries in the `skills` list.
    pub fn count(&self) -> usize {
        self.0
            .get("skills")
            .and_then(Value::as_array)
            .map_or(0, Vec::len)
    }

    /// The whole document.
    pub fn as_value(&self) -> &Value {
        &self.0
    }
}

/// Load the skills document from `path`.
///
/// A missing file yields `{"skills": []}`.
pub fn load_skills(path: &Path) -> Result<Loaded<Skills>> {
    if !path.exists() {
        return Ok(Loaded::missing(Skills::default(), Section::Skills, path));
    }

    let content = fs::read_to_string(path).map_err(|source| SkillsError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let value: Value = serde_json::from_str(&content).map_err(|source| SkillsError::Json {
        path: path.to_path_buf(),
        source,
    })?;

    let skills = Skills::from_value(value).ok_or_else(|| SkillsError::MissingList {
        path: path.to_path_buf(),
    })?;

    info!(count = skills.count(), "parsed skills");
    Ok(Loaded::found(skills))
}
