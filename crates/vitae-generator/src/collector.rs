//! Content collection and ordering.
//!
//! Reads the project and experience directories and the bio file into
//! records. A missing source is reported, not fatal.

use std::{
    cmp::Ordering,
    fmt,
    path::{Path, PathBuf},
};

use thiserror::Error;
use tracing::{debug, info, warn};
use vitae_core::{ContentType, CoreError, Fields, Record, config::ContentConfig, read_document};
use walkdir::WalkDir;

/// Sort key for experiences without a usable `order`.
pub const DEFAULT_EXPERIENCE_ORDER: f64 = 999.0;

/// Content collection errors.
#[derive(Debug, Error)]
pub enum CollectorError {
    /// Content file could not be read.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Directory listing failed.
    #[error("failed to list {path}: {source}")]
    Walk {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    /// A content path exists but is not a directory.
    #[error("not a directory: {0}")]
    NotADirectory(PathBuf),

    /// Invalid content path.
    #[error("invalid content path: {0}")]
    InvalidPath(PathBuf),
}

/// Result type for collector operations.
pub type Result<T> = std::result::Result<T, CollectorError>;

/// Section of the site snapshot a source feeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Projects,
    Experiences,
    Bio,
    Skills,
}

impl Section {
    /// Lowercase section name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Projects => "projects",
            Self::Experiences => "experiences",
            Self::Bio => "bio",
            Self::Skills => "skills",
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An expected input that does not exist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingSource {
    /// Section left empty.
    pub section: Section,

    /// Path that was looked up.
    pub path: PathBuf,
}

impl fmt::Display for MissingSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} source not found: {}", self.section, self.path.display())
    }
}

/// Output of a loader, with the missing source if it fell back to a default.
#[derive(Debug, Clone)]
pub struct Loaded<T> {
    /// Loaded or default value.
    pub value: T,

    /// Set when the source did not exist.
    pub missing: Option<MissingSource>,
}

impl<T> Loaded<T> {
    /// A value read from an existing source.
    pub fn found(value: T) -> Self {
        Self {
            value,
            missing: None,
        }
    }

    /// A default value standing in for a missing source.
    pub fn missing(value: T, section: Section, path: &Path) -> Self {
        let missing = MissingSource {
            section,
            path: path.to_path_buf(),
        };
        warn!(section = %section, path = %path.display(), "source not found, using default");
        Self {
            value,
            missing: Some(missing),
        }
    }
}

/// Collected markdown content.
#[derive(Debug, Clone, Default)]
pub struct SiteContent {
    /// Projects in display order.
    pub projects: Vec<Record>,

    /// Experiences in display order.
    pub experiences: Vec<Record>,

    /// Bio fields.
    pub bio: Fields,

    /// Sources that fell back to defaults.
    pub missing: Vec<MissingSource>,
}

/// Content collector for the markdown sections.
#[derive(Debug, Clone)]
pub struct ContentCollector {
    content: ContentConfig,
}

impl ContentCollector {
    /// Create a new content collector.
    #[must_use]
    pub fn new(content: ContentConfig) -> Self {
        Self { content }
    }

    /// Collect projects, experiences and bio.
    pub fn collect(&self) -> Result<SiteContent> {
        info!(root = %self.content.root.display(), "collecting content");

        let mut content = SiteContent::default();

        let projects = load_projects(&self.content.projects_dir())?;
        content.missing.extend(projects.missing);
        content.projects = projects.value;

        let experiences = load_experiences(&self.content.experiences_dir())?;
        content.missing.extend(experiences.missing);
        content.experiences = experiences.value;

        let bio = load_bio(&self.content.bio_file())?;
        content.missing.extend(bio.missing);
        content.bio = bio.value;

        info!(
            projects = content.projects.len(),
            experiences = content.experiences.len(),
            missing = content.missing.len(),
            "content collection complete"
        );

        Ok(content)
    }
}

/// Load every project file in `dir`, sorted for display.
pub fn load_projects(dir: &Path) -> Result<Loaded<Vec<Record>>> {
    if !dir.exists() {
        return Ok(Loaded::missing(Vec::new(), Section::Projects, dir));
    }

    let mut projects = Vec::new();
    for path in find_content_files(dir)? {
        let doc = read_document(&path)?;
        projects.push(to_record(&path, doc.fields)?);
    }

    sort_projects(&mut projects);

    info!(count = projects.len(), "parsed projects");
    Ok(Loaded::found(projects))
}

/// Load every experience file in `dir`, sorted for display.
///
/// An experience without a truthy `description` takes its body instead.
pub fn load_experiences(dir: &Path) -> Result<Loaded<Vec<Record>>> {
    if !dir.exists() {
        return Ok(Loaded::missing(Vec::new(), Section::Experiences, dir));
    }

    let mut experiences = Vec::new();
    for path in find_content_files(dir)? {
        let doc = read_document(&path)?;
        let mut fields = doc.fields;

        if !fields.is_truthy("description") && !doc.body.is_empty() {
            fields.insert("description", doc.body);
        }

        experiences.push(to_record(&path, fields)?);
    }

    sort_experiences(&mut experiences);

    info!(count = experiences.len(), "parsed experiences");
    Ok(Loaded::found(experiences))
}

/// Load the bio file's fields.
///
/// A missing file yields empty `about` and `tagline` fields.
pub fn load_bio(path: &Path) -> Result<Loaded<Fields>> {
    if !path.exists() {
        let fields: Fields = [("about", ""), ("tagline", "")].into_iter().collect();
        return Ok(Loaded::missing(fields, Section::Bio, path));
    }

    let doc = read_document(path)?;
    info!(fields = doc.fields.len(), "parsed bio");
    Ok(Loaded::found(doc.fields))
}

/// Order projects in place.
///
/// Two records that both carry an `order` compare by it. Otherwise featured
/// records come first, and ties keep their file order.
pub fn sort_projects(projects: &mut [Record]) {
    // Not a total order once `order` and `featured` are mixed, so this cannot
    // go through `slice::sort_by`, which may panic on such comparators.
    // Experiences share the sort for the same reason.
    insertion_sort_by(projects, compare_projects);
}

/// Compare two projects for display order.
///
/// An `order` without a numeric reading ties with the other record.
pub fn compare_projects(a: &Record, b: &Record) -> Ordering {
    if let (Some(x), Some(y)) = (a.order(), b.order()) {
        return compare_numbers(x.as_number(), y.as_number());
    }
    b.is_featured().cmp(&a.is_featured())
}

/// Order experiences in place by ascending `order`, missing last.
pub fn sort_experiences(experiences: &mut [Record]) {
    insertion_sort_by(experiences, |a, b| {
        compare_numbers(experience_order(a), experience_order(b))
    });
}

fn experience_order(record: &Record) -> Option<f64> {
    match record.order() {
        Some(value) => value.as_number(),
        None => Some(DEFAULT_EXPERIENCE_ORDER),
    }
}

fn compare_numbers(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(x), Some(y)) => x.total_cmp(&y),
        _ => Ordering::Equal,
    }
}

/// Stable insertion sort that tolerates non-transitive comparators.
fn insertion_sort_by<T>(items: &mut [T], mut compare: impl FnMut(&T, &T) -> Ordering) {
    for i in 1..items.len() {
        let mut j = i;
        while j > 0 && compare(&items[j - 1], &items[j]) == Ordering::Greater {
            items.swap(j - 1, j);
            j -= 1;
        }
    }
}

/// List content files directly inside `dir`, sorted by file name.
fn find_content_files(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(CollectorError::NotADirectory(dir.to_path_buf()));
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
        .sort_by_file_name()
    {
        let entry = match entry {
            Ok(entry) => entry,
            // Broken entries that would be filtered out anyway are skipped.
            Err(err)
                if err.depth() > 0
                    && err.path().is_some_and(|p| ContentType::from_path(p).is_none()) =>
            {
                debug!(error = %err, "skipping unreadable entry");
                continue;
            }
            Err(source) => {
                return Err(CollectorError::Walk {
                    path: dir.to_path_buf(),
                    source,
                });
            }
        };

        let path = entry.path();
        if entry.file_type().is_file() && ContentType::from_path(path).is_some() {
            debug!(path = %path.display(), "found content file");
            files.push(path.to_path_buf());
        }
    }

    Ok(files)
}

fn to_record(path: &Path, fields: Fields) -> Result<Record> {
    Record::from_path(path, fields).ok_or_else(|| CollectorError::InvalidPath(path.to_path_buf()))
}
