//! The aggregate document written for the site.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Serialize, Serializer};
use vitae_core::{Fields, Record};

use crate::skills::Skills;

/// Everything the site consumes, in one JSON document.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteSnapshot {
    /// Projects in display order.
    pub projects: Vec<Record>,

    /// Experiences in display order.
    pub experiences: Vec<Record>,

    /// Bio fields.
    pub bio: Fields,

    /// Skills document.
    pub skills: Skills,

    /// When the snapshot was assembled.
    #[serde(serialize_with = "serialize_timestamp")]
    pub build_date: DateTime<Utc>,
}

impl SiteSnapshot {
    /// Render as JSON indented by two spaces.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// ISO-8601 UTC with millisecond precision, e.g. `2024-05-01T09:30:00.000Z`.
fn serialize_timestamp<S: Serializer>(
    date: &DateTime<Utc>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&date.to_rfc3339_opts(SecondsFormat::Millis, true))
}
