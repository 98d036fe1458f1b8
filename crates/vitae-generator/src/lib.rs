//! vitae Generator Library
//!
//! Turns the content directory into the site snapshot.
//!
//! # Modules
//!
//! - [`collector`] - Project, experience and bio loading and ordering
//! - [`skills`] - Skills JSON loading
//! - [`snapshot`] - The aggregate output document
//! - [`build`] - Build orchestration

pub mod build;
pub mod collector;
pub mod skills;
pub mod snapshot;

pub use build::{Assembly, BuildError, BuildStats, Builder};
pub use collector::{
    CollectorError, ContentCollector, Loaded, MissingSource, Section, SiteContent,
    load_bio, load_experiences, load_projects,
};
pub use skills::{Skills, SkillsError, load_skills};
pub use snapshot::SiteSnapshot;
