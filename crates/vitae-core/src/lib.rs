//! vitae Core Library
//!
//! Content types, frontmatter extraction, configuration and error handling
//! for the vitae site data builder.

pub mod config;
pub mod content;
pub mod error;
pub mod frontmatter;

pub use config::Config;
pub use content::{ContentType, FieldValue, Fields, Record};
pub use error::{CoreError, Result};
pub use frontmatter::{Document, extract, read_document};
