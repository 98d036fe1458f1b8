//! vitae CLI Library
//!
//! Command implementations for the `vitae` binary, which reads the portfolio
//! content directory and writes one JSON data file for the site build.
//!
//! # Modules
//!
//! - [`cmd`] - Command implementations (build, check)
//!
//! # Example
//!
//! ```no_run
//! // Build with `vitae.toml` (or the defaults) from the working directory
//! vitae::cmd::build::run(None, None, None).unwrap();
//! ```

pub mod cmd;

pub use vitae_core::Config;
pub use vitae_generator::{BuildStats, Builder, SiteSnapshot};

/// Initialize tracing with the specified verbosity level.
///
/// # Arguments
///
/// * `verbose` - Verbosity level (0 = WARN, 1 = INFO, 2 = DEBUG, 3+ = TRACE)
pub fn init_tracing(verbose: u8) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let level = match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()))
        .init();
}
