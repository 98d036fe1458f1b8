//! Build command - writes the site data file

use std::{path::Path, time::Instant};

use color_eyre::eyre::{Result, WrapErr};
use vitae_generator::{BuildStats, Builder};

use super::load_config;

/// Run the build command.
///
/// Loads all content and writes the snapshot to the configured output path.
pub fn run(
    config_path: Option<&Path>,
    content: Option<&Path>,
    output: Option<&Path>,
) -> Result<BuildStats> {
    let start = Instant::now();
    tracing::info!(?config_path, ?content, ?output, "Starting build");

    let config = load_config(config_path, content, output)?;
    let output_path = config.output.path.clone();

    println!("Building site data...");

    let stats = Builder::new(config).build().wrap_err("Build failed")?;

    let duration = start.elapsed();

    if !stats.missing.is_empty() {
        println!();
        println!("  Warnings:");
        for missing in &stats.missing {
            println!("  ⚠ {missing}");
        }
    }

    println!();
    println!("  Build completed successfully!");
    println!();
    println!("  Projects:    {}", stats.projects);
    println!("  Experiences: {}", stats.experiences);
    println!("  Skills:      {}", stats.skills);
    println!("  Warnings:    {}", stats.missing.len());
    println!();
    println!("  Duration:    {:.2}s", duration.as_secs_f64());
    println!("  Output:      {}", output_path.display());
    println!();

    tracing::info!(?stats, ?duration, "Build completed successfully");

    Ok(stats)
}
