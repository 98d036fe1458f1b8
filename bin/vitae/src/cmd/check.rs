//! Check command - validate configuration and content without writing

use std::path::Path;

use color_eyre::eyre::{Result, WrapErr, bail};
use vitae_core::Config;
use vitae_generator::{Assembly, Builder};

/// Validation result.
#[derive(Debug, Default)]
struct ValidationResult {
    errors: Vec<String>,
    warnings: Vec<String>,
}

impl ValidationResult {
    fn add_error(&mut self, msg: impl Into<String>) {
        self.errors.push(msg.into());
    }

    fn add_warning(&mut self, msg: impl Into<String>) {
        self.warnings.push(msg.into());
    }

    fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}

/// Run the check command.
///
/// Loads every section like `build` does, but writes nothing.
pub fn run(config_path: Option<&Path>, content: Option<&Path>, strict: bool) -> Result<()> {
    tracing::info!(?config_path, strict, "Checking configuration and content");

    let mut result = ValidationResult::default();

    println!("Checking configuration...");
    let config = super::load_config(config_path, content, None)?;
    println!("  ✓ Configuration valid");
    check_output_path(&config, &mut result);

    println!("\nChecking content...");
    let assembly = Builder::new(config)
        .assemble()
        .wrap_err("Content check failed")?;
    report_content(&assembly, &mut result);

    println!();
    println!("Summary:");
    println!("  Errors:   {}", result.errors.len());
    println!("  Warnings: {}", result.warnings.len());

    if result.has_errors() {
        println!();
        println!("Errors:");
        for err in &result.errors {
            println!("  ✗ {err}");
        }
    }

    if result.has_warnings() {
        println!();
        println!("Warnings:");
        for warn in &result.warnings {
            println!("  ⚠ {warn}");
        }
    }

    if result.has_errors() {
        bail!("Validation failed with {} error(s)", result.errors.len());
    }

    if strict && result.has_warnings() {
        bail!(
            "Validation failed with {} warning(s) (strict mode)",
            result.warnings.len()
        );
    }

    println!();
    println!("✓ All checks passed");

    Ok(())
}

/// The output path must not be an existing directory.
fn check_output_path(config: &Config, result: &mut ValidationResult) {
    let output = &config.output.path;
    if output.is_dir() {
        result.add_error(format!(
            "Output path exists but is a directory: {}",
            output.display()
        ));
    }
}

/// Print per-section counts and record missing sources as warnings.
fn report_content(assembly: &Assembly, result: &mut ValidationResult) {
    let stats = assembly.stats();

    println!("  ✓ {} project(s)", stats.projects);
    println!("  ✓ {} experience(s)", stats.experiences);
    println!("  ✓ {} bio field(s)", assembly.snapshot.bio.len());
    println!("  ✓ {} skill(s)", stats.skills);

    for missing in stats.missing {
        result.add_warning(missing.to_string());
    }
}
