//! Config command - writes the default circuit configuration

use anyhow::{Context, Result};
use spark_circuit::CircuitConfig;
use std::fs;
use std::path::Path;

const HEADER: &str = "# Spark circuit configuration\n\
# Coordinates are canvas pixels; step_size is pixels per tick.\n\n";

pub fn run(output: Option<&str>, force: bool) -> Result<()> {
    let text = default_config_text()?;

    let Some(path) = output else {
        print!("{}", text);
        return Ok(());
    };

    if Path::new(path).exists() && !force {
        anyhow::bail!("File '{}' already exists (use --force to overwrite)", path);
    }
    fs::write(path, &text).with_context(|| format!("Failed to write '{}'", path))?;
    println!("Wrote default circuit config to {}", path);
    Ok(())
}

fn default_config_text() -> Result<String> {
    let body = CircuitConfig::default()
        .to_toml_string()
        .context("Failed to serialize default config")?;
    Ok(format!("{HEADER}{body}"))
}
