//! Optional TOML tuning overrides.

use std::{fs, path::Path};

use anyhow::{Context, Result};
use mobile_strike_core::Tuning;

/// Loads tuning from `path`, or the defaults when no file was given.
pub(crate) fn load_tuning(path: Option<&Path>) -> Result<Tuning> {
    let Some(path) = path else {
        return Ok(Tuning::default());
    };
    let contents = fs::read_to_string(path)
        .with_context(|| format!("failed to read tuning file {}", path.display()))?;
    parse_tuning(&contents)
        .with_context(|| format!("failed to parse tuning file {}", path.display()))
}

fn parse_tuning(contents: &str) -> Result<Tuning> {
    Ok(toml::from_str(contents)?)
}
