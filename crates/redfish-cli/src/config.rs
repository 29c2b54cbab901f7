//! Run configuration
//!
//! Optional YAML file supplying defaults for the CLI commands; flags on the
//! command line win over the file.

use anyhow::Context;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Defaults loaded from `--config`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RunConfig {
    /// Directory of CSDL `.xml` files to load into the registry.
    #[serde(default)]
    pub schema_dir: Option<PathBuf>,

    /// Directory holding a recorded service tree (mockup layout).
    #[serde(default)]
    pub fixtures: Option<PathBuf>,

    /// Root URI the crawl starts from.
    #[serde(default)]
    pub root_uri: Option<String>,
}

impl RunConfig {
    /// Load a config file; a missing `--config` flag means all defaults.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading config file {}", path.display()))?;
        serde_yaml::from_str(&content)
            .with_context(|| format!("parsing config file {}", path.display()))
    }
}
