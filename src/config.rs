use std::path::{Path, PathBuf};

use anyhow::{ensure, Context, Result};
use serde::Deserialize;

use crate::models::LicenseType;
use crate::orchestrator::DEFAULT_JOBS;

/// Settings read from `.license-sweep/config.toml`. Every key is optional.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Scanner executable, looked up on `PATH` unless it contains a separator.
    pub scanner: String,
    /// File whose presence marks a directory as a module root.
    pub descriptor: String,
    /// How many module roots are scanned concurrently.
    pub jobs: usize,
    /// Report location relative to each module root.
    pub report_path: PathBuf,
    /// Categories `check` rejects when none are given on the command line.
    pub disallowed_types: Vec<LicenseType>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            scanner: "go-licenses".to_string(),
            descriptor: "go.mod".to_string(),
            jobs: DEFAULT_JOBS,
            report_path: PathBuf::from("docs").join("_licenses.md"),
            disallowed_types: vec![LicenseType::Forbidden, LicenseType::Restricted],
        }
    }
}

impl Config {
    fn validate(self) -> Result<Self> {
        ensure!(self.jobs > 0, "`jobs` must be at least 1");
        ensure!(!self.descriptor.is_empty(), "`descriptor` must not be empty");
        ensure!(
            self.report_path.is_relative(),
            "`report_path` must be relative to the module root, got {}",
            self.report_path.display()
        );
        Ok(self)
    }
}

fn read_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("could not read {}", path.display()))?;
    let config: Config =
        toml::from_str(&content).with_context(|| format!("invalid config {}", path.display()))?;
    log::debug!("loaded config from {}", path.display());
    config.validate()
}

/// Load the configuration, searching in order:
///
/// 1. `config_override`: path passed via `--config`
/// 2. `<root>/.license-sweep/config.toml`
/// 3. `~/.config/license-sweep/config.toml`
/// 4. Built-in [`Config::default`]
pub fn load_config(root: &Path, config_override: Option<&Path>) -> Result<Config> {
    if let Some(path) = config_override {
        return read_config(path);
    }

    let project_config = root.join(".license-sweep").join("config.toml");
    if project_config.exists() {
        return read_config(&project_config);
    }

    if let Some(home) = dirs::home_dir() {
        let home_config = home.join(".config").join("license-sweep").join("config.toml");
        if home_config.exists() {
            return read_config(&home_config);
        }
    }

    Ok(Config::default())
}
