//! Configuration loading for seoscan

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const CONFIG_FILENAME: &str = ".seoscanrc.json";

const DEFAULT_OUTPUT_DIR: &str = "reports";
const DEFAULT_DATA_DIR: &str = "data";

/// Workflow configuration. CLI flags override file values.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Config {
    /// URLs audited when none are passed on the command line
    pub target_urls: Vec<String>,
    /// Directory for rendered reports (default "reports")
    pub output_directory: Option<String>,
    /// Directory for collected data files (default "data")
    pub data_directory: Option<String>,
    /// Skip the AI insight call and use the deterministic fallback
    pub skip_ai: bool,
    /// Minimum overall score; the run exits 1 when scoring below it
    pub threshold: Option<f64>,
    /// PageSpeed strategy: "mobile" (default) or "desktop"
    pub strategy: Option<String>,
}

impl Config {
    /// Overlay CLI flags on top of file values
    pub fn merge_with_cli(
        mut self,
        threshold: Option<f64>,
        skip_ai: bool,
        output: Option<&Path>,
        data_dir: Option<&Path>,
    ) -> Self {
        if threshold.is_some() {
            self.threshold = threshold;
        }
        if skip_ai {
            self.skip_ai = true;
        }
        if let Some(dir) = output {
            self.output_directory = Some(dir.display().to_string());
        }
        if let Some(dir) = data_dir {
            self.data_directory = Some(dir.display().to_string());
        }
        self
    }

    pub fn output_dir(&self) -> &str {
        self.output_directory.as_deref().unwrap_or(DEFAULT_OUTPUT_DIR)
    }

    pub fn data_dir(&self) -> &str {
        self.data_directory.as_deref().unwrap_or(DEFAULT_DATA_DIR)
    }
}

/// Find and load config. A custom path must exist; otherwise the working
/// directory and its parents are searched.
pub fn load_config(work_dir: &Path, custom_path: Option<&Path>) -> Result<Config> {
    let path = if let Some(p) = custom_path {
        let path = if p.is_absolute() {
            p.to_path_buf()
        } else {
            work_dir.join(p)
        };
        if !path.exists() {
            anyhow::bail!("Config file not found: {}", path.display());
        }
        Some(path)
    } else {
        find_config_in_parents(work_dir)
    };

    match path {
        Some(path) => {
            let content = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read config: {}", path.display()))?;
            serde_json::from_str(&content)
                .with_context(|| format!("Invalid JSON in config: {}", path.display()))
        }
        None => Ok(Config::default()),
    }
}

/// Search for .seoscanrc.json in a directory and its parents
fn find_config_in_parents(mut dir: &Path) -> Option<PathBuf> {
    loop {
        let candidate = dir.join(CONFIG_FILENAME);
        if candidate.exists() {
            return Some(candidate);
        }
        dir = dir.parent()?;
    }
}

/// Write a default config file (the init subcommand)
pub fn write_default_config(dir: &Path, threshold: Option<f64>) -> Result<PathBuf> {
    let path = dir.join(CONFIG_FILENAME);
    let threshold_value = threshold.unwrap_or(70.0);

    let json = format!(
        r#"{{
  "targetUrls": [],
  "outputDirectory": "reports",
  "dataDirectory": "data",
  "skipAi": false,
  "threshold": {threshold_value},
  "strategy": "mobile"
}}
"#
    );

    fs::write(&path, json)
        .with_context(|| format!("Failed to write config to {}", path.display()))?;
    Ok(path)
}
