//! Reporter module for output formatting

pub mod console;
pub mod html;
pub mod json;
pub mod markdown;

pub use console::ConsoleReporter;
pub use html::HtmlReporter;
pub use json::JsonReporter;
pub use markdown::MarkdownReporter;

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Base file name for a site's reports, e.g. `seo_report_example_com_20240131_142501`
pub fn report_basename(domain: &str, stamp: &str) -> String {
    format!("seo_report_{}_{}", domain.replace('.', "_"), stamp)
}

/// Write a rendered report, creating the directory as needed
pub fn save_report(content: &str, dir: &Path, basename: &str, extension: &str) -> Result<PathBuf> {
    fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create report directory {}", dir.display()))?;
    let path = dir.join(format!("{basename}.{extension}"));
    fs::write(&path, content)
        .with_context(|| format!("Failed to write report {}", path.display()))?;
    Ok(path)
}
