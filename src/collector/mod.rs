//! SEO data collection: PageSpeed Insights, on-page scraping, technical checks
//!
//! Every section is best-effort: a failure becomes that section's error
//! marker in the collected record and never aborts the run.

mod onpage;
mod pagespeed;
mod technical;

pub use pagespeed::Strategy;

use std::fs;
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use chrono::{Local, Utc};
use thiserror::Error;
use url::Url;

use crate::CollectedData;

/// Browser-like User-Agent; some sites answer bare clients differently
const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";

const PAGE_TIMEOUT: Duration = Duration::from_secs(30);
const PROBE_TIMEOUT: Duration = Duration::from_secs(10);

/// Errors from a single collection step
#[derive(Debug, Error)]
pub enum CollectorError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
    #[error("HTML parse error: {0}")]
    Parse(String),
}

/// Collects SEO data for target URLs
pub struct Collector {
    client: reqwest::blocking::Client,
    /// Redirects disabled; the technical check reports the raw status
    probe_client: reqwest::blocking::Client,
    strategy: Strategy,
}

impl Collector {
    /// Create a collector with default (mobile) strategy
    pub fn new() -> Result<Self, CollectorError> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(USER_AGENT)
            .build()?;
        let probe_client = reqwest::blocking::Client::builder()
            .user_agent(USER_AGENT)
            .redirect(reqwest::redirect::Policy::none())
            .build()?;
        Ok(Self {
            client,
            probe_client,
            strategy: Strategy::Mobile,
        })
    }

    /// Set the PageSpeed analysis strategy
    pub fn with_strategy(mut self, strategy: Strategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Collect all sections for one URL. Infallible by design: section
    /// errors are recorded in the record itself.
    pub fn collect(&self, target: &str) -> CollectedData {
        let domain = Url::parse(target)
            .ok()
            .and_then(|u| u.host_str().map(str::to_string))
            .unwrap_or_default();

        CollectedData {
            url: target.to_string(),
            timestamp: Utc::now().to_rfc3339(),
            domain,
            page_speed: self.page_speed(target).into(),
            on_page: self.on_page(target).into(),
            technical: self.technical(target).into(),
        }
    }
}

/// File-name timestamp, e.g. 20240131_142501
pub fn file_stamp() -> String {
    Local::now().format("%Y%m%d_%H%M%S").to_string()
}

/// Domain with dots flattened for file names
pub fn sanitize_domain(domain: &str) -> String {
    domain.replace('.', "_")
}

/// Data file name for a collected record
pub fn data_filename(domain: &str, stamp: &str) -> String {
    format!("seo_data_{}_{}.json", sanitize_domain(domain), stamp)
}

/// Save a collected record as pretty JSON
pub fn save_data(data: &CollectedData, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(data)?;
    fs::write(path, json).with_context(|| format!("Failed to write {}", path.display()))
}

/// Load records from a data file holding one record or an array
pub fn load_data(path: &Path) -> Result<Vec<CollectedData>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read data file: {}", path.display()))?;
    let value: serde_json::Value = serde_json::from_str(&content)
        .with_context(|| format!("Invalid JSON in {}", path.display()))?;

    let records = if value.is_array() {
        serde_json::from_value(value)
            .with_context(|| format!("Invalid data records in {}", path.display()))?
    } else {
        vec![serde_json::from_value(value)
            .with_context(|| format!("Invalid data record in {}", path.display()))?]
    };
    Ok(records)
}
