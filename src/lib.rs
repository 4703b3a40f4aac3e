//! Seoscan: SEO audit toolkit
//!
//! This library collects website SEO metadata (PageSpeed Insights, on-page
//! scraping, technical checks), scores it with a fixed rule table, and
//! renders reports with optional AI-phrased recommendations.

pub mod analyzer;
pub mod collector;
pub mod config;
pub mod insights;
pub mod reporter;

use serde::{Deserialize, Serialize};

/// Collected SEO data for one URL - the input record for analysis
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectedData {
    /// The audited URL
    pub url: String,
    /// Collection time (RFC 3339)
    #[serde(default)]
    pub timestamp: String,
    /// Host part of the URL
    #[serde(default)]
    pub domain: String,
    /// PageSpeed Insights metrics
    pub page_speed: Section<PageSpeedMetrics>,
    /// Scraped on-page elements
    pub on_page: Section<OnPageMetrics>,
    /// Technical checks (status, HTTPS, robots.txt, ...)
    pub technical: Section<TechnicalMetrics>,
}

/// A collected section: either its metrics, or the error marker the
/// collector recorded when retrieval failed.
///
/// The error variant must stay first: with `untagged`, serde tries
/// variants in order, and every metrics struct deserializes from
/// `{"error": ...}` too because all its fields default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Section<T> {
    Unavailable { error: String },
    Available(T),
}

impl<T> Section<T> {
    /// The metrics, if the section was collected successfully
    pub fn available(&self) -> Option<&T> {
        match self {
            Section::Available(metrics) => Some(metrics),
            Section::Unavailable { .. } => None,
        }
    }

    /// The collector's error message, if retrieval failed
    pub fn error(&self) -> Option<&str> {
        match self {
            Section::Unavailable { error } => Some(error),
            Section::Available(_) => None,
        }
    }
}

impl<T, E: std::fmt::Display> From<Result<T, E>> for Section<T> {
    fn from(result: Result<T, E>) -> Self {
        match result {
            Ok(metrics) => Section::Available(metrics),
            Err(e) => Section::Unavailable {
                error: e.to_string(),
            },
        }
    }
}

/// Metrics from the Google PageSpeed Insights API.
///
/// Lighthouse category scores are scaled to 0-100. The display-value
/// strings (FCP, LCP, ...) are carried for reports; the scoring rules
/// ignore them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PageSpeedMetrics {
    pub performance_score: f64,
    pub seo_score: f64,
    pub accessibility_score: f64,
    pub mobile_friendly: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_contentful_paint: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub largest_contentful_paint: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub speed_index: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_blocking_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cumulative_layout_shift: Option<String>,
}

/// On-page elements scraped from the page HTML
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OnPageMetrics {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub title_length: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta_description: Option<String>,
    pub meta_description_length: usize,
    pub h1_count: usize,
    /// First few H1 texts, for reports
    pub h1_tags: Vec<String>,
    pub h2_count: usize,
    pub h3_count: usize,
    pub total_images: usize,
    pub images_without_alt: usize,
    pub internal_links_count: usize,
    pub external_links_count: usize,
    pub word_count: usize,
}

/// Technical checks performed against the live site
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TechnicalMetrics {
    pub is_https: bool,
    pub status_code: u16,
    pub response_time_ms: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub server: Option<String>,
    pub content_length: u64,
    pub has_cache_control: bool,
    pub has_compression: bool,
    pub has_robots_txt: bool,
    pub has_sitemap: bool,
}

/// Severity levels for issues
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Critical,
    Warning,
}

/// Analysis categories issues are filed under
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IssueCategory {
    Performance,
    #[serde(rename = "Technical SEO")]
    TechnicalSeo,
    #[serde(rename = "On-Page SEO")]
    OnPageSeo,
    Mobile,
    Security,
    #[serde(rename = "Image Optimization")]
    ImageOptimization,
    Content,
}

impl std::fmt::Display for IssueCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IssueCategory::Performance => write!(f, "Performance"),
            IssueCategory::TechnicalSeo => write!(f, "Technical SEO"),
            IssueCategory::OnPageSeo => write!(f, "On-Page SEO"),
            IssueCategory::Mobile => write!(f, "Mobile"),
            IssueCategory::Security => write!(f, "Security"),
            IssueCategory::ImageOptimization => write!(f, "Image Optimization"),
            IssueCategory::Content => write!(f, "Content"),
        }
    }
}

/// A negative finding from rule evaluation. Immutable once created;
/// accumulated in evaluation order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Issue {
    pub category: IssueCategory,
    pub severity: Severity,
    /// Human-readable description
    pub message: String,
    /// Suggested remediation (if any)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recommendation: Option<String>,
    /// Underlying error detail, for section-unavailable issues
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl Issue {
    pub fn critical(category: IssueCategory, message: impl Into<String>) -> Self {
        Self {
            category,
            severity: Severity::Critical,
            message: message.into(),
            recommendation: None,
            details: None,
        }
    }

    pub fn warning(category: IssueCategory, message: impl Into<String>) -> Self {
        Self {
            category,
            severity: Severity::Warning,
            message: message.into(),
            recommendation: None,
            details: None,
        }
    }

    pub fn recommend(mut self, recommendation: impl Into<String>) -> Self {
        self.recommendation = Some(recommendation.into());
        self
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }
}

/// Category scores plus the weighted overall score, each 0-100
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryScores {
    pub performance: f64,
    pub technical_seo: f64,
    pub on_page_seo: f64,
    pub overall: f64,
}

/// Letter grade
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Grade {
    A,
    B,
    C,
    D,
    F,
}

impl Grade {
    pub fn from_score(score: f64) -> Self {
        if score >= 90.0 {
            Grade::A
        } else if score >= 80.0 {
            Grade::B
        } else if score >= 70.0 {
            Grade::C
        } else if score >= 60.0 {
            Grade::D
        } else {
            Grade::F
        }
    }
}

impl std::fmt::Display for Grade {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Grade::A => write!(f, "A"),
            Grade::B => write!(f, "B"),
            Grade::C => write!(f, "C"),
            Grade::D => write!(f, "D"),
            Grade::F => write!(f, "F"),
        }
    }
}

/// The result of analyzing one collected record
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteAnalysis {
    /// The analyzed URL
    pub url: String,
    /// Analysis time (RFC 3339)
    pub timestamp: String,
    /// Per-category and overall scores
    pub scores: CategoryScores,
    /// Letter grade for the overall score
    pub grade: Grade,
    /// Negative findings, in evaluation order
    pub issues: Vec<Issue>,
    /// Positive findings
    pub strengths: Vec<String>,
    /// Non-urgent improvement suggestions
    pub opportunities: Vec<String>,
    /// Deterministic text summary
    pub summary: String,
}

impl SiteAnalysis {
    pub fn critical_issues(&self) -> impl Iterator<Item = &Issue> {
        self.issues
            .iter()
            .filter(|i| i.severity == Severity::Critical)
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Issue> {
        self.issues
            .iter()
            .filter(|i| i.severity == Severity::Warning)
    }

    pub fn critical_count(&self) -> usize {
        self.critical_issues().count()
    }

    pub fn warning_count(&self) -> usize {
        self.warnings().count()
    }
}
