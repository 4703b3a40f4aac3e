//! Analysis engine - evaluates the SEO rule table over collected data

use chrono::Utc;
use rayon::prelude::*;

use crate::{
    CollectedData, Grade, Issue, IssueCategory, OnPageMetrics, PageSpeedMetrics, Section, Severity,
    SiteAnalysis, TechnicalMetrics,
};

use super::scoring::{self, ScoreCalculator};

/// How many strengths/issues/opportunities the summary shows
const SUMMARY_TOP_N: usize = 5;

/// Main analysis engine. Stateless: every call evaluates the rule table
/// over local accumulators, so results never leak between records and
/// records can be scored in parallel.
pub struct AnalysisEngine;

/// Accumulated findings for one record while rules run
#[derive(Default)]
struct Findings {
    issues: Vec<Issue>,
    strengths: Vec<String>,
    opportunities: Vec<String>,
    performance: f64,
    technical_seo: f64,
    on_page_seo: f64,
}

impl AnalysisEngine {
    /// Create a new analysis engine
    pub fn new() -> Self {
        Self
    }

    /// Analyze one collected record
    pub fn analyze(&self, data: &CollectedData) -> SiteAnalysis {
        let mut findings = Findings::default();

        evaluate_page_speed(&data.page_speed, &mut findings);
        evaluate_on_page(&data.on_page, &mut findings);
        evaluate_technical(&data.technical, &mut findings);

        let overall = ScoreCalculator::overall(
            findings.performance,
            findings.technical_seo,
            findings.on_page_seo,
        );
        let scores = crate::CategoryScores {
            performance: findings.performance,
            technical_seo: findings.technical_seo,
            on_page_seo: findings.on_page_seo,
            overall,
        };

        let summary = build_summary(
            &data.url,
            &scores,
            &findings.issues,
            &findings.strengths,
            &findings.opportunities,
        );

        SiteAnalysis {
            url: data.url.clone(),
            timestamp: Utc::now().to_rfc3339(),
            scores,
            grade: Grade::from_score(overall),
            issues: findings.issues,
            strengths: findings.strengths,
            opportunities: findings.opportunities,
            summary,
        }
    }

    /// Analyze a batch of records. Records are independent, so the batch
    /// is scored in parallel.
    pub fn analyze_many(&self, records: &[CollectedData]) -> Vec<SiteAnalysis> {
        records.par_iter().map(|data| self.analyze(data)).collect()
    }

    /// Calculate aggregate statistics across results
    pub fn aggregate_stats(results: &[SiteAnalysis]) -> AggregateStats {
        if results.is_empty() {
            return AggregateStats {
                urls_analyzed: 0,
                average_score: 0.0,
                average_grade: Grade::F,
                total_critical: 0,
                total_warnings: 0,
            };
        }

        let sum: f64 = results.iter().map(|r| r.scores.overall).sum();
        let average = (sum / results.len() as f64 * 10.0).round() / 10.0;

        AggregateStats {
            urls_analyzed: results.len(),
            average_score: average,
            average_grade: Grade::from_score(average),
            total_critical: results.iter().map(|r| r.critical_count()).sum(),
            total_warnings: results.iter().map(|r| r.warning_count()).sum(),
        }
    }
}

impl Default for AnalysisEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// Aggregate statistics for a multi-URL run
#[derive(Debug, Clone)]
pub struct AggregateStats {
    pub urls_analyzed: usize,
    pub average_score: f64,
    pub average_grade: Grade,
    pub total_critical: usize,
    pub total_warnings: usize,
}

/// Page-speed rules. Also sets the performance and technical-SEO
/// category scores: the technical-SEO score is the Lighthouse SEO
/// category score from this section, not anything from the technical
/// checks below. Intentional; pinned by tests.
fn evaluate_page_speed(section: &Section<PageSpeedMetrics>, findings: &mut Findings) {
    let speed = match section {
        Section::Unavailable { error } => {
            findings.issues.push(
                Issue::warning(
                    IssueCategory::Performance,
                    "Could not retrieve PageSpeed data",
                )
                .with_details(error.clone()),
            );
            return;
        }
        Section::Available(metrics) => metrics,
    };

    if speed.performance_score >= 90.0 {
        findings
            .strengths
            .push("Excellent page performance".to_string());
    } else if speed.performance_score >= 50.0 {
        findings.issues.push(
            Issue::warning(
                IssueCategory::Performance,
                format!(
                    "Moderate performance score: {:.0}/100",
                    speed.performance_score
                ),
            )
            .recommend("Optimize images, minify CSS/JS, enable caching"),
        );
    } else {
        findings.issues.push(
            Issue::critical(
                IssueCategory::Performance,
                format!("Poor performance score: {:.0}/100", speed.performance_score),
            )
            .recommend("Critical: Improve server response time, optimize images, reduce JavaScript"),
        );
    }

    if speed.seo_score >= 90.0 {
        findings.strengths.push(format!(
            "Strong technical SEO score: {:.0}/100",
            speed.seo_score
        ));
    } else if speed.seo_score < 80.0 {
        findings.issues.push(
            Issue::warning(
                IssueCategory::TechnicalSeo,
                format!("SEO score needs improvement: {:.0}/100", speed.seo_score),
            )
            .recommend("Review meta tags, heading structure, and mobile-friendliness"),
        );
    }

    if !speed.mobile_friendly {
        findings.issues.push(
            Issue::critical(IssueCategory::Mobile, "Page is not mobile-friendly")
                .recommend("Add viewport meta tag and ensure responsive design"),
        );
    }

    findings.performance = speed.performance_score;
    findings.technical_seo = speed.seo_score;
}

/// On-page rules plus the penalty-based on-page score
fn evaluate_on_page(section: &Section<OnPageMetrics>, findings: &mut Findings) {
    let onpage = match section {
        Section::Unavailable { error } => {
            findings.issues.push(
                Issue::warning(
                    IssueCategory::OnPageSeo,
                    "Could not analyze on-page elements",
                )
                .with_details(error.clone()),
            );
            return;
        }
        Section::Available(metrics) => metrics,
    };

    // Title tag: exactly one bucket fires
    if onpage.title_length == 0 {
        findings.issues.push(
            Issue::critical(IssueCategory::OnPageSeo, "Missing title tag")
                .recommend("Add a descriptive title tag (50-60 characters)"),
        );
    } else if onpage.title_length < scoring::TITLE_MIN_LEN {
        findings.issues.push(
            Issue::warning(
                IssueCategory::OnPageSeo,
                format!("Title tag too short: {} characters", onpage.title_length),
            )
            .recommend("Expand title to 50-60 characters for better SEO"),
        );
    } else if onpage.title_length > scoring::TITLE_MAX_LEN {
        findings.issues.push(
            Issue::warning(
                IssueCategory::OnPageSeo,
                format!("Title tag too long: {} characters", onpage.title_length),
            )
            .recommend("Shorten title to 50-60 characters to avoid truncation"),
        );
    } else {
        findings.strengths.push(format!(
            "Good title length: {} characters",
            onpage.title_length
        ));
    }

    // Meta description
    if onpage.meta_description_length == 0 {
        findings.issues.push(
            Issue::critical(IssueCategory::OnPageSeo, "Missing meta description")
                .recommend("Add a compelling meta description (150-160 characters)"),
        );
    } else if onpage.meta_description_length < scoring::META_MIN_LEN {
        findings.issues.push(
            Issue::warning(
                IssueCategory::OnPageSeo,
                format!(
                    "Meta description too short: {} characters",
                    onpage.meta_description_length
                ),
            )
            .recommend("Expand to 150-160 characters for better CTR"),
        );
    } else if onpage.meta_description_length > scoring::META_MAX_LEN {
        findings.issues.push(
            Issue::warning(
                IssueCategory::OnPageSeo,
                format!(
                    "Meta description too long: {} characters",
                    onpage.meta_description_length
                ),
            )
            .recommend("Shorten to 150-160 characters to avoid truncation"),
        );
    } else {
        findings.strengths.push(format!(
            "Good meta description length: {} characters",
            onpage.meta_description_length
        ));
    }

    // Heading structure
    if onpage.h1_count == 0 {
        findings.issues.push(
            Issue::critical(IssueCategory::OnPageSeo, "Missing H1 heading")
                .recommend("Add exactly one H1 tag with primary keyword"),
        );
    } else if onpage.h1_count > 1 {
        findings.issues.push(
            Issue::warning(
                IssueCategory::OnPageSeo,
                format!("Multiple H1 tags found: {}", onpage.h1_count),
            )
            .recommend("Use only one H1 tag per page"),
        );
    } else {
        findings.strengths.push("Proper H1 structure".to_string());
    }

    // Alt-text coverage: only meaningful when the page has images
    if onpage.total_images > 0 && onpage.images_without_alt > 0 {
        let percentage = onpage.images_without_alt as f64 / onpage.total_images as f64 * 100.0;
        if scoring::alt_text_ratio_excessive(onpage) {
            findings.issues.push(
                Issue::warning(
                    IssueCategory::ImageOptimization,
                    format!(
                        "{}/{} images missing alt text ({:.0}%)",
                        onpage.images_without_alt, onpage.total_images, percentage
                    ),
                )
                .recommend("Add descriptive alt text to all images for accessibility and SEO"),
            );
        } else {
            findings.opportunities.push(format!(
                "Add alt text to {} remaining images",
                onpage.images_without_alt
            ));
        }
    } else if onpage.total_images > 0 {
        findings
            .strengths
            .push("All images have alt text".to_string());
    }

    // Content length
    if onpage.word_count < scoring::THIN_CONTENT_WORDS {
        findings.issues.push(
            Issue::warning(
                IssueCategory::Content,
                format!("Thin content: only {} words", onpage.word_count),
            )
            .recommend("Aim for at least 1000 words for better ranking potential"),
        );
    } else if onpage.word_count > scoring::COMPREHENSIVE_CONTENT_WORDS {
        findings
            .strengths
            .push(format!("Comprehensive content: {} words", onpage.word_count));
    } else {
        findings.opportunities.push(format!(
            "Consider expanding content (current: {} words)",
            onpage.word_count
        ));
    }

    if onpage.internal_links_count < scoring::MIN_INTERNAL_LINKS {
        findings
            .opportunities
            .push("Add more internal links to improve site structure".to_string());
    }

    findings.on_page_seo = ScoreCalculator::on_page_score(onpage);
}

/// Technical rules. Sets no category score; the technical-SEO score
/// comes from the page-speed section.
fn evaluate_technical(section: &Section<TechnicalMetrics>, findings: &mut Findings) {
    let technical = match section {
        Section::Unavailable { error } => {
            findings.issues.push(
                Issue::warning(
                    IssueCategory::TechnicalSeo,
                    "Could not analyze technical aspects",
                )
                .with_details(error.clone()),
            );
            return;
        }
        Section::Available(metrics) => metrics,
    };

    if !technical.is_https {
        findings.issues.push(
            Issue::critical(IssueCategory::Security, "Site not using HTTPS")
                .recommend("Implement SSL certificate for security and SEO"),
        );
    } else {
        findings
            .strengths
            .push("Secure HTTPS connection".to_string());
    }

    if technical.status_code != 200 {
        findings.issues.push(
            Issue::critical(
                IssueCategory::TechnicalSeo,
                format!("Unexpected status code: {}", technical.status_code),
            )
            .recommend("Ensure page returns 200 OK status"),
        );
    }

    if technical.response_time_ms > 2000 {
        findings.issues.push(
            Issue::warning(
                IssueCategory::Performance,
                format!("Slow response time: {}ms", technical.response_time_ms),
            )
            .recommend("Optimize server performance, use CDN, enable caching"),
        );
    } else if technical.response_time_ms < 500 {
        findings.strengths.push(format!(
            "Fast response time: {}ms",
            technical.response_time_ms
        ));
    }

    if !technical.has_robots_txt {
        findings
            .opportunities
            .push("Add robots.txt file to guide search engine crawlers".to_string());
    } else {
        findings
            .strengths
            .push("robots.txt file present".to_string());
    }

    if !technical.has_sitemap {
        findings
            .opportunities
            .push("Add XML sitemap for better indexing".to_string());
    } else {
        findings.strengths.push("XML sitemap present".to_string());
    }

    if !technical.has_compression {
        findings
            .opportunities
            .push("Enable GZIP/Brotli compression to reduce page size".to_string());
    }
}

/// Deterministic text summary assembled from the accumulated findings
fn build_summary(
    url: &str,
    scores: &crate::CategoryScores,
    issues: &[Issue],
    strengths: &[String],
    opportunities: &[String],
) -> String {
    let critical_count = issues
        .iter()
        .filter(|i| i.severity == Severity::Critical)
        .count();
    let warning_count = issues
        .iter()
        .filter(|i| i.severity == Severity::Warning)
        .count();

    format!(
        "SEO Analysis Summary for {url}\n\
         {divider}\n\
         \n\
         Overall SEO Score: {overall:.1}/100\n\
         \n\
         Category Scores:\n\
         - Performance: {performance:.1}/100\n\
         - Technical SEO: {technical:.1}/100\n\
         - On-Page SEO: {on_page:.1}/100\n\
         \n\
         Issues Found:\n\
         - Critical Issues: {critical_count}\n\
         - Warnings: {warning_count}\n\
         \n\
         Top Strengths ({strength_count}):\n\
         {strength_list}\n\
         \n\
         Top Issues:\n\
         {issue_list}\n\
         \n\
         Opportunities for Improvement:\n\
         {opportunity_list}",
        divider = "=".repeat(60),
        overall = scores.overall,
        performance = scores.performance,
        technical = scores.technical_seo,
        on_page = scores.on_page_seo,
        strength_count = strengths.len(),
        strength_list = format_list(&strengths[..strengths.len().min(SUMMARY_TOP_N)]),
        issue_list = format_issues(&issues[..issues.len().min(SUMMARY_TOP_N)]),
        opportunity_list = format_list(&opportunities[..opportunities.len().min(SUMMARY_TOP_N)]),
    )
}

fn format_list(items: &[String]) -> String {
    if items.is_empty() {
        return "  None identified".to_string();
    }
    items
        .iter()
        .map(|item| format!("  + {item}"))
        .collect::<Vec<_>>()
        .join("\n")
}

fn format_issues(issues: &[Issue]) -> String {
    if issues.is_empty() {
        return "  None - Great job!".to_string();
    }

    let mut lines = Vec::new();
    for issue in issues {
        let marker = match issue.severity {
            Severity::Critical => "!!",
            Severity::Warning => " !",
        };
        lines.push(format!("  {} [{}] {}", marker, issue.category, issue.message));
        if let Some(ref recommendation) = issue.recommendation {
            lines.push(format!("     -> {recommendation}"));
        }
    }
    lines.join("\n")
}
