//! JSON reporter for machine-readable output

use serde::Serialize;

use crate::analyzer::engine::AggregateStats;
use crate::SiteAnalysis;

/// Reporter for JSON output
pub struct JsonReporter {
    /// Whether to pretty-print JSON
    pretty: bool,
}

impl JsonReporter {
    /// Create a new JSON reporter
    pub fn new() -> Self {
        Self { pretty: false }
    }

    /// Enable pretty-printing
    pub fn pretty(mut self) -> Self {
        self.pretty = true;
        self
    }

    fn render<T: Serialize>(&self, value: &T, empty: &str) -> String {
        let result = if self.pretty {
            serde_json::to_string_pretty(value)
        } else {
            serde_json::to_string(value)
        };
        result.unwrap_or_else(|_| empty.to_string())
    }

    /// Report a single analysis as JSON
    pub fn report(&self, analysis: &SiteAnalysis) -> String {
        self.render(analysis, "{}")
    }

    /// Report multiple results as a JSON array
    pub fn report_many(&self, results: &[SiteAnalysis]) -> String {
        self.render(&results, "[]")
    }

    /// Report with an aggregate summary block
    pub fn report_with_summary(&self, results: &[SiteAnalysis], stats: &AggregateStats) -> String {
        let output = JsonOutput {
            results,
            summary: JsonSummary {
                urls_analyzed: stats.urls_analyzed,
                average_score: stats.average_score,
                average_grade: stats.average_grade.to_string(),
                total_critical: stats.total_critical,
                total_warnings: stats.total_warnings,
            },
        };
        self.render(&output, "{}")
    }

    /// Full report document: the analysis plus optional insight text
    pub fn full_report(&self, analysis: &SiteAnalysis, insights: Option<&str>) -> String {
        let report = FullReport {
            analysis,
            ai_insights: insights,
        };
        self.render(&report, "{}")
    }
}

impl Default for JsonReporter {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct JsonOutput<'a> {
    results: &'a [SiteAnalysis],
    summary: JsonSummary,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct JsonSummary {
    urls_analyzed: usize,
    average_score: f64,
    average_grade: String,
    total_critical: usize,
    total_warnings: usize,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct FullReport<'a> {
    analysis: &'a SiteAnalysis,
    #[serde(skip_serializing_if = "Option::is_none")]
    ai_insights: Option<&'a str>,
}
