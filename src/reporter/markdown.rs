//! Markdown report rendering

use crate::analyzer::scoring::ScoreCalculator;
use crate::{Issue, SiteAnalysis};

/// Renders a full Markdown report document
pub struct MarkdownReporter;

impl MarkdownReporter {
    pub fn new() -> Self {
        Self
    }

    /// Full report: analysis plus optional insight text
    pub fn full_report(&self, analysis: &SiteAnalysis, insights: Option<&str>) -> String {
        let mut out = String::with_capacity(4096);

        out.push_str(&format!("# SEO Analysis Report: {}\n\n", analysis.url));
        out.push_str(&format!("Generated: {}\n\n", analysis.timestamp));

        out.push_str(&format!(
            "## Overall Score: {:.1}/100 (Grade {})\n\n",
            analysis.scores.overall, analysis.grade
        ));
        out.push_str(&format!(
            "_{}_\n\n",
            ScoreCalculator::grade_description(analysis.grade)
        ));

        out.push_str("| Category | Score |\n");
        out.push_str("|----------|-------|\n");
        out.push_str(&format!(
            "| Performance | {:.1}/100 |\n",
            analysis.scores.performance
        ));
        out.push_str(&format!(
            "| Technical SEO | {:.1}/100 |\n",
            analysis.scores.technical_seo
        ));
        out.push_str(&format!(
            "| On-Page SEO | {:.1}/100 |\n\n",
            analysis.scores.on_page_seo
        ));

        let critical: Vec<&Issue> = analysis.critical_issues().collect();
        out.push_str(&format!("## Critical Issues ({})\n\n", critical.len()));
        push_issues(&mut out, &critical);

        let warnings: Vec<&Issue> = analysis.warnings().collect();
        out.push_str(&format!("## Warnings ({})\n\n", warnings.len()));
        push_issues(&mut out, &warnings);

        out.push_str("## Strengths\n\n");
        push_list(&mut out, &analysis.strengths);

        out.push_str("## Opportunities\n\n");
        push_list(&mut out, &analysis.opportunities);

        if let Some(insights) = insights {
            out.push_str("## AI Insights\n\n");
            out.push_str(insights.trim_end());
            out.push('\n');
        }

        out
    }
}

impl Default for MarkdownReporter {
    fn default() -> Self {
        Self::new()
    }
}

fn push_issues(out: &mut String, issues: &[&Issue]) {
    if issues.is_empty() {
        out.push_str("None.\n\n");
        return;
    }
    for issue in issues {
        out.push_str(&format!("- **[{}]** {}\n", issue.category, issue.message));
        if let Some(ref recommendation) = issue.recommendation {
            out.push_str(&format!("  - Recommendation: {recommendation}\n"));
        }
    }
    out.push('\n');
}

fn push_list(out: &mut String, items: &[String]) {
    if items.is_empty() {
        out.push_str("None identified.\n\n");
        return;
    }
    for item in items {
        out.push_str(&format!("- {item}\n"));
    }
    out.push('\n');
}
