//! HTML reporter: generates a self-contained report page with inline CSS

use crate::analyzer::scoring::ScoreCalculator;
use crate::{Issue, Severity, SiteAnalysis};

/// Escape text for embedding in HTML
fn escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

fn score_class(score: f64) -> &'static str {
    if score >= 80.0 {
        "good"
    } else if score >= 60.0 {
        "fair"
    } else {
        "poor"
    }
}

/// Reporter that generates a self-contained HTML document
pub struct HtmlReporter;

impl HtmlReporter {
    pub fn new() -> Self {
        Self
    }

    /// Full report: analysis plus optional insight text
    pub fn full_report(&self, analysis: &SiteAnalysis, insights: Option<&str>) -> String {
        let mut html = String::with_capacity(8192);

        html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n");
        html.push_str(&format!(
            "<title>SEO Report: {}</title>\n",
            escape(&analysis.url)
        ));
        html.push_str(STYLE);
        html.push_str("</head>\n<body>\n");

        html.push_str(&format!(
            "<h1>SEO Analysis Report: {}</h1>\n<p class=\"meta\">Generated: {}</p>\n",
            escape(&analysis.url),
            escape(&analysis.timestamp)
        ));

        html.push_str(&format!(
            "<div class=\"score-card {}\"><span class=\"score\">{:.1}</span>/100 <span class=\"grade\">Grade {}</span><p>{}</p></div>\n",
            score_class(analysis.scores.overall),
            analysis.scores.overall,
            analysis.grade,
            ScoreCalculator::grade_description(analysis.grade)
        ));

        html.push_str("<h2>Category Scores</h2>\n<div class=\"categories\">\n");
        for (name, score) in [
            ("Performance", analysis.scores.performance),
            ("Technical SEO", analysis.scores.technical_seo),
            ("On-Page SEO", analysis.scores.on_page_seo),
        ] {
            html.push_str(&format!(
                "<div class=\"category {}\"><span class=\"name\">{}</span><span class=\"value\">{:.1}</span></div>\n",
                score_class(score),
                name,
                score
            ));
        }
        html.push_str("</div>\n");

        let critical: Vec<&Issue> = analysis.critical_issues().collect();
        let warnings: Vec<&Issue> = analysis.warnings().collect();
        html.push_str(&format!(
            "<h2>Issues ({} critical, {} warnings)</h2>\n",
            critical.len(),
            warnings.len()
        ));
        if analysis.issues.is_empty() {
            html.push_str("<p>No issues found.</p>\n");
        } else {
            html.push_str("<ul class=\"issues\">\n");
            for issue in critical.iter().chain(warnings.iter()) {
                let class = match issue.severity {
                    Severity::Critical => "critical",
                    Severity::Warning => "warning",
                };
                html.push_str(&format!(
                    "<li class=\"{}\"><span class=\"category\">[{}]</span> {}",
                    class,
                    escape(&issue.category.to_string()),
                    escape(&issue.message)
                ));
                if let Some(ref recommendation) = issue.recommendation {
                    html.push_str(&format!(
                        "<br><span class=\"rec\">{}</span>",
                        escape(recommendation)
                    ));
                }
                html.push_str("</li>\n");
            }
            html.push_str("</ul>\n");
        }

        push_string_section(&mut html, "Strengths", &analysis.strengths);
        push_string_section(&mut html, "Opportunities", &analysis.opportunities);

        if let Some(insights) = insights {
            html.push_str("<h2>AI Insights</h2>\n<pre class=\"insights\">");
            html.push_str(&escape(insights));
            html.push_str("</pre>\n");
        }

        html.push_str("</body>\n</html>\n");
        html
    }
}

impl Default for HtmlReporter {
    fn default() -> Self {
        Self::new()
    }
}

fn push_string_section(html: &mut String, heading: &str, items: &[String]) {
    html.push_str(&format!("<h2>{heading}</h2>\n"));
    if items.is_empty() {
        html.push_str("<p>None identified.</p>\n");
        return;
    }
    html.push_str("<ul>\n");
    for item in items {
        html.push_str(&format!("<li>{}</li>\n", escape(item)));
    }
    html.push_str("</ul>\n");
}

const STYLE: &str = r#"<style>
body { font-family: -apple-system, "Segoe UI", Roboto, sans-serif; max-width: 860px; margin: 2rem auto; padding: 0 1rem; color: #1f2328; }
h1 { font-size: 1.4rem; }
.meta { color: #656d76; }
.score-card { border-radius: 8px; padding: 1rem 1.5rem; margin: 1rem 0; }
.score-card .score { font-size: 2.2rem; font-weight: 700; }
.score-card .grade { margin-left: 0.75rem; font-weight: 600; }
.categories { display: flex; gap: 1rem; }
.category { flex: 1; border-radius: 8px; padding: 0.75rem 1rem; }
.category .name { display: block; font-size: 0.85rem; }
.category .value { font-size: 1.4rem; font-weight: 700; }
.good { background: #dafbe1; }
.fair { background: #fff8c5; }
.poor { background: #ffebe9; }
.issues { list-style: none; padding: 0; }
.issues li { border-left: 4px solid; padding: 0.5rem 0.75rem; margin: 0.5rem 0; background: #f6f8fa; }
.issues li.critical { border-color: #cf222e; }
.issues li.warning { border-color: #d4a72c; }
.issues .category { color: #656d76; font-size: 0.85rem; }
.issues .rec { color: #57606a; font-style: italic; }
.insights { white-space: pre-wrap; background: #f6f8fa; padding: 1rem; border-radius: 8px; }
</style>
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{CategoryScores, Grade, IssueCategory};

    fn make_analysis() -> SiteAnalysis {
        SiteAnalysis {
            url: "https://example.com/a?b=1&c=2".to_string(),
            timestamp: "2024-01-01T00:00:00Z".to_string(),
            scores: CategoryScores {
                performance: 85.0,
                technical_seo: 90.0,
                on_page_seo: 55.0,
                overall: 74.5,
            },
            grade: Grade::C,
            issues: vec![Issue::critical(
                IssueCategory::OnPageSeo,
                "Missing <title> tag",
            )],
            strengths: vec!["Secure HTTPS connection".to_string()],
            opportunities: vec![],
            summary: String::new(),
        }
    }

    #[test]
    fn renders_valid_document_shell() {
        let html = HtmlReporter::new().full_report(&make_analysis(), None);
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.ends_with("</html>\n"));
        assert!(html.contains("<style>"));
        assert!(html.contains("74.5"));
        assert!(html.contains("Grade C"));
    }

    #[test]
    fn escapes_untrusted_text() {
        let html = HtmlReporter::new().full_report(&make_analysis(), None);
        assert!(html.contains("https://example.com/a?b=1&amp;c=2"));
        assert!(html.contains("Missing &lt;title&gt; tag"));
        assert!(!html.contains("Missing <title> tag"));
    }

    #[test]
    fn insights_rendered_in_pre_block() {
        let html = HtmlReporter::new()
            .full_report(&make_analysis(), Some("1. Fix the <title> tag first."));
        assert!(html.contains("<h2>AI Insights</h2>"));
        assert!(html.contains("1. Fix the &lt;title&gt; tag first."));
    }

    #[test]
    fn empty_opportunities_say_none() {
        let html = HtmlReporter::new().full_report(&make_analysis(), None);
        assert!(html.contains("<h2>Opportunities</h2>\n<p>None identified.</p>"));
    }
}
