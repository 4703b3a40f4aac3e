//! AI insight generation
//!
//! The scoring engine never depends on this output; insight text is
//! composed into reports downstream.

pub mod claude;
pub mod prompt;

pub use claude::{ClaudeClient, InsightError, InsightResponse};
pub use prompt::InsightPromptBuilder;

use crate::SiteAnalysis;

/// Source of recommendation text for finished analyses.
///
/// Two implementations: the Claude API client and a deterministic
/// fallback. Which one runs is a configuration concern; callers only see
/// this trait.
pub trait InsightSource {
    /// Identifier shown in logs ("claude", "fallback")
    fn name(&self) -> &'static str;

    /// Insight text for a single analysis
    fn generate(&self, analysis: &SiteAnalysis) -> Result<String, InsightError>;

    /// Comparative text across several analyses
    fn generate_comparison(&self, analyses: &[SiteAnalysis]) -> Result<String, InsightError>;
}

/// Deterministic insight text assembled from the analysis itself.
/// Used when AI is skipped or unavailable, and as the safety net when
/// the API call fails mid-run.
pub struct FallbackInsights;

impl InsightSource for FallbackInsights {
    fn name(&self) -> &'static str {
        "fallback"
    }

    fn generate(&self, analysis: &SiteAnalysis) -> Result<String, InsightError> {
        let score = analysis.scores.overall;
        let assessment = if score >= 80.0 {
            "This is a strong foundation, but there's always room for improvement."
        } else if score >= 60.0 {
            "There are several areas that need attention to improve rankings."
        } else {
            "Significant improvements are needed to compete effectively."
        };

        let mut text = format!(
            "SEO Insights for {}\n\nOverall Assessment:\nYour site scored {:.1}/100. {}\n",
            analysis.url, score, assessment
        );

        text.push_str("\nPriority Actions:\n");

        let critical: Vec<_> = analysis.critical_issues().collect();
        if !critical.is_empty() {
            text.push_str("1. Address Critical Issues:\n");
            for issue in critical.iter().take(3) {
                text.push_str(&format!("   - {}\n", issue.message));
                if let Some(ref recommendation) = issue.recommendation {
                    text.push_str(&format!("     -> {recommendation}\n"));
                }
            }
        }

        if !analysis.opportunities.is_empty() {
            text.push_str("\n2. Quick Wins:\n");
            for opportunity in analysis.opportunities.iter().take(3) {
                text.push_str(&format!("   - {opportunity}\n"));
            }
        }

        Ok(text)
    }

    fn generate_comparison(&self, analyses: &[SiteAnalysis]) -> Result<String, InsightError> {
        if analyses.len() < 2 {
            return Ok("Need at least 2 URLs for comparison".to_string());
        }

        let mut ranked: Vec<&SiteAnalysis> = analyses.iter().collect();
        ranked.sort_by(|a, b| b.scores.overall.total_cmp(&a.scores.overall));

        let mut text = format!("Comparative SEO Overview ({} sites)\n\n", analyses.len());
        for (index, analysis) in ranked.iter().enumerate() {
            text.push_str(&format!(
                "{}. {} - {:.1}/100 (Grade {}), {} critical, {} warnings\n",
                index + 1,
                analysis.url,
                analysis.scores.overall,
                analysis.grade,
                analysis.critical_count(),
                analysis.warning_count(),
            ));
        }
        text.push_str(&format!(
            "\nBest performer: {}\nNeeds the most attention: {}\n",
            ranked[0].url,
            ranked[ranked.len() - 1].url
        ));

        Ok(text)
    }
}
