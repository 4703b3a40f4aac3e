//! Prompt construction for AI-phrased SEO recommendations

use crate::{Issue, SiteAnalysis};

/// Cap on issues/list items included per prompt section
const PROMPT_ITEM_LIMIT: usize = 10;

/// Builds consultant-style prompts from finished analyses
pub struct InsightPromptBuilder;

impl InsightPromptBuilder {
    pub fn new() -> Self {
        Self
    }

    /// Prompt for a single analysis
    pub fn build(&self, analysis: &SiteAnalysis) -> String {
        let critical: Vec<&Issue> = analysis.critical_issues().collect();
        let warnings: Vec<&Issue> = analysis.warnings().collect();

        format!(
            r#"You are an expert SEO consultant analyzing a website. Provide actionable insights and recommendations.

Website: {url}
Overall SEO Score: {overall:.1}/100

PERFORMANCE METRICS:
- Performance Score: {performance:.1}/100
- Technical SEO Score: {technical:.1}/100
- On-Page SEO Score: {on_page:.1}/100

CRITICAL ISSUES ({critical_count}):
{critical_issues}

WARNINGS ({warning_count}):
{warning_issues}

STRENGTHS:
{strengths}

OPPORTUNITIES:
{opportunities}

Based on this comprehensive SEO analysis, provide:

1. **Executive Summary** (2-3 sentences)
   - Overall assessment of the website's SEO health
   - Most critical area needing attention

2. **Top 3 Priority Actions** (must be specific and actionable)
   - Focus on quick wins and high-impact improvements
   - Include specific metrics or targets where applicable
   - Order by priority (most important first)

3. **Strategic Recommendations** (3-4 items)
   - Long-term SEO improvements
   - Content strategy suggestions
   - Technical optimizations

4. **Competitive Advantage Opportunities**
   - Areas where the site can differentiate
   - Emerging SEO trends to capitalize on

5. **30-Day Action Plan**
   - Week-by-week breakdown of what to implement
   - Clear milestones and expected outcomes

Format your response clearly with these exact section headers. Be specific, actionable, and data-driven.
"#,
            url = analysis.url,
            overall = analysis.scores.overall,
            performance = analysis.scores.performance,
            technical = analysis.scores.technical_seo,
            on_page = analysis.scores.on_page_seo,
            critical_count = critical.len(),
            critical_issues = format_issues(&critical),
            warning_count = warnings.len(),
            warning_issues = format_issues(&warnings),
            strengths = format_list(&analysis.strengths),
            opportunities = format_list(&analysis.opportunities),
        )
    }

    /// Prompt comparing several analyses
    pub fn build_comparison(&self, analyses: &[SiteAnalysis]) -> String {
        let mut prompt = format!(
            "You are an expert SEO consultant comparing multiple websites.\n\n\
             Compare these {} websites and provide insights:\n",
            analyses.len()
        );

        for (index, analysis) in analyses.iter().enumerate() {
            prompt.push_str(&format!(
                "\nWebsite {number}: {url}\n\
                 - Overall Score: {overall:.1}/100\n\
                 - Performance: {performance:.1}/100\n\
                 - Critical Issues: {critical}\n",
                number = index + 1,
                url = analysis.url,
                overall = analysis.scores.overall,
                performance = analysis.scores.performance,
                critical = analysis.critical_count(),
            ));
        }

        prompt.push_str(
            "\n\nProvide:\n\
             1. Comparative Analysis - Which site is performing best and why?\n\
             2. Common Issues - What problems affect multiple sites?\n\
             3. Best Practices - Which site demonstrates the best practices to adopt?\n\
             4. Recommendations - Specific advice for each site\n\
             \n\
             Be concise and actionable.\n",
        );

        prompt
    }
}

impl Default for InsightPromptBuilder {
    fn default() -> Self {
        Self::new()
    }
}

fn format_issues(issues: &[&Issue]) -> String {
    if issues.is_empty() {
        return "None".to_string();
    }

    let mut lines = Vec::new();
    for (index, issue) in issues.iter().take(PROMPT_ITEM_LIMIT).enumerate() {
        lines.push(format!(
            "{}. [{}] {}",
            index + 1,
            issue.category,
            issue.message
        ));
        if let Some(ref recommendation) = issue.recommendation {
            lines.push(format!("   Recommendation: {recommendation}"));
        }
    }
    lines.join("\n")
}

fn format_list(items: &[String]) -> String {
    if items.is_empty() {
        return "None identified".to_string();
    }
    items
        .iter()
        .take(PROMPT_ITEM_LIMIT)
        .map(|item| format!("- {item}"))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{CategoryScores, Grade, IssueCategory};

    fn analysis(url: &str, overall: f64) -> SiteAnalysis {
        SiteAnalysis {
            url: url.to_string(),
            timestamp: "2024-01-01T00:00:00Z".to_string(),
            scores: CategoryScores {
                performance: overall,
                technical_seo: overall,
                on_page_seo: overall,
                overall,
            },
            grade: Grade::from_score(overall),
            issues: vec![
                Issue::critical(IssueCategory::Security, "Site not using HTTPS")
                    .recommend("Implement SSL certificate for security and SEO"),
                Issue::warning(IssueCategory::Content, "Thin content: only 120 words"),
            ],
            strengths: vec!["Proper H1 structure".to_string()],
            opportunities: vec!["Add XML sitemap for better indexing".to_string()],
            summary: String::new(),
        }
    }

    #[test]
    fn prompt_contains_scores_and_findings() {
        let prompt = InsightPromptBuilder::new().build(&analysis("https://example.com", 79.0));

        assert!(prompt.contains("Website: https://example.com"));
        assert!(prompt.contains("Overall SEO Score: 79.0/100"));
        assert!(prompt.contains("CRITICAL ISSUES (1):"));
        assert!(prompt.contains("1. [Security] Site not using HTTPS"));
        assert!(prompt.contains("Recommendation: Implement SSL certificate"));
        assert!(prompt.contains("WARNINGS (1):"));
        assert!(prompt.contains("- Proper H1 structure"));
        assert!(prompt.contains("- Add XML sitemap for better indexing"));
        assert!(prompt.contains("30-Day Action Plan"));
    }

    #[test]
    fn prompt_empty_sections_say_none() {
        let mut clean = analysis("https://example.com", 95.0);
        clean.issues.clear();
        clean.strengths.clear();
        clean.opportunities.clear();

        let prompt = InsightPromptBuilder::new().build(&clean);
        assert!(prompt.contains("CRITICAL ISSUES (0):\nNone"));
        assert!(prompt.contains("STRENGTHS:\nNone identified"));
    }

    #[test]
    fn comparison_prompt_numbers_sites() {
        let prompt = InsightPromptBuilder::new().build_comparison(&[
            analysis("https://a.example", 85.0),
            analysis("https://b.example", 60.0),
        ]);

        assert!(prompt.contains("Compare these 2 websites"));
        assert!(prompt.contains("Website 1: https://a.example"));
        assert!(prompt.contains("Website 2: https://b.example"));
        assert!(prompt.contains("- Overall Score: 60.0/100"));
        assert!(prompt.contains("Comparative Analysis"));
    }
}
