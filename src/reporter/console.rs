//! Console reporter with colored output

use colored::Colorize;

use crate::analyzer::engine::AggregateStats;
use crate::analyzer::scoring::ScoreCalculator;
use crate::{Grade, Issue, Severity, SiteAnalysis};

/// Reporter for terminal output
pub struct ConsoleReporter {
    /// Whether to show verbose output
    verbose: bool,
}

impl ConsoleReporter {
    /// Create a new console reporter
    pub fn new() -> Self {
        Self { verbose: false }
    }

    /// Enable verbose output
    pub fn verbose(mut self) -> Self {
        self.verbose = true;
        self
    }

    /// Report a single analysis
    pub fn report(&self, analysis: &SiteAnalysis) {
        self.print_header(analysis);
        self.print_score(analysis);
        self.print_breakdown(analysis);

        if !analysis.issues.is_empty() {
            self.print_issues(analysis);
        }
        self.print_strengths(analysis);
        self.print_opportunities(analysis);
        println!();
    }

    /// Report multiple results with summary
    pub fn report_many(&self, results: &[SiteAnalysis], stats: &AggregateStats) {
        for result in results {
            self.report(result);
            println!("{}", "─".repeat(60));
        }

        self.print_summary(stats);
    }

    /// Report in quiet mode (one line per URL)
    pub fn report_quiet(&self, analysis: &SiteAnalysis) {
        let grade = self.colorize_grade(&analysis.grade);
        println!("{}: {:.1} ({})", analysis.url, analysis.scores.overall, grade);
    }

    fn print_header(&self, analysis: &SiteAnalysis) {
        println!();
        println!("{}", format!("SEO Analysis: {}", analysis.url).bold());
        println!("   Analyzed: {}", analysis.timestamp.dimmed());
        println!();
    }

    fn print_score(&self, analysis: &SiteAnalysis) {
        let grade = self.colorize_grade(&analysis.grade);
        let bar = self.create_score_bar(analysis.scores.overall);

        println!("   Score: {} {}", bar, grade.bold());
        println!(
            "   {}",
            ScoreCalculator::grade_description(analysis.grade).dimmed()
        );
        println!();
    }

    fn print_breakdown(&self, analysis: &SiteAnalysis) {
        println!("   {}", "Category Scores:".bold());

        let categories = [
            ("Performance", analysis.scores.performance),
            ("Technical SEO", analysis.scores.technical_seo),
            ("On-Page SEO", analysis.scores.on_page_seo),
        ];
        for (name, score) in categories {
            let bar = self.create_mini_bar(score);
            let score_str = format!("{score:>5.1}/100");
            let colored_score = if score >= 80.0 {
                score_str.green()
            } else if score >= 60.0 {
                score_str.yellow()
            } else {
                score_str.red()
            };
            println!("   {bar} {colored_score} {name}");
        }
        println!();
    }

    fn print_issues(&self, analysis: &SiteAnalysis) {
        println!("   {}", "Issues Found:".bold());

        for issue in analysis.critical_issues() {
            self.print_issue(issue);
        }
        for issue in analysis.warnings() {
            self.print_issue(issue);
        }
        println!();
    }

    fn print_issue(&self, issue: &Issue) {
        let icon = match issue.severity {
            Severity::Critical => "✗".red(),
            Severity::Warning => "⚠".yellow(),
        };

        println!(
            "   {} [{}] {}",
            icon,
            issue.category.to_string().dimmed(),
            issue.message
        );

        if let Some(ref recommendation) = issue.recommendation {
            println!("       {} {}", "→".dimmed(), recommendation.italic());
        }
        if self.verbose {
            if let Some(ref details) = issue.details {
                println!("       {} {}", "↳".dimmed(), details.dimmed());
            }
        }
    }

    fn print_strengths(&self, analysis: &SiteAnalysis) {
        if analysis.strengths.is_empty() {
            return;
        }
        println!("   {}", "Strengths:".bold());
        for strength in &analysis.strengths {
            println!("   {} {}", "✓".green(), strength);
        }
        println!();
    }

    fn print_opportunities(&self, analysis: &SiteAnalysis) {
        if analysis.opportunities.is_empty() {
            return;
        }
        println!("   {}", "Opportunities:".bold());
        for opportunity in &analysis.opportunities {
            println!("   {} {}", "→".cyan(), opportunity);
        }
    }

    fn print_summary(&self, stats: &AggregateStats) {
        println!();
        println!("{}", "═".repeat(60));
        println!("{}", "Summary".bold());
        println!("{}", "═".repeat(60));
        println!(
            "   URLs analyzed:   {}",
            stats.urls_analyzed.to_string().bold()
        );
        println!(
            "   Average score:   {} ({})",
            format!("{:.1}", stats.average_score).bold(),
            self.colorize_grade(&stats.average_grade)
        );
        println!("   Critical issues: {}", stats.total_critical);
        println!("   Warnings:        {}", stats.total_warnings);
        println!();
    }

    fn colorize_grade(&self, grade: &Grade) -> colored::ColoredString {
        let s = grade.to_string();
        match grade {
            Grade::A => s.green().bold(),
            Grade::B => s.green(),
            Grade::C => s.yellow(),
            Grade::D => s.red(),
            Grade::F => s.red().bold(),
        }
    }

    fn create_score_bar(&self, score: f64) -> String {
        let filled = ((score.clamp(0.0, 100.0) as usize) * 20) / 100;
        let empty = 20 - filled;

        let bar = format!(
            "[{}{}] {:>5.1}",
            "█".repeat(filled),
            "░".repeat(empty),
            score
        );

        if score >= 80.0 {
            bar.green().to_string()
        } else if score >= 60.0 {
            bar.yellow().to_string()
        } else {
            bar.red().to_string()
        }
    }

    fn create_mini_bar(&self, score: f64) -> String {
        let filled = ((score.clamp(0.0, 100.0) as usize) * 10) / 100;
        let empty = 10 - filled;
        format!("[{}{}]", "▓".repeat(filled), "░".repeat(empty))
    }
}

impl Default for ConsoleReporter {
    fn default() -> Self {
        Self::new()
    }
}
