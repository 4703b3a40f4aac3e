//! Seoscan: SEO audit CLI

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use rayon::prelude::*;
use seoscan::analyzer::{AggregateStats, AnalysisEngine};
use seoscan::collector::{self, Collector, Strategy};
use seoscan::config::{load_config, write_default_config, CONFIG_FILENAME};
use seoscan::insights::{ClaudeClient, FallbackInsights, InsightError, InsightSource};
use seoscan::reporter::{
    self, ConsoleReporter, HtmlReporter, JsonReporter, MarkdownReporter,
};
use seoscan::{CollectedData, SiteAnalysis};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

/// Seoscan: SEO audit toolkit
#[derive(Parser, Debug)]
#[command(name = "seoscan")]
#[command(author, version, about, long_about = None)]
#[command(args_conflicts_with_subcommands = true)]
struct Args {
    #[command(subcommand)]
    command: Option<Commands>,

    /// URLs to audit (falls back to targetUrls in .seoscanrc.json)
    urls: Vec<String>,

    /// Output results as JSON
    #[arg(long, short)]
    json: bool,

    /// Quiet mode (one line per URL)
    #[arg(long, short)]
    quiet: bool,

    /// Verbose output
    #[arg(long, short)]
    verbose: bool,

    /// Skip AI insights and use the deterministic fallback text
    #[arg(long)]
    skip_ai: bool,

    /// Minimum overall score (exit 1 if below)
    #[arg(long, short)]
    threshold: Option<f64>,

    /// Path to config file (default: search .seoscanrc.json in current dir and parents)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Report output directory (default: reports)
    #[arg(long, short)]
    output: Option<PathBuf>,

    /// Collected-data directory (default: data)
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Do not write data or report files
    #[arg(long)]
    no_save: bool,

    /// PageSpeed strategy: mobile or desktop
    #[arg(long)]
    strategy: Option<String>,

    /// Collect URLs in parallel (default for 4+ URLs)
    #[arg(long)]
    parallel: bool,

    /// Number of parallel threads (default: number of CPU cores)
    #[arg(long, value_name = "N")]
    jobs: Option<usize>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Score previously collected data without network access
    Analyze {
        /// Data file written by a prior run (one record or an array)
        file: PathBuf,

        /// Output results as JSON
        #[arg(long, short)]
        json: bool,

        /// Quiet mode (one line per URL)
        #[arg(long, short)]
        quiet: bool,

        /// Verbose output
        #[arg(long, short)]
        verbose: bool,

        /// Minimum overall score (exit 1 if below)
        #[arg(long, short)]
        threshold: Option<f64>,
    },

    /// Create .seoscanrc.json with sensible defaults
    Init {
        /// Minimum overall score (e.g. 70)
        #[arg(long)]
        threshold: Option<f64>,

        /// Directory in which to create config (default: current)
        #[arg(long)]
        dir: Option<PathBuf>,
    },
}

fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}: {:#}", "Error".red().bold(), e);
            ExitCode::from(2)
        }
    }
}

fn run() -> Result<ExitCode> {
    let args = Args::parse();

    if let Some(command) = args.command {
        return match command {
            Commands::Analyze {
                file,
                json,
                quiet,
                verbose,
                threshold,
            } => run_analyze(&file, json, quiet, verbose, threshold),
            Commands::Init { threshold, dir } => run_init(threshold, dir.as_deref()),
        };
    }

    let work_dir = std::env::current_dir().context("Failed to get current directory")?;
    let config = load_config(&work_dir, args.config.as_deref())?.merge_with_cli(
        args.threshold,
        args.skip_ai,
        args.output.as_deref(),
        args.data_dir.as_deref(),
    );

    let urls: Vec<String> = if args.urls.is_empty() {
        config.target_urls.clone()
    } else {
        args.urls.clone()
    };

    if urls.is_empty() {
        eprintln!(
            "{}: No URLs to audit; pass them on the command line or set targetUrls in {}",
            "Error".red(),
            CONFIG_FILENAME
        );
        return Ok(ExitCode::from(2));
    }

    if let Some(jobs) = args.jobs {
        rayon::ThreadPoolBuilder::new()
            .num_threads(jobs)
            .build_global()
            .ok();
    }

    let strategy = match args.strategy.as_deref().or(config.strategy.as_deref()) {
        Some(name) => name
            .parse::<Strategy>()
            .map_err(|e| anyhow::anyhow!("{e}"))?,
        None => Strategy::Mobile,
    };

    let collector = Collector::new()
        .context("Failed to build HTTP client")?
        .with_strategy(strategy);

    // Step 1: collect
    if !args.quiet {
        eprintln!(
            "{}: Collecting SEO data for {} URL(s)",
            "Info".blue(),
            urls.len()
        );
    }
    let use_parallel = args.parallel || urls.len() > 3;
    let records: Vec<CollectedData> = if use_parallel {
        urls.par_iter()
            .map(|url| collect_one(&collector, url, args.quiet))
            .collect()
    } else {
        urls.iter()
            .map(|url| collect_one(&collector, url, args.quiet))
            .collect()
    };

    let stamp = collector::file_stamp();

    if !args.no_save {
        save_data_files(&records, Path::new(config.data_dir()), &stamp, args.quiet);
    }

    // Step 2: analyze
    let engine = AnalysisEngine::new();
    let results = engine.analyze_many(&records);
    let stats = AnalysisEngine::aggregate_stats(&results);

    // Step 3: insights (best-effort; failures degrade to fallback text)
    let source = select_insight_source(config.skip_ai, args.quiet);
    let insight_texts: Vec<String> = results
        .iter()
        .map(|analysis| generate_insights(source.as_ref(), analysis, args.quiet))
        .collect();

    // Step 4: reports
    if !args.no_save {
        save_report_files(
            &records,
            &results,
            &insight_texts,
            Path::new(config.output_dir()),
            &stamp,
            args.quiet,
        );
    }

    // Console output
    print_results(&results, &stats, args.json, args.quiet, args.verbose);

    if !args.json && !args.quiet {
        for (analysis, text) in results.iter().zip(&insight_texts) {
            println!("{}", "═".repeat(60));
            println!("{}", format!("Insights: {}", analysis.url).bold());
            println!("{}", "═".repeat(60));
            println!("{text}");
        }

        if results.len() > 1 {
            match source.generate_comparison(&results) {
                Ok(comparison) => {
                    println!("{}", "═".repeat(60));
                    println!("{}", "Comparative Analysis".bold());
                    println!("{}", "═".repeat(60));
                    println!("{comparison}");
                }
                Err(e) => {
                    eprintln!("{}: Comparison insights failed: {}", "Warning".yellow(), e);
                }
            }
        }
    }

    Ok(check_threshold(
        &results,
        &stats,
        config.threshold,
        args.quiet || args.json,
    ))
}

fn collect_one(collector: &Collector, url: &str, quiet: bool) -> CollectedData {
    if !quiet {
        eprintln!("{}: Collecting {}", "Info".blue(), url);
    }
    let record = collector.collect(url);
    if !quiet {
        for (section, error) in [
            ("PageSpeed", record.page_speed.error()),
            ("on-page", record.on_page.error()),
            ("technical", record.technical.error()),
        ] {
            if let Some(error) = error {
                eprintln!(
                    "{}: {} collection failed for {}: {}",
                    "Warning".yellow(),
                    section,
                    url,
                    error
                );
            }
        }
    }
    record
}

fn save_data_files(records: &[CollectedData], data_dir: &Path, stamp: &str, quiet: bool) {
    for record in records {
        let filename = collector::data_filename(&record.domain, stamp);
        let path = data_dir.join(&filename);
        if let Err(e) = std::fs::create_dir_all(data_dir)
            .map_err(anyhow::Error::from)
            .and_then(|_| collector::save_data(record, &path))
        {
            eprintln!("{}: Failed to save data file: {:#}", "Warning".yellow(), e);
        } else if !quiet {
            eprintln!("{}: Data saved to {}", "Info".blue(), path.display());
        }
    }
}

fn save_report_files(
    records: &[CollectedData],
    results: &[SiteAnalysis],
    insight_texts: &[String],
    report_dir: &Path,
    stamp: &str,
    quiet: bool,
) {
    let mut written = 0usize;
    for (index, analysis) in results.iter().enumerate() {
        let basename = reporter::report_basename(&records[index].domain, stamp);
        let insights = insight_texts.get(index).map(String::as_str);

        let renders = [
            (MarkdownReporter::new().full_report(analysis, insights), "md"),
            (HtmlReporter::new().full_report(analysis, insights), "html"),
            (
                JsonReporter::new().pretty().full_report(analysis, insights),
                "json",
            ),
        ];
        for (content, extension) in renders {
            match reporter::save_report(&content, report_dir, &basename, extension) {
                Ok(_) => written += 1,
                Err(e) => {
                    eprintln!("{}: Failed to write report: {:#}", "Warning".yellow(), e)
                }
            }
        }
    }
    if !quiet && written > 0 {
        eprintln!(
            "{}: {} report files written to {}",
            "Info".blue(),
            written,
            report_dir.display()
        );
    }
}

fn select_insight_source(skip_ai: bool, quiet: bool) -> Box<dyn InsightSource> {
    if skip_ai {
        return Box::new(FallbackInsights);
    }
    match ClaudeClient::from_env() {
        Ok(client) => Box::new(client),
        Err(InsightError::NoApiKey) => {
            if !quiet {
                eprintln!(
                    "{}: {} not set; using fallback insights",
                    "Info".blue(),
                    seoscan::insights::claude::API_KEY_VAR
                );
            }
            Box::new(FallbackInsights)
        }
        Err(e) => {
            if !quiet {
                eprintln!("{}: {}", "Warning".yellow(), e);
            }
            Box::new(FallbackInsights)
        }
    }
}

fn generate_insights(source: &dyn InsightSource, analysis: &SiteAnalysis, quiet: bool) -> String {
    match source.generate(analysis) {
        Ok(text) => text,
        Err(e) => {
            if !quiet {
                eprintln!(
                    "{}: AI insights failed for {}: {}; using fallback",
                    "Warning".yellow(),
                    analysis.url,
                    e
                );
            }
            FallbackInsights
                .generate(analysis)
                .unwrap_or_else(|_| String::new())
        }
    }
}

fn print_results(
    results: &[SiteAnalysis],
    stats: &AggregateStats,
    json: bool,
    quiet: bool,
    verbose: bool,
) {
    if json {
        let reporter = JsonReporter::new().pretty();
        if results.len() == 1 {
            println!("{}", reporter.report(&results[0]));
        } else {
            println!("{}", reporter.report_with_summary(results, stats));
        }
    } else if quiet {
        let reporter = ConsoleReporter::new();
        for result in results {
            reporter.report_quiet(result);
        }
    } else {
        let reporter = if verbose {
            ConsoleReporter::new().verbose()
        } else {
            ConsoleReporter::new()
        };
        if results.len() == 1 {
            reporter.report(&results[0]);
        } else {
            reporter.report_many(results, stats);
        }
    }
}

fn check_threshold(
    results: &[SiteAnalysis],
    stats: &AggregateStats,
    threshold: Option<f64>,
    silent: bool,
) -> ExitCode {
    let Some(threshold) = threshold else {
        return ExitCode::SUCCESS;
    };

    let score = if results.len() == 1 {
        results[0].scores.overall
    } else {
        stats.average_score
    };

    if score < threshold {
        if !silent {
            eprintln!(
                "\n{}: Score {:.1} is below threshold {:.1}",
                "Failed".red().bold(),
                score,
                threshold
            );
        }
        return ExitCode::from(1);
    }
    ExitCode::SUCCESS
}

fn run_analyze(
    file: &Path,
    json: bool,
    quiet: bool,
    verbose: bool,
    threshold: Option<f64>,
) -> Result<ExitCode> {
    let records = collector::load_data(file)?;
    if records.is_empty() {
        eprintln!("{}: No records in {}", "Warning".yellow(), file.display());
        return Ok(ExitCode::from(2));
    }

    let engine = AnalysisEngine::new();
    let results = engine.analyze_many(&records);
    let stats = AnalysisEngine::aggregate_stats(&results);

    print_results(&results, &stats, json, quiet, verbose);

    Ok(check_threshold(
        &results,
        &stats,
        threshold,
        quiet || json,
    ))
}

fn run_init(threshold: Option<f64>, dir: Option<&Path>) -> Result<ExitCode> {
    let cwd = std::env::current_dir().context("Failed to get current directory")?;
    let dir = dir.unwrap_or(&cwd);
    let config_path = dir.join(CONFIG_FILENAME);

    if config_path.exists() {
        eprintln!(
            "{}: {} already exists; use --dir to write elsewhere or remove it first",
            "Warning".yellow(),
            config_path.display()
        );
        return Ok(ExitCode::SUCCESS);
    }

    let path = write_default_config(dir, threshold)?;
    println!(
        "{}: Created {} with threshold={}",
        "Done".green().bold(),
        path.display(),
        threshold.unwrap_or(70.0)
    );
    Ok(ExitCode::SUCCESS)
}
