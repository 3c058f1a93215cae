//! Headache Insights CLI
//!
//! Commands:
//! - report: Build a pattern report from an episode history
//! - export: Build the export document (report + trigger shares + overuse)
//! - red-flags: List episodes that should currently show a safety banner
//! - overuse: Check acute-medication days in the current month
//! - validate: Check episode records for invariant violations
//! - config: Print the default configuration

use clap::{Parser, Subcommand, ValueEnum};
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use headache_insights::ingest::{EpisodeAdapter, ValidationIssue};
use headache_insights::types::{Episode, Report};
use headache_insights::{
    AnalysisConfig, AnalysisError, InsightsEngine, ReferenceTime, ENGINE_VERSION,
};

/// Headache Insights - on-device pattern analysis for headache diaries
#[derive(Parser)]
#[command(name = "headache-insights")]
#[command(version = ENGINE_VERSION)]
#[command(about = "Analyse headache episode histories", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Arguments shared by every command that reads episodes
#[derive(clap::Args)]
struct InputArgs {
    /// Input file path (use - for stdin)
    #[arg(short, long)]
    input: PathBuf,

    /// Input format
    #[arg(long, default_value = "json")]
    input_format: InputFormat,
}

/// Arguments shared by every command that needs a reference time
#[derive(clap::Args)]
struct AnalysisArgs {
    /// Reference time, RFC 3339 with local offset (defaults to the current UTC time)
    #[arg(long)]
    now: Option<String>,

    /// Configuration file (JSON); defaults are used when omitted
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Build a pattern report
    Report {
        #[command(flatten)]
        input: InputArgs,

        #[command(flatten)]
        analysis: AnalysisArgs,

        /// Output format
        #[arg(long, default_value = "json-pretty")]
        format: OutputFormat,
    },

    /// Build the export document
    Export {
        #[command(flatten)]
        input: InputArgs,

        #[command(flatten)]
        analysis: AnalysisArgs,

        /// Output file path (use - for stdout)
        #[arg(short, long, default_value = "-")]
        output: PathBuf,
    },

    /// List active red flags
    RedFlags {
        #[command(flatten)]
        input: InputArgs,
    },

    /// Check medication overuse for the current month
    Overuse {
        #[command(flatten)]
        input: InputArgs,

        #[command(flatten)]
        analysis: AnalysisArgs,
    },

    /// Validate episode records
    Validate {
        #[command(flatten)]
        input: InputArgs,

        /// Output validation report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the default configuration as JSON
    Config,
}

#[derive(Clone, ValueEnum)]
enum InputFormat {
    /// JSON array of episodes
    Json,
    /// Newline-delimited JSON (one episode per line)
    Ndjson,
}

#[derive(Clone, ValueEnum)]
enum OutputFormat {
    /// Compact JSON
    Json,
    /// Pretty-printed JSON
    JsonPretty,
    /// Human-readable summary
    Text,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!(
                "{}",
                serde_json::to_string(&CliError::from(e))
                    .unwrap_or_else(|_| "Unknown error".to_string())
            );
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), InsightsCliError> {
    match cli.command {
        Commands::Report {
            input,
            analysis,
            format,
        } => cmd_report(&input, &analysis, format),
        Commands::Export {
            input,
            analysis,
            output,
        } => cmd_export(&input, &analysis, &output),
        Commands::RedFlags { input } => cmd_red_flags(&input),
        Commands::Overuse { input, analysis } => cmd_overuse(&input, &analysis),
        Commands::Validate { input, json } => cmd_validate(&input, json),
        Commands::Config => {
            println!("{}", AnalysisConfig::default().to_json()?);
            Ok(())
        }
    }
}

fn cmd_report(
    input: &InputArgs,
    analysis: &AnalysisArgs,
    format: OutputFormat,
) -> Result<(), InsightsCliError> {
    let episodes = read_episodes(input)?;
    let (engine, reference) = load_analysis(analysis)?;
    let report = engine.build_report(&episodes, &reference);

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string(&report)?),
        OutputFormat::JsonPretty => println!("{}", serde_json::to_string_pretty(&report)?),
        OutputFormat::Text => print_report(&report, engine.config().report.min_episodes),
    }
    Ok(())
}

fn cmd_export(
    input: &InputArgs,
    analysis: &AnalysisArgs,
    output: &Path,
) -> Result<(), InsightsCliError> {
    let episodes = read_episodes(input)?;
    let (engine, reference) = load_analysis(analysis)?;
    let document = engine.export_json(&episodes, &reference)?;

    if output.to_string_lossy() == "-" {
        println!("{document}");
    } else {
        fs::write(output, document)?;
    }
    Ok(())
}

fn cmd_red_flags(input: &InputArgs) -> Result<(), InsightsCliError> {
    let episodes = read_episodes(input)?;
    let active = InsightsEngine::default().active_red_flags(&episodes);
    println!("{}", serde_json::to_string_pretty(&active)?);
    Ok(())
}

fn cmd_overuse(input: &InputArgs, analysis: &AnalysisArgs) -> Result<(), InsightsCliError> {
    let episodes = read_episodes(input)?;
    let (engine, reference) = load_analysis(analysis)?;
    let status = engine.check_medication_overuse(&episodes, &reference);
    println!("{}", serde_json::to_string_pretty(&status)?);
    Ok(())
}

fn cmd_validate(input: &InputArgs, json: bool) -> Result<(), InsightsCliError> {
    let episodes = read_episodes(input)?;
    let issues = EpisodeAdapter::validate_episodes(&episodes);

    let report = ValidationReport {
        total_episodes: episodes.len(),
        issues: issues.iter().map(ValidationIssueDetail::from).collect(),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("Validation Report");
        println!("=================");
        println!("Total episodes: {}", report.total_episodes);
        println!("Issues found:   {}", report.issues.len());

        if !report.issues.is_empty() {
            println!("\nIssues:");
            for issue in &report.issues {
                println!(
                    "  - Episode {} (index {}): {}",
                    issue.episode_id, issue.index, issue.message
                );
            }
        }
    }

    if report.issues.is_empty() {
        Ok(())
    } else {
        Err(InsightsCliError::ValidationFailed(report.issues.len()))
    }
}

// Helper functions

fn read_episodes(input: &InputArgs) -> Result<Vec<Episode>, InsightsCliError> {
    let data = if input.input.to_string_lossy() == "-" {
        if atty::is(atty::Stream::Stdin) {
            return Err(InsightsCliError::NoInput);
        }
        let mut buffer = String::new();
        io::stdin().read_to_string(&mut buffer)?;
        buffer
    } else {
        fs::read_to_string(&input.input)?
    };

    let episodes = match input.input_format {
        InputFormat::Json => EpisodeAdapter::parse_array(&data)?,
        InputFormat::Ndjson => EpisodeAdapter::parse_ndjson(&data)?,
    };
    Ok(episodes)
}

fn load_analysis(args: &AnalysisArgs) -> Result<(InsightsEngine, ReferenceTime), InsightsCliError> {
    let engine = match &args.config {
        Some(path) => InsightsEngine::from_config_json(&fs::read_to_string(path)?)?,
        None => InsightsEngine::default(),
    };
    let reference = match &args.now {
        Some(now) => ReferenceTime::parse(now)?,
        None => ReferenceTime::utc_now(),
    };
    Ok((engine, reference))
}

fn print_report(report: &Report, min_episodes: usize) {
    println!("Headache Report");
    println!("===============");
    println!("Episodes logged: {}", report.total_logs);

    if !report.has_enough_data {
        println!(
            "\nKeep logging: patterns appear after {} episodes.",
            min_episodes
        );
        return;
    }

    if let Some(avg) = report.average_severity {
        println!("Average severity: {avg:.1}");
    }
    if let Some(minutes) = report.average_duration_minutes {
        println!("Average duration: {:.1} h", minutes / 60.0);
    }
    if let Some(streak) = report.headache_free_streak_days {
        println!("Headache-free streak: {streak} days");
    }

    if !report.top_triggers.is_empty() {
        println!("\nTop triggers:");
        for factor in &report.top_triggers {
            println!("  - {} ({})", factor.name, factor.count);
        }
    }
    if !report.top_symptoms.is_empty() {
        println!("\nTop symptoms:");
        for factor in &report.top_symptoms {
            println!("  - {} ({})", factor.name, factor.count);
        }
    }
    if !report.weather_correlations.is_empty() {
        println!("\nWeather:");
        for correlation in &report.weather_correlations {
            println!(
                "  - {} [{:?}, {:.2}]: {}",
                correlation.name, correlation.label, correlation.strength, correlation.description
            );
        }
    }
    if let Some(sleep) = &report.sleep_correlation {
        println!("\nSleep: {}", sleep.description);
    }
    if !report.medication_effectiveness.is_empty() {
        println!("\nMedication effectiveness:");
        for med in &report.medication_effectiveness {
            println!(
                "  - {}: {:.1}/5 over {} uses",
                med.name, med.average_effectiveness, med.uses
            );
        }
    }
}

// Error handling

#[derive(serde::Serialize)]
struct ValidationReport {
    total_episodes: usize,
    issues: Vec<ValidationIssueDetail>,
}

#[derive(serde::Serialize)]
struct ValidationIssueDetail {
    index: usize,
    episode_id: String,
    message: String,
}

impl From<&ValidationIssue> for ValidationIssueDetail {
    fn from(issue: &ValidationIssue) -> Self {
        Self {
            index: issue.index,
            episode_id: issue.episode_id.to_string(),
            message: issue.message(),
        }
    }
}

#[derive(Debug)]
enum InsightsCliError {
    Io(io::Error),
    Analysis(AnalysisError),
    Json(serde_json::Error),
    NoInput,
    ValidationFailed(usize),
}

impl From<io::Error> for InsightsCliError {
    fn from(e: io::Error) -> Self {
        InsightsCliError::Io(e)
    }
}

impl From<AnalysisError> for InsightsCliError {
    fn from(e: AnalysisError) -> Self {
        InsightsCliError::Analysis(e)
    }
}

impl From<serde_json::Error> for InsightsCliError {
    fn from(e: serde_json::Error) -> Self {
        InsightsCliError::Json(e)
    }
}

#[derive(serde::Serialize)]
struct CliError {
    code: String,
    message: String,
    hint: Option<String>,
}

impl From<InsightsCliError> for CliError {
    fn from(e: InsightsCliError) -> Self {
        match e {
            InsightsCliError::Io(e) => CliError {
                code: "IO_ERROR".to_string(),
                message: e.to_string(),
                hint: Some("Check file paths and permissions".to_string()),
            },
            InsightsCliError::Analysis(e) => CliError {
                code: "ANALYSIS_ERROR".to_string(),
                message: e.to_string(),
                hint: Some("Check episode JSON, --now and the configuration file".to_string()),
            },
            InsightsCliError::Json(e) => CliError {
                code: "JSON_ERROR".to_string(),
                message: e.to_string(),
                hint: None,
            },
            InsightsCliError::NoInput => CliError {
                code: "NO_INPUT".to_string(),
                message: "stdin is a terminal; nothing to read".to_string(),
                hint: Some("Pipe episodes in or pass --input <file>".to_string()),
            },
            InsightsCliError::ValidationFailed(count) => CliError {
                code: "VALIDATION_FAILED".to_string(),
                message: format!("{count} issue(s) found"),
                hint: Some("Run with --json for details".to_string()),
            },
        }
    }
}
