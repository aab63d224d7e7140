//! Command-line interface for the converter.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::{Parser, Subcommand};
use console::{style, StyledObject};
use indicatif::{ProgressBar, ProgressStyle};
use quizport_suggester::config::{DEFAULT_MIN_CONFIDENCE, DEFAULT_TOP_N};
use quizport_suggester::{ConfidenceTier, DomainSuggester, KeywordTaxonomy};

use crate::convert::{convert_file, ConversionSummary, ConvertOptions};
use crate::error::{ConverterError, Result};
use crate::export::Delimiter;
use crate::types::ExtractionStatus;

/// Width used when wrapping preview values.
const PREVIEW_WIDTH: usize = 100;

/// Quizport - Convert exported quiz pages to a course import spreadsheet.
#[derive(Parser)]
#[command(name = "quizport")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Convert a quiz page (file or http(s) URL) to CSV.
    Convert {
        /// HTML file path or URL
        input: String,

        /// Output CSV path (default: <input>_udemy_questions.csv)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Parse as XHTML and fail on malformed markup
        #[arg(long)]
        strict: bool,

        /// Exam whose domains are suggested for each question
        #[arg(long)]
        exam: Option<String>,

        /// Minimum confidence for a suggested domain
        #[arg(long, default_value_t = DEFAULT_MIN_CONFIDENCE)]
        min_confidence: f64,

        /// YAML keyword taxonomy (default: built-in)
        #[arg(long)]
        taxonomy: Option<PathBuf>,

        /// Field delimiter: comma or tab
        #[arg(long, default_value_t = Delimiter::Comma)]
        delimiter: Delimiter,

        /// Write a JSON run report to this path
        #[arg(long)]
        report: Option<PathBuf>,

        /// Print the first exported question
        #[arg(long)]
        preview: bool,
    },

    /// Suggest exam domains for a question text.
    Suggest {
        /// Question text
        text: String,

        /// Exam identifier (e.g., google_cloud_developer)
        #[arg(short, long)]
        exam: String,

        /// Number of suggestions
        #[arg(short = 'n', long, default_value_t = DEFAULT_TOP_N)]
        top: usize,

        /// YAML keyword taxonomy (default: built-in)
        #[arg(long)]
        taxonomy: Option<PathBuf>,
    },

    /// List the exams and domains of a taxonomy.
    Exams {
        /// YAML keyword taxonomy (default: built-in)
        #[arg(long)]
        taxonomy: Option<PathBuf>,
    },
}

/// How a successful run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Completed,
    /// Conversion ran but the document held no questions.
    NoQuestionsFound,
}

impl Outcome {
    /// Process exit code for this outcome.
    pub fn exit_code(self) -> i32 {
        match self {
            Self::Completed => 0,
            Self::NoQuestionsFound => 2,
        }
    }
}

/// Run the CLI.
pub fn run() -> Result<Outcome> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Convert {
            input,
            output,
            strict,
            exam,
            min_confidence,
            taxonomy,
            delimiter,
            report,
            preview,
        } => {
            let mut options = ConvertOptions::default()
                .with_strict(strict)
                .with_delimiter(delimiter)
                .with_min_confidence(min_confidence)
                .with_taxonomy(load_taxonomy(taxonomy.as_deref())?);
            if let Some(exam) = exam {
                options = options.with_exam(exam);
            }
            convert_command(
                &input,
                output.as_deref(),
                &options,
                report.as_deref(),
                preview,
            )
        }
        Commands::Suggest {
            text,
            exam,
            top,
            taxonomy,
        } => suggest_command(&text, &exam, top, taxonomy.as_deref()),
        Commands::Exams { taxonomy } => exams_command(taxonomy.as_deref()),
    }
}

fn load_taxonomy(path: Option<&Path>) -> Result<Arc<KeywordTaxonomy>> {
    let taxonomy = match path {
        Some(path) => KeywordTaxonomy::from_yaml_file(path)?,
        None => KeywordTaxonomy::builtin(),
    };
    Ok(Arc::new(taxonomy))
}

/// Execute the convert command.
fn convert_command(
    input: &str,
    output: Option<&Path>,
    options: &ConvertOptions,
    report: Option<&Path>,
    preview: bool,
) -> Result<Outcome> {
    println!("{} {}", style("Converting").bold(), style(input).cyan());
    println!();

    let pb = ProgressBar::new_spinner();
    #[allow(clippy::expect_used)] // Static template string that is guaranteed to be valid
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .expect("valid template"),
    );
    pb.set_message("Extracting questions...");
    pb.enable_steady_tick(std::time::Duration::from_millis(100));

    let summary = match convert_file(input, output, options) {
        Ok(summary) => summary,
        Err(e) => {
            pb.finish_and_clear();
            return Err(e);
        }
    };
    pb.finish_and_clear();

    print_summary(&summary);

    if let Some(report_path) = report {
        fs::write(report_path, serde_json::to_string_pretty(&summary)?)?;
        println!("  Report: {}", report_path.display());
    }

    if preview && summary.questions > 0 {
        print_preview(&summary.output, options.delimiter)?;
    }

    Ok(match summary.status {
        ExtractionStatus::Extracted { .. } => Outcome::Completed,
        ExtractionStatus::NoQuestionsFound => Outcome::NoQuestionsFound,
    })
}

fn print_summary(summary: &ConversionSummary) {
    println!("  Quiz items: {}", summary.items_found);
    println!("  Questions: {}", style(summary.questions).green());
    if summary.skipped > 0 {
        println!("  Skipped: {}", style(summary.skipped).yellow());
    }
    if summary.defaulted > 0 {
        println!(
            "  Answers to review: {}",
            style(summary.defaulted).yellow().bold()
        );
    }
    if summary.domains_assigned > 0 {
        println!("  Domains assigned: {}", summary.domains_assigned);
    }
    for diagnostic in &summary.diagnostics {
        println!("    {} {diagnostic}", style("!").yellow());
    }
    println!();

    if summary.status == ExtractionStatus::NoQuestionsFound {
        println!(
            "{} no questions found in {}",
            style("Warning:").yellow().bold(),
            summary.input
        );
    }
    println!(
        "{} {}",
        style("Saved to:").green().bold(),
        summary.output.display()
    );
}

/// Print the non-empty fields of the first exported row.
fn print_preview(path: &Path, delimiter: Delimiter) -> Result<()> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter.byte())
        .from_path(path)?;
    let headers = reader.headers()?.clone();
    let Some(first) = reader.records().next().transpose()? else {
        return Ok(());
    };

    println!();
    println!("{}", style("First question preview:").bold());
    println!("{}", "-".repeat(30));
    let options = textwrap::Options::new(PREVIEW_WIDTH).subsequent_indent("    ");
    for (header, value) in headers.iter().zip(first.iter()) {
        if !value.is_empty() {
            println!(
                "{}",
                textwrap::fill(&format!("{header}: {value}"), &options)
            );
        }
    }
    Ok(())
}

/// Execute the suggest command.
fn suggest_command(text: &str, exam: &str, top: usize, taxonomy: Option<&Path>) -> Result<Outcome> {
    let taxonomy = load_taxonomy(taxonomy)?;
    if taxonomy.exam(exam).is_none() {
        let known: Vec<&str> = taxonomy.exams().map(|e| e.name()).collect();
        return Err(ConverterError::InvalidInput(format!(
            "exam '{exam}' is not in the taxonomy (known: {})",
            known.join(", ")
        )));
    }

    let suggestions = DomainSuggester::new(taxonomy).suggest_domains(text, exam, top);
    if suggestions.is_empty() {
        println!("{}", style("No matching domains.").yellow());
        return Ok(Outcome::Completed);
    }

    for (rank, suggestion) in (1..).zip(&suggestions) {
        println!(
            "{rank}. {} (score {:.2}, confidence {:.1}%, {})",
            style(&suggestion.domain_name).cyan(),
            suggestion.score,
            suggestion.confidence,
            tier_style(suggestion.confidence_level)
        );
    }
    Ok(Outcome::Completed)
}

fn tier_style(tier: ConfidenceTier) -> StyledObject<&'static str> {
    let label = style(tier.as_str());
    match tier {
        ConfidenceTier::High => label.green(),
        ConfidenceTier::Medium => label.cyan(),
        ConfidenceTier::Low => label.yellow(),
        ConfidenceTier::VeryLow => label.red(),
    }
}

/// Execute the exams command.
fn exams_command(taxonomy: Option<&Path>) -> Result<Outcome> {
    let taxonomy = load_taxonomy(taxonomy)?;
    for exam in taxonomy.exams() {
        println!(
            "{} {}",
            style(exam.name()).bold(),
            style(format!("({})", exam.display_name())).dim()
        );
        for domain in exam.domains() {
            println!(
                "  - {} [{} keywords]",
                domain.name(),
                domain.keyword_count()
            );
        }
    }
    Ok(Outcome::Completed)
}
