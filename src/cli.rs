//! CLI interface for the candidate ranker

use crate::config::{OutputFormat, SimilarityMode};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

pub const RESUME_EXTENSIONS: &[&str] = &["pdf", "txt", "md"];

#[derive(Parser)]
#[command(name = "candidate-ranker")]
#[command(version)]
#[command(about = "Rank candidate resumes against a job description")]
#[command(long_about = "Score resumes on required-skill coverage, TF-IDF text similarity and years of experience, then rank them with hiring recommendations and a skill gap report")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Score a single resume against a job description
    Match {
        /// Path to resume file (PDF, TXT, MD)
        #[arg(short, long)]
        resume: PathBuf,

        /// Path to job description file (PDF, TXT, MD)
        #[arg(short, long)]
        job: PathBuf,

        /// Show every skill and the top keywords of both documents
        #[arg(short, long)]
        detailed: bool,

        /// Output format: console, json, markdown, csv
        #[arg(short, long)]
        output: Option<String>,

        /// Save output to file
        #[arg(short, long)]
        save: Option<PathBuf>,
    },

    /// Rank every resume in a folder against a job description
    Rank {
        /// Folder containing resumes (PDF, TXT, MD)
        #[arg(short, long)]
        resumes: PathBuf,

        /// Path to job description file (PDF, TXT, MD)
        #[arg(short, long)]
        job: PathBuf,

        /// Output format: console, json, markdown, csv
        #[arg(short, long)]
        output: Option<String>,

        /// Save output to file
        #[arg(short, long)]
        save: Option<PathBuf>,

        /// Number of candidates to shortlist for interview
        #[arg(short, long)]
        top: Option<usize>,

        /// Similarity mode: batch (one shared vocabulary) or pairwise
        #[arg(short, long)]
        mode: Option<String>,
    },

    /// Show the highest-weighted TF-IDF terms of a document
    Features {
        /// Path to document (PDF, TXT, MD)
        file: PathBuf,

        /// Number of terms to show
        #[arg(short = 'n', long, default_value_t = 20)]
        top: usize,
    },

    /// Summarize missing skills from a saved JSON ranking
    Gaps {
        /// JSON file written by `rank --output json`, or a list of candidate scores
        scores: PathBuf,

        /// Maximum number of skills to list
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Show configuration
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Reset configuration to defaults
    Reset,

    /// Print the configuration file path
    Path,
}

/// Parse and validate output format
pub fn parse_output_format(format: &str) -> Result<OutputFormat, String> {
    match format.to_lowercase().as_str() {
        "console" => Ok(OutputFormat::Console),
        "json" => Ok(OutputFormat::Json),
        "markdown" | "md" => Ok(OutputFormat::Markdown),
        "csv" => Ok(OutputFormat::Csv),
        _ => Err(format!(
            "Invalid output format: {}. Supported: console, json, markdown, csv",
            format
        )),
    }
}

pub fn parse_similarity_mode(mode: &str) -> Result<SimilarityMode, String> {
    match mode.to_lowercase().as_str() {
        "batch" => Ok(SimilarityMode::Batch),
        "pairwise" => Ok(SimilarityMode::Pairwise),
        _ => Err(format!("Invalid similarity mode: {}. Supported: batch, pairwise", mode)),
    }
}

/// Validate file extension
pub fn validate_file_extension(path: &Path, allowed_extensions: &[&str]) -> Result<(), String> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) => {
            if allowed_extensions.contains(&ext.to_lowercase().as_str()) {
                Ok(())
            } else {
                Err(format!(
                    "Unsupported file extension: .{}. Allowed: {}",
                    ext,
                    allowed_extensions.join(", ")
                ))
            }
        }
        None => Err("File has no extension".to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_rank_command() {
        let cli = Cli::try_parse_from([
            "candidate-ranker", "rank", "-r", "resumes", "-j", "jd.txt", "--top", "5", "-m", "pairwise",
        ])
        .unwrap();

        match cli.command {
            Commands::Rank { resumes, top, mode, .. } => {
                assert_eq!(resumes, PathBuf::from("resumes"));
                assert_eq!(top, Some(5));
                assert_eq!(mode.as_deref(), Some("pairwise"));
            }
            _ => panic!("expected rank command"),
        }
    }

    #[test]
    fn test_parse_output_format() {
        assert_eq!(parse_output_format("MD").unwrap(), OutputFormat::Markdown);
        assert_eq!(parse_output_format("csv").unwrap(), OutputFormat::Csv);
        assert!(parse_output_format("html").is_err());
    }

    #[test]
    fn test_validate_file_extension() {
        assert!(validate_file_extension(Path::new("cv.PDF"), RESUME_EXTENSIONS).is_ok());
        assert!(validate_file_extension(Path::new("cv.docx"), RESUME_EXTENSIONS).is_err());
        assert!(validate_file_extension(Path::new("cv"), RESUME_EXTENSIONS).is_err());
    }
}
