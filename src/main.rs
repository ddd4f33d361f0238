//! Candidate ranker: score and rank resumes against a job description

use candidate_ranker::cli::{self, Cli, Commands, ConfigAction, RESUME_EXTENSIONS};
use candidate_ranker::config::{Config, OutputFormat, SimilarityMode};
use candidate_ranker::error::{RankerError, Result};
use candidate_ranker::extraction::rules::ExtractionRules;
use candidate_ranker::extraction::FactExtractor;
use candidate_ranker::output::{
    load_scores, save_report_to_file, suggest_filename, MatchReport, RankingReport, ReportGenerator, ReportMetadata,
};
use candidate_ranker::processing::matcher::CandidateMatcher;
use candidate_ranker::processing::ranking::{skill_gaps, RankingPipeline};
use candidate_ranker::processing::vectorizer::TfidfVectorizer;
use candidate_ranker::workflow::{candidate_id, extraction_progress, DocumentLoader};
use clap::Parser;
use colored::Colorize;
use log::{error, info};
use std::path::Path;
use std::process;

/// Keywords shown per document in a detailed match report
const MATCH_KEYWORDS: usize = 10;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let config_path = cli.config.clone().unwrap_or_else(Config::config_path);
    let config = match Config::load_from(&config_path) {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            process::exit(1);
        }
    };

    if let Err(e) = run_command(cli.command, config, &config_path).await {
        error!("Command failed: {}", e);
        process::exit(1);
    }
}

async fn run_command(command: Commands, config: Config, config_path: &Path) -> Result<()> {
    match command {
        Commands::Match {
            resume,
            job,
            detailed,
            output,
            save,
        } => {
            check_extension(&resume)?;
            check_extension(&job)?;
            let format = output_format(output.as_deref(), &config)?;

            let mut loader = DocumentLoader::new(build_extractor(&config)?);
            let job_facts = loader.load_job(&job).await?;
            let resume_facts = loader.load_resume(&resume).await?;

            let matcher = CandidateMatcher::new(TfidfVectorizer::new(config.vectorizer.clone()));
            let score = matcher.match_candidate(&candidate_id(&resume), &resume_facts, &job_facts);
            info!("{} scored {:.2}", score.candidate_id, score.overall_score);

            let vectorizer = matcher.vectorizer();
            let report = MatchReport::new(
                ReportMetadata::new(job.display().to_string(), SimilarityMode::Pairwise),
                score,
                vectorizer.top_features(&resume_facts.raw_text, MATCH_KEYWORDS),
                vectorizer.top_features(&job_facts.raw_text, MATCH_KEYWORDS),
            );

            let generator = report_generator(&config, detailed || config.output.detailed, save.is_none());
            let content = generator.generate_match(&report, format)?;
            emit(&content, save.as_deref())?;
        }

        Commands::Rank {
            resumes,
            job,
            output,
            save,
            top,
            mode,
        } => {
            check_extension(&job)?;
            let format = output_format(output.as_deref(), &config)?;
            let mode = match mode {
                Some(mode) => cli::parse_similarity_mode(&mode).map_err(RankerError::InvalidInput)?,
                None => config.ranking.similarity_mode,
            };
            let top = top.unwrap_or(config.ranking.top_candidates);

            let mut loader = DocumentLoader::new(build_extractor(&config)?);
            let job_facts = loader.load_job(&job).await?;
            if job_facts.required_skills.is_empty() {
                println!(
                    "{}",
                    "No known skills found in the job description; skill match will be 0 for everyone.".yellow()
                );
            }

            let progress = extraction_progress();
            let candidates = loader.load_candidates(&resumes, &progress).await?;
            if candidates.is_empty() {
                return Err(RankerError::InvalidInput(format!(
                    "No PDF, TXT or MD resumes found in {}",
                    resumes.display()
                )));
            }

            let matcher = CandidateMatcher::new(TfidfVectorizer::new(config.vectorizer.clone()));
            let outcome = RankingPipeline::new(matcher, mode).rank(candidates, &job_facts);

            let report = RankingReport::new(
                ReportMetadata::new(job.display().to_string(), mode),
                outcome,
                top,
                config.ranking.gap_report_limit,
            );

            let save = save.map(|path| {
                if path.is_dir() {
                    path.join(suggest_filename(format, &job.to_string_lossy(), true))
                } else {
                    path
                }
            });

            let generator = report_generator(&config, config.output.detailed, save.is_none());
            let content = generator.generate_ranking(&report, format)?;
            emit(&content, save.as_deref())?;
        }

        Commands::Features { file, top } => {
            check_extension(&file)?;
            let mut loader = DocumentLoader::new(build_extractor(&config)?);
            let text = loader.read_text(&file).await?;

            let vectorizer = TfidfVectorizer::new(config.vectorizer.clone());
            let features = vectorizer.top_features(&text, top);
            if features.is_empty() {
                println!("No terms found in {}", file.display());
            } else {
                println!("Top {} terms in {}:", features.len(), file.display());
                for (i, (term, weight)) in features.iter().enumerate() {
                    println!("{:3}. {:<30} {:.4}", i + 1, term, weight);
                }
            }
        }

        Commands::Gaps { scores, limit } => {
            let content = tokio::fs::read_to_string(&scores).await?;
            let scores_list = load_scores(&content)?;
            let limit = limit.unwrap_or(config.ranking.gap_report_limit);

            let gaps = skill_gaps(&scores_list);
            println!("Skill gaps across {} candidates:", scores_list.len());
            if gaps.is_empty() {
                println!("{}", "All candidates have all required skills!".green());
            }
            for gap in gaps.iter().take(limit) {
                println!(
                    "  • {}: {}/{} candidates ({:.0}%)",
                    gap.skill,
                    gap.count,
                    scores_list.len(),
                    gap.percentage
                );
            }
        }

        Commands::Config { action } => match action {
            Some(ConfigAction::Show) | None => {
                println!("Configuration ({})\n", config_path.display());
                let rendered = toml::to_string_pretty(&config)
                    .map_err(|e| RankerError::Configuration(format!("Failed to serialize config: {}", e)))?;
                println!("{}", rendered);
            }
            Some(ConfigAction::Reset) => {
                Config::default().save_to(config_path)?;
                println!("Configuration reset to defaults at {}", config_path.display());
            }
            Some(ConfigAction::Path) => {
                println!("{}", config_path.display());
            }
        },
    }
    Ok(())
}

fn build_extractor(config: &Config) -> Result<FactExtractor> {
    Ok(FactExtractor::new(ExtractionRules::from_config(&config.extraction)?))
}

fn check_extension(path: &Path) -> Result<()> {
    cli::validate_file_extension(path, RESUME_EXTENSIONS).map_err(RankerError::UnsupportedFormat)
}

fn output_format(requested: Option<&str>, config: &Config) -> Result<OutputFormat> {
    match requested {
        Some(format) => cli::parse_output_format(format).map_err(RankerError::InvalidInput),
        None => Ok(config.output.format),
    }
}

/// Colors only make sense on a terminal, never in a saved report
fn report_generator(config: &Config, detailed: bool, to_terminal: bool) -> ReportGenerator {
    ReportGenerator::with_options(config.output.color_output && to_terminal, detailed, true, true)
}

/// Print to stdout, or write to `save` when given
fn emit(content: &str, save: Option<&Path>) -> Result<()> {
    match save {
        Some(path) => {
            save_report_to_file(content, path)?;
            println!("Report saved to {}", path.display());
        }
        None => println!("{}", content),
    }
    Ok(())
}
