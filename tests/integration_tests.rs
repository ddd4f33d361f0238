//! Integration tests for the candidate ranker

use candidate_ranker::config::{Config, OutputFormat, SimilarityMode};
use candidate_ranker::extraction::FactExtractor;
use candidate_ranker::input::manager::InputManager;
use candidate_ranker::output::{load_scores, save_report_to_file, RankingReport, ReportGenerator, ReportMetadata};
use candidate_ranker::processing::document::Education;
use candidate_ranker::processing::matcher::CandidateMatcher;
use candidate_ranker::processing::ranking::{RankingOutcome, RankingPipeline};
use candidate_ranker::processing::scoring::Recommendation;
use candidate_ranker::workflow::DocumentLoader;
use indicatif::ProgressBar;
use std::path::Path;
use tempfile::TempDir;

const JOB: &str = "tests/fixtures/job_description.txt";
const RESUMES: &str = "tests/fixtures/resumes";

async fn rank_fixtures(mode: SimilarityMode) -> RankingOutcome {
    let mut loader = DocumentLoader::new(FactExtractor::default());
    let job = loader.load_job(Path::new(JOB)).await.unwrap();
    let candidates = loader
        .load_candidates(Path::new(RESUMES), &ProgressBar::hidden())
        .await
        .unwrap();

    RankingPipeline::new(CandidateMatcher::default(), mode).rank(candidates, &job)
}

#[tokio::test]
async fn test_text_extraction_from_txt() {
    let mut manager = InputManager::new();
    let path = Path::new("tests/fixtures/sample_resume.txt");

    let result = manager.extract_text(path).await;
    assert!(result.is_ok());

    let text = result.unwrap();
    assert!(text.contains("John Doe"));
    assert!(text.contains("Software Engineer"));
    assert!(text.contains("React"));
    assert!(text.contains("Node.js"));
}

#[tokio::test]
async fn test_text_extraction_from_markdown() {
    let mut manager = InputManager::new();
    let path = Path::new("tests/fixtures/sample_resume.md");

    let text = manager.extract_text(path).await.unwrap();
    assert!(text.contains("John Doe"));
    assert!(text.contains("Software Engineer"));
    assert!(text.contains("React"));
    assert!(text.contains("Node.js"));
    assert!(!text.contains("**"));
    assert!(!text.contains("##"));
}

#[tokio::test]
async fn test_caching_functionality() {
    let mut manager = InputManager::new();
    let path = Path::new("tests/fixtures/sample_resume.txt");

    let text1 = manager.extract_text(path).await.unwrap();
    assert_eq!(manager.cache_size(), 1);

    let text2 = manager.extract_text(path).await.unwrap();
    assert_eq!(text1, text2);
    assert_eq!(manager.cache_size(), 1);
}

#[tokio::test]
async fn test_unsupported_file_type() {
    let mut manager = InputManager::new();
    let result = manager.extract_text(Path::new("tests/fixtures/unsupported.xyz")).await;
    assert!(result.is_err());
}

#[tokio::test]
async fn test_nonexistent_file() {
    let mut manager = InputManager::new();
    let result = manager.extract_text(Path::new("tests/fixtures/missing.txt")).await;
    assert!(result.is_err());
}

#[tokio::test]
async fn test_resume_facts_from_fixture() {
    let mut loader = DocumentLoader::new(FactExtractor::default());
    let facts = loader
        .load_resume(Path::new("tests/fixtures/sample_resume.txt"))
        .await
        .unwrap();

    assert_eq!(facts.experience_years, 5);
    assert_eq!(facts.education, Education::Bachelors);
    assert_eq!(facts.email.as_deref(), Some("john.doe@example.com"));
    for skill in ["react", "mongodb", "docker", "agile"] {
        assert!(facts.skills.contains(skill), "missing {}", skill);
    }
}

#[tokio::test]
async fn test_job_facts_from_fixture() {
    let mut loader = DocumentLoader::new(FactExtractor::default());
    let job = loader.load_job(Path::new(JOB)).await.unwrap();

    assert_eq!(
        job.required_skills,
        vec!["python", "sql", "machine learning", "docker", "aws", "pandas", "numpy"]
    );
    assert_eq!(job.required_experience_years, 3);
}

#[tokio::test]
async fn test_rank_folder_end_to_end() {
    let outcome = rank_fixtures(SimilarityMode::Batch).await;

    assert_eq!(outcome.ranked.len(), 3);
    assert_eq!(outcome.skipped.len(), 1);
    assert_eq!(outcome.skipped[0].candidate_id, "carol_blank.txt");

    let best = &outcome.ranked[0];
    assert_eq!(best.candidate_id, "alice_smith.txt");
    assert_eq!(best.skill_match_percentage, 100.0);
    assert_eq!(best.experience_match, 100.0);
    assert!(best.missing_skills.is_empty());
    assert_eq!(best.profile.education, Education::PhD);

    for pair in outcome.ranked.windows(2) {
        assert!(pair[0].overall_score >= pair[1].overall_score);
    }
    for score in &outcome.ranked {
        assert!(score.validate().is_ok());
        assert_eq!(score.recommendation, Recommendation::from_score(score.overall_score));
    }

    let summary = outcome.summary();
    assert_eq!(summary.total, 3);
    assert_eq!(summary.buckets.iter().map(|b| b.count).sum::<usize>(), 3);
}

#[tokio::test]
async fn test_pairwise_mode_keeps_skill_and_experience_scores() {
    let batch = rank_fixtures(SimilarityMode::Batch).await;
    let pairwise = rank_fixtures(SimilarityMode::Pairwise).await;

    assert_eq!(pairwise.ranked[0].candidate_id, "alice_smith.txt");
    for score in &pairwise.ranked {
        let other = batch
            .ranked
            .iter()
            .find(|s| s.candidate_id == score.candidate_id)
            .unwrap();
        assert_eq!(score.skill_match_percentage, other.skill_match_percentage);
        assert_eq!(score.experience_match, other.experience_match);
    }
}

#[tokio::test]
async fn test_skill_gaps_across_folder() {
    let outcome = rank_fixtures(SimilarityMode::Batch).await;
    let gaps = outcome.skill_gaps();

    // bob misses every required skill, dave misses four of them
    let top = &gaps[0];
    assert_eq!(top.count, 2);
    assert!(gaps.iter().all(|g| g.count <= 2));
    assert!(gaps.iter().any(|g| g.skill == "aws" && g.count == 2));

    let python = gaps.iter().find(|g| g.skill == "python").unwrap();
    assert_eq!(python.count, 1);
    assert!(gaps.iter().position(|g| g.skill == "python") > gaps.iter().position(|g| g.skill == "aws"));
}

#[tokio::test]
async fn test_saved_json_report_feeds_gap_analysis() {
    let outcome = rank_fixtures(SimilarityMode::Batch).await;
    let expected = outcome.skill_gaps();
    let report = RankingReport::new(ReportMetadata::new(JOB, SimilarityMode::Batch), outcome, 2, 10);

    let json = ReportGenerator::new()
        .generate_ranking(&report, OutputFormat::Json)
        .unwrap();

    let dir = TempDir::new().unwrap();
    let path = dir.path().join("reports").join("ranking.json");
    save_report_to_file(&json, &path).unwrap();

    let content = std::fs::read_to_string(&path).unwrap();
    let scores = load_scores(&content).unwrap();
    assert_eq!(scores.len(), 3);
    assert_eq!(candidate_ranker::processing::ranking::skill_gaps(&scores), expected);
}

#[tokio::test]
async fn test_csv_export_has_row_per_ranked_candidate() {
    let outcome = rank_fixtures(SimilarityMode::Batch).await;
    let report = RankingReport::new(ReportMetadata::new(JOB, SimilarityMode::Batch), outcome, 3, 10);

    let csv = ReportGenerator::new()
        .generate_ranking(&report, OutputFormat::Csv)
        .unwrap();

    let mut reader = csv::Reader::from_reader(csv.as_bytes());
    let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
    assert_eq!(rows.len(), 3);
    assert_eq!(&rows[0][0], "1");
    assert_eq!(&rows[0][1], "alice_smith.txt");
}

#[tokio::test]
async fn test_missing_resume_folder_is_error() {
    let mut loader = DocumentLoader::new(FactExtractor::default());
    let result = loader
        .load_candidates(Path::new("tests/fixtures/no_such_dir"), &ProgressBar::hidden())
        .await;
    assert!(result.is_err());
}

#[test]
fn test_config_round_trip_through_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");

    let created = Config::load_from(&path).unwrap();
    assert!(path.exists());

    let reloaded = Config::load_from(&path).unwrap();
    assert_eq!(reloaded.vectorizer.max_features, created.vectorizer.max_features);
    assert_eq!(reloaded.ranking.similarity_mode, SimilarityMode::Batch);
    assert_eq!(reloaded.extraction.skills.len(), 20);
}
