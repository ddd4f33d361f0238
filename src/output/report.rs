//! Report structures handed to the formatters

use crate::config::SimilarityMode;
use crate::error::Result;
use crate::processing::matcher::CandidateScore;
use crate::processing::ranking::{RankingOutcome, RecommendationSummary, SkillGap, SkippedCandidate};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Ranking of a candidate batch against one job description
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankingReport {
    pub metadata: ReportMetadata,

    /// Candidates in rank order, highest score first
    pub candidates: Vec<RankedCandidate>,

    pub summary: RecommendationSummary,

    /// Most commonly missing skills across the batch
    pub skill_gaps: Vec<SkillGap>,

    /// Resumes that could not be scored
    pub skipped: Vec<SkippedCandidate>,

    /// How many of the leading candidates to shortlist for interview
    pub top_candidates: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankedCandidate {
    /// 1-based
    pub rank: usize,
    #[serde(flatten)]
    pub score: CandidateScore,
}

/// Detailed result for one resume against one job
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchReport {
    pub metadata: ReportMetadata,
    pub score: CandidateScore,
    /// Highest-weighted terms of the resume, for explanation only
    pub resume_keywords: Vec<Keyword>,
    pub job_keywords: Vec<Keyword>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Keyword {
    pub term: String,
    pub weight: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportMetadata {
    pub generated_at: DateTime<Utc>,
    pub job_file: String,
    pub similarity_mode: SimilarityMode,
    pub ranker_version: String,
}

impl ReportMetadata {
    pub fn new(job_file: impl Into<String>, similarity_mode: SimilarityMode) -> Self {
        Self {
            generated_at: Utc::now(),
            job_file: job_file.into(),
            similarity_mode,
            ranker_version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

impl RankingReport {
    pub fn new(
        metadata: ReportMetadata,
        outcome: RankingOutcome,
        top_candidates: usize,
        gap_limit: usize,
    ) -> Self {
        let summary = outcome.summary();
        let mut skill_gaps = outcome.skill_gaps();
        skill_gaps.truncate(gap_limit);

        let candidates = outcome
            .ranked
            .into_iter()
            .enumerate()
            .map(|(i, score)| RankedCandidate { rank: i + 1, score })
            .collect();

        Self {
            metadata,
            candidates,
            summary,
            skill_gaps,
            skipped: outcome.skipped,
            top_candidates,
        }
    }

    pub fn shortlist(&self) -> &[RankedCandidate] {
        &self.candidates[..self.top_candidates.min(self.candidates.len())]
    }
}

impl MatchReport {
    pub fn new(
        metadata: ReportMetadata,
        score: CandidateScore,
        resume_keywords: Vec<(String, f64)>,
        job_keywords: Vec<(String, f64)>,
    ) -> Self {
        let to_keywords = |terms: Vec<(String, f64)>| -> Vec<Keyword> {
            terms
                .into_iter()
                .map(|(term, weight)| Keyword { term, weight })
                .collect()
        };

        Self {
            metadata,
            score,
            resume_keywords: to_keywords(resume_keywords),
            job_keywords: to_keywords(job_keywords),
        }
    }
}

/// Saved JSON accepted by the gap report: a full ranking or a bare score list
#[derive(Deserialize)]
#[serde(untagged)]
enum SavedScores {
    Report(RankingReport),
    Scores(Vec<CandidateScore>),
}

/// Parse candidate scores from a saved ranking, validating every score
pub fn load_scores(json: &str) -> Result<Vec<CandidateScore>> {
    let saved: SavedScores = serde_json::from_str(json)?;
    let scores = match saved {
        SavedScores::Report(report) => report.candidates.into_iter().map(|c| c.score).collect(),
        SavedScores::Scores(scores) => scores,
    };

    for score in &scores {
        score.validate()?;
    }
    Ok(scores)
}
