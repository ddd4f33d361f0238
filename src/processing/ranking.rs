//! Batch ranking, skill-gap analysis and recommendation statistics

use crate::config::SimilarityMode;
use crate::error::Result;
use crate::processing::document::{JobFacts, ResumeFacts};
use crate::processing::matcher::{CandidateMatcher, CandidateScore};
use crate::processing::scoring::{round2, Recommendation};
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One resume entering a ranking run. `facts` holds the upstream failure
/// when the resume could not be read or parsed.
#[derive(Debug)]
pub struct Candidate {
    pub id: String,
    pub facts: Result<ResumeFacts>,
}

impl Candidate {
    pub fn new(id: impl Into<String>, facts: Result<ResumeFacts>) -> Self {
        Self { id: id.into(), facts }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkippedCandidate {
    pub candidate_id: String,
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillGap {
    pub skill: String,
    /// Candidates missing the skill
    pub count: usize,
    /// Share of the batch missing the skill
    pub percentage: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BucketStat {
    pub recommendation: Recommendation,
    pub count: usize,
    pub percentage: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendationSummary {
    pub total: usize,
    /// Strong, Good, Possible, Weak
    pub buckets: Vec<BucketStat>,
}

impl RecommendationSummary {
    /// Bucket counts and shares; an empty batch gives all zeros
    pub fn from_scores(scores: &[CandidateScore]) -> Self {
        let total = scores.len();
        let buckets = Recommendation::ALL
            .iter()
            .map(|&recommendation| {
                let count = scores.iter().filter(|s| s.recommendation == recommendation).count();
                let percentage = if total == 0 {
                    0.0
                } else {
                    round2(count as f64 / total as f64 * 100.0)
                };
                BucketStat {
                    recommendation,
                    count,
                    percentage,
                }
            })
            .collect();

        Self { total, buckets }
    }

    pub fn count(&self, recommendation: Recommendation) -> usize {
        self.buckets
            .iter()
            .find(|b| b.recommendation == recommendation)
            .map_or(0, |b| b.count)
    }
}

/// Missing-skill frequencies, most common first; ties keep first-seen order
pub fn skill_gaps(scores: &[CandidateScore]) -> Vec<SkillGap> {
    let mut order: Vec<(&str, usize)> = Vec::new();
    let mut positions: HashMap<&str, usize> = HashMap::new();

    for score in scores {
        for skill in &score.missing_skills {
            match positions.get(skill.as_str()).copied() {
                Some(i) => order[i].1 += 1,
                None => {
                    positions.insert(skill.as_str(), order.len());
                    order.push((skill.as_str(), 1));
                }
            }
        }
    }

    order.sort_by(|a, b| b.1.cmp(&a.1));

    let total = scores.len();
    order
        .into_iter()
        .map(|(skill, count)| SkillGap {
            skill: skill.to_string(),
            count,
            percentage: round2(count as f64 / total as f64 * 100.0),
        })
        .collect()
}

/// Ranked scores plus the candidates left out of the ranking
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankingOutcome {
    pub ranked: Vec<CandidateScore>,
    pub skipped: Vec<SkippedCandidate>,
}

impl RankingOutcome {
    pub fn top_candidates(&self, n: usize) -> &[CandidateScore] {
        &self.ranked[..n.min(self.ranked.len())]
    }

    pub fn skill_gaps(&self) -> Vec<SkillGap> {
        skill_gaps(&self.ranked)
    }

    pub fn summary(&self) -> RecommendationSummary {
        RecommendationSummary::from_scores(&self.ranked)
    }
}

/// Matches a batch of candidates against one job and orders the results
pub struct RankingPipeline {
    matcher: CandidateMatcher,
    mode: SimilarityMode,
}

impl RankingPipeline {
    pub fn new(matcher: CandidateMatcher, mode: SimilarityMode) -> Self {
        Self { matcher, mode }
    }

    /// Score every readable candidate, then sort by overall score descending.
    ///
    /// Candidates whose facts are unavailable are reported in `skipped`
    /// and the rest of the batch still ranks. The sort is stable.
    pub fn rank(&self, candidates: Vec<Candidate>, job: &JobFacts) -> RankingOutcome {
        let mut readable: Vec<(String, ResumeFacts)> = Vec::new();
        let mut skipped = Vec::new();

        for candidate in candidates {
            match candidate.facts {
                Ok(facts) => readable.push((candidate.id, facts)),
                Err(e) => {
                    warn!("Skipping {}: {}", candidate.id, e);
                    skipped.push(SkippedCandidate {
                        candidate_id: candidate.id,
                        reason: e.to_string(),
                    });
                }
            }
        }

        let similarities: Vec<f64> = match self.mode {
            SimilarityMode::Batch => {
                let texts: Vec<&str> = readable.iter().map(|(_, f)| f.raw_text.as_str()).collect();
                self.matcher.vectorizer().batch_similarity(texts.as_slice(), &job.raw_text)
            }
            SimilarityMode::Pairwise => readable
                .iter()
                .map(|(_, f)| self.matcher.vectorizer().similarity(&f.raw_text, &job.raw_text))
                .collect(),
        };

        let mut ranked: Vec<CandidateScore> = readable
            .iter()
            .zip(similarities)
            .map(|((id, facts), similarity)| self.matcher.score_with_similarity(id, facts, job, similarity))
            .collect();

        ranked.sort_by(|a, b| b.overall_score.total_cmp(&a.overall_score));

        info!("Ranked {} candidates, skipped {}", ranked.len(), skipped.len());

        RankingOutcome { ranked, skipped }
    }
}
