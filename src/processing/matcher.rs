//! Single candidate against a single job

use crate::error::{RankerError, Result};
use crate::processing::document::{Education, JobFacts, ResumeFacts};
use crate::processing::experience::experience_score;
use crate::processing::scoring::{overall_score, Recommendation};
use crate::processing::skill_matcher::match_skills;
use crate::processing::vectorizer::TfidfVectorizer;
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Contact and background details carried alongside a score for export
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateProfile {
    pub email: Option<String>,
    pub phone: Option<String>,
    pub education: Education,
    pub experience_years: u32,
}

impl From<&ResumeFacts> for CandidateProfile {
    fn from(facts: &ResumeFacts) -> Self {
        Self {
            email: facts.email.clone(),
            phone: facts.phone.clone(),
            education: facts.education,
            experience_years: facts.experience_years,
        }
    }
}

/// Result of matching one resume against one job
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateScore {
    pub candidate_id: String,
    pub overall_score: f64,
    pub skill_match_percentage: f64,
    pub text_similarity: f64,
    pub experience_match: f64,
    pub matched_skills: Vec<String>,
    pub missing_skills: Vec<String>,
    pub recommendation: Recommendation,
    pub profile: CandidateProfile,
}

impl CandidateScore {
    /// Reject records that could not have come out of the matcher.
    ///
    /// Used when scores are read back from an external file.
    pub fn validate(&self) -> Result<()> {
        let fields = [
            ("overall_score", self.overall_score),
            ("skill_match_percentage", self.skill_match_percentage),
            ("text_similarity", self.text_similarity),
            ("experience_match", self.experience_match),
        ];

        for (name, value) in fields {
            if !value.is_finite() || !(0.0..=100.0).contains(&value) {
                return Err(RankerError::InvalidScore(format!(
                    "{}: {} is {} (expected 0-100)",
                    self.candidate_id, name, value
                )));
            }
        }

        for (name, skills) in [("matched_skills", &self.matched_skills), ("missing_skills", &self.missing_skills)] {
            let mut seen = HashSet::new();
            if let Some(skill) = skills.iter().find(|s| !seen.insert(s.as_str())) {
                return Err(RankerError::InvalidScore(format!(
                    "{}: skill '{}' appears twice in {}",
                    self.candidate_id, skill, name
                )));
            }
        }

        let matched: HashSet<&String> = self.matched_skills.iter().collect();
        if let Some(skill) = self.missing_skills.iter().find(|s| matched.contains(s)) {
            return Err(RankerError::InvalidScore(format!(
                "{}: skill '{}' is both matched and missing",
                self.candidate_id, skill
            )));
        }

        Ok(())
    }
}

/// Computes the three sub-scores and combines them
pub struct CandidateMatcher {
    vectorizer: TfidfVectorizer,
}

impl CandidateMatcher {
    pub fn new(vectorizer: TfidfVectorizer) -> Self {
        Self { vectorizer }
    }

    pub fn vectorizer(&self) -> &TfidfVectorizer {
        &self.vectorizer
    }

    /// Match with text similarity measured in a fresh two-document space
    pub fn match_candidate(&self, candidate_id: &str, resume: &ResumeFacts, job: &JobFacts) -> CandidateScore {
        let text_similarity = self.vectorizer.similarity(&resume.raw_text, &job.raw_text);
        self.score_with_similarity(candidate_id, resume, job, text_similarity)
    }

    /// Combine skill and experience scores with an already computed similarity
    pub fn score_with_similarity(
        &self,
        candidate_id: &str,
        resume: &ResumeFacts,
        job: &JobFacts,
        text_similarity: f64,
    ) -> CandidateScore {
        let skills = match_skills(&resume.skills, &job.required_skills);
        let experience_match = experience_score(resume.experience_years, job.required_experience_years);
        let overall = overall_score(skills.percentage, text_similarity, experience_match);

        debug!(
            "{}: skills {:.2}, similarity {:.2}, experience {:.2} -> {:.2}",
            candidate_id, skills.percentage, text_similarity, experience_match, overall
        );

        CandidateScore {
            candidate_id: candidate_id.to_string(),
            overall_score: overall,
            skill_match_percentage: skills.percentage,
            text_similarity,
            experience_match,
            matched_skills: skills.matched_skills,
            missing_skills: skills.missing_skills,
            recommendation: Recommendation::from_score(overall),
            profile: CandidateProfile::from(resume),
        }
    }
}

impl Default for CandidateMatcher {
    fn default() -> Self {
        Self::new(TfidfVectorizer::default())
    }
}
