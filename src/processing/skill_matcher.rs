//! Set comparison between a candidate's skills and a job's required skills

use crate::processing::scoring::round2;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillMatchResult {
    pub percentage: f64,
    /// Required skills the candidate has, in required order
    pub matched_skills: Vec<String>,
    /// Required skills the candidate lacks, in required order
    pub missing_skills: Vec<String>,
}

impl SkillMatchResult {
    fn empty() -> Self {
        Self {
            percentage: 0.0,
            matched_skills: Vec::new(),
            missing_skills: Vec::new(),
        }
    }
}

/// Compare skills case-insensitively.
///
/// A job without required skills scores 0, not a vacuous 100.
pub fn match_skills<'a, C>(candidate_skills: C, required_skills: &[String]) -> SkillMatchResult
where
    C: IntoIterator<Item = &'a String>,
{
    if required_skills.is_empty() {
        return SkillMatchResult::empty();
    }

    let candidate: HashSet<String> = candidate_skills
        .into_iter()
        .map(|skill| skill.to_lowercase())
        .collect();

    let (matched_skills, missing_skills): (Vec<String>, Vec<String>) = required_skills
        .iter()
        .map(|skill| skill.to_lowercase())
        .partition(|skill| candidate.contains(skill));

    let percentage = round2(matched_skills.len() as f64 / required_skills.len() as f64 * 100.0);

    SkillMatchResult {
        percentage,
        matched_skills,
        missing_skills,
    }
}
