//! Compiled lookup tables for fact extraction

use crate::config::ExtractionConfig;
use crate::error::{RankerError, Result};
use crate::processing::document::Education;
use aho_corasick::{AhoCorasick, MatchKind};
use regex::Regex;

/// Immutable skill vocabulary, keyword tables and patterns.
///
/// Pattern lists are kept in configured order; extraction takes the first
/// pattern that matches.
pub struct ExtractionRules {
    skills: Vec<String>,
    skill_matcher: AhoCorasick,
    education: Vec<(Education, Vec<String>)>,
    resume_experience_patterns: Vec<Regex>,
    job_experience_patterns: Vec<Regex>,
    email_pattern: Regex,
    phone_pattern: Regex,
}

impl ExtractionRules {
    pub fn from_config(config: &ExtractionConfig) -> Result<Self> {
        let skills: Vec<String> = config
            .skills
            .iter()
            .map(|s| s.trim().to_lowercase())
            .collect();

        if let Some(pos) = skills.iter().position(|s| s.is_empty()) {
            return Err(RankerError::Configuration(format!(
                "skill vocabulary entry {} is empty",
                pos
            )));
        }

        let skill_matcher = AhoCorasick::builder()
            .match_kind(MatchKind::Standard)
            .build(&skills)
            .map_err(|e| RankerError::Configuration(format!("Failed to build skill matcher: {}", e)))?;

        let education = config
            .education
            .iter()
            .map(|rule| {
                let keywords = rule.keywords.iter().map(|k| k.to_lowercase()).collect();
                (rule.degree, keywords)
            })
            .collect();

        Ok(Self {
            skills,
            skill_matcher,
            education,
            resume_experience_patterns: compile_all(&config.resume_experience_patterns)?,
            job_experience_patterns: compile_all(&config.job_experience_patterns)?,
            email_pattern: compile(&config.email_pattern, false)?,
            phone_pattern: compile(&config.phone_pattern, false)?,
        })
    }

    /// Vocabulary skills occurring anywhere in `text_lower`, in vocabulary order
    pub fn find_skills(&self, text_lower: &str) -> Vec<String> {
        let mut found = vec![false; self.skills.len()];
        for mat in self.skill_matcher.find_overlapping_iter(text_lower) {
            found[mat.pattern().as_usize()] = true;
        }

        self.skills
            .iter()
            .zip(found)
            .filter(|(_, hit)| *hit)
            .map(|(skill, _)| skill.clone())
            .collect()
    }

    pub fn education_rules(&self) -> &[(Education, Vec<String>)] {
        &self.education
    }

    pub fn resume_experience_patterns(&self) -> &[Regex] {
        &self.resume_experience_patterns
    }

    pub fn job_experience_patterns(&self) -> &[Regex] {
        &self.job_experience_patterns
    }

    pub fn email_pattern(&self) -> &Regex {
        &self.email_pattern
    }

    pub fn phone_pattern(&self) -> &Regex {
        &self.phone_pattern
    }
}

impl Default for ExtractionRules {
    fn default() -> Self {
        Self::from_config(&ExtractionConfig::default()).expect("default extraction rules are valid")
    }
}

fn compile(pattern: &str, case_insensitive: bool) -> Result<Regex> {
    let source = if case_insensitive {
        format!("(?i){}", pattern)
    } else {
        pattern.to_string()
    };

    Regex::new(&source)
        .map_err(|e| RankerError::Configuration(format!("Invalid pattern '{}': {}", pattern, e)))
}

fn compile_all(patterns: &[String]) -> Result<Vec<Regex>> {
    patterns.iter().map(|p| compile(p, true)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_skills_keeps_vocabulary_order() {
        let rules = ExtractionRules::default();
        let found = rules.find_skills("sql, python and some deep learning with pytorch");

        assert_eq!(found, vec!["python", "sql", "deep learning", "pytorch"]);
    }

    #[test]
    fn test_find_skills_matches_overlapping_substrings() {
        let rules = ExtractionRules::default();
        let found = rules.find_skills("javascript");

        assert!(found.contains(&"java".to_string()));
        assert!(found.contains(&"javascript".to_string()));
    }

    #[test]
    fn test_invalid_pattern_is_configuration_error() {
        let mut config = ExtractionConfig::default();
        config.job_experience_patterns.push("(unclosed".into());

        let result = ExtractionRules::from_config(&config);
        assert!(matches!(result, Err(RankerError::Configuration(_))));
    }

    #[test]
    fn test_empty_skill_entry_rejected() {
        let mut config = ExtractionConfig::default();
        config.skills.push("  ".into());

        assert!(ExtractionRules::from_config(&config).is_err());
    }

    #[test]
    fn test_custom_vocabulary() {
        let config = ExtractionConfig {
            skills: vec!["Rust".into(), "Tokio".into()],
            ..ExtractionConfig::default()
        };
        let rules = ExtractionRules::from_config(&config).unwrap();

        assert_eq!(rules.find_skills("async rust on tokio"), vec!["rust", "tokio"]);
    }
}
