//! Fact extraction from raw resume and job description text

pub mod rules;

use crate::error::{RankerError, Result};
use crate::processing::document::{Education, JobFacts, ResumeFacts};
use log::debug;
use regex::Regex;
use rules::ExtractionRules;

/// Turns raw text into the structured facts the matcher consumes
pub struct FactExtractor {
    rules: ExtractionRules,
}

impl FactExtractor {
    pub fn new(rules: ExtractionRules) -> Self {
        Self { rules }
    }

    pub fn extract_resume(&self, raw_text: &str) -> Result<ResumeFacts> {
        ensure_readable(raw_text)?;
        let text_lower = raw_text.to_lowercase();

        let skills = self.rules.find_skills(&text_lower);
        let experience_years = first_capture(self.rules.resume_experience_patterns(), raw_text);
        let education = self.extract_education(&text_lower);
        let email = first_match(self.rules.email_pattern(), raw_text);
        let phone = first_match(self.rules.phone_pattern(), raw_text);

        debug!(
            "Resume facts: {} skills, {} years, {}",
            skills.len(),
            experience_years,
            education
        );

        Ok(ResumeFacts::new(raw_text, skills, experience_years)
            .with_education(education)
            .with_contact(email, phone))
    }

    pub fn extract_job(&self, raw_text: &str) -> Result<JobFacts> {
        ensure_readable(raw_text)?;
        let text_lower = raw_text.to_lowercase();

        let required_skills = self.rules.find_skills(&text_lower);
        let required_experience_years = first_capture(self.rules.job_experience_patterns(), raw_text);

        debug!(
            "Job facts: {} required skills, {} years",
            required_skills.len(),
            required_experience_years
        );

        Ok(JobFacts::new(raw_text, required_skills, required_experience_years))
    }

    fn extract_education(&self, text_lower: &str) -> Education {
        self.rules
            .education_rules()
            .iter()
            .find(|(_, keywords)| keywords.iter().any(|k| text_lower.contains(k.as_str())))
            .map_or(Education::NotSpecified, |(degree, _)| *degree)
    }
}

impl Default for FactExtractor {
    fn default() -> Self {
        Self::new(ExtractionRules::default())
    }
}

fn ensure_readable(raw_text: &str) -> Result<()> {
    if raw_text.trim().is_empty() {
        Err(RankerError::Extraction("document contains no readable text".into()))
    } else {
        Ok(())
    }
}

/// First capture group of the first pattern that matches, as whole years.
/// Digit runs too large for `u32` saturate at `u32::MAX`.
fn first_capture(patterns: &[Regex], text: &str) -> u32 {
    patterns
        .iter()
        .find_map(|pattern| pattern.captures(text))
        .and_then(|caps| caps.get(1))
        .and_then(|m| parse_years(m.as_str()))
        .unwrap_or(0)
}

fn parse_years(digits: &str) -> Option<u32> {
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    Some(digits.parse().unwrap_or(u32::MAX))
}

fn first_match(pattern: &Regex, text: &str) -> Option<String> {
    pattern.find(text).map(|m| m.as_str().trim().to_string())
}
