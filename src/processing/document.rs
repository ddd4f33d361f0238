//! Resume and job description facts handed to the matching engine

use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashSet};
use std::fmt;

/// Highest degree detected in a resume
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Education {
    PhD,
    Masters,
    Bachelors,
    NotSpecified,
}

impl Default for Education {
    fn default() -> Self {
        Education::NotSpecified
    }
}

impl fmt::Display for Education {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Education::PhD => write!(f, "PhD"),
            Education::Masters => write!(f, "Masters"),
            Education::Bachelors => write!(f, "Bachelors"),
            Education::NotSpecified => write!(f, "Not specified"),
        }
    }
}

/// Structured facts extracted once per resume. Immutable after construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResumeFacts {
    pub raw_text: String,
    /// Lowercased and deduplicated
    pub skills: BTreeSet<String>,
    pub experience_years: u32,
    pub education: Education,
    pub email: Option<String>,
    pub phone: Option<String>,
}

impl ResumeFacts {
    pub fn new<I, S>(raw_text: impl Into<String>, skills: I, experience_years: u32) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            raw_text: raw_text.into(),
            skills: skills.into_iter().map(|s| s.as_ref().to_lowercase()).collect(),
            experience_years,
            education: Education::NotSpecified,
            email: None,
            phone: None,
        }
    }

    pub fn with_education(mut self, education: Education) -> Self {
        self.education = education;
        self
    }

    pub fn with_contact(mut self, email: Option<String>, phone: Option<String>) -> Self {
        self.email = email;
        self.phone = phone;
        self
    }
}

/// Structured facts extracted once per job description
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobFacts {
    pub raw_text: String,
    /// In skill-vocabulary order
    pub required_skills: Vec<String>,
    /// 0 means no requirement was stated
    pub required_experience_years: u32,
}

impl JobFacts {
    /// Required skills are lowercased and deduplicated, keeping first-seen order
    pub fn new<I, S>(raw_text: impl Into<String>, required_skills: I, required_experience_years: u32) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut seen = HashSet::new();
        let required_skills = required_skills
            .into_iter()
            .map(|s| s.as_ref().to_lowercase())
            .filter(|s| seen.insert(s.clone()))
            .collect();

        Self {
            raw_text: raw_text.into(),
            required_skills,
            required_experience_years,
        }
    }
}
