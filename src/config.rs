//! Configuration management for the candidate ranker

use crate::error::{Result, RankerError};
use crate::processing::document::Education;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub vectorizer: VectorizerConfig,
    pub ranking: RankingConfig,
    pub extraction: ExtractionConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VectorizerConfig {
    pub max_features: usize,
    pub min_df: usize,
    /// Proportion of documents in the comparison set
    pub max_df: f64,
    pub ngram_min: usize,
    pub ngram_max: usize,
    pub sublinear_tf: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankingConfig {
    pub similarity_mode: SimilarityMode,
    pub top_candidates: usize,
    pub gap_report_limit: usize,
}

/// Which vector space a ranking run compares candidates in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SimilarityMode {
    /// One shared space over every candidate plus the job
    Batch,
    /// A fresh two-document space per candidate
    Pairwise,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractionConfig {
    pub skills: Vec<String>,
    pub resume_experience_patterns: Vec<String>,
    pub job_experience_patterns: Vec<String>,
    pub email_pattern: String,
    pub phone_pattern: String,
    /// Checked in order; the first degree with a matching keyword wins
    pub education: Vec<EducationRule>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EducationRule {
    pub degree: Education,
    pub keywords: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub detailed: bool,
    pub color_output: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutputFormat {
    Console,
    Json,
    Markdown,
    Csv,
}

impl Default for VectorizerConfig {
    fn default() -> Self {
        Self {
            max_features: 5000,
            min_df: 1,
            max_df: 0.8,
            ngram_min: 1,
            ngram_max: 2,
            sublinear_tf: true,
        }
    }
}

impl Default for RankingConfig {
    fn default() -> Self {
        Self {
            similarity_mode: SimilarityMode::Batch,
            top_candidates: 3,
            gap_report_limit: 10,
        }
    }
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        let skills = [
            "python", "java", "javascript", "react", "sql", "mongodb",
            "machine learning", "deep learning", "nlp", "tensorflow",
            "pytorch", "docker", "kubernetes", "aws", "git", "agile",
            "data analysis", "pandas", "numpy", "scikit-learn",
        ];

        let education = vec![
            EducationRule {
                degree: Education::PhD,
                keywords: to_strings(&["phd", "ph.d", "doctorate"]),
            },
            EducationRule {
                degree: Education::Masters,
                keywords: to_strings(&["masters", "master", "ms", "m.s", "mba", "m.b.a"]),
            },
            EducationRule {
                degree: Education::Bachelors,
                keywords: to_strings(&["bachelors", "bachelor", "bs", "b.s", "b.tech", "be", "b.e"]),
            },
        ];

        Self {
            skills: to_strings(&skills),
            resume_experience_patterns: to_strings(&[
                r"(\d+)\+?\s*years?\s+(?:of\s+)?experience",
                r"experience\s*:?\s*(\d+)\+?\s*years?",
                r"(\d+)\s*-\s*(\d+)\s*years?",
            ]),
            job_experience_patterns: to_strings(&[
                r"(\d+)\+?\s*years?\s+(?:of\s+)?experience",
                r"minimum\s+(\d+)\s+years?",
                r"at least\s+(\d+)\s+years?",
            ]),
            email_pattern: r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}\b".to_string(),
            phone_pattern: r"(?:\+?\d{1,3}[-.\s]?)?\(?\d{3}\)?[-.\s]?\d{3}[-.\s]?\d{4}".to_string(),
            education,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Console,
            detailed: false,
            color_output: true,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            vectorizer: VectorizerConfig::default(),
            ranking: RankingConfig::default(),
            extraction: ExtractionConfig::default(),
            output: OutputConfig::default(),
        }
    }
}

fn to_strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

impl Config {
    /// Load from the default location, writing defaults on first run
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path())
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: Config = toml::from_str(&content)
                .map_err(|e| RankerError::Configuration(format!("Failed to parse config: {}", e)))?;
            config.validate()?;
            Ok(config)
        } else {
            let config = Self::default();
            config.save_to(path)?;
            Ok(config)
        }
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path())
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| RankerError::Configuration(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
            .join("candidate-ranker")
            .join("config.toml")
    }

    pub fn validate(&self) -> Result<()> {
        let v = &self.vectorizer;
        if v.max_features == 0 {
            return Err(RankerError::Configuration("vectorizer.max_features must be positive".into()));
        }
        if v.min_df == 0 {
            return Err(RankerError::Configuration("vectorizer.min_df must be at least 1".into()));
        }
        if !(v.max_df > 0.0 && v.max_df <= 1.0) {
            return Err(RankerError::Configuration(format!(
                "vectorizer.max_df must be in (0, 1], got {}",
                v.max_df
            )));
        }
        if v.ngram_min == 0 || v.ngram_min > v.ngram_max {
            return Err(RankerError::Configuration(format!(
                "invalid n-gram range ({}, {})",
                v.ngram_min, v.ngram_max
            )));
        }
        if self.extraction.skills.iter().any(|s| s.trim().is_empty()) {
            return Err(RankerError::Configuration("skill vocabulary contains an empty entry".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.vectorizer.max_features, 5000);
        assert_eq!(config.ranking.similarity_mode, SimilarityMode::Batch);
        assert_eq!(config.extraction.skills.len(), 20);
    }

    #[test]
    fn test_load_from_missing_path_writes_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let config = Config::load_from(&path).unwrap();
        assert!(path.exists());
        assert_eq!(config.ranking.top_candidates, 3);

        let reloaded = Config::load_from(&path).unwrap();
        assert_eq!(reloaded.extraction.skills, config.extraction.skills);
        assert_eq!(reloaded.extraction.education[0].degree, Education::PhD);
    }

    #[test]
    fn test_invalid_max_df_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let mut config = Config::default();
        config.vectorizer.max_df = 1.5;
        config.save_to(&path).unwrap();

        let err = Config::load_from(&path).unwrap_err();
        assert!(matches!(err, RankerError::Configuration(_)));
    }

    #[test]
    fn test_zero_min_df_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let mut config = Config::default();
        config.vectorizer.min_df = 0;
        config.save_to(&path).unwrap();

        let err = Config::load_from(&path).unwrap_err();
        assert!(matches!(err, RankerError::Configuration(msg) if msg.contains("min_df")));
    }
}
