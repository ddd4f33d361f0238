//! TF-IDF vector space fitted per comparison, and cosine similarity over it

use crate::config::VectorizerConfig;
use crate::processing::scoring::round2;
use crate::processing::text_processor::TextProcessor;
use log::debug;
use std::collections::HashMap;

/// Vectorizer settings plus the text pipeline.
///
/// Holds no fitted state. Every call to [`TfidfVectorizer::fit`] builds a new
/// [`FittedSpace`] over exactly the documents passed in, so no vocabulary or
/// IDF weighting ever leaks from one comparison into another.
pub struct TfidfVectorizer {
    config: VectorizerConfig,
    processor: TextProcessor,
}

/// Vocabulary, IDF weights and document vectors of one fit
#[derive(Debug, Clone)]
pub struct FittedSpace {
    /// Alphabetical; a term's position is its vector index
    pub vocabulary: Vec<String>,
    pub idf: Vec<f64>,
    /// One L2-normalized row per input document, in input order
    pub vectors: Vec<Vec<f64>>,
}

impl Default for TfidfVectorizer {
    fn default() -> Self {
        Self::new(VectorizerConfig::default())
    }
}

impl TfidfVectorizer {
    pub fn new(config: VectorizerConfig) -> Self {
        Self {
            config,
            processor: TextProcessor::new(),
        }
    }

    pub fn preprocess(&self, text: &str) -> String {
        self.processor.preprocess(text)
    }

    /// Fit a fresh vector space over `documents`
    pub fn fit<S: AsRef<str>>(&self, documents: &[S]) -> FittedSpace {
        let cfg = &self.config;

        let term_counts: Vec<HashMap<String, usize>> = documents
            .iter()
            .map(|doc| {
                let cleaned = self.processor.preprocess(doc.as_ref());
                let mut counts = HashMap::new();
                for term in self.processor.ngrams(&cleaned, cfg.ngram_min, cfg.ngram_max) {
                    *counts.entry(term).or_insert(0) += 1;
                }
                counts
            })
            .collect();

        let mut document_frequency: HashMap<&str, usize> = HashMap::new();
        let mut corpus_frequency: HashMap<&str, usize> = HashMap::new();
        for counts in &term_counts {
            for (term, count) in counts {
                *document_frequency.entry(term.as_str()).or_insert(0) += 1;
                *corpus_frequency.entry(term.as_str()).or_insert(0) += count;
            }
        }

        let n_docs = documents.len();
        let max_doc_count = self.max_doc_count(n_docs);

        let mut vocabulary: Vec<&str> = document_frequency
            .iter()
            .filter(|(_, df)| {
                let df = **df;
                df >= cfg.min_df && max_doc_count.map_or(true, |max| df as f64 <= max)
            })
            .map(|(term, _)| *term)
            .collect();
        vocabulary.sort_unstable();

        if vocabulary.len() > cfg.max_features {
            // Stable sort keeps alphabetical order among equally frequent terms
            vocabulary.sort_by(|a, b| corpus_frequency[b].cmp(&corpus_frequency[a]));
            vocabulary.truncate(cfg.max_features);
            vocabulary.sort_unstable();
        }

        let index: HashMap<&str, usize> = vocabulary
            .iter()
            .enumerate()
            .map(|(i, term)| (*term, i))
            .collect();

        let idf: Vec<f64> = vocabulary
            .iter()
            .map(|term| {
                let df = document_frequency[term] as f64;
                ((1.0 + n_docs as f64) / (1.0 + df)).ln() + 1.0
            })
            .collect();

        let vectors = term_counts
            .iter()
            .map(|counts| {
                let mut row = vec![0.0; vocabulary.len()];
                for (term, &count) in counts {
                    if let Some(&i) = index.get(term.as_str()) {
                        let tf = if cfg.sublinear_tf {
                            1.0 + (count as f64).ln()
                        } else {
                            count as f64
                        };
                        row[i] = tf * idf[i];
                    }
                }
                l2_normalize(&mut row);
                row
            })
            .collect();

        debug!("Fitted TF-IDF space: {} documents, {} terms", n_docs, vocabulary.len());

        FittedSpace {
            vocabulary: vocabulary.into_iter().map(str::to_string).collect(),
            idf,
            vectors,
        }
    }

    /// Document-count ceiling for a vocabulary term, if one applies.
    ///
    /// The ceiling is only enforced when it still admits a term shared by two
    /// documents. With one or two documents every shared term would exceed it,
    /// leaving nothing to compare.
    fn max_doc_count(&self, n_docs: usize) -> Option<f64> {
        let ceiling = self.config.max_df * n_docs as f64;
        if ceiling >= 2.0 {
            Some(ceiling)
        } else {
            None
        }
    }

    /// Cosine similarity of two texts as a percentage, in a fresh two-document space
    pub fn similarity(&self, text1: &str, text2: &str) -> f64 {
        let space = self.fit(&[text1, text2]);
        as_percentage(cosine_similarity(&space.vectors[0], &space.vectors[1]))
    }

    /// Similarity of each candidate to `reference` within one shared space
    pub fn batch_similarity<S: AsRef<str>>(&self, candidates: &[S], reference: &str) -> Vec<f64> {
        if candidates.is_empty() {
            return Vec::new();
        }

        let mut documents: Vec<&str> = candidates.iter().map(|c| c.as_ref()).collect();
        documents.push(reference);

        let space = self.fit(documents.as_slice());
        let (reference_vector, candidate_vectors) = space
            .vectors
            .split_last()
            .map(|(last, rest)| (last.as_slice(), rest))
            .unwrap_or((&[], &[]));

        candidate_vectors
            .iter()
            .map(|vector| as_percentage(cosine_similarity(vector, reference_vector)))
            .collect()
    }

    /// Highest-weighted terms of a single document; ties keep vocabulary order
    pub fn top_features(&self, text: &str, top_n: usize) -> Vec<(String, f64)> {
        let space = self.fit(&[text]);
        let weights = &space.vectors[0];

        let mut ranked: Vec<usize> = (0..space.vocabulary.len()).collect();
        ranked.sort_by(|&a, &b| weights[b].total_cmp(&weights[a]));

        ranked
            .into_iter()
            .take(top_n)
            .map(|i| (space.vocabulary[i].clone(), weights[i]))
            .collect()
    }
}

/// Cosine of the angle between `a` and `b`; 0 if either has no magnitude
pub fn cosine_similarity(a: &[f64], b: &[f64]) -> f64 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }

    let dot_product: f64 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f64 = a.iter().map(|x| x * x).sum::<f64>().sqrt();
    let norm_b: f64 = b.iter().map(|x| x * x).sum::<f64>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        0.0
    } else {
        dot_product / (norm_a * norm_b)
    }
}

fn as_percentage(cosine: f64) -> f64 {
    round2(cosine.clamp(0.0, 1.0) * 100.0)
}

fn l2_normalize(row: &mut [f64]) {
    let norm = row.iter().map(|x| x * x).sum::<f64>().sqrt();
    if norm > 0.0 {
        row.iter_mut().for_each(|x| *x /= norm);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RESUME: &str = "Experienced Python developer with 5 years of experience in machine learning \
        and data science. Proficient in TensorFlow, PyTorch, and scikit-learn. Built multiple NLP \
        models for text classification and sentiment analysis.";

    const JOB: &str = "Looking for a Machine Learning Engineer with experience in NLP and deep learning. \
        Must have Python programming skills and experience with TensorFlow or PyTorch.";

    #[test]
    fn test_identical_texts_are_fully_similar() {
        let vectorizer = TfidfVectorizer::default();
        assert_eq!(vectorizer.similarity(RESUME, RESUME), 100.0);
        assert_eq!(vectorizer.similarity("rust", "rust"), 100.0);
    }

    #[test]
    fn test_empty_text_has_zero_similarity() {
        let vectorizer = TfidfVectorizer::default();
        assert_eq!(vectorizer.similarity("", JOB), 0.0);
        assert_eq!(vectorizer.similarity(JOB, ""), 0.0);
        assert_eq!(vectorizer.similarity("", ""), 0.0);
        assert_eq!(vectorizer.similarity("the and of", "!!! ???"), 0.0);
    }

    #[test]
    fn test_similarity_is_symmetric_and_bounded() {
        let vectorizer = TfidfVectorizer::default();
        let ab = vectorizer.similarity(RESUME, JOB);
        let ba = vectorizer.similarity(JOB, RESUME);

        assert_eq!(ab, ba);
        assert!(ab > 0.0 && ab < 100.0);
    }

    #[test]
    fn test_unrelated_texts_score_lower() {
        let vectorizer = TfidfVectorizer::default();
        let related = vectorizer.similarity(RESUME, JOB);
        let unrelated = vectorizer.similarity("Java developer with web development skills", JOB);

        assert!(related > unrelated);
    }

    #[test]
    fn test_vocabulary_is_alphabetical_with_bigrams() {
        let vectorizer = TfidfVectorizer::default();
        let space = vectorizer.fit(&["deep learning models", "rust services"]);

        let mut sorted = space.vocabulary.clone();
        sorted.sort();
        assert_eq!(space.vocabulary, sorted);
        assert!(space.vocabulary.contains(&"deep learning".to_string()));
        assert_eq!(space.idf.len(), space.vocabulary.len());
    }

    #[test]
    fn test_max_df_prunes_near_universal_terms_in_larger_batches() {
        let vectorizer = TfidfVectorizer::default();
        let space = vectorizer.fit(&[
            "engineer python",
            "engineer java",
            "engineer sql",
            "engineer docker",
            "engineer aws",
        ]);

        assert!(!space.vocabulary.contains(&"engineer".to_string()));
        assert!(space.vocabulary.contains(&"python".to_string()));
    }

    #[test]
    fn test_max_features_keeps_most_frequent_terms() {
        let config = VectorizerConfig {
            max_features: 2,
            ngram_max: 1,
            ..VectorizerConfig::default()
        };
        let vectorizer = TfidfVectorizer::new(config);
        let space = vectorizer.fit(&["rust rust rust golang golang python"]);

        assert_eq!(space.vocabulary, vec!["golang", "rust"]);
    }

    #[test]
    fn test_batch_similarity_shares_one_space() {
        let vectorizer = TfidfVectorizer::default();
        let resumes = [
            "Python developer with machine learning experience",
            "Java developer with web development skills",
            "Data scientist with NLP and deep learning expertise",
        ];

        let scores = vectorizer.batch_similarity(&resumes, JOB);

        assert_eq!(scores.len(), 3);
        assert!(scores.iter().all(|s| (0.0..=100.0).contains(s)));
        assert!(scores[0] > scores[1]);
    }

    #[test]
    fn test_batch_of_one_matches_pairwise() {
        let vectorizer = TfidfVectorizer::default();
        let batch = vectorizer.batch_similarity(&[RESUME], JOB);
        assert_eq!(batch, vec![vectorizer.similarity(RESUME, JOB)]);
        assert!(vectorizer.batch_similarity::<&str>(&[], JOB).is_empty());
    }

    #[test]
    fn test_top_features_descending() {
        let vectorizer = TfidfVectorizer::new(VectorizerConfig {
            ngram_max: 1,
            ..VectorizerConfig::default()
        });
        let features = vectorizer.top_features("rust rust rust tokio tokio serde", 3);

        assert_eq!(features.len(), 3);
        assert_eq!(features[0].0, "rust");
        assert_eq!(features[1].0, "tokio");
        assert!(features[0].1 > features[1].1);
        assert!(features[1].1 > features[2].1);
    }

    #[test]
    fn test_top_features_ties_follow_vocabulary_order() {
        let vectorizer = TfidfVectorizer::new(VectorizerConfig {
            ngram_max: 1,
            ..VectorizerConfig::default()
        });
        let features = vectorizer.top_features("zebra kotlin apple", 3);
        let terms: Vec<&str> = features.iter().map(|(t, _)| t.as_str()).collect();

        assert_eq!(terms, vec!["apple", "kotlin", "zebra"]);
    }

    #[test]
    fn test_cosine_zero_magnitude() {
        assert_eq!(cosine_similarity(&[0.0, 0.0], &[1.0, 0.0]), 0.0);
        assert_eq!(cosine_similarity(&[], &[]), 0.0);
        assert!((cosine_similarity(&[1.0, 1.0], &[2.0, 2.0]) - 1.0).abs() < 1e-12);
    }
}
