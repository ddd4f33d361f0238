//! Matching and scoring engine

pub mod document;
pub mod text_processor;
pub mod vectorizer;
pub mod skill_matcher;
pub mod experience;
pub mod scoring;
pub mod matcher;
pub mod ranking;
