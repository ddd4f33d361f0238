//! Candidate ranker library

pub mod cli;
pub mod config;
pub mod error;
pub mod extraction;
pub mod input;
pub mod output;
pub mod processing;
pub mod workflow;

pub use config::Config;
pub use error::{RankerError, Result};
