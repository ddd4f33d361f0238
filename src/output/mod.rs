//! Output formatting and report generation

pub mod formatter;
pub mod report;

pub use formatter::{save_report_to_file, suggest_filename, ReportGenerator};
pub use report::{load_scores, MatchReport, RankingReport, ReportMetadata};
