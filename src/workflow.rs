//! Document loading shared by the CLI commands

use crate::error::Result;
use crate::extraction::FactExtractor;
use crate::input::InputManager;
use crate::processing::document::{JobFacts, ResumeFacts};
use crate::processing::ranking::Candidate;
use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, info};
use std::path::Path;

/// Reads documents from disk and extracts their facts
pub struct DocumentLoader {
    input: InputManager,
    extractor: FactExtractor,
}

impl DocumentLoader {
    pub fn new(extractor: FactExtractor) -> Self {
        Self {
            input: InputManager::new(),
            extractor,
        }
    }

    pub async fn read_text(&mut self, path: &Path) -> Result<String> {
        self.input.extract_text(path).await
    }

    pub async fn load_job(&mut self, path: &Path) -> Result<JobFacts> {
        let text = self.input.extract_text(path).await?;
        self.extractor.extract_job(&text)
    }

    pub async fn load_resume(&mut self, path: &Path) -> Result<ResumeFacts> {
        let text = self.input.extract_text(path).await?;
        self.extractor.extract_resume(&text)
    }

    /// Load every supported resume in `dir`.
    ///
    /// A resume that cannot be read or extracted still yields a candidate,
    /// carrying the error so the ranking can report it as skipped.
    pub async fn load_candidates(&mut self, dir: &Path, progress: &ProgressBar) -> Result<Vec<Candidate>> {
        let paths = self.input.list_documents(dir).await?;
        info!("Found {} resumes in {}", paths.len(), dir.display());

        progress.set_length(paths.len() as u64);
        let mut candidates = Vec::with_capacity(paths.len());

        for path in paths {
            let id = candidate_id(&path);
            progress.set_message(id.clone());

            let facts = self.load_resume(&path).await;
            if let Err(e) = &facts {
                debug!("Extraction failed for {}: {}", id, e);
            }
            candidates.push(Candidate::new(id, facts));
            progress.inc(1);
        }

        progress.finish_and_clear();
        Ok(candidates)
    }
}

/// Progress bar for resume extraction, hidden when not attached to a terminal
pub fn extraction_progress() -> ProgressBar {
    let bar = ProgressBar::new(0);
    if let Ok(style) = ProgressStyle::with_template("{spinner} [{bar:30}] {pos}/{len} {msg}") {
        bar.set_style(style.progress_chars("=> "));
    }
    bar
}

/// Candidates are identified by their file name
pub fn candidate_id(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}
