//! JSON file implementation of the feedback store

use crate::feedback::traits::{FeedbackRecord, FeedbackResult, FeedbackStore, Relevance};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Feedback store backed by a single JSON array on disk
///
/// Every append rewrites the whole file; a missing file reads as empty.
#[derive(Debug, Clone)]
pub struct JsonFeedbackStore {
    path: PathBuf,
}

impl JsonFeedbackStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn write_all(&self, records: &[FeedbackRecord]) -> FeedbackResult<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(records)?;
        fs::write(&self.path, json)?;
        Ok(())
    }
}

impl FeedbackStore for JsonFeedbackStore {
    fn add_feedback(&mut self, url: &str, text: &str, label: Relevance) -> FeedbackResult<()> {
        let mut records = self.load_feedback()?;
        records.push(FeedbackRecord::new(url, text, label));
        self.write_all(&records)?;

        tracing::info!(
            "Recorded {} feedback for {} ({} records total)",
            label,
            url,
            records.len()
        );
        Ok(())
    }

    fn load_feedback(&self) -> FeedbackResult<Vec<FeedbackRecord>> {
        match fs::read_to_string(&self.path) {
            Ok(content) => Ok(serde_json::from_str(&content)?),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Vec::new()),
            Err(e) => Err(e.into()),
        }
    }
}
