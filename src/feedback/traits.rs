//! Feedback store trait and record types

use crate::FeedbackError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Result type for feedback operations
pub type FeedbackResult<T> = Result<T, FeedbackError>;

/// Whether a reader judged a page relevant to their search
///
/// Persisted as the integer `0` or `1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Relevance {
    NotRelevant,
    Relevant,
}

impl TryFrom<u8> for Relevance {
    type Error = FeedbackError;

    fn try_from(label: u8) -> Result<Self, Self::Error> {
        match label {
            0 => Ok(Self::NotRelevant),
            1 => Ok(Self::Relevant),
            other => Err(FeedbackError::InvalidLabel(other)),
        }
    }
}

impl From<Relevance> for u8 {
    fn from(relevance: Relevance) -> Self {
        match relevance {
            Relevance::NotRelevant => 0,
            Relevance::Relevant => 1,
        }
    }
}

impl fmt::Display for Relevance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotRelevant => write!(f, "not relevant"),
            Self::Relevant => write!(f, "relevant"),
        }
    }
}

/// One reader judgement about one page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedbackRecord {
    pub url: String,
    pub text: String,
    pub label: Relevance,
}

impl FeedbackRecord {
    pub fn new(url: impl Into<String>, text: impl Into<String>, label: Relevance) -> Self {
        Self {
            url: url.into(),
            text: text.into(),
            label,
        }
    }
}

/// Append-only store of feedback records
///
/// Records are never modified or removed, and duplicates are accepted.
pub trait FeedbackStore {
    /// Appends one record
    fn add_feedback(&mut self, url: &str, text: &str, label: Relevance) -> FeedbackResult<()>;

    /// Returns every record in insertion order
    fn load_feedback(&self) -> FeedbackResult<Vec<FeedbackRecord>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relevance_from_label() {
        assert_eq!(Relevance::try_from(0).unwrap(), Relevance::NotRelevant);
        assert_eq!(Relevance::try_from(1).unwrap(), Relevance::Relevant);
        assert!(matches!(
            Relevance::try_from(2),
            Err(FeedbackError::InvalidLabel(2))
        ));
    }

    #[test]
    fn test_record_serializes_label_as_integer() {
        let record = FeedbackRecord::new("https://example.com/", "snippet", Relevance::Relevant);
        let json = serde_json::to_string(&record).unwrap();
        assert_eq!(
            json,
            r#"{"url":"https://example.com/","text":"snippet","label":1}"#
        );
    }

    #[test]
    fn test_record_rejects_unknown_label() {
        let json = r#"{"url":"https://example.com/","text":"snippet","label":7}"#;
        assert!(serde_json::from_str::<FeedbackRecord>(json).is_err());
    }
}
