use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Validation failure for a candidate label set
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LabelSetError {
    #[error("label set is empty")]
    Empty,
    #[error("label set contains a blank label")]
    Blank,
    #[error("label set contains duplicate label {0:?}")]
    Duplicate(String),
}

/// An ordered set of unique, non-empty candidate labels.
///
/// Constructed once at startup from configuration and passed to every
/// classifier call; a single-candidate set is legal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelSet {
    labels: Vec<String>,
}

impl LabelSet {
    /// Validate and build a label set, preserving the given order
    pub fn new<I, S>(labels: I) -> Result<Self, LabelSetError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let labels: Vec<String> = labels.into_iter().map(Into::into).collect();

        if labels.is_empty() {
            return Err(LabelSetError::Empty);
        }

        let mut seen = HashSet::new();
        for label in &labels {
            if label.trim().is_empty() {
                return Err(LabelSetError::Blank);
            }
            if !seen.insert(label.as_str()) {
                return Err(LabelSetError::Duplicate(label.clone()));
            }
        }

        Ok(Self { labels })
    }

    /// The candidate labels in their configured order
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Whether the given label belongs to this set
    pub fn contains(&self, label: &str) -> bool {
        self.labels.iter().any(|l| l == label)
    }
}

/// A candidate label paired with the classifier's confidence score (0-1)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredLabel {
    pub label: String,
    pub score: f64,
}

impl ScoredLabel {
    pub fn new(label: impl Into<String>, score: f64) -> Self {
        Self {
            label: label.into(),
            score,
        }
    }
}
