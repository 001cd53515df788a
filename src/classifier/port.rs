use async_trait::async_trait;
use thiserror::Error;

use crate::models::{LabelSet, ScoredLabel};

/// How candidate labels compete for a score
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoringMode {
    /// Labels are mutually exclusive; scores form a ranking and the top one wins
    SingleLabel,
    /// Each label is scored independently; several may clear a threshold
    MultiLabel,
}

/// Errors surfaced by a classifier backend
#[derive(Debug, Error)]
pub enum ClassifierError {
    /// The backend could not be reached
    #[error("classifier transport failure: {0}")]
    Transport(String),
    /// The backend answered with a non-success status
    #[error("classifier API error: {status} - {body}")]
    Api { status: u16, body: String },
    /// The backend answered with output this crate cannot use
    #[error("malformed classifier output: {0}")]
    Malformed(String),
    /// The backend scored zero candidates
    #[error("classifier returned an empty result")]
    EmptyResult,
}

/// A zero-shot text classification capability.
///
/// Implementations score `text` against every candidate in `labels` and
/// return one entry per candidate, ranked by descending score. Scores are
/// confidences in 0.0-1.0; in multi-label mode they are independent per
/// label rather than a distribution.
#[async_trait]
pub trait ClassifierPort: Send + Sync {
    async fn classify(
        &self,
        text: &str,
        labels: &LabelSet,
        mode: ScoringMode,
    ) -> Result<Vec<ScoredLabel>, ClassifierError>;
}
