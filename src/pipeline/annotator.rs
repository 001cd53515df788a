use tracing::debug;

use crate::classifier::{ClassifierError, ClassifierPort, ScoringMode};
use crate::models::{Annotation, LabelSet};

/// Confidence an intention must strictly exceed to be attached
pub const INTENTION_CONFIDENCE_THRESHOLD: f64 = 0.95;

/// Classify one utterance against both label sets.
///
/// Sentiment is decided in single-label mode: the top-ranked candidate
/// wins, with ties resolved by the classifier's own ranking order.
///
/// Intentions are decided in multi-label mode: every candidate whose
/// independent score strictly exceeds [`INTENTION_CONFIDENCE_THRESHOLD`]
/// is kept, in descending score order. When none clears the bar, the
/// single highest-scoring candidate is kept instead, so the result is
/// never empty.
pub async fn annotate<C: ClassifierPort + ?Sized>(
    message: &str,
    sentiment_labels: &LabelSet,
    intention_labels: &LabelSet,
    classifier: &C,
) -> Result<Annotation, ClassifierError> {
    let ranked = classifier
        .classify(message, sentiment_labels, ScoringMode::SingleLabel)
        .await?;
    let sentiment = ranked
        .first()
        .ok_or(ClassifierError::EmptyResult)?
        .label
        .clone();

    let scored = classifier
        .classify(message, intention_labels, ScoringMode::MultiLabel)
        .await?;
    let top = scored.first().ok_or(ClassifierError::EmptyResult)?;

    let mut intentions: Vec<String> = scored
        .iter()
        .filter(|entry| entry.score > INTENTION_CONFIDENCE_THRESHOLD)
        .map(|entry| entry.label.clone())
        .collect();

    if intentions.is_empty() {
        debug!(
            "no intention above {INTENTION_CONFIDENCE_THRESHOLD}, keeping top candidate {:?}",
            top.label
        );
        intentions.push(top.label.clone());
    }

    Ok(Annotation {
        sentiment,
        intentions,
    })
}
