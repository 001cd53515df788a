use thiserror::Error;
use tracing::{debug, info};

use super::annotate;
use crate::classifier::{ClassifierError, ClassifierPort};
use crate::models::{LabelSet, Utterance};

/// A hard failure while annotating one utterance; aborts the whole run
#[derive(Debug, Error)]
pub enum ProcessError {
    /// The classifier port failed for the identified utterance
    #[error("classification failed for utterance {index} (speaker {speaker:?}): {source}")]
    Classification {
        index: usize,
        speaker: String,
        #[source]
        source: ClassifierError,
    },
    /// The identified utterance cannot be classified
    #[error("utterance {index} (speaker {speaker:?}) has an empty message")]
    EmptyMessage { index: usize, speaker: String },
}

/// Annotate every utterance attributed to the monitored speaker.
///
/// Utterances are visited strictly in their original order and the output
/// preserves that order. Utterances from other speakers pass through
/// untouched. A failure on any monitored utterance aborts the run; no
/// partial transcript is returned.
pub async fn process<C: ClassifierPort + ?Sized>(
    utterances: Vec<Utterance>,
    monitored_speaker: &str,
    sentiment_labels: &LabelSet,
    intention_labels: &LabelSet,
    classifier: &C,
) -> Result<Vec<Utterance>, ProcessError> {
    let mut annotated = Vec::with_capacity(utterances.len());
    let mut monitored = 0usize;

    for (index, utterance) in utterances.into_iter().enumerate() {
        if utterance.speaker != monitored_speaker {
            debug!(
                "utterance {index}: speaker {:?} not monitored, passing through",
                utterance.speaker
            );
            annotated.push(utterance);
            continue;
        }

        if utterance.message.trim().is_empty() {
            return Err(ProcessError::EmptyMessage {
                index,
                speaker: utterance.speaker,
            });
        }

        let annotation = annotate(
            &utterance.message,
            sentiment_labels,
            intention_labels,
            classifier,
        )
        .await
        .map_err(|source| ProcessError::Classification {
            index,
            speaker: utterance.speaker.clone(),
            source,
        })?;

        debug!(
            "utterance {index}: sentiment {:?}, intentions {:?}",
            annotation.sentiment, annotation.intentions
        );
        annotated.push(utterance.with_annotation(annotation));
        monitored += 1;
    }

    info!("Annotated {} of {} utterances", monitored, annotated.len());

    Ok(annotated)
}
