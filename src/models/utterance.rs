use serde::{Deserialize, Serialize};

/// A single turn in the dialogue
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Utterance {
    /// Speaker role identifier (e.g. "client", "agent")
    pub speaker: String,
    /// The spoken text - immutable, never changed by the pipeline
    pub message: String,
    /// Classification outcome, present only once the utterance has been
    /// annotated; flattened so exported entries carry `sentiment` and
    /// `intentions` at the top level
    #[serde(flatten)]
    pub annotation: Option<Annotation>,
}

/// Sentiment and intentions attached to a monitored utterance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Annotation {
    /// Single-label sentiment decision
    pub sentiment: String,
    /// Intentions that cleared the confidence bar, highest score first; never empty
    pub intentions: Vec<String>,
}

impl Utterance {
    /// Create an unannotated utterance
    pub fn new(speaker: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            speaker: speaker.into(),
            message: message.into(),
            annotation: None,
        }
    }

    /// Whether this utterance has been through classification
    pub fn is_annotated(&self) -> bool {
        self.annotation.is_some()
    }

    /// Attach a classification outcome, consuming the unannotated value
    pub fn with_annotation(self, annotation: Annotation) -> Self {
        Self {
            annotation: Some(annotation),
            ..self
        }
    }
}
