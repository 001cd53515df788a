use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

use crate::models::Utterance;

/// Machine-readable export of an annotated transcript
#[derive(Debug, Clone, Serialize)]
pub struct AnnotatedTranscript {
    /// Utterances in original order; monitored ones carry their annotation
    pub utterances: Vec<Utterance>,
    /// Metadata about the run
    pub metadata: AnalysisMetadata,
}

#[derive(Debug, Clone, Serialize)]
pub struct AnalysisMetadata {
    pub total_utterances: usize,
    pub annotated_utterances: usize,
    pub monitored_speaker: String,
    pub model: String,
}

impl AnnotatedTranscript {
    /// Wrap a processed utterance sequence for export
    pub fn new(utterances: Vec<Utterance>, monitored_speaker: String, model: String) -> Self {
        let metadata = AnalysisMetadata {
            total_utterances: utterances.len(),
            annotated_utterances: utterances.iter().filter(|u| u.is_annotated()).count(),
            monitored_speaker,
            model,
        };

        Self {
            utterances,
            metadata,
        }
    }

    /// Write to a JSON file
    pub fn write_json(&self, path: &Path) -> Result<()> {
        let file = std::fs::File::create(path)
            .with_context(|| format!("Failed to create file: {:?}", path))?;
        serde_json::to_writer_pretty(file, self).context("Failed to write JSON")?;
        Ok(())
    }
}

/// Human-readable transcript rendering
pub struct ConsoleTranscript<'a> {
    utterances: &'a [Utterance],
}

impl<'a> ConsoleTranscript<'a> {
    pub fn new(utterances: &'a [Utterance]) -> Self {
        Self { utterances }
    }

    /// Format the annotated transcript as readable text.
    ///
    /// Labels are capitalized for display only; the underlying data keeps
    /// them verbatim.
    pub fn format(&self) -> String {
        let mut output = String::new();

        for utterance in self.utterances {
            output.push_str(&format!("{}: {}\n", utterance.speaker, utterance.message));

            if let Some(annotation) = &utterance.annotation {
                let intentions: Vec<String> = annotation
                    .intentions
                    .iter()
                    .map(|label| capitalize(label))
                    .collect();
                output.push_str(&format!(
                    "    sentiment: {}\n",
                    capitalize(&annotation.sentiment)
                ));
                output.push_str(&format!("    intentions: {}\n", intentions.join(", ")));
            }

            output.push('\n');
        }

        output
    }

    /// Write to a text file
    pub fn write_file(&self, path: &Path) -> Result<()> {
        let mut file = std::fs::File::create(path)
            .with_context(|| format!("Failed to create file: {:?}", path))?;
        write!(file, "{}", self.format())?;
        Ok(())
    }
}

/// Uppercase the first character of a label for display
fn capitalize(label: &str) -> String {
    let mut chars = label.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Annotation;

    fn annotated_utterances() -> Vec<Utterance> {
        vec![
            Utterance::new("agent", "Hello, how can I help?"),
            Utterance::new("client", "I want my money back").with_annotation(Annotation {
                sentiment: "angry".to_string(),
                intentions: vec!["refund".to_string(), "complaint".to_string()],
            }),
        ]
    }

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("refund"), "Refund");
        assert_eq!(capitalize("a"), "A");
        assert_eq!(capitalize(""), "");
    }

    #[test]
    fn test_metadata_counts() {
        let transcript = AnnotatedTranscript::new(
            annotated_utterances(),
            "client".to_string(),
            "facebook/bart-large-mnli".to_string(),
        );

        assert_eq!(transcript.metadata.total_utterances, 2);
        assert_eq!(transcript.metadata.annotated_utterances, 1);
    }

    #[test]
    fn test_console_format() {
        let utterances = annotated_utterances();
        let rendered = ConsoleTranscript::new(&utterances).format();

        assert!(rendered.contains("agent: Hello, how can I help?"));
        assert!(rendered.contains("client: I want my money back"));
        assert!(rendered.contains("sentiment: Angry"));
        assert!(rendered.contains("intentions: Refund, Complaint"));
    }

    #[test]
    fn test_console_format_skips_unannotated() {
        let utterances = vec![Utterance::new("agent", "Hello")];
        let rendered = ConsoleTranscript::new(&utterances).format();

        assert!(!rendered.contains("sentiment"));
        assert!(!rendered.contains("intentions"));
    }

    #[test]
    fn test_export_round_trip() {
        let transcript = AnnotatedTranscript::new(
            annotated_utterances(),
            "client".to_string(),
            "facebook/bart-large-mnli".to_string(),
        );

        let json = serde_json::to_value(&transcript).unwrap();

        assert!(json["utterances"][0].get("sentiment").is_none());
        assert_eq!(json["utterances"][1]["sentiment"], "angry");
        assert_eq!(json["metadata"]["monitored_speaker"], "client");
    }
}
