use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::models::Utterance;

/// Errors raised while reading a transcript file
#[derive(Debug, Error)]
pub enum TranscriptError {
    #[error("failed to read transcript {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse transcript JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("utterance {index} is missing the `{field}` field")]
    MissingField { index: usize, field: &'static str },
}

/// One transcript entry as stored on disk, before shape validation
#[derive(Debug, Deserialize)]
struct RawUtterance {
    #[serde(default)]
    speaker: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

/// Read and validate a transcript JSON file
pub fn parse_transcript_file(path: &Path) -> Result<Vec<Utterance>, TranscriptError> {
    let content = std::fs::read_to_string(path).map_err(|source| TranscriptError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_transcript_json(&content)
}

/// Parse a transcript JSON string into utterances.
///
/// Every entry must carry `speaker` and `message`; the first entry that
/// does not fails the whole parse with its position. Extra fields are
/// ignored.
pub fn parse_transcript_json(json: &str) -> Result<Vec<Utterance>, TranscriptError> {
    let raw: Vec<RawUtterance> = serde_json::from_str(json)?;

    raw.into_iter()
        .enumerate()
        .map(|(index, entry)| {
            let speaker = entry.speaker.ok_or(TranscriptError::MissingField {
                index,
                field: "speaker",
            })?;
            let message = entry.message.ok_or(TranscriptError::MissingField {
                index,
                field: "message",
            })?;
            Ok(Utterance::new(speaker, message))
        })
        .collect()
}
