use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::models::{LabelSet, LabelSetError};

/// Errors raised while loading or validating the run configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config file {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("label set `{section}` is invalid: {source}")]
    Labels {
        section: &'static str,
        #[source]
        source: LabelSetError,
    },
    #[error("monitored speaker must not be blank")]
    BlankSpeaker,
}

/// Raw shape of the TOML config file, before validation
#[derive(Debug, Deserialize)]
struct ConfigFile {
    #[serde(default = "default_model")]
    model: String,
    #[serde(default = "default_monitored_speaker")]
    monitored_speaker: String,
    labels: LabelsSection,
}

#[derive(Debug, Deserialize)]
struct LabelsSection {
    sentiments: Vec<String>,
    intentions: Vec<String>,
}

fn default_model() -> String {
    "facebook/bart-large-mnli".to_string()
}

fn default_monitored_speaker() -> String {
    "client".to_string()
}

/// Validated run configuration with label sets ready for classification
#[derive(Debug, Clone)]
pub struct AnalysisConfig {
    /// Zero-shot model identifier passed to the inference backend
    pub model: String,
    /// Speaker role whose utterances get annotated
    pub monitored_speaker: String,
    /// Candidate sentiments, mutually exclusive
    pub sentiment_labels: LabelSet,
    /// Candidate intentions, scored independently
    pub intention_labels: LabelSet,
}

impl AnalysisConfig {
    /// Load and validate a TOML config file.
    ///
    /// Label sets are checked here, before any classification work begins.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let raw: ConfigFile = toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        if raw.monitored_speaker.trim().is_empty() {
            return Err(ConfigError::BlankSpeaker);
        }

        let sentiment_labels = LabelSet::new(raw.labels.sentiments)
            .map_err(|source| ConfigError::Labels {
                section: "sentiments",
                source,
            })?;
        let intention_labels = LabelSet::new(raw.labels.intentions)
            .map_err(|source| ConfigError::Labels {
                section: "intentions",
                source,
            })?;

        Ok(Self {
            model: raw.model,
            monitored_speaker: raw.monitored_speaker,
            sentiment_labels,
            intention_labels,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    fn write_config(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{}", content).unwrap();
        file
    }

    #[test]
    fn test_load_full_config() {
        let file = write_config(
            r#"
            model = "facebook/bart-large-mnli"
            monitored_speaker = "customer"

            [labels]
            sentiments = ["happy", "neutral", "angry"]
            intentions = ["refund", "complaint", "praise"]
            "#,
        );

        let config = AnalysisConfig::from_file(file.path()).unwrap();

        assert_eq!(config.monitored_speaker, "customer");
        assert_eq!(
            config.sentiment_labels.labels(),
            &["happy", "neutral", "angry"]
        );
        assert_eq!(
            config.intention_labels.labels(),
            &["refund", "complaint", "praise"]
        );
    }

    #[test]
    fn test_defaults_applied() {
        let file = write_config(
            r#"
            [labels]
            sentiments = ["happy", "angry"]
            intentions = ["refund"]
            "#,
        );

        let config = AnalysisConfig::from_file(file.path()).unwrap();

        assert_eq!(config.model, "facebook/bart-large-mnli");
        assert_eq!(config.monitored_speaker, "client");
    }

    #[test]
    fn test_empty_label_set_rejected() {
        let file = write_config(
            r#"
            [labels]
            sentiments = []
            intentions = ["refund"]
            "#,
        );

        let err = AnalysisConfig::from_file(file.path()).unwrap_err();

        match err {
            ConfigError::Labels { section, source } => {
                assert_eq!(section, "sentiments");
                assert_eq!(source, LabelSetError::Empty);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_duplicate_label_rejected() {
        let file = write_config(
            r#"
            [labels]
            sentiments = ["happy", "angry"]
            intentions = ["refund", "refund"]
            "#,
        );

        let err = AnalysisConfig::from_file(file.path()).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Labels {
                section: "intentions",
                ..
            }
        ));
    }

    #[test]
    fn test_missing_labels_section_fails_parse() {
        let file = write_config(r#"model = "facebook/bart-large-mnli""#);

        let err = AnalysisConfig::from_file(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn test_blank_monitored_speaker_rejected() {
        let file = write_config(
            r#"
            monitored_speaker = "  "

            [labels]
            sentiments = ["happy"]
            intentions = ["refund"]
            "#,
        );

        let err = AnalysisConfig::from_file(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::BlankSpeaker));
    }
}
