pub mod classifier;
pub mod config;
pub mod io;
pub mod models;
pub mod pipeline;

pub use classifier::{
    ClassifierError, ClassifierPort, HfInferenceClient, HfInferenceConfig, ScoringMode,
};
pub use config::{AnalysisConfig, ConfigError};
pub use io::{
    parse_transcript_file, parse_transcript_json, AnalysisMetadata, AnnotatedTranscript,
    ConsoleTranscript, TranscriptError,
};
pub use models::{Annotation, LabelSet, LabelSetError, ScoredLabel, Utterance};
pub use pipeline::{annotate, process, ProcessError, INTENTION_CONFIDENCE_THRESHOLD};
