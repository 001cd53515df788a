use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::{ClassifierError, ClassifierPort, ScoringMode};
use crate::models::{LabelSet, ScoredLabel};

const DEFAULT_BASE_URL: &str = "https://api-inference.huggingface.co/models";

/// Configuration for the Hugging Face zero-shot inference client
#[derive(Debug, Clone)]
pub struct HfInferenceConfig {
    /// API token (from HF_API_TOKEN env var)
    pub api_token: String,
    /// Zero-shot model to query (e.g. "facebook/bart-large-mnli")
    pub model: String,
    /// Inference endpoint base URL
    pub base_url: String,
}

impl HfInferenceConfig {
    /// Create config from environment variables
    pub fn from_env(model: impl Into<String>) -> Result<Self> {
        let api_token = std::env::var("HF_API_TOKEN")
            .context("HF_API_TOKEN environment variable not set")?;

        Ok(Self {
            api_token,
            model: model.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
        })
    }

    /// Create with custom settings
    pub fn new(api_token: String, model: String) -> Self {
        Self {
            api_token,
            model,
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }
}

/// Zero-shot classification client backed by the Hugging Face inference API
pub struct HfInferenceClient {
    client: Client,
    config: HfInferenceConfig,
}

impl HfInferenceClient {
    pub fn new(config: HfInferenceConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    async fn request(&self, request: &ZeroShotRequest) -> Result<ZeroShotResponse, ClassifierError> {
        let url = format!("{}/{}", self.config.base_url, self.config.model);

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.config.api_token)
            .header("content-type", "application/json")
            .json(request)
            .send()
            .await
            .map_err(|e| ClassifierError::Transport(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(ClassifierError::Api { status, body });
        }

        response
            .json()
            .await
            .map_err(|e| ClassifierError::Malformed(e.to_string()))
    }
}

#[async_trait]
impl ClassifierPort for HfInferenceClient {
    async fn classify(
        &self,
        text: &str,
        labels: &LabelSet,
        mode: ScoringMode,
    ) -> Result<Vec<ScoredLabel>, ClassifierError> {
        let request = ZeroShotRequest {
            inputs: text.to_string(),
            parameters: ZeroShotParameters {
                candidate_labels: labels.labels().to_vec(),
                multi_label: mode == ScoringMode::MultiLabel,
            },
        };

        let response = self.request(&request).await?;
        ranked_scores(response, labels)
    }
}

#[derive(Debug, Serialize)]
struct ZeroShotRequest {
    inputs: String,
    parameters: ZeroShotParameters,
}

#[derive(Debug, Serialize)]
struct ZeroShotParameters {
    candidate_labels: Vec<String>,
    multi_label: bool,
}

#[derive(Debug, Deserialize)]
struct ZeroShotResponse {
    labels: Vec<String>,
    scores: Vec<f64>,
}

/// Pair up the response arrays and check the ranking is usable
fn ranked_scores(
    response: ZeroShotResponse,
    candidates: &LabelSet,
) -> Result<Vec<ScoredLabel>, ClassifierError> {
    if response.labels.is_empty() {
        return Err(ClassifierError::EmptyResult);
    }

    if response.labels.len() != response.scores.len() {
        return Err(ClassifierError::Malformed(format!(
            "{} labels but {} scores",
            response.labels.len(),
            response.scores.len()
        )));
    }

    if response.labels.len() != candidates.labels().len() {
        return Err(ClassifierError::Malformed(format!(
            "expected {} candidates, got {}",
            candidates.labels().len(),
            response.labels.len()
        )));
    }

    response
        .labels
        .into_iter()
        .zip(response.scores)
        .map(|(label, score)| {
            if !candidates.contains(&label) {
                return Err(ClassifierError::Malformed(format!(
                    "unknown label {label:?} in response"
                )));
            }
            if !(0.0..=1.0).contains(&score) {
                return Err(ClassifierError::Malformed(format!(
                    "score {score} out of range for label {label:?}"
                )));
            }
            Ok(ScoredLabel { label, score })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidates() -> LabelSet {
        LabelSet::new(["refund", "complaint", "praise"]).unwrap()
    }

    #[test]
    fn test_ranked_scores_valid_response() {
        let response: ZeroShotResponse = serde_json::from_str(
            r#"{
                "sequence": "I want my money back",
                "labels": ["refund", "complaint", "praise"],
                "scores": [0.97, 0.2, 0.05]
            }"#,
        )
        .unwrap();

        let ranked = ranked_scores(response, &candidates()).unwrap();

        assert_eq!(ranked.len(), 3);
        assert_eq!(ranked[0].label, "refund");
        assert_eq!(ranked[0].score, 0.97);
    }

    #[test]
    fn test_ranked_scores_empty_response() {
        let response = ZeroShotResponse {
            labels: vec![],
            scores: vec![],
        };

        let err = ranked_scores(response, &candidates()).unwrap_err();
        assert!(matches!(err, ClassifierError::EmptyResult));
    }

    #[test]
    fn test_ranked_scores_length_mismatch() {
        let response = ZeroShotResponse {
            labels: vec!["refund".to_string(), "complaint".to_string()],
            scores: vec![0.9],
        };

        let err = ranked_scores(response, &candidates()).unwrap_err();
        assert!(matches!(err, ClassifierError::Malformed(_)));
    }

    #[test]
    fn test_ranked_scores_missing_candidate() {
        let response = ZeroShotResponse {
            labels: vec!["refund".to_string(), "complaint".to_string()],
            scores: vec![0.9, 0.1],
        };

        let err = ranked_scores(response, &candidates()).unwrap_err();
        assert!(matches!(err, ClassifierError::Malformed(_)));
    }

    #[test]
    fn test_ranked_scores_unknown_label() {
        let response = ZeroShotResponse {
            labels: vec![
                "refund".to_string(),
                "complaint".to_string(),
                "greeting".to_string(),
            ],
            scores: vec![0.9, 0.1, 0.05],
        };

        let err = ranked_scores(response, &candidates()).unwrap_err();
        assert!(matches!(err, ClassifierError::Malformed(_)));
    }

    #[test]
    fn test_ranked_scores_out_of_range() {
        let response = ZeroShotResponse {
            labels: vec![
                "refund".to_string(),
                "complaint".to_string(),
                "praise".to_string(),
            ],
            scores: vec![1.4, 0.1, 0.05],
        };

        let err = ranked_scores(response, &candidates()).unwrap_err();
        assert!(matches!(err, ClassifierError::Malformed(_)));
    }
}
