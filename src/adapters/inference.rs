use crate::domain::model::{EncodedImage, Prediction, PredictionSet};
use crate::domain::ports::InferenceClient;
use crate::utils::error::{CropCareError, Result};
use reqwest::Client;
use serde::Serialize;
use std::time::Duration;

pub const DEFAULT_ENDPOINT: &str =
    "https://serverless.roboflow.com/infer/workflows/cropcare-0gpsu/custom-workflow";
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 30;
pub const DEFAULT_RETRY_ATTEMPTS: u32 = 1;
pub const DEFAULT_RETRY_DELAY_MS: u64 = 500;

/// JSON pointer to the prediction list inside a workflow response.
const PREDICTIONS_POINTER: &str = "/outputs/0/predictions/predictions";

const MAX_ERROR_BODY_CHARS: usize = 512;

#[derive(Debug, Clone)]
pub struct InferenceSettings {
    pub endpoint: String,
    pub api_key: String,
    pub timeout: Duration,
    /// Extra attempts after the first one.
    pub retry_attempts: u32,
    pub retry_delay: Duration,
}

impl InferenceSettings {
    pub fn new(endpoint: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            api_key: api_key.into(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECONDS),
            retry_attempts: DEFAULT_RETRY_ATTEMPTS,
            retry_delay: Duration::from_millis(DEFAULT_RETRY_DELAY_MS),
        }
    }
}

#[derive(Debug, Serialize)]
struct InferenceRequest<'a> {
    api_key: &'a str,
    inputs: RequestInputs<'a>,
}

#[derive(Debug, Serialize)]
struct RequestInputs<'a> {
    image: ImagePayload<'a>,
}

#[derive(Debug, Serialize)]
struct ImagePayload<'a> {
    #[serde(rename = "type")]
    kind: &'static str,
    value: &'a str,
}

/// Client for a hosted inference workflow reached over HTTP.
pub struct HttpInferenceClient {
    settings: InferenceSettings,
    client: Client,
}

impl HttpInferenceClient {
    pub fn new(settings: InferenceSettings) -> Self {
        Self {
            settings,
            client: Client::new(),
        }
    }

    pub fn settings(&self) -> &InferenceSettings {
        &self.settings
    }

    async fn send_once(&self, image: &EncodedImage) -> Result<PredictionSet> {
        let body = InferenceRequest {
            api_key: &self.settings.api_key,
            inputs: RequestInputs {
                image: ImagePayload {
                    kind: "base64",
                    value: &image.base64,
                },
            },
        };

        tracing::debug!(
            "📡 Posting {} bytes of image data to {}",
            image.byte_len,
            self.settings.endpoint
        );

        let response = self
            .client
            .post(&self.settings.endpoint)
            .json(&body)
            .timeout(self.settings.timeout)
            .send()
            .await?;

        let status = response.status();
        tracing::debug!("📡 Inference response status: {}", status);
        let text = response.text().await?;

        if !status.is_success() {
            return Err(CropCareError::ServiceStatus {
                status: status.as_u16(),
                body: text.chars().take(MAX_ERROR_BODY_CHARS).collect(),
            });
        }

        let json: serde_json::Value =
            serde_json::from_str(&text).map_err(|e| CropCareError::MalformedResponse {
                message: e.to_string(),
            })?;

        Ok(extract_predictions(&json))
    }
}

#[async_trait::async_trait]
impl InferenceClient for HttpInferenceClient {
    async fn predict(&self, image: &EncodedImage) -> Result<PredictionSet> {
        let max_attempts = self.settings.retry_attempts.saturating_add(1);
        let mut attempt = 0;

        loop {
            attempt += 1;
            match self.send_once(image).await {
                Ok(predictions) => {
                    tracing::info!("📡 Received {} predictions", predictions.len());
                    return Ok(predictions);
                }
                Err(e) if attempt < max_attempts && e.is_retryable() => {
                    tracing::warn!(
                        "📡 Inference attempt {}/{} failed: {}, retrying in {:?}",
                        attempt,
                        max_attempts,
                        e,
                        self.settings.retry_delay
                    );
                    tokio::time::sleep(self.settings.retry_delay).await;
                }
                Err(e) => {
                    tracing::error!("📡 Inference failed after {} attempt(s): {}", attempt, e);
                    return Err(e);
                }
            }
        }
    }
}

/// Pulls the prediction list out of a workflow response. A missing path yields
/// an empty set, and entries without a string `class` and numeric
/// `confidence` are skipped.
pub fn extract_predictions(body: &serde_json::Value) -> PredictionSet {
    let Some(items) = body.pointer(PREDICTIONS_POINTER).and_then(|v| v.as_array()) else {
        tracing::debug!("Response has no {} array", PREDICTIONS_POINTER);
        return PredictionSet::empty();
    };

    let predictions: Vec<Prediction> = items
        .iter()
        .filter_map(|item| {
            let class_label = item.get("class").and_then(|v| v.as_str());
            let confidence = item.get("confidence").and_then(|v| v.as_f64());
            match (class_label, confidence) {
                (Some(class_label), Some(confidence)) => {
                    Some(Prediction::new(class_label, confidence))
                }
                _ => {
                    tracing::warn!("Skipping malformed prediction entry: {}", item);
                    None
                }
            }
        })
        .collect();

    PredictionSet::new(predictions)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_extract_predictions_from_workflow_output() {
        let body = json!({
            "outputs": [{
                "predictions": {
                    "image": {"width": 640, "height": 640},
                    "predictions": [
                        {"class": "Potato___Late_blight", "confidence": 0.92, "class_id": 7},
                        {"class": "Potato___Early_blight", "confidence": 0.05, "class_id": 5}
                    ]
                }
            }]
        });

        let set = extract_predictions(&body);
        assert_eq!(set.len(), 2);
        assert_eq!(set.predictions[0], Prediction::new("Potato___Late_blight", 0.92));
    }

    #[test]
    fn test_missing_path_is_empty() {
        let bodies = [
            json!({}),
            json!({"outputs": []}),
            json!({"outputs": [{}]}),
            json!({"outputs": [{"predictions": {}}]}),
            json!({"outputs": [{"predictions": {"predictions": "oops"}}]}),
            json!(null),
        ];

        for body in bodies {
            assert!(extract_predictions(&body).is_empty(), "{} should be empty", body);
        }
    }

    #[test]
    fn test_malformed_entries_are_skipped() {
        let body = json!({
            "outputs": [{"predictions": {"predictions": [
                {"class": "Tomato___Leaf_Mold"},
                {"confidence": 0.9},
                {"class": 12, "confidence": 0.9},
                {"class": "Tomato___healthy", "confidence": "0.9"},
                {"class": "Corn___Common_rust", "confidence": 0.71}
            ]}}]
        });

        let set = extract_predictions(&body);
        assert_eq!(set.predictions, vec![Prediction::new("Corn___Common_rust", 0.71)]);
    }

    #[test]
    fn test_request_wire_format() {
        let body = InferenceRequest {
            api_key: "secret",
            inputs: RequestInputs {
                image: ImagePayload {
                    kind: "base64",
                    value: "bGVhZg==",
                },
            },
        };

        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            json!({
                "api_key": "secret",
                "inputs": {"image": {"type": "base64", "value": "bGVhZg=="}}
            })
        );
    }

    #[test]
    fn test_default_settings() {
        let settings = InferenceSettings::new(DEFAULT_ENDPOINT, "key");
        assert_eq!(settings.timeout, Duration::from_secs(30));
        assert_eq!(settings.retry_attempts, 1);
        assert_eq!(settings.retry_delay, Duration::from_millis(500));
    }
}
