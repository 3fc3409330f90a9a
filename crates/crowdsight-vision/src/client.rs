//! Remote prediction HTTP client.

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use tracing::{debug, warn};

use crowdsight_models::PredictionResponse;

use crate::config::VisionConfig;
use crate::error::{VisionError, VisionResult};

/// Remote prediction provider.
///
/// Two operations, one per input kind, both returning the same detection-list
/// envelope. The API layer holds a `dyn Predictor` so the concrete provider
/// can be swapped or mocked without touching classification logic.
#[async_trait]
pub trait Predictor: Send + Sync {
    /// Predict from raw image bytes.
    async fn predict_bytes(&self, image: Vec<u8>) -> VisionResult<PredictionResponse>;

    /// Predict from an image URL the remote service fetches itself.
    async fn predict_url(&self, image_url: &str) -> VisionResult<PredictionResponse>;
}

/// HTTP client for the configured prediction endpoint.
pub struct VisionClient {
    http: Client,
    config: VisionConfig,
}

impl VisionClient {
    /// Create a new client.
    pub fn new(config: VisionConfig) -> VisionResult<Self> {
        let http = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(VisionError::Network)?;

        Ok(Self { http, config })
    }

    /// Create from environment variables.
    pub fn from_env() -> VisionResult<Self> {
        Self::new(VisionConfig::from_env())
    }

    /// Parse a successful response or surface the upstream failure verbatim.
    async fn read_response(response: reqwest::Response) -> VisionResult<PredictionResponse> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(status = %status, "prediction service returned an error");
            return Err(VisionError::Upstream {
                status: status.as_u16(),
                body,
            });
        }

        let body = response.text().await.map_err(VisionError::Network)?;
        let prediction: PredictionResponse = serde_json::from_str(&body)?;
        Ok(prediction)
    }
}

#[async_trait]
impl Predictor for VisionClient {
    async fn predict_bytes(&self, image: Vec<u8>) -> VisionResult<PredictionResponse> {
        let url = self.config.prediction_url();
        debug!(bytes = image.len(), "sending byte prediction request");

        let response = self
            .http
            .post(&url)
            .header("Prediction-Key", &self.config.prediction_key)
            .header(CONTENT_TYPE, "application/octet-stream")
            .body(image)
            .send()
            .await
            .map_err(VisionError::Network)?;

        Self::read_response(response).await
    }

    async fn predict_url(&self, image_url: &str) -> VisionResult<PredictionResponse> {
        let url = self.config.prediction_url();
        debug!(image_url, "sending URL prediction request");

        // The service expects a capital-U "Url" key.
        let response = self
            .http
            .post(&url)
            .header("Prediction-Key", &self.config.prediction_key)
            .json(&serde_json::json!({ "Url": image_url }))
            .send()
            .await
            .map_err(VisionError::Network)?;

        Self::read_response(response).await
    }
}
