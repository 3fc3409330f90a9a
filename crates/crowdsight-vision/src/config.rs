//! Vision service configuration.

use std::time::Duration;

/// Configuration for the remote prediction endpoint.
///
/// Constructed once at startup and passed explicitly to the client; nothing
/// reads the environment after this point.
#[derive(Debug, Clone)]
pub struct VisionConfig {
    /// Value sent as the `Prediction-Key` request header
    pub prediction_key: String,
    /// Base endpoint of the vision service
    pub endpoint: String,
    /// Project identifier
    pub project_id: String,
    /// Published iteration name
    pub iteration_name: String,
    /// Full prediction URL; overrides the composed URL when set
    pub url_override: Option<String>,
    /// Request timeout
    pub timeout: Duration,
}

impl Default for VisionConfig {
    fn default() -> Self {
        Self {
            prediction_key: String::new(),
            endpoint: String::new(),
            project_id: String::new(),
            iteration_name: String::new(),
            url_override: None,
            timeout: Duration::from_secs(300),
        }
    }
}

impl VisionConfig {
    /// Create config from environment variables.
    pub fn from_env() -> Self {
        Self {
            prediction_key: std::env::var("PREDICTION_KEY").unwrap_or_default(),
            endpoint: std::env::var("ENDPOINT").unwrap_or_default(),
            project_id: std::env::var("PROJECT_ID").unwrap_or_default(),
            iteration_name: std::env::var("ITERATION_NAME").unwrap_or_default(),
            url_override: std::env::var("PREDICTION_URL").ok(),
            timeout: Duration::from_secs(
                std::env::var("PREDICTION_TIMEOUT_SECS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(300),
            ),
        }
    }

    /// Full prediction URL: the override when present, otherwise composed from
    /// endpoint, project and iteration. Byte and URL payloads both post here.
    pub fn prediction_url(&self) -> String {
        match &self.url_override {
            Some(url) => url.clone(),
            None => format!(
                "{}/customvision/v3.0/Prediction/{}/detect/iterations/{}/image",
                self.endpoint.trim_end_matches('/'),
                self.project_id,
                self.iteration_name
            ),
        }
    }
}
