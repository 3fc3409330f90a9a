//! Application state.

use std::sync::Arc;

use crowdsight_media::ArtifactStore;
use crowdsight_vision::{Predictor, VisionClient, VisionConfig};

use crate::config::ApiConfig;
use crate::error::ApiError;

/// Shared application state.
///
/// Everything here is immutable after startup; requests share the predictor
/// and artifact store but no mutable data.
#[derive(Clone)]
pub struct AppState {
    pub config: ApiConfig,
    pub predictor: Arc<dyn Predictor>,
    pub artifacts: ArtifactStore,
}

impl AppState {
    /// Create state from explicit components. Tests use this to inject a mock
    /// predictor and a temporary artifact directory.
    pub fn new(config: ApiConfig, predictor: Arc<dyn Predictor>, artifacts: ArtifactStore) -> Self {
        Self {
            config,
            predictor,
            artifacts,
        }
    }

    /// Create state with the real vision client, configured from the environment.
    pub fn from_env(config: ApiConfig) -> Result<Self, ApiError> {
        let client = VisionClient::new(VisionConfig::from_env())
            .map_err(|e| ApiError::internal(format!("failed to build vision client: {e}")))?;

        Ok(Self::new(
            config,
            Arc::new(client),
            ArtifactStore::from_env(),
        ))
    }
}
