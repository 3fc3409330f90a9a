//! Anomaly-classification handler.

use axum::extract::{Multipart, State};
use axum::Json;
use tracing::info;

use crowdsight_models::{assess_anomaly, AnomalyAssessment, SIGNIFICANCE_THRESHOLD};

use crate::error::ApiResult;
use crate::handlers::humans::read_image_field;
use crate::metrics;
use crate::state::AppState;

/// `POST /predict/` — classify an uploaded image as anomalous or not.
///
/// Detections of any tag with probability above 0.65 feed the decision table;
/// everything below the threshold is discarded before classification.
pub async fn predict(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> ApiResult<Json<AnomalyAssessment>> {
    let image_bytes = read_image_field(&mut multipart).await?;

    let prediction = state.predictor.predict_bytes(image_bytes).await?;
    metrics::record_prediction_call("bytes");

    let significant: Vec<_> = prediction
        .predictions
        .into_iter()
        .filter(|d| d.probability > SIGNIFICANCE_THRESHOLD)
        .collect();

    let assessment = assess_anomaly(&significant);
    info!(
        anomaly = assessment.anomaly,
        reason = %assessment.reason,
        "anomaly assessment complete"
    );

    Ok(Json(assessment))
}
