//! Human-counting handlers.

use axum::extract::{Multipart, State};
use axum::Json;
use serde::Deserialize;
use tracing::info;

use crowdsight_media::{annotate_detections, decode_image};
use crowdsight_models::{
    classify_upload_count, classify_url_count, count_people, filter_people, CrowdAssessment,
    UPLOAD_PERSON_THRESHOLD, URL_PERSON_THRESHOLD,
};

use crate::error::{ApiError, ApiResult};
use crate::metrics;
use crate::state::AppState;

/// Multipart field carrying the uploaded image.
const IMAGE_FIELD: &str = "image";

/// Read the `image` field from a multipart upload.
pub(crate) async fn read_image_field(multipart: &mut Multipart) -> ApiResult<Vec<u8>> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::bad_request(format!("invalid multipart payload: {e}")))?
    {
        if field.name() == Some(IMAGE_FIELD) {
            let bytes = field
                .bytes()
                .await
                .map_err(|e| ApiError::bad_request(format!("failed to read image field: {e}")))?;

            if bytes.is_empty() {
                return Err(ApiError::bad_request("image field is empty"));
            }
            return Ok(bytes.to_vec());
        }
    }

    Err(ApiError::bad_request("missing multipart field \"image\""))
}

/// `POST /detect-humans/` — count people in an uploaded image.
///
/// People are detections tagged "person" with probability above 0.80. Every
/// counted detection is outlined on a copy of the image, which is written as
/// a uniquely named artifact and referenced in the response.
pub async fn detect_humans(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> ApiResult<Json<CrowdAssessment>> {
    let image_bytes = read_image_field(&mut multipart).await?;

    let prediction = state.predictor.predict_bytes(image_bytes.clone()).await?;
    metrics::record_prediction_call("bytes");

    let people = filter_people(prediction.predictions, UPLOAD_PERSON_THRESHOLD);

    let mut image = decode_image(&image_bytes)?;
    annotate_detections(&mut image, &people);
    let artifact_path = state.artifacts.save_png(&image)?;

    let human_count = people.len();
    let crowd_category = classify_upload_count(human_count);
    info!(human_count, %crowd_category, "human detection complete");

    Ok(Json(CrowdAssessment {
        human_count,
        crowd_category,
        highlighted_image: Some(artifact_path.display().to_string()),
    }))
}

/// Request body for URL-based human counting.
#[derive(Debug, Deserialize)]
pub struct ImageUrlRequest {
    pub url: String,
}

/// `POST /detect-humans-url/` — count people in an image the remote service
/// fetches itself.
///
/// This path uses the looser 0.50 probability threshold and the three-band
/// category scale; no annotated artifact is produced.
pub async fn detect_humans_url(
    State(state): State<AppState>,
    Json(request): Json<ImageUrlRequest>,
) -> ApiResult<Json<CrowdAssessment>> {
    let prediction = state.predictor.predict_url(&request.url).await?;
    metrics::record_prediction_call("url");

    let human_count = count_people(&prediction.predictions, URL_PERSON_THRESHOLD);
    let crowd_category = classify_url_count(human_count);
    info!(human_count, %crowd_category, url = %request.url, "human detection from URL complete");

    Ok(Json(CrowdAssessment {
        human_count,
        crowd_category,
        highlighted_image: None,
    }))
}
