//! Shared data models for the Crowdsight backend.
//!
//! This crate provides Serde-serializable types for:
//! - Detections and bounding boxes returned by the remote predictor
//! - Crowd assessments and density categories
//! - Anomaly assessments
//!
//! plus the pure threshold/counting/classification rules applied to them.
//! Nothing here performs IO; the vision client and the API crate feed these
//! functions and serialize their results.

pub mod anomaly;
pub mod crowd;
pub mod detection;

// Re-export common types
pub use anomaly::{assess_anomaly, AnomalyAssessment, SIGNIFICANCE_THRESHOLD};
pub use crowd::{
    classify_upload_count, classify_url_count, count_people, filter_people, CrowdAssessment,
    CrowdCategory, UPLOAD_PERSON_THRESHOLD, URL_PERSON_THRESHOLD,
};
pub use detection::{BoundingBox, Detection, PixelRect, PredictionResponse};
