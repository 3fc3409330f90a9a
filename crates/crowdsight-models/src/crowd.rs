//! Crowd counting and density categorization rules.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::detection::Detection;

/// Minimum probability for a person detection on the byte-upload path.
pub const UPLOAD_PERSON_THRESHOLD: f64 = 0.80;

/// Minimum probability for a person detection on the URL path.
///
/// Deliberately looser than the upload path; both values are part of the
/// external contract and must not be unified.
pub const URL_PERSON_THRESHOLD: f64 = 0.50;

/// Tag the remote predictor assigns to humans.
const PERSON_TAG: &str = "person";

/// Crowd density category.
///
/// The upload path uses the binary `NotCrowded`/`Crowded` scale; the URL path
/// uses the three-band `NotCrowded`/`ModeratelyCrowded`/`HeavilyCrowded` scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CrowdCategory {
    #[serde(rename = "not crowded")]
    NotCrowded,
    #[serde(rename = "moderately crowded")]
    ModeratelyCrowded,
    #[serde(rename = "heavily crowded")]
    HeavilyCrowded,
    #[serde(rename = "crowded")]
    Crowded,
}

impl CrowdCategory {
    /// Returns the category label as it appears on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            CrowdCategory::NotCrowded => "not crowded",
            CrowdCategory::ModeratelyCrowded => "moderately crowded",
            CrowdCategory::HeavilyCrowded => "heavily crowded",
            CrowdCategory::Crowded => "crowded",
        }
    }
}

impl fmt::Display for CrowdCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for CrowdCategory {
    type Err = CategoryParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "not crowded" => Ok(CrowdCategory::NotCrowded),
            "moderately crowded" => Ok(CrowdCategory::ModeratelyCrowded),
            "heavily crowded" => Ok(CrowdCategory::HeavilyCrowded),
            "crowded" => Ok(CrowdCategory::Crowded),
            _ => Err(CategoryParseError(s.to_string())),
        }
    }
}

#[derive(Debug, Error)]
#[error("Unknown crowd category: {0}")]
pub struct CategoryParseError(String);

/// Result of a human-counting request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrowdAssessment {
    /// Number of person detections that survived the probability filter
    pub human_count: usize,
    /// Density label derived from the count
    pub crowd_category: CrowdCategory,
    /// Path of the annotated artifact (byte-upload path only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub highlighted_image: Option<String>,
}

fn is_counted_person(detection: &Detection, min_probability: f64) -> bool {
    detection.is_tag(PERSON_TAG) && detection.probability > min_probability
}

/// Detections tagged "person" (case-insensitive) with probability strictly
/// above `min_probability`. A detection at exactly the threshold is excluded.
pub fn filter_people(detections: Vec<Detection>, min_probability: f64) -> Vec<Detection> {
    detections
        .into_iter()
        .filter(|d| is_counted_person(d, min_probability))
        .collect()
}

/// Count of person detections with probability strictly above `min_probability`.
pub fn count_people(detections: &[Detection], min_probability: f64) -> usize {
    detections
        .iter()
        .filter(|d| is_counted_person(d, min_probability))
        .count()
}

/// Binary categorization used by the byte-upload path.
///
/// A count of 10 is still "not crowded"; the boundary is inclusive on the
/// low side.
pub fn classify_upload_count(human_count: usize) -> CrowdCategory {
    if human_count <= 10 {
        CrowdCategory::NotCrowded
    } else {
        CrowdCategory::Crowded
    }
}

/// Three-band categorization used by the URL path.
pub fn classify_url_count(human_count: usize) -> CrowdCategory {
    match human_count {
        0..=9 => CrowdCategory::NotCrowded,
        10..=18 => CrowdCategory::ModeratelyCrowded,
        _ => CrowdCategory::HeavilyCrowded,
    }
}
