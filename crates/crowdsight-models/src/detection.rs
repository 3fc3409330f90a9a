//! Detection types returned by the remote prediction service.

use serde::{Deserialize, Serialize};

/// A normalized bounding box (0.0 to 1.0) relative to the image dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    /// X coordinate of the top-left corner (0.0 = left, 1.0 = right)
    pub left: f64,
    /// Y coordinate of the top-left corner (0.0 = top, 1.0 = bottom)
    pub top: f64,
    /// Width of the box (0.0 to 1.0)
    pub width: f64,
    /// Height of the box (0.0 to 1.0)
    pub height: f64,
}

impl BoundingBox {
    /// Create a new normalized bounding box.
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// Check if the box is valid (within 0.0-1.0 range).
    pub fn is_valid(&self) -> bool {
        self.left >= 0.0
            && self.top >= 0.0
            && self.width > 0.0
            && self.height > 0.0
            && self.left + self.width <= 1.001 // Allow small epsilon for float precision
            && self.top + self.height <= 1.001
    }

    /// Scale the normalized box to pixel space for an image of the given size.
    pub fn to_pixel_rect(&self, image_width: u32, image_height: u32) -> PixelRect {
        let left = self.left * image_width as f64;
        let top = self.top * image_height as f64;
        PixelRect {
            left,
            top,
            right: left + self.width * image_width as f64,
            bottom: top + self.height * image_height as f64,
        }
    }
}

/// A bounding box scaled to pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PixelRect {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

/// One result item from the remote predictor.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Detection {
    /// Tag assigned by the predictor; casing is not guaranteed
    pub tag_name: String,
    /// Confidence in [0, 1]
    pub probability: f64,
    /// Normalized location within the image
    pub bounding_box: BoundingBox,
}

impl Detection {
    /// Case-insensitive tag comparison.
    pub fn is_tag(&self, tag: &str) -> bool {
        self.tag_name.eq_ignore_ascii_case(tag)
    }
}

/// Response envelope the remote predictor returns for one image.
///
/// Only `predictions` feeds the classification rules; the remaining envelope
/// fields are tolerated so real service payloads parse cleanly.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictionResponse {
    pub predictions: Vec<Detection>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iteration: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_service_payload() {
        let payload = r#"{
            "id": "7f4e0a2b",
            "project": "crowd-project",
            "iteration": "Iteration3",
            "created": "2024-05-01T12:00:00Z",
            "predictions": [
                {
                    "tagName": "Person",
                    "probability": 0.91,
                    "boundingBox": {"left": 0.1, "top": 0.2, "width": 0.3, "height": 0.4}
                },
                {
                    "tagName": "car",
                    "probability": 0.55,
                    "boundingBox": {"left": 0.5, "top": 0.5, "width": 0.2, "height": 0.1}
                }
            ]
        }"#;

        let response: PredictionResponse = serde_json::from_str(payload).unwrap();
        assert_eq!(response.predictions.len(), 2);
        assert_eq!(response.predictions[0].tag_name, "Person");
        assert!(response.predictions[0].is_tag("person"));
        assert!((response.predictions[0].probability - 0.91).abs() < 1e-9);
        assert_eq!(response.predictions[1].bounding_box.left, 0.5);
        assert_eq!(response.iteration.as_deref(), Some("Iteration3"));
    }

    #[test]
    fn test_parse_minimal_payload() {
        let response: PredictionResponse = serde_json::from_str(r#"{"predictions": []}"#).unwrap();
        assert!(response.predictions.is_empty());
        assert!(response.id.is_none());
    }

    #[test]
    fn test_detection_serializes_camel_case() {
        let detection = Detection {
            tag_name: "person".to_string(),
            probability: 0.9,
            bounding_box: BoundingBox::new(0.0, 0.0, 0.5, 0.5),
        };
        let json = serde_json::to_value(&detection).unwrap();
        assert!(json.get("tagName").is_some());
        assert!(json.get("boundingBox").is_some());
        assert!(json.get("tag_name").is_none());
    }

    #[test]
    fn test_bounding_box_validity() {
        assert!(BoundingBox::new(0.0, 0.0, 1.0, 1.0).is_valid());
        assert!(BoundingBox::new(0.25, 0.25, 0.5, 0.5).is_valid());
        assert!(!BoundingBox::new(-0.1, 0.0, 0.5, 0.5).is_valid());
        assert!(!BoundingBox::new(0.0, 0.0, 0.0, 0.5).is_valid());
        assert!(!BoundingBox::new(0.8, 0.0, 0.5, 0.5).is_valid());
    }

    #[test]
    fn test_pixel_scaling() {
        let rect = BoundingBox::new(0.0, 0.0, 0.5, 0.5).to_pixel_rect(100, 100);
        assert_eq!(rect.left, 0.0);
        assert_eq!(rect.top, 0.0);
        assert_eq!(rect.right, 50.0);
        assert_eq!(rect.bottom, 50.0);

        let rect = BoundingBox::new(0.25, 0.5, 0.5, 0.25).to_pixel_rect(200, 400);
        assert_eq!(rect.left, 50.0);
        assert_eq!(rect.top, 200.0);
        assert_eq!(rect.right, 150.0);
        assert_eq!(rect.bottom, 300.0);
    }
}
