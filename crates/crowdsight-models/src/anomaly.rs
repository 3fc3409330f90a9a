//! Anomaly classification rules.
//!
//! The assessment is a pure function of four tag-presence flags computed from
//! detections that cleared the significance threshold. Individual boxes and
//! probabilities play no further role once a tag is present.

use serde::{Deserialize, Serialize};

use crate::detection::Detection;

/// Minimum probability for a detection to participate in anomaly assessment.
pub const SIGNIFICANCE_THRESHOLD: f64 = 0.65;

const TAG_SECURITY_WEAPONS: &str = "security_weapons";
const TAG_CIVILIAN_WEAPONS: &str = "civilian_weapons";
const TAG_SECURITY: &str = "security";
const TAG_CIVILIAN: &str = "civilian";

/// Result of an anomaly-classification request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnomalyAssessment {
    pub anomaly: bool,
    pub reason: String,
}

impl AnomalyAssessment {
    fn flagged(reason: &str) -> Self {
        Self {
            anomaly: true,
            reason: reason.to_string(),
        }
    }

    fn clear(reason: &str) -> Self {
        Self {
            anomaly: false,
            reason: reason.to_string(),
        }
    }
}

#[derive(Debug, Default, Clone, Copy)]
struct TagPresence {
    security_weapons: bool,
    civilian_weapons: bool,
    security: bool,
    civilian: bool,
}

impl TagPresence {
    fn scan(detections: &[Detection]) -> Self {
        let mut presence = Self::default();
        for detection in detections {
            if detection.is_tag(TAG_SECURITY_WEAPONS) {
                presence.security_weapons = true;
            }
            if detection.is_tag(TAG_CIVILIAN_WEAPONS) {
                presence.civilian_weapons = true;
            }
            if detection.is_tag(TAG_SECURITY) {
                presence.security = true;
            }
            if detection.is_tag(TAG_CIVILIAN) {
                presence.civilian = true;
            }
        }
        presence
    }
}

/// Apply the anomaly decision table to detections already filtered for
/// significance. First matching rule wins:
///
/// 1. empty set -> anomaly
/// 2. security presence (weapons or personnel) -> no anomaly
/// 3. civilian with weapon -> anomaly
/// 4. civilian weapon alone -> anomaly
/// 5. civilian alone -> no anomaly
/// 6. anything else -> anomaly
///
/// Reason strings are part of the external contract; callers may match on them.
pub fn assess_anomaly(detections: &[Detection]) -> AnomalyAssessment {
    if detections.is_empty() {
        return AnomalyAssessment::flagged("No significant objects detected, anomaly.");
    }

    let presence = TagPresence::scan(detections);

    if presence.security_weapons || presence.security {
        AnomalyAssessment::clear("Security presence detected, no anomaly.")
    } else if presence.civilian_weapons && presence.civilian {
        AnomalyAssessment::flagged("Civilian with weapon detected, anomaly.")
    } else if presence.civilian_weapons {
        AnomalyAssessment::flagged("Civilian weapon detected, anomaly.")
    } else if presence.civilian {
        AnomalyAssessment::clear("Civilian detected, no anomaly.")
    } else {
        AnomalyAssessment::flagged("Unclassified situation, anomaly.")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detection::BoundingBox;

    fn detection(tag: &str) -> Detection {
        Detection {
            tag_name: tag.to_string(),
            probability: 0.9,
            bounding_box: BoundingBox::new(0.1, 0.1, 0.2, 0.2),
        }
    }

    #[test]
    fn test_empty_set_is_anomalous() {
        let result = assess_anomaly(&[]);
        assert!(result.anomaly);
        assert_eq!(result.reason, "No significant objects detected, anomaly.");
    }

    #[test]
    fn test_security_presence_clears() {
        let result = assess_anomaly(&[detection("security")]);
        assert!(!result.anomaly);
        assert_eq!(result.reason, "Security presence detected, no anomaly.");

        let result = assess_anomaly(&[detection("security_weapons")]);
        assert!(!result.anomaly);
    }

    #[test]
    fn test_security_wins_over_civilian_weapon() {
        // Rule 2 takes precedence over rules 3 and 4.
        let result = assess_anomaly(&[
            detection("civilian_weapons"),
            detection("civilian"),
            detection("security"),
        ]);
        assert!(!result.anomaly);
        assert_eq!(result.reason, "Security presence detected, no anomaly.");
    }

    #[test]
    fn test_civilian_with_weapon_is_anomalous() {
        let result = assess_anomaly(&[detection("civilian_weapons"), detection("civilian")]);
        assert!(result.anomaly);
        assert_eq!(result.reason, "Civilian with weapon detected, anomaly.");
    }

    #[test]
    fn test_lone_civilian_weapon_is_anomalous() {
        let result = assess_anomaly(&[detection("civilian_weapons")]);
        assert!(result.anomaly);
        assert_eq!(result.reason, "Civilian weapon detected, anomaly.");
    }

    #[test]
    fn test_lone_civilian_is_clear() {
        let result = assess_anomaly(&[detection("civilian")]);
        assert!(!result.anomaly);
        assert_eq!(result.reason, "Civilian detected, no anomaly.");
    }

    #[test]
    fn test_unrecognized_tags_are_anomalous() {
        let result = assess_anomaly(&[detection("car"), detection("dog")]);
        assert!(result.anomaly);
        assert_eq!(result.reason, "Unclassified situation, anomaly.");
    }

    #[test]
    fn test_tags_compare_case_insensitively() {
        let result = assess_anomaly(&[detection("SECURITY")]);
        assert!(!result.anomaly);

        let result = assess_anomaly(&[detection("Civilian_Weapons")]);
        assert!(result.anomaly);
        assert_eq!(result.reason, "Civilian weapon detected, anomaly.");
    }
}
