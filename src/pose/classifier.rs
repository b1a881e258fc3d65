use serde::{Deserialize, Serialize};

/// A single named facial landmark in image-space fractional coordinates
/// (both axes normalized to [0, 1]).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LandmarkPoint {
    pub x: f64,
    pub y: f64,
}

impl LandmarkPoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// The subset of detector landmarks the pose rule reads.
///
/// The external face-landmark detector owns the full mesh; only the nose tip
/// and the two eye outer corners participate in the head-pose decision. Iris
/// centers are carried when the detector refines them (reserved for gaze
/// refinement, unused by the current policy).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FaceLandmarks {
    pub nose_tip: LandmarkPoint,
    pub left_eye_outer: LandmarkPoint,
    pub right_eye_outer: LandmarkPoint,
    pub left_iris: Option<LandmarkPoint>,
    pub right_iris: Option<LandmarkPoint>,
}

impl FaceLandmarks {
    pub fn new(
        nose_tip: LandmarkPoint,
        left_eye_outer: LandmarkPoint,
        right_eye_outer: LandmarkPoint,
    ) -> Self {
        Self {
            nose_tip,
            left_eye_outer,
            right_eye_outer,
            left_iris: None,
            right_iris: None,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum HeadDirection {
    Forward,
    TurningLeft,
    TurningRight,
    LookingUp,
    LookingDown,
}

impl HeadDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            HeadDirection::Forward => "Forward",
            HeadDirection::TurningLeft => "Turning Left",
            HeadDirection::TurningRight => "Turning Right",
            HeadDirection::LookingUp => "Looking Up",
            HeadDirection::LookingDown => "Looking Down",
        }
    }
}

impl Default for HeadDirection {
    fn default() -> Self {
        HeadDirection::Forward
    }
}

/// Nose-offset thresholds for the head-pose decision, in fractional
/// image coordinates.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PoseThresholds {
    /// Horizontal nose offset beyond which the head counts as turned.
    pub horizontal: f64,
    /// Downward vertical offset beyond which the head counts as looking down.
    pub vertical_down: f64,
    /// Upward vertical offset (negative) beyond which the head counts as
    /// looking up.
    pub vertical_up: f64,
}

impl Default for PoseThresholds {
    fn default() -> Self {
        Self {
            horizontal: 0.045,
            vertical_down: 0.07,
            vertical_up: -0.05,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoseClassification {
    pub direction: HeadDirection,
    pub distracted: bool,
}

/// Derive a discrete head-pose label and distraction flag from one frame's
/// landmarks.
///
/// The nose tip is compared against the midpoint of the eye outer corners;
/// the first matching offset test wins. Looking down is deliberately not a
/// distraction: glancing at notes or a book stays focused.
pub fn classify(landmarks: &FaceLandmarks, thresholds: &PoseThresholds) -> PoseClassification {
    let eye_center_x = (landmarks.left_eye_outer.x + landmarks.right_eye_outer.x) / 2.0;
    let eye_center_y = (landmarks.left_eye_outer.y + landmarks.right_eye_outer.y) / 2.0;

    let horizontal_offset = landmarks.nose_tip.x - eye_center_x;
    let vertical_offset = landmarks.nose_tip.y - eye_center_y;

    if horizontal_offset < -thresholds.horizontal {
        PoseClassification {
            direction: HeadDirection::TurningRight,
            distracted: true,
        }
    } else if horizontal_offset > thresholds.horizontal {
        PoseClassification {
            direction: HeadDirection::TurningLeft,
            distracted: true,
        }
    } else if vertical_offset > thresholds.vertical_down {
        PoseClassification {
            direction: HeadDirection::LookingDown,
            distracted: false,
        }
    } else if vertical_offset < thresholds.vertical_up {
        PoseClassification {
            direction: HeadDirection::LookingUp,
            distracted: true,
        }
    } else {
        PoseClassification {
            direction: HeadDirection::Forward,
            distracted: false,
        }
    }
}
