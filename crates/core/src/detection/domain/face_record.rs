//! A single detected face: bounds plus optional landmark, contour and
//! classification data.
//!
//! Detectors fill in only what they were configured (or able) to produce.
//! Absent data is represented as a missing map key or a `None` value; both
//! mean the same thing to consumers.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// A 2D point in image pixel coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned face bounding box in pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct FaceBounds {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

/// Named anatomical points a detector may locate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LandmarkKind {
    LeftEye,
    RightEye,
    LeftEar,
    RightEar,
    LeftCheek,
    RightCheek,
    NoseBase,
    MouthLeft,
    MouthRight,
    MouthBottom,
}

impl LandmarkKind {
    pub const ALL: &[LandmarkKind] = &[
        LandmarkKind::LeftEye,
        LandmarkKind::RightEye,
        LandmarkKind::LeftEar,
        LandmarkKind::RightEar,
        LandmarkKind::LeftCheek,
        LandmarkKind::RightCheek,
        LandmarkKind::NoseBase,
        LandmarkKind::MouthLeft,
        LandmarkKind::MouthRight,
        LandmarkKind::MouthBottom,
    ];
}

impl fmt::Display for LandmarkKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LandmarkKind::LeftEye => "left eye",
            LandmarkKind::RightEye => "right eye",
            LandmarkKind::LeftEar => "left ear",
            LandmarkKind::RightEar => "right ear",
            LandmarkKind::LeftCheek => "left cheek",
            LandmarkKind::RightCheek => "right cheek",
            LandmarkKind::NoseBase => "nose base",
            LandmarkKind::MouthLeft => "mouth left",
            LandmarkKind::MouthRight => "mouth right",
            LandmarkKind::MouthBottom => "mouth bottom",
        };
        f.write_str(name)
    }
}

/// Named feature outlines a detector may trace.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContourKind {
    Face,
    LeftEyebrowTop,
    LeftEyebrowBottom,
    RightEyebrowTop,
    RightEyebrowBottom,
    LeftEye,
    RightEye,
    UpperLipTop,
    UpperLipBottom,
    LowerLipTop,
    LowerLipBottom,
    NoseBridge,
    NoseBottom,
    LeftCheek,
    RightCheek,
}

impl ContourKind {
    pub const ALL: &[ContourKind] = &[
        ContourKind::Face,
        ContourKind::LeftEyebrowTop,
        ContourKind::LeftEyebrowBottom,
        ContourKind::RightEyebrowTop,
        ContourKind::RightEyebrowBottom,
        ContourKind::LeftEye,
        ContourKind::RightEye,
        ContourKind::UpperLipTop,
        ContourKind::UpperLipBottom,
        ContourKind::LowerLipTop,
        ContourKind::LowerLipBottom,
        ContourKind::NoseBridge,
        ContourKind::NoseBottom,
        ContourKind::LeftCheek,
        ContourKind::RightCheek,
    ];
}

impl fmt::Display for ContourKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ContourKind::Face => "face",
            ContourKind::LeftEyebrowTop => "left eyebrow top",
            ContourKind::LeftEyebrowBottom => "left eyebrow bottom",
            ContourKind::RightEyebrowTop => "right eyebrow top",
            ContourKind::RightEyebrowBottom => "right eyebrow bottom",
            ContourKind::LeftEye => "left eye",
            ContourKind::RightEye => "right eye",
            ContourKind::UpperLipTop => "upper lip top",
            ContourKind::UpperLipBottom => "upper lip bottom",
            ContourKind::LowerLipTop => "lower lip top",
            ContourKind::LowerLipBottom => "lower lip bottom",
            ContourKind::NoseBridge => "nose bridge",
            ContourKind::NoseBottom => "nose bottom",
            ContourKind::LeftCheek => "left cheek",
            ContourKind::RightCheek => "right cheek",
        };
        f.write_str(name)
    }
}

/// Per-face classification probabilities (0.0-1.0), when enabled.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Classification {
    pub smiling: Option<f32>,
    pub left_eye_open: Option<f32>,
    pub right_eye_open: Option<f32>,
}

/// Head rotation in degrees.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct HeadAngles {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct FaceRecord {
    pub bounds: FaceBounds,
    #[serde(default)]
    pub landmarks: HashMap<LandmarkKind, Option<Point>>,
    #[serde(default)]
    pub contours: HashMap<ContourKind, Option<Vec<Point>>>,
    #[serde(default)]
    pub classification: Option<Classification>,
    #[serde(default)]
    pub tracking_id: Option<u32>,
    #[serde(default)]
    pub head_angles: HeadAngles,
}

impl FaceRecord {
    pub fn new(bounds: FaceBounds) -> Self {
        Self {
            bounds,
            ..Self::default()
        }
    }

    pub fn with_landmark(mut self, kind: LandmarkKind, point: Point) -> Self {
        self.landmarks.insert(kind, Some(point));
        self
    }

    pub fn with_contour(mut self, kind: ContourKind, points: Vec<Point>) -> Self {
        self.contours.insert(kind, Some(points));
        self
    }

    pub fn landmark(&self, kind: LandmarkKind) -> Option<Point> {
        self.landmarks.get(&kind).copied().flatten()
    }

    /// Contour points, or `None` when the contour is absent or empty.
    pub fn contour(&self, kind: ContourKind) -> Option<&[Point]> {
        self.contours
            .get(&kind)
            .and_then(|c| c.as_deref())
            .filter(|points| !points.is_empty())
    }

    pub fn clear_landmarks(&mut self) {
        self.landmarks.clear();
    }

    pub fn clear_contours(&mut self) {
        self.contours.clear();
    }
}
