//! Decides whether a detection result contains a fully detected face.
//!
//! Only the first face in detector order is inspected. Landmarks are checked
//! before contours, each in a fixed order, and the first gap wins.

use serde::Serialize;

use crate::detection::domain::face_record::{ContourKind, FaceRecord, LandmarkKind};

/// Landmarks that must be located, in check order.
pub const REQUIRED_LANDMARKS: [LandmarkKind; 6] = [
    LandmarkKind::RightEar,
    LandmarkKind::LeftEar,
    LandmarkKind::NoseBase,
    LandmarkKind::MouthLeft,
    LandmarkKind::MouthRight,
    LandmarkKind::MouthBottom,
];

/// Contours that must be traced with at least one point, in check order.
pub const REQUIRED_CONTOURS: [ContourKind; 3] = [
    ContourKind::LeftEye,
    ContourKind::UpperLipBottom,
    ContourKind::LowerLipBottom,
];

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "feature", rename_all = "snake_case")]
pub enum VerdictReason {
    AllLandmarksAndContoursPresent,
    MissingLandmark(LandmarkKind),
    MissingContour(ContourKind),
    NoFaceDetected,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct CompletenessVerdict {
    pub is_complete: bool,
    pub reason: VerdictReason,
}

impl CompletenessVerdict {
    fn complete() -> Self {
        Self {
            is_complete: true,
            reason: VerdictReason::AllLandmarksAndContoursPresent,
        }
    }

    fn incomplete(reason: VerdictReason) -> Self {
        Self {
            is_complete: false,
            reason,
        }
    }
}

/// Evaluates the first face of a detection result.
pub fn evaluate(faces: &[FaceRecord]) -> CompletenessVerdict {
    let Some(face) = faces.first() else {
        return CompletenessVerdict::incomplete(VerdictReason::NoFaceDetected);
    };

    if let Some(kind) = first_missing_landmark(face) {
        return CompletenessVerdict::incomplete(VerdictReason::MissingLandmark(kind));
    }
    if let Some(kind) = first_missing_contour(face) {
        return CompletenessVerdict::incomplete(VerdictReason::MissingContour(kind));
    }

    CompletenessVerdict::complete()
}

pub fn first_missing_landmark(face: &FaceRecord) -> Option<LandmarkKind> {
    REQUIRED_LANDMARKS
        .iter()
        .copied()
        .find(|&kind| face.landmark(kind).is_none())
}

pub fn first_missing_contour(face: &FaceRecord) -> Option<ContourKind> {
    REQUIRED_CONTOURS
        .iter()
        .copied()
        .find(|&kind| face.contour(kind).is_none())
}
