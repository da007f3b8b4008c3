//! One-line user-facing messages for check outcomes.

use crate::detection::domain::completeness_evaluator::{CompletenessVerdict, VerdictReason};

pub const BUSY_MESSAGE: &str = "Detect Face Wait..";
pub const SUCCESS_MESSAGE: &str = "Face Detect Success";
pub const NO_FACE_MESSAGE: &str = "No Face Detected";
pub const FAILURE_PREFIX: &str = "No detect Problem";

pub fn verdict_message(verdict: &CompletenessVerdict) -> String {
    match verdict.reason {
        VerdictReason::AllLandmarksAndContoursPresent => SUCCESS_MESSAGE.to_string(),
        VerdictReason::NoFaceDetected => NO_FACE_MESSAGE.to_string(),
        VerdictReason::MissingLandmark(kind) => {
            format!("Face incomplete: missing {kind} landmark")
        }
        VerdictReason::MissingContour(kind) => format!("Face incomplete: missing {kind} contour"),
    }
}

pub fn failure_message(error: &dyn std::error::Error) -> String {
    format!("{FAILURE_PREFIX}: {error}")
}
