use thiserror::Error;

use crate::detection::domain::face_record::FaceRecord;
use crate::shared::frame::Frame;

#[derive(Error, Debug)]
pub enum DetectionError {
    #[error("failed to load detection model: {0}")]
    Model(String),
    #[error("inference failed: {0}")]
    Inference(String),
    #[error("unusable input frame: {0}")]
    InvalidInput(String),
    #[error("unexpected model output: {0}")]
    InvalidOutput(String),
    #[error("failed to replay recorded detections: {0}")]
    Replay(String),
}

/// Domain interface for an opaque face detection capability.
///
/// Returned faces are in detector order; callers must not assume any
/// quality-based ordering. Implementations may hold a model session,
/// hence `&mut self`.
pub trait FaceDetectionService: Send {
    fn detect(&mut self, frame: &Frame) -> Result<Vec<FaceRecord>, DetectionError>;
}
