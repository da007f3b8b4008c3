use std::fs;
use std::path::Path;

use crate::detection::domain::detector_options::DetectorOptions;
use crate::detection::domain::face_detection_service::{DetectionError, FaceDetectionService};
use crate::detection::domain::face_filter::apply_options;
use crate::detection::domain::face_record::FaceRecord;
use crate::shared::frame::Frame;

/// Replays pre-computed face records instead of running a model.
///
/// Records are typically exported from an on-device detector as a JSON
/// array of faces. Every `detect` call returns the same faces, filtered by
/// the configured options against the frame being checked.
pub struct RecordedFaceDetector {
    faces: Vec<FaceRecord>,
    options: DetectorOptions,
}

impl RecordedFaceDetector {
    pub fn new(faces: Vec<FaceRecord>, options: DetectorOptions) -> Self {
        Self { faces, options }
    }

    pub fn from_file(path: &Path, options: DetectorOptions) -> Result<Self, DetectionError> {
        let json = fs::read_to_string(path)
            .map_err(|e| DetectionError::Replay(format!("{}: {e}", path.display())))?;
        let faces: Vec<FaceRecord> = serde_json::from_str(&json)
            .map_err(|e| DetectionError::Replay(format!("{}: {e}", path.display())))?;
        log::debug!("Loaded {} recorded faces from {}", faces.len(), path.display());
        Ok(Self::new(faces, options))
    }
}

impl FaceDetectionService for RecordedFaceDetector {
    fn detect(&mut self, frame: &Frame) -> Result<Vec<FaceRecord>, DetectionError> {
        Ok(apply_options(self.faces.clone(), &self.options, frame.width()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detection::domain::detector_options::FeatureMode;
    use crate::detection::domain::face_record::{FaceBounds, LandmarkKind, Point};

    fn frame(width: u32) -> Frame {
        Frame::new(vec![0u8; (width * 10 * 3) as usize], width, 10, 3)
    }

    fn face(width: f32, id: u32) -> FaceRecord {
        let mut f = FaceRecord::new(FaceBounds {
            x: 0.0,
            y: 0.0,
            width,
            height: width,
        })
        .with_landmark(LandmarkKind::RightEar, Point::new(1.0, 2.0));
        f.tracking_id = Some(id);
        f
    }

    #[test]
    fn test_replays_faces_in_order() {
        let faces = vec![face(60.0, 7), face(50.0, 3)];
        let mut detector = RecordedFaceDetector::new(faces.clone(), DetectorOptions::default());

        let result = detector.detect(&frame(100)).unwrap();

        assert_eq!(result, faces);
    }

    #[test]
    fn test_replay_is_repeatable() {
        let mut detector =
            RecordedFaceDetector::new(vec![face(60.0, 1)], DetectorOptions::default());
        assert_eq!(
            detector.detect(&frame(100)).unwrap(),
            detector.detect(&frame(100)).unwrap()
        );
    }

    #[test]
    fn test_applies_min_face_size_against_frame_width() {
        let mut detector = RecordedFaceDetector::new(
            vec![face(60.0, 1)],
            DetectorOptions::default().min_face_size(0.5),
        );
        assert_eq!(detector.detect(&frame(100)).unwrap().len(), 1);
        assert!(detector.detect(&frame(200)).unwrap().is_empty());
    }

    #[test]
    fn test_landmark_mode_none_strips_landmarks() {
        let mut detector = RecordedFaceDetector::new(
            vec![face(60.0, 1)],
            DetectorOptions::default().landmark_mode(FeatureMode::None),
        );
        let result = detector.detect(&frame(100)).unwrap();
        assert!(result[0].landmark(LandmarkKind::RightEar).is_none());
    }

    #[test]
    fn test_from_file_round_trips_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("faces.json");
        let faces = vec![face(60.0, 1)];
        fs::write(&path, serde_json::to_string(&faces).unwrap()).unwrap();

        let mut detector =
            RecordedFaceDetector::from_file(&path, DetectorOptions::default()).unwrap();

        assert_eq!(detector.detect(&frame(100)).unwrap(), faces);
    }

    #[test]
    fn test_from_file_empty_array() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("faces.json");
        fs::write(&path, "[]").unwrap();

        let mut detector =
            RecordedFaceDetector::from_file(&path, DetectorOptions::default()).unwrap();

        assert!(detector.detect(&frame(100)).unwrap().is_empty());
    }

    #[test]
    fn test_from_file_missing_is_replay_error() {
        let result = RecordedFaceDetector::from_file(
            Path::new("/nonexistent/faces.json"),
            DetectorOptions::default(),
        );
        assert!(matches!(result, Err(DetectionError::Replay(_))));
    }

    #[test]
    fn test_from_file_malformed_is_replay_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("faces.json");
        fs::write(&path, r#"{"faces": 3}"#).unwrap();

        let result = RecordedFaceDetector::from_file(&path, DetectorOptions::default());
        assert!(matches!(result, Err(DetectionError::Replay(_))));
    }
}
