use std::path::Path;

use thiserror::Error;

use crate::acquisition::domain::image_source::{ImageDecodeError, ImageSource};
use crate::detection::domain::completeness_evaluator::{
    evaluate, first_missing_landmark, CompletenessVerdict,
};
use crate::detection::domain::face_detection_service::{DetectionError, FaceDetectionService};
use crate::detection::domain::face_record::FaceRecord;
use crate::notification::domain::notifier::Notifier;

#[derive(Error, Debug)]
pub enum CheckFaceError {
    #[error(transparent)]
    Image(#[from] ImageDecodeError),
    #[error(transparent)]
    Detection(#[from] DetectionError),
}

/// Single-image check: load → detect → evaluate → notify.
///
/// The busy indicator is raised before loading and lowered as soon as
/// detection finishes (successfully or not), before anything is reported.
pub struct CheckFaceUseCase {
    source: Box<dyn ImageSource>,
    detector: Box<dyn FaceDetectionService>,
    notifier: Box<dyn Notifier>,
}

impl CheckFaceUseCase {
    pub fn new(
        source: Box<dyn ImageSource>,
        detector: Box<dyn FaceDetectionService>,
        notifier: Box<dyn Notifier>,
    ) -> Self {
        Self {
            source,
            detector,
            notifier,
        }
    }

    /// Runs one check. Upstream failures are reported to the notifier and
    /// returned; incomplete faces are a normal verdict, not an error.
    pub fn execute(&mut self, image_path: &Path) -> Result<CompletenessVerdict, CheckFaceError> {
        self.notifier.set_busy(true);
        let detected = self.load_and_detect(image_path);
        self.notifier.set_busy(false);

        let faces = match detected {
            Ok(faces) => faces,
            Err(e) => {
                log::warn!("Face check failed for {}: {e}", image_path.display());
                self.notifier.failure(&e);
                return Err(e);
            }
        };

        log::debug!("{} face(s) detected in {}", faces.len(), image_path.display());
        if let Some(first) = faces.first() {
            if first_missing_landmark(first).is_none() {
                log::debug!("Landmark check passed");
            }
        }

        let verdict = evaluate(&faces);
        if verdict.is_complete {
            log::debug!("Contour check passed");
        }
        self.notifier.verdict(&verdict);
        Ok(verdict)
    }

    fn load_and_detect(&mut self, image_path: &Path) -> Result<Vec<FaceRecord>, CheckFaceError> {
        let frame = self.source.load(image_path)?;
        Ok(self.detector.detect(&frame)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detection::domain::completeness_evaluator::{
        VerdictReason, REQUIRED_CONTOURS, REQUIRED_LANDMARKS,
    };
    use crate::detection::domain::face_record::{FaceBounds, LandmarkKind, Point};
    use crate::shared::frame::Frame;
    use std::sync::{Arc, Mutex};

    // --- Stubs ---

    struct StubSource {
        fail: bool,
    }

    impl ImageSource for StubSource {
        fn load(&mut self, path: &Path) -> Result<Frame, ImageDecodeError> {
            if self.fail {
                return Err(ImageDecodeError::Decode {
                    path: path.display().to_string(),
                    reason: "corrupt".into(),
                });
            }
            Ok(Frame::new(vec![128; 100 * 100 * 3], 100, 100, 3))
        }
    }

    struct StubDetector {
        result: Option<Vec<FaceRecord>>,
        calls: Arc<Mutex<usize>>,
    }

    impl StubDetector {
        fn returning(faces: Vec<FaceRecord>) -> Self {
            Self {
                result: Some(faces),
                calls: Arc::new(Mutex::new(0)),
            }
        }

        fn failing() -> Self {
            Self {
                result: None,
                calls: Arc::new(Mutex::new(0)),
            }
        }
    }

    impl FaceDetectionService for StubDetector {
        fn detect(&mut self, _frame: &Frame) -> Result<Vec<FaceRecord>, DetectionError> {
            *self.calls.lock().unwrap() += 1;
            self.result
                .clone()
                .ok_or_else(|| DetectionError::Inference("model crashed".into()))
        }
    }

    #[derive(Debug, PartialEq)]
    enum Event {
        Busy(bool),
        Verdict(CompletenessVerdict),
        Failure(String),
    }

    struct RecordingNotifier {
        events: Arc<Mutex<Vec<Event>>>,
    }

    impl RecordingNotifier {
        fn new() -> Self {
            Self {
                events: Arc::new(Mutex::new(Vec::new())),
            }
        }
    }

    impl Notifier for RecordingNotifier {
        fn set_busy(&mut self, busy: bool) {
            self.events.lock().unwrap().push(Event::Busy(busy));
        }

        fn verdict(&mut self, verdict: &CompletenessVerdict) {
            self.events.lock().unwrap().push(Event::Verdict(*verdict));
        }

        fn failure(&mut self, error: &dyn std::error::Error) {
            self.events
                .lock()
                .unwrap()
                .push(Event::Failure(error.to_string()));
        }
    }

    // --- Helpers ---

    fn complete_face() -> FaceRecord {
        let mut face = FaceRecord::new(FaceBounds {
            x: 10.0,
            y: 10.0,
            width: 60.0,
            height: 60.0,
        });
        for &kind in &REQUIRED_LANDMARKS {
            face = face.with_landmark(kind, Point::new(40.0, 40.0));
        }
        for &kind in &REQUIRED_CONTOURS {
            face = face.with_contour(kind, vec![Point::new(40.0, 40.0)]);
        }
        face
    }

    fn use_case(
        source: StubSource,
        detector: StubDetector,
    ) -> (CheckFaceUseCase, Arc<Mutex<Vec<Event>>>) {
        let notifier = RecordingNotifier::new();
        let events = notifier.events.clone();
        let uc = CheckFaceUseCase::new(Box::new(source), Box::new(detector), Box::new(notifier));
        (uc, events)
    }

    // --- Tests ---

    #[test]
    fn test_complete_face_notifies_success() {
        let (mut uc, events) = use_case(
            StubSource { fail: false },
            StubDetector::returning(vec![complete_face()]),
        );

        let verdict = uc.execute(Path::new("face.jpg")).unwrap();

        assert!(verdict.is_complete);
        assert_eq!(
            *events.lock().unwrap(),
            vec![Event::Busy(true), Event::Busy(false), Event::Verdict(verdict)]
        );
    }

    #[test]
    fn test_no_faces_is_a_verdict_not_an_error() {
        let (mut uc, events) = use_case(
            StubSource { fail: false },
            StubDetector::returning(vec![]),
        );

        let verdict = uc.execute(Path::new("empty.jpg")).unwrap();

        assert_eq!(verdict.reason, VerdictReason::NoFaceDetected);
        assert_eq!(events.lock().unwrap().last(), Some(&Event::Verdict(verdict)));
    }

    #[test]
    fn test_incomplete_face_reports_missing_landmark() {
        let mut face = complete_face();
        face.landmarks.remove(&LandmarkKind::MouthLeft);
        let (mut uc, _events) = use_case(
            StubSource { fail: false },
            StubDetector::returning(vec![face]),
        );

        let verdict = uc.execute(Path::new("face.jpg")).unwrap();

        assert_eq!(
            verdict.reason,
            VerdictReason::MissingLandmark(LandmarkKind::MouthLeft)
        );
    }

    #[test]
    fn test_decode_failure_skips_detection() {
        let detector = StubDetector::returning(vec![complete_face()]);
        let calls = detector.calls.clone();
        let (mut uc, events) = use_case(StubSource { fail: true }, detector);

        let result = uc.execute(Path::new("bad.jpg"));

        assert!(matches!(result, Err(CheckFaceError::Image(_))));
        assert_eq!(*calls.lock().unwrap(), 0);
        let events = events.lock().unwrap();
        assert_eq!(events[0], Event::Busy(true));
        assert_eq!(events[1], Event::Busy(false));
        assert!(matches!(&events[2], Event::Failure(msg) if msg.contains("corrupt")));
        assert_eq!(events.len(), 3);
    }

    #[test]
    fn test_detection_failure_notified_and_returned() {
        let (mut uc, events) = use_case(StubSource { fail: false }, StubDetector::failing());

        let result = uc.execute(Path::new("face.jpg"));

        assert!(matches!(result, Err(CheckFaceError::Detection(_))));
        let events = events.lock().unwrap();
        assert_eq!(events[1], Event::Busy(false));
        assert!(matches!(&events[2], Event::Failure(msg) if msg.contains("model crashed")));
        assert!(!events.iter().any(|e| matches!(e, Event::Verdict(_))));
    }

    #[test]
    fn test_detector_called_once_per_check() {
        let detector = StubDetector::returning(vec![complete_face()]);
        let calls = detector.calls.clone();
        let (mut uc, _events) = use_case(StubSource { fail: false }, detector);

        uc.execute(Path::new("a.jpg")).unwrap();
        uc.execute(Path::new("b.jpg")).unwrap();

        assert_eq!(*calls.lock().unwrap(), 2);
    }
}
