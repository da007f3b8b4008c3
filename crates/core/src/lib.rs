//! Face completeness checking: decode an image, run a face detector over it,
//! and decide whether the first detected face carries every required
//! landmark and contour.
//!
//! ```no_run
//! use std::path::Path;
//!
//! use facecheck_core::acquisition::infrastructure::image_file_source::ImageFileSource;
//! use facecheck_core::detection::domain::detector_options::DetectorOptions;
//! use facecheck_core::detection::infrastructure::recorded_face_detector::RecordedFaceDetector;
//! use facecheck_core::notification::infrastructure::log_notifier::LogNotifier;
//! use facecheck_core::pipeline::check_face_use_case::CheckFaceUseCase;
//!
//! let options = DetectorOptions::default();
//! let detector = RecordedFaceDetector::from_file(Path::new("faces.json"), options).unwrap();
//! let mut use_case = CheckFaceUseCase::new(
//!     Box::new(ImageFileSource::new()),
//!     Box::new(detector),
//!     Box::new(LogNotifier::new()),
//! );
//! let verdict = use_case.execute(Path::new("photo.jpg")).unwrap();
//! println!("complete: {}", verdict.is_complete);
//! ```

pub mod acquisition;
pub mod detection;
pub mod notification;
pub mod pipeline;
pub mod shared;
