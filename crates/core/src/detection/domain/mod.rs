pub mod completeness_evaluator;
pub mod detector_options;
pub mod face_detection_service;
pub mod face_filter;
pub mod face_record;
