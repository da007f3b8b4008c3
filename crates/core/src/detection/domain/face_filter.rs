use crate::detection::domain::detector_options::{DetectorOptions, FeatureMode};
use crate::detection::domain::face_record::FaceRecord;

/// Applies detector options to raw face records.
///
/// - Faces narrower than `min_face_size * image_width` are dropped.
/// - Landmark, contour and classification data are stripped when the
///   corresponding mode is `None`.
///
/// Relative order of the surviving faces is preserved.
pub fn apply_options(
    faces: Vec<FaceRecord>,
    options: &DetectorOptions,
    image_width: u32,
) -> Vec<FaceRecord> {
    let min_width = options.min_face_size * image_width as f32;

    faces
        .into_iter()
        .filter(|f| f.bounds.width >= min_width)
        .map(|mut f| {
            if options.landmark_mode == FeatureMode::None {
                f.clear_landmarks();
            }
            if options.contour_mode == FeatureMode::None {
                f.clear_contours();
            }
            if options.classification_mode == FeatureMode::None {
                f.classification = None;
            }
            f
        })
        .collect()
}
