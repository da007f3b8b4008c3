/// BlazeFace face detector using ONNX Runtime via `ort`.
///
/// Produces bounding boxes plus the six BlazeFace keypoints. BlazeFace has no
/// contour or classification heads, so those fields are always empty.
use std::path::Path;

use crate::detection::domain::detector_options::{DetectorOptions, PerformanceMode};
use crate::detection::domain::face_detection_service::{DetectionError, FaceDetectionService};
use crate::detection::domain::face_filter::apply_options;
use crate::detection::domain::face_record::{FaceBounds, FaceRecord, LandmarkKind, Point};
use crate::detection::infrastructure::execution_provider::preferred_execution_providers;
use crate::detection::infrastructure::math::bbox_iou;
use crate::shared::frame::Frame;

/// BlazeFace model input resolution.
const INPUT_SIZE: u32 = 128;

/// Default confidence threshold.
pub const DEFAULT_CONFIDENCE: f64 = 0.5;

/// NMS IoU threshold.
const NMS_IOU_THRESH: f64 = 0.3;

/// Number of BlazeFace anchors (short-range model).
const NUM_ANCHORS: usize = 896;

/// Values per anchor in the regressor output: 4 box + 6 keypoints × 2.
const REG_STRIDE: usize = 16;

/// Keypoint order emitted by BlazeFace, mapped to landmark kinds.
const KEYPOINTS: [LandmarkKind; 6] = [
    LandmarkKind::RightEye,
    LandmarkKind::LeftEye,
    LandmarkKind::NoseBase,
    LandmarkKind::MouthBottom,
    LandmarkKind::RightEar,
    LandmarkKind::LeftEar,
];

pub struct OnnxBlazefaceDetector {
    session: ort::session::Session,
    confidence: f64,
    options: DetectorOptions,
    anchors: Vec<[f32; 2]>,
}

impl OnnxBlazefaceDetector {
    /// Load a BlazeFace ONNX model.
    pub fn new(
        model_path: &Path,
        confidence: f64,
        options: DetectorOptions,
    ) -> Result<Self, DetectionError> {
        let session = ort::session::Session::builder()
            .map_err(|e| DetectionError::Model(e.to_string()))?
            .with_execution_providers(preferred_execution_providers())
            .map_err(|e| DetectionError::Model(e.to_string()))?
            .commit_from_file(model_path)
            .map_err(|e| DetectionError::Model(e.to_string()))?;
        log::info!("Loaded BlazeFace model from {}", model_path.display());
        Ok(Self {
            session,
            confidence,
            options,
            anchors: generate_anchors(),
        })
    }
}

impl FaceDetectionService for OnnxBlazefaceDetector {
    fn detect(&mut self, frame: &Frame) -> Result<Vec<FaceRecord>, DetectionError> {
        check_input(frame)?;
        let fw = frame.width() as f32;
        let fh = frame.height() as f32;

        // 1. Preprocess: resize to 128x128, normalize to [0,1], NCHW
        let input_tensor = match self.options.performance_mode {
            PerformanceMode::Fast => preprocess_nearest(frame, INPUT_SIZE),
            PerformanceMode::Accurate => preprocess_filtered(frame, INPUT_SIZE)?,
        };

        // 2. Inference
        let input_value = ort::value::Tensor::from_array(input_tensor)
            .map_err(|e| DetectionError::Inference(e.to_string()))?;
        let outputs = self
            .session
            .run(ort::inputs![input_value])
            .map_err(|e| DetectionError::Inference(e.to_string()))?;

        // - regressors: [1, 896, 16] (box deltas + keypoints)
        // - classificators: [1, 896, 1] (confidence scores)
        if outputs.len() < 2 {
            return Err(DetectionError::InvalidOutput(format!(
                "expected 2 outputs, got {}",
                outputs.len()
            )));
        }

        let regressors = outputs[0]
            .try_extract_array::<f32>()
            .map_err(|e| DetectionError::InvalidOutput(e.to_string()))?;
        let scores = outputs[1]
            .try_extract_array::<f32>()
            .map_err(|e| DetectionError::InvalidOutput(e.to_string()))?;
        let reg_data = regressors
            .as_slice()
            .ok_or_else(|| DetectionError::InvalidOutput("regressors not contiguous".into()))?;
        let score_data = scores
            .as_slice()
            .ok_or_else(|| DetectionError::InvalidOutput("scores not contiguous".into()))?;

        // 3. Decode anchors, filter by confidence, then NMS
        let mut raw_dets = decode(reg_data, score_data, &self.anchors, self.confidence as f32);
        let kept = nms(&mut raw_dets, NMS_IOU_THRESH);

        // 4. Scale to frame coordinates
        let faces: Vec<FaceRecord> = kept.iter().map(|d| to_face_record(d, fw, fh)).collect();
        log::debug!("BlazeFace: {} raw detections, {} after NMS", raw_dets.len(), faces.len());

        Ok(apply_options(faces, &self.options, frame.width()))
    }
}

// ---------------------------------------------------------------------------
// Preprocessing
// ---------------------------------------------------------------------------

/// Both resize paths need at least one RGB pixel to sample from.
fn check_input(frame: &Frame) -> Result<(), DetectionError> {
    if frame.width() == 0 || frame.height() == 0 {
        return Err(DetectionError::InvalidInput(format!(
            "frame is {}x{}",
            frame.width(),
            frame.height()
        )));
    }
    if frame.channels() < 3 {
        return Err(DetectionError::InvalidInput(format!(
            "expected 3 channels, got {}",
            frame.channels()
        )));
    }
    Ok(())
}

/// Nearest-neighbour resize to `size × size`, normalized to [0,1] NCHW float32.
fn preprocess_nearest(frame: &Frame, size: u32) -> ndarray::Array4<f32> {
    let src = frame.as_ndarray();
    let src_h = frame.height() as usize;
    let src_w = frame.width() as usize;
    let s = size as usize;

    let mut tensor = ndarray::Array4::<f32>::zeros((1, 3, s, s));

    for y in 0..s {
        let src_y = (((y as f64 + 0.5) * src_h as f64 / s as f64) as usize).min(src_h - 1);
        for x in 0..s {
            let src_x = (((x as f64 + 0.5) * src_w as f64 / s as f64) as usize).min(src_w - 1);
            for c in 0..3 {
                tensor[[0, c, y, x]] = src[[src_y, src_x, c]] as f32 / 255.0;
            }
        }
    }

    tensor
}

/// Triangle-filtered resize; slower but less aliasing on large photos.
fn preprocess_filtered(frame: &Frame, size: u32) -> Result<ndarray::Array4<f32>, DetectionError> {
    let img = image::RgbImage::from_raw(frame.width(), frame.height(), frame.data().to_vec())
        .ok_or_else(|| DetectionError::Inference("frame is not RGB".into()))?;
    let resized = image::imageops::resize(&img, size, size, image::imageops::FilterType::Triangle);

    let s = size as usize;
    let mut tensor = ndarray::Array4::<f32>::zeros((1, 3, s, s));
    for (x, y, pixel) in resized.enumerate_pixels() {
        for c in 0..3 {
            tensor[[0, c, y as usize, x as usize]] = pixel[c] as f32 / 255.0;
        }
    }
    Ok(tensor)
}

// ---------------------------------------------------------------------------
// Anchor generation (BlazeFace short-range)
// ---------------------------------------------------------------------------

/// The short-range model uses two feature map sizes: 16×16 and 8×8,
/// with 2 and 6 anchors per cell respectively.
fn generate_anchors() -> Vec<[f32; 2]> {
    let strides = [(8, 2), (16, 6)]; // (stride, anchors_per_cell)
    let mut anchors = Vec::with_capacity(NUM_ANCHORS);

    for &(stride, num) in &strides {
        let grid_size = INPUT_SIZE as usize / stride;
        for y in 0..grid_size {
            for x in 0..grid_size {
                let cx = (x as f32 + 0.5) / grid_size as f32;
                let cy = (y as f32 + 0.5) / grid_size as f32;
                for _ in 0..num {
                    anchors.push([cx, cy]);
                }
            }
        }
    }

    anchors
}

// ---------------------------------------------------------------------------
// Decoding
// ---------------------------------------------------------------------------

/// A detection in normalized [0,1] image coordinates.
#[derive(Clone, Debug)]
struct RawDet {
    bbox: [f64; 4],
    keypoints: [(f32, f32); 6],
    score: f64,
}

fn decode(
    reg_data: &[f32],
    score_data: &[f32],
    anchors: &[[f32; 2]],
    threshold: f32,
) -> Vec<RawDet> {
    let scale = INPUT_SIZE as f32;
    let num_anchors = anchors.len().min(NUM_ANCHORS);
    let mut dets = Vec::new();

    for (i, &raw_score) in score_data.iter().enumerate().take(num_anchors) {
        let score = sigmoid(raw_score);
        if score < threshold {
            continue;
        }

        let offset = i * REG_STRIDE;
        if offset + REG_STRIDE > reg_data.len() {
            break;
        }
        let reg = &reg_data[offset..offset + REG_STRIDE];
        let anchor = anchors[i];

        let cx = anchor[0] + reg[0] / scale;
        let cy = anchor[1] + reg[1] / scale;
        let w = reg[2] / scale;
        let h = reg[3] / scale;

        let mut keypoints = [(0.0, 0.0); 6];
        for (k, kp) in keypoints.iter_mut().enumerate() {
            *kp = (
                anchor[0] + reg[4 + 2 * k] / scale,
                anchor[1] + reg[5 + 2 * k] / scale,
            );
        }

        dets.push(RawDet {
            bbox: [
                (cx - w / 2.0).max(0.0) as f64,
                (cy - h / 2.0).max(0.0) as f64,
                (cx + w / 2.0).min(1.0) as f64,
                (cy + h / 2.0).min(1.0) as f64,
            ],
            keypoints,
            score: score as f64,
        });
    }

    dets
}

/// Greedy NMS; survivors are returned in descending score order.
fn nms(dets: &mut [RawDet], iou_thresh: f64) -> Vec<RawDet> {
    dets.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let mut keep: Vec<RawDet> = Vec::new();
    for det in dets.iter() {
        if keep.iter().all(|k| bbox_iou(&k.bbox, &det.bbox) <= iou_thresh) {
            keep.push(det.clone());
        }
    }
    keep
}

fn to_face_record(det: &RawDet, fw: f32, fh: f32) -> FaceRecord {
    let [x1, y1, x2, y2] = det.bbox;
    let mut face = FaceRecord::new(FaceBounds {
        x: x1 as f32 * fw,
        y: y1 as f32 * fh,
        width: (x2 - x1) as f32 * fw,
        height: (y2 - y1) as f32 * fh,
    });
    for (kind, &(kx, ky)) in KEYPOINTS.iter().zip(det.keypoints.iter()) {
        let point = Point::new((kx * fw).clamp(0.0, fw), (ky * fh).clamp(0.0, fh));
        face = face.with_landmark(*kind, point);
    }
    face
}

fn sigmoid(x: f32) -> f32 {
    1.0 / (1.0 + (-x).exp())
}
