use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default minimum face width as a fraction of image width.
pub const DEFAULT_MIN_FACE_SIZE: f32 = 0.2;

#[derive(Error, Debug)]
pub enum OptionsError {
    #[error("min face size must be in (0.0, 1.0], got {0}")]
    MinFaceSize(f32),
    #[error("failed to read options from {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid options file: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("unknown {field} '{value}'")]
    UnknownValue { field: &'static str, value: String },
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PerformanceMode {
    #[default]
    Fast,
    Accurate,
}

/// On/off switch shared by the landmark, classification and contour modes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeatureMode {
    None,
    #[default]
    All,
}

pub type LandmarkMode = FeatureMode;
pub type ClassificationMode = FeatureMode;
pub type ContourMode = FeatureMode;

impl fmt::Display for PerformanceMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PerformanceMode::Fast => write!(f, "fast"),
            PerformanceMode::Accurate => write!(f, "accurate"),
        }
    }
}

impl FromStr for PerformanceMode {
    type Err = OptionsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "fast" => Ok(PerformanceMode::Fast),
            "accurate" => Ok(PerformanceMode::Accurate),
            _ => Err(OptionsError::UnknownValue {
                field: "performance mode",
                value: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for FeatureMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FeatureMode::None => write!(f, "none"),
            FeatureMode::All => write!(f, "all"),
        }
    }
}

impl FromStr for FeatureMode {
    type Err = OptionsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "none" => Ok(FeatureMode::None),
            "all" => Ok(FeatureMode::All),
            _ => Err(OptionsError::UnknownValue {
                field: "feature mode",
                value: s.to_string(),
            }),
        }
    }
}

/// Pass-through configuration for a face detection backend.
///
/// The evaluator attaches no meaning to these; each detector decides how
/// (and whether) it honors them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectorOptions {
    pub performance_mode: PerformanceMode,
    pub landmark_mode: LandmarkMode,
    pub classification_mode: ClassificationMode,
    pub contour_mode: ContourMode,
    pub min_face_size: f32,
}

impl Default for DetectorOptions {
    fn default() -> Self {
        Self {
            performance_mode: PerformanceMode::Fast,
            landmark_mode: FeatureMode::All,
            classification_mode: FeatureMode::All,
            contour_mode: FeatureMode::All,
            min_face_size: DEFAULT_MIN_FACE_SIZE,
        }
    }
}

impl DetectorOptions {
    pub fn performance_mode(mut self, mode: PerformanceMode) -> Self {
        self.performance_mode = mode;
        self
    }

    pub fn landmark_mode(mut self, mode: LandmarkMode) -> Self {
        self.landmark_mode = mode;
        self
    }

    pub fn classification_mode(mut self, mode: ClassificationMode) -> Self {
        self.classification_mode = mode;
        self
    }

    pub fn contour_mode(mut self, mode: ContourMode) -> Self {
        self.contour_mode = mode;
        self
    }

    pub fn min_face_size(mut self, fraction: f32) -> Self {
        self.min_face_size = fraction;
        self
    }

    pub fn validate(&self) -> Result<(), OptionsError> {
        if !(self.min_face_size > 0.0 && self.min_face_size <= 1.0) {
            return Err(OptionsError::MinFaceSize(self.min_face_size));
        }
        Ok(())
    }

    /// Loads and validates options from a JSON file. Missing fields take
    /// their default values.
    pub fn load(path: &Path) -> Result<Self, OptionsError> {
        let json = fs::read_to_string(path).map_err(|e| OptionsError::Io {
            path: path.display().to_string(),
            source: e,
        })?;
        let options: DetectorOptions = serde_json::from_str(&json)?;
        options.validate()?;
        Ok(options)
    }
}
