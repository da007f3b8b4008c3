use std::fs;
use std::path::Path;

use crate::acquisition::domain::image_source::{ImageDecodeError, ImageSource};
use crate::shared::frame::Frame;

/// Decodes an image file into an RGB [`Frame`] using the `image` crate.
///
/// The container format is sniffed from the file contents rather than the
/// extension, so mislabeled gallery exports still decode.
pub struct ImageFileSource;

impl ImageFileSource {
    pub fn new() -> Self {
        Self
    }
}

impl Default for ImageFileSource {
    fn default() -> Self {
        Self::new()
    }
}

impl ImageSource for ImageFileSource {
    fn load(&mut self, path: &Path) -> Result<Frame, ImageDecodeError> {
        let display = path.display().to_string();
        let bytes = fs::read(path).map_err(|e| ImageDecodeError::Open {
            path: display.clone(),
            source: e,
        })?;

        let img = image::load_from_memory(&bytes).map_err(|e| ImageDecodeError::Decode {
            path: display.clone(),
            reason: e.to_string(),
        })?;

        let rgb = img.to_rgb8();
        let (width, height) = rgb.dimensions();
        if width == 0 || height == 0 {
            return Err(ImageDecodeError::ZeroDimensions { path: display });
        }

        log::debug!("Decoded {display} ({width}x{height})");
        Ok(Frame::new(rgb.into_raw(), width, height, 3))
    }
}
