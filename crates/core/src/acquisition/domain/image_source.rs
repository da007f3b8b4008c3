use std::path::Path;

use thiserror::Error;

use crate::shared::frame::Frame;

#[derive(Error, Debug)]
pub enum ImageDecodeError {
    #[error("cannot open {path}: {source}")]
    Open {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("cannot decode {path}: {reason}")]
    Decode { path: String, reason: String },
    #[error("image {path} has zero width or height")]
    ZeroDimensions { path: String },
}

/// Produces a decoded raster from a user-selected image.
pub trait ImageSource: Send {
    fn load(&mut self, path: &Path) -> Result<Frame, ImageDecodeError>;
}
