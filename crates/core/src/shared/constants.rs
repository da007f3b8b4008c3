/// File name of the BlazeFace short-range model in the model cache.
pub const BLAZEFACE_MODEL_NAME: &str = "blazeface.onnx";

/// Extensions accepted as gallery images.
pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "bmp", "tiff", "tif", "webp"];
