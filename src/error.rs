use thiserror::Error;

/// Errors raised when the property panel pushes a value the element cannot take
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PropertyError {
    #[error("unknown property `{0}`")]
    UnknownKey(String),

    #[error("property `{key}` does not apply to {element_type} elements")]
    NotApplicable {
        key: &'static str,
        element_type: &'static str,
    },

    #[error("property `{key}` expects {expected}")]
    TypeMismatch {
        key: &'static str,
        expected: &'static str,
    },

    #[error("invalid value for `{key}`: {reason}")]
    InvalidValue { key: &'static str, reason: String },
}

/// Errors that can occur while turning uploaded bytes into a bitmap
#[derive(Error, Debug)]
pub enum UploadError {
    #[error("file type `{0}` is not an image")]
    NotAnImage(String),

    #[error("failed to decode image: {0}")]
    Decode(#[from] image::ImageError),

    #[error("image has zero width or height")]
    Empty,
}

/// Errors that can occur while exporting the canvas
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("canvas size {width}x{height} cannot be rasterized")]
    InvalidCanvasSize { width: u32, height: u32 },

    #[error("failed to encode PNG: {0}")]
    Encode(#[from] image::ImageError),

    #[error("failed to write export: {0}")]
    Io(#[from] std::io::Error),
}

/// Umbrella error for the editor's command surface
#[derive(Error, Debug)]
pub enum EditorError {
    #[error(transparent)]
    Property(#[from] PropertyError),

    #[error(transparent)]
    Export(#[from] ExportError),
}
