use kornia::image::ImageError;

/// Message returned to callers when an uploaded buffer is not a readable image.
pub const DECODE_FAILURE_MESSAGE: &str =
    "Could not decode image. Please upload a valid image file (e.g., PNG, JPG).";

/// Errors that can occur while extracting or redrawing a kolam.
#[derive(Debug, thiserror::Error)]
pub enum KolamError {
    #[error("{DECODE_FAILURE_MESSAGE}")]
    Decode(#[source] image::ImageError),

    #[error("No dots to analyze.")]
    NoDots,

    #[error("kornia image error: {0}")]
    Kornia(#[from] ImageError),

    #[error("failed to encode image: {0}")]
    Encode(#[source] image::ImageError),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}
