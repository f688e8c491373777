//! In-memory entry points for callers that hold raw image bytes.
//!
//! The decoded raster is passed straight from one stage to the next, so
//! concurrent calls share nothing.

use std::io::Cursor;

use image::{ImageFormat, RgbImage};
use serde::{Deserialize, Serialize};

use crate::config::KolamConfig;
use crate::contours::detect_contours;
use crate::dots::detect_dots;
use crate::error::KolamError;
use crate::principles::analyze_principles;
use crate::recreate::recreate_kolam;
use crate::types::DesignPrinciples;

/// Error body returned to callers in place of a result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorPayload {
    pub error: String,
}

impl From<&KolamError> for ErrorPayload {
    fn from(err: &KolamError) -> Self {
        Self {
            error: err.to_string(),
        }
    }
}

/// JSON-ready outcome of an analysis request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnalysisOutcome {
    Principles(DesignPrinciples),
    Error(ErrorPayload),
}

impl AnalysisOutcome {
    pub fn is_error(&self) -> bool {
        matches!(self, AnalysisOutcome::Error(_))
    }
}

impl From<Result<DesignPrinciples, KolamError>> for AnalysisOutcome {
    fn from(result: Result<DesignPrinciples, KolamError>) -> Self {
        match result {
            Ok(principles) => AnalysisOutcome::Principles(principles),
            Err(err) => AnalysisOutcome::Error(ErrorPayload::from(&err)),
        }
    }
}

pub fn decode_image(bytes: &[u8]) -> Result<RgbImage, KolamError> {
    let decoded = image::load_from_memory(bytes).map_err(KolamError::Decode)?;
    Ok(decoded.to_rgb8())
}

pub fn encode_png(image: &RgbImage) -> Result<Vec<u8>, KolamError> {
    let mut out = Cursor::new(Vec::new());
    image
        .write_to(&mut out, ImageFormat::Png)
        .map_err(KolamError::Encode)?;
    Ok(out.into_inner())
}

/// Detects dots and loops in `image` and summarises them.
pub fn analyze_image(image: &RgbImage, config: &KolamConfig) -> Result<DesignPrinciples, KolamError> {
    let dots = detect_dots(image, &config.dots)?;
    let contours = detect_contours(image, &config.contours)?;
    let (width, height) = image.dimensions();
    analyze_principles(&dots, Some(contours.as_slice()), (height, width), config)
}

/// Detects loops in `image` and redraws them on a canvas of the same size.
pub fn recreate_from_image(image: &RgbImage, config: &KolamConfig) -> Result<RgbImage, KolamError> {
    let contours = detect_contours(image, &config.contours)?;
    let (width, height) = image.dimensions();
    Ok(recreate_kolam(&contours, width, height, &config.recreate))
}

pub fn analyze_bytes(bytes: &[u8], config: &KolamConfig) -> AnalysisOutcome {
    decode_image(bytes)
        .and_then(|image| analyze_image(&image, config))
        .into()
}

/// PNG-encoded recreation of the image in `bytes`.
pub fn recreate_bytes(bytes: &[u8], config: &KolamConfig) -> Result<Vec<u8>, KolamError> {
    let image = decode_image(bytes)?;
    let recreated = recreate_from_image(&image, config)?;
    encode_png(&recreated)
}
