//! OCR engine seam
//!
//! The structuring core never runs OCR itself. A [`TextDetector`] is built
//! once at startup and handed to [`crate::MenuService`], which calls it once
//! per menu image.

use serde::Deserialize;
use std::path::Path;
use tracing::{debug, warn};

use crate::error::Result;
use crate::menu::{Detection, Point};

/// Produces raw detections for one menu image.
///
/// Engine-backed implementations report inference failures as
/// [`MenuError::Detector`](crate::MenuError::Detector).
pub trait TextDetector: Send + Sync {
    /// Run detection once; no retries, an empty list is a valid answer
    fn detect(&self, source: &Path) -> Result<Vec<Detection>>;
}

/// One page of a PaddleOCR prediction dump
#[derive(Debug, Deserialize)]
struct PaddlePage {
    rec_texts: Vec<String>,
    dt_polys: Vec<Vec<Point>>,
}

impl PaddlePage {
    fn into_detections(self) -> Vec<Detection> {
        if self.rec_texts.len() != self.dt_polys.len() {
            warn!(
                "PaddleOCR dump has {} texts but {} polygons, extra entries ignored",
                self.rec_texts.len(),
                self.dt_polys.len()
            );
        }

        self.rec_texts
            .into_iter()
            .zip(self.dt_polys)
            .map(|(text, polygon)| Detection { text, polygon })
            .collect()
    }
}

/// Accepted dump layouts
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum DetectionDump {
    Detections(Vec<Detection>),
    Page(PaddlePage),
    Pages(Vec<PaddlePage>),
}

/// Parse detections from JSON.
///
/// Accepts a PaddleOCR result object (`rec_texts` + `dt_polys`), a list of
/// such objects (only the first page is used), or a plain list of
/// `{"text", "polygon"}` detections.
pub fn parse_detections(json: &str) -> Result<Vec<Detection>> {
    let dump: DetectionDump = serde_json::from_str(json)?;

    Ok(match dump {
        DetectionDump::Detections(detections) => detections,
        DetectionDump::Page(page) => page.into_detections(),
        DetectionDump::Pages(pages) => pages
            .into_iter()
            .next()
            .map(PaddlePage::into_detections)
            .unwrap_or_default(),
    })
}

/// Reads detections from PaddleOCR JSON dumps on disk
#[derive(Debug, Clone, Copy, Default)]
pub struct PaddleJsonDetector;

impl PaddleJsonDetector {
    pub fn new() -> Self {
        Self
    }
}

impl TextDetector for PaddleJsonDetector {
    fn detect(&self, source: &Path) -> Result<Vec<Detection>> {
        let content = std::fs::read_to_string(source)?;
        let detections = parse_detections(&content)?;
        debug!("Loaded {} detections from {:?}", detections.len(), source);
        Ok(detections)
    }
}

/// Returns the same detections for every source
#[derive(Debug, Clone, Default)]
pub struct StaticDetector {
    detections: Vec<Detection>,
}

impl StaticDetector {
    pub fn new(detections: Vec<Detection>) -> Self {
        Self { detections }
    }
}

impl TextDetector for StaticDetector {
    fn detect(&self, _source: &Path) -> Result<Vec<Detection>> {
        Ok(self.detections.clone())
    }
}
