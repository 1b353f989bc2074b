//! Menu service
//!
//! Owns a text detector and the structuring/filter stages. Build one at
//! startup and pass it by reference to whatever handles requests.

use serde::Serialize;
use std::path::Path;
use std::time::Instant;
use tracing::{debug, info, warn};

use crate::config::AppConfig;
use crate::detector::TextDetector;
use crate::error::Result;
use crate::filter::DishFilter;
use crate::menu::{Dish, MenuStructurer};

/// Number of raw texts echoed to the debug log per request
const PREVIEW_COUNT: usize = 5;

/// Result of processing one menu
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MenuReport {
    /// Time spent in the text detector
    pub inference_time_ms: u64,
    /// Detections returned by the text detector
    pub raw_detection_count: usize,
    /// Dishes found
    pub dishes: Vec<Dish>,
    /// Names removed by the dish filter
    pub filtered_out: Vec<String>,
}

/// Detector plus structuring pipeline
pub struct MenuService<D: TextDetector> {
    detector: D,
    structurer: MenuStructurer,
    filter: Option<DishFilter>,
}

impl<D: TextDetector> MenuService<D> {
    /// Create a service, validating the configuration up front
    pub fn new(detector: D, config: AppConfig) -> Result<Self> {
        config.validate()?;

        let structurer = MenuStructurer::with_config(config.structuring)?;
        let filter = config.filter.enabled.then(|| DishFilter::new(config.filter));

        info!(
            "Menu service ready (dish filter {})",
            if filter.is_some() { "enabled" } else { "disabled" }
        );

        Ok(Self {
            detector,
            structurer,
            filter,
        })
    }

    /// Detect, structure and filter one menu
    pub fn process(&self, source: &Path) -> Result<MenuReport> {
        let start = Instant::now();
        let detections = self.detector.detect(source)?;
        let inference_time = start.elapsed();

        debug!("Raw OCR text count: {}", detections.len());
        if detections.is_empty() {
            warn!("OCR detected no text in {:?}", source);
        }
        for detection in detections.iter().take(PREVIEW_COUNT) {
            debug!("  raw text: {}", detection.text);
        }

        let dishes = self.structurer.structure(&detections)?;
        let (dishes, filtered_out) = match &self.filter {
            Some(filter) => filter.filter(dishes),
            None => (dishes, Vec::new()),
        };

        debug!(
            "Processed menu item count: {} ({} filtered out)",
            dishes.len(),
            filtered_out.len()
        );

        Ok(MenuReport {
            inference_time_ms: inference_time.as_millis() as u64,
            raw_detection_count: detections.len(),
            dishes,
            filtered_out,
        })
    }
}
