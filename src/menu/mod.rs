//! Menu structuring pipeline
//!
//! Reconstructs dish names from unordered OCR detections:
//! - [`token`]: detections -> tokens with vertical/horizontal extents
//! - [`line`]: tokens -> lines by vertical overlap
//! - [`classify`]: lines -> price anchors and text candidates
//! - [`matcher`]: price anchors -> dish names by vertical proximity
//! - [`assemble`]: dish names -> deduplicated dish list
//!
//! Every call works on its own data; a structurer can be shared freely
//! between threads.

pub mod assemble;
pub mod classify;
pub mod line;
pub mod matcher;
pub mod token;

pub use assemble::{Dish, DishSet};
pub use classify::{classify_line, is_price_token, ClassifiedLine};
pub use line::{cluster_lines, Line};
pub use matcher::{match_anchors, AnchorMatch};
pub use token::{normalize, Detection, Point, Token};

use tracing::debug;

use crate::config::StructuringConfig;
use crate::error::Result;

/// Turns OCR detections into a dish list
#[derive(Debug, Clone, Default)]
pub struct MenuStructurer {
    config: StructuringConfig,
}

impl MenuStructurer {
    /// Create a structurer with default thresholds
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a structurer with custom thresholds
    pub fn with_config(config: StructuringConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &StructuringConfig {
        &self.config
    }

    /// Classified lines in creation order, before anchor matching
    pub fn layout(&self, detections: &[Detection]) -> Result<Vec<ClassifiedLine>> {
        let tokens = normalize(detections)?;
        let lines = cluster_lines(tokens, self.config.line_overlap_threshold);

        Ok(lines
            .iter()
            .map(|line| classify_line(line, self.config.max_price_len))
            .collect())
    }

    /// Run the full pipeline
    pub fn structure(&self, detections: &[Detection]) -> Result<Vec<Dish>> {
        if detections.is_empty() {
            return Ok(Vec::new());
        }

        let lines = self.layout(detections)?;
        let matches = match_anchors(&lines, self.config.max_anchor_distance);

        let mut dishes = DishSet::new(&self.config.denylist, self.config.min_name_len);
        for m in &matches {
            dishes.insert(m.name);
        }

        debug!(
            "Structured {} detections into {} lines, {} anchors, {} matches, {} dishes",
            detections.len(),
            lines.len(),
            lines.iter().filter(|l| l.is_price_anchor()).count(),
            matches.len(),
            dishes.len()
        );

        Ok(dishes.into_dishes())
    }
}

/// Convenience function to structure detections with default thresholds
pub fn structure_menu(detections: &[Detection]) -> Result<Vec<Dish>> {
    MenuStructurer::new().structure(detections)
}
