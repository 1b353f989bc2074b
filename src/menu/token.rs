//! Token normalization
//!
//! Turns raw OCR detections into tokens with the vertical and horizontal
//! extents the rest of the pipeline works with.

use serde::{Deserialize, Serialize};

use crate::error::{MenuError, Result};

/// A polygon vertex in image pixel space (x, y)
pub type Point = (f64, f64);

/// Raw OCR output for a single text region
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Detection {
    /// Recognized text
    pub text: String,
    /// Bounding polygon points
    pub polygon: Vec<Point>,
}

impl Detection {
    pub fn new(text: impl Into<String>, polygon: Vec<Point>) -> Self {
        Self {
            text: text.into(),
            polygon,
        }
    }

    /// Axis-aligned rectangle polygon, clockwise from the top-left corner
    pub fn from_rect(text: impl Into<String>, x: f64, y: f64, width: f64, height: f64) -> Self {
        Self::new(
            text,
            vec![
                (x, y),
                (x + width, y),
                (x + width, y + height),
                (x, y + height),
            ],
        )
    }
}

/// Normalized detection
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    /// Recognized text, unchanged
    pub text: String,
    /// Leftmost x across the polygon
    pub cx: f64,
    /// Vertical midpoint
    pub cy: f64,
    /// Top edge
    pub y_min: f64,
    /// Bottom edge
    pub y_max: f64,
}

impl Token {
    /// Normalize one detection. `index` is only used for error reporting.
    pub fn from_detection(index: usize, detection: &Detection) -> Result<Self> {
        let Some(&(first_x, first_y)) = detection.polygon.first() else {
            return Err(MenuError::EmptyPolygon {
                index,
                text: detection.text.clone(),
            });
        };

        let mut x_min = first_x;
        let mut y_min = first_y;
        let mut y_max = first_y;
        for &(x, y) in &detection.polygon {
            if !x.is_finite() || !y.is_finite() {
                return Err(MenuError::NonFiniteCoordinate {
                    index,
                    text: detection.text.clone(),
                });
            }
            x_min = x_min.min(x);
            y_min = y_min.min(y);
            y_max = y_max.max(y);
        }

        Ok(Self {
            text: detection.text.clone(),
            cx: x_min,
            cy: (y_min + y_max) / 2.0,
            y_min,
            y_max,
        })
    }

    /// Vertical extent of the token
    pub fn height(&self) -> f64 {
        self.y_max - self.y_min
    }
}

/// Normalize every detection, failing on the first malformed one
pub fn normalize(detections: &[Detection]) -> Result<Vec<Token>> {
    detections
        .iter()
        .enumerate()
        .map(|(index, detection)| Token::from_detection(index, detection))
        .collect()
}
