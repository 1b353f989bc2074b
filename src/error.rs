//! Error types for menu structuring

use thiserror::Error;

/// Errors raised while turning OCR detections into dishes
#[derive(Error, Debug)]
pub enum MenuError {
    #[error("detection #{index} ({text:?}) has an empty polygon")]
    EmptyPolygon { index: usize, text: String },

    #[error("detection #{index} ({text:?}) has a non-finite coordinate")]
    NonFiniteCoordinate { index: usize, text: String },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("text detector error: {0}")]
    Detector(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Crate-wide result type.
pub type Result<T> = std::result::Result<T, MenuError>;
