//! MenuSnap - dish names from photographed menus
//!
//! Rebuilds menu structure from the flat word list an OCR engine reports:
//! tokens are clustered into lines by vertical overlap, lines are tagged as
//! prices and/or text, and every price is tied to the nearest dish name.

pub mod config;
pub mod detector;
pub mod error;
pub mod filter;
pub mod menu;
pub mod service;

pub use config::{AppConfig, FilterConfig, OutputConfig, OutputFormat, StructuringConfig};
pub use detector::{parse_detections, PaddleJsonDetector, StaticDetector, TextDetector};
pub use error::{MenuError, Result};
pub use filter::{DishFilter, Rejection};
pub use menu::{structure_menu, Detection, Dish, MenuStructurer, Point};
pub use service::{MenuReport, MenuService};
