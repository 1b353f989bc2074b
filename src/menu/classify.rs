//! Line classification
//!
//! Finds price tokens inside a line and builds the cleaned dish-name text
//! from whatever is left.

use once_cell::sync::Lazy;
use regex::Regex;

use super::line::Line;

/// Price fused onto the end of a dish name by the OCR engine, e.g. `Lunch Special-12.99`
static FUSED_PRICE_SUFFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"-\d+\.?\d*$").expect("Invalid price suffix regex"));

/// List numbering at the start of a line, e.g. `12. `
static LIST_MARKER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[\d.]+\s+").expect("Invalid list marker regex"));

/// Decimal digits in any script (`Nd`); fractions and numeral letters excluded
static DIGIT: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d").expect("Invalid digit regex"));

/// Words removed before judging whether a token is a bare price
const PRICE_NOISE: [&str; 2] = ["$", "starting at"];

/// A line after price detection
#[derive(Debug, Clone, PartialEq)]
pub struct ClassifiedLine {
    /// Non-price text with list numbering stripped (may be empty)
    pub clean_text: String,
    /// Mean `cy` of the line's tokens
    pub avg_y: f64,
    /// Whether any token on the line looked like a price
    pub has_price: bool,
}

impl ClassifiedLine {
    pub fn is_price_anchor(&self) -> bool {
        self.has_price
    }

    pub fn is_text_candidate(&self) -> bool {
        !self.clean_text.is_empty()
    }
}

/// Whether a token reads as a price.
///
/// After dropping `$` and `starting at` the remainder must be non-empty and
/// either be short (under `max_len` characters) and contain a digit, or the
/// original text must end in a `-<digits>[.<digits>]` suffix.
pub fn is_price_token(text: &str, max_len: usize) -> bool {
    let mut clean = text.to_string();
    for noise in PRICE_NOISE {
        clean = clean.replace(noise, "");
    }
    let clean = clean.trim();

    if clean.is_empty() {
        return false;
    }

    if DIGIT.is_match(clean) && clean.chars().count() < max_len {
        return true;
    }

    FUSED_PRICE_SUFFIX.is_match(text)
}

/// Number of decimal digits in `text`, counted the same way price detection sees them
pub fn count_digits(text: &str) -> usize {
    DIGIT.find_iter(text).count()
}

/// Dish-name part of a token with a fused price suffix, if it has one
pub fn strip_price_suffix(text: &str) -> Option<&str> {
    let found = FUSED_PRICE_SUFFIX.find(text)?;
    let name = text[..found.start()].trim();
    (!name.is_empty()).then_some(name)
}

/// Drop leading list numbering such as `3. ` or `12 `
pub fn strip_list_marker(text: &str) -> &str {
    match LIST_MARKER.find(text) {
        Some(found) => &text[found.end()..],
        None => text,
    }
}

/// Classify a line, visiting tokens in insertion order
pub fn classify_line(line: &Line, max_price_len: usize) -> ClassifiedLine {
    let mut parts: Vec<&str> = Vec::with_capacity(line.len());
    let mut has_price = false;

    for token in line.tokens() {
        let text = token.text.as_str();
        if is_price_token(text, max_price_len) {
            has_price = true;
            if let Some(name) = strip_price_suffix(text) {
                parts.push(name);
            }
        } else {
            parts.push(text);
        }
    }

    let joined = parts.join(" ");
    let clean_text = strip_list_marker(joined.trim()).to_string();

    ClassifiedLine {
        clean_text,
        avg_y: line.avg_y(),
        has_price,
    }
}
