//! Dish-name filter
//!
//! Pattern-based rejection of strings that survive structuring but are not
//! dishes: phone numbers, street addresses, opening hours, bare numbers.
//! Runs after the structuring pipeline and never feeds back into it.

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use crate::config::FilterConfig;
use crate::menu::classify::count_digits;
use crate::menu::Dish;

static NUMERIC_ONLY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[\d\s\-.]+$").expect("Invalid numeric regex"));

static PHONE_NUMBER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\(?\d{3}\)?[\s\-]?\d{3}[\s\-]?\d{4}$").expect("Invalid phone number regex")
});

static LETTER_RUN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[a-zA-Z]{2,}").expect("Invalid letter run regex"));

/// Shortest name the filter lets through, in characters
const MIN_FILTERED_LEN: usize = 3;

/// Why a name was rejected
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    TooShort,
    NumericOnly,
    PhoneNumber,
    Address(String),
    MostlyDigits,
    GenericWord,
    NoLetters,
}

impl std::fmt::Display for Rejection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Rejection::TooShort => write!(f, "too short"),
            Rejection::NumericOnly => write!(f, "numbers only"),
            Rejection::PhoneNumber => write!(f, "phone number"),
            Rejection::Address(keyword) => write!(f, "address keyword '{keyword}'"),
            Rejection::MostlyDigits => write!(f, "mostly digits"),
            Rejection::GenericWord => write!(f, "generic word"),
            Rejection::NoLetters => write!(f, "no letters"),
        }
    }
}

/// Rejects non-dish strings from a structured dish list
#[derive(Debug, Clone, Default)]
pub struct DishFilter {
    config: FilterConfig,
}

impl DishFilter {
    pub fn new(config: FilterConfig) -> Self {
        Self { config }
    }

    /// Check a single name, reporting the first rule it breaks
    pub fn check(&self, name: &str) -> Result<(), Rejection> {
        let text = name.trim();
        let len = text.chars().count();

        if len < MIN_FILTERED_LEN {
            return Err(Rejection::TooShort);
        }
        if NUMERIC_ONLY.is_match(text) {
            return Err(Rejection::NumericOnly);
        }
        if PHONE_NUMBER.is_match(text) {
            return Err(Rejection::PhoneNumber);
        }

        // Substring match: short keywords like "dr" also hit inside words
        let lower = text.to_lowercase();
        if let Some(keyword) = self
            .config
            .address_keywords
            .iter()
            .find(|keyword| lower.contains(keyword.as_str()))
        {
            return Err(Rejection::Address(keyword.clone()));
        }

        let digits = count_digits(text);
        if digits as f64 > len as f64 * self.config.max_digit_ratio {
            return Err(Rejection::MostlyDigits);
        }

        if self.config.ignore_words.iter().any(|word| *word == lower) {
            return Err(Rejection::GenericWord);
        }

        if !LETTER_RUN.is_match(text) {
            return Err(Rejection::NoLetters);
        }

        Ok(())
    }

    pub fn is_valid_dish_name(&self, name: &str) -> bool {
        self.check(name).is_ok()
    }

    /// Split dishes into kept and rejected, preserving order
    pub fn filter(&self, dishes: Vec<Dish>) -> (Vec<Dish>, Vec<String>) {
        let mut kept = Vec::with_capacity(dishes.len());
        let mut rejected = Vec::new();

        for dish in dishes {
            match self.check(&dish.name) {
                Ok(()) => kept.push(dish),
                Err(reason) => {
                    debug!("Filtered out non-dish '{}': {}", dish.name, reason);
                    rejected.push(dish.name);
                }
            }
        }

        (kept, rejected)
    }
}
