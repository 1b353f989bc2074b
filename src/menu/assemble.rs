//! Result assembly

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use tracing::trace;

/// A dish name recovered from the menu
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Dish {
    #[serde(rename = "dish")]
    pub name: String,
}

impl Dish {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// Deduplicating dish collector.
///
/// Keeps the first occurrence of each name, so output follows anchor order.
/// Callers should still treat the result as a set.
#[derive(Debug)]
pub struct DishSet<'a> {
    denylist: &'a [String],
    min_len: usize,
    seen: HashSet<String>,
    dishes: Vec<Dish>,
}

impl<'a> DishSet<'a> {
    pub fn new(denylist: &'a [String], min_len: usize) -> Self {
        Self {
            denylist,
            min_len,
            seen: HashSet::new(),
            dishes: Vec::new(),
        }
    }

    /// Whether a matched name may become a dish: not an exact
    /// (case-sensitive) denylist entry and at least `min_len` characters.
    pub fn accepts(&self, name: &str) -> bool {
        name.chars().count() >= self.min_len && !self.denylist.iter().any(|entry| entry == name)
    }

    /// Add a name, returning true if it was new and accepted
    pub fn insert(&mut self, name: &str) -> bool {
        if !self.accepts(name) {
            trace!("rejected matched name '{}'", name);
            return false;
        }
        if !self.seen.insert(name.to_string()) {
            return false;
        }
        self.dishes.push(Dish::new(name));
        true
    }

    pub fn len(&self) -> usize {
        self.dishes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dishes.is_empty()
    }

    pub fn into_dishes(self) -> Vec<Dish> {
        self.dishes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn denylist() -> Vec<String> {
        ["SALAD", "SIDES", "DRINKS", "NEW!", "RICE BOWL", "EXTRAS"]
            .iter()
            .map(|s| s.to_string())
            .collect()
    }

    #[test]
    fn test_duplicates_are_dropped() {
        let deny = denylist();
        let mut set = DishSet::new(&deny, 3);
        assert!(set.is_empty());

        assert!(set.insert("Pho"));
        assert!(!set.insert("Pho"));
        assert!(set.insert("Banh Mi"));
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_denylist_is_exact_and_case_sensitive() {
        let deny = denylist();
        let mut set = DishSet::new(&deny, 3);

        assert!(!set.insert("SIDES"));
        assert!(!set.insert("RICE BOWL"));
        assert!(set.is_empty());
        assert!(set.insert("Sides"));
        assert!(set.insert("SIDES OF RICE"));
    }

    #[test]
    fn test_minimum_length() {
        let deny = denylist();
        let mut set = DishSet::new(&deny, 3);

        assert!(!set.insert("OK"));
        assert!(!set.insert(""));
        assert!(set.insert("Pho"));
    }

    #[test]
    fn test_length_counts_characters() {
        let deny = denylist();
        let set = DishSet::new(&deny, 3);

        // two characters, six bytes
        assert!(!set.accepts("炒饭"));
        assert!(set.accepts("炒河粉"));
    }

    #[test]
    fn test_order_follows_insertion() {
        let deny = denylist();
        let mut set = DishSet::new(&deny, 3);
        set.insert("Zucchini Fries");
        set.insert("Apple Pie");
        set.insert("Zucchini Fries");

        let names: Vec<String> = set.into_dishes().into_iter().map(|d| d.name).collect();
        assert_eq!(names, vec!["Zucchini Fries", "Apple Pie"]);
    }

    #[test]
    fn test_dish_serializes_as_dish_field() {
        let json = serde_json::to_string(&Dish::new("Pho")).unwrap();
        assert_eq!(json, r#"{"dish":"Pho"}"#);
    }
}
