//! Line clustering
//!
//! Groups tokens that share a horizontal band of the image into lines.
//! Tokens are visited top to bottom and only the most recent line is ever
//! considered, so clustering is a single pass with no re-merging.

use tracing::trace;

use super::token::Token;

/// Tokens judged to sit on the same menu line, in insertion order
#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    tokens: Vec<Token>,
}

impl Line {
    fn new(token: Token) -> Self {
        Self { tokens: vec![token] }
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Mean vertical midpoint of the members
    pub fn avg_y(&self) -> f64 {
        self.mean(|t| t.cy)
    }

    /// Mean top edge of the members
    pub fn avg_y_min(&self) -> f64 {
        self.mean(|t| t.y_min)
    }

    /// Mean bottom edge of the members
    pub fn avg_y_max(&self) -> f64 {
        self.mean(|t| t.y_max)
    }

    /// Overlap between the line's averaged span and the token's span,
    /// relative to the token's own height.
    ///
    /// The denominator is the token height, not the union of both spans.
    /// Returns `None` for a zero-height token.
    pub fn overlap_ratio(&self, token: &Token) -> Option<f64> {
        let height = token.height();
        if height <= 0.0 {
            return None;
        }

        let overlap = (self.avg_y_max().min(token.y_max) - self.avg_y_min().max(token.y_min)).max(0.0);
        Some(overlap / height)
    }

    fn mean(&self, field: impl Fn(&Token) -> f64) -> f64 {
        if self.tokens.is_empty() {
            return 0.0;
        }
        self.tokens.iter().map(field).sum::<f64>() / self.tokens.len() as f64
    }
}

/// Cluster tokens into lines, ordered by creation.
///
/// Tokens are stably sorted by `cy`, so ties keep detection order. A token
/// joins the last open line when its overlap ratio exceeds `overlap_threshold`,
/// otherwise it starts a new line.
pub fn cluster_lines(mut tokens: Vec<Token>, overlap_threshold: f64) -> Vec<Line> {
    tokens.sort_by(|a, b| a.cy.total_cmp(&b.cy));

    let mut lines: Vec<Line> = Vec::new();
    for token in tokens {
        let joins_last = lines
            .last()
            .and_then(|line| line.overlap_ratio(&token))
            .is_some_and(|ratio| ratio > overlap_threshold);

        match lines.last_mut() {
            Some(line) if joins_last => line.tokens.push(token),
            _ => {
                trace!("line {} opened at cy={:.1} by '{}'", lines.len(), token.cy, token.text);
                lines.push(Line::new(token));
            }
        }
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token(text: &str, y_min: f64, y_max: f64) -> Token {
        Token {
            text: text.to_string(),
            cx: 0.0,
            cy: (y_min + y_max) / 2.0,
            y_min,
            y_max,
        }
    }

    fn texts(line: &Line) -> Vec<&str> {
        line.tokens().iter().map(|t| t.text.as_str()).collect()
    }

    #[test]
    fn test_empty_input() {
        assert!(cluster_lines(vec![], 0.4).is_empty());
    }

    #[test]
    fn test_same_band_forms_one_line() {
        let tokens = vec![
            token("Kung", 100.0, 120.0),
            token("Pao", 101.0, 121.0),
            token("Chicken", 99.0, 119.0),
        ];

        let lines = cluster_lines(tokens, 0.4);
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].len(), 3);
    }

    #[test]
    fn test_separate_bands_form_separate_lines() {
        let tokens = vec![
            token("Second", 200.0, 220.0),
            token("First", 100.0, 120.0),
        ];

        let lines = cluster_lines(tokens, 0.4);
        assert_eq!(lines.len(), 2);
        assert_eq!(texts(&lines[0]), vec!["First"]);
        assert_eq!(texts(&lines[1]), vec!["Second"]);
    }

    #[test]
    fn test_ties_keep_detection_order() {
        let tokens = vec![
            token("b", 10.0, 30.0),
            token("a", 10.0, 30.0),
            token("c", 10.0, 30.0),
        ];

        let lines = cluster_lines(tokens, 0.4);
        assert_eq!(texts(&lines[0]), vec!["b", "a", "c"]);
    }

    #[test]
    fn test_ratio_uses_token_height() {
        // A tall token that fully covers a thin line: overlap / token height
        // is 10 / 100, well under the threshold, even though the thin line
        // lies entirely inside it.
        let thin = token("thin", 45.0, 55.0);
        let tall = token("tall", 0.0, 100.0);
        let line = Line::new(thin);

        let ratio = line.overlap_ratio(&tall).unwrap();
        assert!((ratio - 0.1).abs() < 1e-9);
    }

    #[test]
    fn test_ratio_at_threshold_does_not_join() {
        // overlap of 8 over a 20px token is exactly 0.4
        let tokens = vec![token("a", 0.0, 20.0), token("b", 12.0, 32.0)];
        let lines = cluster_lines(tokens, 0.4);
        assert_eq!(lines.len(), 2);
    }

    #[test]
    fn test_zero_height_token_starts_own_line() {
        let tokens = vec![token("line", 0.0, 20.0), token("flat", 10.0, 10.0)];

        let lines = cluster_lines(tokens, 0.4);
        assert_eq!(lines.len(), 2);
        assert_eq!(texts(&lines[1]), vec!["flat"]);
    }

    #[test]
    fn test_only_last_line_is_considered() {
        // "late" overlaps "first" by 90/190 but "second" was opened in
        // between, and against "second" the ratio is only 20/190.
        let tokens = vec![
            token("first", 0.0, 100.0),
            token("second", 95.0, 115.0),
            token("late", 10.0, 200.0),
        ];

        let lines = cluster_lines(tokens, 0.4);
        assert_eq!(lines.len(), 3);
        assert_eq!(texts(&lines[2]), vec!["late"]);
    }

    #[test]
    fn test_line_averages() {
        let mut line = Line::new(token("a", 0.0, 20.0));
        line.tokens.push(token("b", 10.0, 30.0));

        assert_eq!(line.avg_y_min(), 5.0);
        assert_eq!(line.avg_y_max(), 25.0);
        assert_eq!(line.avg_y(), 15.0);
    }
}
