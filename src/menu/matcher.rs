//! Anchor matching
//!
//! Ties every price line to a dish name: either the text on the price line
//! itself, or the vertically closest text line within a distance limit.
//! There is no horizontal tie-break, so multi-column menus can pair a price
//! with a name from the neighbouring column.

use super::classify::ClassifiedLine;

/// A price anchor paired with its dish name
#[derive(Debug, Clone, PartialEq)]
pub struct AnchorMatch<'a> {
    /// Index of the anchor in the classified line list
    pub anchor: usize,
    /// Index of the line the name came from
    pub source: usize,
    /// Matched dish name
    pub name: &'a str,
    /// Vertical distance between anchor and source (0 for same-line matches)
    pub distance: f64,
}

impl AnchorMatch<'_> {
    pub fn is_same_line(&self) -> bool {
        self.anchor == self.source
    }
}

/// Match every price anchor, in line order. Anchors with no candidate
/// closer than `max_distance` are left out.
pub fn match_anchors(lines: &[ClassifiedLine], max_distance: f64) -> Vec<AnchorMatch<'_>> {
    let candidates: Vec<(usize, &ClassifiedLine)> = lines
        .iter()
        .enumerate()
        .filter(|(_, line)| line.is_text_candidate())
        .collect();

    lines
        .iter()
        .enumerate()
        .filter(|(_, line)| line.is_price_anchor())
        .filter_map(|(index, anchor)| match_anchor(index, anchor, &candidates, max_distance))
        .collect()
}

fn match_anchor<'a>(
    index: usize,
    anchor: &'a ClassifiedLine,
    candidates: &[(usize, &'a ClassifiedLine)],
    max_distance: f64,
) -> Option<AnchorMatch<'a>> {
    if anchor.is_text_candidate() {
        return Some(AnchorMatch {
            anchor: index,
            source: index,
            name: &anchor.clean_text,
            distance: 0.0,
        });
    }

    // min_by keeps the first of equally close candidates
    let (source, candidate, distance) = candidates
        .iter()
        .map(|&(source, candidate)| (source, candidate, (candidate.avg_y - anchor.avg_y).abs()))
        .min_by(|a, b| a.2.total_cmp(&b.2))?;

    (distance < max_distance).then(|| AnchorMatch {
        anchor: index,
        source,
        name: &candidate.clean_text,
        distance,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(text: &str, avg_y: f64, has_price: bool) -> ClassifiedLine {
        ClassifiedLine {
            clean_text: text.to_string(),
            avg_y,
            has_price,
        }
    }

    #[test]
    fn test_same_line_match() {
        let lines = vec![line("Kung Pao Chicken", 50.0, true)];
        let matches = match_anchors(&lines, 120.0);

        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].name, "Kung Pao Chicken");
        assert!(matches[0].is_same_line());
        assert_eq!(matches[0].distance, 0.0);
    }

    #[test]
    fn test_price_below_name() {
        let lines = vec![line("Pad Thai", 100.0, false), line("", 180.0, true)];
        let matches = match_anchors(&lines, 120.0);

        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].name, "Pad Thai");
        assert_eq!(matches[0].source, 0);
        assert_eq!(matches[0].anchor, 1);
        assert_eq!(matches[0].distance, 80.0);
    }

    #[test]
    fn test_too_far_is_dropped() {
        let lines = vec![line("Pad Thai", 100.0, false), line("", 260.0, true)];
        assert!(match_anchors(&lines, 120.0).is_empty());
    }

    #[test]
    fn test_distance_limit_is_exclusive() {
        let lines = vec![line("Pad Thai", 100.0, false), line("", 220.0, true)];
        assert!(match_anchors(&lines, 120.0).is_empty());
    }

    #[test]
    fn test_no_candidates() {
        let lines = vec![line("", 10.0, true), line("", 40.0, true)];
        assert!(match_anchors(&lines, 120.0).is_empty());
    }

    #[test]
    fn test_nearest_candidate_wins() {
        let lines = vec![
            line("Far", 0.0, false),
            line("Near", 90.0, false),
            line("", 100.0, true),
        ];
        let matches = match_anchors(&lines, 120.0);
        assert_eq!(matches[0].name, "Near");
    }

    #[test]
    fn test_tie_keeps_first_candidate() {
        let lines = vec![
            line("Above", 50.0, false),
            line("", 100.0, true),
            line("Below", 150.0, false),
        ];
        let matches = match_anchors(&lines, 120.0);
        assert_eq!(matches[0].name, "Above");
    }

    #[test]
    fn test_anchor_with_text_is_also_a_candidate() {
        let lines = vec![line("Wonton Soup", 100.0, true), line("", 130.0, true)];
        let matches = match_anchors(&lines, 120.0);

        assert_eq!(matches.len(), 2);
        assert!(matches.iter().all(|m| m.name == "Wonton Soup"));
    }
}
