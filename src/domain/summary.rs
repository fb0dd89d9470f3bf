use serde::ser::{Serialize, SerializeMap, Serializer};

use super::detection::Detection;

/// Occurrence count per class name, kept in first-seen order.
///
/// Class names are compared exactly as the detector emitted them. Equality ignores
/// insertion order. Serializes as a JSON object in ranked order (see
/// [`ClassCounts::ranked`]).
#[derive(Debug, Clone, Default)]
pub struct ClassCounts {
    entries: Vec<(String, usize)>,
}

impl ClassCounts {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `count` occurrences of `class_name`.
    pub fn add(&mut self, class_name: &str, count: usize) {
        match self.entries.iter_mut().find(|(name, _)| name == class_name) {
            Some((_, existing)) => *existing += count,
            None => self.entries.push((class_name.to_string(), count)),
        }
    }

    pub fn get(&self, class_name: &str) -> usize {
        self.entries
            .iter()
            .find(|(name, _)| name == class_name)
            .map(|(_, count)| *count)
            .unwrap_or(0)
    }

    pub fn contains(&self, class_name: &str) -> bool {
        self.entries.iter().any(|(name, _)| name == class_name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of all counts.
    pub fn total(&self) -> usize {
        self.entries.iter().map(|(_, count)| count).sum()
    }

    /// Entries in insertion (first-seen) order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.entries.iter().map(|(name, count)| (name.as_str(), *count))
    }

    /// Entries by descending count; equal counts keep first-seen order.
    pub fn ranked(&self) -> Vec<(&str, usize)> {
        let mut ranked: Vec<_> = self.iter().collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        ranked
    }
}

impl PartialEq for ClassCounts {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().all(|(name, count)| other.get(name) == count)
    }
}

impl Eq for ClassCounts {}

impl<S: AsRef<str>> FromIterator<(S, usize)> for ClassCounts {
    fn from_iter<I: IntoIterator<Item = (S, usize)>>(iter: I) -> Self {
        let mut counts = ClassCounts::new();
        for (name, count) in iter {
            counts.add(name.as_ref(), count);
        }
        counts
    }
}

impl Serialize for ClassCounts {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let ranked = self.ranked();
        let mut map = serializer.serialize_map(Some(ranked.len()))?;
        for (name, count) in ranked {
            map.serialize_entry(name, &count)?;
        }
        map.end()
    }
}

/// Aggregated view of one inference call after the object budget was applied.
#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    pub counts: ClassCounts,
    pub total: usize,
    /// Mean confidence of the retained detections, two decimals, 0 when empty.
    pub confidence: f64,
}

/// Keeps at most `max_objects` detections.
///
/// Within budget the input comes back untouched. Over budget the detections are
/// stable-sorted by confidence (highest first) and cut, so equal confidences keep
/// their original relative order.
pub fn retain_top(mut detections: Vec<Detection>, max_objects: usize) -> Vec<Detection> {
    if detections.len() > max_objects {
        detections.sort_by(|a, b| b.confidence.total_cmp(&a.confidence));
        detections.truncate(max_objects);
    }
    detections
}

pub fn summarize(detections: Vec<Detection>, max_objects: usize) -> Summary {
    let retained = retain_top(detections, max_objects);

    let mut counts = ClassCounts::new();
    for det in &retained {
        counts.add(&det.class_name, 1);
    }

    let confidence = if retained.is_empty() {
        0.0
    } else {
        let sum: f64 = retained.iter().map(|d| d.confidence as f64).sum();
        round2(sum / retained.len() as f64)
    };

    Summary { counts, total: retained.len(), confidence }
}

/// Rounds half away from zero to two decimals.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dets(items: &[(&str, f32)]) -> Vec<Detection> {
        items.iter().map(|(c, s)| Detection::new(*c, *s)).collect()
    }

    #[test]
    fn within_budget_keeps_everything_in_order() {
        let input = dets(&[("dog", 0.3), ("cat", 0.9), ("dog", 0.6)]);
        assert_eq!(retain_top(input.clone(), 3), input);
        assert_eq!(retain_top(input.clone(), 10), input);
    }

    #[test]
    fn over_budget_keeps_highest_confidences() {
        let input = dets(&[
            ("a", 0.2),
            ("b", 0.9),
            ("c", 0.5),
            ("d", 0.7),
            ("e", 0.1),
        ]);
        let kept = retain_top(input.clone(), 3);
        assert_eq!(kept.len(), 3);

        let min_kept = kept.iter().map(|d| d.confidence).fold(f32::MAX, f32::min);
        let dropped: Vec<_> = input.iter().filter(|d| !kept.contains(d)).collect();
        assert_eq!(dropped.len(), 2);
        assert!(dropped.iter().all(|d| d.confidence <= min_kept));
    }

    #[test]
    fn equal_confidence_ties_keep_first_seen() {
        let input = dets(&[("x", 0.5), ("first", 0.8), ("second", 0.8), ("third", 0.8)]);
        let kept = retain_top(input, 2);
        let names: Vec<_> = kept.iter().map(|d| d.class_name.as_str()).collect();
        assert_eq!(names, vec!["first", "second"]);
    }

    #[test]
    fn zero_budget_retains_nothing() {
        let summary = summarize(dets(&[("car", 0.9), ("car", 0.8)]), 0);
        assert!(summary.counts.is_empty());
        assert_eq!(summary.total, 0);
        assert_eq!(summary.confidence, 0.0);
    }

    #[test]
    fn empty_input_is_not_an_error() {
        let summary = summarize(Vec::new(), 50);
        assert!(summary.counts.is_empty());
        assert_eq!(summary.total, 0);
        assert_eq!(summary.confidence, 0.0);
    }

    #[test]
    fn counts_sum_to_retained_not_raw() {
        let input = dets(&[
            ("person", 0.9),
            ("person", 0.85),
            ("car", 0.8),
            ("car", 0.3),
            ("dog", 0.2),
        ]);
        let summary = summarize(input, 3);
        assert_eq!(summary.total, 3);
        assert_eq!(summary.counts.total(), 3);
        assert_eq!(summary.counts.get("person"), 2);
        assert_eq!(summary.counts.get("car"), 1);
        assert!(!summary.counts.contains("dog"));
    }

    #[test]
    fn counts_are_case_sensitive() {
        let summary = summarize(dets(&[("Car", 0.9), ("car", 0.9)]), 10);
        assert_eq!(summary.counts.get("Car"), 1);
        assert_eq!(summary.counts.get("car"), 1);
        assert_eq!(summary.counts.len(), 2);
    }

    #[test]
    fn end_to_end_budget_example() {
        let summary = summarize(dets(&[("car", 0.9), ("car", 0.8), ("person", 0.4)]), 2);
        assert_eq!(summary.counts, ClassCounts::from_iter([("car", 2)]));
        assert_eq!(summary.total, 2);
        assert!((summary.confidence - 0.85).abs() < 1e-9);
    }

    #[test]
    fn confidence_is_mean_rounded_to_two_decimals() {
        // mean 0.55500000715 (f32 inputs) -> 0.56; 0.3333 -> 0.33
        let summary = summarize(dets(&[("a", 0.5), ("b", 0.61)]), 10);
        assert!((summary.confidence - 0.56).abs() < 1e-9);
        let summary = summarize(dets(&[("a", 0.2), ("b", 0.3), ("c", 0.5)]), 10);
        assert!((summary.confidence - 0.33).abs() < 1e-9);
    }

    #[test]
    fn exact_ties_round_half_away_from_zero() {
        // 0.125 and 0.375 are exact in binary; half-to-even would give 0.12 / 0.38.
        let summary = summarize(dets(&[("a", 0.125)]), 10);
        assert_eq!(summary.confidence, 0.13);
        let summary = summarize(dets(&[("a", 0.25), ("b", 0.5)]), 10);
        assert_eq!(summary.confidence, 0.38);
    }

    #[test]
    fn counts_equality_ignores_insertion_order() {
        let a = ClassCounts::from_iter([("car", 1), ("person", 1)]);
        let b = ClassCounts::from_iter([("person", 1), ("car", 1)]);
        assert_eq!(a, b);
        assert_ne!(a, ClassCounts::from_iter([("car", 1), ("person", 2)]));
        assert_ne!(a, ClassCounts::from_iter([("car", 1)]));

        let forward = summarize(dets(&[("car", 0.5), ("dog", 0.5)]), 10);
        let reversed = summarize(dets(&[("dog", 0.5), ("car", 0.5)]), 10);
        assert_eq!(forward, reversed);
    }

    #[test]
    fn ranked_orders_by_count_then_first_seen() {
        let counts = ClassCounts::from_iter([("cup", 1), ("dog", 3), ("cat", 1), ("bird", 3)]);
        assert_eq!(
            counts.ranked(),
            vec![("dog", 3), ("bird", 3), ("cup", 1), ("cat", 1)]
        );
    }

    #[test]
    fn serializes_in_ranked_order() {
        let counts = ClassCounts::from_iter([("cup", 1), ("person", 4)]);
        let json = serde_json::to_string(&counts).unwrap();
        assert_eq!(json, r#"{"person":4,"cup":1}"#);
    }
}
