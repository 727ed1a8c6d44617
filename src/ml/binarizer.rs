//! Multi-label binarization.
//!
//! ```
//! use reeltag::ml::binarizer::MultiLabelBinarizer;
//!
//! let mut binarizer = MultiLabelBinarizer::new();
//! binarizer.fit(&[vec!["Drama".to_string()], vec!["Action".to_string(), "Drama".to_string()]]);
//!
//! assert_eq!(binarizer.classes(), &["Action".to_string(), "Drama".to_string()]);
//! assert_eq!(binarizer.transform_one(&["Drama".to_string()]), vec![false, true]);
//! ```

use std::collections::{BTreeSet, HashMap};

use serde::{Deserialize, Serialize};

/// Maps label sets to indicator vectors over a fixed, sorted label universe.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MultiLabelBinarizer {
    classes: Vec<String>,
    index: HashMap<String, usize>,
}

impl MultiLabelBinarizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fix the label universe to the sorted union of all labels.
    pub fn fit(&mut self, label_sets: &[Vec<String>]) {
        let classes: BTreeSet<&String> = label_sets.iter().flatten().collect();
        self.classes = classes.into_iter().cloned().collect();
        self.index = self
            .classes
            .iter()
            .enumerate()
            .map(|(i, label)| (label.clone(), i))
            .collect();
    }

    /// The sorted label universe.
    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    pub fn num_classes(&self) -> usize {
        self.classes.len()
    }

    /// Whether a label belongs to the fitted universe.
    pub fn contains(&self, label: &str) -> bool {
        self.index.contains_key(label)
    }

    /// Indicator vector for one label set. Labels outside the fitted
    /// universe are ignored.
    pub fn transform_one(&self, labels: &[String]) -> Vec<bool> {
        let mut row = vec![false; self.classes.len()];
        for label in labels {
            if let Some(&i) = self.index.get(label) {
                row[i] = true;
            }
        }
        row
    }

    /// Indicator matrix, one row per label set.
    pub fn transform(&self, label_sets: &[Vec<String>]) -> Vec<Vec<bool>> {
        label_sets.iter().map(|labels| self.transform_one(labels)).collect()
    }

    /// Labels whose indicator is set, in universe order.
    pub fn inverse_transform_one(&self, row: &[bool]) -> Vec<String> {
        row.iter()
            .zip(&self.classes)
            .filter(|(on, _)| **on)
            .map(|(_, label)| label.clone())
            .collect()
    }

    pub fn inverse_transform(&self, rows: &[Vec<bool>]) -> Vec<Vec<String>> {
        rows.iter().map(|row| self.inverse_transform_one(row)).collect()
    }

    /// Labels in `label_sets` that are not part of the fitted universe.
    pub fn unknown_labels<'a>(&self, label_sets: &'a [Vec<String>]) -> BTreeSet<&'a str> {
        label_sets
            .iter()
            .flatten()
            .filter(|label| !self.contains(label))
            .map(String::as_str)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sets(raw: &[&[&str]]) -> Vec<Vec<String>> {
        raw.iter()
            .map(|labels| labels.iter().map(|l| l.to_string()).collect())
            .collect()
    }

    #[test]
    fn test_fit_sorts_and_dedups() {
        let mut binarizer = MultiLabelBinarizer::new();
        binarizer.fit(&sets(&[&["Thriller", "Action"], &["Action"], &[], &["Comedy"]]));

        assert_eq!(binarizer.classes(), &["Action", "Comedy", "Thriller"]);
        assert_eq!(binarizer.num_classes(), 3);
    }

    #[test]
    fn test_round_trip() {
        let label_sets = sets(&[&["Thriller", "Action"], &[], &["Comedy"]]);
        let mut binarizer = MultiLabelBinarizer::new();
        binarizer.fit(&label_sets);

        let rows = binarizer.transform(&label_sets);
        assert_eq!(rows[0], vec![true, false, true]);
        assert_eq!(rows[1], vec![false, false, false]);

        let back = binarizer.inverse_transform(&rows);
        assert_eq!(back, sets(&[&["Action", "Thriller"], &[], &["Comedy"]]));
    }

    #[test]
    fn test_unknown_labels_are_ignored() {
        let mut binarizer = MultiLabelBinarizer::new();
        binarizer.fit(&sets(&[&["Action"], &["Drama"]]));

        let unseen = sets(&[&["Drama", "Western"]]);
        assert_eq!(binarizer.transform(&unseen)[0], vec![false, true]);
        assert_eq!(
            binarizer.unknown_labels(&unseen).into_iter().collect::<Vec<_>>(),
            vec!["Western"]
        );
    }
}
