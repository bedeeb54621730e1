//! Stable "first appearance" ordering for months and weekdays.
//!
//! Chart axes follow the order in which a label first shows up in the ledger,
//! never alphabetical or calendar order.

use std::collections::HashMap;

/// Ordered set of labels, keyed by first occurrence.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FirstSeen {
    labels: Vec<String>,
    positions: HashMap<String, usize>,
}

impl FirstSeen {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `label` if unseen. Returns its position either way.
    pub fn insert(&mut self, label: &str) -> usize {
        if let Some(&pos) = self.positions.get(label) {
            return pos;
        }
        let pos = self.labels.len();
        self.labels.push(label.to_string());
        self.positions.insert(label.to_string(), pos);
        pos
    }

    pub fn position(&self, label: &str) -> Option<usize> {
        self.positions.get(label).copied()
    }

    pub fn contains(&self, label: &str) -> bool {
        self.positions.contains_key(label)
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.labels.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

impl<'a> FromIterator<&'a str> for FirstSeen {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        let mut set = FirstSeen::new();
        for label in iter {
            set.insert(label);
        }
        set
    }
}
