use crate::common::FieldVec;
use crate::copy::SkipReason;
use indexmap::IndexMap;
use itertools::Itertools;
use std::fmt::Display;

/// What a copy operation did to the destination.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CopySummary {
    copied: FieldVec,
    skipped: IndexMap<String, SkipReason>,
    embedded: IndexMap<String, usize>,
}

impl CopySummary {
    pub fn new() -> Self {
        CopySummary::default()
    }

    pub(crate) fn record_copied(&mut self, field: &str) {
        self.copied.push(field.to_string());
    }

    pub(crate) fn record_skipped(&mut self, field: &str, reason: SkipReason) {
        self.skipped.insert(field.to_string(), reason);
    }

    pub(crate) fn record_embedded(&mut self, field: &str, count: usize) {
        self.embedded.insert(field.to_string(), count);
    }

    /// Scalar fields written to the destination, in plan order.
    pub fn copied_fields(&self) -> &[String] {
        &self.copied
    }

    pub fn was_copied(&self, field: &str) -> bool {
        self.copied.iter().any(|copied| copied == field)
    }

    pub fn skipped_fields(&self) -> impl Iterator<Item = (&str, SkipReason)> {
        self.skipped.iter().map(|(field, reason)| (field.as_str(), *reason))
    }

    pub fn skip_reason(&self, field: &str) -> Option<SkipReason> {
        self.skipped.get(field).copied()
    }

    /// Children appended to collection `field`, or `None` when the collection
    /// was not part of the copy.
    pub fn duplicated_children(&self, field: &str) -> Option<usize> {
        self.embedded.get(field).copied()
    }

    /// Total children appended across all collections, top level only.
    pub fn total_duplicated(&self) -> usize {
        self.embedded.values().sum()
    }

    pub fn is_empty(&self) -> bool {
        self.copied.is_empty() && self.skipped.is_empty() && self.total_duplicated() == 0
    }
}

impl Display for CopySummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "copied [{}], skipped [{}], duplicated [{}]",
            self.copied.iter().join(", "),
            self.skipped
                .iter()
                .map(|(field, reason)| format!("{}: {:?}", field, reason))
                .join(", "),
            self.embedded
                .iter()
                .map(|(field, count)| format!("{}: {}", field, count))
                .join(", ")
        )
    }
}
