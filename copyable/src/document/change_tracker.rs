use crate::common::{FieldVec, Value};
use indexmap::IndexMap;

/// Records which scalar fields of one document have been assigned since the
/// document was instantiated.
///
/// Membership is value independent: assigning a field marks it even when the
/// new value equals the old one, and reassigning never unmarks it. For every
/// marked field the tracker keeps the value the field held right before its
/// first assignment. Identity is never tracked because it cannot be assigned.
#[derive(Debug, Clone, Default)]
pub struct ChangeTracker {
    originals: IndexMap<String, Value>,
}

impl ChangeTracker {
    pub fn new() -> Self {
        ChangeTracker {
            originals: IndexMap::new(),
        }
    }

    /// Marks `field` as changed. Only the first call per field keeps
    /// `previous`.
    pub(crate) fn record(&mut self, field: &str, previous: Value) {
        if !self.originals.contains_key(field) {
            self.originals.insert(field.to_string(), previous);
        }
    }

    pub fn contains(&self, field: &str) -> bool {
        self.originals.contains_key(field)
    }

    /// Changed field names in first-assignment order.
    pub fn changed_fields(&self) -> FieldVec {
        self.originals.keys().cloned().collect()
    }

    /// The value `field` held before it was first assigned, if it changed.
    pub fn original_value(&self, field: &str) -> Option<&Value> {
        self.originals.get(field)
    }

    pub fn len(&self) -> usize {
        self.originals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.originals.is_empty()
    }

    /// Forgets all recorded changes, e.g. after the document was persisted.
    pub fn clear(&mut self) {
        self.originals.clear();
    }
}
