//! Positional argument slots filled by name.

use tracing::trace;

use crate::index::PositionIndex;
use crate::value::SqlValue;

/// Fixed-length list of positional arguments.
///
/// A slot is `None` until a value is assigned to the name that owns it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParameterStore {
    slots: Vec<Option<SqlValue>>,
}

impl ParameterStore {
    /// Creates a store with `len` unset slots.
    #[must_use]
    pub fn with_len(len: usize) -> Self {
        Self {
            slots: vec![None; len],
        }
    }

    /// Writes `value` into every slot that `index` maps `name` to.
    ///
    /// Names the query never references are ignored. Returns the number of
    /// slots written.
    pub fn assign(&mut self, index: &PositionIndex, name: &str, value: &SqlValue) -> usize {
        let slots = index.occurrences_of(name);
        if slots.is_empty() {
            trace!(name, "Ignoring value for parameter not present in query");
            return 0;
        }

        let mut written = 0;
        for &slot in slots {
            if let Some(target) = self.slots.get_mut(slot) {
                *target = Some(value.clone());
                written += 1;
            }
        }
        written
    }

    /// Returns the current slot contents in positional order.
    #[must_use]
    pub fn snapshot(&self) -> &[Option<SqlValue>] {
        &self.slots
    }

    /// Returns the value in `slot`, if it is set.
    #[must_use]
    pub fn get(&self, slot: usize) -> Option<&SqlValue> {
        self.slots.get(slot).and_then(Option::as_ref)
    }

    /// Returns the number of slots.
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Returns true if the store has no slots.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Returns true if every slot has a value.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.slots.iter().all(Option::is_some)
    }

    /// Unsets every slot, keeping the length.
    pub fn clear(&mut self) {
        self.slots.iter_mut().for_each(|slot| *slot = None);
    }

    /// Consumes the store, returning its slots.
    #[must_use]
    pub fn into_slots(self) -> Vec<Option<SqlValue>> {
        self.slots
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn index() -> PositionIndex {
        let mut index = PositionIndex::new();
        index.record("x", 0);
        index.record("y", 1);
        index.record("x", 2);
        index
    }

    #[test]
    fn test_new_store_is_unset() {
        let store = ParameterStore::with_len(3);
        assert_eq!(store.len(), 3);
        assert_eq!(store.snapshot(), &[None, None, None]);
        assert!(!store.is_complete());
    }

    #[test]
    fn test_assign_fans_out_to_every_slot() {
        let index = index();
        let mut store = ParameterStore::with_len(3);
        let written = store.assign(&index, "x", &SqlValue::Int(5));
        assert_eq!(written, 2);
        assert_eq!(
            store.snapshot(),
            &[Some(SqlValue::Int(5)), None, Some(SqlValue::Int(5))]
        );
    }

    #[test]
    fn test_assign_unknown_name_is_noop() {
        let index = index();
        let mut store = ParameterStore::with_len(3);
        assert_eq!(store.assign(&index, "nope", &SqlValue::Int(1)), 0);
        assert_eq!(store, ParameterStore::with_len(3));
    }

    #[test]
    fn test_assign_overwrites() {
        let index = index();
        let mut store = ParameterStore::with_len(3);
        store.assign(&index, "y", &SqlValue::Int(1));
        store.assign(&index, "y", &SqlValue::Text(String::from("two")));
        assert_eq!(store.get(1), Some(&SqlValue::Text(String::from("two"))));
    }

    #[test]
    fn test_clear_keeps_length() {
        let index = index();
        let mut store = ParameterStore::with_len(3);
        store.assign(&index, "x", &SqlValue::Null);
        store.assign(&index, "y", &SqlValue::Null);
        assert!(store.is_complete());
        store.clear();
        assert_eq!(store.len(), 3);
        assert!(store.get(0).is_none());
    }
}
