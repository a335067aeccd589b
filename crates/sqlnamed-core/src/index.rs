//! Mapping from parameter names to the positional slots they occupy.

/// Name → slots index built while scanning a query.
///
/// Queries carry few distinct parameters, so the index is a vector of
/// entries searched linearly rather than a hash map. Entries keep the order
/// in which names first appear in the query.
///
/// Slots are 0-based indices into the positional argument list. Across all
/// names, every slot in `0..slot_count()` appears exactly once.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PositionIndex {
    entries: Vec<(String, Vec<usize>)>,
    slot_count: usize,
}

impl PositionIndex {
    /// Creates an empty index.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
            slot_count: 0,
        }
    }

    /// Appends `slot` to the slots of `name`, creating the entry if needed.
    pub fn record(&mut self, name: &str, slot: usize) {
        match self.entries.iter_mut().find(|(n, _)| n == name) {
            Some((_, slots)) => slots.push(slot),
            None => self.entries.push((name.to_string(), vec![slot])),
        }
        self.slot_count += 1;
    }

    /// Returns the slots of `name` in query order, or an empty slice if the
    /// query never references it.
    #[must_use]
    pub fn occurrences_of(&self, name: &str) -> &[usize] {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, slots)| slots.as_slice())
            .unwrap_or_default()
    }

    /// Returns true if the query references `name`.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.entries.iter().any(|(n, _)| n == name)
    }

    /// Returns the distinct parameter names in order of first appearance.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(n, _)| n.as_str())
    }

    /// Iterates over `(name, slots)` pairs in order of first appearance.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[usize])> {
        self.entries
            .iter()
            .map(|(n, slots)| (n.as_str(), slots.as_slice()))
    }

    /// Returns the name owning `slot`, if any.
    #[must_use]
    pub fn name_of(&self, slot: usize) -> Option<&str> {
        self.entries
            .iter()
            .find(|(_, slots)| slots.contains(&slot))
            .map(|(n, _)| n.as_str())
    }

    /// Returns the number of distinct names.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the query has no named parameters.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the total number of recorded occurrences.
    #[must_use]
    pub const fn slot_count(&self) -> usize {
        self.slot_count
    }
}
