use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Completion flags keyed by 0-based step index.
///
/// Absent entries mean "not completed". Entries at or beyond the current
/// guide length are kept as-is but never counted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProgressMap(BTreeMap<usize, bool>);

impl ProgressMap {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A map with every index in `0..total` marked complete.
    #[must_use]
    pub fn all_checked(total: usize) -> Self {
        (0..total).map(|idx| (idx, true)).collect()
    }

    #[must_use]
    pub fn is_checked(&self, index: usize) -> bool {
        self.0.get(&index).copied().unwrap_or(false)
    }

    /// Flip the flag at `index` and return the new value.
    pub fn toggle(&mut self, index: usize) -> bool {
        let next = !self.is_checked(index);
        self.0.insert(index, next);
        next
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    /// Number of `true` flags among indices `0..total`.
    #[must_use]
    pub fn completed_count(&self, total: usize) -> usize {
        self.0.range(..total).filter(|(_, done)| **done).count()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, bool)> + '_ {
        self.0.iter().map(|(idx, done)| (*idx, *done))
    }
}

impl FromIterator<(usize, bool)> for ProgressMap {
    fn from_iter<I: IntoIterator<Item = (usize, bool)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
