//! Weighted random choice.

use rand::Rng;

/// A list of items paired with relative weights.
///
/// # Example
///
/// ```
/// use rand::SeedableRng;
/// use rand_chacha::ChaCha8Rng;
/// use skirmish_core::weighted::WeightedTable;
///
/// let table = WeightedTable::new().with("rare", 0.1).with("common", 0.9);
/// let mut rng = ChaCha8Rng::seed_from_u64(1);
/// assert!(table.choose(&mut rng).is_some());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct WeightedTable<T> {
    entries: Vec<(T, f64)>,
}

impl<T> Default for WeightedTable<T> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<T> WeightedTable<T> {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an entry and returns the table.
    #[must_use]
    pub fn with(mut self, item: T, weight: f64) -> Self {
        self.push(item, weight);
        self
    }

    /// Adds an entry. Negative weights count as zero.
    pub fn push(&mut self, item: T, weight: f64) {
        self.entries.push((item, weight.max(0.0)));
    }

    /// Returns the number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if there are no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of all weights.
    #[must_use]
    pub fn total_weight(&self) -> f64 {
        self.entries.iter().map(|(_, w)| w).sum()
    }

    /// Picks an entry with probability proportional to its weight.
    ///
    /// Returns `None` only when the table is empty. A table whose weights
    /// sum to zero always yields its first entry.
    pub fn choose<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<&T> {
        let total = self.total_weight();
        if total <= 0.0 {
            return self.entries.first().map(|(item, _)| item);
        }
        self.pick(rng.gen::<f64>() * total)
    }

    /// Walks the table with an already-scaled roll in `[0, total)`.
    pub(crate) fn pick(&self, mut roll: f64) -> Option<&T> {
        for (item, weight) in &self.entries {
            if roll < *weight {
                return Some(item);
            }
            roll -= weight;
        }
        // Float slack past the last bucket
        self.entries.last().map(|(item, _)| item)
    }
}
