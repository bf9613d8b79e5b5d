//! Bidirectional label tables assigning dense indices to labels in push order.

use std::collections::BTreeMap;
use std::fmt::Debug;
use std::slice::Iter;

use indexmap::IndexSet;

use crate::basis::Label;

#[cfg(test)]
#[path = "lookup_tests.rs"]
mod lookup_tests;

/// The lookup policy used when none is specified explicitly: hashed if the `hash-lookup` feature
/// is enabled, ordered otherwise.
#[cfg(not(feature = "hash-lookup"))]
pub type DefaultLabelTable<L> = OrderedLabelTable<L>;

/// The lookup policy used when none is specified explicitly: hashed if the `hash-lookup` feature
/// is enabled, ordered otherwise.
#[cfg(feature = "hash-lookup")]
pub type DefaultLabelTable<L> = HashedLabelTable<L>;

// =================
// Trait definitions
// =================

/// Trait for tables mapping labels to dense `0`-based indices and back.
///
/// Indices are assigned in strictly increasing push order starting at `0`. Pushing a label that
/// is already present violates the table contract and panics.
pub trait LabelTable<L: Label>: Clone + Debug + Default {
    /// Appends a label, returning the index assigned to it.
    ///
    /// # Panics
    ///
    /// Panics if the label is already present.
    fn push(&mut self, label: L) -> usize;

    /// Returns the number of labels in the table.
    fn len(&self) -> usize;

    /// Returns `true` if the table holds no labels.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the label with a given index, if any.
    fn get(&self, index: usize) -> Option<&L>;

    /// Returns the index of a label, if present.
    fn index_of(&self, label: &L) -> Option<usize>;

    /// Returns `true` if the label is present.
    fn contains(&self, label: &L) -> bool {
        self.index_of(label).is_some()
    }

    /// Iterates over the labels in index order.
    fn labels(&self) -> Box<dyn Iterator<Item = &L> + '_>;
}

// ======================================
// Struct definitions and implementations
// ======================================

// ~~~~~~~
// Ordered
// ~~~~~~~

/// Label table backed by a vector and an ordered map. Lookup is logarithmic and iteration over
/// the reverse map is deterministic.
#[derive(Clone, Debug)]
pub struct OrderedLabelTable<L> {
    /// The labels in index order.
    labels: Vec<L>,

    /// The reverse lookup from labels to indices.
    lookup: BTreeMap<L, usize>,
}

impl<L> Default for OrderedLabelTable<L> {
    fn default() -> Self {
        Self {
            labels: Vec::new(),
            lookup: BTreeMap::new(),
        }
    }
}

impl<L> OrderedLabelTable<L> {
    /// Iterates over the labels in index order.
    pub fn iter(&self) -> Iter<'_, L> {
        self.labels.iter()
    }
}

impl<L: Label> LabelTable<L> for OrderedLabelTable<L> {
    fn push(&mut self, label: L) -> usize {
        let index = self.labels.len();
        let existing = self.lookup.insert(label.clone(), index);
        assert!(
            existing.is_none(),
            "Duplicate label {label:?} pushed into a label table (already at index {}).",
            existing.unwrap_or(index)
        );
        self.labels.push(label);
        index
    }

    fn len(&self) -> usize {
        self.labels.len()
    }

    fn get(&self, index: usize) -> Option<&L> {
        self.labels.get(index)
    }

    fn index_of(&self, label: &L) -> Option<usize> {
        self.lookup.get(label).copied()
    }

    fn labels(&self) -> Box<dyn Iterator<Item = &L> + '_> {
        Box::new(self.labels.iter())
    }
}

// ~~~~~~
// Hashed
// ~~~~~~

/// Label table backed by an insertion-ordered hash set, which provides both directions of the
/// mapping from a single store. Lookup is constant time on average.
#[derive(Clone, Debug)]
pub struct HashedLabelTable<L> {
    labels: IndexSet<L>,
}

impl<L> Default for HashedLabelTable<L> {
    fn default() -> Self {
        Self {
            labels: IndexSet::new(),
        }
    }
}

impl<L: Label> LabelTable<L> for HashedLabelTable<L> {
    fn push(&mut self, label: L) -> usize {
        let (index, inserted) = self.labels.insert_full(label);
        assert!(
            inserted,
            "Duplicate label {:?} pushed into a label table (already at index {index}).",
            self.labels.get_index(index)
        );
        index
    }

    fn len(&self) -> usize {
        self.labels.len()
    }

    fn get(&self, index: usize) -> Option<&L> {
        self.labels.get_index(index)
    }

    fn index_of(&self, label: &L) -> Option<usize> {
        self.labels.get_index_of(label)
    }

    fn labels(&self) -> Box<dyn Iterator<Item = &L> + '_> {
        Box::new(self.labels.iter())
    }
}
