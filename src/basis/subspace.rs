//! Subspaces of states sharing one set of conserved quantum numbers.

use std::fmt;
use std::marker::PhantomData;

use crate::basis::lookup::{DefaultLabelTable, LabelTable};
use crate::basis::{Label, NONE};

#[cfg(test)]
#[path = "subspace_tests.rs"]
mod subspace_tests;

// =================
// Trait definitions
// =================

/// Trait defining the indexing behaviours of a subspace.
///
/// Concrete subspace types hold a [`BaseSubspace`] together with any scheme-specific metadata
/// and expose it through [`Self::base`]. All indexing behaviours are then provided.
pub trait Subspace {
    /// The type of the labels of the subspace itself.
    type SubspaceLabels: Label;

    /// The type of the labels of the states within the subspace.
    type StateLabels: Label;

    /// The lookup policy for state labels.
    type Table: LabelTable<Self::StateLabels>;

    /// Returns the underlying generic indexing storage.
    fn base(&self) -> &BaseSubspace<Self::SubspaceLabels, Self::StateLabels, Self::Table>;

    /// Returns the labels of the subspace itself.
    fn labels(&self) -> &Self::SubspaceLabels {
        &self.base().labels
    }

    /// Returns the number of states in the subspace.
    fn size(&self) -> usize {
        self.base().states.len()
    }

    /// Returns `true` if a state with the given labels lies in the subspace.
    fn contains_state(&self, state_labels: &Self::StateLabels) -> bool {
        self.base().states.contains(state_labels)
    }

    /// Looks up the index of a state within the subspace from its labels.
    ///
    /// # Returns
    ///
    /// The index of the state, or [`NONE`] if no such state exists.
    fn lookup_state_index(&self, state_labels: &Self::StateLabels) -> usize {
        self.base().states.index_of(state_labels).unwrap_or(NONE)
    }

    /// Retrieves the labels of the state with the given index.
    ///
    /// This is not normally needed directly: one would rather construct a
    /// [`crate::basis::State`] and query it.
    ///
    /// # Panics
    ///
    /// Panics if `index` is not less than [`Self::size`].
    fn get_state_labels(&self, index: usize) -> &Self::StateLabels {
        self.base().states.get(index).unwrap_or_else(|| {
            panic!(
                "State index {index} out of range for subspace {:?} of size {}.",
                self.labels(),
                self.size()
            )
        })
    }

    /// Iterates over the state labels in index order.
    fn state_labels(&self) -> Box<dyn Iterator<Item = &Self::StateLabels> + '_> {
        self.base().states.labels()
    }

    /// Returns a short human-readable string of the subspace labels, used in diagnostic dumps.
    fn label_str(&self) -> String {
        format!("{:?}", self.labels())
    }
}

// ==================
// Struct definitions
// ==================

/// Structure holding the indexing of the states within a symmetry subspace.
///
/// The subspace labels are set once at construction. States are registered with
/// [`Self::push_state_labels`] during the constructing pass of the concrete scheme, which is
/// responsible for never producing the same state labels twice.
///
/// # Type parameters
///
/// * `SL` - The type of the subspace labels, *e.g.* `(TwoBodySpeciesPN, i32, u8)`.
/// * `L` - The type of the state labels, *e.g.* `(usize, usize)`.
/// * `T` - The lookup policy for state labels.
#[derive(Clone)]
pub struct BaseSubspace<SL, L, T = DefaultLabelTable<L>> {
    labels: SL,
    states: T,
    _state_labels: PhantomData<L>,
}

impl<SL, L, T> BaseSubspace<SL, L, T>
where
    SL: Label,
    L: Label,
    T: LabelTable<L>,
{
    /// Creates an empty subspace with the given subspace labels.
    pub fn new(labels: SL) -> Self {
        Self {
            labels,
            states: T::default(),
            _state_labels: PhantomData,
        }
    }

    /// Creates a subspace and registers the given states in iteration order.
    pub fn from_state_labels<I>(labels: SL, state_labels: I) -> Self
    where
        I: IntoIterator<Item = L>,
    {
        let mut subspace = Self::new(labels);
        state_labels
            .into_iter()
            .for_each(|state| subspace.push_state_labels(state));
        subspace
    }

    /// Registers a state, assigning it the next sequential index.
    ///
    /// This is only meant for the initial constructing pass of a concrete subspace.
    ///
    /// # Panics
    ///
    /// Panics if the state labels have already been registered.
    pub fn push_state_labels(&mut self, state_labels: L) {
        self.states.push(state_labels);
    }
}

impl<SL, L, T> Subspace for BaseSubspace<SL, L, T>
where
    SL: Label,
    L: Label,
    T: LabelTable<L>,
{
    type SubspaceLabels = SL;
    type StateLabels = L;
    type Table = T;

    fn base(&self) -> &BaseSubspace<SL, L, T> {
        self
    }
}

impl<SL, L, T> fmt::Debug for BaseSubspace<SL, L, T>
where
    SL: Label,
    L: Label,
    T: LabelTable<L>,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BaseSubspace")
            .field("labels", &self.labels)
            .field("size", &self.states.len())
            .finish()
    }
}
