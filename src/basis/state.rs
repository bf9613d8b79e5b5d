//! States realised within a subspace.

use std::fmt;

use crate::basis::subspace::Subspace;
use crate::basis::NONE;

/// Structure representing one state within a given subspace.
///
/// A state does not own its subspace: it holds a reference to it together with the index of the
/// state in the subspace, and resolves its labels on demand. The subspace must therefore outlive
/// the state.
pub struct State<'a, S: Subspace> {
    subspace: &'a S,
    index: usize,
}

impl<'a, S: Subspace> State<'a, S> {
    /// Constructs a state from its index within a subspace.
    ///
    /// # Panics
    ///
    /// Panics if `index` is not less than the size of the subspace.
    pub fn new(subspace: &'a S, index: usize) -> Self {
        assert!(
            index < subspace.size(),
            "State index {index} out of range for subspace {} of size {}.",
            subspace.label_str(),
            subspace.size()
        );
        Self { subspace, index }
    }

    /// Constructs a state by reverse lookup of its labels within a subspace.
    ///
    /// # Panics
    ///
    /// Panics if no state with these labels exists in the subspace.
    pub fn from_labels(subspace: &'a S, state_labels: &S::StateLabels) -> Self {
        let index = subspace.lookup_state_index(state_labels);
        assert!(
            index != NONE,
            "State labels {state_labels:?} not found in subspace {}.",
            subspace.label_str()
        );
        Self { subspace, index }
    }

    /// Returns the subspace in which this state lies.
    pub fn subspace(&self) -> &'a S {
        self.subspace
    }

    /// Returns the index of this state within its subspace.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Returns the labels of this state.
    pub fn labels(&self) -> &'a S::StateLabels {
        self.subspace.get_state_labels(self.index)
    }
}

impl<'a, S: Subspace> Clone for State<'a, S> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<'a, S: Subspace> Copy for State<'a, S> {}

impl<'a, S: Subspace> PartialEq for State<'a, S> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.subspace, other.subspace) && self.index == other.index
    }
}

impl<'a, S: Subspace> Eq for State<'a, S> {}

impl<'a, S: Subspace> fmt::Debug for State<'a, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "State {{ subspace: {}, index: {}, labels: {:?} }}",
            self.subspace.label_str(),
            self.index,
            self.labels()
        )
    }
}
