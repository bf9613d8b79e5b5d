//! Subspaces in which each state carries a substate multiplicity.

use crate::basis::lookup::{DefaultLabelTable, LabelTable};
use crate::basis::space::Space;
use crate::basis::state::State;
use crate::basis::subspace::{BaseSubspace, Subspace};
use crate::basis::Label;

#[cfg(test)]
#[path = "multi_tests.rs"]
mod multi_tests;

// =================
// Trait definitions
// =================

/// Trait for subspaces whose states each stand for a number of substates.
pub trait MultiSubspace: Subspace {
    /// Returns the underlying generic multiplicity storage.
    fn multi_base(&self) -> &BaseMultiSubspace<Self::SubspaceLabels, Self::StateLabels, Self::Table>;

    /// Returns, for each state, the offset of its first substate.
    fn state_offsets(&self) -> &[usize] {
        &self.multi_base().state_offsets
    }

    /// Returns, for each state, its number of substates.
    fn state_multiplicities(&self) -> &[usize] {
        &self.multi_base().state_multiplicities
    }

    /// Returns the total number of substates in the subspace.
    fn full_dimension(&self) -> usize {
        self.multi_base().full_dimension
    }
}

/// Trait for spaces of multi-subspaces.
pub trait MultiSpace: Space
where
    Self::Subspace: MultiSubspace,
{
    /// Returns the total number of substates over all subspaces in the space.
    fn full_dimension(&self) -> usize {
        self.subspaces().map(MultiSubspace::full_dimension).sum()
    }
}

impl<P> MultiSpace for P
where
    P: Space,
    P::Subspace: MultiSubspace,
{
}

// ==================
// Struct definitions
// ==================

/// Structure holding the indexing of the states within a subspace together with the substate
/// multiplicity of each state.
#[derive(Clone)]
pub struct BaseMultiSubspace<SL, L, T = DefaultLabelTable<L>> {
    subspace: BaseSubspace<SL, L, T>,
    state_offsets: Vec<usize>,
    state_multiplicities: Vec<usize>,
    full_dimension: usize,
}

impl<SL, L, T> BaseMultiSubspace<SL, L, T>
where
    SL: Label,
    L: Label,
    T: LabelTable<L>,
{
    /// Creates an empty multi-subspace with the given subspace labels.
    pub fn new(labels: SL) -> Self {
        Self {
            subspace: BaseSubspace::new(labels),
            state_offsets: Vec::new(),
            state_multiplicities: Vec::new(),
            full_dimension: 0,
        }
    }

    /// Registers a state together with its substate multiplicity. The substates of the state
    /// follow on directly from those of the previously registered state.
    ///
    /// # Panics
    ///
    /// Panics if the state labels have already been registered.
    pub fn push_state_labels(&mut self, state_labels: L, multiplicity: usize) {
        self.subspace.push_state_labels(state_labels);
        self.state_offsets.push(self.full_dimension);
        self.state_multiplicities.push(multiplicity);
        self.full_dimension += multiplicity;
    }
}

impl<SL, L, T> Subspace for BaseMultiSubspace<SL, L, T>
where
    SL: Label,
    L: Label,
    T: LabelTable<L>,
{
    type SubspaceLabels = SL;
    type StateLabels = L;
    type Table = T;

    fn base(&self) -> &BaseSubspace<SL, L, T> {
        &self.subspace
    }
}

impl<SL, L, T> MultiSubspace for BaseMultiSubspace<SL, L, T>
where
    SL: Label,
    L: Label,
    T: LabelTable<L>,
{
    fn multi_base(&self) -> &BaseMultiSubspace<SL, L, T> {
        self
    }
}

impl<'a, S: MultiSubspace> State<'a, S> {
    /// Returns the offset of the first substate of this state within its subspace.
    pub fn offset(&self) -> usize {
        self.subspace().state_offsets()[self.index()]
    }

    /// Returns the number of substates of this state.
    pub fn multiplicity(&self) -> usize {
        self.subspace().state_multiplicities()[self.index()]
    }
}
