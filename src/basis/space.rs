//! Spaces, *i.e.* ordered collections of subspaces.

use std::fmt;
use std::slice::Iter;
use std::sync::Arc;

use crate::basis::lookup::{DefaultLabelTable, LabelTable};
use crate::basis::subspace::Subspace;
use crate::basis::NONE;

#[cfg(test)]
#[path = "space_tests.rs"]
mod space_tests;

// =================
// Trait definitions
// =================

/// Trait defining the indexing behaviours of a space.
///
/// Concrete space types hold a [`BaseSpace`] together with any scheme-specific metadata and
/// expose it through [`Self::base`]. Implementors must be cheap to clone, since sector sets keep
/// their own copies of the bra and ket spaces.
pub trait Space: Clone {
    /// The type of the subspaces in this space.
    type Subspace: Subspace;

    /// The lookup policy for subspace labels.
    type Table: LabelTable<<Self::Subspace as Subspace>::SubspaceLabels>;

    /// Returns the underlying generic indexing storage.
    fn base(&self) -> &BaseSpace<Self::Subspace, Self::Table>;

    /// Returns the number of subspaces in the space.
    fn size(&self) -> usize {
        self.base().store.subspaces.len()
    }

    /// Returns the total number of states over all subspaces in the space.
    fn dimension(&self) -> usize {
        self.base().store.subspaces.iter().map(Subspace::size).sum()
    }

    /// Returns the subspace with the given index.
    ///
    /// # Panics
    ///
    /// Panics if `index` is not less than [`Self::size`].
    fn get_subspace(&self, index: usize) -> &Self::Subspace {
        self.base().store.subspaces.get(index).unwrap_or_else(|| {
            panic!(
                "Subspace index {index} out of range for space of size {}.",
                self.size()
            )
        })
    }

    /// Returns `true` if a subspace with the given labels lies in the space.
    fn contains_subspace(
        &self,
        subspace_labels: &<Self::Subspace as Subspace>::SubspaceLabels,
    ) -> bool {
        self.base().store.lookup.contains(subspace_labels)
    }

    /// Looks up the index of a subspace within the space from its labels.
    ///
    /// # Returns
    ///
    /// The index of the subspace, or [`NONE`] if no such subspace exists.
    fn lookup_subspace_index(
        &self,
        subspace_labels: &<Self::Subspace as Subspace>::SubspaceLabels,
    ) -> usize {
        self.base()
            .store
            .lookup
            .index_of(subspace_labels)
            .unwrap_or(NONE)
    }

    /// Retrieves the subspace with the given labels.
    ///
    /// # Panics
    ///
    /// Panics if no such subspace exists.
    fn lookup_subspace(
        &self,
        subspace_labels: &<Self::Subspace as Subspace>::SubspaceLabels,
    ) -> &Self::Subspace {
        let index = self.lookup_subspace_index(subspace_labels);
        assert!(
            index != NONE,
            "Subspace labels {subspace_labels:?} not found in space."
        );
        self.get_subspace(index)
    }

    /// Iterates over the subspaces in index order.
    fn subspaces(&self) -> Iter<'_, Self::Subspace> {
        self.base().store.subspaces.iter()
    }
}

// ==================
// Struct definitions
// ==================

/// Immutable storage shared between copies of a space.
struct SpaceStore<S, T> {
    /// The subspaces, accessible by index.
    subspaces: Vec<S>,

    /// The subspace index lookup by subspace labels.
    lookup: T,
}

/// Structure holding an ordered collection of subspaces with reverse lookup by subspace labels.
///
/// The subspaces and their lookup table are held in a reference-counted store that is never
/// mutated once the space has been built by a [`SpaceBuilder`]. Cloning a space is therefore an
/// O(1) operation sharing that store.
pub struct BaseSpace<S, T = DefaultLabelTable<<S as Subspace>::SubspaceLabels>>
where
    S: Subspace,
{
    store: Arc<SpaceStore<S, T>>,
}

impl<S, T> BaseSpace<S, T>
where
    S: Subspace,
    T: LabelTable<S::SubspaceLabels>,
{
    /// Returns a builder to construct a new [`BaseSpace`].
    pub fn builder() -> SpaceBuilder<S, T> {
        SpaceBuilder::default()
    }

    /// Constructs a space from subspaces given in their canonical order.
    ///
    /// # Panics
    ///
    /// Panics if two subspaces carry the same labels.
    pub fn from_subspaces<I>(subspaces: I) -> Self
    where
        I: IntoIterator<Item = S>,
    {
        let mut builder = Self::builder();
        subspaces.into_iter().for_each(|subspace| {
            builder.push_subspace(subspace);
        });
        builder.build()
    }

    /// Returns `true` if this space shares its underlying storage with `other`, as is the case
    /// for clones of one another.
    pub fn shares_storage_with(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.store, &other.store)
    }
}

impl<S, T> Space for BaseSpace<S, T>
where
    S: Subspace,
    T: LabelTable<S::SubspaceLabels>,
{
    type Subspace = S;
    type Table = T;

    fn base(&self) -> &BaseSpace<S, T> {
        self
    }
}

impl<S, T> Clone for BaseSpace<S, T>
where
    S: Subspace,
{
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}

impl<S, T> Default for BaseSpace<S, T>
where
    S: Subspace,
    T: LabelTable<S::SubspaceLabels>,
{
    fn default() -> Self {
        Self::builder().build()
    }
}

impl<S, T> fmt::Debug for BaseSpace<S, T>
where
    S: Subspace,
    T: LabelTable<S::SubspaceLabels>,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(
                self.subspaces()
                    .map(|subspace| (subspace.label_str(), subspace.size())),
            )
            .finish()
    }
}

// -------
// Builder
// -------

/// Builder collecting subspaces in order during the single constructing pass of a space.
///
/// Subspace indices are assigned sequentially in push order. Pruning of empty subspaces is the
/// responsibility of the calling scheme.
pub struct SpaceBuilder<S, T> {
    subspaces: Vec<S>,
    lookup: T,
}

impl<S, T> Default for SpaceBuilder<S, T>
where
    S: Subspace,
    T: LabelTable<S::SubspaceLabels>,
{
    fn default() -> Self {
        Self {
            subspaces: Vec::new(),
            lookup: T::default(),
        }
    }
}

impl<S, T> SpaceBuilder<S, T>
where
    S: Subspace,
    T: LabelTable<S::SubspaceLabels>,
{
    /// Appends a subspace, recording its labels for lookup.
    ///
    /// # Returns
    ///
    /// The index assigned to the subspace.
    ///
    /// # Panics
    ///
    /// Panics if a subspace with the same labels has already been pushed.
    pub fn push_subspace(&mut self, subspace: S) -> usize {
        let index = self.lookup.push(subspace.labels().clone());
        self.subspaces.push(subspace);
        debug_assert_eq!(index + 1, self.subspaces.len());
        index
    }

    /// Constructs a subspace in place from the index it is about to receive, then appends it as
    /// [`Self::push_subspace`] does.
    ///
    /// # Returns
    ///
    /// The index assigned to the subspace.
    pub fn emplace_subspace<F>(&mut self, construct: F) -> usize
    where
        F: FnOnce(usize) -> S,
    {
        let subspace = construct(self.subspaces.len());
        self.push_subspace(subspace)
    }

    /// Returns the number of subspaces pushed so far.
    pub fn len(&self) -> usize {
        self.subspaces.len()
    }

    /// Returns `true` if no subspaces have been pushed so far.
    pub fn is_empty(&self) -> bool {
        self.subspaces.is_empty()
    }

    /// Freezes the collected subspaces into a shareable space.
    pub fn build(self) -> BaseSpace<S, T> {
        log::debug!(
            "Built space of {} subspaces with {} states in total.",
            self.subspaces.len(),
            self.subspaces.iter().map(Subspace::size).sum::<usize>()
        );
        BaseSpace {
            store: Arc::new(SpaceStore {
                subspaces: self.subspaces,
                lookup: self.lookup,
            }),
        }
    }
}
