//! Generic indexing of basis states arranged into subspaces of good symmetry quantum numbers.
//!
//! The foundational type is the *subspace*, which sets up and stores the indexing of the states
//! sharing one set of conserved quantum numbers. A *state* is a view onto one entry of a
//! subspace. A *space* is an ordered collection of subspaces. Finally, the matrix of an operator
//! of definite tensorial character is organised into *sectors*, *i.e.* the pairs of subspaces
//! connected by the operator under the relevant selection rules.
//!
//! The dependencies between the generic types thus run
//!
//! ```text
//!     state <- subspace -> space -> sectors
//! ```
//!
//! which does not quite parallel the mathematical hierarchy
//! `state -> subspace -> space -> sectors`.
//!
//! Concrete coupling schemes embed a [`BaseSubspace`] in their own subspace types and implement
//! [`Subspace`] for them, and likewise embed a [`BaseSpace`] and implement [`Space`].

use std::fmt::Debug;
use std::hash::Hash;

pub mod lookup;
pub mod multi;
pub mod sector;
pub mod sectors;
pub mod selection;
pub mod space;
pub mod state;
pub mod subspace;

pub use lookup::{DefaultLabelTable, HashedLabelTable, LabelTable, OrderedLabelTable};
pub use multi::{BaseMultiSubspace, MultiSpace, MultiSubspace};
pub use sector::{Sector, SectorDirection, SectorKey};
pub use sectors::{BaseSectors, Sectors};
pub use selection::SelectionRule;
pub use space::{BaseSpace, Space, SpaceBuilder};
pub use state::State;
pub use subspace::{BaseSubspace, Subspace};

/// Flag value returned by index lookups whose target is absent.
pub const NONE: usize = usize::MAX;

/// Trait for values usable as subspace, state, or sector labels.
///
/// Labels are compared structurally and may serve as keys in either ordered or hashed lookup
/// tables.
pub trait Label: Clone + Debug + Eq + Ord + Hash {}

impl<T> Label for T where T: Clone + Debug + Eq + Ord + Hash {}
