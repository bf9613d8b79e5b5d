//! Sectors, *i.e.* the pairs of subspaces connected by an operator.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::basis::subspace::Subspace;

// ================
// Enum definitions
// ================

/// Enumerated type for the direction constraint applied when enumerating sectors.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum SectorDirection {
    /// Only sectors with `bra_subspace_index <= ket_subspace_index` are retained.
    #[default]
    Canonical,

    /// All sectors permitted by the selection rule are retained.
    Both,
}

impl SectorDirection {
    /// Determines whether the pair of subspace indices passes the direction constraint.
    pub fn admits(&self, bra_subspace_index: usize, ket_subspace_index: usize) -> bool {
        match self {
            Self::Canonical => bra_subspace_index <= ket_subspace_index,
            Self::Both => true,
        }
    }
}

impl fmt::Display for SectorDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Canonical => write!(f, "canonical (bra <= ket)"),
            Self::Both => write!(f, "both"),
        }
    }
}

// ==================
// Struct definitions
// ==================

/// Structure for the identity key of a sector.
///
/// Keys compare lexicographically by bra subspace index, then ket subspace index, then
/// multiplicity index. Multiplicity indices start at `1`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SectorKey {
    /// The index of the bra subspace in the bra space.
    pub bra_subspace_index: usize,

    /// The index of the ket subspace in the ket space.
    pub ket_subspace_index: usize,

    /// The multiplicity index of the sector.
    pub multiplicity_index: usize,
}

impl SectorKey {
    /// Constructs a sector key.
    pub fn new(
        bra_subspace_index: usize,
        ket_subspace_index: usize,
        multiplicity_index: usize,
    ) -> Self {
        Self {
            bra_subspace_index,
            ket_subspace_index,
            multiplicity_index,
        }
    }
}

impl From<(usize, usize, usize)> for SectorKey {
    fn from((bra, ket, multiplicity): (usize, usize, usize)) -> Self {
        Self::new(bra, ket, multiplicity)
    }
}

impl fmt::Display for SectorKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({}, {}; {})",
            self.bra_subspace_index, self.ket_subspace_index, self.multiplicity_index
        )
    }
}

/// Structure representing one sector, *i.e.* one block of an operator matrix.
///
/// The sector borrows its bra and ket subspaces from the spaces held by the sectors set it was
/// retrieved from.
pub struct Sector<'a, S: Subspace> {
    key: SectorKey,
    bra_subspace: &'a S,
    ket_subspace: &'a S,
}

impl<'a, S: Subspace> Sector<'a, S> {
    /// Constructs a sector from its key and the subspaces the key refers to.
    pub fn new(key: SectorKey, bra_subspace: &'a S, ket_subspace: &'a S) -> Self {
        Self {
            key,
            bra_subspace,
            ket_subspace,
        }
    }

    /// Returns the identity key of the sector.
    pub fn key(&self) -> SectorKey {
        self.key
    }

    pub fn bra_subspace_index(&self) -> usize {
        self.key.bra_subspace_index
    }

    pub fn ket_subspace_index(&self) -> usize {
        self.key.ket_subspace_index
    }

    pub fn multiplicity_index(&self) -> usize {
        self.key.multiplicity_index
    }

    pub fn bra_subspace(&self) -> &'a S {
        self.bra_subspace
    }

    pub fn ket_subspace(&self) -> &'a S {
        self.ket_subspace
    }

    /// Returns `true` if the bra and ket subspace indices coincide.
    ///
    /// Only meaningful when bra and ket subspaces are drawn from the same space.
    pub fn is_diagonal(&self) -> bool {
        self.key.bra_subspace_index == self.key.ket_subspace_index
    }

    /// Returns `true` if the bra subspace index does not exceed the ket subspace index.
    pub fn is_upper_triangle(&self) -> bool {
        self.key.bra_subspace_index <= self.key.ket_subspace_index
    }

    /// Returns the shape `(bra subspace size, ket subspace size)` of the matrix block.
    pub fn shape(&self) -> (usize, usize) {
        (self.bra_subspace.size(), self.ket_subspace.size())
    }
}

impl<'a, S: Subspace> Clone for Sector<'a, S> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<'a, S: Subspace> Copy for Sector<'a, S> {}

impl<'a, S: Subspace> fmt::Debug for Sector<'a, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Sector")
            .field("key", &self.key)
            .field("bra", &self.bra_subspace.label_str())
            .field("ket", &self.ket_subspace.label_str())
            .field("shape", &self.shape())
            .finish()
    }
}
