//! Sets of sectors enumerated over pairs of spaces.

use std::fmt;
use std::fmt::Write;

use crate::basis::lookup::{DefaultLabelTable, LabelTable};
use crate::basis::sector::{Sector, SectorDirection, SectorKey};
use crate::basis::selection::{AllowAll, SelectionRule};
use crate::basis::space::Space;
use crate::basis::subspace::Subspace;
use crate::basis::NONE;

#[cfg(test)]
#[path = "sectors_tests.rs"]
mod sectors_tests;

// =================
// Trait definitions
// =================

/// Trait defining the indexing behaviours of a set of sectors.
///
/// Concrete sector types hold a [`BaseSectors`] and expose it through [`Self::base`].
pub trait Sectors {
    /// The type of the bra and ket spaces.
    type Space: Space;

    /// The lookup policy for sector keys.
    type Table: LabelTable<SectorKey>;

    /// Returns the underlying generic indexing storage.
    fn base(&self) -> &BaseSectors<Self::Space, Self::Table>;

    /// Returns the number of sectors.
    fn size(&self) -> usize {
        self.base().keys.len()
    }

    /// Returns the bra space the sectors were enumerated over.
    fn bra_space(&self) -> &Self::Space {
        &self.base().bra_space
    }

    /// Returns the ket space the sectors were enumerated over.
    fn ket_space(&self) -> &Self::Space {
        &self.base().ket_space
    }

    /// Iterates over the sector keys in index order.
    fn keys(&self) -> Box<dyn Iterator<Item = &SectorKey> + '_> {
        self.base().keys.labels()
    }

    /// Retrieves the sector with the given index.
    ///
    /// The sector is assembled afresh from the stored key and the stored spaces.
    ///
    /// # Panics
    ///
    /// Panics if `index` is not less than [`Self::size`].
    fn get_sector(&self, index: usize) -> Sector<'_, <Self::Space as Space>::Subspace> {
        let key = *self.base().keys.get(index).unwrap_or_else(|| {
            panic!(
                "Sector index {index} out of range for sectors of size {}.",
                self.size()
            )
        });
        Sector::new(
            key,
            self.bra_space().get_subspace(key.bra_subspace_index),
            self.ket_space().get_subspace(key.ket_subspace_index),
        )
    }

    /// Looks up the index of a sector from its key.
    ///
    /// # Returns
    ///
    /// The index of the sector, or [`NONE`] if no such sector exists.
    fn lookup_sector_index_by_key(&self, key: &SectorKey) -> usize {
        self.base().keys.index_of(key).unwrap_or(NONE)
    }

    /// Looks up the index of a sector from its subspace indices and multiplicity index.
    fn lookup_sector_index_with_multiplicity(
        &self,
        bra_subspace_index: usize,
        ket_subspace_index: usize,
        multiplicity_index: usize,
    ) -> usize {
        self.lookup_sector_index_by_key(&SectorKey::new(
            bra_subspace_index,
            ket_subspace_index,
            multiplicity_index,
        ))
    }

    /// Looks up the index of a sector from its subspace indices, taking the multiplicity index to
    /// be `1`.
    fn lookup_sector_index(&self, bra_subspace_index: usize, ket_subspace_index: usize) -> usize {
        self.lookup_sector_index_with_multiplicity(bra_subspace_index, ket_subspace_index, 1)
    }

    /// Returns `true` if the sector with the given key exists.
    fn contains_sector_with_multiplicity(
        &self,
        bra_subspace_index: usize,
        ket_subspace_index: usize,
        multiplicity_index: usize,
    ) -> bool {
        self.base().keys.contains(&SectorKey::new(
            bra_subspace_index,
            ket_subspace_index,
            multiplicity_index,
        ))
    }

    /// Returns `true` if the sector with the given subspace indices and multiplicity index `1`
    /// exists.
    fn contains_sector(&self, bra_subspace_index: usize, ket_subspace_index: usize) -> bool {
        self.contains_sector_with_multiplicity(bra_subspace_index, ket_subspace_index, 1)
    }

    /// Generates a dump of the sectors, one line per sector, for diagnostic purposes.
    fn debug_str(&self) -> String {
        let mut dump = String::new();
        for index in 0..self.size() {
            let sector = self.get_sector(index);
            let _ = writeln!(
                dump,
                "  sector {index}  bra index {} labels {} dim {}  ket index {} labels {} dim {}  \
                multiplicity index {}",
                sector.bra_subspace_index(),
                sector.bra_subspace().label_str(),
                sector.bra_subspace().size(),
                sector.ket_subspace_index(),
                sector.ket_subspace().label_str(),
                sector.ket_subspace().size(),
                sector.multiplicity_index(),
            );
        }
        dump
    }
}

// ==================
// Struct definitions
// ==================

/// Structure holding a set of sectors between a bra space and a ket space, with reverse lookup
/// by sector key.
///
/// The sectors set keeps its own copies of the two spaces. Since spaces share their storage,
/// these copies are cheap and the subspaces of a retrieved [`Sector`] are those of the spaces
/// passed at construction.
#[derive(Clone)]
pub struct BaseSectors<P, T = DefaultLabelTable<SectorKey>> {
    bra_space: P,
    ket_space: P,
    keys: T,
}

impl<P, T> BaseSectors<P, T>
where
    P: Space,
    T: LabelTable<SectorKey>,
{
    /// Enumerates the sectors of an operator acting within a single space.
    ///
    /// # Arguments
    ///
    /// * `space` - The space serving as both bra and ket space.
    /// * `rule` - The selection rule of the operator.
    /// * `direction` - The direction constraint on the subspace indices.
    pub fn new<R>(space: &P, rule: &R, direction: SectorDirection) -> Self
    where
        R: SelectionRule<P::Subspace> + ?Sized,
    {
        Self::new_between(space, space, rule, direction)
    }

    /// Enumerates the sectors of an operator connecting two spaces.
    ///
    /// Pairs of subspaces are visited with the bra subspace index in the outer loop and the ket
    /// subspace index in the inner loop, both increasing. A pair passing the direction constraint
    /// and the selection rule gives rise to the sectors with multiplicity indices from `1` up to
    /// the multiplicity reported by the rule, in that order.
    ///
    /// # Arguments
    ///
    /// * `bra_space` - The bra space.
    /// * `ket_space` - The ket space.
    /// * `rule` - The selection rule of the operator.
    /// * `direction` - The direction constraint on the subspace indices.
    pub fn new_between<R>(
        bra_space: &P,
        ket_space: &P,
        rule: &R,
        direction: SectorDirection,
    ) -> Self
    where
        R: SelectionRule<P::Subspace> + ?Sized,
    {
        let mut keys = T::default();
        for (bra_subspace_index, bra_subspace) in bra_space.subspaces().enumerate() {
            for (ket_subspace_index, ket_subspace) in ket_space.subspaces().enumerate() {
                if !direction.admits(bra_subspace_index, ket_subspace_index) {
                    continue;
                }
                if !rule.allows(bra_subspace, ket_subspace) {
                    continue;
                }
                for multiplicity_index in 1..=rule.multiplicity(bra_subspace, ket_subspace) {
                    keys.push(SectorKey::new(
                        bra_subspace_index,
                        ket_subspace_index,
                        multiplicity_index,
                    ));
                }
            }
        }
        log::debug!(
            "Enumerated {} sectors over {} bra and {} ket subspaces, direction: {direction}.",
            keys.len(),
            bra_space.size(),
            ket_space.size()
        );
        Self {
            bra_space: bra_space.clone(),
            ket_space: ket_space.clone(),
            keys,
        }
    }

    /// Enumerates all sectors within a single space subject only to the direction constraint.
    pub fn all_to_all(space: &P, direction: SectorDirection) -> Self {
        Self::new(space, &AllowAll, direction)
    }

    /// Enumerates all sectors between two spaces. No direction constraint is applied, since
    /// subspace indices in distinct spaces are not comparable.
    pub fn all_to_all_between(bra_space: &P, ket_space: &P) -> Self {
        Self::new_between(bra_space, ket_space, &AllowAll, SectorDirection::Both)
    }
}

impl<P, T> Sectors for BaseSectors<P, T>
where
    P: Space,
    T: LabelTable<SectorKey>,
{
    type Space = P;
    type Table = T;

    fn base(&self) -> &BaseSectors<P, T> {
        self
    }
}

impl<P, T> fmt::Debug for BaseSectors<P, T>
where
    P: Space,
    T: LabelTable<SectorKey>,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BaseSectors")
            .field("bra_space_size", &self.bra_space.size())
            .field("ket_space_size", &self.ket_space.size())
            .field("keys", &self.keys)
            .finish()
    }
}
