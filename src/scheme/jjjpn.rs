//! Two-body states in the $`jjJ`$ coupling scheme for protons and neutrons.
//!
//! A two-body state $`|ab;J\rangle`$ couples two orbitals `a` and `b` of an [`OrbitalSpacePN`]
//! to total angular momentum `J`. States are grouped into subspaces of common two-body species,
//! `J`, and parity grade `g`, and states within a subspace are labelled by the indices of the two
//! orbitals within their respective orbital subspaces.
//!
//! For like-particle species only the antisymmetrised states with `index1 <= index2` are kept,
//! and a pair of identical orbitals can only couple to even `J`.

use std::fmt;
use std::fmt::Write;

use serde::{Deserialize, Serialize};

use crate::angmom::{allowed_triangle, HalfInt};
use crate::basis::lookup::DefaultLabelTable;
use crate::basis::selection::{
    AngularMomentumLabelled, IsospinProjected, OperatorSelectionRule, ParityGraded,
};
use crate::basis::{
    BaseSectors, BaseSpace, BaseSubspace, SectorDirection, SectorKey, Sectors, Space, State,
    Subspace, NONE,
};
use crate::io::format::qnbasis_warn;
use crate::scheme::nlj_orbital::{OrbitalSpacePN, OrbitalStatePN, OrbitalSubspacePN};
use crate::scheme::proton_neutron::{two_body_cutoffs, Rank, TwoBodySpeciesPN};

#[cfg(test)]
#[path = "jjjpn_tests.rs"]
mod jjjpn_tests;

// ================
// Enum definitions
// ================

/// Enumerated type for the order in which two-body species subspaces are laid out in a
/// two-body space.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TwoBodySpaceOrdering {
    /// Species in the order pp, nn, pn.
    #[default]
    PN,

    /// Species in order of decreasing isospin projection, *i.e.* pp, pn, nn.
    Tz,
}

impl TwoBodySpaceOrdering {
    /// Returns the two-body species in the order of this layout.
    pub fn species_order(&self) -> [TwoBodySpeciesPN; 3] {
        match self {
            Self::PN => [TwoBodySpeciesPN::PP, TwoBodySpeciesPN::NN, TwoBodySpeciesPN::PN],
            Self::Tz => [TwoBodySpeciesPN::PP, TwoBodySpeciesPN::PN, TwoBodySpeciesPN::NN],
        }
    }
}

impl fmt::Display for TwoBodySpaceOrdering {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PN => write!(f, "pp, nn, pn"),
            Self::Tz => write!(f, "pp, pn, nn"),
        }
    }
}

// ==================
// Struct definitions
// ==================

/// Structure holding the weight cutoffs of a two-body truncation.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct WeightMax {
    /// The maximal weights of single orbitals, indexed by orbital species code (p, n).
    pub one_body: [f64; 2],

    /// The maximal summed weights of orbital pairs, indexed by two-body species code
    /// (pp, nn, pn).
    pub two_body: [f64; 3],
}

impl WeightMax {
    /// Constructs weight cutoffs from explicit values for each species.
    pub fn new(wp: f64, wn: f64, wpp: f64, wnn: f64, wpn: f64) -> Self {
        Self {
            one_body: [wp, wn],
            two_body: [wpp, wnn, wpn],
        }
    }

    /// Constructs weight cutoffs from a one-body and a two-body oscillator cutoff, common to all
    /// species.
    pub fn from_cutoffs(n1max: i32, n2max: i32) -> Self {
        let (w1, w2) = (f64::from(n1max), f64::from(n2max));
        Self::new(w1, w1, w2, w2, w2)
    }

    /// Constructs weight cutoffs from an oscillator truncation of a given rank.
    pub fn from_rank(truncation_rank: Rank, truncation_cutoff: i32) -> Self {
        let (n1max, n2max) = two_body_cutoffs(truncation_rank, truncation_cutoff);
        Self::from_cutoffs(n1max, n2max)
    }
}

impl fmt::Display for WeightMax {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "one-body (p, n): ({}, {}), two-body (pp, nn, pn): ({}, {}, {})",
            self.one_body[0],
            self.one_body[1],
            self.two_body[0],
            self.two_body[1],
            self.two_body[2]
        )
    }
}

// ---------
// Subspaces
// ---------

/// Structure for a subspace of two-body states with common species, `J`, and parity grade.
#[derive(Clone, Debug)]
pub struct TwoBodySubspaceJJJPN {
    base: BaseSubspace<(TwoBodySpeciesPN, i32, u8), (usize, usize)>,
    weight_max: WeightMax,
    orbital_space: OrbitalSpacePN,
    orbital_subspace_index1: usize,
    orbital_subspace_index2: usize,
}

impl TwoBodySubspaceJJJPN {
    /// Enumerates the two-body states of given species, `J`, and parity grade.
    ///
    /// # Arguments
    ///
    /// * `orbital_space` - The orbital space from which the constituent orbitals are drawn.
    /// * `two_body_species` - The two-body species.
    /// * `big_j` - The total angular momentum.
    /// * `g` - The parity grade.
    /// * `weight_max` - The weight cutoffs.
    ///
    /// # Panics
    ///
    /// Panics if the orbital space has no subspace for one of the constituent species.
    pub fn new(
        orbital_space: &OrbitalSpacePN,
        two_body_species: TwoBodySpeciesPN,
        big_j: i32,
        g: u8,
        weight_max: WeightMax,
    ) -> Self {
        let (species1, species2) = two_body_species.orbital_species();
        let orbital_subspace_index1 = orbital_space.lookup_subspace_index(&species1);
        let orbital_subspace_index2 = orbital_space.lookup_subspace_index(&species2);
        assert!(
            orbital_subspace_index1 != NONE && orbital_subspace_index2 != NONE,
            "Orbital subspaces for species {two_body_species} not found in orbital space."
        );
        let orbital_subspace1 = orbital_space.get_subspace(orbital_subspace_index1);
        let orbital_subspace2 = orbital_space.get_subspace(orbital_subspace_index2);

        let mut base = BaseSubspace::new((two_body_species, big_j, g));
        let like_particles = two_body_species.is_identical_particle();
        let big_j_half = HalfInt::from(big_j);
        for index1 in 0..orbital_subspace1.size() {
            let orbital1 = OrbitalStatePN::new(orbital_subspace1, index1);
            for index2 in 0..orbital_subspace2.size() {
                if like_particles && index1 > index2 {
                    continue;
                }
                if like_particles && index1 == index2 && big_j % 2 != 0 {
                    continue;
                }
                let orbital2 = OrbitalStatePN::new(orbital_subspace2, index2);

                let w1 = orbital1.weight();
                let w2 = orbital2.weight();
                if w1 > weight_max.one_body[species1.code()]
                    || w2 > weight_max.one_body[species2.code()]
                    || w1 + w2 > weight_max.two_body[two_body_species.code()]
                {
                    continue;
                }
                if !allowed_triangle(orbital1.j(), orbital2.j(), big_j_half) {
                    continue;
                }
                if (orbital1.g() + orbital2.g() + g) % 2 != 0 {
                    continue;
                }
                base.push_state_labels((index1, index2));
            }
        }

        Self {
            base,
            weight_max,
            orbital_space: orbital_space.clone(),
            orbital_subspace_index1,
            orbital_subspace_index2,
        }
    }

    pub fn two_body_species(&self) -> TwoBodySpeciesPN {
        self.labels().0
    }

    pub fn weight_max(&self) -> WeightMax {
        self.weight_max
    }

    /// Returns the orbital subspace of the first constituent.
    pub fn orbital_subspace1(&self) -> &OrbitalSubspacePN {
        self.orbital_space.get_subspace(self.orbital_subspace_index1)
    }

    /// Returns the orbital subspace of the second constituent.
    pub fn orbital_subspace2(&self) -> &OrbitalSubspacePN {
        self.orbital_space.get_subspace(self.orbital_subspace_index2)
    }

    pub fn debug_str(&self) -> String {
        let mut dump = String::new();
        for index in 0..self.size() {
            let state = TwoBodyStateJJJPN::new(self, index);
            let _ = writeln!(
                dump,
                " index {index:>3} index1 {:>3} index2 {:>3} nlj1 {:>3} {:>3} {:>5} nlj2 {:>3} {:>3} {:>5}",
                state.index1(),
                state.index2(),
                state.orbital1().n(),
                state.orbital1().l(),
                state.orbital1().j(),
                state.orbital2().n(),
                state.orbital2().l(),
                state.orbital2().j(),
            );
        }
        dump
    }
}

impl Subspace for TwoBodySubspaceJJJPN {
    type SubspaceLabels = (TwoBodySpeciesPN, i32, u8);
    type StateLabels = (usize, usize);
    type Table = DefaultLabelTable<(usize, usize)>;

    fn base(&self) -> &BaseSubspace<(TwoBodySpeciesPN, i32, u8), (usize, usize)> {
        &self.base
    }

    fn label_str(&self) -> String {
        let (species, big_j, g) = self.labels();
        format!("[ {} {big_j:>3} {g} ]", species.code())
    }
}

impl AngularMomentumLabelled for TwoBodySubspaceJJJPN {
    fn j(&self) -> HalfInt {
        HalfInt::from(self.labels().1)
    }
}

impl ParityGraded for TwoBodySubspaceJJJPN {
    fn g(&self) -> u8 {
        self.labels().2
    }
}

impl IsospinProjected for TwoBodySubspaceJJJPN {
    fn tz(&self) -> HalfInt {
        self.two_body_species().tz()
    }
}

// ------
// States
// ------

/// A two-body state within a [`TwoBodySubspaceJJJPN`].
pub type TwoBodyStateJJJPN<'a> = State<'a, TwoBodySubspaceJJJPN>;

impl<'a> State<'a, TwoBodySubspaceJJJPN> {
    /// Returns the index of the first orbital within its orbital subspace.
    pub fn index1(&self) -> usize {
        self.labels().0
    }

    /// Returns the index of the second orbital within its orbital subspace.
    pub fn index2(&self) -> usize {
        self.labels().1
    }

    pub fn orbital1(&self) -> OrbitalStatePN<'a> {
        OrbitalStatePN::new(self.subspace().orbital_subspace1(), self.index1())
    }

    pub fn orbital2(&self) -> OrbitalStatePN<'a> {
        OrbitalStatePN::new(self.subspace().orbital_subspace2(), self.index2())
    }
}

// ------
// Spaces
// ------

/// Structure for the space of two-body states, with subspaces ordered by species according to
/// a [`TwoBodySpaceOrdering`], then by `J`, then by parity grade. Empty subspaces are omitted.
#[derive(Clone, Debug)]
pub struct TwoBodySpaceJJJPN {
    base: BaseSpace<TwoBodySubspaceJJJPN>,
    weight_max: WeightMax,
    ordering: TwoBodySpaceOrdering,
    orbital_space: OrbitalSpacePN,
}

impl TwoBodySpaceJJJPN {
    /// Enumerates the two-body space over an orbital space.
    ///
    /// Species whose constituent orbital subspaces are missing from the orbital space are
    /// skipped with a warning.
    pub fn new(
        orbital_space: &OrbitalSpacePN,
        weight_max: WeightMax,
        ordering: TwoBodySpaceOrdering,
    ) -> Self {
        let mut builder = BaseSpace::builder();
        for two_body_species in ordering.species_order() {
            let (species1, species2) = two_body_species.orbital_species();
            if !orbital_space.contains_subspace(&species1)
                || !orbital_space.contains_subspace(&species2)
            {
                qnbasis_warn!(
                    "Orbital space lacks the orbitals for two-body species {two_body_species}; \
                    no {two_body_species} subspaces will be constructed."
                );
                continue;
            }
            let big_j_max = max_j(orbital_space.lookup_subspace(&species1))
                + max_j(orbital_space.lookup_subspace(&species2));
            let big_j_max = big_j_max.twice_value() / 2;
            for big_j in 0..=big_j_max {
                for g in 0..=1 {
                    let subspace = TwoBodySubspaceJJJPN::new(
                        orbital_space,
                        two_body_species,
                        big_j,
                        g,
                        weight_max,
                    );
                    if subspace.size() != 0 {
                        builder.push_subspace(subspace);
                    }
                }
            }
        }
        Self {
            base: builder.build(),
            weight_max,
            ordering,
            orbital_space: orbital_space.clone(),
        }
    }

    pub fn weight_max(&self) -> WeightMax {
        self.weight_max
    }

    pub fn ordering(&self) -> TwoBodySpaceOrdering {
        self.ordering
    }

    pub fn orbital_space(&self) -> &OrbitalSpacePN {
        &self.orbital_space
    }

    pub fn debug_str(&self) -> String {
        let mut dump = String::new();
        for (index, subspace) in self.subspaces().enumerate() {
            let (species, big_j, g) = subspace.labels();
            let _ = writeln!(
                dump,
                " index {index:>3} species {:>3} J {big_j:>3} g {g} dim {:>4}",
                species.code(),
                subspace.size()
            );
        }
        dump
    }
}

impl Space for TwoBodySpaceJJJPN {
    type Subspace = TwoBodySubspaceJJJPN;
    type Table = DefaultLabelTable<(TwoBodySpeciesPN, i32, u8)>;

    fn base(&self) -> &BaseSpace<TwoBodySubspaceJJJPN> {
        &self.base
    }
}

// -------
// Sectors
// -------

/// Structure for the sectors of a two-body operator of definite tensorial character.
#[derive(Clone, Debug)]
pub struct TwoBodySectorsJJJPN {
    base: BaseSectors<TwoBodySpaceJJJPN>,
    operator: OperatorSelectionRule,
}

impl TwoBodySectorsJJJPN {
    /// Enumerates the sectors of an operator within one two-body space.
    pub fn new(
        space: &TwoBodySpaceJJJPN,
        operator: &OperatorSelectionRule,
        direction: SectorDirection,
    ) -> Self {
        Self {
            base: BaseSectors::new(space, operator, direction),
            operator: *operator,
        }
    }

    /// Enumerates the sectors of an operator between two two-body spaces.
    pub fn new_between(
        bra_space: &TwoBodySpaceJJJPN,
        ket_space: &TwoBodySpaceJJJPN,
        operator: &OperatorSelectionRule,
    ) -> Self {
        Self {
            base: BaseSectors::new_between(
                bra_space,
                ket_space,
                operator,
                SectorDirection::Both,
            ),
            operator: *operator,
        }
    }

    pub fn operator(&self) -> &OperatorSelectionRule {
        &self.operator
    }

    pub fn j0(&self) -> HalfInt {
        self.operator.j0
    }

    pub fn g0(&self) -> u8 {
        self.operator.g0
    }

    pub fn tz0(&self) -> HalfInt {
        self.operator.tz0
    }
}

impl Sectors for TwoBodySectorsJJJPN {
    type Space = TwoBodySpaceJJJPN;
    type Table = DefaultLabelTable<SectorKey>;

    fn base(&self) -> &BaseSectors<TwoBodySpaceJJJPN> {
        &self.base
    }
}

// =========
// Functions
// =========

/// Returns the largest `j` of the orbitals in a subspace, or zero if it is empty.
fn max_j(orbital_subspace: &OrbitalSubspacePN) -> HalfInt {
    orbital_subspace
        .state_labels()
        .map(|(_, _, j)| *j)
        .max()
        .unwrap_or_default()
}
