//! Single-particle orbitals labelled by radial quantum number `n`, orbital angular momentum `l`,
//! and total angular momentum `j`, for protons and neutrons.
//!
//! Orbitals are grouped in two ways:
//!
//! * by species alone ([`OrbitalSubspacePN`], [`OrbitalSpacePN`]), with the states of each
//!   subspace labelled by `(n, l, j)`, and
//! * by species together with `(l, j)` ([`OrbitalSubspaceLJPN`], [`OrbitalSpaceLJPN`]), with the
//!   states of each subspace labelled by `n` alone. Radial operators are organised into
//!   [`OrbitalSectorsLJPN`] over these subspaces.
//!
//! Orbitals may be generated from an oscillator cutoff $`N_{\mathrm{max}}`$, or read from an
//! MFDn-style orbital definition text (version 15055), which lists one orbital per line as
//!
//! ```text
//!   index n l 2*j species weight
//! ```
//!
//! with `index` counted from `1` separately within each species, and `species` being `1` for
//! protons and `2` for neutrons.

use std::collections::BTreeSet;
use std::fmt;
use std::fmt::Write;

use anyhow::{self, ensure, format_err, Context};
use serde::{Deserialize, Serialize};

use crate::angmom::HalfInt;
use crate::basis::lookup::DefaultLabelTable;
use crate::basis::selection::{
    AngularMomentumDifferenceRule, AngularMomentumLabelled, IsospinProjected,
    IsospinProjectionBoundRule, OrbitalAngularMomentumDifferenceRule,
    OrbitalAngularMomentumLabelled, ParityGraded, ParityRule, SelectionRule,
};
use crate::basis::{
    BaseSectors, BaseSpace, BaseSubspace, SectorDirection, SectorKey, Sectors, Space, State,
    Subspace, NONE,
};
use crate::scheme::proton_neutron::OrbitalSpeciesPN;

#[cfg(test)]
#[path = "nlj_orbital_tests.rs"]
mod nlj_orbital_tests;

/// Version code of the supported orbital definition format.
pub const MFDN_ORBITAL_FORMAT_VERSION: i32 = 15055;

/// Full labels `(species, n, l, j)` of an orbital.
pub type FullOrbitalLabels = (OrbitalSpeciesPN, i32, i32, HalfInt);

// ==================
// Struct definitions
// ==================

// ~~~~~~~~~~~~~~~~
// Flattened orbital
// ~~~~~~~~~~~~~~~~

/// Structure holding the flattened description of one orbital.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct OrbitalPNInfo {
    /// The species of the orbital.
    pub species: OrbitalSpeciesPN,

    /// The radial quantum number.
    pub n: i32,

    /// The orbital angular momentum.
    pub l: i32,

    /// The total angular momentum.
    pub j: HalfInt,

    /// The truncation weight of the orbital, *e.g.* its number of oscillator quanta.
    pub weight: f64,
}

impl OrbitalPNInfo {
    /// Returns the full labels `(species, n, l, j)` of the orbital.
    pub fn full_labels(&self) -> FullOrbitalLabels {
        (self.species, self.n, self.l, self.j)
    }
}

/// Writes the orbital as an orbital definition line, without the leading index.
impl fmt::Display for OrbitalPNInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            " {:>3} {:>3} {:>3} {:>3} {:>12.8}",
            self.n,
            self.l,
            self.j.twice_value(),
            self.species.decimal_code(),
            self.weight
        )
    }
}

// ~~~~~~~~~~~~~~~~~~~~~~~~~~~~~
// Orbitals grouped by species
// ~~~~~~~~~~~~~~~~~~~~~~~~~~~~~

/// Structure for the subspace of all orbitals of one species. States are labelled by
/// `(n, l, j)`.
#[derive(Clone, Debug)]
pub struct OrbitalSubspacePN {
    base: BaseSubspace<OrbitalSpeciesPN, (i32, i32, HalfInt)>,

    /// The weight of each orbital, in index order.
    weights: Vec<f64>,

    /// The largest weight of any orbital in the subspace.
    weight_max: f64,

    /// The oscillator cutoff, if the orbitals coincide with those of an oscillator truncation.
    nmax: Option<i32>,
}

impl OrbitalSubspacePN {
    /// Constructs the subspace of oscillator orbitals of up to `nmax` quanta, ordered by
    /// increasing number of quanta $`N`$ then by increasing `j`. The weight of each orbital is
    /// its $`N`$.
    pub fn from_nmax(species: OrbitalSpeciesPN, nmax: i32) -> Self {
        let mut base = BaseSubspace::new(species);
        let mut weights = Vec::new();
        for big_n in 0..=nmax {
            for twice_j in (1..=(2 * big_n + 1)).step_by(2) {
                // Within a shell, the parity of l is fixed by N.
                let l = (twice_j - 1) / 2 + (big_n + (twice_j - 1) / 2) % 2;
                let n = (big_n - l) / 2;
                base.push_state_labels((n, l, HalfInt::from_twice(twice_j)));
                weights.push(f64::from(big_n));
            }
        }
        Self {
            base,
            weights,
            weight_max: f64::from(nmax),
            nmax: Some(nmax),
        }
    }

    /// Constructs the subspace from those orbitals in a list that are of the given species,
    /// retaining their order in the list.
    ///
    /// # Panics
    ///
    /// Panics if the list contains the same `(n, l, j)` twice for this species.
    pub fn from_orbitals(species: OrbitalSpeciesPN, orbitals: &[OrbitalPNInfo]) -> Self {
        let mut base = BaseSubspace::new(species);
        let mut weights = Vec::new();
        let mut weight_max = 0.0_f64;
        for orbital in orbitals.iter().filter(|orbital| orbital.species == species) {
            base.push_state_labels((orbital.n, orbital.l, orbital.j));
            weights.push(orbital.weight);
            weight_max = weight_max.max(orbital.weight);
        }
        let mut subspace = Self {
            base,
            weights,
            weight_max,
            nmax: None,
        };
        subspace.nmax = subspace.oscillator_cutoff();
        subspace
    }

    /// Determines the oscillator cutoff whose truncation reproduces exactly the orbitals of this
    /// subspace, if any.
    fn oscillator_cutoff(&self) -> Option<i32> {
        if self.size() == 0 {
            return None;
        }
        let nmax = self.weight_max.trunc();
        if nmax != self.weight_max || nmax < 0.0 {
            return None;
        }
        let nmax = nmax as i32;
        let reference = Self::from_nmax(self.species(), nmax);
        (reference.orbital_info() == self.orbital_info()).then_some(nmax)
    }

    pub fn species(&self) -> OrbitalSpeciesPN {
        *self.labels()
    }

    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    pub fn weight_max(&self) -> f64 {
        self.weight_max
    }

    /// Returns `true` if the orbitals coincide with those of an oscillator truncation.
    pub fn is_oscillator_like(&self) -> bool {
        self.nmax.is_some()
    }

    /// Returns the oscillator cutoff, or `None` if the subspace is not oscillator-like.
    pub fn nmax(&self) -> Option<i32> {
        self.nmax
    }

    /// Flattens the subspace into a list of orbitals.
    pub fn orbital_info(&self) -> Vec<OrbitalPNInfo> {
        (0..self.size())
            .map(|index| OrbitalStatePN::new(self, index).orbital_info())
            .collect()
    }

    /// Generates a dump of the subspace contents, for diagnostic purposes.
    pub fn debug_str(&self) -> String {
        let mut dump = format!(
            " weight_max {} Nmax {} (oscillator-like: {})\n",
            self.weight_max,
            self.nmax.map_or("-".to_string(), |nmax| nmax.to_string()),
            self.is_oscillator_like()
        );
        for index in 0..self.size() {
            let state = OrbitalStatePN::new(self, index);
            let _ = writeln!(
                dump,
                " index {index:>3} nlj {:>3} {:>3} {:>5} weight {}",
                state.n(),
                state.l(),
                state.j(),
                state.weight()
            );
        }
        dump
    }
}

impl Subspace for OrbitalSubspacePN {
    type SubspaceLabels = OrbitalSpeciesPN;
    type StateLabels = (i32, i32, HalfInt);
    type Table = DefaultLabelTable<(i32, i32, HalfInt)>;

    fn base(&self) -> &BaseSubspace<OrbitalSpeciesPN, (i32, i32, HalfInt)> {
        &self.base
    }

    fn label_str(&self) -> String {
        format!("[ {} ]", self.species().code())
    }
}

impl IsospinProjected for OrbitalSubspacePN {
    fn tz(&self) -> HalfInt {
        self.species().tz()
    }
}

/// A single orbital within an [`OrbitalSubspacePN`].
pub type OrbitalStatePN<'a> = State<'a, OrbitalSubspacePN>;

impl<'a> State<'a, OrbitalSubspacePN> {
    pub fn species(&self) -> OrbitalSpeciesPN {
        self.subspace().species()
    }

    pub fn n(&self) -> i32 {
        self.labels().0
    }

    pub fn l(&self) -> i32 {
        self.labels().1
    }

    pub fn j(&self) -> HalfInt {
        self.labels().2
    }

    /// Returns the parity grade, `l mod 2`.
    pub fn g(&self) -> u8 {
        (self.l().rem_euclid(2)) as u8
    }

    pub fn weight(&self) -> f64 {
        self.subspace().weights()[self.index()]
    }

    /// Returns the full labels `(species, n, l, j)` of the orbital.
    pub fn full_labels(&self) -> FullOrbitalLabels {
        (self.species(), self.n(), self.l(), self.j())
    }

    /// Flattens the orbital.
    pub fn orbital_info(&self) -> OrbitalPNInfo {
        OrbitalPNInfo {
            species: self.species(),
            n: self.n(),
            l: self.l(),
            j: self.j(),
            weight: self.weight(),
        }
    }
}

/// Structure for the space of orbitals grouped into species subspaces, in canonical species
/// order.
#[derive(Clone, Debug)]
pub struct OrbitalSpacePN {
    base: BaseSpace<OrbitalSubspacePN>,
    weight_max: f64,
    nmax: Option<i32>,
}

impl OrbitalSpacePN {
    /// Constructs the space of oscillator orbitals of up to `nmax` quanta, for both species.
    pub fn from_nmax(nmax: i32) -> Self {
        let base = BaseSpace::from_subspaces(
            OrbitalSpeciesPN::ALL
                .iter()
                .map(|species| OrbitalSubspacePN::from_nmax(*species, nmax)),
        );
        Self {
            base,
            weight_max: f64::from(nmax),
            nmax: Some(nmax),
        }
    }

    /// Constructs the space from a list of orbitals. Only species present in the list give rise
    /// to subspaces.
    pub fn from_orbitals(orbitals: &[OrbitalPNInfo]) -> Self {
        let species_present = orbitals
            .iter()
            .map(|orbital| orbital.species)
            .collect::<BTreeSet<_>>();
        let base: BaseSpace<OrbitalSubspacePN> = BaseSpace::from_subspaces(
            species_present
                .into_iter()
                .map(|species| OrbitalSubspacePN::from_orbitals(species, orbitals)),
        );
        let weight_max = base
            .subspaces()
            .map(OrbitalSubspacePN::weight_max)
            .fold(0.0, f64::max);
        let mut space = Self {
            base,
            weight_max,
            nmax: None,
        };
        space.nmax = space.oscillator_cutoff();
        space
    }

    /// Determines the common oscillator cutoff of all subspaces, if they are all oscillator-like
    /// with the same cutoff.
    fn oscillator_cutoff(&self) -> Option<i32> {
        let nmaxs = self.subspaces().map(OrbitalSubspacePN::nmax).collect::<Option<Vec<_>>>()?;
        let (first, rest) = nmaxs.split_first()?;
        rest.iter().all(|nmax| nmax == first).then_some(*first)
    }

    pub fn weight_max(&self) -> f64 {
        self.weight_max
    }

    pub fn is_oscillator_like(&self) -> bool {
        self.nmax.is_some()
    }

    pub fn nmax(&self) -> Option<i32> {
        self.nmax
    }

    /// Flattens the space into a list of orbitals, subspace by subspace.
    pub fn orbital_info(&self) -> Vec<OrbitalPNInfo> {
        self.subspaces()
            .flat_map(OrbitalSubspacePN::orbital_info)
            .collect()
    }

    /// Generates the orbital definition text of the space.
    pub fn orbital_definition_str(&self, standalone: bool) -> String {
        orbital_definition_str(&self.orbital_info(), standalone)
    }

    /// Generates a dump of the space contents, for diagnostic purposes.
    pub fn debug_str(&self) -> String {
        let mut dump = format!(
            " weight_max {} Nmax {} (oscillator-like: {})\n",
            self.weight_max,
            self.nmax.map_or("-".to_string(), |nmax| nmax.to_string()),
            self.is_oscillator_like()
        );
        for (index, subspace) in self.subspaces().enumerate() {
            let _ = writeln!(
                dump,
                " index {index:>3} species {:>3} dim {:>3}",
                subspace.species().code(),
                subspace.size()
            );
        }
        dump
    }
}

impl Space for OrbitalSpacePN {
    type Subspace = OrbitalSubspacePN;
    type Table = DefaultLabelTable<OrbitalSpeciesPN>;

    fn base(&self) -> &BaseSpace<OrbitalSubspacePN> {
        &self.base
    }
}

// ~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~
// Orbitals grouped by species and (l, j)
// ~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~

/// Structure for the subspace of orbitals of one species with given `l` and `j`. States are
/// labelled by `n`.
#[derive(Clone, Debug)]
pub struct OrbitalSubspaceLJPN {
    base: BaseSubspace<(OrbitalSpeciesPN, i32, HalfInt), i32>,
    weights: Vec<f64>,
    weight_max: f64,
    nmax: Option<i32>,
}

impl OrbitalSubspaceLJPN {
    /// Constructs the subspace of oscillator orbitals with `2n + l <= nmax`, of weight
    /// `2n + l`.
    pub fn from_nmax(species: OrbitalSpeciesPN, l: i32, j: HalfInt, nmax: i32) -> Self {
        let mut base = BaseSubspace::new((species, l, j));
        let weights = (0..)
            .take_while(|n| 2 * n + l <= nmax)
            .map(|n| {
                base.push_state_labels(n);
                f64::from(2 * n + l)
            })
            .collect();
        Self {
            base,
            weights,
            weight_max: f64::from(nmax),
            nmax: Some(nmax),
        }
    }

    /// Constructs the subspace from those orbitals in a list with the given species, `l`, and
    /// `j`, retaining their order in the list.
    pub fn from_orbitals(
        species: OrbitalSpeciesPN,
        l: i32,
        j: HalfInt,
        orbitals: &[OrbitalPNInfo],
    ) -> Self {
        let mut base = BaseSubspace::new((species, l, j));
        let mut weights = Vec::new();
        let mut weight_max = 0.0_f64;
        for orbital in orbitals
            .iter()
            .filter(|orbital| orbital.species == species && orbital.l == l && orbital.j == j)
        {
            base.push_state_labels(orbital.n);
            weights.push(orbital.weight);
            weight_max = weight_max.max(orbital.weight);
        }
        Self {
            base,
            weights,
            weight_max,
            nmax: None,
        }
    }

    pub fn species(&self) -> OrbitalSpeciesPN {
        self.labels().0
    }

    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    pub fn weight_max(&self) -> f64 {
        self.weight_max
    }

    /// Returns the oscillator cutoff, if the subspace was generated from one.
    pub fn nmax(&self) -> Option<i32> {
        self.nmax
    }

    /// Flattens the subspace into a list of orbitals.
    pub fn orbital_info(&self) -> Vec<OrbitalPNInfo> {
        (0..self.size())
            .map(|index| OrbitalStateLJPN::new(self, index).orbital_info())
            .collect()
    }

    /// Generates a dump of the subspace contents, for diagnostic purposes.
    pub fn debug_str(&self) -> String {
        let mut dump = String::new();
        for index in 0..self.size() {
            let state = OrbitalStateLJPN::new(self, index);
            let _ = writeln!(
                dump,
                " index {index:>3} nlj {:>3} {:>3} {:>5} weight {}",
                state.n(),
                self.l(),
                self.j(),
                state.weight()
            );
        }
        dump
    }
}

impl Subspace for OrbitalSubspaceLJPN {
    type SubspaceLabels = (OrbitalSpeciesPN, i32, HalfInt);
    type StateLabels = i32;
    type Table = DefaultLabelTable<i32>;

    fn base(&self) -> &BaseSubspace<(OrbitalSpeciesPN, i32, HalfInt), i32> {
        &self.base
    }

    fn label_str(&self) -> String {
        format!(
            "[ {:>3} {:>3} {:>5} ]",
            self.species().code(),
            self.l(),
            self.j()
        )
    }
}

impl OrbitalAngularMomentumLabelled for OrbitalSubspaceLJPN {
    fn l(&self) -> i32 {
        self.labels().1
    }
}

impl AngularMomentumLabelled for OrbitalSubspaceLJPN {
    fn j(&self) -> HalfInt {
        self.labels().2
    }
}

impl ParityGraded for OrbitalSubspaceLJPN {
    fn g(&self) -> u8 {
        (self.l().rem_euclid(2)) as u8
    }
}

impl IsospinProjected for OrbitalSubspaceLJPN {
    fn tz(&self) -> HalfInt {
        self.species().tz()
    }
}

/// A single orbital within an [`OrbitalSubspaceLJPN`].
pub type OrbitalStateLJPN<'a> = State<'a, OrbitalSubspaceLJPN>;

impl<'a> State<'a, OrbitalSubspaceLJPN> {
    pub fn species(&self) -> OrbitalSpeciesPN {
        self.subspace().species()
    }

    pub fn n(&self) -> i32 {
        *self.labels()
    }

    pub fn l(&self) -> i32 {
        self.subspace().l()
    }

    pub fn j(&self) -> HalfInt {
        self.subspace().j()
    }

    pub fn g(&self) -> u8 {
        self.subspace().g()
    }

    pub fn weight(&self) -> f64 {
        self.subspace().weights()[self.index()]
    }

    /// Returns the full labels `(species, n, l, j)` of the orbital.
    pub fn full_labels(&self) -> FullOrbitalLabels {
        (self.species(), self.n(), self.l(), self.j())
    }

    /// Flattens the orbital.
    pub fn orbital_info(&self) -> OrbitalPNInfo {
        OrbitalPNInfo {
            species: self.species(),
            n: self.n(),
            l: self.l(),
            j: self.j(),
            weight: self.weight(),
        }
    }
}

/// Structure for the space of orbitals grouped into `(species, l, j)` subspaces.
#[derive(Clone, Debug)]
pub struct OrbitalSpaceLJPN {
    base: BaseSpace<OrbitalSubspaceLJPN>,
    weight_max: f64,
    nmax: Option<i32>,
}

impl OrbitalSpaceLJPN {
    /// Constructs the space of oscillator orbitals of up to `nmax` quanta. Subspaces are ordered
    /// by species, then by increasing `l`, then by increasing `j`.
    pub fn from_nmax(nmax: i32) -> Self {
        let mut builder = BaseSpace::builder();
        for species in OrbitalSpeciesPN::ALL {
            for l in 0..=nmax {
                for twice_j in [2 * l - 1, 2 * l + 1] {
                    if twice_j < 0 {
                        continue;
                    }
                    builder.push_subspace(OrbitalSubspaceLJPN::from_nmax(
                        species,
                        l,
                        HalfInt::from_twice(twice_j),
                        nmax,
                    ));
                }
            }
        }
        Self {
            base: builder.build(),
            weight_max: f64::from(nmax),
            nmax: Some(nmax),
        }
    }

    /// Constructs the space from a list of orbitals. Subspaces are those `(species, l, j)`
    /// present in the list, in lexicographic order.
    pub fn from_orbitals(orbitals: &[OrbitalPNInfo]) -> Self {
        let labels_present = orbitals
            .iter()
            .map(|orbital| (orbital.species, orbital.l, orbital.j))
            .collect::<BTreeSet<_>>();
        let base: BaseSpace<OrbitalSubspaceLJPN> = BaseSpace::from_subspaces(labels_present.into_iter().map(
            |(species, l, j)| OrbitalSubspaceLJPN::from_orbitals(species, l, j, orbitals),
        ));
        let weight_max = base
            .subspaces()
            .map(OrbitalSubspaceLJPN::weight_max)
            .fold(0.0, f64::max);
        Self {
            base,
            weight_max,
            nmax: None,
        }
    }

    pub fn weight_max(&self) -> f64 {
        self.weight_max
    }

    /// Returns the oscillator cutoff, if the space was generated from one.
    pub fn nmax(&self) -> Option<i32> {
        self.nmax
    }

    /// Flattens the space into a list of orbitals, subspace by subspace.
    pub fn orbital_info(&self) -> Vec<OrbitalPNInfo> {
        self.subspaces()
            .flat_map(OrbitalSubspaceLJPN::orbital_info)
            .collect()
    }

    /// Generates a dump of the space contents, for diagnostic purposes.
    pub fn debug_str(&self) -> String {
        let mut dump = String::new();
        for (index, subspace) in self.subspaces().enumerate() {
            let _ = writeln!(
                dump,
                " index {index:>3} species {:>3} l {:>3} j {:>5} dim {:>3}",
                subspace.species().code(),
                subspace.l(),
                subspace.j(),
                subspace.size()
            );
        }
        dump
    }
}

impl Space for OrbitalSpaceLJPN {
    type Subspace = OrbitalSubspaceLJPN;
    type Table = DefaultLabelTable<(OrbitalSpeciesPN, i32, HalfInt)>;

    fn base(&self) -> &BaseSpace<OrbitalSubspaceLJPN> {
        &self.base
    }
}

/// Structure for the sectors of a one-body radial operator over `(species, l, j)` subspaces.
#[derive(Clone, Debug)]
pub struct OrbitalSectorsLJPN {
    base: BaseSectors<OrbitalSpaceLJPN>,

    /// The maximal change in `l`, for constrained enumerations.
    l0max: Option<i32>,

    /// The maximal change in isospin projection, for constrained enumerations.
    tz0: Option<i32>,
}

impl OrbitalSectorsLJPN {
    /// Enumerates all sectors within one space.
    pub fn all_to_all(space: &OrbitalSpaceLJPN, direction: SectorDirection) -> Self {
        Self {
            base: BaseSectors::all_to_all(space, direction),
            l0max: None,
            tz0: None,
        }
    }

    /// Enumerates all sectors between two spaces.
    pub fn all_to_all_between(bra_space: &OrbitalSpaceLJPN, ket_space: &OrbitalSpaceLJPN) -> Self {
        Self {
            base: BaseSectors::all_to_all_between(bra_space, ket_space),
            l0max: None,
            tz0: None,
        }
    }

    /// Enumerates the sectors within one space connected by an operator changing `l` by at most
    /// `l0max` and the isospin projection by at most `tz0`.
    ///
    /// The operator is taken to have parity $`(-)^{l_{0,\mathrm{max}}}`$, and `j` is also
    /// constrained to change by at most `l0max`.
    pub fn new(
        space: &OrbitalSpaceLJPN,
        l0max: i32,
        tz0: i32,
        direction: SectorDirection,
    ) -> Self {
        Self {
            base: BaseSectors::new(space, &ljpn_selection_rule(l0max, tz0), direction),
            l0max: Some(l0max),
            tz0: Some(tz0),
        }
    }

    /// Enumerates the sectors between two spaces connected by an operator changing `l` by at
    /// most `l0max` and the isospin projection by at most `tz0`.
    pub fn new_between(
        bra_space: &OrbitalSpaceLJPN,
        ket_space: &OrbitalSpaceLJPN,
        l0max: i32,
        tz0: i32,
    ) -> Self {
        Self {
            base: BaseSectors::new_between(
                bra_space,
                ket_space,
                &ljpn_selection_rule(l0max, tz0),
                SectorDirection::Both,
            ),
            l0max: Some(l0max),
            tz0: Some(tz0),
        }
    }

    pub fn l0max(&self) -> Option<i32> {
        self.l0max
    }

    pub fn tz0(&self) -> Option<i32> {
        self.tz0
    }
}

impl Sectors for OrbitalSectorsLJPN {
    type Space = OrbitalSpaceLJPN;
    type Table = DefaultLabelTable<SectorKey>;

    fn base(&self) -> &BaseSectors<OrbitalSpaceLJPN> {
        &self.base
    }
}

// =========
// Functions
// =========

/// Builds the selection rule of a radial operator changing `l` and `j` by at most `l0max`, of
/// parity grade `l0max mod 2`, and changing the isospin projection by at most `tz0`.
fn ljpn_selection_rule(
    l0max: i32,
    tz0: i32,
) -> impl Fn(&OrbitalSubspaceLJPN, &OrbitalSubspaceLJPN) -> bool {
    let l_rule = OrbitalAngularMomentumDifferenceRule { l0_max: l0max };
    let j_rule = AngularMomentumDifferenceRule {
        j0_max: HalfInt::from(l0max),
    };
    let parity_rule = ParityRule {
        g0: (l0max.rem_euclid(2)) as u8,
    };
    let tz_rule = IsospinProjectionBoundRule {
        tz0_max: HalfInt::from(tz0),
    };
    move |bra: &OrbitalSubspaceLJPN, ket: &OrbitalSubspaceLJPN| {
        l_rule.allows(bra, ket)
            && j_rule.allows(bra, ket)
            && tz_rule.allows(bra, ket)
            && parity_rule.allows(bra, ket)
    }
}

/// Looks up the indices needed to retrieve a radial matrix element between two orbitals from
/// matrices stored sector by sector.
///
/// The radial quantum number `n` is taken to coincide with the index of the orbital within its
/// `(species, l, j)` subspace.
///
/// # Arguments
///
/// * `sectors` - The sectors over which the matrices are stored.
/// * `bra_labels` - The full labels of the bra orbital.
/// * `ket_labels` - The full labels of the ket orbital.
///
/// # Returns
///
/// The triple `(sector_index, bra_state_index, ket_state_index)`. If the sector is missing, all
/// three are [`NONE`]. If a radial quantum number lies beyond its subspace, the corresponding
/// state index is [`NONE`].
///
/// # Panics
///
/// Panics if either radial quantum number is negative.
pub fn matrix_element_indices_ljpn<T>(
    sectors: &T,
    bra_labels: &FullOrbitalLabels,
    ket_labels: &FullOrbitalLabels,
) -> (usize, usize, usize)
where
    T: Sectors<Space = OrbitalSpaceLJPN>,
{
    let (bra_species, bra_n, bra_l, bra_j) = *bra_labels;
    let (ket_species, ket_n, ket_l, ket_j) = *ket_labels;
    assert!(
        bra_n >= 0 && ket_n >= 0,
        "Negative radial quantum number in bra {bra_labels:?} or ket {ket_labels:?}."
    );

    let bra_subspace_index = sectors
        .bra_space()
        .lookup_subspace_index(&(bra_species, bra_l, bra_j));
    let ket_subspace_index = sectors
        .ket_space()
        .lookup_subspace_index(&(ket_species, ket_l, ket_j));
    let sector_index = sectors.lookup_sector_index(bra_subspace_index, ket_subspace_index);
    if sector_index == NONE {
        return (NONE, NONE, NONE);
    }

    let sector = sectors.get_sector(sector_index);
    let state_index = |n: i32, size: usize| {
        usize::try_from(n)
            .ok()
            .filter(|&index| index < size)
            .unwrap_or(NONE)
    };
    (
        sector_index,
        state_index(bra_n, sector.bra_subspace().size()),
        state_index(ket_n, sector.ket_subspace().size()),
    )
}

/// Parses orbital definitions from MFDn-style text.
///
/// # Arguments
///
/// * `text` - The orbital definition text.
/// * `standalone` - If `true`, the text is expected to start with a header made of optional `#`
/// comment lines, a version line, and a line giving the numbers of proton and neutron orbitals,
/// which are checked against the orbitals found. If `false`, the text holds orbital lines only.
///
/// # Returns
///
/// The orbitals in the order listed.
pub fn parse_orbital_pn_str(
    text: &str,
    standalone: bool,
) -> Result<Vec<OrbitalPNInfo>, anyhow::Error> {
    let mut lines = text.lines().enumerate().map(|(i, line)| (i + 1, line));

    let expected_counts = if standalone {
        let (line_number, version_line) = lines
            .by_ref()
            .find(|(_, line)| !line.trim_start().starts_with('#'))
            .ok_or_else(|| format_err!("Missing version line in orbital definitions."))?;
        let version = version_line
            .trim()
            .parse::<i32>()
            .with_context(|| format!("Invalid version on line {line_number}: `{version_line}`"))?;
        ensure!(
            version == MFDN_ORBITAL_FORMAT_VERSION,
            "Unsupported orbital definition version {version} on line {line_number}."
        );

        let (line_number, counts_line) = lines
            .next()
            .ok_or_else(|| format_err!("Missing orbital count line in orbital definitions."))?;
        let counts = counts_line
            .split_whitespace()
            .map(str::parse::<usize>)
            .collect::<Result<Vec<_>, _>>()
            .with_context(|| format!("Invalid orbital counts on line {line_number}: `{counts_line}`"))?;
        ensure!(
            counts.len() == 2,
            "Expected two orbital counts on line {line_number}: `{counts_line}`"
        );
        Some((counts[0], counts[1]))
    } else {
        None
    };

    let mut seen = BTreeSet::new();
    let orbitals = lines
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(line_number, line)| -> Result<OrbitalPNInfo, anyhow::Error> {
            let orbital = parse_orbital_line(line)
                .with_context(|| format!("Invalid orbital on line {line_number}: `{line}`"))?;
            ensure!(
                seen.insert(orbital.full_labels()),
                "Duplicate orbital on line {line_number}: `{line}`"
            );
            Ok(orbital)
        })
        .collect::<Result<Vec<_>, _>>()?;

    if let Some((num_p, num_n)) = expected_counts {
        let found_p = orbitals
            .iter()
            .filter(|orbital| orbital.species == OrbitalSpeciesPN::P)
            .count();
        let found_n = orbitals.len() - found_p;
        ensure!(
            (found_p, found_n) == (num_p, num_n),
            "Orbital counts in header ({num_p} p, {num_n} n) do not match the orbitals found \
            ({found_p} p, {found_n} n)."
        );
    }

    log::debug!("Parsed {} orbitals.", orbitals.len());
    Ok(orbitals)
}

/// Checks that no two orbitals share the same `(species, n, l, j)`.
pub fn ensure_distinct_orbitals(orbitals: &[OrbitalPNInfo]) -> Result<(), anyhow::Error> {
    let mut seen = BTreeSet::new();
    orbitals.iter().try_for_each(|orbital| {
        ensure!(
            seen.insert(orbital.full_labels()),
            "Duplicate orbital {:?}.",
            orbital.full_labels()
        );
        Ok(())
    })
}

/// Parses one orbital line `index n l 2*j species weight`. The index and any trailing fields
/// are ignored.
fn parse_orbital_line(line: &str) -> Result<OrbitalPNInfo, anyhow::Error> {
    let fields = line.split_whitespace().collect::<Vec<_>>();
    ensure!(
        fields.len() >= 6,
        "Expected at least 6 fields but found {}.",
        fields.len()
    );
    let n = fields[1].parse::<i32>()?;
    let l = fields[2].parse::<i32>()?;
    let twice_j = fields[3].parse::<i32>()?;
    let species = OrbitalSpeciesPN::from_decimal_code(fields[4].parse::<i32>()?)?;
    let weight = fields[5].parse::<f64>()?;
    Ok(OrbitalPNInfo {
        species,
        n,
        l,
        j: HalfInt::from_twice(twice_j),
        weight,
    })
}

/// Generates MFDn-style orbital definition text for a list of orbitals.
///
/// Orbitals are indexed from `1` separately within each species, in list order.
///
/// # Arguments
///
/// * `orbitals` - The orbitals to be written.
/// * `standalone` - If `true`, a header with comment lines, the version line, and the numbers of
/// proton and neutron orbitals is prepended.
pub fn orbital_definition_str(orbitals: &[OrbitalPNInfo], standalone: bool) -> String {
    let mut counts = [0usize; 2];
    let mut body = String::new();
    for orbital in orbitals {
        counts[orbital.species.code()] += 1;
        let _ = writeln!(body, " {:>3}{orbital}", counts[orbital.species.code()]);
    }

    if standalone {
        let mut header = String::new();
        header.push_str("# MFDn SPorbital file\n");
        header.push_str("#   version\n");
        header.push_str("#   norb_p norb_n\n");
        header.push_str("#   index n l 2*j species weight\n");
        let _ = writeln!(header, "{MFDN_ORBITAL_FORMAT_VERSION}");
        let _ = writeln!(header, "{} {}", counts[0], counts[1]);
        header + &body
    } else {
        body
    }
}
