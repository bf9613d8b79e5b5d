//! Proton-neutron species labels for orbitals and for two-body states.

use std::fmt;

use anyhow::{self, format_err};
use serde::{Deserialize, Serialize};

use crate::angmom::HalfInt;

#[cfg(test)]
#[path = "proton_neutron_tests.rs"]
mod proton_neutron_tests;

// ================
// Enum definitions
// ================

/// Enumerated type for the species of a single-particle orbital.
///
/// The variant order is the canonical order of orbital subspaces.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum OrbitalSpeciesPN {
    /// Proton.
    P,

    /// Neutron.
    N,
}

impl OrbitalSpeciesPN {
    /// All orbital species in canonical order.
    pub const ALL: [Self; 2] = [Self::P, Self::N];

    /// Returns the `0`-based code of the species, usable as an array index.
    pub fn code(&self) -> usize {
        match self {
            Self::P => 0,
            Self::N => 1,
        }
    }

    /// Returns the isospin projection of the species, in the convention where protons carry
    /// $`+1/2`$.
    pub fn tz(&self) -> HalfInt {
        match self {
            Self::P => HalfInt::from_twice(1),
            Self::N => HalfInt::from_twice(-1),
        }
    }

    /// Returns the `1`-based code of the species used in orbital definition files.
    pub fn decimal_code(&self) -> i32 {
        match self {
            Self::P => 1,
            Self::N => 2,
        }
    }

    /// Parses the `1`-based code of the species used in orbital definition files.
    pub fn from_decimal_code(code: i32) -> Result<Self, anyhow::Error> {
        match code {
            1 => Ok(Self::P),
            2 => Ok(Self::N),
            _ => Err(format_err!("Invalid orbital species code: {code}.")),
        }
    }
}

impl fmt::Display for OrbitalSpeciesPN {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::P => write!(f, "p"),
            Self::N => write!(f, "n"),
        }
    }
}

/// Enumerated type for the species of a two-body state.
///
/// The variant order is that of [`TwoBodySpaceOrdering::PN`].
///
/// [`TwoBodySpaceOrdering::PN`]: crate::scheme::jjjpn::TwoBodySpaceOrdering::PN
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum TwoBodySpeciesPN {
    /// Proton-proton.
    PP,

    /// Neutron-neutron.
    NN,

    /// Proton-neutron.
    PN,
}

impl TwoBodySpeciesPN {
    /// Returns the `0`-based code of the species, usable as an array index.
    pub fn code(&self) -> usize {
        match self {
            Self::PP => 0,
            Self::NN => 1,
            Self::PN => 2,
        }
    }

    /// Returns the isospin projection of the species.
    pub fn tz(&self) -> HalfInt {
        match self {
            Self::PP => HalfInt::from(1),
            Self::NN => HalfInt::from(-1),
            Self::PN => HalfInt::from(0),
        }
    }

    /// Returns the species of the two constituent orbitals.
    pub fn orbital_species(&self) -> (OrbitalSpeciesPN, OrbitalSpeciesPN) {
        match self {
            Self::PP => (OrbitalSpeciesPN::P, OrbitalSpeciesPN::P),
            Self::NN => (OrbitalSpeciesPN::N, OrbitalSpeciesPN::N),
            Self::PN => (OrbitalSpeciesPN::P, OrbitalSpeciesPN::N),
        }
    }

    /// Returns `true` if both constituents are of the same species.
    pub fn is_identical_particle(&self) -> bool {
        matches!(self, Self::PP | Self::NN)
    }
}

impl fmt::Display for TwoBodySpeciesPN {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PP => write!(f, "pp"),
            Self::NN => write!(f, "nn"),
            Self::PN => write!(f, "pn"),
        }
    }
}

/// Enumerated type for the particle rank at which an oscillator truncation is specified.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Rank {
    /// Truncation on the oscillator quanta of each particle.
    OneBody,

    /// Truncation on the total oscillator quanta of each pair.
    TwoBody,
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OneBody => write!(f, "one-body"),
            Self::TwoBody => write!(f, "two-body"),
        }
    }
}

// =========
// Functions
// =========

/// Converts a truncation cutoff of a given rank into the pair `(N1max, N2max)` of one-body and
/// two-body oscillator cutoffs.
///
/// A one-body cutoff $`N_1`$ admits pairs of up to $`2N_1`$ quanta, whereas a two-body cutoff
/// $`N_2`$ admits single particles of up to $`N_2`$ quanta.
pub fn two_body_cutoffs(truncation_rank: Rank, truncation_cutoff: i32) -> (i32, i32) {
    match truncation_rank {
        Rank::OneBody => (truncation_cutoff, 2 * truncation_cutoff),
        Rank::TwoBody => (truncation_cutoff, truncation_cutoff),
    }
}
