//! Selection rules deciding which pairs of subspaces an operator connects.

use std::fmt;

use derive_builder::Builder;
use serde::{Deserialize, Serialize};

use crate::angmom::{allowed_triangle, HalfInt};
use crate::basis::subspace::Subspace;

#[cfg(test)]
#[path = "selection_tests.rs"]
mod selection_tests;

// =================
// Trait definitions
// =================

/// Trait for predicates on `(bra subspace, ket subspace)` pairs.
///
/// Any closure `Fn(&S, &S) -> bool` is a selection rule with unit multiplicity.
pub trait SelectionRule<S: Subspace> {
    /// Determines whether the operator connects the ket subspace to the bra subspace.
    fn allows(&self, bra: &S, ket: &S) -> bool;

    /// Returns the number of distinct sectors to be enumerated for an allowed pair of
    /// subspaces.
    fn multiplicity(&self, _bra: &S, _ket: &S) -> usize {
        1
    }

    /// Combines this rule with another, both of which must allow a pair for the combination
    /// to allow it. The multiplicity is taken from `self`.
    fn and<R>(self, other: R) -> And<Self, R>
    where
        Self: Sized,
        R: SelectionRule<S>,
    {
        And {
            first: self,
            second: other,
        }
    }

    /// Replaces the multiplicity of this rule by the given function.
    fn with_multiplicity<F>(self, multiplicity: F) -> WithMultiplicity<Self, F>
    where
        Self: Sized,
        F: Fn(&S, &S) -> usize,
    {
        WithMultiplicity {
            rule: self,
            multiplicity,
        }
    }
}

impl<S, F> SelectionRule<S> for F
where
    S: Subspace,
    F: Fn(&S, &S) -> bool,
{
    fn allows(&self, bra: &S, ket: &S) -> bool {
        self(bra, ket)
    }
}

/// Trait for subspaces of definite total angular momentum.
pub trait AngularMomentumLabelled {
    fn j(&self) -> HalfInt;
}

/// Trait for subspaces of definite orbital angular momentum.
pub trait OrbitalAngularMomentumLabelled {
    fn l(&self) -> i32;
}

/// Trait for subspaces of definite parity grade (`0` for even, `1` for odd).
pub trait ParityGraded {
    fn g(&self) -> u8;
}

/// Trait for subspaces of definite isospin projection.
pub trait IsospinProjected {
    fn tz(&self) -> HalfInt;
}

// ===========
// Combinators
// ===========

/// Conjunction of two selection rules.
#[derive(Clone, Debug)]
pub struct And<A, B> {
    first: A,
    second: B,
}

impl<S, A, B> SelectionRule<S> for And<A, B>
where
    S: Subspace,
    A: SelectionRule<S>,
    B: SelectionRule<S>,
{
    fn allows(&self, bra: &S, ket: &S) -> bool {
        self.first.allows(bra, ket) && self.second.allows(bra, ket)
    }

    fn multiplicity(&self, bra: &S, ket: &S) -> usize {
        self.first.multiplicity(bra, ket)
    }
}

/// A selection rule with an overridden multiplicity function.
#[derive(Clone)]
pub struct WithMultiplicity<R, F> {
    rule: R,
    multiplicity: F,
}

impl<S, R, F> SelectionRule<S> for WithMultiplicity<R, F>
where
    S: Subspace,
    R: SelectionRule<S>,
    F: Fn(&S, &S) -> usize,
{
    fn allows(&self, bra: &S, ket: &S) -> bool {
        self.rule.allows(bra, ket)
    }

    fn multiplicity(&self, bra: &S, ket: &S) -> usize {
        (self.multiplicity)(bra, ket)
    }
}

// ==============
// Standard rules
// ==============

/// Rule allowing every pair of subspaces.
#[derive(Clone, Copy, Debug, Default)]
pub struct AllowAll;

impl<S: Subspace> SelectionRule<S> for AllowAll {
    fn allows(&self, _bra: &S, _ket: &S) -> bool {
        true
    }
}

/// Rule requiring the angular momenta of bra, operator and ket to satisfy the triangle
/// condition.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TriangleRule {
    pub j0: HalfInt,
}

impl<S: Subspace + AngularMomentumLabelled> SelectionRule<S> for TriangleRule {
    fn allows(&self, bra: &S, ket: &S) -> bool {
        allowed_triangle(ket.j(), self.j0, bra.j())
    }
}

/// Rule bounding the change in total angular momentum, `|J_bra - J_ket| <= j0_max`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AngularMomentumDifferenceRule {
    pub j0_max: HalfInt,
}

impl<S: Subspace + AngularMomentumLabelled> SelectionRule<S> for AngularMomentumDifferenceRule {
    fn allows(&self, bra: &S, ket: &S) -> bool {
        (bra.j() - ket.j()).abs() <= self.j0_max
    }
}

/// Rule bounding the change in orbital angular momentum, `|l_bra - l_ket| <= l0_max`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OrbitalAngularMomentumDifferenceRule {
    pub l0_max: i32,
}

impl<S> SelectionRule<S> for OrbitalAngularMomentumDifferenceRule
where
    S: Subspace + OrbitalAngularMomentumLabelled,
{
    fn allows(&self, bra: &S, ket: &S) -> bool {
        (bra.l() - ket.l()).abs() <= self.l0_max
    }
}

/// Rule requiring parity conservation, `(g_bra + g0 + g_ket) mod 2 == 0`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ParityRule {
    pub g0: u8,
}

impl<S: Subspace + ParityGraded> SelectionRule<S> for ParityRule {
    fn allows(&self, bra: &S, ket: &S) -> bool {
        (u32::from(bra.g()) + u32::from(self.g0) + u32::from(ket.g())) % 2 == 0
    }
}

/// Rule requiring the operator to shift the isospin projection by exactly `tz0`,
/// `Tz_bra == Tz_ket + tz0`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct IsospinProjectionShiftRule {
    pub tz0: HalfInt,
}

impl<S: Subspace + IsospinProjected> SelectionRule<S> for IsospinProjectionShiftRule {
    fn allows(&self, bra: &S, ket: &S) -> bool {
        bra.tz() == ket.tz() + self.tz0
    }
}

/// Rule bounding the change in isospin projection, `|Tz_bra - Tz_ket| <= tz0_max`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct IsospinProjectionBoundRule {
    pub tz0_max: HalfInt,
}

impl<S: Subspace + IsospinProjected> SelectionRule<S> for IsospinProjectionBoundRule {
    fn allows(&self, bra: &S, ket: &S) -> bool {
        (bra.tz() - ket.tz()).abs() <= self.tz0_max
    }
}

// -----------------------
// Operator selection rule
// -----------------------

/// Structure describing the tensorial character of an operator and, thence, the sectors of its
/// matrix: the operator has angular momentum `j0`, parity grade `g0`, and shifts the isospin
/// projection by `tz0`.
#[derive(Clone, Copy, Builder, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperatorSelectionRule {
    /// The angular momentum of the operator.
    #[builder(default)]
    #[serde(default)]
    pub j0: HalfInt,

    /// The parity grade of the operator.
    #[builder(default)]
    #[serde(default)]
    pub g0: u8,

    /// The isospin projection shift effected by the operator.
    #[builder(default)]
    #[serde(default)]
    pub tz0: HalfInt,
}

impl OperatorSelectionRule {
    /// Returns a builder to construct a new [`OperatorSelectionRule`].
    pub fn builder() -> OperatorSelectionRuleBuilder {
        OperatorSelectionRuleBuilder::default()
    }

    /// Returns the rule for a scalar, parity-conserving, isospin-projection-conserving operator.
    pub fn scalar() -> Self {
        Self::default()
    }
}

impl Default for OperatorSelectionRule {
    fn default() -> Self {
        Self::builder()
            .build()
            .expect("Unable to construct a default `OperatorSelectionRule`.")
    }
}

impl fmt::Display for OperatorSelectionRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Operator angular momentum J0: {}", self.j0)?;
        writeln!(f, "Operator parity grade g0: {}", self.g0)?;
        writeln!(f, "Operator isospin projection shift Tz0: {}", self.tz0)?;
        Ok(())
    }
}

impl<S> SelectionRule<S> for OperatorSelectionRule
where
    S: Subspace + AngularMomentumLabelled + ParityGraded + IsospinProjected,
{
    fn allows(&self, bra: &S, ket: &S) -> bool {
        TriangleRule { j0: self.j0 }.allows(bra, ket)
            && ParityRule { g0: self.g0 }.allows(bra, ket)
            && IsospinProjectionShiftRule { tz0: self.tz0 }.allows(bra, ket)
    }
}
