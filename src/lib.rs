//! # qnbasis: Quantum-Number-Indexed Many-Body Bases
//!
//! qnbasis is a library for constructing and indexing the bases of quantum many-body
//! calculations in which states are grouped by conserved symmetry quantum numbers. It provides
//!
//! - generic containers for subspaces of states, spaces of subspaces, and sectors of operator
//!   matrices, each with reverse lookup by labels,
//! - selection rules deciding which pairs of subspaces an operator connects, and
//! - concrete schemes for single-particle orbitals and two-body states of proton-neutron systems.
//!
//! ## Indexing model
//!
//! A **state** is identified by a tuple of state labels within a **subspace**, which in turn is
//! identified by a tuple of subspace labels. Subspaces are collected into a **space**, and the
//! nonzero blocks of an operator matrix over a space are enumerated as **sectors**. Indices are
//! assigned in construction order and lookups that fail return [`basis::NONE`].
//!
//! Concrete schemes embed the generic containers of [`basis`]:
//!
//! - [`scheme::nlj_orbital`]: orbitals labelled by `(n, l, j)`, grouped by species alone or by
//!   species together with `(l, j)`, and MFDn orbital definition files,
//! - [`scheme::jjjpn`]: two-body states in the jjJ coupling scheme.
//!
//! ## Features
//!
//! - `hash-lookup`: Uses hash tables instead of ordered maps for all reverse lookups.
//!
//! ## Binary
//!
//! The `qnbasis` binary reads a YAML configuration file and runs the sector enumeration driver
//! of [`drivers::sector_enumeration`], *e.g.*
//!
//! ```text
//! qnbasis -c input.yml -o run -v
//! ```

pub mod angmom;
pub mod basis;
pub mod drivers;
pub mod interfaces;
pub mod io;
pub mod scheme;
