//! Concrete coupling schemes built on the generic indexing of [`crate::basis`].
//!
//! * [`proton_neutron`] defines the proton-neutron species codes shared by the schemes.
//! * [`nlj_orbital`] indexes single-particle orbitals `(n, l, j)`, grouped either by species
//!   alone or by species together with `(l, j)`.
//! * [`jjjpn`] indexes two-body states of pairs of orbitals coupled to total angular momentum
//!   `J` in proton-neutron format.

pub mod jjjpn;
pub mod nlj_orbital;
pub mod proton_neutron;
