use itertools::Itertools;

use crate::angmom::HalfInt;
use crate::basis::selection::{AngularMomentumLabelled, IsospinProjected, OperatorSelectionRule};
use crate::basis::{SectorDirection, Sectors, Space, Subspace};
use crate::scheme::jjjpn::{
    TwoBodySectorsJJJPN, TwoBodySpaceJJJPN, TwoBodySpaceOrdering, TwoBodyStateJJJPN,
    TwoBodySubspaceJJJPN, WeightMax,
};
use crate::scheme::nlj_orbital::OrbitalSpacePN;
use crate::scheme::proton_neutron::{Rank, TwoBodySpeciesPN};

fn subspace_summary(space: &TwoBodySpaceJJJPN) -> Vec<(TwoBodySpeciesPN, i32, u8, usize)> {
    space
        .subspaces()
        .map(|subspace| {
            let (species, big_j, g) = *subspace.labels();
            (species, big_j, g, subspace.size())
        })
        .collect_vec()
}

#[test]
fn test_weight_max_constructors() {
    let weight_max = WeightMax::from_rank(Rank::OneBody, 2);
    assert_eq!(weight_max, WeightMax::new(2.0, 2.0, 4.0, 4.0, 4.0));
    assert_eq!(
        WeightMax::from_rank(Rank::TwoBody, 2),
        WeightMax::from_cutoffs(2, 2)
    );
    assert_eq!(
        weight_max.to_string(),
        "one-body (p, n): (2, 2), two-body (pp, nn, pn): (4, 4, 4)"
    );
}

#[test]
fn test_two_body_subspace_enumeration() {
    let orbital_space = OrbitalSpacePN::from_nmax(1);
    let weight_max = WeightMax::from_cutoffs(1, 1);

    let subspace =
        TwoBodySubspaceJJJPN::new(&orbital_space, TwoBodySpeciesPN::PP, 1, 1, weight_max);
    assert_eq!(
        subspace.state_labels().copied().collect_vec(),
        vec![(0, 1), (0, 2)]
    );
    assert_eq!(subspace.j(), HalfInt::from(1));
    assert_eq!(subspace.tz(), HalfInt::from(1));

    // Identical orbitals couple to even J only.
    let subspace =
        TwoBodySubspaceJJJPN::new(&orbital_space, TwoBodySpeciesPN::NN, 1, 0, weight_max);
    assert_eq!(subspace.size(), 0);
    let subspace =
        TwoBodySubspaceJJJPN::new(&orbital_space, TwoBodySpeciesPN::NN, 0, 0, weight_max);
    assert_eq!(subspace.state_labels().copied().collect_vec(), vec![(0, 0)]);

    // Unlike particles have no index ordering constraint.
    let subspace =
        TwoBodySubspaceJJJPN::new(&orbital_space, TwoBodySpeciesPN::PN, 1, 1, weight_max);
    assert_eq!(
        subspace.state_labels().copied().collect_vec(),
        vec![(0, 1), (0, 2), (1, 0), (2, 0)]
    );

    let state = TwoBodyStateJJJPN::new(&subspace, 3);
    assert_eq!(state.index1(), 2);
    assert_eq!(state.index2(), 0);
    assert_eq!(state.orbital1().j(), HalfInt::new(3, 2));
    assert_eq!(state.orbital2().l(), 0);
}

#[test]
fn test_two_body_space_pn_ordering() {
    let orbital_space = OrbitalSpacePN::from_nmax(1);
    let space = TwoBodySpaceJJJPN::new(
        &orbital_space,
        WeightMax::from_cutoffs(1, 1),
        TwoBodySpaceOrdering::PN,
    );
    assert_eq!(space.size(), 13);
    assert_eq!(space.dimension(), 20);
    assert_eq!(
        subspace_summary(&space),
        vec![
            (TwoBodySpeciesPN::PP, 0, 0, 1),
            (TwoBodySpeciesPN::PP, 0, 1, 1),
            (TwoBodySpeciesPN::PP, 1, 1, 2),
            (TwoBodySpeciesPN::PP, 2, 1, 1),
            (TwoBodySpeciesPN::NN, 0, 0, 1),
            (TwoBodySpeciesPN::NN, 0, 1, 1),
            (TwoBodySpeciesPN::NN, 1, 1, 2),
            (TwoBodySpeciesPN::NN, 2, 1, 1),
            (TwoBodySpeciesPN::PN, 0, 0, 1),
            (TwoBodySpeciesPN::PN, 0, 1, 2),
            (TwoBodySpeciesPN::PN, 1, 0, 1),
            (TwoBodySpeciesPN::PN, 1, 1, 4),
            (TwoBodySpeciesPN::PN, 2, 1, 2),
        ]
    );
    assert!(space.subspaces().all(|subspace| subspace.size() > 0));
    assert_eq!(
        space.lookup_subspace_index(&(TwoBodySpeciesPN::PN, 1, 1)),
        11
    );
    assert!(!space.contains_subspace(&(TwoBodySpeciesPN::PP, 1, 0)));
    assert_eq!(space.ordering(), TwoBodySpaceOrdering::PN);
}

#[test]
fn test_two_body_space_tz_ordering() {
    let orbital_space = OrbitalSpacePN::from_nmax(1);
    let space = TwoBodySpaceJJJPN::new(
        &orbital_space,
        WeightMax::from_cutoffs(1, 1),
        TwoBodySpaceOrdering::Tz,
    );
    assert_eq!(space.size(), 13);
    assert_eq!(
        space.get_subspace(4).labels(),
        &(TwoBodySpeciesPN::PN, 0, 0)
    );
    assert_eq!(
        space.get_subspace(9).labels(),
        &(TwoBodySpeciesPN::NN, 0, 0)
    );
}

#[test]
fn test_two_body_space_missing_species() {
    let orbitals = OrbitalSpacePN::from_nmax(1).orbital_info();
    let protons_only = OrbitalSpacePN::from_orbitals(&orbitals[..3]);
    let space = TwoBodySpaceJJJPN::new(
        &protons_only,
        WeightMax::from_cutoffs(1, 1),
        TwoBodySpaceOrdering::PN,
    );
    assert_eq!(space.size(), 4);
    assert!(space
        .subspaces()
        .all(|subspace| subspace.two_body_species() == TwoBodySpeciesPN::PP));
}

#[test]
fn test_two_body_space_one_body_truncation() {
    let orbital_space = OrbitalSpacePN::from_nmax(1);
    let space = TwoBodySpaceJJJPN::new(
        &orbital_space,
        WeightMax::from_rank(Rank::OneBody, 1),
        TwoBodySpaceOrdering::PN,
    );
    // With both orbitals allowed up to one quantum, p-shell pairs appear.
    let subspace = space.lookup_subspace(&(TwoBodySpeciesPN::PP, 0, 0));
    assert_eq!(
        subspace.state_labels().copied().collect_vec(),
        vec![(0, 0), (1, 1), (2, 2)]
    );
}

#[test]
fn test_two_body_sectors() {
    let orbital_space = OrbitalSpacePN::from_nmax(1);
    let space = TwoBodySpaceJJJPN::new(
        &orbital_space,
        WeightMax::from_cutoffs(1, 1),
        TwoBodySpaceOrdering::PN,
    );

    let scalar = TwoBodySectorsJJJPN::new(
        &space,
        &OperatorSelectionRule::scalar(),
        SectorDirection::Canonical,
    );
    assert_eq!(scalar.size(), 13);
    assert!((0..scalar.size()).all(|index| scalar.get_sector(index).is_diagonal()));
    assert_eq!(scalar.j0(), HalfInt::from(0));

    let isospin_raising = OperatorSelectionRule::builder()
        .tz0(HalfInt::from(1))
        .build()
        .unwrap();
    let sectors = TwoBodySectorsJJJPN::new(&space, &isospin_raising, SectorDirection::Canonical);
    assert_eq!(
        sectors
            .keys()
            .map(|key| (key.bra_subspace_index, key.ket_subspace_index))
            .collect_vec(),
        vec![(0, 8), (1, 9), (2, 11), (3, 12)]
    );
    assert_eq!(sectors.tz0(), HalfInt::from(1));

    let space_tz = TwoBodySpaceJJJPN::new(
        &orbital_space,
        WeightMax::from_cutoffs(1, 1),
        TwoBodySpaceOrdering::Tz,
    );
    let sectors = TwoBodySectorsJJJPN::new(&space_tz, &isospin_raising, SectorDirection::Canonical);
    assert_eq!(sectors.size(), 8);

    let sectors = TwoBodySectorsJJJPN::new_between(&space, &space_tz, &isospin_raising);
    assert_eq!(sectors.size(), 8);
}

#[test]
fn test_two_body_sectors_dipole() {
    let orbital_space = OrbitalSpacePN::from_nmax(1);
    let space = TwoBodySpaceJJJPN::new(
        &orbital_space,
        WeightMax::from_cutoffs(1, 1),
        TwoBodySpaceOrdering::PN,
    );
    let dipole = OperatorSelectionRule::builder()
        .j0(HalfInt::from(1))
        .g0(1)
        .build()
        .unwrap();
    let sectors = TwoBodySectorsJJJPN::new(&space, &dipole, SectorDirection::Canonical);
    for index in 0..sectors.size() {
        let sector = sectors.get_sector(index);
        assert_ne!(sector.bra_subspace().labels().2, sector.ket_subspace().labels().2);
        assert_eq!(
            sector.bra_subspace().two_body_species(),
            sector.ket_subspace().two_body_species()
        );
    }
    // pp and nn: (J, g) = (0, 0) to (1, 1) only; pn: (0, 0) to (1, 1), (0, 1) to (1, 0), and
    // (1, 0) to (1, 1) and (2, 1).
    assert_eq!(sectors.size(), 6);
}
