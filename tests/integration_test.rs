use itertools::Itertools;

use qnbasis::angmom::HalfInt;
use qnbasis::basis::lookup::DefaultLabelTable;
use qnbasis::basis::selection::{AngularMomentumLabelled, TriangleRule};
use qnbasis::basis::{
    BaseSectors, BaseSpace, BaseSubspace, SectorDirection, Sectors, SelectionRule, Space, State,
    Subspace, NONE,
};
use qnbasis::drivers::sector_enumeration::{SectorEnumerationDriver, SectorEnumerationParams};
use qnbasis::drivers::BasisDriver;
use qnbasis::scheme::jjjpn::{
    TwoBodySectorsJJJPN, TwoBodySpaceJJJPN, TwoBodySpaceOrdering, WeightMax,
};
use qnbasis::scheme::nlj_orbital::{
    matrix_element_indices_ljpn, parse_orbital_pn_str, OrbitalSectorsLJPN, OrbitalSpaceLJPN,
    OrbitalSpacePN,
};
use qnbasis::scheme::proton_neutron::{OrbitalSpeciesPN, Rank};

const ROOT: &str = env!("CARGO_MANIFEST_DIR");

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Subspace of `N` spin-1/2 particles of total spin `S`, with states labelled by the
/// intermediate spin reached after each particle is added.
#[derive(Clone, Debug)]
struct SpinChainSubspace {
    base: BaseSubspace<(i32, i32), Vec<i32>>,
}

impl SpinChainSubspace {
    /// Enumerates the coupling paths of `n` spins to twice-spin `twice_s`.
    fn new(n: i32, twice_s: i32) -> Self {
        let mut paths = vec![vec![1]];
        for _ in 1..n {
            paths = paths
                .into_iter()
                .flat_map(|path| {
                    let last = *path.last().unwrap_or(&0);
                    [last - 1, last + 1]
                        .into_iter()
                        .filter(|next| *next >= 0)
                        .map(move |next| {
                            let mut extended = path.clone();
                            extended.push(next);
                            extended
                        })
                })
                .collect_vec();
        }
        let paths = paths
            .into_iter()
            .filter(|path| path.last() == Some(&twice_s))
            .sorted();
        Self {
            base: BaseSubspace::from_state_labels((n, twice_s), paths),
        }
    }
}

impl Subspace for SpinChainSubspace {
    type SubspaceLabels = (i32, i32);
    type StateLabels = Vec<i32>;
    type Table = DefaultLabelTable<Vec<i32>>;

    fn base(&self) -> &BaseSubspace<(i32, i32), Vec<i32>> {
        &self.base
    }
}

impl AngularMomentumLabelled for SpinChainSubspace {
    fn j(&self) -> HalfInt {
        HalfInt::from_twice(self.labels().1)
    }
}

#[test]
fn test_user_defined_scheme() {
    init_logger();
    let space = BaseSpace::<SpinChainSubspace>::from_subspaces(
        (0..=4)
            .step_by(2)
            .map(|twice_s| SpinChainSubspace::new(4, twice_s)),
    );
    // Four spins couple to S = 0 twice, S = 1 three times, and S = 2 once.
    assert_eq!(
        space.subspaces().map(Subspace::size).collect_vec(),
        vec![2, 3, 1]
    );
    assert_eq!(space.dimension(), 6);

    let subspace = space.lookup_subspace(&(4, 2));
    let state = State::from_labels(subspace, &vec![1, 2, 1, 2]);
    assert_eq!(state.index(), 1);
    assert_eq!(subspace.lookup_state_index(&vec![1, 0, 1, 4]), NONE);

    let vector_operator = TriangleRule {
        j0: HalfInt::from(1),
    };
    let sectors = BaseSectors::<BaseSpace<SpinChainSubspace>>::new(
        &space,
        &vector_operator,
        SectorDirection::Both,
    );
    assert_eq!(
        sectors
            .keys()
            .map(|key| (key.bra_subspace_index, key.ket_subspace_index))
            .collect_vec(),
        vec![(0, 1), (1, 0), (1, 1), (1, 2), (2, 1), (2, 2)]
    );
    for index in 0..sectors.size() {
        let sector = sectors.get_sector(index);
        assert!(vector_operator.allows(sector.bra_subspace(), sector.ket_subspace()));
    }
}

#[test]
fn test_orbital_file_to_radial_sectors() {
    init_logger();
    let text = std::fs::read_to_string(format!("{ROOT}/tests/input/orbitals_nmax1.dat")).unwrap();
    let orbitals = parse_orbital_pn_str(&text, true).unwrap();
    assert_eq!(orbitals.len(), 6);

    let space = OrbitalSpaceLJPN::from_orbitals(&orbitals);
    assert_eq!(space.size(), 6);
    let sectors = OrbitalSectorsLJPN::new(&space, 1, 0, SectorDirection::Canonical);
    let (sector_index, bra_index, ket_index) = matrix_element_indices_ljpn(
        &sectors,
        &(OrbitalSpeciesPN::N, 0, 0, HalfInt::new(1, 2)),
        &(OrbitalSpeciesPN::N, 0, 1, HalfInt::new(3, 2)),
    );
    assert_ne!(sector_index, NONE);
    assert_eq!((bra_index, ket_index), (0, 0));
    let sector = sectors.get_sector(sector_index);
    assert_eq!(sector.bra_subspace().species(), OrbitalSpeciesPN::N);
}

#[test]
fn test_two_body_space_and_driver_agree() {
    init_logger();
    let orbital_space = OrbitalSpacePN::from_nmax(2);
    let weight_max = WeightMax::from_rank(Rank::TwoBody, 2);
    let space = TwoBodySpaceJJJPN::new(&orbital_space, weight_max, TwoBodySpaceOrdering::PN);
    let sectors = TwoBodySectorsJJJPN::new(
        &space,
        &Default::default(),
        SectorDirection::Canonical,
    );

    let params = SectorEnumerationParams::builder()
        .nmax(Some(2))
        .weight_max(Some(weight_max))
        .build()
        .unwrap();
    let mut driver = SectorEnumerationDriver::builder()
        .parameters(&params)
        .build()
        .unwrap();
    driver.run().unwrap();
    let result = driver.result().unwrap();
    assert_eq!(result.subspace_count, space.size());
    assert_eq!(result.dimension, space.dimension());
    assert_eq!(result.sector_keys, sectors.keys().copied().collect_vec());
}
