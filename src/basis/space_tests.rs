use itertools::Itertools;

use crate::basis::lookup::HashedLabelTable;
use crate::basis::{BaseSpace, BaseSubspace, Space, SpaceBuilder, Subspace, NONE};

type TestSubspace = BaseSubspace<(i32, u8), i32>;
type TestSpace = BaseSpace<TestSubspace>;

fn subspace_of_size(j: i32, g: u8, size: i32) -> TestSubspace {
    BaseSubspace::from_state_labels((j, g), 0..size)
}

#[test]
fn test_space_size_and_dimension() {
    let space = TestSpace::from_subspaces([
        subspace_of_size(0, 0, 2),
        subspace_of_size(1, 1, 3),
        subspace_of_size(2, 0, 1),
    ]);
    assert_eq!(space.size(), 3);
    assert_eq!(space.dimension(), 6);
    assert_eq!(
        space.subspaces().map(Subspace::size).collect_vec(),
        vec![2, 3, 1]
    );
}

#[test]
fn test_space_subspace_lookup() {
    let space = TestSpace::from_subspaces([
        subspace_of_size(0, 0, 2),
        subspace_of_size(1, 1, 3),
        subspace_of_size(2, 0, 1),
    ]);
    for index in 0..space.size() {
        let labels = *space.get_subspace(index).labels();
        assert_eq!(space.lookup_subspace_index(&labels), index);
        assert!(space.contains_subspace(&labels));
        assert_eq!(space.lookup_subspace(&labels).labels(), &labels);
    }
    assert_eq!(space.lookup_subspace_index(&(1, 0)), NONE);
    assert!(!space.contains_subspace(&(1, 0)));
}

#[test]
fn test_space_builder_indices() {
    let mut builder: SpaceBuilder<TestSubspace, _> = TestSpace::builder();
    assert!(builder.is_empty());
    assert_eq!(builder.push_subspace(subspace_of_size(0, 0, 1)), 0);
    let emplaced = builder.emplace_subspace(|index| {
        // The subspace may depend on the index it is about to receive.
        subspace_of_size(index as i32, 1, index as i32 + 1)
    });
    assert_eq!(emplaced, 1);
    assert_eq!(builder.len(), 2);
    let space = builder.build();
    assert_eq!(space.get_subspace(1).labels(), &(1, 1));
    assert_eq!(space.get_subspace(1).size(), 2);
}

#[test]
fn test_space_clone_shares_storage() {
    let space = TestSpace::from_subspaces([subspace_of_size(0, 0, 2)]);
    let copy = space.clone();
    assert!(copy.shares_storage_with(&space));
    assert!(std::ptr::eq(copy.get_subspace(0), space.get_subspace(0)));

    let other = TestSpace::from_subspaces([subspace_of_size(0, 0, 2)]);
    assert!(!other.shares_storage_with(&space));
}

#[test]
fn test_space_empty() {
    let space = TestSpace::default();
    assert_eq!(space.size(), 0);
    assert_eq!(space.dimension(), 0);
    assert_eq!(space.lookup_subspace_index(&(0, 0)), NONE);
}

#[test]
fn test_space_hashed_lookup() {
    let space = BaseSpace::<TestSubspace, HashedLabelTable<(i32, u8)>>::from_subspaces(
        (0..10).map(|j| subspace_of_size(j, (j % 2) as u8, 1)),
    );
    assert_eq!(space.lookup_subspace_index(&(7, 1)), 7);
    assert_eq!(space.lookup_subspace_index(&(7, 0)), NONE);
}

#[test]
#[should_panic(expected = "Duplicate label")]
fn test_space_duplicate_subspace() {
    let _ = TestSpace::from_subspaces([subspace_of_size(0, 0, 1), subspace_of_size(0, 0, 2)]);
}

#[test]
#[should_panic(expected = "out of range")]
fn test_space_get_subspace_out_of_range() {
    let space = TestSpace::from_subspaces([subspace_of_size(0, 0, 1)]);
    let _ = space.get_subspace(1);
}

#[test]
#[should_panic(expected = "not found")]
fn test_space_lookup_missing_subspace() {
    let space = TestSpace::from_subspaces([subspace_of_size(0, 0, 1)]);
    let _ = space.lookup_subspace(&(3, 0));
}
