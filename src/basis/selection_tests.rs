use crate::angmom::HalfInt;
use crate::basis::lookup::DefaultLabelTable;
use crate::basis::selection::{
    AllowAll, AngularMomentumDifferenceRule, AngularMomentumLabelled, IsospinProjected,
    IsospinProjectionBoundRule, IsospinProjectionShiftRule, OperatorSelectionRule,
    ParityGraded, ParityRule, SelectionRule, TriangleRule,
};
use crate::basis::{BaseSubspace, Subspace};

#[derive(Clone, Debug)]
struct ToySubspace {
    base: BaseSubspace<(HalfInt, u8, HalfInt), i32>,
}

impl ToySubspace {
    fn new(twice_j: i32, g: u8, tz: i32) -> Self {
        Self {
            base: BaseSubspace::from_state_labels(
                (HalfInt::from_twice(twice_j), g, HalfInt::from(tz)),
                0..2,
            ),
        }
    }
}

impl Subspace for ToySubspace {
    type SubspaceLabels = (HalfInt, u8, HalfInt);
    type StateLabels = i32;
    type Table = DefaultLabelTable<i32>;

    fn base(&self) -> &BaseSubspace<(HalfInt, u8, HalfInt), i32> {
        &self.base
    }
}

impl AngularMomentumLabelled for ToySubspace {
    fn j(&self) -> HalfInt {
        self.labels().0
    }
}

impl ParityGraded for ToySubspace {
    fn g(&self) -> u8 {
        self.labels().1
    }
}

impl IsospinProjected for ToySubspace {
    fn tz(&self) -> HalfInt {
        self.labels().2
    }
}

#[test]
fn test_selection_rule_triangle() {
    let j1 = ToySubspace::new(2, 0, 0);
    let j0 = ToySubspace::new(0, 0, 0);
    let rank_one = TriangleRule {
        j0: HalfInt::from(1),
    };
    assert!(rank_one.allows(&j1, &j0));
    assert!(rank_one.allows(&j0, &j1));
    assert!(!rank_one.allows(&j0, &j0));
    assert!(rank_one.allows(&j1, &j1));

    let rank_half = TriangleRule {
        j0: HalfInt::from_twice(1),
    };
    assert!(!rank_half.allows(&j1, &j0));
    assert!(rank_half.allows(&j0, &ToySubspace::new(1, 0, 0)));
}

#[test]
fn test_selection_rule_differences() {
    let a = ToySubspace::new(1, 0, 1);
    let b = ToySubspace::new(5, 0, -1);
    let difference = AngularMomentumDifferenceRule {
        j0_max: HalfInt::from(1),
    };
    assert!(!difference.allows(&a, &b));
    assert!(difference.allows(&a, &ToySubspace::new(3, 0, 0)));

    let tz_bound = IsospinProjectionBoundRule {
        tz0_max: HalfInt::from(1),
    };
    assert!(!tz_bound.allows(&a, &b));
    assert!(tz_bound.allows(&a, &ToySubspace::new(1, 0, 0)));
}

#[test]
fn test_selection_rule_parity_and_shift() {
    let even = ToySubspace::new(0, 0, 1);
    let odd = ToySubspace::new(0, 1, 0);
    assert!(ParityRule { g0: 0 }.allows(&even, &even));
    assert!(!ParityRule { g0: 0 }.allows(&even, &odd));
    assert!(ParityRule { g0: 1 }.allows(&even, &odd));

    let shift = IsospinProjectionShiftRule {
        tz0: HalfInt::from(1),
    };
    assert!(shift.allows(&even, &odd));
    assert!(!shift.allows(&odd, &even));
}

#[test]
fn test_selection_rule_closure_and_combinators() {
    let a = ToySubspace::new(0, 0, 0);
    let b = ToySubspace::new(2, 1, 0);
    let same_parity = |bra: &ToySubspace, ket: &ToySubspace| bra.g() == ket.g();
    assert!(same_parity.allows(&a, &a));
    assert!(!same_parity.allows(&a, &b));
    assert_eq!(same_parity.multiplicity(&a, &a), 1);

    let combined = SelectionRule::<ToySubspace>::and(AllowAll, same_parity);
    assert!(SelectionRule::<ToySubspace>::allows(&combined, &b, &b));
    assert!(!SelectionRule::<ToySubspace>::allows(&combined, &a, &b));

    let doubled = SelectionRule::<ToySubspace>::with_multiplicity(
        same_parity,
        |bra: &ToySubspace, _: &ToySubspace| {
            if bra.j() == HalfInt::from(0) {
                2
            } else {
                3
            }
        },
    );
    assert!(doubled.allows(&a, &a));
    assert_eq!(doubled.multiplicity(&a, &a), 2);
    assert_eq!(doubled.multiplicity(&b, &b), 3);
}

#[test]
fn test_operator_selection_rule() {
    let scalar = OperatorSelectionRule::scalar();
    assert_eq!(scalar.j0, HalfInt::from(0));
    assert_eq!(scalar.g0, 0);
    assert_eq!(scalar.tz0, HalfInt::from(0));

    let a = ToySubspace::new(2, 1, 0);
    let b = ToySubspace::new(0, 0, -1);
    assert!(scalar.allows(&a, &a));
    assert!(!scalar.allows(&a, &b));

    let dipole = OperatorSelectionRule::builder()
        .j0(HalfInt::from(1))
        .g0(1)
        .tz0(HalfInt::from(1))
        .build()
        .unwrap();
    assert!(dipole.allows(&a, &b));
    assert!(!dipole.allows(&b, &a));
}

#[test]
fn test_operator_selection_rule_serde() {
    let rule: OperatorSelectionRule = serde_yaml::from_str("j0: 2\ng0: 0\n").unwrap();
    assert_eq!(rule.j0, HalfInt::from(2));
    assert_eq!(rule.tz0, HalfInt::from(0));

    let rule: OperatorSelectionRule = serde_yaml::from_str("j0: 1/2\ntz0: -1\ng0: 1\n").unwrap();
    assert_eq!(rule.j0, HalfInt::from_twice(1));
    assert_eq!(rule.tz0, HalfInt::from(-1));
    let yaml = serde_yaml::to_string(&rule).unwrap();
    let rule_back: OperatorSelectionRule = serde_yaml::from_str(&yaml).unwrap();
    assert_eq!(rule, rule_back);
}
