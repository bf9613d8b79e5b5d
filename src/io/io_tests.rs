use std::env;
use std::fs;
use std::process;

use crate::basis::selection::OperatorSelectionRule;
use crate::io::{read_qnbasis_binary, read_qnbasis_yaml, write_qnbasis_binary, QnBasisFileType};
use crate::scheme::nlj_orbital::{OrbitalPNInfo, OrbitalSpacePN};

#[test]
fn test_io_file_type_extensions() {
    assert_eq!(QnBasisFileType::Sec.ext(), "qnbasis.sec");
    assert_eq!(QnBasisFileType::Orb.ext(), "qnbasis.orb");
}

#[test]
fn test_io_binary_orbitals() {
    let orbitals = OrbitalSpacePN::from_nmax(2).orbital_info();
    let name = env::temp_dir().join(format!("test_io_binary_orbitals_{}", process::id()));
    write_qnbasis_binary(&name, QnBasisFileType::Orb, &orbitals).unwrap();
    let read_orbitals =
        read_qnbasis_binary::<Vec<OrbitalPNInfo>, _>(&name, QnBasisFileType::Orb).unwrap();
    assert_eq!(read_orbitals, orbitals);

    let missing = read_qnbasis_binary::<Vec<OrbitalPNInfo>, _>(&name, QnBasisFileType::Sec);
    assert!(missing.is_err());
}

#[test]
fn test_io_yaml_operator() {
    let operator = OperatorSelectionRule::builder()
        .g0(1)
        .build()
        .unwrap();
    let name = env::temp_dir().join(format!("test_io_yaml_operator_{}.yml", process::id()));
    fs::write(&name, serde_yaml::to_string(&operator).unwrap()).unwrap();
    let read_operator = read_qnbasis_yaml::<OperatorSelectionRule, _>(&name).unwrap();
    assert_eq!(read_operator, operator);

    let missing = read_qnbasis_yaml::<OperatorSelectionRule, _>(name.with_extension("yaml"));
    assert!(missing.is_err());
}
