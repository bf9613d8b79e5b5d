use std::path::PathBuf;

use clap::{CommandFactory, Parser};
use log::LevelFilter;

use crate::interfaces::cli::Cli;

#[test]
fn test_interfaces_cli_definition() {
    Cli::command().debug_assert();
}

#[test]
fn test_interfaces_cli_arguments() {
    let cli = Cli::parse_from(["qnbasis", "-c", "input.yml", "-o", "run", "-vv"]);
    assert_eq!(cli.config, Some(PathBuf::from("input.yml")));
    assert_eq!(cli.output, Some(PathBuf::from("run")));
    assert_eq!(cli.verbose, 2);
    assert_eq!(cli.log_level(), LevelFilter::Debug);

    let cli = Cli::parse_from(["qnbasis", "--config", "input.yml"]);
    assert!(cli.output.is_none());
    assert_eq!(cli.log_level(), LevelFilter::Warn);
}
