use anyhow::{self, format_err};
use clap::Parser;

use qnbasis::interfaces::cli::{log_heading, setup_logging, Cli};
use qnbasis::interfaces::input::Input;
use qnbasis::interfaces::InputHandle;
use qnbasis::io::read_qnbasis_yaml;

fn main() -> Result<(), anyhow::Error> {
    let cli = Cli::parse();
    setup_logging(cli.output.as_deref(), cli.log_level())?;
    log_heading();

    let config = cli
        .config
        .as_ref()
        .ok_or_else(|| format_err!("No configuration file specified."))?;
    let input = read_qnbasis_yaml::<Input, _>(config)?;
    input.handle()
}
