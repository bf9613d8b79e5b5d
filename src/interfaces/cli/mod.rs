//! Command-line interface of the `qnbasis` binary.

use std::path::{Path, PathBuf};

use anyhow::{self, format_err};
use clap::Parser;
use log::LevelFilter;
use log4rs::append::console::{ConsoleAppender, Target};
use log4rs::append::file::FileAppender;
use log4rs::append::Append;
use log4rs::config::{Appender, Config, Logger, Root};
use log4rs::encode::pattern::PatternEncoder;

use crate::io::format::qnbasis_output;

#[cfg(test)]
#[path = "cli_tests.rs"]
mod cli_tests;

const VERSION: Option<&str> = option_env!("CARGO_PKG_VERSION");

/// Logs a nicely formatted qnbasis heading to the `qnbasis-output` logger.
pub fn log_heading() {
    let version = if let Some(ver) = VERSION {
        format!("v{ver}")
    } else {
        "v unknown".to_string()
    };
    qnbasis_output!("╭─────────────────────────────────────────────────────────────────────────────────────────╮");
    qnbasis_output!("│                                                                                         │");
    qnbasis_output!("│     ██████  ███    ██ ██████   █████  ███████ ██ ███████                                │");
    qnbasis_output!("│    ██    ██ ████   ██ ██   ██ ██   ██ ██      ██ ██                                     │");
    qnbasis_output!("│    ██    ██ ██ ██  ██ ██████  ███████ ███████ ██ ███████                                │");
    qnbasis_output!("│    ██ ▄▄ ██ ██  ██ ██ ██   ██ ██   ██      ██ ██      ██                                │");
    qnbasis_output!("│     ██████  ██   ████ ██████  ██   ██ ███████ ██ ███████                                │");
    qnbasis_output!("│        ▀▀                                                                               │");
    qnbasis_output!("│    Quantum-number-indexed many-body bases                                 {version:>13} │");
    qnbasis_output!("│                                                                                         │");
    qnbasis_output!("╰─────────────────────────────────────────────────────────────────────────────────────────╯");
    qnbasis_output!("");
}

/// Command-line arguments of the `qnbasis` binary.
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Path to the YAML configuration file.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Stem of the output files. Main output is written to `<OUTPUT>.out` and diagnostics to
    /// `<OUTPUT>.log`. If absent, both go to the terminal.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Increases the verbosity of diagnostics. May be given several times.
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// Returns the level of diagnostic logging requested by the verbosity flags.
    pub fn log_level(&self) -> LevelFilter {
        match self.verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    }
}

/// Sets up the `qnbasis-output` logger for main output and the root logger for diagnostics.
///
/// # Arguments
///
/// * `output` - Stem of the output files. If `None`, main output goes to standard output and
/// diagnostics to standard error.
/// * `level` - The level of diagnostic logging.
pub fn setup_logging(output: Option<&Path>, level: LevelFilter) -> Result<(), anyhow::Error> {
    let (output_appender, log_appender): (Box<dyn Append>, Box<dyn Append>) = match output {
        Some(stem) => (
            Box::new(
                FileAppender::builder()
                    .encoder(Box::new(PatternEncoder::new("{m}{n}")))
                    .append(false)
                    .build(stem.with_extension("out"))?,
            ),
            Box::new(
                FileAppender::builder()
                    .encoder(Box::new(PatternEncoder::new("{d} {l} {t} - {m}{n}")))
                    .append(false)
                    .build(stem.with_extension("log"))?,
            ),
        ),
        None => (
            Box::new(
                ConsoleAppender::builder()
                    .encoder(Box::new(PatternEncoder::new("{m}{n}")))
                    .target(Target::Stdout)
                    .build(),
            ),
            Box::new(
                ConsoleAppender::builder()
                    .encoder(Box::new(PatternEncoder::new("{l} {t} - {m}{n}")))
                    .target(Target::Stderr)
                    .build(),
            ),
        ),
    };

    let config = Config::builder()
        .appender(Appender::builder().build("output", output_appender))
        .appender(Appender::builder().build("log", log_appender))
        .logger(
            Logger::builder()
                .appender("output")
                .additive(false)
                .build("qnbasis-output", LevelFilter::Info),
        )
        .build(Root::builder().appender("log").build(level))?;
    log4rs::init_config(config).map_err(|err| format_err!(err))?;
    Ok(())
}
