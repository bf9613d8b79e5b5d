//! Nice qnbasis output formatting.

use std::fmt;

use log;

const QNBASIS_BANNER_LENGTH: usize = 91;

/// Logs an error to the `qnbasis-output` logger.
macro_rules! qnbasis_error {
    ($fmt:expr $(, $($arg:tt)*)?) => {
        log::error!($fmt, $($($arg)*)?);
        log::error!(target: "qnbasis-output", $fmt, $($($arg)*)?);
    }
}

/// Logs a warning to the `qnbasis-output` logger.
macro_rules! qnbasis_warn {
    ($fmt:expr $(, $($arg:tt)*)?) => { log::warn!(target: "qnbasis-output", $fmt, $($($arg)*)?); }
}

/// Logs a main output line to the `qnbasis-output` logger.
macro_rules! qnbasis_output {
    ($fmt:expr $(, $($arg:tt)*)?) => { log::info!(target: "qnbasis-output", $fmt, $($($arg)*)?); }
}

pub(crate) use {qnbasis_error, qnbasis_output, qnbasis_warn};

/// Logs a nicely formatted section title to the `qnbasis-output` logger.
pub(crate) fn log_title(title: &str) {
    let length = title.chars().count().max(QNBASIS_BANNER_LENGTH - 6);
    let bar = "─".repeat(length);
    qnbasis_output!("┌──{bar}──┐");
    qnbasis_output!("│§ {title:^length$} §│");
    qnbasis_output!("└──{bar}──┘");
}

/// Writes a nicely formatted subtitle.
pub(crate) fn write_subtitle(f: &mut fmt::Formatter<'_>, subtitle: &str) -> fmt::Result {
    let length = subtitle.chars().count();
    let bar = "═".repeat(length);
    writeln!(f, "{subtitle}")?;
    writeln!(f, "{bar}")?;
    Ok(())
}

/// Logs a nicely formatted subtitle to the `qnbasis-output` logger.
pub(crate) fn log_subtitle(subtitle: &str) {
    let length = subtitle.chars().count();
    let bar = "═".repeat(length);
    qnbasis_output!("{}", subtitle);
    qnbasis_output!("{}", bar);
}

/// Turns a boolean into a string of `yes` or `no`.
pub(crate) fn nice_bool(b: bool) -> String {
    if b {
        "yes".to_string()
    } else {
        "no".to_string()
    }
}

/// A trait for logging qnbasis outputs nicely.
pub(crate) trait QnBasisOutput: fmt::Debug + fmt::Display {
    /// Logs display output nicely.
    fn log_output_display(&self) {
        let lines = self.to_string();
        lines.lines().for_each(|line| {
            qnbasis_output!("{line}");
        })
    }
}

// Blanket implementation
impl<T> QnBasisOutput for T where T: fmt::Debug + fmt::Display {}
