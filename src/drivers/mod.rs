//! Drivers to carry out qnbasis functionalities.

use anyhow;

pub mod sector_enumeration;

// =================
// Trait definitions
// =================

/// Trait defining behaviours of qnbasis drivers.
pub trait BasisDriver {
    /// The type of the parameter structure controlling the driver.
    type Params;

    /// The type of the successful outcome when executing the driver.
    type Outcome;

    /// Executes the driver and stores the result internally.
    fn run(&mut self) -> Result<(), anyhow::Error>;

    /// Returns the result of the driver execution.
    fn result(&self) -> Result<&Self::Outcome, anyhow::Error>;
}
