//! YAML input specification of the `qnbasis` binary.

use anyhow;
use serde::{Deserialize, Serialize};

use crate::drivers::sector_enumeration::{SectorEnumerationDriver, SectorEnumerationParams};
use crate::drivers::BasisDriver;
use crate::interfaces::InputHandle;
use crate::io::format::qnbasis_error;
#[allow(unused_imports)]
use crate::io::QnBasisFileType;


/// A structure containing qnbasis input parameters which can be serialised into and deserialised
/// from a YAML input file.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Input {
    /// Specification for two-body sector enumeration. Results may be saved as a
    /// [`QnBasisFileType::Sec`] binary file.
    ///
    /// If not specified, the default parameters are used, which name no orbital source and hence
    /// fail on running.
    #[serde(default)]
    pub sector_enumeration: SectorEnumerationParams,
}

impl InputHandle for Input {
    /// Handles the input specification by running the sector enumeration driver.
    fn handle(&self) -> Result<(), anyhow::Error> {
        let mut se_driver = SectorEnumerationDriver::builder()
            .parameters(&self.sector_enumeration)
            .build()?;
        se_driver.run().map_err(|err| {
            qnbasis_error!("{err:#}");
            err
        })
    }
}
