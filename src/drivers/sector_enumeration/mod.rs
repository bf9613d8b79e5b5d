//! Driver for the enumeration of the two-body space and operator sectors of a proton-neutron
//! system in the jjJ coupling scheme.

use std::fmt;
use std::fs;

use anyhow::{self, bail, ensure, format_err, Context};
use derive_builder::Builder;
use serde::{Deserialize, Serialize};

use crate::basis::selection::OperatorSelectionRule;
use crate::basis::{SectorDirection, SectorKey, Sectors, Space, Subspace};
use crate::drivers::BasisDriver;
use crate::io::format::{
    log_subtitle, log_title, nice_bool, qnbasis_output, write_subtitle, QnBasisOutput,
};
use crate::io::{write_qnbasis_binary, QnBasisFileType};
use crate::scheme::jjjpn::{TwoBodySectorsJJJPN, TwoBodySpaceJJJPN, TwoBodySpaceOrdering, WeightMax};
use crate::scheme::nlj_orbital::{
    ensure_distinct_orbitals, parse_orbital_pn_str, OrbitalPNInfo, OrbitalSpacePN,
};
use crate::scheme::proton_neutron::Rank;


// ==================
// Struct definitions
// ==================

// ----------
// Parameters
// ----------

/// A structure describing an oscillator truncation of the two-body space.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Truncation {
    /// The particle rank at which the cutoff applies.
    pub rank: Rank,

    /// The oscillator cutoff.
    pub cutoff: i32,
}

impl fmt::Display for Truncation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} cutoff {}", self.rank, self.cutoff)
    }
}

/// A structure containing control parameters for two-body sector enumeration.
#[derive(Clone, Builder, Debug, Serialize, Deserialize)]
pub struct SectorEnumerationParams {
    /// The oscillator cutoff from which the orbitals are generated. Only one of this or
    /// [`Self::orbital_file`] should be specified, unless the orbitals are supplied directly to
    /// the driver.
    #[builder(default = "None")]
    #[serde(default)]
    pub nmax: Option<i32>,

    /// A path to an orbital definition file from which the orbitals are read. Only one of this or
    /// [`Self::nmax`] should be specified, unless the orbitals are supplied directly to the
    /// driver.
    #[builder(default = "None")]
    #[serde(default)]
    pub orbital_file: Option<String>,

    /// Explicit weight cutoffs of the two-body space. Only one of this or [`Self::truncation`]
    /// may be specified. If neither is specified, the two-body space is limited by the orbitals
    /// alone.
    #[builder(default = "None")]
    #[serde(default)]
    pub weight_max: Option<WeightMax>,

    /// An oscillator truncation of the two-body space. Only one of this or
    /// [`Self::weight_max`] may be specified.
    #[builder(default = "None")]
    #[serde(default)]
    pub truncation: Option<Truncation>,

    /// The tensorial character of the operator whose sectors are enumerated.
    #[builder(default)]
    #[serde(default)]
    pub operator: OperatorSelectionRule,

    /// The direction constraint on the sectors.
    #[builder(default)]
    #[serde(default)]
    pub direction: SectorDirection,

    /// The layout of two-body species subspaces.
    #[builder(default)]
    #[serde(default)]
    pub ordering: TwoBodySpaceOrdering,

    /// Boolean indicating if a listing of all sectors is to be written to the output.
    #[builder(default = "false")]
    #[serde(default)]
    pub write_sectors: bool,

    /// Optional name for saving the result as a binary file of type [`QnBasisFileType::Sec`],
    /// together with the orbitals as a binary file of type [`QnBasisFileType::Orb`]. If `None`,
    /// nothing will be saved.
    #[builder(default = "None")]
    #[serde(default)]
    pub result_save_name: Option<String>,
}

impl SectorEnumerationParams {
    /// Returns a builder to construct a [`SectorEnumerationParams`] structure.
    pub fn builder() -> SectorEnumerationParamsBuilder {
        SectorEnumerationParamsBuilder::default()
    }
}

impl Default for SectorEnumerationParams {
    fn default() -> Self {
        Self::builder()
            .build()
            .expect("Unable to construct a default `SectorEnumerationParams`.")
    }
}

impl fmt::Display for SectorEnumerationParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(nmax) = self.nmax {
            writeln!(f, "Orbitals: oscillator shells up to Nmax = {nmax}")?;
        }
        if let Some(orbital_file) = self.orbital_file.as_ref() {
            writeln!(f, "Orbitals: read from {orbital_file}")?;
        }
        match (self.weight_max.as_ref(), self.truncation.as_ref()) {
            (Some(weight_max), _) => writeln!(f, "Weight cutoffs: {weight_max}")?,
            (None, Some(truncation)) => writeln!(f, "Truncation: {truncation}")?,
            (None, None) => writeln!(f, "Truncation: none beyond the orbitals")?,
        }
        writeln!(f, "Two-body species ordering: {}", self.ordering)?;
        writeln!(f, "Sector direction: {}", self.direction)?;
        writeln!(f)?;
        write!(f, "{}", self.operator)?;
        writeln!(f)?;
        writeln!(f, "Write sectors: {}", nice_bool(self.write_sectors))?;
        writeln!(
            f,
            "Save results to file: {}",
            self.result_save_name
                .as_ref()
                .map(|name| format!("{name}{}", QnBasisFileType::Sec.ext()))
                .unwrap_or_else(|| nice_bool(false))
        )?;
        writeln!(f)?;
        Ok(())
    }
}

// ------
// Result
// ------

/// A structure to contain two-body sector enumeration results.
#[derive(Clone, Builder, Debug, Serialize, Deserialize)]
pub struct SectorEnumerationResult {
    /// The control parameters used to obtain this set of results.
    pub parameters: SectorEnumerationParams,

    /// The orbitals over which the two-body space was built.
    pub orbitals: Vec<OrbitalPNInfo>,

    /// The oscillator cutoff reproducing the orbitals, if any.
    #[builder(default = "None")]
    pub orbital_nmax: Option<i32>,

    /// The weight cutoffs applied to the two-body space.
    pub weight_max: WeightMax,

    /// The number of subspaces in the two-body space.
    pub subspace_count: usize,

    /// The number of states in the two-body space.
    pub dimension: usize,

    /// The keys of the enumerated sectors, in index order.
    pub sector_keys: Vec<SectorKey>,
}

impl SectorEnumerationResult {
    /// Returns a builder to construct a [`SectorEnumerationResult`] structure.
    fn builder() -> SectorEnumerationResultBuilder {
        SectorEnumerationResultBuilder::default()
    }

    /// Returns the number of enumerated sectors.
    pub fn sector_count(&self) -> usize {
        self.sector_keys.len()
    }

    /// Writes the sector keys in a nicely formatted table.
    fn write_sector_keys(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_subtitle(f, "Sector keys")?;
        writeln!(f)?;
        writeln!(f, "{}", "┈".repeat(34))?;
        writeln!(f, "{:>7} {:>8} {:>8} {:>8}", "#", "Bra", "Ket", "Mult.")?;
        writeln!(f, "{}", "┈".repeat(34))?;
        self.sector_keys
            .iter()
            .enumerate()
            .try_for_each(|(index, key)| {
                writeln!(
                    f,
                    "{index:>7} {:>8} {:>8} {:>8}",
                    key.bra_subspace_index, key.ket_subspace_index, key.multiplicity_index
                )
            })?;
        writeln!(f, "{}", "┈".repeat(34))?;
        Ok(())
    }
}

impl fmt::Display for SectorEnumerationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Number of orbitals: {} ({})",
            self.orbitals.len(),
            self.orbital_nmax
                .map(|nmax| format!("oscillator-like, Nmax = {nmax}"))
                .unwrap_or_else(|| "not oscillator-like".to_string())
        )?;
        writeln!(f, "Weight cutoffs: {}", self.weight_max)?;
        writeln!(f, "Number of two-body subspaces: {}", self.subspace_count)?;
        writeln!(f, "Two-body dimension: {}", self.dimension)?;
        writeln!(f, "Number of sectors: {}", self.sector_count())?;
        writeln!(f)?;

        if self.parameters.write_sectors {
            self.write_sector_keys(f)?;
            writeln!(f)?;
        }

        Ok(())
    }
}

// ------
// Driver
// ------

/// A driver for two-body sector enumeration.
#[derive(Clone, Builder)]
pub struct SectorEnumerationDriver<'a> {
    /// The control parameters for sector enumeration.
    parameters: &'a SectorEnumerationParams,

    /// Orbitals supplied directly. Only one of this, [`SectorEnumerationParams::nmax`], or
    /// [`SectorEnumerationParams::orbital_file`] should be specified.
    #[builder(default = "None")]
    orbitals: Option<&'a [OrbitalPNInfo]>,

    /// The result of the sector enumeration.
    #[builder(setter(skip), default = "None")]
    result: Option<SectorEnumerationResult>,
}

impl<'a> SectorEnumerationDriver<'a> {
    /// Returns a builder to construct a [`SectorEnumerationDriver`] structure.
    pub fn builder() -> SectorEnumerationDriverBuilder<'a> {
        SectorEnumerationDriverBuilder::default()
    }

    /// Constructs the orbital space from whichever orbital source has been specified.
    fn construct_orbital_space(&self) -> Result<OrbitalSpacePN, anyhow::Error> {
        let params = self.parameters;
        match (params.nmax, params.orbital_file.as_ref(), self.orbitals) {
            (Some(nmax), None, None) => {
                ensure!(nmax >= 0, "Invalid oscillator cutoff Nmax = {nmax}.");
                Ok(OrbitalSpacePN::from_nmax(nmax))
            }
            (None, Some(orbital_file), None) => {
                let text = fs::read_to_string(orbital_file)
                    .with_context(|| format!("Unable to read orbital file `{orbital_file}`."))?;
                let orbitals = parse_orbital_pn_str(&text, true)
                    .with_context(|| format!("Unable to parse orbital file `{orbital_file}`."))?;
                Ok(OrbitalSpacePN::from_orbitals(&orbitals))
            }
            (None, None, Some(orbitals)) => {
                ensure_distinct_orbitals(orbitals)?;
                Ok(OrbitalSpacePN::from_orbitals(orbitals))
            }
            _ => bail!("Exactly one of `nmax`, `orbital_file`, or `orbitals` must be specified."),
        }
    }

    /// Determines the weight cutoffs of the two-body space.
    fn determine_weight_max(
        &self,
        orbital_space: &OrbitalSpacePN,
    ) -> Result<WeightMax, anyhow::Error> {
        let params = self.parameters;
        match (params.weight_max, params.truncation) {
            (Some(weight_max), None) => Ok(weight_max),
            (None, Some(truncation)) => {
                ensure!(
                    truncation.cutoff >= 0,
                    "Invalid truncation cutoff {}.",
                    truncation.cutoff
                );
                Ok(WeightMax::from_rank(truncation.rank, truncation.cutoff))
            }
            (None, None) => {
                let w = orbital_space.weight_max();
                Ok(WeightMax::new(w, w, 2.0 * w, 2.0 * w, 2.0 * w))
            }
            (Some(_), Some(_)) => bail!("Both `weight_max` and `truncation` are specified."),
        }
    }

    fn enumerate_sectors(&mut self) -> Result<(), anyhow::Error> {
        log_title("Two-Body Sector Enumeration");
        qnbasis_output!("");
        let params = self.parameters;
        params.log_output_display();

        let orbital_space = self.construct_orbital_space()?;
        ensure!(
            orbital_space.dimension() > 0,
            "The orbital space contains no orbitals."
        );
        log_subtitle("Orbital space");
        qnbasis_output!("");
        orbital_space.debug_str().lines().for_each(|line| {
            qnbasis_output!("{line}");
        });
        qnbasis_output!("");

        let weight_max = self.determine_weight_max(&orbital_space)?;
        let space = TwoBodySpaceJJJPN::new(&orbital_space, weight_max, params.ordering);
        log_subtitle("Two-body space");
        qnbasis_output!("");
        qnbasis_output!("{}", "┈".repeat(37));
        qnbasis_output!(
            "{:>5} {:>8} {:>4} {:>4} {:>12}",
            "#",
            "Species",
            "J",
            "g",
            "Dimension"
        );
        qnbasis_output!("{}", "┈".repeat(37));
        space.subspaces().enumerate().for_each(|(index, subspace)| {
            let (species, big_j, g) = subspace.labels();
            qnbasis_output!(
                "{index:>5} {:>8} {big_j:>4} {g:>4} {:>12}",
                species.to_string(),
                subspace.size()
            );
        });
        qnbasis_output!("{}", "┈".repeat(37));
        qnbasis_output!("");
        log::debug!("Two-body space contents:\n{}", space.debug_str());

        let sectors = TwoBodySectorsJJJPN::new(&space, &params.operator, params.direction);
        log::debug!("Sectors:\n{}", sectors.debug_str());

        self.result = SectorEnumerationResult::builder()
            .parameters(params.clone())
            .orbitals(orbital_space.orbital_info())
            .orbital_nmax(orbital_space.nmax())
            .weight_max(weight_max)
            .subspace_count(space.size())
            .dimension(space.dimension())
            .sector_keys(sectors.keys().copied().collect())
            .build()
            .ok();

        if let Some(se_res) = self.result.as_ref() {
            se_res.log_output_display();
            if let Some(name) = params.result_save_name.as_ref() {
                write_qnbasis_binary(name, QnBasisFileType::Sec, se_res)?;
                write_qnbasis_binary(name, QnBasisFileType::Orb, &se_res.orbitals)?;
                qnbasis_output!(
                    "Sector enumeration results saved as {name}.{}.",
                    QnBasisFileType::Sec.ext()
                );
                qnbasis_output!(
                    "Orbitals saved as {name}.{}.",
                    QnBasisFileType::Orb.ext()
                );
                qnbasis_output!("");
            }
        }

        Ok(())
    }
}

impl BasisDriver for SectorEnumerationDriver<'_> {
    type Params = SectorEnumerationParams;

    type Outcome = SectorEnumerationResult;

    fn result(&self) -> Result<&Self::Outcome, anyhow::Error> {
        self.result
            .as_ref()
            .ok_or_else(|| format_err!("No sector enumeration results found."))
    }

    fn run(&mut self) -> Result<(), anyhow::Error> {
        self.enumerate_sectors()
    }
}
