use crate::core::models::line::Transition;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// The electron shells the analysis queries edge energies and cross sections for.
///
/// K-family lines resolve against the K shell, L-family lines against the L3
/// subshell. M-family lines have no supported shell mapping and are never
/// gated by an edge (see [`crate::core::physics::excitation::family_shell`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Shell {
    K,
    L3,
}

impl Shell {
    pub fn label(self) -> &'static str {
        match self {
            Shell::K => "K",
            Shell::L3 => "L3",
        }
    }
}

impl fmt::Display for Shell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Shell {
    type Err = UnknownShell;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "K" => Ok(Shell::K),
            "L3" => Ok(Shell::L3),
            other => Err(UnknownShell(other.to_string())),
        }
    }
}

/// Error returned when parsing an unrecognized shell label.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown shell label '{0}'")]
pub struct UnknownShell(pub String);

/// A failed atomic-data lookup.
///
/// Every variant is recoverable by design: callers drop the offending item or
/// substitute a documented fallback, and one failed lookup never aborts a batch
/// operation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AtomicDataError {
    #[error("unknown element symbol '{0}'")]
    UnknownElement(String),

    #[error("no line data for transition {transition} of element Z={z}")]
    MissingLine { z: u32, transition: Transition },

    #[error("no edge energy for shell {shell} of element Z={z}")]
    MissingEdge { z: u32, shell: Shell },

    #[error("no fluorescence yield for shell {shell} of element Z={z}")]
    MissingYield { z: u32, shell: Shell },

    #[error("no cross-section data for shell {shell} of element Z={z} at {energy_kev} keV")]
    MissingCrossSection {
        z: u32,
        shell: Shell,
        energy_kev: f64,
    },
}

/// Defines the interface to the external atomic-data source.
///
/// Implementors answer point queries about characteristic emission lines and
/// shell properties. Any call may fail independently of the others; the
/// analysis treats each failure locally (skipping a line, falling back to a
/// default score) and never lets one propagate into a batch abort.
pub trait AtomicDataProvider {
    /// Resolves an element symbol (e.g. `"Fe"`) to its atomic number.
    fn atomic_number(&self, symbol: &str) -> Result<u32, AtomicDataError>;

    /// Emission energy of a transition in keV.
    fn line_energy(&self, z: u32, transition: Transition) -> Result<f64, AtomicDataError>;

    /// Radiative transition probability of a transition.
    fn radiative_rate(&self, z: u32, transition: Transition) -> Result<f64, AtomicDataError>;

    /// Absorption-edge energy of a shell in keV.
    fn edge_energy(&self, z: u32, shell: Shell) -> Result<f64, AtomicDataError>;

    /// Shell-specific photoionization cross section at the given photon energy.
    fn partial_cross_section(
        &self,
        z: u32,
        shell: Shell,
        energy_kev: f64,
    ) -> Result<f64, AtomicDataError>;

    /// Fluorescence yield of a shell.
    fn fluorescence_yield(&self, z: u32, shell: Shell) -> Result<f64, AtomicDataError>;
}
