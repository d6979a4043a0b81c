use super::line::LineFamily;
use serde::{Deserialize, Serialize};

/// A scatter feature (elastic or Compton) located near the incident beam energy.
///
/// `distance_from_reference` is the absolute distance to the feature's reference
/// energy: the incident energy for the elastic peak, the expected 90-degree
/// Compton energy for the Compton peak.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScatterPeak {
    pub energy_kev: f64,
    pub height: f64,
    pub prominence: f64,
    pub distance_from_reference: f64,
}

/// The kind of scatter feature an exclusion zone was derived from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScatterKind {
    Elastic,
    Compton,
}

/// An energy interval around a scatter peak that fluorescence-peak search must
/// not place apexes in.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExclusionZone {
    pub kind: ScatterKind,
    pub energy_min_kev: f64,
    pub energy_max_kev: f64,
}

impl ExclusionZone {
    pub fn contains(&self, energy_kev: f64) -> bool {
        energy_kev >= self.energy_min_kev && energy_kev <= self.energy_max_kev
    }
}

/// A fluorescence peak surviving background subtraction, smoothing, and scatter
/// exclusion.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DetectedPeak {
    pub energy_kev: f64,
    pub height: f64,
}

/// One physically plausible identification of a detected peak.
///
/// Candidates exist only for lines whose absorption edge lies below the incident
/// energy; `efficiency` is the relative excitation score used for ranking and is
/// meaningful ordinally, not as a calibrated probability.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    pub element: String,
    pub family: LineFamily,
    pub line_energy_kev: f64,
    pub edge_energy_kev: f64,
    pub efficiency: f64,
    pub energy_diff_kev: f64,
}

impl Candidate {
    /// Renders the conventional `"<Element> <Family>"` label, e.g. `"Fe Ka"`.
    pub fn line_name(&self) -> String {
        format!("{} {}", self.element, self.family)
    }
}
