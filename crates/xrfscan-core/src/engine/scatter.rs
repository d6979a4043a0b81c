use crate::core::models::peak::{DetectedPeak, ExclusionZone, ScatterKind, ScatterPeak};
use crate::core::physics::scatter::compton_energy_90;
use crate::core::signal::peaks::{find_peaks, peak_prominences};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

/// The search region extends this far above the incident energy, in keV.
const SEARCH_ABOVE_INCIDENT_KEV: f64 = 0.2;

/// A Compton candidate further below the elastic peak than this is rejected.
const MAX_COMPTON_SEPARATION_KEV: f64 = 0.4;

/// Half-width of the elastic exclusion zone (and upper half of the Compton one).
const EXCLUSION_HALF_WIDTH_KEV: f64 = 0.5;

/// The Compton exclusion zone reaches this far below the peak, covering its
/// broad low-energy tail.
const COMPTON_EXCLUSION_BELOW_KEV: f64 = 1.0;

/// Minimum spacing between scatter-peak candidates, in samples.
const MIN_CANDIDATE_SPACING: usize = 5;

/// Everything the scatter stage found, including the audit surface: the search
/// region, the expected Compton energy, and every candidate peak in the region.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScatterDetection {
    pub elastic: Option<ScatterPeak>,
    pub compton: Option<ScatterPeak>,
    pub exclusion_zones: Vec<ExclusionZone>,
    pub search_region_kev: (f64, f64),
    pub expected_compton_kev: f64,
    pub candidates: Vec<DetectedPeak>,
}

impl ScatterDetection {
    fn nothing_found(search_region_kev: (f64, f64), expected_compton_kev: f64) -> Self {
        Self {
            elastic: None,
            compton: None,
            exclusion_zones: Vec::new(),
            search_region_kev,
            expected_compton_kev,
            candidates: Vec::new(),
        }
    }
}

/// Locates the elastic and Compton scatter peaks near the incident energy and
/// derives the exclusion zones fluorescence-peak search must avoid.
///
/// The elastic peak is the candidate closest to the incident energy; the Compton
/// peak is the remaining candidate closest to the expected 90-degree Compton
/// energy, required to sit below the elastic peak by at most 0.4 keV. An empty
/// search region or an empty candidate set is a valid "nothing found" outcome,
/// never an error.
#[instrument(skip_all, name = "scatter_detection")]
pub fn detect_scatter_peaks(
    energy_kev: &[f64],
    spectrum: &[f64],
    incident_energy_kev: f64,
    search_window_kev: f64,
    min_prominence: f64,
) -> ScatterDetection {
    let expected_compton_kev = compton_energy_90(incident_energy_kev);
    let search_min = incident_energy_kev - search_window_kev;
    let search_max = incident_energy_kev + SEARCH_ABOVE_INCIDENT_KEV;
    let search_region_kev = (search_min, search_max);

    let start = energy_kev.partition_point(|&e| e < search_min);
    let end = energy_kev.partition_point(|&e| e <= search_max);
    if start >= end {
        warn!(
            search_min_kev = search_min,
            search_max_kev = search_max,
            "no samples in scatter search region"
        );
        return ScatterDetection::nothing_found(search_region_kev, expected_compton_kev);
    }

    let region_energy = &energy_kev[start..end];
    let region_counts = &spectrum[start..end];

    let peak_indices = find_peaks(
        region_counts,
        None,
        Some(MIN_CANDIDATE_SPACING),
        Some(min_prominence),
    );
    if peak_indices.is_empty() {
        debug!(
            search_min_kev = search_min,
            search_max_kev = search_max,
            "no scatter peaks found in search region"
        );
        return ScatterDetection::nothing_found(search_region_kev, expected_compton_kev);
    }
    let prominences = peak_prominences(region_counts, &peak_indices);

    let candidates: Vec<DetectedPeak> = peak_indices
        .iter()
        .map(|&i| DetectedPeak {
            energy_kev: region_energy[i],
            height: region_counts[i],
        })
        .collect();
    info!(
        incident_kev = incident_energy_kev,
        expected_compton_kev,
        candidates = candidates.len(),
        "scatter candidates located"
    );

    let mut elastic: Option<ScatterPeak> = None;
    let mut elastic_index: Option<usize> = None;
    let mut elastic_distance = f64::INFINITY;
    for (i, candidate) in candidates.iter().enumerate() {
        let distance = (candidate.energy_kev - incident_energy_kev).abs();
        if distance < elastic_distance {
            elastic_distance = distance;
            elastic = Some(ScatterPeak {
                energy_kev: candidate.energy_kev,
                height: candidate.height,
                prominence: prominences[i],
                distance_from_reference: distance,
            });
            elastic_index = Some(i);
        }
    }

    let mut compton: Option<ScatterPeak> = None;
    let mut compton_distance = f64::INFINITY;
    for (i, candidate) in candidates.iter().enumerate() {
        if elastic_index == Some(i) {
            continue;
        }
        if let Some(elastic_peak) = &elastic {
            if candidate.energy_kev >= elastic_peak.energy_kev {
                continue;
            }
            if elastic_peak.energy_kev - candidate.energy_kev > MAX_COMPTON_SEPARATION_KEV {
                continue;
            }
        }
        let distance = (candidate.energy_kev - expected_compton_kev).abs();
        if distance < compton_distance {
            compton_distance = distance;
            compton = Some(ScatterPeak {
                energy_kev: candidate.energy_kev,
                height: candidate.height,
                prominence: prominences[i],
                distance_from_reference: distance,
            });
        }
    }

    let mut exclusion_zones = Vec::new();
    if let Some(peak) = &elastic {
        info!(energy_kev = peak.energy_kev, "elastic peak identified");
        exclusion_zones.push(ExclusionZone {
            kind: ScatterKind::Elastic,
            energy_min_kev: peak.energy_kev - EXCLUSION_HALF_WIDTH_KEV,
            energy_max_kev: peak.energy_kev + EXCLUSION_HALF_WIDTH_KEV,
        });
    }
    if let Some(peak) = &compton {
        info!(energy_kev = peak.energy_kev, "compton peak identified");
        exclusion_zones.push(ExclusionZone {
            kind: ScatterKind::Compton,
            energy_min_kev: peak.energy_kev - COMPTON_EXCLUSION_BELOW_KEV,
            energy_max_kev: peak.energy_kev + EXCLUSION_HALF_WIDTH_KEV,
        });
    }

    ScatterDetection {
        elastic,
        compton,
        exclusion_zones,
        search_region_kev,
        expected_compton_kev,
        candidates,
    }
}
