use crate::core::atomic::AtomicDataProvider;
use crate::core::database::LineDatabase;
use crate::core::models::peak::Candidate;
use crate::core::physics::excitation::{absorption_edge, excitation_efficiency};
use tracing::{instrument, trace};

/// Candidates scoring at or below this efficiency are discarded as physically
/// implausible.
const MIN_CANDIDATE_EFFICIENCY: f64 = 0.01;

/// Ranks the physically plausible line identifications for one detected peak.
///
/// Every combined line within `tolerance_kev` of the peak is considered.
/// Lines whose absorption edge cannot be resolved, or whose edge lies at or
/// above the incident energy, are skipped outright: they cannot be excited, so
/// no score could make them plausible. Survivors are scored by excitation
/// efficiency and sorted descending; the sort is stable, so ties keep database
/// iteration order.
#[instrument(skip_all, name = "line_matching", fields(peak_kev = peak_energy_kev))]
pub fn candidates_for_peak<P: AtomicDataProvider>(
    provider: &P,
    database: &LineDatabase,
    peak_energy_kev: f64,
    tolerance_kev: f64,
    incident_energy_kev: f64,
) -> Vec<Candidate> {
    let mut candidates = Vec::new();

    for (element, lines) in database.iter() {
        for line in lines {
            let energy_diff = (line.energy_kev - peak_energy_kev).abs();
            if energy_diff > tolerance_kev {
                continue;
            }

            let Some(edge_energy) = absorption_edge(provider, element, line.family) else {
                continue;
            };
            if incident_energy_kev <= edge_energy {
                trace!(
                    element,
                    family = %line.family,
                    edge_kev = edge_energy,
                    "line not excitable at incident energy"
                );
                continue;
            }

            let efficiency =
                excitation_efficiency(provider, element, line.family, incident_energy_kev);
            if efficiency <= MIN_CANDIDATE_EFFICIENCY {
                continue;
            }

            candidates.push(Candidate {
                element: line.element.clone(),
                family: line.family,
                line_energy_kev: line.energy_kev,
                edge_energy_kev: edge_energy,
                efficiency,
                energy_diff_kev: energy_diff,
            });
        }
    }

    candidates.sort_by(|a, b| b.efficiency.total_cmp(&a.efficiency));
    candidates
}
