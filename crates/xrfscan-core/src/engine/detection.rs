use super::config::PeakThresholds;
use crate::core::models::peak::DetectedPeak;
use crate::core::signal::peaks::find_peaks;
use tracing::{debug, instrument};

/// Searches the smoothed spectrum for fluorescence peaks outside the exclusion
/// zones.
///
/// Excluded samples are zeroed before the search so no apex can fall inside a
/// zone, and any survivor whose index is still excluded is dropped afterwards.
/// Heights are read from the unmasked spectrum. The three slices must be
/// parallel; the configured minimum peak distance is converted from eV to a
/// channel count using the axis spacing (truncating).
#[instrument(skip_all, name = "peak_detection")]
pub fn find_fluorescence_peaks(
    energy_kev: &[f64],
    smoothed: &[f64],
    excluded: &[bool],
    thresholds: &PeakThresholds,
    ev_per_channel: f64,
) -> Vec<DetectedPeak> {
    let distance_channels = (thresholds.min_distance_ev / ev_per_channel) as usize;

    let masked: Vec<f64> = smoothed
        .iter()
        .zip(excluded)
        .map(|(&value, &is_excluded)| if is_excluded { 0.0 } else { value })
        .collect();

    let mut peak_indices = find_peaks(
        &masked,
        Some(thresholds.height),
        Some(distance_channels),
        Some(thresholds.prominence),
    );
    peak_indices.retain(|&i| !excluded[i]);

    debug!(
        peaks = peak_indices.len(),
        distance_channels, "fluorescence peaks located"
    );

    peak_indices
        .into_iter()
        .map(|i| DetectedPeak {
            energy_kev: energy_kev[i],
            height: smoothed[i],
        })
        .collect()
}
