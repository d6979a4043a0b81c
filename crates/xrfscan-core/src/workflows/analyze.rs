use crate::core::atomic::AtomicDataProvider;
use crate::core::database::LineDatabase;
use crate::core::models::peak::{Candidate, DetectedPeak};
use crate::core::models::spectrum::Spectrum;
use crate::core::signal::background::subtract_background;
use crate::core::signal::filters::moving_average;
use crate::engine::config::AnalysisConfig;
use crate::engine::detection::find_fluorescence_peaks;
use crate::engine::error::EngineError;
use crate::engine::matching::candidates_for_peak;
use crate::engine::progress::{AnalysisStage, Progress, ProgressReporter};
use crate::engine::scatter::{ScatterDetection, detect_scatter_peaks};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// The analysis range extends to this multiple of the incident energy; above it
/// only scatter features live and fluorescence identification is meaningless.
const ENERGY_RANGE_FACTOR: f64 = 1.1;

/// A detected fluorescence peak with its ranked identification candidates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IdentifiedPeak {
    pub peak: DetectedPeak,
    /// Candidates sorted by descending excitation efficiency; empty when no
    /// line within tolerance survives the physics checks.
    pub candidates: Vec<Candidate>,
}

/// The exact parameter set a report was produced with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisParameters {
    pub config: AnalysisConfig,
    pub incident_energy_kev: f64,
    pub energy_range_kev: (f64, f64),
    pub ev_per_channel: f64,
}

/// The fully materialized result of one spectrum analysis.
///
/// `energy_kev`, `raw`, `background`, `background_subtracted`, `smoothed`, and
/// `exclusion_mask` are parallel arrays over the restricted analysis range. The
/// mask is true where a sample falls inside a scatter exclusion zone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub energy_kev: Vec<f64>,
    pub raw: Vec<f64>,
    pub background: Vec<f64>,
    pub background_subtracted: Vec<f64>,
    pub smoothed: Vec<f64>,
    pub exclusion_mask: Vec<bool>,
    pub peaks: Vec<IdentifiedPeak>,
    pub scatter: Option<ScatterDetection>,
    pub parameters: AnalysisParameters,
}

/// Runs the complete analysis pipeline on one spectrum.
///
/// Stages run synchronously in fixed order: range limiting, background
/// subtraction, smoothing, scatter detection (when enabled), masked peak
/// search, and per-peak candidate matching against the shared read-only line
/// database. Fatal errors are limited to malformed input; recoverable
/// conditions degrade to partial results inside the report.
#[instrument(skip_all, name = "analysis_workflow")]
pub fn run<P: AtomicDataProvider>(
    spectrum: &Spectrum,
    incident_energy_ev: f64,
    database: &LineDatabase,
    provider: &P,
    config: &AnalysisConfig,
    reporter: &ProgressReporter,
) -> Result<AnalysisReport, EngineError> {
    if !(incident_energy_ev > 0.0) {
        return Err(EngineError::InvalidIncidentEnergy {
            value_ev: incident_energy_ev,
        });
    }
    let incident_energy_kev = incident_energy_ev / 1000.0;
    let ev_per_channel = spectrum.ev_per_channel();
    let limit_kev = ENERGY_RANGE_FACTOR * incident_energy_kev;

    let energy_kev_full: Vec<f64> = spectrum.energy_ev().iter().map(|&e| e / 1000.0).collect();
    let cut = energy_kev_full.partition_point(|&e| e <= limit_kev);
    if cut < 2 {
        return Err(EngineError::EmptyAnalysisRange {
            limit_kev,
            samples: cut,
        });
    }
    let energy_kev = energy_kev_full[..cut].to_vec();
    let raw = spectrum.counts()[..cut].to_vec();
    info!(limit_kev, samples = cut, "analysis range selected");

    reporter.report(Progress::StageStart {
        stage: AnalysisStage::Background,
    });
    let (background, background_subtracted) =
        subtract_background(&raw, config.background.method, config.background.radius);
    reporter.report(Progress::StageFinish {
        stage: AnalysisStage::Background,
    });

    reporter.report(Progress::StageStart {
        stage: AnalysisStage::Smoothing,
    });
    let smoothed = moving_average(&background_subtracted, config.smooth_window);
    reporter.report(Progress::StageFinish {
        stage: AnalysisStage::Smoothing,
    });

    let scatter = if config.scatter.enabled {
        reporter.report(Progress::StageStart {
            stage: AnalysisStage::ScatterSearch,
        });
        let detection = detect_scatter_peaks(
            &energy_kev,
            &smoothed,
            incident_energy_kev,
            config.scatter.search_window_kev,
            config.scatter.min_prominence,
        );
        reporter.report(Progress::StageFinish {
            stage: AnalysisStage::ScatterSearch,
        });
        Some(detection)
    } else {
        None
    };

    let mut exclusion_mask = vec![false; energy_kev.len()];
    if let Some(detection) = &scatter {
        for zone in &detection.exclusion_zones {
            for (flag, &energy) in exclusion_mask.iter_mut().zip(&energy_kev) {
                if zone.contains(energy) {
                    *flag = true;
                }
            }
        }
        let excluded = exclusion_mask.iter().filter(|&&e| e).count();
        info!(
            excluded,
            total = exclusion_mask.len(),
            "scatter exclusion mask applied"
        );
    }

    reporter.report(Progress::StageStart {
        stage: AnalysisStage::PeakSearch,
    });
    let detected = find_fluorescence_peaks(
        &energy_kev,
        &smoothed,
        &exclusion_mask,
        &config.thresholds,
        ev_per_channel,
    );
    reporter.report(Progress::PeaksFound {
        count: detected.len(),
    });
    reporter.report(Progress::StageFinish {
        stage: AnalysisStage::PeakSearch,
    });

    reporter.report(Progress::StageStart {
        stage: AnalysisStage::LineMatching,
    });
    let peaks: Vec<IdentifiedPeak> = detected
        .into_iter()
        .map(|peak| {
            let candidates = candidates_for_peak(
                provider,
                database,
                peak.energy_kev,
                config.tolerance_kev,
                incident_energy_kev,
            );
            IdentifiedPeak { peak, candidates }
        })
        .collect();
    reporter.report(Progress::StageFinish {
        stage: AnalysisStage::LineMatching,
    });

    let identified = peaks.iter().filter(|p| !p.candidates.is_empty()).count();
    info!(
        peaks = peaks.len(),
        identified, "analysis workflow complete"
    );

    Ok(AnalysisReport {
        energy_kev,
        raw,
        background,
        background_subtracted,
        smoothed,
        exclusion_mask,
        peaks,
        scatter,
        parameters: AnalysisParameters {
            config: config.clone(),
            incident_energy_kev,
            energy_range_kev: (0.0, limit_kev),
            ev_per_channel,
        },
    })
}

/// Analyzes many independent spectra against one shared read-only database.
///
/// Each spectrum gets its own result slot; one failing spectrum never
/// suppresses the others. With the `parallel` feature the batch fans out over
/// the rayon thread pool, which is safe because analyses share no mutable
/// state.
pub fn run_batch<P: AtomicDataProvider + Sync>(
    spectra: &[Spectrum],
    incident_energy_ev: f64,
    database: &LineDatabase,
    provider: &P,
    config: &AnalysisConfig,
) -> Vec<Result<AnalysisReport, EngineError>> {
    #[cfg(feature = "parallel")]
    {
        spectra
            .par_iter()
            .map(|spectrum| {
                run(
                    spectrum,
                    incident_energy_ev,
                    database,
                    provider,
                    config,
                    &ProgressReporter::new(),
                )
            })
            .collect()
    }
    #[cfg(not(feature = "parallel"))]
    {
        spectra
            .iter()
            .map(|spectrum| {
                run(
                    spectrum,
                    incident_energy_ev,
                    database,
                    provider,
                    config,
                    &ProgressReporter::new(),
                )
            })
            .collect()
    }
}
