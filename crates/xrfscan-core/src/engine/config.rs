use crate::core::database::elements::DEFAULT_RESOLUTION_EV;
use crate::core::signal::background::BackgroundMethod;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("File I/O error for '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("TOML parsing error for '{path}': {source}")]
    Toml {
        path: String,
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PeakThresholds {
    /// Minimum peak height in counts.
    pub height: f64,
    /// Minimum spacing between peak apexes, in eV.
    pub min_distance_ev: f64,
    /// Minimum peak prominence in counts.
    pub prominence: f64,
}

impl Default for PeakThresholds {
    fn default() -> Self {
        Self {
            height: 10.0,
            min_distance_ev: 50.0,
            prominence: 10.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BackgroundConfig {
    pub method: BackgroundMethod,
    /// Filter radius in channels for the rolling-ball method.
    pub radius: usize,
}

impl Default for BackgroundConfig {
    fn default() -> Self {
        Self {
            method: BackgroundMethod::RollingBall,
            radius: 50,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScatterConfig {
    /// Whether scatter peaks are detected and excluded before peak search.
    pub enabled: bool,
    /// Search window below the incident energy, in keV.
    pub search_window_kev: f64,
    /// Minimum prominence for scatter-peak candidates.
    pub min_prominence: f64,
}

impl Default for ScatterConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            search_window_kev: 3.0,
            min_prominence: 20.0,
        }
    }
}

/// The full parameter set of one analysis run.
///
/// Every field has a working default; partial TOML files override only the keys
/// they name. The exact values used are echoed back in the analysis report for
/// audit and reproducibility.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Detector energy resolution in eV, used when building combined lines.
    pub resolution_ev: f64,
    /// Energy tolerance for line matching, in keV.
    pub tolerance_kev: f64,
    /// Moving-average window for spectrum smoothing, in channels.
    pub smooth_window: usize,
    pub thresholds: PeakThresholds,
    pub background: BackgroundConfig,
    pub scatter: ScatterConfig,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            resolution_ev: DEFAULT_RESOLUTION_EV,
            tolerance_kev: 0.060,
            smooth_window: 5,
            thresholds: PeakThresholds::default(),
            background: BackgroundConfig::default(),
            scatter: ScatterConfig::default(),
        }
    }
}

impl AnalysisConfig {
    pub fn builder() -> AnalysisConfigBuilder {
        AnalysisConfigBuilder::default()
    }

    /// Loads a configuration from a TOML file; missing keys fall back to defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_string_lossy().to_string(),
            source: e,
        })?;
        toml::from_str(&content).map_err(|e| ConfigError::Toml {
            path: path.to_string_lossy().to_string(),
            source: e,
        })
    }
}

#[derive(Debug, Default)]
pub struct AnalysisConfigBuilder {
    resolution_ev: Option<f64>,
    tolerance_kev: Option<f64>,
    smooth_window: Option<usize>,
    thresholds: Option<PeakThresholds>,
    background: Option<BackgroundConfig>,
    scatter: Option<ScatterConfig>,
}

impl AnalysisConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn resolution_ev(mut self, resolution: f64) -> Self {
        self.resolution_ev = Some(resolution);
        self
    }
    pub fn tolerance_kev(mut self, tolerance: f64) -> Self {
        self.tolerance_kev = Some(tolerance);
        self
    }
    pub fn smooth_window(mut self, window: usize) -> Self {
        self.smooth_window = Some(window);
        self
    }
    pub fn thresholds(mut self, thresholds: PeakThresholds) -> Self {
        self.thresholds = Some(thresholds);
        self
    }
    pub fn background(mut self, background: BackgroundConfig) -> Self {
        self.background = Some(background);
        self
    }
    pub fn scatter(mut self, scatter: ScatterConfig) -> Self {
        self.scatter = Some(scatter);
        self
    }

    pub fn build(self) -> AnalysisConfig {
        let defaults = AnalysisConfig::default();
        AnalysisConfig {
            resolution_ev: self.resolution_ev.unwrap_or(defaults.resolution_ev),
            tolerance_kev: self.tolerance_kev.unwrap_or(defaults.tolerance_kev),
            smooth_window: self.smooth_window.unwrap_or(defaults.smooth_window),
            thresholds: self.thresholds.unwrap_or(defaults.thresholds),
            background: self.background.unwrap_or(defaults.background),
            scatter: self.scatter.unwrap_or(defaults.scatter),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn defaults_match_the_documented_parameter_set() {
        let config = AnalysisConfig::default();
        assert_eq!(config.resolution_ev, 120.0);
        assert_eq!(config.tolerance_kev, 0.060);
        assert_eq!(config.smooth_window, 5);
        assert_eq!(config.thresholds.height, 10.0);
        assert_eq!(config.thresholds.min_distance_ev, 50.0);
        assert_eq!(config.thresholds.prominence, 10.0);
        assert_eq!(config.background.method, BackgroundMethod::RollingBall);
        assert_eq!(config.background.radius, 50);
        assert!(config.scatter.enabled);
        assert_eq!(config.scatter.search_window_kev, 3.0);
    }

    #[test]
    fn builder_overrides_only_what_is_set() {
        let config = AnalysisConfig::builder()
            .tolerance_kev(0.1)
            .smooth_window(1)
            .build();
        assert_eq!(config.tolerance_kev, 0.1);
        assert_eq!(config.smooth_window, 1);
        assert_eq!(config.resolution_ev, 120.0);
    }

    #[test]
    fn load_accepts_partial_toml_with_defaults_for_the_rest() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("analysis.toml");
        fs::write(
            &path,
            r#"
            tolerance_kev = 0.08

            [background]
            method = "polynomial"

            [scatter]
            enabled = false
            "#,
        )
        .unwrap();

        let config = AnalysisConfig::load(&path).unwrap();
        assert_eq!(config.tolerance_kev, 0.08);
        assert_eq!(config.background.method, BackgroundMethod::Polynomial);
        assert_eq!(config.background.radius, 50);
        assert!(!config.scatter.enabled);
        assert_eq!(config.resolution_ev, 120.0);
    }

    #[test]
    fn load_rejects_unknown_background_methods() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("analysis.toml");
        fs::write(&path, "[background]\nmethod = \"spline\"\n").unwrap();
        assert!(matches!(
            AnalysisConfig::load(&path),
            Err(ConfigError::Toml { .. })
        ));
    }

    #[test]
    fn load_fails_for_missing_file() {
        let dir = tempdir().unwrap();
        assert!(matches!(
            AnalysisConfig::load(&dir.path().join("absent.toml")),
            Err(ConfigError::Io { .. })
        ));
    }

    #[test]
    fn config_round_trips_through_toml() {
        let config = AnalysisConfig::builder().resolution_ev(150.0).build();
        let serialized = toml::to_string(&config).unwrap();
        let parsed: AnalysisConfig = toml::from_str(&serialized).unwrap();
        assert_eq!(parsed, config);
    }
}
