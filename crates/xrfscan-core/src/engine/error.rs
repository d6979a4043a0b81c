use crate::core::models::spectrum::SpectrumError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Invalid spectrum input: {source}")]
    Spectrum {
        #[from]
        source: SpectrumError,
    },

    #[error("Incident beam energy must be positive, got {value_ev} eV")]
    InvalidIncidentEnergy { value_ev: f64 },

    #[error(
        "Analysis range up to {limit_kev} keV covers {samples} samples, need at least 2"
    )]
    EmptyAnalysisRange { limit_kev: f64, samples: usize },
}
