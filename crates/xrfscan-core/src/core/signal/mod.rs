//! Signal-processing primitives for spectrum conditioning and peak search.
//!
//! The pipeline order is fixed by the analysis: estimate and subtract a
//! background ([`background`]), smooth ([`filters`]), then locate local maxima
//! filtered by height, spacing, and prominence ([`peaks`]). All functions
//! operate on plain count slices and are independent of the energy axis.

pub mod background;
pub mod filters;
pub mod peaks;
