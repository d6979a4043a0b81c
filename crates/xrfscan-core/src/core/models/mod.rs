//! # Core Models Module
//!
//! This module contains the fundamental data structures used to represent spectra,
//! emission lines, and detected features, providing the foundation for all analysis
//! operations.
//!
//! ## Overview
//!
//! The models module defines the core abstractions the rest of the library operates
//! on. These models are designed to:
//!
//! - **Represent measured data** - Energy axes and count arrays validated at construction
//! - **Represent atomic emission** - Raw transitions and resolution-merged combined lines
//! - **Represent detection output** - Scatter peaks, exclusion zones, fluorescence peaks,
//!   and ranked identification candidates
//! - **Maintain type safety** - Element symbols and line families are first-class fields,
//!   never re-derived from display strings
//!
//! ## Key Components
//!
//! - [`line`] - Emission transitions, line families, raw and combined lines
//! - [`spectrum`] - Validated spectrum input and envelope construction
//! - [`peak`] - Transient per-analysis detection results

pub mod line;
pub mod peak;
pub mod spectrum;
