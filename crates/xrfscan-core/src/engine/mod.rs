//! # Engine Module
//!
//! This module implements the stages of the spectrum-analysis pipeline together
//! with the configuration, error, and progress-reporting machinery that binds
//! them into a workflow.
//!
//! ## Overview
//!
//! Each stage is a synchronous function that runs to completion and returns a
//! fully materialized result: scatter-peak detection derives exclusion zones
//! around the elastic and Compton features, fluorescence-peak detection searches
//! the masked spectrum, and candidate matching ranks physically plausible line
//! identifications against the shared read-only line database.
//!
//! ## Architecture
//!
//! - **Configuration** ([`config`]) - Tunable thresholds, tolerances, and method selection
//! - **Error Handling** ([`error`]) - Fatal input failures; everything else recovers locally
//! - **Progress Monitoring** ([`progress`]) - Stage-level callbacks for user feedback
//! - **Scatter Stage** ([`scatter`]) - Elastic/Compton identification and exclusion zones
//! - **Detection Stage** ([`detection`]) - Masked fluorescence-peak search
//! - **Matching Stage** ([`matching`]) - Physics-constrained candidate ranking

pub mod config;
pub mod detection;
pub mod error;
pub mod matching;
pub mod progress;
pub mod scatter;
