//! # Workflows Module
//!
//! This module provides the high-level entry points that orchestrate a complete
//! spectrum analysis.
//!
//! ## Overview
//!
//! Workflows are the top-level API of the library. They tie the signal-processing
//! primitives and engine stages together — range limiting, background subtraction,
//! smoothing, scatter exclusion, peak search, and candidate matching — and return
//! a fully materialized, reproducible report. Input validation happens here:
//! malformed shapes and non-physical beam energies fail fast, while everything
//! recoverable (failed lookups, empty regions) degrades to partial results.
//!
//! ## Key Capabilities
//!
//! - **End-to-end analysis** from a validated spectrum to ranked identifications
//! - **Progress monitoring** with stage-level reporting
//! - **Parameter echoing** so every report documents the exact configuration used
//! - **Batch execution** over independent spectra sharing one read-only database

pub mod analyze;
