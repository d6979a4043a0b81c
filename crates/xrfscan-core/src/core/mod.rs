//! # Core Module
//!
//! This module provides the fundamental building blocks and algorithms for XRF
//! spectrum analysis, serving as the computational core of the library.
//!
//! ## Overview
//!
//! The core module implements the data structures, physics, and signal-processing
//! primitives required to turn a measured fluorescence spectrum into labeled peak
//! identifications. Everything in this layer is stateless and deterministic; the
//! stages in [`crate::engine`] compose these pieces into an analysis pipeline.
//!
//! ## Architecture
//!
//! The module is organized into specialized submodules that handle different aspects
//! of the analysis:
//!
//! - **Data Representation** ([`models`]) - Spectra, emission lines, peaks, and candidates
//! - **Atomic Data** ([`atomic`]) - The provider seam for line energies, edges, yields, and cross sections
//! - **Physics** ([`physics`]) - Absorption-edge gating, excitation efficiency, Compton scattering
//! - **Signal Processing** ([`signal`]) - Background estimation, smoothing, and peak search
//! - **Line Database** ([`database`]) - Resolution-aware combined emission lines per element
//!
//! ## Key Capabilities
//!
//! - **Validated spectrum inputs** that fail fast on malformed shapes
//! - **Resolution-aware line merging** so closely spaced transitions are treated as one feature
//! - **Physics-constrained identification** bounded by absorption edges and shell cross sections
//! - **Dependency-free signal primitives** matching the behavior of the reference pipeline

pub mod atomic;
pub mod database;
pub mod models;
pub mod physics;
pub mod signal;
