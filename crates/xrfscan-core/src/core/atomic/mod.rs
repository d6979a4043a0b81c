//! Provides the atomic-data seam for the analysis.
//!
//! Line energies, radiative rates, absorption edges, fluorescence yields, and
//! photoionization cross sections are queried from an external source, never
//! computed here. The [`provider::AtomicDataProvider`] trait defines that
//! contract; [`tables::TabulatedAtomicData`] is a bundled implementation backed
//! by CSV tables for deployments without a native atomic-data library.

pub mod provider;
pub mod tables;

pub use provider::{AtomicDataError, AtomicDataProvider, Shell};
pub use tables::TabulatedAtomicData;
