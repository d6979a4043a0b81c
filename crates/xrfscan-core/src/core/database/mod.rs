//! # Line Database Module
//!
//! This module builds and holds the combined-line database: for every configured
//! element, the emission lines a detector of finite energy resolution can actually
//! distinguish.
//!
//! ## Overview
//!
//! Raw transitions closer together than the detector resolution are merged into
//! single [`crate::core::models::line::CombinedLine`]s with yield-weighted
//! energies. The database is built once per process from the atomic-data provider
//! and is read-only afterwards; analyses on any number of threads may share it
//! without synchronization.
//!
//! ## Key Components
//!
//! - [`elements`] - Static element/family membership tables and transition sets
//! - [`library`] - The grouping algorithm and the [`library::LineDatabase`] container

pub mod elements;
pub mod library;

pub use library::LineDatabase;
