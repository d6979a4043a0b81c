use super::provider::{AtomicDataError, AtomicDataProvider, Shell};
use crate::core::models::line::Transition;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Deserialize, Clone)]
struct ElementRecord {
    symbol: String,
    z: u32,
}

#[derive(Debug, Deserialize, Clone)]
struct LineRecord {
    z: u32,
    transition: Transition,
    energy_kev: f64,
    radiative_rate: f64,
}

#[derive(Debug, Deserialize, Clone)]
struct EdgeRecord {
    z: u32,
    shell: Shell,
    energy_kev: f64,
}

#[derive(Debug, Deserialize, Clone)]
struct YieldRecord {
    z: u32,
    shell: Shell,
    fluorescence_yield: f64,
}

#[derive(Debug, Deserialize, Clone)]
struct CrossSectionRecord {
    z: u32,
    shell: Shell,
    energy_kev: f64,
    cross_section: f64,
}

#[derive(Debug, Error)]
pub enum TableLoadError {
    #[error("File I/O error for '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("CSV parsing error for '{path}': {source}")]
    Csv { path: String, source: csv::Error },
}

/// An [`AtomicDataProvider`] backed by in-memory tables.
///
/// Tables are loaded from CSV files exported from a reference atomic-data
/// library, or populated programmatically. Cross sections are stored as sampled
/// (energy, value) pairs per (element, shell) and interpolated linearly between
/// the bracketing samples; queries outside the sampled range fail as ordinary
/// lookup failures.
#[derive(Debug, Default, Clone)]
pub struct TabulatedAtomicData {
    elements: HashMap<String, u32>,
    lines: HashMap<(u32, Transition), (f64, f64)>,
    edges: HashMap<(u32, Shell), f64>,
    yields: HashMap<(u32, Shell), f64>,
    cross_sections: HashMap<(u32, Shell), Vec<(f64, f64)>>,
}

impl TabulatedAtomicData {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads all five tables from a directory containing `elements.csv`,
    /// `lines.csv`, `edges.csv`, `yields.csv`, and `cross_sections.csv`.
    pub fn load_dir(dir: &Path) -> Result<Self, TableLoadError> {
        let mut data = Self::new();
        for record in read_records::<ElementRecord>(&dir.join("elements.csv"))? {
            data.insert_element(&record.symbol, record.z);
        }
        for record in read_records::<LineRecord>(&dir.join("lines.csv"))? {
            data.insert_line(
                record.z,
                record.transition,
                record.energy_kev,
                record.radiative_rate,
            );
        }
        for record in read_records::<EdgeRecord>(&dir.join("edges.csv"))? {
            data.insert_edge(record.z, record.shell, record.energy_kev);
        }
        for record in read_records::<YieldRecord>(&dir.join("yields.csv"))? {
            data.insert_yield(record.z, record.shell, record.fluorescence_yield);
        }
        for record in read_records::<CrossSectionRecord>(&dir.join("cross_sections.csv"))? {
            data.insert_cross_section_sample(
                record.z,
                record.shell,
                record.energy_kev,
                record.cross_section,
            );
        }
        Ok(data)
    }

    pub fn insert_element(&mut self, symbol: &str, z: u32) -> &mut Self {
        self.elements.insert(symbol.to_string(), z);
        self
    }

    pub fn insert_line(
        &mut self,
        z: u32,
        transition: Transition,
        energy_kev: f64,
        radiative_rate: f64,
    ) -> &mut Self {
        self.lines.insert((z, transition), (energy_kev, radiative_rate));
        self
    }

    pub fn insert_edge(&mut self, z: u32, shell: Shell, energy_kev: f64) -> &mut Self {
        self.edges.insert((z, shell), energy_kev);
        self
    }

    pub fn insert_yield(&mut self, z: u32, shell: Shell, fluorescence_yield: f64) -> &mut Self {
        self.yields.insert((z, shell), fluorescence_yield);
        self
    }

    /// Adds one sampled cross-section point; samples are kept sorted by energy.
    pub fn insert_cross_section_sample(
        &mut self,
        z: u32,
        shell: Shell,
        energy_kev: f64,
        cross_section: f64,
    ) -> &mut Self {
        let samples = self.cross_sections.entry((z, shell)).or_default();
        let position = samples.partition_point(|&(e, _)| e < energy_kev);
        samples.insert(position, (energy_kev, cross_section));
        self
    }
}

fn read_records<T: for<'de> Deserialize<'de>>(path: &Path) -> Result<Vec<T>, TableLoadError> {
    let file = std::fs::File::open(path).map_err(|e| TableLoadError::Io {
        path: path.to_string_lossy().to_string(),
        source: e,
    })?;
    let mut reader = csv::Reader::from_reader(file);
    let mut records = Vec::new();
    for result in reader.deserialize::<T>() {
        let record = result.map_err(|e| TableLoadError::Csv {
            path: path.to_string_lossy().to_string(),
            source: e,
        })?;
        records.push(record);
    }
    Ok(records)
}

impl AtomicDataProvider for TabulatedAtomicData {
    fn atomic_number(&self, symbol: &str) -> Result<u32, AtomicDataError> {
        self.elements
            .get(symbol.trim())
            .copied()
            .ok_or_else(|| AtomicDataError::UnknownElement(symbol.to_string()))
    }

    fn line_energy(&self, z: u32, transition: Transition) -> Result<f64, AtomicDataError> {
        self.lines
            .get(&(z, transition))
            .map(|&(energy, _)| energy)
            .ok_or(AtomicDataError::MissingLine { z, transition })
    }

    fn radiative_rate(&self, z: u32, transition: Transition) -> Result<f64, AtomicDataError> {
        self.lines
            .get(&(z, transition))
            .map(|&(_, rate)| rate)
            .ok_or(AtomicDataError::MissingLine { z, transition })
    }

    fn edge_energy(&self, z: u32, shell: Shell) -> Result<f64, AtomicDataError> {
        self.edges
            .get(&(z, shell))
            .copied()
            .ok_or(AtomicDataError::MissingEdge { z, shell })
    }

    fn partial_cross_section(
        &self,
        z: u32,
        shell: Shell,
        energy_kev: f64,
    ) -> Result<f64, AtomicDataError> {
        let missing = AtomicDataError::MissingCrossSection {
            z,
            shell,
            energy_kev,
        };
        let samples = self.cross_sections.get(&(z, shell)).ok_or(missing.clone())?;
        let (first, last) = match (samples.first(), samples.last()) {
            (Some(first), Some(last)) => (first, last),
            _ => return Err(missing),
        };
        if energy_kev < first.0 || energy_kev > last.0 {
            return Err(missing);
        }
        let upper = samples.partition_point(|&(e, _)| e < energy_kev);
        if let Some(&(e, value)) = samples.get(upper) {
            if e == energy_kev {
                return Ok(value);
            }
        }
        let (e0, v0) = samples[upper - 1];
        let (e1, v1) = samples[upper];
        let t = (energy_kev - e0) / (e1 - e0);
        Ok(v0 + t * (v1 - v0))
    }

    fn fluorescence_yield(&self, z: u32, shell: Shell) -> Result<f64, AtomicDataError> {
        self.yields
            .get(&(z, shell))
            .copied()
            .ok_or(AtomicDataError::MissingYield { z, shell })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn iron_tables() -> TabulatedAtomicData {
        let mut data = TabulatedAtomicData::new();
        data.insert_element("Fe", 26)
            .insert_line(26, Transition::Ka1, 6.404, 0.58)
            .insert_edge(26, Shell::K, 7.112)
            .insert_yield(26, Shell::K, 0.347)
            .insert_cross_section_sample(26, Shell::K, 8.0, 220.0)
            .insert_cross_section_sample(26, Shell::K, 12.0, 80.0);
        data
    }

    #[test]
    fn point_lookups_resolve_inserted_values() {
        let data = iron_tables();
        assert_eq!(data.atomic_number("Fe").unwrap(), 26);
        assert_eq!(data.line_energy(26, Transition::Ka1).unwrap(), 6.404);
        assert_eq!(data.radiative_rate(26, Transition::Ka1).unwrap(), 0.58);
        assert_eq!(data.edge_energy(26, Shell::K).unwrap(), 7.112);
        assert_eq!(data.fluorescence_yield(26, Shell::K).unwrap(), 0.347);
    }

    #[test]
    fn missing_lookups_fail_with_the_matching_error() {
        let data = iron_tables();
        assert!(matches!(
            data.atomic_number("Xx"),
            Err(AtomicDataError::UnknownElement(_))
        ));
        assert!(matches!(
            data.line_energy(26, Transition::Kb1),
            Err(AtomicDataError::MissingLine { .. })
        ));
        assert!(matches!(
            data.edge_energy(26, Shell::L3),
            Err(AtomicDataError::MissingEdge { .. })
        ));
    }

    #[test]
    fn cross_section_interpolates_between_samples() {
        let data = iron_tables();
        let value = data.partial_cross_section(26, Shell::K, 10.0).unwrap();
        assert!((value - 150.0).abs() < 1e-9);
        let exact = data.partial_cross_section(26, Shell::K, 8.0).unwrap();
        assert_eq!(exact, 220.0);
    }

    #[test]
    fn cross_section_outside_sampled_range_is_a_lookup_failure() {
        let data = iron_tables();
        assert!(matches!(
            data.partial_cross_section(26, Shell::K, 7.0),
            Err(AtomicDataError::MissingCrossSection { .. })
        ));
        assert!(matches!(
            data.partial_cross_section(26, Shell::K, 20.0),
            Err(AtomicDataError::MissingCrossSection { .. })
        ));
    }

    #[test]
    fn load_dir_reads_all_five_tables() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("elements.csv"), "symbol,z\nFe,26\n").unwrap();
        fs::write(
            dir.path().join("lines.csv"),
            "z,transition,energy_kev,radiative_rate\n26,Ka1,6.404,0.58\n",
        )
        .unwrap();
        fs::write(dir.path().join("edges.csv"), "z,shell,energy_kev\n26,K,7.112\n").unwrap();
        fs::write(
            dir.path().join("yields.csv"),
            "z,shell,fluorescence_yield\n26,K,0.347\n",
        )
        .unwrap();
        fs::write(
            dir.path().join("cross_sections.csv"),
            "z,shell,energy_kev,cross_section\n26,K,8.0,220.0\n26,K,12.0,80.0\n",
        )
        .unwrap();

        let data = TabulatedAtomicData::load_dir(dir.path()).unwrap();
        assert_eq!(data.atomic_number("Fe").unwrap(), 26);
        let value = data.partial_cross_section(26, Shell::K, 10.0).unwrap();
        assert!((value - 150.0).abs() < 1e-9);
    }

    #[test]
    fn load_dir_fails_for_missing_or_malformed_files() {
        let dir = tempdir().unwrap();
        assert!(matches!(
            TabulatedAtomicData::load_dir(dir.path()),
            Err(TableLoadError::Io { .. })
        ));

        fs::write(dir.path().join("elements.csv"), "symbol,z\nFe,notanumber\n").unwrap();
        assert!(matches!(
            TabulatedAtomicData::load_dir(dir.path()),
            Err(TableLoadError::Csv { .. })
        ));
    }
}
