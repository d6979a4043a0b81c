use super::elements;
use crate::core::atomic::AtomicDataProvider;
use crate::core::models::line::{CombinedLine, LineFamily, RawLine, Transition};
use std::collections::HashMap;
use tracing::debug;

/// Collects the raw lines of one element: every transition of every series the
/// element belongs to, keeping only positive energies and yields. Individual
/// lookup failures are skipped; an unresolvable element symbol yields nothing.
fn raw_lines_for_element<P: AtomicDataProvider>(provider: &P, element: &str) -> Vec<RawLine> {
    let Ok(z) = provider.atomic_number(element) else {
        return Vec::new();
    };

    let mut transitions: Vec<Transition> = Vec::new();
    if elements::has_k_series(element) {
        transitions.extend_from_slice(elements::K_TRANSITIONS);
    }
    if elements::has_l_series(element) {
        transitions.extend_from_slice(elements::L_TRANSITIONS);
    }
    if elements::has_m_series(element) {
        transitions.extend_from_slice(elements::M_TRANSITIONS);
    }

    let mut raw_lines = Vec::with_capacity(transitions.len());
    for transition in transitions {
        let (Ok(energy_kev), Ok(radiative_yield)) = (
            provider.line_energy(z, transition),
            provider.radiative_rate(z, transition),
        ) else {
            continue;
        };
        if energy_kev > 0.0 && radiative_yield > 0.0 {
            raw_lines.push(RawLine {
                transition,
                energy_kev,
                radiative_yield,
            });
        }
    }
    raw_lines
}

/// Reduces one adjacency group to a combined line.
fn reduce_group(element: &str, group: &[RawLine]) -> Option<CombinedLine> {
    match group {
        [] => None,
        [line] => Some(CombinedLine {
            element: element.to_string(),
            family: line.transition.family(),
            energy_kev: line.energy_kev,
            total_yield: line.radiative_yield,
        }),
        lines => {
            let total_yield: f64 = lines.iter().map(|l| l.radiative_yield).sum();
            let weighted_energy = lines
                .iter()
                .map(|l| l.energy_kev * l.radiative_yield)
                .sum::<f64>()
                / total_yield;
            let families: Vec<LineFamily> =
                lines.iter().map(|l| l.transition.family()).collect();
            Some(CombinedLine {
                element: element.to_string(),
                family: LineFamily::merged(&families),
                energy_kev: weighted_energy,
                total_yield,
            })
        }
    }
}

/// Builds the combined lines of one element for the given detector resolution.
///
/// Raw lines are sorted by energy and grouped greedily: a line joins the open
/// group when it lies within `resolution_ev` of the last line placed in it, so
/// a chain of near-neighbors can merge a group whose total span exceeds the
/// resolution window. Returns an empty vector for unknown elements or elements
/// without a single valid transition.
pub fn combined_lines_for_element<P: AtomicDataProvider>(
    provider: &P,
    element: &str,
    resolution_ev: f64,
) -> Vec<CombinedLine> {
    let mut raw_lines = raw_lines_for_element(provider, element);
    if raw_lines.is_empty() {
        return Vec::new();
    }
    raw_lines.sort_by(|a, b| a.energy_kev.total_cmp(&b.energy_kev));

    let resolution_kev = resolution_ev / 1000.0;
    let mut combined = Vec::new();
    let mut group: Vec<RawLine> = vec![raw_lines[0]];

    for &line in &raw_lines[1..] {
        let last = group[group.len() - 1];
        if (line.energy_kev - last.energy_kev).abs() <= resolution_kev {
            group.push(line);
        } else {
            combined.extend(reduce_group(element, &group));
            group = vec![line];
        }
    }
    combined.extend(reduce_group(element, &group));
    combined
}

/// The combined-line database: one ordered line sequence per configured element.
///
/// Built once from the atomic-data provider and read-only afterwards; shared
/// references may be used concurrently from any number of threads. Every
/// configured element is present, with an empty sequence when no line data
/// resolved; a failing element never aborts the build.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LineDatabase {
    order: Vec<String>,
    lines: HashMap<String, Vec<CombinedLine>>,
}

impl LineDatabase {
    /// Builds the database for the given elements at the given resolution.
    ///
    /// Repeated symbols are ignored after their first occurrence so iteration
    /// order stays well defined.
    pub fn build<P: AtomicDataProvider>(
        provider: &P,
        elements: &[&str],
        resolution_ev: f64,
    ) -> Self {
        let mut order = Vec::with_capacity(elements.len());
        let mut lines = HashMap::with_capacity(elements.len());
        for &element in elements {
            if lines.contains_key(element) {
                continue;
            }
            let combined = combined_lines_for_element(provider, element, resolution_ev);
            debug!(element, lines = combined.len(), "element lines combined");
            order.push(element.to_string());
            lines.insert(element.to_string(), combined);
        }
        Self { order, lines }
    }

    /// Builds the database over the default element set at the default 120 eV
    /// resolution.
    pub fn with_default_elements<P: AtomicDataProvider>(provider: &P) -> Self {
        Self::build(
            provider,
            elements::DEFAULT_ELEMENTS,
            elements::DEFAULT_RESOLUTION_EV,
        )
    }

    /// The combined lines of one element; empty for unknown elements.
    pub fn lines(&self, element: &str) -> &[CombinedLine] {
        self.lines.get(element).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn contains(&self, element: &str) -> bool {
        self.lines.contains_key(element)
    }

    /// Elements and their lines in deterministic build order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[CombinedLine])> {
        self.order
            .iter()
            .map(|element| (element.as_str(), self.lines(element)))
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::atomic::{Shell, TabulatedAtomicData};

    fn iron_provider() -> TabulatedAtomicData {
        let mut data = TabulatedAtomicData::new();
        data.insert_element("Fe", 26)
            .insert_line(26, Transition::Ka1, 6.404, 0.580)
            .insert_line(26, Transition::Ka2, 6.391, 0.294)
            .insert_line(26, Transition::Kb1, 7.058, 0.082)
            .insert_line(26, Transition::Kb3, 7.054, 0.042)
            .insert_edge(26, Shell::K, 7.112);
        data
    }

    #[test]
    fn iron_lines_merge_into_ka_and_kb_features() {
        let provider = iron_provider();
        let combined = combined_lines_for_element(&provider, "Fe", 120.0);
        assert_eq!(combined.len(), 2);

        let ka = &combined[0];
        assert_eq!(ka.family, LineFamily::Ka);
        assert_eq!(ka.display_name(), "Fe Ka");
        let expected_energy = (6.404 * 0.580 + 6.391 * 0.294) / (0.580 + 0.294);
        assert!((ka.energy_kev - expected_energy).abs() < 1e-12);
        assert!((ka.total_yield - 0.874).abs() < 1e-12);

        let kb = &combined[1];
        assert_eq!(kb.family, LineFamily::Kb);
        assert!((kb.total_yield - 0.124).abs() < 1e-12);
    }

    #[test]
    fn zero_resolution_keeps_every_line_separate() {
        let provider = iron_provider();
        let combined = combined_lines_for_element(&provider, "Fe", 0.0);
        assert_eq!(combined.len(), 4);
        for line in &combined {
            assert!(line.total_yield > 0.0);
        }
    }

    #[test]
    fn combined_lines_are_energy_ordered_and_cover_every_raw_line() {
        let provider = iron_provider();
        for resolution in [0.0, 20.0, 120.0, 1000.0] {
            let combined = combined_lines_for_element(&provider, "Fe", resolution);
            for pair in combined.windows(2) {
                assert!(pair[0].energy_kev < pair[1].energy_kev);
            }
            let total: f64 = combined.iter().map(|l| l.total_yield).sum();
            assert!((total - (0.580 + 0.294 + 0.082 + 0.042)).abs() < 1e-12);
        }
    }

    #[test]
    fn grouping_chains_through_near_neighbors() {
        // Three lines 100 eV apart: each neighbor pair is within the 120 eV
        // window, so the chain merges into one group spanning 200 eV.
        let mut data = TabulatedAtomicData::new();
        data.insert_element("Fe", 26)
            .insert_line(26, Transition::Ka2, 6.10, 1.0)
            .insert_line(26, Transition::Ka1, 6.20, 1.0)
            .insert_line(26, Transition::Kb1, 6.30, 1.0);
        let combined = combined_lines_for_element(&data, "Fe", 120.0);
        assert_eq!(combined.len(), 1);
        assert_eq!(combined[0].family, LineFamily::Ka);
        assert!((combined[0].energy_kev - 6.20).abs() < 1e-12);
        assert!((combined[0].total_yield - 3.0).abs() < 1e-12);
    }

    #[test]
    fn invalid_lines_are_dropped_before_grouping() {
        let mut data = TabulatedAtomicData::new();
        data.insert_element("Fe", 26)
            .insert_line(26, Transition::Ka1, 6.404, 0.58)
            .insert_line(26, Transition::Ka2, -1.0, 0.29)
            .insert_line(26, Transition::Kb1, 7.058, 0.0);
        let combined = combined_lines_for_element(&data, "Fe", 120.0);
        assert_eq!(combined.len(), 1);
        assert_eq!(combined[0].family, LineFamily::Ka);
        assert_eq!(combined[0].total_yield, 0.58);
    }

    #[test]
    fn unknown_element_produces_an_empty_entry_not_an_error() {
        let provider = iron_provider();
        let database = LineDatabase::build(&provider, &["Fe", "Cu"], 120.0);
        assert!(database.contains("Cu"));
        assert!(database.lines("Cu").is_empty());
        assert_eq!(database.lines("Fe").len(), 2);
        assert_eq!(database.len(), 2);
    }

    #[test]
    fn build_is_deterministic_across_repeats() {
        let provider = iron_provider();
        let first = LineDatabase::build(&provider, &["Fe", "Cu"], 120.0);
        let second = LineDatabase::build(&provider, &["Fe", "Cu"], 120.0);
        assert_eq!(first, second);
        let order_first: Vec<_> = first.iter().map(|(e, _)| e.to_string()).collect();
        assert_eq!(order_first, vec!["Fe", "Cu"]);
    }

    #[test]
    fn repeated_symbols_are_ignored_after_the_first() {
        let provider = iron_provider();
        let database = LineDatabase::build(&provider, &["Fe", "Fe", "Cu"], 120.0);
        assert_eq!(database.len(), 2);
    }

    #[test]
    fn default_build_covers_every_configured_element() {
        // An empty provider resolves nothing; every element must still be present.
        let provider = TabulatedAtomicData::new();
        let database = LineDatabase::with_default_elements(&provider);
        assert_eq!(database.len(), elements::DEFAULT_ELEMENTS.len());
        for (_, lines) in database.iter() {
            assert!(lines.is_empty());
        }
    }
}
