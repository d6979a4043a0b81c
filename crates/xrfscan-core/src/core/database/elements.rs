use crate::core::models::line::Transition;
use phf::{Set, phf_set};

/// Detector energy resolution assumed when none is configured, in eV.
pub const DEFAULT_RESOLUTION_EV: f64 = 120.0;

/// Elements whose K-series lines are measurable in a typical scanning setup.
static K_SERIES_ELEMENTS: Set<&'static str> = phf_set! {
    "Na", "Mg", "Al", "Si", "P", "S", "Cl", "Ar", "K", "Ca",
    "Ti", "V", "Cr", "Mn", "Fe", "Co", "Ni", "Cu", "Zn",
    "Ga", "Ge", "As", "Se", "Br",
};

/// Elements identified through their L-series lines. Br appears here and in the
/// K series; both families contribute to its database entry.
static L_SERIES_ELEMENTS: Set<&'static str> = phf_set! {
    "Br", "Zr", "Mo", "Pd", "Ag", "Cd", "I",
    "La", "Ce", "Sm", "Eu", "Gd", "Lu",
    "W", "Ir", "Pt", "Au", "Hg", "Pb",
};

/// Elements identified through their M-series lines.
static M_SERIES_ELEMENTS: Set<&'static str> = phf_set! {
    "U",
};

/// Raw K transitions queried per K-series element.
pub const K_TRANSITIONS: &[Transition] = &[
    Transition::Ka1,
    Transition::Ka2,
    Transition::Kb1,
    Transition::Kb3,
];

/// Raw L transitions queried per L-series element.
pub const L_TRANSITIONS: &[Transition] = &[
    Transition::La1,
    Transition::La2,
    Transition::Lb1,
    Transition::Lb2,
    Transition::Lb3,
    Transition::Lb4,
];

/// Raw M transitions queried per M-series element.
pub const M_TRANSITIONS: &[Transition] = &[Transition::Ma1, Transition::Ma2, Transition::Mb];

/// Every element the default database covers, in build order (K series, then the
/// L series without the duplicate Br, then the M series).
pub const DEFAULT_ELEMENTS: &[&str] = &[
    "Na", "Mg", "Al", "Si", "P", "S", "Cl", "Ar", "K", "Ca",
    "Ti", "V", "Cr", "Mn", "Fe", "Co", "Ni", "Cu", "Zn",
    "Ga", "Ge", "As", "Se", "Br",
    "Zr", "Mo", "Pd", "Ag", "Cd", "I",
    "La", "Ce", "Sm", "Eu", "Gd", "Lu",
    "W", "Ir", "Pt", "Au", "Hg", "Pb",
    "U",
];

pub fn has_k_series(element: &str) -> bool {
    K_SERIES_ELEMENTS.contains(element.trim())
}

pub fn has_l_series(element: &str) -> bool {
    L_SERIES_ELEMENTS.contains(element.trim())
}

pub fn has_m_series(element: &str) -> bool {
    M_SERIES_ELEMENTS.contains(element.trim())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn series_membership_matches_the_reference_tables() {
        assert!(has_k_series("Fe"));
        assert!(has_l_series("Pb"));
        assert!(has_m_series("U"));
        assert!(!has_k_series("Pb"));
        assert!(!has_l_series("Fe"));
        assert!(!has_m_series("Fe"));
    }

    #[test]
    fn bromine_belongs_to_both_k_and_l_series() {
        assert!(has_k_series("Br"));
        assert!(has_l_series("Br"));
    }

    #[test]
    fn membership_trims_whitespace() {
        assert!(has_k_series(" Fe "));
        assert!(!has_k_series("fe"));
    }

    #[test]
    fn default_elements_are_unique_and_cover_all_series() {
        let mut seen = std::collections::HashSet::new();
        for &element in DEFAULT_ELEMENTS {
            assert!(seen.insert(element), "duplicate element {element}");
            assert!(
                has_k_series(element) || has_l_series(element) || has_m_series(element),
                "{element} belongs to no series"
            );
        }
        for &element in K_SERIES_ELEMENTS.iter() {
            assert!(DEFAULT_ELEMENTS.contains(&element));
        }
        for &element in L_SERIES_ELEMENTS.iter() {
            assert!(DEFAULT_ELEMENTS.contains(&element));
        }
    }
}
