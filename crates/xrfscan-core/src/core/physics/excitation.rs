use crate::core::atomic::{AtomicDataProvider, Shell};
use crate::core::models::line::LineFamily;

/// Divisor bringing cross-section x yield products onto a 0..1 display scale.
const EFFICIENCY_SCALE: f64 = 10.0;

/// Score substituted when a provider lookup fails after the edge check passed.
const LOOKUP_FALLBACK_EFFICIENCY: f64 = 0.01;

/// Maps a line family to the shell its edge and cross section resolve against.
///
/// M families have no supported mapping and return `None`; candidates from them
/// can never pass the excitability check.
pub fn family_shell(family: LineFamily) -> Option<Shell> {
    match family {
        LineFamily::Ka | LineFamily::Kb => Some(Shell::K),
        LineFamily::La | LineFamily::Lb => Some(Shell::L3),
        LineFamily::Ma | LineFamily::Mb | LineFamily::Other => None,
    }
}

/// Absorption-edge energy in keV for an element/family pair.
///
/// Returns `None` for unsupported families, failed lookups, and non-positive
/// edge values; all three mean the same thing to callers: the line cannot be
/// gated and must be skipped.
pub fn absorption_edge<P: AtomicDataProvider>(
    provider: &P,
    element: &str,
    family: LineFamily,
) -> Option<f64> {
    let shell = family_shell(family)?;
    let z = provider.atomic_number(element).ok()?;
    let edge = provider.edge_energy(z, shell).ok()?;
    (edge > 0.0).then_some(edge)
}

/// Relative excitation efficiency of a line under the given incident energy.
///
/// Exactly 0.0 when the incident energy cannot ionize the shell (at or below
/// the edge, unsupported family, unresolvable edge). Above the edge the score
/// is the shell photoionization cross section times the fluorescence yield,
/// scaled and clamped to 1.0. A provider failure past the edge check yields the
/// small non-zero fallback instead of an error, so ranking always completes.
///
/// The value is an ordinal ranking score, not a calibrated physical probability.
pub fn excitation_efficiency<P: AtomicDataProvider>(
    provider: &P,
    element: &str,
    family: LineFamily,
    incident_energy_kev: f64,
) -> f64 {
    let Some(edge) = absorption_edge(provider, element, family) else {
        return 0.0;
    };
    if incident_energy_kev <= edge {
        return 0.0;
    }
    let Some(shell) = family_shell(family) else {
        return 0.0;
    };

    let looked_up = provider.atomic_number(element).and_then(|z| {
        let cross_section = provider.partial_cross_section(z, shell, incident_energy_kev)?;
        let fluorescence_yield = provider.fluorescence_yield(z, shell)?;
        Ok(cross_section * fluorescence_yield)
    });

    match looked_up {
        Ok(product) => (product / EFFICIENCY_SCALE).min(1.0),
        Err(_) => LOOKUP_FALLBACK_EFFICIENCY,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::atomic::TabulatedAtomicData;

    fn iron() -> TabulatedAtomicData {
        let mut data = TabulatedAtomicData::new();
        data.insert_element("Fe", 26)
            .insert_edge(26, Shell::K, 7.112)
            .insert_yield(26, Shell::K, 0.347)
            .insert_cross_section_sample(26, Shell::K, 7.2, 300.0)
            .insert_cross_section_sample(26, Shell::K, 15.0, 50.0);
        data
    }

    #[test]
    fn family_shell_supports_k_and_l_families_only() {
        assert_eq!(family_shell(LineFamily::Ka), Some(Shell::K));
        assert_eq!(family_shell(LineFamily::Kb), Some(Shell::K));
        assert_eq!(family_shell(LineFamily::La), Some(Shell::L3));
        assert_eq!(family_shell(LineFamily::Lb), Some(Shell::L3));
        assert_eq!(family_shell(LineFamily::Ma), None);
        assert_eq!(family_shell(LineFamily::Mb), None);
        assert_eq!(family_shell(LineFamily::Other), None);
    }

    #[test]
    fn absorption_edge_resolves_for_supported_families() {
        let data = iron();
        assert_eq!(absorption_edge(&data, "Fe", LineFamily::Ka), Some(7.112));
        assert_eq!(absorption_edge(&data, "Fe", LineFamily::Ma), None);
        assert_eq!(absorption_edge(&data, "Cu", LineFamily::Ka), None);
    }

    #[test]
    fn efficiency_is_zero_at_and_below_the_edge() {
        let data = iron();
        assert_eq!(excitation_efficiency(&data, "Fe", LineFamily::Ka, 6.0), 0.0);
        assert_eq!(
            excitation_efficiency(&data, "Fe", LineFamily::Ka, 7.112),
            0.0
        );
    }

    #[test]
    fn efficiency_is_positive_and_clamped_above_the_edge() {
        let data = iron();
        let at_10 = excitation_efficiency(&data, "Fe", LineFamily::Ka, 10.0);
        assert!(at_10 > 0.0);
        assert!(at_10 <= 1.0);
        // Near the edge the cross section is large enough to hit the clamp.
        let near_edge = excitation_efficiency(&data, "Fe", LineFamily::Ka, 7.3);
        assert_eq!(near_edge, 1.0);
    }

    #[test]
    fn efficiency_decreases_with_incident_energy_over_the_sampled_range() {
        let data = iron();
        let at_9 = excitation_efficiency(&data, "Fe", LineFamily::Ka, 9.0);
        let at_14 = excitation_efficiency(&data, "Fe", LineFamily::Ka, 14.0);
        assert!(at_9 > at_14);
        assert!(at_14 > 0.0);
    }

    #[test]
    fn lookup_failure_past_the_edge_check_falls_back_to_floor_score() {
        let mut data = TabulatedAtomicData::new();
        // Edge known, but no cross-section or yield data.
        data.insert_element("Fe", 26).insert_edge(26, Shell::K, 7.112);
        assert_eq!(
            excitation_efficiency(&data, "Fe", LineFamily::Ka, 10.0),
            0.01
        );
    }

    #[test]
    fn unsupported_family_scores_zero_not_fallback() {
        let data = iron();
        assert_eq!(excitation_efficiency(&data, "Fe", LineFamily::Mb, 10.0), 0.0);
    }
}
