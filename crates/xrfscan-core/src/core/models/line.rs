use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Identifies a single raw emission transition queried from the atomic-data provider.
///
/// The set is fixed: these are the transitions the line database considers when
/// assembling combined lines for an element. Each transition belongs to exactly
/// one [`LineFamily`], which determines the shell used for absorption-edge and
/// cross-section lookups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Transition {
    Ka1,
    Ka2,
    Kb1,
    Kb3,
    La1,
    La2,
    Lb1,
    Lb2,
    Lb3,
    Lb4,
    Ma1,
    Ma2,
    Mb,
}

impl Transition {
    /// The family this transition reports into when lines are merged.
    pub fn family(self) -> LineFamily {
        match self {
            Transition::Ka1 | Transition::Ka2 => LineFamily::Ka,
            Transition::Kb1 | Transition::Kb3 => LineFamily::Kb,
            Transition::La1 | Transition::La2 => LineFamily::La,
            Transition::Lb1 | Transition::Lb2 | Transition::Lb3 | Transition::Lb4 => LineFamily::Lb,
            Transition::Ma1 | Transition::Ma2 => LineFamily::Ma,
            Transition::Mb => LineFamily::Mb,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Transition::Ka1 => "Ka1",
            Transition::Ka2 => "Ka2",
            Transition::Kb1 => "Kb1",
            Transition::Kb3 => "Kb3",
            Transition::La1 => "La1",
            Transition::La2 => "La2",
            Transition::Lb1 => "Lb1",
            Transition::Lb2 => "Lb2",
            Transition::Lb3 => "Lb3",
            Transition::Lb4 => "Lb4",
            Transition::Ma1 => "Ma1",
            Transition::Ma2 => "Ma2",
            Transition::Mb => "Mb",
        }
    }
}

impl fmt::Display for Transition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Transition {
    type Err = UnknownTransition;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "Ka1" => Ok(Transition::Ka1),
            "Ka2" => Ok(Transition::Ka2),
            "Kb1" => Ok(Transition::Kb1),
            "Kb3" => Ok(Transition::Kb3),
            "La1" => Ok(Transition::La1),
            "La2" => Ok(Transition::La2),
            "Lb1" => Ok(Transition::Lb1),
            "Lb2" => Ok(Transition::Lb2),
            "Lb3" => Ok(Transition::Lb3),
            "Lb4" => Ok(Transition::Lb4),
            "Ma1" => Ok(Transition::Ma1),
            "Ma2" => Ok(Transition::Ma2),
            "Mb" => Ok(Transition::Mb),
            other => Err(UnknownTransition(other.to_string())),
        }
    }
}

/// Error returned when parsing an unrecognized transition label.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown transition label '{0}'")]
pub struct UnknownTransition(pub String);

/// The emission-line family a combined line is reported under.
///
/// Families group transitions that a detector of typical energy resolution cannot
/// separate (e.g. Ka1/Ka2). When a merged group spans several families the reported
/// family is chosen by the fixed priority Ka > Kb > La > Lb > Ma > Mb; `Other`
/// (displayed as `"X"`) is the fallback and should not occur for the built-in
/// transition set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LineFamily {
    Ka,
    Kb,
    La,
    Lb,
    Ma,
    Mb,
    Other,
}

/// Merge priority, highest first.
const FAMILY_PRIORITY: [LineFamily; 6] = [
    LineFamily::Ka,
    LineFamily::Kb,
    LineFamily::La,
    LineFamily::Lb,
    LineFamily::Ma,
    LineFamily::Mb,
];

impl LineFamily {
    pub fn label(self) -> &'static str {
        match self {
            LineFamily::Ka => "Ka",
            LineFamily::Kb => "Kb",
            LineFamily::La => "La",
            LineFamily::Lb => "Lb",
            LineFamily::Ma => "Ma",
            LineFamily::Mb => "Mb",
            LineFamily::Other => "X",
        }
    }

    /// Picks the reported family for a merged group of raw lines.
    pub fn merged(families: &[LineFamily]) -> LineFamily {
        for priority in FAMILY_PRIORITY {
            if families.contains(&priority) {
                return priority;
            }
        }
        LineFamily::Other
    }
}

impl fmt::Display for LineFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A single raw emission transition as reported by the atomic-data provider.
///
/// Only transitions with positive energy and positive radiative yield are kept;
/// the line database drops everything else before grouping.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RawLine {
    pub transition: Transition,
    /// Emission energy in keV. Always positive.
    pub energy_kev: f64,
    /// Radiative transition probability. Always positive.
    pub radiative_yield: f64,
}

/// An emission feature as a detector of finite resolution observes it: one or more
/// raw transitions merged into a single line.
///
/// Element and family are stored as first-class fields from construction; display
/// strings are rendered on demand and never parsed back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CombinedLine {
    /// Element symbol, e.g. `"Fe"`.
    pub element: String,
    pub family: LineFamily,
    /// Yield-weighted mean energy of the merged transitions, in keV.
    pub energy_kev: f64,
    /// Summed radiative yield of the merged transitions.
    pub total_yield: f64,
}

impl CombinedLine {
    /// Renders the conventional `"<Element> <Family>"` label, e.g. `"Fe Ka"`.
    pub fn display_name(&self) -> String {
        format!("{} {}", self.element, self.family)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_transition_maps_to_its_family() {
        assert_eq!(Transition::Ka1.family(), LineFamily::Ka);
        assert_eq!(Transition::Ka2.family(), LineFamily::Ka);
        assert_eq!(Transition::Kb3.family(), LineFamily::Kb);
        assert_eq!(Transition::La2.family(), LineFamily::La);
        assert_eq!(Transition::Lb4.family(), LineFamily::Lb);
        assert_eq!(Transition::Ma2.family(), LineFamily::Ma);
        assert_eq!(Transition::Mb.family(), LineFamily::Mb);
    }

    #[test]
    fn transition_labels_round_trip_through_from_str() {
        for transition in [
            Transition::Ka1,
            Transition::Ka2,
            Transition::Kb1,
            Transition::Kb3,
            Transition::La1,
            Transition::La2,
            Transition::Lb1,
            Transition::Lb2,
            Transition::Lb3,
            Transition::Lb4,
            Transition::Ma1,
            Transition::Ma2,
            Transition::Mb,
        ] {
            assert_eq!(transition.label().parse::<Transition>(), Ok(transition));
        }
    }

    #[test]
    fn from_str_trims_whitespace_and_rejects_unknown_labels() {
        assert_eq!(" Ka1 ".parse::<Transition>(), Ok(Transition::Ka1));
        assert!("Kc9".parse::<Transition>().is_err());
        assert!("".parse::<Transition>().is_err());
    }

    #[test]
    fn merged_family_follows_priority_order() {
        assert_eq!(
            LineFamily::merged(&[LineFamily::Kb, LineFamily::Ka]),
            LineFamily::Ka
        );
        assert_eq!(
            LineFamily::merged(&[LineFamily::Lb, LineFamily::La]),
            LineFamily::La
        );
        assert_eq!(
            LineFamily::merged(&[LineFamily::Mb, LineFamily::Ma]),
            LineFamily::Ma
        );
        assert_eq!(LineFamily::merged(&[]), LineFamily::Other);
    }

    #[test]
    fn combined_line_display_name_joins_element_and_family() {
        let line = CombinedLine {
            element: "Fe".to_string(),
            family: LineFamily::Ka,
            energy_kev: 6.4,
            total_yield: 0.88,
        };
        assert_eq!(line.display_name(), "Fe Ka");
        assert_eq!(LineFamily::Other.to_string(), "X");
    }
}
