use serde::Serialize;

use lecylindre_core::ledger::WindowTally;
use lecylindre_core::models::{Pocket, Street};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StreetStat {
    pub street: Street,
    pub numbers: [u8; 3],
    pub appeared_in_short_window: bool,
    /// Chaque sortie compte, y compris un même numéro sorti plusieurs fois
    pub appearances_in_long_window: u32,
    pub multiple_appearances: bool,
    pub exactly_once: bool,
}

/// Pastille du guide des transversales, par ordre de priorité.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StreetStatus {
    AbsentLong,
    Repeated,
    AbsentShort,
    Normal,
}

impl std::fmt::Display for StreetStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StreetStatus::AbsentLong => write!(f, "ABSENTE (longue)"),
            StreetStatus::Repeated => write!(f, "RÉPÉTÉE"),
            StreetStatus::AbsentShort => write!(f, "ABSENTE (courte)"),
            StreetStatus::Normal => write!(f, "-"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StreetAnalysis {
    pub short_window: usize,
    pub long_window: usize,
    /// Tirages présents dans la fenêtre longue, zéros compris
    pub observed_spins: usize,
    pub absent_from_long: Vec<StreetStat>,
    pub absent_from_short: Vec<StreetStat>,
    pub repeated_in_long: Vec<StreetStat>,
    pub once_in_long: Vec<StreetStat>,
    pub all: Vec<StreetStat>,
}

impl StreetAnalysis {
    /// Construit l'analyse à partir des deux fenêtres glissantes.
    ///
    /// Sans aucun tirage, les partitions restent vides et chaque transversale est neutre.
    pub fn from_windows(short: &WindowTally, long: &WindowTally) -> Self {
        let all: Vec<StreetStat> = Street::all()
            .map(|street| {
                let appearances = long.street_count(street);
                StreetStat {
                    street,
                    numbers: street.numbers(),
                    appeared_in_short_window: short.street_count(street) > 0,
                    appearances_in_long_window: appearances,
                    multiple_appearances: appearances >= 2,
                    exactly_once: appearances == 1,
                }
            })
            .collect();

        let observed_spins = long.len();
        let pick = |keep: fn(&StreetStat) -> bool| -> Vec<StreetStat> {
            if observed_spins == 0 {
                return Vec::new();
            }
            all.iter().filter(|s| keep(s)).copied().collect()
        };

        Self {
            short_window: short.capacity(),
            long_window: long.capacity(),
            observed_spins,
            absent_from_long: pick(|s| s.appearances_in_long_window == 0),
            absent_from_short: pick(|s| !s.appeared_in_short_window),
            repeated_in_long: pick(|s| s.multiple_appearances),
            once_in_long: pick(|s| s.exactly_once),
            all,
        }
    }

    pub fn stat(&self, street: Street) -> &StreetStat {
        &self.all[street.index()]
    }

    pub fn status(&self, street: Street) -> StreetStatus {
        let stat = self.stat(street);
        if self.observed_spins == 0 {
            StreetStatus::Normal
        } else if stat.appearances_in_long_window == 0 {
            StreetStatus::AbsentLong
        } else if stat.multiple_appearances {
            StreetStatus::Repeated
        } else if !stat.appeared_in_short_window {
            StreetStatus::AbsentShort
        } else {
            StreetStatus::Normal
        }
    }
}

/// Analyse complète par relecture de l'historique.
pub fn analyze_streets(history: &[Pocket], short_window: usize, long_window: usize) -> StreetAnalysis {
    let short = WindowTally::from_history(history, short_window);
    let long = WindowTally::from_history(history, long_window);
    StreetAnalysis::from_windows(&short, &long)
}

fn join_streets(streets: &[StreetStat], with_counts: bool) -> String {
    streets
        .iter()
        .map(|s| {
            if with_counts {
                format!("{} - {} fois", s.street, s.appearances_in_long_window)
            } else {
                s.street.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join(", ")
}

/// Commentaire détaillé destiné à la vue complète.
pub fn street_commentary(analysis: &StreetAnalysis, total_spins: usize, min_spins: usize) -> String {
    if total_spins < min_spins {
        return format!(
            "Il faut au moins {} tirages pour une analyse fiable des transversales.",
            min_spins
        );
    }

    let mut parts = Vec::new();
    if !analysis.absent_from_long.is_empty() {
        parts.push(format!(
            "Transversales absentes des {} derniers tirages : {}.",
            analysis.long_window,
            join_streets(&analysis.absent_from_long, false)
        ));
    }
    if !analysis.repeated_in_long.is_empty() {
        parts.push(format!(
            "Transversales sorties plusieurs fois sur les {} derniers tirages, peut-être moins probables à court terme : {}.",
            analysis.long_window,
            join_streets(&analysis.repeated_in_long, true)
        ));
    }

    if parts.is_empty() {
        format!(
            "Aucun motif marqué. Envisagez les transversales absentes des {} derniers tirages.",
            analysis.short_window
        )
    } else {
        parts.join(" ")
    }
}
