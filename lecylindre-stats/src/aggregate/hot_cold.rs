use serde::Serialize;

use lecylindre_core::config::Thresholds;
use lecylindre_core::models::{Color, Pocket};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Heat {
    Hot,
    Cold,
    Normal,
}

impl std::fmt::Display for Heat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Heat::Hot => write!(f, "CHAUD"),
            Heat::Cold => write!(f, "FROID"),
            Heat::Normal => write!(f, "-"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PocketStat {
    pub pocket: Pocket,
    pub color: Color,
    pub count: u32,
    pub heat: Heat,
}

impl PocketStat {
    pub fn is_hot(&self) -> bool {
        self.heat == Heat::Hot
    }

    pub fn is_cold(&self) -> bool {
        self.heat == Heat::Cold
    }
}

/// Classe chaque case par rapport à sa fréquence attendue `total / pocket_space`.
///
/// La bande neutre vaut `expected * hot_cold_band` de part et d'autre. En dessous
/// de `hot_cold_min_spins` tirages, aucune case n'est classée.
pub fn classify_hot_cold(
    counts: &[(Pocket, u32)],
    total_spins: usize,
    pocket_space: usize,
    thresholds: &Thresholds,
) -> Vec<PocketStat> {
    let classify = total_spins >= thresholds.hot_cold_min_spins && pocket_space > 0;
    let expected = if pocket_space > 0 {
        total_spins as f64 / pocket_space as f64
    } else {
        0.0
    };
    let band = expected * thresholds.hot_cold_band;

    counts
        .iter()
        .map(|&(pocket, count)| {
            let c = count as f64;
            let heat = if !classify {
                Heat::Normal
            } else if c > expected + band {
                Heat::Hot
            } else if c < expected - band {
                Heat::Cold
            } else {
                Heat::Normal
            };
            PocketStat {
                pocket,
                color: pocket.color(),
                count,
                heat,
            }
        })
        .collect()
}
