use serde::Serialize;

use lecylindre_core::config::{SessionConfig, Thresholds};
use lecylindre_core::ledger::WindowTally;
use lecylindre_core::models::{Color, Dozen, Pocket, Street, Variant};

use crate::aggregate::hot_cold::PocketStat;
use crate::aggregate::streak::StreakState;
use crate::aggregate::streets::StreetAnalysis;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Confidence {
    Low,
    LowToMedium,
    Medium,
    MediumToHigh,
    High,
}

impl std::fmt::Display for Confidence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Confidence::Low => write!(f, "Faible"),
            Confidence::LowToMedium => write!(f, "Faible à moyenne"),
            Confidence::Medium => write!(f, "Moyenne"),
            Confidence::MediumToHigh => write!(f, "Moyenne à élevée"),
            Confidence::High => write!(f, "Élevée"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Decision {
    NeedMoreData { required: usize },
    BetStreets { streets: Vec<Street> },
    BetColor { color: Color },
    BetDozen { dozen: Dozen },
    WatchNumbers { pockets: Vec<Pocket> },
    NoRecommendation,
}

impl std::fmt::Display for Decision {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Decision::NeedMoreData { required } => {
                write!(f, "En attente de données ({} tirages minimum)", required)
            }
            Decision::BetStreets { streets } => {
                let list = streets
                    .iter()
                    .map(|s| s.number().to_string())
                    .collect::<Vec<_>>()
                    .join(", ");
                write!(f, "Miser sur les transversales : {}", list)
            }
            Decision::BetColor { color } => write!(f, "Miser sur {}", color),
            Decision::BetDozen { dozen } => write!(f, "Miser sur la {}", dozen),
            Decision::WatchNumbers { pockets } => {
                let list = pockets
                    .iter()
                    .map(|p| p.to_string())
                    .collect::<Vec<_>>()
                    .join(", ");
                write!(f, "Numéros froids à surveiller : {}", list)
            }
            Decision::NoRecommendation => write!(f, "Pas de recommandation forte"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Recommendation {
    pub decision: Decision,
    pub confidence: Confidence,
    pub reason: Option<String>,
}

impl Recommendation {
    fn new(decision: Decision, confidence: Confidence, reason: impl Into<String>) -> Self {
        Self {
            decision,
            confidence,
            reason: Some(reason.into()),
        }
    }

    pub fn need_more_data(required: usize) -> Self {
        Self {
            decision: Decision::NeedMoreData { required },
            confidence: Confidence::Low,
            reason: None,
        }
    }

    pub fn is_waiting(&self) -> bool {
        matches!(self.decision, Decision::NeedMoreData { .. })
    }
}

/// Instantané des agrégats consulté par un conseiller.
#[derive(Debug, Clone)]
pub struct Aggregates {
    pub total_spins: usize,
    pub streaks: StreakState,
    pub recent: WindowTally,
    pub pockets: Vec<PocketStat>,
    pub streets: Option<StreetAnalysis>,
}

pub trait Advisor {
    fn name(&self) -> &str;
    /// Parcourt les règles dans l'ordre et retient la première qui s'applique.
    fn recommend(&self, aggregates: &Aggregates) -> Recommendation;
}

pub struct StreetAdvisor {
    thresholds: Thresholds,
}

impl StreetAdvisor {
    pub fn new(thresholds: Thresholds) -> Self {
        Self { thresholds }
    }
}

impl Advisor for StreetAdvisor {
    fn name(&self) -> &str {
        "Transversales"
    }

    fn recommend(&self, aggregates: &Aggregates) -> Recommendation {
        let t = &self.thresholds;
        if aggregates.total_spins < t.street_min_spins {
            return Recommendation::need_more_data(t.street_min_spins);
        }
        let Some(analysis) = &aggregates.streets else {
            return Recommendation::new(
                Decision::NoRecommendation,
                Confidence::Low,
                "Analyse des transversales indisponible pour cette table",
            );
        };

        if !analysis.absent_from_long.is_empty() {
            let streets = analysis
                .absent_from_long
                .iter()
                .take(t.street_picks_absent_long)
                .map(|s| s.street)
                .collect();
            return Recommendation::new(
                Decision::BetStreets { streets },
                Confidence::Medium,
                format!(
                    "Ces transversales ne sont pas sorties sur les {} derniers tirages",
                    analysis.long_window
                ),
            );
        }

        if !analysis.absent_from_short.is_empty() {
            let streets = analysis
                .absent_from_short
                .iter()
                .take(t.street_picks_absent_short)
                .map(|s| s.street)
                .collect();
            return Recommendation::new(
                Decision::BetStreets { streets },
                Confidence::LowToMedium,
                format!(
                    "Ces transversales ne sont pas sorties sur les {} derniers tirages",
                    analysis.short_window
                ),
            );
        }

        Recommendation::new(
            Decision::NoRecommendation,
            Confidence::Low,
            "Toutes les transversales sont sorties récemment",
        )
    }
}

pub struct PatternAdvisor {
    thresholds: Thresholds,
}

impl PatternAdvisor {
    pub fn new(thresholds: Thresholds) -> Self {
        Self { thresholds }
    }

    fn color_streak(&self, aggregates: &Aggregates) -> Option<Recommendation> {
        let streak = aggregates.streaks.color;
        let color = streak.value?;
        if streak.count < self.thresholds.color_streak_trigger {
            return None;
        }
        Some(Recommendation::new(
            Decision::BetColor { color: color.opposite() },
            Confidence::MediumToHigh,
            format!("{} est sorti {} fois de suite", color, streak.count),
        ))
    }

    fn dozen_imbalance(&self, aggregates: &Aggregates) -> Option<Recommendation> {
        let recent = &aggregates.recent;
        let heavy = Dozen::ALL
            .into_iter()
            .find(|&d| recent.dozen_count(d) >= self.thresholds.dozen_heavy)?;
        let light = Dozen::ALL
            .into_iter()
            .filter(|&d| d != heavy && recent.dozen_count(d) <= self.thresholds.dozen_light)
            .min_by_key(|&d| recent.dozen_count(d))?;
        Some(Recommendation::new(
            Decision::BetDozen { dozen: light },
            Confidence::Medium,
            format!(
                "La {} est sortie {} fois sur les {} derniers tirages, la {} seulement {} fois",
                heavy,
                recent.dozen_count(heavy),
                recent.len(),
                light,
                recent.dozen_count(light)
            ),
        ))
    }

    fn color_dominance(&self, aggregates: &Aggregates) -> Option<Recommendation> {
        let recent = &aggregates.recent;
        let dominant = [Color::Red, Color::Black]
            .into_iter()
            .find(|&c| recent.color_count(c) >= self.thresholds.color_dominance)?;
        Some(Recommendation::new(
            Decision::BetColor { color: dominant.opposite() },
            Confidence::Medium,
            format!(
                "{} est sorti {} fois sur les {} derniers tirages",
                dominant,
                recent.color_count(dominant),
                recent.len()
            ),
        ))
    }

    fn cold_numbers(&self, aggregates: &Aggregates) -> Option<Recommendation> {
        let pockets: Vec<Pocket> = aggregates
            .pockets
            .iter()
            .filter(|s| s.is_cold())
            .take(self.thresholds.cold_picks)
            .map(|s| s.pocket)
            .collect();
        if pockets.is_empty() {
            return None;
        }
        Some(Recommendation::new(
            Decision::WatchNumbers { pockets },
            Confidence::LowToMedium,
            "Ces numéros sortent nettement moins que leur fréquence attendue",
        ))
    }
}

impl Advisor for PatternAdvisor {
    fn name(&self) -> &str {
        "Motifs"
    }

    fn recommend(&self, aggregates: &Aggregates) -> Recommendation {
        if aggregates.total_spins < self.thresholds.pattern_min_spins {
            return Recommendation::need_more_data(self.thresholds.pattern_min_spins);
        }
        self.color_streak(aggregates)
            .or_else(|| self.dozen_imbalance(aggregates))
            .or_else(|| self.color_dominance(aggregates))
            .or_else(|| self.cold_numbers(aggregates))
            .unwrap_or_else(|| {
                Recommendation::new(
                    Decision::NoRecommendation,
                    Confidence::Low,
                    "Aucun motif marqué dans les derniers tirages",
                )
            })
    }
}

pub fn advisor_for(config: &SessionConfig) -> Box<dyn Advisor> {
    match config.variant {
        Variant::European => Box::new(StreetAdvisor::new(config.thresholds.clone())),
        Variant::American => Box::new(PatternAdvisor::new(config.thresholds.clone())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::Session;

    fn session(variant: Variant, numbers: &[u8]) -> Session {
        let mut session = Session::new(SessionConfig::new(variant)).unwrap();
        for &n in numbers {
            let pocket = Pocket::from_number(n).unwrap();
            session.record_spin(pocket).unwrap();
        }
        session
    }

    #[test]
    fn test_confidence_order() {
        assert!(Confidence::Low < Confidence::LowToMedium);
        assert!(Confidence::LowToMedium < Confidence::Medium);
        assert!(Confidence::Medium < Confidence::MediumToHigh);
        assert!(Confidence::MediumToHigh < Confidence::High);
    }

    #[test]
    fn test_street_advisor_waits_below_twelve() {
        for n in 0..12 {
            let numbers: Vec<u8> = (1..=n as u8).collect();
            let rec = session(Variant::European, &numbers).recommend();
            assert_eq!(rec.decision, Decision::NeedMoreData { required: 12 });
            assert_eq!(rec.confidence, Confidence::Low);
        }
    }

    #[test]
    fn test_street_advisor_absent_long() {
        // Transversales 1 à 4 absentes, seules les trois premières sont proposées
        let numbers = [13, 16, 19, 22, 25, 28, 31, 34, 13, 16, 19, 22];
        let rec = session(Variant::European, &numbers).recommend();
        let expected: Vec<Street> = (1..=3).map(|n| Street::new(n).unwrap()).collect();
        assert_eq!(rec.decision, Decision::BetStreets { streets: expected });
        assert_eq!(rec.confidence, Confidence::Medium);
        assert!(rec.reason.is_some());
    }

    #[test]
    fn test_street_advisor_absent_short() {
        // Chaque transversale sort une fois ; 1 et 2 seulement dans les deux plus anciens
        let numbers = [1, 4, 7, 10, 13, 16, 19, 22, 25, 28, 31, 34];
        let rec = session(Variant::European, &numbers).recommend();
        let expected: Vec<Street> = (1..=2).map(|n| Street::new(n).unwrap()).collect();
        assert_eq!(rec.decision, Decision::BetStreets { streets: expected });
        assert_eq!(rec.confidence, Confidence::LowToMedium);
    }

    #[test]
    fn test_street_advisor_nothing_strong() {
        // Avec une fenêtre courte de 10, au moins deux transversales manquent toujours :
        // il faut élargir la fenêtre courte pour atteindre ce cas
        let config = SessionConfig {
            variant: Variant::European,
            thresholds: Thresholds {
                short_window: 12,
                ..Thresholds::default()
            },
        };
        let mut session = Session::new(config).unwrap();
        for n in [1, 4, 7, 10, 13, 16, 19, 22, 25, 28, 31, 34] {
            session.record_spin(Pocket::from_number(n).unwrap()).unwrap();
        }
        let rec = session.recommend();
        assert_eq!(rec.decision, Decision::NoRecommendation);
        assert_eq!(rec.confidence, Confidence::Low);
    }

    #[test]
    fn test_pattern_advisor_waits_below_twenty() {
        let numbers: Vec<u8> = (1..=19).collect();
        let rec = session(Variant::American, &numbers).recommend();
        assert!(rec.is_waiting());
        assert_eq!(rec.decision, Decision::NeedMoreData { required: 20 });
        assert_eq!(rec.confidence, Confidence::Low);
    }

    #[test]
    fn test_pattern_advisor_color_streak() {
        // Rouge/noir alternés puis une série de six rouges
        let mut numbers: Vec<u8> = [1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 12, 11, 14, 13, 16].to_vec();
        numbers.extend([19, 21, 23, 25, 27]);
        let rec = session(Variant::American, &numbers).recommend();
        assert_eq!(rec.decision, Decision::BetColor { color: Color::Black });
        assert_eq!(rec.confidence, Confidence::MediumToHigh);
    }

    #[test]
    fn test_pattern_advisor_dozen_imbalance() {
        // 12 derniers : 7 en 1re douzaine, 4 en 2e, 1 en 3e ; couleurs alternées
        let mut numbers: Vec<u8> = vec![0; 8];
        numbers.extend([1, 2, 3, 4, 5, 6, 7, 13, 14, 15, 20, 25]);
        let rec = session(Variant::American, &numbers).recommend();
        assert_eq!(rec.decision, Decision::BetDozen { dozen: Dozen::Third });
        assert_eq!(rec.confidence, Confidence::Medium);
    }

    #[test]
    fn test_pattern_advisor_color_dominance() {
        // 9 noirs sur les 12 derniers, jamais 5 de suite, douzaines équilibrées
        let mut numbers: Vec<u8> = vec![0; 8];
        numbers.extend([2, 4, 6, 1, 15, 17, 3, 20, 22, 19, 26, 28]);
        let rec = session(Variant::American, &numbers).recommend();
        assert_eq!(rec.decision, Decision::BetColor { color: Color::Red });
        assert_eq!(rec.confidence, Confidence::Medium);
    }

    #[test]
    fn test_pattern_advisor_cold_numbers() {
        // 12 derniers équilibrés (4 par douzaine, 6 rouges, 6 noirs) ; 0, 00 et 17 jamais sortis
        let mut numbers: Vec<u8> = (1..=8).collect();
        numbers.extend([13, 25, 9, 14, 26, 10, 15, 27, 11, 16, 28, 12]);
        let rec = session(Variant::American, &numbers).recommend();
        assert_eq!(
            rec.decision,
            Decision::WatchNumbers {
                pockets: vec![Pocket::ZERO, Pocket::DOUBLE_ZERO, Pocket::from_number(17).unwrap()]
            }
        );
        assert_eq!(rec.confidence, Confidence::LowToMedium);
    }

    #[test]
    fn test_pattern_advisor_nothing_strong() {
        let aggregates = Aggregates {
            total_spins: 40,
            streaks: StreakState::default(),
            recent: WindowTally::new(12),
            pockets: Vec::new(),
            streets: None,
        };
        let rec = PatternAdvisor::new(Thresholds::default()).recommend(&aggregates);
        assert_eq!(rec.decision, Decision::NoRecommendation);
        assert_eq!(rec.confidence, Confidence::Low);
    }

    #[test]
    fn test_decision_display() {
        let d = Decision::BetStreets {
            streets: vec![Street::new(2).unwrap(), Street::new(9).unwrap()],
        };
        assert_eq!(d.to_string(), "Miser sur les transversales : 2, 9");
        assert_eq!(Decision::BetColor { color: Color::Red }.to_string(), "Miser sur Rouge");
    }
}
