use anyhow::{Result, bail};

use lecylindre_core::config::SessionConfig;
use lecylindre_core::ledger::{SpinLedger, WindowTally};
use lecylindre_core::models::{Pocket, STREET_COUNT, Street, Variant};

use crate::advisor::{Aggregates, Recommendation, advisor_for};
use crate::aggregate::distribution::{BasicStats, DozenStats, OutcomeTotals};
use crate::aggregate::hot_cold::{PocketStat, classify_hot_cold};
use crate::aggregate::streak::StreakState;
use crate::aggregate::streets::{StreetAnalysis, street_commentary};

/// Un compteur par index de case, 00 occupant l'index 37.
const COUNTER_SLOTS: usize = 38;

/// État d'une session de suivi : historique et agrégats tenus à jour à chaque tirage.
///
/// Tous les compteurs sont incrémentaux ; leurs valeurs sont identiques à une
/// relecture complète de l'historique.
#[derive(Debug, Clone)]
pub struct Session {
    config: SessionConfig,
    ledger: SpinLedger,
    counts: [u32; COUNTER_SLOTS],
    totals: OutcomeTotals,
    dozens: DozenStats,
    streets: [u32; STREET_COUNT],
    streaks: StreakState,
    short_window: WindowTally,
    long_window: WindowTally,
}

impl Session {
    pub fn new(config: SessionConfig) -> Result<Self> {
        config.thresholds.validate()?;
        let short_window = WindowTally::new(config.thresholds.short_window);
        let long_window = WindowTally::new(config.thresholds.long_window);
        Ok(Self {
            config,
            ledger: SpinLedger::new(),
            counts: [0; COUNTER_SLOTS],
            totals: OutcomeTotals::default(),
            dozens: DozenStats::default(),
            streets: [0; STREET_COUNT],
            streaks: StreakState::default(),
            short_window,
            long_window,
        })
    }

    /// Rejoue une suite de tirages dans une session neuve.
    pub fn replay(config: SessionConfig, pockets: impl IntoIterator<Item = Pocket>) -> Result<Self> {
        let mut session = Self::new(config)?;
        for pocket in pockets {
            session.record_spin(pocket)?;
        }
        Ok(session)
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn variant(&self) -> Variant {
        self.config.variant
    }

    pub fn total_spins(&self) -> usize {
        self.ledger.len()
    }

    pub fn history(&self) -> &[Pocket] {
        self.ledger.as_slice()
    }

    /// Les `n` derniers tirages, le plus récent en premier.
    pub fn recent_spins(&self, n: usize) -> Vec<Pocket> {
        self.ledger.last_n(n).iter().rev().copied().collect()
    }

    pub fn record_spin(&mut self, pocket: Pocket) -> Result<()> {
        if !self.config.variant.contains(pocket) {
            bail!(
                "Case '{}' absente de la roulette {}",
                pocket,
                self.config.variant
            );
        }

        self.ledger.push(pocket);
        self.counts[pocket.index()] += 1;
        self.totals.record(pocket);
        self.dozens.record(pocket);
        if let Some(street) = pocket.street() {
            self.streets[street.index()] += 1;
        }
        self.streaks.record(pocket);
        self.short_window.push(pocket);
        self.long_window.push(pocket);

        log::debug!(
            "Tirage {} enregistré ({}), total {}",
            pocket,
            pocket.color(),
            self.ledger.len()
        );
        Ok(())
    }

    /// Valide une étiquette de case pour la table active puis l'enregistre.
    pub fn record_label(&mut self, label: &str) -> Result<Pocket> {
        let pocket = self.config.variant.parse_pocket(label)?;
        self.record_spin(pocket)?;
        Ok(pocket)
    }

    pub fn reset(&mut self) {
        let spins = self.ledger.len();
        self.ledger.clear();
        self.counts = [0; COUNTER_SLOTS];
        self.totals = OutcomeTotals::default();
        self.dozens = DozenStats::default();
        self.streets = [0; STREET_COUNT];
        self.streaks = StreakState::default();
        self.short_window.clear();
        self.long_window.clear();
        log::info!("Session réinitialisée ({} tirages effacés)", spins);
    }

    pub fn pocket_count(&self, pocket: Pocket) -> u32 {
        if self.config.variant.contains(pocket) {
            self.counts[pocket.index()]
        } else {
            0
        }
    }

    pub fn basic_stats(&self) -> BasicStats {
        self.totals.percentages()
    }

    pub fn streaks(&self) -> StreakState {
        self.streaks
    }

    pub fn dozen_stats(&self) -> DozenStats {
        self.dozens
    }

    /// Sorties cumulées par transversale depuis le début de la session.
    /// `None` sur une table sans analyse par transversales.
    pub fn street_totals(&self) -> Option<Vec<(Street, u32)>> {
        if !self.config.variant.has_streets() {
            return None;
        }
        Some(Street::all().map(|s| (s, self.streets[s.index()])).collect())
    }

    /// Compteurs et classement chaud/froid, dans l'ordre du tableau.
    pub fn hot_cold(&self) -> Vec<PocketStat> {
        let counts: Vec<(Pocket, u32)> = self
            .config
            .variant
            .pockets()
            .into_iter()
            .map(|p| (p, self.counts[p.index()]))
            .collect();
        classify_hot_cold(
            &counts,
            self.total_spins(),
            self.config.variant.pocket_count(),
            &self.config.thresholds,
        )
    }

    /// `None` sur une table sans analyse par transversales.
    pub fn analyze_streets(&self) -> Option<StreetAnalysis> {
        if !self.config.variant.has_streets() {
            return None;
        }
        Some(StreetAnalysis::from_windows(&self.short_window, &self.long_window))
    }

    pub fn street_commentary(&self) -> Option<String> {
        let analysis = self.analyze_streets()?;
        Some(street_commentary(
            &analysis,
            self.total_spins(),
            self.config.thresholds.street_min_spins,
        ))
    }

    pub fn aggregates(&self) -> Aggregates {
        Aggregates {
            total_spins: self.total_spins(),
            streaks: self.streaks,
            recent: self.long_window.clone(),
            pockets: self.hot_cold(),
            streets: self.analyze_streets(),
        }
    }

    pub fn recommend(&self) -> Recommendation {
        let advisor = advisor_for(&self.config);
        let recommendation = advisor.recommend(&self.aggregates());
        log::debug!(
            "Conseil {} : {} (confiance {})",
            advisor.name(),
            recommendation.decision,
            recommendation.confidence
        );
        recommendation
    }
}
