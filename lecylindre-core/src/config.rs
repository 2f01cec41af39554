use std::path::Path;

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};

use crate::models::Variant;

/// Seuils fixes utilisés par les agrégateurs et le conseiller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Thresholds {
    pub hot_cold_min_spins: usize,
    /// Demi-largeur de la bande neutre, en fraction de la fréquence attendue
    pub hot_cold_band: f64,
    pub short_window: usize,
    pub long_window: usize,
    pub street_min_spins: usize,
    pub street_picks_absent_long: usize,
    pub street_picks_absent_short: usize,
    pub pattern_min_spins: usize,
    pub color_streak_trigger: u32,
    pub dozen_heavy: u32,
    pub dozen_light: u32,
    pub color_dominance: u32,
    pub cold_picks: usize,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            hot_cold_min_spins: 10,
            hot_cold_band: 0.5,
            short_window: 10,
            long_window: 12,
            street_min_spins: 12,
            street_picks_absent_long: 3,
            street_picks_absent_short: 2,
            pattern_min_spins: 20,
            color_streak_trigger: 5,
            dozen_heavy: 6,
            dozen_light: 2,
            color_dominance: 8,
            cold_picks: 3,
        }
    }
}

impl Thresholds {
    pub fn validate(&self) -> Result<()> {
        if self.short_window == 0 || self.long_window == 0 {
            bail!("Les fenêtres d'analyse doivent être non nulles");
        }
        if self.long_window < self.short_window {
            bail!(
                "Fenêtre longue ({}) plus courte que la fenêtre courte ({})",
                self.long_window,
                self.short_window
            );
        }
        if !(self.hot_cold_band > 0.0 && self.hot_cold_band <= 1.0) {
            bail!("Bande chaud/froid {} hors de ]0, 1]", self.hot_cold_band);
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SessionConfig {
    pub variant: Variant,
    #[serde(default)]
    pub thresholds: Thresholds,
}

impl SessionConfig {
    pub fn new(variant: Variant) -> Self {
        Self {
            variant,
            thresholds: Thresholds::default(),
        }
    }

    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Impossible de lire la configuration {:?}", path))?;
        let config: SessionConfig = serde_json::from_str(&json)
            .with_context(|| format!("Configuration invalide dans {:?}", path))?;
        config.thresholds.validate()?;
        Ok(config)
    }
}
