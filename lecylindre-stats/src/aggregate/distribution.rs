use serde::Serialize;

use lecylindre_core::models::{Color, Dozen, Half, Parity, Pocket};

use super::percentage;

/// Répartition en pourcentages (une décimale) sur l'historique complet.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct BasicStats {
    pub red: f64,
    pub black: f64,
    pub green: f64,
    pub odd: f64,
    pub even: f64,
    pub low: f64,
    pub high: f64,
}

/// Compteurs bruts derrière `BasicStats`, tenus à jour tirage par tirage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct OutcomeTotals {
    pub total: usize,
    pub red: u32,
    pub black: u32,
    pub green: u32,
    pub odd: u32,
    pub even: u32,
    pub low: u32,
    pub high: u32,
}

impl OutcomeTotals {
    pub fn record(&mut self, pocket: Pocket) {
        self.total += 1;
        match pocket.color() {
            Color::Red => self.red += 1,
            Color::Black => self.black += 1,
            Color::Green => self.green += 1,
        }
        match pocket.parity() {
            Some(Parity::Odd) => self.odd += 1,
            Some(Parity::Even) => self.even += 1,
            None => {}
        }
        match pocket.half() {
            Some(Half::Low) => self.low += 1,
            Some(Half::High) => self.high += 1,
            None => {}
        }
    }

    pub fn percentages(&self) -> BasicStats {
        BasicStats {
            red: percentage(self.red, self.total),
            black: percentage(self.black, self.total),
            green: percentage(self.green, self.total),
            odd: percentage(self.odd, self.total),
            even: percentage(self.even, self.total),
            low: percentage(self.low, self.total),
            high: percentage(self.high, self.total),
        }
    }
}

pub fn compute_basic_stats(history: &[Pocket]) -> BasicStats {
    let mut totals = OutcomeTotals::default();
    for &pocket in history {
        totals.record(pocket);
    }
    totals.percentages()
}

/// Nombre de sorties par douzaine depuis le début de la session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct DozenStats {
    pub first: u32,
    pub second: u32,
    pub third: u32,
    pub zero: u32,
}

impl DozenStats {
    pub fn record(&mut self, pocket: Pocket) {
        match pocket.dozen() {
            Some(Dozen::First) => self.first += 1,
            Some(Dozen::Second) => self.second += 1,
            Some(Dozen::Third) => self.third += 1,
            None => self.zero += 1,
        }
    }

    pub fn get(&self, dozen: Dozen) -> u32 {
        match dozen {
            Dozen::First => self.first,
            Dozen::Second => self.second,
            Dozen::Third => self.third,
        }
    }

    pub fn total(&self) -> u32 {
        self.first + self.second + self.third + self.zero
    }
}
