use serde::Serialize;

use lecylindre_core::models::{Color, Dozen, Parity, Pocket};

/// Série en cours sur un axe : valeur répétée et longueur.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Streak<T> {
    pub value: Option<T>,
    pub count: u32,
}

impl<T: Copy + PartialEq> Streak<T> {
    pub fn baseline() -> Self {
        Self { value: None, count: 0 }
    }

    /// `None` (un zéro) remet la série à zéro.
    pub fn advance(&mut self, value: Option<T>) {
        match value {
            None => *self = Self::baseline(),
            Some(v) if self.value == Some(v) => self.count += 1,
            Some(v) => {
                self.value = Some(v);
                self.count = 1;
            }
        }
    }
}

impl<T: Copy + PartialEq> Default for Streak<T> {
    fn default() -> Self {
        Self::baseline()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct StreakState {
    pub color: Streak<Color>,
    pub parity: Streak<Parity>,
    pub dozen: Streak<Dozen>,
}

impl StreakState {
    pub fn record(&mut self, pocket: Pocket) {
        let color = match pocket.color() {
            Color::Green => None,
            c => Some(c),
        };
        self.color.advance(color);
        self.parity.advance(pocket.parity());
        self.dozen.advance(pocket.dozen());
    }

    pub fn from_history(history: &[Pocket]) -> Self {
        let mut state = Self::default();
        for &pocket in history {
            state.record(pocket);
        }
        state
    }
}
