use std::collections::VecDeque;

use crate::models::{Color, DOZEN_COUNT, Dozen, Pocket, STREET_COUNT, Street};

/// Historique chronologique des tirages : ajout en fin uniquement, vidé par `clear`.
#[derive(Debug, Clone, Default)]
pub struct SpinLedger {
    spins: Vec<Pocket>,
}

impl SpinLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, pocket: Pocket) {
        self.spins.push(pocket);
    }

    pub fn clear(&mut self) {
        self.spins.clear();
    }

    pub fn len(&self) -> usize {
        self.spins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.spins.is_empty()
    }

    pub fn as_slice(&self) -> &[Pocket] {
        &self.spins
    }

    /// Les `n` derniers tirages (moins si l'historique est plus court), du plus ancien au plus récent.
    pub fn last_n(&self, n: usize) -> &[Pocket] {
        let start = self.spins.len().saturating_sub(n);
        &self.spins[start..]
    }
}

/// Fenêtre glissante de taille fixe sur les derniers tirages, avec compteurs
/// par transversale, douzaine et couleur tenus à jour à chaque ajout.
#[derive(Debug, Clone)]
pub struct WindowTally {
    capacity: usize,
    spins: VecDeque<Pocket>,
    streets: [u32; STREET_COUNT],
    dozens: [u32; DOZEN_COUNT],
    red: u32,
    black: u32,
}

impl WindowTally {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            spins: VecDeque::with_capacity(capacity.max(1)),
            streets: [0; STREET_COUNT],
            dozens: [0; DOZEN_COUNT],
            red: 0,
            black: 0,
        }
    }

    /// Reconstruit la fenêtre à partir de la fin d'un historique complet.
    pub fn from_history(history: &[Pocket], capacity: usize) -> Self {
        let mut tally = Self::new(capacity);
        let start = history.len().saturating_sub(tally.capacity);
        for &pocket in &history[start..] {
            tally.push(pocket);
        }
        tally
    }

    pub fn push(&mut self, pocket: Pocket) {
        if self.spins.len() == self.capacity {
            if let Some(evicted) = self.spins.pop_front() {
                self.apply(evicted, false);
            }
        }
        self.spins.push_back(pocket);
        self.apply(pocket, true);
    }

    fn apply(&mut self, pocket: Pocket, add: bool) {
        let bump = |slot: &mut u32| {
            if add {
                *slot += 1;
            } else {
                *slot -= 1;
            }
        };
        if let Some(street) = pocket.street() {
            bump(&mut self.streets[street.index()]);
        }
        if let Some(dozen) = pocket.dozen() {
            bump(&mut self.dozens[dozen.index()]);
        }
        match pocket.color() {
            Color::Red => bump(&mut self.red),
            Color::Black => bump(&mut self.black),
            Color::Green => {}
        }
    }

    pub fn clear(&mut self) {
        *self = Self::new(self.capacity);
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.spins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.spins.is_empty()
    }

    pub fn street_count(&self, street: Street) -> u32 {
        self.streets[street.index()]
    }

    pub fn dozen_count(&self, dozen: Dozen) -> u32 {
        self.dozens[dozen.index()]
    }

    pub fn color_count(&self, color: Color) -> u32 {
        match color {
            Color::Red => self.red,
            Color::Black => self.black,
            Color::Green => self.spins.len() as u32 - self.red - self.black,
        }
    }
}
