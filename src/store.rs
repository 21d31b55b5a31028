//! Phase, score and mute storage
//!
//! The simulation reads these at the start of a frame and requests changes;
//! the store owns the committed values.

use serde::{Deserialize, Serialize};

use crate::sim::GamePhase;

/// Read/commit access to the shared game flags
pub trait PhaseStore {
    fn phase(&self) -> GamePhase;
    fn set_phase(&mut self, phase: GamePhase);

    fn score(&self) -> u32;
    fn add_score(&mut self, points: u32);
    fn reset_score(&mut self);

    fn is_muted(&self) -> bool;
    /// Flip the mute flag, returning the new value
    fn toggle_mute(&mut self) -> bool;
}

/// Plain in-memory store
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameStore {
    pub phase: GamePhase,
    pub score: u32,
    pub muted: bool,
}

impl GameStore {
    pub fn with_phase(phase: GamePhase) -> Self {
        Self {
            phase,
            ..Default::default()
        }
    }
}

impl PhaseStore for GameStore {
    fn phase(&self) -> GamePhase {
        self.phase
    }

    fn set_phase(&mut self, phase: GamePhase) {
        self.phase = phase;
    }

    fn score(&self) -> u32 {
        self.score
    }

    fn add_score(&mut self, points: u32) {
        self.score = self.score.saturating_add(points);
    }

    fn reset_score(&mut self) {
        self.score = 0;
    }

    fn is_muted(&self) -> bool {
        self.muted
    }

    fn toggle_mute(&mut self) -> bool {
        self.muted = !self.muted;
        self.muted
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_score_saturates() {
        let mut store = GameStore::default();
        store.add_score(u32::MAX - 5);
        store.add_score(10);
        assert_eq!(store.score(), u32::MAX);
        store.reset_score();
        assert_eq!(store.score(), 0);
    }

    #[test]
    fn test_toggle_mute() {
        let mut store = GameStore::default();
        assert!(store.toggle_mute());
        assert!(store.is_muted());
        assert!(!store.toggle_mute());
    }
}
