//! Game phase state machine
//!
//! ```text
//! StartMenu -> Playing -> Transition -> Cutscene
//!                 |  ^
//!                 v  |
//!               GameOver
//! ```
//!
//! The tick only *requests* transitions. They are validated here and then
//! committed to whichever store owns the canonical phase.

use super::state::{GamePhase, SimulationState};
use crate::store::PhaseStore;

impl GamePhase {
    /// Whether `self -> next` is an edge of the phase graph
    pub fn can_transition_to(self, next: GamePhase) -> bool {
        use GamePhase::*;
        matches!(
            (self, next),
            (StartMenu, Playing)
                | (Playing, Transition)
                | (Playing, GameOver)
                | (Transition, Cutscene)
                | (GameOver, Playing)
        )
    }

    /// Phases in which a jump/interact input starts a fresh run
    pub fn starts_run_on_interact(self) -> bool {
        matches!(self, GamePhase::StartMenu | GamePhase::GameOver)
    }
}

/// Validate a requested transition and commit it to the store
///
/// Returns the committed phase, or None if the request was rejected.
pub fn commit<S: PhaseStore + ?Sized>(store: &mut S, requested: GamePhase) -> Option<GamePhase> {
    let current = store.phase();
    if !current.can_transition_to(requested) {
        log::warn!("Rejected phase change {:?} -> {:?}", current, requested);
        return None;
    }
    store.set_phase(requested);
    log::info!("Phase {:?} -> {:?}", current, requested);
    Some(requested)
}

/// Handle a jump/interact in the menu or after a crash
///
/// Rebuilds the simulation, clears the score and moves to Playing. Returns
/// false (and touches nothing) in any other phase.
pub fn start_run<S: PhaseStore + ?Sized>(state: &mut SimulationState, store: &mut S) -> bool {
    let current = store.phase();
    if !current.starts_run_on_interact() {
        return false;
    }

    state.reset();
    store.reset_score();
    if current == GamePhase::GameOver {
        log::info!("Restarting run");
    } else {
        log::info!("Starting run");
    }
    commit(store, GamePhase::Playing).is_some()
}
