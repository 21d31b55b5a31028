//! Scripted cutscene after a successful run
//!
//! Pure motion, no physics: the player walks to mid-screen, the executive
//! walks in from the right, and they meet for the handshake.

use super::state::{CutscenePhase, SimulationState};
use crate::consts::*;

/// Player's left edge when standing at mid-screen
pub const PLAYER_MARK_X: f32 = CANVAS_WIDTH / 2.0 - PLAYER_WIDTH / 2.0;

/// Advance the choreography by `dt` seconds
///
/// Returns true on the tick the handshake begins.
pub fn advance(state: &mut SimulationState, dt: f32) -> bool {
    match state.cutscene_phase {
        CutscenePhase::Inactive | CutscenePhase::Handshake => false,
        CutscenePhase::PlayerWalk => {
            let rect = &mut state.player.rect;
            rect.x += CUTSCENE_PLAYER_SPEED * dt;
            if rect.x >= PLAYER_MARK_X {
                rect.x = PLAYER_MARK_X;
                state.cutscene_phase = CutscenePhase::ExecutiveWalk;
                log::info!("Cutscene: player in position");
            }
            false
        }
        CutscenePhase::ExecutiveWalk => {
            state.executive_x -= EXECUTIVE_SPEED * dt;
            let gap = state.executive_x - state.player.rect.right();
            if gap <= HANDSHAKE_DISTANCE {
                state.executive_x = state.player.rect.right() + HANDSHAKE_DISTANCE;
                state.cutscene_phase = CutscenePhase::Handshake;
                log::info!("Cutscene: handshake");
                return true;
            }
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_choreography() {
        let mut state = SimulationState::new();
        state.cutscene_phase = CutscenePhase::PlayerWalk;

        let mut handshakes = 0;
        for _ in 0..2000 {
            if advance(&mut state, 0.016) {
                handshakes += 1;
            }
        }

        assert_eq!(handshakes, 1);
        assert_eq!(state.cutscene_phase, CutscenePhase::Handshake);
        assert_eq!(state.player.rect.x, PLAYER_MARK_X);
        assert_eq!(
            state.executive_x - state.player.rect.right(),
            HANDSHAKE_DISTANCE
        );
    }

    #[test]
    fn test_executive_waits_for_player() {
        let mut state = SimulationState::new();
        state.cutscene_phase = CutscenePhase::PlayerWalk;
        advance(&mut state, 0.5);
        assert_eq!(state.cutscene_phase, CutscenePhase::PlayerWalk);
        assert_eq!(state.executive_x, EXECUTIVE_START_X);
    }

    #[test]
    fn test_inactive_is_noop() {
        let mut state = SimulationState::new();
        let before = state.clone();
        assert!(!advance(&mut state, 1.0));
        assert_eq!(state, before);
    }
}
