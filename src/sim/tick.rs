//! Per-frame simulation tick
//!
//! Advances the runner by one variable timestep. The tick never commits phase
//! or score changes itself; it reports them in a `TickOutcome` and the caller
//! decides what to apply.

use std::collections::BTreeSet;

use rand::Rng;

use super::collision::collides;
use super::cutscene;
use super::spawner::update_spawner;
use super::state::{CutscenePhase, GamePhase, SimulationState};
use crate::audio::AudioCue;
use crate::consts::*;
use crate::ms_to_secs;

/// Input for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// One-shot jump/interact request (tap, click, key press)
    pub jump: bool,
    /// Currently held key identifiers
    pub held_keys: BTreeSet<String>,
}

impl TickInput {
    /// Input with only a jump request
    pub fn jump() -> Self {
        Self {
            jump: true,
            ..Default::default()
        }
    }

    /// True if a jump was requested or a jump key is held
    pub fn wants_jump(&self) -> bool {
        self.jump || JUMP_KEYS.iter().any(|k| self.held_keys.contains(*k))
    }
}

/// Side effects produced by a tick, for collaborators to apply
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickOutcome {
    /// Points earned this tick
    pub score: u32,
    /// Audio cues in emission order
    pub cues: Vec<AudioCue>,
    /// Requested phase change, if any
    pub phase_request: Option<GamePhase>,
    /// The handshake started this tick
    pub handshake: bool,
}

impl TickOutcome {
    /// Record a phase request. A crash always wins over anything else.
    pub fn request_phase(&mut self, phase: GamePhase) {
        if self.phase_request != Some(GamePhase::GameOver) {
            self.phase_request = Some(phase);
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Advance the simulation by `dt_ms` milliseconds in the given phase
pub fn tick<R: Rng + ?Sized>(
    state: &mut SimulationState,
    phase: GamePhase,
    dt_ms: f32,
    input: &TickInput,
    rng: &mut R,
) -> TickOutcome {
    let mut outcome = TickOutcome::default();

    // Menu and game over freeze the world entirely
    if phase.is_frozen() {
        return outcome;
    }

    let dt = ms_to_secs(dt_ms);
    state.held_keys.clone_from(&input.held_keys);

    // Jump only during gameplay; the cutscene is scripted
    if matches!(phase, GamePhase::Playing | GamePhase::Transition)
        && input.wants_jump()
        && state.player.jump()
    {
        outcome.cues.push(AudioCue::Jump);
    }

    state.player.integrate(dt);

    // Run cycle, frozen mid-frame while airborne
    let walking = state.speed_multiplier > 0.0
        || (phase == GamePhase::Cutscene && state.cutscene_phase == CutscenePhase::PlayerWalk);
    if !state.player.is_jumping && walking {
        state.player.anim.advance(dt_ms, PLAYER_FRAME_MS);
    }

    let scroll = BASE_SPEED * state.speed_multiplier * dt;
    state.background_offset -= scroll;
    if state.background_offset <= -CANVAS_WIDTH {
        state.background_offset = 0.0;
    }

    if phase == GamePhase::Playing {
        let before = state.survival_timer_ms;
        state.survival_timer_ms += dt_ms;
        if before < SURVIVAL_THRESHOLD_MS && state.survival_timer_ms >= SURVIVAL_THRESHOLD_MS {
            log::info!("Survived {:.0}ms", state.survival_timer_ms);
            outcome.request_phase(GamePhase::Transition);
        }
        update_spawner(state, dt_ms, rng);
    }

    update_obstacles(state, phase, dt_ms, scroll, &mut outcome);

    if phase == GamePhase::Transition {
        state.speed_multiplier =
            (state.speed_multiplier - TRANSITION_DECEL_PER_SEC * dt).max(0.0);
        if state.speed_multiplier == 0.0 && state.obstacles.is_empty() {
            if state.cutscene_phase == CutscenePhase::Inactive {
                state.cutscene_phase = CutscenePhase::PlayerWalk;
            }
            // Raised every tick until the store commits it
            if state.cutscene_phase == CutscenePhase::PlayerWalk {
                outcome.request_phase(GamePhase::Cutscene);
            }
        }
    }

    if phase == GamePhase::Cutscene && cutscene::advance(state, dt) {
        outcome.handshake = true;
        outcome.cues.push(AudioCue::Victory);
    }

    outcome
}

/// Scroll, animate, collide, score and cull obstacles, newest first
///
/// Each obstacle is fully processed before the next one. A collision stops
/// processing for the rest of the tick.
fn update_obstacles(
    state: &mut SimulationState,
    phase: GamePhase,
    dt_ms: f32,
    scroll: f32,
    outcome: &mut TickOutcome,
) {
    let playing = phase == GamePhase::Playing;
    let moving = state.speed_multiplier > 0.0;
    let player = state.player.rect;
    // Obstacles below this index were not reached (collision stopped the loop)
    let mut first_visited = state.obstacles.len();

    for i in (0..state.obstacles.len()).rev() {
        first_visited = i;
        let obstacle = &mut state.obstacles[i];
        obstacle.rect.x -= scroll;

        if moving {
            obstacle.anim.advance(dt_ms, OBSTACLE_FRAME_MS);
        }

        if playing && collides(&player, &obstacle.rect, HITBOX_SHRINK) {
            log::info!("Crashed into obstacle at x={:.1}", obstacle.rect.x);
            outcome.request_phase(GamePhase::GameOver);
            outcome.cues.push(AudioCue::Crash);
            break;
        }

        if playing && !obstacle.passed && obstacle.rect.right() < player.x {
            obstacle.passed = true;
            outcome.score += SCORE_PER_OBSTACLE;
            log::debug!("Cleared obstacle, +{}", SCORE_PER_OBSTACLE);
        }
    }

    // Compact in place, keeping spawn order
    let mut index = 0;
    state.obstacles.retain(|obstacle| {
        let visited = index >= first_visited;
        index += 1;
        let cull = visited && obstacle.is_offscreen();
        if cull {
            log::debug!("Culled obstacle at x={:.1}", obstacle.rect.x);
        }
        !cull
    });
}
