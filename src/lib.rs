//! Handshake Run - side-scrolling runner mini-game core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, spawning, collisions, phases)
//! - `engine`: Per-frame facade wiring the simulation to its collaborators
//! - `store`: Phase/score/mute storage contract
//! - `audio`: Discrete audio cue sink
//! - `render`: Read-only frame snapshots for a renderer
//! - `settings`: Runtime configuration

pub mod audio;
pub mod engine;
pub mod render;
pub mod settings;
pub mod sim;
pub mod store;

pub use audio::{AudioCue, AudioManager, AudioSink};
pub use engine::Engine;
pub use render::{Frame, FrameSnapshot, RenderSink};
pub use settings::Settings;
pub use store::{GameStore, PhaseStore};

/// Game configuration constants
///
/// Distances are in pixels, speeds in pixels/second and timers in milliseconds.
pub mod consts {
    /// Canvas dimensions
    pub const CANVAS_WIDTH: f32 = 800.0;
    pub const CANVAS_HEIGHT: f32 = 400.0;
    /// Y coordinate of the ground line (bottom edge of grounded entities)
    pub const GROUND_Y: f32 = 320.0;

    /// Downward acceleration applied while airborne (px/s²)
    pub const GRAVITY: f32 = 2000.0;
    /// Vertical velocity applied on jump (negative = up)
    pub const JUMP_VELOCITY: f32 = -800.0;
    /// Horizontal world scroll speed at a speed multiplier of 1.0
    pub const BASE_SPEED: f32 = 400.0;

    /// Player box
    pub const PLAYER_WIDTH: f32 = 40.0;
    pub const PLAYER_HEIGHT: f32 = 60.0;
    pub const PLAYER_START_X: f32 = 100.0;

    /// Obstacle box
    pub const OBSTACLE_WIDTH: f32 = 40.0;
    pub const OBSTACLE_HEIGHT: f32 = 40.0;

    /// Pixels trimmed from every edge before collision tests
    pub const HITBOX_SHRINK: f32 = 5.0;

    /// Spawn delay range, drawn uniformly after every spawn
    pub const SPAWN_MIN_MS: f32 = 1000.0;
    pub const SPAWN_MAX_MS: f32 = 2500.0;
    /// Delay before the first obstacle of a run
    pub const INITIAL_SPAWN_DELAY_MS: f32 = 1500.0;

    /// Simulated time the player must survive to win
    pub const SURVIVAL_THRESHOLD_MS: f32 = 15000.0;
    /// Points per cleared obstacle
    pub const SCORE_PER_OBSTACLE: u32 = 10;

    /// Obstacles are removed once their right edge is this far left of the canvas
    pub const CULL_MARGIN: f32 = 50.0;

    /// Animation frame intervals
    pub const PLAYER_FRAME_MS: f32 = 100.0;
    pub const OBSTACLE_FRAME_MS: f32 = 200.0;

    /// Speed multiplier lost per second during the transition
    ///
    /// Stopping from full speed scrolls `BASE_SPEED / (2 * rate)` = 1000px,
    /// which must exceed `CANVAS_WIDTH + OBSTACLE_WIDTH + CULL_MARGIN` so an
    /// obstacle spawned at the right edge is always culled before the stop.
    pub const TRANSITION_DECEL_PER_SEC: f32 = 0.2;

    /// Cutscene choreography
    pub const CUTSCENE_PLAYER_SPEED: f32 = 100.0;
    pub const EXECUTIVE_SPEED: f32 = 100.0;
    pub const EXECUTIVE_START_X: f32 = CANVAS_WIDTH;
    pub const HANDSHAKE_DISTANCE: f32 = 10.0;

    /// Default upper bound on a single frame delta
    pub const MAX_FRAME_MS: f32 = 100.0;

    /// Held key identifiers that count as a jump
    pub const JUMP_KEYS: [&str; 3] = ["Space", "ArrowUp", "KeyW"];
}

/// Convert a millisecond frame delta to seconds
#[inline]
pub fn ms_to_secs(ms: f32) -> f32 {
    ms / 1000.0
}

#[cfg(test)]
mod tests {
    use super::consts::*;

    #[test]
    fn test_transition_stop_distance_clears_screen() {
        let stop_distance = BASE_SPEED / (2.0 * TRANSITION_DECEL_PER_SEC);
        assert!(stop_distance > CANVAS_WIDTH + OBSTACLE_WIDTH + CULL_MARGIN);
    }
}
