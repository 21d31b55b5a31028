//! Game state and core simulation types
//!
//! `SimulationState` is volatile: it is rebuilt from scratch on every start
//! and restart. Phase, score and mute live in the external store.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::collision::Rect;
use crate::consts::*;

/// Current phase of the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum GamePhase {
    /// Title screen, waiting for the first jump/interact
    #[default]
    StartMenu,
    /// Active gameplay
    Playing,
    /// Survival threshold reached, world decelerating
    Transition,
    /// Scripted walk-and-handshake sequence
    Cutscene,
    /// Player hit an obstacle
    GameOver,
}

impl GamePhase {
    /// Phases in which the world does not advance at all
    pub fn is_frozen(self) -> bool {
        matches!(self, GamePhase::StartMenu | GamePhase::GameOver)
    }
}

/// Cutscene choreography step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CutscenePhase {
    #[default]
    Inactive,
    /// Player walks to mid-screen
    PlayerWalk,
    /// Executive walks in from the right
    ExecutiveWalk,
    /// Handshake, terminal
    Handshake,
}

impl CutscenePhase {
    /// Numeric step: 0 = inactive, 1..=3 = choreography
    pub fn step(self) -> u8 {
        match self {
            CutscenePhase::Inactive => 0,
            CutscenePhase::PlayerWalk => 1,
            CutscenePhase::ExecutiveWalk => 2,
            CutscenePhase::Handshake => 3,
        }
    }
}

/// Two-frame sprite animation driven by elapsed milliseconds
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Animation {
    pub frame: u8,
    pub timer_ms: f32,
}

impl Animation {
    /// Accumulate time and flip the frame once `interval_ms` has passed
    pub fn advance(&mut self, dt_ms: f32, interval_ms: f32) {
        self.timer_ms += dt_ms;
        if self.timer_ms >= interval_ms {
            self.frame ^= 1;
            self.timer_ms = 0.0;
        }
    }
}

/// The runner
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub rect: Rect,
    /// Vertical velocity in px/s (negative = up)
    pub vertical_velocity: f32,
    pub is_jumping: bool,
    pub anim: Animation,
}

impl Default for Player {
    fn default() -> Self {
        Self {
            rect: Rect::new(
                PLAYER_START_X,
                Self::ground_top(),
                PLAYER_WIDTH,
                PLAYER_HEIGHT,
            ),
            vertical_velocity: 0.0,
            is_jumping: false,
            anim: Animation::default(),
        }
    }
}

impl Player {
    /// Resting y coordinate (top edge) when standing on the ground
    pub const fn ground_top() -> f32 {
        GROUND_Y - PLAYER_HEIGHT
    }

    /// Start a jump. Returns false if already airborne.
    pub fn jump(&mut self) -> bool {
        if self.is_jumping {
            return false;
        }
        self.vertical_velocity = JUMP_VELOCITY;
        self.is_jumping = true;
        true
    }

    /// Explicit Euler step under gravity, landing clamps to the ground
    pub fn integrate(&mut self, dt: f32) {
        if !self.is_jumping {
            return;
        }
        self.vertical_velocity += GRAVITY * dt;
        self.rect.y += self.vertical_velocity * dt;

        let ground = Self::ground_top();
        if self.vertical_velocity >= 0.0 && self.rect.y >= ground {
            self.rect.y = ground;
            self.vertical_velocity = 0.0;
            self.is_jumping = false;
        }
    }
}

/// A ground obstacle scrolling toward the player
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub rect: Rect,
    /// Set once the player has cleared it (score awarded)
    pub passed: bool,
    pub anim: Animation,
}

impl Obstacle {
    /// New obstacle standing on the ground at `x`
    pub fn at(x: f32) -> Self {
        Self {
            rect: Rect::new(
                x,
                GROUND_Y - OBSTACLE_HEIGHT,
                OBSTACLE_WIDTH,
                OBSTACLE_HEIGHT,
            ),
            passed: false,
            anim: Animation::default(),
        }
    }

    /// Far enough past the left edge to be invisible
    pub fn is_offscreen(&self) -> bool {
        self.rect.right() < -CULL_MARGIN
    }
}

/// Complete volatile simulation state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationState {
    pub player: Player,
    /// Live obstacles in spawn order
    pub obstacles: Vec<Obstacle>,
    /// Looping background scroll, in (-CANVAS_WIDTH, 0]
    pub background_offset: f32,
    /// World speed scale in [0, 1]
    pub speed_multiplier: f32,
    /// Simulated time spent in Playing
    pub survival_timer_ms: f32,
    /// Countdown to the next spawn
    pub spawn_timer_ms: f32,
    pub cutscene_phase: CutscenePhase,
    /// Left edge of the cutscene executive
    pub executive_x: f32,
    /// Keys held as of the last advancing tick
    pub held_keys: BTreeSet<String>,
}

impl Default for SimulationState {
    fn default() -> Self {
        Self::new()
    }
}

impl SimulationState {
    /// Fresh state for the start of a run
    pub fn new() -> Self {
        Self {
            player: Player::default(),
            obstacles: Vec::new(),
            background_offset: 0.0,
            speed_multiplier: 1.0,
            survival_timer_ms: 0.0,
            spawn_timer_ms: INITIAL_SPAWN_DELAY_MS,
            cutscene_phase: CutscenePhase::Inactive,
            executive_x: EXECUTIVE_START_X,
            held_keys: BTreeSet::new(),
        }
    }

    /// Rebuild every field in place
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Executive bounding box (same size as the player, standing on the ground)
    pub fn executive_rect(&self) -> Rect {
        Rect::new(
            self.executive_x,
            Player::ground_top(),
            PLAYER_WIDTH,
            PLAYER_HEIGHT,
        )
    }

    /// Nearest obstacle still ahead of the player's trailing edge
    pub fn next_obstacle(&self) -> Option<&Obstacle> {
        self.obstacles
            .iter()
            .find(|o| o.rect.right() >= self.player.rect.x)
    }
}
