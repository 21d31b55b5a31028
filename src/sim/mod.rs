//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Time comes in as an explicit frame delta
//! - Randomness comes from a caller-supplied RNG
//! - Stable iteration order (obstacles in spawn order)
//! - No rendering, audio or platform dependencies

pub mod collision;
pub mod cutscene;
pub mod fsm;
pub mod spawner;
pub mod state;
pub mod tick;

pub use collision::{Rect, collides};
pub use state::{Animation, CutscenePhase, GamePhase, Obstacle, Player, SimulationState};
pub use tick::{TickInput, TickOutcome, tick};
