//! Render-facing views of the simulation
//!
//! A renderer gets a read-only `Frame` every frame and never feeds anything
//! back. `FrameSnapshot` is the owned form for logging or shipping elsewhere.

use serde::{Deserialize, Serialize};

use crate::sim::{GamePhase, Rect, SimulationState};

/// Borrowed view of one frame
#[derive(Debug, Clone, Copy)]
pub struct Frame<'a> {
    pub state: &'a SimulationState,
    pub phase: GamePhase,
    pub score: u32,
}

impl Frame<'_> {
    /// Whether the executive should be drawn
    pub fn shows_executive(&self) -> bool {
        self.phase == GamePhase::Cutscene && self.state.cutscene_phase.step() >= 2
    }

    pub fn to_snapshot(&self) -> FrameSnapshot {
        FrameSnapshot {
            phase: self.phase,
            score: self.score,
            player: self.state.player.rect,
            player_frame: self.state.player.anim.frame,
            obstacles: self.state.obstacles.iter().map(|o| o.rect).collect(),
            background_offset: self.state.background_offset,
            cutscene_step: self.state.cutscene_phase.step(),
            executive: self.shows_executive().then(|| self.state.executive_rect()),
        }
    }
}

/// Owned, serializable frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameSnapshot {
    pub phase: GamePhase,
    pub score: u32,
    pub player: Rect,
    pub player_frame: u8,
    pub obstacles: Vec<Rect>,
    pub background_offset: f32,
    pub cutscene_step: u8,
    pub executive: Option<Rect>,
}

/// Consumer of frames
pub trait RenderSink {
    fn present(&mut self, frame: &Frame<'_>);
}

/// Sink that draws nothing
#[derive(Debug, Default)]
pub struct NullRenderer;

impl RenderSink for NullRenderer {
    fn present(&mut self, _frame: &Frame<'_>) {}
}
