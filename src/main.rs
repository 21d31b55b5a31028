//! Handshake Run headless driver
//!
//! Plays one session at a fixed 60 Hz cadence with a simple auto-jump bot and
//! prints the final frame as JSON. Usage: `handshake-run [settings.json]`

use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use handshake_run::audio::LogBackend;
use handshake_run::render::{Frame, FrameSnapshot, RenderSink};
use handshake_run::sim::{GamePhase, SimulationState, TickInput};
use handshake_run::{AudioManager, Engine, GameStore, PhaseStore, Settings};

const FRAME_MS: f64 = 1000.0 / 60.0;
/// Give up after this many simulated frames (about five minutes)
const MAX_FRAMES: u32 = 60 * 60 * 5;
const MAX_ATTEMPTS: u32 = 5;
/// Jump when the next obstacle is this close to the player's leading edge
const JUMP_GAP: f32 = 60.0;

/// Renderer that keeps the latest frame and logs phase changes
#[derive(Default)]
struct LogRenderer {
    last: Option<FrameSnapshot>,
}

impl RenderSink for LogRenderer {
    fn present(&mut self, frame: &Frame<'_>) {
        let changed = self.last.as_ref().is_none_or(|l| l.phase != frame.phase);
        if changed {
            log::info!("[render] phase {:?}, score {}", frame.phase, frame.score);
        }
        self.last = Some(frame.to_snapshot());
    }
}

/// Decide whether the bot should jump this frame
fn bot_input(state: &SimulationState, phase: GamePhase) -> TickInput {
    let jump = match phase {
        GamePhase::StartMenu | GamePhase::GameOver => true,
        GamePhase::Playing => state
            .next_obstacle()
            .is_some_and(|o| o.rect.x - state.player.rect.right() < JUMP_GAP),
        _ => false,
    };
    TickInput {
        jump,
        ..Default::default()
    }
}

fn main() {
    env_logger::init();

    let settings = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .map(|path| Settings::load(&path))
        .unwrap_or_default();

    let seed = settings.seed.unwrap_or_else(|| {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(0)
    });

    let mut audio = AudioManager::new(Some(Box::new(LogBackend)));
    audio.set_master_volume(settings.master_volume);
    audio.set_sfx_volume(settings.sfx_volume);

    let mut store = GameStore::default();
    if settings.muted {
        store.toggle_mute();
    }
    audio.set_muted(store.is_muted());

    let mut renderer = LogRenderer::default();
    let mut engine = Engine::new(settings, seed);
    log::info!("Handshake Run (headless) starting...");

    let mut attempts = 0;
    for _ in 0..MAX_FRAMES {
        let phase = store.phase();
        if phase.starts_run_on_interact() {
            if attempts == MAX_ATTEMPTS {
                log::warn!("Out of attempts");
                break;
            }
            attempts += 1;
        }

        let input = bot_input(engine.state(), phase);
        let outcome = engine.frame(FRAME_MS, &input, &mut store, &mut audio, &mut renderer);
        if outcome.handshake {
            break;
        }
    }

    log::info!(
        "Finished in phase {:?} after {} attempt(s), score {}",
        store.phase(),
        attempts,
        store.score()
    );

    if let Some(snapshot) = renderer.last {
        match serde_json::to_string_pretty(&snapshot) {
            Ok(json) => println!("{json}"),
            Err(e) => log::error!("Failed to serialize final frame: {}", e),
        }
    }
}
