//! Per-frame engine facade
//!
//! Owns the one live `SimulationState` and the spawner RNG. Each animation
//! frame the host calls [`Engine::frame`] with the wall-clock delta; the
//! engine ticks the simulation, applies the outcome to the store and audio
//! sink, then hands a read-only frame to the renderer.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::audio::AudioSink;
use crate::render::{Frame, RenderSink};
use crate::settings::Settings;
use crate::sim::{SimulationState, TickInput, TickOutcome, fsm, tick};
use crate::store::PhaseStore;

/// Simulation driver
#[derive(Debug, Clone)]
pub struct Engine<R = Pcg32> {
    state: SimulationState,
    rng: R,
    settings: Settings,
}

impl Engine<Pcg32> {
    /// Engine with a PCG spawner seeded from `seed`
    pub fn new(settings: Settings, seed: u64) -> Self {
        log::info!("Engine seed {}", seed);
        Self::with_rng(settings, Pcg32::seed_from_u64(seed))
    }
}

impl<R: Rng> Engine<R> {
    /// Engine with a caller-supplied random source
    pub fn with_rng(settings: Settings, rng: R) -> Self {
        Self {
            state: SimulationState::new(),
            rng,
            settings,
        }
    }

    /// Read-only view of the live state
    pub fn state(&self) -> &SimulationState {
        &self.state
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Borrowed frame for the current state and store
    pub fn view<'a, S: PhaseStore + ?Sized>(&'a self, store: &S) -> Frame<'a> {
        Frame {
            state: &self.state,
            phase: store.phase(),
            score: store.score(),
        }
    }

    /// Run one animation frame
    ///
    /// A jump in the menu or after a crash starts a fresh run and is consumed:
    /// that frame only presents the new state, so the player does not leap
    /// on the first frame of the run.
    pub fn frame<S, A, V>(
        &mut self,
        elapsed_ms: f64,
        input: &TickInput,
        store: &mut S,
        audio: &mut A,
        renderer: &mut V,
    ) -> TickOutcome
    where
        S: PhaseStore + ?Sized,
        A: AudioSink + ?Sized,
        V: RenderSink + ?Sized,
    {
        if store.phase().starts_run_on_interact()
            && input.wants_jump()
            && fsm::start_run(&mut self.state, store)
        {
            renderer.present(&self.view(&*store));
            return TickOutcome::default();
        }

        let dt_ms = self.settings.clamp_frame_ms(elapsed_ms);
        if f64::from(dt_ms) < elapsed_ms {
            log::debug!("Clamped frame delta {:.1}ms -> {:.1}ms", elapsed_ms, dt_ms);
        }

        let phase = store.phase();
        let outcome = tick(&mut self.state, phase, dt_ms, input, &mut self.rng);

        if outcome.score > 0 {
            store.add_score(outcome.score);
        }
        if !store.is_muted() {
            for &cue in &outcome.cues {
                audio.play(cue);
            }
        }
        if let Some(requested) = outcome.phase_request {
            fsm::commit(store, requested);
        }
        if outcome.handshake {
            log::info!("Run complete with score {}", store.score());
        }

        renderer.present(&self.view(&*store));
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::{AudioCue, AudioManager};
    use crate::render::{FrameSnapshot, NullRenderer};
    use crate::sim::{CutscenePhase, GamePhase, Obstacle};
    use crate::store::GameStore;

    #[derive(Default)]
    struct Cues(Vec<AudioCue>);

    impl AudioSink for Cues {
        fn play(&mut self, cue: AudioCue) {
            self.0.push(cue);
        }
    }

    #[derive(Default)]
    struct Frames(Vec<FrameSnapshot>);

    impl RenderSink for Frames {
        fn present(&mut self, frame: &Frame<'_>) {
            self.0.push(frame.to_snapshot());
        }
    }

    struct Harness {
        engine: Engine,
        store: GameStore,
        audio: Cues,
        frames: Frames,
    }

    impl Harness {
        fn new() -> Self {
            Self {
                engine: Engine::new(Settings::default(), 2024),
                store: GameStore::default(),
                audio: Cues::default(),
                frames: Frames::default(),
            }
        }

        fn step(&mut self, elapsed_ms: f64, input: &TickInput) -> TickOutcome {
            self.engine.frame(
                elapsed_ms,
                input,
                &mut self.store,
                &mut self.audio,
                &mut self.frames,
            )
        }
    }

    #[test]
    fn test_menu_waits_for_jump() {
        let mut h = Harness::new();
        for _ in 0..10 {
            h.step(16.0, &TickInput::default());
        }
        assert_eq!(h.store.phase(), GamePhase::StartMenu);
        assert_eq!(*h.engine.state(), SimulationState::new());
        assert_eq!(h.frames.0.len(), 10);
    }

    #[test]
    fn test_jump_starts_without_leaping() {
        let mut h = Harness::new();
        h.step(16.0, &TickInput::jump());
        assert_eq!(h.store.phase(), GamePhase::Playing);
        assert!(!h.engine.state().player.is_jumping);
        assert!(h.audio.0.is_empty());

        h.step(16.0, &TickInput::jump());
        assert!(h.engine.state().player.is_jumping);
        assert_eq!(h.audio.0, vec![AudioCue::Jump]);
    }

    #[test]
    fn test_crash_then_restart() {
        let mut h = Harness::new();
        h.step(16.0, &TickInput::jump());
        h.engine.state.obstacles.push(Obstacle::at(110.0));

        h.step(16.0, &TickInput::default());
        assert_eq!(h.store.phase(), GamePhase::GameOver);
        assert_eq!(h.audio.0, vec![AudioCue::Crash]);

        // Frozen until the player interacts
        let frozen = h.engine.state().clone();
        h.step(500.0, &TickInput::default());
        assert_eq!(*h.engine.state(), frozen);

        h.store.add_score(30);
        h.step(16.0, &TickInput::jump());
        assert_eq!(h.store.phase(), GamePhase::Playing);
        assert_eq!(h.store.score(), 0);
        assert_eq!(*h.engine.state(), SimulationState::new());
    }

    #[test]
    fn test_muted_store_silences_cues() {
        let mut h = Harness::new();
        h.store.toggle_mute();
        h.step(16.0, &TickInput::jump());
        let outcome = h.step(16.0, &TickInput::jump());
        assert_eq!(outcome.cues, vec![AudioCue::Jump]);
        assert!(h.audio.0.is_empty());
        assert!(h.engine.state().player.is_jumping);
    }

    #[test]
    fn test_large_gap_is_clamped() {
        let mut h = Harness::new();
        h.step(16.0, &TickInput::jump());
        h.step(60_000.0, &TickInput::default());
        assert_eq!(h.engine.state().survival_timer_ms, 100.0);
        assert_eq!(h.store.phase(), GamePhase::Playing);
    }

    #[test]
    fn test_full_run_reaches_handshake() {
        let mut h = Harness::new();
        h.step(16.0, &TickInput::jump());

        let mut handshake = false;
        for _ in 0..5000 {
            // Clear the track so the run survives
            h.engine.state.obstacles.clear();
            let outcome = h.step(16.0, &TickInput::default());
            if outcome.handshake {
                handshake = true;
                break;
            }
        }

        assert!(handshake);
        assert_eq!(h.store.phase(), GamePhase::Cutscene);
        assert_eq!(h.engine.state().cutscene_phase, CutscenePhase::Handshake);
        assert_eq!(h.audio.0.last(), Some(&AudioCue::Victory));
        let last = h.frames.0.last().unwrap();
        assert_eq!(last.phase, GamePhase::Cutscene);
        assert!(last.executive.is_some());
    }

    #[test]
    fn test_score_committed_to_store() {
        let mut h = Harness::new();
        h.step(16.0, &TickInput::jump());
        h.engine.state.obstacles.push(Obstacle::at(61.0));
        h.step(16.0, &TickInput::default());
        assert_eq!(h.store.score(), 10);
        assert_eq!(h.frames.0.last().unwrap().score, 10);
    }

    #[test]
    fn test_seeded_runs_always_reach_cutscene() {
        let mut stuck = Vec::new();

        for seed in 0..24 {
            let mut engine = Engine::new(Settings::default(), seed);
            let mut store = GameStore::default();
            let mut audio = AudioManager::default();
            let mut renderer = NullRenderer;
            engine.frame(16.0, &TickInput::jump(), &mut store, &mut audio, &mut renderer);

            let mut handshake = false;
            for _ in 0..4000 {
                // Only remove obstacles about to reach the player; the rest
                // must scroll away on their own during the transition
                if store.phase() == GamePhase::Playing {
                    engine.state.obstacles.retain(|o| o.rect.x > 200.0);
                }
                let outcome = engine.frame(16.0, &TickInput::default(), &mut store, &mut audio, &mut renderer);
                if outcome.handshake {
                    handshake = true;
                    break;
                }
            }

            if !handshake {
                stuck.push((seed, store.phase(), engine.state().obstacles.len()));
            }
        }

        assert!(stuck.is_empty(), "runs that never finished: {:?}", stuck);
    }

    #[test]
    fn test_same_seed_same_run() {
        let run = || {
            let mut h = Harness::new();
            h.step(16.0, &TickInput::jump());
            for i in 0..600 {
                let input = if i % 45 == 0 { TickInput::jump() } else { TickInput::default() };
                h.step(16.0, &input);
            }
            (h.engine.state().clone(), h.store.clone())
        };
        assert_eq!(run(), run());
    }
}
