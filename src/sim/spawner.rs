//! Obstacle spawn timing
//!
//! The random source is always passed in so runs replay exactly from a seed.

use rand::Rng;

use super::state::{Obstacle, SimulationState};
use crate::consts::*;

/// Draw the next spawn delay uniformly from `[SPAWN_MIN_MS, SPAWN_MAX_MS]`
pub fn next_spawn_delay<R: Rng + ?Sized>(rng: &mut R) -> f32 {
    rng.random_range(SPAWN_MIN_MS..=SPAWN_MAX_MS)
}

/// Count down the spawn timer and spawn at the right edge when it expires
///
/// Returns true if an obstacle was spawned this call.
pub fn update_spawner<R: Rng + ?Sized>(state: &mut SimulationState, dt_ms: f32, rng: &mut R) -> bool {
    state.spawn_timer_ms -= dt_ms;
    if state.spawn_timer_ms > 0.0 {
        return false;
    }

    state.obstacles.push(Obstacle::at(CANVAS_WIDTH));
    state.spawn_timer_ms = next_spawn_delay(rng);
    log::debug!(
        "Spawned obstacle #{} (next in {:.0}ms)",
        state.obstacles.len(),
        state.spawn_timer_ms
    );
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_delay_within_range() {
        let mut rng = Pcg32::seed_from_u64(7);
        for _ in 0..1000 {
            let delay = next_spawn_delay(&mut rng);
            assert!((SPAWN_MIN_MS..=SPAWN_MAX_MS).contains(&delay));
        }
    }

    #[test]
    fn test_spawns_when_timer_expires() {
        let mut rng = Pcg32::seed_from_u64(1);
        let mut state = SimulationState::new();
        state.spawn_timer_ms = 20.0;

        assert!(!update_spawner(&mut state, 16.0, &mut rng));
        assert!(state.obstacles.is_empty());

        assert!(update_spawner(&mut state, 16.0, &mut rng));
        assert_eq!(state.obstacles.len(), 1);
        let obstacle = &state.obstacles[0];
        assert_eq!(obstacle.rect.x, CANVAS_WIDTH);
        assert_eq!(obstacle.rect.bottom(), GROUND_Y);
        assert!(state.spawn_timer_ms >= SPAWN_MIN_MS);
    }

    #[test]
    fn test_same_seed_same_delays() {
        let mut a = Pcg32::seed_from_u64(42);
        let mut b = Pcg32::seed_from_u64(42);
        for _ in 0..16 {
            assert_eq!(next_spawn_delay(&mut a), next_spawn_delay(&mut b));
        }
    }
}
