//! Headless session runner.
//!
//! Plays one session on a simulated clock: every tick the autopilot may send
//! one intent, then the driver is advanced by the tick length. The same
//! [`RunConfig`] always produces the same [`RunReport`].

use log::{debug, info};
use serde::Serialize;

use crate::core::SimpleRng;
use crate::engine::{Driver, DriverSnapshot, DriverState};
use crate::types::GameAction;

/// Autopilot used by the runner
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Policy {
    /// Never touches the controls; pieces fall on the timer only.
    Idle,
    /// Random moves, rotations and soft drops.
    Random,
}

impl Policy {
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "idle" => Some(Self::Idle),
            "random" => Some(Self::Random),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Random => "random",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunConfig {
    pub seed: u32,
    /// Simulated time budget.
    pub max_ms: u64,
    /// Simulated time per loop iteration; must be non-zero.
    pub tick_ms: u32,
    pub policy: Policy,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            seed: 1,
            max_ms: 600_000,
            tick_ms: 16,
            policy: Policy::Random,
        }
    }
}

/// Outcome of one run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RunReport {
    pub seed: u32,
    pub policy: Policy,
    pub elapsed_ms: u64,
    pub drops: u64,
    pub actions: u64,
    /// Pieces spawned, including the one in play.
    pub pieces: u32,
    pub score: u32,
    pub rows: u32,
    pub level: u32,
    pub game_over: bool,
    pub final_state: DriverSnapshot,
}

/// Intents the random autopilot picks from; `None` leaves the controls alone.
const RANDOM_INTENTS: [Option<GameAction>; 8] = [
    None,
    None,
    Some(GameAction::MoveLeft),
    Some(GameAction::MoveRight),
    Some(GameAction::RotateCw),
    Some(GameAction::RotateCcw),
    Some(GameAction::SoftDropStart),
    None,
];

struct Autopilot {
    policy: Policy,
    rng: SimpleRng,
}

impl Autopilot {
    fn new(policy: Policy, seed: u32) -> Self {
        Self {
            policy,
            // Decorrelated from the piece stream of the same seed.
            rng: SimpleRng::new(seed ^ 0x9E37_79B9),
        }
    }

    fn next_intent(&mut self, state: DriverState) -> Option<GameAction> {
        match self.policy {
            Policy::Idle => None,
            // A soft drop lasts exactly one tick.
            Policy::Random if state == DriverState::SoftDropping => {
                Some(GameAction::SoftDropRelease)
            }
            Policy::Random => {
                RANDOM_INTENTS[self.rng.next_range(RANDOM_INTENTS.len() as u32) as usize]
            }
        }
    }
}

/// Play one session until game over or until `max_ms` of simulated time
pub fn run(config: &RunConfig) -> RunReport {
    let tick_ms = config.tick_ms.max(1);
    let mut driver = Driver::new(config.seed);
    let mut pilot = Autopilot::new(config.policy, config.seed);
    driver.start();
    info!(
        "run: seed {} policy {} budget {}ms",
        config.seed,
        config.policy.as_str(),
        config.max_ms
    );

    let mut elapsed_ms = 0u64;
    let mut drops = 0u64;
    let mut actions = 0u64;

    while elapsed_ms < config.max_ms && !driver.is_game_over() {
        if let Some(action) = pilot.next_intent(driver.state()) {
            if driver.apply_action(action) {
                actions += 1;
            }
        }
        if driver.is_game_over() {
            break;
        }
        drops += u64::from(driver.advance(tick_ms));
        elapsed_ms += u64::from(tick_ms);
    }

    let game = driver.game();
    debug!("run finished after {elapsed_ms}ms, {drops} timed drops");

    RunReport {
        seed: config.seed,
        policy: config.policy,
        elapsed_ms,
        drops,
        actions,
        pieces: game.piece_id(),
        score: game.score(),
        rows: game.rows(),
        level: game.level(),
        game_over: driver.is_game_over(),
        final_state: driver.snapshot(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_policy_names() {
        for policy in [Policy::Idle, Policy::Random] {
            assert_eq!(Policy::from_str(policy.as_str()), Some(policy));
        }
        assert_eq!(Policy::from_str("greedy"), None);
    }

    #[test]
    fn test_idle_run_respects_budget() {
        let report = run(&RunConfig {
            seed: 5,
            max_ms: 5_000,
            tick_ms: 100,
            policy: Policy::Idle,
        });
        assert_eq!(report.elapsed_ms, 5_000);
        assert_eq!(report.drops, 5);
        assert_eq!(report.actions, 0);
        assert!(!report.game_over);
        assert_eq!(report.final_state.game.player.y, 5);
    }

    #[test]
    fn test_idle_run_ends_in_game_over() {
        // Pieces stack in the spawn columns until one cannot leave row 0.
        let report = run(&RunConfig {
            seed: 5,
            max_ms: u64::MAX,
            tick_ms: 1000,
            policy: Policy::Idle,
        });
        assert!(report.game_over);
        assert_eq!(report.final_state.state, DriverState::GameOver);
        assert_eq!(report.final_state.interval_ms, None);
        assert!(report.pieces > 1);
    }

    #[test]
    fn test_runs_are_deterministic() {
        let config = RunConfig {
            seed: 99,
            max_ms: 120_000,
            tick_ms: 16,
            policy: Policy::Random,
        };
        assert_eq!(run(&config), run(&config));
    }

    #[test]
    fn test_zero_tick_is_clamped() {
        let report = run(&RunConfig {
            seed: 1,
            max_ms: 10,
            tick_ms: 0,
            policy: Policy::Idle,
        });
        assert_eq!(report.elapsed_ms, 10);
    }
}
