//! Game loop driver - the drop timer and the input state machine
//!
//! The driver owns a [`GameState`] and decides when it drops. Time is fed in
//! by the caller through [`Driver::advance`]; intents through
//! [`Driver::apply_action`]. Both run to completion, so one drop step is never
//! interleaved with another event.

use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::core::{drop_interval_ms, DropOutcome, GameSnapshot, GameState};
use crate::types::{GameAction, RotationDir, INITIAL_DROP_MS};

/// Driver state
///
/// `GameOver` is also the idle state before the first start.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DriverState {
    GameOver,
    Running,
    SoftDropping,
}

/// Driver view for the presentation layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DriverSnapshot {
    pub game: GameSnapshot,
    pub state: DriverState,
    /// `None` while the timer is paused
    pub interval_ms: Option<u32>,
}

#[derive(Debug, Clone)]
pub struct Driver {
    game: GameState,
    state: DriverState,
    /// Drop timer interval; `None` means paused.
    interval_ms: Option<u32>,
    /// Time accumulated towards the next scheduled drop.
    elapsed_ms: u32,
}

impl Driver {
    /// Create an idle driver; call [`Driver::start`] to play
    pub fn new(seed: u32) -> Self {
        Self {
            game: GameState::new(seed),
            state: DriverState::GameOver,
            interval_ms: None,
            elapsed_ms: 0,
        }
    }

    /// Run an already started session at its level's interval
    pub fn resume(game: GameState) -> Self {
        let (state, interval_ms) = if game.playable() {
            (DriverState::Running, Some(drop_interval_ms(game.level())))
        } else {
            (DriverState::GameOver, None)
        };
        Self {
            game,
            state,
            interval_ms,
            elapsed_ms: 0,
        }
    }

    /// Reset stage, player and counters and begin running
    pub fn start(&mut self) {
        if self.game.started() {
            self.game.restart();
        } else {
            self.game.start();
        }
        self.state = DriverState::Running;
        self.interval_ms = Some(INITIAL_DROP_MS);
        self.elapsed_ms = 0;
    }

    pub fn state(&self) -> DriverState {
        self.state
    }

    pub fn interval_ms(&self) -> Option<u32> {
        self.interval_ms
    }

    pub fn game(&self) -> &GameState {
        &self.game
    }

    pub fn is_game_over(&self) -> bool {
        self.state == DriverState::GameOver
    }

    /// Let `elapsed_ms` pass on the drop timer
    ///
    /// Runs one drop per full interval. When a drop changes the interval
    /// (level up or game over) the timer restarts from zero with the new
    /// interval, so leftover time never fires an extra drop. Returns the
    /// number of drops performed.
    pub fn advance(&mut self, elapsed_ms: u32) -> u32 {
        let Some(interval) = self.interval_ms else {
            return 0;
        };

        self.elapsed_ms = self.elapsed_ms.saturating_add(elapsed_ms);
        let mut drops = 0;

        while self.elapsed_ms >= interval {
            self.elapsed_ms -= interval;
            self.drop_step();
            drops += 1;

            if self.interval_ms != Some(interval) {
                self.elapsed_ms = 0;
                break;
            }
        }

        drops
    }

    /// Apply a presentation-layer intent
    ///
    /// Returns whether the intent changed anything. Everything except
    /// `Restart` is ignored once the game is over.
    pub fn apply_action(&mut self, action: GameAction) -> bool {
        if self.state == DriverState::GameOver && action != GameAction::Restart {
            return false;
        }

        match action {
            GameAction::Restart => {
                self.start();
                true
            }
            GameAction::MoveLeft => self.game.move_horizontal(-1),
            GameAction::MoveRight => self.game.move_horizontal(1),
            GameAction::RotateCw => self.game.rotate(RotationDir::Clockwise),
            GameAction::RotateCcw => self.game.rotate(RotationDir::CounterClockwise),
            GameAction::SoftDropStart => {
                self.state = DriverState::SoftDropping;
                self.interval_ms = None;
                self.elapsed_ms = 0;
                self.drop_step();
                true
            }
            GameAction::SoftDropRelease => {
                if self.state != DriverState::SoftDropping {
                    return false;
                }
                self.state = DriverState::Running;
                self.interval_ms = Some(drop_interval_ms(self.game.level()));
                self.elapsed_ms = 0;
                true
            }
        }
    }

    /// Apply a raw key code; unknown codes are ignored
    pub fn apply_key(&mut self, code: u32, pressed: bool) -> bool {
        match GameAction::from_key_code(code, pressed) {
            Some(action) => self.apply_action(action),
            None => false,
        }
    }

    /// One drop, plus the timer bookkeeping it implies
    fn drop_step(&mut self) -> DropOutcome {
        let outcome = self.game.drop();
        match outcome {
            DropOutcome::ToppedOut => {
                self.state = DriverState::GameOver;
                self.interval_ms = None;
                info!("timer stopped");
            }
            DropOutcome::Locked(clear) if clear.leveled_up => {
                // A paused timer picks up the new level on release.
                if self.interval_ms.is_some() {
                    let next = drop_interval_ms(self.game.level());
                    debug!("drop interval now {next}ms");
                    self.interval_ms = Some(next);
                }
            }
            _ => {}
        }
        outcome
    }

    pub fn snapshot(&self) -> DriverSnapshot {
        DriverSnapshot {
            game: self.game.snapshot(),
            state: self.state,
            interval_ms: self.interval_ms,
        }
    }
}

impl Default for Driver {
    fn default() -> Self {
        Self::new(1)
    }
}
