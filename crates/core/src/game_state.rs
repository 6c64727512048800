//! Game state module - one game session
//!
//! This module ties together the stage, the falling player, the piece
//! generator and the scoreboard. It knows how to perform one drop step, how to
//! move and rotate the player, and how a lock merges, sweeps, scores and
//! respawns. Timing lives in the loop driver, not here.

use log::{debug, info};

use crate::collision::check_collision;
use crate::player::Player;
use crate::rng::PieceGenerator;
use crate::scoring::{ClearOutcome, Scoreboard};
use crate::snapshot::{GameSnapshot, PlayerSnapshot};
use crate::stage::{Frame, Stage};
use crate::types::{RotationDir, GAME_OVER_ROW};

/// What a single drop step did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropOutcome {
    /// The player moved down one row
    Moved,
    /// The player could not descend and was locked into the stage
    Locked(ClearOutcome),
    /// The player is stuck at spawn; the game is over
    ToppedOut,
    /// No game in progress
    Ignored,
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    stage: Stage,
    player: Player,
    generator: PieceGenerator,
    scoreboard: Scoreboard,
    /// Monotonic id for spawned pieces (increments on every spawn).
    piece_id: u32,
    /// Last lock event (consumed by observers).
    last_event: Option<ClearOutcome>,
    started: bool,
    game_over: bool,
}

impl GameState {
    /// Create a new game with the given RNG seed
    pub fn new(seed: u32) -> Self {
        let mut generator = PieceGenerator::new(seed);
        let player = Player::spawn(generator.draw());

        Self {
            stage: Stage::new(),
            player,
            generator,
            scoreboard: Scoreboard::new(),
            piece_id: 1,
            last_event: None,
            started: false,
            game_over: false,
        }
    }

    /// Resume a started session from a prepared stage, player and counters
    pub fn resume(seed: u32, stage: Stage, player: Player, scoreboard: Scoreboard) -> Self {
        Self {
            stage,
            player,
            generator: PieceGenerator::new(seed),
            scoreboard,
            piece_id: 1,
            last_event: None,
            started: true,
            game_over: false,
        }
    }

    /// Start the game
    pub fn start(&mut self) {
        if self.started {
            return;
        }
        self.started = true;
        info!(
            "game started: first piece {:?} seed {}",
            self.player.kind,
            self.generator.seed()
        );
    }

    /// Reset stage, player and counters, and start again
    ///
    /// The new session draws from where the previous one's RNG stream left
    /// off, with a fresh repeat history.
    pub fn restart(&mut self) {
        *self = Self::new(self.generator.seed());
        self.start();
    }

    pub fn started(&self) -> bool {
        self.started
    }

    pub fn game_over(&self) -> bool {
        self.game_over
    }

    /// Whether drops and moves are accepted
    pub fn playable(&self) -> bool {
        self.started && !self.game_over
    }

    pub fn piece_id(&self) -> u32 {
        self.piece_id
    }

    pub fn score(&self) -> u32 {
        self.scoreboard.score()
    }

    pub fn level(&self) -> u32 {
        self.scoreboard.level()
    }

    pub fn rows(&self) -> u32 {
        self.scoreboard.rows()
    }

    pub fn scoreboard(&self) -> &Scoreboard {
        &self.scoreboard
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn stage(&self) -> &Stage {
        &self.stage
    }

    /// Composite frame for rendering
    pub fn frame(&self) -> Frame {
        self.stage.compose(&self.player)
    }

    /// Take and clear the last lock event.
    pub fn take_last_event(&mut self) -> Option<ClearOutcome> {
        self.last_event.take()
    }

    /// One gravity step
    ///
    /// Moves the player down if it can. Otherwise a player still above
    /// `GAME_OVER_ROW` ends the game, and any other player locks.
    pub fn drop(&mut self) -> DropOutcome {
        if !self.playable() {
            return DropOutcome::Ignored;
        }

        if !check_collision(&self.player, &self.stage, (0, 1)) {
            self.player.y += 1;
            return DropOutcome::Moved;
        }

        if self.player.y < GAME_OVER_ROW {
            self.game_over = true;
            info!(
                "game over: score {} rows {} level {}",
                self.score(),
                self.rows(),
                self.level()
            );
            return DropOutcome::ToppedOut;
        }

        DropOutcome::Locked(self.lock())
    }

    /// Merge the player into the stage, sweep, score, and spawn the next piece
    fn lock(&mut self) -> ClearOutcome {
        self.player.collided = true;
        let written = self.stage.merge(&self.player);
        debug!(
            "locked {:?} at ({}, {}), {} cells",
            self.player.kind, self.player.x, self.player.y, written
        );

        let rows_cleared = self.stage.sweep_rows();
        if rows_cleared > 0 {
            debug!("swept {rows_cleared} rows");
        }

        let outcome = self.scoreboard.record_clear(rows_cleared);
        if outcome.leveled_up {
            info!(
                "level up: {} (rows {})",
                self.scoreboard.level(),
                self.scoreboard.rows()
            );
        }
        self.last_event = Some(outcome);

        self.spawn_player();
        outcome
    }

    /// Replace the player with a fresh random piece at spawn
    fn spawn_player(&mut self) {
        let kind = self.generator.draw();
        self.player = Player::spawn(kind);
        self.piece_id = self.piece_id.wrapping_add(1);
        debug!("spawned {:?} (piece {})", kind, self.piece_id);
    }

    /// Move the player sideways by `dx` columns
    pub fn move_horizontal(&mut self, dx: i8) -> bool {
        if !self.playable() {
            return false;
        }
        self.player.try_move(&self.stage, dx, 0)
    }

    /// Rotate the player with wall kicks
    pub fn rotate(&mut self, dir: RotationDir) -> bool {
        if !self.playable() {
            return false;
        }
        self.player.rotate(&self.stage, dir)
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        out.frame = self.frame();
        out.player = PlayerSnapshot::from(self.player);
        out.piece_id = self.piece_id;
        out.score = self.score();
        out.rows = self.rows();
        out.level = self.level();
        out.started = self.started;
        out.game_over = self.game_over;
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(1)
    }
}
