//! Game state module - the simulation core
//!
//! This module ties together the board, the piece factory, the hold slot and
//! the scoring rules. It owns the run state machine (playing, paused, game
//! over), the gravity accumulator, and every input command.
//!
//! Gravity is a variable-rate timer: elapsed time accumulates across ticks and
//! once it exceeds the drop interval the active piece either steps down one row
//! or, if it cannot, locks immediately. Commands apply synchronously when they
//! arrive and never wait for the gravity timer.

use log::{debug, info, trace};

use crate::board::Board;
use crate::collision::{check_collision, drop_distance, landing_y, try_rotate};
use crate::config::GameConfig;
use crate::error::ConfigError;
use crate::events::GameEvent;
use crate::hold::{HoldOutcome, HoldSlot};
use crate::pieces::{PieceDef, Tetromino};
use crate::rng::PieceFactory;
use crate::scoring::{check_lines, Progress};
use crate::snapshot::{ActiveSnapshot, GameSnapshot};
use crate::types::{GameAction, RunState};

/// Impact reported when gravity locks a piece.
pub const GRAVITY_LOCK_IMPACT: f32 = 0.25;

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    config: GameConfig,
    board: Board,
    active: Option<Tetromino>,
    next: PieceDef,
    factory: PieceFactory,
    hold: HoldSlot,
    progress: Progress,
    run_state: RunState,
    started: bool,
    drop_timer_ms: u32,
    flash_ms: u32,
    /// Monotonic episode id (increments on reset).
    episode_id: u32,
    /// Monotonic id for spawned pieces (hold swaps included).
    piece_id: u32,
    events: Vec<GameEvent>,
}

impl GameState {
    /// Create a new game with the default configuration and the given RNG seed
    pub fn new(seed: u32) -> Self {
        Self::build(GameConfig::default(), PieceFactory::new(seed))
    }

    /// Create a new game with an explicit configuration
    pub fn with_config(config: GameConfig, seed: u32) -> Result<Self, ConfigError> {
        Self::with_factory(config, PieceFactory::new(seed))
    }

    /// Create a new game drawing pieces from `factory`
    pub fn with_factory(config: GameConfig, factory: PieceFactory) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::build(config, factory))
    }

    fn build(config: GameConfig, mut factory: PieceFactory) -> Self {
        let next = factory.next_piece();
        Self {
            board: Board::new(config.width, config.height),
            active: None,
            next,
            factory,
            hold: HoldSlot::new(),
            progress: Progress::new(&config),
            run_state: RunState::Playing,
            started: false,
            drop_timer_ms: 0,
            flash_ms: 0,
            episode_id: 0,
            piece_id: 0,
            events: Vec::new(),
            config,
        }
    }

    /// Replace the board before the game starts.
    ///
    /// Returns false once started or when the dimensions differ from the config.
    pub fn preset_board(&mut self, board: Board) -> bool {
        if self.started
            || board.width() != self.config.width
            || board.height() != self.config.height
        {
            return false;
        }
        self.board = board;
        true
    }

    /// Start the game and spawn the first piece
    pub fn start(&mut self) -> bool {
        if self.started {
            return false;
        }
        self.started = true;
        self.run_state = RunState::Playing;
        info!(
            "game started: episode {} on {}x{} board",
            self.episode_id, self.config.width, self.config.height
        );
        self.spawn_next();
        self.events.push(GameEvent::StateChanged);
        true
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn started(&self) -> bool {
        self.started
    }

    pub fn run_state(&self) -> RunState {
        self.run_state
    }

    /// Started and neither paused nor over
    pub fn is_playing(&self) -> bool {
        self.started && self.run_state == RunState::Playing
    }

    pub fn paused(&self) -> bool {
        self.run_state == RunState::Paused
    }

    pub fn game_over(&self) -> bool {
        self.run_state == RunState::GameOver
    }

    pub fn can_hold(&self) -> bool {
        self.hold.can_hold()
    }

    pub fn episode_id(&self) -> u32 {
        self.episode_id
    }

    pub fn piece_id(&self) -> u32 {
        self.piece_id
    }

    pub fn score(&self) -> u32 {
        self.progress.score
    }

    pub fn level(&self) -> u32 {
        self.progress.level
    }

    pub fn lines(&self) -> u32 {
        self.progress.lines
    }

    pub fn progress(&self) -> Progress {
        self.progress
    }

    /// Current gravity interval
    pub fn drop_interval_ms(&self) -> u32 {
        self.progress.drop_interval_ms
    }

    /// Time accumulated toward the next gravity step
    pub fn drop_timer_ms(&self) -> u32 {
        self.drop_timer_ms
    }

    /// Remaining line-clear flash time
    pub fn flash_remaining_ms(&self) -> u32 {
        self.flash_ms
    }

    pub fn hold_piece(&self) -> Option<PieceDef> {
        self.hold.held()
    }

    pub fn next_piece(&self) -> PieceDef {
        self.next
    }

    pub fn active(&self) -> Option<Tetromino> {
        self.active
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Seed that continues the piece sequence
    pub fn seed(&self) -> u32 {
        self.factory.seed()
    }

    /// Take every event queued since the last drain.
    pub fn drain_events(&mut self) -> std::vec::Drain<'_, GameEvent> {
        self.events.drain(..)
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        out.width = self.config.width;
        out.height = self.config.height;
        out.cells.clear();
        out.cells.extend_from_slice(self.board.cells());
        out.active = self.active.map(ActiveSnapshot::from);
        out.ghost_y = self.ghost_y();
        out.next = self.next;
        out.hold = self.hold.held();
        out.can_hold = self.hold.can_hold();
        out.run_state = self.run_state;
        out.started = self.started;
        out.episode_id = self.episode_id;
        out.piece_id = self.piece_id;
        out.score = self.progress.score;
        out.level = self.progress.level;
        out.lines = self.progress.lines;
        out.drop_interval_ms = self.progress.drop_interval_ms;
        out.flash_ms = self.flash_ms;
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }

    /// Spawn the queued piece and refill the queue; re-arms hold.
    fn spawn_next(&mut self) -> bool {
        let def = std::mem::replace(&mut self.next, self.factory.next_piece());
        let spawned = self.place_spawn(def);
        if spawned {
            self.hold.on_spawn();
        }
        spawned
    }

    /// Put `def` at the spawn anchor, ending the game if it does not fit.
    fn place_spawn(&mut self, def: PieceDef) -> bool {
        let piece = def.spawn_at(&self.config);
        self.drop_timer_ms = 0;
        if check_collision(&self.board, &piece, 0, 0) {
            self.active = None;
            self.end_game();
            return false;
        }
        self.active = Some(piece);
        self.piece_id = self.piece_id.wrapping_add(1);
        true
    }

    fn end_game(&mut self) {
        self.run_state = RunState::GameOver;
        info!(
            "game over: score {} level {} lines {}",
            self.progress.score, self.progress.level, self.progress.lines
        );
        self.events.push(GameEvent::GameOver);
        self.events.push(GameEvent::StateChanged);
    }

    /// Try to move the active piece
    pub(crate) fn try_move(&mut self, dx: i8, dy: i8) -> bool {
        if !self.is_playing() {
            return false;
        }
        let Some(active) = self.active else {
            return false;
        };
        if check_collision(&self.board, &active, dx, dy) {
            return false;
        }
        self.active = Some(active.moved(dx, dy));
        true
    }

    pub fn move_left(&mut self) -> bool {
        self.try_move(-1, 0)
    }

    pub fn move_right(&mut self) -> bool {
        self.try_move(1, 0)
    }

    /// Step down one row for a per-cell bonus; no lock when blocked.
    pub fn soft_drop(&mut self) -> bool {
        if !self.try_move(0, -1) {
            return false;
        }
        self.progress.add_drop_points(1, false, &self.config);
        self.events.push(GameEvent::ScoreChanged(self.progress.score));
        self.events.push(GameEvent::StateChanged);
        true
    }

    /// Rotate the active piece, trying column kicks
    pub fn rotate(&mut self) -> bool {
        if !self.is_playing() {
            return false;
        }
        let Some(active) = self.active else {
            return false;
        };
        match try_rotate(&self.board, &active) {
            Some((rotated, kick)) => {
                trace!("rotated {:?} with kick {}", active.kind, kick);
                self.active = Some(rotated);
                true
            }
            None => false,
        }
    }

    /// Drop to the landing row, award the per-row bonus and lock at once.
    ///
    /// Returns the drop points awarded, or `None` when not playing.
    pub fn hard_drop(&mut self) -> Option<u32> {
        if !self.is_playing() {
            return None;
        }
        let active = self.active?;

        let rows = drop_distance(&self.board, &active);
        self.active = Some(active.moved(0, -rows));

        let points = self
            .progress
            .add_drop_points(rows as u32, true, &self.config);
        self.events.push(GameEvent::ScoreChanged(self.progress.score));

        let depth = rows as f32 / self.config.height as f32;
        let impact = (GRAVITY_LOCK_IMPACT + (1.0 - GRAVITY_LOCK_IMPACT) * depth).clamp(0.0, 1.0);
        self.lock_piece(impact);
        Some(points)
    }

    /// Bank the active piece or swap it with the held one (once per spawn)
    pub fn hold(&mut self) -> bool {
        if !self.is_playing() {
            return false;
        }
        let Some(active) = self.active else {
            return false;
        };

        // Banked pieces lose their rotation; a swap respawns the catalog shape.
        match self.hold.hold(PieceDef::new(active.kind)) {
            HoldOutcome::Unavailable => return false,
            HoldOutcome::Stored => {
                debug!("hold stored {:?}", active.kind);
                let def = std::mem::replace(&mut self.next, self.factory.next_piece());
                self.place_spawn(def);
            }
            HoldOutcome::Swapped(def) => {
                debug!("hold swapped {:?} for {:?}", active.kind, def.kind);
                self.place_spawn(PieceDef::new(def.kind));
            }
        }
        self.events.push(GameEvent::StateChanged);
        true
    }

    /// Merge the active piece, clear lines, score, then spawn the next piece.
    fn lock_piece(&mut self, impact: f32) {
        let Some(piece) = self.active.take() else {
            return;
        };

        self.board.lock_cells(&piece.cells(), piece.kind);
        self.events.push(GameEvent::PieceLocked { impact });

        let result = check_lines(&mut self.board, &mut self.progress, &self.config);
        if !result.is_noop() {
            debug!(
                "cleared rows {:?} for {} points",
                result.rows.as_slice(),
                result.points
            );
            self.flash_ms = self.config.flash_ms;
            self.events.push(GameEvent::ScoreChanged(self.progress.score));
            if let Some(level) = result.level_up {
                debug!(
                    "level {} reached, drop interval {}ms",
                    level, self.progress.drop_interval_ms
                );
                self.events.push(GameEvent::LevelChanged(level));
            }
            self.events.push(GameEvent::Flash {
                duration_ms: self.config.flash_ms,
            });
            self.events.push(GameEvent::LinesCleared {
                rows: result.rows,
                cells: result.cells,
            });
        }
        self.events.push(GameEvent::StateChanged);

        self.spawn_next();
    }

    /// Switch between playing and paused; no effect before start or after game over.
    pub fn toggle_pause(&mut self) -> bool {
        if !self.started {
            return false;
        }
        match self.run_state {
            RunState::Playing => {
                self.run_state = RunState::Paused;
                self.events.push(GameEvent::Paused);
            }
            RunState::Paused => {
                self.run_state = RunState::Playing;
                self.events.push(GameEvent::Resumed);
            }
            RunState::GameOver => return false,
        }
        self.events.push(GameEvent::StateChanged);
        true
    }

    /// Reinitialize board, progress, hold and next queue, then start again.
    ///
    /// The piece factory continues its sequence; queued events are kept.
    pub fn reset(&mut self) {
        let factory = std::mem::take(&mut self.factory);
        let events = std::mem::take(&mut self.events);
        let episode_id = self.episode_id.wrapping_add(1);

        *self = Self::build(self.config, factory);
        self.events = events;
        self.episode_id = episode_id;
        info!("game reset: episode {}", episode_id);
        self.start();
        self.events.push(GameEvent::ScoreChanged(self.progress.score));
        self.events.push(GameEvent::LevelChanged(self.progress.level));
    }

    /// Advance the gravity accumulator by `elapsed_ms`.
    ///
    /// Returns true when the active piece stepped down or locked.
    pub fn tick(&mut self, elapsed_ms: u32) -> bool {
        if !self.is_playing() {
            return false;
        }

        self.flash_ms = self.flash_ms.saturating_sub(elapsed_ms);

        let Some(active) = self.active else {
            return false;
        };

        self.drop_timer_ms = self.drop_timer_ms.saturating_add(elapsed_ms);
        if self.drop_timer_ms <= self.progress.drop_interval_ms {
            return false;
        }
        self.drop_timer_ms = 0;

        if check_collision(&self.board, &active, 0, -1) {
            self.lock_piece(GRAVITY_LOCK_IMPACT);
        } else {
            self.active = Some(active.moved(0, -1));
            trace!("gravity step to row {}", active.y - 1);
        }
        true
    }

    /// Apply a game action
    pub fn apply_action(&mut self, action: GameAction) -> bool {
        match action {
            GameAction::MoveLeft => self.move_left(),
            GameAction::MoveRight => self.move_right(),
            GameAction::SoftDrop => self.soft_drop(),
            GameAction::Rotate => self.rotate(),
            GameAction::HardDrop => self.hard_drop().is_some(),
            GameAction::Hold => self.hold(),
            GameAction::TogglePause => self.toggle_pause(),
            GameAction::Reset => {
                self.reset();
                true
            }
        }
    }

    /// Calculate the ghost piece Y position (where piece would land)
    pub fn ghost_y(&self) -> Option<i8> {
        self.active.map(|active| landing_y(&self.board, &active))
    }

    /// Check if piece can move in given direction
    pub fn can_move(&self, dx: i8, dy: i8) -> bool {
        self.active
            .map(|active| !check_collision(&self.board, &active, dx, dy))
            .unwrap_or(false)
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(1)
    }
}
