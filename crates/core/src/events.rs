//! Notifications for presentation, HUD and audio.
//!
//! The engine queues [`GameEvent`]s as it mutates state; consumers drain the
//! queue and either match on the events or forward them to a
//! [`GameObserver`]. Nothing in the engine waits on a consumer.

use crate::board::FullRows;
use crate::scoring::ClearedCell;

#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    /// Rows removed by a lock, bottom to top, with every removed cell and its color.
    LinesCleared {
        rows: FullRows,
        cells: Vec<ClearedCell>,
    },
    ScoreChanged(u32),
    LevelChanged(u32),
    /// A piece was merged into the board; severity in `[0, 1]`.
    PieceLocked { impact: f32 },
    /// Transient line-clear highlight.
    Flash { duration_ms: u32 },
    /// HUD refresh: score, level, lines, hold or next changed.
    StateChanged,
    Paused,
    Resumed,
    GameOver,
}

/// Callback view of [`GameEvent`]. Every method defaults to doing nothing.
pub trait GameObserver {
    fn on_lines_cleared(&mut self, _rows: &[usize], _cells: &[ClearedCell]) {}
    fn on_score_changed(&mut self, _score: u32) {}
    fn on_level_changed(&mut self, _level: u32) {}
    fn on_piece_locked(&mut self, _impact: f32) {}
    fn on_flash(&mut self, _duration_ms: u32) {}
    fn on_state_changed(&mut self) {}
    fn on_pause_changed(&mut self, _paused: bool) {}
    fn on_game_over(&mut self) {}
}

impl GameEvent {
    /// Forward this event to the matching observer callback.
    pub fn dispatch(&self, observer: &mut dyn GameObserver) {
        match self {
            GameEvent::LinesCleared { rows, cells } => observer.on_lines_cleared(rows, cells),
            GameEvent::ScoreChanged(score) => observer.on_score_changed(*score),
            GameEvent::LevelChanged(level) => observer.on_level_changed(*level),
            GameEvent::PieceLocked { impact } => observer.on_piece_locked(*impact),
            GameEvent::Flash { duration_ms } => observer.on_flash(*duration_ms),
            GameEvent::StateChanged => observer.on_state_changed(),
            GameEvent::Paused => observer.on_pause_changed(true),
            GameEvent::Resumed => observer.on_pause_changed(false),
            GameEvent::GameOver => observer.on_game_over(),
        }
    }
}
