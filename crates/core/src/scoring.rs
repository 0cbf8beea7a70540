//! Scoring module - line clears, drop bonuses, level and gravity progression
//!
//! Rules:
//! - A clear of N rows awards `line_points[N] * level`.
//! - Level is `total_lines / lines_per_level + 1`.
//! - The drop interval shrinks by a fixed step per level down to a floor.
//! - Soft drop awards points per cell, hard drop per row traversed.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::board::{Board, FullRows};
use crate::config::GameConfig;
use crate::types::{NEUTRAL_COLOR, MAX_CLEAR_ROWS};

/// Calculate line clear score
/// lines: number of lines cleared (1-4)
/// level: current level (1-based)
pub fn calculate_line_score(lines: usize, level: u32, config: &GameConfig) -> u32 {
    if lines == 0 || lines > MAX_CLEAR_ROWS {
        return 0;
    }
    config.line_points[lines].saturating_mul(level)
}

/// Calculate drop score
/// soft_drop: `soft_drop_points` per cell
/// hard_drop: `hard_drop_points` per row
pub fn calculate_drop_score(cells: u32, is_hard_drop: bool, config: &GameConfig) -> u32 {
    let per_cell = if is_hard_drop {
        config.hard_drop_points
    } else {
        config.soft_drop_points
    };
    cells.saturating_mul(per_cell)
}

/// Level management
/// Level increases every `lines_per_level` lines cleared, starting at 1
pub fn calculate_level(total_lines: u32, config: &GameConfig) -> u32 {
    total_lines / config.lines_per_level + 1
}

/// Get drop interval for a level (in milliseconds)
/// `max(min, base - (level - 1) * step)`
pub fn get_drop_interval_ms(level: u32, config: &GameConfig) -> u32 {
    let reduction = level
        .saturating_sub(1)
        .saturating_mul(config.level_drop_step_ms);
    config
        .base_drop_interval_ms
        .saturating_sub(reduction)
        .max(config.min_drop_interval_ms)
}

/// Score, level, lines and gravity of one session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Progress {
    pub score: u32,
    pub level: u32,
    pub lines: u32,
    pub drop_interval_ms: u32,
}

impl Progress {
    pub fn new(config: &GameConfig) -> Self {
        Self {
            score: 0,
            level: 1,
            lines: 0,
            drop_interval_ms: config.base_drop_interval_ms,
        }
    }

    /// Add drop bonus points; returns the points awarded.
    pub fn add_drop_points(&mut self, cells: u32, is_hard_drop: bool, config: &GameConfig) -> u32 {
        let points = calculate_drop_score(cells, is_hard_drop, config);
        self.score = self.score.saturating_add(points);
        points
    }

    /// Account for `cleared` rows: score at the current level, then lines and level.
    ///
    /// Returns `(points, Some(new_level))` when the level went up.
    pub fn apply_clear(&mut self, cleared: usize, config: &GameConfig) -> (u32, Option<u32>) {
        if cleared == 0 {
            return (0, None);
        }
        let points = calculate_line_score(cleared, self.level, config);
        self.score = self.score.saturating_add(points);
        self.lines = self.lines.saturating_add(cleared as u32);

        let level = calculate_level(self.lines, config);
        if level > self.level {
            self.level = level;
            self.drop_interval_ms = get_drop_interval_ms(level, config).min(self.drop_interval_ms);
            return (points, Some(level));
        }
        (points, None)
    }
}

/// One cell removed by a line clear, for particle effects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ClearedCell {
    pub x: i8,
    pub y: i8,
    pub color: u32,
}

/// Outcome of [`check_lines`]
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ClearResult {
    /// Cleared row indices, bottom to top
    pub rows: FullRows,
    /// Every cell of every cleared row, captured before compaction
    pub cells: Vec<ClearedCell>,
    pub points: u32,
    /// New level, when this clear raised it
    pub level_up: Option<u32>,
}

impl ClearResult {
    pub fn is_noop(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Detect full rows, compact the board and update progress.
pub fn check_lines(board: &mut Board, progress: &mut Progress, config: &GameConfig) -> ClearResult {
    let rows = board.full_rows();
    if rows.is_empty() {
        return ClearResult::default();
    }

    let mut cells = Vec::with_capacity(rows.len() * board.width() as usize);
    for &y in &rows {
        for (x, cell) in board.row(y).iter().enumerate() {
            cells.push(ClearedCell {
                x: x as i8,
                y: y as i8,
                color: cell.map(|kind| kind.color()).unwrap_or(NEUTRAL_COLOR),
            });
        }
    }

    board.remove_rows(&rows);
    let (points, level_up) = progress.apply_clear(rows.len(), config);

    ClearResult {
        rows,
        cells,
        points,
        level_up,
    }
}
