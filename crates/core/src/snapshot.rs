//! Read-only view of a game for renderers and tooling.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::pieces::{PieceDef, PieceShape, Tetromino};
use crate::types::{Cell, PieceKind, RunState, BOARD_HEIGHT, BOARD_WIDTH};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ActiveSnapshot {
    pub kind: PieceKind,
    pub shape: PieceShape,
    pub x: i8,
    pub y: i8,
}

impl ActiveSnapshot {
    pub fn cells(&self) -> [(i8, i8); 4] {
        self.shape.map(|(mx, my)| (self.x + mx, self.y + my))
    }

    /// Footprint shifted to the landing row `ghost_y`
    pub fn cells_at(&self, ghost_y: i8) -> [(i8, i8); 4] {
        self.shape.map(|(mx, my)| (self.x + mx, ghost_y + my))
    }

    pub fn color(&self) -> u32 {
        self.kind.color()
    }
}

impl From<Tetromino> for ActiveSnapshot {
    fn from(value: Tetromino) -> Self {
        Self {
            kind: value.kind,
            shape: value.shape,
            x: value.x,
            y: value.y,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GameSnapshot {
    pub width: u8,
    pub height: u8,
    /// Row-major, bottom row first
    pub cells: Vec<Cell>,
    pub active: Option<ActiveSnapshot>,
    pub ghost_y: Option<i8>,
    pub next: PieceDef,
    pub hold: Option<PieceDef>,
    pub can_hold: bool,
    pub run_state: RunState,
    pub started: bool,
    pub episode_id: u32,
    pub piece_id: u32,
    pub score: u32,
    pub level: u32,
    pub lines: u32,
    pub drop_interval_ms: u32,
    pub flash_ms: u32,
}

impl GameSnapshot {
    /// Locked cell at (x, y); `None` when empty or off the board.
    pub fn cell(&self, x: i8, y: i8) -> Cell {
        if x < 0
            || y < 0
            || i16::from(x) >= i16::from(self.width)
            || i16::from(y) >= i16::from(self.height)
        {
            return None;
        }
        self.cells
            .get(y as usize * self.width as usize + x as usize)
            .copied()
            .flatten()
    }

    pub fn playable(&self) -> bool {
        self.started && self.run_state == RunState::Playing
    }

    pub fn paused(&self) -> bool {
        self.run_state == RunState::Paused
    }

    pub fn game_over(&self) -> bool {
        self.run_state == RunState::GameOver
    }

    pub fn flashing(&self) -> bool {
        self.flash_ms > 0
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            width: BOARD_WIDTH,
            height: BOARD_HEIGHT,
            cells: vec![None; BOARD_WIDTH as usize * BOARD_HEIGHT as usize],
            active: None,
            ghost_y: None,
            next: PieceDef::new(PieceKind::I),
            hold: None,
            can_hold: true,
            run_state: RunState::Playing,
            started: false,
            episode_id: 0,
            piece_id: 0,
            score: 0,
            level: 1,
            lines: 0,
            drop_interval_ms: 0,
            flash_ms: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Board;
    use crate::game_state::GameState;
    use crate::rng::PieceFactory;
    use crate::config::GameConfig;

    #[test]
    fn test_snapshot_mirrors_state() {
        let mut game = GameState::with_factory(
            GameConfig::default(),
            PieceFactory::with_sequence(1, [PieceKind::T, PieceKind::O]),
        )
        .unwrap();
        assert!(game.preset_board(Board::from_ascii(10, 20, &["Z........."])));
        game.start();

        let snap = game.snapshot();
        assert!(snap.playable());
        assert_eq!(snap.cell(0, 0), Some(PieceKind::Z));
        assert_eq!(snap.cell(1, 0), None);
        assert_eq!(snap.cell(-1, 0), None);
        assert_eq!(snap.next.kind, PieceKind::O);

        let active = snap.active.unwrap();
        assert_eq!(active.kind, PieceKind::T);
        assert_eq!(snap.ghost_y, Some(0));
        assert!(active.cells_at(0).contains(&(4, 1)));
    }

    #[test]
    fn test_snapshot_into_reuses_buffer() {
        let mut game = GameState::new(3);
        game.start();
        let mut snap = GameSnapshot::default();
        game.snapshot_into(&mut snap);
        let cap = snap.cells.capacity();
        game.snapshot_into(&mut snap);
        assert_eq!(snap.cells.capacity(), cap);
        assert_eq!(snap.cells.len(), 200);
    }
}
