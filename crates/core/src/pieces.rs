//! Pieces module - shape catalog and piece values
//!
//! Every kind is defined by four cell offsets relative to an anchor, in y-up
//! coordinates. Shapes are returned by value, so a piece can rotate its own
//! offsets without affecting the catalog or any other piece.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::config::GameConfig;
use crate::types::PieceKind;

/// Offset of a single mino relative to piece anchor
pub type MinoOffset = (i8, i8);

/// Shape of a piece - 4 mino offsets from piece anchor
pub type PieceShape = [MinoOffset; 4];

/// Catalog shape (spawn orientation) for a piece kind
pub fn catalog_shape(kind: PieceKind) -> PieceShape {
    match kind {
        PieceKind::I => [(-1, 0), (0, 0), (1, 0), (2, 0)],
        PieceKind::O => [(0, 0), (1, 0), (0, 1), (1, 1)],
        PieceKind::T => [(-1, 0), (0, 0), (1, 0), (0, 1)],
        PieceKind::S => [(-1, 0), (0, 0), (0, 1), (1, 1)],
        PieceKind::Z => [(-1, 1), (0, 1), (0, 0), (1, 0)],
        PieceKind::J => [(-1, 1), (-1, 0), (0, 0), (1, 0)],
        PieceKind::L => [(-1, 0), (0, 0), (1, 0), (1, 1)],
    }
}

/// Rotate every offset 90° with `(x, y) -> (-y, x)`.
///
/// Four applications return the original shape.
pub fn rotate_shape(shape: &PieceShape) -> PieceShape {
    shape.map(|(x, y)| (-y, x))
}

/// Anchor a piece of `kind` spawns at.
///
/// Column `floor(width / 2) - 1`, one further left for the straight piece,
/// row `height - 2`.
pub fn spawn_position(kind: PieceKind, config: &GameConfig) -> (i8, i8) {
    let x = match kind {
        PieceKind::I => config.spawn_x() - 1,
        _ => config.spawn_x(),
    };
    (x, config.spawn_y())
}

/// A piece without a position: what the factory produces and the hold slot stores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PieceDef {
    pub kind: PieceKind,
    pub shape: PieceShape,
}

impl PieceDef {
    /// Fresh definition with the catalog shape
    pub fn new(kind: PieceKind) -> Self {
        Self {
            kind,
            shape: catalog_shape(kind),
        }
    }

    pub fn color(&self) -> u32 {
        self.kind.color()
    }

    /// Place this definition at the standard spawn anchor.
    pub fn spawn_at(self, config: &GameConfig) -> Tetromino {
        let (x, y) = spawn_position(self.kind, config);
        Tetromino {
            kind: self.kind,
            shape: self.shape,
            x,
            y,
        }
    }
}

/// Active falling piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Tetromino {
    pub kind: PieceKind,
    pub shape: PieceShape,
    pub x: i8,
    pub y: i8,
}

impl Tetromino {
    pub fn color(&self) -> u32 {
        self.kind.color()
    }

    /// Absolute footprint
    pub fn cells(&self) -> [(i8, i8); 4] {
        self.cells_offset(0, 0)
    }

    /// Absolute footprint shifted by (dx, dy)
    pub fn cells_offset(&self, dx: i8, dy: i8) -> [(i8, i8); 4] {
        self.shape.map(|(mx, my)| (self.x + mx + dx, self.y + my + dy))
    }

    /// Same piece moved by (dx, dy)
    pub fn moved(&self, dx: i8, dy: i8) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..*self
        }
    }
}
