//! Collision and transform rules
//!
//! Pure functions over a board and a piece value. They never mutate the
//! board and accept pieces that are not active (hold validation, ghost
//! projection).

use crate::board::Board;
use crate::pieces::{rotate_shape, Tetromino};

/// Column kicks tried after a rotation, in priority order.
pub const KICK_OFFSETS: [i8; 5] = [0, -1, 1, -2, 2];

/// True if `piece` shifted by (dx, dy) leaves the board or overlaps a locked cell.
pub fn check_collision(board: &Board, piece: &Tetromino, dx: i8, dy: i8) -> bool {
    piece
        .cells_offset(dx, dy)
        .iter()
        .any(|&(x, y)| !board.is_valid(x, y))
}

/// Rotate with kick search.
///
/// Returns the rotated piece and the kick that was applied, or `None` when
/// every kick collides. Only the column is ever adjusted.
pub fn try_rotate(board: &Board, piece: &Tetromino) -> Option<(Tetromino, i8)> {
    let rotated = Tetromino {
        shape: rotate_shape(&piece.shape),
        ..*piece
    };

    KICK_OFFSETS
        .iter()
        .copied()
        .find(|&kick| !check_collision(board, &rotated, kick, 0))
        .map(|kick| (rotated.moved(kick, 0), kick))
}

/// Rotate with kick search, returning the piece unchanged if no kick fits.
pub fn rotate(board: &Board, piece: &Tetromino) -> Tetromino {
    try_rotate(board, piece)
        .map(|(rotated, _)| rotated)
        .unwrap_or(*piece)
}

/// Rows the piece can descend before the next step down would collide.
pub fn drop_distance(board: &Board, piece: &Tetromino) -> i8 {
    let mut distance = 0;
    while !check_collision(board, piece, 0, -(distance + 1)) {
        distance += 1;
    }
    distance
}

/// Row the piece would come to rest on (ghost projection).
pub fn landing_y(board: &Board, piece: &Tetromino) -> i8 {
    piece.y - drop_distance(board, piece)
}
