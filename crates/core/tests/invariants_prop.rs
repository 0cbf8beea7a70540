//! Property tests over random command and delta sequences.
//!
//! Invariants covered:
//! - The active piece stays inside the board and off locked cells.
//! - Score and lines never decrease without a reset; level and drop interval
//!   always follow the line count.
//! - Every lock writes exactly four cells and every cleared row removes a
//!   full width of cells.
//! - Row compaction keeps surviving rows in order and pads empty rows on top.
//! - Game over is terminal: commands and ticks no longer change anything.

use blockdrop_core::scoring::{calculate_level, get_drop_interval_ms};
use blockdrop_core::types::{GameAction, PieceKind};
use blockdrop_core::{Board, GameConfig, GameEvent, GameState};
use proptest::prelude::*;

#[derive(Debug, Clone, Copy)]
enum Op {
    Act(GameAction),
    Tick(u32),
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => (0u32..2500).prop_map(Op::Tick),
        1 => Just(Op::Act(GameAction::MoveLeft)),
        1 => Just(Op::Act(GameAction::MoveRight)),
        1 => Just(Op::Act(GameAction::Rotate)),
        1 => Just(Op::Act(GameAction::SoftDrop)),
        1 => Just(Op::Act(GameAction::HardDrop)),
        1 => Just(Op::Act(GameAction::Hold)),
        1 => Just(Op::Act(GameAction::TogglePause)),
    ]
}

fn apply(game: &mut GameState, op: Op) {
    match op {
        Op::Act(action) => {
            game.apply_action(action);
        }
        Op::Tick(ms) => {
            game.tick(ms);
        }
    }
}

fn assert_active_in_bounds(game: &GameState) {
    let Some(active) = game.active() else {
        return;
    };
    for (x, y) in active.cells() {
        assert!(game.board().is_valid(x, y), "cell ({}, {}) off board", x, y);
        assert!(!game.board().is_occupied(x, y), "cell ({}, {}) overlaps", x, y);
    }
}

proptest! {
    #[test]
    fn rollout_respects_core_invariants(
        seed in any::<u32>(),
        ops in prop::collection::vec(op(), 1..200),
    ) {
        let config = GameConfig::default();
        let mut game = GameState::new(seed);
        game.start();

        for op in ops {
            let before_score = game.score();
            let before_lines = game.lines();
            let before_cells = game.board().occupied_count();
            let before_over = game.game_over();
            let before_board = game.board().clone();

            apply(&mut game, op);

            prop_assert!(game.score() >= before_score);
            prop_assert!(game.lines() >= before_lines);
            prop_assert_eq!(game.level(), calculate_level(game.lines(), &config));
            prop_assert_eq!(
                game.drop_interval_ms(),
                get_drop_interval_ms(game.level(), &config)
            );
            assert_active_in_bounds(&game);

            let events: Vec<GameEvent> = game.drain_events().collect();
            let locks = events
                .iter()
                .filter(|e| matches!(e, GameEvent::PieceLocked { .. }))
                .count();
            let cleared = (game.lines() - before_lines) as usize;
            let width = config.width as usize;
            prop_assert_eq!(
                game.board().occupied_count() + cleared * width,
                before_cells + locks * 4
            );

            if before_over {
                prop_assert!(game.game_over());
                prop_assert!(game.active().is_none());
                prop_assert_eq!(game.board(), &before_board);
                prop_assert_eq!(game.score(), before_score);
            }
        }
    }

    #[test]
    fn compaction_keeps_surviving_rows_in_order(
        rows in prop::collection::vec(prop::collection::vec(any::<bool>(), 6), 1..12),
        full_mask in prop::collection::vec(any::<bool>(), 12),
    ) {
        let width = 6u8;
        let height = 12u8;
        let mut board = Board::new(width, height);
        let mut expected: Vec<Vec<bool>> = Vec::new();
        let mut full = 0usize;

        for (y, row) in rows.iter().enumerate() {
            // Force some rows full, at most four of them.
            let make_full = full_mask[y] && full < 4;
            let filled: Vec<bool> = if make_full {
                full += 1;
                vec![true; width as usize]
            } else {
                let mut r = row.clone();
                r[y % width as usize] = false;
                r
            };
            for (x, &on) in filled.iter().enumerate() {
                if on {
                    board.set(x as i8, y as i8, Some(PieceKind::T));
                }
            }
            if !make_full {
                expected.push(filled);
            }
        }

        let cleared = board.clear_full_rows();
        prop_assert_eq!(cleared.len(), full);

        for y in 0..height as usize {
            for x in 0..width as usize {
                let want = expected.get(y).map(|r| r[x]).unwrap_or(false);
                prop_assert_eq!(board.is_occupied(x as i8, y as i8), want);
            }
        }
    }
}

#[test]
fn long_rollout_reaches_game_over_and_stays_there() {
    let mut game = GameState::new(20261019);
    game.start();

    // Hard dropping in the middle tops out quickly.
    for _ in 0..200 {
        if game.game_over() {
            break;
        }
        game.apply_action(GameAction::HardDrop);
    }
    assert!(game.game_over());

    let board = game.board().clone();
    for action in [
        GameAction::MoveLeft,
        GameAction::Rotate,
        GameAction::Hold,
        GameAction::SoftDrop,
        GameAction::HardDrop,
        GameAction::TogglePause,
    ] {
        assert!(!game.apply_action(action));
    }
    assert!(!game.tick(10_000));
    assert_eq!(game.board(), &board);

    assert!(game.apply_action(GameAction::Reset));
    assert!(game.is_playing());
    assert_eq!(game.board().occupied_count(), 0);
}
