//! Integration tests for the game flow

use blockdrop::core::{Board, GameConfig, GameEvent, GameState, PieceFactory};
use blockdrop::types::{GameAction, PieceKind, RunState};

fn scripted(kinds: &[PieceKind]) -> GameState {
    GameState::with_factory(
        GameConfig::default(),
        PieceFactory::with_sequence(12345, kinds.iter().copied()),
    )
    .unwrap()
}

fn scripted_on(board: Board, kinds: &[PieceKind]) -> GameState {
    let mut game = scripted(kinds);
    assert!(game.preset_board(board));
    game
}

#[test]
fn test_game_lifecycle() {
    let mut game = GameState::new(12345);
    assert!(!game.started());

    assert!(game.start());
    assert!(game.started());
    assert!(game.active().is_some());
    assert_eq!(game.run_state(), RunState::Playing);
}

#[test]
fn test_o_hard_drop_on_empty_board() {
    let mut game = scripted(&[PieceKind::O, PieceKind::T]);
    game.start();

    assert!(game.apply_action(GameAction::HardDrop));

    for (x, y) in [(4, 0), (5, 0), (4, 1), (5, 1)] {
        assert_eq!(game.board().get(x, y), Some(Some(PieceKind::O)));
    }
    assert_eq!(game.board().occupied_count(), 4);
    assert_eq!(game.score(), 36);
    assert_eq!(game.lines(), 0);

    let next = game.active().unwrap();
    assert_eq!(next.kind, PieceKind::T);
    assert_eq!((next.x, next.y), (4, 18));
}

#[test]
fn test_move_left_at_wall_is_idempotent() {
    let mut game = scripted(&[PieceKind::T]);
    game.start();

    let mut moves = 0;
    while game.apply_action(GameAction::MoveLeft) {
        moves += 1;
    }
    assert_eq!(moves, 3);
    let at_wall = game.snapshot();

    for _ in 0..5 {
        assert!(!game.apply_action(GameAction::MoveLeft));
    }
    assert_eq!(game.snapshot(), at_wall);
}

#[test]
fn test_double_clear_scores_at_level() {
    let board = Board::from_ascii(10, 20, &["####..####", "####..####"]);
    let mut game = scripted_on(board, &[PieceKind::O, PieceKind::L]);
    game.start();

    game.apply_action(GameAction::HardDrop);
    assert_eq!(game.lines(), 2);
    assert_eq!(game.score(), 300 + 36);
    assert_eq!(game.board().occupied_count(), 0);
}

#[test]
fn test_four_line_clear_with_vertical_i() {
    let row = ".#########";
    let board = Board::from_ascii(10, 20, &[row, row, row, row]);
    let mut game = scripted_on(board, &[PieceKind::I, PieceKind::O]);
    game.start();

    // Step down once so the vertical shape fits under the ceiling.
    assert!(game.tick(1001));
    assert!(game.apply_action(GameAction::Rotate));
    for _ in 0..3 {
        assert!(game.apply_action(GameAction::MoveLeft));
    }
    assert_eq!(game.active().unwrap().x, 0);

    game.apply_action(GameAction::HardDrop);
    assert_eq!(game.lines(), 4);
    assert_eq!(game.score(), 800 + 32);
    assert_eq!(game.board().occupied_count(), 0);
}

#[test]
fn test_hold_with_empty_slot_into_blocked_spawn_ends_game() {
    // I spawns on row 18 only; O also needs (5, 19).
    let mut board = Board::default();
    board.set(5, 19, Some(PieceKind::Z));
    let mut game = scripted_on(board, &[PieceKind::I, PieceKind::O]);
    game.start();
    assert_eq!(game.run_state(), RunState::Playing);

    assert!(game.apply_action(GameAction::Hold));
    assert_eq!(game.run_state(), RunState::GameOver);
    assert!(game.active().is_none());
    assert_eq!(game.hold_piece().unwrap().kind, PieceKind::I);
    assert_eq!(game.board().occupied_count(), 1);

    let events: Vec<_> = game.drain_events().collect();
    assert!(events.contains(&GameEvent::GameOver));
}

#[test]
fn test_blocked_first_spawn_ends_game_at_start() {
    let mut board = Board::default();
    board.set(4, 18, Some(PieceKind::Z));
    let mut game = scripted_on(board, &[PieceKind::T]);
    game.start();
    assert!(game.game_over());
    assert!(game.active().is_none());
}

#[test]
fn test_preset_board_rejected_after_start_or_size_mismatch() {
    let mut game = scripted(&[PieceKind::T]);
    assert!(!game.preset_board(Board::new(8, 20)));
    game.start();
    assert!(!game.preset_board(Board::default()));
}

#[test]
fn test_pause_freezes_gravity_and_commands() {
    let mut game = scripted(&[PieceKind::T]);
    game.start();
    assert!(game.apply_action(GameAction::TogglePause));

    let frozen = game.snapshot();
    assert!(!game.tick(60_000));
    assert!(!game.apply_action(GameAction::Rotate));
    assert!(!game.apply_action(GameAction::HardDrop));
    assert_eq!(game.snapshot(), frozen);

    assert!(game.apply_action(GameAction::TogglePause));
    assert!(game.tick(1001));
}

#[test]
fn test_reset_after_game_over() {
    let mut board = Board::default();
    board.set(4, 18, Some(PieceKind::Z));
    let mut game = scripted_on(board, &[PieceKind::T]);
    game.start();
    assert!(game.game_over());

    assert!(game.apply_action(GameAction::Reset));
    assert_eq!(game.run_state(), RunState::Playing);
    assert_eq!(game.board().occupied_count(), 0);
    assert!(game.active().is_some());
    assert_eq!(game.episode_id(), 1);
}

#[test]
fn test_hard_drop_impact_scales_with_distance() {
    let mut game = scripted(&[PieceKind::O, PieceKind::O, PieceKind::O]);
    game.start();
    game.apply_action(GameAction::HardDrop);
    let first = locked_impact(&mut game);

    // Second O lands on the first: two rows shorter.
    game.apply_action(GameAction::HardDrop);
    let second = locked_impact(&mut game);

    assert!((first - (0.25 + 0.75 * 18.0 / 20.0)).abs() < 1e-6);
    assert!(second < first);
    assert!(second >= 0.25);
}

fn locked_impact(game: &mut GameState) -> f32 {
    game.drain_events()
        .find_map(|e| match e {
            GameEvent::PieceLocked { impact } => Some(impact),
            _ => None,
        })
        .unwrap()
}

#[test]
fn test_same_seed_same_game() {
    let script = [
        GameAction::MoveLeft,
        GameAction::Rotate,
        GameAction::HardDrop,
        GameAction::MoveRight,
        GameAction::SoftDrop,
        GameAction::Hold,
        GameAction::HardDrop,
    ];
    let play = || {
        let mut game = GameState::new(777);
        game.start();
        for (i, action) in script.iter().cycle().take(60).enumerate() {
            game.apply_action(*action);
            game.tick((i as u32 * 37) % 1200);
        }
        game.snapshot()
    };
    assert_eq!(play(), play());
}

#[test]
fn test_soft_drop_scores_one_per_row() {
    let mut game = scripted(&[PieceKind::T]);
    game.start();
    for _ in 0..5 {
        assert!(game.apply_action(GameAction::SoftDrop));
    }
    assert_eq!(game.score(), 5);
    assert_eq!(game.active().unwrap().y, 13);
}
