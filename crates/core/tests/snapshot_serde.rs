#![cfg(feature = "serde")]

use blockdrop_core::types::{GameAction, PieceKind, RunState};
use blockdrop_core::{GameConfig, GameSnapshot, GameState, PieceFactory};

#[test]
fn snapshot_survives_json() {
    let mut game = GameState::with_factory(
        GameConfig::default(),
        PieceFactory::with_sequence(9, [PieceKind::S, PieceKind::J, PieceKind::Z]),
    )
    .unwrap();
    game.start();
    game.apply_action(GameAction::Hold);
    game.apply_action(GameAction::HardDrop);

    let snap = game.snapshot();
    let json = serde_json::to_string(&snap).unwrap();
    let back: GameSnapshot = serde_json::from_str(&json).unwrap();

    assert_eq!(back, snap);
    assert_eq!(back.hold.map(|d| d.kind), Some(PieceKind::S));
    assert_eq!(back.run_state, RunState::Playing);
    assert_eq!(back.active.map(|a| a.kind), Some(PieceKind::Z));
}

#[test]
fn config_fields_are_named() {
    let value = serde_json::to_value(GameConfig::default()).unwrap();
    assert_eq!(value["base_drop_interval_ms"], 1000);
    assert_eq!(value["line_points"][4], 800);
    assert_eq!(value["lines_per_level"], 10);
}
