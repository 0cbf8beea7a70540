//! Hold slot - one banked piece, one swap per spawn

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::pieces::PieceDef;

/// What a hold request did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HoldOutcome {
    /// Already used since the last spawn; nothing changed.
    Unavailable,
    /// Slot was empty; the active piece is banked and a fresh piece must spawn.
    Stored,
    /// The previously held definition comes back into play.
    Swapped(PieceDef),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct HoldSlot {
    held: Option<PieceDef>,
    can_hold: bool,
}

impl HoldSlot {
    pub fn new() -> Self {
        Self {
            held: None,
            can_hold: true,
        }
    }

    pub fn held(&self) -> Option<PieceDef> {
        self.held
    }

    pub fn can_hold(&self) -> bool {
        self.can_hold
    }

    /// Re-arm the slot; called exactly once per spawn.
    pub fn on_spawn(&mut self) {
        self.can_hold = true;
    }

    /// Bank `active` and report what should become active instead.
    pub fn hold(&mut self, active: PieceDef) -> HoldOutcome {
        if !self.can_hold {
            return HoldOutcome::Unavailable;
        }
        self.can_hold = false;
        match self.held.replace(active) {
            Some(previous) => HoldOutcome::Swapped(previous),
            None => HoldOutcome::Stored,
        }
    }
}

impl Default for HoldSlot {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pieces::rotate_shape;
    use crate::types::PieceKind;

    #[test]
    fn test_first_hold_stores() {
        let mut slot = HoldSlot::new();
        assert_eq!(slot.hold(PieceDef::new(PieceKind::T)), HoldOutcome::Stored);
        assert_eq!(slot.held().map(|d| d.kind), Some(PieceKind::T));
        assert!(!slot.can_hold());
    }

    #[test]
    fn test_second_hold_before_spawn_is_noop() {
        let mut slot = HoldSlot::new();
        slot.hold(PieceDef::new(PieceKind::T));
        assert_eq!(
            slot.hold(PieceDef::new(PieceKind::I)),
            HoldOutcome::Unavailable
        );
        assert_eq!(slot.held().map(|d| d.kind), Some(PieceKind::T));
    }

    #[test]
    fn test_swap_after_spawn_keeps_current_shape() {
        let mut slot = HoldSlot::new();
        slot.hold(PieceDef::new(PieceKind::T));
        slot.on_spawn();

        let rotated_l = PieceDef {
            kind: PieceKind::L,
            shape: rotate_shape(&PieceDef::new(PieceKind::L).shape),
        };
        assert_eq!(
            slot.hold(rotated_l),
            HoldOutcome::Swapped(PieceDef::new(PieceKind::T))
        );
        assert_eq!(slot.held(), Some(rotated_l));
    }
}
