//! Session - owns a game and its single frame-tick registration
//!
//! The host calls [`Session::tick`] from its frame callback. Ticks only reach
//! the game while the session holds an active [`TickHandle`]; `start` hands
//! out at most one, and `stop`/`destroy` revoke it. Resetting the game never
//! touches the handle, so a restart cannot double the frame loop.

use log::info;

use crate::events::{GameEvent, GameObserver};
use crate::game_state::GameState;
use crate::snapshot::GameSnapshot;
use crate::types::GameAction;

/// Identifies the active tick registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TickHandle(u64);

impl TickHandle {
    pub fn id(&self) -> u64 {
        self.0
    }
}

pub struct Session {
    game: GameState,
    observer: Option<Box<dyn GameObserver>>,
    handle: Option<TickHandle>,
    registrations: u64,
    destroyed: bool,
}

impl Session {
    pub fn new(game: GameState) -> Self {
        Self {
            game,
            observer: None,
            handle: None,
            registrations: 0,
            destroyed: false,
        }
    }

    /// Session that forwards every game event to `observer`.
    pub fn with_observer(game: GameState, observer: Box<dyn GameObserver>) -> Self {
        let mut session = Self::new(game);
        session.observer = Some(observer);
        session
    }

    pub fn set_observer(&mut self, observer: Box<dyn GameObserver>) {
        self.observer = Some(observer);
        self.flush();
    }

    /// Register the tick handle and start the game.
    ///
    /// Returns false when already running or destroyed.
    pub fn start(&mut self) -> bool {
        if self.destroyed || self.handle.is_some() {
            return false;
        }
        self.registrations += 1;
        self.handle = Some(TickHandle(self.registrations));
        self.game.start();
        self.flush();
        true
    }

    /// Revoke the tick handle. Returns whether one was active.
    pub fn stop(&mut self) -> bool {
        self.handle.take().is_some()
    }

    /// Stop ticking for good and drop the observer. Safe to call repeatedly.
    pub fn destroy(&mut self) {
        if self.destroyed {
            return;
        }
        self.flush();
        self.stop();
        self.observer = None;
        self.destroyed = true;
        info!(
            "session destroyed after {} tick registrations",
            self.registrations
        );
    }

    pub fn is_running(&self) -> bool {
        self.handle.is_some()
    }

    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    pub fn handle(&self) -> Option<TickHandle> {
        self.handle
    }

    /// Frame callback: advance the game by `delta_ms` if a handle is active.
    pub fn tick(&mut self, delta_ms: u32) -> bool {
        if self.handle.is_none() {
            return false;
        }
        let changed = self.game.tick(delta_ms);
        self.flush();
        changed
    }

    /// Apply an input command immediately, outside the gravity timer.
    pub fn apply_action(&mut self, action: GameAction) -> bool {
        if self.destroyed {
            return false;
        }
        let applied = self.game.apply_action(action);
        self.flush();
        applied
    }

    pub fn game(&self) -> &GameState {
        &self.game
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        self.game.snapshot_into(out);
    }

    /// Events not yet taken; only populated while no observer is attached.
    pub fn drain_events(&mut self) -> std::vec::Drain<'_, GameEvent> {
        self.game.drain_events()
    }

    fn flush(&mut self) {
        let Some(observer) = self.observer.as_deref_mut() else {
            return;
        };
        for event in self.game.drain_events() {
            event.dispatch(observer);
        }
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("handle", &self.handle)
            .field("registrations", &self.registrations)
            .field("destroyed", &self.destroyed)
            .field("observer", &self.observer.is_some())
            .finish_non_exhaustive()
    }
}
