//! Terminal runner (default binary).
//!
//! Drives a [`Session`] from a ~60 FPS frame loop: key presses are applied the
//! moment they arrive, and every frame advances gravity by the real elapsed
//! time before the snapshot is rendered.

use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{self, Event};

use blockdrop::args::{parse_run_args, SEED_ENV};
use blockdrop::core::{GameSnapshot, GameState, Session};
use blockdrop::input::{handle_key_event, is_actionable, should_quit};
use blockdrop::term::{FrameBuffer, GameView, RenderThrottle, TerminalRenderer, Viewport};
use blockdrop::types::FRAME_MS;

/// Redraw cadence while nothing moves (paused or game over).
const STATIC_FRAME_MS: u64 = 250;

fn main() -> Result<()> {
    let argv: Vec<String> = std::env::args().skip(1).collect();
    let run_args = parse_run_args(&argv)?;
    let config = run_args.game_config()?;
    let env_seed = std::env::var(SEED_ENV).ok();
    let seed = run_args.resolve_seed(env_seed.as_deref())?;
    let game = GameState::with_config(config, seed)?;

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, game);

    // Always try to restore terminal state.
    let _ = term.exit();
    let last = result?;
    eprintln!(
        "[blockdrop] seed {} score {} level {} lines {}",
        seed, last.score, last.level, last.lines
    );
    Ok(())
}

fn run(term: &mut TerminalRenderer, game: GameState) -> Result<GameSnapshot> {
    let mut session = Session::new(game);
    session.start();

    let view = GameView::default();
    let mut fb = FrameBuffer::new(0, 0);
    let mut snap = GameSnapshot::default();
    let mut throttle = RenderThrottle::new(STATIC_FRAME_MS);
    let mut fingerprint: u64 = 0;

    let started = Instant::now();
    let frame = Duration::from_millis(FRAME_MS as u64);
    let mut last_frame = Instant::now();

    loop {
        let timeout = frame.saturating_sub(last_frame.elapsed());
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if is_actionable(&key) => {
                    if should_quit(key) {
                        break;
                    }
                    if let Some(action) = handle_key_event(key) {
                        if session.apply_action(action) {
                            fingerprint += 1;
                        }
                    }
                }
                Event::Resize(_, _) => {
                    term.invalidate();
                    throttle.force();
                }
                _ => {}
            }
        }

        let elapsed = last_frame.elapsed();
        if elapsed >= frame {
            last_frame = Instant::now();
            let delta_ms = elapsed.as_millis().min(u32::MAX as u128) as u32;
            if session.tick(delta_ms) {
                fingerprint += 1;
            }
        }
        fingerprint += session.drain_events().count() as u64;

        session.snapshot_into(&mut snap);
        let now_ms = started.elapsed().as_millis() as u64;
        if throttle.should_render(now_ms, fingerprint, !snap.playable()) {
            let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
            view.render_into(&snap, Viewport::new(w, h), &mut fb);
            term.draw_swap(&mut fb)?;
        }
    }

    session.destroy();
    session.snapshot_into(&mut snap);
    Ok(snap)
}
