//! Hot-key handling on a background thread.

use std::io;
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal;
use sightline_core::config::timing::FRAME_DELAY_STEP_MS;
use sightline_core::{SharedSettings, Toggle};
use tracing::{debug, warn};

use crate::render;
use crate::shutdown::ShutdownSignal;

const POLL_INTERVAL: Duration = Duration::from_millis(100);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Quit,
    Toggle(Toggle),
    AdjustFrameDelay(i64),
}

pub fn action_for(key: &KeyEvent) -> Option<KeyAction> {
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('Q') => Some(KeyAction::Quit),
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            Some(KeyAction::Quit)
        }
        KeyCode::Char('+') | KeyCode::Char('=') => {
            Some(KeyAction::AdjustFrameDelay(FRAME_DELAY_STEP_MS as i64))
        }
        KeyCode::Char('-') => Some(KeyAction::AdjustFrameDelay(-(FRAME_DELAY_STEP_MS as i64))),
        KeyCode::Char(c) => Toggle::from_key(c).map(KeyAction::Toggle),
        _ => None,
    }
}

/// Keeps the terminal in raw mode so single key presses arrive without Enter.
///
/// Ctrl+C no longer raises a signal while this is held; [`action_for`] maps
/// it to [`KeyAction::Quit`] instead.
pub struct RawModeGuard;

impl RawModeGuard {
    pub fn enable() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        Ok(Self)
    }

    /// Raw mode when stdin is a terminal, line-buffered input otherwise.
    pub fn try_enable() -> Option<Self> {
        match Self::enable() {
            Ok(guard) => Some(guard),
            Err(e) => {
                warn!("Raw terminal mode unavailable, hot-keys need Enter: {}", e);
                None
            }
        }
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        if let Err(e) = terminal::disable_raw_mode() {
            warn!("Failed to restore terminal mode: {}", e);
        }
    }
}

/// Spawn the hot-key monitor.
///
/// The thread is the only writer of `settings`; it exits on its own once
/// `shutdown` is triggered.
pub fn spawn_keyboard_monitor(
    shutdown: Arc<ShutdownSignal>,
    settings: SharedSettings,
) -> JoinHandle<()> {
    thread::spawn(move || {
        while !shutdown.is_shutdown() {
            if !event::poll(POLL_INTERVAL).unwrap_or(false) {
                continue;
            }
            let Ok(Event::Key(key)) = event::read() else {
                continue;
            };
            if key.kind != KeyEventKind::Press {
                continue;
            }

            match action_for(&key) {
                Some(KeyAction::Quit) => {
                    render::print_lines("\nShutting down...");
                    shutdown.trigger();
                }
                Some(KeyAction::Toggle(toggle)) => {
                    let updated = settings.update(|s| s.toggle(toggle));
                    render::print_lines(&render::format_toggle(toggle, &updated));
                }
                Some(KeyAction::AdjustFrameDelay(delta)) => {
                    let updated = settings.update(|s| s.adjust_frame_delay(delta));
                    render::print_lines(&format!("Frame delay: {} ms", updated.frame_delay_ms));
                }
                None => debug!("Ignored key {:?}", key.code),
            }
        }
    })
}
