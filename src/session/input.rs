//! Terminal key reader feeding a [`ScoreSession`](super::ScoreSession).
//!
//! Keys are read on a background thread in raw mode and delivered as
//! [`SessionEvent`]s over a channel.

use super::{Debouncer, SessionCommand, SessionEvent};
use crate::error::{ArcError, ArcResult};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};
use tracing::{debug, error};

const POLL_INTERVAL: Duration = Duration::from_millis(20);

/// Translates a key press into a session event. Releases and repeats
/// reported as separate kinds are ignored.
pub fn map_key(key: &KeyEvent) -> Option<SessionEvent> {
    if key.kind != KeyEventKind::Press {
        return None;
    }

    let shift = key.modifiers.contains(KeyModifiers::SHIFT);
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

    let command = match key.code {
        KeyCode::Char('c') | KeyCode::Char('C') if ctrl => return Some(SessionEvent::Interrupt),
        KeyCode::Up if ctrl => SessionCommand::MaxPure,
        KeyCode::Up if shift => SessionCommand::IncrementHundred,
        KeyCode::Up => SessionCommand::Increment,
        KeyCode::Down if ctrl => SessionCommand::ZeroPure,
        KeyCode::Down if shift => SessionCommand::DecrementHundred,
        KeyCode::Down => SessionCommand::Decrement,
        KeyCode::Right => SessionCommand::MaxPure,
        KeyCode::Left => SessionCommand::ZeroPure,
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => SessionCommand::Quit,
        _ => return None,
    };
    Some(SessionEvent::Command(command))
}

/// Puts the terminal in raw mode for its lifetime.
pub struct RawModeGuard;

impl RawModeGuard {
    pub fn enable() -> ArcResult<Self> {
        terminal::enable_raw_mode().map_err(|e| ArcError::Terminal(e.to_string()))?;
        Ok(Self)
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        if let Err(e) = terminal::disable_raw_mode() {
            error!("Failed to restore terminal: {}", e);
        }
    }
}

/// Background key reader. Stops when dropped.
pub struct KeyReader {
    stop: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
}

impl KeyReader {
    /// Spawns the reader and returns it with the receiving end of its
    /// channel. SIGINT is routed into the same channel as an interrupt.
    pub fn spawn(debounce: Duration) -> ArcResult<(Self, Receiver<SessionEvent>)> {
        let (tx, rx) = mpsc::channel();

        let interrupt_tx = tx.clone();
        ctrlc::set_handler(move || {
            let _ = interrupt_tx.send(SessionEvent::Interrupt);
        })
        .map_err(|e| ArcError::Terminal(format!("cannot install Ctrl+C handler: {}", e)))?;

        let stop = Arc::new(AtomicBool::new(false));
        let thread_stop = Arc::clone(&stop);
        let handle = thread::Builder::new()
            .name("key-reader".to_string())
            .spawn(move || read_keys(tx, thread_stop, debounce))?;

        Ok((
            Self {
                stop,
                handle: Some(handle),
            },
            rx,
        ))
    }
}

impl Drop for KeyReader {
    fn drop(&mut self) {
        self.stop.store(true, Ordering::Relaxed);
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

fn read_keys(tx: Sender<SessionEvent>, stop: Arc<AtomicBool>, debounce: Duration) {
    let mut debouncer = Debouncer::new(debounce);

    while !stop.load(Ordering::Relaxed) {
        let ready = match event::poll(POLL_INTERVAL) {
            Ok(ready) => ready,
            Err(e) => {
                error!("Key polling failed: {}", e);
                let _ = tx.send(SessionEvent::Interrupt);
                return;
            }
        };
        if !ready {
            continue;
        }

        let key = match event::read() {
            Ok(Event::Key(key)) => key,
            Ok(_) => continue,
            Err(e) => {
                error!("Key read failed: {}", e);
                let _ = tx.send(SessionEvent::Interrupt);
                return;
            }
        };

        let Some(ev) = map_key(&key) else {
            continue;
        };
        if let SessionEvent::Command(cmd) = ev {
            if !debouncer.accept(cmd, Instant::now()) {
                debug!("Debounced {}", cmd);
                continue;
            }
        }
        if tx.send(ev).is_err() {
            return;
        }
    }
}
