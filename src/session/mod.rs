#[cfg(feature = "interactive")]
pub mod input;

use crate::catalog::{ChartRecord, Difficulty};
use crate::error::{ArcError, ArcResult};
use crate::rating;
use serde::Serialize;
use std::sync::mpsc::Receiver;
use std::time::{Duration, Instant};
use strum_macros::Display;
use tracing::debug;

const HUNDRED_STEP: u32 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum SessionCommand {
    Increment,
    Decrement,
    IncrementHundred,
    DecrementHundred,
    MaxPure,
    ZeroPure,
    Quit,
}

/// What the input side can deliver to a running session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    Command(SessionCommand),
    Interrupt,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Continue,
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionExit {
    Quit,
    Interrupted,
    InputClosed,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ScoreSnapshot {
    pub song: String,
    pub difficulty: Difficulty,
    pub total_score: u32,
    pub pure_count: u32,
    pub lost_count: u32,
    pub play_rating: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionOutcome {
    pub exit: SessionExit,
    pub snapshot: ScoreSnapshot,
}

/// Live score calculator bound to a single chart.
#[derive(Debug, Clone)]
pub struct ScoreSession {
    chart: ChartRecord,
    pure_count: u32,
}

impl ScoreSession {
    pub fn new(chart: ChartRecord) -> ArcResult<Self> {
        if chart.notes == 0 {
            return Err(ArcError::Validation(format!(
                "'{}' [{}] has no notes to score",
                chart.song, chart.difficulty
            )));
        }
        Ok(Self {
            chart,
            pure_count: 0,
        })
    }

    /// Starts from `pure_count` instead of zero, capped at the note count.
    pub fn with_pure_count(mut self, pure_count: u32) -> Self {
        self.pure_count = pure_count.min(self.chart.notes);
        self
    }

    pub fn chart(&self) -> &ChartRecord {
        &self.chart
    }

    pub fn pure_count(&self) -> u32 {
        self.pure_count
    }

    pub fn notes(&self) -> u32 {
        self.chart.notes
    }

    pub fn lost_count(&self) -> u32 {
        self.chart.notes - self.pure_count
    }

    pub fn total_score(&self) -> u32 {
        rating::total_score(self.pure_count, self.chart.notes)
    }

    pub fn play_rating(&self) -> f64 {
        rating::play_rating(self.total_score(), self.chart.cc)
    }

    pub fn apply(&mut self, command: SessionCommand) -> Transition {
        let notes = self.chart.notes;
        self.pure_count = match command {
            SessionCommand::Increment => self.pure_count.saturating_add(1).min(notes),
            SessionCommand::Decrement => self.pure_count.saturating_sub(1),
            SessionCommand::IncrementHundred => {
                self.pure_count.saturating_add(HUNDRED_STEP).min(notes)
            }
            SessionCommand::DecrementHundred => self.pure_count.saturating_sub(HUNDRED_STEP),
            SessionCommand::MaxPure => notes,
            SessionCommand::ZeroPure => 0,
            SessionCommand::Quit => return Transition::Quit,
        };
        debug!("{} -> pure {}/{}", command, self.pure_count, notes);
        Transition::Continue
    }

    pub fn snapshot(&self) -> ScoreSnapshot {
        ScoreSnapshot {
            song: self.chart.song.clone(),
            difficulty: self.chart.difficulty,
            total_score: self.total_score(),
            pure_count: self.pure_count,
            lost_count: self.lost_count(),
            play_rating: self.play_rating(),
        }
    }

    /// Drives the session from `events` until a quit, an interrupt or the
    /// sender going away. `render` sees the session once up front and after
    /// every applied command.
    pub fn run<F>(&mut self, events: &Receiver<SessionEvent>, mut render: F) -> SessionOutcome
    where
        F: FnMut(&ScoreSession),
    {
        render(self);

        let exit = loop {
            match events.recv() {
                Ok(SessionEvent::Command(cmd)) => {
                    if self.apply(cmd) == Transition::Quit {
                        break SessionExit::Quit;
                    }
                    render(self);
                }
                Ok(SessionEvent::Interrupt) => break SessionExit::Interrupted,
                Err(_) => break SessionExit::InputClosed,
            }
        };

        SessionOutcome {
            exit,
            snapshot: self.snapshot(),
        }
    }
}

/// Drops a command that repeats the last accepted one within `window`, so a
/// held key does not fire on every auto-repeat.
#[derive(Debug)]
pub struct Debouncer {
    window: Duration,
    last: Option<(SessionCommand, Instant)>,
}

impl Debouncer {
    pub fn new(window: Duration) -> Self {
        Self { window, last: None }
    }

    pub fn accept(&mut self, command: SessionCommand, now: Instant) -> bool {
        if let Some((prev, at)) = self.last {
            if prev == command && now.duration_since(at) < self.window {
                return false;
            }
        }
        self.last = Some((command, now));
        true
    }
}
