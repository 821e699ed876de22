//! Logger hooks invoked around every plain-action dispatch.
//!
//! The store calls, in order: `log_start`, `log_state(Prev)`, `log_action`,
//! then after the reducers ran `log_state(Next)` and `log_end`. A reducer panic
//! skips the last two.

use std::cell::RefCell;
use std::fmt::{self, Debug};
use std::rc::Rc;

use crate::action::Action;

/// Log target used by [`DiagnosticLogger`]
pub const LOG_TARGET: &str = "statehouse::store";

/// Which side of the reducer fold a state snapshot comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Prev,
    Next,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Prev => write!(f, "prev"),
            Stage::Next => write!(f, "next"),
        }
    }
}

/// Observability hooks around a dispatch.
pub trait Logger<S, A> {
    fn log_start(&self, action: &A);
    fn log_action(&self, action: &A);
    fn log_state(&self, state: &S, stage: Stage);
    fn log_end(&self);
}

impl<S, A, L: Logger<S, A> + ?Sized> Logger<S, A> for Box<L> {
    fn log_start(&self, action: &A) {
        (**self).log_start(action)
    }

    fn log_action(&self, action: &A) {
        (**self).log_action(action)
    }

    fn log_state(&self, state: &S, stage: Stage) {
        (**self).log_state(state, stage)
    }

    fn log_end(&self) {
        (**self).log_end()
    }
}

/// Does nothing. Use it where dispatch output would only be noise, e.g. tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopLogger;

impl<S, A> Logger<S, A> for NoopLogger {
    fn log_start(&self, _action: &A) {}
    fn log_action(&self, _action: &A) {}
    fn log_state(&self, _state: &S, _stage: Stage) {}
    fn log_end(&self) {}
}

/// Writes every dispatch through the `log` facade.
///
/// The start line carries the action type; the remaining lines of the same
/// dispatch are indented under it:
///
/// ```text
/// dispatch todos/add
///   prev state TodoState { .. }
///   action Add("milk")
///   next state TodoState { .. }
/// ```
///
/// The logger keeps no per-dispatch state, so a dispatch cut short by a
/// reducer panic does not affect the lines of later ones.
#[derive(Debug, Clone, Copy)]
pub struct DiagnosticLogger {
    level: log::Level,
    log_state: bool,
}

impl DiagnosticLogger {
    pub fn new(level: log::Level) -> Self {
        Self {
            level,
            log_state: true,
        }
    }

    /// Skip the prev/next state dumps, which can be large
    pub fn without_state(mut self) -> Self {
        self.log_state = false;
        self
    }

    fn start_line(action: &impl Action) -> String {
        format!("dispatch {}", action.action_type())
    }

    fn action_line(action: &impl Action) -> String {
        format!("  action {:?}", action)
    }

    fn state_line(state: &impl Debug, stage: Stage) -> String {
        format!("  {} state {:?}", stage, state)
    }
}

impl Default for DiagnosticLogger {
    fn default() -> Self {
        Self::new(log::Level::Debug)
    }
}

impl<S: Debug, A: Action> Logger<S, A> for DiagnosticLogger {
    fn log_start(&self, action: &A) {
        log::log!(target: LOG_TARGET, self.level, "{}", Self::start_line(action));
    }

    fn log_action(&self, action: &A) {
        log::log!(target: LOG_TARGET, self.level, "{}", Self::action_line(action));
    }

    fn log_state(&self, state: &S, stage: Stage) {
        if self.log_state {
            log::log!(target: LOG_TARGET, self.level, "{}", Self::state_line(state, stage));
        }
    }

    fn log_end(&self) {}
}

/// One recorded logger hook call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogEvent {
    Start(String),
    Action(String),
    State(Stage),
    End,
}

/// Keeps every hook call in memory.
///
/// Clones share the same record, so keep a clone before handing the logger to
/// a store.
#[derive(Debug, Clone, Default)]
pub struct RecordingLogger {
    events: Rc<RefCell<Vec<LogEvent>>>,
}

impl RecordingLogger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<LogEvent> {
        self.events.borrow().clone()
    }

    /// Number of recorded calls matching `predicate`
    pub fn count(&self, predicate: impl Fn(&LogEvent) -> bool) -> usize {
        self.events.borrow().iter().filter(|event| predicate(event)).count()
    }

    pub fn clear(&self) {
        self.events.borrow_mut().clear();
    }

    fn record(&self, event: LogEvent) {
        self.events.borrow_mut().push(event);
    }
}

impl<S, A: Action> Logger<S, A> for RecordingLogger {
    fn log_start(&self, action: &A) {
        self.record(LogEvent::Start(action.action_type().to_string()));
    }

    fn log_action(&self, action: &A) {
        self.record(LogEvent::Action(action.action_type().to_string()));
    }

    fn log_state(&self, _state: &S, stage: Stage) {
        self.record(LogEvent::State(stage));
    }

    fn log_end(&self) {
        self.record(LogEvent::End);
    }
}
