//! # statehouse
//!
//! A small, single-threaded state container in the Redux style:
//!
//! - [`Store`] holds the current state, runs every registered reducer on each
//!   dispatch and notifies subscribers afterwards
//! - thunks ([`Store::dispatch_thunk`]) sequence several dispatches with fresh
//!   reads in between
//! - [`reducer_from_handlers`], [`combine_reducers`] and sub-reducers compose
//!   state transitions
//! - [`create_selector`] and [`create_compound_selector`] memoize projections
//!   of state by reference
//!
//! State is usually an `Rc<AppState>`. Reducers hand back the same `Rc` when
//! nothing changed, which is what lets selectors and subscribers skip work.
//!
//! ## Usage
//!
//! ```rust
//! use std::rc::Rc;
//! use statehouse::{create_selector, Action, Handlers, NoopLogger, Store};
//!
//! #[derive(Debug, Clone, PartialEq)]
//! struct Counter {
//!     count: i32,
//! }
//!
//! #[derive(Debug)]
//! enum CounterAction {
//!     Inc,
//! }
//!
//! impl Action for CounterAction {
//!     fn action_type(&self) -> &str {
//!         "inc"
//!     }
//! }
//!
//! let store = Store::new(Rc::new(Counter { count: 0 }), NoopLogger);
//! store.add_reducer(
//!     Handlers::new()
//!         .on("inc", |s: &Rc<Counter>, _: &CounterAction| {
//!             Rc::new(Counter { count: s.count + 1 })
//!         })
//!         .into_reducer(),
//! );
//!
//! store.dispatch_thunk(|dispatcher| {
//!     dispatcher.dispatch(CounterAction::Inc);
//!     dispatcher.dispatch(CounterAction::Inc);
//! });
//!
//! let count = create_selector(|s: &Rc<Counter>| s.count);
//! assert_eq!(count.select(&store.get_state()), 2);
//! ```

pub mod action;
pub mod config;
pub mod dispatcher;
pub mod error;
pub mod logger;
pub mod memoize;
pub mod reducer;
pub mod selector;
pub mod shallow_eq;
pub mod store;

pub use action::Action;
pub use config::{load_config_file, LoggerPreset, StoreConfig};
pub use dispatcher::{Dispatch, Dispatcher, Thunk};
pub use error::ConfigError;
pub use logger::{DiagnosticLogger, LogEvent, Logger, NoopLogger, RecordingLogger, Stage};
pub use memoize::{memoize_last_result, LastResult, Memoizer, NoMemo};
pub use reducer::{
    combine_reducers, lift_reducer, reducer, reducer_from_handlers, Handlers, Reducer, SubField,
};
pub use selector::{
    create_compound_selector, create_compound_selector_with, create_selector,
    create_selector_with, Selector, SelectorTuple,
};
pub use shallow_eq::ShallowEq;
pub use store::{RemoveReducer, Store, Subscriber, Unsubscribe};
