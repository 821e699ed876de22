//! Dispatcher handed to thunks
//!
//! A thunk needs to read fresh state between dispatches and to dispatch more
//! actions (or further thunks). The Dispatcher is a handle on the store that
//! exposes exactly that. Every dispatch made through it runs to completion,
//! subscribers included, before returning to the thunk.
//!
//! This enables patterns like:
//! - Load a list, then select its first item once the list is in state
//! - Dispatch a sequence of actions only while a condition still holds

use std::fmt;

use crate::store::Store;

/// A deferred sequence of dispatches.
pub type Thunk<S, A> = Box<dyn FnOnce(&Dispatcher<S, A>)>;

/// What can be sent to a store: a plain action or a thunk.
pub enum Dispatch<S, A> {
    Action(A),
    Thunk(Thunk<S, A>),
}

impl<S, A> Dispatch<S, A> {
    /// Wrap a closure as [`Dispatch::Thunk`]
    pub fn thunk<F>(thunk: F) -> Self
    where
        F: FnOnce(&Dispatcher<S, A>) + 'static,
    {
        Dispatch::Thunk(Box::new(thunk))
    }
}

impl<S, A: fmt::Debug> fmt::Debug for Dispatch<S, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Dispatch::Action(action) => f.debug_tuple("Action").field(action).finish(),
            Dispatch::Thunk(_) => f.write_str("Thunk"),
        }
    }
}

/// Read/dispatch access to a store, as given to thunks.
pub struct Dispatcher<S, A> {
    store: Store<S, A>,
}

impl<S, A> Clone for Dispatcher<S, A> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
        }
    }
}

impl<S, A> Dispatcher<S, A>
where
    S: Clone + 'static,
    A: 'static,
{
    pub(crate) fn new(store: Store<S, A>) -> Self {
        Self { store }
    }

    /// Current state of the store, including every dispatch made so far
    pub fn get_state(&self) -> S {
        self.store.get_state()
    }

    /// Dispatch an action and wait for it (and its subscribers) to finish
    pub fn dispatch(&self, action: A) {
        self.store.dispatch(action);
    }

    /// Run another thunk against the same store
    pub fn dispatch_thunk<F>(&self, thunk: F)
    where
        F: FnOnce(&Dispatcher<S, A>),
    {
        self.store.dispatch_thunk(thunk);
    }

    pub fn send(&self, payload: Dispatch<S, A>) {
        self.store.send(payload);
    }
}
