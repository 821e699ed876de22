use std::cell::RefCell;
use std::fmt::{self, Debug};
use std::rc::{Rc, Weak};

use crate::action::Action;
use crate::config::StoreConfig;
use crate::dispatcher::{Dispatch, Dispatcher};
use crate::logger::{Logger, Stage};
use crate::reducer::{lift_reducer, Reducer, SubField};
use crate::shallow_eq::ShallowEq;

/// Callback run after every completed dispatch with the current state and
/// the action that was dispatched.
pub type Subscriber<S, A> = Rc<dyn Fn(&S, &A)>;

/// Ordered registrations keyed by a unique id, so removal never depends on
/// comparing closures.
struct Registry<T> {
    next_id: u64,
    entries: Vec<(u64, T)>,
}

impl<T: Clone> Registry<T> {
    fn new() -> Self {
        Self {
            next_id: 0,
            entries: Vec::new(),
        }
    }

    fn insert(&mut self, item: T) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.entries.push((id, item));
        id
    }

    fn remove(&mut self, id: u64) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(entry_id, _)| *entry_id != id);
        self.entries.len() != before
    }

    /// Copy of the current entries; a round iterates this, not the live list
    fn snapshot(&self) -> Vec<T> {
        self.entries.iter().map(|(_, item)| item.clone()).collect()
    }

    fn len(&self) -> usize {
        self.entries.len()
    }
}

struct Shared<S, A> {
    state: RefCell<S>,
    reducers: RefCell<Registry<Reducer<S, A>>>,
    subscribers: RefCell<Registry<Subscriber<S, A>>>,
    logger: Box<dyn Logger<S, A>>,
}

/// Store - holds application state and runs the dispatch loop
///
/// The store is a cheap handle: clones share the same state, reducers and
/// subscribers. Everything runs synchronously on the calling thread, and no
/// internal borrow is held while reducers, subscribers or thunks run, so all
/// of them may call back into the store.
pub struct Store<S, A> {
    shared: Rc<Shared<S, A>>,
}

impl<S, A> Clone for Store<S, A> {
    fn clone(&self) -> Self {
        Self {
            shared: Rc::clone(&self.shared),
        }
    }
}

impl<S, A> Store<S, A>
where
    S: Clone + 'static,
    A: 'static,
{
    /// Create a store with no reducers and no subscribers
    pub fn new<L>(initial_state: S, logger: L) -> Self
    where
        L: Logger<S, A> + 'static,
    {
        Self {
            shared: Rc::new(Shared {
                state: RefCell::new(initial_state),
                reducers: RefCell::new(Registry::new()),
                subscribers: RefCell::new(Registry::new()),
                logger: Box::new(logger),
            }),
        }
    }

    /// Get the current state
    pub fn get_state(&self) -> S {
        self.shared.state.borrow().clone()
    }

    /// Handle for thunks and other code that should only read and dispatch
    pub fn dispatcher(&self) -> Dispatcher<S, A> {
        Dispatcher::new(self.clone())
    }

    /// Run an action through every reducer, then notify subscribers
    ///
    /// Reducers and subscribers are the ones registered when their phase
    /// starts; registrations made or removed meanwhile apply from the next
    /// dispatch on. Each reducer's output is written back before the next
    /// one runs, so a panicking reducer leaves the state produced by the
    /// reducers before it.
    pub fn dispatch(&self, action: A) {
        let logger: &dyn Logger<S, A> = &*self.shared.logger;

        logger.log_start(&action);
        logger.log_state(&self.get_state(), Stage::Prev);
        logger.log_action(&action);

        let reducers = self.shared.reducers.borrow().snapshot();
        for reducer in reducers {
            let current = self.get_state();
            let next = reducer(&current, &action);
            *self.shared.state.borrow_mut() = next;
        }

        logger.log_state(&self.get_state(), Stage::Next);
        logger.log_end();

        let subscribers = self.shared.subscribers.borrow().snapshot();
        for notify in subscribers {
            // read per subscriber: an earlier one may have dispatched again
            let state = self.get_state();
            notify(&state, &action);
        }
    }

    /// Run a thunk synchronously with read/dispatch access to this store
    pub fn dispatch_thunk<F>(&self, thunk: F)
    where
        F: FnOnce(&Dispatcher<S, A>),
    {
        thunk(&self.dispatcher());
    }

    /// Dispatch either payload kind
    pub fn send(&self, payload: Dispatch<S, A>) {
        match payload {
            Dispatch::Action(action) => self.dispatch(action),
            Dispatch::Thunk(thunk) => self.dispatch_thunk(thunk),
        }
    }

    /// Register a callback run after every dispatch, in subscription order
    pub fn subscribe<F>(&self, callback: F) -> Unsubscribe
    where
        F: Fn(&S, &A) + 'static,
    {
        let id = self.shared.subscribers.borrow_mut().insert(Rc::new(callback));
        let shared = Rc::downgrade(&self.shared);

        Unsubscribe {
            detach: Box::new(move || {
                if let Some(shared) = Weak::upgrade(&shared) {
                    if shared.subscribers.borrow_mut().remove(id) {
                        log::trace!("removed subscriber {}", id);
                    }
                }
            }),
        }
    }

    /// Add a reducer; reducers run in the order they were added
    pub fn add_reducer(&self, reducer: Reducer<S, A>) -> RemoveReducer {
        let id = self.shared.reducers.borrow_mut().insert(reducer);
        let shared = Rc::downgrade(&self.shared);

        RemoveReducer {
            detach: Box::new(move || {
                if let Some(shared) = Weak::upgrade(&shared) {
                    if shared.reducers.borrow_mut().remove(id) {
                        log::trace!("removed reducer {}", id);
                    }
                }
            }),
        }
    }

    /// Add a reducer over one field of the state
    ///
    /// When the reducer leaves the field unchanged the whole state keeps its
    /// reference.
    pub fn add_sub_reducer<T>(&self, field: SubField<S, T>, reducer: Reducer<T, A>) -> RemoveReducer
    where
        T: ShallowEq + 'static,
    {
        log::debug!("adding sub-reducer for `{}`", field.key());
        self.add_reducer(lift_reducer(field, reducer))
    }

    pub fn reducer_count(&self) -> usize {
        self.shared.reducers.borrow().len()
    }

    pub fn subscriber_count(&self) -> usize {
        self.shared.subscribers.borrow().len()
    }
}

impl<S, A> Store<S, A>
where
    S: Clone + Debug + 'static,
    A: Action + 'static,
{
    /// Create a store using the logger preset named in `config`
    pub fn from_config(initial_state: S, config: &StoreConfig) -> Self {
        Self::new(initial_state, config.logger())
    }
}

impl<S, A> Debug for Store<S, A>
where
    S: Clone + 'static,
    A: 'static,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Store")
            .field("reducers", &self.reducer_count())
            .field("subscribers", &self.subscriber_count())
            .finish_non_exhaustive()
    }
}

/// Returned by [`Store::subscribe`]. Dropping it keeps the subscription.
pub struct Unsubscribe {
    detach: Box<dyn Fn()>,
}

impl Unsubscribe {
    /// Remove the subscription. Calling it again does nothing.
    pub fn unsubscribe(&self) {
        (self.detach)()
    }
}

impl Debug for Unsubscribe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Unsubscribe")
    }
}

/// Returned by [`Store::add_reducer`] and [`Store::add_sub_reducer`].
pub struct RemoveReducer {
    detach: Box<dyn Fn()>,
}

impl RemoveReducer {
    /// Stop running the reducer on later dispatches. Calling it again does
    /// nothing.
    pub fn remove(&self) {
        (self.detach)()
    }
}

impl Debug for RemoveReducer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("RemoveReducer")
    }
}
