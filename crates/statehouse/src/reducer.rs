//! Reducers and the ways to compose them.
//!
//! A reducer is a pure function `(state, action) -> state`. It returns a clone
//! of its input (for `Rc` state: the same allocation) when it has nothing to
//! do, and a new value when anything changed. Downstream code relies on that
//! to skip work via [`ShallowEq`].

use std::collections::HashMap;
use std::rc::Rc;

use crate::action::Action;
use crate::shallow_eq::ShallowEq;

/// Shared state-transition function.
pub type Reducer<S, A> = Rc<dyn Fn(&S, &A) -> S>;

/// Turn a closure into a [`Reducer`].
pub fn reducer<S, A, F>(f: F) -> Reducer<S, A>
where
    F: Fn(&S, &A) -> S + 'static,
{
    Rc::new(f)
}

/// Per-action-type handlers, turned into a single reducer with
/// [`reducer_from_handlers`] or [`Handlers::into_reducer`].
///
/// ```
/// use std::rc::Rc;
/// use statehouse::{Action, Handlers};
///
/// #[derive(Debug)]
/// struct Inc;
/// impl Action for Inc {
///     fn action_type(&self) -> &str {
///         "inc"
///     }
/// }
///
/// let reducer = Handlers::<Rc<i32>, Inc>::new()
///     .on("inc", |state, _| Rc::new(**state + 1))
///     .into_reducer();
///
/// assert_eq!(*reducer(&Rc::new(1), &Inc), 2);
/// ```
pub struct Handlers<S, A> {
    by_type: HashMap<String, Reducer<S, A>>,
}

impl<S, A> Handlers<S, A> {
    pub fn new() -> Self {
        Self {
            by_type: HashMap::new(),
        }
    }

    /// Register `handler` for `action_type`, replacing any earlier handler
    pub fn on<F>(mut self, action_type: impl Into<String>, handler: F) -> Self
    where
        F: Fn(&S, &A) -> S + 'static,
    {
        self.by_type.insert(action_type.into(), Rc::new(handler));
        self
    }

    /// Whether a handler is registered for `action_type`
    pub fn handles(&self, action_type: &str) -> bool {
        self.by_type.contains_key(action_type)
    }

    pub fn len(&self) -> usize {
        self.by_type.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_type.is_empty()
    }
}

impl<S, A> Handlers<S, A>
where
    S: Clone + 'static,
    A: Action + 'static,
{
    pub fn into_reducer(self) -> Reducer<S, A> {
        reducer_from_handlers(self)
    }
}

impl<S, A> Default for Handlers<S, A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S, A> FromIterator<(String, Reducer<S, A>)> for Handlers<S, A> {
    fn from_iter<I: IntoIterator<Item = (String, Reducer<S, A>)>>(iter: I) -> Self {
        Self {
            by_type: iter.into_iter().collect(),
        }
    }
}

/// Build a reducer that looks up the handler for `action.action_type()`.
///
/// Actions without a handler return the state unchanged.
pub fn reducer_from_handlers<S, A>(handlers: Handlers<S, A>) -> Reducer<S, A>
where
    S: Clone + 'static,
    A: Action + 'static,
{
    let by_type = handlers.by_type;
    Rc::new(move |state: &S, action: &A| match by_type.get(action.action_type()) {
        Some(handler) => handler(state, action),
        None => state.clone(),
    })
}

/// Run `reducers` in order, each receiving the previous one's output.
pub fn combine_reducers<S, A>(reducers: Vec<Reducer<S, A>>) -> Reducer<S, A>
where
    S: Clone + 'static,
    A: 'static,
{
    Rc::new(move |state: &S, action: &A| {
        reducers
            .iter()
            .fold(state.clone(), |current, reducer| reducer(&current, action))
    })
}

/// A named field of `S`, as a getter plus a setter that rebuilds `S`.
///
/// Usually built with [`sub_field!`](crate::sub_field).
pub struct SubField<S, T> {
    key: &'static str,
    get: Rc<dyn Fn(&S) -> &T>,
    set: Rc<dyn Fn(&S, T) -> S>,
}

impl<S, T> SubField<S, T> {
    pub fn new<G, U>(key: &'static str, get: G, set: U) -> Self
    where
        G: Fn(&S) -> &T + 'static,
        U: Fn(&S, T) -> S + 'static,
    {
        Self {
            key,
            get: Rc::new(get),
            set: Rc::new(set),
        }
    }

    pub fn key(&self) -> &'static str {
        self.key
    }

    pub fn get<'s>(&self, state: &'s S) -> &'s T {
        (self.get)(state)
    }

    pub fn set(&self, state: &S, value: T) -> S {
        (self.set)(state, value)
    }
}

impl<S, T> Clone for SubField<S, T> {
    fn clone(&self) -> Self {
        Self {
            key: self.key,
            get: Rc::clone(&self.get),
            set: Rc::clone(&self.set),
        }
    }
}

/// Build a [`SubField`] for a field of an `Rc`-wrapped state struct.
///
/// `sub_field!(AppState, todos)` reads `state.todos` and rebuilds the state
/// with struct update syntax, so `AppState` must implement `Clone`.
#[macro_export]
macro_rules! sub_field {
    ($state:ident, $field:ident) => {
        $crate::SubField::new(
            stringify!($field),
            |state: &::std::rc::Rc<$state>| &state.$field,
            |state: &::std::rc::Rc<$state>, value| {
                ::std::rc::Rc::new($state {
                    $field: value,
                    ..(**state).clone()
                })
            },
        )
    };
}

/// Lift a reducer over a field into a reducer over the whole state.
///
/// When the inner reducer hands back a value shallow-equal to the current
/// field, the whole state is returned unchanged.
pub fn lift_reducer<S, T, A>(field: SubField<S, T>, reducer: Reducer<T, A>) -> Reducer<S, A>
where
    S: Clone + 'static,
    T: ShallowEq + 'static,
    A: 'static,
{
    Rc::new(move |state: &S, action: &A| {
        let current = field.get(state);
        let next = reducer(current, action);
        if next.shallow_eq(current) {
            return state.clone();
        }
        log::trace!("sub-reducer for `{}` replaced its field", field.key());
        field.set(state, next)
    })
}
