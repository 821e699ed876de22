//! Memoized projections of state.
//!
//! A [`Selector`] remembers its last input and output. A compound selector
//! evaluates a tuple of selectors and memoizes on their results instead of on
//! the raw input, so a derived value keeps its reference across state changes
//! that none of its inputs care about.

use std::rc::Rc;

use crate::memoize::{LastResult, Memoizer};
use crate::shallow_eq::ShallowEq;

/// A memoized function from `I` (usually `Rc<State>`) to `R`.
///
/// Cloning a selector shares its cache.
pub struct Selector<I, R> {
    run: Rc<dyn Fn(&I) -> R>,
}

impl<I, R> Clone for Selector<I, R> {
    fn clone(&self) -> Self {
        Self {
            run: Rc::clone(&self.run),
        }
    }
}

impl<I, R> Selector<I, R> {
    /// Evaluate the selector against `input`
    pub fn select(&self, input: &I) -> R {
        (self.run)(input)
    }
}

impl<I, R> std::fmt::Debug for Selector<I, R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Selector").finish_non_exhaustive()
    }
}

/// Build a selector memoized with [`LastResult`].
pub fn create_selector<I, R, F>(projection: F) -> Selector<I, R>
where
    I: ShallowEq + Clone + 'static,
    R: Clone + 'static,
    F: Fn(&I) -> R + 'static,
{
    create_selector_with(projection, LastResult)
}

/// Build a selector with an explicit memoization strategy.
pub fn create_selector_with<I, R, F, M>(projection: F, memoizer: M) -> Selector<I, R>
where
    I: ShallowEq + Clone + 'static,
    R: Clone + 'static,
    F: Fn(&I) -> R + 'static,
    M: Memoizer,
{
    let memoized = memoizer.memoize(projection);
    Selector {
        run: Rc::new(move |input: &I| memoized(input.clone())),
    }
}

/// A non-empty tuple of selectors over the same input.
///
/// Implemented for tuples of one to eight [`Selector`]s. `Output` is the tuple
/// of their results, in order.
pub trait SelectorTuple<I> {
    type Output: ShallowEq + Clone + 'static;

    /// Run every selector against `input`, first to last.
    fn select_all(&self, input: &I) -> Self::Output;
}

macro_rules! selector_tuple {
    ($($name:ident $idx:tt),+) => {
        impl<I, $($name),+> SelectorTuple<I> for ($(Selector<I, $name>,)+)
        where
            $($name: ShallowEq + Clone + 'static),+
        {
            type Output = ($($name,)+);

            fn select_all(&self, input: &I) -> Self::Output {
                ($(self.$idx.select(input),)+)
            }
        }
    };
}

selector_tuple!(A 0);
selector_tuple!(A 0, B 1);
selector_tuple!(A 0, B 1, C 2);
selector_tuple!(A 0, B 1, C 2, D 3);
selector_tuple!(A 0, B 1, C 2, D 3, E 4);
selector_tuple!(A 0, B 1, C 2, D 3, E 4, F 5);
selector_tuple!(A 0, B 1, C 2, D 3, E 4, F 5, G 6);
selector_tuple!(A 0, B 1, C 2, D 3, E 4, F 5, G 6, H 7);

/// Combine the results of several selectors into one derived value.
///
/// `combine` receives the results as a tuple, e.g. `|(todos, filter)| ...`,
/// and only runs when at least one result changed under [`ShallowEq`].
pub fn create_compound_selector<I, T, R, C>(selectors: T, combine: C) -> Selector<I, R>
where
    I: 'static,
    T: SelectorTuple<I> + 'static,
    R: Clone + 'static,
    C: Fn(T::Output) -> R + 'static,
{
    create_compound_selector_with(selectors, combine, LastResult)
}

/// [`create_compound_selector`] with an explicit memoization strategy.
pub fn create_compound_selector_with<I, T, R, C, M>(
    selectors: T,
    combine: C,
    memoizer: M,
) -> Selector<I, R>
where
    I: 'static,
    T: SelectorTuple<I> + 'static,
    R: Clone + 'static,
    C: Fn(T::Output) -> R + 'static,
    M: Memoizer,
{
    let combined = memoizer.memoize(move |results: &T::Output| combine(results.clone()));
    Selector {
        run: Rc::new(move |input: &I| combined(selectors.select_all(input))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memoize::NoMemo;
    use pretty_assertions::assert_eq;
    use std::cell::Cell;

    #[derive(Debug, Clone, PartialEq)]
    struct TestState {
        foo: i32,
        tags: Rc<Vec<String>>,
    }

    fn state(foo: i32) -> Rc<TestState> {
        Rc::new(TestState {
            foo,
            tags: Rc::new(vec!["a".to_string()]),
        })
    }

    #[test]
    fn test_identity_selector() {
        let s = state(99);
        let selector = create_selector(|s: &Rc<TestState>| Rc::clone(s));

        let result = selector.select(&s);
        assert_eq!(*result, *s);
    }

    #[test]
    fn test_selector_memoizes_by_reference() {
        let s = state(99);
        let selector = create_selector(|_: &Rc<TestState>| Rc::new(Vec::<u8>::new()));

        let first = selector.select(&s);
        let second = selector.select(&s);

        assert!(first.is_empty());
        assert!(Rc::ptr_eq(&first, &second));
    }

    #[test]
    fn test_selector_recomputes_for_new_state() {
        let calls = Rc::new(Cell::new(0));
        let counter = Rc::clone(&calls);
        let selector = create_selector(move |s: &Rc<TestState>| {
            counter.set(counter.get() + 1);
            s.foo
        });

        assert_eq!(selector.select(&state(1)), 1);
        // equal contents, new allocation
        assert_eq!(selector.select(&state(1)), 1);
        assert_eq!(calls.get(), 2);
    }

    #[test]
    fn test_cloned_selector_shares_cache() {
        let calls = Rc::new(Cell::new(0));
        let counter = Rc::clone(&calls);
        let selector = create_selector(move |s: &Rc<TestState>| {
            counter.set(counter.get() + 1);
            s.foo * 10
        });
        let other = selector.clone();

        let s = state(3);
        assert_eq!(selector.select(&s), 30);
        assert_eq!(other.select(&s), 30);
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn test_selector_with_no_memo() {
        let calls = Rc::new(Cell::new(0));
        let counter = Rc::clone(&calls);
        let selector = create_selector_with(
            move |s: &Rc<TestState>| {
                counter.set(counter.get() + 1);
                s.foo
            },
            NoMemo,
        );

        let s = state(1);
        selector.select(&s);
        selector.select(&s);
        assert_eq!(calls.get(), 2);
    }

    #[test]
    fn test_compound_selector_combines_results() {
        let s = state(100);
        let selector_a = create_selector(|s: &Rc<TestState>| s.foo);
        let selector_b = create_selector(|s: &Rc<TestState>| s.foo * 2);

        let selector_ab = create_compound_selector((selector_a, selector_b), |(a, b)| a + b);

        assert_eq!(selector_ab.select(&s), 300);
    }

    #[test]
    fn test_compound_selector_memoizes() {
        let s = state(100);
        let selector_a = create_selector(|s: &Rc<TestState>| Rc::clone(s));
        let selector_b = create_selector(|s: &Rc<TestState>| Rc::clone(s));

        let selector_ab =
            create_compound_selector((selector_a, selector_b), |_| Rc::new(Vec::<u8>::new()));

        let first = selector_ab.select(&s);
        let second = selector_ab.select(&s);
        assert!(Rc::ptr_eq(&first, &second));
    }

    #[test]
    fn test_compound_selector_stable_across_unrelated_change() {
        let calls = Rc::new(Cell::new(0));
        let counter = Rc::clone(&calls);

        let tags = create_selector(|s: &Rc<TestState>| Rc::clone(&s.tags));
        let tag_count = create_compound_selector((tags,), move |(tags,)| {
            counter.set(counter.get() + 1);
            Rc::new(tags.len())
        });

        let before = state(1);
        // same tags allocation, different foo and a new state reference
        let after = Rc::new(TestState {
            foo: 2,
            tags: Rc::clone(&before.tags),
        });
        assert!(!Rc::ptr_eq(&before, &after));

        let first = tag_count.select(&before);
        let second = tag_count.select(&after);

        assert!(Rc::ptr_eq(&first, &second));
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn test_compound_selector_heterogeneous_results() {
        let s = state(4);
        let foo = create_selector(|s: &Rc<TestState>| s.foo);
        let tags = create_selector(|s: &Rc<TestState>| Rc::clone(&s.tags));
        let even = create_selector(|s: &Rc<TestState>| s.foo % 2 == 0);

        let summary = create_compound_selector((foo, tags, even), |(foo, tags, even)| {
            format!("{foo}:{}:{even}", tags.join(","))
        });

        assert_eq!(summary.select(&s), "4:a:true");
    }

    #[test]
    fn test_compound_selector_recomputes_when_a_result_changes() {
        let calls = Rc::new(Cell::new(0));
        let counter = Rc::clone(&calls);
        let foo = create_selector(|s: &Rc<TestState>| s.foo);
        let doubled = create_compound_selector((foo,), move |(foo,)| {
            counter.set(counter.get() + 1);
            foo * 2
        });

        assert_eq!(doubled.select(&state(1)), 2);
        assert_eq!(doubled.select(&state(1)), 2); // new state, same foo
        assert_eq!(doubled.select(&state(5)), 10);
        assert_eq!(calls.get(), 2);
    }
}
