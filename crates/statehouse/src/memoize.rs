//! Single-slot memoization.
//!
//! A memoized function remembers only its most recent arguments and result.
//! N-ary functions take their arguments as a tuple; see [`ShallowEq`] for how
//! arguments are compared.

use std::cell::RefCell;

use crate::shallow_eq::ShallowEq;

/// A boxed memoized function, as produced by a [`Memoizer`].
pub type MemoizedFn<Args, R> = Box<dyn Fn(Args) -> R>;

/// Wrap `f` so that calling it again with shallow-equal arguments returns the
/// cached result instead of recomputing.
///
/// The first call always computes. The cache is not borrowed while `f` runs,
/// so `f` may call back into the memoized function.
pub fn memoize_last_result<Args, R, F>(f: F) -> impl Fn(Args) -> R
where
    Args: ShallowEq,
    R: Clone,
    F: Fn(&Args) -> R,
{
    let cache: RefCell<Option<(Args, R)>> = RefCell::new(None);

    move |args: Args| {
        if let Some((last_args, last_result)) = &*cache.borrow() {
            if last_args.shallow_eq(&args) {
                return last_result.clone();
            }
        }

        let result = f(&args);
        *cache.borrow_mut() = Some((args, result.clone()));
        result
    }
}

/// Strategy used by selectors to memoize their projection.
pub trait Memoizer {
    fn memoize<Args, R, F>(&self, f: F) -> MemoizedFn<Args, R>
    where
        Args: ShallowEq + 'static,
        R: Clone + 'static,
        F: Fn(&Args) -> R + 'static;
}

/// Remember the last call only. This is the default for selectors.
#[derive(Debug, Clone, Copy, Default)]
pub struct LastResult;

impl Memoizer for LastResult {
    fn memoize<Args, R, F>(&self, f: F) -> MemoizedFn<Args, R>
    where
        Args: ShallowEq + 'static,
        R: Clone + 'static,
        F: Fn(&Args) -> R + 'static,
    {
        Box::new(memoize_last_result(f))
    }
}

/// Never cache; every call recomputes.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoMemo;

impl Memoizer for NoMemo {
    fn memoize<Args, R, F>(&self, f: F) -> MemoizedFn<Args, R>
    where
        Args: ShallowEq + 'static,
        R: Clone + 'static,
        F: Fn(&Args) -> R + 'static,
    {
        Box::new(move |args: Args| f(&args))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn test_first_call_computes_then_caches() {
        let calls = Rc::new(Cell::new(0));
        let counter = Rc::clone(&calls);
        let double = memoize_last_result(move |x: &u32| {
            counter.set(counter.get() + 1);
            x * 2
        });

        assert_eq!(double(2), 4);
        assert_eq!(double(2), 4);
        assert_eq!(calls.get(), 1);

        assert_eq!(double(3), 6);
        assert_eq!(calls.get(), 2);
    }

    #[test]
    fn test_only_one_slot_is_kept() {
        let calls = Rc::new(Cell::new(0));
        let counter = Rc::clone(&calls);
        let square = memoize_last_result(move |x: &i64| {
            counter.set(counter.get() + 1);
            x * x
        });

        square(2);
        square(3);
        square(2); // evicted by the call with 3
        assert_eq!(calls.get(), 3);
    }

    #[test]
    fn test_cached_result_is_same_reference() {
        let make = memoize_last_result(|(a, b): &(u8, u8)| Rc::new(vec![*a, *b]));

        let first = make((1, 2));
        let second = make((1, 2));
        assert!(Rc::ptr_eq(&first, &second));

        let third = make((1, 3));
        assert!(!Rc::ptr_eq(&first, &third));
    }

    #[test]
    fn test_argument_count_mismatch_recomputes() {
        let calls = Rc::new(Cell::new(0));
        let counter = Rc::clone(&calls);
        let sum = memoize_last_result(move |args: &Vec<u32>| {
            counter.set(counter.get() + 1);
            args.iter().sum::<u32>()
        });

        assert_eq!(sum(vec![1, 2]), 3);
        assert_eq!(sum(vec![1, 2, 0]), 3); // trailing extra argument
        assert_eq!(sum(vec![1, 2]), 3);
        assert_eq!(calls.get(), 3);
    }

    #[test]
    fn test_arguments_compare_by_reference() {
        let calls = Rc::new(Cell::new(0));
        let counter = Rc::clone(&calls);
        let len = memoize_last_result(move |s: &Rc<String>| {
            counter.set(counter.get() + 1);
            s.len()
        });

        let shared = Rc::new("hello".to_string());
        len(Rc::clone(&shared));
        len(Rc::clone(&shared));
        assert_eq!(calls.get(), 1);

        len(Rc::new("hello".to_string()));
        assert_eq!(calls.get(), 2);
    }

    #[test]
    fn test_no_memo_always_recomputes() {
        let calls = Rc::new(Cell::new(0));
        let counter = Rc::clone(&calls);
        let f = NoMemo.memoize(move |x: &u32| {
            counter.set(counter.get() + 1);
            *x
        });

        f(1);
        f(1);
        assert_eq!(calls.get(), 2);
    }

    #[test]
    fn test_last_result_memoizer() {
        let calls = Rc::new(Cell::new(0));
        let counter = Rc::clone(&calls);
        let f = LastResult.memoize(move |x: &u32| {
            counter.set(counter.get() + 1);
            *x + 1
        });

        assert_eq!(f(1), 2);
        assert_eq!(f(1), 2);
        assert_eq!(calls.get(), 1);
    }
}
