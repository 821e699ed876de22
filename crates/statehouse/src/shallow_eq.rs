//! Shallow equality used for memoization and reference-preservation checks.
//!
//! Shared pointers compare by address, scalars compare by value. Collections
//! and tuples compare their length and then each position shallowly, never
//! looking through a pointer.

use std::rc::Rc;
use std::sync::Arc;

/// Equality that never looks through a shared pointer.
///
/// Two `Rc<T>` are equal only when they point at the same allocation, even if
/// the values behind them would compare equal with `==`.
pub trait ShallowEq {
    fn shallow_eq(&self, other: &Self) -> bool;
}

impl<T: ?Sized> ShallowEq for Rc<T> {
    fn shallow_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(self, other)
    }
}

impl<T: ?Sized> ShallowEq for Arc<T> {
    fn shallow_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(self, other)
    }
}

impl<T: ?Sized> ShallowEq for &T {
    fn shallow_eq(&self, other: &Self) -> bool {
        std::ptr::eq(*self, *other)
    }
}

impl<T: ShallowEq> ShallowEq for Option<T> {
    fn shallow_eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Some(a), Some(b)) => a.shallow_eq(b),
            (None, None) => true,
            _ => false,
        }
    }
}

impl<T: ShallowEq> ShallowEq for [T] {
    fn shallow_eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().zip(other).all(|(a, b)| a.shallow_eq(b))
    }
}

impl<T: ShallowEq> ShallowEq for Vec<T> {
    fn shallow_eq(&self, other: &Self) -> bool {
        self.as_slice().shallow_eq(other.as_slice())
    }
}

impl<T: ShallowEq> ShallowEq for Box<[T]> {
    fn shallow_eq(&self, other: &Self) -> bool {
        (**self).shallow_eq(&**other)
    }
}

macro_rules! shallow_eq_by_value {
    ($($ty:ty),* $(,)?) => {
        $(
            impl ShallowEq for $ty {
                fn shallow_eq(&self, other: &Self) -> bool {
                    self == other
                }
            }
        )*
    };
}

shallow_eq_by_value!(
    (),
    bool,
    char,
    u8,
    u16,
    u32,
    u64,
    u128,
    usize,
    i8,
    i16,
    i32,
    i64,
    i128,
    isize,
    f32,
    f64,
    String,
    str,
);

macro_rules! shallow_eq_tuple {
    ($($name:ident $idx:tt),+) => {
        impl<$($name: ShallowEq),+> ShallowEq for ($($name,)+) {
            fn shallow_eq(&self, other: &Self) -> bool {
                $(self.$idx.shallow_eq(&other.$idx))&&+
            }
        }
    };
}

shallow_eq_tuple!(A 0);
shallow_eq_tuple!(A 0, B 1);
shallow_eq_tuple!(A 0, B 1, C 2);
shallow_eq_tuple!(A 0, B 1, C 2, D 3);
shallow_eq_tuple!(A 0, B 1, C 2, D 3, E 4);
shallow_eq_tuple!(A 0, B 1, C 2, D 3, E 4, F 5);
shallow_eq_tuple!(A 0, B 1, C 2, D 3, E 4, F 5, G 6);
shallow_eq_tuple!(A 0, B 1, C 2, D 3, E 4, F 5, G 6, H 7);
