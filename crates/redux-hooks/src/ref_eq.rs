//! Identity comparison used for change detection
//!
//! Bindings decide whether to re-render by asking whether the freshly selected
//! value is *the same* value as the cached one, not whether it is structurally
//! equal:
//! - shared pointers (`Rc`, `Arc`) compare by address
//! - immediate scalars compare by value, since they have no identity of their own
//! - `Option` and tuples compare element-wise
//!
//! A selector that builds a new `Rc` on every call is therefore never equal to
//! its previous result. Use [`crate::memo_selector`] to keep composed
//! selections stable.

use std::rc::Rc;
use std::sync::Arc;

/// Identity equality between two selections
pub trait RefEq {
    /// Returns `true` if `self` and `other` are the same value
    fn ref_eq(&self, other: &Self) -> bool;
}

impl<T: ?Sized> RefEq for Rc<T> {
    fn ref_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(self, other)
    }
}

impl<T: ?Sized> RefEq for Arc<T> {
    fn ref_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(self, other)
    }
}

impl<T: RefEq> RefEq for Option<T> {
    fn ref_eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Some(a), Some(b)) => a.ref_eq(b),
            (None, None) => true,
            _ => false,
        }
    }
}

macro_rules! impl_ref_eq_by_value {
    ($($ty:ty),* $(,)?) => {
        $(
            impl RefEq for $ty {
                fn ref_eq(&self, other: &Self) -> bool {
                    self == other
                }
            }
        )*
    };
}

impl_ref_eq_by_value!(
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
    &'static str,
);

macro_rules! impl_ref_eq_for_tuple {
    ($($name:ident : $idx:tt),+) => {
        impl<$($name: RefEq),+> RefEq for ($($name,)+) {
            fn ref_eq(&self, other: &Self) -> bool {
                $(self.$idx.ref_eq(&other.$idx))&&+
            }
        }
    };
}

impl_ref_eq_for_tuple!(A: 0, B: 1);
impl_ref_eq_for_tuple!(A: 0, B: 1, C: 2);
impl_ref_eq_for_tuple!(A: 0, B: 1, C: 2, D: 3);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rc_compares_by_address() {
        let a: Rc<str> = Rc::from("Ann");
        let b: Rc<str> = Rc::from("Ann");

        assert!(a.ref_eq(&Rc::clone(&a)));
        assert!(!a.ref_eq(&b)); // same content, different allocation
    }

    #[test]
    fn test_scalars_compare_by_value() {
        assert!(30u32.ref_eq(&30));
        assert!(!30u32.ref_eq(&31));
        assert!("name".ref_eq(&"name"));
        assert!(!f64::NAN.ref_eq(&f64::NAN));
    }

    #[test]
    fn test_option_and_tuples() {
        let name: Rc<str> = Rc::from("Ann");

        assert!(Some(Rc::clone(&name)).ref_eq(&Some(Rc::clone(&name))));
        assert!(None::<Rc<str>>.ref_eq(&None));
        assert!(!Some(1u8).ref_eq(&None));

        assert!((Rc::clone(&name), 30u32).ref_eq(&(Rc::clone(&name), 30)));
        assert!(!(Rc::clone(&name), 30u32).ref_eq(&(Rc::from("Ann"), 30)));
    }
}
