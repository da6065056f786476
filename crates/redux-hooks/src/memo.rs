use std::cell::RefCell;
use std::rc::Rc;

use crate::ref_eq::RefEq;

/// Build a selector whose output keeps its identity while its inputs do
///
/// `input` extracts the pieces of state the selection depends on. `combine`
/// builds the selection from them, and only runs again when the extracted key
/// is not [`RefEq`] to the previous one. Otherwise the previously built `Rc`
/// is returned, so bindings using this selector skip re-rendering.
pub fn memo_selector<S, K, T, I, C>(input: I, combine: C) -> impl Fn(&S) -> Rc<T>
where
    I: Fn(&S) -> K,
    C: Fn(&K) -> T,
    K: RefEq,
{
    let cache: RefCell<Option<(K, Rc<T>)>> = RefCell::new(None);

    move |state: &S| {
        let key = input(state);
        if let Some((previous, value)) = cache.borrow().as_ref() {
            if previous.ref_eq(&key) {
                return Rc::clone(value);
            }
        }

        let value = Rc::new(combine(&key));
        *cache.borrow_mut() = Some((key, Rc::clone(&value)));
        value
    }
}
