//! Single-threaded shared handle for reference-semantics runtime state.
//!
//! Scopes, maps, objects and cells all have reference semantics in the
//! source language: cloning a handle aliases the same underlying state.
//! `Shared<T>` wraps `Rc<RefCell<T>>` and enforces that all such
//! allocations go through the `Shared::new()` factory.

// Rc is the intentional implementation detail of Shared<T>
#![expect(
    clippy::disallowed_types,
    reason = "Rc is the implementation of Shared<T>"
)]

use std::cell::RefCell;
use std::fmt;
use std::ops::Deref;
use std::rc::Rc;

/// Aliasing handle to one piece of mutable runtime state.
///
/// Generated programs run on a single thread, so the handle is `Rc`-based
/// and deliberately `!Send`. Borrows are short-lived and never held
/// across a call back into generated code, so `RefCell`'s runtime check
/// cannot trip in practice. `#[repr(transparent)]` keeps the wrapper
/// layout-free.
#[repr(transparent)]
pub struct Shared<T>(Rc<RefCell<T>>);

impl<T> Shared<T> {
    /// Move `value` into a fresh shared allocation.
    #[inline]
    pub fn new(value: T) -> Self {
        Shared(Rc::new(RefCell::new(value)))
    }

    /// Immutable borrow of the state behind the handle.
    #[inline]
    pub fn borrow(&self) -> std::cell::Ref<'_, T> {
        self.0.borrow()
    }

    /// Mutable borrow of the state behind the handle.
    #[inline]
    pub fn borrow_mut(&self) -> std::cell::RefMut<'_, T> {
        self.0.borrow_mut()
    }

    /// Whether two handles alias the same allocation. This is the
    /// identity notion the value types build their `ptr_eq` on.
    #[inline]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl<T> Clone for Shared<T> {
    #[inline]
    fn clone(&self) -> Self {
        Shared(Rc::clone(&self.0))
    }
}

impl<T: fmt::Debug> fmt::Debug for Shared<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Shared").field(&self.0).finish()
    }
}

impl<T: Default> Default for Shared<T> {
    fn default() -> Self {
        Shared::new(T::default())
    }
}

impl<T> Deref for Shared<T> {
    type Target = RefCell<T>;

    #[inline]
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}
