//! Shared state handles.
//!
//! A host usually needs the same component state from its event loop and its
//! render pass. [`State`] is a cheap clonable handle over a
//! `parking_lot::RwLock` exposing the same closure-based accessors as
//! memoized component state.

use std::sync::Arc;

use parking_lot::RwLock;

/// Clonable handle to a value shared between host callbacks.
///
/// # Examples
///
/// ```
/// use revolve_ui::State;
///
/// let count = State::new(0usize);
/// let handle = count.clone();
/// handle.with_mut(|c| *c += 1);
/// assert_eq!(count.get(), 1);
/// ```
#[derive(Debug, Default)]
pub struct State<T> {
    inner: Arc<RwLock<T>>,
}

impl<T> Clone for State<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T> State<T> {
    /// Wraps `value` in a new shared handle.
    pub fn new(value: T) -> Self {
        Self {
            inner: Arc::new(RwLock::new(value)),
        }
    }

    /// Execute a closure with a shared reference to the stored value.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        let guard = self.inner.read();
        f(&guard)
    }

    /// Execute a closure with a mutable reference to the stored value.
    pub fn with_mut<R>(&self, f: impl FnOnce(&mut T) -> R) -> R {
        let mut guard = self.inner.write();
        f(&mut guard)
    }

    /// Get a cloned value. Requires `T: Clone`.
    pub fn get(&self) -> T
    where
        T: Clone,
    {
        self.with(Clone::clone)
    }

    /// Replace the stored value.
    pub fn set(&self, value: T) {
        self.with_mut(|slot| *slot = value);
    }

    /// Returns `true` when both handles point at the same value.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}
