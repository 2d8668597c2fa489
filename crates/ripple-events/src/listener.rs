//! Listener handles.

use std::fmt;
use std::rc::Rc;

/// Which registry a listener lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListenerKind {
    /// Fires on every emit until removed.
    Persistent,
    /// Fires on the next emit only.
    Once,
}

impl fmt::Display for ListenerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Persistent => f.write_str("persistent"),
            Self::Once => f.write_str("once"),
        }
    }
}

/// A reference-counted event callback.
///
/// Invoked with the owning instance as context `C` and the forwarded
/// arguments `A`. Equality is identity: clones of one listener compare equal,
/// listeners built from separate `new` calls never do, even from the same
/// closure. Keep a clone around to remove the listener later.
pub struct Listener<C, A> {
    callback: Rc<dyn Fn(&C, &A)>,
}

impl<C, A> Listener<C, A> {
    /// Wrap a callback.
    pub fn new<F>(callback: F) -> Self
    where
        F: Fn(&C, &A) + 'static,
    {
        Self {
            callback: Rc::new(callback),
        }
    }

    /// Invoke the callback.
    pub fn call(&self, ctx: &C, args: &A) {
        (self.callback)(ctx, args);
    }

    /// Whether both handles refer to the same callback.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.callback, &other.callback)
    }
}

impl<C, A> Clone for Listener<C, A> {
    fn clone(&self) -> Self {
        Self {
            callback: Rc::clone(&self.callback),
        }
    }
}

impl<C, A> PartialEq for Listener<C, A> {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl<C, A> Eq for Listener<C, A> {}

impl<C, A> fmt::Debug for Listener<C, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Listener")
            .field("callback", &Rc::as_ptr(&self.callback).cast::<()>())
            .finish()
    }
}
