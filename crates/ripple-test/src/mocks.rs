//! Recording and counting listeners.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use ripple_events::Listener;

/// One recorded listener invocation.
#[derive(Debug, Clone, PartialEq)]
pub struct Call<A> {
    /// Label given to the listener that ran.
    pub label: String,
    /// Arguments it received.
    pub args: A,
}

/// Ordered record of listener invocations, shared between clones.
#[derive(Debug)]
pub struct CallLog<A = serde_json::Value> {
    calls: Rc<RefCell<Vec<Call<A>>>>,
}

impl<A> CallLog<A> {
    /// Create an empty log.
    #[must_use]
    pub fn new() -> Self {
        Self {
            calls: Rc::new(RefCell::new(Vec::new())),
        }
    }

    /// Append a call.
    pub fn record(&self, label: impl Into<String>, args: A) {
        self.calls.borrow_mut().push(Call {
            label: label.into(),
            args,
        });
    }

    /// Labels in invocation order.
    #[must_use]
    pub fn labels(&self) -> Vec<String> {
        self.calls
            .borrow()
            .iter()
            .map(|call| call.label.clone())
            .collect()
    }

    /// Number of calls recorded for `label`.
    #[must_use]
    pub fn count(&self, label: &str) -> usize {
        self.calls
            .borrow()
            .iter()
            .filter(|call| call.label == label)
            .count()
    }

    /// Total number of calls.
    #[must_use]
    pub fn len(&self) -> usize {
        self.calls.borrow().len()
    }

    /// Whether nothing was recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.calls.borrow().is_empty()
    }

    /// Forget every recorded call.
    pub fn clear(&self) {
        self.calls.borrow_mut().clear();
    }
}

impl<A: Clone> CallLog<A> {
    /// Snapshot of every call.
    #[must_use]
    pub fn calls(&self) -> Vec<Call<A>> {
        self.calls.borrow().clone()
    }
}

impl<A> Clone for CallLog<A> {
    fn clone(&self) -> Self {
        Self {
            calls: Rc::clone(&self.calls),
        }
    }
}

impl<A> Default for CallLog<A> {
    fn default() -> Self {
        Self::new()
    }
}

/// Shared invocation counter.
#[derive(Debug, Clone, Default)]
pub struct CallCounter {
    count: Rc<Cell<usize>>,
}

impl CallCounter {
    /// Create a counter at zero.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current count.
    #[must_use]
    pub fn get(&self) -> usize {
        self.count.get()
    }

    fn bump(&self) {
        self.count.set(self.count.get().saturating_add(1));
    }
}

/// A listener that records `label` and a clone of its arguments in `log`.
#[must_use]
pub fn recording_listener<C, A>(label: &str, log: &CallLog<A>) -> Listener<C, A>
where
    C: 'static,
    A: Clone + 'static,
{
    let label = label.to_string();
    let log = log.clone();
    Listener::new(move |_: &C, args: &A| log.record(label.clone(), args.clone()))
}

/// A listener that bumps `counter` on every invocation.
#[must_use]
pub fn counting_listener<C: 'static, A: 'static>(counter: &CallCounter) -> Listener<C, A> {
    let counter = counter.clone();
    Listener::new(move |_: &C, _: &A| counter.bump())
}
