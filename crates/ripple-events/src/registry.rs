//! Per-event listener storage.

use std::collections::HashMap;
use std::fmt;

use crate::listener::Listener;

/// Mapping from event name to the listeners registered for it, in
/// registration order.
pub(crate) struct ListenerRegistry<C, A> {
    slots: HashMap<String, Vec<Listener<C, A>>>,
}

impl<C, A> ListenerRegistry<C, A> {
    /// Create an empty registry.
    #[must_use]
    pub(crate) fn new() -> Self {
        Self {
            slots: HashMap::new(),
        }
    }

    /// Append a listener to the slot for `event`, creating the slot if needed.
    pub(crate) fn push(&mut self, event: &str, listener: Listener<C, A>) {
        self.slots.entry(event.to_string()).or_default().push(listener);
    }

    /// Listeners registered for `event`, in registration order.
    #[must_use]
    pub(crate) fn get(&self, event: &str) -> &[Listener<C, A>] {
        self.slots
            .get(event)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Empty the slot for `event` and return what it held.
    ///
    /// An existing slot is left in place, empty.
    pub(crate) fn drain(&mut self, event: &str) -> Vec<Listener<C, A>> {
        self.slots
            .get_mut(event)
            .map(std::mem::take)
            .unwrap_or_default()
    }

    /// Remove every occurrence of `listener` from the slot for `event`.
    ///
    /// Returns the removed handles; the remaining listeners keep their
    /// relative order.
    pub(crate) fn remove(&mut self, event: &str, listener: &Listener<C, A>) -> Vec<Listener<C, A>> {
        let Some(slot) = self.slots.get_mut(event) else {
            return Vec::new();
        };

        let (removed, kept): (Vec<_>, Vec<_>) = std::mem::take(slot)
            .into_iter()
            .partition(|candidate| candidate == listener);
        *slot = kept;
        removed
    }

    /// Number of listeners registered for `event`.
    #[must_use]
    pub(crate) fn len(&self, event: &str) -> usize {
        self.get(event).len()
    }
}

impl<C, A> Default for ListenerRegistry<C, A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C, A> fmt::Debug for ListenerRegistry<C, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut map = f.debug_map();
        for (event, listeners) in &self.slots {
            map.entry(event, &listeners.len());
        }
        map.finish()
    }
}
