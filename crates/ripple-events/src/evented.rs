//! Mixin trait giving an owning type the event capability.

use std::sync::Arc;

use crate::emitter::Emitter;
use crate::error::EventResult;
use crate::event_types::{EventName, EventTypes};
use crate::listener::Listener;

/// Event capability for a type that embeds an [`Emitter`].
///
/// Implementors provide [`emitter`](Self::emitter); every other method
/// delegates to it with `self` as the listener context.
///
/// ```rust
/// use std::sync::{Arc, LazyLock};
///
/// use ripple_events::{Emitter, EventResult, EventTypes, Evented, Listener};
///
/// static DOWNLOAD_EVENTS: LazyLock<Arc<EventTypes>> =
///     LazyLock::new(|| EventTypes::attach(["progress", "done"]));
///
/// struct Download {
///     events: Emitter<Download, u8>,
/// }
///
/// impl Download {
///     fn new() -> Self {
///         Self {
///             events: Emitter::new(Arc::clone(&DOWNLOAD_EVENTS)),
///         }
///     }
///
///     fn advance(&self, percent: u8) -> EventResult<usize> {
///         self.emit("progress", &percent)
///     }
/// }
///
/// impl Evented for Download {
///     type Args = u8;
///
///     fn emitter(&self) -> &Emitter<Self, u8> {
///         &self.events
///     }
/// }
///
/// let download = Download::new();
/// download
///     .on("progress", Listener::new(|_: &Download, percent: &u8| {
///         assert_eq!(*percent, 50);
///     }))
///     .unwrap();
/// assert_eq!(download.advance(50).unwrap(), 1);
/// assert!(download.on("paused", Listener::new(|_: &Download, _: &u8| {})).is_err());
/// ```
pub trait Evented: Sized {
    /// Payload forwarded to listeners.
    type Args;

    /// The embedded emitter.
    fn emitter(&self) -> &Emitter<Self, Self::Args>;

    /// The declared event type set.
    fn event_types(&self) -> &Arc<EventTypes> {
        self.emitter().event_types()
    }

    /// Register a persistent listener.
    ///
    /// # Errors
    ///
    /// Returns [`EventError::UnknownEvent`](crate::EventError::UnknownEvent)
    /// if `event` is not declared.
    fn on<E: EventName>(&self, event: E, listener: Listener<Self, Self::Args>) -> EventResult<()> {
        self.emitter().on(event, listener)
    }

    /// Alias of [`on`](Self::on).
    ///
    /// # Errors
    ///
    /// Returns [`EventError::UnknownEvent`](crate::EventError::UnknownEvent)
    /// if `event` is not declared.
    fn listen<E: EventName>(
        &self,
        event: E,
        listener: Listener<Self, Self::Args>,
    ) -> EventResult<()> {
        self.emitter().listen(event, listener)
    }

    /// Register a one-shot listener.
    ///
    /// # Errors
    ///
    /// Returns [`EventError::UnknownEvent`](crate::EventError::UnknownEvent)
    /// if `event` is not declared.
    fn once<E: EventName>(
        &self,
        event: E,
        listener: Listener<Self, Self::Args>,
    ) -> EventResult<()> {
        self.emitter().once(event, listener)
    }

    /// Remove and return all persistent listeners for `event`.
    fn remove_all_listeners<E: EventName>(&self, event: E) -> Vec<Listener<Self, Self::Args>> {
        self.emitter().remove_all_listeners(event)
    }

    /// Remove and return all one-shot listeners for `event`.
    fn remove_all_once_listeners<E: EventName>(
        &self,
        event: E,
    ) -> Vec<Listener<Self, Self::Args>> {
        self.emitter().remove_all_once_listeners(event)
    }

    /// Remove a persistent listener; `true` if it was registered.
    fn remove_listener<E: EventName>(
        &self,
        event: E,
        listener: &Listener<Self, Self::Args>,
    ) -> bool {
        self.emitter().remove_listener(event, listener)
    }

    /// Remove a one-shot listener; `true` if it was registered.
    fn remove_once_listener<E: EventName>(
        &self,
        event: E,
        listener: &Listener<Self, Self::Args>,
    ) -> bool {
        self.emitter().remove_once_listener(event, listener)
    }

    /// Fire `event` with `self` as listener context.
    ///
    /// Intended for the implementing type's own methods.
    ///
    /// # Errors
    ///
    /// Returns [`EventError::UnknownEvent`](crate::EventError::UnknownEvent)
    /// if `event` is not declared.
    fn emit<E: EventName>(&self, event: E, args: &Self::Args) -> EventResult<usize> {
        self.emitter().emit(self, event, args)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    struct Counter {
        value: Cell<u32>,
        events: Emitter<Counter, u32>,
    }

    impl Counter {
        fn new(types: &Arc<EventTypes>) -> Self {
            Self {
                value: Cell::new(0),
                events: Emitter::new(Arc::clone(types)),
            }
        }

        fn increment(&self) -> EventResult<usize> {
            let next = self.value.get().saturating_add(1);
            self.value.set(next);
            self.emit("changed", &next)
        }
    }

    impl Evented for Counter {
        type Args = u32;

        fn emitter(&self) -> &Emitter<Self, u32> {
            &self.events
        }
    }

    fn types() -> Arc<EventTypes> {
        EventTypes::attach(["changed", "reset"])
    }

    #[test]
    fn test_listener_sees_owner_state() {
        let counter = Counter::new(&types());
        let seen = Rc::new(RefCell::new(Vec::new()));
        let seen_clone = Rc::clone(&seen);

        counter
            .on(
                "changed",
                Listener::new(move |owner: &Counter, value: &u32| {
                    seen_clone.borrow_mut().push((owner.value.get(), *value));
                }),
            )
            .unwrap();

        counter.increment().unwrap();
        counter.increment().unwrap();
        assert_eq!(*seen.borrow(), [(1, 1), (2, 2)]);
    }

    #[test]
    fn test_instances_have_independent_registries() {
        let shared = types();
        let first = Counter::new(&shared);
        let second = Counter::new(&shared);
        assert!(Arc::ptr_eq(first.event_types(), second.event_types()));

        first
            .on("changed", Listener::new(|_: &Counter, _: &u32| {}))
            .unwrap();

        assert_eq!(first.increment().unwrap(), 1);
        assert_eq!(second.increment().unwrap(), 0);
        assert_eq!(second.emitter().listener_count("changed"), 0);
    }

    #[test]
    fn test_delegated_removals() {
        let counter = Counter::new(&types());
        let persistent: Listener<Counter, u32> = Listener::new(|_, _| {});
        let one_shot: Listener<Counter, u32> = Listener::new(|_, _| {});

        counter.listen("reset", persistent.clone()).unwrap();
        counter.once("reset", one_shot.clone()).unwrap();

        assert!(counter.remove_once_listener("reset", &one_shot));
        assert!(counter.remove_all_once_listeners("reset").is_empty());
        assert_eq!(counter.remove_all_listeners("reset"), vec![persistent.clone()]);
        assert!(!counter.remove_listener("reset", &persistent));
    }

    #[test]
    fn test_unknown_event_on_owner() {
        let counter = Counter::new(&types());
        assert!(counter.emit("missing", &0).is_err());
        assert!(
            counter
                .once("missing", Listener::new(|_: &Counter, _: &u32| {}))
                .is_err()
        );
    }
}
