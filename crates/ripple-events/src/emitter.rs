//! Per-instance listener registries and synchronous dispatch.

use std::cell::RefCell;
use std::fmt;
use std::sync::Arc;

use tracing::{debug, trace, warn};

use crate::error::{EventError, EventResult, Operation};
use crate::event_types::{EventName, EventTypes};
use crate::listener::{Listener, ListenerKind};
use crate::registry::ListenerRegistry;

/// The event capability embedded in an owning value.
///
/// Holds the shared [`EventTypes`] of the owning type and two lazily
/// allocated registries: persistent listeners and one-shot listeners.
/// `C` is the owning type, handed to every listener as invocation context;
/// `A` is the argument payload forwarded by [`emit`](Self::emit).
///
/// Everything runs on the calling thread. Registries are never borrowed
/// while listeners execute, so a listener may subscribe, unsubscribe, or
/// emit on the same emitter.
pub struct Emitter<C, A> {
    types: Arc<EventTypes>,
    listeners: RefCell<Option<ListenerRegistry<C, A>>>,
    once_listeners: RefCell<Option<ListenerRegistry<C, A>>>,
}

impl<C, A> Emitter<C, A> {
    /// Create an emitter for one instance of a type declaring `types`.
    ///
    /// No registry is allocated until the first registration or removal.
    #[must_use]
    pub fn new(types: Arc<EventTypes>) -> Self {
        Self {
            types,
            listeners: RefCell::new(None),
            once_listeners: RefCell::new(None),
        }
    }

    /// The declared event type set shared with every sibling instance.
    #[must_use]
    pub fn event_types(&self) -> &Arc<EventTypes> {
        &self.types
    }

    fn registry(&self, kind: ListenerKind) -> &RefCell<Option<ListenerRegistry<C, A>>> {
        match kind {
            ListenerKind::Persistent => &self.listeners,
            ListenerKind::Once => &self.once_listeners,
        }
    }

    fn ensure_declared(&self, event: &str, operation: Operation) -> EventResult<()> {
        if self.types.contains(event) {
            return Ok(());
        }
        warn!(event, %operation, "Rejected unknown event");
        Err(EventError::unknown(event, operation))
    }

    fn register(
        &self,
        kind: ListenerKind,
        event: &str,
        listener: Listener<C, A>,
    ) -> EventResult<()> {
        self.ensure_declared(event, Operation::Listen)?;

        self.registry(kind)
            .borrow_mut()
            .get_or_insert_with(ListenerRegistry::new)
            .push(event, listener);

        debug!(event, %kind, "Listener registered");
        Ok(())
    }

    fn take_all(&self, kind: ListenerKind, event: &str) -> Vec<Listener<C, A>> {
        let removed = self
            .registry(kind)
            .borrow_mut()
            .get_or_insert_with(ListenerRegistry::new)
            .drain(event);

        if !removed.is_empty() {
            debug!(event, %kind, count = removed.len(), "Listeners removed");
        }
        removed
    }

    fn take(&self, kind: ListenerKind, event: &str, listener: &Listener<C, A>) -> bool {
        // Bound so the removed handles drop after the borrow is released.
        let removed = self
            .registry(kind)
            .borrow_mut()
            .get_or_insert_with(ListenerRegistry::new)
            .remove(event, listener);

        if removed.is_empty() {
            return false;
        }
        debug!(event, %kind, count = removed.len(), "Listener removed");
        true
    }

    fn count(&self, kind: ListenerKind, event: &str) -> usize {
        self.registry(kind)
            .borrow()
            .as_ref()
            .map_or(0, |registry| registry.len(event))
    }

    /// Register a persistent listener for `event`.
    ///
    /// # Errors
    ///
    /// Returns [`EventError::UnknownEvent`] if `event` is not declared.
    pub fn on<E: EventName>(&self, event: E, listener: Listener<C, A>) -> EventResult<()> {
        self.register(ListenerKind::Persistent, event.as_event_name(), listener)
    }

    /// Alias of [`on`](Self::on).
    ///
    /// # Errors
    ///
    /// Returns [`EventError::UnknownEvent`] if `event` is not declared.
    pub fn listen<E: EventName>(&self, event: E, listener: Listener<C, A>) -> EventResult<()> {
        self.on(event, listener)
    }

    /// Register a listener that fires on the next emit of `event` only.
    ///
    /// # Errors
    ///
    /// Returns [`EventError::UnknownEvent`] if `event` is not declared.
    pub fn once<E: EventName>(&self, event: E, listener: Listener<C, A>) -> EventResult<()> {
        self.register(ListenerKind::Once, event.as_event_name(), listener)
    }

    /// Remove all persistent listeners for `event`, returning them in
    /// registration order.
    ///
    /// Undeclared names are accepted and yield nothing.
    pub fn remove_all_listeners<E: EventName>(&self, event: E) -> Vec<Listener<C, A>> {
        self.take_all(ListenerKind::Persistent, event.as_event_name())
    }

    /// Remove all one-shot listeners for `event`, returning them in
    /// registration order.
    pub fn remove_all_once_listeners<E: EventName>(&self, event: E) -> Vec<Listener<C, A>> {
        self.take_all(ListenerKind::Once, event.as_event_name())
    }

    /// Remove every occurrence of a persistent `listener` for `event`.
    ///
    /// Returns `true` if at least one occurrence was removed.
    pub fn remove_listener<E: EventName>(&self, event: E, listener: &Listener<C, A>) -> bool {
        self.take(ListenerKind::Persistent, event.as_event_name(), listener)
    }

    /// Remove every occurrence of a one-shot `listener` for `event`.
    ///
    /// Returns `true` if at least one occurrence was removed.
    pub fn remove_once_listener<E: EventName>(&self, event: E, listener: &Listener<C, A>) -> bool {
        self.take(ListenerKind::Once, event.as_event_name(), listener)
    }

    /// Number of persistent listeners registered for `event`.
    #[must_use]
    pub fn listener_count<E: EventName>(&self, event: E) -> usize {
        self.count(ListenerKind::Persistent, event.as_event_name())
    }

    /// Number of one-shot listeners waiting for `event`.
    #[must_use]
    pub fn once_listener_count<E: EventName>(&self, event: E) -> usize {
        self.count(ListenerKind::Once, event.as_event_name())
    }

    /// Fire `event`, invoking its listeners with `ctx` and `args`.
    ///
    /// The listeners to fire are fixed before the first one runs: every
    /// one-shot listener is claimed (and removed) first, then the persistent
    /// listeners are copied, both in registration order. Listeners added
    /// while firing wait for the next emit. A panicking listener aborts the
    /// rest of the dispatch and the panic reaches the caller.
    ///
    /// Meant to be called by the owning type's own methods. Returns the
    /// number of listeners invoked.
    ///
    /// # Errors
    ///
    /// Returns [`EventError::UnknownEvent`] if `event` is not declared; no
    /// listener is touched in that case.
    pub fn emit<E: EventName>(&self, ctx: &C, event: E, args: &A) -> EventResult<usize> {
        let event = event.as_event_name();
        self.ensure_declared(event, Operation::Emit)?;

        let mut to_fire = self
            .once_listeners
            .borrow_mut()
            .as_mut()
            .map(|registry| registry.drain(event))
            .unwrap_or_default();
        let once = to_fire.len();

        if let Some(registry) = self.listeners.borrow().as_ref() {
            to_fire.extend_from_slice(registry.get(event));
        }

        trace!(
            event,
            once,
            persistent = to_fire.len().saturating_sub(once),
            "Firing event"
        );

        for listener in &to_fire {
            listener.call(ctx, args);
        }

        Ok(to_fire.len())
    }
}

impl<C, A> fmt::Debug for Emitter<C, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Emitter")
            .field("event_types", &self.types)
            .field("listeners", &self.listeners)
            .field("once_listeners", &self.once_listeners)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    type TestEmitter = Emitter<(), u32>;
    type TestListener = Listener<(), u32>;

    fn emitter() -> TestEmitter {
        Emitter::new(EventTypes::attach(["a", "b"]))
    }

    fn counter() -> (Rc<Cell<usize>>, TestListener) {
        let count = Rc::new(Cell::new(0_usize));
        let count_clone = Rc::clone(&count);
        let listener = Listener::new(move |_: &(), _: &u32| {
            count_clone.set(count_clone.get().saturating_add(1));
        });
        (count, listener)
    }

    fn recorder(label: &'static str, log: &Rc<RefCell<Vec<&'static str>>>) -> TestListener {
        let log = Rc::clone(log);
        Listener::new(move |_: &(), _: &u32| log.borrow_mut().push(label))
    }

    #[test]
    fn test_registries_start_unallocated() {
        let emitter = emitter();
        assert!(emitter.listeners.borrow().is_none());
        assert!(emitter.once_listeners.borrow().is_none());
        assert_eq!(emitter.listener_count("a"), 0);

        // Emitting reads through absent registries without allocating them.
        assert_eq!(emitter.emit(&(), "a", &1).unwrap(), 0);
        assert!(emitter.listeners.borrow().is_none());
    }

    #[test]
    fn test_registration_allocates_only_its_registry() {
        let emitter = emitter();
        let (_, listener) = counter();

        emitter.on("a", listener).unwrap();
        assert!(emitter.listeners.borrow().is_some());
        assert!(emitter.once_listeners.borrow().is_none());
    }

    #[test]
    fn test_removal_allocates_registry() {
        let emitter = emitter();
        assert!(emitter.remove_all_once_listeners("b").is_empty());
        assert!(emitter.once_listeners.borrow().is_some());
    }

    #[test]
    fn test_persistent_listener_fires_every_emit() {
        let emitter = emitter();
        let (count, listener) = counter();
        emitter.on("a", listener).unwrap();

        for expected in 1..=3 {
            assert_eq!(emitter.emit(&(), "a", &0).unwrap(), 1);
            assert_eq!(count.get(), expected);
        }
    }

    #[test]
    fn test_once_listener_fires_once() {
        let emitter = emitter();
        let (count, listener) = counter();
        emitter.once("a", listener).unwrap();

        assert_eq!(emitter.emit(&(), "a", &0).unwrap(), 1);
        assert_eq!(emitter.emit(&(), "a", &0).unwrap(), 0);
        assert_eq!(emitter.emit(&(), "a", &0).unwrap(), 0);
        assert_eq!(count.get(), 1);
        assert_eq!(emitter.once_listener_count("a"), 0);
    }

    #[test]
    fn test_once_listeners_fire_before_persistent() {
        let emitter = emitter();
        let log = Rc::new(RefCell::new(Vec::new()));

        emitter.on("a", recorder("p1", &log)).unwrap();
        emitter.once("a", recorder("o1", &log)).unwrap();
        emitter.on("a", recorder("p2", &log)).unwrap();
        emitter.once("a", recorder("o2", &log)).unwrap();

        emitter.emit(&(), "a", &0).unwrap();
        assert_eq!(*log.borrow(), ["o1", "o2", "p1", "p2"]);
    }

    #[test]
    fn test_listener_receives_context_and_args() {
        let emitter: Emitter<String, u32> = Emitter::new(EventTypes::attach(["a"]));
        let seen = Rc::new(RefCell::new(None));
        let seen_clone = Rc::clone(&seen);

        emitter
            .on(
                "a",
                Listener::new(move |ctx: &String, args: &u32| {
                    *seen_clone.borrow_mut() = Some(format!("{ctx}:{args}"));
                }),
            )
            .unwrap();

        emitter.emit(&"owner".to_string(), "a", &7).unwrap();
        assert_eq!(seen.borrow().as_deref(), Some("owner:7"));
    }

    #[test]
    fn test_unknown_event_rejected() {
        let emitter = emitter();
        let (count, listener) = counter();

        let err = emitter.on("c", listener.clone()).unwrap_err();
        assert_eq!(err.operation(), Operation::Listen);
        assert_eq!(err.event(), "c");

        let err = emitter.once("c", listener).unwrap_err();
        assert_eq!(err.operation(), Operation::Listen);

        let err = emitter.emit(&(), "c", &0).unwrap_err();
        assert_eq!(
            err,
            EventError::UnknownEvent {
                event: "c".to_string(),
                operation: Operation::Emit,
            }
        );
        assert_eq!(count.get(), 0);
        assert!(emitter.listeners.borrow().is_none());
    }

    #[test]
    fn test_unknown_emit_leaves_listeners_untouched() {
        let emitter = emitter();
        let (count, listener) = counter();
        emitter.once("a", listener).unwrap();

        assert!(emitter.emit(&(), "zz", &0).is_err());
        assert_eq!(emitter.once_listener_count("a"), 1);

        emitter.emit(&(), "a", &0).unwrap();
        assert_eq!(count.get(), 1);
    }

    #[test]
    fn test_duplicate_registration_fires_twice() {
        let emitter = emitter();
        let (count, listener) = counter();
        emitter.on("a", listener.clone()).unwrap();
        emitter.listen("a", listener.clone()).unwrap();

        assert_eq!(emitter.emit(&(), "a", &0).unwrap(), 2);
        assert_eq!(count.get(), 2);

        assert!(emitter.remove_listener("a", &listener));
        assert_eq!(emitter.listener_count("a"), 0);
    }

    #[test]
    fn test_remove_listener_reports_presence() {
        let emitter = emitter();
        let (count, listener) = counter();
        emitter.on("a", listener.clone()).unwrap();

        assert!(emitter.remove_listener("a", &listener));
        assert!(!emitter.remove_listener("a", &listener));
        assert!(!emitter.remove_listener("b", &listener));
        assert!(!emitter.remove_listener("undeclared", &listener));

        emitter.emit(&(), "a", &0).unwrap();
        assert_eq!(count.get(), 0);
    }

    #[test]
    fn test_remove_once_listener() {
        let emitter = emitter();
        let (removed_count, removed) = counter();
        let (kept_count, kept) = counter();
        emitter.once("a", removed.clone()).unwrap();
        emitter.once("a", kept).unwrap();

        assert!(emitter.remove_once_listener("a", &removed));
        assert!(!emitter.remove_once_listener("a", &removed));

        emitter.emit(&(), "a", &0).unwrap();
        emitter.emit(&(), "a", &0).unwrap();
        assert_eq!(removed_count.get(), 0);
        assert_eq!(kept_count.get(), 1);
    }

    #[test]
    fn test_categories_are_separate() {
        let emitter = emitter();
        let (_, listener) = counter();
        emitter.on("a", listener.clone()).unwrap();

        assert!(!emitter.remove_once_listener("a", &listener));
        assert!(emitter.remove_all_once_listeners("a").is_empty());
        assert_eq!(emitter.listener_count("a"), 1);
    }

    #[test]
    fn test_remove_all_returns_in_order() {
        let emitter = emitter();
        let (_, first) = counter();
        let (_, second) = counter();
        emitter.on("a", first.clone()).unwrap();
        emitter.on("a", second.clone()).unwrap();

        assert_eq!(emitter.remove_all_listeners("a"), vec![first, second]);
        assert!(emitter.remove_all_listeners("a").is_empty());
        assert_eq!(emitter.emit(&(), "a", &0).unwrap(), 0);
    }

    #[test]
    fn test_remove_all_unknown_event_is_empty() {
        let emitter = emitter();
        assert!(emitter.remove_all_listeners("nope").is_empty());
        assert!(emitter.remove_all_once_listeners("nope").is_empty());
    }

    #[test]
    fn test_panicking_listener_aborts_dispatch() {
        let emitter = emitter();
        let (count, after) = counter();
        emitter
            .once("a", Listener::new(|_: &(), _: &u32| panic!("listener failed")))
            .unwrap();
        emitter.on("a", after).unwrap();

        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            emitter.emit(&(), "a", &0)
        }));
        assert!(result.is_err());
        assert_eq!(count.get(), 0);

        // The one-shot was claimed before it ran.
        assert_eq!(emitter.once_listener_count("a"), 0);
        assert_eq!(emitter.emit(&(), "a", &0).unwrap(), 1);
        assert_eq!(count.get(), 1);
    }

    #[test]
    fn test_nested_emit_does_not_refire_claimed_once() {
        let emitter = Rc::new(emitter());
        let (count, listener) = counter();
        let nested = Rc::new(Cell::new(0_usize));

        let inner = Rc::clone(&emitter);
        let nested_clone = Rc::clone(&nested);
        emitter.once("a", listener).unwrap();
        emitter
            .on(
                "a",
                Listener::new(move |_: &(), depth: &u32| {
                    if *depth == 0 {
                        nested_clone.set(inner.emit(&(), "a", &1).unwrap());
                    }
                }),
            )
            .unwrap();

        assert_eq!(emitter.emit(&(), "a", &0).unwrap(), 2);
        assert_eq!(count.get(), 1);
        // Only the persistent listener is left for the nested emit.
        assert_eq!(nested.get(), 1);
    }

    #[test]
    fn test_remove_all_mid_dispatch_keeps_snapshot() {
        let emitter = Rc::new(emitter());
        let (count, after) = counter();

        let inner = Rc::clone(&emitter);
        emitter
            .on(
                "a",
                Listener::new(move |_: &(), _: &u32| {
                    inner.remove_all_listeners("a");
                }),
            )
            .unwrap();
        emitter.on("a", after).unwrap();

        assert_eq!(emitter.emit(&(), "a", &0).unwrap(), 2);
        assert_eq!(count.get(), 1);
        assert_eq!(emitter.listener_count("a"), 0);
        assert_eq!(emitter.emit(&(), "a", &0).unwrap(), 0);
    }

    #[test]
    fn test_debug_lists_counts() {
        let emitter = emitter();
        let (_, listener) = counter();
        emitter.on("a", listener).unwrap();

        let rendered = format!("{emitter:?}");
        assert!(rendered.contains("Emitter"));
        assert!(rendered.contains("\"a\": 1"));
    }
}
