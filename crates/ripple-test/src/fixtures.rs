//! Sample owning types for exercising the event capability.

use std::sync::{Arc, LazyLock};

use ripple_events::{Emitter, EventName, EventResult, EventSet, EventTypes, Evented};
use serde_json::{Value, json};
use tracing::debug;

/// Events declared by [`Widget`].
pub static WIDGET_EVENTS: LazyLock<Arc<EventTypes>> =
    LazyLock::new(|| EventTypes::attach(["a", "b"]));

/// A small owning type declaring the events `a` and `b`, with
/// [`serde_json::Value`] payloads.
#[derive(Debug)]
pub struct Widget {
    name: String,
    events: Emitter<Widget, Value>,
}

impl Widget {
    /// Create a widget sharing [`WIDGET_EVENTS`].
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            events: Emitter::new(Arc::clone(&WIDGET_EVENTS)),
        }
    }

    /// The widget's name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Fire `a` with `{"b": "c"}`.
    ///
    /// # Errors
    ///
    /// Never fails in practice: `a` is declared.
    pub fn fire(&self) -> EventResult<usize> {
        debug!(widget = %self.name, "Firing a");
        self.emit("a", &json!({ "b": "c" }))
    }

    /// Fire `a` then `b`, both with `{"b": "c"}`.
    ///
    /// # Errors
    ///
    /// Never fails in practice: both events are declared.
    pub fn fire_both(&self) -> EventResult<usize> {
        let payload = json!({ "b": "c" });
        let first = self.emit("a", &payload)?;
        let second = self.emit("b", &payload)?;
        Ok(first.saturating_add(second))
    }

    /// Fire an arbitrary, possibly undeclared, event.
    ///
    /// # Errors
    ///
    /// Returns [`ripple_events::EventError::UnknownEvent`] if `event` is not
    /// declared.
    pub fn fire_named(&self, event: &str, payload: &Value) -> EventResult<usize> {
        self.emit(event, payload)
    }
}

impl Evented for Widget {
    type Args = Value;

    fn emitter(&self) -> &Emitter<Self, Value> {
        &self.events
    }
}

/// Statically declared events of [`Door`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DoorEvent {
    /// The door opened.
    Opened,
    /// The door closed.
    Closed,
}

impl EventName for DoorEvent {
    fn as_event_name(&self) -> &str {
        match self {
            Self::Opened => "opened",
            Self::Closed => "closed",
        }
    }
}

impl EventSet for DoorEvent {
    const ALL: &'static [Self] = &[Self::Opened, Self::Closed];
}

static DOOR_EVENTS: LazyLock<Arc<EventTypes>> =
    LazyLock::new(|| Arc::new(EventTypes::of::<DoorEvent>()));

/// An owning type whose events are a closed enum.
#[derive(Debug)]
pub struct Door {
    open: std::cell::Cell<bool>,
    events: Emitter<Door, bool>,
}

impl Door {
    /// Create a closed door.
    #[must_use]
    pub fn new() -> Self {
        Self {
            open: std::cell::Cell::new(false),
            events: Emitter::new(Arc::clone(&DOOR_EVENTS)),
        }
    }

    /// Whether the door is open.
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.open.get()
    }

    /// Toggle the door, firing [`DoorEvent::Opened`] or
    /// [`DoorEvent::Closed`] with the new state.
    ///
    /// # Errors
    ///
    /// Never fails: every [`DoorEvent`] is declared.
    pub fn toggle(&self) -> EventResult<usize> {
        let open = !self.open.get();
        self.open.set(open);
        let event = if open {
            DoorEvent::Opened
        } else {
            DoorEvent::Closed
        };
        self.emit(event, &open)
    }
}

impl Default for Door {
    fn default() -> Self {
        Self::new()
    }
}

impl Evented for Door {
    type Args = bool;

    fn emitter(&self) -> &Emitter<Self, bool> {
        &self.events
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_widgets_share_event_types() {
        let first = Widget::new("first");
        let second = Widget::new("second");
        assert!(Arc::ptr_eq(first.event_types(), second.event_types()));
        assert_eq!(first.event_types().as_slice(), ["a", "b"]);
        assert_eq!(second.name(), "second");
    }

    #[test]
    fn test_fire_without_listeners() {
        let widget = Widget::new("w");
        assert_eq!(widget.fire().unwrap(), 0);
        assert_eq!(widget.fire_both().unwrap(), 0);
    }

    #[test]
    fn test_door_declares_every_event() {
        let door = Door::new();
        for event in DoorEvent::ALL {
            assert!(door.event_types().contains(event.as_event_name()));
        }
        door.toggle().unwrap();
        assert!(door.is_open());
    }
}
