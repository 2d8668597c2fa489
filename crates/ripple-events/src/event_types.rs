//! Declared event type sets and event naming.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// Anything that can name an event.
///
/// Implemented for string types so names can be supplied dynamically, and
/// meant to be implemented by event enums so names are checked at compile
/// time.
pub trait EventName {
    /// The event name as registered in the event type set.
    fn as_event_name(&self) -> &str;
}

impl EventName for str {
    fn as_event_name(&self) -> &str {
        self
    }
}

impl EventName for String {
    fn as_event_name(&self) -> &str {
        self
    }
}

impl<T: EventName + ?Sized> EventName for &T {
    fn as_event_name(&self) -> &str {
        (**self).as_event_name()
    }
}

/// A closed set of statically known events.
///
/// An [`EventTypes`] built with [`EventTypes::of`] declares every member of
/// `ALL`, so registering or emitting any value of the implementing type can
/// never fail with an unknown event.
///
/// ```rust
/// use ripple_events::{EventName, EventSet, EventTypes};
///
/// #[derive(Debug, Clone, Copy)]
/// enum Door {
///     Opened,
///     Closed,
/// }
///
/// impl EventName for Door {
///     fn as_event_name(&self) -> &str {
///         match self {
///             Door::Opened => "opened",
///             Door::Closed => "closed",
///         }
///     }
/// }
///
/// impl EventSet for Door {
///     const ALL: &'static [Self] = &[Door::Opened, Door::Closed];
/// }
///
/// let types = EventTypes::of::<Door>();
/// assert!(types.contains("opened"));
/// assert_eq!(types.len(), 2);
/// ```
pub trait EventSet: EventName + Sized + 'static {
    /// Every event of the set, in declaration order.
    const ALL: &'static [Self];
}

/// The ordered set of event names an owning type may emit or be listened
/// to for.
///
/// Built once per owning type and shared by all of its instances behind an
/// `Arc`. Names are kept exactly as supplied: no deduplication, no
/// validation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventTypes {
    names: Vec<String>,
}

impl EventTypes {
    /// Create an event type set from the given names.
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            names: names.into_iter().map(Into::into).collect(),
        }
    }

    /// Create a shared event type set, ready to hand to every instance.
    #[must_use]
    pub fn attach<I, S>(names: I) -> Arc<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Arc::new(Self::new(names))
    }

    /// Create an event type set declaring every member of `E`.
    #[must_use]
    pub fn of<E: EventSet>() -> Self {
        Self::new(E::ALL.iter().map(|event| event.as_event_name().to_string()))
    }

    /// Whether `event` is declared.
    #[must_use]
    pub fn contains(&self, event: &str) -> bool {
        self.names.iter().any(|name| name == event)
    }

    /// Declared names in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    /// Declared names as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[String] {
        &self.names
    }

    /// Number of declared names.
    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Whether nothing is declared.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for EventTypes {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::new(iter)
    }
}
