//! Ripple Events - publish/subscribe listeners for any owning type.
//!
//! This crate provides:
//! - Declared event type sets, shared by every instance of an owning type
//! - Persistent and one-shot listener registries, allocated per instance on
//!   first use
//! - Synchronous dispatch that snapshots its listeners before firing
//! - The [`Evented`] trait, which gives the owning type the full capability
//!   once it embeds an [`Emitter`]
//!
//! # Architecture
//!
//! An owning type declares its events once with [`EventTypes::attach`] and
//! hands the shared set to an [`Emitter`] in each instance. Consumers
//! register listeners with `on`/`listen` or `once`; the owning type fires
//! events from its own methods with `emit`. Within one emit, one-shot
//! listeners run first, then persistent ones, each group in registration
//! order.
//!
//! Names outside the declared set are rejected with
//! [`EventError::UnknownEvent`] when registering or emitting. Removal never
//! fails. Event enums implementing [`EventSet`] can build a set that declares
//! every variant.
//!
//! # Example
//!
//! ```rust
//! use ripple_events::{Emitter, EventTypes, Listener};
//!
//! let emitter: Emitter<(), String> = Emitter::new(EventTypes::attach(["saved"]));
//!
//! let listener = Listener::new(|_: &(), path: &String| {
//!     assert_eq!(path, "notes.txt");
//! });
//! emitter.once("saved", listener).unwrap();
//!
//! assert_eq!(emitter.emit(&(), "saved", &"notes.txt".to_string()).unwrap(), 1);
//! assert_eq!(emitter.emit(&(), "saved", &"notes.txt".to_string()).unwrap(), 0);
//! assert!(emitter.emit(&(), "deleted", &String::new()).is_err());
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]
#![deny(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

pub mod prelude;

mod emitter;
mod error;
mod event_types;
mod evented;
mod listener;
mod registry;

pub use emitter::Emitter;
pub use error::{EventError, EventResult, Operation};
pub use event_types::{EventName, EventSet, EventTypes};
pub use evented::Evented;
pub use listener::{Listener, ListenerKind};
