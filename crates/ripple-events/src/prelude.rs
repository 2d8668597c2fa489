//! Prelude module - commonly used types for convenient import.
//!
//! Use `use ripple_events::prelude::*;` to import all essential types.
//!
//! # Example
//!
//! ```rust
//! use ripple_events::prelude::*;
//!
//! let emitter: Emitter<(), u32> = Emitter::new(EventTypes::attach(["tick"]));
//! emitter.on("tick", Listener::new(|_: &(), _: &u32| {})).unwrap();
//! assert_eq!(emitter.listener_count("tick"), 1);
//! ```

// Capability
pub use crate::{Emitter, Evented};

// Declarations
pub use crate::{EventName, EventSet, EventTypes};

// Listeners
pub use crate::{Listener, ListenerKind};

// Errors
pub use crate::{EventError, EventResult, Operation};
