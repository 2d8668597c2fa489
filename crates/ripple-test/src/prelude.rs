//! Prelude module - commonly used test helpers.
//!
//! Use `use ripple_test::prelude::*;` in test modules.

// Fixtures
pub use crate::{Door, DoorEvent, WIDGET_EVENTS, Widget};

// Listeners
pub use crate::{Call, CallCounter, CallLog, counting_listener, recording_listener};

// Logging
pub use crate::{setup_test_logging, setup_test_logging_default};
