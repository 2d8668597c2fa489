//! Ripple Test - Shared test utilities for Ripple.
//!
//! This crate provides recording listeners, a sample owning type and
//! logging helpers that can be used across Ripple crates as a
//! dev-dependency.
//!
//! # Usage
//!
//! Add to your crate's `Cargo.toml`:
//!
//! ```toml
//! [dev-dependencies]
//! ripple-test.workspace = true
//! ```
//!
//! Then use in your tests:
//!
//! ```rust,ignore
//! use ripple_events::Evented;
//! use ripple_test::{CallLog, Widget, recording_listener};
//!
//! #[test]
//! fn test_fire() {
//!     let widget = Widget::new("w");
//!     let log = CallLog::new();
//!     widget.on("a", recording_listener("p1", &log)).unwrap();
//!
//!     widget.fire().unwrap();
//!     assert_eq!(log.labels(), ["p1"]);
//! }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]

pub mod prelude;

pub mod fixtures;
pub mod harness;
pub mod mocks;

pub use fixtures::*;
pub use harness::*;
pub use mocks::*;
