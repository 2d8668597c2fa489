//! Ripple Telemetry - Logging setup for applications using Ripple.
//!
//! Ripple crates log through `tracing`; this crate installs a subscriber for
//! them:
//! - Configurable format, target, and filter directives
//! - Rolling log files
//! - Configuration loadable from TOML
//!
//! # Example
//!
//! ```rust,no_run
//! use ripple_telemetry::{LogConfig, LogFormat, setup_logging};
//!
//! # fn main() -> Result<(), ripple_telemetry::TelemetryError> {
//! let config = LogConfig::new("info")
//!     .with_format(LogFormat::Compact)
//!     .with_directive("ripple_events=trace");
//!
//! setup_logging(&config)?;
//! tracing::info!("Logging ready");
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]
#![deny(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

pub mod prelude;

mod error;
mod logging;

pub use error::{TelemetryError, TelemetryResult};
pub use logging::{
    FileRotation, LogConfig, LogFormat, LogTarget, setup_default_logging, setup_logging,
};
