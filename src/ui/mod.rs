//! User-facing progress output for the build step
//!
//! Diagnostics go through `tracing`; what the operator of a build sees goes
//! through a [`Reporter`]. The build holds the reporter as a capability and
//! calls it explicitly at each step.

mod emitter;

pub use emitter::{deprecation_status, DeprecationStatus, LogEmitter, Reporter};
