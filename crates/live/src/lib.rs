//! # charge-map-live
//!
//! Live status layer for station badges.
//!
//! Geometry is built once per station set by `charge-map-markers`; this
//! crate keeps it alive afterwards. Incoming `(station, port, status)`
//! events resolve to stable feature identifiers and come out the other end
//! as idempotent style patches: small, addressed color updates the
//! rendering surface applies without ever re-sending geometry.
//!
//! Everything here runs on the single rendering/control thread: one writer
//! (the sync component), bounded work per event, and a cancellable periodic
//! source for environments without a real status backend.

pub mod palette;
pub mod patch;
pub mod source;
pub mod sync;

pub use palette::{status_color, FALLBACK_COLOR};
pub use patch::{StylePatch, StyleSink};
pub use source::{run_feed, spawn_simulator, SimulatorConfig, SimulatorHandle, StatusFeed};
pub use sync::{LiveError, StatusEvent, StatusStateSync};
