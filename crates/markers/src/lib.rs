//! # charge-map-markers
//!
//! Geometry synthesis for charging-station map badges.
//!
//! Each station is rendered as a rounded-rectangle badge whose perimeter is
//! split into one arc per charging port, plus a smaller concentric polygon in
//! the middle. This crate owns everything up to (and including) the GeoJSON
//! feature collections handed to the rendering surface:
//!
//! - **Metric projection**: meter offsets to lng/lat deltas at a latitude
//! - **Perimeter parametrization**: the badge boundary as a single closed
//!   curve addressed by arc length
//! - **Segment partitioning**: gapped fractional ranges, one per port
//! - **Feature assembly**: stable-identity `center`/`segment` features with
//!   a memoized per-station-list cache
//! - **Station factory**: deterministic seeded test data
//!
//! Live status updates are deliberately *not* here: they land as style
//! patches addressed by feature identifier (see `charge-map-live`) and never
//! touch the geometry built by this crate.
//!
//! ## Example
//!
//! ```
//! use charge_map_markers::prelude::*;
//! use geo::Point;
//!
//! let station = Station::new(
//!     StationIdentifier::new("1"),
//!     "TOK Station #1",
//!     "TOK",
//!     Point::new(69.2401, 41.2995),
//!     vec![
//!         Port::new(PortIdentifier::new("1.1"), "A", PortStatus::Free, Connector::Type2),
//!         Port::new(PortIdentifier::new("1.2"), "B", PortStatus::Busy, Connector::GbtDc),
//!     ],
//! );
//!
//! let features = station_features(&station, &BadgeConfig::default());
//! // One center polygon + one segment per port.
//! assert_eq!(features.features.len(), 3);
//! ```

pub mod directory;
pub mod factory;
pub mod features;
pub mod geometry;
pub mod identifiers;
pub mod models;

// Re-exports for convenience
pub mod prelude {
    pub use crate::directory::StationDirectory;
    pub use crate::factory::{generate_stations, FactoryConfig};
    pub use crate::features::{station_features, BadgeConfig, FeatureCache};
    pub use crate::geometry::partition::{segment_ranges, DEFAULT_GAP};
    pub use crate::geometry::perimeter::RoundedRect;
    pub use crate::geometry::projection::LocalProjection;
    pub use crate::identifiers::*;
    pub use crate::models::types::*;
}

pub use prelude::*;
