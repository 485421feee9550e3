//! Mapping status events onto pre-built feature identifiers.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use charge_map_markers::{
    BadgeConfig, FeatureIdentifier, MarkerError, PortIdentifier, PortStatus, StationDirectory,
    StationIdentifier,
};

use crate::palette::status_color;
use crate::patch::{StylePatch, StyleSink};

/// One externally observed port status change.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusEvent {
    pub station: StationIdentifier,
    pub port: PortIdentifier,
    pub status: PortStatus,
}

#[derive(Debug, thiserror::Error)]
pub enum LiveError {
    #[error(transparent)]
    Marker(#[from] MarkerError),
}

pub type Result<T> = std::result::Result<T, LiveError>;

/// Applies status changes to rendered features without touching geometry.
///
/// Holds the externally visible status state for one registered feature set:
/// a map from feature identifier to the color last emitted for it. The
/// station directory is read-only here and index resolution reuses the
/// sorted-port map cached at station construction, so each event costs two
/// hash lookups and at most one patch.
///
/// Registration performs exactly one full sweep (a patch for every
/// currently known `(station, port)` pair) so no feature is ever left in an
/// undefined default-color state before incremental events arrive.
pub struct StatusStateSync {
    directory: StationDirectory,
    config: BadgeConfig,
    emitted: HashMap<FeatureIdentifier, &'static str>,
}

impl StatusStateSync {
    /// Register a feature set and sweep initial statuses into the sink.
    ///
    /// `config` must be the same badge configuration the features were built
    /// with; it determines which ports have a segment to patch.
    pub fn register(
        directory: StationDirectory,
        config: BadgeConfig,
        sink: &mut impl StyleSink,
    ) -> Self {
        let mut sync = Self {
            directory,
            config,
            emitted: HashMap::new(),
        };

        let stations: Vec<_> = sync.directory.stations().to_vec();
        for station in &stations {
            let displayed = sync.config.displayed_ports(station.ports().len());
            for index in 0..displayed {
                let status = station
                    .ports()
                    .get(index)
                    .map(|p| p.status)
                    .unwrap_or(PortStatus::Offline);
                sync.emit(
                    FeatureIdentifier::segment(station.id(), index),
                    status_color(status),
                    sink,
                );
            }
        }
        sync
    }

    /// Apply one status event: resolve the port to its sorted index, look up
    /// the palette, and emit at most one style patch.
    ///
    /// Events for ports hidden by the display cap are dropped (there is no
    /// feature to patch). Unknown stations or ports are typed errors; the
    /// caller decides whether that kills the feed (it shouldn't, see
    /// [`crate::source::run_feed`]).
    pub fn apply(&mut self, event: &StatusEvent, sink: &mut impl StyleSink) -> Result<()> {
        let station = self.directory.require(&event.station)?;
        let index = station
            .port_index(&event.port)
            .ok_or_else(|| MarkerError::PortNotFound {
                station: event.station.clone(),
                port: event.port.clone(),
            })?;

        if index >= self.config.displayed_ports(station.ports().len()) {
            debug!(station = %event.station, port = %event.port, "port beyond display cap, no patch");
            return Ok(());
        }

        let feature_id = FeatureIdentifier::segment(&event.station, index);
        self.emit(feature_id, status_color(event.status), sink);
        Ok(())
    }

    /// Color currently held for a feature, if any patch has been emitted.
    pub fn color_of(&self, feature_id: &FeatureIdentifier) -> Option<&'static str> {
        self.emitted.get(feature_id).copied()
    }

    fn emit(&mut self, feature_id: FeatureIdentifier, color: &'static str, sink: &mut impl StyleSink) {
        // Re-emitting the color a feature already shows is a visual no-op;
        // skip the sink call so idempotence is observable.
        if self.emitted.get(&feature_id) == Some(&color) {
            return;
        }
        self.emitted.insert(feature_id.clone(), color);
        sink.set_feature_state(StylePatch { feature_id, color });
    }
}
