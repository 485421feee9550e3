//! Immutable, shared station directory.

use std::collections::HashMap;
use std::sync::Arc;

use crate::identifiers::StationIdentifier;
use crate::models::types::{MarkerError, Result, Station};

/// An immutable set of stations with identifier lookup.
///
/// This type is cheap to clone since all data is stored in `Arc`s. The
/// identity of the underlying station list (`Arc::ptr_eq`) is what keys the
/// feature cache: two clones of the same directory share one feature build,
/// while constructing a new directory (even from equal data) is a new
/// identity and triggers exactly one rebuild.
#[derive(Clone)]
pub struct StationDirectory {
    stations: Arc<[Arc<Station>]>,
    station_map: HashMap<StationIdentifier, Arc<Station>>,
}

impl StationDirectory {
    pub fn new(stations: Vec<Arc<Station>>) -> Self {
        let station_map = stations
            .iter()
            .map(|s| (s.id().clone(), Arc::clone(s)))
            .collect();

        Self {
            stations: stations.into(),
            station_map,
        }
    }

    /// Stations in insertion order.
    pub fn stations(&self) -> &[Arc<Station>] {
        &self.stations
    }

    /// The shared list itself; its pointer identity keys the feature cache.
    pub fn station_list(&self) -> &Arc<[Arc<Station>]> {
        &self.stations
    }

    pub fn get(&self, id: &StationIdentifier) -> Option<&Arc<Station>> {
        self.station_map.get(id)
    }

    pub fn require(&self, id: &StationIdentifier) -> Result<&Arc<Station>> {
        self.station_map
            .get(id)
            .ok_or_else(|| MarkerError::StationNotFound(id.clone()))
    }

    pub fn len(&self) -> usize {
        self.stations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stations.is_empty()
    }
}
