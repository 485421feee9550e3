//! Core data types and enums for station data.

use std::collections::HashMap;

use geo::Point;
use serde::{Deserialize, Serialize};

use crate::identifiers::*;

// ============================================================================
// Enums
// ============================================================================

/// Live availability of a single charging port.
///
/// Status is the only field expected to change over a station's lifetime;
/// changes arrive from outside the engine as `(station, port, status)` events.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PortStatus {
    Free,
    Busy,
    Offline,
}

impl PortStatus {
    /// Parse a wire-format status code.
    ///
    /// Anything outside the recognized set resolves to `Offline` rather than
    /// erroring, so a misbehaving status source degrades to the gray palette
    /// entry instead of aborting feature updates.
    pub fn from_code(code: &str) -> Self {
        match code {
            "FREE" => Self::Free,
            "BUSY" => Self::Busy,
            _ => Self::Offline,
        }
    }

    pub fn as_code(&self) -> &'static str {
        match self {
            Self::Free => "FREE",
            Self::Busy => "BUSY",
            Self::Offline => "OFFLINE",
        }
    }
}

/// Physical connector type of a port.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Connector {
    Type2,
    GbtDc,
}

impl Connector {
    /// Nominal power rating in kW.
    pub fn power_kw(&self) -> f64 {
        match self {
            Self::Type2 => 22.0,
            Self::GbtDc => 120.0,
        }
    }

    /// Tariff per kWh, in so'm.
    pub fn price(&self) -> u32 {
        match self {
            Self::Type2 => 1_500,
            Self::GbtDc => 2_500,
        }
    }

    pub fn is_dc(&self) -> bool {
        matches!(self, Self::GbtDc)
    }
}

// ============================================================================
// Data Structures
// ============================================================================

/// A single charging port of a station.
#[derive(Clone, Debug)]
pub struct Port {
    pub id: PortIdentifier,
    pub label: String,
    pub status: PortStatus,
    pub connector: Connector,
}

impl Port {
    pub fn new(
        id: PortIdentifier,
        label: impl Into<String>,
        status: PortStatus,
        connector: Connector,
    ) -> Self {
        Self {
            id,
            label: label.into(),
            status,
            connector,
        }
    }

    pub fn power_kw(&self) -> f64 {
        self.connector.power_kw()
    }

    pub fn price(&self) -> u32 {
        self.connector.price()
    }
}

/// An immutable charging station record.
///
/// Ports are sorted once by port-id key at construction and the resulting
/// `port -> sorted index` map is cached, so resolving a status event to its
/// segment feature never re-sorts. The engine never mutates a station after
/// construction.
#[derive(Clone, Debug)]
pub struct Station {
    id: StationIdentifier,
    name: String,
    brand: String,
    position: Point,
    ports: Vec<Port>,
    port_indices: HashMap<PortIdentifier, usize>,
}

impl Station {
    pub fn new(
        id: StationIdentifier,
        name: impl Into<String>,
        brand: impl Into<String>,
        position: Point,
        mut ports: Vec<Port>,
    ) -> Self {
        ports.sort_by(|a, b| a.id.cmp(&b.id));
        let port_indices = ports
            .iter()
            .enumerate()
            .map(|(i, p)| (p.id.clone(), i))
            .collect();

        Self {
            id,
            name: name.into(),
            brand: brand.into(),
            position,
            ports,
            port_indices,
        }
    }

    pub fn id(&self) -> &StationIdentifier {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn brand(&self) -> &str {
        &self.brand
    }

    pub fn position(&self) -> Point {
        self.position
    }

    /// Ports in sorted-port-key order. May be empty.
    pub fn ports(&self) -> &[Port] {
        &self.ports
    }

    /// Sorted-order index of a port, the same ordering used when the
    /// station's segment features were built.
    pub fn port_index(&self, port: &PortIdentifier) -> Option<usize> {
        self.port_indices.get(port).copied()
    }
}

// ============================================================================
// Errors
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum MarkerError {
    #[error("Station not found: {0}")]
    StationNotFound(StationIdentifier),

    #[error("Port not found on station {station}: {port}")]
    PortNotFound {
        station: StationIdentifier,
        port: PortIdentifier,
    },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, MarkerError>;

#[cfg(test)]
mod tests {
    use super::*;

    fn port(id: &str) -> Port {
        Port::new(PortIdentifier::new(id), "A", PortStatus::Free, Connector::Type2)
    }

    #[test]
    fn test_status_from_code() {
        assert_eq!(PortStatus::from_code("FREE"), PortStatus::Free);
        assert_eq!(PortStatus::from_code("BUSY"), PortStatus::Busy);
        assert_eq!(PortStatus::from_code("OFFLINE"), PortStatus::Offline);
        // Unrecognized codes fail soft
        assert_eq!(PortStatus::from_code("MAINTENANCE"), PortStatus::Offline);
        assert_eq!(PortStatus::from_code(""), PortStatus::Offline);
    }

    #[test]
    fn test_station_sorts_ports_by_key() {
        let station = Station::new(
            StationIdentifier::new("1"),
            "Test",
            "TOK",
            Point::new(69.24, 41.30),
            vec![port("1.3"), port("1.1"), port("1.2")],
        );

        let keys: Vec<&str> = station.ports().iter().map(|p| p.id.as_str()).collect();
        assert_eq!(keys, vec!["1.1", "1.2", "1.3"]);
    }

    #[test]
    fn test_port_index_matches_sorted_position() {
        let station = Station::new(
            StationIdentifier::new("1"),
            "Test",
            "TOK",
            Point::new(69.24, 41.30),
            vec![port("p2"), port("p0"), port("p1")],
        );

        assert_eq!(station.port_index(&PortIdentifier::new("p0")), Some(0));
        assert_eq!(station.port_index(&PortIdentifier::new("p1")), Some(1));
        assert_eq!(station.port_index(&PortIdentifier::new("p2")), Some(2));
        assert_eq!(station.port_index(&PortIdentifier::new("p9")), None);
    }

    #[test]
    fn test_connector_power() {
        assert_eq!(Connector::Type2.power_kw(), 22.0);
        assert_eq!(Connector::GbtDc.power_kw(), 120.0);
        assert!(Connector::GbtDc.is_dc());
        assert!(!Connector::Type2.is_dc());
    }

    #[test]
    fn test_port_rates_follow_connector() {
        let ac = Port::new(PortIdentifier::new("1.1"), "A", PortStatus::Free, Connector::Type2);
        let dc = Port::new(PortIdentifier::new("1.2"), "B", PortStatus::Free, Connector::GbtDc);

        assert_eq!(ac.price(), 1_500);
        assert_eq!(ac.power_kw(), 22.0);
        assert_eq!(dc.price(), 2_500);
        assert_eq!(dc.power_kw(), 120.0);
    }
}
