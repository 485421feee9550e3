//! GeoJSON feature assembly for station badges.
//!
//! One station becomes one `FeatureCollection`: a `center` polygon (the
//! inner rounded rectangle carrying the brand) plus one `segment` line
//! string per displayed port, cut out of the outer perimeter. Identifiers
//! are pure functions of the input, so rebuilding an unchanged station
//! yields bit-for-bit identical ids. That contract is what lets live status
//! patches target pre-built features without regenerating geometry.

use std::collections::HashMap;
use std::sync::Arc;

use geojson::{feature::Id, Feature, FeatureCollection, Geometry, JsonObject, Value};
use serde_json::json;

use crate::directory::StationDirectory;
use crate::geometry::partition::{segment_ranges, DEFAULT_GAP};
use crate::geometry::perimeter::RoundedRect;
use crate::geometry::projection::LocalProjection;
use crate::identifiers::{FeatureIdentifier, StationIdentifier};
use crate::models::types::{PortStatus, Station};

/// Badge shape tuning, all sizes in real-world meters.
#[derive(Clone, Copy, Debug)]
pub struct BadgeConfig {
    /// Footprint of the outer ring the port segments are cut from.
    pub outer_size_m: f64,
    pub outer_radius_m: f64,
    /// Footprint of the inner center polygon.
    pub center_size_m: f64,
    pub center_radius_m: f64,
    /// Perimeter fraction reserved between adjacent segments.
    pub gap: f64,
    /// Visual-complexity ceiling on displayed ports per station.
    pub port_cap: usize,
    /// Samples per segment arc (a segment has `arc_steps + 1` points).
    pub arc_steps: usize,
    /// Samples for the center polygon ring.
    pub ring_steps: usize,
}

impl Default for BadgeConfig {
    fn default() -> Self {
        Self {
            outer_size_m: 90.0,
            outer_radius_m: 22.0,
            center_size_m: 55.0,
            center_radius_m: 14.0,
            gap: DEFAULT_GAP,
            port_cap: 8,
            arc_steps: 14,
            ring_steps: 50,
        }
    }
}

impl BadgeConfig {
    /// Ports actually displayed for a station with `port_count` ports.
    ///
    /// A station with no port data still renders as one segment (shown
    /// offline) rather than a bare center, so empty data degrades visually
    /// instead of failing.
    pub fn displayed_ports(&self, port_count: usize) -> usize {
        if port_count == 0 {
            1
        } else {
            port_count.min(self.port_cap)
        }
    }
}

fn geographic(rect_points: &[(f64, f64)], proj: &LocalProjection, station: &Station) -> Vec<Vec<f64>> {
    rect_points
        .iter()
        .map(|&(east, north)| {
            let c = proj.translate(station.position(), east, north);
            vec![c.x, c.y]
        })
        .collect()
}

fn center_feature(station: &Station, config: &BadgeConfig, proj: &LocalProjection) -> Feature {
    let rect = RoundedRect::new(config.center_size_m, config.center_radius_m);
    let ring = geographic(&rect.sample_ring(config.ring_steps), proj, station);

    let mut props = JsonObject::new();
    props.insert("kind".into(), json!("center"));
    props.insert("stationId".into(), json!(station.id().as_str()));
    props.insert("brand".into(), json!(station.brand()));

    Feature {
        bbox: None,
        geometry: Some(Geometry::new(Value::Polygon(vec![ring]))),
        id: Some(Id::String(
            FeatureIdentifier::center(station.id()).as_str().to_owned(),
        )),
        properties: Some(props),
        foreign_members: None,
    }
}

fn segment_feature(
    station: &Station,
    config: &BadgeConfig,
    proj: &LocalProjection,
    rect: &RoundedRect,
    index: usize,
    range: (f64, f64),
) -> Feature {
    // A port beyond the available records (the empty-station fallback)
    // renders offline.
    let status = station
        .ports()
        .get(index)
        .map(|p| p.status)
        .unwrap_or(PortStatus::Offline);

    let line = geographic(
        &rect.sample_arc(range.0, range.1, config.arc_steps),
        proj,
        station,
    );

    let mut props = JsonObject::new();
    props.insert("kind".into(), json!("segment"));
    props.insert("stationId".into(), json!(station.id().as_str()));
    props.insert("portIndex".into(), json!(index));
    props.insert("status".into(), json!(status.as_code()));

    Feature {
        bbox: None,
        geometry: Some(Geometry::new(Value::LineString(line))),
        id: Some(Id::String(
            FeatureIdentifier::segment(station.id(), index)
                .as_str()
                .to_owned(),
        )),
        properties: Some(props),
        foreign_members: None,
    }
}

/// Build the feature collection for one station: one center polygon and
/// `min(P, cap)` perimeter segments in sorted-port order.
pub fn station_features(station: &Station, config: &BadgeConfig) -> FeatureCollection {
    let proj = LocalProjection::at_latitude(station.position().y());
    let outer = RoundedRect::new(config.outer_size_m, config.outer_radius_m);

    let displayed = config.displayed_ports(station.ports().len());
    let mut features = Vec::with_capacity(displayed + 1);

    features.push(center_feature(station, config, &proj));
    for (i, range) in segment_ranges(displayed, config.gap).into_iter().enumerate() {
        features.push(segment_feature(station, config, &proj, &outer, i, range));
    }

    FeatureCollection {
        bbox: None,
        features,
        foreign_members: None,
    }
}

/// Memoized feature builds, keyed by the identity of the directory's
/// immutable station list.
///
/// The collection for a station set is built exactly once; repeat lookups
/// against the same list (any clone of the same directory) return the cached
/// build. Only swapping in a new list rebuilds, so unrelated state changes
/// elsewhere can never retrigger geometry work.
pub struct FeatureCache {
    config: BadgeConfig,
    slot: Option<CacheSlot>,
}

struct CacheSlot {
    list: Arc<[Arc<Station>]>,
    collections: Arc<HashMap<StationIdentifier, Arc<FeatureCollection>>>,
}

impl FeatureCache {
    pub fn new(config: BadgeConfig) -> Self {
        Self { config, slot: None }
    }

    pub fn config(&self) -> &BadgeConfig {
        &self.config
    }

    /// Feature collections for every station in the directory.
    pub fn collections(
        &mut self,
        directory: &StationDirectory,
    ) -> Arc<HashMap<StationIdentifier, Arc<FeatureCollection>>> {
        if let Some(slot) = &self.slot {
            if Arc::ptr_eq(&slot.list, directory.station_list()) {
                return Arc::clone(&slot.collections);
            }
        }

        let collections: HashMap<_, _> = directory
            .stations()
            .iter()
            .map(|st| {
                (
                    st.id().clone(),
                    Arc::new(station_features(st, &self.config)),
                )
            })
            .collect();
        let collections = Arc::new(collections);

        self.slot = Some(CacheSlot {
            list: Arc::clone(directory.station_list()),
            collections: Arc::clone(&collections),
        });
        collections
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identifiers::PortIdentifier;
    use crate::models::types::{Connector, Port};
    use geo::Point;

    fn fixture_station() -> Station {
        Station::new(
            StationIdentifier::new("1"),
            "TOK Station #1",
            "TOK",
            Point::new(69.2401, 41.2995),
            vec![
                Port::new(PortIdentifier::new("p0"), "A", PortStatus::Free, Connector::Type2),
                Port::new(PortIdentifier::new("p1"), "B", PortStatus::Busy, Connector::GbtDc),
                Port::new(PortIdentifier::new("p2"), "C", PortStatus::Free, Connector::Type2),
            ],
        )
    }

    fn feature_ids(fc: &FeatureCollection) -> Vec<String> {
        fc.features
            .iter()
            .map(|f| match f.id.as_ref().unwrap() {
                Id::String(s) => s.clone(),
                Id::Number(n) => n.to_string(),
            })
            .collect()
    }

    #[test]
    fn test_end_to_end_fixture() {
        let fc = station_features(&fixture_station(), &BadgeConfig::default());

        assert_eq!(
            feature_ids(&fc),
            vec!["center:1", "seg:1:0", "seg:1:1", "seg:1:2"]
        );

        for feature in &fc.features[1..] {
            match &feature.geometry.as_ref().unwrap().value {
                Value::LineString(coords) => {
                    // 14 steps -> 15 ordered coordinate pairs
                    assert_eq!(coords.len(), 15);
                }
                other => panic!("segment is not a LineString: {other:?}"),
            }
        }
    }

    #[test]
    fn test_identifiers_stable_across_rebuilds() {
        let station = fixture_station();
        let config = BadgeConfig::default();

        let first = feature_ids(&station_features(&station, &config));
        let second = feature_ids(&station_features(&station, &config));
        assert_eq!(first, second);
    }

    #[test]
    fn test_no_duplicate_identifiers() {
        let fc = station_features(&fixture_station(), &BadgeConfig::default());
        let mut ids = feature_ids(&fc);
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), fc.features.len());
    }

    #[test]
    fn test_center_ring_is_closed() {
        let fc = station_features(&fixture_station(), &BadgeConfig::default());

        match &fc.features[0].geometry.as_ref().unwrap().value {
            Value::Polygon(rings) => {
                let ring = &rings[0];
                assert_eq!(ring.first(), ring.last());
            }
            other => panic!("center is not a Polygon: {other:?}"),
        }
    }

    #[test]
    fn test_empty_ports_degrade_to_one_offline_segment() {
        let station = Station::new(
            StationIdentifier::new("7"),
            "Empty",
            "VOLT",
            Point::new(69.24, 41.30),
            vec![],
        );
        let fc = station_features(&station, &BadgeConfig::default());

        assert_eq!(feature_ids(&fc), vec!["center:7", "seg:7:0"]);
        let props = fc.features[1].properties.as_ref().unwrap();
        assert_eq!(props["status"], json!("OFFLINE"));
    }

    #[test]
    fn test_port_cap_limits_segments() {
        let ports = (0..12)
            .map(|i| {
                Port::new(
                    PortIdentifier::new(format!("1.{i:02}")),
                    "A",
                    PortStatus::Free,
                    Connector::Type2,
                )
            })
            .collect();
        let station = Station::new(
            StationIdentifier::new("1"),
            "Big",
            "MEGO",
            Point::new(69.24, 41.30),
            ports,
        );

        let capped = station_features(&station, &BadgeConfig::default());
        assert_eq!(capped.features.len(), 9); // center + 8

        let uncapped = station_features(
            &station,
            &BadgeConfig {
                port_cap: usize::MAX,
                ..BadgeConfig::default()
            },
        );
        assert_eq!(uncapped.features.len(), 13);
    }

    #[test]
    fn test_segment_status_follows_sorted_port_order() {
        let fc = station_features(&fixture_station(), &BadgeConfig::default());
        let statuses: Vec<_> = fc.features[1..]
            .iter()
            .map(|f| f.properties.as_ref().unwrap()["status"].clone())
            .collect();
        assert_eq!(statuses, vec![json!("FREE"), json!("BUSY"), json!("FREE")]);
    }

    #[test]
    fn test_cache_builds_once_per_list_identity() {
        let directory = StationDirectory::new(vec![Arc::new(fixture_station())]);
        let mut cache = FeatureCache::new(BadgeConfig::default());

        let first = cache.collections(&directory);
        let again = cache.collections(&directory.clone());
        assert!(Arc::ptr_eq(&first, &again));

        // A new list, even with equal content, is a new identity.
        let rebuilt_dir = StationDirectory::new(vec![Arc::new(fixture_station())]);
        let rebuilt = cache.collections(&rebuilt_dir);
        assert!(!Arc::ptr_eq(&first, &rebuilt));
        assert_eq!(rebuilt.len(), 1);
    }
}
