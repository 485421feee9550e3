//! Metric-to-geographic projection.
//!
//! Converts real-world meter offsets into lng/lat deltas at a reference
//! latitude, using an equirectangular approximation. Accurate enough to draw
//! badge-sized shapes (tens of meters) anywhere in a bounded urban region;
//! the `cos(lat)` term degenerates toward the poles, which is an accepted
//! non-goal; callers keep inputs within a sane latitude band.

use geo::{Coord, Point};

/// Earth radius in meters (WGS84 equatorial).
pub const EARTH_RADIUS_M: f64 = 6_378_137.0;

/// Degrees-per-meter factors precomputed for one reference latitude.
#[derive(Clone, Copy, Debug)]
pub struct LocalProjection {
    deg_per_m_lng: f64,
    deg_per_m_lat: f64,
}

impl LocalProjection {
    /// Build the projection for a reference latitude in degrees.
    pub fn at_latitude(lat_deg: f64) -> Self {
        let lat_rad = lat_deg.to_radians();
        Self {
            deg_per_m_lng: (1.0 / (EARTH_RADIUS_M * lat_rad.cos())).to_degrees(),
            deg_per_m_lat: (1.0 / EARTH_RADIUS_M).to_degrees(),
        }
    }

    /// Longitude/latitude delta equivalent to a meter offset.
    pub fn delta(&self, east_m: f64, north_m: f64) -> (f64, f64) {
        (east_m * self.deg_per_m_lng, north_m * self.deg_per_m_lat)
    }

    /// Offset a geographic origin by local meters.
    pub fn translate(&self, origin: Point, east_m: f64, north_m: f64) -> Coord {
        let (d_lng, d_lat) = self.delta(east_m, north_m);
        Coord {
            x: origin.x() + d_lng,
            y: origin.y() + d_lat,
        }
    }
}
