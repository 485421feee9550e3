//! Deterministic station factory for demos and tests.
//!
//! Replaces ad-hoc load-time random data with an explicit, seeded generator:
//! the same [`FactoryConfig`] always produces the same station list, which
//! makes downstream feature builds and status simulations reproducible.

use std::sync::Arc;

use geo::Point;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::geometry::projection::LocalProjection;
use crate::identifiers::{PortIdentifier, StationIdentifier};
use crate::models::types::{Connector, Port, PortStatus, Station};

pub const BRANDS: [&str; 4] = ["TOK", "UZCHARGE", "MEGO", "VOLT"];

const MAX_PORTS: usize = 8;

#[derive(Clone, Copy, Debug)]
pub struct FactoryConfig {
    pub count: usize,
    pub seed: u64,
    /// Geographic center the stations scatter around.
    pub center: Point,
    /// Half-width of the scatter square, in meters.
    pub spread_m: f64,
}

impl Default for FactoryConfig {
    fn default() -> Self {
        Self {
            count: 10,
            seed: 0,
            // Tashkent city center
            center: Point::new(69.240562, 41.311081),
            spread_m: 2_500.0,
        }
    }
}

/// Generate `config.count` stations scattered around the configured center.
pub fn generate_stations(config: &FactoryConfig) -> Vec<Arc<Station>> {
    let mut rng = SmallRng::seed_from_u64(config.seed);
    let proj = LocalProjection::at_latitude(config.center.y());

    (1..=config.count)
        .map(|i| {
            let east = (rng.random::<f64>() - 0.5) * 2.0 * config.spread_m;
            let north = (rng.random::<f64>() - 0.5) * 2.0 * config.spread_m;
            let position = Point::from(proj.translate(config.center, east, north));

            let id = StationIdentifier::new(i.to_string());
            let brand = BRANDS[rng.random_range(0..BRANDS.len())];

            let port_count = rng.random_range(1..=MAX_PORTS);
            let ports = (1..=port_count)
                .map(|p| {
                    let status = if rng.random_bool(0.6) {
                        PortStatus::Free
                    } else {
                        PortStatus::Busy
                    };
                    let connector = if rng.random_bool(0.5) {
                        Connector::Type2
                    } else {
                        Connector::GbtDc
                    };
                    Port::new(
                        PortIdentifier::new(format!("{id}.{p}")),
                        char::from(b'A' + (p - 1) as u8).to_string(),
                        status,
                        connector,
                    )
                })
                .collect();

            Arc::new(Station::new(
                id.clone(),
                format!("{brand} Station #{id}"),
                brand,
                position,
                ports,
            ))
        })
        .collect()
}
