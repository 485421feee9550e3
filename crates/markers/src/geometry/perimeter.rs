//! Arc-length parametrization of a rounded rectangle's boundary.
//!
//! The badge outline is treated as one closed curve of total length
//! `4 * straight + 4 * corner`, walked clockwise starting at top-center.
//! Positions along it are addressed by distance in meters (or by perimeter
//! fraction in [0, 1)), which is what makes gapped per-port arcs cheap to
//! cut out of the same outline.
//!
//! All points here are local meter offsets `(east, north)` from the
//! rectangle's center; projecting them onto geographic coordinates is the
//! caller's job (see [`crate::geometry::projection`]).

use std::f64::consts::PI;

/// A rounded rectangle (square footprint) addressed by arc length.
#[derive(Clone, Copy, Debug)]
pub struct RoundedRect {
    half: f64,
    radius: f64,
    straight: f64,
    corner: f64,
    perimeter: f64,
}

impl RoundedRect {
    /// Build from full width and requested corner radius, both in meters.
    ///
    /// The radius is clamped to half the width; a larger request would make
    /// the corner arcs self-intersect, so it silently degrades to a stadium
    /// shape instead of failing.
    pub fn new(width_m: f64, corner_radius_m: f64) -> Self {
        let half = width_m / 2.0;
        let radius = corner_radius_m.min(half);
        let straight = width_m - 2.0 * radius;
        let corner = PI * radius / 2.0;

        Self {
            half,
            radius,
            straight,
            corner,
            perimeter: 4.0 * straight + 4.0 * corner,
        }
    }

    /// Total boundary length in meters.
    pub fn perimeter(&self) -> f64 {
        self.perimeter
    }

    /// Local `(east, north)` meter offset at distance `d` along the
    /// boundary, measured clockwise from top-center.
    ///
    /// `d` is reduced into `[0, perimeter)` first, so any real input is
    /// valid and `point_at(d) == point_at(d + perimeter)`.
    pub fn point_at(&self, d: f64) -> (f64, f64) {
        let mut d = d % self.perimeter;
        if d < 0.0 {
            d += self.perimeter;
        }

        let half = self.half;
        let r = self.radius;
        let inner = half - r;

        // 1) Top edge, right half (start at top-center)
        let mut walked = self.straight / 2.0;
        if d <= walked {
            return (d, half);
        }

        // 2) Top-right corner (90deg -> 0deg)
        if d <= walked + self.corner {
            let angle = PI / 2.0 - (d - walked) / r;
            return (inner + r * angle.cos(), inner + r * angle.sin());
        }
        walked += self.corner;

        // 3) Right edge
        if d <= walked + self.straight {
            return (half, inner - (d - walked));
        }
        walked += self.straight;

        // 4) Bottom-right corner (0deg -> -90deg)
        if d <= walked + self.corner {
            let angle = -(d - walked) / r;
            return (inner + r * angle.cos(), -inner + r * angle.sin());
        }
        walked += self.corner;

        // 5) Bottom edge
        if d <= walked + self.straight {
            return (inner - (d - walked), -half);
        }
        walked += self.straight;

        // 6) Bottom-left corner (270deg -> 180deg)
        if d <= walked + self.corner {
            let angle = 3.0 * PI / 2.0 - (d - walked) / r;
            return (-inner + r * angle.cos(), -inner + r * angle.sin());
        }
        walked += self.corner;

        // 7) Left edge
        if d <= walked + self.straight {
            return (-half, -inner + (d - walked));
        }
        walked += self.straight;

        // 8) Top-left corner (180deg -> 90deg)
        if d <= walked + self.corner {
            let angle = PI - (d - walked) / r;
            return (-inner + r * angle.cos(), inner + r * angle.sin());
        }
        walked += self.corner;

        // 9) Top edge, left half, back to top-center
        (-inner + (d - walked), half)
    }

    /// Sample `steps + 1` evenly spaced points across an arc given by two
    /// perimeter fractions, inclusive of both endpoints.
    ///
    /// `end_fract < start_fract` is treated as wraparound past the seam: the
    /// span is extended by one full perimeter rather than rejected. The
    /// sample count and even spacing are part of the contract; consumers
    /// size rendering resolution off them.
    pub fn sample_arc(&self, start_fract: f64, end_fract: f64, steps: usize) -> Vec<(f64, f64)> {
        let steps = steps.max(1);

        let start = start_fract * self.perimeter;
        let mut span = end_fract * self.perimeter - start;
        if span < 0.0 {
            span += self.perimeter;
        }

        (0..=steps)
            .map(|i| self.point_at(start + span * (i as f64 / steps as f64)))
            .collect()
    }

    /// Full-loop sample with enforced ring closure: the first point is
    /// appended again if the last one is not bit-for-bit equal to it, so the
    /// result always satisfies the closed-ring invariant polygon consumers
    /// require.
    pub fn sample_ring(&self, steps: usize) -> Vec<(f64, f64)> {
        let mut ring = self.sample_arc(0.0, 1.0, steps);

        let first = ring[0];
        let last = ring[ring.len() - 1];
        if last.0 != first.0 || last.1 != first.1 {
            ring.push(first);
        }
        ring
    }
}
