//! Fixed status color palette.

use charge_map_markers::PortStatus;

pub const FREE_COLOR: &str = "#4CAF50";
pub const BUSY_COLOR: &str = "#FFC107";
pub const OFFLINE_COLOR: &str = "#9E9E9E";

/// Color the rendering surface's style expression falls back to for
/// features no patch has reached yet.
pub const FALLBACK_COLOR: &str = OFFLINE_COLOR;

/// Palette lookup for a port status.
///
/// Unrecognized wire statuses already collapse to `Offline` at parse time
/// (`PortStatus::from_code`), so every status an event can carry maps to one
/// of the three entries here.
pub fn status_color(status: PortStatus) -> &'static str {
    match status {
        PortStatus::Free => FREE_COLOR,
        PortStatus::Busy => BUSY_COLOR,
        PortStatus::Offline => OFFLINE_COLOR,
    }
}
