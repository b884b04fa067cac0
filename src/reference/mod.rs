// Reference data module - port region policy and station localities
// Source: Global Survey caster configuration; NOT derived from the feeds
//
// Lookup strategy:
// - resolve_port: per-code override → authoritative feed → latitude band
// - location_name: static locality table → feed display name → "Unknown"

pub mod locations;
pub mod ports;

use std::collections::HashMap;
use std::sync::OnceLock;

use locations::STATION_LOCATIONS;
use ports::{DEFAULT_PORT, LAT_BANDS, NETWORK_PORTS, PORT_COLORS, PORT_NAMES, PORT_OVERRIDES};

/// Lazily-initialized HashMap for O(1) locality lookup by station code
static LOCATION_MAP: OnceLock<HashMap<&'static str, &'static str>> = OnceLock::new();

fn get_location_map() -> &'static HashMap<&'static str, &'static str> {
    LOCATION_MAP.get_or_init(|| STATION_LOCATIONS.iter().copied().collect())
}

/// Resolve the authoritative single port for a station.
///
/// Deterministic and total: every (code, latitude) pair maps to exactly one
/// of the seven single ports. First matching rule wins:
/// 1. Fixed per-code overrides (authoritative feed is known wrong for these)
/// 2. The authoritative station→port mapping, when the feed loaded
/// 3. Latitude bands, south to north, defaulting to Auckland/Northland
pub fn resolve_port(code: &str, lat: f64, authoritative: &HashMap<String, u16>) -> u16 {
    for over in PORT_OVERRIDES {
        if over.code == code {
            return over.port;
        }
    }

    if let Some(&port) = authoritative.get(code) {
        return port;
    }

    for &(threshold, port) in LAT_BANDS {
        if lat < threshold {
            return port;
        }
    }
    DEFAULT_PORT
}

/// Human-readable locality for a station, falling back to the feed's
/// display name, then "Unknown".
pub fn location_name(code: &str, feed_name: Option<&str>) -> String {
    if let Some(place) = get_location_map().get(code) {
        return place.to_string();
    }
    match feed_name {
        Some(name) if !name.is_empty() => name.to_string(),
        _ => "Unknown".to_string(),
    }
}

/// Display name for a single-port region
pub fn port_name(port: u16) -> Option<&'static str> {
    PORT_NAMES
        .iter()
        .find(|(p, _)| *p == port)
        .map(|(_, name)| *name)
}

/// Legend fill color for a single-port region
pub fn port_color(port: u16) -> Option<&'static str> {
    PORT_COLORS
        .iter()
        .find(|(p, _)| *p == port)
        .map(|(_, color)| *color)
}

/// Network (fixed solution) port paired with a single port, if any
pub fn network_port_for(port: u16) -> Option<u16> {
    NETWORK_PORTS
        .iter()
        .find(|(single, _)| *single == port)
        .map(|(_, net)| *net)
}

/// Estimated baseline error in millimetres for a given baseline length.
///
/// Linear model: horizontal 8 mm + 1 ppm, vertical 15 mm + 1 ppm
/// (1 ppm = 1 mm per km). Returns (horizontal, vertical).
pub fn baseline_error_mm(distance_km: f64) -> (f64, f64) {
    let h = 8.0 + distance_km;
    let v = 15.0 + distance_km;
    (h, v)
}
