// Port region policy tables for the SmartFix network
// Source: Global Survey NTRIP caster configuration and regional boundaries
//
// These values are policy, not geometry: the latitude bands are a coarse
// fallback used only when a station is absent from the authoritative
// station→port mapping feed.

/// A station code forced to a specific single port.
///
/// The authoritative mapping feed is known wrong for these sites, so the
/// override wins over everything else.
#[derive(Debug, Clone)]
pub struct PortOverride {
    pub code: &'static str,
    pub port: u16,
}

pub const PORT_OVERRIDES: &[PortOverride] = &[
    PortOverride { code: "METH", port: 4803 },
    PortOverride { code: "GSCT", port: 4803 },
];

/// Latitude band fallback, southernmost band first.
///
/// A latitude strictly below the threshold belongs to the band. The table
/// partitions the country into the seven single-port regions; anything not
/// matched falls through to [`DEFAULT_PORT`] (Auckland/Northland).
pub const LAT_BANDS: &[(f64, u16)] = &[
    (-45.0, 4801), // Otago / Southland
    (-42.5, 4803), // Canterbury
    (-41.0, 4802), // Nelson / Marlborough
    (-40.0, 4804), // Wellington
    (-39.0, 4806), // Taranaki
    (-37.5, 4807), // Bay of Plenty
];

/// Northernmost region, returned when no band matches
pub const DEFAULT_PORT: u16 = 4809;

/// Well-known port that auto-routes to the geographically closest station
pub const NEAREST_PORT: u16 = 4815;

/// Single port → network (fixed solution) port
///
/// Only the South Island regions plus Wellington carry a network port;
/// the two integers are independent endpoints, not related by arithmetic.
pub const NETWORK_PORTS: &[(u16, u16)] = &[
    (4801, 4811),
    (4802, 4812),
    (4803, 4813),
    (4804, 4814),
];

/// Display names for the seven single-port regions
pub const PORT_NAMES: &[(u16, &str)] = &[
    (4801, "Otago / Southland"),
    (4802, "Nelson / Marlborough / Westland"),
    (4803, "Canterbury"),
    (4804, "Wellington / Wairarapa / Manawatu"),
    (4806, "Taranaki / Hawkes Bay"),
    (4807, "Bay of Plenty / Waikato"),
    (4809, "Auckland / Northland"),
];

/// Legend fill colors keyed by single port
pub const PORT_COLORS: &[(u16, &str)] = &[
    (4809, "#9b59b6"), // Auckland/Northland - Purple
    (4807, "#e67e22"), // Waikato/BoP - Orange
    (4806, "#2ecc71"), // Central North Island - Green
    (4804, "#e74c3c"), // Wellington - Red
    (4802, "#3498db"), // Nelson/Marlborough - Blue
    (4803, "#e91e63"), // Canterbury - Pink
    (4801, "#f1c40f"), // Otago/Southland - Yellow
];
