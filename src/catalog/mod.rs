// Station Catalog - normalizes the two site feeds into one station list
//
// Processing per feature, in load order, dataset by dataset:
// alias remap → code normalization → exclusion check → antimeridian wrap →
// status resolution → offline-outside-NZ drop → port assignment.
// The catalog is built once after all feeds resolve and is immutable for
// the rest of the session.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::reference;

/// Decommissioned and test mountpoints that must never render.
/// Compared case-insensitively against the normalized code.
pub const EXCLUDED_CODES: &[&str] = &["TREC", "2GRO", "2GR0", "1778", "7651", "XGRX"];

/// Legacy code rewritten to its successor on load
const LEGACY_ALIAS: (&str, &str) = ("GSMG", "GSM2");

/// Offline station outside the home box that is still shown (Scott Base)
const REMOTE_WHITELIST: &str = "SCTB";

/// Longitudes west of this are wrapped +360 so far-eastern sites
/// (Chatham Islands) plot east of the mainland, not across the antimeridian
const ANTIMERIDIAN_WRAP: f64 = -170.0;

/// Home bounding box; offline stations outside it are presumed stale
const HOME_LAT: (f64, f64) = (-48.0, -33.0);
const HOME_LON: (f64, f64) = (165.0, 180.0);

/// Which feed a station came from. Display and default-status only;
/// query logic never branches on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum StationSource {
    SmartFix,
    Linz,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum StationStatus {
    Online,
    Offline,
    Unknown,
}

impl StationStatus {
    fn parse(s: &str) -> Self {
        match s {
            "Online" => StationStatus::Online,
            "Offline" => StationStatus::Offline,
            _ => StationStatus::Unknown,
        }
    }

    /// Default when the status feed failed or has no entry for a code.
    /// Never Offline: a missing feed must not raise false offline alerts.
    fn default_for(source: StationSource) -> Self {
        match source {
            StationSource::SmartFix => StationStatus::Online,
            StationSource::Linz => StationStatus::Unknown,
        }
    }
}

impl std::fmt::Display for StationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StationStatus::Online => write!(f, "Online"),
            StationStatus::Offline => write!(f, "Offline"),
            StationStatus::Unknown => write!(f, "Unknown"),
        }
    }
}

/// Per-station entry from the status metadata feed
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StationMeta {
    pub status: Option<String>,
    pub network_port: Option<u16>,
}

/// One raw site feature as it arrives from a GeoJSON feed, before any
/// normalization. Missing properties default rather than fail; only the
/// coordinate pair is required.
#[derive(Debug, Clone)]
pub struct SiteRecord {
    pub code: Option<String>,
    pub name: Option<String>,
    /// Degrees, [lon, lat] order in the source geometry
    pub lon: f64,
    pub lat: f64,
}

/// A reference-station site after catalog normalization
#[derive(Debug, Clone, Serialize)]
pub struct Station {
    /// Trimmed, upper-cased, alias-remapped mountpoint code
    pub code: String,
    /// Feed display name (alias-patched), used as locality fallback
    pub name: String,
    pub lat: f64,
    /// Degrees, possibly > 180 after the antimeridian wrap
    pub lon: f64,
    pub source: StationSource,
    pub status: StationStatus,
    /// Resolved once at build time, fixed for the session
    pub assigned_port: u16,
    pub network_port: Option<u16>,
}

fn in_home_box(lat: f64, lon: f64) -> bool {
    lat >= HOME_LAT.0 && lat <= HOME_LAT.1 && lon >= HOME_LON.0 && lon <= HOME_LON.1
}

fn build_station(
    record: &SiteRecord,
    source: StationSource,
    meta: &HashMap<String, StationMeta>,
    authoritative_ports: &HashMap<String, u16>,
) -> Option<Station> {
    let mut raw_code = record.code.clone().unwrap_or_default();
    let mut name = record.name.clone().unwrap_or_default();

    if raw_code.eq_ignore_ascii_case(LEGACY_ALIAS.0) {
        raw_code = LEGACY_ALIAS.1.to_string();
        name = name.replace(LEGACY_ALIAS.0, LEGACY_ALIAS.1);
    }

    // Empty codes are retained; only exact exclusion matches drop
    let code = raw_code.trim().to_uppercase();
    if EXCLUDED_CODES.iter().any(|c| c.eq_ignore_ascii_case(&code)) {
        log::debug!("Excluding decommissioned station {}", code);
        return None;
    }

    let lat = record.lat;
    let mut lon = record.lon;
    if lon < ANTIMERIDIAN_WRAP {
        lon += 360.0;
    }

    let entry = meta.get(&code);
    let status = entry
        .and_then(|m| m.status.as_deref())
        .map(StationStatus::parse)
        .unwrap_or_else(|| StationStatus::default_for(source));

    // Offline stations far outside NZ are presumed stale feed entries
    if status == StationStatus::Offline && code != REMOTE_WHITELIST && !in_home_box(lat, lon) {
        log::debug!("Dropping offline station {} outside home region", code);
        return None;
    }

    let assigned_port = reference::resolve_port(&code, lat, authoritative_ports);

    Some(Station {
        code,
        name,
        lat,
        lon,
        source,
        status,
        assigned_port,
        network_port: entry.and_then(|m| m.network_port),
    })
}

/// Build the station catalog from the two site feeds.
///
/// Order is load order (SmartFix feed first, then LINZ), never sorted.
/// The input maps are not mutated; optional feeds simply arrive empty
/// when their fetch failed.
pub fn build_catalog(
    smartfix: &[SiteRecord],
    linz: &[SiteRecord],
    meta: &HashMap<String, StationMeta>,
    authoritative_ports: &HashMap<String, u16>,
) -> Vec<Station> {
    let mut catalog = Vec::with_capacity(smartfix.len() + linz.len());

    for record in smartfix {
        if let Some(station) = build_station(record, StationSource::SmartFix, meta, authoritative_ports) {
            catalog.push(station);
        }
    }
    for record in linz {
        if let Some(station) = build_station(record, StationSource::Linz, meta, authoritative_ports) {
            catalog.push(station);
        }
    }

    log::info!(
        "Catalog built: {} stations ({} SmartFix + {} LINZ input features)",
        catalog.len(),
        smartfix.len(),
        linz.len()
    );
    catalog
}
