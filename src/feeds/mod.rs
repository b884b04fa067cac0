// Feed parsing - the five startup inputs plus the circuits overlay
//
// Typed deserialization at the boundary: each feed's text is parsed into
// the crate's records here, so nothing downstream ever touches raw JSON.
// A malformed individual feature is skipped with a warning; a feed that
// does not parse at all is an error and the caller decides whether that
// feed was required.

pub mod loader;

pub use loader::{load_all, FeedClient, FeedSource};

use std::collections::HashMap;

use geojson::{FeatureCollection, GeoJson};

use crate::catalog::{SiteRecord, StationMeta};
use crate::error::FeedError;
use crate::regions::{Circuit, PortRegion};

pub const PORT_REGIONS_FEED: &str = "Port_Regions.geojson";
pub const SMARTFIX_SITES_FEED: &str = "Sites_20250725_Global.geojson";
pub const LINZ_SITES_FEED: &str = "Sites_20250725_LINZ.geojson";
pub const PORT_MAPPING_FEED: &str = "station_port_mapping.json";
pub const STATION_META_FEED: &str = "station_meta.json";
pub const CIRCUITS_FEED: &str = "Meridional_Circuits.geojson";

/// Everything the session needs, fully parsed. Optional feeds that failed
/// to load arrive as empty collections.
#[derive(Debug, Default)]
pub struct FeedSet {
    pub regions: Vec<PortRegion>,
    pub circuits: Vec<Circuit>,
    pub smartfix_sites: Vec<SiteRecord>,
    pub linz_sites: Vec<SiteRecord>,
    pub authoritative_ports: HashMap<String, u16>,
    pub station_meta: HashMap<String, StationMeta>,
}

fn feature_collection(feed: &'static str, text: &str) -> Result<FeatureCollection, FeedError> {
    let geojson = text.parse::<GeoJson>().map_err(|e| FeedError::Parse {
        feed,
        message: e.to_string(),
    })?;
    match geojson {
        GeoJson::FeatureCollection(fc) => Ok(fc),
        _ => Err(FeedError::Parse {
            feed,
            message: "expected a FeatureCollection".to_string(),
        }),
    }
}

/// Parse a station dataset: point features with `Site Code` / `Site Name`
/// properties. Features without a point geometry are skipped.
pub fn parse_sites(feed: &'static str, text: &str) -> Result<Vec<SiteRecord>, FeedError> {
    let fc = feature_collection(feed, text)?;
    let mut sites = Vec::with_capacity(fc.features.len());

    for feature in &fc.features {
        let coords = match feature.geometry.as_ref().map(|g| &g.value) {
            Some(geojson::Value::Point(coords)) if coords.len() >= 2 => coords,
            _ => {
                log::warn!("Skipping non-point feature in {}", feed);
                continue;
            }
        };
        sites.push(SiteRecord {
            code: feature
                .property("Site Code")
                .and_then(|v| v.as_str())
                .map(str::to_string),
            name: feature
                .property("Site Name")
                .and_then(|v| v.as_str())
                .map(str::to_string),
            lon: coords[0],
            lat: coords[1],
        });
    }
    Ok(sites)
}

/// Parse the port regions feed into validated polygon records
pub fn parse_regions(text: &str) -> Result<Vec<PortRegion>, FeedError> {
    let fc = feature_collection(PORT_REGIONS_FEED, text)?;
    let mut regions = Vec::with_capacity(fc.features.len());
    for feature in &fc.features {
        match PortRegion::from_feature(feature) {
            Some(region) => regions.push(region),
            None => log::warn!("Skipping malformed region feature in {}", PORT_REGIONS_FEED),
        }
    }
    Ok(regions)
}

/// Parse the meridional circuits overlay
pub fn parse_circuits(text: &str) -> Result<Vec<Circuit>, FeedError> {
    let fc = feature_collection(CIRCUITS_FEED, text)?;
    let mut circuits = Vec::with_capacity(fc.features.len());
    for feature in &fc.features {
        match Circuit::from_feature(feature) {
            Some(circuit) => circuits.push(circuit),
            // The LINZ export mixes line features in; only polygons matter
            None => log::debug!("Skipping non-polygon feature in {}", CIRCUITS_FEED),
        }
    }
    Ok(circuits)
}

/// Parse the authoritative station→port mapping
pub fn parse_port_mapping(text: &str) -> Result<HashMap<String, u16>, FeedError> {
    serde_json::from_str(text).map_err(|e| FeedError::Parse {
        feed: PORT_MAPPING_FEED,
        message: e.to_string(),
    })
}

/// Parse the station status metadata
pub fn parse_station_meta(text: &str) -> Result<HashMap<String, StationMeta>, FeedError> {
    serde_json::from_str(text).map_err(|e| FeedError::Parse {
        feed: STATION_META_FEED,
        message: e.to_string(),
    })
}
