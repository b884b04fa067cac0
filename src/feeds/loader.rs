// Feed fetching - base URL over HTTP or a local data directory
//
// Required feeds (port regions, both station datasets) propagate their
// errors; optional feeds (authoritative ports, status metadata, circuits)
// degrade to empty defaults with a warning so a partial outage never
// blocks the catalog build.

use std::path::PathBuf;
use std::time::Duration;

use reqwest::Client;

use super::{
    parse_circuits, parse_port_mapping, parse_regions, parse_sites, parse_station_meta, FeedSet,
    CIRCUITS_FEED, LINZ_SITES_FEED, PORT_MAPPING_FEED, PORT_REGIONS_FEED, SMARTFIX_SITES_FEED,
    STATION_META_FEED,
};
use crate::error::FeedError;

const FETCH_TIMEOUT: Duration = Duration::from_secs(30);

/// Where the feed files live
#[derive(Debug, Clone)]
pub enum FeedSource {
    /// HTTP base URL; each fetch appends the feed name and a cache-buster
    BaseUrl(String),
    /// Local directory of feed files
    Dir(PathBuf),
}

pub struct FeedClient {
    source: FeedSource,
    http: Client,
}

impl FeedClient {
    pub fn new(source: FeedSource) -> Result<Self, FeedError> {
        let http = Client::builder()
            .timeout(FETCH_TIMEOUT)
            .build()
            .map_err(|e| FeedError::Network {
                feed: "http client",
                source: e,
            })?;
        Ok(FeedClient { source, http })
    }

    /// Fetch one feed as text
    pub async fn fetch(&self, feed: &'static str) -> Result<String, FeedError> {
        match &self.source {
            FeedSource::BaseUrl(base) => {
                // Cache-buster defeats stale CDN copies of the feed files
                let url = format!(
                    "{}/{}?v={}",
                    base.trim_end_matches('/'),
                    feed,
                    chrono::Utc::now().timestamp_millis()
                );
                log::debug!("Fetching {}", url);
                let response = self
                    .http
                    .get(&url)
                    .send()
                    .await
                    .and_then(|r| r.error_for_status())
                    .map_err(|e| FeedError::Network { feed, source: e })?;
                response
                    .text()
                    .await
                    .map_err(|e| FeedError::Network { feed, source: e })
            }
            FeedSource::Dir(dir) => {
                let path = dir.join(feed);
                log::debug!("Reading {}", path.display());
                tokio::fs::read_to_string(&path)
                    .await
                    .map_err(|e| FeedError::Io { feed, source: e })
            }
        }
    }
}

/// Load and parse all six feeds.
///
/// Returns only once everything has resolved, so the catalog is never
/// built from a half-loaded state. Optional feed failures are logged
/// and replaced with empty defaults here rather than surfaced.
pub async fn load_all(client: &FeedClient) -> Result<FeedSet, FeedError> {
    let regions = parse_regions(&client.fetch(PORT_REGIONS_FEED).await?)?;
    let smartfix_sites = parse_sites(
        SMARTFIX_SITES_FEED,
        &client.fetch(SMARTFIX_SITES_FEED).await?,
    )?;
    let linz_sites = parse_sites(LINZ_SITES_FEED, &client.fetch(LINZ_SITES_FEED).await?)?;

    let authoritative_ports = match client.fetch(PORT_MAPPING_FEED).await {
        Ok(text) => parse_port_mapping(&text).unwrap_or_else(|e| {
            log::warn!("Port mapping unusable, falling back to latitude bands: {}", e);
            Default::default()
        }),
        Err(e) => {
            log::warn!("Port mapping unavailable, falling back to latitude bands: {}", e);
            Default::default()
        }
    };

    let station_meta = match client.fetch(STATION_META_FEED).await {
        Ok(text) => parse_station_meta(&text).unwrap_or_else(|e| {
            log::warn!("Station metadata unusable, using per-dataset defaults: {}", e);
            Default::default()
        }),
        Err(e) => {
            log::warn!("Station metadata unavailable, using per-dataset defaults: {}", e);
            Default::default()
        }
    };

    let circuits = match client.fetch(CIRCUITS_FEED).await {
        Ok(text) => parse_circuits(&text).unwrap_or_else(|e| {
            log::warn!("Circuits overlay unusable: {}", e);
            Vec::new()
        }),
        Err(e) => {
            log::warn!("Circuits overlay unavailable: {}", e);
            Vec::new()
        }
    };

    log::info!(
        "Feeds loaded: {} regions, {} + {} sites, {} port mappings, {} meta entries, {} circuits",
        regions.len(),
        smartfix_sites.len(),
        linz_sites.len(),
        authoritative_ports.len(),
        station_meta.len(),
        circuits.len()
    );

    Ok(FeedSet {
        regions,
        circuits,
        smartfix_sites,
        linz_sites,
        authoritative_ports,
        station_meta,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_feed(dir: &std::path::Path, name: &str, content: &str) {
        std::fs::write(dir.join(name), content).unwrap();
    }

    const EMPTY_FC: &str = r#"{"type": "FeatureCollection", "features": []}"#;

    fn site_fc(code: &str, lat: f64, lon: f64) -> String {
        format!(
            r#"{{"type": "FeatureCollection", "features": [{{
                "type": "Feature",
                "properties": {{"Site Code": "{}", "Site Name": "{} Trimble Alloy"}},
                "geometry": {{"type": "Point", "coordinates": [{}, {}]}}
            }}]}}"#,
            code, code, lon, lat
        )
    }

    #[tokio::test]
    async fn test_load_all_from_dir() {
        let dir = std::env::temp_dir().join(format!("corsmap-feeds-{}", uuid::Uuid::new_v4()));
        std::fs::create_dir_all(&dir).unwrap();

        write_feed(&dir, PORT_REGIONS_FEED, EMPTY_FC);
        write_feed(&dir, SMARTFIX_SITES_FEED, &site_fc("DUND", -45.87, 170.5));
        write_feed(&dir, LINZ_SITES_FEED, &site_fc("WGTN", -41.3, 174.8));
        write_feed(&dir, PORT_MAPPING_FEED, r#"{"DUND": 4801}"#);
        write_feed(&dir, STATION_META_FEED, r#"{"DUND": {"status": "Online"}}"#);
        write_feed(&dir, CIRCUITS_FEED, EMPTY_FC);

        let client = FeedClient::new(FeedSource::Dir(dir.clone())).unwrap();
        let feeds = load_all(&client).await.unwrap();
        assert_eq!(feeds.smartfix_sites.len(), 1);
        assert_eq!(feeds.linz_sites.len(), 1);
        assert_eq!(feeds.authoritative_ports.get("DUND"), Some(&4801));
        assert_eq!(feeds.station_meta["DUND"].status.as_deref(), Some("Online"));

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[tokio::test]
    async fn test_optional_feeds_degrade_to_empty() {
        let dir = std::env::temp_dir().join(format!("corsmap-feeds-{}", uuid::Uuid::new_v4()));
        std::fs::create_dir_all(&dir).unwrap();

        // Only the three required feeds exist
        write_feed(&dir, PORT_REGIONS_FEED, EMPTY_FC);
        write_feed(&dir, SMARTFIX_SITES_FEED, &site_fc("DUND", -45.87, 170.5));
        write_feed(&dir, LINZ_SITES_FEED, EMPTY_FC);

        let client = FeedClient::new(FeedSource::Dir(dir.clone())).unwrap();
        let feeds = load_all(&client).await.unwrap();
        assert!(feeds.authoritative_ports.is_empty());
        assert!(feeds.station_meta.is_empty());
        assert!(feeds.circuits.is_empty());

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[tokio::test]
    async fn test_required_feed_failure_is_an_error() {
        let dir = std::env::temp_dir().join(format!("corsmap-feeds-{}", uuid::Uuid::new_v4()));
        std::fs::create_dir_all(&dir).unwrap();

        // Port regions feed missing entirely
        write_feed(&dir, SMARTFIX_SITES_FEED, EMPTY_FC);
        write_feed(&dir, LINZ_SITES_FEED, EMPTY_FC);

        let client = FeedClient::new(FeedSource::Dir(dir.clone())).unwrap();
        let err = load_all(&client).await.unwrap_err();
        assert_eq!(err.feed(), PORT_REGIONS_FEED);
        assert!(matches!(err, FeedError::Io { .. }));

        std::fs::remove_dir_all(&dir).unwrap();
    }
}
