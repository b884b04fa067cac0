// Map session - the single owner of all loaded state
//
// Built once after the feeds resolve; every query and tool event goes
// through here. The presentation layer holds one of these and renders
// whatever the catalog, query results and artifact set say.

use std::time::Instant;

use serde::Serialize;

use crate::catalog::{self, Station};
use crate::feeds::FeedSet;
use crate::legend::{self, Legend};
use crate::reference::ports::NEAREST_PORT;
use crate::regions::{Circuit, PortRegion};
use crate::spatial::{self, LatLon, NearestStation};
use crate::tools::{ClickOutcome, ToolController, ToolMode};

/// Region membership details for a clicked or located point
#[derive(Debug, Clone, Serialize)]
pub struct RegionInfo {
    pub name: String,
    pub port: u16,
    pub network_port: Option<u16>,
}

/// Everything the info panel shows for a point: region and circuit
/// membership plus the nearest station
#[derive(Debug, Clone, Serialize)]
pub struct PointInfo {
    pub region: Option<RegionInfo>,
    pub circuit: Option<String>,
    pub nearest: Option<NearestStation>,
}

impl PointInfo {
    /// Plain-text rendition of the info panel, one line per row
    pub fn summary_text(&self) -> String {
        let mut lines = Vec::new();
        if let Some(region) = &self.region {
            lines.push(format!("Region: {}", region.name));
            lines.push(format!("Single Port: {}", region.port));
            if let Some(net) = region.network_port {
                lines.push(format!("Network Port: {}", net));
            }
            lines.push(format!("Auto-Connect: Port {} (Nearest)", NEAREST_PORT));
        }
        if let Some(nearest) = &self.nearest {
            lines.push(format!("Nearest Station: {}", nearest.code));
            lines.push(format!("Location: {}", nearest.location));
            lines.push(format!("Port: {} (Single)", nearest.port));
            if let Some(net) = nearest.network_port {
                lines.push(format!("Network Port: {}", net));
            }
            if let Some(circuit) = &self.circuit {
                lines.push(format!("Circuit: {}", circuit));
            }
            lines.push(format!("Distance: {} km", nearest.distance_km_text()));
        }
        lines.join("\n")
    }
}

/// What a click produced, for the presentation layer to act on
#[derive(Debug)]
pub enum ClickResponse {
    /// Default lookup ran; an info pin artifact was placed
    Info(PointInfo),
    MeasureStarted,
    MeasureCompleted { distance_m: f64 },
    RingsAdded,
    LocateCancelled,
}

pub struct MapSession {
    catalog: Vec<Station>,
    regions: Vec<PortRegion>,
    circuits: Vec<Circuit>,
    tools: ToolController,
}

impl MapSession {
    /// Build the session from fully-loaded feeds
    pub fn new(feeds: FeedSet) -> Self {
        let catalog = catalog::build_catalog(
            &feeds.smartfix_sites,
            &feeds.linz_sites,
            &feeds.station_meta,
            &feeds.authoritative_ports,
        );
        MapSession {
            catalog,
            regions: feeds.regions,
            circuits: feeds.circuits,
            tools: ToolController::new(),
        }
    }

    pub fn catalog(&self) -> &[Station] {
        &self.catalog
    }

    pub fn regions(&self) -> &[PortRegion] {
        &self.regions
    }

    pub fn circuits(&self) -> &[Circuit] {
        &self.circuits
    }

    pub fn tools(&self) -> &ToolController {
        &self.tools
    }

    pub fn mode(&self) -> ToolMode {
        self.tools.mode()
    }

    pub fn legend(&self) -> Legend {
        legend::build_legend()
    }

    pub fn find_nearest(&self, point: LatLon) -> Option<NearestStation> {
        spatial::find_nearest(point, &self.catalog)
    }

    /// Assemble the info panel for a point
    pub fn point_info(&self, point: LatLon) -> PointInfo {
        let region = spatial::region_containing(point, &self.regions).map(|r| RegionInfo {
            name: r.name.clone(),
            port: r.port,
            network_port: r.network_port(),
        });
        let circuit =
            spatial::circuit_containing(point, &self.circuits).map(|c| c.name.clone());
        let nearest = self.find_nearest(point);
        PointInfo { region, circuit, nearest }
    }

    pub fn toggle_measure(&mut self) -> ToolMode {
        self.tools.toggle_measure()
    }

    /// Toggle the coverage tool. On successful activation, rings are
    /// seeded around every catalog station before any click lands.
    pub fn toggle_coverage(&mut self, radii_input: &str) -> ToolMode {
        let mode = self.tools.toggle_coverage(radii_input);
        if mode == ToolMode::CoverageRings {
            for station in &self.catalog {
                self.tools
                    .add_coverage_rings(LatLon::new(station.lat, station.lon));
            }
        }
        mode
    }

    pub fn toggle_locate(&mut self) -> ToolMode {
        self.tools.toggle_locate()
    }

    /// Route a map click through the active tool; in default mode, run
    /// the informational lookup and pin the result at the point.
    pub fn handle_click(&mut self, point: LatLon) -> ClickResponse {
        match self.tools.handle_click(point) {
            ClickOutcome::Inspect => {
                let info = self.point_info(point);
                self.tools.place_info_pin(point, info.summary_text());
                ClickResponse::Info(info)
            }
            ClickOutcome::MeasureStarted => ClickResponse::MeasureStarted,
            ClickOutcome::MeasureCompleted => ClickResponse::MeasureCompleted {
                distance_m: self.tools.measured_distance_m().unwrap_or_default(),
            },
            ClickOutcome::RingsAdded => ClickResponse::RingsAdded,
            ClickOutcome::LocateCancelled => ClickResponse::LocateCancelled,
        }
    }

    /// Device location resolved: place the marker and run the full point
    /// lookup against the fix. None when the locate tool was already off.
    pub fn location_found(&mut self, position: LatLon, accuracy_m: f64) -> Option<PointInfo> {
        if !self.tools.location_found(position, accuracy_m) {
            return None;
        }
        Some(self.point_info(position))
    }

    pub fn location_error(&mut self, message: &str) {
        self.tools.location_error(message);
    }

    /// A geocoding result was chosen: report the nearest station and draw
    /// the auto-expiring connecting line to it.
    pub fn search_result_selected(&mut self, point: LatLon, now: Instant) -> Option<NearestStation> {
        let nearest = self.find_nearest(point)?;
        self.tools
            .add_nearest_link(point, LatLon::new(nearest.lat, nearest.lon), now);
        Some(nearest)
    }

    pub fn prune_expired(&mut self, now: Instant) {
        self.tools.prune_expired(now);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::SiteRecord;
    use crate::tools::{ArtifactKind, ArtifactOwner};
    use geo::{polygon, MultiPolygon};

    fn site(code: &str, lat: f64, lon: f64) -> SiteRecord {
        SiteRecord {
            code: Some(code.to_string()),
            name: Some(format!("{} receiver", code)),
            lon,
            lat,
        }
    }

    fn square_region(port: u16, name: &str, west: f64, south: f64, east: f64, north: f64) -> PortRegion {
        PortRegion {
            port,
            name: name.to_string(),
            color: "#999".to_string(),
            boundary: MultiPolygon(vec![polygon![
                (x: west, y: south),
                (x: east, y: south),
                (x: east, y: north),
                (x: west, y: north),
            ]]),
        }
    }

    fn two_station_session() -> MapSession {
        let mut ports = std::collections::HashMap::new();
        ports.insert("AAAA".to_string(), 4804);
        ports.insert("BBBB".to_string(), 4801);
        let feeds = FeedSet {
            regions: vec![square_region(4804, "Wellington", 173.0, -42.0, 176.0, -40.0)],
            circuits: vec![Circuit {
                name: "Wellington".to_string(),
                boundary: MultiPolygon(vec![polygon![
                    (x: 173.0, y: -42.0),
                    (x: 176.0, y: -42.0),
                    (x: 176.0, y: -40.0),
                    (x: 173.0, y: -40.0),
                ]]),
            }],
            smartfix_sites: vec![site("AAAA", -41.0, 174.0), site("BBBB", -45.0, 170.0)],
            linz_sites: vec![],
            authoritative_ports: ports,
            station_meta: Default::default(),
        };
        MapSession::new(feeds)
    }

    #[test]
    fn test_nearest_station_scenario() {
        let session = two_station_session();
        let nearest = session.find_nearest(LatLon::new(-41.1, 174.1)).unwrap();
        assert_eq!(nearest.code, "AAAA");
        assert_eq!(nearest.port, 4804);
    }

    #[test]
    fn test_default_click_builds_info_and_pin() {
        let mut session = two_station_session();
        let response = session.handle_click(LatLon::new(-41.1, 174.1));
        let info = match response {
            ClickResponse::Info(info) => info,
            other => panic!("expected info, got {:?}", other),
        };
        let region = info.region.as_ref().unwrap();
        assert_eq!(region.port, 4804);
        assert_eq!(region.network_port, Some(4814));
        assert_eq!(info.circuit.as_deref(), Some("Wellington"));
        assert_eq!(info.nearest.as_ref().unwrap().code, "AAAA");

        let text = info.summary_text();
        assert!(text.contains("Region: Wellington"));
        assert!(text.contains("Single Port: 4804"));
        assert!(text.contains("Auto-Connect: Port 4815 (Nearest)"));
        assert!(text.contains("Nearest Station: AAAA"));

        let pins = session
            .tools()
            .artifacts()
            .iter()
            .filter(|a| matches!(a.kind, ArtifactKind::InfoPin { .. }))
            .count();
        assert_eq!(pins, 1);
    }

    #[test]
    fn test_click_outside_all_polygons() {
        let mut session = two_station_session();
        let response = session.handle_click(LatLon::new(-46.0, 168.0));
        let info = match response {
            ClickResponse::Info(info) => info,
            other => panic!("expected info, got {:?}", other),
        };
        assert!(info.region.is_none());
        assert!(info.circuit.is_none());
        assert_eq!(info.nearest.unwrap().code, "BBBB");
    }

    #[test]
    fn test_coverage_activation_seeds_all_stations() {
        let mut session = two_station_session();
        assert_eq!(session.toggle_coverage("10,20"), ToolMode::CoverageRings);
        // Two stations seeded: each gets a dot plus two rings
        let coverage = session
            .tools()
            .artifacts()
            .iter()
            .filter(|a| a.owner == ArtifactOwner::Coverage)
            .count();
        assert_eq!(coverage, 6);

        // A click accumulates another set
        session.handle_click(LatLon::new(-43.0, 172.0));
        let coverage = session
            .tools()
            .artifacts()
            .iter()
            .filter(|a| a.owner == ArtifactOwner::Coverage)
            .count();
        assert_eq!(coverage, 9);
    }

    #[test]
    fn test_coverage_cancel_seeds_nothing() {
        let mut session = two_station_session();
        assert_eq!(session.toggle_coverage("nope"), ToolMode::None);
        assert!(session.tools().artifacts().is_empty());
    }

    #[test]
    fn test_measure_click_sequence() {
        let mut session = two_station_session();
        session.toggle_measure();
        assert!(matches!(
            session.handle_click(LatLon::new(-41.0, 174.0)),
            ClickResponse::MeasureStarted
        ));
        match session.handle_click(LatLon::new(-41.1, 174.0)) {
            ClickResponse::MeasureCompleted { distance_m } => {
                assert!((distance_m - 11_100.0).abs() < 100.0, "got {}", distance_m);
            }
            other => panic!("expected completion, got {:?}", other),
        }
    }

    #[test]
    fn test_location_found_assembles_info() {
        let mut session = two_station_session();
        session.toggle_locate();
        let info = session.location_found(LatLon::new(-41.3, 174.8), 25.0).unwrap();
        assert_eq!(info.nearest.as_ref().unwrap().code, "AAAA");
        assert_eq!(info.circuit.as_deref(), Some("Wellington"));

        // Fix arriving after toggle-off is dropped
        session.toggle_locate();
        session.toggle_locate();
        session.toggle_locate(); // ends inactive
        assert!(session.location_found(LatLon::new(-41.3, 174.8), 25.0).is_none());
    }

    #[test]
    fn test_search_selection_draws_expiring_link() {
        let mut session = two_station_session();
        let now = Instant::now();
        let nearest = session
            .search_result_selected(LatLon::new(-41.2, 174.2), now)
            .unwrap();
        assert_eq!(nearest.code, "AAAA");
        assert_eq!(session.tools().artifacts().len(), 1);

        session.prune_expired(now + std::time::Duration::from_secs(6));
        assert!(session.tools().artifacts().is_empty());
    }

    #[test]
    fn test_link_endpoint_with_duplicate_codes() {
        // Codes are not unique across the two datasets; the link must end
        // at the winning station's own coordinates, not the first catalog
        // entry sharing its code
        let feeds = FeedSet {
            smartfix_sites: vec![site("AAAA", -36.8, 174.7)],
            linz_sites: vec![site("AAAA", -45.9, 170.5)],
            ..Default::default()
        };
        let mut session = MapSession::new(feeds);
        let now = Instant::now();
        let nearest = session
            .search_result_selected(LatLon::new(-45.8, 170.4), now)
            .unwrap();
        assert_eq!(nearest.code, "AAAA");
        assert_eq!((nearest.lat, nearest.lon), (-45.9, 170.5));

        match &session.tools().artifacts()[0].kind {
            ArtifactKind::NearestLink { to, .. } => {
                assert_eq!((to.lat, to.lon), (-45.9, 170.5));
            }
            other => panic!("expected a nearest link, got {:?}", other),
        }
    }
}
