// Spatial Query Engine
//
// Three pure queries over the loaded data: nearest station (haversine,
// linear scan), region membership and circuit membership (point-in-polygon,
// first polygon in load order wins). Catalogs are small (~100 stations,
// single-digit polygon counts) so nothing is indexed.

use geo::{Contains, Distance, Haversine, Point};
use serde::Serialize;

use crate::catalog::Station;
use crate::reference;
use crate::regions::{Circuit, PortRegion};

/// A query coordinate in degrees. Longitude may exceed 180 after the
/// catalog's antimeridian wrap.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LatLon {
    pub lat: f64,
    pub lon: f64,
}

impl LatLon {
    pub fn new(lat: f64, lon: f64) -> Self {
        LatLon { lat, lon }
    }

    fn point(&self) -> Point<f64> {
        Point::new(self.lon, self.lat)
    }
}

/// Result of a nearest-station query, ready for display
#[derive(Debug, Clone, Serialize)]
pub struct NearestStation {
    pub code: String,
    pub name: String,
    /// Locality from the reference table, or the feed name
    pub location: String,
    /// The winning station's own coordinates; codes are not unique, so
    /// callers must not re-resolve the station by code
    pub lat: f64,
    pub lon: f64,
    pub port: u16,
    pub network_port: Option<u16>,
    pub distance_m: f64,
}

impl NearestStation {
    /// Distance formatted the way the info panels show it
    pub fn distance_km_text(&self) -> String {
        format!("{:.1}", self.distance_m / 1000.0)
    }
}

/// Great-circle distance between two coordinates in metres
pub fn distance_m(a: LatLon, b: LatLon) -> f64 {
    Haversine.distance(a.point(), b.point())
}

/// Find the station closest to `origin`.
///
/// Linear scan over the catalog; strictly-closer comparison, so the first
/// station in load order wins any exact tie. Returns None only for an
/// empty catalog.
pub fn find_nearest(origin: LatLon, catalog: &[Station]) -> Option<NearestStation> {
    let mut best: Option<(&Station, f64)> = None;

    for station in catalog {
        let d = distance_m(origin, LatLon::new(station.lat, station.lon));
        match best {
            Some((_, min)) if d >= min => {}
            _ => best = Some((station, d)),
        }
    }

    best.map(|(station, d)| NearestStation {
        code: station.code.clone(),
        name: station.name.clone(),
        location: reference::location_name(&station.code, Some(&station.name)),
        lat: station.lat,
        lon: station.lon,
        port: station.assigned_port,
        network_port: station.network_port,
        distance_m: d,
    })
}

/// First port region whose boundary contains the point, in load order
pub fn region_containing<'a>(point: LatLon, regions: &'a [PortRegion]) -> Option<&'a PortRegion> {
    let p = point.point();
    regions.iter().find(|r| r.boundary.contains(&p))
}

/// First meridional circuit whose boundary contains the point, in load order
pub fn circuit_containing<'a>(point: LatLon, circuits: &'a [Circuit]) -> Option<&'a Circuit> {
    let p = point.point();
    circuits.iter().find(|c| c.boundary.contains(&p))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{StationSource, StationStatus};
    use geo::{polygon, MultiPolygon};

    fn station(code: &str, lat: f64, lon: f64, port: u16) -> Station {
        Station {
            code: code.to_string(),
            name: format!("{} receiver", code),
            lat,
            lon,
            source: StationSource::SmartFix,
            status: StationStatus::Online,
            assigned_port: port,
            network_port: None,
        }
    }

    #[test]
    fn test_find_nearest_empty_catalog() {
        assert!(find_nearest(LatLon::new(-41.0, 174.0), &[]).is_none());
    }

    #[test]
    fn test_find_nearest_picks_minimum() {
        let catalog = vec![
            station("AAAA", -41.0, 174.0, 4804),
            station("BBBB", -45.0, 170.0, 4801),
        ];
        let nearest = find_nearest(LatLon::new(-41.1, 174.1), &catalog).unwrap();
        assert_eq!(nearest.code, "AAAA");
        assert_eq!(nearest.port, 4804);
        // Query point to every other station is farther than to the winner
        let d_winner = distance_m(LatLon::new(-41.1, 174.1), LatLon::new(-41.0, 174.0));
        let d_other = distance_m(LatLon::new(-41.1, 174.1), LatLon::new(-45.0, 170.0));
        assert!(d_winner < d_other);
        assert!((nearest.distance_m - d_winner).abs() < 1e-6);
    }

    #[test]
    fn test_find_nearest_tie_goes_to_first_loaded() {
        let catalog = vec![
            station("AAAA", -41.0, 174.0, 4804),
            station("BBBB", -41.0, 174.0, 4804),
        ];
        let nearest = find_nearest(LatLon::new(-41.5, 174.5), &catalog).unwrap();
        assert_eq!(nearest.code, "AAAA");
    }

    #[test]
    fn test_nearest_uses_locality_table() {
        let catalog = vec![station("DUND", -45.87, 170.5, 4801)];
        let nearest = find_nearest(LatLon::new(-45.9, 170.5), &catalog).unwrap();
        assert_eq!(nearest.location, "Dunedin");

        let catalog = vec![station("XXXX", -45.87, 170.5, 4801)];
        let nearest = find_nearest(LatLon::new(-45.9, 170.5), &catalog).unwrap();
        assert_eq!(nearest.location, "XXXX receiver");
    }

    #[test]
    fn test_distance_sanity() {
        // One degree of latitude is about 111 km
        let d = distance_m(LatLon::new(-41.0, 174.0), LatLon::new(-42.0, 174.0));
        assert!((d - 111_000.0).abs() < 1_000.0, "got {}", d);
    }

    #[test]
    fn test_distance_km_text() {
        let nearest = NearestStation {
            code: "DUND".to_string(),
            name: String::new(),
            location: "Dunedin".to_string(),
            lat: -45.87,
            lon: 170.5,
            port: 4801,
            network_port: None,
            distance_m: 12_345.6,
        };
        assert_eq!(nearest.distance_km_text(), "12.3");
    }

    fn square_region(port: u16, west: f64, south: f64, east: f64, north: f64) -> PortRegion {
        PortRegion {
            port,
            name: format!("Port {}", port),
            color: "#999".to_string(),
            boundary: MultiPolygon(vec![polygon![
                (x: west, y: south),
                (x: east, y: south),
                (x: east, y: north),
                (x: west, y: north),
            ]]),
        }
    }

    #[test]
    fn test_region_containing_first_match_wins() {
        let regions = vec![
            square_region(4803, 170.0, -44.0, 173.0, -42.0),
            square_region(4801, 169.0, -47.0, 172.0, -43.0), // overlaps the first
        ];
        let hit = region_containing(LatLon::new(-43.5, 171.0), &regions).unwrap();
        assert_eq!(hit.port, 4803);

        let only_second = region_containing(LatLon::new(-46.0, 170.0), &regions).unwrap();
        assert_eq!(only_second.port, 4801);

        assert!(region_containing(LatLon::new(-30.0, 160.0), &regions).is_none());
    }

    #[test]
    fn test_circuit_containing() {
        let circuit = Circuit {
            name: "Wellington".to_string(),
            boundary: MultiPolygon(vec![polygon![
                (x: 174.0, y: -42.0),
                (x: 176.0, y: -42.0),
                (x: 176.0, y: -40.5),
                (x: 174.0, y: -40.5),
            ]]),
        };
        let circuits = vec![circuit];
        assert!(circuit_containing(LatLon::new(-41.3, 174.8), &circuits).is_some());
        assert!(circuit_containing(LatLon::new(-43.5, 171.0), &circuits).is_none());
    }
}
