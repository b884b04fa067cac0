// Port region and meridional circuit records
//
// Both are polygon overlays parsed from GeoJSON feature collections.
// Construction validates geometry up front so the spatial queries never
// have to re-check; features without a usable polygon are skipped by the
// loader with a warning.

use geo::MultiPolygon;
use geojson::Feature;

use crate::reference;

/// One single-port coverage region from the port regions feed
#[derive(Debug, Clone)]
pub struct PortRegion {
    pub port: u16,
    /// Display name from the feed, falling back to "Port NNNN"
    pub name: String,
    /// Fill color from the feed, falling back to the policy table, then grey
    pub color: String,
    pub boundary: MultiPolygon<f64>,
}

/// One LINZ meridional circuit polygon
#[derive(Debug, Clone)]
pub struct Circuit {
    pub name: String,
    pub boundary: MultiPolygon<f64>,
}

fn polygon_of(feature: &Feature) -> Option<MultiPolygon<f64>> {
    let geometry = feature.geometry.as_ref()?;
    match geo_types::Geometry::<f64>::try_from(geometry.value.clone()).ok()? {
        geo_types::Geometry::Polygon(p) => Some(MultiPolygon(vec![p])),
        geo_types::Geometry::MultiPolygon(mp) => Some(mp),
        _ => None,
    }
}

fn string_property(feature: &Feature, key: &str) -> Option<String> {
    feature
        .property(key)
        .and_then(|v| v.as_str())
        .map(|s| s.to_string())
}

impl PortRegion {
    /// Build a region from a feed feature. Returns None when the feature
    /// has no polygon geometry or no port number.
    pub fn from_feature(feature: &Feature) -> Option<PortRegion> {
        let boundary = polygon_of(feature)?;
        let port = feature.property("port").and_then(|v| v.as_u64())? as u16;
        let name = string_property(feature, "port_name").unwrap_or_else(|| format!("Port {}", port));
        let color = string_property(feature, "color")
            .or_else(|| reference::port_color(port).map(str::to_string))
            .unwrap_or_else(|| "#999".to_string());
        Some(PortRegion { port, name, color, boundary })
    }

    /// Network (fixed solution) port for this region, where one exists
    pub fn network_port(&self) -> Option<u16> {
        reference::network_port_for(self.port)
    }
}

impl Circuit {
    /// Build a circuit from a feed feature. The LINZ export is inconsistent
    /// about property casing, so both `name` and `Name` are accepted.
    pub fn from_feature(feature: &Feature) -> Option<Circuit> {
        let boundary = polygon_of(feature)?;
        let name = string_property(feature, "name")
            .or_else(|| string_property(feature, "Name"))
            .unwrap_or_else(|| "Unknown".to_string());
        Some(Circuit { name, boundary })
    }

    /// Stable fill color derived from the circuit name (the feed carries
    /// none). Same string always hashes to the same color.
    pub fn color(&self) -> String {
        if self.name.is_empty() {
            return "#999".to_string();
        }
        let mut hash: i32 = 0;
        for c in self.name.encode_utf16() {
            hash = (c as i32).wrapping_add((hash << 5).wrapping_sub(hash));
        }
        let mut color = String::from("#");
        for i in 0..3 {
            let value = (hash >> (i * 8)) & 0xff;
            color.push_str(&format!("{:02x}", value));
        }
        color
    }
}
