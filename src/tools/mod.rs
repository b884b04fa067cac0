// Tool Mode Controller - exclusive map tools and their transient overlays
//
// Exactly one tool is active at a time. Every overlay an active tool draws
// is recorded as an Artifact tagged with its owner, so deactivation can
// remove precisely the overlays that mode created and nothing else.

mod controller;

pub use controller::{ClickOutcome, ToolController, NEAREST_LINK_TTL};

use std::time::Instant;

use uuid::Uuid;

use crate::spatial::LatLon;

/// The exclusive tool state. `None` is the absence of a tool, not a mode:
/// clicks fall through to the default informational lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ToolMode {
    #[default]
    None,
    Measuring,
    CoverageRings,
    Locating,
}

impl ToolMode {
    pub fn is_active(&self) -> bool {
        *self != ToolMode::None
    }
}

/// Which mode (or the default lookup) created an artifact and is
/// responsible for clearing it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactOwner {
    Measure,
    Coverage,
    Locate,
    /// Default-mode info pin and nearest-station link
    Info,
}

/// Geometry of a transient overlay, in presentation-neutral terms
#[derive(Debug, Clone, PartialEq)]
pub enum ArtifactKind {
    /// Small filled dot at a clicked point
    Dot(LatLon),
    /// Measured segment with its pre-formatted distance label
    Segment {
        from: LatLon,
        to: LatLon,
        distance_m: f64,
        label: String,
    },
    /// Coverage ring centred on a point
    Ring { center: LatLon, radius_m: f64 },
    /// Device-location marker with its accuracy circle radius
    LocationMarker { position: LatLon, accuracy_m: f64 },
    /// Clicked-point info pin (content assembled by the session)
    InfoPin { position: LatLon, content: String },
    /// Dashed line from a query point to the nearest station
    NearestLink { from: LatLon, to: LatLon },
}

/// One transient overlay. Artifacts with an expiry are retained by
/// [`ToolController::prune_expired`] only while their deadline is in the
/// future; an artifact its owner already cleared is simply absent, so a
/// late timer tick has nothing to remove.
#[derive(Debug, Clone)]
pub struct Artifact {
    pub id: Uuid,
    pub owner: ArtifactOwner,
    pub kind: ArtifactKind,
    pub expires_at: Option<Instant>,
}

impl Artifact {
    pub(crate) fn new(owner: ArtifactOwner, kind: ArtifactKind) -> Self {
        Artifact {
            id: Uuid::new_v4(),
            owner,
            kind,
            expires_at: None,
        }
    }

    pub(crate) fn expiring(owner: ArtifactOwner, kind: ArtifactKind, expires_at: Instant) -> Self {
        Artifact {
            id: Uuid::new_v4(),
            owner,
            kind,
            expires_at: Some(expires_at),
        }
    }
}

/// Parse the coverage radii prompt: comma-separated kilometres, each entry
/// trimmed and kept only when it parses to a finite positive number.
/// Returns None when nothing valid remains (activation is cancelled).
pub fn parse_radii(input: &str) -> Option<Vec<f64>> {
    let radii: Vec<f64> = input
        .split(',')
        .filter_map(|s| s.trim().parse::<f64>().ok())
        .filter(|r| r.is_finite() && *r > 0.0)
        .collect();
    if radii.is_empty() {
        None
    } else {
        Some(radii)
    }
}

/// Distance label for a measured segment: kilometres with two decimals
/// above 1 km, metres with one decimal below.
pub fn format_distance(distance_m: f64) -> String {
    if distance_m > 1000.0 {
        format!("{:.2} km", distance_m / 1000.0)
    } else {
        format!("{:.1} m", distance_m)
    }
}
