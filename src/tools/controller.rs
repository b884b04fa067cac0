// Tool state machine and artifact ledger
//
// Transitions are synchronous; a click is handled entirely under the mode
// it arrived in. Activating any tool first resets everything else
// (including the default-mode info pin), then enters the new mode, so no
// artifact ever outlives its owner.

use std::time::{Duration, Instant};

use crate::spatial::{self, LatLon};

use super::{format_distance, parse_radii, Artifact, ArtifactKind, ArtifactOwner, ToolMode};

/// How long a nearest-station connecting line stays on the map
pub const NEAREST_LINK_TTL: Duration = Duration::from_secs(5);

/// What a map click did, so the caller knows whether to run the default
/// informational lookup
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickOutcome {
    /// No tool active; caller should run the region/circuit/nearest lookup
    Inspect,
    /// First point of a measurement recorded
    MeasureStarted,
    /// Second point recorded, segment and label emitted
    MeasureCompleted,
    /// One dot plus one ring per configured radius added at the point
    RingsAdded,
    /// Click while locating toggles the tool off
    LocateCancelled,
}

#[derive(Debug, Default)]
pub struct ToolController {
    mode: ToolMode,
    measure_points: Vec<LatLon>,
    coverage_radii_km: Vec<f64>,
    artifacts: Vec<Artifact>,
}

impl ToolController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(&self) -> ToolMode {
        self.mode
    }

    pub fn artifacts(&self) -> &[Artifact] {
        &self.artifacts
    }

    /// Radii configured for the coverage tool, empty outside coverage mode
    pub fn coverage_radii_km(&self) -> &[f64] {
        &self.coverage_radii_km
    }

    fn clear_owned(&mut self, owner: ArtifactOwner) {
        self.artifacts.retain(|a| a.owner != owner);
    }

    /// Deactivate everything except `keep`, releasing the artifacts of each
    /// deactivated owner. The default-mode info pin always clears.
    fn reset_except(&mut self, keep: Option<ToolMode>) {
        self.clear_owned(ArtifactOwner::Info);
        if keep != Some(ToolMode::Measuring) {
            self.measure_points.clear();
            self.clear_owned(ArtifactOwner::Measure);
        }
        if keep != Some(ToolMode::CoverageRings) {
            self.coverage_radii_km.clear();
            self.clear_owned(ArtifactOwner::Coverage);
        }
        if keep != Some(ToolMode::Locating) {
            self.clear_owned(ArtifactOwner::Locate);
        }
        self.mode = keep.unwrap_or(ToolMode::None);
    }

    /// Deactivate whatever is active
    pub fn reset(&mut self) {
        self.reset_except(None);
    }

    /// Toggle the measure tool
    pub fn toggle_measure(&mut self) -> ToolMode {
        if self.mode == ToolMode::Measuring {
            self.reset();
        } else {
            self.reset_except(Some(ToolMode::Measuring));
            log::debug!("Measure tool activated");
        }
        self.mode
    }

    /// Toggle the coverage tool. `radii_input` is the raw prompt text;
    /// invalid or empty input cancels the activation and the mode reverts
    /// to None. Already active → plain toggle off, input ignored.
    pub fn toggle_coverage(&mut self, radii_input: &str) -> ToolMode {
        if self.mode == ToolMode::CoverageRings {
            self.reset();
            return self.mode;
        }
        match parse_radii(radii_input) {
            Some(radii) => {
                self.reset_except(Some(ToolMode::CoverageRings));
                log::debug!("Coverage tool activated, radii {:?} km", radii);
                self.coverage_radii_km = radii;
            }
            None => {
                log::warn!("Coverage radii input {:?} rejected", radii_input);
                self.reset();
            }
        }
        self.mode
    }

    /// Toggle the locate tool. Activation only arms the mode; the device
    /// location request itself lives outside the core.
    pub fn toggle_locate(&mut self) -> ToolMode {
        if self.mode == ToolMode::Locating {
            self.reset();
        } else {
            self.reset_except(Some(ToolMode::Locating));
            log::debug!("Locate tool activated");
        }
        self.mode
    }

    /// Dot plus one ring per configured radius, centred on `point`.
    /// Used both for the station seeding at activation and for clicks.
    pub fn add_coverage_rings(&mut self, point: LatLon) {
        self.artifacts
            .push(Artifact::new(ArtifactOwner::Coverage, ArtifactKind::Dot(point)));
        for &radius_km in &self.coverage_radii_km.clone() {
            self.artifacts.push(Artifact::new(
                ArtifactOwner::Coverage,
                ArtifactKind::Ring {
                    center: point,
                    radius_m: radius_km * 1000.0,
                },
            ));
        }
    }

    /// Route a map click through the active mode
    pub fn handle_click(&mut self, point: LatLon) -> ClickOutcome {
        match self.mode {
            ToolMode::Locating => {
                self.reset();
                ClickOutcome::LocateCancelled
            }
            ToolMode::CoverageRings => {
                self.add_coverage_rings(point);
                ClickOutcome::RingsAdded
            }
            ToolMode::Measuring => self.measure_click(point),
            ToolMode::None => ClickOutcome::Inspect,
        }
    }

    fn measure_click(&mut self, point: LatLon) -> ClickOutcome {
        // A click after a completed segment restarts the two-point cycle
        if self.measure_points.len() >= 2 {
            self.measure_points.clear();
            self.clear_owned(ArtifactOwner::Measure);
        }

        self.measure_points.push(point);
        self.artifacts
            .push(Artifact::new(ArtifactOwner::Measure, ArtifactKind::Dot(point)));

        if self.measure_points.len() == 2 {
            let from = self.measure_points[0];
            let to = self.measure_points[1];
            let distance_m = spatial::distance_m(from, to);
            self.artifacts.push(Artifact::new(
                ArtifactOwner::Measure,
                ArtifactKind::Segment {
                    from,
                    to,
                    distance_m,
                    label: format_distance(distance_m),
                },
            ));
            ClickOutcome::MeasureCompleted
        } else {
            ClickOutcome::MeasureStarted
        }
    }

    /// The completed measurement, if both points are down
    pub fn measured_distance_m(&self) -> Option<f64> {
        self.artifacts.iter().find_map(|a| match a.kind {
            ArtifactKind::Segment { distance_m, .. } if a.owner == ArtifactOwner::Measure => {
                Some(distance_m)
            }
            _ => None,
        })
    }

    /// Device location resolved. Ignored unless the locate tool is still
    /// active (the user may have toggled away before the fix arrived).
    /// Replaces any previous fix.
    pub fn location_found(&mut self, position: LatLon, accuracy_m: f64) -> bool {
        if self.mode != ToolMode::Locating {
            log::debug!("Location fix arrived with locate tool inactive, ignoring");
            return false;
        }
        self.clear_owned(ArtifactOwner::Locate);
        self.artifacts.push(Artifact::new(
            ArtifactOwner::Locate,
            ArtifactKind::LocationMarker { position, accuracy_m },
        ));
        true
    }

    /// Device location failed. The mode stays Locating until toggled off;
    /// the caller surfaces the message.
    pub fn location_error(&mut self, message: &str) {
        log::warn!("Geolocation failed: {}", message);
    }

    /// Default-mode info pin at a clicked point, replacing any previous one
    pub fn place_info_pin(&mut self, position: LatLon, content: String) {
        self.clear_owned(ArtifactOwner::Info);
        self.artifacts.push(Artifact::new(
            ArtifactOwner::Info,
            ArtifactKind::InfoPin { position, content },
        ));
    }

    /// Dashed connecting line to the nearest station, auto-expiring
    pub fn add_nearest_link(&mut self, from: LatLon, to: LatLon, now: Instant) {
        self.artifacts.push(Artifact::expiring(
            ArtifactOwner::Info,
            ArtifactKind::NearestLink { from, to },
            now + NEAREST_LINK_TTL,
        ));
    }

    /// Drop artifacts whose expiry has passed. Safe to call on any timer
    /// tick; an artifact cleared earlier by its owner is simply gone.
    pub fn prune_expired(&mut self, now: Instant) {
        self.artifacts
            .retain(|a| a.expires_at.map_or(true, |deadline| deadline > now));
    }
}
