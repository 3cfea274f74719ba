use drivebox_common::{Pose, heading_between};
use glam::Vec2;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use crate::file::{TrackError, TrackFile, TrackPort};

/// Minimum spacing between two finalize toggles.
pub const FINALIZE_COOLDOWN: Duration = Duration::from_millis(500);

/// A straight piece of track between two points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Edge {
    pub start: Vec2,
    pub end: Vec2,
}

impl Edge {
    pub fn new(start: Vec2, end: Vec2) -> Self {
        Self { start, end }
    }

    pub fn length(&self) -> f32 {
        self.start.distance(self.end)
    }
}

/// What a load attempt did to the geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// Geometry replaced by this many points.
    Loaded(usize),
    /// Nothing picked; geometry untouched.
    Cancelled,
    /// Unreadable track; geometry left empty.
    Failed,
}

/// An ordered polyline of user-placed points.
///
/// Edges connect consecutive points. Finalizing appends a closing edge from
/// the last point back to the first and switches the track to road style.
#[derive(Debug, Clone, Default)]
pub struct TrackGeometry {
    points: Vec<Vec2>,
    edges: Vec<Edge>,
    finalized: bool,
    last_toggle: Option<Instant>,
}

impl TrackGeometry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an open track by placing `points` in order.
    pub fn from_points(points: impl IntoIterator<Item = Vec2>) -> Self {
        let mut track = Self::new();
        for p in points {
            track.add_point(p);
        }
        track
    }

    pub fn points(&self) -> &[Vec2] {
        &self.points
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn is_finalized(&self) -> bool {
        self.finalized
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Append a point, linking it to the previous one.
    ///
    /// On a finalized track the closing edge is moved so it still runs from
    /// the new last point back to the first.
    pub fn add_point(&mut self, p: Vec2) {
        if self.finalized {
            self.edges.pop();
        }
        if let Some(prev) = self.points.last().copied() {
            self.edges.push(Edge::new(prev, p));
        }
        self.points.push(p);
        if self.finalized {
            self.push_closing_edge();
        }
    }

    /// Drop all points and edges and reopen the track.
    pub fn clear(&mut self) {
        self.points.clear();
        self.edges.clear();
        self.finalized = false;
    }

    /// Flip between open and finalized.
    ///
    /// Ignored without points, or within [`FINALIZE_COOLDOWN`] of the last
    /// accepted toggle. Returns whether the toggle happened.
    pub fn toggle_finalized(&mut self, now: Instant) -> bool {
        if self.points.is_empty() {
            return false;
        }
        if let Some(last) = self.last_toggle {
            if now.saturating_duration_since(last) <= FINALIZE_COOLDOWN {
                return false;
            }
        }
        self.finalized = !self.finalized;
        self.last_toggle = Some(now);
        if self.finalized {
            self.push_closing_edge();
        } else {
            self.edges.pop();
        }
        true
    }

    fn push_closing_edge(&mut self) {
        if let (Some(first), Some(last)) = (self.points.first(), self.points.last()) {
            self.edges.push(Edge::new(*last, *first));
        }
    }

    pub fn start_point(&self) -> Option<Vec2> {
        self.points.first().copied()
    }

    /// Direction of the first edge, if there is one.
    pub fn start_heading(&self) -> Option<f32> {
        self.edges.first().map(|e| heading_between(e.start, e.end))
    }

    /// Where a car should spawn: the first point, facing along the first edge.
    pub fn start_pose(&self) -> Option<Pose> {
        self.start_point()
            .map(|p| Pose::new(p, self.start_heading().unwrap_or(0.0)))
    }

    /// Sum of edge lengths, including the closing edge when finalized.
    pub fn length(&self) -> f32 {
        self.edges.iter().map(Edge::length).sum()
    }

    pub fn to_file(&self) -> TrackFile {
        TrackFile::from_points(&self.points)
    }

    /// Write the points through `port`. `Ok(None)` if the user cancelled.
    pub fn save(&self, port: &mut dyn TrackPort) -> Result<Option<PathBuf>, TrackError> {
        let saved = port.save(&self.to_file())?;
        if let Some(path) = &saved {
            tracing::info!("saved {} track points to {}", self.points.len(), path.display());
        }
        Ok(saved)
    }

    /// Replace the geometry with a track from `port`.
    ///
    /// Edges are rebuilt by replaying the points. A track that cannot be read
    /// leaves the geometry empty; a cancelled pick leaves it as it was.
    pub fn load(&mut self, port: &mut dyn TrackPort) -> LoadOutcome {
        match port.load() {
            Ok(Some(file)) => {
                self.clear();
                for p in file.to_points() {
                    self.add_point(p);
                }
                tracing::info!("loaded {} track points", self.points.len());
                LoadOutcome::Loaded(self.points.len())
            }
            Ok(None) => {
                tracing::debug!("track load cancelled");
                LoadOutcome::Cancelled
            }
            Err(e) => {
                self.clear();
                tracing::warn!(
                    error = &e as &(dyn std::error::Error + 'static),
                    "skipping track load"
                );
                LoadOutcome::Failed
            }
        }
    }
}
