use glam::Vec2;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for an entity in a sandbox world.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityId(pub Uuid);

impl EntityId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// First eight hex digits, for log lines and overlays.
    pub fn short(&self) -> String {
        self.0.simple().to_string()[..8].to_string()
    }
}

impl Default for EntityId {
    fn default() -> Self {
        Self::new()
    }
}

/// Position and heading of something on the 2D plane.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pose {
    pub position: Vec2,
    /// Degrees, see [`normalize_heading`].
    pub heading: f32,
}

impl Pose {
    pub fn new(position: Vec2, heading: f32) -> Self {
        Self {
            position,
            heading: normalize_heading(heading),
        }
    }

    /// Unit vector the pose is facing.
    pub fn forward(&self) -> Vec2 {
        heading_vector(self.heading)
    }
}

impl Default for Pose {
    fn default() -> Self {
        Self {
            position: Vec2::ZERO,
            heading: 0.0,
        }
    }
}

/// Wrap an angle in degrees into [0, 360).
pub fn normalize_heading(degrees: f32) -> f32 {
    let wrapped = degrees.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360.0 for tiny negative inputs
    if wrapped >= 360.0 { 0.0 } else { wrapped }
}

/// Unit vector for a heading: 0 is up (-y), 90 is right (+x).
pub fn heading_vector(degrees: f32) -> Vec2 {
    let radians = degrees.to_radians();
    Vec2::new(radians.sin(), -radians.cos())
}

/// Heading pointing from `from` towards `to`. Coincident points give 0.
pub fn heading_between(from: Vec2, to: Vec2) -> f32 {
    let d = to - from;
    if d.length_squared() == 0.0 {
        return 0.0;
    }
    normalize_heading(d.x.atan2(-d.y).to_degrees())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-4
    }

    #[test]
    fn entity_id_uniqueness() {
        let a = EntityId::new();
        let b = EntityId::new();
        assert_ne!(a, b);
        assert_eq!(a.short().len(), 8);
    }

    #[test]
    fn normalize_wraps_both_directions() {
        assert!(approx(normalize_heading(370.0), 10.0));
        assert!(approx(normalize_heading(-10.0), 350.0));
        assert!(approx(normalize_heading(360.0), 0.0));
        assert!(approx(normalize_heading(0.0), 0.0));
        let tiny = normalize_heading(-1e-9);
        assert!((0.0..360.0).contains(&tiny));
    }

    #[test]
    fn heading_zero_points_up() {
        let v = heading_vector(0.0);
        assert!(approx(v.x, 0.0));
        assert!(approx(v.y, -1.0));
        let right = heading_vector(90.0);
        assert!(approx(right.x, 1.0));
        assert!(approx(right.y, 0.0));
    }

    #[test]
    fn heading_between_matches_vector() {
        let origin = Vec2::new(10.0, 10.0);
        assert!(approx(heading_between(origin, Vec2::new(10.0, 0.0)), 0.0));
        assert!(approx(heading_between(origin, Vec2::new(20.0, 10.0)), 90.0));
        assert!(approx(heading_between(origin, Vec2::new(10.0, 20.0)), 180.0));
        assert!(approx(heading_between(origin, Vec2::new(0.0, 10.0)), 270.0));
        assert_eq!(heading_between(origin, origin), 0.0);
    }

    #[test]
    fn pose_new_normalizes() {
        let p = Pose::new(Vec2::ZERO, -90.0);
        assert!(approx(p.heading, 270.0));
        assert!(approx(p.forward().x, -1.0));
    }
}
