use drivebox_common::{Pose, normalize_heading};
use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::model::allowed_turning_angle;

/// Kinematic state of one car.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct VehicleState {
    /// World position in pixels.
    pub position: Vec2,
    /// Degrees in [0, 360), 0 = up, clockwise positive.
    pub heading: f32,
    /// Signed, pixels per second. Forward is positive.
    pub speed: f32,
    /// Accumulated throttle; drives both speed and steering authority.
    pub rpm: f32,
}

impl VehicleState {
    /// A stationary car at `pose`.
    pub fn at(pose: Pose) -> Self {
        Self {
            position: pose.position,
            heading: normalize_heading(pose.heading),
            speed: 0.0,
            rpm: 0.0,
        }
    }

    pub fn pose(&self) -> Pose {
        Pose {
            position: self.position,
            heading: self.heading,
        }
    }

    pub fn telemetry(&self) -> Telemetry {
        Telemetry {
            speed: self.speed,
            rpm: self.rpm,
            max_turn_angle: allowed_turning_angle(self.rpm),
        }
    }
}

/// Numbers shown on the debug overlay.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Telemetry {
    pub speed: f32,
    pub rpm: f32,
    /// Degrees per tick the car may turn at the current rpm.
    pub max_turn_angle: f32,
}

impl Telemetry {
    /// The two overlay lines: speed/rpm, then steering limit.
    pub fn overlay_lines(&self) -> [String; 2] {
        [
            format!("Speed: {:.2}, RPM: {:.2}", self.speed, self.rpm),
            format!("Max angle: {:.2}", self.max_turn_angle),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn at_pose_is_stationary() {
        let s = VehicleState::at(Pose::new(Vec2::new(3.0, 4.0), 450.0));
        assert_eq!(s.position, Vec2::new(3.0, 4.0));
        assert_eq!(s.heading, 90.0);
        assert_eq!(s.speed, 0.0);
        assert_eq!(s.rpm, 0.0);
    }

    #[test]
    fn telemetry_formats_two_decimals() {
        let s = VehicleState {
            speed: 360.0,
            rpm: 3.0,
            ..VehicleState::default()
        };
        let [first, second] = s.telemetry().overlay_lines();
        assert_eq!(first, "Speed: 360.00, RPM: 3.00");
        assert_eq!(second, "Max angle: 5.00");
    }
}
