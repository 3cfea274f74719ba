use drivebox_common::{heading_vector, normalize_heading};
use drivebox_input::ControlState;

use crate::params::VehicleParams;
use crate::state::VehicleState;

/// Below this |rpm| steering authority ramps up linearly.
const TURN_RAMP_END: f32 = 2.5;
/// Degrees per tick of the steering ramp, per unit of |rpm|.
const TURN_RAMP_GAIN: f32 = 2.0;
/// Steering limit between the ramp and the fade.
const TURN_PLATEAU: f32 = 5.0;
/// From here steering authority fades out...
const TURN_FADE_START: f32 = 7.0;
/// ...reaching zero here.
const TURN_FADE_END: f32 = 12.0;

/// Speed produced by an rpm value. Linear and odd: zero rpm, zero speed.
pub fn engine_power_curve(rpm: f32, params: &VehicleParams) -> f32 {
    rpm * params.power_gain
}

/// Largest heading change (degrees per tick) allowed at `rpm`.
///
/// Ramps up from standstill, plateaus, then fades at high rpm. Continuous
/// at both breakpoints and never negative.
pub fn allowed_turning_angle(rpm: f32) -> f32 {
    let rpm = rpm.abs();
    let angle = if rpm < TURN_RAMP_END {
        rpm * TURN_RAMP_GAIN
    } else if rpm < TURN_FADE_START {
        TURN_PLATEAU
    } else {
        TURN_FADE_END - rpm
    };
    angle.max(0.0)
}

/// The vehicle dynamics model. Holds tuning only; state is passed in and out.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct VehicleModel {
    params: VehicleParams,
}

impl VehicleModel {
    pub fn new(params: VehicleParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &VehicleParams {
        &self.params
    }

    fn clamp_rpm(&self, rpm: f32) -> f32 {
        rpm.max(self.params.rpm_min).min(self.params.rpm_max)
    }

    /// Advance one car by `dt` seconds under `input`.
    ///
    /// Negative or non-finite `dt` is treated as zero.
    pub fn step(&self, state: &VehicleState, input: &ControlState, dt: f32) -> VehicleState {
        let p = &self.params;
        let dt = if dt.is_finite() && dt > 0.0 { dt } else { 0.0 };

        // Speed follows the incoming rpm, before it is clamped.
        let speed = engine_power_curve(state.rpm, p);
        let mut rpm = self.clamp_rpm(state.rpm);

        let forward = input.forward();
        let backward = input.backward();

        if forward {
            let rate = if speed < 0.0 { p.braking } else { p.acceleration };
            rpm += rate * dt;
        }
        if !forward && speed > 0.0 {
            rpm -= p.coasting * dt;
        }
        if !backward && speed < 0.0 {
            rpm += p.coasting * dt;
        }
        if backward {
            let rate = if speed > 0.0 { p.braking } else { p.reverse };
            rpm -= rate * dt;
        }
        let rpm = self.clamp_rpm(rpm);

        let mut max_angle = allowed_turning_angle(rpm);
        if speed < 0.0 {
            max_angle = -max_angle;
        }
        let mut heading = state.heading;
        if input.left() {
            heading -= max_angle;
        }
        if input.right() {
            heading += max_angle;
        }
        let heading = normalize_heading(heading);

        let position = state.position + heading_vector(heading) * (speed * dt);

        VehicleState {
            position,
            heading,
            speed,
            rpm,
        }
    }
}
