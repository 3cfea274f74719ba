//! Vehicle dynamics: a pure per-tick model of a throttle-driven car.
//!
//! # Invariants
//! - `VehicleModel::step` has no side effects; same inputs, same output.
//! - Every state returned by `step` has `rpm` inside the configured bounds.
//! - `speed` is derived from the incoming `rpm` before it is clamped, so an
//!   out-of-range state moves at its pre-clamp speed for exactly one tick.

pub mod model;
pub mod params;
pub mod state;

pub use model::{VehicleModel, allowed_turning_angle, engine_power_curve};
pub use params::{VehicleConfigError, VehicleParams};
pub use state::{Telemetry, VehicleState};

pub fn crate_info() -> &'static str {
    concat!(env!("CARGO_PKG_NAME"), " v", env!("CARGO_PKG_VERSION"))
}
