//! Sandbox kernel: owns the entities and advances them one tick at a time.
//!
//! # Invariants
//! - One thread owns the world; input, update and presentation never overlap.
//! - Every world owns its entities. Nothing is shared between worlds.
//! - Stopping is cooperative: a cleared running flag ends the loop at the
//!   top of the next iteration.

pub mod clock;
pub mod entity;
pub mod sandbox;
pub mod world;

pub use clock::{DEFAULT_MAX_DT, DEFAULT_TPS, SimulationClock};
pub use entity::{Car, Entity, RenderState};
pub use sandbox::{FrameInfo, IdleInput, InputSource, Presenter, SandboxLoop};
pub use world::World;

pub fn crate_info() -> &'static str {
    concat!(env!("CARGO_PKG_NAME"), " v", env!("CARGO_PKG_VERSION"))
}
