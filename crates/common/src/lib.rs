//! Shared types for the drivebox sandbox.
//!
//! # Conventions
//! - World coordinates are screen pixels: +x right, +y down.
//! - Headings are degrees in [0, 360), 0 pointing up (-y), clockwise positive.

pub mod types;

pub use types::{EntityId, Pose, heading_between, heading_vector, normalize_heading};
