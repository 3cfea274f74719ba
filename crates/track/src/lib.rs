//! Tracks: a user-drawn polyline that can be closed into a loop.
//!
//! # Invariants
//! - Edges are always derivable from the point list; files store points only.
//! - While finalized, the last edge is the closing edge (last point -> first).
//! - Finalize toggles are at least [`FINALIZE_COOLDOWN`] apart.

pub mod builder;
pub mod file;
pub mod geometry;

pub use builder::TrackBuilder;
pub use file::{JsonTrackPort, MemoryTrackPort, TrackError, TrackFile, TrackPoint, TrackPort};
pub use geometry::{Edge, FINALIZE_COOLDOWN, LoadOutcome, TrackGeometry};

pub fn crate_info() -> &'static str {
    concat!(env!("CARGO_PKG_NAME"), " v", env!("CARGO_PKG_VERSION"))
}
