use drivebox_input::{Control, ControlState};
use std::fmt;
use std::time::Instant;

use crate::file::TrackPort;
use crate::geometry::TrackGeometry;

/// Interactive track editing: turns held controls into geometry edits.
///
/// Save, load and clear fire once per press. Placing points repeats every
/// tick while held, so dragging the pointer draws freehand. Finalize is
/// rate-limited by the geometry's own cooldown.
pub struct TrackBuilder {
    geometry: TrackGeometry,
    port: Box<dyn TrackPort>,
    previous: ControlState,
}

impl TrackBuilder {
    pub fn new(port: Box<dyn TrackPort>) -> Self {
        Self::with_geometry(TrackGeometry::new(), port)
    }

    pub fn with_geometry(geometry: TrackGeometry, port: Box<dyn TrackPort>) -> Self {
        Self {
            geometry,
            port,
            previous: ControlState::new(),
        }
    }

    pub fn geometry(&self) -> &TrackGeometry {
        &self.geometry
    }

    /// Apply one tick of controls.
    pub fn behaviour(&mut self, controls: &ControlState, now: Instant) {
        if controls.just_pressed(&self.previous, Control::Save) {
            if let Err(e) = self.geometry.save(self.port.as_mut()) {
                tracing::error!(
                    error = &e as &(dyn std::error::Error + 'static),
                    "failed to save track"
                );
            }
        }
        if controls.just_pressed(&self.previous, Control::Load) {
            self.geometry.load(self.port.as_mut());
        }
        if controls.just_pressed(&self.previous, Control::Clear) {
            self.geometry.clear();
            tracing::info!("track cleared");
        }
        if controls.is_pressed(Control::PlacePoint) {
            if let Some(p) = controls.pointer {
                // A stationary pointer would otherwise stack duplicates every tick.
                if self.geometry.points().last() != Some(&p) {
                    self.geometry.add_point(p);
                    tracing::debug!(
                        "track point {} at ({:.1}, {:.1})",
                        self.geometry.len(),
                        p.x,
                        p.y
                    );
                }
            }
        }
        if controls.is_pressed(Control::FinalizeToggle) && self.geometry.toggle_finalized(now) {
            tracing::info!(finalized = self.geometry.is_finalized(), "track finalize toggled");
        }
        self.previous = *controls;
    }
}

impl fmt::Debug for TrackBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TrackBuilder")
            .field("geometry", &self.geometry)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::file::{MemoryTrackPort, TrackError, TrackFile};
    use glam::Vec2;
    use std::path::PathBuf;
    use std::time::Duration;

    fn at(pointer: Vec2, controls: &[Control]) -> ControlState {
        let mut state = ControlState::with(controls);
        state.pointer = Some(pointer);
        state
    }

    #[test]
    fn holding_place_draws_one_point_per_position() {
        let mut b = TrackBuilder::new(Box::new(MemoryTrackPort::new()));
        let now = Instant::now();
        b.behaviour(&at(Vec2::new(1.0, 1.0), &[Control::PlacePoint]), now);
        b.behaviour(&at(Vec2::new(1.0, 1.0), &[Control::PlacePoint]), now);
        b.behaviour(&at(Vec2::new(5.0, 1.0), &[Control::PlacePoint]), now);
        b.behaviour(&at(Vec2::new(9.0, 1.0), &[]), now);
        assert_eq!(b.geometry().len(), 2);
        assert_eq!(b.geometry().edges().len(), 1);
    }

    #[test]
    fn place_without_pointer_is_ignored() {
        let mut b = TrackBuilder::new(Box::new(MemoryTrackPort::new()));
        b.behaviour(&ControlState::with(&[Control::PlacePoint]), Instant::now());
        assert!(b.geometry().is_empty());
    }

    #[test]
    fn save_clear_load_cycle() {
        let mut b = TrackBuilder::new(Box::new(MemoryTrackPort::new()));
        let now = Instant::now();
        for x in [0.0, 50.0, 100.0] {
            b.behaviour(&at(Vec2::new(x, 0.0), &[Control::PlacePoint]), now);
        }
        b.behaviour(&ControlState::with(&[Control::Save]), now);
        b.behaviour(&ControlState::with(&[Control::Clear]), now);
        assert!(b.geometry().is_empty());
        b.behaviour(&ControlState::with(&[Control::Load]), now);
        assert_eq!(b.geometry().len(), 3);
        assert_eq!(b.geometry().edges().len(), 2);
    }

    #[test]
    fn held_clear_fires_once() {
        let mut b = TrackBuilder::new(Box::new(MemoryTrackPort::new()));
        let now = Instant::now();
        b.behaviour(&ControlState::with(&[Control::Clear]), now);
        b.behaviour(&at(Vec2::new(1.0, 1.0), &[Control::Clear, Control::PlacePoint]), now);
        assert_eq!(b.geometry().len(), 1);
    }

    #[test]
    fn held_finalize_respects_cooldown() {
        let mut b = TrackBuilder::new(Box::new(MemoryTrackPort::new()));
        let start = Instant::now();
        b.behaviour(&at(Vec2::new(1.0, 1.0), &[Control::PlacePoint]), start);
        let finalize = ControlState::with(&[Control::FinalizeToggle]);
        for ms in [0u64, 100, 200, 300, 400, 500] {
            b.behaviour(&finalize, start + Duration::from_millis(ms));
        }
        assert!(b.geometry().is_finalized());
        b.behaviour(&finalize, start + Duration::from_millis(600));
        assert!(!b.geometry().is_finalized());
    }

    struct FailingPort;

    impl TrackPort for FailingPort {
        fn save(&mut self, _track: &TrackFile) -> Result<Option<PathBuf>, TrackError> {
            Err(TrackError::Io(std::io::Error::other("disk full")))
        }

        fn load(&mut self) -> Result<Option<TrackFile>, TrackError> {
            Err(TrackError::Io(std::io::Error::other("gone")))
        }
    }

    #[test]
    fn failing_port_never_corrupts_geometry() {
        let mut b = TrackBuilder::new(Box::new(FailingPort));
        let now = Instant::now();
        b.behaviour(&at(Vec2::new(1.0, 1.0), &[Control::PlacePoint]), now);
        b.behaviour(&ControlState::with(&[Control::Save]), now);
        assert_eq!(b.geometry().len(), 1);
        b.behaviour(&ControlState::with(&[Control::Load]), now);
        assert!(b.geometry().is_empty());
    }
}
