use anyhow::{Context, Result};
use drivebox_common::Pose;
use drivebox_kernel::{Car, Entity, World};
use drivebox_track::{JsonTrackPort, LoadOutcome, TrackBuilder, TrackFile, TrackGeometry};
use drivebox_vehicle::{VehicleModel, VehicleParams};
use glam::{UVec2, Vec2};
use std::path::PathBuf;
use std::time::Instant;

/// What the sandbox starts with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Mode {
    /// One car, optionally on a loaded track.
    Drive,
    /// An editable track.
    Build,
}

/// Inputs to [`build_world`], lifted off the command line.
#[derive(Debug, Clone)]
pub struct WorldOptions {
    pub mode: Mode,
    pub track: Option<PathBuf>,
    pub save_dir: PathBuf,
    pub vehicle_config: Option<PathBuf>,
    pub resolution: UVec2,
}

impl WorldOptions {
    /// The file build mode saves to and loads from.
    pub fn track_path(&self) -> PathBuf {
        match &self.track {
            Some(path) => path.clone(),
            None => JsonTrackPort::in_dir(&self.save_dir).path().to_path_buf(),
        }
    }
}

pub fn build_world(options: &WorldOptions) -> Result<World> {
    let mut world = World::new();
    match options.mode {
        Mode::Drive => {
            let params = match &options.vehicle_config {
                Some(path) => VehicleParams::from_yaml_file(path)
                    .with_context(|| format!("loading vehicle config {}", path.display()))?,
                None => VehicleParams::default(),
            };

            let mut spawn = Pose::new(screen_centre(options.resolution), 0.0);
            let file = options.track.as_ref().and_then(|path| match TrackFile::read(path) {
                Ok(file) => Some((path, file)),
                Err(e) => {
                    tracing::warn!(
                        error = &e as &(dyn std::error::Error + 'static),
                        "skipping track {}",
                        path.display()
                    );
                    None
                }
            });
            if let Some((path, file)) = file {
                let mut track = TrackGeometry::from_points(file.to_points());
                track.toggle_finalized(Instant::now());
                if let Some(pose) = track.start_pose() {
                    spawn = pose;
                }
                tracing::info!(
                    points = track.len(),
                    length = track.length(),
                    "driving on {}",
                    path.display()
                );
                world.spawn(Entity::Track(track));
            }

            world.spawn(Entity::Car(Car::new(spawn, VehicleModel::new(params))));
        }
        Mode::Build => {
            let mut port = JsonTrackPort::new(options.track_path());
            let mut geometry = TrackGeometry::new();
            if port.path().exists() {
                if let LoadOutcome::Loaded(points) = geometry.load(&mut port) {
                    tracing::info!("resumed {} with {points} points", port.path().display());
                }
            }
            tracing::info!("building track at {}", port.path().display());
            world.spawn(Entity::TrackBuilder(TrackBuilder::with_geometry(
                geometry,
                Box::new(port),
            )));
        }
    }
    Ok(world)
}

/// Screen centre, used when there is no track to start on.
pub fn screen_centre(resolution: UVec2) -> Vec2 {
    resolution.as_vec2() * 0.5
}

#[cfg(test)]
mod tests {
    use super::*;
    use drivebox_kernel::RenderState;

    fn options(mode: Mode, dir: &std::path::Path) -> WorldOptions {
        WorldOptions {
            mode,
            track: None,
            save_dir: dir.to_path_buf(),
            vehicle_config: None,
            resolution: UVec2::new(1280, 720),
        }
    }

    #[test]
    fn drive_without_track_spawns_car_at_centre() {
        let dir = tempfile::tempdir().unwrap();
        let world = build_world(&options(Mode::Drive, dir.path())).unwrap();
        assert_eq!(world.entity_count(), 1);
        let car = world.cars().next().unwrap();
        assert_eq!(car.state().position, screen_centre(UVec2::new(1280, 720)));
        assert_eq!(car.state().heading, 0.0);
    }

    #[test]
    fn drive_on_track_spawns_finalized_track_then_car_at_start() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("oval.json");
        TrackFile::from_points(&[
            Vec2::new(100.0, 100.0),
            Vec2::new(200.0, 100.0),
            Vec2::new(200.0, 200.0),
        ])
        .write(&path)
        .unwrap();

        let mut opts = options(Mode::Drive, dir.path());
        opts.track = Some(path);
        let world = build_world(&opts).unwrap();

        let kinds: Vec<_> = world.entities().map(|(_, e)| e.kind()).collect();
        assert_eq!(kinds, vec!["track", "car"]);
        let (_, track) = world.entities().next().unwrap();
        match track.render_state() {
            RenderState::Track(geometry) => assert!(geometry.is_finalized()),
            other => panic!("expected a track, got {other:?}"),
        }
        let car = world.cars().next().unwrap();
        assert_eq!(car.state().position, Vec2::new(100.0, 100.0));
        assert!((car.state().heading - 90.0).abs() < 1e-3);
    }

    #[test]
    fn drive_with_unreadable_track_spawns_only_the_car() {
        let dir = tempfile::tempdir().unwrap();
        let broken = dir.path().join("broken.json");
        std::fs::write(&broken, "{ not json").unwrap();

        for track in [dir.path().join("missing.json"), broken] {
            let mut opts = options(Mode::Drive, dir.path());
            opts.track = Some(track);
            let world = build_world(&opts).unwrap();
            assert_eq!(world.entity_count(), 1);
            let car = world.cars().next().unwrap();
            assert_eq!(car.state().position, screen_centre(UVec2::new(1280, 720)));
        }
    }

    #[test]
    fn drive_uses_vehicle_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("car.yaml");
        std::fs::write(&path, "power_gain: 60\n").unwrap();
        let mut opts = options(Mode::Drive, dir.path());
        opts.vehicle_config = Some(path);
        assert!(build_world(&opts).is_ok());

        std::fs::write(dir.path().join("bad.yaml"), "rpm_min: 5\n").unwrap();
        opts.vehicle_config = Some(dir.path().join("bad.yaml"));
        assert!(build_world(&opts).is_err());
    }

    #[test]
    fn build_resumes_existing_default_track() {
        let dir = tempfile::tempdir().unwrap();
        let opts = options(Mode::Build, dir.path());
        assert_eq!(opts.track_path(), dir.path().join("default.json"));

        let empty = build_world(&opts).unwrap();
        assert_eq!(empty.entities().next().unwrap().1.kind(), "track-builder");
        assert_eq!(empty.entities().next().unwrap().1.as_track().unwrap().len(), 0);

        TrackFile::from_points(&[Vec2::ZERO, Vec2::new(5.0, 5.0)])
            .write(opts.track_path())
            .unwrap();
        let resumed = build_world(&opts).unwrap();
        let geometry = resumed.entities().next().unwrap().1.as_track().unwrap();
        assert_eq!(geometry.len(), 2);
        assert_eq!(geometry.edges().len(), 1);
    }
}
