use drivebox_common::Pose;
use drivebox_input::ControlState;
use drivebox_track::{TrackBuilder, TrackGeometry};
use drivebox_vehicle::{Telemetry, VehicleModel, VehicleState};
use std::time::Instant;

/// A driveable car: its state plus the model that advances it.
#[derive(Debug, Clone)]
pub struct Car {
    state: VehicleState,
    model: VehicleModel,
}

impl Car {
    pub fn new(pose: Pose, model: VehicleModel) -> Self {
        Self {
            state: VehicleState::at(pose),
            model,
        }
    }

    pub fn state(&self) -> &VehicleState {
        &self.state
    }

    pub fn telemetry(&self) -> Telemetry {
        self.state.telemetry()
    }

    pub fn behaviour(&mut self, controls: &ControlState, dt: f32) {
        self.state = self.model.step(&self.state, controls, dt);
    }
}

/// Everything that can live in a sandbox world.
#[derive(Debug)]
pub enum Entity {
    Car(Car),
    /// Editable track driven by builder controls.
    TrackBuilder(TrackBuilder),
    /// Read-only scenery, e.g. a loaded track to drive on.
    Track(TrackGeometry),
}

/// What a presenter needs to draw one entity.
#[derive(Debug, Clone, Copy)]
pub enum RenderState<'a> {
    Car { pose: Pose, telemetry: Telemetry },
    Track(&'a TrackGeometry),
}

impl Entity {
    pub fn kind(&self) -> &'static str {
        match self {
            Entity::Car(_) => "car",
            Entity::TrackBuilder(_) => "track-builder",
            Entity::Track(_) => "track",
        }
    }

    /// Advance this entity by one tick.
    pub fn behaviour(&mut self, controls: &ControlState, dt: f32, now: Instant) {
        match self {
            Entity::Car(car) => car.behaviour(controls, dt),
            Entity::TrackBuilder(builder) => builder.behaviour(controls, now),
            Entity::Track(_) => {}
        }
    }

    pub fn render_state(&self) -> RenderState<'_> {
        match self {
            Entity::Car(car) => RenderState::Car {
                pose: car.state().pose(),
                telemetry: car.telemetry(),
            },
            Entity::TrackBuilder(builder) => RenderState::Track(builder.geometry()),
            Entity::Track(track) => RenderState::Track(track),
        }
    }

    pub fn as_car(&self) -> Option<&Car> {
        match self {
            Entity::Car(car) => Some(car),
            _ => None,
        }
    }

    pub fn as_track(&self) -> Option<&TrackGeometry> {
        match self {
            Entity::TrackBuilder(builder) => Some(builder.geometry()),
            Entity::Track(track) => Some(track),
            Entity::Car(_) => None,
        }
    }
}
