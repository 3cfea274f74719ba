use drivebox_common::EntityId;
use drivebox_input::ControlState;
use std::time::Instant;

use crate::entity::{Car, Entity};

/// The entities of one sandbox run and the tick counter.
///
/// Entities are kept in spawn order, which is also update and draw order:
/// spawn scenery before the cars that drive on it.
#[derive(Debug, Default)]
pub struct World {
    entities: Vec<(EntityId, Entity)>,
    tick: u64,
    /// Simulated seconds, the sum of every `dt` stepped.
    elapsed: f64,
}

impl World {
    /// Create an empty world at tick 0.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current simulation tick.
    pub fn tick(&self) -> u64 {
        self.tick
    }

    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    /// Number of entities in the world.
    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    /// All entities in spawn order.
    pub fn entities(&self) -> impl Iterator<Item = (EntityId, &Entity)> {
        self.entities.iter().map(|(id, e)| (*id, e))
    }

    /// Add an entity. Returns its id.
    pub fn spawn(&mut self, entity: Entity) -> EntityId {
        let id = EntityId::new();
        tracing::debug!("spawned {} {}", entity.kind(), id.short());
        self.entities.push((id, entity));
        id
    }

    /// Remove an entity. Returns it if it existed.
    pub fn despawn(&mut self, id: EntityId) -> Option<Entity> {
        let index = self.entities.iter().position(|(e, _)| *e == id)?;
        Some(self.entities.remove(index).1)
    }

    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        self.entities.iter().find(|(e, _)| *e == id).map(|(_, e)| e)
    }

    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.entities
            .iter_mut()
            .find(|(e, _)| *e == id)
            .map(|(_, e)| e)
    }

    /// Every car, in spawn order.
    pub fn cars(&self) -> impl Iterator<Item = &Car> {
        self.entities.iter().filter_map(|(_, e)| e.as_car())
    }

    /// Advance every entity by one tick of `dt` seconds.
    pub fn step(&mut self, controls: &ControlState, dt: f32, now: Instant) {
        for (_, entity) in &mut self.entities {
            entity.behaviour(controls, dt, now);
        }
        self.tick += 1;
        self.elapsed += f64::from(dt.max(0.0));
    }
}
