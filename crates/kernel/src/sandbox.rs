use drivebox_input::{ControlState, InputScript};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;

use crate::clock::SimulationClock;
use crate::world::World;

/// Where the loop gets its controls from.
pub trait InputSource {
    /// Drain pending platform events. Returns true if a quit was requested.
    fn drain_events(&mut self) -> bool;

    /// Controls held for this tick.
    fn controls(&mut self) -> ControlState;
}

/// Draws (or records) the world after each tick.
pub trait Presenter {
    fn present(&mut self, world: &World, frame: &FrameInfo);

    /// Release rendering resources. Called once, after the last frame.
    fn shutdown(&mut self) {}
}

/// Timing of the tick that was just taken.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameInfo {
    pub tick: u64,
    /// Seconds handed to the simulation.
    pub dt: f32,
    pub fps: f32,
}

/// Holds no controls and never asks to quit.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdleInput;

impl InputSource for IdleInput {
    fn drain_events(&mut self) -> bool {
        false
    }

    fn controls(&mut self) -> ControlState {
        ControlState::new()
    }
}

impl InputSource for InputScript {
    fn drain_events(&mut self) -> bool {
        false
    }

    fn controls(&mut self) -> ControlState {
        self.next_controls()
    }
}

/// The frame loop: events, clock, input, update, present, pace.
pub struct SandboxLoop {
    world: World,
    clock: SimulationClock,
    running: Arc<AtomicBool>,
    tick_limit: Option<u64>,
}

impl SandboxLoop {
    pub fn new(world: World, clock: SimulationClock) -> Self {
        Self {
            world,
            clock,
            running: Arc::new(AtomicBool::new(true)),
            tick_limit: None,
        }
    }

    /// Stop on its own after `ticks` ticks. A limit of zero never ticks.
    pub fn with_tick_limit(mut self, ticks: u64) -> Self {
        self.tick_limit = Some(ticks);
        if self.world.tick() >= ticks {
            self.stop();
        }
        self
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    pub fn clock(&self) -> &SimulationClock {
        &self.clock
    }

    /// Shared stop flag. Clearing it (e.g. from a signal handler) ends the loop.
    pub fn running_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.running)
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    pub fn stop(&self) {
        self.running.store(false, Ordering::SeqCst);
    }

    /// Take one tick at `now` with `controls`, without presenting.
    ///
    /// Event-driven front ends (a windowing event loop) call this directly and
    /// draw afterwards.
    pub fn advance(&mut self, controls: &ControlState, now: Instant) -> FrameInfo {
        let _span = tracing::info_span!("tick", tick = self.world.tick() + 1).entered();
        let dt = self.clock.tick(now);
        self.world.step(controls, dt, now);
        if let Some(limit) = self.tick_limit {
            if self.world.tick() >= limit {
                tracing::info!("tick limit {limit} reached");
                self.stop();
            }
        }
        FrameInfo {
            tick: self.world.tick(),
            dt,
            fps: self.clock.fps(),
        }
    }

    /// One full iteration. Returns `None` if a quit event arrived instead.
    pub fn frame(
        &mut self,
        input: &mut impl InputSource,
        presenter: &mut impl Presenter,
        now: Instant,
    ) -> Option<FrameInfo> {
        if input.drain_events() {
            tracing::info!("quit requested");
            self.stop();
            return None;
        }
        let controls = input.controls();
        let frame = self.advance(&controls, now);
        presenter.present(&self.world, &frame);
        Some(frame)
    }

    /// Run until stopped, pacing toward the clock's target rate.
    pub fn run(&mut self, input: &mut impl InputSource, presenter: &mut impl Presenter) {
        tracing::info!(tps = self.clock.tps(), "sandbox loop started");
        while self.is_running() {
            if self.frame(input, presenter, Instant::now()).is_none() {
                break;
            }
            if self.is_running() {
                self.clock.wait();
            }
        }
        presenter.shutdown();
        tracing::info!(
            ticks = self.world.tick(),
            elapsed = self.world.elapsed(),
            "sandbox loop stopped"
        );
    }
}
