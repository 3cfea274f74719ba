use crate::renderer::{DebugTextRenderer, RenderConfig, RenderView, Renderer};
use drivebox_kernel::{FrameInfo, Presenter, World};
use tracing::{debug, info};

/// Presenter for runs without a window: writes frames to the log.
///
/// Every `log_every` ticks the full debug dump goes out at `debug` and one
/// summary line per car at `info`.
#[derive(Debug)]
pub struct HeadlessPresenter {
    renderer: DebugTextRenderer,
    view: RenderView,
    log_every: u64,
    frames: u64,
    last: Option<String>,
}

impl HeadlessPresenter {
    pub fn new(config: &RenderConfig) -> Self {
        Self {
            renderer: DebugTextRenderer::new(),
            view: config.view(),
            log_every: 60,
            frames: 0,
            last: None,
        }
    }

    /// Log every `ticks` frames; zero is treated as one.
    pub fn with_log_every(mut self, ticks: u64) -> Self {
        self.log_every = ticks.max(1);
        self
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// The most recent dump that was logged.
    pub fn last_dump(&self) -> Option<&str> {
        self.last.as_deref()
    }
}

impl Presenter for HeadlessPresenter {
    fn present(&mut self, world: &World, frame: &FrameInfo) {
        self.frames += 1;
        if frame.tick % self.log_every != 0 {
            return;
        }
        self.view.fps = Some(frame.fps);
        let dump = self.renderer.render(world, &self.view);
        debug!("{}", dump.trim_end());
        for car in world.cars() {
            let state = car.state();
            info!(
                tick = frame.tick,
                x = state.position.x,
                y = state.position.y,
                heading = state.heading,
                speed = state.speed,
                rpm = state.rpm,
                "car"
            );
        }
        self.last = Some(dump);
    }

    fn shutdown(&mut self) {
        info!(frames = self.frames, "headless presenter closed");
    }
}
