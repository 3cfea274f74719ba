use drivebox_kernel::{RenderState, World};
use glam::{UVec2, Vec2};
use std::fmt::Write;

/// How the presentation side was asked to start.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderConfig {
    /// Window size in pixels.
    pub resolution: UVec2,
    /// No window: frames go to the log instead.
    pub headless: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            resolution: UVec2::new(1280, 720),
            headless: false,
        }
    }
}

impl RenderConfig {
    pub fn view(&self) -> RenderView {
        RenderView {
            size: self.resolution.as_vec2(),
            fps: None,
        }
    }
}

/// Per-frame view parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderView {
    /// Visible area in world pixels, origin top-left.
    pub size: Vec2,
    /// Measured frame rate for the overlay, if known.
    pub fps: Option<f32>,
}

impl Default for RenderView {
    fn default() -> Self {
        RenderConfig::default().view()
    }
}

/// Renderer-agnostic interface. All renderers implement this trait.
///
/// The renderer reads world state and a view, then produces output. It
/// never mutates the world.
pub trait Renderer {
    /// The output type produced by this renderer.
    type Output;

    /// Render one frame from the given world state and view.
    fn render(&self, world: &World, view: &RenderView) -> Self::Output;
}

/// Human-readable dump of the world, for logs and the CLI.
#[derive(Debug, Default)]
pub struct DebugTextRenderer;

impl DebugTextRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl Renderer for DebugTextRenderer {
    type Output = String;

    fn render(&self, world: &World, view: &RenderView) -> String {
        let mut out = String::new();
        let _ = writeln!(
            out,
            "=== Sandbox (tick={}, elapsed={:.2}s) ===",
            world.tick(),
            world.elapsed()
        );
        let _ = write!(out, "Entities: {}", world.entity_count());
        if let Some(fps) = view.fps {
            let _ = write!(out, "  FPS: {fps:.2}");
        }
        out.push('\n');

        for (id, entity) in world.entities() {
            match entity.render_state() {
                RenderState::Car { pose, telemetry } => {
                    let _ = writeln!(
                        out,
                        "  [{}] car pos=({:.2}, {:.2}) heading={:.1} speed={:.2} rpm={:.2} max_angle={:.2}",
                        id.short(),
                        pose.position.x,
                        pose.position.y,
                        pose.heading,
                        telemetry.speed,
                        telemetry.rpm,
                        telemetry.max_turn_angle
                    );
                }
                RenderState::Track(track) => {
                    let _ = writeln!(
                        out,
                        "  [{}] {} points={} edges={} finalized={} length={:.1}",
                        id.short(),
                        entity.kind(),
                        track.len(),
                        track.edges().len(),
                        track.is_finalized(),
                        track.length()
                    );
                }
            }
        }

        out
    }
}
