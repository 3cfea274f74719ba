//! Rendering adapter: turns world state into something a backend can draw.
//!
//! # Invariants
//! - Renderers read the world; they never mutate it.
//! - No pixel data lives here. Backends (egui painter, text log) consume
//!   draw lists or strings.
//! - Headless is an explicit [`RenderConfig`] flag, never process state.

pub mod presenter;
pub mod renderer;
pub mod scene;

pub use presenter::HeadlessPresenter;
pub use renderer::{DebugTextRenderer, RenderConfig, RenderView, Renderer};
pub use scene::{Anchor, CAR_SIZE, Color, DrawList, Primitive, SceneRenderer, car_corners};

pub fn crate_info() -> &'static str {
    concat!(env!("CARGO_PKG_NAME"), " v", env!("CARGO_PKG_VERSION"))
}
