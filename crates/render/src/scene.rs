use crate::renderer::{RenderView, Renderer};
use drivebox_common::heading_vector;
use drivebox_kernel::{RenderState, World};
use drivebox_track::TrackGeometry;
use glam::Vec2;

/// Car body footprint in pixels: width across, length along the heading.
pub const CAR_SIZE: Vec2 = Vec2::new(22.0, 44.0);

const OPEN_EDGE_WIDTH: f32 = 5.0;
const OPEN_POINT_RADIUS: f32 = 7.0;
const ROAD_WIDTH: f32 = 60.0;
const HUD_ORIGIN: Vec2 = Vec2::new(10.0, 10.0);
const HUD_LINE_STEP: f32 = 26.0;
const FPS_INSET: f32 = 10.0;

/// Palette the draw list refers to. Backends map these to their own colour type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color {
    White,
    Black,
    Red,
    Green,
    Gray,
    Blue,
    CarBody,
}

impl Color {
    pub fn rgba(self) -> [u8; 4] {
        match self {
            Color::White => [255, 255, 255, 255],
            Color::Black => [0, 0, 0, 255],
            Color::Red => [255, 0, 0, 255],
            Color::Green => [0, 255, 0, 255],
            Color::Gray => [128, 128, 128, 255],
            Color::Blue => [0, 0, 255, 255],
            Color::CarBody => [200, 40, 40, 255],
        }
    }
}

/// Which corner of the text box `position` names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    TopLeft,
    TopRight,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Primitive {
    Line {
        from: Vec2,
        to: Vec2,
        width: f32,
        color: Color,
    },
    /// Filled disc.
    Circle {
        center: Vec2,
        radius: f32,
        color: Color,
    },
    /// Filled convex quad, corners in winding order.
    Quad { corners: [Vec2; 4], color: Color },
    Text {
        position: Vec2,
        anchor: Anchor,
        text: String,
        color: Color,
    },
}

/// One frame's worth of primitives, painted back to front.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawList {
    pub background: Color,
    pub primitives: Vec<Primitive>,
}

impl DrawList {
    pub fn new(background: Color) -> Self {
        Self {
            background,
            primitives: Vec::new(),
        }
    }

    pub fn push(&mut self, primitive: Primitive) {
        self.primitives.push(primitive);
    }

    pub fn len(&self) -> usize {
        self.primitives.len()
    }

    pub fn is_empty(&self) -> bool {
        self.primitives.is_empty()
    }

    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.primitives.iter().filter_map(|p| match p {
            Primitive::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }
}

/// Corners of a `size` rectangle centred on `center` and rotated to `heading`.
///
/// Order: front-left, front-right, rear-right, rear-left.
pub fn car_corners(center: Vec2, heading: f32, size: Vec2) -> [Vec2; 4] {
    let forward = heading_vector(heading) * (size.y * 0.5);
    let right = heading_vector(heading + 90.0) * (size.x * 0.5);
    [
        center + forward - right,
        center + forward + right,
        center - forward + right,
        center - forward - right,
    ]
}

/// Builds a [`DrawList`] in entity spawn order, then the HUD on top.
#[derive(Debug, Clone)]
pub struct SceneRenderer {
    pub background: Color,
    pub car_size: Vec2,
}

impl Default for SceneRenderer {
    fn default() -> Self {
        Self {
            background: Color::White,
            car_size: CAR_SIZE,
        }
    }
}

impl SceneRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    fn draw_track(&self, list: &mut DrawList, track: &TrackGeometry) {
        let (width, radius, edge_color, point_color) = if track.is_finalized() {
            (ROAD_WIDTH, ROAD_WIDTH * 0.5, Color::Gray, Color::Gray)
        } else {
            (OPEN_EDGE_WIDTH, OPEN_POINT_RADIUS, Color::Red, Color::Green)
        };
        for edge in track.edges() {
            list.push(Primitive::Line {
                from: edge.start,
                to: edge.end,
                width,
                color: edge_color,
            });
        }
        // Discs round off the joints between thick segments.
        for &center in track.points() {
            list.push(Primitive::Circle {
                center,
                radius,
                color: point_color,
            });
        }
    }
}

impl Renderer for SceneRenderer {
    type Output = DrawList;

    fn render(&self, world: &World, view: &RenderView) -> DrawList {
        let mut list = DrawList::new(self.background);
        let mut hud = Vec::new();

        for (_, entity) in world.entities() {
            match entity.render_state() {
                RenderState::Track(track) => self.draw_track(&mut list, track),
                RenderState::Car { pose, telemetry } => {
                    list.push(Primitive::Quad {
                        corners: car_corners(pose.position, pose.heading, self.car_size),
                        color: Color::CarBody,
                    });
                    list.push(Primitive::Line {
                        from: pose.position,
                        to: pose.position + pose.forward() * (self.car_size.y * 0.5),
                        width: 2.0,
                        color: Color::Blue,
                    });
                    hud.extend(telemetry.overlay_lines());
                }
            }
        }

        for (i, text) in hud.into_iter().enumerate() {
            list.push(Primitive::Text {
                position: HUD_ORIGIN + Vec2::new(0.0, HUD_LINE_STEP * i as f32),
                anchor: Anchor::TopLeft,
                text,
                color: Color::Black,
            });
        }
        if let Some(fps) = view.fps {
            list.push(Primitive::Text {
                position: Vec2::new(view.size.x - FPS_INSET, HUD_ORIGIN.y),
                anchor: Anchor::TopRight,
                text: format!("FPS: {fps:.2}"),
                color: Color::Black,
            });
        }

        list
    }
}
