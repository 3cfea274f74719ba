use drivebox_render::{Anchor, Color, DrawList, Primitive};
use egui::{Align2, Color32, FontId, Painter, Pos2, Shape, Stroke};
use glam::Vec2;

const HUD_FONT_SIZE: f32 = 20.0;

pub fn color32(color: Color) -> Color32 {
    let [r, g, b, a] = color.rgba();
    Color32::from_rgba_unmultiplied(r, g, b, a)
}

pub fn clear_color(color: Color) -> wgpu::Color {
    let [r, g, b, a] = color.rgba();
    wgpu::Color {
        r: f64::from(r) / 255.0,
        g: f64::from(g) / 255.0,
        b: f64::from(b) / 255.0,
        a: f64::from(a) / 255.0,
    }
}

fn pos(v: Vec2) -> Pos2 {
    egui::pos2(v.x, v.y)
}

fn align(anchor: Anchor) -> Align2 {
    match anchor {
        Anchor::TopLeft => Align2::LEFT_TOP,
        Anchor::TopRight => Align2::RIGHT_TOP,
    }
}

/// Paint `list` in order. Coordinates are egui points, i.e. logical pixels.
pub fn paint_draw_list(painter: &Painter, list: &DrawList) {
    for primitive in &list.primitives {
        match primitive {
            Primitive::Line {
                from,
                to,
                width,
                color,
            } => {
                painter.line_segment([pos(*from), pos(*to)], Stroke::new(*width, color32(*color)));
            }
            Primitive::Circle {
                center,
                radius,
                color,
            } => {
                painter.circle_filled(pos(*center), *radius, color32(*color));
            }
            Primitive::Quad { corners, color } => {
                let points = corners.iter().copied().map(pos).collect();
                painter.add(Shape::convex_polygon(points, color32(*color), Stroke::NONE));
            }
            Primitive::Text {
                position,
                anchor,
                text,
                color,
            } => {
                painter.text(
                    pos(*position),
                    align(*anchor),
                    text,
                    FontId::proportional(HUD_FONT_SIZE),
                    color32(*color),
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_maps_to_opaque_egui_colours() {
        assert_eq!(color32(Color::Red), Color32::from_rgb(255, 0, 0));
        assert_eq!(color32(Color::Gray), Color32::from_rgb(128, 128, 128));
    }

    #[test]
    fn white_background_clears_to_white() {
        let c = clear_color(Color::White);
        assert_eq!((c.r, c.g, c.b, c.a), (1.0, 1.0, 1.0, 1.0));
    }

    #[test]
    fn anchors_map_to_alignment() {
        assert_eq!(align(Anchor::TopLeft), Align2::LEFT_TOP);
        assert_eq!(align(Anchor::TopRight), Align2::RIGHT_TOP);
    }
}
