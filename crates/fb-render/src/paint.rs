//! Grid scene nodes → Vello drawing commands.
//!
//! Emits fills, gradients, strokes and drop shadows for the nodes a
//! surface holds. Shapes are built in local coordinates and placed with
//! one translation, so gradient coordinates stay shape-relative.

use fb_core::model::{
    Bounds, Color, FillStyle, GradientKind, NodeKind, Point, SceneNode, Shadow, ShapeGeometry,
    ShapeSpec, Stroke,
};
use kurbo::{Affine, BezPath, Rect, Stroke as KurboStroke};
use peniko::{Brush, Fill, Gradient};
use vello::Scene;

/// Clear the surface to its background color.
pub fn paint_background(scene: &mut Scene, width: u32, height: u32, background: Color) {
    let rect = Rect::new(0.0, 0.0, width as f64, height as f64);
    scene.fill(Fill::NonZero, Affine::IDENTITY, to_peniko(background), None, &rect);
}

/// Paint the given nodes, in order, shifted by the owning group's position.
pub fn paint_nodes<'a>(
    scene: &mut Scene,
    nodes: impl IntoIterator<Item = &'a SceneNode>,
    offset: Point,
) {
    for node in nodes {
        paint_node(scene, node, offset);
    }
}

fn paint_node(scene: &mut Scene, node: &SceneNode, offset: Point) {
    match &node.kind {
        NodeKind::Group { .. } => {}
        NodeKind::Container {
            bounds,
            stroke,
            shadow,
        } => paint_container(scene, bounds, stroke, shadow.as_ref(), offset),
        NodeKind::Shape { spec, fill } => paint_shape(scene, spec, fill, offset),
    }
}

// ─── Node painters ───────────────────────────────────────────────────────

/// Transparent box with a border. The shadow follows the border only,
/// as it does for an unfilled canvas rectangle.
fn paint_container(
    scene: &mut Scene,
    bounds: &Bounds,
    stroke: &Stroke,
    shadow: Option<&Shadow>,
    offset: Point,
) {
    let rect = Rect::new(0.0, 0.0, bounds.width, bounds.height);
    let transform = Affine::translate((offset.x + bounds.x, offset.y + bounds.y));

    if let Some(shadow) = shadow {
        let halo = KurboStroke::new(stroke.width + shadow.blur);
        scene.stroke(
            &halo,
            transform * Affine::translate((shadow.offset_x, shadow.offset_y)),
            to_peniko(shadow.color),
            None,
            &rect,
        );
    }
    scene.stroke(
        &KurboStroke::new(stroke.width),
        transform,
        to_peniko(stroke.color),
        None,
        &rect,
    );
}

fn paint_shape(scene: &mut Scene, spec: &ShapeSpec, fill: &FillStyle, offset: Point) {
    let transform = Affine::translate((offset.x + spec.position.x, offset.y + spec.position.y));

    if let Some(shadow) = fill.shadow() {
        paint_shadow(scene, &spec.geometry, shadow, transform);
    }

    let brush = to_brush(fill);
    match &spec.geometry {
        ShapeGeometry::Rect { width, height } => {
            let rect = Rect::new(0.0, 0.0, *width, *height);
            scene.fill(Fill::NonZero, transform, &brush, None, &rect);
        }
        ShapeGeometry::Polygon { vertices } => {
            if let Some(path) = polygon_path(vertices) {
                scene.fill(Fill::NonZero, transform, &brush, None, &path);
            }
        }
    }
}

/// Rectangles get a true gaussian shadow; polygons get a hard offset
/// silhouette since Vello only blurs rounded rectangles.
fn paint_shadow(scene: &mut Scene, geometry: &ShapeGeometry, shadow: &Shadow, transform: Affine) {
    let shifted = transform * Affine::translate((shadow.offset_x, shadow.offset_y));
    match geometry {
        ShapeGeometry::Rect { width, height } => {
            scene.draw_blurred_rounded_rect(
                shifted,
                Rect::new(0.0, 0.0, *width, *height),
                to_peniko(shadow.color),
                0.0,
                shadow.blur / 2.0,
            );
        }
        ShapeGeometry::Polygon { vertices } => {
            if let Some(path) = polygon_path(vertices) {
                scene.fill(Fill::NonZero, shifted, to_peniko(shadow.color), None, &path);
            }
        }
    }
}

// ─── Helpers ─────────────────────────────────────────────────────────────

/// Closed path through the vertices; `None` for degenerate input.
pub fn polygon_path(vertices: &[Point]) -> Option<BezPath> {
    let (first, rest) = vertices.split_first()?;
    if rest.len() < 2 {
        return None;
    }
    let mut bez = BezPath::new();
    bez.move_to((first.x, first.y));
    for v in rest {
        bez.line_to((v.x, v.y));
    }
    bez.close_path();
    Some(bez)
}

pub fn to_peniko(c: Color) -> peniko::Color {
    let [r, g, b, a] = c.to_rgba8();
    peniko::Color::from_rgba8(r, g, b, a)
}

/// Brush for a fill, in the shape's local coordinates.
pub fn to_brush(fill: &FillStyle) -> Brush {
    match fill {
        FillStyle::Solid { color } | FillStyle::ShadowedSolid { color, .. } => {
            Brush::Solid(to_peniko(*color))
        }
        FillStyle::Gradient { kind, stops } => {
            let gradient = match *kind {
                GradientKind::Linear { x1, y1, x2, y2 } => Gradient::new_linear((x1, y1), (x2, y2)),
                GradientKind::Radial { cx, cy, r0, r1 } => {
                    Gradient::new_two_point_radial((cx, cy), r0 as f32, (cx, cy), r1 as f32)
                }
            };
            let stops: Vec<(f32, peniko::Color)> = stops
                .iter()
                .map(|s| (s.offset, to_peniko(s.color)))
                .collect();
            Brush::Gradient(gradient.with_stops(stops.as_slice()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn degenerate_polygons_have_no_path() {
        assert!(polygon_path(&[]).is_none());
        assert!(polygon_path(&[Point::new(0.0, 0.0), Point::new(1.0, 1.0)]).is_none());
        let tri = polygon_path(&[
            Point::new(0.0, 0.0),
            Point::new(1.0, 0.0),
            Point::new(0.0, 1.0),
        ])
        .unwrap();
        // move + 2 lines + close
        assert_eq!(tri.elements().len(), 4);
    }

    #[test]
    fn solid_brush_keeps_channels() {
        let brush = to_brush(&FillStyle::Solid {
            color: Color::rgba(1.0, 0.0, 0.0, 1.0),
        });
        assert_eq!(brush, Brush::Solid(peniko::Color::from_rgba8(255, 0, 0, 255)));
    }

    #[test]
    fn gradient_brush_carries_every_stop() {
        let fill = fb_core::style::gradient(2, 30.0);
        let Brush::Gradient(g) = to_brush(&fill) else {
            panic!("expected gradient brush");
        };
        assert_eq!(g.stops.len(), 3);
    }
}
