//! Hexagonal tessellation
//!
//! Pointy-top hexagons with circumradius `r`: each is `√3·r` wide, rows sit
//! `1.5·r` apart and odd rows are shifted right by half a hexagon width so
//! neighbors share edges.

use crate::draw::DrawInstruction;
use crate::geometry::{Point, RenderContext, sweep};

use super::PatternStyle;

/// The six vertices of a pointy-top hexagon, clockwise from the top
pub fn hexagon_vertices(center: Point, radius: f32) -> [Point; 6] {
    let half_width = 3f32.sqrt() * radius / 2.0;
    let Point { x, y } = center;
    [
        Point::new(x, y - radius),
        Point::new(x + half_width, y - radius / 2.0),
        Point::new(x + half_width, y + radius / 2.0),
        Point::new(x, y + radius),
        Point::new(x - half_width, y + radius / 2.0),
        Point::new(x - half_width, y - radius / 2.0),
    ]
}

/// Whole hexagons that fit inside the drawable area, row by row
pub(crate) fn draw_hexagonal(
    ctx: &RenderContext,
    radius: f32,
    style: &PatternStyle,
) -> Vec<DrawInstruction> {
    let width = 3f32.sqrt() * radius;
    let stroke = style.stroke();

    let mut instructions = Vec::new();
    let rows = sweep(ctx.top() + radius, ctx.bottom() - radius, 1.5 * radius);
    for (row, cy) in rows.enumerate() {
        let shift = if row % 2 == 1 { width / 2.0 } else { 0.0 };
        let first = ctx.left() + width / 2.0 + shift;
        for cx in sweep(first, ctx.right() - width / 2.0, width) {
            let vertices = hexagon_vertices(Point::new(cx, cy), radius);
            instructions.push(DrawInstruction::outline(vertices.to_vec(), stroke));
        }
    }
    instructions
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Size;

    fn polygons(instructions: &[DrawInstruction]) -> Vec<Vec<Point>> {
        instructions
            .iter()
            .map(|i| match i {
                DrawInstruction::Polygon { points, fill, .. } => {
                    assert!(fill.is_none());
                    points.clone()
                }
                other => panic!("unexpected {:?}", other),
            })
            .collect()
    }

    #[test]
    fn test_hexagons_have_six_equal_sides() {
        let vertices = hexagon_vertices(Point::new(0.0, 0.0), 5.0);
        for i in 0..6 {
            let side = vertices[i].distance(vertices[(i + 1) % 6]);
            assert!((side - 5.0).abs() < 1e-4);
        }
    }

    #[test]
    fn test_hexagons_inside_area() {
        let ctx = RenderContext::new(Size::new(148.0, 210.0), 10.0, 10.0, 15.0, 10.0).unwrap();
        let rect = ctx.rect();
        let hexagons = polygons(&draw_hexagonal(&ctx, 5.0, &PatternStyle::default()));
        assert!(!hexagons.is_empty());
        for hexagon in &hexagons {
            assert_eq!(hexagon.len(), 6);
            assert!(hexagon.iter().all(|p| rect.contains(*p)));
        }
    }

    #[test]
    fn test_odd_rows_shifted_by_half_width() {
        let ctx = RenderContext::new(Size::new(100.0, 100.0), 0.0, 0.0, 0.0, 0.0).unwrap();
        let hexagons = polygons(&draw_hexagonal(&ctx, 4.0, &PatternStyle::default()));
        let width = 3f32.sqrt() * 4.0;

        // Top vertex of the first hexagon in row 0 and row 1
        let row0 = hexagons[0][0];
        let row1 = hexagons
            .iter()
            .map(|h| h[0])
            .find(|p| (p.y - row0.y - 6.0).abs() < 1e-4)
            .unwrap();
        assert!((row1.x - row0.x - width / 2.0).abs() < 1e-4);
    }
}
