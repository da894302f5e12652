//! Dot grid pattern (bullet journal)

use crate::constants::EPSILON_MM;
use crate::draw::DrawInstruction;
use crate::geometry::{Point, RenderContext, sweep};

use super::PatternStyle;

/// Dots at every `spacing` step in both axes.
///
/// The grid is centered: the leftover of each axis is split evenly between
/// both ends, so dots only touch the boundary when the spacing divides the
/// area exactly.
pub(crate) fn draw_dotted(
    ctx: &RenderContext,
    spacing: f32,
    radius: f32,
    style: &PatternStyle,
) -> Vec<DrawInstruction> {
    let left = ctx.left() + inset(ctx.width(), spacing);
    let top = ctx.top() + inset(ctx.height(), spacing);
    let columns: Vec<f32> = sweep(left, ctx.right(), spacing).collect();

    sweep(top, ctx.bottom(), spacing)
        .flat_map(|y| {
            columns
                .iter()
                .map(move |&x| DrawInstruction::dot(Point::new(x, y), radius, style.color))
        })
        .collect()
}

/// Half of what remains of `length` after whole spacing steps
fn inset(length: f32, spacing: f32) -> f32 {
    let steps = ((length + EPSILON_MM) / spacing).floor();
    ((length - steps * spacing) / 2.0).max(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Size;

    #[test]
    fn test_dot_grid_count() {
        // 100 x 50 area, 5mm spacing: 21 columns, 11 rows
        let ctx = RenderContext::new(Size::new(120.0, 70.0), 10.0, 10.0, 10.0, 10.0).unwrap();
        let dots = draw_dotted(&ctx, 5.0, 0.25, &PatternStyle::default());
        assert_eq!(dots.len(), 21 * 11);
    }

    #[test]
    fn test_dots_inside_area() {
        let ctx = RenderContext::new(Size::new(148.0, 210.0), 10.0, 10.0, 15.0, 10.0).unwrap();
        let rect = ctx.rect();
        let dots = draw_dotted(&ctx, 7.0, 0.25, &PatternStyle::default());
        for dot in &dots {
            match dot {
                DrawInstruction::Circle {
                    center,
                    fill,
                    stroke,
                    ..
                } => {
                    assert!(rect.contains(*center));
                    assert!(fill.is_some());
                    assert!(stroke.is_none());
                }
                other => panic!("unexpected instruction {:?}", other),
            }
        }
        // 123 mm wide leaves 4 mm, 190 mm high leaves 1 mm
        assert_eq!(
            dots[0],
            DrawInstruction::dot(Point::new(17.0, 10.5), 0.25, PatternStyle::default().color)
        );
    }

    fn centers(dots: &[DrawInstruction]) -> Vec<Point> {
        dots.iter()
            .map(|d| match d {
                DrawInstruction::Circle { center, .. } => *center,
                other => panic!("unexpected instruction {:?}", other),
            })
            .collect()
    }

    #[test]
    fn test_grid_is_inset_when_spacing_does_not_divide() {
        // 100 x 50 area at (10, 10); 7mm fits 14 steps across and 7 down
        let ctx = RenderContext::new(Size::new(120.0, 70.0), 10.0, 10.0, 10.0, 10.0).unwrap();
        let centers = centers(&draw_dotted(&ctx, 7.0, 0.25, &PatternStyle::default()));
        assert_eq!(centers.len(), 15 * 8);

        let on_edge = centers
            .iter()
            .filter(|p| {
                (p.x - ctx.left()).abs() < 1e-3
                    || (p.x - ctx.right()).abs() < 1e-3
                    || (p.y - ctx.top()).abs() < 1e-3
                    || (p.y - ctx.bottom()).abs() < 1e-3
            })
            .count();
        assert_eq!(on_edge, 0);

        // Leftover split evenly between both ends
        let min_x = centers.iter().map(|p| p.x).fold(f32::INFINITY, f32::min);
        let max_x = centers.iter().map(|p| p.x).fold(f32::NEG_INFINITY, f32::max);
        let min_y = centers.iter().map(|p| p.y).fold(f32::INFINITY, f32::min);
        let max_y = centers.iter().map(|p| p.y).fold(f32::NEG_INFINITY, f32::max);
        assert!((min_x - 11.0).abs() < 1e-3 && (max_x - 109.0).abs() < 1e-3);
        assert!((min_y - 10.5).abs() < 1e-3 && (max_y - 59.5).abs() < 1e-3);
    }

    #[test]
    fn test_grid_touches_edges_when_spacing_divides() {
        let ctx = RenderContext::new(Size::new(120.0, 70.0), 10.0, 10.0, 10.0, 10.0).unwrap();
        let centers = centers(&draw_dotted(&ctx, 5.0, 0.25, &PatternStyle::default()));
        assert_eq!(centers[0], Point::new(10.0, 10.0));
        assert_eq!(*centers.last().unwrap(), Point::new(110.0, 60.0));
    }
}
