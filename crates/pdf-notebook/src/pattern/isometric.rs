//! Isometric (triangular) grid for technical drawing

use crate::constants::EPSILON_MM;
use crate::draw::DrawInstruction;
use crate::geometry::{Point, RenderContext, clip_line};

use super::PatternStyle;

/// Three families of parallel lines at 0°, θ and 180° - θ from horizontal.
///
/// Every family passes through the top-left corner of the drawable area and
/// is spaced `spacing` apart measured perpendicular to its lines, so the
/// families meet in common lattice points.
pub(crate) fn draw_isometric(
    ctx: &RenderContext,
    spacing: f32,
    angle_deg: f32,
    style: &PatternStyle,
) -> Vec<DrawInstruction> {
    let theta = angle_deg.to_radians();
    let stroke = style.stroke();
    let rect = ctx.rect();
    let origin = Point::new(ctx.left(), ctx.top());

    let mut instructions = Vec::new();
    for angle in [0.0, theta, std::f32::consts::PI - theta] {
        // y grows downward, so a counter-clockwise angle has a negative dy
        let dir = (angle.cos(), -angle.sin());
        let normal = (-dir.1, dir.0);

        let offsets = [
            (0.0, 0.0),
            (ctx.width(), 0.0),
            (0.0, ctx.height()),
            (ctx.width(), ctx.height()),
        ]
        .map(|(x, y)| x * normal.0 + y * normal.1);
        let lo = offsets.iter().copied().fold(f32::INFINITY, f32::min);
        let hi = offsets.iter().copied().fold(f32::NEG_INFINITY, f32::max);

        let mut k = (lo / spacing).ceil() as i64;
        loop {
            let offset = k as f32 * spacing;
            if offset > hi + EPSILON_MM {
                break;
            }
            let through = Point::new(origin.x + normal.0 * offset, origin.y + normal.1 * offset);
            if let Some((from, to)) = clip_line(through, dir, &rect) {
                instructions.push(DrawInstruction::line(from, to, stroke));
            }
            k += 1;
        }
    }
    instructions
}
