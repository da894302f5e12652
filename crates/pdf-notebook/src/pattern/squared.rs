//! Squared pattern (cuadrícula)

use crate::draw::DrawInstruction;
use crate::geometry::RenderContext;

use super::PatternStyle;
use super::lined::{horizontal_rules, vertical_rules};

/// Two orthogonal sweeps: vertical lines first, then horizontal lines
pub(crate) fn draw_squared(
    ctx: &RenderContext,
    grid_size: f32,
    style: &PatternStyle,
) -> Vec<DrawInstruction> {
    let stroke = style.stroke();
    let (left, right, top, bottom) = (ctx.left(), ctx.right(), ctx.top(), ctx.bottom());

    vertical_rules(left, right, top, bottom, grid_size, stroke)
        .chain(horizontal_rules(left, right, top, bottom, grid_size, stroke))
        .collect()
}
