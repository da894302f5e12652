//! Lined pattern (pauta)

use crate::constants::HEADER_GAP_MM;
use crate::draw::{DrawInstruction, StrokeStyle};
use crate::geometry::{Point, RenderContext, sweep};

use super::PatternStyle;

/// Horizontal rules from `ctx.top()` down to `ctx.bottom()`.
///
/// With a header line, the header sits on the top edge and the body rules
/// start `HEADER_GAP_MM` below it.
pub(crate) fn draw_lined(
    ctx: &RenderContext,
    spacing: f32,
    style: &PatternStyle,
) -> Vec<DrawInstruction> {
    let mut instructions = Vec::new();
    let mut first_rule = ctx.top();

    if style.header_line {
        instructions.push(DrawInstruction::line(
            Point::new(ctx.left(), ctx.top()),
            Point::new(ctx.right(), ctx.top()),
            style.header_stroke(),
        ));
        first_rule += HEADER_GAP_MM;
    }

    instructions.extend(horizontal_rules(
        ctx.left(),
        ctx.right(),
        first_rule,
        ctx.bottom(),
        spacing,
        style.stroke(),
    ));
    instructions
}

/// Full-width horizontal lines at `top + k * spacing` while inside `bottom`
pub(crate) fn horizontal_rules(
    left: f32,
    right: f32,
    top: f32,
    bottom: f32,
    spacing: f32,
    stroke: StrokeStyle,
) -> impl Iterator<Item = DrawInstruction> {
    sweep(top, bottom, spacing)
        .map(move |y| DrawInstruction::line(Point::new(left, y), Point::new(right, y), stroke))
}

/// Full-height vertical lines at `left + k * spacing` while inside `right`
pub(crate) fn vertical_rules(
    left: f32,
    right: f32,
    top: f32,
    bottom: f32,
    spacing: f32,
    stroke: StrokeStyle,
) -> impl Iterator<Item = DrawInstruction> {
    sweep(left, right, spacing)
        .map(move |x| DrawInstruction::line(Point::new(x, top), Point::new(x, bottom), stroke))
}
