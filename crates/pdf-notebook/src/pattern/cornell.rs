//! Cornell note-taking layout
//!
//! ```text
//! +------+-----------------+
//! | cue  | notes (lined)   |
//! |      |                 |
//! +------+-----------------+
//! | summary band           |
//! +------------------------+
//! ```

use crate::constants::{CORNELL_SEPARATOR_FACTOR, EPSILON_MM};
use crate::draw::DrawInstruction;
use crate::geometry::{Point, Rect, RenderContext};
use crate::types::{Result, invalid};

use super::PatternStyle;
use super::lined::draw_lined;

/// The cue column and summary band must leave room for notes
pub(crate) fn check_regions(ctx: &RenderContext, cue_column: f32, summary_band: f32) -> Result<()> {
    if cue_column >= ctx.width() {
        return Err(invalid(format!(
            "Cornell cue column ({} mm) must be narrower than the drawable width ({:.1} mm)",
            cue_column,
            ctx.width()
        )));
    }
    if summary_band >= ctx.height() {
        return Err(invalid(format!(
            "Cornell summary band ({} mm) must be shorter than the drawable height ({:.1} mm)",
            summary_band,
            ctx.height()
        )));
    }

    Ok(())
}

pub(crate) fn draw_cornell(
    ctx: &RenderContext,
    line_spacing: f32,
    cue_column: f32,
    summary_band: f32,
    style: &PatternStyle,
) -> Result<Vec<DrawInstruction>> {
    check_regions(ctx, cue_column, summary_band)?;

    let cue_x = ctx.left() + cue_column;
    let band_top = ctx.bottom() - summary_band;
    let separator = style
        .stroke()
        .with_weight(style.weight_pt * CORNELL_SEPARATOR_FACTOR);

    let mut instructions = vec![
        // Cue column divider, down to the summary band
        DrawInstruction::line(
            Point::new(cue_x, ctx.top()),
            Point::new(cue_x, band_top),
            separator,
        ),
        // Summary band divider, full width
        DrawInstruction::line(
            Point::new(ctx.left(), band_top),
            Point::new(ctx.right(), band_top),
            separator,
        ),
    ];

    let notes = RenderContext::from_rect(Rect::new(
        cue_x,
        ctx.top(),
        ctx.right() - cue_x,
        band_top - ctx.top(),
    ))?;
    // The band separator already covers a rule landing on it
    instructions.extend(
        draw_lined(&notes, line_spacing, style)
            .into_iter()
            .filter(|rule| !on_line(rule, band_top)),
    );

    Ok(instructions)
}

fn on_line(instruction: &DrawInstruction, y: f32) -> bool {
    matches!(
        instruction,
        DrawInstruction::Line { from, to, .. }
            if (from.y - y).abs() <= EPSILON_MM && (to.y - y).abs() <= EPSILON_MM
    )
}
