//! Logical page rendering
//!
//! A page is the pattern drawn inside the margins plus the optional
//! decorations: margin guides, page number and punch-hole guides.

use crate::constants::{
    FOUR_HOLE_POSITIONS, MARGIN_GUIDE_DASH_PT, MARGIN_GUIDE_GRAY, MARGIN_GUIDE_WIDTH,
    PAGE_NUMBER_FONT_SIZE, PAGE_NUMBER_GRAY, PUNCH_HOLE_GRAY, PUNCH_HOLE_RADIUS_MM,
    PUNCH_HOLE_WIDTH, TWO_HOLE_SPACING_MM,
};
use crate::draw::{Color, Dash, DrawInstruction, StrokeStyle};
use crate::geometry::{Point, RenderContext, Size};
use crate::options::NotebookConfig;
use crate::pattern;
use crate::types::{PunchHoles, Result};

/// Render logical page `page_number` (1-based) at `page_size`.
///
/// Odd pages carry the binding margin on the left. With mirrored margins,
/// even pages swap left and right so the binding stays on the spine side.
pub fn render_page(
    config: &NotebookConfig,
    page_size: Size,
    page_number: usize,
) -> Result<Vec<DrawInstruction>> {
    let mirror = config.decorations.mirror_margins;
    let (left, right) = config.margins.horizontal_for_page(page_number, mirror);
    let context = RenderContext::new(
        page_size,
        config.margins.top_mm,
        config.margins.bottom_mm,
        left,
        right,
    )?;

    let mut instructions = pattern::draw(&context, &config.pattern)?;

    let decorations = &config.decorations;
    if decorations.margin_guides {
        instructions.push(margin_guide(&context));
    }
    if decorations.page_numbers {
        instructions.push(page_number_label(
            page_size,
            page_number,
            left,
            right,
            config.margins.bottom_mm,
        ));
    }

    // Holes sit in the middle of the binding-side margin
    let binding_x = if mirror && page_number % 2 == 0 {
        page_size.width - right / 2.0
    } else {
        left / 2.0
    };
    instructions.extend(punch_holes(
        decorations.punch_holes,
        binding_x,
        page_size.height,
    ));

    Ok(instructions)
}

/// Faint dashed outline of the drawable area
fn margin_guide(context: &RenderContext) -> DrawInstruction {
    let style = StrokeStyle::dashed(
        Color::gray(MARGIN_GUIDE_GRAY),
        MARGIN_GUIDE_WIDTH,
        Dash {
            dash_pt: MARGIN_GUIDE_DASH_PT,
            gap_pt: MARGIN_GUIDE_DASH_PT,
        },
    );
    DrawInstruction::outline(
        vec![
            Point::new(context.left(), context.top()),
            Point::new(context.right(), context.top()),
            Point::new(context.right(), context.bottom()),
            Point::new(context.left(), context.bottom()),
        ],
        style,
    )
}

/// Page number on the outer side of the bottom margin.
///
/// Odd pages are numbered at the right margin, even pages at the left one,
/// halfway down the bottom margin.
fn page_number_label(
    page_size: Size,
    page_number: usize,
    left: f32,
    right: f32,
    bottom: f32,
) -> DrawInstruction {
    let x = if page_number % 2 == 0 {
        left
    } else {
        page_size.width - right
    };
    DrawInstruction::Text {
        position: Point::new(x, page_size.height - bottom / 2.0),
        text: page_number.to_string(),
        size_pt: PAGE_NUMBER_FONT_SIZE,
        color: Color::gray(PAGE_NUMBER_GRAY),
    }
}

/// Punch-hole guide circles centered at `x`
fn punch_holes(holes: PunchHoles, x: f32, page_height: f32) -> Vec<DrawInstruction> {
    let ys: Vec<f32> = match holes {
        PunchHoles::None => return Vec::new(),
        PunchHoles::TwoHole => {
            let center = page_height / 2.0;
            vec![
                center - TWO_HOLE_SPACING_MM / 2.0,
                center + TWO_HOLE_SPACING_MM / 2.0,
            ]
        }
        PunchHoles::FourHole => FOUR_HOLE_POSITIONS
            .iter()
            .map(|f| page_height * f)
            .collect(),
    };

    let stroke = StrokeStyle::solid(Color::gray(PUNCH_HOLE_GRAY), PUNCH_HOLE_WIDTH);
    ys.into_iter()
        .map(|y| DrawInstruction::ring(Point::new(x, y), PUNCH_HOLE_RADIUS_MM, stroke))
        .collect()
}
