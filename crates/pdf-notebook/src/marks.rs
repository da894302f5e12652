//! Sheet marks for imposed notebooks
//!
//! Fold guides are emitted as ordinary drawing instructions in sheet
//! coordinates, so both the PDF writer and the preview draw them.

use crate::constants::{FOLD_LINE_DASH_PT, FOLD_LINE_GAP_PT, FOLD_LINE_GRAY, FOLD_LINE_WIDTH};
use crate::draw::{Color, Dash, DrawInstruction, StrokeStyle};
use crate::geometry::{Point, Size};
use crate::layout::{ImpositionConfig, horizontal_fold_positions, vertical_fold_positions};

/// Stroke used for fold guides: light gray, thin, dashed
pub fn fold_line_style() -> StrokeStyle {
    StrokeStyle::dashed(
        Color::gray(FOLD_LINE_GRAY),
        FOLD_LINE_WIDTH,
        Dash {
            dash_pt: FOLD_LINE_DASH_PT,
            gap_pt: FOLD_LINE_GAP_PT,
        },
    )
}

/// Generate the marks for one sheet.
///
/// Fold lines run along every internal slot boundary: vertical for two pages
/// per sheet, vertical and horizontal for four. Nothing is drawn for one page
/// per sheet or when fold lines are disabled.
pub fn generate_marks(config: &ImpositionConfig, sheet: Size) -> Vec<DrawInstruction> {
    if !config.fold_lines || config.pages_per_sheet <= 1 {
        return Vec::new();
    }
    generate_fold_lines(config, sheet)
}

fn generate_fold_lines(config: &ImpositionConfig, sheet: Size) -> Vec<DrawInstruction> {
    let style = fold_line_style();

    let verticals = vertical_fold_positions(config, sheet)
        .into_iter()
        .map(|x| DrawInstruction::line(Point::new(x, 0.0), Point::new(x, sheet.height), style));
    let horizontals = horizontal_fold_positions(config, sheet)
        .into_iter()
        .map(|y| DrawInstruction::line(Point::new(0.0, y), Point::new(sheet.width, y), style));

    verticals.chain(horizontals).collect()
}
