//! Imposition: placing logical pages on printed sheets
//!
//! This module handles the geometric side of imposition:
//! - Page ordering per sheet (sequential, pairs, saddle-stitch booklet)
//! - Grid layout (slot bounds, fold positions)
//! - Assembling placed pages and sheet marks

mod booklet;
mod grid;
mod types;

pub use booklet::*;
pub use grid::*;
pub use types::*;

use crate::draw::DrawInstruction;
use crate::geometry::{Point, Size};
use crate::marks::generate_marks;
use crate::types::{Result, invalid};

/// Arrange per-page instruction lists onto sheets.
///
/// `pages[0]` is page 1. Pages are padded with blanks up to a whole number of
/// sheets (even for two per sheet, a multiple of four for booklets). An empty
/// page list produces an empty imposition.
pub fn layout(
    pages: Vec<Vec<DrawInstruction>>,
    sheet: Size,
    config: &ImpositionConfig,
) -> Result<Imposition> {
    config.validate()?;
    if !(sheet.width > 0.0 && sheet.height > 0.0) {
        return Err(invalid(format!(
            "Sheet size must be positive, got {} x {} mm",
            sheet.width, sheet.height
        )));
    }

    let page_count = pages.len();
    let padded = config.padded_page_count(page_count);
    let slot = config.slot_size(sheet);

    let mut pages: Vec<Option<Vec<DrawInstruction>>> = pages.into_iter().map(Some).collect();
    pages.resize_with(padded, || None);

    let sheets: Vec<SheetLayout> = sheet_assignments(padded, config.pages_per_sheet)
        .into_iter()
        .enumerate()
        .map(|(index, assignments)| {
            let placements = assignments
                .into_iter()
                .map(|a| {
                    let bounds = cell_bounds(config, sheet, a.position);
                    let content = pages[a.page_index].take();
                    PlacedPage {
                        page_number: content.as_ref().map(|_| a.page_index + 1),
                        side: a.side,
                        position: a.position,
                        offset: Point::new(bounds.x, bounds.y),
                        size: slot,
                        rotated: a.rotated,
                        instructions: content.unwrap_or_default(),
                    }
                })
                .collect();

            SheetLayout {
                index,
                placements,
                guides: generate_marks(config, sheet),
            }
        })
        .collect();

    log::debug!(
        "Laid out {} pages ({} padded) on {} sheets, {} per sheet",
        page_count,
        padded,
        sheets.len(),
        config.pages_per_sheet
    );

    Ok(Imposition {
        sheet_size: sheet,
        sheets,
    })
}
