//! Layout data types for imposition
//!
//! These types sit between the page renderer, which produces one
//! instruction list per logical page, and the output adapters, which draw
//! whole sheets.

use crate::draw::DrawInstruction;
use crate::geometry::{Point, Rect, Size};
use crate::types::{Result, invalid};

/// How logical pages are arranged on a printed sheet
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ImpositionConfig {
    /// Logical pages per printed sheet: 1, 2 or 4
    pub pages_per_sheet: usize,
    /// Draw dashed fold guides between the page slots
    pub fold_lines: bool,
}

impl Default for ImpositionConfig {
    fn default() -> Self {
        Self {
            pages_per_sheet: 1,
            fold_lines: true,
        }
    }
}

impl ImpositionConfig {
    pub const SUPPORTED_PAGES_PER_SHEET: [usize; 3] = [1, 2, 4];

    pub fn validate(&self) -> Result<()> {
        if Self::SUPPORTED_PAGES_PER_SHEET.contains(&self.pages_per_sheet) {
            Ok(())
        } else {
            Err(invalid(format!(
                "Pages per sheet must be 1, 2 or 4, got {}",
                self.pages_per_sheet
            )))
        }
    }

    /// Columns and rows of page slots on the sheet
    pub fn grid_dimensions(&self) -> (usize, usize) {
        match self.pages_per_sheet {
            2 => (2, 1),
            4 => (2, 2),
            _ => (1, 1),
        }
    }

    /// Size of one logical page on a sheet of the given size
    pub fn slot_size(&self, sheet: Size) -> Size {
        let (cols, rows) = self.grid_dimensions();
        Size::new(sheet.width / cols as f32, sheet.height / rows as f32)
    }

    /// Round a page count up to a whole number of sheets
    pub fn padded_page_count(&self, pages: usize) -> usize {
        pages.div_ceil(self.pages_per_sheet) * self.pages_per_sheet
    }
}

/// Which side of the folded leaf a placement ends up on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SheetSide {
    /// Visible when the sheet is read as printed
    Front,
    /// Behind the front after the horizontal fold
    Back,
}

/// Position within the grid (row, column)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridPosition {
    /// Row index (0 = top row)
    pub row: usize,
    /// Column index (0 = leftmost column)
    pub col: usize,
}

impl GridPosition {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

/// A logical page placed on a sheet
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedPage {
    /// 1-based page number, `None` for blank padding
    pub page_number: Option<usize>,
    pub side: SheetSide,
    pub position: GridPosition,
    /// Top-left corner of the slot on the sheet
    pub offset: Point,
    /// Slot size, equal to the logical page size
    pub size: Size,
    /// Rotated 180° about the slot center
    pub rotated: bool,
    /// Page content in page-relative coordinates
    pub instructions: Vec<DrawInstruction>,
}

impl PlacedPage {
    /// Slot bounds on the sheet
    pub fn bounds(&self) -> Rect {
        Rect::new(self.offset.x, self.offset.y, self.size.width, self.size.height)
    }

    /// Map a page-relative point to sheet coordinates
    pub fn transform(&self, p: Point) -> Point {
        if self.rotated {
            Point::new(
                self.offset.x + self.size.width - p.x,
                self.offset.y + self.size.height - p.y,
            )
        } else {
            Point::new(self.offset.x + p.x, self.offset.y + p.y)
        }
    }

    /// Text rotation in degrees for this placement
    pub fn rotation_degrees(&self) -> f32 {
        if self.rotated { 180.0 } else { 0.0 }
    }
}

/// One printed sheet side
#[derive(Debug, Clone, PartialEq)]
pub struct SheetLayout {
    /// 0-based sheet index
    pub index: usize,
    pub placements: Vec<PlacedPage>,
    /// Sheet-level guides (fold lines) in sheet coordinates
    pub guides: Vec<DrawInstruction>,
}

impl SheetLayout {
    /// Page numbers in placement order, blanks as `None`
    pub fn page_numbers(&self) -> Vec<Option<usize>> {
        self.placements.iter().map(|p| p.page_number).collect()
    }

    /// Page numbers of one leaf side, left to right as read once folded.
    ///
    /// The back side is seen from behind, so its columns read mirrored.
    pub fn side_pages(&self, side: SheetSide) -> Vec<Option<usize>> {
        let mut pages: Vec<_> = self
            .placements
            .iter()
            .filter(|p| p.side == side)
            .collect();
        pages.sort_by_key(|p| p.position.col);
        if side == SheetSide::Back {
            pages.reverse();
        }
        pages.iter().map(|p| p.page_number).collect()
    }
}

/// The complete imposition of a notebook
#[derive(Debug, Clone, PartialEq)]
pub struct Imposition {
    /// Printed sheet size in mm (without bleed)
    pub sheet_size: Size,
    pub sheets: Vec<SheetLayout>,
}

impl Imposition {
    pub fn is_empty(&self) -> bool {
        self.sheets.is_empty()
    }

    pub fn sheet_count(&self) -> usize {
        self.sheets.len()
    }

    /// All placements of all sheets, in sheet order
    pub fn placements(&self) -> impl Iterator<Item = &PlacedPage> {
        self.sheets.iter().flat_map(|s| s.placements.iter())
    }
}
