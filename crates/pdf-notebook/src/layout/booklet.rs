//! Page ordering on sheets
//!
//! ## Arrangements
//!
//! **1 page per sheet:** page n on sheet n.
//!
//! **2 pages per sheet:** sequential pairs `[2n+1, 2n+2]`, left to right.
//!
//! **4 pages per sheet (saddle stitch):** for P pages (a multiple of 4),
//! sheet i carries
//! - Bottom row, upright: `[P-2i, 2i+1]` (front of the leaf)
//! - Top row, rotated 180°: `[P-2i-1, 2i+2]` as printed, which reads
//!   `[2i+2, P-2i-1]` once the top half is folded behind
//!
//! For P = 8: sheet 0 is top `[7↓, 2↓]`, bottom `[8, 1]`; sheet 1 is
//! top `[5↓, 4↓]`, bottom `[6, 3]`. Folding each sheet and nesting them in
//! order gives pages 1..8.

use super::{GridPosition, SheetSide};

/// Front and back page pairs of one booklet leaf, 1-based, each left to
/// right as read on that side
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BookletLeaf {
    pub front: [usize; 2],
    pub back: [usize; 2],
}

/// Saddle-stitch pairs for `total_pages` (must be a multiple of 4)
pub fn booklet_order(total_pages: usize) -> Vec<BookletLeaf> {
    debug_assert!(total_pages % 4 == 0);
    (0..total_pages / 4)
        .map(|i| BookletLeaf {
            front: [total_pages - 2 * i, 2 * i + 1],
            back: [2 * i + 2, total_pages - 2 * i - 1],
        })
        .collect()
}

/// Where one logical page goes on a sheet
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotAssignment {
    /// 0-based index into the padded page list
    pub page_index: usize,
    pub position: GridPosition,
    pub side: SheetSide,
    pub rotated: bool,
}

/// Slot assignments for every sheet, in sheet order.
///
/// `padded_pages` must already be a multiple of `pages_per_sheet`.
pub fn sheet_assignments(padded_pages: usize, pages_per_sheet: usize) -> Vec<Vec<SlotAssignment>> {
    match pages_per_sheet {
        4 => booklet_order(padded_pages)
            .into_iter()
            .map(booklet_slots)
            .collect(),
        2 => (0..padded_pages / 2)
            .map(|n| {
                (0..2)
                    .map(|col| upright(2 * n + col, GridPosition::new(0, col)))
                    .collect()
            })
            .collect(),
        _ => (0..padded_pages)
            .map(|n| vec![upright(n, GridPosition::new(0, 0))])
            .collect(),
    }
}

fn upright(page_index: usize, position: GridPosition) -> SlotAssignment {
    SlotAssignment {
        page_index,
        position,
        side: SheetSide::Front,
        rotated: false,
    }
}

/// Place a leaf on the 2x2 grid in row-major order
fn booklet_slots(leaf: BookletLeaf) -> Vec<SlotAssignment> {
    let [back_left, back_right] = leaf.back;
    let [front_left, front_right] = leaf.front;

    // Top row is seen from behind after the fold, so its columns mirror
    let rotated = |page: usize, col: usize| SlotAssignment {
        page_index: page - 1,
        position: GridPosition::new(0, col),
        side: SheetSide::Back,
        rotated: true,
    };

    vec![
        rotated(back_right, 0),
        rotated(back_left, 1),
        upright(front_left - 1, GridPosition::new(1, 0)),
        upright(front_right - 1, GridPosition::new(1, 1)),
    ]
}
