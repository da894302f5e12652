//! Grid layout calculation
//!
//! Slot bounds and fold positions for a sheet divided into equal page
//! slots. Row 0 is the top row.

use crate::geometry::{Rect, Size};

use super::{GridPosition, ImpositionConfig};

/// Bounds of the slot at `pos` on a sheet of the given size
pub fn cell_bounds(config: &ImpositionConfig, sheet: Size, pos: GridPosition) -> Rect {
    let slot = config.slot_size(sheet);
    Rect::new(
        pos.col as f32 * slot.width,
        pos.row as f32 * slot.height,
        slot.width,
        slot.height,
    )
}

/// X coordinates of the internal column boundaries
pub fn vertical_fold_positions(config: &ImpositionConfig, sheet: Size) -> Vec<f32> {
    let (cols, _) = config.grid_dimensions();
    let slot = config.slot_size(sheet);
    (1..cols).map(|c| c as f32 * slot.width).collect()
}

/// Y coordinates of the internal row boundaries
pub fn horizontal_fold_positions(config: &ImpositionConfig, sheet: Size) -> Vec<f32> {
    let (_, rows) = config.grid_dimensions();
    let slot = config.slot_size(sheet);
    (1..rows).map(|r| r as f32 * slot.height).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(pages_per_sheet: usize) -> ImpositionConfig {
        ImpositionConfig {
            pages_per_sheet,
            fold_lines: true,
        }
    }

    #[test]
    fn test_two_up_cells() {
        let sheet = Size::new(297.0, 210.0);
        let right = cell_bounds(&config(2), sheet, GridPosition::new(0, 1));
        assert_eq!(right, Rect::new(148.5, 0.0, 148.5, 210.0));
    }

    #[test]
    fn test_four_up_cells() {
        let sheet = Size::new(210.0, 297.0);
        let bottom_right = cell_bounds(&config(4), sheet, GridPosition::new(1, 1));
        assert_eq!(bottom_right, Rect::new(105.0, 148.5, 105.0, 148.5));
    }

    #[test]
    fn test_fold_positions() {
        let sheet = Size::new(200.0, 100.0);
        assert!(vertical_fold_positions(&config(1), sheet).is_empty());
        assert_eq!(vertical_fold_positions(&config(2), sheet), vec![100.0]);
        assert!(horizontal_fold_positions(&config(2), sheet).is_empty());
        assert_eq!(horizontal_fold_positions(&config(4), sheet), vec![50.0]);
    }
}
