//! Shared constants for notebook rendering
//!
//! This module centralizes magic numbers and constants used by the pattern
//! drawer, the page decorations, the imposition guides and both output
//! adapters.

// =============================================================================
// Unit Conversion
// =============================================================================

/// Points per millimeter (1 inch = 72 points, 1 inch = 25.4mm)
pub const POINTS_PER_MM: f32 = 72.0 / 25.4; // ≈ 2.83465

/// Convert millimeters to points
#[inline]
pub fn mm_to_pt(mm: f32) -> f32 {
    mm * POINTS_PER_MM
}

/// Convert points to millimeters
#[inline]
pub fn pt_to_mm(pt: f32) -> f32 {
    pt / POINTS_PER_MM
}

/// Tolerance for bound comparisons in sweeps (mm)
pub const EPSILON_MM: f32 = 1e-3;

// =============================================================================
// Patterns
// =============================================================================

/// Gap between the header line and the first body line (mm)
pub const HEADER_GAP_MM: f32 = 10.0;

/// Cornell separators are drawn this many times heavier than body lines
pub const CORNELL_SEPARATOR_FACTOR: f32 = 2.0;

// =============================================================================
// Page Decorations
// =============================================================================

/// Font size for page numbers (points)
pub const PAGE_NUMBER_FONT_SIZE: f32 = 8.0;

/// Gray level of page numbers
pub const PAGE_NUMBER_GRAY: f32 = 0.5;

/// Radius of punch-hole guides (mm)
pub const PUNCH_HOLE_RADIUS_MM: f32 = 3.0;

/// Distance between the two holes of a 2-hole punch (mm)
pub const TWO_HOLE_SPACING_MM: f32 = 80.0;

/// Hole positions of a 4-hole punch as fractions of the page height
pub const FOUR_HOLE_POSITIONS: [f32; 4] = [0.15, 0.38, 0.62, 0.85];

/// Gray level and weight of punch-hole guides
pub const PUNCH_HOLE_GRAY: f32 = 0.8;
pub const PUNCH_HOLE_WIDTH: f32 = 0.5;

/// Gray level, weight and dash length (points) of margin guides
pub const MARGIN_GUIDE_GRAY: f32 = 0.9;
pub const MARGIN_GUIDE_WIDTH: f32 = 0.2;
pub const MARGIN_GUIDE_DASH_PT: f32 = 2.0;

// =============================================================================
// Imposition Guides
// =============================================================================

/// Line width for fold lines (points)
pub const FOLD_LINE_WIDTH: f32 = 0.2;

/// Gray level of fold lines
pub const FOLD_LINE_GRAY: f32 = 0.9;

/// Dash and gap length of fold lines (points)
pub const FOLD_LINE_DASH_PT: f32 = 3.0;
pub const FOLD_LINE_GAP_PT: f32 = 3.0;

// =============================================================================
// Output Adapters
// =============================================================================

/// Segments used to approximate a circle in the PDF writer
pub const CIRCLE_SEGMENTS: usize = 24;

/// Preview pixels per millimeter before clamping
pub const PREVIEW_PX_PER_MM: f32 = 4.0;

/// Maximum preview height in pixels
pub const MAX_PREVIEW_HEIGHT_PX: u32 = 1200;
