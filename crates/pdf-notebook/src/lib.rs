pub mod constants;
pub mod draw;
pub mod generate;
pub mod geometry;
pub mod layout;
pub mod marks;
mod options;
pub mod page;
pub mod pattern;
pub mod render;
mod stats;
mod types;

pub use draw::{Color, Dash, DrawInstruction, StrokeStyle};
pub use generate::{
    build_imposition, generate_pdf, generate_pdf_bytes, render_preview, save_preview,
};
pub use geometry::{Point, Rect, RenderContext, Size};
pub use layout::{Imposition, ImpositionConfig, PlacedPage, SheetLayout, SheetSide};
pub use options::*;
pub use pattern::{PatternConfig, PatternKind, PatternKindName, PatternStyle};
pub use stats::calculate_statistics;
pub use types::*;
