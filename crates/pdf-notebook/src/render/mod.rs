//! Output adapters for imposed notebooks
//!
//! Both adapters implement [`Surface`] and are driven by the same walk over
//! the imposition, so the preview shows exactly what the PDF contains:
//! - [`pdf::PdfSurface`] writes one PDF page per sheet
//! - [`preview::PreviewSurface`] rasterizes a single sheet

pub mod pdf;
pub mod preview;

use crate::draw::{Color, DrawInstruction, StrokeStyle};
use crate::geometry::{Point, Size};
use crate::layout::{Imposition, SheetLayout};
use crate::types::{Result, invalid};

/// Something sheets can be drawn onto, in sheet millimeters with the origin
/// at the top-left corner
pub trait Surface {
    /// Start a new sheet of the given size (bleed included)
    fn begin_sheet(&mut self, size: Size) -> Result<()>;

    fn draw_line(&mut self, from: Point, to: Point, stroke: &StrokeStyle);

    fn draw_circle(
        &mut self,
        center: Point,
        radius: f32,
        fill: Option<Color>,
        stroke: Option<&StrokeStyle>,
    );

    fn draw_polygon(
        &mut self,
        points: &[Point],
        fill: Option<Color>,
        stroke: Option<&StrokeStyle>,
    );

    /// Draw text with its baseline starting at `position`, rotated
    /// counterclockwise by `rotation_deg`
    fn draw_text(
        &mut self,
        position: Point,
        text: &str,
        size_pt: f32,
        color: Color,
        rotation_deg: f32,
    );
}

/// Draw every sheet of the imposition in order
pub fn render_imposition(
    imposition: &Imposition,
    bleed_mm: f32,
    surface: &mut impl Surface,
) -> Result<()> {
    for sheet in &imposition.sheets {
        render_sheet(imposition.sheet_size, sheet, bleed_mm, surface)?;
    }
    Ok(())
}

/// Draw one sheet by index
pub fn render_sheet_at(
    imposition: &Imposition,
    sheet_index: usize,
    bleed_mm: f32,
    surface: &mut impl Surface,
) -> Result<()> {
    let sheet = imposition.sheets.get(sheet_index).ok_or_else(|| {
        invalid(format!(
            "Sheet {} does not exist, the notebook has {} sheets",
            sheet_index,
            imposition.sheet_count()
        ))
    })?;
    render_sheet(imposition.sheet_size, sheet, bleed_mm, surface)
}

fn render_sheet(
    sheet_size: Size,
    sheet: &SheetLayout,
    bleed_mm: f32,
    surface: &mut impl Surface,
) -> Result<()> {
    surface.begin_sheet(Size::new(
        sheet_size.width + 2.0 * bleed_mm,
        sheet_size.height + 2.0 * bleed_mm,
    ))?;
    let bleed = |p: Point| Point::new(p.x + bleed_mm, p.y + bleed_mm);

    for placement in &sheet.placements {
        let rotation = placement.rotation_degrees();
        for instruction in &placement.instructions {
            let placed = instruction.map_points(|p| bleed(placement.transform(p)));
            draw_instruction(surface, &placed, rotation);
        }
    }

    for guide in &sheet.guides {
        draw_instruction(surface, &guide.map_points(bleed), 0.0);
    }

    Ok(())
}

/// Dispatch one instruction to the surface
pub fn draw_instruction(
    surface: &mut impl Surface,
    instruction: &DrawInstruction,
    rotation_deg: f32,
) {
    match instruction {
        DrawInstruction::Line { from, to, stroke } => surface.draw_line(*from, *to, stroke),
        DrawInstruction::Circle {
            center,
            radius,
            fill,
            stroke,
        } => surface.draw_circle(*center, *radius, *fill, stroke.as_ref()),
        DrawInstruction::Polygon {
            points,
            fill,
            stroke,
        } => surface.draw_polygon(points, *fill, stroke.as_ref()),
        DrawInstruction::Text {
            position,
            text,
            size_pt,
            color,
        } => surface.draw_text(*position, text, *size_pt, *color, rotation_deg),
    }
}
