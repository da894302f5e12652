//! PDF output via printpdf
//!
//! Sheet millimeters are written at true scale: x is converted to points,
//! y is flipped so the top-left origin of the layout lands on the top-left
//! of the PDF page.
//!
//! printpdf rounds page boxes to whole points, so the serialized document
//! is reopened with lopdf and every page box is set to the exact sheet size.

use std::f32::consts::TAU;

use lopdf::{Document, Object};
use printpdf::{
    BuiltinFont, Color as PdfColor, Line, LineDashPattern, LinePoint, Mm, Op, PaintMode,
    PdfDocument, PdfPage, PdfSaveOptions, Point as PdfPoint, Polygon, PolygonRing, Pt, Rgb,
    TextItem, TextMatrix, WindingOrder,
};

use crate::constants::{CIRCLE_SEGMENTS, mm_to_pt};
use crate::draw::{Color, StrokeStyle};
use crate::geometry::{Point, Size};
use crate::types::{NotebookError, Result};

use super::Surface;

/// Collects sheets as PDF pages
pub struct PdfSurface {
    title: String,
    pages: Vec<PdfPage>,
    sizes: Vec<Size>,
    current: Option<SheetOps>,
}

struct SheetOps {
    size: Size,
    ops: Vec<Op>,
}

impl PdfSurface {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            pages: Vec::new(),
            sizes: Vec::new(),
            current: None,
        }
    }

    /// Number of sheets drawn so far
    pub fn page_count(&self) -> usize {
        self.pages.len() + usize::from(self.current.is_some())
    }

    /// Finish the document and serialize it
    pub fn finalize(mut self) -> Result<Vec<u8>> {
        self.flush();

        let mut doc = PdfDocument::new(&self.title);
        doc.pages = self.pages;

        let mut warnings = Vec::new();
        let bytes = doc.save(&PdfSaveOptions::default(), &mut warnings);
        if !warnings.is_empty() {
            log::debug!("PDF writer reported {} warnings", warnings.len());
        }
        exact_page_boxes(&bytes, &self.sizes)
    }

    fn flush(&mut self) {
        if let Some(sheet) = self.current.take() {
            self.sizes.push(sheet.size);
            self.pages.push(PdfPage::new(
                Mm(sheet.size.width),
                Mm(sheet.size.height),
                sheet.ops,
            ));
        }
    }

    fn sheet(&mut self) -> Option<&mut SheetOps> {
        if self.current.is_none() {
            log::warn!("Drawing before the first sheet was started; ignoring");
        }
        self.current.as_mut()
    }
}

impl SheetOps {
    fn point(&self, p: Point) -> PdfPoint {
        PdfPoint {
            x: Mm(p.x).into_pt(),
            y: Mm(self.size.height - p.y).into_pt(),
        }
    }

    fn line_points(&self, points: &[Point]) -> Vec<LinePoint> {
        points
            .iter()
            .map(|p| LinePoint {
                p: self.point(*p),
                bezier: false,
            })
            .collect()
    }

    fn set_stroke(&mut self, stroke: &StrokeStyle) {
        self.ops.push(Op::SetOutlineColor {
            col: pdf_color(stroke.color),
        });
        self.ops.push(Op::SetOutlineThickness {
            pt: Pt(stroke.weight_pt),
        });
        if let Some(dash) = stroke.dash {
            self.ops.push(Op::SetLineDashPattern {
                dash: LineDashPattern {
                    offset: 0,
                    dash_1: Some(dash.dash_pt.round() as i64),
                    gap_1: Some(dash.gap_pt.round() as i64),
                    dash_2: None,
                    gap_2: None,
                    dash_3: None,
                    gap_3: None,
                },
            });
        }
    }

    /// Closed shape, filled and/or stroked
    fn shape(&mut self, points: &[Point], fill: Option<Color>, stroke: Option<&StrokeStyle>) {
        let mode = match (fill.is_some(), stroke.is_some()) {
            (true, true) => PaintMode::FillStroke,
            (true, false) => PaintMode::Fill,
            (false, true) => PaintMode::Stroke,
            (false, false) => return,
        };

        self.ops.push(Op::SaveGraphicsState);
        if let Some(color) = fill {
            self.ops.push(Op::SetFillColor {
                col: pdf_color(color),
            });
        }
        if let Some(stroke) = stroke {
            self.set_stroke(stroke);
        }
        let ring = PolygonRing {
            points: self.line_points(points),
        };
        self.ops.push(Op::DrawPolygon {
            polygon: Polygon {
                rings: vec![ring],
                mode,
                winding_order: WindingOrder::NonZero,
            },
        });
        self.ops.push(Op::RestoreGraphicsState);
    }
}

impl Surface for PdfSurface {
    fn begin_sheet(&mut self, size: Size) -> Result<()> {
        self.flush();
        self.current = Some(SheetOps {
            size,
            ops: Vec::new(),
        });
        Ok(())
    }

    fn draw_line(&mut self, from: Point, to: Point, stroke: &StrokeStyle) {
        let Some(sheet) = self.sheet() else { return };
        let points = sheet.line_points(&[from, to]);

        sheet.ops.push(Op::SaveGraphicsState);
        sheet.set_stroke(stroke);
        sheet.ops.push(Op::DrawLine {
            line: Line {
                points,
                is_closed: false,
            },
        });
        sheet.ops.push(Op::RestoreGraphicsState);
    }

    fn draw_circle(
        &mut self,
        center: Point,
        radius: f32,
        fill: Option<Color>,
        stroke: Option<&StrokeStyle>,
    ) {
        let Some(sheet) = self.sheet() else { return };
        sheet.shape(&circle_points(center, radius), fill, stroke);
    }

    fn draw_polygon(
        &mut self,
        points: &[Point],
        fill: Option<Color>,
        stroke: Option<&StrokeStyle>,
    ) {
        let Some(sheet) = self.sheet() else { return };
        sheet.shape(points, fill, stroke);
    }

    fn draw_text(
        &mut self,
        position: Point,
        text: &str,
        size_pt: f32,
        color: Color,
        rotation_deg: f32,
    ) {
        let Some(sheet) = self.sheet() else { return };
        let origin = sheet.point(position);
        let matrix = if rotation_deg == 0.0 {
            TextMatrix::Translate(origin.x, origin.y)
        } else {
            TextMatrix::TranslateRotate(origin.x, origin.y, rotation_deg)
        };

        sheet.ops.push(Op::SaveGraphicsState);
        sheet.ops.push(Op::SetFillColor {
            col: pdf_color(color),
        });
        sheet.ops.push(Op::StartTextSection);
        sheet.ops.push(Op::SetFontSizeBuiltinFont {
            font: BuiltinFont::Helvetica,
            size: Pt(size_pt),
        });
        sheet.ops.push(Op::SetTextMatrix { matrix });
        sheet.ops.push(Op::WriteTextBuiltinFont {
            items: vec![TextItem::Text(text.to_string())],
            font: BuiltinFont::Helvetica,
        });
        sheet.ops.push(Op::EndTextSection);
        sheet.ops.push(Op::RestoreGraphicsState);
    }
}

/// Rewrite the page boxes with the unrounded sheet sizes, in page order
fn exact_page_boxes(bytes: &[u8], sizes: &[Size]) -> Result<Vec<u8>> {
    let mut doc = Document::load_mem(bytes)?;
    let pages: Vec<_> = doc.get_pages().into_values().collect();
    if pages.len() != sizes.len() {
        return Err(NotebookError::Render(format!(
            "Expected {} pages in the PDF, found {}",
            sizes.len(),
            pages.len()
        )));
    }

    for (id, size) in pages.into_iter().zip(sizes) {
        let page_box = Object::Array(vec![
            Object::Integer(0),
            Object::Integer(0),
            Object::Real(mm_to_pt(size.width)),
            Object::Real(mm_to_pt(size.height)),
        ]);
        let page = doc.get_object_mut(id)?.as_dict_mut()?;
        page.set("MediaBox", page_box.clone());
        for key in [b"CropBox".as_slice(), b"TrimBox".as_slice()] {
            if page.has(key) {
                page.set(key, page_box.clone());
            }
        }
    }

    let mut writer = Vec::new();
    doc.save_to(&mut writer)?;
    Ok(writer)
}

fn pdf_color(color: Color) -> PdfColor {
    PdfColor::Rgb(Rgb::new(color.r, color.g, color.b, None))
}

/// Regular polygon approximating a circle
fn circle_points(center: Point, radius: f32) -> Vec<Point> {
    (0..CIRCLE_SEGMENTS)
        .map(|i| {
            let angle = TAU * i as f32 / CIRCLE_SEGMENTS as f32;
            Point::new(
                center.x + radius * angle.cos(),
                center.y + radius * angle.sin(),
            )
        })
        .collect()
}
