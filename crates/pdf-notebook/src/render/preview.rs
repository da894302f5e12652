//! Raster preview via tiny-skia
//!
//! Renders a single sheet at `PREVIEW_PX_PER_MM`, scaled down when needed so
//! the image is never taller than `MAX_PREVIEW_HEIGHT_PX`.

use image::RgbaImage;
use tiny_skia::{FillRule, Paint, Path, PathBuilder, Pixmap, Stroke, StrokeDash, Transform};

use crate::constants::{MAX_PREVIEW_HEIGHT_PX, PREVIEW_PX_PER_MM, pt_to_mm};
use crate::draw::{Color, StrokeStyle};
use crate::geometry::{Point, Size};
use crate::types::{NotebookError, Result, invalid};

use super::Surface;

/// Rasterizes one sheet
#[derive(Default)]
pub struct PreviewSurface {
    canvas: Option<Canvas>,
}

struct Canvas {
    pixmap: Pixmap,
    /// Pixels per millimeter
    scale: f32,
}

/// Pixels per millimeter for a sheet of the given height
pub fn preview_scale(sheet: Size) -> f32 {
    let max = MAX_PREVIEW_HEIGHT_PX as f32 / sheet.height;
    PREVIEW_PX_PER_MM.min(max)
}

impl PreviewSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// The rendered sheet as an RGBA image
    pub fn into_image(self) -> Result<RgbaImage> {
        let canvas = self
            .canvas
            .ok_or_else(|| invalid("No sheet was rendered to the preview"))?;
        let (width, height) = (canvas.pixmap.width(), canvas.pixmap.height());

        // tiny-skia stores premultiplied color
        let data: Vec<u8> = canvas
            .pixmap
            .pixels()
            .iter()
            .flat_map(|p| {
                let c = p.demultiply();
                [c.red(), c.green(), c.blue(), c.alpha()]
            })
            .collect();

        RgbaImage::from_raw(width, height, data)
            .ok_or_else(|| NotebookError::Render("Preview buffer has the wrong size".to_string()))
    }

    fn canvas(&mut self) -> Option<&mut Canvas> {
        if self.canvas.is_none() {
            log::warn!("Drawing before the preview sheet was started; ignoring");
        }
        self.canvas.as_mut()
    }
}

impl Canvas {
    fn px(&self, p: Point) -> (f32, f32) {
        (p.x * self.scale, p.y * self.scale)
    }

    fn path(&self, points: &[Point], closed: bool) -> Option<Path> {
        let mut pb = PathBuilder::new();
        let mut iter = points.iter();
        let (x, y) = self.px(*iter.next()?);
        pb.move_to(x, y);
        for p in iter {
            let (x, y) = self.px(*p);
            pb.line_to(x, y);
        }
        if closed {
            pb.close();
        }
        pb.finish()
    }

    fn stroke_path(&mut self, path: &Path, style: &StrokeStyle) {
        let mm_to_px = |pt: f32| pt_to_mm(pt) * self.scale;
        let stroke = Stroke {
            width: mm_to_px(style.weight_pt),
            dash: style
                .dash
                .and_then(|d| StrokeDash::new(vec![mm_to_px(d.dash_pt), mm_to_px(d.gap_pt)], 0.0)),
            ..Default::default()
        };
        let paint = paint(style.color);
        self.pixmap
            .stroke_path(path, &paint, &stroke, Transform::identity(), None);
    }

    fn fill_path(&mut self, path: &Path, color: Color) {
        self.pixmap.fill_path(
            path,
            &paint(color),
            FillRule::Winding,
            Transform::identity(),
            None,
        );
    }

    fn shape(&mut self, path: Option<Path>, fill: Option<Color>, stroke: Option<&StrokeStyle>) {
        let Some(path) = path else { return };
        if let Some(color) = fill {
            self.fill_path(&path, color);
        }
        if let Some(style) = stroke {
            self.stroke_path(&path, style);
        }
    }
}

impl Surface for PreviewSurface {
    fn begin_sheet(&mut self, size: Size) -> Result<()> {
        let scale = preview_scale(size);
        let width = (size.width * scale).round().max(1.0) as u32;
        let height = (size.height * scale).round().max(1.0) as u32;

        let mut pixmap = Pixmap::new(width, height).ok_or_else(|| {
            NotebookError::Render(format!("Cannot allocate a {}x{} preview", width, height))
        })?;
        pixmap.fill(tiny_skia::Color::WHITE);

        log::debug!("Preview canvas {}x{} px at {:.2} px/mm", width, height, scale);
        self.canvas = Some(Canvas { pixmap, scale });
        Ok(())
    }

    fn draw_line(&mut self, from: Point, to: Point, stroke: &StrokeStyle) {
        let Some(canvas) = self.canvas() else { return };
        if let Some(path) = canvas.path(&[from, to], false) {
            canvas.stroke_path(&path, stroke);
        }
    }

    fn draw_circle(
        &mut self,
        center: Point,
        radius: f32,
        fill: Option<Color>,
        stroke: Option<&StrokeStyle>,
    ) {
        let Some(canvas) = self.canvas() else { return };
        let (x, y) = canvas.px(center);
        let path = PathBuilder::from_circle(x, y, radius * canvas.scale);
        canvas.shape(path, fill, stroke);
    }

    fn draw_polygon(
        &mut self,
        points: &[Point],
        fill: Option<Color>,
        stroke: Option<&StrokeStyle>,
    ) {
        let Some(canvas) = self.canvas() else { return };
        let path = canvas.path(points, true);
        canvas.shape(path, fill, stroke);
    }

    fn draw_text(&mut self, _position: Point, text: &str, _: f32, _: Color, _: f32) {
        log::debug!("Preview does not rasterize text, skipping '{}'", text);
    }
}

fn paint(color: Color) -> Paint<'static> {
    let [r, g, b] = color.to_rgb8();
    let mut paint = Paint::default();
    paint.set_color_rgba8(r, g, b, 255);
    paint.anti_alias = true;
    paint
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scale_is_clamped_by_height() {
        assert_eq!(preview_scale(Size::new(148.0, 210.0)), 4.0);
        assert_eq!(preview_scale(Size::new(210.0, 297.0)), 4.0);
        let tall = preview_scale(Size::new(100.0, 400.0));
        assert!((400.0 * tall - 1200.0).abs() < 1e-2);
    }

    #[test]
    fn test_blank_sheet_is_white() {
        let mut surface = PreviewSurface::new();
        surface.begin_sheet(Size::new(50.0, 25.0)).unwrap();
        let image = surface.into_image().unwrap();
        assert_eq!(image.dimensions(), (200, 100));
        assert!(image.pixels().all(|p| p.0 == [255, 255, 255, 255]));
    }

    #[test]
    fn test_line_darkens_pixels() {
        let mut surface = PreviewSurface::new();
        surface.begin_sheet(Size::new(50.0, 25.0)).unwrap();
        surface.draw_line(
            Point::new(0.0, 12.5),
            Point::new(50.0, 12.5),
            &StrokeStyle::solid(Color::BLACK, 2.0),
        );
        let image = surface.into_image().unwrap();
        let pixel = image.get_pixel(100, 50);
        assert!(pixel.0[0] < 128);
    }

    #[test]
    fn test_image_requires_a_sheet() {
        assert!(PreviewSurface::new().into_image().is_err());
    }
}
