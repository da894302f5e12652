//! Shared geometry for pattern drawing and imposition
//!
//! All coordinates are page-relative millimeters with the origin at the
//! top-left corner of the page and y growing downward. The PDF writer flips
//! the y axis when it converts to points; the preview uses the same
//! orientation as the screen.

use crate::constants::EPSILON_MM;
use crate::types::{Result, invalid};

/// A point in millimeters
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point
    pub fn distance(&self, other: Point) -> f32 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
    }
}

/// A width/height pair in millimeters
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// A rectangular area in millimeters
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    /// X position (left edge)
    pub x: f32,
    /// Y position (top edge)
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Right edge x coordinate
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Bottom edge y coordinate
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Center x coordinate
    pub fn center_x(&self) -> f32 {
        self.x + self.width / 2.0
    }

    /// Center y coordinate
    pub fn center_y(&self) -> f32 {
        self.y + self.height / 2.0
    }

    /// Check if a point lies inside the rectangle, allowing for float noise
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.x - EPSILON_MM
            && p.x <= self.right() + EPSILON_MM
            && p.y >= self.y - EPSILON_MM
            && p.y <= self.bottom() + EPSILON_MM
    }
}

/// The drawable rectangle handed to a pattern drawer.
///
/// Construction fails unless the rectangle has a positive width and height,
/// so a `RenderContext` is always safe to sweep.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderContext {
    rect: Rect,
}

impl RenderContext {
    /// Build the context for a page of `page` size with the given margins
    /// removed.
    pub fn new(page: Size, top: f32, bottom: f32, left: f32, right: f32) -> Result<Self> {
        for (name, value) in [
            ("top", top),
            ("bottom", bottom),
            ("left", left),
            ("right", right),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(invalid(format!(
                    "{} margin must be a non-negative number, got {}",
                    name, value
                )));
            }
        }

        Self::from_rect(Rect::new(
            left,
            top,
            page.width - left - right,
            page.height - top - bottom,
        ))
    }

    /// Use an already computed rectangle as the drawable area
    pub fn from_rect(rect: Rect) -> Result<Self> {
        if !(rect.width.is_finite() && rect.height.is_finite()) {
            return Err(invalid("Drawable area is not finite"));
        }
        if rect.width <= 0.0 || rect.height <= 0.0 {
            return Err(invalid(format!(
                "Margins leave no drawable area ({:.1} x {:.1} mm)",
                rect.width, rect.height
            )));
        }
        Ok(Self { rect })
    }

    pub fn rect(&self) -> Rect {
        self.rect
    }

    pub fn left(&self) -> f32 {
        self.rect.x
    }

    pub fn top(&self) -> f32 {
        self.rect.y
    }

    pub fn right(&self) -> f32 {
        self.rect.right()
    }

    pub fn bottom(&self) -> f32 {
        self.rect.bottom()
    }

    pub fn width(&self) -> f32 {
        self.rect.width
    }

    pub fn height(&self) -> f32 {
        self.rect.height
    }
}

/// Offsets `start, start + step, ...` up to and including `end`.
///
/// Each offset is computed from its index so long sweeps do not accumulate
/// rounding error.
pub fn sweep(start: f32, end: f32, step: f32) -> impl Iterator<Item = f32> {
    debug_assert!(step > 0.0);
    (0usize..)
        .map(move |k| start + k as f32 * step)
        .take_while(move |v| *v <= end + EPSILON_MM)
}

/// Clip the infinite line through `origin` with direction `dir` to `rect`.
///
/// Returns `None` if the line misses the rectangle or only touches it in a
/// single point.
pub fn clip_line(origin: Point, dir: (f32, f32), rect: &Rect) -> Option<(Point, Point)> {
    let (dx, dy) = dir;
    let mut t_min = f32::NEG_INFINITY;
    let mut t_max = f32::INFINITY;

    // Liang-Barsky against each pair of slabs
    for (p, d, lo, hi) in [
        (origin.x, dx, rect.x, rect.right()),
        (origin.y, dy, rect.y, rect.bottom()),
    ] {
        if d.abs() < f32::EPSILON {
            if p < lo - EPSILON_MM || p > hi + EPSILON_MM {
                return None;
            }
            continue;
        }
        let t1 = (lo - p) / d;
        let t2 = (hi - p) / d;
        t_min = t_min.max(t1.min(t2));
        t_max = t_max.min(t1.max(t2));
    }

    if t_max - t_min <= EPSILON_MM {
        return None;
    }

    Some((
        Point::new(origin.x + t_min * dx, origin.y + t_min * dy),
        Point::new(origin.x + t_max * dx, origin.y + t_max * dy),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_context_from_margins() {
        let ctx = RenderContext::new(Size::new(148.0, 210.0), 10.0, 10.0, 15.0, 10.0).unwrap();
        assert_eq!(ctx.left(), 15.0);
        assert_eq!(ctx.top(), 10.0);
        assert_eq!(ctx.width(), 123.0);
        assert_eq!(ctx.height(), 190.0);
        assert_eq!(ctx.right(), 138.0);
        assert_eq!(ctx.bottom(), 200.0);
    }

    #[test]
    fn test_render_context_rejects_empty_area() {
        assert!(RenderContext::new(Size::new(100.0, 100.0), 10.0, 10.0, 50.0, 50.0).is_err());
        assert!(RenderContext::new(Size::new(100.0, 100.0), 60.0, 40.0, 0.0, 0.0).is_err());
        assert!(RenderContext::new(Size::new(100.0, 100.0), -1.0, 0.0, 0.0, 0.0).is_err());
    }

    #[test]
    fn test_sweep_includes_end() {
        let values: Vec<f32> = sweep(0.0, 10.0, 5.0).collect();
        assert_eq!(values, vec![0.0, 5.0, 10.0]);

        let values: Vec<f32> = sweep(0.0, 9.0, 5.0).collect();
        assert_eq!(values, vec![0.0, 5.0]);
    }

    #[test]
    fn test_clip_horizontal_line() {
        let rect = Rect::new(0.0, 0.0, 100.0, 50.0);
        let (a, b) = clip_line(Point::new(-20.0, 25.0), (1.0, 0.0), &rect).unwrap();
        assert_eq!(a, Point::new(0.0, 25.0));
        assert_eq!(b, Point::new(100.0, 25.0));
    }

    #[test]
    fn test_clip_diagonal_line() {
        let rect = Rect::new(0.0, 0.0, 10.0, 10.0);
        let d = std::f32::consts::FRAC_1_SQRT_2;
        let (a, b) = clip_line(Point::new(0.0, 0.0), (d, d), &rect).unwrap();
        assert!(a.distance(Point::new(0.0, 0.0)) < 1e-4);
        assert!(b.distance(Point::new(10.0, 10.0)) < 1e-4);
    }

    #[test]
    fn test_clip_line_missing_rect() {
        let rect = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(clip_line(Point::new(0.0, 20.0), (1.0, 0.0), &rect).is_none());
        // Touches a single corner only
        let d = std::f32::consts::FRAC_1_SQRT_2;
        assert!(clip_line(Point::new(10.0, 0.0), (d, d), &rect).is_none());
    }
}
