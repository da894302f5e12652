//! Drawing instructions shared by the PDF writer and the raster preview
//!
//! Pattern drawers, page decorations and imposition guides only ever emit
//! these primitives. Both output adapters consume the same sequence, which
//! keeps the preview and the document visually identical.

use std::fmt;
use std::str::FromStr;

use crate::geometry::Point;
use crate::types::{NotebookError, Result, invalid};

/// An RGB color with components in `0.0..=1.0`
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    pub const BLACK: Color = Color::gray(0.0);

    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    pub const fn gray(level: f32) -> Self {
        Self {
            r: level,
            g: level,
            b: level,
        }
    }

    pub fn is_valid(&self) -> bool {
        [self.r, self.g, self.b]
            .iter()
            .all(|c| c.is_finite() && (0.0..=1.0).contains(c))
    }

    /// Convert to 8-bit channels
    pub fn to_rgb8(self) -> [u8; 3] {
        [self.r, self.g, self.b].map(|c| (c.clamp(0.0, 1.0) * 255.0).round() as u8)
    }
}

impl Default for Color {
    /// Light gray, the usual color of notebook rulings
    fn default() -> Self {
        Color::gray(0.75)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{},{}", self.r, self.g, self.b)
    }
}

impl FromStr for Color {
    type Err = NotebookError;

    /// Accepts a single gray level (`0.75`) or `r,g,b` components.
    fn from_str(s: &str) -> Result<Self> {
        let components = s
            .split(',')
            .map(|c| c.trim().parse::<f32>())
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|_| invalid(format!("Invalid color '{}'", s)))?;
        let color = match components.as_slice() {
            [level] => Color::gray(*level),
            [r, g, b] => Color::rgb(*r, *g, *b),
            _ => return Err(invalid(format!("Invalid color '{}'", s))),
        };
        if !color.is_valid() {
            return Err(invalid(format!(
                "Color components must be between 0 and 1, got '{}'",
                s
            )));
        }
        Ok(color)
    }
}

/// Dash pattern in points
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Dash {
    pub dash_pt: f32,
    pub gap_pt: f32,
}

/// How a line or outline is stroked
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StrokeStyle {
    pub color: Color,
    /// Line weight in points
    pub weight_pt: f32,
    pub dash: Option<Dash>,
}

impl StrokeStyle {
    pub fn solid(color: Color, weight_pt: f32) -> Self {
        Self {
            color,
            weight_pt,
            dash: None,
        }
    }

    pub fn dashed(color: Color, weight_pt: f32, dash: Dash) -> Self {
        Self {
            color,
            weight_pt,
            dash: Some(dash),
        }
    }

    pub fn with_weight(self, weight_pt: f32) -> Self {
        Self { weight_pt, ..self }
    }
}

/// One drawing primitive in page-relative millimeters
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DrawInstruction {
    Line {
        from: Point,
        to: Point,
        stroke: StrokeStyle,
    },
    Circle {
        center: Point,
        radius: f32,
        fill: Option<Color>,
        stroke: Option<StrokeStyle>,
    },
    /// Closed polygon through `points`
    Polygon {
        points: Vec<Point>,
        fill: Option<Color>,
        stroke: Option<StrokeStyle>,
    },
    /// Helvetica text, `position` is the baseline start
    Text {
        position: Point,
        text: String,
        size_pt: f32,
        color: Color,
    },
}

impl DrawInstruction {
    pub fn line(from: Point, to: Point, stroke: StrokeStyle) -> Self {
        DrawInstruction::Line { from, to, stroke }
    }

    pub fn dot(center: Point, radius: f32, color: Color) -> Self {
        DrawInstruction::Circle {
            center,
            radius,
            fill: Some(color),
            stroke: None,
        }
    }

    pub fn ring(center: Point, radius: f32, stroke: StrokeStyle) -> Self {
        DrawInstruction::Circle {
            center,
            radius,
            fill: None,
            stroke: Some(stroke),
        }
    }

    pub fn outline(points: Vec<Point>, stroke: StrokeStyle) -> Self {
        DrawInstruction::Polygon {
            points,
            fill: None,
            stroke: Some(stroke),
        }
    }

    /// Apply a point mapping to every coordinate of the instruction
    pub fn map_points(&self, f: impl Fn(Point) -> Point) -> Self {
        match self {
            DrawInstruction::Line { from, to, stroke } => DrawInstruction::Line {
                from: f(*from),
                to: f(*to),
                stroke: *stroke,
            },
            DrawInstruction::Circle {
                center,
                radius,
                fill,
                stroke,
            } => DrawInstruction::Circle {
                center: f(*center),
                radius: *radius,
                fill: *fill,
                stroke: *stroke,
            },
            DrawInstruction::Polygon {
                points,
                fill,
                stroke,
            } => DrawInstruction::Polygon {
                points: points.iter().map(|p| f(*p)).collect(),
                fill: *fill,
                stroke: *stroke,
            },
            DrawInstruction::Text {
                position,
                text,
                size_pt,
                color,
            } => DrawInstruction::Text {
                position: f(*position),
                text: text.clone(),
                size_pt: *size_pt,
                color: *color,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_parsing() {
        assert_eq!("0.5".parse::<Color>().unwrap(), Color::gray(0.5));
        assert_eq!(
            "1, 0, 0.25".parse::<Color>().unwrap(),
            Color::rgb(1.0, 0.0, 0.25)
        );
        assert!("1.5".parse::<Color>().is_err());
        assert!("0.1,0.2".parse::<Color>().is_err());
        assert!("red".parse::<Color>().is_err());
    }

    #[test]
    fn test_color_display_round_trips() {
        let color = Color::rgb(0.2, 0.4, 0.6);
        assert_eq!(color.to_string().parse::<Color>().unwrap(), color);
    }

    #[test]
    fn test_map_points_keeps_style() {
        let stroke = StrokeStyle::solid(Color::BLACK, 0.5);
        let line = DrawInstruction::line(Point::new(1.0, 2.0), Point::new(3.0, 4.0), stroke);
        let moved = line.map_points(|p| Point::new(p.x + 10.0, p.y));
        assert_eq!(
            moved,
            DrawInstruction::line(Point::new(11.0, 2.0), Point::new(13.0, 4.0), stroke)
        );
    }
}
