//! Pattern drawing
//!
//! Each pattern kind turns a [`RenderContext`] into a list of
//! [`DrawInstruction`]s. Drawing is a pure function of its inputs, so the
//! same configuration always yields the same instruction sequence.
//!
//! Supported patterns:
//! - Lined (pauta): horizontal rules, optional header line
//! - Dotted: bullet-journal dot grid
//! - Squared (cuadrícula): graph paper
//! - Cornell: cue column, note area and summary band
//! - Isometric: triangular grid for technical drawing
//! - Hexagonal: offset rows of hexagons
//! - Blank

mod cornell;
mod dotted;
mod hexagonal;
mod isometric;
mod lined;
mod squared;

use std::fmt;
use std::str::FromStr;

use crate::draw::{Color, DrawInstruction, StrokeStyle};
use crate::geometry::RenderContext;
use crate::types::{NotebookError, Result, invalid};

pub use hexagonal::hexagon_vertices;

/// Pattern kind and its kind-specific parameters (all in mm)
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "lowercase"))]
pub enum PatternKind {
    Lined {
        line_spacing_mm: f32,
    },
    Dotted {
        dot_spacing_mm: f32,
        dot_radius_mm: f32,
    },
    Squared {
        grid_size_mm: f32,
    },
    Cornell {
        line_spacing_mm: f32,
        cue_column_mm: f32,
        summary_band_mm: f32,
    },
    Isometric {
        spacing_mm: f32,
        angle_deg: f32,
    },
    Hexagonal {
        cell_size_mm: f32,
    },
    Blank,
}

impl Default for PatternKind {
    fn default() -> Self {
        PatternKind::default_for(PatternKindName::Squared)
    }
}

/// Parameter-free name of a pattern kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatternKindName {
    Lined,
    Dotted,
    Squared,
    Cornell,
    Isometric,
    Hexagonal,
    Blank,
}

impl PatternKindName {
    pub const ALL: [PatternKindName; 7] = [
        PatternKindName::Lined,
        PatternKindName::Dotted,
        PatternKindName::Squared,
        PatternKindName::Cornell,
        PatternKindName::Isometric,
        PatternKindName::Hexagonal,
        PatternKindName::Blank,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            PatternKindName::Lined => "lined",
            PatternKindName::Dotted => "dotted",
            PatternKindName::Squared => "squared",
            PatternKindName::Cornell => "cornell",
            PatternKindName::Isometric => "isometric",
            PatternKindName::Hexagonal => "hexagonal",
            PatternKindName::Blank => "blank",
        }
    }
}

impl fmt::Display for PatternKindName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PatternKindName {
    type Err = NotebookError;

    fn from_str(s: &str) -> Result<Self> {
        let lower = s.trim().to_ascii_lowercase();
        PatternKindName::ALL
            .into_iter()
            .find(|name| name.as_str() == lower)
            .ok_or_else(|| invalid(format!("Unsupported pattern kind '{}'", s)))
    }
}

impl PatternKind {
    /// The pattern with its customary parameters
    pub fn default_for(name: PatternKindName) -> Self {
        match name {
            // 8mm is the standard Spanish ruling
            PatternKindName::Lined => PatternKind::Lined {
                line_spacing_mm: 8.0,
            },
            PatternKindName::Dotted => PatternKind::Dotted {
                dot_spacing_mm: 5.0,
                dot_radius_mm: 0.25,
            },
            PatternKindName::Squared => PatternKind::Squared { grid_size_mm: 5.0 },
            PatternKindName::Cornell => PatternKind::Cornell {
                line_spacing_mm: 8.0,
                cue_column_mm: 30.0,
                summary_band_mm: 30.0,
            },
            PatternKindName::Isometric => PatternKind::Isometric {
                spacing_mm: 5.0,
                angle_deg: 60.0,
            },
            PatternKindName::Hexagonal => PatternKind::Hexagonal { cell_size_mm: 5.0 },
            PatternKindName::Blank => PatternKind::Blank,
        }
    }

    pub fn name(&self) -> PatternKindName {
        match self {
            PatternKind::Lined { .. } => PatternKindName::Lined,
            PatternKind::Dotted { .. } => PatternKindName::Dotted,
            PatternKind::Squared { .. } => PatternKindName::Squared,
            PatternKind::Cornell { .. } => PatternKindName::Cornell,
            PatternKind::Isometric { .. } => PatternKindName::Isometric,
            PatternKind::Hexagonal { .. } => PatternKindName::Hexagonal,
            PatternKind::Blank => PatternKindName::Blank,
        }
    }

    /// The main spacing parameter of the pattern, if it has one
    pub fn spacing_mm(&self) -> Option<f32> {
        match *self {
            PatternKind::Lined { line_spacing_mm } => Some(line_spacing_mm),
            PatternKind::Dotted { dot_spacing_mm, .. } => Some(dot_spacing_mm),
            PatternKind::Squared { grid_size_mm } => Some(grid_size_mm),
            PatternKind::Cornell {
                line_spacing_mm, ..
            } => Some(line_spacing_mm),
            PatternKind::Isometric { spacing_mm, .. } => Some(spacing_mm),
            PatternKind::Hexagonal { cell_size_mm } => Some(cell_size_mm),
            PatternKind::Blank => None,
        }
    }

    /// Replace the main spacing parameter, keeping the others
    pub fn with_spacing_mm(self, spacing: f32) -> Self {
        match self {
            PatternKind::Lined { .. } => PatternKind::Lined {
                line_spacing_mm: spacing,
            },
            PatternKind::Dotted { dot_radius_mm, .. } => PatternKind::Dotted {
                dot_spacing_mm: spacing,
                dot_radius_mm,
            },
            PatternKind::Squared { .. } => PatternKind::Squared {
                grid_size_mm: spacing,
            },
            PatternKind::Cornell {
                cue_column_mm,
                summary_band_mm,
                ..
            } => PatternKind::Cornell {
                line_spacing_mm: spacing,
                cue_column_mm,
                summary_band_mm,
            },
            PatternKind::Isometric { angle_deg, .. } => PatternKind::Isometric {
                spacing_mm: spacing,
                angle_deg,
            },
            PatternKind::Hexagonal { .. } => PatternKind::Hexagonal {
                cell_size_mm: spacing,
            },
            PatternKind::Blank => PatternKind::Blank,
        }
    }

    /// Check that the pattern's regions fit the drawable area
    pub fn check_fits(&self, context: &RenderContext) -> Result<()> {
        match *self {
            PatternKind::Cornell {
                cue_column_mm,
                summary_band_mm,
                ..
            } => cornell::check_regions(context, cue_column_mm, summary_band_mm),
            _ => Ok(()),
        }
    }

    /// Check every numeric parameter of the kind
    pub fn validate(&self) -> Result<()> {
        match *self {
            PatternKind::Lined { line_spacing_mm } => positive("line spacing", line_spacing_mm),
            PatternKind::Dotted {
                dot_spacing_mm,
                dot_radius_mm,
            } => {
                positive("dot spacing", dot_spacing_mm)?;
                positive("dot radius", dot_radius_mm)
            }
            PatternKind::Squared { grid_size_mm } => positive("grid size", grid_size_mm),
            PatternKind::Cornell {
                line_spacing_mm,
                cue_column_mm,
                summary_band_mm,
            } => {
                positive("line spacing", line_spacing_mm)?;
                positive("cue column width", cue_column_mm)?;
                positive("summary band height", summary_band_mm)
            }
            PatternKind::Isometric {
                spacing_mm,
                angle_deg,
            } => {
                positive("isometric spacing", spacing_mm)?;
                if !(angle_deg.is_finite() && angle_deg > 0.0 && angle_deg < 90.0) {
                    return Err(invalid(format!(
                        "Isometric angle must be between 0 and 90 degrees, got {}",
                        angle_deg
                    )));
                }
                Ok(())
            }
            PatternKind::Hexagonal { cell_size_mm } => positive("hexagon size", cell_size_mm),
            PatternKind::Blank => Ok(()),
        }
    }
}

/// Stroke settings shared by every pattern kind
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PatternStyle {
    pub color: Color,
    /// Line weight in points
    pub weight_pt: f32,
    /// Draw a header line at the top of lined areas
    pub header_line: bool,
    /// Weight of the header line; body weight when unset
    pub header_weight_pt: Option<f32>,
}

impl Default for PatternStyle {
    fn default() -> Self {
        Self {
            color: Color::default(),
            weight_pt: 0.3,
            header_line: false,
            header_weight_pt: None,
        }
    }
}

impl PatternStyle {
    pub fn stroke(&self) -> StrokeStyle {
        StrokeStyle::solid(self.color, self.weight_pt)
    }

    pub fn header_stroke(&self) -> StrokeStyle {
        self.stroke()
            .with_weight(self.header_weight_pt.unwrap_or(self.weight_pt))
    }

    pub fn validate(&self) -> Result<()> {
        if !self.color.is_valid() {
            return Err(invalid("Stroke color components must be between 0 and 1"));
        }
        positive("stroke weight", self.weight_pt)?;
        if let Some(weight) = self.header_weight_pt {
            positive("header line weight", weight)?;
        }
        Ok(())
    }
}

/// A complete pattern: the kind with its parameters plus shared style
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PatternConfig {
    pub kind: PatternKind,
    pub style: PatternStyle,
}

impl PatternConfig {
    pub fn new(kind: PatternKind, style: PatternStyle) -> Self {
        Self { kind, style }
    }

    pub fn validate(&self) -> Result<()> {
        self.kind.validate()?;
        self.style.validate()
    }
}

/// Draw the configured pattern into the drawable area.
///
/// Fails with [`NotebookError::InvalidConfig`] before producing anything if
/// a spacing or size is not positive, or if the pattern's regions do not fit
/// the area.
pub fn draw(context: &RenderContext, config: &PatternConfig) -> Result<Vec<DrawInstruction>> {
    config.validate()?;

    let style = &config.style;
    let instructions = match config.kind {
        PatternKind::Lined { line_spacing_mm } => {
            lined::draw_lined(context, line_spacing_mm, style)
        }
        PatternKind::Dotted {
            dot_spacing_mm,
            dot_radius_mm,
        } => dotted::draw_dotted(context, dot_spacing_mm, dot_radius_mm, style),
        PatternKind::Squared { grid_size_mm } => {
            squared::draw_squared(context, grid_size_mm, style)
        }
        PatternKind::Cornell {
            line_spacing_mm,
            cue_column_mm,
            summary_band_mm,
        } => cornell::draw_cornell(
            context,
            line_spacing_mm,
            cue_column_mm,
            summary_band_mm,
            style,
        )?,
        PatternKind::Isometric {
            spacing_mm,
            angle_deg,
        } => isometric::draw_isometric(context, spacing_mm, angle_deg, style),
        PatternKind::Hexagonal { cell_size_mm } => {
            hexagonal::draw_hexagonal(context, cell_size_mm, style)
        }
        PatternKind::Blank => Vec::new(),
    };

    log::debug!(
        "Drew {} pattern: {} instructions",
        config.kind.name(),
        instructions.len()
    );
    Ok(instructions)
}

fn positive(name: &str, value: f32) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(invalid(format!("{} must be positive, got {}", name, value)))
    }
}
