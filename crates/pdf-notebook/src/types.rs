use std::fmt;
use std::str::FromStr;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum NotebookError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("PDF error: {0}")]
    Pdf(#[from] lopdf::Error),
    #[error("Render error: {0}")]
    Render(String),
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[cfg(feature = "serde")]
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("Task join error: {0}")]
    TaskJoin(#[from] tokio::task::JoinError),
}

pub type Result<T> = std::result::Result<T, NotebookError>;

pub(crate) fn invalid(msg: impl Into<String>) -> NotebookError {
    NotebookError::InvalidConfig(msg.into())
}

/// Paper orientation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Orientation {
    /// Portrait: height > width
    #[default]
    Portrait,
    /// Landscape: width > height
    Landscape,
}

impl Orientation {
    pub fn name(self) -> &'static str {
        match self {
            Orientation::Portrait => "portrait",
            Orientation::Landscape => "landscape",
        }
    }
}

impl FromStr for Orientation {
    type Err = NotebookError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "portrait" => Ok(Orientation::Portrait),
            "landscape" => Ok(Orientation::Landscape),
            other => Err(invalid(format!("Unknown orientation '{}'", other))),
        }
    }
}

/// Standard notebook page sizes
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum PageSize {
    A4,
    #[default]
    A5,
    A6,
    B5,
    Letter,
    Custom { width_mm: f32, height_mm: f32 },
}

impl PageSize {
    /// Get base dimensions (always portrait for the named sizes)
    pub fn dimensions_mm(self) -> (f32, f32) {
        match self {
            PageSize::A4 => (210.0, 297.0),
            PageSize::A5 => (148.0, 210.0),
            PageSize::A6 => (105.0, 148.0),
            PageSize::B5 => (176.0, 250.0),
            PageSize::Letter => (215.9, 279.4),
            PageSize::Custom {
                width_mm,
                height_mm,
            } => (width_mm, height_mm),
        }
    }

    /// Get dimensions with orientation applied
    pub fn dimensions_with_orientation(self, orientation: Orientation) -> (f32, f32) {
        let (w, h) = self.dimensions_mm();
        match orientation {
            Orientation::Portrait => (w, h),
            Orientation::Landscape => (h, w),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            PageSize::A4 => "a4",
            PageSize::A5 => "a5",
            PageSize::A6 => "a6",
            PageSize::B5 => "b5",
            PageSize::Letter => "letter",
            PageSize::Custom { .. } => "custom",
        }
    }
}

impl FromStr for PageSize {
    type Err = NotebookError;

    /// Parses a named size. Custom sizes are written as `WIDTHxHEIGHT` in mm.
    fn from_str(s: &str) -> Result<Self> {
        let lower = s.trim().to_ascii_lowercase();
        match lower.as_str() {
            "a4" => Ok(PageSize::A4),
            "a5" => Ok(PageSize::A5),
            "a6" => Ok(PageSize::A6),
            "b5" => Ok(PageSize::B5),
            "letter" => Ok(PageSize::Letter),
            other => {
                let (w, h) = other
                    .split_once('x')
                    .ok_or_else(|| invalid(format!("Unknown page size '{}'", s)))?;
                let width_mm = w
                    .trim()
                    .parse::<f32>()
                    .map_err(|_| invalid(format!("Invalid page width in '{}'", s)))?;
                let height_mm = h
                    .trim()
                    .parse::<f32>()
                    .map_err(|_| invalid(format!("Invalid page height in '{}'", s)))?;
                Ok(PageSize::Custom {
                    width_mm,
                    height_mm,
                })
            }
        }
    }
}

impl fmt::Display for PageSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PageSize::Custom {
                width_mm,
                height_mm,
            } => write!(f, "{}x{}", width_mm, height_mm),
            named => f.write_str(named.name()),
        }
    }
}

/// Page margins in millimeters.
///
/// `binding_mm` is added on the binding side of each page: the left edge,
/// or the right edge of even pages when margins are mirrored.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Margins {
    pub top_mm: f32,
    pub bottom_mm: f32,
    pub left_mm: f32,
    pub right_mm: f32,
    pub binding_mm: f32,
}

impl Default for Margins {
    fn default() -> Self {
        Self {
            top_mm: 10.0,
            bottom_mm: 10.0,
            left_mm: 10.0,
            right_mm: 10.0,
            binding_mm: 5.0,
        }
    }
}

impl Margins {
    /// Create uniform margins on all sides with no binding allowance
    pub fn uniform(margin_mm: f32) -> Self {
        Self {
            top_mm: margin_mm,
            bottom_mm: margin_mm,
            left_mm: margin_mm,
            right_mm: margin_mm,
            binding_mm: 0.0,
        }
    }

    /// Resolve (left, right) for a page, adding the binding allowance
    pub fn horizontal_for_page(&self, page_number: usize, mirror: bool) -> (f32, f32) {
        if mirror && page_number % 2 == 0 {
            (self.right_mm, self.left_mm + self.binding_mm)
        } else {
            (self.left_mm + self.binding_mm, self.right_mm)
        }
    }
}

/// Punch-hole guide layouts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum PunchHoles {
    #[default]
    None,
    /// Two holes 80mm apart, centered vertically
    TwoHole,
    /// Four holes (European spacing)
    FourHole,
}

impl PunchHoles {
    pub fn name(self) -> &'static str {
        match self {
            PunchHoles::None => "none",
            PunchHoles::TwoHole => "2-hole",
            PunchHoles::FourHole => "4-hole",
        }
    }
}

impl FromStr for PunchHoles {
    type Err = NotebookError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "none" => Ok(PunchHoles::None),
            "2-hole" | "two-hole" => Ok(PunchHoles::TwoHole),
            "4-hole" | "four-hole" => Ok(PunchHoles::FourHole),
            other => Err(invalid(format!("Unknown punch-hole layout '{}'", other))),
        }
    }
}

/// Page decorations added around the pattern
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Decorations {
    /// Print page numbers in the outer bottom corner
    pub page_numbers: bool,
    /// Outline the drawable area with a faint dashed rectangle
    pub margin_guides: bool,
    /// Punch-hole guides on the left edge
    pub punch_holes: PunchHoles,
    /// Put the binding margin on the right of even pages
    pub mirror_margins: bool,
}

/// Statistics about a generated notebook
#[derive(Debug, Clone, PartialEq)]
pub struct NotebookStatistics {
    /// Logical notebook pages requested
    pub logical_pages: usize,
    /// Logical pages after padding for the imposition
    pub padded_pages: usize,
    /// Number of blank pages added for padding
    pub blank_pages_added: usize,
    /// Physical sheets of paper
    pub sheets: usize,
    /// Pages in the output PDF
    pub output_pages: usize,
}

#[cfg(feature = "serde")]
mod serde_impls {
    use super::*;
    use serde::{Deserialize, Serialize};

    impl Serialize for PageSize {
        fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
        where
            S: serde::Serializer,
        {
            use serde::ser::SerializeStruct;
            match self {
                PageSize::Custom {
                    width_mm,
                    height_mm,
                } => {
                    let mut s = serializer.serialize_struct("Custom", 2)?;
                    s.serialize_field("width_mm", width_mm)?;
                    s.serialize_field("height_mm", height_mm)?;
                    s.end()
                }
                named => serializer.serialize_str(named.name()),
            }
        }
    }

    impl<'de> Deserialize<'de> for PageSize {
        fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
        where
            D: serde::Deserializer<'de>,
        {
            use serde::de::{self, MapAccess, Visitor};

            struct PageSizeVisitor;

            impl<'de> Visitor<'de> for PageSizeVisitor {
                type Value = PageSize;

                fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                    formatter.write_str("a page size name or {width_mm, height_mm}")
                }

                fn visit_str<E>(self, value: &str) -> std::result::Result<PageSize, E>
                where
                    E: de::Error,
                {
                    value.parse().map_err(|_| {
                        de::Error::unknown_variant(
                            value,
                            &["a4", "a5", "a6", "b5", "letter", "WxH"],
                        )
                    })
                }

                fn visit_map<M>(self, mut map: M) -> std::result::Result<PageSize, M::Error>
                where
                    M: MapAccess<'de>,
                {
                    let mut width_mm = None;
                    let mut height_mm = None;

                    while let Some(key) = map.next_key::<String>()? {
                        match key.as_str() {
                            "width_mm" => width_mm = Some(map.next_value()?),
                            "height_mm" => height_mm = Some(map.next_value()?),
                            _ => {
                                let _: serde::de::IgnoredAny = map.next_value()?;
                            }
                        }
                    }

                    match (width_mm, height_mm) {
                        (Some(w), Some(h)) => Ok(PageSize::Custom {
                            width_mm: w,
                            height_mm: h,
                        }),
                        _ => Err(de::Error::missing_field("width_mm or height_mm")),
                    }
                }
            }

            deserializer.deserialize_any(PageSizeVisitor)
        }
    }
}
