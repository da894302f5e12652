use std::collections::BTreeMap;
use std::str::FromStr;

use crate::draw::Color;
use crate::geometry::{RenderContext, Size};
use crate::layout::ImpositionConfig;
use crate::pattern::{PatternConfig, PatternKind, PatternKindName, PatternStyle};
use crate::types::*;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Complete notebook configuration
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct NotebookConfig {
    // Paper
    pub page_size: PageSize,
    pub orientation: Orientation,

    // Margins
    pub margins: Margins,

    // Pattern
    pub pattern: PatternConfig,

    // Sheet arrangement
    pub imposition: ImpositionConfig,

    // Total logical pages
    pub pages: usize,

    // Page numbers, guides, punch holes
    pub decorations: Decorations,

    // Bleed around each printed sheet (mm)
    pub bleed_mm: f32,
}

impl Default for NotebookConfig {
    fn default() -> Self {
        Self {
            page_size: PageSize::A5,
            orientation: Orientation::Portrait,
            margins: Margins::default(),
            pattern: PatternConfig::default(),
            imposition: ImpositionConfig::default(),
            pages: 32,
            decorations: Decorations::default(),
            bleed_mm: 0.0,
        }
    }
}

impl NotebookConfig {
    /// Printed sheet size in mm, orientation applied, bleed excluded
    pub fn sheet_size(&self) -> Size {
        let (w, h) = self.page_size.dimensions_with_orientation(self.orientation);
        Size::new(w, h)
    }

    /// Logical page size: one slot of the sheet
    pub fn page_dimensions(&self) -> Size {
        self.imposition.slot_size(self.sheet_size())
    }

    /// Drawable area of a logical page, binding margin resolved
    pub fn page_context(&self, page_number: usize) -> Result<RenderContext> {
        let (left, right) = self
            .margins
            .horizontal_for_page(page_number, self.decorations.mirror_margins);
        RenderContext::new(
            self.page_dimensions(),
            self.margins.top_mm,
            self.margins.bottom_mm,
            left,
            right,
        )
    }

    /// Load options from JSON file
    #[cfg(feature = "serde")]
    pub async fn load(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let bytes = tokio::fs::read(path).await?;
        let config: Self = serde_json::from_slice(&bytes)
            .map_err(|e| invalid(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Save options to JSON file
    #[cfg(feature = "serde")]
    pub async fn save(&self, path: impl AsRef<std::path::Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        tokio::fs::write(path, json).await?;
        Ok(())
    }

    /// Validate the options
    pub fn validate(&self) -> Result<()> {
        let (w, h) = self.page_size.dimensions_mm();
        if !(w.is_finite() && h.is_finite() && w > 0.0 && h > 0.0) {
            return Err(invalid(format!(
                "Page size must be positive, got {} x {} mm",
                w, h
            )));
        }

        if self.pages == 0 {
            return Err(invalid("A notebook needs at least one page"));
        }

        if !(self.bleed_mm.is_finite() && self.bleed_mm >= 0.0) {
            return Err(invalid(format!(
                "Bleed must be a non-negative number, got {}",
                self.bleed_mm
            )));
        }

        if !(self.margins.binding_mm.is_finite() && self.margins.binding_mm >= 0.0) {
            return Err(invalid(format!(
                "Binding margin must be a non-negative number, got {}",
                self.margins.binding_mm
            )));
        }

        self.imposition.validate()?;
        self.pattern.validate()?;

        // Mirroring only swaps sides, so the first page stands for all
        let context = self.page_context(1)?;
        self.pattern.kind.check_fits(&context)?;

        Ok(())
    }

    /// Flatten into `key -> value` strings.
    ///
    /// Only the parameters of the selected pattern kind are written.
    pub fn to_key_values(&self) -> BTreeMap<String, String> {
        let mut map = BTreeMap::new();
        let mut put = |key: &str, value: String| {
            map.insert(key.to_string(), value);
        };

        put("page_size", self.page_size.to_string());
        put("orientation", self.orientation.name().to_string());

        put("margin_top", self.margins.top_mm.to_string());
        put("margin_bottom", self.margins.bottom_mm.to_string());
        put("margin_left", self.margins.left_mm.to_string());
        put("margin_right", self.margins.right_mm.to_string());
        put("binding_margin", self.margins.binding_mm.to_string());

        put("pattern", self.pattern.kind.name().to_string());
        match self.pattern.kind {
            PatternKind::Lined { line_spacing_mm } => {
                put("line_spacing", line_spacing_mm.to_string());
            }
            PatternKind::Dotted {
                dot_spacing_mm,
                dot_radius_mm,
            } => {
                put("dot_spacing", dot_spacing_mm.to_string());
                put("dot_radius", dot_radius_mm.to_string());
            }
            PatternKind::Squared { grid_size_mm } => {
                put("grid_size", grid_size_mm.to_string());
            }
            PatternKind::Cornell {
                line_spacing_mm,
                cue_column_mm,
                summary_band_mm,
            } => {
                put("line_spacing", line_spacing_mm.to_string());
                put("cue_column", cue_column_mm.to_string());
                put("summary_band", summary_band_mm.to_string());
            }
            PatternKind::Isometric {
                spacing_mm,
                angle_deg,
            } => {
                put("iso_spacing", spacing_mm.to_string());
                put("iso_angle", angle_deg.to_string());
            }
            PatternKind::Hexagonal { cell_size_mm } => {
                put("hex_size", cell_size_mm.to_string());
            }
            PatternKind::Blank => {}
        }

        let style = &self.pattern.style;
        put("line_color", style.color.to_string());
        put("line_weight", style.weight_pt.to_string());
        put("header_line", style.header_line.to_string());
        if let Some(weight) = style.header_weight_pt {
            put("header_weight", weight.to_string());
        }

        put(
            "pages_per_sheet",
            self.imposition.pages_per_sheet.to_string(),
        );
        put("fold_lines", self.imposition.fold_lines.to_string());
        put("pages", self.pages.to_string());

        let decorations = &self.decorations;
        put("page_numbers", decorations.page_numbers.to_string());
        put("margin_guides", decorations.margin_guides.to_string());
        put("punch_holes", decorations.punch_holes.name().to_string());
        put("mirror_margins", decorations.mirror_margins.to_string());

        put("bleed", self.bleed_mm.to_string());
        map
    }

    /// Rebuild a configuration from its flat form.
    ///
    /// Missing keys take their default value; values that do not parse are
    /// rejected. The result is not validated.
    pub fn from_key_values(values: &BTreeMap<String, String>) -> Result<Self> {
        let defaults = Self::default();
        let get = KeyValues(values);

        let page_size = get.value("page_size", defaults.page_size)?;
        let orientation = get.value("orientation", defaults.orientation)?;

        let margins = Margins {
            top_mm: get.value("margin_top", defaults.margins.top_mm)?,
            bottom_mm: get.value("margin_bottom", defaults.margins.bottom_mm)?,
            left_mm: get.value("margin_left", defaults.margins.left_mm)?,
            right_mm: get.value("margin_right", defaults.margins.right_mm)?,
            binding_mm: get.value("binding_margin", defaults.margins.binding_mm)?,
        };

        let kind_name: PatternKindName = get.value("pattern", defaults.pattern.kind.name())?;
        let kind = match PatternKind::default_for(kind_name) {
            PatternKind::Lined { line_spacing_mm } => PatternKind::Lined {
                line_spacing_mm: get.value("line_spacing", line_spacing_mm)?,
            },
            PatternKind::Dotted {
                dot_spacing_mm,
                dot_radius_mm,
            } => PatternKind::Dotted {
                dot_spacing_mm: get.value("dot_spacing", dot_spacing_mm)?,
                dot_radius_mm: get.value("dot_radius", dot_radius_mm)?,
            },
            PatternKind::Squared { grid_size_mm } => PatternKind::Squared {
                grid_size_mm: get.value("grid_size", grid_size_mm)?,
            },
            PatternKind::Cornell {
                line_spacing_mm,
                cue_column_mm,
                summary_band_mm,
            } => PatternKind::Cornell {
                line_spacing_mm: get.value("line_spacing", line_spacing_mm)?,
                cue_column_mm: get.value("cue_column", cue_column_mm)?,
                summary_band_mm: get.value("summary_band", summary_band_mm)?,
            },
            PatternKind::Isometric {
                spacing_mm,
                angle_deg,
            } => PatternKind::Isometric {
                spacing_mm: get.value("iso_spacing", spacing_mm)?,
                angle_deg: get.value("iso_angle", angle_deg)?,
            },
            PatternKind::Hexagonal { cell_size_mm } => PatternKind::Hexagonal {
                cell_size_mm: get.value("hex_size", cell_size_mm)?,
            },
            PatternKind::Blank => PatternKind::Blank,
        };

        let default_style = PatternStyle::default();
        let style = PatternStyle {
            color: get.value::<Color>("line_color", default_style.color)?,
            weight_pt: get.value("line_weight", default_style.weight_pt)?,
            header_line: get.value("header_line", default_style.header_line)?,
            header_weight_pt: get.optional("header_weight")?,
        };

        let imposition = ImpositionConfig {
            pages_per_sheet: get.value("pages_per_sheet", defaults.imposition.pages_per_sheet)?,
            fold_lines: get.value("fold_lines", defaults.imposition.fold_lines)?,
        };

        let decorations = Decorations {
            page_numbers: get.value("page_numbers", defaults.decorations.page_numbers)?,
            margin_guides: get.value("margin_guides", defaults.decorations.margin_guides)?,
            punch_holes: get.value("punch_holes", defaults.decorations.punch_holes)?,
            mirror_margins: get.value("mirror_margins", defaults.decorations.mirror_margins)?,
        };

        Ok(Self {
            page_size,
            orientation,
            margins,
            pattern: PatternConfig::new(kind, style),
            imposition,
            pages: get.value("pages", defaults.pages)?,
            decorations,
            bleed_mm: get.value("bleed", defaults.bleed_mm)?,
        })
    }
}

/// Typed lookups into a flat configuration map
struct KeyValues<'a>(&'a BTreeMap<String, String>);

impl KeyValues<'_> {
    fn value<T: FromStr>(&self, key: &str, default: T) -> Result<T> {
        Ok(self.optional(key)?.unwrap_or(default))
    }

    fn optional<T: FromStr>(&self, key: &str) -> Result<Option<T>> {
        match self.0.get(key) {
            None => Ok(None),
            Some(raw) => raw
                .trim()
                .parse()
                .map(Some)
                .map_err(|_| invalid(format!("Invalid value '{}' for '{}'", raw, key))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = NotebookConfig::default();
        config.validate().unwrap();
        assert_eq!(config.sheet_size(), Size::new(148.0, 210.0));
        assert_eq!(config.pages, 32);
    }

    #[test]
    fn test_page_dimensions_follow_imposition() {
        let config = NotebookConfig {
            page_size: PageSize::A4,
            orientation: Orientation::Landscape,
            imposition: ImpositionConfig {
                pages_per_sheet: 2,
                fold_lines: true,
            },
            ..Default::default()
        };
        assert_eq!(config.page_dimensions(), Size::new(148.5, 210.0));
    }

    #[test]
    fn test_mirrored_context() {
        let config = NotebookConfig {
            decorations: Decorations {
                mirror_margins: true,
                ..Default::default()
            },
            ..Default::default()
        };
        let odd = config.page_context(1).unwrap();
        let even = config.page_context(2).unwrap();
        assert_eq!(odd.left(), 15.0);
        assert_eq!(even.left(), 10.0);
        assert_eq!(even.right(), 148.0 - 15.0);
    }

    #[test]
    fn test_key_values_round_trip() {
        let config = NotebookConfig {
            page_size: PageSize::Custom {
                width_mm: 120.0,
                height_mm: 180.0,
            },
            pattern: PatternConfig::new(
                PatternKind::Cornell {
                    line_spacing_mm: 7.0,
                    cue_column_mm: 25.0,
                    summary_band_mm: 20.0,
                },
                PatternStyle {
                    header_line: true,
                    header_weight_pt: Some(0.6),
                    ..Default::default()
                },
            ),
            decorations: Decorations {
                page_numbers: true,
                punch_holes: PunchHoles::FourHole,
                ..Default::default()
            },
            ..Default::default()
        };

        let values = config.to_key_values();
        assert_eq!(values["pattern"], "cornell");
        assert_eq!(values["punch_holes"], "4-hole");
        assert!(!values.contains_key("grid_size"));

        assert_eq!(NotebookConfig::from_key_values(&values).unwrap(), config);
    }

    #[test]
    fn test_missing_keys_use_defaults() {
        let mut values = BTreeMap::new();
        values.insert("pattern".to_string(), "dotted".to_string());
        values.insert("pages".to_string(), "48".to_string());

        let config = NotebookConfig::from_key_values(&values).unwrap();
        assert_eq!(config.pages, 48);
        assert_eq!(config.page_size, PageSize::A5);
        assert_eq!(
            config.pattern.kind,
            PatternKind::default_for(PatternKindName::Dotted)
        );
    }

    #[test]
    fn test_unparsable_value_is_rejected() {
        let mut values = BTreeMap::new();
        values.insert("pages".to_string(), "many".to_string());
        assert!(matches!(
            NotebookConfig::from_key_values(&values),
            Err(NotebookError::InvalidConfig(_))
        ));
    }
}
