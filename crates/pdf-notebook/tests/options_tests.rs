use pdf_notebook::*;
use std::collections::BTreeMap;
use tempfile::tempdir;

#[test]
fn test_default_config() {
    let config = NotebookConfig::default();
    assert_eq!(config.page_size, PageSize::A5);
    assert_eq!(config.orientation, Orientation::Portrait);
    assert_eq!(config.pages, 32);
    assert_eq!(config.imposition.pages_per_sheet, 1);
    assert_eq!(config.pattern.kind, PatternKind::Squared { grid_size_mm: 5.0 });
    assert_eq!(config.pattern.style.weight_pt, 0.3);
    assert_eq!(config.pattern.style.color, Color::gray(0.75));
    assert_eq!(config.bleed_mm, 0.0);
    assert!(config.validate().is_ok());
}

#[test]
fn test_validation_spacing() {
    for spacing in [0.0, -1.0] {
        let mut config = NotebookConfig::default();
        config.pattern.kind = PatternKind::Lined {
            line_spacing_mm: spacing,
        };
        assert!(matches!(
            config.validate(),
            Err(NotebookError::InvalidConfig(_))
        ));
    }
}

#[test]
fn test_validation_margins_exceed_page() {
    let mut config = NotebookConfig::default();
    config.margins.left_mm = 100.0;
    config.margins.right_mm = 48.0;
    assert!(config.validate().is_err());

    let mut config = NotebookConfig::default();
    config.margins.top_mm = 210.0;
    assert!(config.validate().is_err());

    let mut config = NotebookConfig::default();
    config.margins.bottom_mm = -1.0;
    assert!(config.validate().is_err());
}

#[test]
fn test_validation_binding_margin_counts_toward_width() {
    // 2-up on a 60mm sheet leaves 30mm slots
    let mut config = NotebookConfig {
        page_size: PageSize::Custom {
            width_mm: 60.0,
            height_mm: 100.0,
        },
        imposition: ImpositionConfig {
            pages_per_sheet: 2,
            fold_lines: true,
        },
        margins: Margins::uniform(5.0),
        ..Default::default()
    };
    config.pattern.kind = PatternKind::Blank;
    assert!(config.validate().is_ok());

    config.margins.binding_mm = 20.0;
    assert!(config.validate().is_err());
}

#[test]
fn test_validation_pages_per_sheet() {
    let mut config = NotebookConfig::default();
    for (pages_per_sheet, valid) in [(1, true), (2, true), (3, false), (4, true), (6, false)] {
        config.imposition.pages_per_sheet = pages_per_sheet;
        assert_eq!(config.validate().is_ok(), valid, "{}", pages_per_sheet);
    }
}

#[test]
fn test_validation_cornell_must_fit_page() {
    let mut config = NotebookConfig::default();
    config.pattern.kind = PatternKind::Cornell {
        line_spacing_mm: 8.0,
        cue_column_mm: 200.0,
        summary_band_mm: 30.0,
    };
    assert!(config.validate().is_err());
}

#[test]
fn test_validation_other_fields() {
    let mut config = NotebookConfig::default();
    config.pages = 0;
    assert!(config.validate().is_err());

    let mut config = NotebookConfig::default();
    config.bleed_mm = -2.0;
    assert!(config.validate().is_err());

    let mut config = NotebookConfig::default();
    config.pattern.style.color = Color::rgb(1.2, 0.0, 0.0);
    assert!(config.validate().is_err());

    let mut config = NotebookConfig::default();
    config.page_size = PageSize::Custom {
        width_mm: 0.0,
        height_mm: 100.0,
    };
    assert!(config.validate().is_err());
}

#[test]
fn test_key_values_every_pattern() {
    for name in PatternKindName::ALL {
        let mut config = NotebookConfig::default();
        config.pattern.kind = PatternKind::default_for(name).with_spacing_mm(6.5);

        let values = config.to_key_values();
        assert_eq!(values["pattern"], name.as_str());
        assert_eq!(NotebookConfig::from_key_values(&values).unwrap(), config);
    }
}

#[test]
fn test_from_key_values_empty_map_is_default() {
    let config = NotebookConfig::from_key_values(&BTreeMap::new()).unwrap();
    assert_eq!(config, NotebookConfig::default());
}

#[test]
fn test_from_key_values_rejects_bad_values() {
    for (key, value) in [
        ("page_size", "a0"),
        ("pattern", "spiral"),
        ("fold_lines", "maybe"),
        ("line_color", "blue"),
        ("margin_top", "ten"),
    ] {
        let mut values = BTreeMap::new();
        values.insert(key.to_string(), value.to_string());
        assert!(
            matches!(
                NotebookConfig::from_key_values(&values),
                Err(NotebookError::InvalidConfig(_))
            ),
            "{}={} was accepted",
            key,
            value
        );
    }
}

#[tokio::test]
async fn test_save_and_load() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("preset.json");

    let mut config = NotebookConfig {
        page_size: PageSize::B5,
        pages: 64,
        bleed_mm: 3.0,
        ..Default::default()
    };
    config.pattern.kind = PatternKind::Isometric {
        spacing_mm: 7.0,
        angle_deg: 30.0,
    };
    config.decorations.punch_holes = PunchHoles::FourHole;
    config.save(&path).await.unwrap();

    let loaded = NotebookConfig::load(&path).await.unwrap();
    assert_eq!(loaded, config);
}

#[tokio::test]
async fn test_load_partial_preset_uses_defaults() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("preset.json");
    tokio::fs::write(
        &path,
        r#"{ "page_size": "a4", "pattern": { "kind": { "kind": "dotted", "dot_spacing_mm": 4.0, "dot_radius_mm": 0.3 } } }"#,
    )
    .await
    .unwrap();

    let loaded = NotebookConfig::load(&path).await.unwrap();
    assert_eq!(loaded.page_size, PageSize::A4);
    assert_eq!(
        loaded.pattern.kind,
        PatternKind::Dotted {
            dot_spacing_mm: 4.0,
            dot_radius_mm: 0.3
        }
    );
    assert_eq!(loaded.pattern.style, PatternStyle::default());
    assert_eq!(loaded.pages, 32);
}

#[tokio::test]
async fn test_load_rejects_malformed_json() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("preset.json");
    tokio::fs::write(&path, "{ not json").await.unwrap();

    assert!(matches!(
        NotebookConfig::load(&path).await,
        Err(NotebookError::InvalidConfig(_))
    ));
}

#[tokio::test]
async fn test_load_missing_file() {
    let dir = tempdir().unwrap();
    assert!(matches!(
        NotebookConfig::load(dir.path().join("missing.json")).await,
        Err(NotebookError::Io(_))
    ));
}
