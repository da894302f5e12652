use pdf_notebook::*;

#[test]
fn test_page_size_dimensions() {
    assert_eq!(PageSize::A4.dimensions_mm(), (210.0, 297.0));
    assert_eq!(PageSize::A5.dimensions_mm(), (148.0, 210.0));
    assert_eq!(PageSize::A6.dimensions_mm(), (105.0, 148.0));
    assert_eq!(PageSize::B5.dimensions_mm(), (176.0, 250.0));
    assert_eq!(PageSize::Letter.dimensions_mm(), (215.9, 279.4));

    let custom = PageSize::Custom {
        width_mm: 100.0,
        height_mm: 200.0,
    };
    assert_eq!(custom.dimensions_mm(), (100.0, 200.0));
}

#[test]
fn test_landscape_swaps_dimensions() {
    assert_eq!(
        PageSize::A5.dimensions_with_orientation(Orientation::Landscape),
        (210.0, 148.0)
    );
    assert_eq!(
        PageSize::A5.dimensions_with_orientation(Orientation::Portrait),
        (148.0, 210.0)
    );
}

#[test]
fn test_page_size_parsing() {
    assert_eq!("A5".parse::<PageSize>().unwrap(), PageSize::A5);
    assert_eq!(" letter ".parse::<PageSize>().unwrap(), PageSize::Letter);
    assert_eq!(
        "120x180".parse::<PageSize>().unwrap(),
        PageSize::Custom {
            width_mm: 120.0,
            height_mm: 180.0
        }
    );
    assert!("a3".parse::<PageSize>().is_err());
    assert!("120xwide".parse::<PageSize>().is_err());
}

#[test]
fn test_page_size_display_parses_back() {
    for size in [
        PageSize::A4,
        PageSize::B5,
        PageSize::Custom {
            width_mm: 99.5,
            height_mm: 140.0,
        },
    ] {
        assert_eq!(size.to_string().parse::<PageSize>().unwrap(), size);
    }
}

#[test]
fn test_margins_binding_side() {
    let margins = Margins::default();
    assert_eq!(margins.horizontal_for_page(1, false), (15.0, 10.0));
    assert_eq!(margins.horizontal_for_page(2, false), (15.0, 10.0));
    assert_eq!(margins.horizontal_for_page(1, true), (15.0, 10.0));
    assert_eq!(margins.horizontal_for_page(2, true), (10.0, 15.0));
}

#[test]
fn test_uniform_margins() {
    let margins = Margins::uniform(12.0);
    assert_eq!(margins.top_mm, 12.0);
    assert_eq!(margins.right_mm, 12.0);
    assert_eq!(margins.binding_mm, 0.0);
}

#[test]
fn test_punch_hole_names() {
    for holes in [PunchHoles::None, PunchHoles::TwoHole, PunchHoles::FourHole] {
        assert_eq!(holes.name().parse::<PunchHoles>().unwrap(), holes);
    }
    assert!("3-hole".parse::<PunchHoles>().is_err());
}

#[test]
fn test_orientation_parsing() {
    assert_eq!(
        "Landscape".parse::<Orientation>().unwrap(),
        Orientation::Landscape
    );
    assert!("sideways".parse::<Orientation>().is_err());
}
