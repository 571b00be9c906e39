//! Style model behaviour seen through the public API

use pretty_assertions::assert_eq;
use xlsheet::prelude::*;
use xlsheet::{read_stylesheet_bytes, write_stylesheet_bytes, GradientType};

#[test]
fn test_header_style_survives_styles_part() {
    let mut styles = Stylesheet::empty();
    let bold = styles.add_font(Font::new("Calibri", 11.0).with_bold(true));
    styles.add_fill(Fill::pattern(PatternType::None));
    styles.add_border(Border::new());
    styles
        .create_style("Header")
        .unwrap()
        .base = BaseFormat::new().with_font(bold);
    styles
        .add_format(Format::from_base(BaseFormat::new().with_font(bold)).with_style("Header"))
        .unwrap();

    let parsed = read_stylesheet_bytes(&write_stylesheet_bytes(&styles)).unwrap();

    assert_eq!(parsed.fonts().len(), 1);
    assert_eq!(parsed.styles().len(), 1);
    let header = parsed.style("Header").unwrap();
    assert!(parsed.font(header.font_id).unwrap().bold);
    assert_eq!(parsed.formats().len(), 1);
    let format = parsed.format(0).unwrap();
    assert_eq!(parsed.style(format.style.as_deref().unwrap()).unwrap().name(), "Header");
}

#[test]
fn test_identical_formats_share_facets() {
    let mut wb = Workbook::new();
    let (fonts, fills, borders) = (
        wb.stylesheet().fonts().len(),
        wb.stylesheet().fills().len(),
        wb.stylesheet().borders().len(),
    );

    let add = |wb: &mut Workbook| {
        let font = wb.add_font(Font::new("Georgia", 12.0).with_underline(Underline::Double));
        let fill = wb.add_fill(Fill::solid(Color::rgb(0x12, 0x34, 0x56)));
        let border = wb.add_border(Border::outline(BorderLineStyle::Dashed, Color::theme(3)));
        wb.add_format(Format::from_base(
            BaseFormat::new()
                .with_font(font)
                .with_fill(fill)
                .with_border(border),
        ))
        .unwrap()
    };
    let first = add(&mut wb);
    let second = add(&mut wb);

    assert_ne!(first, second);
    assert_eq!(wb.format(first).unwrap(), wb.format(second).unwrap());
    assert_eq!(wb.stylesheet().fonts().len(), fonts + 1);
    assert_eq!(wb.stylesheet().fills().len(), fills + 1);
    assert_eq!(wb.stylesheet().borders().len(), borders + 1);
}

#[test]
fn test_number_format_interning() {
    let mut wb = Workbook::new();
    let before = wb.stylesheet().number_formats().len();
    let a = wb.add_number_format("#,##0.000");
    let b = wb.add_number_format("#,##0.000");
    assert_eq!(a, b);
    assert!(a >= NumberFormat::FIRST_CUSTOM_ID);
    assert_eq!(wb.stylesheet().number_formats().len(), before + 1);

    // A builtin code resolves to its catalog id instead of registering
    assert_eq!(wb.add_number_format("0.00"), NumberFormat::ID_NUMBER_DEC2);
}

#[test]
fn test_builtin_number_formats() {
    assert_eq!(NumberFormat::from_builtin_id(0).unwrap().format_code(), "General");
    assert_eq!(NumberFormat::from_builtin_id(9).unwrap().format_code(), "0%");

    let mut stylesheet = Stylesheet::new();
    stylesheet.load_number_format(NumberFormat::new(9, "0.0%"));
    assert_eq!(stylesheet.number_format(9).unwrap().format_code(), "0.0%");
    assert_eq!(stylesheet.number_format_or_general(163).format_code(), "General");
}

#[test]
fn test_remove_foreign_sheet_is_rejected() {
    let mut wb = Workbook::new();
    wb.create_sheet();
    let other = Workbook::new();
    let foreign = other.get_sheet_by_index(0).unwrap().handle();
    let titles = wb.sheet_titles();

    let err = wb.remove_sheet(foreign).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotOwned);
    assert_eq!(wb.sheet_titles(), titles);
}

#[test]
fn test_keywords_are_case_insensitive() {
    let markup = br#"<styleSheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main">
<fonts count="1"><font/></fonts>
<fills count="2">
  <fill><patternFill patternType="SOLID"><fgColor rgb="FF00FF00" theme="3"/></patternFill></fill>
  <fill><gradientFill type="Path" left="0.5" right="0.5"/></fill>
</fills>
<borders count="1"><border><top style="MediumDashDot"/></border></borders>
<cellXfs count="1"><xf><alignment vertical="TOP"/></xf></cellXfs>
</styleSheet>"#;
    let parsed = read_stylesheet_bytes(markup).unwrap();

    assert_eq!(parsed.fills()[0], Fill::solid(Color::rgb(0, 0xFF, 0)));
    match &parsed.fills()[1] {
        Fill::Gradient(g) => {
            assert_eq!(g.gradient_type, GradientType::Path);
            assert_eq!((g.left, g.right), (0.5, 0.5));
        }
        other => panic!("expected a gradient, got {:?}", other),
    }
    let top = parsed.borders()[0].side(BorderSide::Top).unwrap();
    assert_eq!(top.style, Some(BorderLineStyle::MediumDashDot));
    assert_eq!(
        parsed.format(0).unwrap().alignment.vertical,
        Some(VerticalAlignment::Top)
    );
}

#[test]
fn test_style_and_format_lookups() {
    let mut wb = Workbook::new();
    assert!(wb.has_style("Normal"));
    wb.add_style(Style::new("Accent").with_builtin_id(29)).unwrap();

    assert_eq!(wb.style_id("Accent").unwrap(), 1);
    assert_eq!(wb.style_by_id(1).unwrap().builtin_id, 29);
    assert_eq!(wb.style("Missing").unwrap_err().kind(), ErrorKind::NotFound);
    assert_eq!(
        wb.add_style(Style::new("Accent")).unwrap_err().kind(),
        ErrorKind::NameCollision
    );
    assert_eq!(
        wb.add_format(Format::new().with_style("Missing"))
            .unwrap_err()
            .kind(),
        ErrorKind::NotFound
    );
    assert_eq!(wb.format(99).unwrap_err().kind(), ErrorKind::IndexOutOfRange);
}
