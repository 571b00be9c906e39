//! XLSX styles (styles.xml) read/write
//!
//! The part stores formatting as flat tables joined by position: `fontId`,
//! `fillId` and `borderId` index the facet tables, a `cellStyle` names the
//! `cellStyleXfs` entry at its `xfId`, and a `cellXfs` entry points back at
//! its owning style through the same `xfId`. These joins are translated to and
//! from the keyed [`Stylesheet`] here and nowhere else.

use ahash::AHashMap;
use log::{debug, warn};

use crate::error::XlsxResult;
use crate::xml::XmlElement;
use xlsheet_core::style::{
    Alignment, BaseFormat, Border, BorderEdge, BorderId, BorderLineStyle, BorderSide, Color,
    ColorKind, Fill, FillId, Font, FontId, Format, GradientFill, GradientStop, GradientType,
    HorizontalAlignment, Keyword, NumberFormat, PatternFill, PatternType, Protection, Style,
    Stylesheet, Underline, VerticalAlignment,
};
use xlsheet_core::Error;

const MAIN_NS: &str = "http://schemas.openxmlformats.org/spreadsheetml/2006/main";
const MC_NS: &str = "http://schemas.openxmlformats.org/markup-compatibility/2006";
const X14AC_NS: &str = "http://schemas.microsoft.com/office/spreadsheetml/2009/9/ac";

const DEFAULT_TABLE_STYLE: &str = "TableStyleMedium9";
const DEFAULT_PIVOT_STYLE: &str = "PivotStyleMedium7";

// === Reading ===

/// Build a [`Stylesheet`] from a parsed `styleSheet` element
///
/// Facet tables are read first because every xf entry refers into them. Equal
/// fonts, fills or borders declared more than once collapse to one entry and
/// the xf references are remapped accordingly.
pub fn read_stylesheet(root: &XmlElement) -> XlsxResult<Stylesheet> {
    if root.local_name() != "styleSheet" {
        return Err(Error::malformed(format!(
            "expected <styleSheet>, found <{}>",
            root.name()
        ))
        .into());
    }

    let mut sheet = Stylesheet::empty();
    let mut remap = IdRemap::default();

    if let Some(borders) = root.child("borders") {
        for node in borders.children_named("border") {
            remap.borders.push(sheet.add_border(read_border(node)?));
        }
    }
    if let Some(fills) = root.child("fills") {
        for node in fills.children_named("fill") {
            remap.fills.push(sheet.add_fill(read_fill(node)?));
        }
    }
    if let Some(fonts) = root.child("fonts") {
        for node in fonts.children_named("font") {
            remap.fonts.push(sheet.add_font(read_font(node)?));
        }
    }
    if let Some(num_fmts) = root.child("numFmts") {
        for node in num_fmts.children_named("numFmt") {
            sheet.load_number_format(read_number_format(node)?);
        }
    }
    if let Some(colors) = root.child("colors") {
        if let Some(indexed) = colors.child("indexedColors") {
            let palette = indexed
                .children()
                .iter()
                .map(read_color)
                .collect::<XlsxResult<Vec<_>>>()?;
            sheet.set_indexed_colors(palette);
        }
    }

    let style_names = read_styles(root, &remap, &mut sheet)?;
    read_formats(root, &remap, &style_names, &mut sheet)?;

    debug!(
        "read styles: {} fonts, {} fills, {} borders, {} number formats, {} styles, {} formats",
        sheet.fonts().len(),
        sheet.fills().len(),
        sheet.borders().len(),
        sheet.number_formats().len(),
        sheet.styles().len(),
        sheet.formats().len()
    );
    Ok(sheet)
}

/// File position -> interned id, one vector per facet table
#[derive(Default)]
struct IdRemap {
    fonts: Vec<FontId>,
    fills: Vec<FillId>,
    borders: Vec<BorderId>,
}

impl IdRemap {
    fn lookup<T: Copy>(table: &'static str, ids: &[T], index: Option<usize>) -> XlsxResult<T> {
        let index = index.unwrap_or(0);
        ids.get(index).copied().ok_or_else(|| {
            Error::IndexOutOfRange {
                table,
                index,
                len: ids.len(),
            }
            .into()
        })
    }
}

/// Promote each `cellStyleXfs` entry that a `cellStyles` record names at the
/// same position, returning `cellStyleXfs position -> style name`
fn read_styles(
    root: &XmlElement,
    remap: &IdRemap,
    sheet: &mut Stylesheet,
) -> XlsxResult<StyleNames> {
    let mut names = StyleNames::default();
    let Some(style_xfs) = root.child("cellStyleXfs") else {
        return Ok(names);
    };

    let mut records: AHashMap<usize, &XmlElement> = AHashMap::new();
    if let Some(cell_styles) = root.child("cellStyles") {
        for node in cell_styles.children_named("cellStyle") {
            let xf_id: usize = node.parse_attribute("xfId")?.unwrap_or(0);
            // first record wins
            records.entry(xf_id).or_insert(node);
        }
    }

    for (position, xf) in style_xfs.children_named("xf").enumerate() {
        names.count += 1;
        let Some(record) = records.get(&position) else {
            continue;
        };

        let name = record.attribute("name").unwrap_or_default();
        names.by_position.insert(position, name.to_string());
        if sheet.has_style(name) {
            // first record wins; formats on this entry join the earlier style
            warn!("cell style {:?} declared again at xf {}, keeping the first", name, position);
            continue;
        }

        let mut style = Style::new(name).with_base(read_base_format(xf, remap, sheet)?);
        style.builtin_id = record.parse_attribute("builtinId")?.unwrap_or(0);
        style.hidden = record.bool_attribute("hidden")?.unwrap_or(false);
        sheet.add_style(style)?;
    }
    Ok(names)
}

#[derive(Default)]
struct StyleNames {
    by_position: AHashMap<usize, String>,
    count: usize,
}

fn read_formats(
    root: &XmlElement,
    remap: &IdRemap,
    style_names: &StyleNames,
    sheet: &mut Stylesheet,
) -> XlsxResult<()> {
    let Some(cell_xfs) = root.child("cellXfs") else {
        return Ok(());
    };

    for xf in cell_xfs.children_named("xf") {
        let base = read_base_format(xf, remap, sheet)?;
        let mut format = Format::from_base(base);

        if let Some(xf_id) = xf.parse_attribute::<usize>("xfId")? {
            if xf_id >= style_names.count {
                return Err(Error::IndexOutOfRange {
                    table: "cell style xf",
                    index: xf_id,
                    len: style_names.count,
                }
                .into());
            }
            // An xf entry with no cellStyle record has no name to attach
            format.style = style_names.by_position.get(&xf_id).cloned();
        }

        sheet.add_format(format)?;
    }
    Ok(())
}

fn read_base_format(
    xf: &XmlElement,
    remap: &IdRemap,
    sheet: &Stylesheet,
) -> XlsxResult<BaseFormat> {
    let mut base = BaseFormat::new();

    base.font_id = IdRemap::lookup("font", &remap.fonts, xf.parse_attribute("fontId")?)?;
    base.font_applied = xf.bool_attribute("applyFont")?.unwrap_or(false);

    base.fill_id = IdRemap::lookup("fill", &remap.fills, xf.parse_attribute("fillId")?)?;
    base.fill_applied = xf.bool_attribute("applyFill")?.unwrap_or(false);

    base.border_id = IdRemap::lookup("border", &remap.borders, xf.parse_attribute("borderId")?)?;
    base.border_applied = xf.bool_attribute("applyBorder")?.unwrap_or(false);

    let num_fmt_id: u32 = xf.parse_attribute("numFmtId")?.unwrap_or(0);
    base.number_format_id = match sheet.number_format(num_fmt_id) {
        Some(format) => format.id(),
        None => {
            warn!(
                "number format {} is neither declared nor builtin, using General",
                num_fmt_id
            );
            NumberFormat::ID_GENERAL
        }
    };
    base.number_format_applied = xf.bool_attribute("applyNumberFormat")?.unwrap_or(false);

    let alignment = xf.child("alignment");
    base.alignment_applied =
        alignment.is_some() || xf.bool_attribute("applyAlignment")?.unwrap_or(false);
    if base.alignment_applied {
        if let Some(node) = alignment {
            base.alignment = read_alignment(node)?;
        }
    }

    let protection = xf.child("protection");
    base.protection_applied =
        protection.is_some() || xf.bool_attribute("applyProtection")?.unwrap_or(false);
    if base.protection_applied {
        if let Some(node) = protection {
            base.protection = read_protection(node)?;
        }
    }

    Ok(base)
}

fn read_number_format(node: &XmlElement) -> XlsxResult<NumberFormat> {
    let id: u32 = node
        .parse_attribute("numFmtId")?
        .ok_or_else(|| Error::malformed("<numFmt> is missing numFmtId"))?;
    let code = match node.attribute("formatCode").unwrap_or_default() {
        "GENERAL" => "General",
        other => other,
    };
    Ok(NumberFormat::new(id, code))
}

/// Decode a color element; `auto` wins, then `rgb`, `theme`, `indexed`
fn read_color(node: &XmlElement) -> XlsxResult<Color> {
    if node.attribute("auto").is_some() {
        return Ok(Color::AUTO);
    }

    let color = if let Some(rgb) = node.attribute("rgb") {
        Color::from_hex(rgb)?
    } else if let Some(theme) = node.parse_attribute("theme")? {
        Color::theme(theme)
    } else if let Some(indexed) = node.parse_attribute("indexed")? {
        Color::indexed(indexed)
    } else {
        Color::AUTO
    };

    Ok(match node.parse_attribute::<f64>("tint")? {
        Some(tint) => color.with_tint(tint),
        None => color,
    })
}

/// `<b/>` is set; `<b val="0"/>` is not
fn read_flag(font: &XmlElement, name: &str) -> XlsxResult<bool> {
    match font.child(name) {
        None => Ok(false),
        Some(node) => Ok(node.bool_attribute("val")?.unwrap_or(true)),
    }
}

fn read_font(node: &XmlElement) -> XlsxResult<Font> {
    let defaults = Font::default();
    let name = node
        .child("name")
        .and_then(|n| n.attribute("val"))
        .unwrap_or(defaults.name.as_str());
    let size = match node.child("sz") {
        Some(sz) => sz.parse_attribute("val")?.unwrap_or(defaults.size),
        None => defaults.size,
    };

    let mut font = Font::new(name, size);
    font.bold = read_flag(node, "b")?;
    font.italic = read_flag(node, "i")?;
    font.strikethrough = read_flag(node, "strike")?;

    if let Some(u) = node.child("u") {
        let style = match u.attribute("val") {
            Some(val) => Underline::from_keyword(val)?,
            None => Underline::Single,
        };
        font.underline = (style != Underline::None).then_some(style);
    }
    if let Some(color) = node.child("color") {
        font.color = Some(read_color(color)?);
    }
    if let Some(family) = node.child("family") {
        font.family = family.parse_attribute("val")?;
    }
    if let Some(scheme) = node.child("scheme") {
        font.scheme = scheme.attribute("val").map(str::to_string);
    }
    Ok(font)
}

fn read_fill(node: &XmlElement) -> XlsxResult<Fill> {
    if let Some(pattern) = node.child("patternFill") {
        let pattern_type = match pattern.attribute("patternType") {
            Some(raw) if !raw.is_empty() => PatternType::from_keyword(raw)?,
            _ => return Ok(Fill::pattern(PatternType::None)),
        };
        let mut fill = PatternFill {
            pattern_type,
            foreground: None,
            background: None,
        };
        if let Some(fg) = pattern.child("fgColor") {
            fill.foreground = Some(read_color(fg)?);
        }
        if let Some(bg) = pattern.child("bgColor") {
            fill.background = Some(read_color(bg)?);
        }
        return Ok(Fill::Pattern(fill));
    }

    if let Some(gradient) = node.child("gradientFill") {
        let gradient_type = match gradient.attribute("type") {
            Some(raw) if !raw.is_empty() => GradientType::from_keyword(raw)?,
            _ => GradientType::Linear,
        };
        let mut fill = GradientFill {
            gradient_type,
            degree: gradient.parse_attribute("degree")?.unwrap_or(0.0),
            left: gradient.parse_attribute("left")?.unwrap_or(0.0),
            right: gradient.parse_attribute("right")?.unwrap_or(0.0),
            top: gradient.parse_attribute("top")?.unwrap_or(0.0),
            bottom: gradient.parse_attribute("bottom")?.unwrap_or(0.0),
            stops: Vec::new(),
        };
        for stop in gradient.children_named("stop") {
            let position = stop.parse_attribute("position")?.unwrap_or(0.0);
            let color = match stop.child("color") {
                Some(c) => read_color(c)?,
                None => Color::AUTO,
            };
            fill.stops.push(GradientStop::new(position, color));
        }
        return Ok(Fill::Gradient(fill));
    }

    Ok(Fill::pattern(PatternType::None))
}

fn read_border(node: &XmlElement) -> XlsxResult<Border> {
    let mut border = Border::default();
    for side in BorderSide::ALL {
        let Some(edge_node) = node.child(side.element_name()) else {
            continue;
        };
        let mut edge = BorderEdge::default();
        if let Some(style) = edge_node.attribute("style") {
            edge.style = Some(BorderLineStyle::from_keyword(style)?);
        }
        if let Some(color) = edge_node.child("color") {
            edge.color = Some(read_color(color)?);
        }
        border.set_side(side, Some(edge));
    }
    Ok(border)
}

fn read_alignment(node: &XmlElement) -> XlsxResult<Alignment> {
    let mut alignment = Alignment::new();
    alignment.wrap_text = node.bool_attribute("wrapText")?.unwrap_or(false);
    alignment.shrink_to_fit = node.bool_attribute("shrinkToFit")?.unwrap_or(false);
    if let Some(h) = node.attribute("horizontal") {
        alignment.horizontal = Some(HorizontalAlignment::from_keyword(h)?);
    }
    if let Some(v) = node.attribute("vertical") {
        alignment.vertical = Some(VerticalAlignment::from_keyword(v)?);
    }
    Ok(alignment)
}

fn read_protection(node: &XmlElement) -> XlsxResult<Protection> {
    Ok(Protection {
        locked: node.bool_attribute("locked")?.unwrap_or(false),
        hidden: node.bool_attribute("hidden")?.unwrap_or(false),
    })
}

// === Writing ===

/// Serialise a [`Stylesheet`] as a `styleSheet` element
///
/// Ids are written as stored: the facet tables never hold duplicates, so the id
/// carried by a format is already its position in the written table.
pub fn write_stylesheet(sheet: &Stylesheet) -> XmlElement {
    let mut root = XmlElement::new("styleSheet")
        .with_attribute("xmlns", MAIN_NS)
        .with_attribute("xmlns:mc", MC_NS)
        .with_attribute("mc:Ignorable", "x14ac")
        .with_attribute("xmlns:x14ac", X14AC_NS);

    if !sheet.number_formats().is_empty() {
        let mut num_fmts = counted("numFmts", sheet.number_formats().len());
        for format in sheet.number_formats() {
            num_fmts.push_child(
                XmlElement::new("numFmt")
                    .with_attribute("numFmtId", format.id().to_string())
                    .with_attribute("formatCode", format.format_code()),
            );
        }
        root.push_child(num_fmts);
    }

    if !sheet.fonts().is_empty() {
        let mut fonts = counted("fonts", sheet.fonts().len());
        for font in sheet.fonts() {
            fonts.push_child(write_font(font));
        }
        root.push_child(fonts);
    }

    if !sheet.fills().is_empty() {
        let mut fills = counted("fills", sheet.fills().len());
        for fill in sheet.fills() {
            fills.push_child(write_fill(fill));
        }
        root.push_child(fills);
    }

    if !sheet.borders().is_empty() {
        let mut borders = counted("borders", sheet.borders().len());
        for border in sheet.borders() {
            borders.push_child(write_border(border));
        }
        root.push_child(borders);
    }

    // cellStyleXfs and cellStyles are parallel: position i in one is position i
    // in the other
    let mut style_xfs = counted("cellStyleXfs", sheet.styles().len());
    let mut cell_styles = counted("cellStyles", sheet.styles().len());
    for (position, style) in sheet.styles().iter().enumerate() {
        style_xfs.push_child(write_base_format(style));

        let mut record = XmlElement::new("cellStyle")
            .with_attribute("name", style.name())
            .with_attribute("xfId", position.to_string())
            .with_attribute("builtinId", style.builtin_id.to_string());
        if style.hidden {
            record = record.with_bool_attribute("hidden", true);
        }
        cell_styles.push_child(record);
    }

    let mut cell_xfs = counted("cellXfs", sheet.formats().len());
    for format in sheet.formats() {
        let mut xf = write_base_format(format);
        if let Some(position) = format
            .style
            .as_deref()
            .and_then(|name| sheet.style_id(name).ok())
        {
            xf.set_attribute("xfId", position.to_string());
        }
        cell_xfs.push_child(xf);
    }

    root.push_child(style_xfs);
    root.push_child(cell_xfs);
    if !sheet.styles().is_empty() {
        root.push_child(cell_styles);
    }

    root.push_child(counted("dxfs", 0));
    root.push_child(
        counted("tableStyles", 0)
            .with_attribute("defaultTableStyle", DEFAULT_TABLE_STYLE)
            .with_attribute("defaultPivotStyle", DEFAULT_PIVOT_STYLE),
    );

    if !sheet.indexed_colors().is_empty() {
        let mut indexed = XmlElement::new("indexedColors");
        for color in sheet.indexed_colors() {
            indexed.push_child(write_color("rgbColor", color));
        }
        root.push_child(XmlElement::new("colors").with_child(indexed));
    }

    debug!(
        "wrote styles: {} fonts, {} styles, {} formats",
        sheet.fonts().len(),
        sheet.styles().len(),
        sheet.formats().len()
    );
    root
}

fn counted(name: &str, count: usize) -> XmlElement {
    XmlElement::new(name).with_attribute("count", count.to_string())
}

fn val(name: &str, value: impl Into<String>) -> XmlElement {
    XmlElement::new(name).with_attribute("val", value)
}

fn write_color(tag: &str, color: &Color) -> XmlElement {
    let node = XmlElement::new(tag);
    let node = match color.kind() {
        ColorKind::Auto => return node.with_bool_attribute("auto", true),
        ColorKind::Rgb { a, r, g, b } => {
            node.with_attribute("rgb", format!("{:02X}{:02X}{:02X}{:02X}", a, r, g, b))
        }
        ColorKind::Theme(index) => node.with_attribute("theme", index.to_string()),
        ColorKind::Indexed(index) => node.with_attribute("indexed", index.to_string()),
    };
    match color.tint() {
        Some(tint) => node.with_attribute("tint", tint.to_string()),
        None => node,
    }
}

fn write_font(font: &Font) -> XmlElement {
    let mut node = XmlElement::new("font");
    if font.bold {
        node.push_child(XmlElement::new("b").with_bool_attribute("val", true));
    }
    if font.italic {
        node.push_child(XmlElement::new("i").with_bool_attribute("val", true));
    }
    if let Some(underline) = font.underline.filter(|_| font.is_underline()) {
        node.push_child(val("u", underline.as_keyword()));
    }
    if font.strikethrough {
        node.push_child(XmlElement::new("strike").with_bool_attribute("val", true));
    }
    node.push_child(val("sz", font.size.to_string()));
    if let Some(color) = &font.color {
        node.push_child(write_color("color", color));
    }
    node.push_child(val("name", font.name.as_str()));
    if let Some(family) = font.family {
        node.push_child(val("family", family.to_string()));
    }
    if let Some(scheme) = &font.scheme {
        node.push_child(val("scheme", scheme.as_str()));
    }
    node
}

fn write_fill(fill: &Fill) -> XmlElement {
    let node = XmlElement::new("fill");
    match fill {
        Fill::Pattern(pattern) => {
            let mut inner = XmlElement::new("patternFill")
                .with_attribute("patternType", pattern.pattern_type.as_keyword());
            if let Some(fg) = &pattern.foreground {
                inner.push_child(write_color("fgColor", fg));
            }
            if let Some(bg) = &pattern.background {
                inner.push_child(write_color("bgColor", bg));
            }
            node.with_child(inner)
        }
        Fill::Gradient(gradient) => {
            let mut inner = XmlElement::new("gradientFill")
                .with_attribute("type", gradient.gradient_type.as_keyword());
            for (name, value) in [
                ("degree", gradient.degree),
                ("left", gradient.left),
                ("right", gradient.right),
                ("top", gradient.top),
                ("bottom", gradient.bottom),
            ] {
                if value != 0.0 {
                    inner.set_attribute(name, value.to_string());
                }
            }
            for stop in &gradient.stops {
                inner.push_child(
                    XmlElement::new("stop")
                        .with_attribute("position", stop.position.to_string())
                        .with_child(write_color("color", &stop.color)),
                );
            }
            node.with_child(inner)
        }
    }
}

fn write_border(border: &Border) -> XmlElement {
    let mut node = XmlElement::new("border");
    for side in BorderSide::ALL {
        let Some(edge) = border.side(side) else {
            continue;
        };
        let mut edge_node = XmlElement::new(side.element_name());
        if let Some(style) = edge.style {
            edge_node.set_attribute("style", style.as_keyword());
        }
        if let Some(color) = &edge.color {
            edge_node.push_child(write_color("color", color));
        }
        node.push_child(edge_node);
    }
    node
}

fn write_base_format(base: &BaseFormat) -> XmlElement {
    let mut xf = XmlElement::new("xf")
        .with_attribute("numFmtId", base.number_format_id.to_string())
        .with_attribute("fontId", base.font_id.0.to_string())
        .with_attribute("fillId", base.fill_id.0.to_string())
        .with_attribute("borderId", base.border_id.0.to_string());

    for (name, applied) in [
        ("applyNumberFormat", base.number_format_applied),
        ("applyFont", base.font_applied),
        ("applyFill", base.fill_applied),
        ("applyBorder", base.border_applied),
    ] {
        if applied {
            xf.set_attribute(name, "1");
        }
    }

    if base.alignment_applied {
        xf.set_attribute("applyAlignment", "1");
        xf.push_child(write_alignment(&base.alignment));
    }
    if base.protection_applied {
        xf.set_attribute("applyProtection", "1");
        xf.push_child(
            XmlElement::new("protection")
                .with_bool_attribute("locked", base.protection.locked)
                .with_bool_attribute("hidden", base.protection.hidden),
        );
    }
    xf
}

fn write_alignment(alignment: &Alignment) -> XmlElement {
    let mut node = XmlElement::new("alignment");
    if let Some(h) = alignment.horizontal {
        node.set_attribute("horizontal", h.as_keyword());
    }
    if let Some(v) = alignment.vertical {
        node.set_attribute("vertical", v.as_keyword());
    }
    if alignment.wrap_text {
        node.set_attribute("wrapText", "1");
    }
    if alignment.shrink_to_fit {
        node.set_attribute("shrinkToFit", "1");
    }
    node
}

/// Parse raw styles-part bytes
pub fn read_stylesheet_bytes(bytes: &[u8]) -> XlsxResult<Stylesheet> {
    read_stylesheet(&XmlElement::parse(bytes)?)
}

/// Serialise a stylesheet to styles-part bytes
pub fn write_stylesheet_bytes(sheet: &Stylesheet) -> Vec<u8> {
    write_stylesheet(sheet).to_xml_bytes()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use xlsheet_core::ErrorKind;

    fn parse(xml: &str) -> XlsxResult<Stylesheet> {
        read_stylesheet_bytes(xml.as_bytes())
    }

    const MINIMAL_TABLES: &str = r#"
        <fonts count="1"><font><sz val="11"/><name val="Calibri"/></font></fonts>
        <fills count="1"><fill><patternFill patternType="none"/></fill></fills>
        <borders count="1"><border/></borders>"#;

    fn with_tables(rest: &str) -> String {
        format!(r#"<styleSheet xmlns="{MAIN_NS}">{MINIMAL_TABLES}{rest}</styleSheet>"#)
    }

    #[test]
    fn test_color_precedence() {
        let node = XmlElement::parse(br#"<color theme="3" rgb="FF112233" indexed="5"/>"#).unwrap();
        assert_eq!(read_color(&node).unwrap(), Color::argb(0xFF, 0x11, 0x22, 0x33));

        let node = XmlElement::parse(br#"<color indexed="5" theme="3" tint="-0.25"/>"#).unwrap();
        let color = read_color(&node).unwrap();
        assert_eq!(color.kind(), ColorKind::Theme(3));
        assert_eq!(color.tint(), Some(-0.25));

        let node = XmlElement::parse(br#"<color auto="1" rgb="FF112233"/>"#).unwrap();
        assert!(read_color(&node).unwrap().is_auto());
    }

    #[test]
    fn test_font_flags_honour_val() {
        let node = XmlElement::parse(
            br#"<font><b val="0"/><i/><strike val="true"/><u/><sz val="9.5"/><name val="Arial"/><family val="2"/><scheme val="minor"/></font>"#,
        )
        .unwrap();
        let font = read_font(&node).unwrap();
        assert!(!font.bold);
        assert!(font.italic);
        assert!(font.strikethrough);
        assert_eq!(font.underline, Some(Underline::Single));
        assert_eq!(font.size, 9.5);
        assert_eq!(font.name, "Arial");
        assert_eq!(font.family, Some(2));
        assert_eq!(font.scheme.as_deref(), Some("minor"));
        assert_eq!(font.color, None);
    }

    #[test]
    fn test_unknown_keywords_fail() {
        let node = XmlElement::parse(br#"<font><u val="Single"/></font>"#).unwrap();
        assert_eq!(
            read_font(&node).unwrap_err().kind(),
            ErrorKind::UnknownEnumValue
        );

        let node = XmlElement::parse(br#"<fill><patternFill patternType="polka"/></fill>"#).unwrap();
        assert_eq!(
            read_fill(&node).unwrap_err().kind(),
            ErrorKind::UnknownEnumValue
        );

        let node = XmlElement::parse(br#"<fill><patternFill patternType="SOLID"/></fill>"#).unwrap();
        assert_eq!(read_fill(&node).unwrap(), Fill::pattern(PatternType::Solid));
    }

    #[test]
    fn test_general_code_is_normalised() {
        let sheet = parse(&with_tables(
            r#"<numFmts count="1"><numFmt numFmtId="164" formatCode="GENERAL"/></numFmts>"#,
        ))
        .unwrap();
        assert_eq!(sheet.number_formats(), &[NumberFormat::new(164, "General")]);
    }

    #[test]
    fn test_unresolvable_number_format_falls_back_to_general() {
        let sheet = parse(&with_tables(
            r#"<cellXfs count="2"><xf numFmtId="150"/><xf numFmtId="14" applyNumberFormat="1"/></cellXfs>"#,
        ))
        .unwrap();
        assert_eq!(sheet.formats()[0].number_format_id, 0);
        assert_eq!(sheet.formats()[1].number_format_id, 14);
        assert!(sheet.formats()[1].number_format_applied);
    }

    #[test]
    fn test_declared_id_overrides_builtin() {
        let sheet = parse(&with_tables(
            r#"<numFmts count="1"><numFmt numFmtId="14" formatCode="yyyy-mm-dd"/></numFmts>
               <cellXfs count="1"><xf numFmtId="14"/></cellXfs>"#,
        ))
        .unwrap();
        let id = sheet.formats()[0].number_format_id;
        assert_eq!(sheet.number_format(id).unwrap().format_code(), "yyyy-mm-dd");
    }

    #[test]
    fn test_out_of_range_reference() {
        let err = parse(&with_tables(r#"<cellXfs count="1"><xf fontId="3"/></cellXfs>"#))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::IndexOutOfRange);

        let err = parse(&with_tables(r#"<cellXfs count="1"><xf xfId="2"/></cellXfs>"#))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::IndexOutOfRange);
    }

    #[test]
    fn test_positional_style_join() {
        let sheet = parse(&with_tables(
            r#"<cellStyleXfs count="3"><xf/><xf/><xf applyFont="1"/></cellStyleXfs>
               <cellXfs count="3"><xf xfId="0"/><xf xfId="1"/><xf xfId="2"/></cellXfs>
               <cellStyles count="2">
                 <cellStyle name="Accent" xfId="2" builtinId="29" hidden="1"/>
                 <cellStyle name="Normal" xfId="0" builtinId="0"/>
               </cellStyles>"#,
        ))
        .unwrap();

        let names: Vec<_> = sheet.styles().iter().map(|s| s.name()).collect();
        assert_eq!(names, vec!["Normal", "Accent"]);
        let accent = sheet.style("Accent").unwrap();
        assert!(accent.hidden);
        assert_eq!(accent.builtin_id, 29);
        assert!(accent.font_applied);

        let owners: Vec<_> = sheet.formats().iter().map(|f| f.style.as_deref()).collect();
        assert_eq!(owners, vec![Some("Normal"), None, Some("Accent")]);
    }

    #[test]
    fn test_repeated_style_name_keeps_first() {
        let sheet = parse(&with_tables(
            r#"<cellStyleXfs count="2"><xf applyFont="1"/><xf/></cellStyleXfs>
               <cellXfs count="2"><xf xfId="0"/><xf xfId="1"/></cellXfs>
               <cellStyles count="2">
                 <cellStyle name="Normal" xfId="0" builtinId="0"/>
                 <cellStyle name="Normal" xfId="1" builtinId="0"/>
               </cellStyles>"#,
        ))
        .unwrap();

        assert_eq!(sheet.styles().len(), 1);
        assert!(sheet.style("Normal").unwrap().font_applied);
        let owners: Vec<_> = sheet.formats().iter().map(|f| f.style.as_deref()).collect();
        assert_eq!(owners, vec![Some("Normal"), Some("Normal")]);
    }

    #[test]
    fn test_inline_elements_mark_facets_applied() {
        let sheet = parse(&with_tables(
            r#"<cellXfs count="1"><xf><alignment horizontal="CENTER" wrapText="true"/><protection locked="1"/></xf></cellXfs>"#,
        ))
        .unwrap();
        let format = &sheet.formats()[0];
        assert!(format.alignment_applied);
        assert_eq!(format.alignment.horizontal, Some(HorizontalAlignment::Center));
        assert!(format.alignment.wrap_text);
        assert!(format.protection_applied);
        assert!(format.protection.locked);
        assert!(!format.font_applied);
    }

    #[test]
    fn test_duplicate_facets_are_collapsed() {
        let sheet = parse(
            r#"<styleSheet>
                 <fonts count="2"><font><sz val="11"/><name val="Calibri"/></font><font><sz val="11"/><name val="Calibri"/></font></fonts>
                 <fills count="1"><fill/></fills>
                 <borders count="1"><border/></borders>
                 <cellXfs count="1"><xf fontId="1"/></cellXfs>
               </styleSheet>"#,
        )
        .unwrap();
        assert_eq!(sheet.fonts().len(), 1);
        assert_eq!(sheet.formats()[0].font_id, FontId(0));
    }

    #[test]
    fn test_header_style_round_trip() {
        let mut sheet = Stylesheet::empty();
        let font = sheet.add_font(Font::new("Calibri", 11.0).with_bold(true));
        sheet.add_fill(Fill::pattern(PatternType::None));
        sheet.add_border(Border::default());
        sheet
            .add_style(Style::new("Header").with_base(BaseFormat::new().with_font(font)))
            .unwrap();
        sheet
            .add_format(Format::from_base(BaseFormat::new().with_font(font)).with_style("Header"))
            .unwrap();

        let reread = read_stylesheet_bytes(&write_stylesheet_bytes(&sheet)).unwrap();
        assert_eq!(reread.fonts().len(), 1);
        assert_eq!(reread.styles().len(), 1);
        let header = reread.style("Header").unwrap();
        assert!(reread.font(header.font_id).unwrap().bold);
        assert_eq!(reread.formats().len(), 1);
        assert_eq!(reread.formats()[0].style.as_deref(), Some("Header"));
    }

    #[test]
    fn test_write_section_order() {
        let mut sheet = Stylesheet::new();
        sheet.add_number_format("0.000");
        sheet.set_indexed_colors(vec![Color::RED]);
        let root = write_stylesheet(&sheet);
        let order: Vec<_> = root.children().iter().map(|c| c.name()).collect();
        assert_eq!(
            order,
            vec![
                "numFmts",
                "fonts",
                "fills",
                "borders",
                "cellStyleXfs",
                "cellXfs",
                "cellStyles",
                "dxfs",
                "tableStyles",
                "colors"
            ]
        );
        let table_styles = root.child("tableStyles").unwrap();
        assert_eq!(
            table_styles.attribute("defaultTableStyle"),
            Some("TableStyleMedium9")
        );
    }

    #[test]
    fn test_empty_format_tables_are_still_written() {
        let root = write_stylesheet(&Stylesheet::empty());
        let order: Vec<_> = root.children().iter().map(|c| c.name()).collect();
        assert_eq!(order, vec!["cellStyleXfs", "cellXfs", "dxfs", "tableStyles"]);
        assert_eq!(root.child("cellXfs").unwrap().attribute("count"), Some("0"));
    }

    #[test]
    fn test_auto_color_writes_auto_marker() {
        let node = write_color("color", &Color::AUTO);
        assert_eq!(node.attribute("auto"), Some("1"));
        let node = write_color("fgColor", &Color::theme(4).with_tint(0.5));
        assert_eq!(node.attribute("theme"), Some("4"));
        assert_eq!(node.attribute("tint"), Some("0.5"));
    }
}
