//! `xl/styles.xml`: fonts, fills and number formats behind each cell style index.

use std::collections::HashMap;

use quick_xml::events::BytesStart;
use sheetsync_core::CellStyle;

use super::xml::{XmlEvent, attr, attr_flag, attr_usize, for_each_event};
use crate::error::ParseError;

pub(crate) const PART: &str = "xl/styles.xml";

/// Standard 64-entry indexed palette. Index 64 is the system foreground and
/// has no fixed value.
const INDEXED_PALETTE: [&str; 64] = [
    "000000", "FFFFFF", "FF0000", "00FF00", "0000FF", "FFFF00", "FF00FF", "00FFFF", //
    "000000", "FFFFFF", "FF0000", "00FF00", "0000FF", "FFFF00", "FF00FF", "00FFFF", //
    "800000", "008000", "000080", "808000", "800080", "008080", "C0C0C0", "808080", //
    "9999FF", "993366", "FFFFCC", "CCFFFF", "660066", "FF8080", "0066CC", "CCCCFF", //
    "000080", "FF00FF", "FFFF00", "00FFFF", "800080", "800000", "008080", "0000FF", //
    "00CCFF", "CCFFFF", "CCFFCC", "FFFF99", "99CCFF", "FF99CC", "CC99FF", "FFCC99", //
    "3366FF", "33CCCC", "99CC00", "FFCC00", "FF9900", "FF6600", "666699", "969696", //
    "003366", "339966", "003300", "333300", "993300", "993366", "333399", "333333",
];

/// How a numeric cell value is displayed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) enum NumberKind {
    #[default]
    General,
    Date,
    Time,
    DateTime,
}

impl NumberKind {
    fn builtin(id: usize) -> Self {
        match id {
            14..=17 => Self::Date,
            18..=21 | 45..=47 => Self::Time,
            22 => Self::DateTime,
            _ => Self::General,
        }
    }

    /// Classify a custom format code by the date and time tokens it uses.
    pub(crate) fn from_code(code: &str) -> Self {
        let mut tokens = String::new();
        let mut chars = code.chars();
        let mut in_quotes = false;
        while let Some(c) = chars.next() {
            match c {
                '"' => in_quotes = !in_quotes,
                _ if in_quotes => {}
                '\\' | '_' | '*' => {
                    chars.next();
                }
                '[' => {
                    let inner: String = chars.by_ref().take_while(|&c| c != ']').collect();
                    let inner = inner.to_ascii_lowercase();
                    // [h], [mm], [ss] are elapsed time; anything else is a colour or locale
                    if !inner.is_empty() && inner.chars().all(|c| matches!(c, 'h' | 'm' | 's')) {
                        tokens.push_str(&inner);
                    }
                }
                _ => tokens.push(c.to_ascii_lowercase()),
            }
        }

        let has_date = tokens.contains('y') || tokens.contains('d') || tokens.contains("mmm");
        let has_time = tokens.contains('h') || tokens.contains('s');
        match (has_date, has_time) {
            (true, true) => Self::DateTime,
            (true, false) => Self::Date,
            (false, true) => Self::Time,
            (false, false) => Self::General,
        }
    }
}

/// Resolved cell format (`cellXfs` entry).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct CellFormat {
    pub style: CellStyle,
    pub number: NumberKind,
}

#[derive(Debug, Default)]
pub(crate) struct Styles {
    formats: Vec<CellFormat>,
}

impl Styles {
    pub(crate) fn get(&self, index: usize) -> Option<&CellFormat> {
        self.formats.get(index)
    }

    pub(crate) fn parse(xml: &[u8]) -> Result<Self, ParseError> {
        #[derive(Default)]
        struct Font {
            bold: bool,
            italic: bool,
            color: Option<String>,
        }
        #[derive(Default)]
        struct Fill {
            solid: bool,
            fg: Option<String>,
            bg: Option<String>,
        }
        struct Xf {
            num_fmt: usize,
            font: usize,
            fill: usize,
        }

        let mut custom_formats: HashMap<usize, String> = HashMap::new();
        let mut fonts: Vec<Font> = Vec::new();
        let mut fills: Vec<Fill> = Vec::new();
        let mut xfs: Vec<Xf> = Vec::new();
        let mut section: Option<&'static str> = None;

        for_each_event(PART, xml, |event| {
            match event {
                XmlEvent::Start(tag) => match (section, tag.local_name().as_ref()) {
                    (None, b"numFmts") => section = Some("numFmts"),
                    (None, b"fonts") => section = Some("fonts"),
                    (None, b"fills") => section = Some("fills"),
                    (None, b"cellXfs") => section = Some("cellXfs"),
                    (Some("numFmts"), b"numFmt") => {
                        if let (Some(id), Some(code)) =
                            (attr_usize(tag, b"numFmtId"), attr(tag, b"formatCode"))
                        {
                            custom_formats.insert(id, code);
                        }
                    }
                    (Some("fonts"), b"font") => fonts.push(Font::default()),
                    (Some("fonts"), name) => {
                        if let Some(font) = fonts.last_mut() {
                            match name {
                                b"b" => font.bold = attr_flag(tag, b"val", true),
                                b"i" => font.italic = attr_flag(tag, b"val", true),
                                b"color" => font.color = parse_color(tag),
                                _ => {}
                            }
                        }
                    }
                    (Some("fills"), b"fill") => fills.push(Fill::default()),
                    (Some("fills"), name) => {
                        if let Some(fill) = fills.last_mut() {
                            match name {
                                b"patternFill" => {
                                    fill.solid = attr(tag, b"patternType")
                                        .is_some_and(|p| !p.is_empty() && p != "none");
                                }
                                b"fgColor" => fill.fg = parse_color(tag),
                                b"bgColor" => fill.bg = parse_color(tag),
                                _ => {}
                            }
                        }
                    }
                    (Some("cellXfs"), b"xf") => xfs.push(Xf {
                        num_fmt: attr_usize(tag, b"numFmtId").unwrap_or(0),
                        font: attr_usize(tag, b"fontId").unwrap_or(0),
                        fill: attr_usize(tag, b"fillId").unwrap_or(0),
                    }),
                    _ => {}
                },
                XmlEvent::End(name) => {
                    if section.is_some_and(|s| s.as_bytes() == name) {
                        section = None;
                    }
                }
                XmlEvent::Text(_) => {}
            }
            Ok(())
        })?;

        let formats = xfs
            .iter()
            .map(|xf| {
                let font = fonts.get(xf.font);
                let fill = fills
                    .get(xf.fill)
                    .filter(|f| f.solid)
                    .and_then(|f| f.fg.clone().or_else(|| f.bg.clone()));
                let number = custom_formats
                    .get(&xf.num_fmt)
                    .map_or_else(|| NumberKind::builtin(xf.num_fmt), |code| NumberKind::from_code(code));
                CellFormat {
                    style: CellStyle {
                        fill,
                        font_color: font.and_then(|f| f.color.clone()),
                        bold: font.is_some_and(|f| f.bold),
                        italic: font.is_some_and(|f| f.italic),
                    },
                    number,
                }
            })
            .collect::<Vec<_>>();

        tracing::debug!(formats = formats.len(), fonts = fonts.len(), fills = fills.len(), "parsed styles");
        Ok(Self { formats })
    }
}

/// Colour of a `<color>`, `<fgColor>` or `<bgColor>` element.
fn parse_color(tag: &BytesStart<'_>) -> Option<String> {
    if let Some(rgb) = attr(tag, b"rgb") {
        return normalise_rgb(&rgb);
    }
    if let Some(index) = attr_usize(tag, b"indexed") {
        return indexed_color(index);
    }
    let slot = attr(tag, b"theme")?.trim().parse::<u32>().ok()?;
    let tint = attr(tag, b"tint")
        .and_then(|t| t.trim().parse::<f64>().ok())
        .filter(|t| t.is_finite())
        .unwrap_or(0.0);
    Some(CellStyle::theme_color(slot, tint))
}

/// `FF112233`, `112233` or `#112233` -> `#112233`.
pub(crate) fn normalise_rgb(raw: &str) -> Option<String> {
    let hex = raw.trim().trim_start_matches('#');
    let hex = match hex.len() {
        8 => &hex[2..],
        6 => hex,
        _ => return None,
    };
    hex.chars()
        .all(|c| c.is_ascii_hexdigit())
        .then(|| format!("#{}", hex.to_ascii_uppercase()))
}

pub(crate) fn indexed_color(index: usize) -> Option<String> {
    INDEXED_PALETTE.get(index).map(|hex| format!("#{hex}"))
}
