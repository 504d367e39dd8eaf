//! Font selection, sizing and measurement for the builtin PDF font set.
//!
//! Only the three standard PDF families are supported so documents never depend on font files
//! being present on disk. User-facing labels such as `"Georgia, serif"` are mapped onto one of
//! them; anything unrecognised falls back to Helvetica.

mod encoding;
mod metrics;

use std::fmt;

use log::warn;
use printpdf::{BuiltinFont, IndirectFontRef, PdfDocumentReference};
use serde::{Deserialize, Serialize};

pub use encoding::{to_win_ansi, win_ansi_code, BACKEND_BULLET_CODE, BULLET_CODE, REPLACEMENT};

/// Point size used when a font-size string cannot be parsed.
pub const DEFAULT_FONT_SIZE: f32 = 16.0;

/// Millimetres per PostScript point.
pub const PT_TO_MM: f32 = 0.352_778;

/// Line advance as a multiple of the font size.
pub const LINE_HEIGHT_FACTOR: f32 = 1.25;

const MIN_FONT_SIZE: f32 = 4.0;
const MAX_FONT_SIZE: f32 = 96.0;

/// The supported builtin font families.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontFamily {
    /// Sans-serif; also the fallback.
    #[default]
    Helvetica,
    /// Serif.
    Times,
    /// Monospace.
    Courier,
}

impl FontFamily {
    /// Identifier used in configuration and on the command line.
    pub fn key(self) -> &'static str {
        match self {
            Self::Helvetica => "helvetica",
            Self::Times => "times",
            Self::Courier => "courier",
        }
    }

    /// Maps a CSS-style font label onto a supported family.
    ///
    /// Only the first comma-separated family name is considered, compared case-insensitively.
    /// Returns `None` for labels with no supported counterpart.
    pub fn from_label(label: &str) -> Option<Self> {
        let name = label
            .split(',')
            .next()
            .unwrap_or_default()
            .trim()
            .trim_matches(|c| c == '"' || c == '\'')
            .to_ascii_lowercase();

        match name.as_str() {
            "helvetica" | "arial" | "sans-serif" => Some(Self::Helvetica),
            "times" | "times new roman" | "times-roman" | "georgia" | "serif" => Some(Self::Times),
            "courier" | "courier new" | "monospace" => Some(Self::Courier),
            _ => None,
        }
    }

    /// Like [`FontFamily::from_label`] but substitutes Helvetica for unsupported labels.
    pub fn resolve(label: &str) -> Self {
        Self::from_label(label).unwrap_or_else(|| {
            warn!(
                "Unsupported font '{}'; falling back to '{}'.",
                label,
                Self::default().key()
            );
            Self::default()
        })
    }

    fn builtin(self, variant: FontVariant) -> BuiltinFont {
        match (self, variant) {
            (Self::Helvetica, FontVariant::Regular) => BuiltinFont::Helvetica,
            (Self::Helvetica, FontVariant::Bold) => BuiltinFont::HelveticaBold,
            (Self::Helvetica, FontVariant::Italic) => BuiltinFont::HelveticaOblique,
            (Self::Helvetica, FontVariant::BoldItalic) => BuiltinFont::HelveticaBoldOblique,
            (Self::Times, FontVariant::Regular) => BuiltinFont::TimesRoman,
            (Self::Times, FontVariant::Bold) => BuiltinFont::TimesBold,
            (Self::Times, FontVariant::Italic) => BuiltinFont::TimesItalic,
            (Self::Times, FontVariant::BoldItalic) => BuiltinFont::TimesBoldItalic,
            (Self::Courier, FontVariant::Regular) => BuiltinFont::Courier,
            (Self::Courier, FontVariant::Bold) => BuiltinFont::CourierBold,
            (Self::Courier, FontVariant::Italic) => BuiltinFont::CourierOblique,
            (Self::Courier, FontVariant::BoldItalic) => BuiltinFont::CourierBoldOblique,
        }
    }
}

impl fmt::Display for FontFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Weight/slant combination within a family.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum FontVariant {
    #[default]
    Regular,
    Bold,
    Italic,
    BoldItalic,
}

impl FontVariant {
    /// Picks the variant for the given emphasis flags.
    pub fn from_flags(bold: bool, italic: bool) -> Self {
        match (bold, italic) {
            (true, true) => Self::BoldItalic,
            (true, false) => Self::Bold,
            (false, true) => Self::Italic,
            (false, false) => Self::Regular,
        }
    }
}

/// Parses a font-size string such as `"16px"`, `"12pt"` or `"14"` into points.
///
/// The leading number is used and any unit suffix ignored. Strings without a leading number, or
/// with a value outside a printable range, yield [`DEFAULT_FONT_SIZE`].
pub fn parse_font_size(input: &str) -> f32 {
    parse_font_size_or(input, DEFAULT_FONT_SIZE)
}

/// Like [`parse_font_size`] with a caller-chosen fallback.
pub fn parse_font_size_or(input: &str, fallback: f32) -> f32 {
    let trimmed = input.trim();
    let end = trimmed
        .char_indices()
        .find(|(_, c)| !(c.is_ascii_digit() || *c == '.'))
        .map_or(trimmed.len(), |(index, _)| index);

    match trimmed[..end].parse::<f32>() {
        Ok(size) if (MIN_FONT_SIZE..=MAX_FONT_SIZE).contains(&size) => size,
        _ => {
            warn!(
                "Unusable font size '{}'; falling back to {}pt.",
                input, fallback
            );
            fallback
        }
    }
}

/// Width of `text` in millimetres when set in the given font at `size` points.
pub fn text_width_mm(text: &str, family: FontFamily, variant: FontVariant, size: f32) -> f32 {
    let table = metrics::table(family, variant);
    let units: u32 = text.chars().map(|ch| u32::from(table.advance(ch))).sum();
    units as f32 / 1000.0 * size * PT_TO_MM
}

/// Vertical advance of one line at `size` points, in millimetres.
pub fn line_height_mm(size: f32) -> f32 {
    size * PT_TO_MM * LINE_HEIGHT_FACTOR
}

/// The four variants of one family registered with a printpdf document.
pub struct FontSet {
    regular: IndirectFontRef,
    bold: IndirectFontRef,
    italic: IndirectFontRef,
    bold_italic: IndirectFontRef,
}

impl FontSet {
    /// Returns the registered font for `variant`.
    pub fn get(&self, variant: FontVariant) -> &IndirectFontRef {
        match variant {
            FontVariant::Regular => &self.regular,
            FontVariant::Bold => &self.bold,
            FontVariant::Italic => &self.italic,
            FontVariant::BoldItalic => &self.bold_italic,
        }
    }
}

/// Adds every variant of `family` to the document as builtin (non-embedded) fonts.
pub fn install_builtin_fonts(
    document: &PdfDocumentReference,
    family: FontFamily,
) -> Result<FontSet, printpdf::Error> {
    Ok(FontSet {
        regular: document.add_builtin_font(family.builtin(FontVariant::Regular))?,
        bold: document.add_builtin_font(family.builtin(FontVariant::Bold))?,
        italic: document.add_builtin_font(family.builtin(FontVariant::Italic))?,
        bold_italic: document.add_builtin_font(family.builtin(FontVariant::BoldItalic))?,
    })
}
