//! Styled text fragments and colours shared by the layout engine and the renderer.
//!
//! A [`Span`] is the smallest unit the layout engine places on a page: one physical line of text
//! together with the emphasis flags, point size and colour it should be drawn with.  Spans carry
//! no position; the layout engine pairs them with a cursor position when it emits draw
//! operations.

use crate::fonts::FontVariant;

/// An RGB colour with 8-bit channels.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Color {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
}

impl Color {
    /// Pure black, used for body text.
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    /// Pure white, used for text drawn on coloured header bands.
    pub const WHITE: Color = Color::rgb(255, 255, 255);

    /// Creates a colour from its channels.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Returns the channels scaled to `0.0..=1.0`, as PDF colour operators expect.
    pub fn to_unit(self) -> (f32, f32, f32) {
        (
            f32::from(self.r) / 255.0,
            f32::from(self.g) / 255.0,
            f32::from(self.b) / 255.0,
        )
    }
}

/// A line of text together with inline style attributes.
#[derive(Clone, Debug, PartialEq)]
pub struct Span {
    text: String,
    size: f32,
    bold: bool,
    italic: bool,
    underline: bool,
    color: Color,
}

impl Span {
    /// Creates a new span with the provided text at the given point size, black and unstyled.
    pub fn new(text: impl Into<String>, size: f32) -> Self {
        Self {
            text: text.into(),
            size,
            bold: false,
            italic: false,
            underline: false,
            color: Color::BLACK,
        }
    }

    /// Returns the raw text contained in this span.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Returns the font size in points.
    pub fn size(&self) -> f32 {
        self.size
    }

    /// Returns whether the span should be rendered in bold.
    pub fn is_bold(&self) -> bool {
        self.bold
    }

    /// Returns whether the span should be rendered in italic.
    pub fn is_italic(&self) -> bool {
        self.italic
    }

    /// Returns whether the span is underlined.
    pub fn is_underlined(&self) -> bool {
        self.underline
    }

    /// Returns the text colour.
    pub fn color(&self) -> Color {
        self.color
    }

    /// Returns the font variant selected by the bold/italic flags.
    pub fn variant(&self) -> FontVariant {
        FontVariant::from_flags(self.bold, self.italic)
    }

    /// Sets the bold flag and returns the updated span.
    pub fn with_bold(mut self, bold: bool) -> Self {
        self.bold = bold;
        self
    }

    /// Sets the italic flag and returns the updated span.
    pub fn with_italic(mut self, italic: bool) -> Self {
        self.italic = italic;
        self
    }

    /// Sets the underline flag and returns the updated span.
    pub fn with_underline(mut self, underline: bool) -> Self {
        self.underline = underline;
        self
    }

    /// Sets the colour and returns the updated span.
    pub fn colored(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn span_flags_select_variant() {
        let span = Span::new("Hello", 12.0).with_bold(true).with_italic(true);
        assert_eq!(span.text(), "Hello");
        assert_eq!(span.variant(), FontVariant::BoldItalic);
        assert!(!span.is_underlined());

        let plain = Span::new("Hello", 12.0).with_underline(true);
        assert_eq!(plain.variant(), FontVariant::Regular);
        assert!(plain.is_underlined());
    }

    #[test]
    fn new_spans_are_black() {
        let span = Span::new("x", 10.0);
        assert_eq!(span.color(), Color::BLACK);
        assert_eq!(span.colored(Color::WHITE).color(), Color::WHITE);
    }

    #[test]
    fn unit_channels_are_scaled() {
        let (r, g, b) = Color::WHITE.to_unit();
        assert!((r - 1.0).abs() < f32::EPSILON);
        assert!((g - 1.0).abs() < f32::EPSILON);
        assert!((b - 1.0).abs() < f32::EPSILON);
    }
}
