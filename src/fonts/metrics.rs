//! Glyph advance widths for the standard PDF base fonts.
//!
//! Widths are in thousandths of an em, taken from the Adobe core font metrics, and cover printable
//! ASCII (0x20..=0x7E). Index = `(char as usize) - 32`. Oblique Helvetica shares the upright
//! widths; Courier is monospaced at 600.

use super::{FontFamily, FontVariant};

pub(super) struct WidthTable {
    widths: [u16; 95],
    bullet: u16,
    fallback: u16,
}

impl WidthTable {
    pub(super) fn advance(&self, ch: char) -> u16 {
        let code = ch as usize;
        if (32..=126).contains(&code) {
            self.widths[code - 32]
        } else if ch == '\u{2022}' {
            self.bullet
        } else {
            self.fallback
        }
    }
}

#[rustfmt::skip]
static HELVETICA: WidthTable = WidthTable {
    widths: [
        278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
        556, 556, 556, 556, 556, 556, 556, 556, 556, 556,
        278, 278, 584, 584, 584, 556, 1015,
        667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833,
        722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611,
        278, 278, 278, 469, 556, 333,
        556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833,
        556, 556, 556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500,
        334, 260, 334, 584,
    ],
    bullet: 350,
    fallback: 556,
};

#[rustfmt::skip]
static HELVETICA_BOLD: WidthTable = WidthTable {
    widths: [
        278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278,
        556, 556, 556, 556, 556, 556, 556, 556, 556, 556,
        333, 333, 584, 584, 584, 611, 975,
        722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833,
        722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611,
        333, 278, 333, 584, 556, 333,
        556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889,
        611, 611, 611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500,
        389, 280, 389, 584,
    ],
    bullet: 350,
    fallback: 611,
};

#[rustfmt::skip]
static TIMES_ROMAN: WidthTable = WidthTable {
    widths: [
        250, 333, 408, 500, 500, 833, 778, 180, 333, 333, 500, 564, 250, 333, 250, 278,
        500, 500, 500, 500, 500, 500, 500, 500, 500, 500,
        278, 278, 564, 564, 564, 444, 921,
        722, 667, 667, 722, 611, 556, 722, 722, 333, 389, 722, 611, 889,
        722, 722, 556, 722, 667, 556, 611, 722, 722, 944, 722, 722, 611,
        333, 278, 333, 469, 500, 333,
        444, 500, 444, 500, 444, 333, 500, 500, 278, 278, 500, 278, 778,
        500, 500, 500, 500, 333, 389, 278, 500, 500, 722, 500, 500, 444,
        480, 200, 480, 541,
    ],
    bullet: 350,
    fallback: 500,
};

#[rustfmt::skip]
static TIMES_BOLD: WidthTable = WidthTable {
    widths: [
        250, 333, 555, 500, 500, 1000, 833, 278, 333, 333, 500, 570, 250, 333, 250, 278,
        500, 500, 500, 500, 500, 500, 500, 500, 500, 500,
        333, 333, 570, 570, 570, 500, 930,
        722, 667, 722, 722, 667, 611, 778, 778, 389, 500, 778, 667, 944,
        722, 778, 611, 778, 722, 556, 667, 722, 722, 1000, 722, 722, 667,
        333, 278, 333, 581, 500, 333,
        500, 556, 444, 556, 444, 333, 500, 556, 278, 333, 556, 278, 833,
        556, 500, 556, 556, 444, 389, 333, 556, 500, 722, 500, 500, 444,
        394, 220, 394, 520,
    ],
    bullet: 350,
    fallback: 500,
};

#[rustfmt::skip]
static TIMES_ITALIC: WidthTable = WidthTable {
    widths: [
        250, 333, 420, 500, 500, 833, 778, 214, 333, 333, 500, 675, 250, 333, 250, 278,
        500, 500, 500, 500, 500, 500, 500, 500, 500, 500,
        333, 333, 675, 675, 675, 500, 920,
        611, 611, 667, 722, 611, 611, 722, 722, 333, 444, 667, 556, 833,
        667, 722, 611, 722, 611, 500, 556, 722, 611, 833, 611, 556, 556,
        389, 278, 389, 422, 500, 333,
        500, 500, 444, 500, 444, 278, 500, 500, 278, 278, 444, 278, 722,
        500, 500, 500, 500, 389, 389, 278, 500, 444, 667, 444, 444, 389,
        400, 275, 400, 541,
    ],
    bullet: 350,
    fallback: 500,
};

#[rustfmt::skip]
static TIMES_BOLD_ITALIC: WidthTable = WidthTable {
    widths: [
        250, 389, 555, 500, 500, 833, 778, 278, 333, 333, 500, 570, 250, 333, 250, 278,
        500, 500, 500, 500, 500, 500, 500, 500, 500, 500,
        333, 333, 570, 570, 570, 500, 832,
        667, 667, 667, 722, 667, 667, 722, 778, 389, 500, 667, 611, 889,
        722, 722, 611, 722, 667, 556, 611, 722, 667, 889, 667, 611, 611,
        333, 278, 333, 570, 500, 333,
        500, 500, 444, 500, 444, 333, 500, 556, 278, 278, 500, 278, 778,
        556, 500, 500, 500, 389, 389, 278, 556, 444, 667, 500, 444, 389,
        348, 220, 348, 570,
    ],
    bullet: 350,
    fallback: 500,
};

static COURIER: WidthTable = WidthTable {
    widths: [600; 95],
    bullet: 600,
    fallback: 600,
};

pub(super) fn table(family: FontFamily, variant: FontVariant) -> &'static WidthTable {
    match (family, variant) {
        (FontFamily::Helvetica, FontVariant::Regular | FontVariant::Italic) => &HELVETICA,
        (FontFamily::Helvetica, FontVariant::Bold | FontVariant::BoldItalic) => &HELVETICA_BOLD,
        (FontFamily::Times, FontVariant::Regular) => &TIMES_ROMAN,
        (FontFamily::Times, FontVariant::Bold) => &TIMES_BOLD,
        (FontFamily::Times, FontVariant::Italic) => &TIMES_ITALIC,
        (FontFamily::Times, FontVariant::BoldItalic) => &TIMES_BOLD_ITALIC,
        (FontFamily::Courier, _) => &COURIER,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tables_cover_ascii_and_bullet() {
        assert_eq!(HELVETICA.advance(' '), 278);
        assert_eq!(HELVETICA.advance('W'), 944);
        assert_eq!(TIMES_ROMAN.advance('a'), 444);
        assert_eq!(COURIER.advance('i'), 600);
        assert_eq!(HELVETICA.advance('\u{2022}'), 350);
        assert_eq!(TIMES_BOLD.advance('é'), 500);
    }

    #[test]
    fn digits_share_one_width() {
        for table in [&HELVETICA, &HELVETICA_BOLD, &TIMES_ROMAN, &TIMES_ITALIC] {
            let zero = table.advance('0');
            assert!(('1'..='9').all(|digit| table.advance(digit) == zero));
        }
    }
}
