//! Design templates: identifiers, colour palettes and page decorations.
//!
//! Every template is described by a [`Preset`] in a fixed lookup table. The preset pairs the
//! template's palette with a [`Decoration`] that paints background shapes onto a page before any
//! text is placed, so text always layers on top.

pub mod preview;

use std::fmt;

use log::warn;
use serde::{Deserialize, Serialize};

use crate::layout::{DrawOp, LayoutPage, PageGeometry, Rect};
use crate::richtext::Color;

/// Identifier of a visual layout shared by the on-screen preview and the PDF export.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum DesignTemplate {
    #[default]
    Default,
    Modern,
    CreativeVertical,
    CreativeHorizontal,
    Minimalist,
    Infographic,
    Timeline,
}

impl DesignTemplate {
    /// All templates in display order.
    pub const ALL: [DesignTemplate; 7] = [
        Self::Default,
        Self::Modern,
        Self::CreativeVertical,
        Self::CreativeHorizontal,
        Self::Minimalist,
        Self::Infographic,
        Self::Timeline,
    ];

    /// The string identifier, e.g. `"creative-vertical"`.
    pub fn key(self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Modern => "modern",
            Self::CreativeVertical => "creative-vertical",
            Self::CreativeHorizontal => "creative-horizontal",
            Self::Minimalist => "minimalist",
            Self::Infographic => "infographic",
            Self::Timeline => "timeline",
        }
    }

    /// Human-readable name.
    pub fn label(self) -> &'static str {
        match self {
            Self::Default => "Default",
            Self::Modern => "Modern",
            Self::CreativeVertical => "Creative Vertical",
            Self::CreativeHorizontal => "Creative Horizontal",
            Self::Minimalist => "Minimalist",
            Self::Infographic => "Infographic",
            Self::Timeline => "Timeline",
        }
    }

    /// Looks up a template by identifier.
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|template| template.key() == key.trim())
    }

    /// Like [`DesignTemplate::from_key`] but substitutes the default template for unknown keys.
    pub fn resolve(key: &str) -> Self {
        Self::from_key(key).unwrap_or_else(|| {
            warn!("Unknown design template '{}'; using 'default'.", key);
            Self::Default
        })
    }

    /// The preset describing this template's palette and decoration.
    pub fn preset(self) -> &'static Preset {
        PRESETS
            .iter()
            .find(|preset| preset.template == self)
            .unwrap_or(&PRESETS[0])
    }
}

impl fmt::Display for DesignTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.key())
    }
}

impl From<String> for DesignTemplate {
    fn from(value: String) -> Self {
        Self::resolve(&value)
    }
}

impl From<DesignTemplate> for String {
    fn from(template: DesignTemplate) -> Self {
        template.key().to_string()
    }
}

/// Colours a template applies to text and shapes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Palette {
    /// Accent colour: section titles and decoration shapes.
    pub primary: Color,
    /// Secondary accent for rules and stripes.
    pub secondary: Color,
    /// Colour of the name and contact line.
    pub header_text: Color,
    /// Colour of content lines.
    pub body: Color,
}

/// Paints template-specific shapes onto a page.
pub trait Decoration: Sync {
    /// Called once for every page as soon as it is created.
    fn decorate(&self, page: &mut LayoutPage, geometry: &PageGeometry, palette: &Palette);

    /// Called right before a section title is placed at `title` on `page`.
    fn mark_section(
        &self,
        _page: &mut LayoutPage,
        _geometry: &PageGeometry,
        _title: Rect,
        _palette: &Palette,
    ) {
    }
}

/// A template's full description.
pub struct Preset {
    pub template: DesignTemplate,
    pub palette: Palette,
    pub decoration: &'static dyn Decoration,
}

/// Height of the coloured band behind the header on the first page.
pub const HEADER_BAND_HEIGHT_MM: f32 = 60.0;

/// Full-width band across the top of the first page, with an optional stripe under it.
struct HeaderBand {
    height: f32,
    stripe: Option<f32>,
}

impl Decoration for HeaderBand {
    fn decorate(&self, page: &mut LayoutPage, geometry: &PageGeometry, palette: &Palette) {
        if page.index() != 0 {
            return;
        }
        page.push(DrawOp::FillRect {
            rect: Rect::new(0.0, 0.0, geometry.width, self.height),
            color: palette.primary,
        });
        if let Some(stripe) = self.stripe {
            page.push(DrawOp::FillRect {
                rect: Rect::new(0.0, self.height, geometry.width, stripe),
                color: palette.secondary,
            });
        }
    }
}

/// Coloured strip along the left edge of every page.
///
/// Narrow margins shrink the strip so it never reaches the text column.
struct Sidebar {
    width: f32,
}

impl Sidebar {
    const MAX_MARGIN_SHARE: f32 = 0.6;

    fn width(&self, geometry: &PageGeometry) -> f32 {
        self.width
            .min(geometry.margin_left * Self::MAX_MARGIN_SHARE)
            .max(0.0)
    }
}

impl Decoration for Sidebar {
    fn decorate(&self, page: &mut LayoutPage, geometry: &PageGeometry, palette: &Palette) {
        page.push(DrawOp::FillRect {
            rect: Rect::new(0.0, 0.0, self.width(geometry), geometry.height),
            color: palette.primary,
        });
    }
}

/// Thin rule separating the header from the body on the first page.
struct HeaderRule {
    y: f32,
}

impl Decoration for HeaderRule {
    fn decorate(&self, page: &mut LayoutPage, geometry: &PageGeometry, palette: &Palette) {
        if page.index() != 0 {
            return;
        }
        page.push(DrawOp::FillRect {
            rect: Rect::new(
                geometry.margin_left,
                self.y,
                geometry.width - geometry.margin_left - geometry.margin_right,
                0.5,
            ),
            color: palette.secondary,
        });
    }
}

/// Vertical rail in the left margin with a dot beside every section title.
struct TimelineRail {
    body_top: f32,
}

impl TimelineRail {
    const RAIL_WIDTH: f32 = 0.8;
    const GUTTER: f32 = 8.0;
    const DOT_RADIUS: f32 = 2.0;

    /// Distance from the rail to the text column; at most half the margin.
    fn gutter(geometry: &PageGeometry) -> f32 {
        Self::GUTTER.min(geometry.margin_left.max(0.0) / 2.0)
    }

    fn rail_x(geometry: &PageGeometry) -> f32 {
        geometry.margin_left.max(0.0) - Self::gutter(geometry)
    }
}

impl Decoration for TimelineRail {
    fn decorate(&self, page: &mut LayoutPage, geometry: &PageGeometry, palette: &Palette) {
        let top = if page.index() == 0 {
            self.body_top
        } else {
            geometry.margin_top
        };
        page.push(DrawOp::FillRect {
            rect: Rect::new(
                Self::rail_x(geometry) - Self::RAIL_WIDTH / 2.0,
                top,
                Self::RAIL_WIDTH,
                geometry.bottom_limit() - top,
            ),
            color: palette.primary,
        });
    }

    fn mark_section(
        &self,
        page: &mut LayoutPage,
        geometry: &PageGeometry,
        title: Rect,
        palette: &Palette,
    ) {
        page.push(DrawOp::FillCircle {
            center_x: Self::rail_x(geometry),
            center_y: title.y + title.height / 2.0,
            radius: Self::DOT_RADIUS.min(Self::gutter(geometry) / 2.0),
            color: palette.primary,
        });
    }
}

const fn palette(primary: Color, secondary: Color, header_text: Color) -> Palette {
    Palette {
        primary,
        secondary,
        header_text,
        body: Color::BLACK,
    }
}

static DEFAULT_BAND: HeaderBand = HeaderBand {
    height: HEADER_BAND_HEIGHT_MM,
    stripe: None,
};
static MODERN_BAND: HeaderBand = HeaderBand {
    height: 50.0,
    stripe: Some(2.0),
};
static HORIZONTAL_BAND: HeaderBand = HeaderBand {
    height: HEADER_BAND_HEIGHT_MM,
    stripe: Some(4.0),
};
static INFOGRAPHIC_BAND: HeaderBand = HeaderBand {
    height: HEADER_BAND_HEIGHT_MM,
    stripe: Some(3.0),
};
static VERTICAL_SIDEBAR: Sidebar = Sidebar { width: 12.0 };
static MINIMAL_RULE: HeaderRule = HeaderRule { y: 58.0 };
static TIMELINE_RAIL: TimelineRail = TimelineRail { body_top: 72.0 };

static PRESETS: [Preset; 7] = [
    Preset {
        template: DesignTemplate::Default,
        palette: palette(Color::rgb(0x00, 0x00, 0x00), Color::WHITE, Color::WHITE),
        decoration: &DEFAULT_BAND,
    },
    Preset {
        template: DesignTemplate::Modern,
        palette: palette(
            Color::rgb(0x2c, 0x3e, 0x50),
            Color::rgb(0xec, 0xf0, 0xf1),
            Color::WHITE,
        ),
        decoration: &MODERN_BAND,
    },
    Preset {
        template: DesignTemplate::CreativeVertical,
        palette: palette(
            Color::rgb(0xe7, 0x4c, 0x3c),
            Color::WHITE,
            Color::rgb(0xe7, 0x4c, 0x3c),
        ),
        decoration: &VERTICAL_SIDEBAR,
    },
    Preset {
        template: DesignTemplate::CreativeHorizontal,
        palette: palette(
            Color::rgb(0x34, 0x98, 0xdb),
            Color::WHITE,
            Color::WHITE,
        ),
        decoration: &HORIZONTAL_BAND,
    },
    Preset {
        template: DesignTemplate::Minimalist,
        palette: palette(
            Color::rgb(0x34, 0x49, 0x5e),
            Color::rgb(0xbd, 0xc3, 0xc7),
            Color::rgb(0x34, 0x49, 0x5e),
        ),
        decoration: &MINIMAL_RULE,
    },
    Preset {
        template: DesignTemplate::Infographic,
        palette: palette(
            Color::rgb(0x27, 0xae, 0x60),
            Color::rgb(0xf1, 0xc4, 0x0f),
            Color::WHITE,
        ),
        decoration: &INFOGRAPHIC_BAND,
    },
    Preset {
        template: DesignTemplate::Timeline,
        palette: palette(
            Color::rgb(0x8e, 0x44, 0xad),
            Color::rgb(0xec, 0xf0, 0xf1),
            Color::rgb(0x8e, 0x44, 0xad),
        ),
        decoration: &TIMELINE_RAIL,
    },
];
