//! The page-layout engine.
//!
//! Layout is a pure computation: a [`ResumeContent`](crate::model::ResumeContent) goes in, a
//! [`LayoutDocument`] comes out. The document is a list of pages, each holding positioned
//! [`DrawOp`]s in millimetres with the origin at the top-left corner of the page. Nothing here
//! touches a PDF surface; the renderer in [`crate::builder`] replays the operations onto printpdf
//! layers. Keeping the two apart lets pagination be tested without producing a PDF.

mod cursor;
mod engine;
mod wrap;

pub use cursor::{place_line, Cursor, Placement};
pub use engine::{LayoutEngine, BODY_TOP_MM, PROFILE_IMAGE_SIZE_MM, SUMMARY_TITLE};
pub use wrap::wrap_text;

use serde::{Deserialize, Serialize};

use crate::fonts::FontFamily;
use crate::richtext::{Color, Span};

/// Supported paper sizes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaperSize {
    #[default]
    A4,
    Letter,
}

impl PaperSize {
    /// Width and height in millimetres.
    pub fn dimensions_mm(self) -> (f32, f32) {
        match self {
            Self::A4 => (210.0, 297.0),
            Self::Letter => (215.9, 279.4),
        }
    }
}

/// Fixed page dimensions and margins, in millimetres.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PageGeometry {
    pub width: f32,
    pub height: f32,
    pub margin_left: f32,
    pub margin_right: f32,
    pub margin_top: f32,
    pub margin_bottom: f32,
    /// Distance from the bottom edge to the page-number baseline.
    pub footer_offset: f32,
}

impl PageGeometry {
    /// Margin applied on every side unless configured otherwise.
    pub const DEFAULT_MARGIN_MM: f32 = 20.0;
    /// Distance of the page-number footer from the bottom edge.
    pub const DEFAULT_FOOTER_OFFSET_MM: f32 = 10.0;

    /// Geometry for `paper` with uniform `margin`.
    pub fn new(paper: PaperSize, margin: f32) -> Self {
        let (width, height) = paper.dimensions_mm();
        Self {
            width,
            height,
            margin_left: margin,
            margin_right: margin,
            margin_top: margin,
            margin_bottom: margin,
            footer_offset: Self::DEFAULT_FOOTER_OFFSET_MM,
        }
    }

    /// A4 with the default margins.
    pub fn a4() -> Self {
        Self::new(PaperSize::A4, Self::DEFAULT_MARGIN_MM)
    }

    /// Horizontal space between the margins.
    pub fn usable_width(&self) -> f32 {
        self.width - self.margin_left - self.margin_right
    }

    /// Lowest y a line may reach before it has to move to the next page.
    pub fn bottom_limit(&self) -> f32 {
        self.height - self.margin_bottom
    }
}

impl Default for PageGeometry {
    fn default() -> Self {
        Self::a4()
    }
}

/// An axis-aligned rectangle; `y` grows downwards from the top edge.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Bottom edge.
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }
}

/// What a piece of placed text represents.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TextRole {
    Name,
    Contact,
    SectionTitle,
    Content,
    BulletMarker,
    Footer,
}

/// Position of the source text a run was wrapped from.
///
/// `section` counts from zero with the professional summary first, followed by the resume's own
/// sections in order; `line` is `None` for the section title.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SourceLine {
    pub section: usize,
    pub line: Option<usize>,
}

/// One physical line of text at a fixed position.
#[derive(Clone, Debug, PartialEq)]
pub struct TextRun {
    /// Left edge.
    pub x: f32,
    /// Baseline.
    pub baseline: f32,
    /// Box the line occupies; its height is one line advance.
    pub bounds: Rect,
    pub span: Span,
    pub role: TextRole,
    pub source: Option<SourceLine>,
}

/// A positioned drawing instruction.
#[derive(Clone, Debug, PartialEq)]
pub enum DrawOp {
    FillRect {
        rect: Rect,
        color: Color,
    },
    FillCircle {
        center_x: f32,
        center_y: f32,
        radius: f32,
        color: Color,
    },
    StrokeCircle {
        center_x: f32,
        center_y: f32,
        radius: f32,
        color: Color,
    },
    /// The profile picture, scaled into `rect`.
    Image {
        rect: Rect,
    },
    Text(TextRun),
}

/// Drawing operations for one page, in paint order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LayoutPage {
    index: usize,
    ops: Vec<DrawOp>,
}

impl LayoutPage {
    /// Creates an empty page. `index` is zero-based.
    pub fn new(index: usize) -> Self {
        Self {
            index,
            ops: Vec::new(),
        }
    }

    /// Zero-based page index.
    pub fn index(&self) -> usize {
        self.index
    }

    /// One-based page number.
    pub fn number(&self) -> usize {
        self.index + 1
    }

    /// Appends an operation.
    pub fn push(&mut self, op: DrawOp) {
        self.ops.push(op);
    }

    /// All operations in paint order.
    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    /// The text runs on this page in paint order.
    pub fn text_runs(&self) -> impl Iterator<Item = &TextRun> {
        self.ops.iter().filter_map(|op| match op {
            DrawOp::Text(run) => Some(run),
            _ => None,
        })
    }

    /// Text of every run, one per line.
    pub fn text_lines(&self) -> Vec<&str> {
        self.text_runs().map(|run| run.span.text()).collect()
    }

    /// The page-number footer, once stamped.
    pub fn footer(&self) -> Option<&str> {
        self.text_runs()
            .find(|run| run.role == TextRole::Footer)
            .map(|run| run.span.text())
    }
}

/// Where a section's title landed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SectionAnchor {
    /// Section id; `None` for the professional summary.
    pub id: Option<String>,
    pub title: String,
    /// One-based page number.
    pub page: usize,
}

/// A fully paginated resume.
#[derive(Clone, Debug, PartialEq)]
pub struct LayoutDocument {
    pub geometry: PageGeometry,
    pub family: FontFamily,
    pub pages: Vec<LayoutPage>,
    pub sections: Vec<SectionAnchor>,
}

impl LayoutDocument {
    /// Number of pages.
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Every text run in document order.
    pub fn text_runs(&self) -> impl Iterator<Item = &TextRun> {
        self.pages.iter().flat_map(LayoutPage::text_runs)
    }
}
