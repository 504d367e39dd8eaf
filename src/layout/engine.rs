use log::debug;

use super::{
    place_line, wrap_text, Cursor, DrawOp, LayoutDocument, LayoutPage, PageGeometry, Rect,
    SectionAnchor, SourceLine, TextRole, TextRun,
};
use crate::fonts::{self, FontFamily, FontVariant, DEFAULT_FONT_SIZE, PT_TO_MM};
use crate::model::{ResumeContent, StyleOptions};
use crate::richtext::{Color, Span};
use crate::templates::{DesignTemplate, Preset};

/// Top of the body on the first page, below the header block.
pub const BODY_TOP_MM: f32 = 80.0;
/// Edge length of the square profile picture.
pub const PROFILE_IMAGE_SIZE_MM: f32 = 40.0;
/// Title of the section generated from the personal summary.
pub const SUMMARY_TITLE: &str = "Professional Summary";

/// Name baseline, measured from the top margin.
const NAME_BASELINE_MM: f32 = 15.0;
const CONTACT_BASELINE_GAP_MM: f32 = 10.0;
/// Horizontal offset of the header text when a picture sits beside it.
const HEADER_TEXT_OFFSET_MM: f32 = 50.0;
const IMAGE_FRAME_RADIUS_MM: f32 = 21.0;

const NAME_SIZE_DELTA: f32 = 8.0;
const TITLE_SIZE_DELTA: f32 = 2.0;
const FOOTER_FONT_SIZE: f32 = 10.0;

const MIN_CONTENT_ADVANCE_MM: f32 = 7.0;
const MIN_TITLE_ADVANCE_MM: f32 = 10.0;
const ITEM_GAP_MM: f32 = 3.0;
const SECTION_GAP_MM: f32 = 10.0;
const BULLET_INDENT_MM: f32 = 6.0;

/// Fraction of the em box above the baseline.
const ASCENT_RATIO: f32 = 0.8;

const BULLET: &str = "\u{2022}";

/// Paginates resume content onto fixed-size pages.
#[derive(Clone, Debug)]
pub struct LayoutEngine {
    geometry: PageGeometry,
    template: DesignTemplate,
    fallback_font_size: f32,
}

impl LayoutEngine {
    pub fn new(geometry: PageGeometry, template: DesignTemplate) -> Self {
        Self {
            geometry,
            template,
            fallback_font_size: DEFAULT_FONT_SIZE,
        }
    }

    /// Point size used when the resume's font size cannot be parsed.
    pub fn with_fallback_font_size(mut self, size: f32) -> Self {
        self.fallback_font_size = size;
        self
    }

    pub fn geometry(&self) -> &PageGeometry {
        &self.geometry
    }

    pub fn template(&self) -> DesignTemplate {
        self.template
    }

    /// Lays out `content`.
    ///
    /// `with_image` reserves the picture slot in the header; pass it only when the picture was
    /// actually decoded so the header text never leaves a gap for a missing image.
    pub fn layout(&self, content: &ResumeContent, with_image: bool) -> LayoutDocument {
        let style = &content.style_options;
        let family = style.font_family();
        let size = fonts::parse_font_size_or(&style.font_size, self.fallback_font_size);

        let mut composer = Composer {
            geometry: self.geometry,
            preset: self.template.preset(),
            family,
            style,
            size,
            pages: Vec::new(),
            sections: Vec::new(),
        };

        let header_end = composer.header(content, with_image);
        composer.body(content, body_start(header_end));
        composer.stamp_page_numbers();

        debug!(
            "Laid out {} section(s) on {} page(s) using {} at {}pt.",
            composer.sections.len(),
            composer.pages.len(),
            family,
            size
        );

        LayoutDocument {
            geometry: self.geometry,
            family,
            pages: composer.pages,
            sections: composer.sections,
        }
    }
}

impl Default for LayoutEngine {
    fn default() -> Self {
        Self::new(PageGeometry::a4(), DesignTemplate::Default)
    }
}

/// Where the body begins once the header ends at `header_end`.
fn body_start(header_end: Cursor) -> Cursor {
    let y = if header_end.page == 0 {
        BODY_TOP_MM.max(header_end.y + SECTION_GAP_MM)
    } else {
        header_end.y + SECTION_GAP_MM
    };
    Cursor::new(header_end.x, y, header_end.page)
}

fn ascent(size: f32) -> f32 {
    size * PT_TO_MM * ASCENT_RATIO
}

fn measurer(family: FontFamily, variant: FontVariant, size: f32) -> impl Fn(&str) -> f32 {
    move |text| fonts::text_width_mm(text, family, variant, size)
}

/// Returns the text after a leading bullet marker, if there is one.
fn strip_bullet(item: &str) -> Option<&str> {
    let trimmed = item.trim_start();
    trimmed
        .strip_prefix(BULLET)
        .or_else(|| trimmed.strip_prefix("- "))
        .or_else(|| trimmed.strip_prefix("* "))
        .map(str::trim)
}

struct Composer<'a> {
    geometry: PageGeometry,
    preset: &'static Preset,
    family: FontFamily,
    style: &'a StyleOptions,
    size: f32,
    pages: Vec<LayoutPage>,
    sections: Vec<SectionAnchor>,
}

impl Composer<'_> {
    /// Returns page `index`, creating and decorating any pages up to it.
    fn page_mut(&mut self, index: usize) -> &mut LayoutPage {
        while self.pages.len() <= index {
            let mut page = LayoutPage::new(self.pages.len());
            self.preset
                .decoration
                .decorate(&mut page, &self.geometry, &self.preset.palette);
            debug!("Started page {}.", page.number());
            self.pages.push(page);
        }
        &mut self.pages[index]
    }

    fn variant(&self) -> FontVariant {
        FontVariant::from_flags(self.style.bold, self.style.italic)
    }

    fn content_advance(&self) -> f32 {
        fonts::line_height_mm(self.size).max(MIN_CONTENT_ADVANCE_MM)
    }

    fn styled(&self, text: impl Into<String>, size: f32, color: Color) -> Span {
        Span::new(text, size)
            .with_bold(self.style.bold)
            .with_italic(self.style.italic)
            .with_underline(self.style.underline)
            .colored(color)
    }

    fn put_text(
        &mut self,
        at: Cursor,
        advance: f32,
        span: Span,
        role: TextRole,
        source: Option<SourceLine>,
    ) {
        let width = fonts::text_width_mm(span.text(), self.family, span.variant(), span.size());
        let run = TextRun {
            x: at.x,
            baseline: at.y + ascent(span.size()),
            bounds: Rect::new(at.x, at.y, width, advance),
            span,
            role,
            source,
        };
        self.page_mut(at.page).push(DrawOp::Text(run));
    }

    /// Places picture, name and contact line, starting on the first page. Returns the cursor
    /// below the lowest header element.
    fn header(&mut self, content: &ResumeContent, with_image: bool) -> Cursor {
        let geometry = self.geometry;
        let palette = self.preset.palette;
        self.page_mut(0);

        let mut x = geometry.margin_left;
        let mut bottom = geometry.margin_top;
        if with_image {
            let rect = Rect::new(
                geometry.margin_left,
                geometry.margin_top,
                PROFILE_IMAGE_SIZE_MM,
                PROFILE_IMAGE_SIZE_MM,
            );
            let page = self.page_mut(0);
            page.push(DrawOp::Image { rect });
            page.push(DrawOp::StrokeCircle {
                center_x: rect.x + rect.width / 2.0,
                center_y: rect.y + rect.height / 2.0,
                radius: IMAGE_FRAME_RADIUS_MM,
                color: palette.secondary,
            });
            x += HEADER_TEXT_OFFSET_MM;
            bottom = rect.bottom();
        }

        let width = geometry.width - geometry.margin_right - x;
        let name_size = self.size + NAME_SIZE_DELTA;
        let name_baseline = geometry.margin_top + NAME_BASELINE_MM;
        let cursor = Cursor::new(x, name_baseline - ascent(name_size), 0);
        let cursor = self.header_lines(
            cursor,
            &content.form_data.full_name,
            name_size,
            width,
            TextRole::Name,
        );

        let contact_top = if cursor.page == 0 {
            (name_baseline + CONTACT_BASELINE_GAP_MM - ascent(self.size)).max(cursor.y)
        } else {
            cursor.y
        };
        let cursor = self.header_lines(
            cursor.advance(contact_top - cursor.y),
            &content.form_data.contact_line(),
            self.size,
            width,
            TextRole::Contact,
        );

        let end = cursor.at_x(geometry.margin_left);
        if end.page == 0 {
            Cursor { y: bottom.max(end.y), ..end }
        } else {
            debug!("Header continues onto page {}.", end.page + 1);
            end
        }
    }

    fn header_lines(
        &mut self,
        mut cursor: Cursor,
        text: &str,
        size: f32,
        width: f32,
        role: TextRole,
    ) -> Cursor {
        let geometry = self.geometry;
        let advance = fonts::line_height_mm(size);
        let color = self.preset.palette.header_text;
        let text = fonts::to_win_ansi(text);
        for line in wrap_text(&text, width, measurer(self.family, self.variant(), size)) {
            let at = place_line(cursor, advance, &geometry).at;
            let span = self.styled(line, size, color);
            self.put_text(at, advance, span, role, None);
            cursor = at.advance(advance);
        }
        cursor
    }

    fn body(&mut self, content: &ResumeContent, mut cursor: Cursor) {
        let summary = [content.form_data.summary.clone()];
        cursor = self.section(cursor, 0, None, SUMMARY_TITLE, &summary);
        for (index, section) in content.sections.iter().enumerate() {
            cursor = self.section(
                cursor,
                index + 1,
                Some(&section.id),
                &section.title,
                &section.content,
            );
        }
    }

    fn section(
        &mut self,
        cursor: Cursor,
        index: usize,
        id: Option<&str>,
        title: &str,
        items: &[String],
    ) -> Cursor {
        let geometry = self.geometry;
        let preset = self.preset;
        let title_size = self.size + TITLE_SIZE_DELTA;
        let title_advance = fonts::line_height_mm(title_size).max(MIN_TITLE_ADVANCE_MM);
        // The first title line only goes where the first content line fits under it.
        let keep_with_next = if items.is_empty() {
            title_advance
        } else {
            title_advance + self.content_advance()
        };
        let source = SourceLine {
            section: index,
            line: None,
        };

        let measure = measurer(self.family, self.variant(), title_size);
        let mut cursor = cursor.at_x(geometry.margin_left);
        for (n, line) in wrap_text(&fonts::to_win_ansi(title), geometry.usable_width(), measure)
            .into_iter()
            .enumerate()
        {
            let height = if n == 0 { keep_with_next } else { title_advance };
            let at = place_line(cursor, height, &geometry).at;
            let span = self.styled(line, title_size, preset.palette.primary);

            if n == 0 {
                let width =
                    fonts::text_width_mm(span.text(), self.family, span.variant(), title_size);
                let page = self.page_mut(at.page);
                preset.decoration.mark_section(
                    page,
                    &geometry,
                    Rect::new(at.x, at.y, width, title_advance),
                    &preset.palette,
                );
                self.sections.push(SectionAnchor {
                    id: id.map(str::to_string),
                    title: title.to_string(),
                    page: at.page + 1,
                });
            }

            self.put_text(at, title_advance, span, TextRole::SectionTitle, Some(source));
            cursor = at.advance(title_advance);
        }

        for (line, item) in items.iter().enumerate() {
            let source = SourceLine {
                section: index,
                line: Some(line),
            };
            cursor = match strip_bullet(item) {
                Some(text) => self.bullet(cursor, text, source),
                None => self.paragraph(cursor, item, source),
            };
            cursor = cursor.advance(ITEM_GAP_MM);
        }

        cursor.advance(SECTION_GAP_MM)
    }

    fn paragraph(&mut self, mut cursor: Cursor, text: &str, source: SourceLine) -> Cursor {
        let geometry = self.geometry;
        let advance = self.content_advance();
        let color = self.preset.palette.body;
        let measure = measurer(self.family, self.variant(), self.size);

        for line in wrap_text(&fonts::to_win_ansi(text), geometry.usable_width(), measure) {
            let at = place_line(cursor.at_x(geometry.margin_left), advance, &geometry).at;
            let span = self.styled(line, self.size, color);
            self.put_text(at, advance, span, TextRole::Content, Some(source));
            cursor = at.advance(advance);
        }
        cursor
    }

    /// Bullet marker in the margin column, wrapped text on a hanging indent.
    fn bullet(&mut self, mut cursor: Cursor, text: &str, source: SourceLine) -> Cursor {
        let geometry = self.geometry;
        let advance = self.content_advance();
        let color = self.preset.palette.body;
        let indent = geometry.margin_left + BULLET_INDENT_MM;
        let measure = measurer(self.family, self.variant(), self.size);

        let text = fonts::to_win_ansi(text);
        for (n, line) in wrap_text(&text, geometry.usable_width() - BULLET_INDENT_MM, measure)
            .into_iter()
            .enumerate()
        {
            let at = place_line(cursor.at_x(indent), advance, &geometry).at;
            if n == 0 {
                let marker = self.styled(BULLET, self.size, color).with_underline(false);
                self.put_text(
                    at.at_x(geometry.margin_left),
                    advance,
                    marker,
                    TextRole::BulletMarker,
                    Some(source),
                );
            }
            let span = self.styled(line, self.size, color);
            self.put_text(at, advance, span, TextRole::Content, Some(source));
            cursor = at.advance(advance);
        }
        cursor
    }

    /// Second pass: "Page i of N" centred near the bottom of every page.
    fn stamp_page_numbers(&mut self) {
        let total = self.pages.len();
        let geometry = self.geometry;
        let family = self.family;
        let baseline = geometry.height - geometry.footer_offset;

        for page in &mut self.pages {
            let text = format!("Page {} of {}", page.number(), total);
            let width = fonts::text_width_mm(&text, family, FontVariant::Regular, FOOTER_FONT_SIZE);
            let x = (geometry.width - width) / 2.0;
            page.push(DrawOp::Text(TextRun {
                x,
                baseline,
                bounds: Rect::new(
                    x,
                    baseline - ascent(FOOTER_FONT_SIZE),
                    width,
                    fonts::line_height_mm(FOOTER_FONT_SIZE),
                ),
                span: Span::new(text, FOOTER_FONT_SIZE),
                role: TextRole::Footer,
                source: None,
            }));
        }
    }
}
