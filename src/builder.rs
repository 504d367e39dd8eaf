//! Turns resume content into PDF bytes.
//!
//! [`ResumePdfBuilder`] holds the page setup. Rendering decodes the optional profile picture,
//! runs the layout engine and replays each laid-out page onto a printpdf layer.

use std::fs;
use std::io::{BufWriter, Cursor};
use std::path::{Path, PathBuf};

use log::{debug, info, warn};
use lopdf::content::Content;
use lopdf::{Document, Object};
use printpdf::{Mm, PdfDocument};

use crate::elements::{self, PagePainter};
use crate::fonts::{self, BACKEND_BULLET_CODE, BULLET_CODE, DEFAULT_FONT_SIZE};
use crate::layout::{LayoutDocument, LayoutEngine, PageGeometry, PaperSize, SectionAnchor};
use crate::model::{Resume, ResumeContent};
use crate::templates::DesignTemplate;

/// File name a finished resume is offered under.
pub const DOWNLOAD_FILE_NAME: &str = "resume.pdf";

const LAYER_NAME: &str = "Layer 1";

/// Errors that abort a render.
///
/// A broken profile picture is not one of them: it is logged and the document is produced
/// without it.
#[derive(Debug, thiserror::Error)]
pub enum PdfBuildError {
    #[error("PDF backend error: {0}")]
    Backend(String),
    #[error("failed to re-encode shown text")]
    Reencode(#[from] ReencodeError),
    #[error("failed to write {}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[cfg(feature = "bookmarks")]
    #[error("failed to add section bookmarks")]
    Bookmarks(#[from] crate::bookmarks::BookmarkError),
}

fn backend(error: printpdf::Error) -> PdfBuildError {
    PdfBuildError::Backend(error.to_string())
}

/// Errors raised while patching the text encoding of a rendered document.
#[derive(Debug, thiserror::Error)]
pub enum ReencodeError {
    #[error("failed to parse rendered PDF")]
    Parse(#[from] lopdf::Error),
    #[error("failed to serialize PDF")]
    Io(#[from] std::io::Error),
}

/// A finished document.
#[derive(Clone, Debug)]
pub struct RenderedPdf {
    pub bytes: Vec<u8>,
    pub page_count: usize,
    /// Page on which each section title landed, summary first.
    pub section_pages: Vec<SectionAnchor>,
}

impl RenderedPdf {
    /// Writes the document to `path` in a single write.
    pub fn write_to(&self, path: impl AsRef<Path>) -> Result<(), PdfBuildError> {
        let path = path.as_ref();
        fs::write(path, &self.bytes).map_err(|source| PdfBuildError::Write {
            path: path.to_path_buf(),
            source,
        })?;
        info!("Wrote {} ({} bytes).", path.display(), self.bytes.len());
        Ok(())
    }
}

/// Page setup and template used for rendering.
#[derive(Clone, Debug)]
pub struct ResumePdfBuilder {
    paper: PaperSize,
    margin: f32,
    footer_offset: f32,
    template: DesignTemplate,
    title: Option<String>,
    fallback_font_size: f32,
}

impl Default for ResumePdfBuilder {
    fn default() -> Self {
        Self {
            paper: PaperSize::A4,
            margin: PageGeometry::DEFAULT_MARGIN_MM,
            footer_offset: PageGeometry::DEFAULT_FOOTER_OFFSET_MM,
            template: DesignTemplate::Default,
            title: None,
            fallback_font_size: DEFAULT_FONT_SIZE,
        }
    }
}

impl ResumePdfBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_paper(mut self, paper: PaperSize) -> Self {
        self.paper = paper;
        self
    }

    /// Uniform page margin in millimetres.
    pub fn with_margin(mut self, margin: f32) -> Self {
        self.margin = margin;
        self
    }

    /// Distance of the page-number baseline from the bottom edge.
    pub fn with_footer_offset(mut self, offset: f32) -> Self {
        self.footer_offset = offset;
        self
    }

    pub fn with_template(mut self, template: DesignTemplate) -> Self {
        self.template = template;
        self
    }

    /// Document title stored in the PDF metadata.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Font size used when the resume's size string is unusable.
    pub fn with_fallback_font_size(mut self, size: f32) -> Self {
        self.fallback_font_size = size;
        self
    }

    pub fn geometry(&self) -> PageGeometry {
        PageGeometry {
            footer_offset: self.footer_offset,
            ..PageGeometry::new(self.paper, self.margin)
        }
    }

    fn engine(&self) -> LayoutEngine {
        LayoutEngine::new(self.geometry(), self.template)
            .with_fallback_font_size(self.fallback_font_size)
    }

    /// Lays `content` out without rendering it.
    pub fn layout(&self, content: &ResumeContent, with_image: bool) -> LayoutDocument {
        self.engine().layout(content, with_image)
    }

    /// Renders `content` to PDF bytes.
    pub fn render(&self, content: &ResumeContent) -> Result<RenderedPdf, PdfBuildError> {
        let image = load_profile_image(content);
        let layout = self.layout(content, image.is_some());

        let title = self
            .title
            .clone()
            .unwrap_or_else(|| Resume::derived_title(content));
        let bytes = write_document(&layout, &title, image.as_ref())?;

        info!(
            "Rendered {} page(s) with the '{}' template ({} bytes).",
            layout.page_count(),
            self.template,
            bytes.len()
        );

        Ok(RenderedPdf {
            bytes,
            page_count: layout.page_count(),
            section_pages: layout.sections,
        })
    }

    /// Renders `content` and adds an outline entry for every section.
    #[cfg(feature = "bookmarks")]
    pub fn render_with_bookmarks(
        &self,
        content: &ResumeContent,
    ) -> Result<RenderedPdf, PdfBuildError> {
        let mut rendered = self.render(content)?;
        rendered.bytes =
            crate::bookmarks::apply_section_bookmarks(&rendered.bytes, &rendered.section_pages)?;
        Ok(rendered)
    }
}

/// Decodes the uploaded picture. Failures are logged and yield `None`.
fn load_profile_image(content: &ResumeContent) -> Option<image::DynamicImage> {
    let source = content.uploaded_image.as_ref()?;
    match elements::decode_image(source) {
        Ok(image) => Some(image),
        Err(err) => {
            warn!("Error adding image to PDF: {err}; continuing without it.");
            None
        }
    }
}

fn write_document(
    layout: &LayoutDocument,
    title: &str,
    image: Option<&image::DynamicImage>,
) -> Result<Vec<u8>, PdfBuildError> {
    let geometry = &layout.geometry;
    let (width, height) = (Mm(geometry.width), Mm(geometry.height));

    let (document, first_page, first_layer) = PdfDocument::new(title, width, height, LAYER_NAME);
    let font_set = fonts::install_builtin_fonts(&document, layout.family).map_err(backend)?;

    let mut layers = vec![document.get_page(first_page).get_layer(first_layer)];
    for _ in 1..layout.page_count() {
        let (page, layer) = document.add_page(width, height, LAYER_NAME);
        layers.push(document.get_page(page).get_layer(layer));
    }

    for (page, layer) in layout.pages.iter().zip(layers) {
        let painter = PagePainter::new(layer, &font_set, geometry.height);
        for op in page.ops() {
            painter.draw(op, image);
        }
        debug!("Painted page {} ({} ops).", page.number(), page.ops().len());
    }

    let mut bytes = Vec::new();
    document
        .save(&mut BufWriter::new(Cursor::new(&mut bytes)))
        .map_err(backend)?;
    Ok(restore_bullet_codes(bytes)?)
}

/// Rewrites the backend's bullet byte to the WinAnsi bullet code in every shown string.
///
/// Layout text only contains characters with a WinAnsi code, so the backend byte can only
/// stand for U+2022 here.
fn restore_bullet_codes(pdf: Vec<u8>) -> Result<Vec<u8>, ReencodeError> {
    let mut document = Document::load_mem(&pdf)?;
    let mut patched_pages = 0;

    for page_id in document.get_pages().into_values() {
        let mut content = Content::decode(&document.get_page_content(page_id)?)?;
        let mut patched = false;
        for operation in &mut content.operations {
            if matches!(operation.operator.as_str(), "Tj" | "TJ" | "'" | "\"") {
                for operand in &mut operation.operands {
                    patched |= patch_bullets(operand);
                }
            }
        }
        if patched {
            document.change_page_content(page_id, content.encode()?)?;
            patched_pages += 1;
        }
    }

    if patched_pages == 0 {
        return Ok(pdf);
    }
    debug!("Re-encoded bullets on {patched_pages} page(s).");
    let mut bytes = Vec::new();
    document.save_to(&mut bytes)?;
    Ok(bytes)
}

fn patch_bullets(operand: &mut Object) -> bool {
    match operand {
        Object::String(bytes, _) => {
            let mut patched = false;
            for byte in bytes.iter_mut().filter(|byte| **byte == BACKEND_BULLET_CODE) {
                *byte = BULLET_CODE;
                patched = true;
            }
            patched
        }
        Object::Array(items) => items
            .iter_mut()
            .fold(false, |patched, item| patch_bullets(item) | patched),
        _ => false,
    }
}

/// Renders a saved resume with its own template.
pub fn generate_pdf(resume: &Resume) -> Result<RenderedPdf, PdfBuildError> {
    ResumePdfBuilder::new()
        .with_template(resume.design_template)
        .with_title(resume.title.clone())
        .render(&resume.content)
}

/// Renders `resume` and writes it to `dir` as [`DOWNLOAD_FILE_NAME`].
pub fn download_pdf(resume: &Resume, dir: impl AsRef<Path>) -> Result<PathBuf, PdfBuildError> {
    let path = dir.as_ref().join(DOWNLOAD_FILE_NAME);
    generate_pdf(resume)?.write_to(&path)?;
    Ok(path)
}
