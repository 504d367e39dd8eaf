//! Resume builder core: data model, design templates, a paginating layout engine with PDF
//! export, and an account store for saved resumes.

pub mod builder;
pub mod config;
pub mod elements;
pub mod fonts;
pub mod layout;
pub mod model;
pub mod richtext;
pub mod store;
pub mod suggestions;
pub mod templates;

#[cfg(feature = "bookmarks")]
pub mod bookmarks;

pub use builder::{download_pdf, generate_pdf, PdfBuildError, RenderedPdf, ResumePdfBuilder};
pub use model::{Resume, ResumeContent};
pub use templates::DesignTemplate;
