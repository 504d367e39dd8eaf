use lopdf::content::Content;
use lopdf::{Document, Object};
use resume_pdf::model::{ImageSource, ResumeContent, Section};
use resume_pdf::{download_pdf, generate_pdf, DesignTemplate, Resume, ResumePdfBuilder};
use sha2::{Digest, Sha256};

fn render(content: &ResumeContent, template: DesignTemplate) -> Vec<u8> {
    ResumePdfBuilder::new()
        .with_template(template)
        .render(content)
        .expect("render resume pdf")
        .bytes
}

fn page_operations(bytes: &[u8]) -> Vec<Vec<lopdf::content::Operation>> {
    let document = Document::load_mem(bytes).expect("parse rendered pdf");
    document
        .get_pages()
        .into_values()
        .map(|page| {
            let data = document.get_page_content(page).expect("page content");
            Content::decode(&data).expect("decode content").operations
        })
        .collect()
}

/// Strings shown with `Tj`/`TJ` on one page.
fn shown_text(operations: &[lopdf::content::Operation]) -> Vec<Vec<u8>> {
    let mut shown = Vec::new();
    for operation in operations {
        match operation.operator.as_str() {
            "Tj" => shown.extend(operation.operands.iter().filter_map(string_bytes)),
            "TJ" => {
                for operand in &operation.operands {
                    if let Object::Array(items) = operand {
                        shown.extend(items.iter().filter_map(string_bytes));
                    }
                }
            }
            _ => {}
        }
    }
    shown
}

fn string_bytes(object: &Object) -> Option<Vec<u8>> {
    match object {
        Object::String(bytes, _) => Some(bytes.clone()),
        _ => None,
    }
}

fn shows(operations: &[lopdf::content::Operation], text: &str) -> bool {
    shown_text(operations)
        .iter()
        .any(|bytes| bytes.as_slice() == text.as_bytes())
}

/// Digest of the drawing operations, ignoring font resource names.
fn content_digest(bytes: &[u8]) -> Vec<u8> {
    let mut hasher = Sha256::new();
    for operations in page_operations(bytes) {
        for operation in operations {
            hasher.update(operation.operator.as_bytes());
            let operands = if operation.operator == "Tf" {
                &operation.operands[1..]
            } else {
                &operation.operands[..]
            };
            hasher.update(format!("{operands:?}").as_bytes());
        }
        hasher.update(b"\n--page--\n");
    }
    hasher.finalize().to_vec()
}

fn many_lines(count: usize) -> ResumeContent {
    let mut content = ResumeContent::sample();
    content.sections = vec![Section::new(
        "experience",
        "Work Experience",
        (0..count).map(|n| format!("\u{2022} Delivered milestone {n} ahead of schedule")),
    )];
    content
}

#[test]
fn sample_renders_a_single_page_pdf() {
    let mut content = ResumeContent::sample();
    content.sections.truncate(2);
    let rendered = ResumePdfBuilder::new().render(&content).expect("render");

    assert!(rendered.bytes.starts_with(b"%PDF-"));
    assert_eq!(rendered.page_count, 1);

    let pages = page_operations(&rendered.bytes);
    assert_eq!(pages.len(), 1);
    assert!(shows(&pages[0], "John Doe"));
    assert!(shows(&pages[0], "Professional Summary"));
    assert!(shows(&pages[0], "Page 1 of 1"));
}

#[test]
fn overflowing_content_renders_every_page() {
    let rendered = ResumePdfBuilder::new()
        .render(&many_lines(80))
        .expect("render");
    assert!(rendered.page_count > 1);

    let pages = page_operations(&rendered.bytes);
    assert_eq!(pages.len(), rendered.page_count);
    for (index, operations) in pages.iter().enumerate() {
        let footer = format!("Page {} of {}", index + 1, rendered.page_count);
        assert!(shows(operations, &footer), "missing footer on page {}", index + 1);
    }
}

#[test]
fn bullets_use_the_win_ansi_code() {
    let mut content = many_lines(3);
    content.form_data.summary = "Led the \u{201C}core\u{201D} team \u{2014} 5 years.".into();
    let pages = page_operations(&render(&content, DesignTemplate::Default));
    let shown = shown_text(&pages[0]);

    let markers = shown.iter().filter(|bytes| bytes.as_slice() == [0x95_u8]).count();
    assert_eq!(markers, 3);
    assert!(shown.iter().all(|bytes| !bytes.contains(&0x7F)));

    let contact = b"john@example.com \x95 (555) 123-4567";
    assert!(shown.iter().any(|bytes| bytes.as_slice() == contact));
    assert!(shown
        .iter()
        .any(|bytes| bytes.as_slice() == b"Led the \x93core\x94 team \x97 5 years."));
}

#[test]
fn letters_outside_win_ansi_are_substituted() {
    let mut content = ResumeContent::sample();
    content.form_data.full_name = "\u{141}ukasz \u{17B}\u{F3}\u{142}\u{107} \u{674E}\u{96F7}".into();
    let pages = page_operations(&render(&content, DesignTemplate::Default));
    assert!(shown_text(&pages[0])
        .iter()
        .any(|bytes| bytes.as_slice() == b"Lukasz Z\xF3lc ??"));
}

#[test]
fn rendering_is_deterministic() {
    for template in DesignTemplate::ALL {
        let content = many_lines(40);
        let first = render(&content, template);
        let second = render(&content, template);
        assert_eq!(
            content_digest(&first),
            content_digest(&second),
            "{template} drew different content"
        );
    }
}

#[test]
fn templates_paint_different_pages() {
    let content = ResumeContent::sample();
    let plain = content_digest(&render(&content, DesignTemplate::Default));
    let modern = content_digest(&render(&content, DesignTemplate::Modern));
    assert_ne!(plain, modern);
}

#[test]
fn undecodable_picture_is_skipped() {
    let mut content = ResumeContent::sample();
    content.uploaded_image = Some(ImageSource::from_bytes(b"not an image", "image/png"));

    let rendered = ResumePdfBuilder::new()
        .render(&content)
        .expect("render without picture");
    let without = ResumePdfBuilder::new()
        .render(&ResumeContent::sample())
        .expect("render");
    assert_eq!(
        content_digest(&rendered.bytes),
        content_digest(&without.bytes)
    );
}

#[test]
fn missing_picture_file_is_skipped() {
    let mut content = ResumeContent::sample();
    content.uploaded_image = Some(ImageSource::from_path("/no/such/picture.png"));
    let rendered = ResumePdfBuilder::new().render(&content).expect("render");
    assert!(rendered.page_count >= 1);
}

#[test]
fn uploaded_picture_is_embedded() {
    let mut png = Vec::new();
    image::DynamicImage::new_rgb8(4, 4)
        .write_to(&mut png, image::ImageOutputFormat::Png)
        .expect("encode png");

    let mut content = ResumeContent::sample();
    content.uploaded_image = Some(ImageSource::from_bytes(&png, "image/png"));
    let bytes = render(&content, DesignTemplate::Default);

    let pages = page_operations(&bytes);
    assert!(pages[0].iter().any(|operation| operation.operator == "Do"));
}

#[test]
fn saved_resume_downloads_as_resume_pdf() {
    let dir = tempfile::tempdir().expect("tempdir");
    let resume = Resume::new(ResumeContent::sample(), DesignTemplate::Minimalist);

    let path = download_pdf(&resume, dir.path()).expect("download");
    assert_eq!(path, dir.path().join("resume.pdf"));

    let written = std::fs::read(&path).expect("read pdf");
    let generated = generate_pdf(&resume).expect("generate");
    assert_eq!(content_digest(&written), content_digest(&generated.bytes));
}

#[cfg(feature = "bookmarks")]
#[test]
fn bookmarks_point_at_section_pages() {
    let rendered = ResumePdfBuilder::new()
        .render_with_bookmarks(&ResumeContent::sample())
        .expect("render with bookmarks");

    let document = Document::load_mem(&rendered.bytes).expect("parse");
    let catalog = document.catalog().expect("catalog");
    assert!(catalog.get(b"Outlines").is_ok());
    assert_eq!(rendered.section_pages.len(), 5);
    assert_eq!(rendered.section_pages[0].title, "Professional Summary");
}
