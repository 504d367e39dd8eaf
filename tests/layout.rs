use resume_pdf::fonts::FontFamily;
use resume_pdf::layout::{LayoutDocument, LayoutEngine, PageGeometry, PaperSize, TextRole};
use resume_pdf::model::{PersonalInfo, ResumeContent, Section};
use resume_pdf::DesignTemplate;

fn jane_doe() -> ResumeContent {
    ResumeContent {
        form_data: PersonalInfo {
            full_name: "Jane Doe".into(),
            email: "jane@x.com".into(),
            phone: "555-0000".into(),
            summary: "Engineer.".into(),
        },
        sections: vec![Section::new("skills", "Skills", ["Go", "Rust"])],
        ..ResumeContent::default()
    }
}

fn long_bullets(count: usize) -> ResumeContent {
    let lines = (0..count).map(|n| {
        format!(
            "\u{2022} Item {n}: shipped a long-running migration of the billing platform to a \
             new event pipeline while keeping every downstream report consistent"
        )
    });
    ResumeContent {
        sections: vec![Section::new("experience", "Work Experience", lines)],
        ..jane_doe()
    }
}

fn default_layout(content: &ResumeContent) -> LayoutDocument {
    LayoutEngine::default().layout(content, false)
}

#[test]
fn short_resume_fits_on_one_page() {
    let document = default_layout(&jane_doe());
    assert_eq!(document.page_count(), 1);

    let lines = document.pages[0].text_lines();
    for expected in [
        "Jane Doe",
        "Professional Summary",
        "Engineer.",
        "Skills",
        "Go",
        "Rust",
        "Page 1 of 1",
    ] {
        assert!(lines.contains(&expected), "missing {expected:?} in {lines:?}");
    }
    assert!(lines.iter().any(|line| line.contains("jane@x.com")));
    assert!(lines.iter().any(|line| line.contains("555-0000")));
    assert_eq!(document.pages[0].footer(), Some("Page 1 of 1"));
}

#[test]
fn long_section_flows_over_numbered_pages() {
    let document = default_layout(&long_bullets(200));
    let total = document.page_count();
    assert!(total > 1, "expected overflow, got {total} page(s)");

    for page in &document.pages {
        let expected = format!("Page {} of {}", page.number(), total);
        assert_eq!(page.footer(), Some(expected.as_str()));
    }

    let geometry = document.geometry;
    let mut placed = Vec::new();
    for page in &document.pages {
        for run in page.text_runs() {
            if run.role == TextRole::Content {
                assert!(run.bounds.bottom() <= geometry.bottom_limit() + 1e-3);
                match run.source {
                    Some(source) if source.section == 1 => {
                        placed.push((page.index(), source.line.expect("content line")));
                    }
                    _ => {}
                }
            }
        }
    }

    let mut lines: Vec<usize> = placed.iter().map(|(_, line)| *line).collect();
    assert!(lines.windows(2).all(|pair| pair[0] <= pair[1]), "lines out of order");
    assert!(placed.windows(2).all(|pair| pair[0].0 <= pair[1].0), "pages out of order");
    lines.dedup();
    assert_eq!(lines, (0..200).collect::<Vec<_>>());
}

#[test]
fn layout_is_repeatable() {
    let content = long_bullets(60);
    let engine = LayoutEngine::new(PageGeometry::a4(), DesignTemplate::Timeline);
    assert_eq!(engine.layout(&content, false), engine.layout(&content, false));
}

#[test]
fn resume_without_sections_has_one_page() {
    let content = ResumeContent {
        sections: Vec::new(),
        ..jane_doe()
    };
    let document = default_layout(&content);
    assert_eq!(document.page_count(), 1);
    assert_eq!(document.sections.len(), 1);
    assert_eq!(document.sections[0].title, "Professional Summary");
}

#[test]
fn empty_section_renders_its_title_only() {
    let mut content = jane_doe();
    content.sections.push(Section::new("projects", "Projects", Vec::<String>::new()));

    let document = default_layout(&content);
    let runs: Vec<_> = document
        .text_runs()
        .filter(|run| run.source.map(|source| source.section) == Some(2))
        .collect();
    assert_eq!(runs.len(), 1);
    assert_eq!(runs[0].role, TextRole::SectionTitle);
    assert_eq!(runs[0].span.text(), "Projects");
}

#[test]
fn unsupported_font_falls_back_to_helvetica() {
    let mut content = jane_doe();
    content.style_options.font = "Comic Sans".into();
    let document = default_layout(&content);
    assert_eq!(document.family, FontFamily::Helvetica);
    assert_eq!(document.page_count(), 1);
}

#[test]
fn serif_label_selects_times() {
    let mut content = jane_doe();
    content.style_options.font = "Georgia, serif".into();
    assert_eq!(default_layout(&content).family, FontFamily::Times);
}

#[test]
fn letter_paper_changes_the_page_box() {
    let engine = LayoutEngine::new(PageGeometry::new(PaperSize::Letter, 20.0), DesignTemplate::Modern);
    let document = engine.layout(&jane_doe(), false);
    assert_eq!(document.geometry.width, 215.9);
    assert_eq!(document.geometry.height, 279.4);

    let footer = document
        .text_runs()
        .find(|run| run.role == TextRole::Footer)
        .expect("footer");
    assert_eq!(footer.baseline, 279.4 - PageGeometry::DEFAULT_FOOTER_OFFSET_MM);
}

#[test]
fn section_anchors_follow_document_order() {
    let mut content = ResumeContent::sample();
    let custom = content.add_custom_section();
    content.rename_section(&custom, "Volunteering").expect("rename");

    let document = default_layout(&content);
    let titles: Vec<_> = document.sections.iter().map(|anchor| anchor.title.as_str()).collect();
    assert_eq!(
        titles,
        [
            "Professional Summary",
            "Work Experience",
            "Education",
            "Skills",
            "Projects",
            "Volunteering",
        ]
    );
    assert_eq!(document.sections[5].id.as_deref(), Some(custom.as_str()));
}

#[test]
fn every_template_lays_out_the_sample() {
    let content = ResumeContent::sample();
    for template in DesignTemplate::ALL {
        let document = LayoutEngine::new(PageGeometry::a4(), template).layout(&content, true);
        let lines: Vec<&str> = document
            .pages
            .iter()
            .flat_map(|page| page.text_lines())
            .collect();
        assert!(lines.contains(&"Senior Developer at Tech Co."), "{template}");
        assert!(lines.contains(&"E-commerce Platform"), "{template}");
        assert_eq!(document.pages[0].text_lines()[0], "John Doe", "{template}");
    }
}
