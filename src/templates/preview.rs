//! On-screen preview trees.
//!
//! A preview is a small tree of nodes describing how a template arranges the resume: single
//! column, sidebar plus main column, banner over a grid, or a chronological rail. It carries no
//! pagination; a viewer scrolls it.

use crate::layout::SUMMARY_TITLE;
use crate::model::{ImageSource, ResumeContent, Section};

use super::DesignTemplate;

/// Named area of a preview.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Region {
    Page,
    Header,
    /// Full-width coloured header.
    Banner,
    Sidebar,
    Main,
    /// Two-column card grid.
    Grid,
    Card,
    Timeline,
    Section,
}

/// How list items are marked.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ListMarker {
    Disc,
    Dot,
}

#[derive(Clone, Debug, PartialEq)]
pub enum PreviewNode {
    Container {
        region: Region,
        children: Vec<PreviewNode>,
    },
    Image(ImageSource),
    Heading {
        level: u8,
        text: String,
    },
    Paragraph(String),
    List {
        marker: ListMarker,
        items: Vec<String>,
    },
    /// Chronological marker beside a timeline entry.
    TimelineDot,
}

impl PreviewNode {
    fn container(region: Region, children: Vec<PreviewNode>) -> Self {
        Self::Container { region, children }
    }

    /// Child nodes; empty for leaves.
    pub fn children(&self) -> &[PreviewNode] {
        match self {
            Self::Container { children, .. } => children,
            _ => &[],
        }
    }

    /// Depth-first search for the first container of `region`.
    pub fn find(&self, region: Region) -> Option<&PreviewNode> {
        match self {
            Self::Container { region: own, .. } if *own == region => Some(self),
            _ => self.children().iter().find_map(|child| child.find(region)),
        }
    }

    /// Every piece of text in reading order.
    pub fn text_lines(&self) -> Vec<&str> {
        let mut lines = Vec::new();
        self.collect_text(&mut lines);
        lines
    }

    fn collect_text<'a>(&'a self, lines: &mut Vec<&'a str>) {
        match self {
            Self::Container { children, .. } => {
                for child in children {
                    child.collect_text(lines);
                }
            }
            Self::Heading { text, .. } | Self::Paragraph(text) => lines.push(text),
            Self::List { items, .. } => lines.extend(items.iter().map(String::as_str)),
            Self::Image(_) | Self::TimelineDot => {}
        }
    }
}

/// Builds the preview tree `template` produces for `content`.
pub fn preview(template: DesignTemplate, content: &ResumeContent) -> PreviewNode {
    let children = match template {
        DesignTemplate::Default | DesignTemplate::Minimalist => vec![
            header(Region::Header, content),
            PreviewNode::container(Region::Main, single_column(content, ListMarker::Disc)),
        ],
        DesignTemplate::Modern => vec![
            header(Region::Header, content),
            PreviewNode::container(Region::Main, cards(content, ListMarker::Disc)),
        ],
        DesignTemplate::CreativeVertical => creative_vertical(content),
        DesignTemplate::CreativeHorizontal | DesignTemplate::Infographic => {
            let marker = if template == DesignTemplate::Infographic {
                ListMarker::Dot
            } else {
                ListMarker::Disc
            };
            vec![
                header(Region::Banner, content),
                summary(Region::Section, content),
                PreviewNode::container(
                    Region::Grid,
                    content
                        .sections
                        .iter()
                        .map(|section| section_node(Region::Card, section, marker))
                        .collect(),
                ),
            ]
        }
        DesignTemplate::Timeline => vec![
            header(Region::Header, content),
            summary(Region::Section, content),
            PreviewNode::container(
                Region::Timeline,
                content
                    .sections
                    .iter()
                    .flat_map(|section| {
                        [
                            PreviewNode::TimelineDot,
                            section_node(Region::Section, section, ListMarker::Disc),
                        ]
                    })
                    .collect(),
            ),
        ],
    };

    PreviewNode::container(Region::Page, children)
}

fn header(region: Region, content: &ResumeContent) -> PreviewNode {
    let mut children = Vec::new();
    if let Some(image) = &content.uploaded_image {
        children.push(PreviewNode::Image(image.clone()));
    }
    children.push(PreviewNode::Heading {
        level: 1,
        text: content.form_data.full_name.clone(),
    });
    children.push(PreviewNode::Paragraph(content.form_data.contact_line()));
    PreviewNode::container(region, children)
}

fn summary(region: Region, content: &ResumeContent) -> PreviewNode {
    PreviewNode::container(
        region,
        vec![
            PreviewNode::Heading {
                level: 2,
                text: SUMMARY_TITLE.to_string(),
            },
            PreviewNode::Paragraph(content.form_data.summary.clone()),
        ],
    )
}

fn section_node(region: Region, section: &Section, marker: ListMarker) -> PreviewNode {
    PreviewNode::container(
        region,
        vec![
            PreviewNode::Heading {
                level: 2,
                text: section.title.clone(),
            },
            PreviewNode::List {
                marker,
                items: section.content.clone(),
            },
        ],
    )
}

fn single_column(content: &ResumeContent, marker: ListMarker) -> Vec<PreviewNode> {
    std::iter::once(summary(Region::Section, content))
        .chain(
            content
                .sections
                .iter()
                .map(|section| section_node(Region::Section, section, marker)),
        )
        .collect()
}

fn cards(content: &ResumeContent, marker: ListMarker) -> Vec<PreviewNode> {
    std::iter::once(summary(Region::Card, content))
        .chain(
            content
                .sections
                .iter()
                .map(|section| section_node(Region::Card, section, marker)),
        )
        .collect()
}

/// Header, summary and skills in the sidebar; every other section in the main column.
fn creative_vertical(content: &ResumeContent) -> Vec<PreviewNode> {
    let (side, main): (Vec<&Section>, Vec<&Section>) = content
        .sections
        .iter()
        .partition(|section| section.id == "skills");

    let mut sidebar = vec![header(Region::Header, content), summary(Region::Section, content)];
    sidebar.extend(
        side.into_iter()
            .map(|section| section_node(Region::Section, section, ListMarker::Disc)),
    );

    vec![
        PreviewNode::container(Region::Sidebar, sidebar),
        PreviewNode::container(
            Region::Main,
            main.into_iter()
                .map(|section| section_node(Region::Section, section, ListMarker::Disc))
                .collect(),
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn position(lines: &[&str], needle: &str) -> usize {
        lines
            .iter()
            .position(|line| *line == needle)
            .unwrap_or_else(|| panic!("{needle:?} missing"))
    }

    #[test]
    fn every_template_shows_every_line_in_order() {
        let content = ResumeContent::sample();
        for template in DesignTemplate::ALL {
            let tree = preview(template, &content);
            let lines = tree.text_lines();
            assert!(lines.contains(&"John Doe"), "{template}");
            assert!(lines.contains(&SUMMARY_TITLE), "{template}");
            for section in &content.sections {
                let mut last = position(&lines, &section.title);
                for item in &section.content {
                    let at = position(&lines, item);
                    assert!(at > last, "{template}: {item:?} out of order");
                    last = at;
                }
            }
        }
    }

    #[test]
    fn creative_vertical_puts_skills_in_sidebar() {
        let tree = preview(DesignTemplate::CreativeVertical, &ResumeContent::sample());
        let sidebar = tree.find(Region::Sidebar).expect("sidebar").text_lines();
        let main = tree.find(Region::Main).expect("main").text_lines();
        assert!(sidebar.contains(&"Skills"));
        assert!(sidebar.contains(&"Python"));
        assert!(!main.contains(&"Skills"));
        assert!(main.contains(&"Work Experience"));
    }

    #[test]
    fn timeline_marks_each_section() {
        let content = ResumeContent::sample();
        let tree = preview(DesignTemplate::Timeline, &content);
        let rail = tree.find(Region::Timeline).expect("timeline");
        let dots = rail
            .children()
            .iter()
            .filter(|node| matches!(node, PreviewNode::TimelineDot))
            .count();
        assert_eq!(dots, content.sections.len());
    }

    #[test]
    fn image_only_when_uploaded() {
        let mut content = ResumeContent::sample();
        let header = |tree: &PreviewNode| {
            tree.find(Region::Banner)
                .expect("banner")
                .children()
                .iter()
                .any(|node| matches!(node, PreviewNode::Image(_)))
        };
        assert!(!header(&preview(DesignTemplate::Infographic, &content)));

        content.uploaded_image = Some(ImageSource::from_path("me.png"));
        assert!(header(&preview(DesignTemplate::Infographic, &content)));
    }
}
