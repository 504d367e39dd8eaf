//! The resume data model.
//!
//! These types mirror the persisted record shape exactly (camelCase field names, string-typed
//! style values) so a saved resume round-trips through JSON without loss. Interpretation of the
//! loosely typed fields, such as font labels and size strings, happens at layout time.

use std::path::PathBuf;
use std::str::FromStr;

use base64::Engine as _;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::fonts::FontFamily;
use crate::templates::DesignTemplate;

/// Id prefix that marks a section as user-added and therefore removable.
pub const CUSTOM_SECTION_PREFIX: &str = "custom-";

/// Title given to freshly added custom sections.
pub const NEW_SECTION_TITLE: &str = "New Section";

/// Ids of the sections every resume starts with. These cannot be removed.
pub const BUILT_IN_SECTION_IDS: [&str; 4] = ["experience", "education", "skills", "projects"];

/// Name, contact details and summary shown in the resume header.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PersonalInfo {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub summary: String,
}

impl PersonalInfo {
    /// The contact line: email and phone joined by a bullet, empty parts omitted.
    pub fn contact_line(&self) -> String {
        [self.email.trim(), self.phone.trim()]
            .into_iter()
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(" \u{2022} ")
    }
}

/// A titled, ordered block of resume content.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub content: Vec<String>,
}

impl Section {
    /// Creates a section with the given id, title and lines.
    pub fn new<I, S>(id: impl Into<String>, title: impl Into<String>, content: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            id: id.into(),
            title: title.into(),
            content: content.into_iter().map(Into::into).collect(),
        }
    }

    /// Creates an empty, removable section with a fresh id.
    pub fn custom() -> Self {
        Self::new(
            format!("{CUSTOM_SECTION_PREFIX}{}", Uuid::new_v4()),
            NEW_SECTION_TITLE,
            [""],
        )
    }

    /// Whether the section was added by the user and may be removed.
    pub fn is_custom(&self) -> bool {
        self.id.starts_with(CUSTOM_SECTION_PREFIX)
    }
}

/// Document-wide font and emphasis settings.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StyleOptions {
    /// CSS-style font label, e.g. `"Georgia, serif"`.
    pub font: String,
    /// Size with unit, e.g. `"16px"`.
    pub font_size: String,
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
}

impl Default for StyleOptions {
    fn default() -> Self {
        Self {
            font: "Arial, sans-serif".to_string(),
            font_size: "16px".to_string(),
            bold: false,
            italic: false,
            underline: false,
        }
    }
}

impl StyleOptions {
    /// The supported family the font label maps to.
    pub fn font_family(&self) -> FontFamily {
        FontFamily::resolve(&self.font)
    }
}

/// Where the profile picture comes from.
///
/// Serialized as a single string: `data:` URIs verbatim, anything else as a file path.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ImageSource {
    /// Inline `data:<mime>;base64,<payload>` URI.
    DataUri(String),
    /// Image file on disk.
    Path(PathBuf),
}

impl ImageSource {
    /// Encodes raw image bytes as an inline data URI.
    pub fn from_bytes(bytes: impl AsRef<[u8]>, mime: &str) -> Self {
        let payload = base64::engine::general_purpose::STANDARD.encode(bytes);
        Self::DataUri(format!("data:{mime};base64,{payload}"))
    }

    /// References an image file.
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        Self::Path(path.into())
    }
}

impl From<String> for ImageSource {
    fn from(value: String) -> Self {
        if value.starts_with("data:") {
            Self::DataUri(value)
        } else {
            Self::Path(PathBuf::from(value))
        }
    }
}

impl From<ImageSource> for String {
    fn from(source: ImageSource) -> Self {
        match source {
            ImageSource::DataUri(uri) => uri,
            ImageSource::Path(path) => path.to_string_lossy().into_owned(),
        }
    }
}

/// Errors raised by editor operations on [`ResumeContent`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EditError {
    #[error("no section with id '{0}'")]
    UnknownSection(String),
    #[error("section '{0}' is built in and cannot be removed")]
    NotRemovable(String),
    #[error("section '{id}' has no line {index}")]
    LineOutOfRange { id: String, index: usize },
    #[error("unknown field '{0}'")]
    UnknownField(String),
}

/// An editable field, addressed as `fullName`, `email`, `phone`, `summary` or
/// `<section id>.<line index>`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FieldPath {
    FullName,
    Email,
    Phone,
    Summary,
    Line { section: String, index: usize },
}

impl FromStr for FieldPath {
    type Err = EditError;

    fn from_str(path: &str) -> Result<Self, Self::Err> {
        let field = match path {
            "fullName" => Self::FullName,
            "email" => Self::Email,
            "phone" => Self::Phone,
            "summary" => Self::Summary,
            _ => {
                let unknown = || EditError::UnknownField(path.to_string());
                let (section, index) = path.rsplit_once('.').ok_or_else(unknown)?;
                if section.is_empty() {
                    return Err(unknown());
                }
                Self::Line {
                    section: section.to_string(),
                    index: index.parse().map_err(|_| unknown())?,
                }
            }
        };
        Ok(field)
    }
}

/// Everything the layout engine needs to render a resume.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumeContent {
    #[serde(default)]
    pub form_data: PersonalInfo,
    #[serde(default)]
    pub sections: Vec<Section>,
    #[serde(default)]
    pub style_options: StyleOptions,
    #[serde(default)]
    pub uploaded_image: Option<ImageSource>,
}

impl Default for ResumeContent {
    fn default() -> Self {
        Self {
            form_data: PersonalInfo::default(),
            sections: default_sections(),
            style_options: StyleOptions::default(),
            uploaded_image: None,
        }
    }
}

impl ResumeContent {
    /// Pre-filled content offered when a new resume is opened in the editor.
    pub fn sample() -> Self {
        Self {
            form_data: PersonalInfo {
                full_name: "John Doe".to_string(),
                email: "john@example.com".to_string(),
                phone: "(555) 123-4567".to_string(),
                summary: "Experienced professional with a passion for innovation.".to_string(),
            },
            sections: vec![
                Section::new(
                    "experience",
                    "Work Experience",
                    [
                        "Senior Developer at Tech Co.",
                        "\u{2022} Led team of 5 developers",
                        "\u{2022} Implemented new features",
                    ],
                ),
                Section::new(
                    "education",
                    "Education",
                    [
                        "Bachelor of Science in Computer Science",
                        "University of Technology, 2015-2019",
                    ],
                ),
                Section::new(
                    "skills",
                    "Skills",
                    ["JavaScript", "React", "Node.js", "Python", "SQL"],
                ),
                Section::new(
                    "projects",
                    "Projects",
                    ["Personal Portfolio Website", "E-commerce Platform"],
                ),
            ],
            style_options: StyleOptions::default(),
            uploaded_image: None,
        }
    }

    /// Looks up a section by id.
    pub fn section(&self, id: &str) -> Option<&Section> {
        self.sections.iter().find(|section| section.id == id)
    }

    fn section_mut(&mut self, id: &str) -> Result<&mut Section, EditError> {
        self.sections
            .iter_mut()
            .find(|section| section.id == id)
            .ok_or_else(|| EditError::UnknownSection(id.to_string()))
    }

    /// Appends a new custom section and returns its id.
    pub fn add_custom_section(&mut self) -> String {
        let section = Section::custom();
        let id = section.id.clone();
        self.sections.push(section);
        id
    }

    /// Removes a custom section. Built-in sections are rejected.
    pub fn remove_section(&mut self, id: &str) -> Result<Section, EditError> {
        let index = self
            .sections
            .iter()
            .position(|section| section.id == id)
            .ok_or_else(|| EditError::UnknownSection(id.to_string()))?;

        if !self.sections[index].is_custom() {
            return Err(EditError::NotRemovable(id.to_string()));
        }

        Ok(self.sections.remove(index))
    }

    /// Renames a section.
    pub fn rename_section(&mut self, id: &str, title: impl Into<String>) -> Result<(), EditError> {
        self.section_mut(id)?.title = title.into();
        Ok(())
    }

    /// Appends an empty line to a section and returns its index.
    pub fn add_line(&mut self, id: &str) -> Result<usize, EditError> {
        let section = self.section_mut(id)?;
        section.content.push(String::new());
        Ok(section.content.len() - 1)
    }

    /// Replaces the text of one line.
    pub fn update_line(
        &mut self,
        id: &str,
        index: usize,
        value: impl Into<String>,
    ) -> Result<(), EditError> {
        let section = self.section_mut(id)?;
        let line = section
            .content
            .get_mut(index)
            .ok_or_else(|| EditError::LineOutOfRange {
                id: id.to_string(),
                index,
            })?;
        *line = value.into();
        Ok(())
    }

    /// Removes one line, preserving the order of the rest.
    pub fn remove_line(&mut self, id: &str, index: usize) -> Result<String, EditError> {
        let section = self.section_mut(id)?;
        if index >= section.content.len() {
            return Err(EditError::LineOutOfRange {
                id: id.to_string(),
                index,
            });
        }
        Ok(section.content.remove(index))
    }

    /// Whether `field` names something [`apply_suggestion`](Self::apply_suggestion) can write.
    pub fn has_field(&self, field: &str) -> bool {
        match field.parse::<FieldPath>() {
            Ok(FieldPath::Line { section, index }) => self
                .section(&section)
                .is_some_and(|section| index <= section.content.len()),
            Ok(_) => true,
            Err(_) => false,
        }
    }

    /// Writes a suggested `value` into `field`.
    ///
    /// A section line is replaced by one line per row of `value`, so a multi-line entry keeps
    /// its bullets as separate lines. Index `len` appends.
    pub fn apply_suggestion(&mut self, field: &str, value: &str) -> Result<(), EditError> {
        match field.parse::<FieldPath>()? {
            FieldPath::FullName => self.form_data.full_name = value.to_string(),
            FieldPath::Email => self.form_data.email = value.to_string(),
            FieldPath::Phone => self.form_data.phone = value.to_string(),
            FieldPath::Summary => self.form_data.summary = value.to_string(),
            FieldPath::Line { section, index } => {
                let target = self.section_mut(&section)?;
                let len = target.content.len();
                if index > len {
                    return Err(EditError::LineOutOfRange { id: section, index });
                }
                let end = (index + 1).min(len);
                target
                    .content
                    .splice(index..end, value.lines().map(str::to_string));
            }
        }
        Ok(())
    }

    /// Completeness score from 0 to 100.
    ///
    /// Counts the four personal fields plus every section line, and reports the share that is
    /// non-blank.
    pub fn progress(&self) -> u8 {
        let personal = [
            &self.form_data.full_name,
            &self.form_data.email,
            &self.form_data.phone,
            &self.form_data.summary,
        ];
        let lines = self.sections.iter().flat_map(|section| section.content.iter());

        let (filled, total) = personal
            .into_iter()
            .chain(lines)
            .fold((0usize, 0usize), |(filled, total), field| {
                (filled + usize::from(!field.trim().is_empty()), total + 1)
            });

        if total == 0 {
            return 0;
        }
        ((filled as f64 * 100.0 / total as f64).round() as u8).min(100)
    }
}

/// The built-in sections a blank resume starts with.
pub fn default_sections() -> Vec<Section> {
    vec![
        Section::new("experience", "Work Experience", [""]),
        Section::new("education", "Education", [""]),
        Section::new("skills", "Skills", [""]),
        Section::new("projects", "Projects", [""]),
    ]
}

/// A saved resume as owned by one user.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Resume {
    pub id: String,
    pub title: String,
    pub last_modified: DateTime<Utc>,
    pub content: ResumeContent,
    #[serde(default)]
    pub progress: u8,
    #[serde(default = "default_resume_type")]
    pub resume_type: String,
    #[serde(default)]
    pub design_template: DesignTemplate,
}

fn default_resume_type() -> String {
    "Personal".to_string()
}

impl Resume {
    /// Creates a resume with a fresh UUID.
    pub fn new(content: ResumeContent, design_template: DesignTemplate) -> Self {
        Self::with_id(Uuid::new_v4().to_string(), content, design_template)
    }

    /// Creates a resume under a caller-supplied id.
    pub fn with_id(
        id: impl Into<String>,
        content: ResumeContent,
        design_template: DesignTemplate,
    ) -> Self {
        let mut resume = Self {
            id: id.into(),
            title: String::new(),
            last_modified: Utc::now(),
            content,
            progress: 0,
            resume_type: default_resume_type(),
            design_template,
        };
        resume.refresh_derived();
        resume
    }

    /// Title derived from the owner's name.
    pub fn derived_title(content: &ResumeContent) -> String {
        format!("{}'s Resume", content.form_data.full_name.trim())
    }

    /// Recomputes title and progress from the content.
    pub fn refresh_derived(&mut self) {
        self.title = Self::derived_title(&self.content);
        self.progress = self.content.progress();
    }

    /// Marks the resume as modified now and refreshes derived fields.
    pub fn touch(&mut self) {
        self.refresh_derived();
        self.last_modified = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn custom_sections_are_removable() {
        let mut content = ResumeContent::default();
        let id = content.add_custom_section();
        assert!(id.starts_with(CUSTOM_SECTION_PREFIX));
        assert_eq!(content.sections.len(), 5);
        assert_eq!(content.section(&id).map(|s| s.title.as_str()), Some(NEW_SECTION_TITLE));

        let removed = content.remove_section(&id).expect("custom section removable");
        assert_eq!(removed.id, id);
        assert_eq!(content.sections.len(), 4);
    }

    #[test]
    fn built_in_sections_are_not_removable() {
        let mut content = ResumeContent::default();
        for id in BUILT_IN_SECTION_IDS {
            assert_eq!(
                content.remove_section(id),
                Err(EditError::NotRemovable(id.to_string()))
            );
        }
        assert_eq!(
            content.remove_section("missing"),
            Err(EditError::UnknownSection("missing".to_string()))
        );
    }

    #[test]
    fn line_edits_preserve_order() {
        let mut content = ResumeContent::sample();
        let index = content.add_line("skills").expect("skills exists");
        content.update_line("skills", index, "Rust").expect("line exists");
        content.remove_line("skills", 0).expect("line exists");

        let skills = content.section("skills").expect("skills exists");
        assert_eq!(skills.content, ["React", "Node.js", "Python", "SQL", "Rust"]);
        assert!(matches!(
            content.update_line("skills", 99, "x"),
            Err(EditError::LineOutOfRange { index: 99, .. })
        ));
    }

    #[test]
    fn progress_counts_non_blank_fields() {
        let mut content = ResumeContent::default();
        assert_eq!(content.progress(), 0);

        content.form_data.full_name = "Jane Doe".into();
        content.form_data.email = "jane@x.com".into();
        // 2 of 8 fields (4 personal + 4 single-line sections).
        assert_eq!(content.progress(), 25);

        content.sections.clear();
        content.form_data.phone = "555".into();
        content.form_data.summary = "  ".into();
        assert_eq!(content.progress(), 75);
    }

    #[test]
    fn suggestion_replaces_line_with_its_rows() {
        let mut content = ResumeContent::sample();
        content
            .apply_suggestion(
                "experience.0",
                "Staff Engineer | Acme | 2021 - Present\n\u{2022} Led the platform team",
            )
            .expect("apply");
        assert_eq!(
            content.section("experience").expect("section").content,
            [
                "Staff Engineer | Acme | 2021 - Present",
                "\u{2022} Led the platform team",
                "\u{2022} Led team of 5 developers",
                "\u{2022} Implemented new features",
            ]
        );
    }

    #[test]
    fn suggestion_fills_personal_fields() {
        let mut content = ResumeContent::default();
        content.apply_suggestion("summary", "Builder.").expect("summary");
        content.apply_suggestion("fullName", "Jane Doe").expect("name");
        assert_eq!(content.form_data.summary, "Builder.");
        assert_eq!(content.form_data.full_name, "Jane Doe");
    }

    #[test]
    fn suggestion_can_append_to_a_section() {
        let mut content = ResumeContent::sample();
        content.apply_suggestion("projects.2", "Resume Builder").expect("append");
        assert_eq!(
            content.section("projects").expect("section").content.last().map(String::as_str),
            Some("Resume Builder")
        );
    }

    #[test]
    fn bad_suggestion_targets_are_rejected() {
        let mut content = ResumeContent::sample();
        assert_eq!(
            content.apply_suggestion("skills.9", "x"),
            Err(EditError::LineOutOfRange {
                id: "skills".into(),
                index: 9
            })
        );
        assert_eq!(
            content.apply_suggestion("awards.0", "x"),
            Err(EditError::UnknownSection("awards".into()))
        );
        assert_eq!(
            content.apply_suggestion("headline", "x"),
            Err(EditError::UnknownField("headline".into()))
        );
        assert_eq!(
            content.apply_suggestion("skills.first", "x"),
            Err(EditError::UnknownField("skills.first".into()))
        );
        assert!(!content.has_field("skills.9"));
        assert!(content.has_field("skills.5"));
    }

    #[test]
    fn contact_line_skips_empty_parts() {
        let mut info = PersonalInfo {
            email: "jane@x.com".into(),
            phone: "555-0000".into(),
            ..PersonalInfo::default()
        };
        assert_eq!(info.contact_line(), "jane@x.com \u{2022} 555-0000");
        info.phone.clear();
        assert_eq!(info.contact_line(), "jane@x.com");
    }

    #[test]
    fn resume_title_and_progress_are_derived() {
        let resume = Resume::with_id("r-1", ResumeContent::sample(), DesignTemplate::Modern);
        assert_eq!(resume.title, "John Doe's Resume");
        assert_eq!(resume.progress, 100);
        assert_eq!(resume.resume_type, "Personal");
    }

    #[test]
    fn record_uses_persisted_field_names() {
        let mut content = ResumeContent::sample();
        content.uploaded_image = Some(ImageSource::from_bytes([1u8, 2, 3], "image/png"));
        let resume = Resume::with_id("r-1", content, DesignTemplate::CreativeVertical);

        let value = serde_json::to_value(&resume).expect("serialize");
        assert_eq!(value["designTemplate"], "creative-vertical");
        assert!(value["lastModified"].is_string());
        assert_eq!(value["content"]["formData"]["fullName"], "John Doe");
        assert_eq!(value["content"]["styleOptions"]["fontSize"], "16px");
        assert_eq!(value["content"]["uploadedImage"], "data:image/png;base64,AQID");

        let back: Resume = serde_json::from_value(value).expect("deserialize");
        assert_eq!(back, resume);
    }

    #[test]
    fn image_source_string_form() {
        assert_eq!(
            ImageSource::from("photo.jpg".to_string()),
            ImageSource::Path(PathBuf::from("photo.jpg"))
        );
        assert!(matches!(
            ImageSource::from("data:image/png;base64,AA==".to_string()),
            ImageSource::DataUri(_)
        ));
    }
}
