use serde::{Deserialize, Serialize};

use crate::collection::Record;
use crate::extraction::SkillExtractor;
use crate::models::skills::SkillSet;

pub const DEFAULT_JOB_TITLE: &str = "Position";
pub const DEFAULT_COMPANY: &str = "Tech Company";
pub const DEFAULT_EXPERIENCE_REQUIRED: u32 = 3;

/// A job posting with its extracted skill requirements.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Job {
    id: u32,
    title: String,
    company: String,
    description: String,
    experience_required: u32,
    skills: SkillSet,
}

impl Job {
    pub fn new(
        id: u32,
        title: impl Into<String>,
        company: impl Into<String>,
        description: impl Into<String>,
        experience_required: u32,
        skill_cap: usize,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            company: company.into(),
            description: description.into(),
            experience_required,
            skills: SkillSet::with_cap(skill_cap),
        }
    }

    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn company(&self) -> &str {
        &self.company
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn experience_required(&self) -> u32 {
        self.experience_required
    }

    pub fn skills(&self) -> &SkillSet {
        &self.skills
    }

    pub fn add_skill(&mut self, tag: impl Into<String>) -> bool {
        self.skills.add(tag)
    }

    pub fn has_skill(&self, tag: &str) -> bool {
        self.skills.contains(tag)
    }

    /// Adds an explicit tag list, normalized to lowercase, up to the cap.
    pub fn add_skills<I, S>(&mut self, tags: I) -> usize
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.skills.add_tags(tags)
    }

    /// Fills the skill set from the description text, up to the cap.
    pub fn extract_skills(&mut self, extractor: &SkillExtractor) -> usize {
        extractor.extract_into(&self.description, &mut self.skills)
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    pub fn set_company(&mut self, company: impl Into<String>) {
        self.company = company.into();
    }

    /// Replaces the description text. Extracted skills are left untouched.
    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description = description.into();
    }

    pub fn set_experience_required(&mut self, years: u32) {
        self.experience_required = years;
    }

    /// Applies every field present in `update`.
    pub fn apply(&mut self, update: JobUpdate) {
        if let Some(title) = update.title {
            self.set_title(title);
        }
        if let Some(company) = update.company {
            self.set_company(company);
        }
        if let Some(description) = update.description {
            self.set_description(description);
        }
        if let Some(years) = update.experience_required {
            self.set_experience_required(years);
        }
    }
}

impl Record for Job {
    fn id(&self) -> u32 {
        self.id
    }
}

/// Raw job record handed in by an input source, before id assignment and
/// skill extraction. Missing fields fall back to loader defaults.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct NewJob {
    pub title: Option<String>,
    pub company: Option<String>,
    pub description: String,
    pub experience_required: Option<u32>,
    /// Explicit skill tags. When present, the description is not extracted.
    #[serde(default)]
    pub skills: Option<Vec<String>>,
}

impl NewJob {
    pub fn from_description(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            ..Default::default()
        }
    }
}

/// Partial edit of a stored job.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct JobUpdate {
    pub title: Option<String>,
    pub company: Option<String>,
    pub description: Option<String>,
    pub experience_required: Option<u32>,
}

/// Derives a title from free-text postings such as "Data Analyst needed ...".
///
/// Takes the text before " needed", else before " required", when the marker
/// starts after the first character and within the first 100 bytes.
pub fn infer_title(description: &str) -> String {
    [" needed", " required"]
        .iter()
        .filter_map(|marker| description.find(marker))
        .find(|&pos| pos > 0 && pos < 100)
        .map(|pos| description[..pos].to_string())
        .unwrap_or_else(|| DEFAULT_JOB_TITLE.to_string())
}
