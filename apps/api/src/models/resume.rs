use serde::{Deserialize, Serialize};

use crate::collection::Record;
use crate::extraction::SkillExtractor;
use crate::models::skills::SkillSet;

pub const DEFAULT_YEARS_EXPERIENCE: u32 = 2;

/// A candidate resume with its extracted skills.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Resume {
    id: u32,
    name: String,
    email: String,
    summary: String,
    years_experience: u32,
    skills: SkillSet,
}

impl Resume {
    pub fn new(
        id: u32,
        name: impl Into<String>,
        email: impl Into<String>,
        summary: impl Into<String>,
        years_experience: u32,
        skill_cap: usize,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            email: email.into(),
            summary: summary.into(),
            years_experience,
            skills: SkillSet::with_cap(skill_cap),
        }
    }

    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn summary(&self) -> &str {
        &self.summary
    }

    pub fn years_experience(&self) -> u32 {
        self.years_experience
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

    /// Fills the skill set from the summary text, up to the cap.
    pub fn extract_skills(&mut self, extractor: &SkillExtractor) -> usize {
        extractor.extract_into(&self.summary, &mut self.skills)
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn set_email(&mut self, email: impl Into<String>) {
        self.email = email.into();
    }

    pub fn set_summary(&mut self, summary: impl Into<String>) {
        self.summary = summary.into();
    }

    pub fn set_years_experience(&mut self, years: u32) {
        self.years_experience = years;
    }

    pub fn apply(&mut self, update: ResumeUpdate) {
        if let Some(name) = update.name {
            self.set_name(name);
        }
        if let Some(email) = update.email {
            self.set_email(email);
        }
        if let Some(summary) = update.summary {
            self.set_summary(summary);
        }
        if let Some(years) = update.years_experience {
            self.set_years_experience(years);
        }
    }
}

impl Record for Resume {
    fn id(&self) -> u32 {
        self.id
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct NewResume {
    pub name: Option<String>,
    pub email: Option<String>,
    pub summary: String,
    pub years_experience: Option<u32>,
    /// Explicit skill tags. When present, the summary is not extracted.
    #[serde(default)]
    pub skills: Option<Vec<String>>,
}

impl NewResume {
    pub fn from_summary(summary: impl Into<String>) -> Self {
        Self {
            summary: summary.into(),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ResumeUpdate {
    pub name: Option<String>,
    pub email: Option<String>,
    pub summary: Option<String>,
    pub years_experience: Option<u32>,
}

pub fn placeholder_name(id: u32) -> String {
    format!("Candidate_{id}")
}

pub fn placeholder_email(id: u32) -> String {
    format!("candidate{id}@email.com")
}
