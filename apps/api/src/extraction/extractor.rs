use crate::extraction::dictionary::DEFAULT_SKILLS;
use crate::models::SkillSet;

/// Case-insensitive substring extractor over an ordered skill dictionary.
#[derive(Debug, Clone)]
pub struct SkillExtractor {
    dictionary: Vec<String>,
}

impl SkillExtractor {
    /// Builds an extractor from dictionary entries.
    ///
    /// Entries are trimmed and lowercased; blanks and repeats are dropped while
    /// keeping the first-seen order.
    pub fn new<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut dictionary: Vec<String> = Vec::new();
        for entry in entries {
            let tag = entry.as_ref().trim().to_lowercase();
            if !tag.is_empty() && !dictionary.contains(&tag) {
                dictionary.push(tag);
            }
        }
        Self { dictionary }
    }

    pub fn dictionary(&self) -> &[String] {
        &self.dictionary
    }

    /// Returns every dictionary tag contained in `text`, in dictionary order.
    pub fn extract(&self, text: &str) -> Vec<&str> {
        let haystack = text.to_lowercase();
        self.dictionary
            .iter()
            .filter(|tag| haystack.contains(tag.as_str()))
            .map(String::as_str)
            .collect()
    }

    /// Extracts tags from `text` into `skills`, stopping silently at the cap.
    /// Returns the number of tags actually added.
    pub fn extract_into(&self, text: &str, skills: &mut SkillSet) -> usize {
        self.extract(text)
            .into_iter()
            .filter(|tag| skills.add(*tag))
            .count()
    }
}

impl Default for SkillExtractor {
    fn default() -> Self {
        Self::new(DEFAULT_SKILLS.iter())
    }
}
