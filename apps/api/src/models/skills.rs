use serde::{Serialize, Serializer};

/// Canonical skill tags attached to a job or resume.
///
/// Tags keep insertion order and never repeat. Once `cap` tags are held,
/// further tags are dropped rather than rejected with an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkillSet {
    tags: Vec<String>,
    cap: usize,
}

impl SkillSet {
    pub fn with_cap(cap: usize) -> Self {
        Self {
            tags: Vec::with_capacity(cap.min(32)),
            cap,
        }
    }

    /// Adds a tag. Returns `false` if the tag is already present or the set is full.
    pub fn add(&mut self, tag: impl Into<String>) -> bool {
        let tag = tag.into();
        if self.is_full() || self.contains(&tag) {
            return false;
        }
        self.tags.push(tag);
        true
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    /// Number of tags in `self` that are also present in `other`.
    pub fn overlap(&self, other: &SkillSet) -> usize {
        self.tags.iter().filter(|t| other.contains(t)).count()
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.tags.len() >= self.cap
    }

    pub fn cap(&self) -> usize {
        self.cap
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.tags.iter().map(String::as_str)
    }

    /// Adds explicit tags in order, trimmed and lowercased. Blank tags are
    /// skipped. Returns how many were added.
    pub fn add_tags<I, S>(&mut self, tags: I) -> usize
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut added = 0;
        for tag in tags {
            let tag = tag.as_ref().trim().to_lowercase();
            if !tag.is_empty() && self.add(tag) {
                added += 1;
            }
        }
        added
    }
}

// Serialized as a plain list of tags; the cap is a loader setting, not data.
impl Serialize for SkillSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.tags.serialize(serializer)
    }
}
