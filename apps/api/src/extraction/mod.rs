//! Skill extraction: maps free text to canonical skill tags.
//!
//! Matching is plain case-insensitive substring containment against a fixed
//! dictionary. Every entry is checked on its own, so overlapping tags such as
//! "java" and "javascript" can both be emitted for the same text.

pub mod dictionary;
pub mod extractor;

pub use extractor::SkillExtractor;
