pub mod job;
pub mod matches;
pub mod resume;
pub mod skills;

pub use job::{Job, JobUpdate, NewJob};
pub use matches::Match;
pub use resume::{NewResume, Resume, ResumeUpdate};
pub use skills::SkillSet;
