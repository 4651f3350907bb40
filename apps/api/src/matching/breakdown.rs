use serde::Serialize;

use crate::matching::engine::{
    experience_score, meets_experience_requirement, skill_score, MatchScorer,
};
use crate::models::{Job, Resume};

/// Coarse verdict derived from the overall score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Recommendation {
    Excellent,
    Good,
    Moderate,
    Low,
}

impl Recommendation {
    pub fn from_score(score: f64) -> Self {
        if score >= 80.0 {
            Recommendation::Excellent
        } else if score >= 60.0 {
            Recommendation::Good
        } else if score >= 40.0 {
            Recommendation::Moderate
        } else {
            Recommendation::Low
        }
    }

    pub fn describe(self) -> &'static str {
        match self {
            Recommendation::Excellent => "Excellent match, highly recommended",
            Recommendation::Good => "Good match, recommended",
            Recommendation::Moderate => "Moderate match, consider with caution",
            Recommendation::Low => "Low match, not recommended",
        }
    }
}

/// Detailed analysis of a single pair.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchBreakdown {
    pub job_id: u32,
    pub job_title: String,
    pub resume_id: u32,
    pub resume_name: String,
    /// Shared tags, in the job's skill order.
    pub matched_skills: Vec<String>,
    pub job_skill_count: usize,
    pub resume_skill_count: usize,
    pub skill_match_rate: f64,
    pub experience_required: u32,
    pub years_experience: u32,
    pub experience_score: f64,
    pub meets_experience: bool,
    pub overall_score: f64,
    pub recommendation: Recommendation,
    pub summary: &'static str,
}

impl MatchBreakdown {
    pub fn analyze(scorer: &dyn MatchScorer, job: &Job, resume: &Resume) -> Self {
        let matched_skills: Vec<String> = job
            .skills()
            .iter()
            .filter(|tag| resume.has_skill(tag))
            .map(str::to_string)
            .collect();
        let overall_score = scorer.score(job, resume).score;
        let recommendation = Recommendation::from_score(overall_score);

        Self {
            job_id: job.id(),
            job_title: job.title().to_string(),
            resume_id: resume.id(),
            resume_name: resume.name().to_string(),
            matched_skills,
            job_skill_count: job.skills().len(),
            resume_skill_count: resume.skills().len(),
            skill_match_rate: skill_score(job, resume),
            experience_required: job.experience_required(),
            years_experience: resume.years_experience(),
            experience_score: experience_score(job.experience_required(), resume.years_experience()),
            meets_experience: meets_experience_requirement(job, resume),
            overall_score,
            recommendation,
            summary: recommendation.describe(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matching::engine::WeightedScorer;

    #[test]
    fn test_recommendation_tiers() {
        assert_eq!(Recommendation::from_score(95.0), Recommendation::Excellent);
        assert_eq!(Recommendation::from_score(80.0), Recommendation::Excellent);
        assert_eq!(Recommendation::from_score(79.99), Recommendation::Good);
        assert_eq!(Recommendation::from_score(60.0), Recommendation::Good);
        assert_eq!(Recommendation::from_score(40.0), Recommendation::Moderate);
        assert_eq!(Recommendation::from_score(39.9), Recommendation::Low);
        assert_eq!(Recommendation::from_score(0.0), Recommendation::Low);
    }

    #[test]
    fn test_breakdown_of_reference_pair() {
        let mut job = Job::new(1, "Data Analyst", "Acme", "", 3, 10);
        job.add_skill("sql");
        job.add_skill("python");
        let mut resume = Resume::new(101, "Ada", "ada@example.com", "", 2, 20);
        resume.add_skill("python");
        resume.add_skill("excel");

        let b = MatchBreakdown::analyze(&WeightedScorer::default(), &job, &resume);
        assert_eq!(b.matched_skills, vec!["python".to_string()]);
        assert_eq!(b.job_skill_count, 2);
        assert_eq!(b.resume_skill_count, 2);
        assert!((b.skill_match_rate - 50.0).abs() < 1e-9);
        assert!(!b.meets_experience);
        assert!((b.overall_score - 56.666_666).abs() < 1e-3);
        assert_eq!(b.recommendation, Recommendation::Moderate);
    }

    #[test]
    fn test_breakdown_serializes_tier_in_snake_case() {
        // No skills on either side and a 5 year shortfall: 0 × 0.6 + 0 × 0.4
        let job = Job::new(1, "Dev", "Acme", "", 5, 10);
        let resume = Resume::new(2, "Bo", "bo@example.com", "", 0, 20);
        let b = MatchBreakdown::analyze(&WeightedScorer::default(), &job, &resume);
        let json = serde_json::to_value(&b).unwrap();
        assert_eq!(json["recommendation"], "low");
        assert!(b.matched_skills.is_empty());
    }
}
