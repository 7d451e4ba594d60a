//! Structured requirements of a job description

use crate::processing::experience::{EducationLevel, ExperienceAnalyzer};
use crate::processing::keywords::{KeywordExtractor, KeywordSet, SkillProfile};
use crate::processing::normalizer::TextNormalizer;
use serde::{Deserialize, Serialize};

pub const TOP_TERM_LIMIT: usize = 10;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JobRequirements {
    pub required_years: u32,
    pub education_level: Option<EducationLevel>,
    pub key_skills: SkillProfile,
    pub required_terms: KeywordSet,
    pub top_terms: Vec<String>,
}

/// Borrowed view over the engine's extractors.
pub struct JobAnalyzer<'a> {
    normalizer: &'a TextNormalizer,
    keywords: &'a KeywordExtractor,
    experience: &'a ExperienceAnalyzer,
}

impl<'a> JobAnalyzer<'a> {
    pub fn new(
        normalizer: &'a TextNormalizer,
        keywords: &'a KeywordExtractor,
        experience: &'a ExperienceAnalyzer,
    ) -> Self {
        Self { normalizer, keywords, experience }
    }

    pub fn analyze(&self, job_description: &str) -> JobRequirements {
        JobRequirements {
            required_years: self.experience.extract_years(job_description),
            education_level: self.experience.highest_education(job_description),
            key_skills: self.keywords.extract_skills(job_description),
            required_terms: self.keywords.extract_required_terms(self.normalizer, job_description),
            top_terms: self.normalizer.top_terms(job_description, TOP_TERM_LIMIT),
        }
    }
}
