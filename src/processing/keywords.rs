//! Keyword and skill extraction
//!
//! Two extraction styles feed the keyword metric:
//!
//! * [`KeywordMode::Vocabulary`]: every filtered token of the job description
//!   plus every technical or soft skill from the fixed vocabulary that appears
//!   in it.
//! * [`KeywordMode::RequiredTerms`]: only words taken from sentences that
//!   contain a requirement indicator such as "required" or "experience with".

use crate::error::Result;
use crate::processing::normalizer::TextNormalizer;
use crate::processing::vocabulary::{TermMatcher, REQUIREMENT_INDICATORS, SOFT_SKILLS, TECHNICAL_SKILLS};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Lower-cased terms; set semantics, sorted iteration.
pub type KeywordSet = BTreeSet<String>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeywordMode {
    Vocabulary,
    RequiredTerms,
}

impl std::fmt::Display for KeywordMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            KeywordMode::Vocabulary => write!(f, "vocabulary"),
            KeywordMode::RequiredTerms => write!(f, "required_terms"),
        }
    }
}

/// Skills found in a text, split by vocabulary category.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SkillProfile {
    pub technical: KeywordSet,
    pub soft: KeywordSet,
}

impl SkillProfile {
    pub fn all(&self) -> KeywordSet {
        self.technical.union(&self.soft).cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.technical.len() + self.soft.len()
    }

    pub fn is_empty(&self) -> bool {
        self.technical.is_empty() && self.soft.is_empty()
    }
}

pub struct KeywordExtractor {
    technical: TermMatcher,
    soft: TermMatcher,
    indicators: &'static [&'static str],
    required_word_regex: Regex,
}

impl KeywordExtractor {
    pub fn new() -> Result<Self> {
        Ok(Self {
            technical: TermMatcher::new(TECHNICAL_SKILLS)?,
            soft: TermMatcher::new(SOFT_SKILLS)?,
            indicators: REQUIREMENT_INDICATORS,
            required_word_regex: Regex::new(r"[A-Za-z+#]+")?,
        })
    }

    /// Filtered tokens of `text` united with the vocabulary skills it mentions.
    pub fn extract_terms(&self, normalizer: &TextNormalizer, text: &str) -> KeywordSet {
        let mut terms: KeywordSet = normalizer.tokenize(text).into_iter().collect();
        terms.extend(self.extract_skills(text).all());
        terms
    }

    /// Vocabulary skills present in `text`.
    pub fn extract_skills(&self, text: &str) -> SkillProfile {
        SkillProfile {
            technical: self.technical.find_terms(text).into_iter().map(str::to_string).collect(),
            soft: self.soft.find_terms(text).into_iter().map(str::to_string).collect(),
        }
    }

    /// Words from job-description sentences that state a requirement.
    pub fn extract_required_terms(&self, normalizer: &TextNormalizer, job_description: &str) -> KeywordSet {
        let lowered = normalizer.normalize(job_description);
        let mut terms = KeywordSet::new();

        for sentence in normalizer.split_sentences(&lowered) {
            if !self.indicators.iter().any(|indicator| sentence.contains(indicator)) {
                continue;
            }
            terms.extend(
                self.required_word_regex
                    .find_iter(sentence)
                    .map(|m| m.as_str())
                    .filter(|word| word.len() > 2)
                    .map(str::to_string),
            );
        }

        terms
    }

    /// Key terms of a job description under the given extraction mode.
    pub fn key_terms(&self, normalizer: &TextNormalizer, job_description: &str, mode: KeywordMode) -> KeywordSet {
        match mode {
            KeywordMode::Vocabulary => self.extract_terms(normalizer, job_description),
            KeywordMode::RequiredTerms => self.extract_required_terms(normalizer, job_description),
        }
    }
}

/// Split `terms` into those present as substrings of `haystack` and those
/// missing from it. `haystack` is expected to be lower-cased already.
pub fn partition_by_presence(terms: &KeywordSet, haystack: &str) -> (KeywordSet, KeywordSet) {
    terms
        .iter()
        .cloned()
        .partition(|term| haystack.contains(term.as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixtures() -> (KeywordExtractor, TextNormalizer) {
        (KeywordExtractor::new().unwrap(), TextNormalizer::new().unwrap())
    }

    #[test]
    fn test_vocabulary_terms_include_tokens_and_skills() {
        let (extractor, normalizer) = fixtures();
        let terms = extractor.extract_terms(&normalizer, "Need 5+ years Python experience with Django and PostgreSQL");

        for expected in ["need", "years", "python", "experience", "django", "postgresql"] {
            assert!(terms.contains(expected), "missing {expected}");
        }
        assert!(!terms.contains("with"));
        assert!(!terms.contains("and"));
    }

    #[test]
    fn test_multi_word_skills_survive_tokenization() {
        let (extractor, normalizer) = fixtures();
        let terms = extractor.extract_terms(&normalizer, "Machine learning and project management");

        assert!(terms.contains("machine learning"));
        assert!(terms.contains("project management"));
        assert!(terms.contains("machine"));
    }

    #[test]
    fn test_skill_categories() {
        let (extractor, _) = fixtures();
        let skills = extractor.extract_skills("Strong communication skills, Docker and Kubernetes");

        assert!(skills.technical.contains("docker"));
        assert!(skills.technical.contains("kubernetes"));
        assert!(skills.soft.contains("communication"));
        assert_eq!(skills.len(), 3);
    }

    #[test]
    fn test_required_terms_only_use_indicator_sentences() {
        let (extractor, normalizer) = fixtures();
        let job = "We are a fast growing startup. Experience with Rust and Tokio. • Knowledge of Kafka • Free snacks";
        let terms = extractor.extract_required_terms(&normalizer, job);

        assert!(terms.contains("rust"));
        assert!(terms.contains("tokio"));
        assert!(terms.contains("kafka"));
        assert!(!terms.contains("startup"));
        assert!(!terms.contains("snacks"));
    }

    #[test]
    fn test_modes_differ_on_the_same_description() {
        let (extractor, normalizer) = fixtures();
        let job = "Our office is downtown. Proficiency in Python required.";

        let vocabulary = extractor.key_terms(&normalizer, job, KeywordMode::Vocabulary);
        let required = extractor.key_terms(&normalizer, job, KeywordMode::RequiredTerms);

        assert!(vocabulary.contains("downtown"));
        assert!(!required.contains("downtown"));
        assert!(required.contains("python"));
    }

    #[test]
    fn test_partition_by_presence() {
        let terms: KeywordSet = ["python", "rust"].iter().map(|s| s.to_string()).collect();
        let (found, missing) = partition_by_presence(&terms, "senior python developer");

        assert!(found.contains("python"));
        assert!(missing.contains("rust"));
    }
}
