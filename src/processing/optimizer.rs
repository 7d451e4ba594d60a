//! Optimization suggestions derived from a scored match

use crate::processing::analyzer::MatchAnalysis;
use crate::processing::normalizer::TextNormalizer;
use crate::processing::scorer::ScoreResult;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use strsim::jaro_winkler;

pub const MAX_MISSING_KEYWORDS: usize = 10;
pub const MAX_MISSING_SKILLS: usize = 5;
pub const MAX_PRIORITY_IMPROVEMENTS: usize = 3;
pub const POTENTIAL_GAIN: f64 = 15.0;

pub const FORMATTING_TIPS: &[&str] = &[
    "Use standard section headers (Experience, Education, Skills)",
    "Keep consistent formatting throughout",
    "Use bullet points for easy scanning",
    "Include contact information at the top",
    "Save as PDF to preserve formatting",
];

/// A missing skill the resume appears to spell differently.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NearMiss {
    pub skill: String,
    pub resume_term: String,
    pub similarity: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptimizationSuggestions {
    pub current_score: f64,
    pub potential_score: f64,
    pub missing_keywords: Vec<String>,
    pub missing_skills: Vec<String>,
    pub near_misses: Vec<NearMiss>,
    pub priority_improvements: Vec<String>,
    pub formatting_tips: Vec<String>,
}

impl OptimizationSuggestions {
    pub fn for_empty_resume() -> Self {
        Self {
            current_score: 0.0,
            potential_score: 0.0,
            missing_keywords: Vec::new(),
            missing_skills: Vec::new(),
            near_misses: Vec::new(),
            priority_improvements: Vec::new(),
            formatting_tips: FORMATTING_TIPS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Optimizer {
    similarity_threshold: f64,
}

impl Default for Optimizer {
    fn default() -> Self {
        Self { similarity_threshold: 0.9 }
    }
}

impl Optimizer {
    pub fn with_threshold(similarity_threshold: f64) -> Self {
        Self { similarity_threshold }
    }

    pub fn suggest(
        &self,
        normalizer: &TextNormalizer,
        analysis: &MatchAnalysis,
        result: &ScoreResult,
        resume: &str,
    ) -> OptimizationSuggestions {
        let missing_technical: Vec<String> = analysis
            .job_skills
            .technical
            .difference(&analysis.resume_skills.technical)
            .cloned()
            .collect();
        let missing_soft: Vec<String> = analysis
            .job_skills
            .soft
            .difference(&analysis.resume_skills.soft)
            .cloned()
            .collect();

        let resume_tokens: BTreeSet<String> = normalizer.tokenize(resume).into_iter().collect();
        let near_misses = missing_technical
            .iter()
            .chain(missing_soft.iter())
            .filter_map(|skill| self.closest_spelling(skill, &resume_tokens))
            .collect();

        OptimizationSuggestions {
            current_score: result.total_score,
            potential_score: (result.total_score + POTENTIAL_GAIN).min(100.0),
            missing_keywords: analysis.missing_terms.iter().take(MAX_MISSING_KEYWORDS).cloned().collect(),
            missing_skills: missing_technical.iter().take(MAX_MISSING_SKILLS).cloned().collect(),
            near_misses,
            priority_improvements: self.priority_improvements(analysis, !missing_technical.is_empty()),
            formatting_tips: FORMATTING_TIPS.iter().map(|s| s.to_string()).collect(),
        }
    }

    fn closest_spelling(&self, skill: &str, resume_tokens: &BTreeSet<String>) -> Option<NearMiss> {
        resume_tokens
            .iter()
            .map(|token| (token, jaro_winkler(skill, token)))
            .filter(|(token, similarity)| *similarity >= self.similarity_threshold && token.as_str() != skill)
            .max_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(token, similarity)| NearMiss {
                skill: skill.to_string(),
                resume_term: token.clone(),
                similarity,
            })
    }

    fn priority_improvements(&self, analysis: &MatchAnalysis, skills_missing: bool) -> Vec<String> {
        let scores = &analysis.component_scores;
        let candidates = [
            (
                analysis.content.quantified_achievements < 3,
                "Add more quantifiable achievements with numbers and percentages",
            ),
            (
                !analysis.missing_terms.is_empty(),
                "Include industry-specific keywords from the job description",
            ),
            (
                analysis.content.power_verb_count() < 5,
                "Use more action verbs to start bullet points",
            ),
            (
                !analysis.format.has_bullets || scores.completeness < 100.0,
                "Ensure proper formatting with clear sections and bullet points",
            ),
            (skills_missing, "Match technical skills mentioned in job requirements"),
        ];

        candidates
            .iter()
            .filter(|(applies, _)| *applies)
            .map(|(_, text)| text.to_string())
            .take(MAX_PRIORITY_IMPROVEMENTS)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processing::analyzer::AtsEngine;

    #[test]
    fn test_missing_skills_and_near_misses() {
        let engine = AtsEngine::new().unwrap();
        let resume = "Experienced with Postgres and Kubernete clusters";
        let job = "PostgreSQL and Kubernetes required";

        let suggestions = engine.optimize(resume, job);

        assert!(suggestions.missing_skills.contains(&"postgresql".to_string()));
        assert!(suggestions.missing_skills.contains(&"kubernetes".to_string()));
        let misspelled: Vec<(&str, &str)> = suggestions
            .near_misses
            .iter()
            .map(|m| (m.skill.as_str(), m.resume_term.as_str()))
            .collect();
        assert!(misspelled.contains(&("kubernetes", "kubernete")));
        assert!(misspelled.contains(&("postgresql", "postgres")));
    }

    #[test]
    fn test_potential_score_is_capped() {
        let engine = AtsEngine::new().unwrap();
        let job = "Python developer";
        let suggestions = engine.optimize("Python developer", job);

        assert!(suggestions.potential_score <= 100.0);
        assert!(suggestions.potential_score >= suggestions.current_score);
        assert!(suggestions.potential_score - suggestions.current_score <= POTENTIAL_GAIN);
        assert!(suggestions.missing_keywords.len() <= MAX_MISSING_KEYWORDS);
        assert!(suggestions.priority_improvements.len() <= MAX_PRIORITY_IMPROVEMENTS);
    }

    #[test]
    fn test_empty_resume() {
        let engine = AtsEngine::new().unwrap();
        let suggestions = engine.optimize("", "Python developer");

        assert_eq!(suggestions.current_score, 0.0);
        assert_eq!(suggestions.potential_score, 0.0);
        assert_eq!(suggestions.formatting_tips.len(), FORMATTING_TIPS.len());
    }

    #[test]
    fn test_threshold_controls_near_misses() {
        let optimizer = Optimizer::with_threshold(0.99);
        let tokens: BTreeSet<String> = ["kubernete".to_string()].into_iter().collect();

        assert!(optimizer.closest_spelling("kubernetes", &tokens).is_none());
        assert!(Optimizer::default().closest_spelling("kubernetes", &tokens).is_some());
    }
}
