//! Writing-quality signals: action verbs, quantified achievements, passive phrasing

use crate::error::Result;
use crate::processing::normalizer::TextNormalizer;
use crate::processing::vocabulary::{TermMatcher, PASSIVE_PHRASES, POWER_VERBS};
use regex::Regex;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContentInsights {
    pub power_verbs: Vec<String>,
    pub quantified_achievements: usize,
    pub passive_phrases: Vec<String>,
    pub average_sentence_length: f64,
}

impl ContentInsights {
    pub fn power_verb_count(&self) -> usize {
        self.power_verbs.len()
    }

    pub fn uses_passive_phrasing(&self) -> bool {
        !self.passive_phrases.is_empty()
    }
}

pub struct ContentAnalyzer {
    power_verbs: TermMatcher,
    passive_phrases: TermMatcher,
    metric_regex: Regex,
}

impl ContentAnalyzer {
    pub fn new() -> Result<Self> {
        Ok(Self {
            power_verbs: TermMatcher::new(POWER_VERBS)?,
            passive_phrases: TermMatcher::new(PASSIVE_PHRASES)?,
            // "40%", "$2 million", "3k users", "12 percent"
            metric_regex: Regex::new(r"(?i)\$?\b\d+(?:[.,]\d+)?(?:\s*%|\s*(?:percent|million|thousand|billion|k|m)\b)")?,
        })
    }

    pub fn analyze(&self, normalizer: &TextNormalizer, resume: &str) -> ContentInsights {
        let sentences = normalizer.prose_sentences(resume);
        let average_sentence_length = if sentences.is_empty() {
            0.0
        } else {
            let words: usize = sentences.iter().map(|s| normalizer.word_count(s)).sum();
            words as f64 / sentences.len() as f64
        };

        ContentInsights {
            power_verbs: self.power_verbs.find_terms(resume).into_iter().map(str::to_string).collect(),
            quantified_achievements: self.metric_regex.find_iter(resume).count(),
            passive_phrases: self.passive_phrases.find_terms(resume).into_iter().map(str::to_string).collect(),
            average_sentence_length,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_power_verbs_and_metrics() {
        let analyzer = ContentAnalyzer::new().unwrap();
        let normalizer = TextNormalizer::new().unwrap();
        let resume = "• Led a team of 5 engineers\n• Reduced costs by 30%\n• Increased revenue by $2 million\n• Improved latency 40 percent";

        let insights = analyzer.analyze(&normalizer, resume);

        assert_eq!(insights.power_verb_count(), 4);
        assert_eq!(insights.quantified_achievements, 3);
        assert!(!insights.uses_passive_phrasing());
    }

    #[test]
    fn test_passive_phrasing() {
        let analyzer = ContentAnalyzer::new().unwrap();
        let normalizer = TextNormalizer::new().unwrap();

        let insights = analyzer.analyze(&normalizer, "Responsible for the build pipeline.");

        assert!(insights.uses_passive_phrasing());
        assert_eq!(insights.passive_phrases, vec!["responsible for".to_string()]);
    }

    #[test]
    fn test_verbs_inside_longer_words_do_not_count() {
        let analyzer = ContentAnalyzer::new().unwrap();
        let normalizer = TextNormalizer::new().unwrap();

        let insights = analyzer.analyze(&normalizer, "Ledger reconciliation");

        assert_eq!(insights.power_verb_count(), 0);
    }

    #[test]
    fn test_empty_resume() {
        let analyzer = ContentAnalyzer::new().unwrap();
        let normalizer = TextNormalizer::new().unwrap();

        let insights = analyzer.analyze(&normalizer, "");

        assert_eq!(insights, ContentInsights::default());
    }
}
