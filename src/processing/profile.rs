//! Scoring profiles: every weight, band and mode the scorer uses
//!
//! Two profiles ship with the crate. `detailed` is the default; `compact`
//! reproduces the lighter scheme (shorter word band, skills-heavy experience
//! blend, requirement-sentence keywords, whole-number totals).

use crate::error::{AtsError, Result};
use crate::processing::keywords::KeywordMode;
use serde::{Deserialize, Serialize};

const WEIGHT_TOLERANCE: f64 = 1e-6;

/// Weights of the four component metrics in the composite score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ComponentWeights {
    pub keyword_match: f64,
    pub completeness: f64,
    pub format: f64,
    pub experience_match: f64,
}

impl ComponentWeights {
    pub fn sum(&self) -> f64 {
        self.keyword_match + self.completeness + self.format + self.experience_match
    }

    pub fn validate(&self) -> Result<()> {
        let weights = [self.keyword_match, self.completeness, self.format, self.experience_match];
        if weights.iter().any(|w| !w.is_finite() || *w < 0.0) {
            return Err(AtsError::Configuration(
                "component weights must be finite and non-negative".to_string(),
            ));
        }
        if (self.sum() - 1.0).abs() > WEIGHT_TOLERANCE {
            return Err(AtsError::Configuration(format!(
                "component weights must sum to 1.0, got {:.4}",
                self.sum()
            )));
        }
        Ok(())
    }
}

/// Word-count range that earns full length credit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordBand {
    pub min_words: usize,
    pub max_words: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LengthVerdict {
    TooShort,
    InRange,
    TooLong,
}

impl WordBand {
    pub fn classify(&self, words: usize) -> LengthVerdict {
        if words < self.min_words {
            LengthVerdict::TooShort
        } else if words > self.max_words {
            LengthVerdict::TooLong
        } else {
            LengthVerdict::InRange
        }
    }
}

/// Split of the experience component between stated years and skill overlap.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExperienceBlend {
    pub years: f64,
    pub skills: f64,
}

/// Points awarded by the format component; the total is capped at 100.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FormatPoints {
    pub length_in_range: f64,
    pub length_too_short: f64,
    pub length_too_long: f64,
    pub bullets: f64,
    pub email: f64,
    pub phone: f64,
    pub dated_history: f64,
}

impl FormatPoints {
    pub const STANDARD: FormatPoints = FormatPoints {
        length_in_range: 40.0,
        length_too_short: 15.0,
        length_too_long: 25.0,
        bullets: 20.0,
        email: 15.0,
        phone: 10.0,
        dated_history: 15.0,
    };

    pub fn for_length(&self, verdict: LengthVerdict) -> f64 {
        match verdict {
            LengthVerdict::InRange => self.length_in_range,
            LengthVerdict::TooShort => self.length_too_short,
            LengthVerdict::TooLong => self.length_too_long,
        }
    }
}

/// Feedback thresholds: a component below its threshold produces a message.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeedbackThresholds {
    pub keyword_match: f64,
    pub completeness: f64,
    pub format: f64,
    pub experience_match: f64,
    pub min_power_verbs: usize,
    pub min_quantified_achievements: usize,
    pub min_technical_skills: usize,
    pub min_soft_skills: usize,
}

impl FeedbackThresholds {
    pub const STANDARD: FeedbackThresholds = FeedbackThresholds {
        keyword_match: 60.0,
        completeness: 80.0,
        format: 70.0,
        experience_match: 60.0,
        min_power_verbs: 5,
        min_quantified_achievements: 3,
        min_technical_skills: 5,
        min_soft_skills: 3,
    };
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScorePrecision {
    /// Round to two decimals.
    TwoDecimals,
    /// Truncate to a whole number.
    Integer,
}

impl ScorePrecision {
    pub fn apply(&self, value: f64) -> f64 {
        match self {
            ScorePrecision::TwoDecimals => (value * 100.0).round() / 100.0,
            ScorePrecision::Integer => value.trunc(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringProfile {
    pub name: String,
    pub weights: ComponentWeights,
    pub word_band: WordBand,
    pub experience_blend: ExperienceBlend,
    pub keyword_mode: KeywordMode,
    pub precision: ScorePrecision,
    pub format_points: FormatPoints,
    pub thresholds: FeedbackThresholds,
}

impl Default for ScoringProfile {
    fn default() -> Self {
        Self::detailed()
    }
}

impl ScoringProfile {
    pub const NAMES: [&'static str; 2] = ["detailed", "compact"];

    pub fn detailed() -> Self {
        Self {
            name: "detailed".to_string(),
            weights: ComponentWeights {
                keyword_match: 0.30,
                completeness: 0.20,
                format: 0.20,
                experience_match: 0.30,
            },
            word_band: WordBand { min_words: 300, max_words: 1000 },
            experience_blend: ExperienceBlend { years: 0.4, skills: 0.6 },
            keyword_mode: KeywordMode::Vocabulary,
            precision: ScorePrecision::TwoDecimals,
            format_points: FormatPoints::STANDARD,
            thresholds: FeedbackThresholds::STANDARD,
        }
    }

    pub fn compact() -> Self {
        Self {
            name: "compact".to_string(),
            weights: ComponentWeights {
                keyword_match: 0.30,
                completeness: 0.20,
                format: 0.25,
                experience_match: 0.25,
            },
            word_band: WordBand { min_words: 200, max_words: 800 },
            experience_blend: ExperienceBlend { years: 0.3, skills: 0.7 },
            keyword_mode: KeywordMode::RequiredTerms,
            precision: ScorePrecision::Integer,
            format_points: FormatPoints::STANDARD,
            thresholds: FeedbackThresholds::STANDARD,
        }
    }

    pub fn by_name(name: &str) -> Result<Self> {
        match name.to_lowercase().as_str() {
            "detailed" | "default" => Ok(Self::detailed()),
            "compact" => Ok(Self::compact()),
            other => Err(AtsError::Configuration(format!(
                "Unknown scoring profile: {}. Available: {}",
                other,
                Self::NAMES.join(", ")
            ))),
        }
    }

    pub fn with_weights(mut self, weights: ComponentWeights) -> Self {
        self.weights = weights;
        self
    }

    pub fn validate(&self) -> Result<()> {
        self.weights.validate()?;

        let blend = self.experience_blend;
        if blend.years < 0.0 || blend.skills < 0.0 || (blend.years + blend.skills - 1.0).abs() > WEIGHT_TOLERANCE {
            return Err(AtsError::Configuration(
                "experience blend must be non-negative and sum to 1.0".to_string(),
            ));
        }

        if self.word_band.min_words > self.word_band.max_words {
            return Err(AtsError::Configuration(format!(
                "word band minimum {} exceeds maximum {}",
                self.word_band.min_words, self.word_band.max_words
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_profiles_are_valid() {
        for name in ScoringProfile::NAMES {
            let profile = ScoringProfile::by_name(name).unwrap();
            assert!(profile.validate().is_ok(), "{name} should validate");
            assert!((profile.weights.sum() - 1.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_unknown_profile() {
        assert!(matches!(ScoringProfile::by_name("lenient"), Err(AtsError::Configuration(_))));
    }

    #[test]
    fn test_weights_must_sum_to_one() {
        let profile = ScoringProfile::detailed().with_weights(ComponentWeights {
            keyword_match: 0.5,
            completeness: 0.5,
            format: 0.5,
            experience_match: 0.0,
        });

        assert!(profile.validate().is_err());
    }

    #[test]
    fn test_negative_weight_rejected() {
        let weights = ComponentWeights {
            keyword_match: 1.2,
            completeness: -0.2,
            format: 0.0,
            experience_match: 0.0,
        };

        assert!(weights.validate().is_err());
    }

    #[test]
    fn test_word_band_classification() {
        let band = ScoringProfile::detailed().word_band;

        assert_eq!(band.classify(120), LengthVerdict::TooShort);
        assert_eq!(band.classify(300), LengthVerdict::InRange);
        assert_eq!(band.classify(1000), LengthVerdict::InRange);
        assert_eq!(band.classify(1001), LengthVerdict::TooLong);
    }

    #[test]
    fn test_precision() {
        assert_eq!(ScorePrecision::TwoDecimals.apply(81.666_666), 81.67);
        assert_eq!(ScorePrecision::Integer.apply(81.99), 81.0);
    }

    #[test]
    fn test_format_points_total_one_hundred() {
        let points = FormatPoints::STANDARD;
        let best = points.length_in_range + points.bullets + points.email + points.phone + points.dated_history;

        assert_eq!(best, 100.0);
    }
}
