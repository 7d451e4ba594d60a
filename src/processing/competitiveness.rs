//! Market competitiveness of a resume, independent of any job description
//!
//! Four sub-scores are blended with industry-specific weights and the result
//! is placed in a market-position band.

use crate::error::{AtsError, Result};
use crate::processing::content::ContentInsights;
use crate::processing::keywords::SkillProfile;
use crate::processing::vocabulary::{TermMatcher, EXPERIENCE_INDICATORS};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

const POINTS_PER_SKILL: f64 = 5.0;
const POINTS_PER_METRIC: f64 = 15.0;
const POINTS_PER_INDICATOR: f64 = 10.0;
const EDUCATION_WITH_DEGREE: f64 = 70.0;
const EDUCATION_WITHOUT_DEGREE: f64 = 40.0;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Industry {
    #[default]
    Tech,
    Finance,
    Marketing,
}

impl Industry {
    pub const NAMES: [&'static str; 3] = ["tech", "finance", "marketing"];

    pub fn weights(&self) -> IndustryWeights {
        match self {
            Industry::Tech => IndustryWeights {
                technical_skills: 0.4,
                achievements: 0.3,
                experience: 0.2,
                education: 0.1,
            },
            Industry::Finance => IndustryWeights {
                technical_skills: 0.2,
                achievements: 0.4,
                experience: 0.3,
                education: 0.1,
            },
            Industry::Marketing => IndustryWeights {
                technical_skills: 0.2,
                achievements: 0.35,
                experience: 0.3,
                education: 0.15,
            },
        }
    }
}

impl FromStr for Industry {
    type Err = AtsError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "tech" | "technology" => Ok(Industry::Tech),
            "finance" => Ok(Industry::Finance),
            "marketing" => Ok(Industry::Marketing),
            other => Err(AtsError::Configuration(format!(
                "Unknown industry: {}. Supported: {}",
                other,
                Self::NAMES.join(", ")
            ))),
        }
    }
}

impl std::fmt::Display for Industry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Industry::Tech => write!(f, "Tech"),
            Industry::Finance => write!(f, "Finance"),
            Industry::Marketing => write!(f, "Marketing"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IndustryWeights {
    pub technical_skills: f64,
    pub achievements: f64,
    pub experience: f64,
    pub education: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MarketPosition {
    HighlyCompetitive,
    Competitive,
    ModeratelyCompetitive,
    NeedsImprovement,
}

impl MarketPosition {
    pub fn from_score(score: f64) -> Self {
        if score >= 80.0 {
            MarketPosition::HighlyCompetitive
        } else if score >= 65.0 {
            MarketPosition::Competitive
        } else if score >= 50.0 {
            MarketPosition::ModeratelyCompetitive
        } else {
            MarketPosition::NeedsImprovement
        }
    }

    pub fn percentile(&self) -> &'static str {
        match self {
            MarketPosition::HighlyCompetitive => "Top 10%",
            MarketPosition::Competitive => "Top 25%",
            MarketPosition::ModeratelyCompetitive => "Top 50%",
            MarketPosition::NeedsImprovement => "Bottom 50%",
        }
    }
}

impl std::fmt::Display for MarketPosition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            MarketPosition::HighlyCompetitive => "Highly Competitive",
            MarketPosition::Competitive => "Competitive",
            MarketPosition::ModeratelyCompetitive => "Moderately Competitive",
            MarketPosition::NeedsImprovement => "Needs Improvement",
        };
        write!(f, "{}", label)
    }
}

/// Sub-scores, each in [0, 100].
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CompetitivenessComponents {
    pub technical_skills: f64,
    pub achievements: f64,
    pub experience: f64,
    pub education: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Competitiveness {
    pub score: f64,
    pub market_position: MarketPosition,
    pub percentile: String,
    pub industry: Industry,
    pub component_scores: CompetitivenessComponents,
    pub recommendations: Vec<String>,
}

impl Competitiveness {
    /// Blend sub-scores with the industry's weights. Scores are rounded to one
    /// decimal.
    pub fn from_components(industry: Industry, components: CompetitivenessComponents) -> Self {
        let w = industry.weights();
        let raw = components.technical_skills * w.technical_skills
            + components.achievements * w.achievements
            + components.experience * w.experience
            + components.education * w.education;
        let market_position = MarketPosition::from_score(raw);

        let round = |v: f64| (v * 10.0).round() / 10.0;
        Self {
            score: round(raw),
            market_position,
            percentile: market_position.percentile().to_string(),
            industry,
            component_scores: CompetitivenessComponents {
                technical_skills: round(components.technical_skills),
                achievements: round(components.achievements),
                experience: round(components.experience),
                education: round(components.education),
            },
            recommendations: recommendations(raw, industry),
        }
    }
}

fn recommendations(score: f64, industry: Industry) -> Vec<String> {
    let items: [String; 3] = if score < 50.0 {
        [
            format!("Focus on acquiring in-demand {} skills", industry.to_string().to_lowercase()),
            "Add more quantifiable achievements to demonstrate impact".to_string(),
            "Consider additional certifications or training".to_string(),
        ]
    } else if score < 70.0 {
        [
            "Highlight leadership and project management experience".to_string(),
            "Include more specific technical accomplishments".to_string(),
            "Consider specializing in high-demand areas".to_string(),
        ]
    } else {
        [
            "Your resume is highly competitive! Focus on targeting premium positions".to_string(),
            "Consider mentoring or thought leadership opportunities".to_string(),
            "Highlight unique value propositions and innovations".to_string(),
        ]
    };
    items.into()
}

pub struct CompetitivenessAnalyzer {
    experience_indicators: TermMatcher,
}

impl CompetitivenessAnalyzer {
    pub fn new() -> Result<Self> {
        Ok(Self {
            experience_indicators: TermMatcher::new(EXPERIENCE_INDICATORS)?,
        })
    }

    /// Score a resume's standing in `industry` from signals the scoring
    /// pipeline has already extracted.
    pub fn assess(
        &self,
        industry: Industry,
        resume: &str,
        resume_skills: &SkillProfile,
        content: &ContentInsights,
        has_degree: bool,
    ) -> Competitiveness {
        let indicators = self.experience_indicators.find_terms(resume).len();

        let components = CompetitivenessComponents {
            technical_skills: (resume_skills.technical.len() as f64 * POINTS_PER_SKILL).min(100.0),
            achievements: (content.quantified_achievements as f64 * POINTS_PER_METRIC).min(100.0),
            experience: (indicators as f64 * POINTS_PER_INDICATOR).min(100.0),
            education: if has_degree {
                EDUCATION_WITH_DEGREE
            } else {
                EDUCATION_WITHOUT_DEGREE
            },
        };

        Competitiveness::from_components(industry, components)
    }
}
