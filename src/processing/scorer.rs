//! Component metrics, weighted composite and feedback rules

use crate::error::{AtsError, Result};
use crate::processing::content::ContentInsights;
use crate::processing::keywords::{KeywordSet, SkillProfile};
use crate::processing::normalizer::TextNormalizer;
use crate::processing::profile::{LengthVerdict, ScoringProfile};
use crate::processing::sections::{SectionMap, SectionType};
use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};

pub const EMPTY_RESUME_FEEDBACK: &str = "Resume text is required";
pub const WELL_OPTIMIZED_FEEDBACK: &str = "Your resume is well-optimized for this position";
pub const MAX_FEEDBACK: usize = 5;

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ComponentScores {
    pub keyword_match: f64,
    pub completeness: f64,
    pub format: f64,
    pub experience_match: f64,
}

impl ComponentScores {
    pub fn as_array(&self) -> [(&'static str, f64); 4] {
        [
            ("keyword_match", self.keyword_match),
            ("completeness", self.completeness),
            ("format", self.format),
            ("experience_match", self.experience_match),
        ]
    }

    fn rounded(&self) -> Self {
        let round = |v: f64| (v * 100.0).round() / 100.0;
        Self {
            keyword_match: round(self.keyword_match),
            completeness: round(self.completeness),
            format: round(self.format),
            experience_match: round(self.experience_match),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreResult {
    pub total_score: f64,
    pub component_scores: ComponentScores,
    pub feedback: Vec<String>,
    #[serde(with = "utc_seconds")]
    pub timestamp: DateTime<Utc>,
}

impl ScoreResult {
    /// Zero result returned for a blank resume.
    pub fn empty_resume() -> Self {
        Self {
            total_score: 0.0,
            component_scores: ComponentScores::default(),
            feedback: vec![EMPTY_RESUME_FEEDBACK.to_string()],
            timestamp: Utc::now(),
        }
    }

    /// Zero result carrying a description of an internal failure.
    pub fn failed(error: &AtsError) -> Self {
        Self {
            total_score: 0.0,
            component_scores: ComponentScores::default(),
            feedback: vec![format!("Error calculating ATS score: {}", error)],
            timestamp: Utc::now(),
        }
    }
}

/// ISO-8601 UTC with second precision and a trailing `Z`.
mod utc_seconds {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&value.to_rfc3339_opts(SecondsFormat::Secs, true))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        DateTime::parse_from_rfc3339(&raw)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(serde::de::Error::custom)
    }
}

/// Layout signals the format metric is computed from.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FormatSignals {
    pub word_count: usize,
    pub length: LengthVerdict,
    pub has_bullets: bool,
    pub has_email: bool,
    pub has_phone: bool,
    pub has_dated_history: bool,
}

pub struct Scorer {
    profile: ScoringProfile,
    bullet_regex: Regex,
    date_regex: Regex,
}

impl Scorer {
    pub fn new(profile: ScoringProfile) -> Result<Self> {
        profile.validate()?;

        Ok(Self {
            profile,
            bullet_regex: Regex::new(r"(?m)^\s*[-*+]\s+\S")?,
            date_regex: Regex::new(
                r"(?i)\b(?:(?:19|20)\d{2}|jan(?:uary)?|feb(?:ruary)?|mar(?:ch)?|apr(?:il)?|may|june?|july?|aug(?:ust)?|sept?(?:ember)?|oct(?:ober)?|nov(?:ember)?|dec(?:ember)?)\b",
            )?,
        })
    }

    pub fn profile(&self) -> &ScoringProfile {
        &self.profile
    }

    /// Percentage of job key terms found in the lower-cased resume.
    pub fn keyword_match(&self, job_terms: &KeywordSet, resume_lower: &str) -> f64 {
        if job_terms.is_empty() {
            return 0.0;
        }
        let found = job_terms
            .iter()
            .filter(|term| resume_lower.contains(term.as_str()))
            .count();
        found as f64 / job_terms.len() as f64 * 100.0
    }

    /// Percentage of required sections present, plus the names of those missing.
    pub fn completeness(
        &self,
        sections: &SectionMap,
        resume_lower: &str,
        has_contact_pattern: bool,
    ) -> (f64, Vec<SectionType>) {
        let missing: Vec<SectionType> = SectionType::REQUIRED
            .iter()
            .copied()
            .filter(|section| {
                let present = sections.contains(*section)
                    || section.evidence_terms().iter().any(|term| resume_lower.contains(term))
                    || (*section == SectionType::Contact && has_contact_pattern);
                !present
            })
            .collect();

        let total = SectionType::REQUIRED.len();
        let found = total - missing.len();
        (found as f64 / total as f64 * 100.0, missing)
    }

    pub fn format_signals(&self, normalizer: &TextNormalizer, resume: &str) -> FormatSignals {
        let word_count = normalizer.word_count(resume);

        FormatSignals {
            word_count,
            length: self.profile.word_band.classify(word_count),
            has_bullets: resume.contains('•') || self.bullet_regex.is_match(resume),
            has_email: normalizer.has_email(resume),
            has_phone: normalizer.has_phone(resume),
            has_dated_history: self.date_regex.is_match(resume),
        }
    }

    pub fn format_score(&self, signals: &FormatSignals) -> f64 {
        let points = &self.profile.format_points;
        let mut score = points.for_length(signals.length);

        if signals.has_bullets {
            score += points.bullets;
        }
        if signals.has_email {
            score += points.email;
        }
        if signals.has_phone {
            score += points.phone;
        }
        if signals.has_dated_history {
            score += points.dated_history;
        }

        score.min(100.0)
    }

    /// Blend of the years requirement and vocabulary skill overlap. A job
    /// that names no vocabulary skills contributes no skill overlap.
    pub fn experience_match(
        &self,
        required_years: u32,
        resume_years: u32,
        job_skills: &KeywordSet,
        resume_skills: &KeywordSet,
    ) -> f64 {
        let skills_overlap = if job_skills.is_empty() {
            0.0
        } else {
            job_skills.intersection(resume_skills).count() as f64 / job_skills.len() as f64
        };

        if required_years == 0 {
            return skills_overlap * 100.0;
        }

        let years_ratio = if resume_years >= required_years {
            1.0
        } else {
            resume_years as f64 / required_years as f64
        };

        let blend = self.profile.experience_blend;
        (years_ratio * blend.years + skills_overlap * blend.skills) * 100.0
    }

    /// Weighted sum of the components, clamped to [0, 100] and rounded to the
    /// profile's precision.
    pub fn composite(&self, scores: &ComponentScores) -> Result<f64> {
        let weights = &self.profile.weights;
        let total = scores.keyword_match * weights.keyword_match
            + scores.completeness * weights.completeness
            + scores.format * weights.format
            + scores.experience_match * weights.experience_match;

        if !total.is_finite() {
            return Err(AtsError::Scoring(format!("composite score is not finite: {}", total)));
        }

        Ok(self.profile.precision.apply(total.clamp(0.0, 100.0)))
    }

    /// Feedback messages in priority order, at most [`MAX_FEEDBACK`].
    pub fn feedback(
        &self,
        scores: &ComponentScores,
        signals: &FormatSignals,
        content: &ContentInsights,
        resume_skills: &SkillProfile,
        missing_sections: &[SectionType],
    ) -> Vec<String> {
        let thresholds = &self.profile.thresholds;
        let mut feedback = Vec::new();

        if scores.keyword_match < thresholds.keyword_match {
            feedback.push("Consider adding more relevant keywords from the job description".to_string());
        }
        if scores.completeness < thresholds.completeness {
            let mut message = "Some important sections may be missing from your resume".to_string();
            if !missing_sections.is_empty() {
                let names: Vec<&str> = missing_sections.iter().map(|s| s.as_str()).collect();
                message.push_str(&format!(": {}", names.join(", ")));
            }
            feedback.push(message);
        }
        if scores.format < thresholds.format {
            feedback.push("Improve resume formatting and structure for better readability".to_string());
        }
        if scores.experience_match < thresholds.experience_match {
            feedback.push("Your experience may not fully align with the job requirements".to_string());
        }
        if !signals.has_bullets {
            feedback.push("Use bullet points to improve readability and ATS parsing".to_string());
        }
        match signals.length {
            LengthVerdict::TooShort => feedback.push(
                "Your resume might be too short. Consider adding more details about your experience".to_string(),
            ),
            LengthVerdict::TooLong => feedback.push(
                "Your resume might be too long. Consider making it more concise".to_string(),
            ),
            LengthVerdict::InRange => {}
        }
        if !signals.has_email {
            feedback.push("Ensure your email address is clearly visible".to_string());
        }
        if content.power_verb_count() < thresholds.min_power_verbs {
            feedback.push(
                "Add more power verbs to describe your achievements (e.g., 'led', 'developed', 'increased')".to_string(),
            );
        }
        if content.quantified_achievements < thresholds.min_quantified_achievements {
            feedback.push(
                "Include more quantifiable metrics and achievements (e.g., 'Increased sales by 25%')".to_string(),
            );
        }
        if content.uses_passive_phrasing() {
            feedback.push("Replace passive phrases like 'responsible for' with active power verbs".to_string());
        }
        if resume_skills.technical.len() < thresholds.min_technical_skills {
            feedback.push("Add more relevant technical skills to match job requirements".to_string());
        }
        if resume_skills.soft.len() < thresholds.min_soft_skills {
            feedback.push("Include relevant soft skills like leadership, communication, or teamwork".to_string());
        }

        if feedback.is_empty() {
            feedback.push(WELL_OPTIMIZED_FEEDBACK.to_string());
        }
        feedback.truncate(MAX_FEEDBACK);
        feedback
    }

    /// Assemble the final result from already computed components.
    pub fn finish(&self, scores: ComponentScores, feedback: Vec<String>) -> Result<ScoreResult> {
        let total_score = self.composite(&scores)?;

        Ok(ScoreResult {
            total_score,
            component_scores: scores.rounded(),
            feedback,
            timestamp: Utc::now(),
        })
    }
}
