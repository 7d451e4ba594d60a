//! Years-of-experience and education extraction

use crate::error::{AtsError, Result};
use log::warn;
use regex::Regex;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EducationLevel {
    Associate,
    Bachelors,
    Masters,
    Phd,
}

impl std::fmt::Display for EducationLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EducationLevel::Associate => write!(f, "Associate's"),
            EducationLevel::Bachelors => write!(f, "Bachelor's"),
            EducationLevel::Masters => write!(f, "Master's"),
            EducationLevel::Phd => write!(f, "PhD"),
        }
    }
}

pub struct ExperienceAnalyzer {
    stated_years: [Regex; 2],
    year_range: Regex,
    education: Vec<(EducationLevel, Regex)>,
}

impl ExperienceAnalyzer {
    pub fn new() -> Result<Self> {
        let stated_years = [
            // "5+ years of experience", "3 yrs professional experience"
            Regex::new(r"(?i)(\d+)\+?\s*(?:years?|yrs?)(?:\s+of)?(?:\s+[a-z+#./-]+){0,2}?\s+experience")?,
            // "experience of 4 years", "Experience: 7 years"
            Regex::new(r"(?i)experience\s*:?\s*(?:of|for)?\s*(\d+)\+?\s*(?:years?|yrs?)")?,
        ];

        let year_range = Regex::new(r"(?i)\b((?:19|20)\d{2})\s*[-–]\s*(present|current|now|(?:19|20)\d{2})\b")?;

        // Highest level first so `highest_education` can stop early.
        let education = vec![
            (EducationLevel::Phd, Regex::new(r"(?i)\b(?:ph\.?\s?d|doctorate|doctoral)\b")?),
            (EducationLevel::Masters, Regex::new(r"(?i)\b(?:master'?s?|msc|m\.sc|mba|m\.s\.)(?:\W|$)")?),
            (EducationLevel::Bachelors, Regex::new(r"(?i)\b(?:bachelor'?s?|bsc|b\.sc|bs|b\.s\.|btech|b\.tech|ba|b\.a\.)(?:\W|$)")?),
            (EducationLevel::Associate, Regex::new(r"(?i)\b(?:associate'?s?\s+degree|associate\s+of|diploma)\b")?),
        ];

        Ok(Self { stated_years, year_range, education })
    }

    /// Largest year count stated next to the word "experience", or 0.
    pub fn extract_years(&self, text: &str) -> u32 {
        self.try_extract_years(text).unwrap_or_else(|e| {
            warn!("Ignoring stated experience: {}", e);
            0
        })
    }

    pub fn try_extract_years(&self, text: &str) -> Result<u32> {
        let mut best = 0;
        for pattern in &self.stated_years {
            for caps in pattern.captures_iter(text) {
                let years: u32 = caps[1].parse()?;
                best = best.max(years);
            }
        }
        Ok(best)
    }

    /// Sum of `end - start` over every year range such as `2018 - 2021` or
    /// `2020 – present`. Overlapping jobs are counted twice and reversed
    /// ranges contribute nothing.
    pub fn total_years_from_ranges(&self, text: &str, reference_year: i32) -> u32 {
        self.try_total_years_from_ranges(text, reference_year).unwrap_or_else(|e| {
            warn!("Ignoring dated history: {}", e);
            0
        })
    }

    pub fn try_total_years_from_ranges(&self, text: &str, reference_year: i32) -> Result<u32> {
        let mut total: u32 = 0;

        for caps in self.year_range.captures_iter(text) {
            let start: i32 = caps[1].parse()?;
            let end_token = caps[2].to_lowercase();
            let end: i32 = match end_token.as_str() {
                "present" | "current" | "now" => reference_year,
                digits => digits.parse()?,
            };

            let span = end
                .checked_sub(start)
                .ok_or_else(|| AtsError::Parsing(format!("year range {}-{} overflows", start, end)))?;
            if span > 0 {
                total = total.saturating_add(span.unsigned_abs());
            }
        }

        Ok(total)
    }

    /// Years of experience a resume claims: the larger of the stated figure
    /// and the dated history total.
    pub fn resume_years(&self, text: &str, reference_year: i32) -> u32 {
        self.extract_years(text)
            .max(self.total_years_from_ranges(text, reference_year))
    }

    /// All education levels mentioned, highest first.
    pub fn detect_education(&self, text: &str) -> Vec<EducationLevel> {
        self.education
            .iter()
            .filter(|(_, pattern)| pattern.is_match(text))
            .map(|(level, _)| *level)
            .collect()
    }

    pub fn highest_education(&self, text: &str) -> Option<EducationLevel> {
        self.education
            .iter()
            .find(|(_, pattern)| pattern.is_match(text))
            .map(|(level, _)| *level)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stated_years() {
        let analyzer = ExperienceAnalyzer::new().unwrap();

        assert_eq!(analyzer.extract_years("5+ years of experience"), 5);
        assert_eq!(analyzer.extract_years("experience for 3 years"), 3);
        assert_eq!(analyzer.extract_years("no experience mentioned"), 0);
    }

    #[test]
    fn test_stated_years_with_qualifiers() {
        let analyzer = ExperienceAnalyzer::new().unwrap();

        assert_eq!(analyzer.extract_years("Need 5+ years Python experience with Django"), 5);
        assert_eq!(analyzer.extract_years("Experience: 7 years building Django apps"), 7);
        assert_eq!(analyzer.extract_years("2 years of experience, later 6 yrs experience"), 6);
    }

    #[test]
    fn test_overflowing_year_count_is_swallowed() {
        let analyzer = ExperienceAnalyzer::new().unwrap();
        let text = "99999999999999999999 years of experience";

        assert!(analyzer.try_extract_years(text).is_err());
        assert_eq!(analyzer.extract_years(text), 0);
    }

    #[test]
    fn test_year_ranges_sum() {
        let analyzer = ExperienceAnalyzer::new().unwrap();
        let text = "Acme 2015 - 2018\nGlobex 2018 – present\nInitech 2019-2020";

        // 3 + 7 + 1, overlap counted twice
        assert_eq!(analyzer.total_years_from_ranges(text, 2025), 11);
    }

    #[test]
    fn test_reversed_range_contributes_nothing() {
        let analyzer = ExperienceAnalyzer::new().unwrap();

        assert_eq!(analyzer.total_years_from_ranges("2020 - 2018", 2025), 0);
        assert_eq!(analyzer.total_years_from_ranges("no dates", 2025), 0);
    }

    #[test]
    fn test_resume_years_takes_larger_signal() {
        let analyzer = ExperienceAnalyzer::new().unwrap();

        assert_eq!(analyzer.resume_years("Experience: 7 years building apps", 2025), 7);
        assert_eq!(analyzer.resume_years("3 years of experience\n2010 - 2020", 2025), 10);
    }

    #[test]
    fn test_education_levels() {
        let analyzer = ExperienceAnalyzer::new().unwrap();

        assert_eq!(analyzer.highest_education("BS Computer Science"), Some(EducationLevel::Bachelors));
        assert_eq!(
            analyzer.detect_education("MBA, Bachelor of Arts"),
            vec![EducationLevel::Masters, EducationLevel::Bachelors]
        );
        assert_eq!(analyzer.highest_education("Ph.D. in Physics"), Some(EducationLevel::Phd));
        assert_eq!(analyzer.highest_education("Self taught engineer"), None);
    }
}
