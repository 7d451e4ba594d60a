//! Report structures wrapping a score with the context needed to act on it

use crate::processing::analyzer::AtsEngine;
use crate::processing::competitiveness::{Competitiveness, Industry, MarketPosition};
use crate::processing::optimizer::{OptimizationSuggestions, FORMATTING_TIPS};
use crate::processing::scorer::ScoreResult;
use crate::processing::sections::SectionType;
use crate::processing::vocabulary::DEFAULT_JOB_DESCRIPTION;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Instant;

/// Score at or above which a resume is reported as passing.
pub const PASS_THRESHOLD: f64 = 70.0;

/// Items kept in each recommendation list.
pub const RECOMMENDATIONS_PER_LIST: usize = 3;

/// Complete scoring report for one resume / job description pair.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreReport {
    /// Executive summary with key findings
    pub summary: ReportSummary,

    /// The score itself
    pub result: ScoreResult,

    /// Name of the scoring profile used
    pub profile: String,

    pub job_description_excerpt: String,
    pub resume_word_count: usize,
    pub sections_found: Vec<SectionType>,
    pub matched_keywords: Vec<String>,
    pub missing_keywords: Vec<String>,

    /// Market standing of the resume on its own, for the chosen industry
    pub competitiveness: Competitiveness,

    pub recommendations: Recommendations,

    /// Present when optimization suggestions were requested
    pub optimization: Option<OptimizationSuggestions>,

    pub metadata: ReportMetadata,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportSummary {
    pub status: ReportStatus,
    pub verdict: String,
    pub readability: Readability,
    pub market_position: MarketPosition,
    pub strengths: Vec<String>,
    pub improvement_areas: Vec<String>,
}

/// Next steps grouped by horizon.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Recommendations {
    /// Highest-priority feedback for this job description
    pub immediate: Vec<String>,
    /// Longer-term advice from the competitiveness assessment
    pub strategic: Vec<String>,
    pub formatting: Vec<String>,
}

impl Recommendations {
    fn new(result: &ScoreResult, competitiveness: &Competitiveness) -> Self {
        let take = |items: &[String]| items.iter().take(RECOMMENDATIONS_PER_LIST).cloned().collect();
        Self {
            immediate: take(&result.feedback),
            strategic: take(&competitiveness.recommendations),
            formatting: FORMATTING_TIPS
                .iter()
                .take(RECOMMENDATIONS_PER_LIST)
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportMetadata {
    pub generated_at: DateTime<Utc>,
    pub scorer_version: String,
    pub resume_file: Option<String>,
    pub job_file: Option<String>,
    pub processing_time_ms: u64,
    /// Advice specific to the resume's file type
    pub format_recommendations: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReportStatus {
    Pass,
    NeedsImprovement,
}

impl std::fmt::Display for ReportStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReportStatus::Pass => write!(f, "Pass"),
            ReportStatus::NeedsImprovement => write!(f, "Needs Improvement"),
        }
    }
}

/// Readability band from average sentence length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Readability {
    Excellent,
    Good,
    Fair,
    Poor,
}

impl Readability {
    pub fn from_average_sentence_length(words_per_sentence: f64) -> Self {
        if words_per_sentence <= 0.0 {
            Readability::Poor
        } else if words_per_sentence <= 15.0 {
            Readability::Excellent
        } else if words_per_sentence <= 20.0 {
            Readability::Good
        } else if words_per_sentence <= 25.0 {
            Readability::Fair
        } else {
            Readability::Poor
        }
    }
}

impl std::fmt::Display for Readability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Readability::Excellent => "Excellent",
            Readability::Good => "Good",
            Readability::Fair => "Fair",
            Readability::Poor => "Poor",
        };
        write!(f, "{}", label)
    }
}

/// Builds [`ScoreReport`]s from an engine.
#[derive(Debug, Clone)]
pub struct ReportAssembler {
    excerpt_chars: usize,
    include_optimization: bool,
    industry: Industry,
}

impl Default for ReportAssembler {
    fn default() -> Self {
        Self::new(500, false)
    }
}

impl ReportAssembler {
    pub fn new(excerpt_chars: usize, include_optimization: bool) -> Self {
        Self {
            excerpt_chars,
            include_optimization,
            industry: Industry::default(),
        }
    }

    /// Industry whose weights the competitiveness assessment uses.
    pub fn with_industry(mut self, industry: Industry) -> Self {
        self.industry = industry;
        self
    }

    pub fn assemble(&self, engine: &AtsEngine, resume: &str, job_description: &str) -> ScoreReport {
        let start_time = Instant::now();
        let normalizer = engine.normalizer();

        let (result, analysis) = engine.score_with_analysis(resume, job_description);

        let effective_job = if job_description.trim().is_empty() {
            DEFAULT_JOB_DESCRIPTION
        } else {
            job_description
        };

        let optimization = self.include_optimization.then(|| match &analysis {
            Some(analysis) => engine.suggestions(analysis, &result, resume),
            None => OptimizationSuggestions::for_empty_resume(),
        });

        let (sections_found, matched_keywords, missing_keywords, readability) = match &analysis {
            Some(analysis) => (
                analysis.resume_sections.sections().collect(),
                analysis.matched_terms.iter().cloned().collect(),
                analysis.missing_terms.iter().cloned().collect(),
                Readability::from_average_sentence_length(analysis.content.average_sentence_length),
            ),
            None => (Vec::new(), Vec::new(), Vec::new(), Readability::Poor),
        };

        let competitiveness = engine.competitiveness(resume, self.industry);
        let recommendations = Recommendations::new(&result, &competitiveness);
        let summary = Self::create_summary(&result, readability, competitiveness.market_position);

        ScoreReport {
            summary,
            profile: engine.profile().name.clone(),
            job_description_excerpt: normalizer.excerpt(effective_job, self.excerpt_chars),
            resume_word_count: normalizer.word_count(resume),
            sections_found,
            matched_keywords,
            missing_keywords,
            competitiveness,
            recommendations,
            optimization,
            metadata: ReportMetadata {
                generated_at: Utc::now(),
                scorer_version: env!("CARGO_PKG_VERSION").to_string(),
                resume_file: None,
                job_file: None,
                processing_time_ms: start_time.elapsed().as_millis() as u64,
                format_recommendations: Vec::new(),
            },
            result,
        }
    }

    fn create_summary(result: &ScoreResult, readability: Readability, market_position: MarketPosition) -> ReportSummary {
        let scores = &result.component_scores;

        let status = if result.total_score >= PASS_THRESHOLD {
            ReportStatus::Pass
        } else {
            ReportStatus::NeedsImprovement
        };

        let verdict = match result.total_score as u32 {
            90..=100 => "Excellent match - strong candidate for this role",
            80..=89 => "Very good match - minor improvements could help",
            70..=79 => "Good match - some targeted improvements recommended",
            60..=69 => "Fair match - several improvements needed",
            50..=59 => "Below average match - significant improvements required",
            _ => "Poor match - major revisions needed",
        }
        .to_string();

        let mut strengths = Vec::new();
        let mut improvement_areas = Vec::new();
        for (name, value) in scores.as_array() {
            let label = name.replace('_', " ");
            if value >= 80.0 {
                strengths.push(format!("Strong {} ({:.0}%)", label, value));
            } else if value < 50.0 {
                improvement_areas.push(format!("Low {} ({:.0}%)", label, value));
            }
        }

        ReportSummary {
            status,
            verdict,
            readability,
            market_position,
            strengths,
            improvement_areas,
        }
    }
}

impl ScoreReport {
    pub fn with_sources(mut self, resume_file: impl Into<String>, job_file: impl Into<String>) -> Self {
        self.metadata.resume_file = Some(resume_file.into());
        self.metadata.job_file = Some(job_file.into());
        self
    }

    pub fn with_format_recommendations(mut self, recommendations: Vec<String>) -> Self {
        self.metadata.format_recommendations = recommendations;
        self
    }

    pub fn passed(&self) -> bool {
        self.summary.status == ReportStatus::Pass
    }
}

/// One row of a batch run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchEntry {
    pub file: String,
    pub total_score: f64,
    pub status: ReportStatus,
    pub top_feedback: Option<String>,
    /// Set when the file could not be read; such entries rank last
    pub error: Option<String>,
}

impl BatchEntry {
    pub fn scored(file: impl Into<String>, result: &ScoreResult) -> Self {
        Self {
            file: file.into(),
            total_score: result.total_score,
            status: if result.total_score >= PASS_THRESHOLD {
                ReportStatus::Pass
            } else {
                ReportStatus::NeedsImprovement
            },
            top_feedback: result.feedback.first().cloned(),
            error: None,
        }
    }

    pub fn failed(file: impl Into<String>, error: impl std::fmt::Display) -> Self {
        Self {
            file: file.into(),
            total_score: 0.0,
            status: ReportStatus::NeedsImprovement,
            top_feedback: None,
            error: Some(error.to_string()),
        }
    }
}

/// Ranked results of scoring several resumes against one job description.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchSummary {
    pub job_file: String,
    pub profile: String,
    pub entries: Vec<BatchEntry>,
    pub generated_at: DateTime<Utc>,
}

impl BatchSummary {
    pub fn new(job_file: impl Into<String>, profile: impl Into<String>, mut entries: Vec<BatchEntry>) -> Self {
        entries.sort_by(|a, b| {
            a.error
                .is_some()
                .cmp(&b.error.is_some())
                .then_with(|| b.total_score.total_cmp(&a.total_score))
                .then_with(|| a.file.cmp(&b.file))
        });

        Self {
            job_file: job_file.into(),
            profile: profile.into(),
            entries,
            generated_at: Utc::now(),
        }
    }

    pub fn passed(&self) -> usize {
        self.entries.iter().filter(|e| e.status == ReportStatus::Pass).count()
    }
}
