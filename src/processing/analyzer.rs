//! Scoring engine tying the extraction pipeline to the scorer

use crate::error::{AtsError, Result};
use crate::processing::competitiveness::{Competitiveness, CompetitivenessAnalyzer, Industry};
use crate::processing::content::{ContentAnalyzer, ContentInsights};
use crate::processing::experience::ExperienceAnalyzer;
use crate::processing::job_analysis::{JobAnalyzer, JobRequirements};
use crate::processing::keywords::{partition_by_presence, KeywordExtractor, KeywordSet, SkillProfile};
use crate::processing::normalizer::TextNormalizer;
use crate::processing::optimizer::{OptimizationSuggestions, Optimizer};
use crate::processing::profile::ScoringProfile;
use crate::processing::scorer::{ComponentScores, FormatSignals, ScoreResult, Scorer};
use crate::processing::sections::{SectionDetector, SectionMap, SectionType};
use crate::processing::vocabulary::DEFAULT_JOB_DESCRIPTION;
use chrono::{Datelike, Utc};
use log::{debug, error};
use once_cell::sync::Lazy;

/// Engine behind [`score_resume`], built on first use.
static DEFAULT_ENGINE: Lazy<std::result::Result<AtsEngine, AtsError>> = Lazy::new(AtsEngine::new);

/// Every intermediate signal behind a score.
#[derive(Debug, Clone)]
pub struct MatchAnalysis {
    pub resume_sections: SectionMap,
    pub job_terms: KeywordSet,
    pub matched_terms: KeywordSet,
    pub missing_terms: KeywordSet,
    pub job_skills: SkillProfile,
    pub resume_skills: SkillProfile,
    pub required_years: u32,
    pub resume_years: u32,
    pub format: FormatSignals,
    pub content: ContentInsights,
    pub missing_sections: Vec<SectionType>,
    pub component_scores: ComponentScores,
    /// The job description was blank and the default one was used instead.
    pub job_description_substituted: bool,
}

/// Stateless resume scorer. Holds only the compiled lookup tables, so one
/// instance can be shared across threads behind an `Arc`.
pub struct AtsEngine {
    normalizer: TextNormalizer,
    sections: SectionDetector,
    keywords: KeywordExtractor,
    experience: ExperienceAnalyzer,
    content: ContentAnalyzer,
    competitiveness: CompetitivenessAnalyzer,
    scorer: Scorer,
    optimizer: Optimizer,
    reference_year: i32,
}

impl AtsEngine {
    pub fn new() -> Result<Self> {
        Self::with_profile(ScoringProfile::detailed())
    }

    pub fn with_profile(profile: ScoringProfile) -> Result<Self> {
        debug!("Building ATS engine with profile '{}'", profile.name);

        Ok(Self {
            normalizer: TextNormalizer::new()?,
            sections: SectionDetector::new(),
            keywords: KeywordExtractor::new()?,
            experience: ExperienceAnalyzer::new()?,
            content: ContentAnalyzer::new()?,
            competitiveness: CompetitivenessAnalyzer::new()?,
            scorer: Scorer::new(profile)?,
            optimizer: Optimizer::default(),
            reference_year: Utc::now().year(),
        })
    }

    /// Year that `present` resolves to in date ranges.
    pub fn with_reference_year(mut self, year: i32) -> Self {
        self.reference_year = year;
        self
    }

    pub fn profile(&self) -> &ScoringProfile {
        self.scorer.profile()
    }

    pub fn normalizer(&self) -> &TextNormalizer {
        &self.normalizer
    }

    /// Identifies everything besides the input texts that a score depends
    /// on: the full profile and the reference year.
    pub fn fingerprint(&self) -> String {
        format!("{:?}@{}", self.profile(), self.reference_year)
    }

    /// Run the full extraction pipeline and compute the component metrics.
    pub fn analyze(&self, resume: &str, job_description: &str) -> MatchAnalysis {
        let (job_description, job_description_substituted) = if job_description.trim().is_empty() {
            (DEFAULT_JOB_DESCRIPTION, true)
        } else {
            (job_description, false)
        };

        let resume_lower = self.normalizer.normalize(resume);
        let profile = self.scorer.profile();

        let resume_sections = self.sections.detect_sections(resume);
        let job_terms = self.keywords.key_terms(&self.normalizer, job_description, profile.keyword_mode);
        let (matched_terms, missing_terms) = partition_by_presence(&job_terms, &resume_lower);

        let job_skills = self.keywords.extract_skills(job_description);
        let resume_skills = self.keywords.extract_skills(resume);
        let required_years = self.experience.extract_years(job_description);
        let resume_years = self.experience.resume_years(resume, self.reference_year);

        let format = self.scorer.format_signals(&self.normalizer, resume);
        let content = self.content.analyze(&self.normalizer, resume);

        let keyword_match = self.scorer.keyword_match(&job_terms, &resume_lower);
        let (completeness, missing_sections) = self.scorer.completeness(
            &resume_sections,
            &resume_lower,
            format.has_email || format.has_phone,
        );
        let experience_match = self.scorer.experience_match(
            required_years,
            resume_years,
            &job_skills.all(),
            &resume_skills.all(),
        );
        let component_scores = ComponentScores {
            keyword_match,
            completeness,
            format: self.scorer.format_score(&format),
            experience_match,
        };

        debug!(
            "Components: keyword {:.1}, completeness {:.1}, format {:.1}, experience {:.1}",
            component_scores.keyword_match,
            component_scores.completeness,
            component_scores.format,
            component_scores.experience_match
        );

        MatchAnalysis {
            resume_sections,
            job_terms,
            matched_terms,
            missing_terms,
            job_skills,
            resume_skills,
            required_years,
            resume_years,
            format,
            content,
            missing_sections,
            component_scores,
            job_description_substituted,
        }
    }

    /// Score a resume against a job description. Never fails: a blank resume
    /// and internal errors both produce a zero score with explanatory feedback.
    pub fn score(&self, resume: &str, job_description: &str) -> ScoreResult {
        self.score_with_analysis(resume, job_description).0
    }

    /// Like [`AtsEngine::score`], also returning the analysis behind the score
    /// when one was computed.
    pub fn score_with_analysis(&self, resume: &str, job_description: &str) -> (ScoreResult, Option<MatchAnalysis>) {
        if resume.trim().is_empty() {
            return (ScoreResult::empty_resume(), None);
        }

        let analysis = self.analyze(resume, job_description);
        match self.finish(&analysis) {
            Ok(result) => (result, Some(analysis)),
            Err(e) => {
                error!("ATS scoring failed: {}", e);
                (ScoreResult::failed(&e), Some(analysis))
            }
        }
    }

    fn finish(&self, analysis: &MatchAnalysis) -> Result<ScoreResult> {
        let feedback = self.scorer.feedback(
            &analysis.component_scores,
            &analysis.format,
            &analysis.content,
            &analysis.resume_skills,
            &analysis.missing_sections,
        );
        self.scorer.finish(analysis.component_scores, feedback)
    }

    pub fn analyze_job(&self, job_description: &str) -> JobRequirements {
        JobAnalyzer::new(&self.normalizer, &self.keywords, &self.experience).analyze(job_description)
    }

    /// How the resume stands in `industry`'s market, without reference to a
    /// job description.
    pub fn competitiveness(&self, resume: &str, industry: Industry) -> Competitiveness {
        let skills = self.keywords.extract_skills(resume);
        let content = self.content.analyze(&self.normalizer, resume);
        let has_degree = self.experience.highest_education(resume).is_some()
            || self.normalizer.normalize(resume).contains("degree");

        self.competitiveness.assess(industry, resume, &skills, &content, has_degree)
    }

    /// Concrete edits that would raise the score.
    pub fn optimize(&self, resume: &str, job_description: &str) -> OptimizationSuggestions {
        let (result, analysis) = self.score_with_analysis(resume, job_description);
        match analysis {
            Some(analysis) => self.suggestions(&analysis, &result, resume),
            None => OptimizationSuggestions::for_empty_resume(),
        }
    }

    /// Suggestions for an analysis that has already been scored.
    pub fn suggestions(&self, analysis: &MatchAnalysis, result: &ScoreResult, resume: &str) -> OptimizationSuggestions {
        self.optimizer.suggest(&self.normalizer, analysis, result, resume)
    }
}

/// Score with the default profile, reusing one lazily built engine. Falls
/// back to a zero score if that engine cannot be built.
pub fn score_resume(resume: &str, job_description: &str) -> ScoreResult {
    match &*DEFAULT_ENGINE {
        Ok(engine) => engine.score(resume, job_description),
        Err(e) => {
            error!("Failed to build ATS engine: {}", e);
            ScoreResult::failed(e)
        }
    }
}
