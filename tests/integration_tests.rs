//! Integration tests for the ATS scorer

use ats_scorer::config::OutputFormat;
use ats_scorer::input::{FileType, InputManager};
use ats_scorer::output::{ReportAssembler, ReportGenerator};
use ats_scorer::processing::experience::ExperienceAnalyzer;
use ats_scorer::processing::keywords::{KeywordExtractor, KeywordMode};
use ats_scorer::processing::normalizer::TextNormalizer;
use ats_scorer::processing::sections::{SectionDetector, SectionType};
use ats_scorer::processing::{score_resume, AtsEngine, ScoreCache, ScoringProfile};
use ats_scorer::sample::{SAMPLE_JOB_DESCRIPTION, SAMPLE_RESUME};
use ats_scorer::AtsError;
use std::path::Path;
use std::sync::Arc;

const RESUME: &str = "Senior Python Developer. Experience: 7 years building Django and Flask apps. \
                      Skills: Python, Django, Flask, PostgreSQL. Education: BS Computer Science. Contact: a@b.com";
const JOB: &str = "Need 5+ years Python experience with Django and PostgreSQL";

fn engine() -> AtsEngine {
    AtsEngine::new().unwrap().with_reference_year(2025)
}

fn assert_bounded(engine: &AtsEngine, resume: &str, job: &str) {
    let result = engine.score(resume, job);
    assert!((0.0..=100.0).contains(&result.total_score), "total {}", result.total_score);
    for (name, value) in result.component_scores.as_array() {
        assert!((0.0..=100.0).contains(&value), "{} = {}", name, value);
    }
    assert!(result.feedback.len() <= 5);
}

#[tokio::test]
async fn test_text_extraction_from_txt() {
    let mut manager = InputManager::new();
    let path = Path::new("tests/fixtures/sample_resume.txt");

    let text = manager.extract_text(path).await.unwrap();
    assert!(text.contains("John Doe"));
    assert!(text.contains("Software Engineer"));
    assert!(text.contains("React"));
    assert!(text.contains("Node.js"));
}

#[tokio::test]
async fn test_text_extraction_from_markdown() {
    let mut manager = InputManager::new();
    let path = Path::new("tests/fixtures/sample_resume.md");

    let document = manager.load(path).await.unwrap();
    assert_eq!(document.file_type, FileType::Markdown);
    assert!(document.text.contains("John Doe"));
    assert!(document.text.contains("Node.js"));
    assert!(!document.text.contains("**"));
    assert!(!document.text.contains("##"));
}

#[tokio::test]
async fn test_caching_functionality() {
    let mut manager = InputManager::new();
    let path = Path::new("tests/fixtures/sample_resume.txt");

    let text1 = manager.extract_text(path).await.unwrap();
    assert_eq!(manager.cache_size(), 1);

    let text2 = manager.extract_text(path).await.unwrap();
    assert_eq!(text1, text2);
    assert_eq!(manager.cache_size(), 1);

    let mut uncached = InputManager::new().with_cache(false);
    uncached.extract_text(path).await.unwrap();
    assert_eq!(uncached.cache_size(), 0);
}

#[tokio::test]
async fn test_unsupported_file_type() {
    let mut manager = InputManager::new();
    let result = manager.extract_text(Path::new("tests/fixtures/unsupported.xyz")).await;

    assert!(matches!(result, Err(AtsError::UnsupportedFormat(_))));
}

#[tokio::test]
async fn test_nonexistent_file() {
    let mut manager = InputManager::new();
    let result = manager.extract_text(Path::new("tests/fixtures/nonexistent.txt")).await;

    assert!(matches!(result, Err(AtsError::InvalidInput(_))));
}

#[tokio::test]
async fn test_fixture_resume_scores_against_fixture_job() {
    let mut manager = InputManager::new();
    let resume = manager.extract_text(Path::new("tests/fixtures/sample_resume.txt")).await.unwrap();
    let job = manager.extract_text(Path::new("tests/fixtures/sample_job.txt")).await.unwrap();

    let engine = engine();
    let analysis = engine.analyze(&resume, &job);

    assert_eq!(analysis.required_years, 5);
    assert!(analysis.resume_years >= 6);
    assert_eq!(analysis.component_scores.completeness, 100.0);
    assert!(analysis.matched_terms.contains("react"));
    assert!(analysis.job_skills.technical.contains("docker"));
    assert_bounded(&engine, &resume, &job);
}

#[test]
fn test_python_developer_end_to_end() {
    let result = engine().score(RESUME, JOB);

    assert!(result.total_score > 70.0, "total {}", result.total_score);
    assert!(result.component_scores.experience_match >= 90.0);
    assert!(!result.feedback.iter().any(|f| f.contains("keywords")));
}

#[test]
fn test_empty_resume_scores_zero() {
    for resume in ["", "   \n\t  "] {
        let result = score_resume(resume, JOB);
        assert_eq!(result.total_score, 0.0);
        assert_eq!(result.feedback, vec!["Resume text is required".to_string()]);
    }
}

#[test]
fn test_identical_texts_match_all_keywords() {
    let result = engine().score(SAMPLE_JOB_DESCRIPTION, SAMPLE_JOB_DESCRIPTION);

    assert_eq!(result.component_scores.keyword_match, 100.0);
}

#[test]
fn test_adding_job_terms_never_lowers_keyword_score() {
    let engine = engine();
    let before = engine.score(RESUME, SAMPLE_JOB_DESCRIPTION);
    let enriched = format!("{}\n{}", RESUME, SAMPLE_JOB_DESCRIPTION);
    let after = engine.score(&enriched, SAMPLE_JOB_DESCRIPTION);

    assert!(after.component_scores.keyword_match >= before.component_scores.keyword_match);
    assert_eq!(after.component_scores.keyword_match, 100.0);
}

#[test]
fn test_scores_stay_bounded_for_unusual_input() {
    let engine = engine();

    assert_bounded(&engine, "Jürgen Müller 東京 ✓ Développeur — 10 años", "Entwickler 🚀 gesucht");
    assert_bounded(&engine, "!!!???...", "");
    assert_bounded(&engine, RESUME, "");

    let huge = "Developed Python services handling 1,000 requests per second. ".repeat(40_000);
    assert!(huge.len() > 2_000_000);
    assert_bounded(&engine, &huge, JOB);
}

#[test]
fn test_both_profiles_score_the_same_pair() {
    let detailed = AtsEngine::with_profile(ScoringProfile::detailed()).unwrap().with_reference_year(2025);
    let compact = AtsEngine::with_profile(ScoringProfile::compact()).unwrap().with_reference_year(2025);

    let a = detailed.score(SAMPLE_RESUME, SAMPLE_JOB_DESCRIPTION);
    let b = compact.score(SAMPLE_RESUME, SAMPLE_JOB_DESCRIPTION);

    assert!((0.0..=100.0).contains(&a.total_score));
    assert!((0.0..=100.0).contains(&b.total_score));
    assert_eq!(b.total_score, b.total_score.trunc());
    assert!(a.component_scores.keyword_match > 0.0);
}

#[test]
fn test_keyword_modes() {
    let normalizer = TextNormalizer::new().unwrap();
    let extractor = KeywordExtractor::new().unwrap();
    let job = "Python is required. We have a friendly office cat.";

    let required = extractor.key_terms(&normalizer, job, KeywordMode::RequiredTerms);
    assert!(required.contains("python"));
    assert!(!required.contains("cat"));
    assert!(!required.contains("office"));

    let vocabulary = extractor.key_terms(&normalizer, job, KeywordMode::Vocabulary);
    assert!(vocabulary.contains("python"));
    assert!(vocabulary.contains("office"));
}

#[test]
fn test_extract_years_examples() {
    let analyzer = ExperienceAnalyzer::new().unwrap();

    assert_eq!(analyzer.extract_years("5+ years of experience"), 5);
    assert_eq!(analyzer.extract_years("Experience: 7 years"), 7);
    assert_eq!(analyzer.extract_years("no numbers here"), 0);
    assert_eq!(analyzer.total_years_from_ranges("Acme 2018 - 2021\nGlobex 2021 - present", 2025), 7);
}

#[test]
fn test_detect_sections_education() {
    let sections = SectionDetector::new().detect_sections("EDUCATION\nBS Computer Science, 2020");

    assert_eq!(sections.get(SectionType::Education), Some("BS Computer Science, 2020"));
    assert_eq!(sections.len(), 1);
}

#[test]
fn test_report_pipeline_renders_every_format() {
    let engine = engine();
    let report = ReportAssembler::new(200, true)
        .assemble(&engine, SAMPLE_RESUME, SAMPLE_JOB_DESCRIPTION)
        .with_sources("resume.txt", "job.txt")
        .with_format_recommendations(FileType::Text.format_recommendations());

    assert!(report.optimization.is_some());
    assert_eq!(report.passed(), report.result.total_score >= 70.0);

    let generator = ReportGenerator::with_options(false, true, true, true);

    let json = generator.generate_report(&report, OutputFormat::Json).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["metadata"]["resume_file"], "resume.txt");
    assert!(value["result"]["total_score"].is_number());

    let markdown = generator.generate_report(&report, OutputFormat::Markdown).unwrap();
    assert!(markdown.contains("resume.txt"));

    let console = generator.generate_report(&report, OutputFormat::Console).unwrap();
    assert!(!console.is_empty());
}

#[test]
fn test_shared_cache_across_threads() {
    let engine = Arc::new(engine());
    let cache = Arc::new(ScoreCache::with_capacity(16));

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let engine = Arc::clone(&engine);
            let cache = Arc::clone(&cache);
            std::thread::spawn(move || cache.get_or_score(&engine, RESUME, JOB))
        })
        .collect();

    let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert!(results.windows(2).all(|w| w[0].timestamp == w[1].timestamp));
    assert_eq!(cache.len(), 1);
}

#[test]
fn test_cache_keeps_profiles_apart() {
    let detailed = AtsEngine::with_profile(ScoringProfile::detailed()).unwrap().with_reference_year(2025);
    let compact = AtsEngine::with_profile(ScoringProfile::compact()).unwrap().with_reference_year(2025);
    let cache = ScoreCache::new();

    let first = cache.get_or_score(&detailed, SAMPLE_RESUME, SAMPLE_JOB_DESCRIPTION);
    let second = cache.get_or_score(&compact, SAMPLE_RESUME, SAMPLE_JOB_DESCRIPTION);

    assert_eq!(first.total_score, detailed.score(SAMPLE_RESUME, SAMPLE_JOB_DESCRIPTION).total_score);
    assert_eq!(second.total_score, compact.score(SAMPLE_RESUME, SAMPLE_JOB_DESCRIPTION).total_score);
    assert_eq!(cache.len(), 2);
}
