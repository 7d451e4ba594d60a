//! ats-scorer: rule-based resume and job description compatibility scoring

use anyhow::{anyhow, Context, Result};
use ats_scorer::cli::{self, Cli, Commands, ConfigAction};
use ats_scorer::config::{Config, OutputFormat};
use ats_scorer::input::{FileType, InputManager};
use ats_scorer::output::formatter::{save_report_to_file, suggest_filename};
use ats_scorer::output::{BatchEntry, BatchSummary, ReportAssembler, ReportGenerator};
use ats_scorer::processing::{AtsEngine, Industry, ScoreCache, ScoringProfile};
use ats_scorer::sample::{SAMPLE_JOB_DESCRIPTION, SAMPLE_RESUME};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, error, info, warn};
use std::path::{Path, PathBuf};
use std::process;
use std::sync::Arc;

const RESUME_EXTENSIONS: &[&str] = &["pdf", "txt", "md", "markdown"];
const JOB_EXTENSIONS: &[&str] = &["txt", "md", "markdown"];

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let config_path = cli.config.clone().unwrap_or_else(Config::config_path);
    let config = match Config::load_from(&config_path) {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration from {}: {}", config_path.display(), e);
            process::exit(1);
        }
    };

    if let Err(e) = run_command(cli.command, config, &config_path).await {
        error!("Command failed: {:#}", e);
        process::exit(1);
    }
}

async fn run_command(command: Commands, config: Config, config_path: &Path) -> Result<()> {
    match command {
        Commands::Score {
            resume,
            job,
            profile,
            output,
            save,
            industry,
            optimize,
            detailed,
        } => {
            cli::validate_file_extension(&resume, RESUME_EXTENSIONS)
                .map_err(|e| anyhow!("Resume file: {}", e))?;
            cli::validate_file_extension(&job, JOB_EXTENSIONS)
                .map_err(|e| anyhow!("Job description file: {}", e))?;
            let format = resolve_format(output.as_deref(), &config)?;
            let industry = resolve_industry(industry.as_deref(), &config)?;

            let engine = build_engine(&config, profile.as_deref())?;
            let mut input_manager = InputManager::new().with_cache(config.processing.enable_caching);

            let resume_doc = input_manager
                .load(&resume)
                .await
                .with_context(|| format!("reading resume {}", resume.display()))?;
            let job_text = input_manager
                .extract_text(&job)
                .await
                .with_context(|| format!("reading job description {}", job.display()))?;
            debug!(
                "Resume: {} characters, job description: {} characters",
                resume_doc.text.len(),
                job_text.len()
            );

            info!("Scoring {} with profile '{}'", resume.display(), engine.profile().name);
            let assembler = ReportAssembler::new(
                config.processing.excerpt_chars,
                optimize || config.output.include_optimization,
            )
            .with_industry(industry);
            let report = assembler
                .assemble(&engine, &resume_doc.text, &job_text)
                .with_sources(resume.display().to_string(), job.display().to_string())
                .with_format_recommendations(resume_doc.file_type.format_recommendations());

            let generator = ReportGenerator::with_options(
                config.output.color_output && save.is_none(),
                detailed || config.output.detailed,
                true,
                true,
            );
            let content = generator.generate_report(&report, format)?;

            match save {
                Some(path) => {
                    let path = if path.is_dir() {
                        path.join(suggest_filename(format, &resume.to_string_lossy(), true))
                    } else {
                        path
                    };
                    save_report_to_file(&content, &path)?;
                    println!("Report saved to {}", path.display());
                }
                None => println!("{}", content),
            }
        }

        Commands::Batch {
            job,
            resumes,
            profile,
            output,
        } => {
            cli::validate_file_extension(&job, JOB_EXTENSIONS)
                .map_err(|e| anyhow!("Job description file: {}", e))?;
            let format = resolve_format(output.as_deref(), &config)?;

            let engine = Arc::new(build_engine(&config, profile.as_deref())?);
            let cache = config
                .processing
                .enable_caching
                .then(|| Arc::new(ScoreCache::with_capacity(config.processing.cache_capacity)));

            let mut input_manager = InputManager::new().with_cache(config.processing.enable_caching);
            let job_text: Arc<str> = input_manager
                .extract_text(&job)
                .await
                .with_context(|| format!("reading job description {}", job.display()))?
                .into();

            let entries = score_batch(&mut input_manager, Arc::clone(&engine), cache, job_text, &resumes).await;
            let summary = BatchSummary::new(job.display().to_string(), engine.profile().name.clone(), entries);

            let generator = ReportGenerator::with_options(config.output.color_output, config.output.detailed, true, true);
            println!("{}", generator.generate_batch(&summary, format)?);
        }

        Commands::AnalyzeJob { job, json } => {
            cli::validate_file_extension(&job, JOB_EXTENSIONS)
                .map_err(|e| anyhow!("Job description file: {}", e))?;

            let engine = build_engine(&config, None)?;
            let job_text = InputManager::new()
                .extract_text(&job)
                .await
                .with_context(|| format!("reading job description {}", job.display()))?;

            let requirements = engine.analyze_job(&job_text);
            let format = if json { OutputFormat::Json } else { OutputFormat::Console };
            let generator = ReportGenerator::with_options(config.output.color_output, config.output.detailed, true, true);
            println!("{}", generator.generate_job_requirements(&requirements, format)?);
        }

        Commands::Sample { output, industry } => {
            let format = resolve_format(output.as_deref(), &config)?;
            let industry = resolve_industry(industry.as_deref(), &config)?;
            let engine = build_engine(&config, None)?;

            println!("Sample resume:\n{}\n", truncate_text(SAMPLE_RESUME, 300));
            let report = ReportAssembler::new(config.processing.excerpt_chars, true)
                .with_industry(industry)
                .assemble(&engine, SAMPLE_RESUME, SAMPLE_JOB_DESCRIPTION)
                .with_format_recommendations(FileType::Text.format_recommendations());

            let generator = ReportGenerator::with_options(config.output.color_output, config.output.detailed, true, true);
            println!("{}", generator.generate_report(&report, format)?);
        }

        Commands::Config { action } => match action {
            Some(ConfigAction::Show) | None => {
                println!("Configuration ({})\n", config_path.display());
                println!("{}", toml::to_string_pretty(&config)?);
                match config.scoring_profile() {
                    Ok(profile) => {
                        let w = profile.weights;
                        println!(
                            "Effective weights: keyword {:.0}%, completeness {:.0}%, format {:.0}%, experience {:.0}%",
                            w.keyword_match * 100.0,
                            w.completeness * 100.0,
                            w.format * 100.0,
                            w.experience_match * 100.0
                        );
                    }
                    Err(e) => warn!("Current scoring configuration is invalid: {}", e),
                }
            }

            Some(ConfigAction::Reset) => {
                Config::default().save_to(config_path)?;
                println!("Configuration reset to defaults");
            }

            Some(ConfigAction::Set { key, value }) => {
                let mut config = config;
                config.set_value(&key, &value)?;
                if let Err(e) = config.scoring_profile() {
                    warn!("Saved, but scoring will fail until fixed: {}", e);
                }
                config.save_to(config_path)?;
                println!("Set {} = {}", key, value);
            }

            Some(ConfigAction::Path) => println!("{}", config_path.display()),
        },
    }

    Ok(())
}

/// Score every resume on Tokio's blocking pool, sharing one engine and cache.
async fn score_batch(
    input_manager: &mut InputManager,
    engine: Arc<AtsEngine>,
    cache: Option<Arc<ScoreCache>>,
    job_text: Arc<str>,
    resumes: &[PathBuf],
) -> Vec<BatchEntry> {
    let progress = ProgressBar::new(resumes.len() as u64);
    progress.set_style(
        ProgressStyle::with_template("{spinner} [{bar:30}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=> "),
    );

    let mut entries = Vec::with_capacity(resumes.len());
    let mut tasks = Vec::new();

    for path in resumes {
        let label = path.display().to_string();
        if let Err(e) = cli::validate_file_extension(path, RESUME_EXTENSIONS) {
            entries.push(BatchEntry::failed(label, e));
            progress.inc(1);
            continue;
        }

        match input_manager.extract_text(path).await {
            Ok(text) => {
                let engine = Arc::clone(&engine);
                let cache = cache.clone();
                let job_text = Arc::clone(&job_text);
                tasks.push((
                    label.clone(),
                    tokio::task::spawn_blocking(move || {
                        let result = match &cache {
                            Some(cache) => cache.get_or_score(&engine, &text, &job_text),
                            None => engine.score(&text, &job_text),
                        };
                        BatchEntry::scored(label, &result)
                    }),
                ));
            }
            Err(e) => {
                warn!("Skipping {}: {}", label, e);
                entries.push(BatchEntry::failed(label, e));
                progress.inc(1);
            }
        }
    }

    for (label, task) in tasks {
        progress.set_message(label.clone());
        match task.await {
            Ok(entry) => entries.push(entry),
            Err(e) => entries.push(BatchEntry::failed(label, e)),
        }
        progress.inc(1);
    }

    progress.finish_and_clear();
    entries
}

fn build_engine(config: &Config, profile_override: Option<&str>) -> Result<AtsEngine> {
    let profile = match profile_override {
        Some(name) => ScoringProfile::by_name(name)?,
        None => config.scoring_profile().context("invalid scoring configuration")?,
    };

    let engine = AtsEngine::with_profile(profile)?;
    Ok(match config.processing.reference_year {
        Some(year) => engine.with_reference_year(year),
        None => engine,
    })
}

fn resolve_format(requested: Option<&str>, config: &Config) -> Result<OutputFormat> {
    match requested {
        Some(format) => cli::parse_output_format(format).map_err(|e| anyhow!(e)),
        None => Ok(config.output.format),
    }
}

fn resolve_industry(requested: Option<&str>, config: &Config) -> Result<Industry> {
    match requested {
        Some(name) => Ok(name.parse::<Industry>()?),
        None => Ok(config.scoring.industry),
    }
}

/// Truncate text to at most `max_chars` characters, cutting at a word boundary
fn truncate_text(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        None => text.to_string(),
        Some((cut, _)) => {
            let truncated = &text[..cut];
            let end = truncated.rfind(char::is_whitespace).unwrap_or(cut);
            format!("{}...", &text[..end])
        }
    }
}
