//! CLI interface for the ATS scorer

use crate::config::OutputFormat;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "ats-scorer")]
#[command(about = "Rule-based ATS compatibility scoring for resumes")]
#[command(long_about = "Score a resume against a job description using keyword overlap, section completeness, formatting and experience signals")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Score a resume against a job description
    Score {
        /// Path to resume file (PDF, TXT, MD)
        #[arg(short, long)]
        resume: PathBuf,

        /// Path to job description file (TXT, MD)
        #[arg(short, long)]
        job: PathBuf,

        /// Scoring profile: detailed, compact
        #[arg(short, long)]
        profile: Option<String>,

        /// Output format: console, json, markdown
        #[arg(short, long)]
        output: Option<String>,

        /// Save output to file
        #[arg(short, long)]
        save: Option<PathBuf>,

        /// Industry for the competitiveness assessment: tech, finance, marketing
        #[arg(short, long)]
        industry: Option<String>,

        /// Include optimization suggestions
        #[arg(long)]
        optimize: bool,

        /// Output detailed analysis
        #[arg(short, long)]
        detailed: bool,
    },

    /// Score several resumes against one job description
    Batch {
        /// Path to job description file (TXT, MD)
        #[arg(short, long)]
        job: PathBuf,

        /// Resume files to score
        #[arg(required = true)]
        resumes: Vec<PathBuf>,

        /// Scoring profile: detailed, compact
        #[arg(short, long)]
        profile: Option<String>,

        /// Output format: console, json, markdown
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Extract structured requirements from a job description
    AnalyzeJob {
        /// Path to job description file (TXT, MD)
        #[arg(short, long)]
        job: PathBuf,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Score the built-in sample resume and job description
    Sample {
        /// Output format: console, json, markdown
        #[arg(short, long)]
        output: Option<String>,

        /// Industry for the competitiveness assessment: tech, finance, marketing
        #[arg(short, long)]
        industry: Option<String>,
    },

    /// Show or change configuration
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Reset configuration to defaults
    Reset,

    /// Set a configuration value
    Set {
        /// Configuration key (e.g., "scoring.profile", "output.format")
        key: String,

        /// Configuration value
        value: String,
    },

    /// Print the configuration file location
    Path,
}

/// Parse and validate output format
pub fn parse_output_format(format: &str) -> Result<OutputFormat, String> {
    format.parse().map_err(|e: crate::error::AtsError| e.to_string())
}

/// Validate file extension
pub fn validate_file_extension(path: &Path, allowed_extensions: &[&str]) -> Result<(), String> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) => {
            if allowed_extensions.contains(&ext.to_lowercase().as_str()) {
                Ok(())
            } else {
                Err(format!(
                    "Unsupported file extension: .{}. Allowed: {}",
                    ext,
                    allowed_extensions.join(", ")
                ))
            }
        }
        None => Err("File has no extension".to_string()),
    }
}
