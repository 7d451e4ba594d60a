//! Output formatters: colored console, JSON and Markdown

use crate::config::OutputFormat;
use crate::error::Result;
use crate::output::report::{BatchSummary, ReportStatus, ScoreReport};
use crate::processing::competitiveness::{Competitiveness, MarketPosition};
use crate::processing::job_analysis::JobRequirements;
use crate::processing::optimizer::OptimizationSuggestions;
use colored::{Color, Colorize};
use std::path::Path;

/// Trait for formatting score reports
pub trait OutputFormatter {
    fn format_report(&self, report: &ScoreReport) -> Result<String>;
    fn format_batch(&self, summary: &BatchSummary) -> Result<String>;
    fn supports_format(&self) -> OutputFormat;
}

/// Console formatter with colors
pub struct ConsoleFormatter {
    use_colors: bool,
    detailed: bool,
}

/// JSON formatter for structured output
pub struct JsonFormatter {
    pretty: bool,
}

/// Markdown formatter for saved reports
pub struct MarkdownFormatter {
    include_metadata: bool,
}

/// Report generator that coordinates the formatters
pub struct ReportGenerator {
    console_formatter: ConsoleFormatter,
    json_formatter: JsonFormatter,
    markdown_formatter: MarkdownFormatter,
}

impl ConsoleFormatter {
    pub fn new(use_colors: bool, detailed: bool) -> Self {
        Self { use_colors, detailed }
    }

    fn colorize(&self, text: &str, color: Color) -> String {
        if self.use_colors {
            text.color(color).to_string()
        } else {
            text.to_string()
        }
    }

    fn format_header(&self, title: &str, level: u8) -> String {
        let prefix = match level {
            1 => "█",
            2 => "▓",
            _ => "▒",
        };

        let color = match level {
            1 => Color::Blue,
            2 => Color::Green,
            _ => Color::Yellow,
        };

        if self.use_colors {
            format!("\n{} {}\n", prefix.color(color).bold(), title.color(color).bold())
        } else {
            format!("\n{} {}\n", prefix, title)
        }
    }

    fn format_score_badge(&self, score: f64) -> String {
        let (badge, color) = match score as u32 {
            90..=100 => ("EXCELLENT", Color::Green),
            80..=89 => ("VERY GOOD", Color::BrightGreen),
            70..=79 => ("GOOD", Color::Yellow),
            60..=69 => ("FAIR", Color::BrightYellow),
            50..=59 => ("BELOW AVG", Color::Red),
            _ => ("POOR", Color::BrightRed),
        };

        if self.use_colors {
            format!("[{}]", badge.color(color).bold())
        } else {
            format!("[{}]", badge)
        }
    }

    fn format_status(&self, status: ReportStatus) -> String {
        match status {
            ReportStatus::Pass => self.colorize("PASS", Color::Green),
            ReportStatus::NeedsImprovement => self.colorize("NEEDS IMPROVEMENT", Color::Yellow),
        }
    }

    fn format_bar(value: f64) -> String {
        let filled = (value.clamp(0.0, 100.0) / 10.0).round() as usize;
        format!("{}{}", "■".repeat(filled), "·".repeat(10 - filled))
    }

    fn format_market_position(&self, position: MarketPosition) -> String {
        let color = match position {
            MarketPosition::HighlyCompetitive => Color::Green,
            MarketPosition::Competitive => Color::BrightGreen,
            MarketPosition::ModeratelyCompetitive => Color::Yellow,
            MarketPosition::NeedsImprovement => Color::Red,
        };
        self.colorize(&position.to_string(), color)
    }

    fn format_competitiveness(&self, output: &mut String, competitiveness: &Competitiveness) {
        output.push_str(&self.format_header("Competitiveness", 2));
        output.push_str(&format!(
            "Industry: {} | Score: {:.1}/100 | Position: {} ({})
",
            competitiveness.industry,
            competitiveness.score,
            self.format_market_position(competitiveness.market_position),
            competitiveness.percentile
        ));

        if self.detailed {
            let c = &competitiveness.component_scores;
            for (name, value) in [
                ("technical skills", c.technical_skills),
                ("achievements", c.achievements),
                ("experience", c.experience),
                ("education", c.education),
            ] {
                output.push_str(&format!("  {:<18} {} {:>6.1}
", name, Self::format_bar(value), value));
            }
        }
    }

    fn format_optimization(&self, output: &mut String, optimization: &OptimizationSuggestions) {
        output.push_str(&self.format_header("Optimization", 2));
        output.push_str(&format!(
            "Current score: {:.1} | Potential score: {}\n",
            optimization.current_score,
            self.colorize(&format!("{:.1}", optimization.potential_score), Color::Green)
        ));

        if !optimization.missing_skills.is_empty() {
            output.push_str(&format!("Missing skills: {}\n", optimization.missing_skills.join(", ")));
        }
        if !optimization.missing_keywords.is_empty() {
            output.push_str(&format!("Missing keywords: {}\n", optimization.missing_keywords.join(", ")));
        }
        for near_miss in &optimization.near_misses {
            output.push_str(&format!(
                "  Did you mean {} instead of {}? ({:.0}% similar)\n",
                self.colorize(&near_miss.skill, Color::Cyan),
                near_miss.resume_term,
                near_miss.similarity * 100.0
            ));
        }
        if !optimization.priority_improvements.is_empty() {
            output.push_str(&self.format_header("Priority Improvements", 3));
            for (i, improvement) in optimization.priority_improvements.iter().enumerate() {
                output.push_str(&format!("  {}. {}\n", i + 1, improvement));
            }
        }
        if self.detailed {
            output.push_str(&self.format_header("Formatting Tips", 3));
            for tip in &optimization.formatting_tips {
                output.push_str(&format!("  • {}\n", tip));
            }
        }
    }

    pub fn format_job_requirements(&self, requirements: &JobRequirements) -> String {
        let mut output = String::new();

        output.push_str(&self.format_header("JOB REQUIREMENTS", 1));
        output.push_str(&format!("Required experience: {} years\n", requirements.required_years));
        output.push_str(&format!(
            "Education: {}\n",
            requirements
                .education_level
                .map(|level| level.to_string())
                .unwrap_or_else(|| "not specified".to_string())
        ));

        let technical: Vec<&str> = requirements.key_skills.technical.iter().map(String::as_str).collect();
        let soft: Vec<&str> = requirements.key_skills.soft.iter().map(String::as_str).collect();
        if !technical.is_empty() {
            output.push_str(&format!("Technical skills: {}\n", self.colorize(&technical.join(", "), Color::Cyan)));
        }
        if !soft.is_empty() {
            output.push_str(&format!("Soft skills: {}\n", soft.join(", ")));
        }
        if !requirements.top_terms.is_empty() {
            output.push_str(&format!("Top terms: {}\n", requirements.top_terms.join(", ")));
        }
        if self.detailed && !requirements.required_terms.is_empty() {
            let terms: Vec<&str> = requirements.required_terms.iter().map(String::as_str).collect();
            output.push_str(&format!("Requirement terms: {}\n", terms.join(", ")));
        }

        output
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format_report(&self, report: &ScoreReport) -> Result<String> {
        let mut output = String::new();
        let result = &report.result;

        output.push_str(&self.format_header("ATS COMPATIBILITY REPORT", 1));
        output.push_str(&format!(
            "Generated: {} | Profile: {} | Processing time: {}ms\n",
            result.timestamp.format("%Y-%m-%d %H:%M:%S UTC"),
            report.profile,
            report.metadata.processing_time_ms
        ));

        output.push_str(&self.format_header("Summary", 2));
        output.push_str(&format!(
            "Overall Score: {:.1}/100 {}\n",
            result.total_score,
            self.format_score_badge(result.total_score)
        ));
        output.push_str(&format!("Status: {}\n", self.format_status(report.summary.status)));
        output.push_str(&format!("Verdict: {}\n", self.colorize(&report.summary.verdict, Color::Cyan)));
        output.push_str(&format!(
            "Readability: {} | Words: {}\n",
            report.summary.readability, report.resume_word_count
        ));

        output.push_str(&self.format_header("Score Breakdown", 3));
        for (name, value) in result.component_scores.as_array() {
            output.push_str(&format!("  {:<18} {} {:>6.1}\n", name.replace('_', " "), Self::format_bar(value), value));
        }

        output.push_str(&self.format_header("Feedback", 2));
        for item in &result.feedback {
            output.push_str(&format!("  • {}\n", self.colorize(item, Color::Yellow)));
        }

        self.format_competitiveness(&mut output, &report.competitiveness);

        output.push_str(&self.format_header("Recommendations", 2));
        for (label, items) in [
            ("Immediate", &report.recommendations.immediate),
            ("Strategic", &report.recommendations.strategic),
            ("Formatting", &report.recommendations.formatting),
        ] {
            if items.is_empty() {
                continue;
            }
            output.push_str(&format!("{}:
", self.colorize(label, Color::Cyan)));
            for item in items {
                output.push_str(&format!("  • {}
", item));
            }
        }

        if self.detailed {
            output.push_str(&self.format_header("Keywords", 3));
            output.push_str(&format!(
                "Matched ({}): {}\n",
                report.matched_keywords.len(),
                self.colorize(&report.matched_keywords.join(", "), Color::Green)
            ));
            output.push_str(&format!(
                "Missing ({}): {}\n",
                report.missing_keywords.len(),
                self.colorize(&report.missing_keywords.join(", "), Color::Red)
            ));

            let sections: Vec<&str> = report.sections_found.iter().map(|s| s.as_str()).collect();
            output.push_str(&format!("Sections found: {}\n", sections.join(", ")));

            if !report.summary.strengths.is_empty() {
                output.push_str(&self.format_header("Strengths", 3));
                for strength in &report.summary.strengths {
                    output.push_str(&format!("  • {}\n", self.colorize(strength, Color::Green)));
                }
            }
            if !report.summary.improvement_areas.is_empty() {
                output.push_str(&self.format_header("Improvement Areas", 3));
                for area in &report.summary.improvement_areas {
                    output.push_str(&format!("  • {}\n", self.colorize(area, Color::Yellow)));
                }
            }
            if !report.metadata.format_recommendations.is_empty() {
                output.push_str(&self.format_header("File Format", 3));
                for tip in &report.metadata.format_recommendations {
                    output.push_str(&format!("  • {}\n", tip));
                }
            }

            output.push_str(&format!(
                "\nJob description: {}\n",
                self.colorize(&report.job_description_excerpt, Color::BrightBlack)
            ));
        }

        if let Some(optimization) = &report.optimization {
            self.format_optimization(&mut output, optimization);
        }

        output.push_str(&format!(
            "\n{} Generated by ats-scorer v{}\n",
            self.colorize("ℹ", Color::Blue),
            report.metadata.scorer_version
        ));

        Ok(output)
    }

    fn format_batch(&self, summary: &BatchSummary) -> Result<String> {
        let mut output = String::new();

        output.push_str(&self.format_header("BATCH RESULTS", 1));
        output.push_str(&format!(
            "Job: {} | Profile: {} | Passed: {}/{}\n\n",
            summary.job_file,
            summary.profile,
            summary.passed(),
            summary.entries.len()
        ));

        for (rank, entry) in summary.entries.iter().enumerate() {
            match &entry.error {
                Some(error) => output.push_str(&format!(
                    "{:>3}. {:<40} {}\n",
                    rank + 1,
                    entry.file,
                    self.colorize(&format!("error: {}", error), Color::Red)
                )),
                None => {
                    output.push_str(&format!(
                        "{:>3}. {:<40} {:>6.1} {} {}\n",
                        rank + 1,
                        entry.file,
                        entry.total_score,
                        self.format_score_badge(entry.total_score),
                        self.format_status(entry.status)
                    ));
                    if self.detailed {
                        if let Some(feedback) = &entry.top_feedback {
                            output.push_str(&format!("       {}\n", self.colorize(feedback, Color::BrightBlack)));
                        }
                    }
                }
            }
        }

        Ok(output)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Console
    }
}

impl JsonFormatter {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }

    fn to_json<T: serde::Serialize>(&self, value: &T) -> Result<String> {
        if self.pretty {
            Ok(serde_json::to_string_pretty(value)?)
        } else {
            Ok(serde_json::to_string(value)?)
        }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_report(&self, report: &ScoreReport) -> Result<String> {
        self.to_json(report)
    }

    fn format_batch(&self, summary: &BatchSummary) -> Result<String> {
        self.to_json(summary)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Json
    }
}

impl MarkdownFormatter {
    pub fn new(include_metadata: bool) -> Self {
        Self { include_metadata }
    }

    fn markdown_score_badge(score: f64) -> &'static str {
        match score as u32 {
            90..=100 => "🟢 Excellent",
            80..=89 => "🟢 Very Good",
            70..=79 => "🟡 Good",
            60..=69 => "🟡 Fair",
            50..=59 => "🟠 Below Average",
            _ => "🔴 Poor",
        }
    }

    fn file_label(path: &Option<String>) -> String {
        path.as_deref()
            .map(|p| {
                Path::new(p)
                    .file_name()
                    .map(|name| name.to_string_lossy().to_string())
                    .unwrap_or_else(|| p.to_string())
            })
            .unwrap_or_else(|| "-".to_string())
    }
}

impl OutputFormatter for MarkdownFormatter {
    fn format_report(&self, report: &ScoreReport) -> Result<String> {
        let mut output = String::new();
        let result = &report.result;

        output.push_str("# ATS Compatibility Report\n\n");

        if self.include_metadata {
            output.push_str(&format!(
                "**Generated:** {} | **Profile:** {} | **Processing Time:** {}ms\n",
                result.timestamp.format("%Y-%m-%d %H:%M:%S UTC"),
                report.profile,
                report.metadata.processing_time_ms
            ));
            output.push_str(&format!(
                "**Resume:** `{}` | **Job:** `{}`\n\n",
                Self::file_label(&report.metadata.resume_file),
                Self::file_label(&report.metadata.job_file)
            ));
        }

        output.push_str("## Summary\n\n");
        output.push_str(&format!(
            "**Overall Score:** {:.1}/100 {}\n\n",
            result.total_score,
            Self::markdown_score_badge(result.total_score)
        ));
        output.push_str(&format!("**Status:** {}\n\n", report.summary.status));
        output.push_str(&format!("**Verdict:** {}\n\n", report.summary.verdict));
        output.push_str(&format!("**Readability:** {}\n\n", report.summary.readability));
        output.push_str(&format!(
            "**Market Position:** {} ({})\n\n",
            report.summary.market_position, report.competitiveness.percentile
        ));

        output.push_str("### Score Breakdown\n\n");
        output.push_str("| Component | Score |\n");
        output.push_str("|-----------|-------|\n");
        for (name, value) in result.component_scores.as_array() {
            output.push_str(&format!("| {} | {:.1} |\n", name.replace('_', " "), value));
        }
        output.push('\n');

        output.push_str("## Feedback\n\n");
        for item in &result.feedback {
            output.push_str(&format!("- {}\n", item));
        }
        output.push('\n');

        let competitiveness = &report.competitiveness;
        output.push_str("## Competitiveness\n\n");
        output.push_str(&format!(
            "**Industry:** {} | **Score:** {:.1}/100\n\n",
            competitiveness.industry, competitiveness.score
        ));
        output.push_str("| Factor | Score |\n");
        output.push_str("|--------|-------|\n");
        let c = &competitiveness.component_scores;
        output.push_str(&format!("| technical skills | {:.1} |\n", c.technical_skills));
        output.push_str(&format!("| achievements | {:.1} |\n", c.achievements));
        output.push_str(&format!("| experience | {:.1} |\n", c.experience));
        output.push_str(&format!("| education | {:.1} |\n\n", c.education));

        output.push_str("## Recommendations\n\n");
        for (label, items) in [
            ("Immediate", &report.recommendations.immediate),
            ("Strategic", &report.recommendations.strategic),
            ("Formatting", &report.recommendations.formatting),
        ] {
            if items.is_empty() {
                continue;
            }
            output.push_str(&format!("### {}\n\n", label));
            for item in items {
                output.push_str(&format!("- {}\n", item));
            }
            output.push('\n');
        }

        output.push_str("## Keywords\n\n");
        output.push_str(&format!("**Matched:** {}\n\n", report.matched_keywords.join(", ")));
        output.push_str(&format!("**Missing:** {}\n\n", report.missing_keywords.join(", ")));

        if let Some(optimization) = &report.optimization {
            output.push_str("## Optimization\n\n");
            output.push_str(&format!(
                "Potential score: **{:.1}** (currently {:.1})\n\n",
                optimization.potential_score, optimization.current_score
            ));
            if !optimization.missing_skills.is_empty() {
                output.push_str(&format!("**Missing skills:** {}\n\n", optimization.missing_skills.join(", ")));
            }
            for near_miss in &optimization.near_misses {
                output.push_str(&format!(
                    "- `{}` looks like a misspelling of `{}`\n",
                    near_miss.resume_term, near_miss.skill
                ));
            }
            if !optimization.priority_improvements.is_empty() {
                output.push_str("\n### Priority Improvements\n\n");
                for (i, improvement) in optimization.priority_improvements.iter().enumerate() {
                    output.push_str(&format!("{}. {}\n", i + 1, improvement));
                }
            }
            output.push_str("\n### Formatting Tips\n\n");
            for tip in &optimization.formatting_tips {
                output.push_str(&format!("- {}\n", tip));
            }
            output.push('\n');
        }

        output.push_str("---\n\n");
        output.push_str(&format!("> {}\n", report.job_description_excerpt));

        Ok(output)
    }

    fn format_batch(&self, summary: &BatchSummary) -> Result<String> {
        let mut output = String::new();

        output.push_str("# Batch ATS Results\n\n");
        output.push_str(&format!(
            "**Job:** `{}` | **Profile:** {} | **Passed:** {}/{}\n\n",
            summary.job_file,
            summary.profile,
            summary.passed(),
            summary.entries.len()
        ));
        output.push_str("| Rank | Resume | Score | Status |\n");
        output.push_str("|------|--------|-------|--------|\n");
        for (rank, entry) in summary.entries.iter().enumerate() {
            let status = match &entry.error {
                Some(error) => format!("Error: {}", error),
                None => entry.status.to_string(),
            };
            output.push_str(&format!(
                "| {} | {} | {:.1} | {} |\n",
                rank + 1,
                entry.file,
                entry.total_score,
                status
            ));
        }

        Ok(output)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Markdown
    }
}

impl ReportGenerator {
    pub fn new() -> Self {
        Self {
            console_formatter: ConsoleFormatter::new(true, false),
            json_formatter: JsonFormatter::new(true),
            markdown_formatter: MarkdownFormatter::new(true),
        }
    }

    pub fn with_options(use_colors: bool, detailed: bool, pretty_json: bool, include_metadata: bool) -> Self {
        Self {
            console_formatter: ConsoleFormatter::new(use_colors, detailed),
            json_formatter: JsonFormatter::new(pretty_json),
            markdown_formatter: MarkdownFormatter::new(include_metadata),
        }
    }

    fn formatter(&self, format: OutputFormat) -> &dyn OutputFormatter {
        match format {
            OutputFormat::Console => &self.console_formatter,
            OutputFormat::Json => &self.json_formatter,
            OutputFormat::Markdown => &self.markdown_formatter,
        }
    }

    pub fn generate_report(&self, report: &ScoreReport, format: OutputFormat) -> Result<String> {
        self.formatter(format).format_report(report)
    }

    pub fn generate_batch(&self, summary: &BatchSummary, format: OutputFormat) -> Result<String> {
        self.formatter(format).format_batch(summary)
    }

    pub fn generate_job_requirements(&self, requirements: &JobRequirements, format: OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(requirements)?),
            _ => Ok(self.console_formatter.format_job_requirements(requirements)),
        }
    }
}

impl Default for ReportGenerator {
    fn default() -> Self {
        Self::new()
    }
}

pub fn save_report_to_file(content: &str, file_path: &Path) -> Result<()> {
    if let Some(parent) = file_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(file_path, content)?;
    Ok(())
}

pub fn suggest_filename(format: OutputFormat, resume_name: &str, timestamp: bool) -> String {
    let base_name = Path::new(resume_name)
        .file_stem()
        .unwrap_or_default()
        .to_string_lossy();

    let timestamp_suffix = if timestamp {
        format!("_{}", chrono::Utc::now().format("%Y%m%d_%H%M%S"))
    } else {
        String::new()
    };

    match format {
        OutputFormat::Console => format!("{}_ats{}.txt", base_name, timestamp_suffix),
        OutputFormat::Json => format!("{}_ats{}.json", base_name, timestamp_suffix),
        OutputFormat::Markdown => format!("{}_ats{}.md", base_name, timestamp_suffix),
    }
}
