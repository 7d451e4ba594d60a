//! Configuration management for the ATS scorer

use crate::error::{AtsError, Result};
use crate::processing::competitiveness::Industry;
use crate::processing::profile::{ComponentWeights, ScoringProfile};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    pub scoring: ScoringConfig,
    pub processing: ProcessingConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringConfig {
    /// Built-in profile name: "detailed" or "compact"
    pub profile: String,
    /// Industry used for the competitiveness assessment
    #[serde(default)]
    pub industry: Industry,
    /// Replaces the profile's component weights when present
    pub weights: Option<ComponentWeights>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessingConfig {
    pub enable_caching: bool,
    pub cache_capacity: u64,
    pub excerpt_chars: usize,
    /// Year that "present" resolves to; the current year when unset
    pub reference_year: Option<i32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub detailed: bool,
    pub include_optimization: bool,
    pub color_output: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Console,
    Json,
    Markdown,
}

impl FromStr for OutputFormat {
    type Err = AtsError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "console" => Ok(OutputFormat::Console),
            "json" => Ok(OutputFormat::Json),
            "markdown" | "md" => Ok(OutputFormat::Markdown),
            _ => Err(AtsError::Configuration(format!(
                "Invalid output format: {}. Supported: console, json, markdown",
                s
            ))),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Console => write!(f, "console"),
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Markdown => write!(f, "markdown"),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            scoring: ScoringConfig {
                profile: "detailed".to_string(),
                industry: Industry::Tech,
                weights: None,
            },
            processing: ProcessingConfig {
                enable_caching: true,
                cache_capacity: 1_000,
                excerpt_chars: 500,
                reference_year: None,
            },
            output: OutputConfig {
                format: OutputFormat::Console,
                detailed: false,
                include_optimization: false,
                color_output: true,
            },
        }
    }
}

impl Config {
    /// Load from the default location, writing defaults there on first use.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path())
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: Config = toml::from_str(&content)?;
            Ok(config)
        } else {
            let config = Self::default();
            config.save_to(path)?;
            Ok(config)
        }
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path())
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
            .join("ats-scorer")
            .join("config.toml")
    }

    /// The configured profile with any weight override applied, validated.
    pub fn scoring_profile(&self) -> Result<ScoringProfile> {
        let mut profile = ScoringProfile::by_name(&self.scoring.profile)?;
        if let Some(weights) = self.scoring.weights {
            profile = profile.with_weights(weights);
        }
        profile.validate()?;
        Ok(profile)
    }

    /// Set a value by dotted key, e.g. `output.format` or `scoring.format_weight`.
    pub fn set_value(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "scoring.profile" => {
                let profile = ScoringProfile::by_name(value)?;
                self.scoring.profile = profile.name;
            }
            "scoring.keyword_weight" => self.weights_mut()?.keyword_match = parse_value(key, value)?,
            "scoring.completeness_weight" => self.weights_mut()?.completeness = parse_value(key, value)?,
            "scoring.format_weight" => self.weights_mut()?.format = parse_value(key, value)?,
            "scoring.experience_weight" => self.weights_mut()?.experience_match = parse_value(key, value)?,
            "scoring.weights" if value == "default" => self.scoring.weights = None,
            "scoring.industry" => self.scoring.industry = value.parse()?,
            "processing.enable_caching" => self.processing.enable_caching = parse_value(key, value)?,
            "processing.cache_capacity" => self.processing.cache_capacity = parse_value(key, value)?,
            "processing.excerpt_chars" => self.processing.excerpt_chars = parse_value(key, value)?,
            "processing.reference_year" => {
                self.processing.reference_year = match value {
                    "current" | "none" => None,
                    year => Some(parse_value(key, year)?),
                }
            }
            "output.format" => self.output.format = value.parse()?,
            "output.detailed" => self.output.detailed = parse_value(key, value)?,
            "output.include_optimization" => self.output.include_optimization = parse_value(key, value)?,
            "output.color_output" => self.output.color_output = parse_value(key, value)?,
            _ => {
                return Err(AtsError::Configuration(format!("Unknown configuration key: {}", key)));
            }
        }
        Ok(())
    }

    /// Weight override, seeded from the current profile on first edit.
    fn weights_mut(&mut self) -> Result<&mut ComponentWeights> {
        if self.scoring.weights.is_none() {
            self.scoring.weights = Some(ScoringProfile::by_name(&self.scoring.profile)?.weights);
        }
        self.scoring
            .weights
            .as_mut()
            .ok_or_else(|| AtsError::Configuration("weights unavailable".to_string()))
    }
}

fn parse_value<T: FromStr>(key: &str, value: &str) -> Result<T> {
    value
        .parse()
        .map_err(|_| AtsError::Configuration(format!("Invalid value for {}: {}", key, value)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_first_load_writes_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let config = Config::load_from(&path).unwrap();

        assert_eq!(config, Config::default());
        assert!(path.exists());
    }

    #[test]
    fn test_round_trip_through_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");

        let mut config = Config::default();
        config.set_value("scoring.profile", "compact").unwrap();
        config.set_value("output.format", "json").unwrap();
        config.set_value("processing.reference_year", "2024").unwrap();
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded, config);
        assert_eq!(loaded.output.format, OutputFormat::Json);
        assert_eq!(loaded.scoring_profile().unwrap().name, "compact");
    }

    #[test]
    fn test_weight_override() {
        let mut config = Config::default();
        config.set_value("scoring.format_weight", "0.25").unwrap();
        config.set_value("scoring.experience_weight", "0.25").unwrap();

        let profile = config.scoring_profile().unwrap();
        assert_eq!(profile.weights.format, 0.25);
        assert_eq!(profile.weights.keyword_match, 0.30);

        config.set_value("scoring.format_weight", "0.5").unwrap();
        assert!(matches!(config.scoring_profile(), Err(AtsError::Configuration(_))));

        config.set_value("scoring.weights", "default").unwrap();
        assert!(config.scoring_profile().is_ok());
    }

    #[test]
    fn test_industry_setting() {
        let mut config = Config::default();
        assert_eq!(config.scoring.industry, Industry::Tech);

        config.set_value("scoring.industry", "Finance").unwrap();
        assert_eq!(config.scoring.industry, Industry::Finance);

        let written = toml::to_string_pretty(&config).unwrap();
        assert!(written.contains("industry = \"finance\""));
    }

    #[test]
    fn test_config_without_industry_defaults_to_tech() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        let written = toml::to_string_pretty(&Config::default())
            .unwrap()
            .replace("industry = \"tech\"\n", "");
        assert!(!written.contains("industry"));
        std::fs::write(&path, written).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.scoring.industry, Industry::Tech);
    }

    #[test]
    fn test_invalid_values() {
        let mut config = Config::default();

        assert!(config.set_value("output.detailed", "maybe").is_err());
        assert!(config.set_value("output.format", "pdf").is_err());
        assert!(config.set_value("scoring.profile", "lenient").is_err());
        assert!(config.set_value("scoring.industry", "farming").is_err());
        assert!(config.set_value("models.default", "x").is_err());
    }

    #[test]
    fn test_malformed_file_is_a_configuration_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "scoring = [").unwrap();

        assert!(matches!(Config::load_from(&path), Err(AtsError::Configuration(_))));
    }
}
