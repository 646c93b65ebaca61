//! Configuration management for the CV importer

use crate::error::{Result, CvImportError};
use crate::output::render::TemplateId;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    pub parser: ParserConfig,
    pub store: StoreConfig,
    pub output: OutputConfig,
}

/// Tunable limits for the heuristic parser.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParserConfig {
    /// Profile text is cut to this many characters
    pub profile_max_chars: usize,
    /// Unmarked lines shorter than this are not taken as job descriptions
    pub description_min_chars: usize,
    /// How many leading lines are considered when guessing the name
    pub name_scan_lines: usize,
    /// Lines an address block may grow in each direction from its seed
    pub address_window: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreConfig {
    pub profiles_dir: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub template: TemplateId,
    pub color_output: bool,
    pub pretty_json: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutputFormat {
    Console,
    Json,
    Markdown,
    Html,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            profile_max_chars: 600,
            description_min_chars: 30,
            name_scan_lines: 5,
            address_window: 3,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        let profiles_dir = dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".cv-importer")
            .join("profiles");

        Self {
            parser: ParserConfig::default(),
            store: StoreConfig { profiles_dir },
            output: OutputConfig {
                format: OutputFormat::Console,
                template: TemplateId::Classic,
                color_output: true,
                pretty_json: true,
            },
        }
    }
}

impl Config {
    /// Load from the default location, writing defaults there on first run.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path())
    }

    pub fn load_from(config_path: &Path) -> Result<Self> {
        if config_path.exists() {
            let content = std::fs::read_to_string(config_path)?;
            let config: Config = toml::from_str(&content)
                .map_err(|e| CvImportError::Configuration(format!("Failed to parse config: {}", e)))?;
            Ok(config)
        } else {
            let config = Self::default();
            config.save_to(config_path)?;
            Ok(config)
        }
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path())
    }

    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| CvImportError::Configuration(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
            .join("cv-importer")
            .join("config.toml")
    }

    pub fn ensure_profiles_dir(&self) -> Result<()> {
        std::fs::create_dir_all(&self.store.profiles_dir)?;
        Ok(())
    }

    /// Set a single value by dotted key, e.g. `parser.profile_max_chars`.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "parser.profile_max_chars" => self.parser.profile_max_chars = parse_number(key, value)?,
            "parser.description_min_chars" => {
                self.parser.description_min_chars = parse_number(key, value)?
            }
            "parser.name_scan_lines" => self.parser.name_scan_lines = parse_number(key, value)?,
            "parser.address_window" => self.parser.address_window = parse_number(key, value)?,
            "store.profiles_dir" => self.store.profiles_dir = PathBuf::from(value),
            "output.format" => {
                self.output.format = crate::cli::parse_output_format(value)
                    .map_err(CvImportError::Configuration)?
            }
            "output.template" => {
                self.output.template = value.parse().map_err(CvImportError::Configuration)?
            }
            "output.color_output" => self.output.color_output = parse_bool(key, value)?,
            "output.pretty_json" => self.output.pretty_json = parse_bool(key, value)?,
            _ => {
                return Err(CvImportError::Configuration(format!(
                    "Unknown configuration key: {}",
                    key
                )))
            }
        }
        Ok(())
    }
}

fn parse_number(key: &str, value: &str) -> Result<usize> {
    value.trim().parse().map_err(|_| {
        CvImportError::Configuration(format!("{} expects a non-negative integer, got '{}'", key, value))
    })
}

fn parse_bool(key: &str, value: &str) -> Result<bool> {
    match value.trim().to_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => Ok(true),
        "false" | "no" | "off" | "0" => Ok(false),
        _ => Err(CvImportError::Configuration(format!(
            "{} expects true or false, got '{}'",
            key, value
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_parser_limits() {
        let config = Config::default();
        assert_eq!(config.parser.profile_max_chars, 600);
        assert_eq!(config.parser.description_min_chars, 30);
        assert_eq!(config.parser.name_scan_lines, 5);
        assert_eq!(config.parser.address_window, 3);
    }

    #[test]
    fn test_toml_roundtrip_preserves_values() {
        let mut config = Config::default();
        config.parser.profile_max_chars = 250;
        config.output.template = TemplateId::Modern;

        let text = toml::to_string_pretty(&config).unwrap();
        let parsed: Config = toml::from_str(&text).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_set_dotted_keys() {
        let mut config = Config::default();
        config.set("parser.name_scan_lines", "8").unwrap();
        config.set("output.format", "json").unwrap();
        config.set("output.color_output", "off").unwrap();
        config.set("output.template", "compact").unwrap();

        assert_eq!(config.parser.name_scan_lines, 8);
        assert_eq!(config.output.format, OutputFormat::Json);
        assert!(!config.output.color_output);
        assert_eq!(config.output.template, TemplateId::Compact);
    }

    #[test]
    fn test_set_rejects_bad_input() {
        let mut config = Config::default();
        assert!(config.set("parser.profile_max_chars", "lots").is_err());
        assert!(config.set("nope.key", "1").is_err());
    }

    #[test]
    fn test_load_from_creates_default_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let config = Config::load_from(&path).unwrap();
        assert!(path.exists());
        assert_eq!(config, Config::default());
    }
}
