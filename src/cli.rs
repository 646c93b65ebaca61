//! CLI interface for the CV importer

use crate::config::OutputFormat;
use crate::processing::document::SectionKey;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "cv-importer")]
#[command(about = "Import CVs from PDF, text or Markdown into a structured profile")]
#[command(long_about = "Extract text from a CV, recover personal details and sections with heuristic parsing, store the result as a profile and render it with a printable template")]
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
    /// Parse a CV file into structured data
    Parse {
        /// Path to CV file (PDF, TXT, MD)
        file: PathBuf,

        /// Output format: console, json, markdown, html
        #[arg(short, long)]
        output: Option<String>,

        /// Template for html output: classic, modern, compact
        #[arg(short, long)]
        template: Option<String>,

        /// Comma-separated section order, e.g. "profile,experience,education"
        #[arg(long)]
        order: Option<String>,

        /// Include parser diagnostics in console output
        #[arg(short, long)]
        detailed: bool,

        /// Save output to file
        #[arg(short, long)]
        save: Option<PathBuf>,

        /// Store the parsed CV as a profile under this name
        #[arg(long)]
        store: Option<String>,
    },

    /// Render a stored profile as a printable HTML page
    Render {
        /// Profile id, as shown by `profiles list`
        id: String,

        /// Template: classic, modern, compact
        #[arg(short, long)]
        template: Option<String>,

        /// Comma-separated section order
        #[arg(long)]
        order: Option<String>,

        /// Save output to file instead of printing it
        #[arg(short, long)]
        save: Option<PathBuf>,
    },

    /// Stored profile management
    Profiles {
        #[command(subcommand)]
        action: ProfileAction,
    },

    /// Show configuration
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
}

#[derive(Subcommand)]
pub enum ProfileAction {
    /// List stored profiles, most recent first
    List,

    /// Print a stored profile as JSON
    Show {
        id: String,
    },

    /// Delete a stored profile
    Delete {
        id: String,
    },

    /// Change the display name of a profile
    Rename {
        id: String,

        /// New display name
        name: String,
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
        /// Configuration key (e.g., "parser.profile_max_chars")
        key: String,

        /// Configuration value
        value: String,
    },
}

/// Parse and validate output format
pub fn parse_output_format(format: &str) -> Result<OutputFormat, String> {
    match format.trim().to_lowercase().as_str() {
        "console" => Ok(OutputFormat::Console),
        "json" => Ok(OutputFormat::Json),
        "markdown" | "md" => Ok(OutputFormat::Markdown),
        "html" => Ok(OutputFormat::Html),
        _ => Err(format!("Invalid output format: {}. Supported: console, json, markdown, html", format)),
    }
}

/// Parse a comma-separated section order. Unknown names are an error,
/// repeated names are kept once.
pub fn parse_section_order(order: &str) -> Result<Vec<SectionKey>, String> {
    let mut keys = Vec::new();
    for part in order.split(',').map(str::trim).filter(|p| !p.is_empty()) {
        let key: SectionKey = part.parse()?;
        if !keys.contains(&key) {
            keys.push(key);
        }
    }
    if keys.is_empty() {
        return Err("Section order is empty".to_string());
    }
    Ok(keys)
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_output_format() {
        assert_eq!(parse_output_format("JSON").unwrap(), OutputFormat::Json);
        assert_eq!(parse_output_format("md").unwrap(), OutputFormat::Markdown);
        assert!(parse_output_format("pdf").is_err());
    }

    #[test]
    fn test_parse_section_order() {
        let keys = parse_section_order("experience, profile,experience,certificates").unwrap();
        assert_eq!(keys, vec![SectionKey::Experience, SectionKey::Profile, SectionKey::Certs]);
        assert!(parse_section_order("experience,hobbies").is_err());
        assert!(parse_section_order(" , ").is_err());
    }

    #[test]
    fn test_validate_file_extension() {
        let allowed = ["pdf", "txt", "md"];
        assert!(validate_file_extension(Path::new("cv.PDF"), &allowed).is_ok());
        assert!(validate_file_extension(Path::new("cv.docx"), &allowed).is_err());
        assert!(validate_file_extension(Path::new("cv"), &allowed).is_err());
    }

    #[test]
    fn test_cli_parses_subcommands() {
        let cli = Cli::try_parse_from(["cv-importer", "parse", "cv.pdf", "--store", "Jane", "-o", "json"]).unwrap();
        match cli.command {
            Commands::Parse { file, store, output, .. } => {
                assert_eq!(file, PathBuf::from("cv.pdf"));
                assert_eq!(store.as_deref(), Some("Jane"));
                assert_eq!(output.as_deref(), Some("json"));
            }
            _ => panic!("expected parse command"),
        }

        let cli = Cli::try_parse_from(["cv-importer", "profiles", "rename", "jane", "Jane Doe"]).unwrap();
        assert!(matches!(cli.command, Commands::Profiles { action: ProfileAction::Rename { .. } }));
    }
}
