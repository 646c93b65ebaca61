//! CV importer: turn PDF, text or Markdown CVs into structured profiles

use clap::Parser;
use cv_importer::cli::{self, Cli, Commands, ConfigAction, ProfileAction};
use cv_importer::config::{Config, OutputFormat};
use cv_importer::error::{CvImportError, Result};
use cv_importer::input::InputManager;
use cv_importer::output::{render, save_report_to_file, suggest_filename, ReportGenerator, TemplateId};
use cv_importer::processing::document::SectionKey;
use cv_importer::processing::parser::CvParser;
use cv_importer::store::{FileProfileStore, ProfileStore};
use log::{error, info, warn};
use std::path::{Path, PathBuf};
use std::process;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let config_path = cli.config.clone().unwrap_or_else(Config::config_path);
    let config = match Config::load_from(&config_path) {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            process::exit(1);
        }
    };

    if let Err(e) = run_command(cli.command, config, &config_path).await {
        error!("Command failed: {}", e);
        process::exit(1);
    }
}

async fn run_command(command: Commands, mut config: Config, config_path: &Path) -> Result<()> {
    match command {
        Commands::Parse {
            file,
            output,
            template,
            order,
            detailed,
            save,
            store,
        } => {
            cli::validate_file_extension(&file, &["pdf", "txt", "md", "markdown"])
                .map_err(|e| CvImportError::InvalidInput(format!("CV file: {}", e)))?;

            let format = match output {
                Some(output) => cli::parse_output_format(&output).map_err(CvImportError::InvalidInput)?,
                None => config.output.format,
            };
            let template = resolve_template(template.as_deref(), config.output.template)?;
            let section_order = resolve_order(order.as_deref())?;

            info!("Importing CV from {}", file.display());
            let parser = CvParser::new(config.parser.clone());
            let mut input_manager = InputManager::new();
            let outcome = input_manager.import_cv(&file, &parser).await?;

            if outcome.error.is_some() || !outcome.debug.sections_missing.is_empty() {
                warn!(
                    "Partial parse (confidence {:.0}%): missing {:?}",
                    outcome.confidence * 100.0,
                    outcome.debug.sections_missing
                );
            }

            let generator = ReportGenerator::with_options(
                config.output.color_output && save.is_none(),
                detailed,
                config.output.pretty_json,
                template,
                section_order,
            );
            let report = generator.generate_report(&outcome, format)?;
            let target = save.map(|path| save_target(path, format, &file.to_string_lossy()));
            emit(&report, target.as_deref())?;

            if let Some(name) = store {
                let mut profiles = FileProfileStore::open(&config.store.profiles_dir)?;
                let meta = profiles.save(&name, &outcome.data)?;
                println!("💾 Stored profile '{}' with id {}", meta.name, meta.id);
            }
        }

        Commands::Render {
            id,
            template,
            order,
            save,
        } => {
            let template = resolve_template(template.as_deref(), config.output.template)?;
            let section_order = resolve_order(order.as_deref())?;

            let profiles = FileProfileStore::open(&config.store.profiles_dir)?;
            let cv = profiles.load(&id)?;
            let html = render(&cv, template, &section_order)?;

            let target = save.map(|path| save_target(path, OutputFormat::Html, &id));
            emit(&html, target.as_deref())?;
        }

        Commands::Profiles { action } => {
            let mut profiles = FileProfileStore::open(&config.store.profiles_dir)?;
            match action {
                ProfileAction::List => {
                    let metas = profiles.list()?;
                    if metas.is_empty() {
                        println!("No stored profiles in {}", profiles.root().display());
                    }
                    for meta in metas {
                        println!(
                            "{:<24} {:<32} updated {}",
                            meta.id,
                            meta.name,
                            meta.updated_at.format("%Y-%m-%d %H:%M")
                        );
                    }
                }
                ProfileAction::Show { id } => {
                    let cv = profiles.load(&id)?;
                    println!("{}", serde_json::to_string_pretty(&cv)?);
                }
                ProfileAction::Delete { id } => {
                    profiles.delete(&id)?;
                    println!("🗑️  Deleted profile {}", id);
                }
                ProfileAction::Rename { id, name } => {
                    let meta = profiles.rename(&id, &name)?;
                    println!("✏️  Renamed {} to '{}'", meta.id, meta.name);
                }
            }
        }

        Commands::Config { action } => match action {
            Some(ConfigAction::Show) | None => {
                println!("⚙️  Current Configuration ({})\n", config_path.display());
                let content = toml::to_string_pretty(&config)
                    .map_err(|e| CvImportError::Configuration(e.to_string()))?;
                println!("{}", content);
            }

            Some(ConfigAction::Reset) => {
                println!("🔄 Resetting configuration to defaults...");
                Config::default().save_to(config_path)?;
                println!("✅ Configuration reset successfully!");
            }

            Some(ConfigAction::Set { key, value }) => {
                config.set(&key, &value)?;
                config.save_to(config_path)?;
                println!("🔧 Set {} = {}", key, value);
            }
        },
    }

    Ok(())
}

fn resolve_template(arg: Option<&str>, default: TemplateId) -> Result<TemplateId> {
    match arg {
        Some(name) => name.parse().map_err(CvImportError::InvalidInput),
        None => Ok(default),
    }
}

fn resolve_order(arg: Option<&str>) -> Result<Vec<SectionKey>> {
    match arg {
        Some(order) => cli::parse_section_order(order).map_err(CvImportError::InvalidInput),
        None => Ok(SectionKey::ALL.to_vec()),
    }
}

/// A directory target gets a generated file name inside it.
fn save_target(path: PathBuf, format: OutputFormat, source_name: &str) -> PathBuf {
    if path.is_dir() {
        path.join(suggest_filename(format, source_name, true))
    } else {
        path
    }
}

fn emit(content: &str, save: Option<&Path>) -> Result<()> {
    match save {
        Some(path) => {
            save_report_to_file(content, path)?;
            println!("📁 Saved to {}", path.display());
        }
        None => println!("{}", content),
    }
    Ok(())
}
