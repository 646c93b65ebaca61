//! Output formatters for parse results

use crate::config::OutputFormat;
use crate::error::Result;
use crate::output::render::{render, TemplateId};
use crate::processing::document::{CvDocument, SectionKey};
use crate::processing::parser::ParseOutcome;
use colored::{Color, Colorize};
use std::path::Path;

/// Trait for turning a parse outcome into a printable report
pub trait OutputFormatter {
    fn format_outcome(&self, outcome: &ParseOutcome) -> Result<String>;
    fn supports_format(&self) -> OutputFormat;
}

/// Terminal output with optional colours
pub struct ConsoleFormatter {
    use_colors: bool,
    detailed: bool,
}

pub struct JsonFormatter {
    pretty: bool,
}

pub struct MarkdownFormatter {
    include_metadata: bool,
}

/// Printable CV page, see [`render`]
pub struct HtmlFormatter {
    template: TemplateId,
    section_order: Vec<SectionKey>,
}

/// Dispatches to the formatter matching an [`OutputFormat`]
pub struct ReportGenerator {
    console_formatter: ConsoleFormatter,
    json_formatter: JsonFormatter,
    markdown_formatter: MarkdownFormatter,
    html_formatter: HtmlFormatter,
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
        let (prefix, color) = match level {
            1 => ("█", Color::Blue),
            2 => ("▓", Color::Green),
            _ => ("▒", Color::Yellow),
        };

        if self.use_colors {
            format!("\n{} {}\n", prefix.color(color).bold(), title.color(color).bold())
        } else {
            format!("\n{} {}\n", prefix, title)
        }
    }

    fn format_confidence(&self, confidence: f32) -> String {
        let percent = (confidence * 100.0).round() as u8;
        let (label, color) = match percent {
            80..=100 => ("HIGH", Color::Green),
            50..=79 => ("MEDIUM", Color::Yellow),
            _ => ("LOW", Color::Red),
        };

        if self.use_colors {
            format!("{}% [{}]", percent, label.color(color).bold())
        } else {
            format!("{}% [{}]", percent, label)
        }
    }

    fn format_section(&self, cv: &CvDocument, key: SectionKey) -> String {
        let mut output = self.format_header(&key.to_string(), 2);

        match key {
            SectionKey::Profile => output.push_str(&format!("{}\n", cv.profile)),
            SectionKey::Courses => output.push_str(&format!("{}\n", cv.courses)),
            SectionKey::Education => {
                let edu = &cv.education;
                output.push_str(&format!("{}\n", self.colorize(&edu.degree, Color::Cyan)));
                push_field(&mut output, "University", &edu.university);
                push_field(&mut output, "Dates", &edu.dates);
                push_field(&mut output, "Grade", &edu.grade);
            }
            SectionKey::Experience => {
                for job in &cv.work_experience {
                    output.push_str(&format!("{}\n", self.colorize(&job.title, Color::Cyan)));
                    push_field(&mut output, "Company", &job.company);
                    push_field(&mut output, "Dates", &job.dates);
                    push_field(&mut output, "Description", &job.description);
                    for line in &job.responsibilities {
                        output.push_str(&format!("  • {}\n", line));
                    }
                    output.push('\n');
                }
            }
            SectionKey::Projects => {
                for project in &cv.personal_projects {
                    output.push_str(&format!("{}\n", self.colorize(&project.title, Color::Cyan)));
                    push_field(&mut output, "Technologies", &project.technologies);
                    for line in &project.responsibilities {
                        output.push_str(&format!("  • {}\n", line));
                    }
                    output.push('\n');
                }
            }
            SectionKey::Certs => {
                for cert in &cv.certificates {
                    output.push_str(&format!("  • {}\n", cert.title));
                    if !cert.description.is_empty() {
                        output.push_str(&format!("    {}\n", cert.description));
                    }
                }
            }
        }

        output
    }
}

fn push_field(output: &mut String, label: &str, value: &str) {
    if !value.trim().is_empty() {
        output.push_str(&format!("  {}: {}\n", label, value));
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format_outcome(&self, outcome: &ParseOutcome) -> Result<String> {
        let cv = &outcome.data;
        let details = &cv.personal_details;
        let mut output = String::new();

        output.push_str(&self.format_header("📄 CV IMPORT", 1));
        output.push_str(&format!("{}\n", self.colorize(&outcome.message, Color::Cyan)));
        output.push_str(&format!("Confidence: {}\n", self.format_confidence(outcome.confidence)));
        if let Some(error) = &outcome.error {
            output.push_str(&format!("{}\n", self.colorize(&format!("Error: {}", error), Color::Red)));
        }

        output.push_str(&self.format_header("Personal Details", 2));
        push_field(&mut output, "Name", &details.name);
        push_field(&mut output, "Email", &details.email);
        push_field(&mut output, "Phone", &details.phone);
        push_field(&mut output, "Website", &details.website);
        push_field(&mut output, "Address", &details.address);

        for key in SectionKey::ALL {
            if !cv.section_is_empty(key) {
                output.push_str(&self.format_section(cv, key));
            }
        }

        if self.detailed {
            output.push_str(&self.format_header("Diagnostics", 3));
            output.push_str(&format!("Lines: {}\n", outcome.debug.line_count));
            output.push_str(&format!("Sections found: {}\n", join_keys(&outcome.debug.sections_found)));
            let missing = join_keys(&outcome.debug.sections_missing);
            output.push_str(&format!("Sections missing: {}\n", self.colorize(&missing, Color::Yellow)));
        }

        Ok(output)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Console
    }
}

fn join_keys(keys: &[SectionKey]) -> String {
    if keys.is_empty() {
        return "none".to_string();
    }
    keys.iter().map(|k| k.as_str()).collect::<Vec<_>>().join(", ")
}

impl JsonFormatter {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_outcome(&self, outcome: &ParseOutcome) -> Result<String> {
        if self.pretty {
            Ok(serde_json::to_string_pretty(outcome)?)
        } else {
            Ok(serde_json::to_string(outcome)?)
        }
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Json
    }
}

impl MarkdownFormatter {
    pub fn new(include_metadata: bool) -> Self {
        Self { include_metadata }
    }

    fn format_section(cv: &CvDocument, key: SectionKey) -> String {
        let mut output = format!("## {}\n\n", key);

        match key {
            SectionKey::Profile => output.push_str(&format!("{}\n\n", cv.profile)),
            SectionKey::Courses => output.push_str(&format!("{}\n\n", cv.courses)),
            SectionKey::Education => {
                let edu = &cv.education;
                output.push_str(&format!("**{}**\n\n", edu.degree));
                for (label, value) in [("University", &edu.university), ("Dates", &edu.dates), ("Grade", &edu.grade)] {
                    if !value.is_empty() {
                        output.push_str(&format!("- {}: {}\n", label, value));
                    }
                }
                output.push('\n');
            }
            SectionKey::Experience => {
                for job in &cv.work_experience {
                    output.push_str(&format!("### {}\n\n", job.title));
                    let meta: Vec<&str> = [job.company.as_str(), job.dates.as_str()]
                        .into_iter()
                        .filter(|v| !v.is_empty())
                        .collect();
                    if !meta.is_empty() {
                        output.push_str(&format!("*{}*\n\n", meta.join(" | ")));
                    }
                    if !job.description.is_empty() {
                        output.push_str(&format!("{}\n\n", job.description));
                    }
                    for line in &job.responsibilities {
                        output.push_str(&format!("- {}\n", line));
                    }
                    output.push('\n');
                }
            }
            SectionKey::Projects => {
                for project in &cv.personal_projects {
                    output.push_str(&format!("### {}\n\n", project.title));
                    if !project.technologies.is_empty() {
                        output.push_str(&format!("*{}*\n\n", project.technologies));
                    }
                    for line in &project.responsibilities {
                        output.push_str(&format!("- {}\n", line));
                    }
                    output.push('\n');
                }
            }
            SectionKey::Certs => {
                for cert in &cv.certificates {
                    if cert.description.is_empty() {
                        output.push_str(&format!("- **{}**\n", cert.title));
                    } else {
                        output.push_str(&format!("- **{}**: {}\n", cert.title, cert.description));
                    }
                }
                output.push('\n');
            }
        }

        output
    }
}

impl OutputFormatter for MarkdownFormatter {
    fn format_outcome(&self, outcome: &ParseOutcome) -> Result<String> {
        let cv = &outcome.data;
        let details = &cv.personal_details;
        let mut output = String::new();

        let name = if details.name.is_empty() { "Curriculum Vitae" } else { details.name.as_str() };
        output.push_str(&format!("# {}\n\n", name));

        let contact: Vec<&str> = [&details.email, &details.phone, &details.website, &details.address]
            .into_iter()
            .map(String::as_str)
            .filter(|v| !v.is_empty())
            .collect();
        if !contact.is_empty() {
            output.push_str(&format!("{}\n\n", contact.join(" | ")));
        }

        if self.include_metadata {
            output.push_str(&format!(
                "> {} (confidence {:.0}%)\n\n",
                outcome.message,
                outcome.confidence * 100.0
            ));
        }

        for key in SectionKey::ALL {
            if !cv.section_is_empty(key) {
                output.push_str(&Self::format_section(cv, key));
            }
        }

        Ok(output)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Markdown
    }
}

impl HtmlFormatter {
    pub fn new(template: TemplateId, section_order: Vec<SectionKey>) -> Self {
        Self { template, section_order }
    }
}

impl OutputFormatter for HtmlFormatter {
    fn format_outcome(&self, outcome: &ParseOutcome) -> Result<String> {
        render(&outcome.data, self.template, &self.section_order)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Html
    }
}

impl ReportGenerator {
    pub fn new() -> Self {
        Self::with_options(true, false, true, TemplateId::default(), SectionKey::ALL.to_vec())
    }

    pub fn with_options(
        use_colors: bool,
        detailed: bool,
        pretty_json: bool,
        template: TemplateId,
        section_order: Vec<SectionKey>,
    ) -> Self {
        Self {
            console_formatter: ConsoleFormatter::new(use_colors, detailed),
            json_formatter: JsonFormatter::new(pretty_json),
            markdown_formatter: MarkdownFormatter::new(true),
            html_formatter: HtmlFormatter::new(template, section_order),
        }
    }

    pub fn generate_report(&self, outcome: &ParseOutcome, format: OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Console => self.console_formatter.format_outcome(outcome),
            OutputFormat::Json => self.json_formatter.format_outcome(outcome),
            OutputFormat::Markdown => self.markdown_formatter.format_outcome(outcome),
            OutputFormat::Html => self.html_formatter.format_outcome(outcome),
        }
    }
}

impl Default for ReportGenerator {
    fn default() -> Self {
        Self::new()
    }
}

pub fn save_report_to_file(content: &str, file_path: &Path) -> Result<()> {
    use std::fs;
    if let Some(parent) = file_path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(file_path, content)?;
    Ok(())
}

pub fn suggest_filename(format: OutputFormat, cv_name: &str, timestamp: bool) -> String {
    let base_name = Path::new(cv_name)
        .file_stem()
        .unwrap_or_default()
        .to_string_lossy();

    let timestamp_suffix = if timestamp {
        format!("_{}", chrono::Utc::now().format("%Y%m%d_%H%M%S"))
    } else {
        String::new()
    };

    let extension = match format {
        OutputFormat::Console => "txt",
        OutputFormat::Json => "json",
        OutputFormat::Markdown => "md",
        OutputFormat::Html => "html",
    };
    format!("{}_parsed{}.{}", base_name, timestamp_suffix, extension)
}
