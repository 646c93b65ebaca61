//! Parser entry point: text in, CV structure out, never an error

use crate::config::ParserConfig;
use crate::processing::certificates::parse_certificates;
use crate::processing::document::{CvDocument, SectionKey};
use crate::processing::education::parse_education;
use crate::processing::experience::parse_jobs;
use crate::processing::fields::extract_personal_details;
use crate::processing::normalize::lines_from;
use crate::processing::projects::parse_projects;
use crate::processing::sections::SectionIndex;
use crate::processing::summary::{parse_courses, parse_profile};
use log::{debug, info, warn};
use serde::Serialize;
use std::panic::{catch_unwind, AssertUnwindSafe};

pub const FALLBACK_MESSAGE: &str = "Parsed with defaults due to error.";
pub const EMPTY_MESSAGE: &str = "No CV structure recognised; using defaults.";

/// Result of one parse call. `success` is always true; how much was
/// recognised is carried by `confidence` and `debug.sections_missing`.
#[derive(Debug, Clone, Serialize)]
pub struct ParseOutcome {
    pub success: bool,
    pub data: CvDocument,
    pub message: String,
    pub debug: ParseDebug,
    pub confidence: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ParseDebug {
    pub line_count: usize,
    pub sections_found: Vec<SectionKey>,
    pub sections_missing: Vec<SectionKey>,
}

#[derive(Debug, Clone, Default)]
pub struct CvParser {
    config: ParserConfig,
}

impl CvParser {
    pub fn new(config: ParserConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// `None` is parsed as empty text.
    pub fn parse_optional(&self, text: Option<&str>) -> ParseOutcome {
        self.parse_cv(text.unwrap_or_default())
    }

    pub fn parse_cv(&self, text: &str) -> ParseOutcome {
        let attempt = catch_unwind(AssertUnwindSafe(|| self.try_parse(text)));

        let failure = match attempt {
            Ok(outcome) => return outcome,
            Err(panic) => panic
                .downcast_ref::<&str>()
                .map(|s| s.to_string())
                .or_else(|| panic.downcast_ref::<String>().cloned())
                .unwrap_or_else(|| "parser panicked".to_string()),
        };

        warn!("CV parsing fell back to defaults: {}", failure);
        ParseOutcome {
            success: true,
            data: CvDocument::default(),
            message: FALLBACK_MESSAGE.to_string(),
            debug: ParseDebug {
                sections_missing: SectionKey::ALL.to_vec(),
                ..Default::default()
            },
            confidence: 0.0,
            error: Some(failure),
        }
    }

    fn try_parse(&self, text: &str) -> ParseOutcome {
        let lines = lines_from(text);
        info!("Parsing CV text: {} non-empty lines", lines.len());

        let mut document = CvDocument {
            personal_details: extract_personal_details(text, &lines, &self.config),
            ..Default::default()
        };

        let index = SectionIndex::build(&lines);
        for key in SectionKey::ALL {
            let slice = index.slice(&lines, key);
            if slice.is_empty() {
                continue;
            }
            debug!("Section {} has {} lines", key.as_str(), slice.len());

            match key {
                SectionKey::Profile => {
                    document.profile = parse_profile(slice, self.config.profile_max_chars)
                }
                SectionKey::Experience => {
                    document.work_experience = parse_jobs(slice, self.config.description_min_chars)
                }
                SectionKey::Education => document.education = parse_education(slice),
                SectionKey::Projects => document.personal_projects = parse_projects(slice),
                SectionKey::Certs => document.certificates = parse_certificates(slice),
                SectionKey::Courses => document.courses = parse_courses(slice),
            }
        }

        let sections_found = index.found();
        let confidence = confidence(&document, sections_found.len());
        let message = summarise(&document);
        info!("{}", message);

        ParseOutcome {
            success: true,
            message,
            debug: ParseDebug {
                line_count: lines.len(),
                sections_found,
                sections_missing: index.missing(),
            },
            confidence,
            data: document,
            error: None,
        }
    }
}

fn summarise(document: &CvDocument) -> String {
    if document.is_empty() {
        return EMPTY_MESSAGE.to_string();
    }
    format!(
        "Successfully parsed CV. Found {} work experience entries, {} projects, {} certificates.",
        document.work_experience.len(),
        document.personal_projects.len(),
        document.certificates.len()
    )
}

/// Share of sections located, plus a little for each contact field found.
fn confidence(document: &CvDocument, sections_found: usize) -> f32 {
    let details = &document.personal_details;
    let contacts = [&details.name, &details.email, &details.phone]
        .iter()
        .filter(|f| !f.is_empty())
        .count();

    let score = sections_found as f32 / SectionKey::ALL.len() as f32 * 0.7 + contacts as f32 * 0.1;
    score.clamp(0.0, 1.0)
}

/// Parse with default settings.
pub fn parse_cv(text: &str) -> ParseOutcome {
    CvParser::default().parse_cv(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "Jane Doe
Software Engineer
jane.doe@example.co.uk | +44 7911 123456
12 High Street
London
SW1A 1AA

Profile
Backend engineer with eight years of experience building reliable services.
Enjoys turning messy data into clean structures.

Work Experience
Senior Software Engineer
Acme Ltd
Jan 2020 - Present
- Built the document ingestion pipeline
- Led a team of four engineers
- Reduced infrastructure costs by 30%

Education
BSc Computer Science, University of Leeds
2011 - 2014
";

    #[test]
    fn test_end_to_end_sample() {
        let outcome = parse_cv(SAMPLE);
        let data = &outcome.data;

        assert!(outcome.success);
        assert!(outcome.error.is_none());
        assert_eq!(data.personal_details.name, "Jane Doe");
        assert_eq!(data.personal_details.email, "jane.doe@example.co.uk");
        assert!(data.personal_details.phone.contains("7911"));
        assert_eq!(data.personal_details.address, "12 High Street\nLondon\nSW1A 1AA");
        assert!(data.profile.starts_with("Backend engineer"));

        assert_eq!(data.work_experience.len(), 1);
        let job = &data.work_experience[0];
        assert_eq!(job.title, "Senior Software Engineer");
        assert_eq!(job.company, "Acme Ltd");
        assert_eq!(job.dates, "Jan 2020 - Present");
        assert_eq!(job.responsibilities.len(), 3);

        assert!(!data.education.degree.is_empty());
        assert_eq!(data.education.dates, "2011 - 2014");
        assert_eq!(
            outcome.message,
            "Successfully parsed CV. Found 1 work experience entries, 0 projects, 0 certificates."
        );
    }

    #[test]
    fn test_debug_lists_found_and_missing_sections() {
        let outcome = parse_cv(SAMPLE);
        assert_eq!(
            outcome.debug.sections_found,
            vec![SectionKey::Profile, SectionKey::Experience, SectionKey::Education]
        );
        assert_eq!(
            outcome.debug.sections_missing,
            vec![SectionKey::Projects, SectionKey::Certs, SectionKey::Courses]
        );
        assert!(outcome.confidence > 0.5);
    }

    #[test]
    fn test_empty_and_whitespace_input() {
        for text in ["", "   \n\t\r\n  "] {
            let outcome = parse_cv(text);
            assert!(outcome.success);
            assert_eq!(outcome.data, CvDocument::default());
            assert_eq!(outcome.message, EMPTY_MESSAGE);
            assert_eq!(outcome.debug.line_count, 0);
        }
    }

    #[test]
    fn test_none_input() {
        let outcome = CvParser::default().parse_optional(None);
        assert!(outcome.success);
        assert_eq!(outcome.data, CvDocument::default());
    }

    #[test]
    fn test_nul_input_is_not_an_error() {
        for text in ["\0\0\0", "\0\u{1}\u{2}\n\u{7f}\0"] {
            let outcome = parse_cv(text);
            assert!(outcome.success);
            assert!(outcome.error.is_none());
            assert_eq!(outcome.message, EMPTY_MESSAGE);
            assert_eq!(outcome.data, CvDocument::default());
            assert_eq!(outcome.confidence, 0.0);
        }
    }

    #[test]
    fn test_garbage_and_long_lines_do_not_fail() {
        let garbage: String = (0u32..2000)
            .filter_map(|i| char::from_u32((i * 7919) % 0x2FFF))
            .collect();
        assert!(parse_cv(&garbage).success);

        let long_line = "word ".repeat(50_000);
        let outcome = parse_cv(&long_line);
        assert!(outcome.success);
        assert_eq!(outcome.debug.line_count, 1);
    }

    #[test]
    fn test_missing_sections_keep_defaults() {
        let outcome = parse_cv("Jane Doe\nProjects\nCV Builder\n- Parsed PDFs");
        assert!(outcome.data.work_experience.is_empty());
        assert!(outcome.data.education.is_empty());
        assert_eq!(outcome.data.personal_projects.len(), 1);
    }

    #[test]
    fn test_profile_cap_is_configurable() {
        let parser = CvParser::new(ParserConfig {
            profile_max_chars: 10,
            ..Default::default()
        });
        let outcome = parser.parse_cv("Profile\nA very long profile paragraph");
        assert_eq!(outcome.data.profile, "A very lon");
    }
}
