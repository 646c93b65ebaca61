//! Section header detection and line-range slicing

use crate::processing::document::SectionKey;
use crate::processing::normalize::normalize_whitespace;
use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;

/// What a recognised header line opens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderKind {
    Section(SectionKey),
    /// A header the CV has no field for (skills, interests...). It only ends
    /// the preceding section.
    Boundary,
}

pub struct HeaderPattern {
    pub kind: HeaderKind,
    pub regex: Regex,
    pub priority: u8,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderMatch {
    pub index: usize,
    pub kind: HeaderKind,
    pub priority: u8,
    pub title: String,
}

fn header(kind: HeaderKind, phrases: &str, priority: u8) -> HeaderPattern {
    let regex = Regex::new(&format!(r"(?i)^(?:{})\s*:?$", phrases)).expect("Invalid header regex");
    HeaderPattern { kind, regex, priority }
}

/// Specific phrasings outrank generic ones for the same section.
pub static HEADER_PATTERNS: Lazy<Vec<HeaderPattern>> = Lazy::new(|| {
    use HeaderKind::{Boundary, Section};
    vec![
        header(
            Section(SectionKey::Experience),
            r"work experience|professional experience|employment history|career history|work history|relevant experience|employment",
            10,
        ),
        header(
            Section(SectionKey::Education),
            r"education(?: (?:and|&) training)?|academic background|academic qualifications",
            9,
        ),
        header(
            Section(SectionKey::Projects),
            r"(?:personal|side|key|selected|technical) projects|projects",
            8,
        ),
        header(
            Section(SectionKey::Certs),
            r"certificates(?: (?:and|&) accreditations)?|certifications|accreditations|licen[cs]es (?:and|&) certifications",
            7,
        ),
        header(
            Section(SectionKey::Courses),
            r"courses|training courses|relevant coursework|coursework|professional development",
            6,
        ),
        header(
            Section(SectionKey::Profile),
            r"(?:personal|professional) profile|profile|(?:professional|career) summary|summary|personal statement|about me|(?:career )?objective",
            5,
        ),
        header(Section(SectionKey::Experience), r"experience|career", 4),
        header(Section(SectionKey::Education), r"qualifications", 3),
        header(Section(SectionKey::Courses), r"training", 2),
        header(
            Boundary,
            r"(?:(?:technical|key|core) )?skills|skills (?:and|&) (?:competencies|expertise)|interests|hobbies(?: (?:and|&) interests)?|languages|references|achievements|awards|volunteering|volunteer experience|publications",
            1,
        ),
    ]
});

pub fn header_kind(line: &str) -> Option<HeaderKind> {
    let normalized = normalize_whitespace(line);
    HEADER_PATTERNS
        .iter()
        .find(|p| p.regex.is_match(&normalized))
        .map(|p| p.kind)
}

pub fn is_header_line(line: &str) -> bool {
    header_kind(line).is_some()
}

/// Every header found in a document, ordered by priority then position.
#[derive(Debug, Clone, Default)]
pub struct SectionIndex {
    matches: Vec<HeaderMatch>,
}

impl SectionIndex {
    pub fn build(lines: &[String]) -> Self {
        let mut matches = Vec::new();

        for (index, line) in lines.iter().enumerate() {
            let normalized = normalize_whitespace(line);
            for pattern in HEADER_PATTERNS.iter() {
                if pattern.regex.is_match(&normalized) {
                    matches.push(HeaderMatch {
                        index,
                        kind: pattern.kind,
                        priority: pattern.priority,
                        title: line.clone(),
                    });
                }
            }
        }

        matches.sort_by(|a, b| b.priority.cmp(&a.priority).then(a.index.cmp(&b.index)));
        debug!("Section headers: {:?}", matches);

        Self { matches }
    }

    pub fn matches(&self) -> &[HeaderMatch] {
        &self.matches
    }

    /// The header chosen as the start of `key`, if any.
    pub fn start_of(&self, key: SectionKey) -> Option<&HeaderMatch> {
        self.matches.iter().find(|m| m.kind == HeaderKind::Section(key))
    }

    /// Lines between the header for `key` and the next header of any kind.
    pub fn slice<'a>(&self, lines: &'a [String], key: SectionKey) -> &'a [String] {
        let Some(start) = self.start_of(key) else {
            return &[];
        };

        let end = self
            .matches
            .iter()
            .filter(|m| m.index > start.index)
            .map(|m| m.index)
            .min()
            .unwrap_or(lines.len())
            .min(lines.len());
        let begin = (start.index + 1).min(end);

        &lines[begin..end]
    }

    pub fn found(&self) -> Vec<SectionKey> {
        SectionKey::ALL
            .into_iter()
            .filter(|k| self.start_of(*k).is_some())
            .collect()
    }

    pub fn missing(&self) -> Vec<SectionKey> {
        SectionKey::ALL
            .into_iter()
            .filter(|k| self.start_of(*k).is_none())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processing::normalize::lines_from;

    #[test]
    fn test_header_recognition() {
        assert_eq!(header_kind("WORK EXPERIENCE"), Some(HeaderKind::Section(SectionKey::Experience)));
        assert_eq!(header_kind("Employment History:"), Some(HeaderKind::Section(SectionKey::Experience)));
        assert_eq!(header_kind("Education & Training"), Some(HeaderKind::Section(SectionKey::Education)));
        assert_eq!(header_kind("Certifications"), Some(HeaderKind::Section(SectionKey::Certs)));
        assert_eq!(header_kind("Technical Skills"), Some(HeaderKind::Boundary));
        assert_eq!(header_kind("Experience with Rust and Go"), None);
    }

    #[test]
    fn test_slices_between_headers() {
        let lines = lines_from(
            "Jane Doe\nProfile\nLine one\nLine two\nWork Experience\nA\nB\nC\nEducation\nBSc\nUniversity of Leeds",
        );
        let index = SectionIndex::build(&lines);

        assert_eq!(index.slice(&lines, SectionKey::Profile), ["Line one", "Line two"]);
        assert_eq!(index.slice(&lines, SectionKey::Experience), ["A", "B", "C"]);
        assert_eq!(index.slice(&lines, SectionKey::Education), ["BSc", "University of Leeds"]);
        assert!(index.slice(&lines, SectionKey::Projects).is_empty());
    }

    #[test]
    fn test_priority_breaks_ties_between_phrasings() {
        // The generic "Experience" comes first but the specific header wins.
        let lines = lines_from("Experience\nold\nWork Experience\nnew\nEducation\nBSc");
        let index = SectionIndex::build(&lines);

        let start = index.start_of(SectionKey::Experience).unwrap();
        assert_eq!(start.index, 2);
        assert_eq!(index.slice(&lines, SectionKey::Experience), ["new"]);
    }

    #[test]
    fn test_duplicate_headers_use_first() {
        let lines = lines_from("Projects\nAlpha\nProjects\nBeta");
        let index = SectionIndex::build(&lines);
        assert_eq!(index.slice(&lines, SectionKey::Projects), ["Alpha"]);
    }

    #[test]
    fn test_boundary_header_stops_slice() {
        let lines = lines_from("Profile\nCurious engineer\nSkills\nRust, Go");
        let index = SectionIndex::build(&lines);
        assert_eq!(index.slice(&lines, SectionKey::Profile), ["Curious engineer"]);
    }

    #[test]
    fn test_found_and_missing() {
        let lines = lines_from("Profile\ntext\nCourses\nRust 101");
        let index = SectionIndex::build(&lines);
        assert_eq!(index.found(), vec![SectionKey::Profile, SectionKey::Courses]);
        assert_eq!(index.missing().len(), 4);
    }

    #[test]
    fn test_header_on_last_line_gives_empty_slice() {
        let lines = lines_from("Intro\nEducation");
        let index = SectionIndex::build(&lines);
        assert!(index.slice(&lines, SectionKey::Education).is_empty());
    }
}
