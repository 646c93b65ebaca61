//! Shared lexical vocabulary: dates, list markers and keyword sets

use aho_corasick::{AhoCorasick, MatchKind};
use once_cell::sync::Lazy;
use regex::Regex;

const MONTH: &str = r"(?:jan(?:uary)?|feb(?:ruary)?|mar(?:ch)?|apr(?:il)?|may|june?|july?|aug(?:ust)?|sep(?:t(?:ember)?)?|oct(?:ober)?|nov(?:ember)?|dec(?:ember)?)\.?";

/// Lines longer than this are prose even if they mention a date range.
const MAX_DATE_LINE_CHARS: usize = 80;

fn date_point() -> String {
    format!(r"(?:(?:{MONTH}\s+)?(?:19|20)\d{{2}}|\d{{1,2}}/(?:19|20)\d{{2}})")
}

/// `Jan 2020 - Present`, `2018 – 2021`, `03/2019 to 06/2020`
pub static DATE_RANGE: Lazy<Regex> = Lazy::new(|| {
    let point = date_point();
    Regex::new(&format!(
        r"(?i)\b{point}\s*(?:-|–|—|to|until|till)\s*(?:{point}|present|current|now|date|ongoing)\b"
    ))
    .expect("Invalid date range regex")
});

/// A line that is nothing but one date: `2019`, `June 2021`, `07/2020`
pub static SINGLE_DATE_LINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(r"(?i)^\(?{}\)?[.,]?$", date_point())).expect("Invalid single date regex")
});

pub static YEAR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b(?:19|20)\d{2}\b").expect("Invalid year regex"));

/// Dash, bullet glyph, or a numbered / lettered list marker.
pub static BULLET: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:[-–—•*·▪◦●○■□►▶➢✓✔→]+\s*|\(?\d{1,2}[.)]\s+|\(?[a-z][.)]\s+)")
        .expect("Invalid bullet regex")
});

pub fn is_date_like(line: &str) -> bool {
    SINGLE_DATE_LINE.is_match(line)
        || (line.chars().count() <= MAX_DATE_LINE_CHARS && DATE_RANGE.is_match(line))
}

pub fn is_bullet(line: &str) -> bool {
    BULLET.is_match(line)
}

/// Remove a leading list marker and surrounding whitespace.
pub fn strip_bullet(line: &str) -> String {
    BULLET.replace(line, "").trim().to_string()
}

/// A case-insensitive vocabulary matched on whole words only.
pub struct KeywordSet {
    matcher: AhoCorasick,
}

impl KeywordSet {
    pub fn new(words: &[&str]) -> Self {
        let matcher = AhoCorasick::builder()
            .ascii_case_insensitive(true)
            .match_kind(MatchKind::LeftmostLongest)
            .build(words)
            .expect("Invalid keyword set");
        Self { matcher }
    }

    pub fn contains_word(&self, text: &str) -> bool {
        self.matcher.find_iter(text).any(|m| {
            let before = text[..m.start()].chars().next_back();
            let after = text[m.end()..].chars().next();
            !before.is_some_and(char::is_alphanumeric) && !after.is_some_and(char::is_alphanumeric)
        })
    }
}

pub static ROLE_KEYWORDS: Lazy<KeywordSet> = Lazy::new(|| {
    KeywordSet::new(&[
        "senior", "junior", "lead", "principal", "head", "chief", "staff", "manager",
        "director", "engineer", "developer", "analyst", "consultant", "architect", "designer",
        "administrator", "officer", "specialist", "coordinator", "assistant", "intern",
        "associate", "executive", "scientist", "technician", "programmer", "supervisor",
        "advisor", "adviser", "president", "founder", "co-founder", "owner", "contractor",
        "freelancer", "tester", "accountant", "teacher", "lecturer", "researcher", "editor",
        "writer", "producer", "operator", "representative", "trainee", "apprentice",
        "cto", "ceo", "cfo", "coo", "vp",
    ])
});

pub static COMPANY_SUFFIXES: Lazy<KeywordSet> = Lazy::new(|| {
    KeywordSet::new(&[
        "ltd", "limited", "inc", "incorporated", "llc", "llp", "plc", "corp", "corporation",
        "company", "group", "solutions", "services", "technologies", "systems", "consulting",
        "consultancy", "partners", "holdings", "labs", "studios", "agency", "bank", "council",
        "nhs", "trust", "gmbh",
    ])
});

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_date_ranges() {
        assert!(is_date_like("Jan 2020 - Present"));
        assert!(is_date_like("September 2018 – June 2021"));
        assert!(is_date_like("2016 to 2019"));
        assert!(is_date_like("03/2019 - 06/2020"));
        assert!(is_date_like("2021"));
        assert!(is_date_like("(May 2019)"));
        assert!(!is_date_like("Senior Software Engineer"));
        assert!(!is_date_like("Reduced build times by 40% over 2 quarters"));
    }

    #[test]
    fn test_long_prose_with_range_is_not_a_date_line() {
        let prose = "Migrated the estate between 2019 - 2020 while keeping every customer integration online";
        assert!(!is_date_like(prose));
    }

    #[test]
    fn test_bullet_markers() {
        assert!(is_bullet("- Built a thing"));
        assert!(is_bullet("• Led a team"));
        assert!(is_bullet("1. First item"));
        assert!(is_bullet("b) second"));
        assert!(!is_bullet("Built a thing"));
        assert!(!is_bullet("2019 - 2021"));
        assert!(!is_bullet("J. P. Morgan"));
        assert!(!is_bullet("A. Smith & Sons"));
    }

    #[test]
    fn test_strip_bullet() {
        assert_eq!(strip_bullet("- Built a thing"), "Built a thing");
        assert_eq!(strip_bullet("•   Spaced out  "), "Spaced out");
        assert_eq!(strip_bullet("2) Numbered"), "Numbered");
    }

    #[test]
    fn test_keyword_set_matches_whole_words() {
        assert!(ROLE_KEYWORDS.contains_word("Senior Software Engineer"));
        assert!(ROLE_KEYWORDS.contains_word("Engineering Manager"));
        assert!(!ROLE_KEYWORDS.contains_word("Engineering excellence"));
        assert!(COMPANY_SUFFIXES.contains_word("Acme Ltd"));
        assert!(COMPANY_SUFFIXES.contains_word("Initech Solutions, London"));
        assert!(!COMPANY_SUFFIXES.contains_word("Grouping data"));
    }
}
