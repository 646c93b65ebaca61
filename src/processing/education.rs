//! Education parser: first plausible line per field, order-independent

use crate::processing::document::Education;
use crate::processing::normalize::safe_match;
use crate::processing::patterns::{DATE_RANGE, YEAR};
use once_cell::sync::Lazy;
use regex::Regex;

static DEGREE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(?:b\.?sc|m\.?sc|ph\.?d|b\.?a|m\.?a|b\.?eng|m\.?eng|mba|bachelor|master|degree|diploma|certificate|a[- ]levels?|gcses?|hnd|btec)\b")
        .expect("Invalid degree regex")
});

static INSTITUTION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(?:university|college|institute|school|academy|polytechnic)\b")
        .expect("Invalid institution regex")
});

static GRADE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(?:first|second|upper|lower|honours|hons|merit|distinction|gpa|grade|2:1|2:2)(?:\b|$)")
        .expect("Invalid grade regex")
});

fn first_matching(lines: &[String], pattern: &Regex) -> String {
    lines
        .iter()
        .find(|l| pattern.is_match(l))
        .map(|l| l.trim().to_string())
        .unwrap_or_default()
}

pub fn parse_education(lines: &[String]) -> Education {
    let joined = lines.join(" ");
    let mut dates = safe_match(&joined, &DATE_RANGE);
    if dates.is_empty() {
        dates = safe_match(&joined, &YEAR);
    }

    Education {
        degree: first_matching(lines, &DEGREE),
        university: first_matching(lines, &INSTITUTION),
        dates,
        grade: first_matching(lines, &GRADE),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processing::normalize::lines_from;

    #[test]
    fn test_full_record() {
        let lines = lines_from(
            "University of Manchester\nBSc Computer Science\n2014 - 2017\nFirst Class Honours",
        );
        let education = parse_education(&lines);

        assert_eq!(education.degree, "BSc Computer Science");
        assert_eq!(education.university, "University of Manchester");
        assert_eq!(education.dates, "2014 - 2017");
        assert_eq!(education.grade, "First Class Honours");
    }

    #[test]
    fn test_line_order_does_not_matter() {
        let lines = lines_from("Grade: Merit\nMaster of Science in Data\nKing's College London");
        let education = parse_education(&lines);

        assert_eq!(education.degree, "Master of Science in Data");
        assert_eq!(education.university, "King's College London");
        assert_eq!(education.grade, "Grade: Merit");
    }

    #[test]
    fn test_single_year_fallback() {
        let lines = lines_from("Diploma in Design, graduated 2012");
        assert_eq!(parse_education(&lines).dates, "2012");
    }

    #[test]
    fn test_unmatched_fields_default_to_empty() {
        let education = parse_education(&lines_from("Something unrelated"));
        assert_eq!(education, Education::default());
    }
}
