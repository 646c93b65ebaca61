//! Free-text sections: profile and courses

use crate::processing::normalize::{normalize_whitespace, truncate_chars};

pub fn parse_profile(lines: &[String], max_chars: usize) -> String {
    let joined = normalize_whitespace(&lines.join(" "));
    truncate_chars(&joined, max_chars).trim_end().to_string()
}

pub fn parse_courses(lines: &[String]) -> String {
    lines
        .iter()
        .map(|l| l.trim())
        .filter(|l| !l.is_empty())
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processing::normalize::lines_from;

    #[test]
    fn test_profile_joins_lines() {
        let lines = lines_from("Curious engineer\nwho likes parsers.");
        assert_eq!(parse_profile(&lines, 600), "Curious engineer who likes parsers.");
    }

    #[test]
    fn test_profile_is_capped() {
        let lines = vec!["x".repeat(1000)];
        assert_eq!(parse_profile(&lines, 600).chars().count(), 600);
    }

    #[test]
    fn test_courses_joined_with_semicolons() {
        let lines = lines_from("Rust for Rustaceans\nDistributed Systems 101");
        assert_eq!(parse_courses(&lines), "Rust for Rustaceans; Distributed Systems 101");
    }
}
