//! Contact field extraction: email, phone, website, address and name
//!
//! Phone and postcode patterns are UK-specific. Numbers and addresses in
//! other formats are left empty rather than guessed.

use crate::config::ParserConfig;
use crate::processing::document::PersonalDetails;
use crate::processing::normalize::{normalize_whitespace, safe_match};
use crate::processing::patterns::ROLE_KEYWORDS;
use crate::processing::sections::is_header_line;
use once_cell::sync::Lazy;
use regex::Regex;

static EMAIL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b[a-z0-9._%+-]+@[a-z0-9.-]+\.[a-z]{2,}\b").expect("Invalid email regex")
});

static URL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(?:https?://[^\s,;<>]+|\bwww\.[a-z0-9-]+(?:\.[a-z0-9-]+)+[^\s,;<>]*)")
        .expect("Invalid URL regex")
});

/// UK mobile (`+44 7911 123456`, `07911 123 456`) or landline with area
/// codes starting 1, 2, 3, 5 or 8 (`020 7946 0958`, `+44 (0)161 496 0000`).
static PHONE: Lazy<Regex> = Lazy::new(|| {
    let mobile = r"(?:\+44\s?7\d{3}|\(?07\d{3}\)?)[\s-]?\d{3}[\s-]?\d{3}";
    let landline = r"(?:\+44\s?(?:\(0\)\s?)?|\(?0)[12358]\d{1,3}\)?[\s-]?\d{3,4}[\s-]?\d{3,4}";
    Regex::new(&format!(r"(?:{mobile})|(?:{landline})")).expect("Invalid phone regex")
});

static POSTCODE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b[a-z]{1,2}\d[a-z\d]?\s*\d[a-z]{2}\b").expect("Invalid postcode regex")
});

const STREET_SUFFIX: &str = r"street|st|road|rd|avenue|ave|lane|ln|drive|dr|close|court|ct|way|place|pl|crescent|terrace|grove|gardens|square|sq|hill|park|row|mews|walk|boulevard|parade";

static STREET: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(r"(?i)\b(?:{STREET_SUFFIX})\b\.?")).expect("Invalid street regex")
});

static HOUSE_NUMBER_STREET: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(r"(?i)^(?:flat\s+\w+,?\s+)?\d+[a-z]?,?\s+[\w\s'.-]*\b(?:{STREET_SUFFIX})\b"))
        .expect("Invalid house number regex")
});

static PLACE_NAME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[\p{L}][\p{L}\s'.,-]{1,40}$").expect("Invalid place name regex")
});

static NAME_TOKEN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\p{Lu}[\p{Ll}'’-]*(?:['’-]\p{Lu}[\p{Ll}'’-]*)*$").expect("Invalid name regex")
});

const MAX_NAME_CHARS: usize = 60;
const MAX_PLACE_WORDS: usize = 4;

pub fn extract_email(text: &str) -> String {
    safe_match(text, &EMAIL)
}

pub fn extract_url(text: &str) -> String {
    safe_match(text, &URL)
        .trim_end_matches(['.', ',', ')', ']', ';', ':'])
        .to_string()
}

pub fn extract_phone(text: &str) -> String {
    safe_match(text, &PHONE)
}

fn is_address_seed(line: &str) -> bool {
    POSTCODE.is_match(line) || HOUSE_NUMBER_STREET.is_match(line)
}

fn looks_addressy(line: &str, exclude: &[&str]) -> bool {
    if exclude.iter().any(|e| !e.is_empty() && *e == line) || is_header_line(line) {
        return false;
    }
    if POSTCODE.is_match(line) || STREET.is_match(line) {
        return !line.contains('@');
    }
    PLACE_NAME.is_match(line)
        && line.split_whitespace().count() <= MAX_PLACE_WORDS
        && !ROLE_KEYWORDS.contains_word(line)
}

/// Find an address block around the first line that looks like an address.
/// `exclude` lists lines known to be something else (e.g. the name).
pub fn extract_address(lines: &[String], exclude: &[&str], window: usize) -> String {
    let Some(seed) = lines.iter().position(|l| is_address_seed(l)) else {
        return String::new();
    };

    let mut start = seed;
    while start > 0 && seed - (start - 1) <= window && looks_addressy(&lines[start - 1], exclude) {
        start -= 1;
    }

    let mut end = seed;
    while end + 1 < lines.len() && (end + 1) - seed <= window && looks_addressy(&lines[end + 1], exclude) {
        end += 1;
    }

    lines[start..=end].join("\n")
}

fn looks_like_name(line: &str) -> bool {
    let line = normalize_whitespace(line);
    if line.is_empty()
        || line.chars().count() > MAX_NAME_CHARS
        || line.contains('@')
        || line.chars().any(|c| c.is_ascii_digit())
    {
        return false;
    }

    let tokens: Vec<&str> = line.split_whitespace().collect();
    (2..=4).contains(&tokens.len())
        && tokens.iter().all(|t| NAME_TOKEN.is_match(t))
        && !ROLE_KEYWORDS.contains_word(&line)
        && !is_header_line(&line)
}

/// First of the leading `scan` lines shaped like "First [Middle] Last".
pub fn guess_name(lines: &[String], scan: usize) -> String {
    lines
        .iter()
        .take(scan)
        .find(|l| looks_like_name(l))
        .map(|l| normalize_whitespace(l))
        .unwrap_or_default()
}

pub fn extract_personal_details(text: &str, lines: &[String], config: &ParserConfig) -> PersonalDetails {
    let name = guess_name(lines, config.name_scan_lines);
    let address = extract_address(lines, &[name.as_str()], config.address_window);

    PersonalDetails {
        email: extract_email(text),
        phone: extract_phone(text),
        website: extract_url(text),
        address,
        name,
    }
}
