//! Certificates parser
//!
//! Two passes over the same lines. The simple pass starts a certificate on
//! every plain line. The refined pass also folds plain lines into the
//! previous certificate's description when they read as the continuation of
//! an accreditation blurb. The refined result wins whenever it finds
//! anything.

use crate::processing::document::Certificate;
use crate::processing::patterns::{is_bullet, strip_bullet, KeywordSet};
use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;

static ACCREDITATION_TITLE: Lazy<KeywordSet> = Lazy::new(|| {
    KeywordSet::new(&[
        "certificate", "certification", "certified", "program", "programme", "course", "training",
    ])
});

static CONTINUATION_START: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^(?:a comprehensive|programs?\b|programmes?\b|skills\b|including\b)")
        .expect("Invalid continuation regex")
});

fn append(description: &mut String, text: &str) {
    if text.is_empty() {
        return;
    }
    if !description.is_empty() {
        description.push(' ');
    }
    description.push_str(text);
}

/// A line cut off mid-sentence: its first word is all lower case. Names
/// such as "iOS" or "eBay" start lower case but carry a capital.
fn is_wrapped(line: &str) -> bool {
    line.split_whitespace()
        .next()
        .is_some_and(|word| word.chars().any(char::is_lowercase) && !word.chars().any(char::is_uppercase))
}

fn is_continuation(title: &str, line: &str) -> bool {
    is_wrapped(line) || (ACCREDITATION_TITLE.contains_word(title) && CONTINUATION_START.is_match(line))
}

fn collect(lines: &[String], fold_continuations: bool) -> Vec<Certificate> {
    let mut certificates: Vec<Certificate> = Vec::new();

    for line in lines {
        let line = line.trim();
        if is_bullet(line) {
            let text = strip_bullet(line);
            match certificates.last_mut() {
                Some(certificate) => append(&mut certificate.description, &text),
                None => certificates.push(Certificate {
                    title: text,
                    ..Default::default()
                }),
            }
            continue;
        }

        if fold_continuations {
            if let Some(certificate) = certificates.last_mut() {
                if is_continuation(&certificate.title, line) {
                    debug!("Folding into '{}': {}", certificate.title, line);
                    append(&mut certificate.description, line);
                    continue;
                }
            }
        }

        certificates.push(Certificate {
            title: line.to_string(),
            ..Default::default()
        });
    }

    certificates.retain(|c| !c.is_empty());
    certificates
}

pub fn parse_certificates(lines: &[String]) -> Vec<Certificate> {
    let refined = collect(lines, true);
    if refined.is_empty() {
        collect(lines, false)
    } else {
        refined
    }
}
