//! Personal projects parser

use crate::processing::document::Project;
use crate::processing::patterns::{is_bullet, strip_bullet};
use once_cell::sync::Lazy;
use regex::Regex;

static TECHNOLOGIES: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^(?:[-–—•*·▪◦●]\s*)?(?:technolog(?:y|ies)|tech(?:nical)? stack|stack|tools)\s*:")
        .expect("Invalid technologies regex")
});

const MAX_PROJECT_TITLE_CHARS: usize = 80;

fn is_project_title(line: &str) -> bool {
    line.chars().count() < MAX_PROJECT_TITLE_CHARS && !line.ends_with('.')
}

pub fn parse_projects(lines: &[String]) -> Vec<Project> {
    let mut projects = Vec::new();
    let mut current: Option<Project> = None;

    let mut flush = |current: &mut Option<Project>| {
        if let Some(project) = current.take() {
            if !project.is_empty() {
                projects.push(project);
            }
        }
    };

    for line in lines {
        let line = line.trim();

        if TECHNOLOGIES.is_match(line) {
            let technologies = TECHNOLOGIES.replace(line, "").trim().to_string();
            current.get_or_insert_with(Project::default).technologies = technologies;
        } else if is_bullet(line) {
            let text = strip_bullet(line);
            if !text.is_empty() {
                current.get_or_insert_with(Project::default).responsibilities.push(text);
            }
        } else if current.is_none() || is_project_title(line) {
            flush(&mut current);
            current = Some(Project {
                title: line.to_string(),
                ..Default::default()
            });
        } else if let Some(project) = current.as_mut() {
            project.responsibilities.push(line.to_string());
        }
    }
    flush(&mut current);

    projects
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processing::normalize::lines_from;

    #[test]
    fn test_projects_with_technologies_and_bullets() {
        let lines = lines_from(
            "CV Builder\nTechnologies: Rust, Askama\n- Parsed PDFs into structured data\n- Rendered HTML previews\nHome Weather Station\nTechnology: C, MQTT\n* Logged sensor data every minute",
        );
        let projects = parse_projects(&lines);

        assert_eq!(projects.len(), 2);
        assert_eq!(projects[0].title, "CV Builder");
        assert_eq!(projects[0].technologies, "Rust, Askama");
        assert_eq!(projects[0].responsibilities.len(), 2);
        assert_eq!(projects[1].title, "Home Weather Station");
        assert_eq!(projects[1].technologies, "C, MQTT");
        assert_eq!(projects[1].responsibilities, vec!["Logged sensor data every minute"]);
    }

    #[test]
    fn test_unmarked_detail_lines_become_responsibilities() {
        let lines = lines_from(
            "Budget Tracker\nA small web app for tracking monthly household spending and savings goals.",
        );
        let projects = parse_projects(&lines);

        assert_eq!(projects.len(), 1);
        assert_eq!(
            projects[0].responsibilities,
            vec!["A small web app for tracking monthly household spending and savings goals."]
        );
    }

    #[test]
    fn test_short_sentences_are_kept() {
        let projects = parse_projects(&lines_from("Hackathon Entry\n- Built a route planner\nWon first prize."));

        assert_eq!(projects.len(), 1);
        assert_eq!(projects[0].responsibilities, vec!["Built a route planner", "Won first prize."]);
    }

    #[test]
    fn test_technologies_prefix_is_case_insensitive() {
        let projects = parse_projects(&lines_from("Game\nTECHNOLOGIES: Bevy"));
        assert_eq!(projects[0].technologies, "Bevy");
    }

    #[test]
    fn test_empty_projects_are_dropped() {
        let projects = parse_projects(&lines_from("Technologies: Rust"));
        assert!(projects.is_empty());
    }
}
