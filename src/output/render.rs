//! Printable HTML rendering of a parsed CV

use crate::error::{CvImportError, Result};
use crate::processing::document::{CvDocument, SectionKey};
use askama::Template;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TemplateId {
    #[default]
    Classic,
    Modern,
    Compact,
}

impl TemplateId {
    pub fn as_str(&self) -> &'static str {
        match self {
            TemplateId::Classic => "classic",
            TemplateId::Modern => "modern",
            TemplateId::Compact => "compact",
        }
    }

    fn stylesheet(&self) -> &'static str {
        match self {
            TemplateId::Classic => CLASSIC_CSS,
            TemplateId::Modern => MODERN_CSS,
            TemplateId::Compact => COMPACT_CSS,
        }
    }
}

impl fmt::Display for TemplateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TemplateId {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "classic" => Ok(TemplateId::Classic),
            "modern" => Ok(TemplateId::Modern),
            "compact" => Ok(TemplateId::Compact),
            other => Err(format!(
                "Unknown template: {}. Supported: classic, modern, compact",
                other
            )),
        }
    }
}

const CLASSIC_CSS: &str = r#"
        body { font-family: Georgia, 'Times New Roman', serif; color: #222; max-width: 800px; margin: 0 auto; padding: 32px; line-height: 1.5; }
        header { text-align: center; border-bottom: 1px solid #444; padding-bottom: 12px; }
        h2 { font-variant: small-caps; border-bottom: 1px solid #ccc; margin-top: 28px; }
        .entry { margin: 14px 0; }
        .meta { color: #555; font-style: italic; }
"#;

const MODERN_CSS: &str = r#"
        body { font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif; color: #333; max-width: 860px; margin: 0 auto; padding: 32px; line-height: 1.6; }
        header { border-left: 6px solid #007acc; padding-left: 16px; }
        h2 { color: #007acc; text-transform: uppercase; letter-spacing: 0.08em; font-size: 1.05em; margin-top: 30px; }
        .entry { margin: 16px 0; padding-left: 12px; border-left: 2px solid #e9ecef; }
        .meta { color: #6c757d; }
"#;

const COMPACT_CSS: &str = r#"
        body { font-family: Arial, Helvetica, sans-serif; font-size: 10pt; color: #000; max-width: 760px; margin: 0 auto; padding: 16px; line-height: 1.3; }
        header h1 { margin: 0; font-size: 16pt; }
        h2 { font-size: 11pt; margin: 12px 0 4px; border-bottom: 1px solid #000; }
        .entry { margin: 6px 0; }
        .meta { color: #333; }
        ul { margin: 2px 0; padding-left: 18px; }
"#;

#[derive(Template)]
#[template(source = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{{ title }}</title>
    <style>{{ stylesheet|safe }}
        @media print { body { padding: 0; } }
    </style>
</head>
<body class="template-{{ template_name }}">
    <header>
        {% if !name.is_empty() %}<h1>{{ name }}</h1>{% endif %}
        {% if !contact.is_empty() %}<p class="contact">{% for item in contact %}{% if !loop.first %} | {% endif %}{{ item }}{% endfor %}</p>{% endif %}
    </header>
    {% for section in sections %}
    <section class="section-{{ section.key }}">
        <h2>{{ section.heading }}</h2>
        {% if !section.text.is_empty() %}<p>{{ section.text }}</p>{% endif %}
        {% for entry in section.entries %}
        <div class="entry">
            {% if !entry.title.is_empty() %}<h3>{{ entry.title }}</h3>{% endif %}
            {% if !entry.meta.is_empty() %}<p class="meta">{% for item in entry.meta %}{% if !loop.first %} | {% endif %}{{ item }}{% endfor %}</p>{% endif %}
            {% if !entry.body.is_empty() %}<p>{{ entry.body }}</p>{% endif %}
            {% if !entry.bullets.is_empty() %}
            <ul>
                {% for bullet in entry.bullets %}<li>{{ bullet }}</li>
                {% endfor %}
            </ul>
            {% endif %}
        </div>
        {% endfor %}
    </section>
    {% endfor %}
</body>
</html>"#, ext = "html")]
struct CvTemplate {
    title: String,
    template_name: &'static str,
    stylesheet: &'static str,
    name: String,
    contact: Vec<String>,
    sections: Vec<SectionView>,
}

struct SectionView {
    key: &'static str,
    heading: String,
    text: String,
    entries: Vec<EntryView>,
}

#[derive(Default)]
struct EntryView {
    title: String,
    meta: Vec<String>,
    body: String,
    bullets: Vec<String>,
}

fn non_empty(values: &[&str]) -> Vec<String> {
    values
        .iter()
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .collect()
}

fn section_view(cv: &CvDocument, key: SectionKey) -> SectionView {
    let mut view = SectionView {
        key: key.as_str(),
        heading: key.to_string(),
        text: String::new(),
        entries: Vec::new(),
    };

    match key {
        SectionKey::Profile => view.text = cv.profile.trim().to_string(),
        SectionKey::Courses => view.text = cv.courses.trim().to_string(),
        SectionKey::Experience => {
            view.entries = cv
                .work_experience
                .iter()
                .map(|job| EntryView {
                    title: job.title.clone(),
                    meta: non_empty(&[&job.company, &job.dates]),
                    body: job.description.clone(),
                    bullets: job.responsibilities.clone(),
                })
                .collect();
        }
        SectionKey::Education => {
            let edu = &cv.education;
            let grade = if edu.grade.trim().is_empty() {
                String::new()
            } else {
                format!("Grade: {}", edu.grade.trim())
            };
            view.entries.push(EntryView {
                title: edu.degree.clone(),
                meta: non_empty(&[&edu.university, &edu.dates]),
                body: grade,
                bullets: Vec::new(),
            });
        }
        SectionKey::Projects => {
            view.entries = cv
                .personal_projects
                .iter()
                .map(|project| EntryView {
                    title: project.title.clone(),
                    meta: non_empty(&[&project.technologies]),
                    bullets: project.responsibilities.clone(),
                    ..Default::default()
                })
                .collect();
        }
        SectionKey::Certs => {
            view.entries = cv
                .certificates
                .iter()
                .map(|cert| EntryView {
                    title: cert.title.clone(),
                    body: cert.description.clone(),
                    ..Default::default()
                })
                .collect();
        }
    }

    view
}

/// Render `cv` as a standalone HTML page. Sections appear in
/// `section_order`; keys left out of the order and empty sections are not
/// rendered.
pub fn render(cv: &CvDocument, template: TemplateId, section_order: &[SectionKey]) -> Result<String> {
    let details = &cv.personal_details;
    let mut seen = Vec::new();
    let sections = section_order
        .iter()
        .copied()
        .filter(|key| {
            if seen.contains(key) {
                return false;
            }
            seen.push(*key);
            !cv.section_is_empty(*key)
        })
        .map(|key| section_view(cv, key))
        .collect();

    let title = if details.name.trim().is_empty() {
        "Curriculum Vitae".to_string()
    } else {
        format!("{} - CV", details.name.trim())
    };

    let page = CvTemplate {
        title,
        template_name: template.as_str(),
        stylesheet: template.stylesheet(),
        name: details.name.trim().to_string(),
        contact: non_empty(&[&details.email, &details.phone, &details.website, &details.address]),
        sections,
    };

    page.render().map_err(|e| CvImportError::Render(e.to_string()))
}
