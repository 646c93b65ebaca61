//! CV structures produced by the parser and consumed by the store and renderer

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CvDocument {
    pub personal_details: PersonalDetails,
    pub profile: String,
    pub education: Education,
    pub work_experience: Vec<Job>,
    pub personal_projects: Vec<Project>,
    pub certificates: Vec<Certificate>,
    pub courses: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PersonalDetails {
    pub name: String,
    pub phone: String,
    pub address: String,
    pub email: String,
    pub website: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Education {
    pub degree: String,
    pub university: String,
    pub dates: String,
    pub grade: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Job {
    pub title: String,
    pub company: String,
    pub dates: String,
    pub description: String,
    pub responsibilities: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Project {
    pub title: String,
    pub technologies: String,
    pub responsibilities: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Certificate {
    pub title: String,
    pub description: String,
}

/// The six canonical CV sections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SectionKey {
    Profile,
    Experience,
    Education,
    Projects,
    Certs,
    Courses,
}

impl SectionKey {
    pub const ALL: [SectionKey; 6] = [
        SectionKey::Profile,
        SectionKey::Experience,
        SectionKey::Education,
        SectionKey::Projects,
        SectionKey::Certs,
        SectionKey::Courses,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SectionKey::Profile => "profile",
            SectionKey::Experience => "experience",
            SectionKey::Education => "education",
            SectionKey::Projects => "projects",
            SectionKey::Certs => "certs",
            SectionKey::Courses => "courses",
        }
    }
}

impl fmt::Display for SectionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SectionKey::Profile => write!(f, "Profile"),
            SectionKey::Experience => write!(f, "Work Experience"),
            SectionKey::Education => write!(f, "Education"),
            SectionKey::Projects => write!(f, "Personal Projects"),
            SectionKey::Certs => write!(f, "Certificates"),
            SectionKey::Courses => write!(f, "Courses"),
        }
    }
}

impl FromStr for SectionKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "profile" | "summary" => Ok(SectionKey::Profile),
            "experience" | "work" | "jobs" => Ok(SectionKey::Experience),
            "education" => Ok(SectionKey::Education),
            "projects" => Ok(SectionKey::Projects),
            "certs" | "certificates" | "certifications" => Ok(SectionKey::Certs),
            "courses" => Ok(SectionKey::Courses),
            other => Err(format!(
                "Unknown section: {}. Supported: profile, experience, education, projects, certs, courses",
                other
            )),
        }
    }
}

impl Job {
    pub fn is_empty(&self) -> bool {
        self.title.trim().is_empty()
            && self.company.trim().is_empty()
            && self.responsibilities.iter().all(|r| r.trim().is_empty())
    }

    /// Trim every field and drop blank responsibilities.
    pub fn tidy(&mut self) {
        self.title = self.title.trim().to_string();
        self.company = self.company.trim().to_string();
        self.dates = self.dates.trim().to_string();
        self.description = self.description.trim().to_string();
        self.responsibilities = self
            .responsibilities
            .iter()
            .map(|r| r.trim().to_string())
            .filter(|r| !r.is_empty())
            .collect();
    }
}

impl Project {
    pub fn is_empty(&self) -> bool {
        self.title.trim().is_empty() && self.responsibilities.iter().all(|r| r.trim().is_empty())
    }
}

impl Certificate {
    pub fn is_empty(&self) -> bool {
        self.title.trim().is_empty() && self.description.trim().is_empty()
    }
}

impl Education {
    pub fn is_empty(&self) -> bool {
        self.degree.is_empty() && self.university.is_empty() && self.dates.is_empty() && self.grade.is_empty()
    }
}

impl PersonalDetails {
    pub fn is_empty(&self) -> bool {
        self.name.is_empty()
            && self.phone.is_empty()
            && self.address.is_empty()
            && self.email.is_empty()
            && self.website.is_empty()
    }
}

impl CvDocument {
    pub fn section_is_empty(&self, key: SectionKey) -> bool {
        match key {
            SectionKey::Profile => self.profile.trim().is_empty(),
            SectionKey::Experience => self.work_experience.is_empty(),
            SectionKey::Education => self.education.is_empty(),
            SectionKey::Projects => self.personal_projects.is_empty(),
            SectionKey::Certs => self.certificates.is_empty(),
            SectionKey::Courses => self.courses.trim().is_empty(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.personal_details.is_empty() && SectionKey::ALL.iter().all(|k| self.section_is_empty(*k))
    }
}
