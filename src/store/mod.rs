//! Profile persistence: saved CV structures addressed by id

pub mod file_store;
pub mod memory_store;

pub use file_store::FileProfileStore;
pub use memory_store::MemoryProfileStore;

use crate::error::Result;
use crate::processing::document::CvDocument;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileMeta {
    pub id: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

pub trait ProfileStore {
    /// Store a new profile and return its metadata, including the new id.
    fn save(&mut self, name: &str, cv: &CvDocument) -> Result<ProfileMeta>;
    /// Replace the CV held under an existing id.
    fn update(&mut self, id: &str, cv: &CvDocument) -> Result<ProfileMeta>;
    fn load(&self, id: &str) -> Result<CvDocument>;
    fn delete(&mut self, id: &str) -> Result<()>;
    /// Change the display name. The id stays the same.
    fn rename(&mut self, id: &str, new_name: &str) -> Result<ProfileMeta>;
    /// Metadata of every profile, most recently updated first.
    fn list(&self) -> Result<Vec<ProfileMeta>>;
}

/// Lower-case, dash-separated id derived from a display name.
pub fn slugify(name: &str) -> String {
    let mut slug = String::new();
    for c in name.trim().chars() {
        if c.is_alphanumeric() {
            slug.extend(c.to_lowercase());
        } else if !slug.is_empty() && !slug.ends_with('-') {
            slug.push('-');
        }
    }
    let slug = slug.trim_end_matches('-').to_string();
    if slug.is_empty() {
        "profile".to_string()
    } else {
        slug
    }
}

/// First id based on `name` that `taken` does not already contain.
pub fn unique_id<F>(name: &str, taken: F) -> String
where
    F: Fn(&str) -> bool,
{
    let base = slugify(name);
    if !taken(&base) {
        return base;
    }
    let mut n = 2;
    loop {
        let candidate = format!("{}-{}", base, n);
        if !taken(&candidate) {
            return candidate;
        }
        n += 1;
    }
}

pub(crate) fn sort_recent_first(metas: &mut [ProfileMeta]) {
    metas.sort_by(|a, b| b.updated_at.cmp(&a.updated_at).then_with(|| a.id.cmp(&b.id)));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Jane Doe"), "jane-doe");
        assert_eq!(slugify("  Jane   Doe (2024)! "), "jane-doe-2024");
        assert_eq!(slugify("Zoë"), "zoë");
        assert_eq!(slugify("!!!"), "profile");
    }

    #[test]
    fn test_unique_id() {
        let taken = ["jane-doe", "jane-doe-2"];
        assert_eq!(unique_id("Jane Doe", |id| taken.contains(&id)), "jane-doe-3");
        assert_eq!(unique_id("John", |id| taken.contains(&id)), "john");
    }
}
