//! In-memory profile store for tests and dry runs

use crate::error::{CvImportError, Result};
use crate::processing::document::CvDocument;
use crate::store::{sort_recent_first, unique_id, ProfileMeta, ProfileStore};
use chrono::Utc;
use std::collections::HashMap;

#[derive(Debug, Default)]
pub struct MemoryProfileStore {
    profiles: HashMap<String, (ProfileMeta, CvDocument)>,
}

impl MemoryProfileStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn entry_mut(&mut self, id: &str) -> Result<&mut (ProfileMeta, CvDocument)> {
        self.profiles
            .get_mut(id)
            .ok_or_else(|| CvImportError::ProfileNotFound(id.to_string()))
    }
}

impl ProfileStore for MemoryProfileStore {
    fn save(&mut self, name: &str, cv: &CvDocument) -> Result<ProfileMeta> {
        let id = unique_id(name, |candidate| self.profiles.contains_key(candidate));
        let now = Utc::now();
        let meta = ProfileMeta {
            id: id.clone(),
            name: name.trim().to_string(),
            created_at: now,
            updated_at: now,
        };
        self.profiles.insert(id, (meta.clone(), cv.clone()));
        Ok(meta)
    }

    fn update(&mut self, id: &str, cv: &CvDocument) -> Result<ProfileMeta> {
        let (meta, stored) = self.entry_mut(id)?;
        *stored = cv.clone();
        meta.updated_at = Utc::now();
        Ok(meta.clone())
    }

    fn load(&self, id: &str) -> Result<CvDocument> {
        self.profiles
            .get(id)
            .map(|(_, cv)| cv.clone())
            .ok_or_else(|| CvImportError::ProfileNotFound(id.to_string()))
    }

    fn delete(&mut self, id: &str) -> Result<()> {
        self.profiles
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| CvImportError::ProfileNotFound(id.to_string()))
    }

    fn rename(&mut self, id: &str, new_name: &str) -> Result<ProfileMeta> {
        let (meta, _) = self.entry_mut(id)?;
        meta.name = new_name.trim().to_string();
        meta.updated_at = Utc::now();
        Ok(meta.clone())
    }

    fn list(&self) -> Result<Vec<ProfileMeta>> {
        let mut metas: Vec<ProfileMeta> = self.profiles.values().map(|(m, _)| m.clone()).collect();
        sort_recent_first(&mut metas);
        Ok(metas)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> CvDocument {
        CvDocument {
            profile: "Engineer".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_save_load_delete() {
        let mut store = MemoryProfileStore::new();
        let meta = store.save("Jane Doe", &sample()).unwrap();
        assert_eq!(meta.id, "jane-doe");
        assert_eq!(store.load("jane-doe").unwrap(), sample());

        store.delete("jane-doe").unwrap();
        assert!(matches!(store.load("jane-doe"), Err(CvImportError::ProfileNotFound(_))));
        assert!(store.delete("jane-doe").is_err());
    }

    #[test]
    fn test_duplicate_names_get_distinct_ids() {
        let mut store = MemoryProfileStore::new();
        let first = store.save("Jane Doe", &sample()).unwrap();
        let second = store.save("Jane Doe", &CvDocument::default()).unwrap();
        assert_ne!(first.id, second.id);
        assert_eq!(store.list().unwrap().len(), 2);
    }

    #[test]
    fn test_rename_keeps_id() {
        let mut store = MemoryProfileStore::new();
        let meta = store.save("Draft", &sample()).unwrap();
        let renamed = store.rename(&meta.id, "Final CV").unwrap();
        assert_eq!(renamed.id, meta.id);
        assert_eq!(renamed.name, "Final CV");
        assert_eq!(store.load(&meta.id).unwrap(), sample());
    }

    #[test]
    fn test_update_replaces_document() {
        let mut store = MemoryProfileStore::new();
        let meta = store.save("Draft", &CvDocument::default()).unwrap();
        store.update(&meta.id, &sample()).unwrap();
        assert_eq!(store.load(&meta.id).unwrap().profile, "Engineer");
        assert!(store.update("missing", &sample()).is_err());
    }
}
