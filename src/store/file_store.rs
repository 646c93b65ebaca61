//! JSON-file profile store: one `<id>.json` per CV plus an `index.json`

use crate::error::{CvImportError, Result};
use crate::processing::document::CvDocument;
use crate::store::{sort_recent_first, unique_id, ProfileMeta, ProfileStore};
use chrono::Utc;
use log::{debug, info};
use std::fs;
use std::path::{Path, PathBuf};

/// File stem of the metadata index; never handed out as a profile id.
const INDEX_ID: &str = "index";

pub struct FileProfileStore {
    root: PathBuf,
}

impl FileProfileStore {
    /// Open (creating if needed) a store rooted at `root`.
    pub fn open(root: impl AsRef<Path>) -> Result<Self> {
        let root = root.as_ref().to_path_buf();
        fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn profile_path(&self, id: &str) -> PathBuf {
        self.root.join(format!("{}.json", id))
    }

    fn read_index(&self) -> Result<Vec<ProfileMeta>> {
        let path = self.profile_path(INDEX_ID);
        if !path.exists() {
            return Ok(Vec::new());
        }
        let content = fs::read_to_string(&path)?;
        Ok(serde_json::from_str(&content)?)
    }

    fn write_index(&self, index: &[ProfileMeta]) -> Result<()> {
        let content = serde_json::to_string_pretty(index)?;
        fs::write(self.profile_path(INDEX_ID), content)?;
        Ok(())
    }

    fn write_profile(&self, id: &str, cv: &CvDocument) -> Result<()> {
        let content = serde_json::to_string_pretty(cv)?;
        fs::write(self.profile_path(id), content)?;
        Ok(())
    }

    fn position(index: &[ProfileMeta], id: &str) -> Result<usize> {
        index
            .iter()
            .position(|m| m.id == id)
            .ok_or_else(|| CvImportError::ProfileNotFound(id.to_string()))
    }
}

impl ProfileStore for FileProfileStore {
    fn save(&mut self, name: &str, cv: &CvDocument) -> Result<ProfileMeta> {
        let mut index = self.read_index()?;
        let id = unique_id(name, |candidate| {
            candidate == INDEX_ID
                || index.iter().any(|m| m.id == candidate)
                || self.profile_path(candidate).exists()
        });

        let now = Utc::now();
        let meta = ProfileMeta {
            id: id.clone(),
            name: name.trim().to_string(),
            created_at: now,
            updated_at: now,
        };

        self.write_profile(&id, cv)?;
        index.push(meta.clone());
        self.write_index(&index)?;
        info!("Saved profile '{}' as {}", meta.name, self.profile_path(&id).display());
        Ok(meta)
    }

    fn update(&mut self, id: &str, cv: &CvDocument) -> Result<ProfileMeta> {
        let mut index = self.read_index()?;
        let pos = Self::position(&index, id)?;

        self.write_profile(id, cv)?;
        index[pos].updated_at = Utc::now();
        self.write_index(&index)?;
        Ok(index[pos].clone())
    }

    fn load(&self, id: &str) -> Result<CvDocument> {
        Self::position(&self.read_index()?, id)?;
        let path = self.profile_path(id);
        if !path.exists() {
            return Err(CvImportError::ProfileNotFound(id.to_string()));
        }
        debug!("Loading profile from {}", path.display());
        let content = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    fn delete(&mut self, id: &str) -> Result<()> {
        let mut index = self.read_index()?;
        let pos = Self::position(&index, id)?;

        let path = self.profile_path(id);
        if path.exists() {
            fs::remove_file(path)?;
        }
        index.remove(pos);
        self.write_index(&index)?;
        info!("Deleted profile {}", id);
        Ok(())
    }

    fn rename(&mut self, id: &str, new_name: &str) -> Result<ProfileMeta> {
        let mut index = self.read_index()?;
        let pos = Self::position(&index, id)?;

        index[pos].name = new_name.trim().to_string();
        index[pos].updated_at = Utc::now();
        self.write_index(&index)?;
        Ok(index[pos].clone())
    }

    fn list(&self) -> Result<Vec<ProfileMeta>> {
        let mut index = self.read_index()?;
        sort_recent_first(&mut index);
        Ok(index)
    }
}
