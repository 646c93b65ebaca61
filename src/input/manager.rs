//! Input manager: routes CV files to the right extractor and hands the text
//! to the parser

use crate::error::{Result, CvImportError};
use crate::input::file_detector::FileType;
use crate::input::text_extractor::{TextExtractor, PdfExtractor, PlainTextExtractor, MarkdownExtractor};
use crate::processing::parser::{CvParser, ParseOutcome};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use log::{debug, info};

pub struct InputManager {
    cache: HashMap<PathBuf, String>,
    enable_cache: bool,
}

impl Default for InputManager {
    fn default() -> Self {
        Self::new()
    }
}

impl InputManager {
    pub fn new() -> Self {
        Self {
            cache: HashMap::new(),
            enable_cache: true,
        }
    }

    pub fn with_cache(mut self, enable: bool) -> Self {
        self.enable_cache = enable;
        self
    }

    pub async fn extract_text(&mut self, path: &Path) -> Result<String> {
        if self.enable_cache {
            if let Some(cached_text) = self.cache.get(path) {
                debug!("Using cached text for: {}", path.display());
                return Ok(cached_text.clone());
            }
        }

        if !path.exists() {
            return Err(CvImportError::InvalidInput(format!(
                "File does not exist: {}",
                path.display()
            )));
        }

        let file_type = FileType::from_path(path);
        info!("Extracting {:?} text from: {}", file_type, path.display());

        let text = match file_type {
            FileType::Pdf => PdfExtractor.extract(path).await?,
            FileType::Text => PlainTextExtractor.extract(path).await?,
            FileType::Markdown => MarkdownExtractor.extract(path).await?,
            FileType::Unknown => {
                return Err(CvImportError::UnsupportedFormat(format!(
                    "Unsupported file type for: {} (expected pdf, txt or md)",
                    path.display()
                )));
            }
        };

        if self.enable_cache {
            self.cache.insert(path.to_path_buf(), text.clone());
        }

        Ok(text)
    }

    /// Extract a file and run it through the parser. Only reading the file
    /// can fail; parsing always yields an outcome.
    pub async fn import_cv(&mut self, path: &Path, parser: &CvParser) -> Result<ParseOutcome> {
        let text = self.extract_text(path).await?;
        Ok(parser.parse_cv(&text))
    }

    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }

    pub fn cache_size(&self) -> usize {
        self.cache.len()
    }
}
